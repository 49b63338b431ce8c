//! Migration to create the profiles table.
//!
//! Profiles are platform accounts (talent, studio staff, admins). Session
//! issuance lives in the external auth service; this table stores the
//! contact and tenancy data the API needs, and is the conversion target for
//! external actors.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Profiles::Email).text().not_null())
                    .col(ColumnDef::new(Profiles::Phone).text().null())
                    .col(ColumnDef::new(Profiles::DisplayName).text().not_null())
                    .col(
                        ColumnDef::new(Profiles::TenantType)
                            .text()
                            .not_null()
                            .default("talent"),
                    )
                    .col(ColumnDef::new(Profiles::StudioId).uuid().null())
                    .col(
                        ColumnDef::new(Profiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profiles_studio_id")
                            .from(Profiles::Table, Profiles::StudioId)
                            .to(Studios::Table, Studios::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_profiles_email")
                    .table(Profiles::Table)
                    .col(Profiles::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_profiles_email").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    Email,
    Phone,
    DisplayName,
    TenantType,
    StudioId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Studios {
    Table,
    Id,
}
