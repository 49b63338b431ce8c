//! Migration to create the external_actors table.
//!
//! External actors are people a studio knows who have no platform account.
//! Identity is soft: matching happens by (email, studio) then by
//! (first + last name, studio), so the match indexes below are deliberately
//! non-unique and duplicates remain representable.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ExternalActors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExternalActors::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExternalActors::StudioId).uuid().not_null())
                    .col(ColumnDef::new(ExternalActors::FirstName).text().not_null())
                    .col(ColumnDef::new(ExternalActors::LastName).text().not_null())
                    .col(ColumnDef::new(ExternalActors::Email).text().null())
                    .col(ColumnDef::new(ExternalActors::Phone).text().null())
                    .col(
                        ColumnDef::new(ExternalActors::Status)
                            .text()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(ExternalActors::ConvertedProfileId)
                            .uuid()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ExternalActors::ConvertedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ExternalActors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ExternalActors::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_external_actors_studio_id")
                            .from(ExternalActors::Table, ExternalActors::StudioId)
                            .to(Studios::Table, Studios::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_external_actors_converted_profile_id")
                            .from(ExternalActors::Table, ExternalActors::ConvertedProfileId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_external_actors_studio_email")
                    .table(ExternalActors::Table)
                    .col(ExternalActors::StudioId)
                    .col(ExternalActors::Email)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_external_actors_studio_name")
                    .table(ExternalActors::Table)
                    .col(ExternalActors::StudioId)
                    .col(ExternalActors::FirstName)
                    .col(ExternalActors::LastName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_external_actors_studio_email")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_external_actors_studio_name")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ExternalActors::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ExternalActors {
    Table,
    Id,
    StudioId,
    FirstName,
    LastName,
    Email,
    Phone,
    Status,
    ConvertedProfileId,
    ConvertedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Studios {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
}
