//! Migration to create the casting_codes table.
//!
//! Casting codes are studio-issued shareable codes applicants enter (or scan)
//! to submit without an account. A code may point at a project and may carry
//! a survey-field schema rendered on the public apply form.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CastingCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CastingCodes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CastingCodes::Code).text().not_null())
                    .col(ColumnDef::new(CastingCodes::StudioId).uuid().not_null())
                    .col(ColumnDef::new(CastingCodes::ProjectId).uuid().null())
                    .col(
                        ColumnDef::new(CastingCodes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(CastingCodes::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CastingCodes::SurveyFields)
                            .json_binary()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CastingCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CastingCodes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_casting_codes_studio_id")
                            .from(CastingCodes::Table, CastingCodes::StudioId)
                            .to(Studios::Table, Studios::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_casting_codes_project_id")
                            .from(CastingCodes::Table, CastingCodes::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Codes are human-enterable and globally unique.
        manager
            .create_index(
                Index::create()
                    .name("idx_casting_codes_code")
                    .table(CastingCodes::Table)
                    .col(CastingCodes::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_casting_codes_studio_id")
                    .table(CastingCodes::Table)
                    .col(CastingCodes::StudioId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_casting_codes_code").to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_casting_codes_studio_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CastingCodes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CastingCodes {
    Table,
    Id,
    Code,
    StudioId,
    ProjectId,
    IsActive,
    ExpiresAt,
    SurveyFields,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Studios {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
}
