//! Migration to create the casting_submissions table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CastingSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CastingSubmissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CastingSubmissions::CastingCodeId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CastingSubmissions::ExternalActorId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CastingSubmissions::FirstName)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CastingSubmissions::LastName)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CastingSubmissions::Email).text().null())
                    .col(ColumnDef::new(CastingSubmissions::Phone).text().null())
                    .col(ColumnDef::new(CastingSubmissions::Message).text().null())
                    .col(
                        ColumnDef::new(CastingSubmissions::Status)
                            .text()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(CastingSubmissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CastingSubmissions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_casting_submissions_casting_code_id")
                            .from(
                                CastingSubmissions::Table,
                                CastingSubmissions::CastingCodeId,
                            )
                            .to(CastingCodes::Table, CastingCodes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_casting_submissions_external_actor_id")
                            .from(
                                CastingSubmissions::Table,
                                CastingSubmissions::ExternalActorId,
                            )
                            .to(ExternalActors::Table, ExternalActors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_casting_submissions_casting_code_id")
                    .table(CastingSubmissions::Table)
                    .col(CastingSubmissions::CastingCodeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_casting_submissions_external_actor_id")
                    .table(CastingSubmissions::Table)
                    .col(CastingSubmissions::ExternalActorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_casting_submissions_casting_code_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_casting_submissions_external_actor_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CastingSubmissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CastingSubmissions {
    Table,
    Id,
    CastingCodeId,
    ExternalActorId,
    FirstName,
    LastName,
    Email,
    Phone,
    Message,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CastingCodes {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum ExternalActors {
    Table,
    Id,
}
