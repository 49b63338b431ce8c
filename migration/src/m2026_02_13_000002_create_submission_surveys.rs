//! Migration to create the casting_submission_surveys table.
//!
//! Survey answers are 1:1 with a submission and only written when the
//! casting code defines survey fields and the applicant answered them.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CastingSubmissionSurveys::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CastingSubmissionSurveys::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CastingSubmissionSurveys::SubmissionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CastingSubmissionSurveys::Responses)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CastingSubmissionSurveys::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_casting_submission_surveys_submission_id")
                            .from(
                                CastingSubmissionSurveys::Table,
                                CastingSubmissionSurveys::SubmissionId,
                            )
                            .to(CastingSubmissions::Table, CastingSubmissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_casting_submission_surveys_submission_id")
                    .table(CastingSubmissionSurveys::Table)
                    .col(CastingSubmissionSurveys::SubmissionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_casting_submission_surveys_submission_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(CastingSubmissionSurveys::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum CastingSubmissionSurveys {
    Table,
    Id,
    SubmissionId,
    Responses,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CastingSubmissions {
    Table,
    Id,
}
