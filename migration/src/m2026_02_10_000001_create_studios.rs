//! Migration to create the studios table.
//!
//! Studios are the tenant root: every casting code, external actor and
//! submission is owned by exactly one studio.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Studios::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Studios::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Studios::Name).text().not_null())
                    .col(
                        ColumnDef::new(Studios::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Studios::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Studios {
    Table,
    Id,
    Name,
    CreatedAt,
}
