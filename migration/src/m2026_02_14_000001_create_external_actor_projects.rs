//! Migration to create the external_actor_projects join table.
//!
//! Links an external actor to a project. At most one row per
//! (external_actor_id, project_id) pair, guarded by a unique index.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ExternalActorProjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExternalActorProjects::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExternalActorProjects::ExternalActorId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExternalActorProjects::ProjectId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExternalActorProjects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_external_actor_projects_external_actor_id")
                            .from(
                                ExternalActorProjects::Table,
                                ExternalActorProjects::ExternalActorId,
                            )
                            .to(ExternalActors::Table, ExternalActors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_external_actor_projects_project_id")
                            .from(
                                ExternalActorProjects::Table,
                                ExternalActorProjects::ProjectId,
                            )
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_external_actor_projects_actor_project")
                    .table(ExternalActorProjects::Table)
                    .col(ExternalActorProjects::ExternalActorId)
                    .col(ExternalActorProjects::ProjectId)
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
                    .name("idx_external_actor_projects_actor_project")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ExternalActorProjects::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ExternalActorProjects {
    Table,
    Id,
    ExternalActorId,
    ProjectId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ExternalActors {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
}
