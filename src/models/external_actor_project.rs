//! External actor / project join entity
//!
//! At most one row per (external_actor_id, project_id) pair; existence is
//! checked before insert and a unique index guards the race.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Join entity linking an external actor to a project
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "external_actor_projects")]
pub struct Model {
    /// Unique identifier for the association (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// External actor side of the association
    pub external_actor_id: Uuid,

    /// Project side of the association
    pub project_id: Uuid,

    /// Timestamp when the association was created
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::external_actor::Entity",
        from = "Column::ExternalActorId",
        to = "super::external_actor::Column::Id"
    )]
    ExternalActor,
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
}

impl Related<super::external_actor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExternalActor.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
