//! Project membership entity
//!
//! Memberships back-filled by account conversion carry the
//! `external_actor_conversion` source marker.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Source values for `Model::source`.
pub mod source {
    pub const MANUAL: &str = "manual";
    pub const EXTERNAL_ACTOR_CONVERSION: &str = "external_actor_conversion";
}

/// Project membership entity linking a profile to a project
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "project_members")]
pub struct Model {
    /// Unique identifier for the membership (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Project side of the membership
    pub project_id: Uuid,

    /// Profile side of the membership
    pub profile_id: Uuid,

    /// How the membership came to be (manual|external_actor_conversion)
    pub source: String,

    /// Timestamp when the membership was created
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::ProfileId",
        to = "super::profile::Column::Id"
    )]
    Profile,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
