//! External actor entity model
//!
//! A person known to one studio without a platform account. Uniqueness is
//! soft: records are matched by (email, studio) then by (name, studio), and
//! duplicates are possible when the matching heuristics miss.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Status values for `Model::status`.
pub mod status {
    pub const ACTIVE: &str = "active";
    pub const CONVERTED: &str = "converted";
}

/// External actor entity, scoped to a single studio
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "external_actors")]
pub struct Model {
    /// Unique identifier for the external actor (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Studio that owns this record; actors are never shared across studios
    pub studio_id: Uuid,

    /// First name as last submitted
    pub first_name: String,

    /// Last name as last submitted
    pub last_name: String,

    /// Contact email (optional)
    pub email: Option<String>,

    /// Contact phone (optional)
    pub phone: Option<String>,

    /// Lifecycle status (active|converted)
    pub status: String,

    /// Profile this record was converted into, once converted
    pub converted_profile_id: Option<Uuid>,

    /// Timestamp of conversion, once converted
    pub converted_at: Option<DateTimeWithTimeZone>,

    /// Timestamp when the record was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the record was last refreshed
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::studio::Entity",
        from = "Column::StudioId",
        to = "super::studio::Column::Id"
    )]
    Studio,
    #[sea_orm(has_many = "super::external_actor_project::Entity")]
    ExternalActorProject,
}

impl Related<super::studio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Studio.def()
    }
}

impl Related<super::external_actor_project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExternalActorProject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
