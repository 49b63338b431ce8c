//! Casting code entity model
//!
//! Studio-issued shareable codes. Applicants never mutate a code; studios
//! deactivate codes manually or let them lapse via `expires_at`.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value as JsonValue;

/// Casting code entity representing a studio-issued intake code
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "casting_codes")]
pub struct Model {
    /// Unique identifier for the casting code (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Human-enterable shareable code (unique)
    pub code: String,

    /// Studio that issued the code
    pub studio_id: Uuid,

    /// Project applications through this code are associated with (optional)
    pub project_id: Option<Uuid>,

    /// Whether the code currently accepts submissions
    pub is_active: bool,

    /// Expiry timestamp; submissions after this instant are rejected
    pub expires_at: Option<DateTimeWithTimeZone>,

    /// Survey-field schema rendered on the public apply form (optional)
    #[sea_orm(column_type = "JsonBinary")]
    pub survey_fields: Option<JsonValue>,

    /// Timestamp when the code was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the code was last updated
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
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
}

impl Related<super::studio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Studio.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
