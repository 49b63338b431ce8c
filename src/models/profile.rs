//! Profile entity model
//!
//! Platform accounts. Session issuance is handled by the external auth
//! service; this table carries the contact and tenancy data the API needs.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Tenant type values for `Model::tenant_type`.
pub mod tenant_type {
    pub const TALENT: &str = "talent";
    pub const STUDIO: &str = "studio";
    pub const ADMIN: &str = "admin";
}

/// Profile entity representing a platform account
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Unique identifier for the profile (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Account email (unique)
    pub email: String,

    /// Account phone number (optional)
    pub phone: Option<String>,

    /// Display name shown in the product
    pub display_name: String,

    /// Tenancy of the account (talent|studio|admin)
    pub tenant_type: String,

    /// Studio this profile belongs to, for studio-staff accounts
    pub studio_id: Option<Uuid>,

    /// Timestamp when the profile was created
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::studio::Entity",
        from = "Column::StudioId",
        to = "super::studio::Column::Id"
    )]
    Studio,
}

impl Related<super::studio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Studio.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
