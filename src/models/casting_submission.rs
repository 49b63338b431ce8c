//! Casting submission entity model
//!
//! One application instance submitted through a casting code. Status moves
//! from pending via studio review, or to converted when the applicant later
//! becomes a platform user.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Status values for `Model::status`.
pub mod status {
    pub const PENDING: &str = "pending";
    pub const APPROVED: &str = "approved";
    pub const REJECTED: &str = "rejected";
    pub const CONVERTED: &str = "converted";
}

/// Casting submission entity
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "casting_submissions")]
pub struct Model {
    /// Unique identifier for the submission (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Casting code the submission came through
    pub casting_code_id: Uuid,

    /// External actor the submission resolved to
    pub external_actor_id: Uuid,

    /// Applicant first name as submitted
    pub first_name: String,

    /// Applicant last name as submitted
    pub last_name: String,

    /// Applicant email as submitted (optional)
    pub email: Option<String>,

    /// Applicant phone as submitted (optional)
    pub phone: Option<String>,

    /// Free-form message to the studio (optional)
    pub message: Option<String>,

    /// Review status (pending|approved|rejected|converted)
    pub status: String,

    /// Timestamp when the submission was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the submission was last updated
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::casting_code::Entity",
        from = "Column::CastingCodeId",
        to = "super::casting_code::Column::Id"
    )]
    CastingCode,
    #[sea_orm(
        belongs_to = "super::external_actor::Entity",
        from = "Column::ExternalActorId",
        to = "super::external_actor::Column::Id"
    )]
    ExternalActor,
}

impl Related<super::casting_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CastingCode.def()
    }
}

impl Related<super::external_actor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExternalActor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
