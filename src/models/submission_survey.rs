//! Casting submission survey entity model
//!
//! Structured answers tied 1:1 to a submission. Written only when the
//! casting code defines survey fields and the applicant supplied answers.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value as JsonValue;

/// Survey answers for one casting submission
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "casting_submission_surveys")]
pub struct Model {
    /// Unique identifier for the survey record (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Submission these answers belong to (unique)
    pub submission_id: Uuid,

    /// Answers keyed by survey-field name
    #[sea_orm(column_type = "JsonBinary")]
    pub responses: JsonValue,

    /// Timestamp when the answers were recorded
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::casting_submission::Entity",
        from = "Column::SubmissionId",
        to = "super::casting_submission::Column::Id"
    )]
    CastingSubmission,
}

impl Related<super::casting_submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CastingSubmission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
