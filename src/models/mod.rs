//! # Data Models
//!
//! This module contains all the data models used throughout the Callboard API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod casting_code;
pub mod casting_submission;
pub mod external_actor;
pub mod external_actor_project;
pub mod feature_flag;
pub mod profile;
pub mod project;
pub mod project_member;
pub mod studio;
pub mod submission_survey;

pub use casting_code::Entity as CastingCode;
pub use casting_submission::Entity as CastingSubmission;
pub use external_actor::Entity as ExternalActor;
pub use external_actor_project::Entity as ExternalActorProject;
pub use feature_flag::Entity as FeatureFlag;
pub use profile::Entity as Profile;
pub use project::Entity as Project;
pub use project_member::Entity as ProjectMember;
pub use studio::Entity as Studio;
pub use submission_survey::Entity as SubmissionSurvey;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "callboard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
