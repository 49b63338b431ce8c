//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM operations
//! for database entities, providing a clean API for data access with studio-aware methods.

pub mod casting_code;
pub mod external_actor;
pub mod feature_flag;
pub mod profile;
pub mod project;
pub mod studio;
pub mod submission;

pub use casting_code::CastingCodeRepository;
pub use external_actor::ExternalActorRepository;
pub use feature_flag::FeatureFlagRepository;
pub use profile::ProfileRepository;
pub use project::ProjectRepository;
pub use studio::StudioRepository;
pub use submission::SubmissionRepository;
