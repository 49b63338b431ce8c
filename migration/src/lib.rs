//! Database migrations for the Callboard API.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2026_02_10_000001_create_studios;
mod m2026_02_10_000002_create_profiles;
mod m2026_02_11_000001_create_projects;
mod m2026_02_12_000001_create_casting_codes;
mod m2026_02_12_000002_create_external_actors;
mod m2026_02_13_000001_create_casting_submissions;
mod m2026_02_13_000002_create_submission_surveys;
mod m2026_02_14_000001_create_external_actor_projects;
mod m2026_02_14_000002_create_project_members;
mod m2026_02_20_000001_create_feature_flags;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2026_02_10_000001_create_studios::Migration),
            Box::new(m2026_02_10_000002_create_profiles::Migration),
            Box::new(m2026_02_11_000001_create_projects::Migration),
            Box::new(m2026_02_12_000001_create_casting_codes::Migration),
            Box::new(m2026_02_12_000002_create_external_actors::Migration),
            Box::new(m2026_02_13_000001_create_casting_submissions::Migration),
            Box::new(m2026_02_13_000002_create_submission_surveys::Migration),
            Box::new(m2026_02_14_000001_create_external_actor_projects::Migration),
            Box::new(m2026_02_14_000002_create_project_members::Migration),
            Box::new(m2026_02_20_000001_create_feature_flags::Migration),
        ]
    }
}
