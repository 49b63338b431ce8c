//! External actor repository for database operations
//!
//! Encapsulates the identity-matching lookups and the create-or-refresh
//! write for external actors, plus the conversion-side queries.

use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::external_actor::{self, Entity as ExternalActor, status};

/// Identity fields resolved from a submission, used for matching and upsert.
#[derive(Debug, Clone)]
pub struct ActorIdentity {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Repository for external actor database operations
#[derive(Debug, Clone)]
pub struct ExternalActorRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl ExternalActorRepository {
    /// Creates a new ExternalActorRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Finds an existing external actor for a studio using the ordered match
    /// strategies: exact email first, then exact (first, last) name. Email is
    /// the stronger identity signal, so a name match is only attempted when
    /// no email match exists.
    pub async fn find_match(
        &self,
        studio_id: Uuid,
        identity: &ActorIdentity,
    ) -> Result<Option<external_actor::Model>> {
        if let Some(email) = identity.email.as_deref().filter(|e| !e.is_empty()) {
            let by_email = ExternalActor::find()
                .filter(external_actor::Column::StudioId.eq(studio_id))
                .filter(external_actor::Column::Email.eq(email))
                .one(self.db.as_ref())
                .await?;

            if by_email.is_some() {
                return Ok(by_email);
            }
        }

        Ok(ExternalActor::find()
            .filter(external_actor::Column::StudioId.eq(studio_id))
            .filter(external_actor::Column::FirstName.eq(identity.first_name.as_str()))
            .filter(external_actor::Column::LastName.eq(identity.last_name.as_str()))
            .one(self.db.as_ref())
            .await?)
    }

    /// Creates or refreshes the external actor record for a resolved identity.
    ///
    /// A matched record gets its name refreshed, and email/phone overwritten
    /// only when the submission supplied a non-empty value; existing contact
    /// fields are otherwise preserved. An unmatched identity becomes a new
    /// active record scoped to the studio.
    pub async fn upsert(
        &self,
        studio_id: Uuid,
        identity: ActorIdentity,
    ) -> Result<external_actor::Model> {
        let now = Utc::now();

        match self.find_match(studio_id, &identity).await? {
            Some(existing) => {
                let mut active = existing.into_active_model();
                active.first_name = Set(identity.first_name);
                active.last_name = Set(identity.last_name);
                if let Some(email) = identity.email.filter(|e| !e.is_empty()) {
                    active.email = Set(Some(email));
                }
                if let Some(phone) = identity.phone.filter(|p| !p.is_empty()) {
                    active.phone = Set(Some(phone));
                }
                active.updated_at = Set(now.into());

                Ok(active.update(self.db.as_ref()).await?)
            }
            None => {
                let model = external_actor::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    studio_id: Set(studio_id),
                    first_name: Set(identity.first_name),
                    last_name: Set(identity.last_name),
                    email: Set(identity.email.filter(|e| !e.is_empty())),
                    phone: Set(identity.phone.filter(|p| !p.is_empty())),
                    status: Set(status::ACTIVE.to_string()),
                    converted_profile_id: Set(None),
                    converted_at: Set(None),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                };

                Ok(model.insert(self.db.as_ref()).await?)
            }
        }
    }

    /// Finds all not-yet-converted actors with the given email, across studios.
    pub async fn find_unconverted_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<external_actor::Model>> {
        Ok(ExternalActor::find()
            .filter(external_actor::Column::Email.eq(email))
            .filter(external_actor::Column::Status.ne(status::CONVERTED))
            .all(self.db.as_ref())
            .await?)
    }

    /// Finds all not-yet-converted actors with the given phone, across studios.
    pub async fn find_unconverted_by_phone(
        &self,
        phone: &str,
    ) -> Result<Vec<external_actor::Model>> {
        Ok(ExternalActor::find()
            .filter(external_actor::Column::Phone.eq(phone))
            .filter(external_actor::Column::Status.ne(status::CONVERTED))
            .all(self.db.as_ref())
            .await?)
    }

    /// Marks an actor as converted into the given profile.
    pub async fn mark_converted(
        &self,
        actor: external_actor::Model,
        profile_id: Uuid,
    ) -> Result<external_actor::Model> {
        let now = Utc::now();

        let mut active = actor.into_active_model();
        active.status = Set(status::CONVERTED.to_string());
        active.converted_profile_id = Set(Some(profile_id));
        active.converted_at = Set(Some(now.into()));
        active.updated_at = Set(now.into());

        Ok(active.update(self.db.as_ref()).await?)
    }
}
