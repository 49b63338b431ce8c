//! Integration tests for the casting submission intake pipeline.

use anyhow::Result;
use axum::http::StatusCode;
use callboard::intake::{IntakeRequest, IntakeService};
use callboard::models::{
    casting_submission, external_actor, external_actor_project, submission_survey,
};
use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Statement};
use serde_json::json;
use uuid::Uuid;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{
    CastingCodeFixture, create_test_casting_code, create_test_studio, setup_test_db_arc,
};

fn ann_lee_request(code: &str) -> IntakeRequest {
    IntakeRequest {
        code: code.to_string(),
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        email: Some("ann@example.com".to_string()),
        phone: None,
        message: None,
        create_account: false,
        survey_responses: None,
    }
}

#[tokio::test]
async fn unseen_email_creates_one_active_external_actor() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let studio = create_test_studio(&db, "Studio A").await?;
    create_test_casting_code(&db, studio, "AB12CD", CastingCodeFixture::default()).await?;

    let service = IntakeService::new(db.clone());
    let outcome = service.submit(ann_lee_request("AB12CD")).await.unwrap();

    let actors = external_actor::Entity::find().all(db.as_ref()).await?;
    assert_eq!(actors.len(), 1);
    assert_eq!(actors[0].id, outcome.external_actor_id);
    assert_eq!(actors[0].status, external_actor::status::ACTIVE);
    assert_eq!(actors[0].email.as_deref(), Some("ann@example.com"));
    assert_eq!(actors[0].studio_id, studio);

    let submission = casting_submission::Entity::find_by_id(outcome.submission_id)
        .one(db.as_ref())
        .await?
        .unwrap();
    assert_eq!(submission.status, casting_submission::status::PENDING);
    assert_eq!(submission.external_actor_id, outcome.external_actor_id);

    Ok(())
}

#[tokio::test]
async fn matching_email_reuses_actor_and_preserves_contact_fields() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let studio = create_test_studio(&db, "Studio A").await?;
    create_test_casting_code(&db, studio, "AB12CD", CastingCodeFixture::default()).await?;

    let service = IntakeService::new(db.clone());

    let first = service
        .submit(IntakeRequest {
            phone: Some("+15550001111".to_string()),
            ..ann_lee_request("AB12CD")
        })
        .await
        .unwrap();

    // Second submission with the same email but no phone must not clear the
    // stored phone, and must not create a second actor.
    let second = service
        .submit(IntakeRequest {
            first_name: "Anne".to_string(),
            ..ann_lee_request("AB12CD")
        })
        .await
        .unwrap();

    assert_eq!(first.external_actor_id, second.external_actor_id);

    let actors = external_actor::Entity::find().all(db.as_ref()).await?;
    assert_eq!(actors.len(), 1);
    assert_eq!(actors[0].first_name, "Anne");
    assert_eq!(actors[0].phone.as_deref(), Some("+15550001111"));

    let submissions = casting_submission::Entity::find()
        .count(db.as_ref())
        .await?;
    assert_eq!(submissions, 2);

    Ok(())
}

#[tokio::test]
async fn name_match_applies_when_no_email_supplied() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let studio = create_test_studio(&db, "Studio A").await?;
    create_test_casting_code(&db, studio, "AB12CD", CastingCodeFixture::default()).await?;

    let service = IntakeService::new(db.clone());
    let first = service.submit(ann_lee_request("AB12CD")).await.unwrap();

    let second = service
        .submit(IntakeRequest {
            email: None,
            ..ann_lee_request("AB12CD")
        })
        .await
        .unwrap();

    assert_eq!(first.external_actor_id, second.external_actor_id);
    assert_eq!(
        external_actor::Entity::find().count(db.as_ref()).await?,
        1
    );

    Ok(())
}

#[tokio::test]
async fn same_email_different_studios_creates_separate_actors() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let studio_a = create_test_studio(&db, "Studio A").await?;
    let studio_b = create_test_studio(&db, "Studio B").await?;
    create_test_casting_code(&db, studio_a, "AAAAAA", CastingCodeFixture::default()).await?;
    create_test_casting_code(&db, studio_b, "BBBBBB", CastingCodeFixture::default()).await?;

    let service = IntakeService::new(db.clone());
    service.submit(ann_lee_request("AAAAAA")).await.unwrap();
    service.submit(ann_lee_request("BBBBBB")).await.unwrap();

    let actors = external_actor::Entity::find().all(db.as_ref()).await?;
    assert_eq!(actors.len(), 2);
    assert_ne!(actors[0].studio_id, actors[1].studio_id);

    Ok(())
}

#[tokio::test]
async fn inactive_code_rejects_without_side_effects() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let studio = create_test_studio(&db, "Studio A").await?;
    create_test_casting_code(
        &db,
        studio,
        "AB12CD",
        CastingCodeFixture {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await?;

    let service = IntakeService::new(db.clone());
    let error = service.submit(ann_lee_request("AB12CD")).await.unwrap_err();

    assert_eq!(error.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        casting_submission::Entity::find().count(db.as_ref()).await?,
        0
    );
    assert_eq!(
        external_actor::Entity::find().count(db.as_ref()).await?,
        0
    );

    Ok(())
}

#[tokio::test]
async fn expired_code_rejects_without_side_effects() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let studio = create_test_studio(&db, "Studio A").await?;
    create_test_casting_code(
        &db,
        studio,
        "AB12CD",
        CastingCodeFixture {
            expires_at: Some(Utc::now() - Duration::hours(1)),
            ..Default::default()
        },
    )
    .await?;

    let service = IntakeService::new(db.clone());
    let error = service.submit(ann_lee_request("AB12CD")).await.unwrap_err();

    assert_eq!(error.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        casting_submission::Entity::find().count(db.as_ref()).await?,
        0
    );

    Ok(())
}

#[tokio::test]
async fn nonexistent_code_yields_not_found() -> Result<()> {
    let db = setup_test_db_arc().await?;

    let service = IntakeService::new(db.clone());
    let error = service.submit(ann_lee_request("NOSUCH")).await.unwrap_err();

    assert_eq!(error.status, StatusCode::NOT_FOUND);
    assert_eq!(error.code, Box::from("CASTING_CODE_NOT_FOUND"));

    Ok(())
}

#[tokio::test]
async fn code_without_project_skips_association() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let studio = create_test_studio(&db, "Studio A").await?;
    create_test_casting_code(&db, studio, "AB12CD", CastingCodeFixture::default()).await?;

    let service = IntakeService::new(db.clone());
    service.submit(ann_lee_request("AB12CD")).await.unwrap();

    assert_eq!(
        external_actor_project::Entity::find()
            .count(db.as_ref())
            .await?,
        0
    );

    Ok(())
}

#[tokio::test]
async fn code_with_project_associates_actor_once() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let studio = create_test_studio(&db, "Studio A").await?;
    let project = test_utils::create_test_project(&db, studio, "Feature Film").await?;
    create_test_casting_code(
        &db,
        studio,
        "AB12CD",
        CastingCodeFixture {
            project_id: Some(project),
            ..Default::default()
        },
    )
    .await?;

    let service = IntakeService::new(db.clone());
    service.submit(ann_lee_request("AB12CD")).await.unwrap();
    // Repeat submission resolves to the same actor; the pair must stay unique.
    service.submit(ann_lee_request("AB12CD")).await.unwrap();

    let associations = external_actor_project::Entity::find()
        .filter(external_actor_project::Column::ProjectId.eq(project))
        .all(db.as_ref())
        .await?;
    assert_eq!(associations.len(), 1);

    Ok(())
}

#[tokio::test]
async fn association_failure_does_not_fail_submission() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let studio = create_test_studio(&db, "Studio A").await?;
    let project = Uuid::new_v4();
    create_test_casting_code(
        &db,
        studio,
        "AB12CD",
        CastingCodeFixture {
            project_id: Some(project),
            ..Default::default()
        },
    )
    .await?;

    // Break the association table so the secondary step errors.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "DROP TABLE external_actor_projects".to_string(),
    ))
    .await?;

    let service = IntakeService::new(db.clone());
    let outcome = service.submit(ann_lee_request("AB12CD")).await.unwrap();

    let submission = casting_submission::Entity::find_by_id(outcome.submission_id)
        .one(db.as_ref())
        .await?;
    assert!(submission.is_some());

    Ok(())
}

#[tokio::test]
async fn survey_responses_persist_only_with_schema() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let studio = create_test_studio(&db, "Studio A").await?;
    create_test_casting_code(
        &db,
        studio,
        "SURVEY",
        CastingCodeFixture {
            survey_fields: Some(json!([{ "name": "availability", "type": "text" }])),
            ..Default::default()
        },
    )
    .await?;
    create_test_casting_code(&db, studio, "PLAIN2", CastingCodeFixture::default()).await?;

    let service = IntakeService::new(db.clone());

    let with_schema = service
        .submit(IntakeRequest {
            survey_responses: Some(json!({ "availability": "weekends" })),
            ..ann_lee_request("SURVEY")
        })
        .await
        .unwrap();

    let without_schema = service
        .submit(IntakeRequest {
            email: Some("bob@example.com".to_string()),
            first_name: "Bob".to_string(),
            survey_responses: Some(json!({ "availability": "weekdays" })),
            ..ann_lee_request("PLAIN2")
        })
        .await
        .unwrap();

    let surveys = submission_survey::Entity::find().all(db.as_ref()).await?;
    assert_eq!(surveys.len(), 1);
    assert_eq!(surveys[0].submission_id, with_schema.submission_id);
    assert_eq!(surveys[0].responses, json!({ "availability": "weekends" }));
    assert_ne!(surveys[0].submission_id, without_schema.submission_id);

    Ok(())
}

#[tokio::test]
async fn validation_failure_reports_fields_and_writes_nothing() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let studio = create_test_studio(&db, "Studio A").await?;
    create_test_casting_code(&db, studio, "AB12CD", CastingCodeFixture::default()).await?;

    let service = IntakeService::new(db.clone());
    let error = service
        .submit(IntakeRequest {
            first_name: String::new(),
            email: Some("not-an-email".to_string()),
            ..ann_lee_request("AB12CD")
        })
        .await
        .unwrap_err();

    assert_eq!(error.status, StatusCode::BAD_REQUEST);
    let details = error.details.unwrap();
    assert!(details.get("firstName").is_some());
    assert!(details.get("email").is_some());

    assert_eq!(
        casting_submission::Entity::find().count(db.as_ref()).await?,
        0
    );

    Ok(())
}

#[tokio::test]
async fn create_account_flag_is_echoed_back() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let studio = create_test_studio(&db, "Studio A").await?;
    create_test_casting_code(&db, studio, "AB12CD", CastingCodeFixture::default()).await?;

    let service = IntakeService::new(db.clone());
    let outcome = service
        .submit(IntakeRequest {
            create_account: true,
            ..ann_lee_request("AB12CD")
        })
        .await
        .unwrap();

    assert!(outcome.create_account);
    assert_eq!(outcome.email.as_deref(), Some("ann@example.com"));

    Ok(())
}
