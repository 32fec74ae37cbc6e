//! Integration tests for the EmergencyEvent repository.

use healthflow_core::error::HealthflowError;
use healthflow_core::models::emergency::{CreateEmergencyEvent, EmergencyStatus, Severity};
use healthflow_core::repository::EmergencyEventRepository;
use healthflow_db::repository::SurrealEmergencyEventRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> SurrealEmergencyEventRepository<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    healthflow_db::run_migrations(&db).await.unwrap();
    SurrealEmergencyEventRepository::new(db)
}

fn event(title: &str) -> CreateEmergencyEvent {
    CreateEmergencyEvent {
        title: title.into(),
        description: "Multi-vehicle collision on the ring road".into(),
        severity: Severity::Critical,
        affected_resources: Some("ICU, Ambulances".into()),
    }
}

#[tokio::test]
async fn create_defaults_to_active() {
    let repo = setup().await;

    let created = repo.create(event("Mass casualty")).await.unwrap();

    assert_eq!(created.status, EmergencyStatus::Active);
    assert_eq!(created.severity, Severity::Critical);
    assert!(created.resolved_at.is_none());
    assert_eq!(created.affected_resources.as_deref(), Some("ICU, Ambulances"));

    let fetched = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_requires_title_and_description() {
    let repo = setup().await;

    let mut input = event("  ");
    let result = repo.create(input.clone()).await;
    assert!(matches!(result, Err(HealthflowError::Validation { .. })));

    input.title = "Flood".into();
    input.description = String::new();
    let result = repo.create(input).await;
    assert!(matches!(result, Err(HealthflowError::Validation { .. })));
}

#[tokio::test]
async fn list_active_newest_first() {
    let repo = setup().await;

    let first = repo.create(event("First")).await.unwrap();
    let second = repo.create(event("Second")).await.unwrap();
    let third = repo.create(event("Third")).await.unwrap();
    repo.resolve(second.id).await.unwrap();

    let active = repo.list_by_status(EmergencyStatus::Active).await.unwrap();
    let ids: Vec<Uuid> = active.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![third.id, first.id]);

    let resolved = repo.list_by_status(EmergencyStatus::Resolved).await.unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, second.id);
}

#[tokio::test]
async fn resolve_sets_resolved_at() {
    let repo = setup().await;
    let created = repo.create(event("Power outage")).await.unwrap();

    let resolved = repo.resolve(created.id).await.unwrap();

    assert_eq!(resolved.status, EmergencyStatus::Resolved);
    let resolved_at = resolved.resolved_at.expect("resolved_at must be set");
    assert!(resolved_at >= created.created_at);
}

#[tokio::test]
async fn resolve_is_idempotent() {
    let repo = setup().await;
    let created = repo.create(event("Water main break")).await.unwrap();

    let first = repo.resolve(created.id).await.unwrap();
    let second = repo.resolve(created.id).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(second.resolved_at, first.resolved_at);
}

#[tokio::test]
async fn resolve_unknown_id_is_not_found() {
    let repo = setup().await;

    let result = repo.resolve(Uuid::now_v7()).await;
    assert!(matches!(result, Err(HealthflowError::NotFound { .. })));
}
