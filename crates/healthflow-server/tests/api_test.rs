//! End-to-end tests for the HTTP API against in-memory SurrealDB.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use healthflow_core::models::resource::ResourceStatus;
use healthflow_server::api::dto::{
    EmergencyEventResponse, EmergencyOverviewResponse, NotificationResponse, OutcomeEntry,
    PlanEntry, ResourceResponse,
};
use healthflow_server::api::{ApiConfig, AppState, create_router};
use healthflow_surge::SurgeConfig;
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tower::ServiceExt;

const BEDS: &str = "018d0e3c-4a00-7000-8000-000000000001";
const ICU: &str = "018d0e3c-4a00-7000-8000-000000000002";

async fn setup() -> Router {
    let db = surrealdb::engine::any::connect("mem://").await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    healthflow_db::run_migrations(&db).await.unwrap();

    let state = AppState::new(db, SurgeConfig::default(), ApiConfig::default()).unwrap();
    create_router(state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json<T: DeserializeOwned>(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> T {
    let (status, bytes) = send(app, method, uri, body).await;
    assert_eq!(status, StatusCode::OK, "{}", String::from_utf8_lossy(&bytes));
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = setup().await;
    let body: Value = send_json(&app, Method::GET, "/health", None).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["emergencyActive"], false);
}

#[tokio::test]
async fn list_resources_returns_seed_with_derived_status() {
    let app = setup().await;
    let resources: Vec<ResourceResponse> =
        send_json(&app, Method::GET, "/api/resources", None).await;

    let summary: Vec<(&str, u32, u32, ResourceStatus)> = resources
        .iter()
        .map(|r| (r.name.as_str(), r.total_count, r.available_count, r.status))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("Hospital Beds", 120, 85, ResourceStatus::Available),
            ("ICU Units", 20, 18, ResourceStatus::Available),
            ("Doctors", 25, 15, ResourceStatus::Available),
            ("Ambulances", 8, 3, ResourceStatus::InUse),
        ]
    );
}

#[tokio::test]
async fn resource_json_uses_camel_case() {
    let app = setup().await;
    let body: Value = send_json(&app, Method::GET, "/api/resources", None).await;
    let first = &body[0];
    assert_eq!(first["type"], "beds");
    assert_eq!(first["totalCount"], 120);
    assert_eq!(first["availableCount"], 85);
    assert_eq!(first["status"], "available");
}

#[tokio::test]
async fn update_resource_recomputes_status() {
    let app = setup().await;

    let updated: ResourceResponse = send_json(
        &app,
        Method::PUT,
        &format!("/api/resources/{ICU}"),
        Some(json!({ "availableCount": 3 })),
    )
    .await;
    assert_eq!(updated.available_count, 3);
    assert_eq!(updated.total_count, 20);
    assert_eq!(updated.status, ResourceStatus::Critical);

    // snake_case is accepted too and a supplied status is ignored.
    let updated: ResourceResponse = send_json(
        &app,
        Method::PUT,
        &format!("/api/resources/{ICU}"),
        Some(json!({ "available_count": 10, "status": "critical" })),
    )
    .await;
    assert_eq!(updated.available_count, 10);
    assert_eq!(updated.status, ResourceStatus::Available);
}

#[tokio::test]
async fn update_resource_ignores_legacy_status_values() {
    let app = setup().await;

    for legacy in [json!("low"), json!("in use"), json!(3)] {
        let updated: ResourceResponse = send_json(
            &app,
            Method::PUT,
            &format!("/api/resources/{ICU}"),
            Some(json!({ "availableCount": 7, "status": legacy })),
        )
        .await;
        assert_eq!(updated.available_count, 7);
        assert_eq!(updated.status, ResourceStatus::InUse);
    }
}

#[tokio::test]
async fn update_resource_rejects_bad_input() {
    let app = setup().await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/resources/{ICU}"),
        Some(json!({ "availableCount": 21 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/resources/{ICU}"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/resources/not-a-uuid",
        Some(json!({ "availableCount": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/resources/{ICU}"),
        Some(json!({ "availableCount": -4 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, bytes) = send(
        &app,
        Method::PUT,
        &format!("/api/resources/{}", uuid::Uuid::now_v7()),
        Some(json!({ "availableCount": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");

    // Nothing changed.
    let resources: Vec<ResourceResponse> =
        send_json(&app, Method::GET, "/api/resources", None).await;
    assert_eq!(resources[1].available_count, 18);
}

#[tokio::test]
async fn emergency_event_lifecycle() {
    let app = setup().await;

    let created: EmergencyEventResponse = send_json(
        &app,
        Method::POST,
        "/api/emergency-events",
        Some(json!({
            "title": "Multi-vehicle collision",
            "description": "Highway 9 pile-up",
            "severity": "critical",
            "affectedResources": "ICU, Ambulances"
        })),
    )
    .await;
    assert_eq!(created.title, "Multi-vehicle collision");
    assert!(created.resolved_at.is_none());

    let active: Vec<EmergencyEventResponse> =
        send_json(&app, Method::GET, "/api/emergency-events", None).await;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, created.id);

    let resolved: EmergencyEventResponse = send_json(
        &app,
        Method::PUT,
        &format!("/api/emergency-events/{}", created.id),
        Some(json!({ "status": "resolved" })),
    )
    .await;
    let resolved_at = resolved.resolved_at.unwrap();

    // Resolving again keeps the first timestamp.
    let again: EmergencyEventResponse = send_json(
        &app,
        Method::PUT,
        &format!("/api/emergency-events/{}", created.id),
        Some(json!({ "status": "resolved" })),
    )
    .await;
    assert_eq!(again.resolved_at, Some(resolved_at));

    let active: Vec<EmergencyEventResponse> =
        send_json(&app, Method::GET, "/api/emergency-events?status=active", None).await;
    assert!(active.is_empty());

    let resolved: Vec<EmergencyEventResponse> =
        send_json(&app, Method::GET, "/api/emergency-events?status=resolved", None).await;
    assert_eq!(resolved.len(), 1);
}

#[tokio::test]
async fn emergency_event_rejects_bad_input() {
    let app = setup().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/emergency-events",
        Some(json!({ "title": "x", "description": "y", "severity": "apocalyptic" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/emergency-events",
        Some(json!({ "title": "  ", "description": "y", "severity": "low" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/emergency-events?status=pending", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let created: EmergencyEventResponse = send_json(
        &app,
        Method::POST,
        "/api/emergency-events",
        Some(json!({ "title": "Outage", "description": "Generator B", "severity": "medium" })),
    )
    .await;
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/emergency-events/{}", created.id),
        Some(json!({ "status": "active" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/emergency-events/{}", uuid::Uuid::now_v7()),
        Some(json!({ "status": "resolved" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn proposal_does_not_write() {
    let app = setup().await;

    let plan: Vec<PlanEntry> =
        send_json(&app, Method::GET, "/api/reallocation/proposal", None).await;
    let proposed: Vec<u32> = plan.iter().map(|p| p.proposed).collect();
    assert_eq!(proposed, vec![109, 20, 20, 4]);

    let resources: Vec<ResourceResponse> =
        send_json(&app, Method::GET, "/api/resources", None).await;
    let counts: Vec<u32> = resources.iter().map(|r| r.available_count).collect();
    assert_eq!(counts, vec![85, 18, 15, 3]);
}

#[tokio::test]
async fn apply_without_plan_uses_fresh_proposal() {
    let app = setup().await;

    let outcomes: Vec<OutcomeEntry> =
        send_json(&app, Method::POST, "/api/reallocation/apply", None).await;
    assert_eq!(outcomes.len(), 4);
    assert!(outcomes.iter().all(|o| o.ok));

    let resources: Vec<ResourceResponse> =
        send_json(&app, Method::GET, "/api/resources", None).await;
    let counts: Vec<u32> = resources.iter().map(|r| r.available_count).collect();
    assert_eq!(counts, vec![109, 20, 20, 4]);

    let notifications: Vec<NotificationResponse> =
        send_json(&app, Method::GET, "/api/notifications", None).await;
    assert_eq!(notifications.len(), 1);
}

#[tokio::test]
async fn apply_reports_failures_per_entry() {
    let app = setup().await;
    let ghost = uuid::Uuid::now_v7();

    let outcomes: Vec<OutcomeEntry> = send_json(
        &app,
        Method::POST,
        "/api/reallocation/apply",
        Some(json!({
            "plan": [
                { "resourceId": BEDS, "proposed": 100 },
                { "resourceId": ghost, "proposed": 5 },
                { "resourceId": ICU, "proposed": 25 }
            ]
        })),
    )
    .await;

    assert!(outcomes[0].ok);
    assert!(!outcomes[1].ok);
    assert_eq!(outcomes[1].id, ghost);
    assert!(outcomes[1].error.is_some());
    assert!(!outcomes[2].ok);

    let resources: Vec<ResourceResponse> =
        send_json(&app, Method::GET, "/api/resources", None).await;
    assert_eq!(resources[0].available_count, 100);
    assert_eq!(resources[1].available_count, 18);
}

#[tokio::test]
async fn apply_rejects_malformed_plan() {
    let app = setup().await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/reallocation/apply",
        Some(json!({ "plan": "everything" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn emergency_mode_toggle() {
    let app = setup().await;

    let overview: EmergencyOverviewResponse =
        send_json(&app, Method::GET, "/api/emergency", None).await;
    assert!(!overview.active);
    assert_eq!(overview.active_events, 0);

    let event: EmergencyEventResponse = send_json(
        &app,
        Method::POST,
        "/api/emergency/activate",
        Some(json!({ "reason": "Regional flooding" })),
    )
    .await;
    assert_eq!(event.description, "Regional flooding");

    let overview: EmergencyOverviewResponse =
        send_json(&app, Method::GET, "/api/emergency", None).await;
    assert!(overview.active);
    assert_eq!(overview.active_events, 1);

    let overview: EmergencyOverviewResponse =
        send_json(&app, Method::POST, "/api/emergency/deactivate", None).await;
    assert!(!overview.active);
    assert_eq!(overview.active_events, 1);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/emergency/activate",
        Some(json!({ "reason": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn notifications_can_be_marked_read() {
    let app = setup().await;
    send_json::<Value>(
        &app,
        Method::POST,
        "/api/emergency/activate",
        Some(json!({ "reason": "Chemical spill" })),
    )
    .await;

    let body: Value = send_json(&app, Method::GET, "/api/notifications", None).await;
    assert_eq!(body[0]["type"], "warning");
    assert_eq!(body[0]["isRead"], false);

    let notifications: Vec<NotificationResponse> = serde_json::from_value(body).unwrap();
    let read: NotificationResponse = send_json(
        &app,
        Method::PUT,
        &format!("/api/notifications/{}/read", notifications[0].id),
        None,
    )
    .await;
    assert!(read.is_read);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/notifications/{}/read", uuid::Uuid::now_v7()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
