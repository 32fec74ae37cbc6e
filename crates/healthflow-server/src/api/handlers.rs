//! Axum request handlers for the HealthFlow REST API.

use axum::{
    Json,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use healthflow_core::models::emergency::{CreateEmergencyEvent, EmergencyStatus};
use healthflow_core::models::resource::UpdateResource;
use healthflow_core::repository::{
    EmergencyEventRepository, NotificationRepository, ResourceRepository,
};
use healthflow_surge::ReallocationPlan;
use uuid::Uuid;

use super::dto::*;
use super::error::{ApiError, ApiResult};
use super::state::AppState;

fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid id: {raw}")))
}

// ============================================================================
// Health
// ============================================================================

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        emergency_active: state.engine().is_emergency_active(),
    })
}

// ============================================================================
// Resource Handlers
// ============================================================================

/// List all resources in creation order, each with its derived status.
#[tracing::instrument(skip(state))]
pub async fn list_resources(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ResourceResponse>>> {
    let resources = state.resources().list().await?;
    Ok(Json(resources.into_iter().map(Into::into).collect()))
}

/// Partially update a resource's counts.
///
/// Responds 400 when the id is unknown, neither count is present, or the
/// result would have more available than total.
#[tracing::instrument(skip(state, body))]
pub async fn update_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateResourceRequest>, JsonRejection>,
) -> ApiResult<Json<ResourceResponse>> {
    let id = parse_id(&id)?;
    let Json(request) = body?;

    let update = UpdateResource::from(request);
    if update.is_empty() {
        return Err(ApiError::bad_request(
            "Expected totalCount or availableCount",
        ));
    }

    let resource = state
        .resources()
        .update(id, update)
        .await
        .map_err(ApiError::unknown_id_as_bad_request)?;
    Ok(Json(resource.into()))
}

// ============================================================================
// Emergency Event Handlers
// ============================================================================

/// List events with the requested status (default `active`), newest first.
#[tracing::instrument(skip(state, query))]
pub async fn list_emergency_events(
    State(state): State<AppState>,
    query: Result<Query<ListEventsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<EmergencyEventResponse>>> {
    let Query(query) = query?;
    let status = query.status.unwrap_or_default();

    let events = state.events().list_by_status(status).await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

#[tracing::instrument(skip(state, body))]
pub async fn create_emergency_event(
    State(state): State<AppState>,
    body: Result<Json<CreateEmergencyEventRequest>, JsonRejection>,
) -> ApiResult<Json<EmergencyEventResponse>> {
    let Json(request) = body?;

    let event = state
        .events()
        .create(CreateEmergencyEvent {
            title: request.title,
            description: request.description,
            severity: request.severity,
            affected_resources: request.affected_resources,
        })
        .await?;

    tracing::info!(event_id = %event.id, severity = ?event.severity, "Emergency event created");
    Ok(Json(event.into()))
}

/// Resolve an event. The only accepted transition is to `resolved`;
/// resolving twice keeps the original `resolvedAt`.
#[tracing::instrument(skip(state, body))]
pub async fn update_emergency_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateEmergencyEventRequest>, JsonRejection>,
) -> ApiResult<Json<EmergencyEventResponse>> {
    let id = parse_id(&id)?;
    let Json(request) = body?;

    if request.status != EmergencyStatus::Resolved {
        return Err(ApiError::bad_request(
            "Events can only be moved to status \"resolved\"",
        ));
    }

    let event = state
        .events()
        .resolve(id)
        .await
        .map_err(ApiError::unknown_id_as_bad_request)?;
    Ok(Json(event.into()))
}

// ============================================================================
// Surge Handlers
// ============================================================================

/// Compute a fresh surge proposal from the current store. Nothing is
/// written.
#[tracing::instrument(skip(state))]
pub async fn propose_reallocation(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PlanEntry>>> {
    let plan = state.engine().propose().await?;
    Ok(Json(plan.into_iter().map(Into::into).collect()))
}

/// Apply a plan entry by entry.
///
/// An empty body (or one without `plan`) applies a freshly computed
/// proposal. Always 200 once the body parses; per-entry failures are
/// reported in the returned outcomes.
#[tracing::instrument(skip(state, body))]
pub async fn apply_reallocation(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<Vec<OutcomeEntry>>> {
    let request: ApplyReallocationRequest = if body.iter().all(u8::is_ascii_whitespace) {
        ApplyReallocationRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::bad_request(format!("Invalid plan: {e}")))?
    };

    let plan: Vec<ReallocationPlan> = match request.plan {
        Some(entries) => entries.into_iter().map(Into::into).collect(),
        None => state.engine().propose().await?,
    };

    let outcomes = state.engine().apply_reallocation(&plan).await;
    Ok(Json(outcomes.into_iter().map(Into::into).collect()))
}

#[tracing::instrument(skip(state))]
pub async fn emergency_overview(
    State(state): State<AppState>,
) -> ApiResult<Json<EmergencyOverviewResponse>> {
    let overview = state.engine().emergency_overview().await?;
    Ok(Json(overview.into()))
}

/// Open a high-severity event with the given reason and raise the
/// emergency flag.
#[tracing::instrument(skip(state, body))]
pub async fn activate_emergency(
    State(state): State<AppState>,
    body: Result<Json<ActivateEmergencyRequest>, JsonRejection>,
) -> ApiResult<Json<EmergencyEventResponse>> {
    let Json(request) = body?;
    let event = state.engine().activate_emergency(&request.reason).await?;
    Ok(Json(event.into()))
}

/// Clear the emergency flag. Open events are left as they are.
#[tracing::instrument(skip(state))]
pub async fn deactivate_emergency(
    State(state): State<AppState>,
) -> ApiResult<Json<EmergencyOverviewResponse>> {
    state.engine().deactivate_emergency();
    let overview = state.engine().emergency_overview().await?;
    Ok(Json(overview.into()))
}

// ============================================================================
// Notification Handlers
// ============================================================================

#[tracing::instrument(skip(state))]
pub async fn list_notifications(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let limit = state.config().notification_limit;
    let notifications = state.notifications().list_recent(limit).await?;
    Ok(Json(notifications.into_iter().map(Into::into).collect()))
}

#[tracing::instrument(skip(state))]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<NotificationResponse>> {
    let id = parse_id(&id)?;
    let notification = state
        .notifications()
        .mark_read(id)
        .await
        .map_err(ApiError::unknown_id_as_bad_request)?;
    Ok(Json(notification.into()))
}
