//! Request and response bodies for the REST API.
//!
//! Field names are camelCase on the wire. Request bodies also accept the
//! snake_case column names older dashboard clients send.

use chrono::{DateTime, Utc};
use healthflow_core::models::emergency::{EmergencyEvent, EmergencyStatus, Severity};
use healthflow_core::models::notification::{Notification, NotificationKind};
use healthflow_core::models::resource::{Resource, ResourceStatus, UpdateResource};
use healthflow_surge::{EmergencyOverview, ReallocationOutcome, ReallocationPlan};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Resources
// ============================================================================

/// A resource with its status derived from the current counts.
///
/// ```json
/// {
///   "id": "018d0e3c-4a00-7000-8000-000000000002",
///   "name": "ICU Units",
///   "type": "icu",
///   "totalCount": 20,
///   "availableCount": 18,
///   "status": "available",
///   "location": "ICU",
///   "createdAt": "2024-01-08T09:00:00Z",
///   "updatedAt": "2024-01-08T09:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub total_count: u32,
    pub available_count: u32,
    pub status: ResourceStatus,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Resource> for ResourceResponse {
    fn from(r: Resource) -> Self {
        Self {
            status: r.status(),
            id: r.id,
            name: r.name,
            resource_type: r.resource_type,
            total_count: r.total_count,
            available_count: r.available_count,
            location: r.location,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Body of `PUT /api/resources/:id`. Omitted fields keep their value.
///
/// `status` is accepted with any value (older clients send `low`) and
/// ignored; it is always derived from the counts.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceRequest {
    #[serde(default, alias = "total_count")]
    pub total_count: Option<u32>,
    #[serde(default, alias = "available_count")]
    pub available_count: Option<u32>,
    #[serde(default)]
    pub status: Option<IgnoredAny>,
}

impl From<UpdateResourceRequest> for UpdateResource {
    fn from(req: UpdateResourceRequest) -> Self {
        Self {
            total_count: req.total_count,
            available_count: req.available_count,
        }
    }
}

// ============================================================================
// Emergency events
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyEventResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub status: EmergencyStatus,
    pub affected_resources: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<EmergencyEvent> for EmergencyEventResponse {
    fn from(e: EmergencyEvent) -> Self {
        Self {
            id: e.id,
            title: e.title,
            description: e.description,
            severity: e.severity,
            status: e.status,
            affected_resources: e.affected_resources,
            created_at: e.created_at,
            resolved_at: e.resolved_at,
        }
    }
}

/// Query string of `GET /api/emergency-events`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListEventsQuery {
    /// Defaults to `active`.
    #[serde(default)]
    pub status: Option<EmergencyStatus>,
}

/// Body of `POST /api/emergency-events`.
///
/// ```json
/// {
///   "title": "Multi-vehicle collision",
///   "description": "Highway 9 pile-up, 14 casualties inbound",
///   "severity": "critical",
///   "affectedResources": "ICU, Ambulances"
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmergencyEventRequest {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    #[serde(default, alias = "affected_resources")]
    pub affected_resources: Option<String>,
}

/// Body of `PUT /api/emergency-events/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEmergencyEventRequest {
    pub status: EmergencyStatus,
}

// ============================================================================
// Surge
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    #[serde(alias = "resource_id")]
    pub resource_id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub resource_type: String,
    #[serde(default, alias = "total_count")]
    pub total_count: u32,
    #[serde(default)]
    pub current: u32,
    pub proposed: u32,
}

impl From<ReallocationPlan> for PlanEntry {
    fn from(p: ReallocationPlan) -> Self {
        Self {
            resource_id: p.resource_id,
            name: p.name,
            resource_type: p.resource_type,
            total_count: p.total_count,
            current: p.current,
            proposed: p.proposed,
        }
    }
}

impl From<PlanEntry> for ReallocationPlan {
    fn from(p: PlanEntry) -> Self {
        Self {
            resource_id: p.resource_id,
            name: p.name,
            resource_type: p.resource_type,
            total_count: p.total_count,
            current: p.current,
            proposed: p.proposed,
        }
    }
}

/// Body of `POST /api/reallocation/apply`. Without `plan` a fresh
/// proposal is computed and applied.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApplyReallocationRequest {
    #[serde(default)]
    pub plan: Option<Vec<PlanEntry>>,
}

/// Per-entry result of an apply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeEntry {
    pub id: Uuid,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceResponse>,
}

impl From<ReallocationOutcome> for OutcomeEntry {
    fn from(o: ReallocationOutcome) -> Self {
        match o.result {
            Ok(resource) => Self {
                id: o.resource_id,
                ok: true,
                error: None,
                resource: Some(resource.into()),
            },
            Err(e) => Self {
                id: o.resource_id,
                ok: false,
                error: Some(e.to_string()),
                resource: None,
            },
        }
    }
}

/// Body of `POST /api/emergency/activate`.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivateEmergencyRequest {
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyOverviewResponse {
    pub active: bool,
    pub active_events: usize,
}

impl From<EmergencyOverview> for EmergencyOverviewResponse {
    fn from(o: EmergencyOverview) -> Self {
        Self {
            active: o.active,
            active_events: o.active_events,
        }
    }
}

// ============================================================================
// Notifications
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            title: n.title,
            message: n.message,
            kind: n.kind,
            is_read: n.is_read,
            created_at: n.created_at,
        }
    }
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub emergency_active: bool,
}
