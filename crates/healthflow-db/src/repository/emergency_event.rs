//! SurrealDB implementation of [`EmergencyEventRepository`].

use chrono::{DateTime, Utc};
use healthflow_core::error::{HealthflowError, HealthflowResult};
use healthflow_core::models::emergency::{
    CreateEmergencyEvent, EmergencyEvent, EmergencyStatus, Severity,
};
use healthflow_core::repository::EmergencyEventRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct EmergencyEventRow {
    title: String,
    description: String,
    severity: String,
    status: String,
    affected_resources: Option<String>,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, SurrealValue)]
struct EmergencyEventRowWithId {
    record_id: String,
    title: String,
    description: String,
    severity: String,
    status: String,
    affected_resources: Option<String>,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

fn parse_severity(s: &str) -> Result<Severity, DbError> {
    match s {
        "low" => Ok(Severity::Low),
        "medium" => Ok(Severity::Medium),
        "high" => Ok(Severity::High),
        "critical" => Ok(Severity::Critical),
        other => Err(DbError::Decode(format!("unknown severity: {other}"))),
    }
}

fn severity_to_string(s: Severity) -> &'static str {
    match s {
        Severity::Low => "low",
        Severity::Medium => "medium",
        Severity::High => "high",
        Severity::Critical => "critical",
    }
}

fn parse_status(s: &str) -> Result<EmergencyStatus, DbError> {
    match s {
        "active" => Ok(EmergencyStatus::Active),
        "resolved" => Ok(EmergencyStatus::Resolved),
        other => Err(DbError::Decode(format!("unknown event status: {other}"))),
    }
}

fn status_to_string(s: EmergencyStatus) -> &'static str {
    match s {
        EmergencyStatus::Active => "active",
        EmergencyStatus::Resolved => "resolved",
    }
}

impl EmergencyEventRow {
    fn into_event(self, id: Uuid) -> Result<EmergencyEvent, DbError> {
        Ok(EmergencyEvent {
            id,
            title: self.title,
            description: self.description,
            severity: parse_severity(&self.severity)?,
            status: parse_status(&self.status)?,
            affected_resources: self.affected_resources,
            created_at: self.created_at,
            resolved_at: self.resolved_at,
        })
    }
}

impl EmergencyEventRowWithId {
    fn try_into_event(self) -> Result<EmergencyEvent, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid event UUID: {e}")))?;
        Ok(EmergencyEvent {
            id,
            title: self.title,
            description: self.description,
            severity: parse_severity(&self.severity)?,
            status: parse_status(&self.status)?,
            affected_resources: self.affected_resources,
            created_at: self.created_at,
            resolved_at: self.resolved_at,
        })
    }
}

fn not_found(id: String) -> DbError {
    DbError::NotFound {
        entity: "emergency_event".into(),
        id,
    }
}

/// SurrealDB implementation of the EmergencyEvent repository.
#[derive(Clone)]
pub struct SurrealEmergencyEventRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealEmergencyEventRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> EmergencyEventRepository for SurrealEmergencyEventRepository<C> {
    async fn create(&self, input: CreateEmergencyEvent) -> HealthflowResult<EmergencyEvent> {
        if input.title.trim().is_empty() {
            return Err(HealthflowError::validation("title must not be empty"));
        }
        if input.description.trim().is_empty() {
            return Err(HealthflowError::validation("description must not be empty"));
        }

        let id = Uuid::now_v7();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('emergency_event', $id) SET \
                 title = $title, \
                 description = $description, \
                 severity = $severity, \
                 status = 'active', \
                 affected_resources = $affected_resources, \
                 resolved_at = NONE",
            )
            .bind(("id", id_str.clone()))
            .bind(("title", input.title))
            .bind(("description", input.description))
            .bind(("severity", severity_to_string(input.severity)))
            .bind(("affected_resources", input.affected_resources))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<EmergencyEventRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id_str))?;
        let event = row.into_event(id)?;

        info!(
            event_id = %id,
            severity = severity_to_string(event.severity),
            "Created emergency event"
        );
        Ok(event)
    }

    async fn get_by_id(&self, id: Uuid) -> HealthflowResult<EmergencyEvent> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('emergency_event', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<EmergencyEventRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id_str))?;

        row.into_event(id).map_err(Into::into)
    }

    async fn list_by_status(
        &self,
        status: EmergencyStatus,
    ) -> HealthflowResult<Vec<EmergencyEvent>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM emergency_event \
                 WHERE status = $status \
                 ORDER BY created_at DESC, id DESC",
            )
            .bind(("status", status_to_string(status)))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<EmergencyEventRowWithId> = result.take(0).map_err(DbError::from)?;

        rows.into_iter()
            .map(|row| row.try_into_event())
            .collect::<Result<Vec<_>, DbError>>()
            .map_err(Into::into)
    }

    async fn resolve(&self, id: Uuid) -> HealthflowResult<EmergencyEvent> {
        let current = self.get_by_id(id).await?;
        if !current.is_active() {
            return Ok(current);
        }

        let id_str = id.to_string();

        // The status guard keeps a concurrent resolve from overwriting
        // the first `resolved_at`.
        let result = self
            .db
            .query(
                "UPDATE type::record('emergency_event', $id) SET \
                 status = 'resolved', \
                 resolved_at = time::now() \
                 WHERE status = 'active'",
            )
            .bind(("id", id_str))
            .await
            .map_err(DbError::from)?;
        result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let resolved = self.get_by_id(id).await?;
        info!(event_id = %id, "Resolved emergency event");
        Ok(resolved)
    }
}
