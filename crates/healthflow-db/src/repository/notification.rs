//! SurrealDB implementation of [`NotificationRepository`].

use chrono::{DateTime, Utc};
use healthflow_core::error::HealthflowResult;
use healthflow_core::models::notification::{CreateNotification, Notification, NotificationKind};
use healthflow_core::repository::NotificationRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct NotificationRow {
    title: String,
    message: String,
    kind: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct NotificationRowWithId {
    record_id: String,
    title: String,
    message: String,
    kind: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

fn parse_kind(s: &str) -> Result<NotificationKind, DbError> {
    match s {
        "info" => Ok(NotificationKind::Info),
        "success" => Ok(NotificationKind::Success),
        "warning" => Ok(NotificationKind::Warning),
        "error" => Ok(NotificationKind::Error),
        other => Err(DbError::Decode(format!("unknown notification kind: {other}"))),
    }
}

fn kind_to_string(k: NotificationKind) -> &'static str {
    match k {
        NotificationKind::Info => "info",
        NotificationKind::Success => "success",
        NotificationKind::Warning => "warning",
        NotificationKind::Error => "error",
    }
}

impl NotificationRow {
    fn into_notification(self, id: Uuid) -> Result<Notification, DbError> {
        Ok(Notification {
            id,
            title: self.title,
            message: self.message,
            kind: parse_kind(&self.kind)?,
            is_read: self.is_read,
            created_at: self.created_at,
        })
    }
}

impl NotificationRowWithId {
    fn try_into_notification(self) -> Result<Notification, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid notification UUID: {e}")))?;
        Ok(Notification {
            id,
            title: self.title,
            message: self.message,
            kind: parse_kind(&self.kind)?,
            is_read: self.is_read,
            created_at: self.created_at,
        })
    }
}

fn not_found(id: String) -> DbError {
    DbError::NotFound {
        entity: "notification".into(),
        id,
    }
}

/// SurrealDB implementation of the Notification repository.
#[derive(Clone)]
pub struct SurrealNotificationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealNotificationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> NotificationRepository for SurrealNotificationRepository<C> {
    async fn create(&self, input: CreateNotification) -> HealthflowResult<Notification> {
        let id = Uuid::now_v7();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('notification', $id) SET \
                 title = $title, \
                 message = $message, \
                 kind = $kind, \
                 is_read = false",
            )
            .bind(("id", id_str.clone()))
            .bind(("title", input.title))
            .bind(("message", input.message))
            .bind(("kind", kind_to_string(input.kind)))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<NotificationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id_str))?;

        row.into_notification(id).map_err(Into::into)
    }

    async fn list_recent(&self, limit: u32) -> HealthflowResult<Vec<Notification>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM notification \
                 ORDER BY created_at DESC, id DESC \
                 LIMIT $limit",
            )
            .bind(("limit", limit))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<NotificationRowWithId> = result.take(0).map_err(DbError::from)?;

        rows.into_iter()
            .map(|row| row.try_into_notification())
            .collect::<Result<Vec<_>, DbError>>()
            .map_err(Into::into)
    }

    async fn mark_read(&self, id: Uuid) -> HealthflowResult<Notification> {
        let id_str = id.to_string();

        // Existence check first: an UPDATE on a missing key must not
        // create a partial row.
        let mut existing = self
            .db
            .query("SELECT * FROM type::record('notification', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<NotificationRow> = existing.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(not_found(id_str).into());
        }

        let result = self
            .db
            .query("UPDATE type::record('notification', $id) SET is_read = true")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<NotificationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id_str))?;

        row.into_notification(id).map_err(Into::into)
    }
}
