//! Emergency event domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyStatus {
    #[default]
    Active,
    Resolved,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmergencyEvent {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub status: EmergencyStatus,
    pub affected_resources: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Set if and only if `status` is [`EmergencyStatus::Resolved`].
    pub resolved_at: Option<DateTime<Utc>>,
}

impl EmergencyEvent {
    pub fn is_active(&self) -> bool {
        self.status == EmergencyStatus::Active
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmergencyEvent {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub affected_resources: Option<String>,
}
