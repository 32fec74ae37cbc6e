//! Resource domain model.
//!
//! A resource is a countable hospital asset (beds, ICU units, staff,
//! vehicles, ...). Its [`ResourceStatus`] is never stored; it is derived
//! from the two counts every time it is needed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{HealthflowError, HealthflowResult};

/// Capacity classification derived from `available / total`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    /// At least half of the capacity is free.
    Available,
    /// Between 20% (inclusive) and 50% (exclusive) is free.
    InUse,
    /// Less than 20% is free, or the resource has no capacity at all.
    Critical,
}

impl ResourceStatus {
    /// Classify a resource from its counts.
    ///
    /// Thresholds: `ratio < 0.20` is critical, `ratio < 0.50` is in use,
    /// anything else is available. Evaluated in integer arithmetic so the
    /// boundaries are exact.
    pub fn derive(available_count: u32, total_count: u32) -> Self {
        if total_count == 0 {
            return Self::Critical;
        }
        let available = u64::from(available_count);
        let total = u64::from(total_count);
        if available * 5 < total {
            Self::Critical
        } else if available * 2 < total {
            Self::InUse
        } else {
            Self::Available
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::InUse => "inuse",
            Self::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    pub id: Uuid,
    pub name: String,
    /// Open category tag such as `beds`, `icu`, `staff` or `vehicles`.
    pub resource_type: String,
    pub total_count: u32,
    pub available_count: u32,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    pub fn status(&self) -> ResourceStatus {
        ResourceStatus::derive(self.available_count, self.total_count)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResource {
    pub name: String,
    pub resource_type: String,
    pub total_count: u32,
    pub available_count: u32,
    pub location: Option<String>,
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UpdateResource {
    pub total_count: Option<u32>,
    pub available_count: Option<u32>,
}

impl UpdateResource {
    pub fn is_empty(&self) -> bool {
        self.total_count.is_none() && self.available_count.is_none()
    }

    /// Merge the supplied fields over `current` and return the resulting
    /// `(total_count, available_count)` pair, rejecting any combination
    /// that would leave more units available than exist.
    pub fn merge_counts(&self, current: &Resource) -> HealthflowResult<(u32, u32)> {
        let total = self.total_count.unwrap_or(current.total_count);
        let available = self.available_count.unwrap_or(current.available_count);
        validate_counts(total, available)?;
        Ok((total, available))
    }
}

/// Enforce `available_count <= total_count`.
pub fn validate_counts(total_count: u32, available_count: u32) -> HealthflowResult<()> {
    if available_count > total_count {
        return Err(HealthflowError::validation(format!(
            "available_count ({available_count}) exceeds total_count ({total_count})"
        )));
    }
    Ok(())
}
