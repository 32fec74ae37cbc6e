//! Reallocation engine — surge proposal, apply and emergency toggling.

use std::sync::atomic::{AtomicBool, Ordering};

use healthflow_core::error::HealthflowResult;
use healthflow_core::models::emergency::{CreateEmergencyEvent, EmergencyEvent, EmergencyStatus};
use healthflow_core::models::notification::{CreateNotification, NotificationKind};
use healthflow_core::models::resource::UpdateResource;
use healthflow_core::repository::{
    EmergencyEventRepository, NotificationRepository, ResourceRepository,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::SurgeConfig;
use crate::error::SurgeError;
use crate::plan::{ReallocationOutcome, ReallocationPlan, propose_reallocation};

/// Emergency flag together with the number of open events.
///
/// The two are independent: deactivating the flag does not resolve
/// events and resolving events does not clear the flag.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct EmergencyOverview {
    pub active: bool,
    pub active_events: usize,
}

/// Reallocation engine.
///
/// Generic over repository implementations so that the surge layer
/// has no dependency on the database crate.
pub struct ReallocationEngine<R, E, N>
where
    R: ResourceRepository,
    E: EmergencyEventRepository,
    N: NotificationRepository,
{
    resources: R,
    events: E,
    notifications: N,
    config: SurgeConfig,
    emergency_active: AtomicBool,
}

impl<R, E, N> ReallocationEngine<R, E, N>
where
    R: ResourceRepository,
    E: EmergencyEventRepository,
    N: NotificationRepository,
{
    pub fn new(
        resources: R,
        events: E,
        notifications: N,
        config: SurgeConfig,
    ) -> Result<Self, SurgeError> {
        if config.surge_percent > 100 {
            return Err(SurgeError::InvalidSurgePercent(config.surge_percent));
        }
        Ok(Self {
            resources,
            events,
            notifications,
            config,
            emergency_active: AtomicBool::new(false),
        })
    }

    /// Re-read the resource store and compute a fresh surge plan.
    pub async fn propose(&self) -> HealthflowResult<Vec<ReallocationPlan>> {
        let resources = self.resources.list().await?;
        Ok(propose_reallocation(&resources, self.config.surge_percent))
    }

    /// Write each plan entry's `proposed` count back to the store.
    ///
    /// Every entry is attempted; a failure is recorded on its own outcome
    /// and does not stop or roll back the others.
    pub async fn apply_reallocation(
        &self,
        plan: &[ReallocationPlan],
    ) -> Vec<ReallocationOutcome> {
        let mut outcomes = Vec::with_capacity(plan.len());

        for entry in plan {
            let update = UpdateResource {
                available_count: Some(entry.proposed),
                ..Default::default()
            };
            let result = self.resources.update(entry.resource_id, update).await;
            if let Err(e) = &result {
                warn!(
                    resource_id = %entry.resource_id,
                    proposed = entry.proposed,
                    error = %e,
                    "Reallocation entry failed"
                );
            }
            outcomes.push(ReallocationOutcome {
                resource_id: entry.resource_id,
                result,
            });
        }

        let applied = outcomes.iter().filter(|o| o.is_ok()).count();
        let failed = outcomes.len() - applied;
        info!(applied, failed, "Applied reallocation plan");

        self.notify(
            "Resource Reallocation Applied",
            format!("{applied} resource(s) updated, {failed} failed"),
            if failed == 0 {
                NotificationKind::Success
            } else {
                NotificationKind::Warning
            },
        )
        .await;

        outcomes
    }

    /// Open a high-severity emergency event and raise the emergency flag.
    pub async fn activate_emergency(&self, reason: &str) -> HealthflowResult<EmergencyEvent> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(SurgeError::MissingReason.into());
        }

        let event = self
            .events
            .create(CreateEmergencyEvent {
                title: self.config.activation_title.clone(),
                description: reason.to_string(),
                severity: self.config.activation_severity,
                affected_resources: Some(self.config.affected_resources.clone()),
            })
            .await?;

        self.emergency_active.store(true, Ordering::SeqCst);
        info!(event_id = %event.id, "Emergency mode activated");

        self.notify(
            &self.config.activation_title,
            reason.to_string(),
            NotificationKind::Warning,
        )
        .await;

        Ok(event)
    }

    /// Clear the emergency flag. Open events stay active.
    pub fn deactivate_emergency(&self) {
        if self.emergency_active.swap(false, Ordering::SeqCst) {
            info!("Emergency mode deactivated");
        }
    }

    pub fn is_emergency_active(&self) -> bool {
        self.emergency_active.load(Ordering::SeqCst)
    }

    pub async fn emergency_overview(&self) -> HealthflowResult<EmergencyOverview> {
        let active_events = self
            .events
            .list_by_status(EmergencyStatus::Active)
            .await?
            .len();
        Ok(EmergencyOverview {
            active: self.is_emergency_active(),
            active_events,
        })
    }

    /// Fire-and-forget: a failing sink is logged and otherwise ignored.
    async fn notify(&self, title: &str, message: String, kind: NotificationKind) {
        if !self.config.notify {
            return;
        }
        let input = CreateNotification {
            title: title.to_string(),
            message,
            kind,
        };
        if let Err(e) = self.notifications.create(input).await {
            warn!(error = %e, "Failed to record notification");
        }
    }
}
