//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Every mutation is a single,
//! independently committed statement; there is no cross-row transaction
//! and concurrent writers to the same row are last-write-wins.

use uuid::Uuid;

use crate::error::HealthflowResult;
use crate::models::{
    emergency::{CreateEmergencyEvent, EmergencyEvent, EmergencyStatus},
    notification::{CreateNotification, Notification},
    resource::{CreateResource, Resource, UpdateResource},
};

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

pub trait ResourceRepository: Send + Sync {
    fn create(
        &self,
        input: CreateResource,
    ) -> impl Future<Output = HealthflowResult<Resource>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = HealthflowResult<Resource>> + Send;

    /// Apply only the supplied fields. Rejects updates that would leave
    /// `available_count > total_count`.
    fn update(
        &self,
        id: Uuid,
        input: UpdateResource,
    ) -> impl Future<Output = HealthflowResult<Resource>> + Send;

    /// All resources, ordered by id.
    fn list(&self) -> impl Future<Output = HealthflowResult<Vec<Resource>>> + Send;
}

// ---------------------------------------------------------------------------
// Emergency events
// ---------------------------------------------------------------------------

pub trait EmergencyEventRepository: Send + Sync {
    fn create(
        &self,
        input: CreateEmergencyEvent,
    ) -> impl Future<Output = HealthflowResult<EmergencyEvent>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = HealthflowResult<EmergencyEvent>> + Send;

    /// Events with the given status, newest first.
    fn list_by_status(
        &self,
        status: EmergencyStatus,
    ) -> impl Future<Output = HealthflowResult<Vec<EmergencyEvent>>> + Send;

    /// Mark an event resolved. Resolving an already-resolved event returns
    /// it unchanged.
    fn resolve(&self, id: Uuid) -> impl Future<Output = HealthflowResult<EmergencyEvent>> + Send;
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

pub trait NotificationRepository: Send + Sync {
    fn create(
        &self,
        input: CreateNotification,
    ) -> impl Future<Output = HealthflowResult<Notification>> + Send;

    /// Most recent notifications first, at most `limit` of them.
    fn list_recent(
        &self,
        limit: u32,
    ) -> impl Future<Output = HealthflowResult<Vec<Notification>>> + Send;

    fn mark_read(&self, id: Uuid) -> impl Future<Output = HealthflowResult<Notification>> + Send;
}
