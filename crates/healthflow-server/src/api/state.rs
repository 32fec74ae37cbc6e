//! Application state shared by all API handlers.

use std::sync::Arc;

use healthflow_db::repository::{
    SurrealEmergencyEventRepository, SurrealNotificationRepository, SurrealResourceRepository,
};
use healthflow_surge::{ReallocationEngine, SurgeConfig, SurgeError};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

pub type ResourceRepo = SurrealResourceRepository<Any>;
pub type EventRepo = SurrealEmergencyEventRepository<Any>;
pub type NotificationRepo = SurrealNotificationRepository<Any>;
pub type Engine = ReallocationEngine<ResourceRepo, EventRepo, NotificationRepo>;

/// API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Maximum notifications returned by `GET /api/notifications`.
    pub notification_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            notification_limit: 20,
        }
    }
}

/// Shared application state, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    resources: ResourceRepo,
    events: EventRepo,
    notifications: NotificationRepo,
    /// Owns the process-wide emergency flag.
    engine: Engine,
    config: ApiConfig,
}

impl AppState {
    pub fn new(
        db: Surreal<Any>,
        surge: SurgeConfig,
        config: ApiConfig,
    ) -> Result<Self, SurgeError> {
        let engine = ReallocationEngine::new(
            SurrealResourceRepository::new(db.clone()),
            SurrealEmergencyEventRepository::new(db.clone()),
            SurrealNotificationRepository::new(db.clone()),
            surge,
        )?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                resources: SurrealResourceRepository::new(db.clone()),
                events: SurrealEmergencyEventRepository::new(db.clone()),
                notifications: SurrealNotificationRepository::new(db),
                engine,
                config,
            }),
        })
    }

    pub fn resources(&self) -> &ResourceRepo {
        &self.inner.resources
    }

    pub fn events(&self) -> &EventRepo {
        &self.inner.events
    }

    pub fn notifications(&self) -> &NotificationRepo {
        &self.inner.notifications
    }

    pub fn engine(&self) -> &Engine {
        &self.inner.engine
    }

    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }
}
