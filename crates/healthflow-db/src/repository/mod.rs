//! SurrealDB repository implementations.

mod emergency_event;
mod notification;
mod resource;

pub use emergency_event::SurrealEmergencyEventRepository;
pub use notification::SurrealNotificationRepository;
pub use resource::SurrealResourceRepository;
