#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod errors;
pub mod room;
pub mod telemetry;

// Re-exports for public API
pub use config::engine::EngineConfig;
pub use engine::{GameEngine, ManualScheduler, Notifications, SettleScheduler, SettleTicket};
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use room::registry::RoomRegistry;
pub use room::{spawn_room, RoomHandle};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
