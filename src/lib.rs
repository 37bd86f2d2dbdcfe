//! Alarm Keeper - per-identifier alarm lifecycle management
//!
//! This library manages independent alarms addressed by opaque ids. Each
//! alarm may loop a sound, pulse haptic feedback, and, when its sound loops
//! forever, stop itself after a fixed interval. A small HTTP service exposes
//! the manager for local clients.

pub mod alarm;
pub mod api;
pub mod config;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use alarm::{AlarmId, AlarmManager, ManagerConfig, PlaybackError, RepeatMode};
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
