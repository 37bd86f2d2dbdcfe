//! Alarm lifecycle management
//!
//! This module contains the per-identifier alarm registry and the types
//! describing what an alarm plays and for how long.

pub mod error;
pub mod manager;
pub mod registry;
pub mod repeat_mode;

use std::fmt;

use serde::{Deserialize, Serialize};

// Re-export main types
pub use error::PlaybackError;
pub use manager::{
    AlarmManager, ManagerConfig, DEFAULT_AUTO_STOP_AFTER, DEFAULT_VIBRATION_PERIOD,
};
pub use registry::{AlarmStatus, SoundStatus};
pub use repeat_mode::{LoopCount, PlayCount, RepeatMode};

/// Opaque, caller-supplied alarm identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlarmId(String);

impl AlarmId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for AlarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AlarmId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AlarmId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&AlarmId> for AlarmId {
    fn from(id: &AlarmId) -> Self {
        id.clone()
    }
}
