//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alarm::{AlarmStatus, RepeatMode};

/// Body of POST /alarms/:id/sound
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSoundRequest {
    pub sound: String,
    #[serde(default)]
    pub repeat: RepeatMode,
}

/// API response structure for alarm action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub alarms: Vec<AlarmStatus>,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, alarms: Vec<AlarmStatus>) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            alarms,
        }
    }

    /// Create an active response
    pub fn active(message: String, alarms: Vec<AlarmStatus>) -> Self {
        Self::new("active".to_string(), message, alarms)
    }

    /// Create an inactive response
    pub fn inactive(message: String, alarms: Vec<AlarmStatus>) -> Self {
        Self::new("inactive".to_string(), message, alarms)
    }

    /// Create an error response
    pub fn error(message: String, alarms: Vec<AlarmStatus>) -> Self {
        Self::new("error".to_string(), message, alarms)
    }
}

/// Status response with every active alarm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub alarms: Vec<AlarmStatus>,
    pub active_count: usize,
    pub auto_stop_minutes: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
