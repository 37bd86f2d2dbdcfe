//! Haptic feedback primitive

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

/// Fire-and-forget haptic pulse. Failures are never surfaced.
pub trait HapticFeedback: Send + Sync {
    fn pulse(&self);
}

/// Triggers haptic pulses by running an external command.
///
/// Without a configured command each pulse is only logged, which is what
/// most desktop hosts without a vibration motor want.
#[derive(Debug, Clone, Default)]
pub struct CommandHaptics {
    program: Option<String>,
    args: Vec<String>,
}

impl CommandHaptics {
    pub fn new(program: Option<String>, args: Vec<String>) -> Self {
        Self { program, args }
    }
}

impl HapticFeedback for CommandHaptics {
    fn pulse(&self) {
        let Some(program) = &self.program else {
            debug!("Haptic pulse");
            return;
        };

        // The child is reaped by the runtime once it exits
        let spawned = Command::new(program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        if let Err(e) = spawned {
            warn!("Failed to run haptic command {}: {}", program, e);
        }
    }
}
