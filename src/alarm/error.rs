//! Alarm playback errors

use thiserror::Error;

/// Failure to start an alarm sound.
///
/// Both variants are local to the `start_sound` call that produced them;
/// other alarms and the manager itself are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The sound descriptor did not resolve to anything playable
    #[error("sound resource not found: {sound}")]
    ResourceNotFound { sound: String },

    /// The resource exists but the playback engine rejected it
    #[error("failed to start playback of {sound}: {reason}")]
    PlaybackStartFailed { sound: String, reason: String },
}

impl PlaybackError {
    pub fn not_found(sound: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            sound: sound.into(),
        }
    }

    pub fn start_failed(sound: impl Into<String>, reason: impl ToString) -> Self {
        Self::PlaybackStartFailed {
            sound: sound.into(),
            reason: reason.to_string(),
        }
    }
}
