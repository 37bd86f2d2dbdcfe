//! Platform service module
//!
//! This module contains the external collaborators the alarm manager drives:
//! sound resolution, sound playback and haptic feedback.

pub mod haptics;
pub mod sound;

// Re-export main types
pub use haptics::{CommandHaptics, HapticFeedback};
pub use sound::{
    CommandPlayback, CommandPlayer, DirectoryResolver, Playback, SoundPlayer, SoundResolver,
    SoundResource, AUDIO_EXTENSIONS,
};
