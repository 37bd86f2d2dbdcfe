//! Repeat policy for alarm sounds

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// How many times an alarm sound plays before stopping on its own
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RepeatMode {
    /// Play the sound a single time
    #[default]
    Once,
    /// Play the sound `times` times in total
    Repeat { times: NonZeroU32 },
    /// Loop until stopped; the manager bounds this with an auto-stop
    Infinite,
}

impl RepeatMode {
    /// Build a `Repeat` mode, or `None` when `times` is zero
    pub fn repeat(times: u32) -> Option<Self> {
        NonZeroU32::new(times).map(|times| Self::Repeat { times })
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }

    pub fn play_count(&self) -> PlayCount {
        match *self {
            Self::Once => PlayCount::ONCE,
            Self::Repeat { times } => PlayCount::Finite(times),
            Self::Infinite => PlayCount::Forever,
        }
    }
}

/// Total number of times a sound is heard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCount {
    Finite(NonZeroU32),
    Forever,
}

impl PlayCount {
    pub const ONCE: Self = Self::Finite(NonZeroU32::MIN);

    /// Total plays, `None` when unbounded
    pub fn total_plays(&self) -> Option<NonZeroU32> {
        match *self {
            Self::Finite(plays) => Some(plays),
            Self::Forever => None,
        }
    }

    /// Number of restarts after the first play
    pub fn extra_loops(&self) -> LoopCount {
        match *self {
            Self::Finite(plays) => LoopCount::Finite(plays.get() - 1),
            Self::Forever => LoopCount::Forever,
        }
    }
}

/// Number of restarts after the first play of a sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCount {
    Finite(u32),
    Forever,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_zero_is_rejected() {
        assert_eq!(RepeatMode::repeat(0), None);
    }

    #[test]
    fn repeat_one_plays_like_once_but_stays_distinct() {
        let one = RepeatMode::repeat(1).unwrap();
        assert_ne!(one, RepeatMode::Once);
        assert_eq!(one.play_count(), RepeatMode::Once.play_count());
        assert_eq!(one.play_count().extra_loops(), LoopCount::Finite(0));
    }

    #[test]
    fn repeat_three_is_two_extra_loops() {
        let count = RepeatMode::repeat(3).unwrap().play_count();
        assert_eq!(count.total_plays().map(NonZeroU32::get), Some(3));
        assert_eq!(count.extra_loops(), LoopCount::Finite(2));
    }

    #[test]
    fn infinite_never_ends() {
        let count = RepeatMode::Infinite.play_count();
        assert_eq!(count.total_plays(), None);
        assert_eq!(count.extra_loops(), LoopCount::Forever);
        assert!(RepeatMode::Infinite.is_infinite());
        assert!(!RepeatMode::Once.is_infinite());
    }

    #[test]
    fn serde_uses_mode_tag() {
        let mode: RepeatMode = serde_json::from_str(r#"{"mode":"repeat","times":3}"#).unwrap();
        assert_eq!(mode, RepeatMode::repeat(3).unwrap());

        let mode: RepeatMode = serde_json::from_str(r#"{"mode":"infinite"}"#).unwrap();
        assert_eq!(mode, RepeatMode::Infinite);

        assert!(serde_json::from_str::<RepeatMode>(r#"{"mode":"repeat","times":0}"#).is_err());
    }
}
