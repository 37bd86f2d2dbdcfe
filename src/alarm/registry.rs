//! Registries of per-alarm resources

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AlarmId, RepeatMode};
use crate::{services::Playback, tasks::ScheduledTask};

pub(crate) struct SoundEntry {
    pub sound: String,
    pub repeat_mode: RepeatMode,
    pub started_at: DateTime<Utc>,
    pub playback: Box<dyn Playback>,
}

pub(crate) struct VibrationEntry {
    pub started_at: DateTime<Utc>,
    pub task: ScheduledTask,
}

pub(crate) struct AutoStopEntry {
    /// Distinguishes this registration from any later one for the same id
    pub generation: u64,
    /// `None` when the deadline is beyond what a timestamp can hold
    pub fires_at: Option<DateTime<Utc>>,
    pub task: ScheduledTask,
}

/// The three per-id registries owned by an alarm manager.
///
/// An id present in any map is active; absent from all three it is stopped.
#[derive(Default)]
pub(crate) struct Registry {
    pub sounds: HashMap<AlarmId, SoundEntry>,
    pub vibrations: HashMap<AlarmId, VibrationEntry>,
    pub auto_stops: HashMap<AlarmId, AutoStopEntry>,
    generation: u64,
}

impl Registry {
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_active(&self, id: &AlarmId) -> bool {
        self.sounds.contains_key(id)
            || self.vibrations.contains_key(id)
            || self.auto_stops.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty() && self.vibrations.is_empty() && self.auto_stops.is_empty()
    }

    pub fn ids(&self) -> BTreeSet<AlarmId> {
        self.sounds
            .keys()
            .chain(self.vibrations.keys())
            .chain(self.auto_stops.keys())
            .cloned()
            .collect()
    }

    /// Cancel the auto-stop for `id`, if one is registered
    pub fn cancel_auto_stop(&mut self, id: &AlarmId) -> bool {
        match self.auto_stops.remove(id) {
            Some(entry) => {
                entry.task.cancel();
                true
            }
            None => false,
        }
    }

    /// Tear down every resource held for `id`. Returns whether it was active.
    pub fn teardown(&mut self, id: &AlarmId) -> bool {
        let had_auto_stop = self.cancel_auto_stop(id);

        let had_sound = match self.sounds.remove(id) {
            Some(mut entry) => {
                entry.playback.stop();
                true
            }
            None => false,
        };

        let had_vibration = match self.vibrations.remove(id) {
            Some(entry) => {
                entry.task.cancel();
                true
            }
            None => false,
        };

        had_auto_stop || had_sound || had_vibration
    }

    /// Tear down every alarm. Returns how many ids were active.
    pub fn teardown_all(&mut self) -> usize {
        let ids = self.ids();
        for id in &ids {
            self.teardown(id);
        }
        ids.len()
    }

    pub fn status(&self, id: &AlarmId) -> AlarmStatus {
        let sound = self.sounds.get(id).map(|entry| SoundStatus {
            sound: entry.sound.clone(),
            repeat: entry.repeat_mode,
            playing: entry.playback.is_playing(),
            started_at: entry.started_at,
        });
        let vibration = self.vibrations.get(id);
        let auto_stop = self.auto_stops.get(id);

        AlarmStatus {
            id: id.clone(),
            sound,
            vibrating: vibration.is_some(),
            vibration_started_at: vibration.map(|entry| entry.started_at),
            auto_stop_pending: auto_stop.is_some(),
            auto_stop_at: auto_stop.and_then(|entry| entry.fires_at),
        }
    }
}

/// Point-in-time view of one active alarm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmStatus {
    pub id: AlarmId,
    pub sound: Option<SoundStatus>,
    pub vibrating: bool,
    pub vibration_started_at: Option<DateTime<Utc>>,
    pub auto_stop_pending: bool,
    pub auto_stop_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundStatus {
    pub sound: String,
    pub repeat: RepeatMode,
    /// False once a finite sound has played out; the alarm stays registered
    /// until stopped
    pub playing: bool,
    pub started_at: DateTime<Utc>,
}
