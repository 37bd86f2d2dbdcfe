//! Alarm lifecycle manager

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use chrono::Utc;
use tracing::{debug, info, warn};

use super::{
    registry::{AutoStopEntry, Registry, SoundEntry, VibrationEntry},
    AlarmId, AlarmStatus, PlayCount, PlaybackError, RepeatMode,
};
use crate::{
    services::{HapticFeedback, SoundPlayer, SoundResolver},
    tasks::ScheduledTask,
};

/// How long an `Infinite` alarm may sound before it is stopped for the caller
pub const DEFAULT_AUTO_STOP_AFTER: Duration = Duration::from_secs(15 * 60);

/// Period between haptic pulses of a vibrating alarm
pub const DEFAULT_VIBRATION_PERIOD: Duration = Duration::from_millis(1700);

/// Tunables of an [`AlarmManager`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    pub auto_stop_after: Duration,
    pub vibration_period: Duration,
    /// Sound played by `play_transient_feedback`
    pub feedback_sound: Option<String>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            auto_stop_after: DEFAULT_AUTO_STOP_AFTER,
            vibration_period: DEFAULT_VIBRATION_PERIOD,
            feedback_sound: None,
        }
    }
}

/// Manages independent alarms, each addressed by an [`AlarmId`].
///
/// Every alarm owns at most one sound, one vibration loop and one auto-stop
/// timer. Operations on one id never touch another id's resources. Starting
/// a sound for an id that already has one replaces it (last start wins).
///
/// The manager is a cheap handle; clones share the same registries. All
/// operations are synchronous and must run inside a Tokio runtime because
/// timers and playback are spawned onto it. Dropping the last handle stops
/// every alarm.
#[derive(Clone)]
pub struct AlarmManager {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Mutex<Registry>,
    resolver: Arc<dyn SoundResolver>,
    player: Arc<dyn SoundPlayer>,
    haptics: Arc<dyn HapticFeedback>,
    config: ManagerConfig,
}

impl AlarmManager {
    pub fn new(
        resolver: Arc<dyn SoundResolver>,
        player: Arc<dyn SoundPlayer>,
        haptics: Arc<dyn HapticFeedback>,
        config: ManagerConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry: Mutex::new(Registry::default()),
                resolver,
                player,
                haptics,
                config,
            }),
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.inner.config
    }

    /// Start the sound for `id`, replacing any sound it already has.
    ///
    /// On error nothing changes: a sound already playing for `id` keeps
    /// playing. `Infinite` sounds get an auto-stop that stops the whole alarm
    /// after [`ManagerConfig::auto_stop_after`].
    pub fn start_sound(
        &self,
        id: impl Into<AlarmId>,
        sound: &str,
        repeat_mode: RepeatMode,
    ) -> Result<(), PlaybackError> {
        let id = id.into();

        let resource = self.inner.resolver.resolve(sound).ok_or_else(|| {
            warn!("No sound resource for {:?} (alarm {})", sound, id);
            PlaybackError::not_found(sound)
        })?;

        let playback = self
            .inner
            .player
            .play(&resource, repeat_mode.play_count())
            .inspect_err(|e| warn!("Alarm {}: {}", id, e))?;

        let mut registry = self.inner.registry();

        let previous = registry.sounds.insert(
            id.clone(),
            SoundEntry {
                sound: sound.to_string(),
                repeat_mode,
                started_at: Utc::now(),
                playback,
            },
        );
        if let Some(mut previous) = previous {
            debug!("Replacing sound {} for alarm {}", previous.sound, id);
            previous.playback.stop();
        }

        // An auto-stop belongs to the sound it was scheduled for
        registry.cancel_auto_stop(&id);

        if repeat_mode.is_infinite() {
            let generation = registry.next_generation();
            let delay = self.inner.config.auto_stop_after;
            let task = self.schedule_auto_stop(id.clone(), generation, delay);
            registry.auto_stops.insert(
                id.clone(),
                AutoStopEntry {
                    generation,
                    fires_at: chrono::Duration::from_std(delay)
                        .ok()
                        .and_then(|delay| Utc::now().checked_add_signed(delay)),
                    task,
                },
            );
            info!(
                "Alarm {} playing {} until stopped (auto-stop in {}s)",
                id,
                sound,
                delay.as_secs()
            );
        } else {
            info!("Alarm {} playing {} ({:?})", id, sound, repeat_mode);
        }

        Ok(())
    }

    fn schedule_auto_stop(&self, id: AlarmId, generation: u64, delay: Duration) -> ScheduledTask {
        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        ScheduledTask::after(delay, move || {
            if let Some(inner) = inner.upgrade() {
                inner.expire(&id, generation);
            }
        })
    }

    /// Start the vibration loop for `id`. No-op if it is already vibrating.
    pub fn start_vibration(&self, id: impl Into<AlarmId>) {
        let id = id.into();
        let mut registry = self.inner.registry();

        if registry.vibrations.contains_key(&id) {
            debug!("Alarm {} is already vibrating", id);
            return;
        }

        let haptics = Arc::clone(&self.inner.haptics);
        let task = ScheduledTask::every(self.inner.config.vibration_period, move || {
            haptics.pulse()
        });

        registry.vibrations.insert(
            id.clone(),
            VibrationEntry {
                started_at: Utc::now(),
                task,
            },
        );
        info!("Alarm {} vibrating", id);
    }

    /// Play the configured feedback sound once, outside any alarm
    pub fn play_transient_feedback(&self) {
        let Some(sound) = self.inner.config.feedback_sound.as_deref() else {
            debug!("No feedback sound configured");
            return;
        };

        let Some(resource) = self.inner.resolver.resolve(sound) else {
            warn!("Feedback sound {:?} not found", sound);
            return;
        };

        match self.inner.player.play(&resource, PlayCount::ONCE) {
            // Detached: released when it finishes playing
            Ok(playback) => drop(playback),
            Err(e) => warn!("Feedback sound failed: {}", e),
        }
    }

    pub fn play_one_shot_vibration(&self) {
        self.inner.haptics.pulse();
    }

    /// Stop everything `id` holds. Safe to call for an id that is not active.
    pub fn stop(&self, id: impl Into<AlarmId>) {
        let id = id.into();
        if self.inner.registry().teardown(&id) {
            info!("Alarm {} stopped", id);
        } else {
            debug!("Alarm {} was not active", id);
        }
    }

    pub fn stop_all(&self) {
        let stopped = self.inner.registry().teardown_all();
        if stopped > 0 {
            info!("Stopped {} alarm(s)", stopped);
        }
    }

    pub fn is_active(&self, id: impl Into<AlarmId>) -> bool {
        self.inner.registry().is_active(&id.into())
    }

    pub fn active_ids(&self) -> Vec<AlarmId> {
        self.inner.registry().ids().into_iter().collect()
    }

    /// Status of every active alarm, ordered by id
    pub fn snapshot(&self) -> Vec<AlarmStatus> {
        let registry = self.inner.registry();
        registry
            .ids()
            .iter()
            .map(|id| registry.status(id))
            .collect()
    }

    pub fn status(&self, id: impl Into<AlarmId>) -> Option<AlarmStatus> {
        let id = id.into();
        let registry = self.inner.registry();
        registry.is_active(&id).then(|| registry.status(&id))
    }
}

impl Inner {
    // Registry mutations never leave the maps half-updated, so a poisoned
    // lock is still safe to use.
    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Auto-stop firing. Only acts if `generation` is still the registered
    /// auto-stop for `id`; a stop or restart that got the lock first wins.
    fn expire(&self, id: &AlarmId, generation: u64) {
        let mut registry = self.registry();

        match registry.auto_stops.get(id) {
            Some(entry) if entry.generation == generation => {}
            _ => {
                debug!("Ignoring stale auto-stop for alarm {}", id);
                return;
            }
        }

        info!("Auto-stop expired for alarm {}", id);
        registry.teardown(id);
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let registry = self
            .registry
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if !registry.is_empty() {
            debug!("Alarm manager dropped, stopping remaining alarms");
            registry.teardown_all();
        }
    }
}
