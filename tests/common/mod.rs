//! Fake platform services shared by the integration tests

#![allow(dead_code)]

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use alarm_keeper::{
    alarm::{AlarmManager, ManagerConfig, PlayCount, PlaybackError},
    services::{HapticFeedback, Playback, SoundPlayer, SoundResolver, SoundResource},
};

pub const KNOWN_SOUNDS: &[&str] = &["melody", "chime", "click"];

pub struct FakeResolver {
    known: HashSet<String>,
}

impl FakeResolver {
    pub fn new(known: &[&str]) -> Self {
        Self {
            known: known.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SoundResolver for FakeResolver {
    fn resolve(&self, sound: &str) -> Option<SoundResource> {
        self.known
            .contains(sound)
            .then(|| SoundResource::new(sound, format!("/sounds/{}.caf", sound)))
    }
}

#[derive(Clone)]
pub struct PlayRecord {
    pub sound: String,
    pub count: PlayCount,
    stopped: Arc<AtomicBool>,
}

impl PlayRecord {
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct FakePlayer {
    plays: Mutex<Vec<PlayRecord>>,
    failing: AtomicBool,
}

impl FakePlayer {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn plays(&self) -> Vec<PlayRecord> {
        self.plays.lock().unwrap().clone()
    }

    /// Plays that have not been stopped
    pub fn live(&self) -> usize {
        self.plays().iter().filter(|play| !play.is_stopped()).count()
    }
}

impl SoundPlayer for FakePlayer {
    fn play(
        &self,
        resource: &SoundResource,
        count: PlayCount,
    ) -> Result<Box<dyn Playback>, PlaybackError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PlaybackError::start_failed(&resource.name, "device busy"));
        }

        let stopped = Arc::new(AtomicBool::new(false));
        self.plays.lock().unwrap().push(PlayRecord {
            sound: resource.name.clone(),
            count,
            stopped: Arc::clone(&stopped),
        });
        Ok(Box::new(FakePlayback { stopped }))
    }
}

struct FakePlayback {
    stopped: Arc<AtomicBool>,
}

impl Playback for FakePlayback {
    fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    fn is_playing(&self) -> bool {
        !self.stopped.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct CountingHaptics {
    pulses: AtomicUsize,
}

impl CountingHaptics {
    pub fn pulses(&self) -> usize {
        self.pulses.load(Ordering::SeqCst)
    }
}

impl HapticFeedback for CountingHaptics {
    fn pulse(&self) {
        self.pulses.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct Harness {
    pub manager: AlarmManager,
    pub player: Arc<FakePlayer>,
    pub haptics: Arc<CountingHaptics>,
}

pub fn harness() -> Harness {
    harness_with(ManagerConfig::default())
}

pub fn harness_with(config: ManagerConfig) -> Harness {
    let player = Arc::new(FakePlayer::default());
    let haptics = Arc::new(CountingHaptics::default());
    let manager = AlarmManager::new(
        Arc::new(FakeResolver::new(KNOWN_SOUNDS)),
        player.clone(),
        haptics.clone(),
        config,
    );

    Harness {
        manager,
        player,
        haptics,
    }
}

/// Let spawned timer tasks run
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Sleep on the paused clock, then let woken tasks run
pub async fn wait(duration: Duration) {
    tokio::time::sleep(duration).await;
    settle().await;
}

pub fn minutes(minutes: u64) -> Duration {
    Duration::from_secs(minutes * 60)
}
