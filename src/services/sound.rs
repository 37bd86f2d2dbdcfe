//! Sound resolution and playback

use std::{
    path::{Path, PathBuf},
    process::Stdio,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use tokio::{
    process::{Child, Command},
    time::{sleep, Duration, Instant},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::alarm::{LoopCount, PlayCount, PlaybackError};

/// File extensions tried, in order, for descriptors without one
pub const AUDIO_EXTENSIONS: &[&str] = &["caf", "wav", "mp3", "m4a", "ogg", "flac"];

/// A play that ends sooner than this is treated as a player that exits
/// without producing sound
const MIN_PLAY_DURATION: Duration = Duration::from_millis(100);

/// Pause before restarting after a play shorter than `MIN_PLAY_DURATION`
const RESPAWN_BACKOFF: Duration = Duration::from_millis(500);

/// A sound descriptor resolved to something playable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundResource {
    /// Descriptor the caller asked for
    pub name: String,
    pub path: PathBuf,
}

impl SoundResource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Maps a sound descriptor to a playable resource
pub trait SoundResolver: Send + Sync {
    fn resolve(&self, sound: &str) -> Option<SoundResource>;
}

/// A running sound.
///
/// Dropping a `Playback` without calling `stop` detaches it: the sound
/// plays on until its natural end.
pub trait Playback: Send {
    fn stop(&mut self);

    fn is_playing(&self) -> bool;
}

/// Starts playback of resolved sounds. Must not block.
pub trait SoundPlayer: Send + Sync {
    fn play(
        &self,
        resource: &SoundResource,
        count: PlayCount,
    ) -> Result<Box<dyn Playback>, PlaybackError>;
}

/// Resolves descriptors to audio files inside a single directory
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    root: PathBuf,
}

impl DirectoryResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SoundResolver for DirectoryResolver {
    fn resolve(&self, sound: &str) -> Option<SoundResource> {
        if sound.is_empty() || sound.contains(['/', '\\']) || sound.contains("..") {
            debug!("Rejecting sound descriptor {:?}", sound);
            return None;
        }

        if Path::new(sound).extension().is_some() {
            let path = self.root.join(sound);
            return path.is_file().then(|| SoundResource::new(sound, path));
        }

        AUDIO_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", sound, ext)))
            .find(|path| path.is_file())
            .map(|path| SoundResource::new(sound, path))
    }
}

/// Plays sounds by running an external audio command once per play
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    program: String,
    args: Vec<String>,
}

impl CommandPlayer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn spawn(&self, resource: &SoundResource) -> std::io::Result<Child> {
        Command::new(&self.program)
            .args(&self.args)
            .arg(&resource.path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
    }
}

impl SoundPlayer for CommandPlayer {
    fn play(
        &self,
        resource: &SoundResource,
        count: PlayCount,
    ) -> Result<Box<dyn Playback>, PlaybackError> {
        let child = self
            .spawn(resource)
            .map_err(|e| PlaybackError::start_failed(&resource.name, e))?;

        let token = CancellationToken::new();
        let playing = Arc::new(AtomicBool::new(true));

        tokio::spawn(play_loop(
            self.clone(),
            resource.clone(),
            child,
            count.extra_loops(),
            token.clone(),
            Arc::clone(&playing),
        ));

        debug!("Started {} via {}", resource.name, self.program);
        Ok(Box::new(CommandPlayback { token, playing }))
    }
}

async fn play_loop(
    player: CommandPlayer,
    resource: SoundResource,
    mut child: Child,
    mut loops: LoopCount,
    token: CancellationToken,
    playing: Arc<AtomicBool>,
) {
    let mut started = Instant::now();

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                if let Err(e) = child.start_kill() {
                    debug!("Failed to kill player for {}: {}", resource.name, e);
                }
                if let Err(e) = child.wait().await {
                    debug!("Failed to reap player for {}: {}", resource.name, e);
                }
                break;
            }
            status = child.wait() => {
                match status {
                    Ok(status) if !status.success() => {
                        warn!("{} exited with {} while playing {}", player.program, status, resource.name);
                        break;
                    }
                    Err(e) => {
                        warn!("Failed to wait for {} playing {}: {}", player.program, resource.name, e);
                        break;
                    }
                    Ok(_) => {}
                }

                match &mut loops {
                    LoopCount::Finite(0) => break,
                    LoopCount::Finite(remaining) => *remaining -= 1,
                    LoopCount::Forever => {}
                }

                if started.elapsed() < MIN_PLAY_DURATION {
                    debug!("{} ended almost immediately, backing off", resource.name);
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => break,
                        _ = sleep(RESPAWN_BACKOFF) => {}
                    }
                }

                match player.spawn(&resource) {
                    Ok(next) => {
                        child = next;
                        started = Instant::now();
                    }
                    Err(e) => {
                        warn!("Failed to restart {}: {}", resource.name, e);
                        break;
                    }
                }
            }
        }
    }

    playing.store(false, Ordering::SeqCst);
    debug!("Playback of {} finished", resource.name);
}

/// Handle to a sound played by [`CommandPlayer`]
#[derive(Debug)]
pub struct CommandPlayback {
    token: CancellationToken,
    playing: Arc<AtomicBool>,
}

impl Playback for CommandPlayback {
    fn stop(&mut self) {
        self.token.cancel();
        self.playing.store(false, Ordering::SeqCst);
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }
}
