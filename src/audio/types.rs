//! Transport commands, status handle and the backend trait.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Commands accepted by the audio thread. All of them are fire-and-forget;
/// nothing here blocks waiting for the thread.
#[derive(Debug)]
pub(super) enum TransportCmd {
    /// Swap the loaded file. The new sink starts paused at offset zero.
    Load(PathBuf),
    /// Start output at the given offset into the loaded file.
    Play { start_at: Duration },
    /// Suspend output, keeping the position.
    Pause,
    /// Resume output from the preserved position.
    Resume,
    /// Drop the sink and reset the position clock.
    Stop,
    /// Apply a normalized volume to the current and future sinks.
    SetVolume(f32),
    /// Terminate the audio thread.
    Shutdown,
}

/// Snapshot the audio thread publishes for the polling side.
#[derive(Debug, Clone, Default)]
pub(super) struct TransportStatus {
    /// Elapsed playback time for the loaded file.
    pub elapsed: Duration,
    /// Whether the output still has audio queued. Goes false once the
    /// decoder ran dry, which is what end-of-track detection keys on.
    pub busy: bool,
}

pub(super) type StatusHandle = Arc<Mutex<TransportStatus>>;

/// Failure to get a file into the output pipeline.
#[derive(Debug)]
pub enum TransportError {
    Open(PathBuf, std::io::Error),
    Decode(PathBuf),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Open(path, e) => {
                write!(f, "cannot open {}: {e}", path.display())
            }
            TransportError::Decode(path) => {
                write!(f, "cannot decode {}", path.display())
            }
        }
    }
}

impl std::error::Error for TransportError {}

/// The seam between the playback controller and the audio engine.
///
/// `load` validates eagerly and reports corrupt/missing files before any
/// state transition happens; everything else is fire-and-forget. The two
/// queries never block: they read a snapshot the engine refreshes on its
/// own tick.
pub trait Transport {
    fn load(&mut self, path: &Path) -> Result<(), TransportError>;
    fn play(&mut self, start_at: Duration);
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
    fn position(&self) -> Duration;
    fn is_busy(&self) -> bool;
    /// Tear down the engine. Default is a no-op for transports with
    /// nothing to join.
    fn shutdown(&mut self) {}
}
