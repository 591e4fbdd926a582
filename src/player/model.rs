use std::fmt;
use std::time::Duration;

use crate::audio::{Transport, TransportError};
use crate::library::Track;

/// Playback status. `Finished` is the terminal flavor of stopped reached
/// when the last track ends naturally: the progress display freezes at
/// 100% instead of resetting.
///
/// "Paused" always means "a track is loaded and mid-playback", so the
/// paused-implies-playing invariant holds by construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Stopped,
    Playing,
    Paused,
    Finished,
}

impl Status {
    /// A track is loaded and its position is meaningful.
    pub fn is_playing(self) -> bool {
        matches!(self, Status::Playing | Status::Paused)
    }

    pub fn is_paused(self) -> bool {
        self == Status::Paused
    }
}

/// Errors surfaced to the user by controller transitions.
#[derive(Debug)]
pub enum PlayerError {
    /// An action that needs tracks ran on an empty playlist.
    EmptyPlaylist,
    /// The backend refused to load the requested file.
    Load(TransportError),
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerError::EmptyPlaylist => {
                write!(f, "the playlist is empty - add some audio files first")
            }
            PlayerError::Load(e) => write!(f, "cannot play file: {e}"),
        }
    }
}

impl std::error::Error for PlayerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlayerError::Load(e) => Some(e),
            PlayerError::EmptyPlaylist => None,
        }
    }
}

/// The playback controller.
///
/// Owns the playlist and all playback state; every mutation goes through
/// the transition methods in `transitions.rs`. The UI only reads.
pub struct Player<T: Transport> {
    pub(super) tracks: Vec<Track>,
    pub(super) current: usize,
    pub(super) status: Status,
    pub(super) volume: f32,
    /// Displayed position for the current track, refreshed by the
    /// progress tick and clamped to the track duration.
    pub(super) elapsed: Duration,
    /// Consecutive end-detection polls that saw an idle transport.
    pub(super) idle_polls: u32,
    pub(super) idle_polls_to_advance: u32,
    pub(super) transport: T,
}

impl<T: Transport> Player<T> {
    /// Create a controller over `transport`.
    ///
    /// `idle_polls_to_advance` is the debounce for natural-end detection:
    /// the transport must report idle that many polls in a row before the
    /// controller advances, which absorbs stale reports right after a
    /// seek or track change.
    pub fn new(transport: T, idle_polls_to_advance: u32, initial_volume: f32) -> Self {
        let mut player = Self {
            tracks: Vec::new(),
            current: 0,
            status: Status::Stopped,
            volume: initial_volume.clamp(0.0, 1.0),
            elapsed: Duration::ZERO,
            idle_polls: 0,
            idle_polls_to_advance: idle_polls_to_advance.max(1),
            transport,
        };
        let v = player.volume;
        player.transport.set_volume(v);
        player
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Index of the current track; `None` while the playlist is empty.
    pub fn current_index(&self) -> Option<usize> {
        if self.tracks.is_empty() {
            None
        } else {
            Some(self.current)
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current)
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn volume_percent(&self) -> f32 {
        self.volume * 100.0
    }

    /// Fraction of the current track played, for the progress bar.
    pub fn progress(&self) -> f32 {
        match self.current_track() {
            Some(t) if t.has_duration() => {
                (self.elapsed.as_secs_f32() / t.duration.as_secs_f32()).clamp(0.0, 1.0)
            }
            _ => {
                if self.status == Status::Finished {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Stop playback and tear down the transport. Called on app exit.
    pub fn shutdown(&mut self) {
        self.transport.stop();
        self.transport.shutdown();
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    #[cfg(test)]
    pub(crate) fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
