//! Scripted transport used by controller and app tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::audio::{Transport, TransportError};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load(PathBuf),
    Play(Duration),
    Pause,
    Resume,
    Stop,
    SetVolume(f32),
}

/// Records every transport command and plays back whatever position/busy
/// values the test scripts into it.
#[derive(Default)]
pub struct MockTransport {
    pub calls: Vec<Call>,
    pub position: Duration,
    pub busy: bool,
    /// Paths whose `load` should fail, simulating corrupt files.
    pub fail_loads: Vec<PathBuf>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_volume(&self) -> Option<f32> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::SetVolume(v) => Some(*v),
            _ => None,
        })
    }

    pub fn loaded_paths(&self) -> Vec<&Path> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Load(p) => Some(p.as_path()),
                _ => None,
            })
            .collect()
    }

    pub fn last_play_offset(&self) -> Option<Duration> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Play(d) => Some(*d),
            _ => None,
        })
    }
}

impl Transport for MockTransport {
    fn load(&mut self, path: &Path) -> Result<(), TransportError> {
        if self.fail_loads.iter().any(|p| p.as_path() == path) {
            return Err(TransportError::Decode(path.to_path_buf()));
        }
        self.calls.push(Call::Load(path.to_path_buf()));
        // A freshly loaded file has audio queued.
        self.busy = true;
        Ok(())
    }

    fn play(&mut self, start_at: Duration) {
        self.calls.push(Call::Play(start_at));
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn resume(&mut self) {
        self.calls.push(Call::Resume);
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
        self.busy = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.push(Call::SetVolume(volume));
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn is_busy(&self) -> bool {
        self.busy
    }
}
