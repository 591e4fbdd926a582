use std::path::PathBuf;
use std::time::Duration;

/// One playlist entry. Immutable once created by [`super::probe`].
#[derive(Clone, Debug)]
pub struct Track {
    pub path: PathBuf,
    /// Tag title, or the file stem when the file carries no usable tag.
    pub title: String,
    /// Total length; `Duration::ZERO` when the file could not be probed.
    pub duration: Duration,
    /// Text shown in the playlist and the now-playing line.
    pub display: String,
}

impl Track {
    /// True when the probe determined a usable length for this file.
    pub fn has_duration(&self) -> bool {
        self.duration > Duration::ZERO
    }
}
