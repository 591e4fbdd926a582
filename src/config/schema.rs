use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/rondo/config.toml` or
/// `~/.config/rondo/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `RONDO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// How often the displayed progress is refreshed (milliseconds).
    pub progress_poll_ms: u64,
    /// How often end-of-track detection runs (milliseconds).
    pub end_poll_ms: u64,
    /// Consecutive idle polls required before auto-advancing. The
    /// transport can report a stale idle right after a seek or track
    /// change; values below 2 make that window a phantom track skip.
    pub idle_polls_to_advance: u32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            progress_poll_ms: 50,
            end_poll_ms: 500,
            idle_polls_to_advance: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds the rewind/forward buttons jump.
    pub seek_seconds: u64,
    /// Volume step for the tray volume +/- actions (percent).
    pub volume_step_percent: u8,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_seconds: 5,
            volume_step_percent: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Volume applied at startup (percent).
    pub initial_volume_percent: u8,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            initial_volume_percent: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "wav".into(), "ogg".into(), "flac".into()],
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Initial window size.
    pub window_width: f32,
    pub window_height: f32,
    /// Whether closing the window hides to the tray instead of quitting
    /// (only when a tray is available).
    pub close_to_tray: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            window_width: 500.0,
            window_height: 520.0,
            close_to_tray: true,
        }
    }
}
