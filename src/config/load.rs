use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries an optional config file first, then environment
/// variables (prefix `RONDO__`) and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("RONDO")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.audio.progress_poll_ms == 0 {
            return Err("audio.progress_poll_ms must be >= 1".to_string());
        }
        if self.audio.end_poll_ms == 0 {
            return Err("audio.end_poll_ms must be >= 1".to_string());
        }
        if self.audio.idle_polls_to_advance == 0 {
            return Err("audio.idle_polls_to_advance must be >= 1".to_string());
        }
        if self.playback.initial_volume_percent > 100 {
            return Err("playback.initial_volume_percent must be <= 100".to_string());
        }
        if self.controls.volume_step_percent == 0 || self.controls.volume_step_percent > 100 {
            return Err("controls.volume_step_percent must be in 1..=100".to_string());
        }
        Ok(())
    }

    /// Load settings, falling back to defaults when the config is missing
    /// or invalid. Config problems should never prevent startup.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(s) => {
                if let Err(msg) = s.validate() {
                    log::warn!("invalid config, using defaults: {msg}");
                    Settings::default()
                } else {
                    s
                }
            }
            Err(e) => {
                log::warn!("failed to load config, using defaults: {e}");
                Settings::default()
            }
        }
    }
}

/// Resolve the config path from `RONDO_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("RONDO_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/rondo/config.toml`
/// or `~/.config/rondo/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("rondo").join("config.toml"))
}
