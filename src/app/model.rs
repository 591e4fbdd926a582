use std::sync::mpsc::{Receiver, Sender};
use std::time::Instant;

use eframe::egui;

use crate::audio::{RodioTransport, Transport};
use crate::config::Settings;
use crate::library::{self, Track};
use crate::player::{Player, PlayerError};
use crate::tray::{ControlCmd, TrayController};
use crate::ui::UiAction;

/// The running application.
///
/// Every mutation of the player happens here, on the UI thread: tray menu
/// events and UI buttons both funnel through the [`ControlCmd`] channel
/// or the frame's [`UiAction`] list.
pub struct App<T: Transport = RodioTransport> {
    pub(super) player: Player<T>,
    pub(super) settings: Settings,
    pub(super) selected: Option<usize>,
    pub(super) control_tx: Sender<ControlCmd>,
    pub(super) control_rx: Receiver<ControlCmd>,
    pub(super) tray: Option<TrayController>,
    pub(super) next_progress_tick: Instant,
    pub(super) next_end_tick: Instant,
    pub(super) hidden: bool,
    pub(super) quit_requested: bool,
    /// Last window title pushed to the OS, to avoid re-sending it every
    /// frame.
    pub(super) window_title: String,
}

impl App<RodioTransport> {
    pub fn new(
        settings: Settings,
        preload: Vec<Track>,
        tray: Option<TrayController>,
        control_tx: Sender<ControlCmd>,
        control_rx: Receiver<ControlCmd>,
    ) -> Self {
        Self::with_transport(
            RodioTransport::new(),
            settings,
            preload,
            tray,
            control_tx,
            control_rx,
        )
    }
}

impl<T: Transport> App<T> {
    pub fn with_transport(
        transport: T,
        settings: Settings,
        preload: Vec<Track>,
        tray: Option<TrayController>,
        control_tx: Sender<ControlCmd>,
        control_rx: Receiver<ControlCmd>,
    ) -> Self {
        let mut player = Player::new(
            transport,
            settings.audio.idle_polls_to_advance,
            f32::from(settings.playback.initial_volume_percent) / 100.0,
        );
        let preloaded = player.queue_tracks(preload);
        if preloaded > 0 {
            log::info!("preloaded {preloaded} tracks");
        }

        let now = Instant::now();
        Self {
            player,
            settings,
            selected: None,
            control_tx,
            control_rx,
            tray,
            next_progress_tick: now,
            next_end_tick: now,
            hidden: false,
            quit_requested: false,
            window_title: String::new(),
        }
    }

    /// Apply one control command. Shared by the tray, media-style UI
    /// buttons and anything else feeding the channel.
    pub(crate) fn handle_control(&mut self, cmd: ControlCmd, ctx: &egui::Context) {
        match cmd {
            ControlCmd::PlayPause => {
                let result = self.player.toggle();
                self.surface(result);
            }
            ControlCmd::Stop => self.player.stop(),
            ControlCmd::Prev => {
                let result = self.player.prev();
                self.surface(result);
            }
            ControlCmd::Next => {
                let result = self.player.next();
                self.surface(result);
            }
            ControlCmd::VolumeUp => {
                let step = f32::from(self.settings.controls.volume_step_percent) / 100.0;
                self.player.set_volume(self.player.volume() + step);
            }
            ControlCmd::VolumeDown => {
                let step = f32::from(self.settings.controls.volume_step_percent) / 100.0;
                self.player.set_volume((self.player.volume() - step).max(0.0));
            }
            ControlCmd::Show => {
                self.hidden = false;
                ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
                ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
            }
            ControlCmd::Quit => {
                self.quit_requested = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    pub(super) fn apply_action(&mut self, action: UiAction, ctx: &egui::Context) {
        match action {
            UiAction::OpenFiles => self.open_files(),
            UiAction::Control(cmd) => {
                let _ = self.control_tx.send(cmd);
            }
            UiAction::PlayRow(i) => {
                self.selected = Some(i);
                let result = self.player.play_index(i);
                self.surface(result);
            }
            UiAction::SelectRow(i) => self.selected = Some(i),
            UiAction::RemoveSelected => {
                if let Some(i) = self.selected {
                    self.player.remove(i);
                    self.selected = if self.player.is_empty() {
                        None
                    } else {
                        Some(i.min(self.player.len() - 1))
                    };
                }
            }
            UiAction::ClearPlaylist => {
                self.player.clear();
                self.selected = None;
            }
            UiAction::HideToTray => self.hide(ctx),
            UiAction::SeekBy(delta) => {
                let result = self.player.seek_by(delta);
                self.surface(result);
            }
            UiAction::SetVolumePercent(p) => self.player.set_volume_percent(p),
        }
    }

    fn open_files(&mut self) {
        let extensions: Vec<&str> = self
            .settings
            .library
            .extensions
            .iter()
            .map(String::as_str)
            .collect();
        let Some(paths) = rfd::FileDialog::new()
            .set_title("Select audio files")
            .add_filter("Audio files", &extensions)
            .pick_files()
        else {
            return;
        };

        let tracks: Vec<Track> = paths.iter().map(|p| library::probe(p)).collect();
        let result = self.player.add_tracks(tracks).map(|_| ());
        self.surface(result);
    }

    pub(super) fn hide(&mut self, ctx: &egui::Context) {
        self.hidden = true;
        ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
    }

    /// Surface a failed transition as a blocking notice. State was left
    /// unchanged by the failing transition, so there is nothing to undo.
    pub(super) fn surface(&self, result: Result<(), PlayerError>) {
        let Err(err) = result else { return };
        let level = match err {
            PlayerError::EmptyPlaylist => rfd::MessageLevel::Info,
            PlayerError::Load(_) => rfd::MessageLevel::Error,
        };
        log::warn!("{err}");
        let _ = rfd::MessageDialog::new()
            .set_level(level)
            .set_title("rondo")
            .set_description(err.to_string())
            .show();
    }

    #[cfg(test)]
    pub(crate) fn player(&self) -> &Player<T> {
        &self.player
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut Player<T> {
        &mut self.player
    }
}
