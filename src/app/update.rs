use std::time::{Duration, Instant};

use eframe::egui;

use crate::audio::Transport;
use crate::ui;

use super::model::App;

impl<T: Transport> eframe::App for App<T> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Tray menu events first, then the control channel they feed.
        if let Some(tray) = &self.tray {
            tray.pump();
        }
        let pending: Vec<_> = self.control_rx.try_iter().collect();
        for cmd in pending {
            self.handle_control(cmd, ctx);
        }

        // The two polling cadences run off wall-clock deadlines; egui
        // frames come faster than either.
        let now = Instant::now();
        if now >= self.next_progress_tick {
            self.player.tick_progress();
            self.next_progress_tick =
                now + Duration::from_millis(self.settings.audio.progress_poll_ms);
        }
        if now >= self.next_end_tick {
            let result = self.player.tick_end_check();
            self.surface(result);
            self.next_end_tick = now + Duration::from_millis(self.settings.audio.end_poll_ms);
        }

        // Closing the window parks the player in the tray instead of
        // quitting, unless configured otherwise or quit was requested.
        if ctx.input(|i| i.viewport().close_requested())
            && self.settings.ui.close_to_tray
            && self.tray.is_some()
            && !self.quit_requested
        {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.hide(ctx);
        }

        // Mirror the loaded track in the title bar.
        let title = match self.player.current_track() {
            Some(t) if self.player.status().is_playing() => format!("{} - rondo", t.title),
            _ => "rondo".to_string(),
        };
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }

        // No point rendering widgets into a window parked in the tray.
        if !self.hidden {
            let actions = ui::draw(
                ctx,
                &self.player,
                self.selected,
                &self.settings.controls,
                self.tray.is_some(),
            );
            for action in actions {
                self.apply_action(action, ctx);
            }
        }

        ctx.request_repaint_after(Duration::from_millis(self.settings.audio.progress_poll_ms));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.player.shutdown();
    }
}
