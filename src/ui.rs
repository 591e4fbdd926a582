//! Window rendering.
//!
//! Pure presentation: this module reads the player and emits `UiAction`s
//! for the app layer to apply. It never mutates playback state itself.

use std::time::Duration;

use eframe::egui::{self, Color32, ProgressBar, RichText, ScrollArea, Slider};

use crate::audio::Transport;
use crate::config::ControlsSettings;
use crate::library::Track;
use crate::player::{Player, Status};
use crate::tray::ControlCmd;

/// Interactions collected during one frame, applied by the app after
/// rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    OpenFiles,
    Control(ControlCmd),
    PlayRow(usize),
    SelectRow(usize),
    RemoveSelected,
    ClearPlaylist,
    HideToTray,
    SeekBy(i64),
    SetVolumePercent(f32),
}

/// Format a `Duration` as `MM:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Volume glyph for the given percentage. Thresholds are cosmetic only.
pub fn volume_icon(percent: f32) -> &'static str {
    if percent < 1.0 {
        "🔇"
    } else if percent < 33.0 {
        "🔈"
    } else if percent < 66.0 {
        "🔉"
    } else {
        "🔊"
    }
}

pub fn status_label(status: Status) -> &'static str {
    match status {
        Status::Stopped => "⏹ Stopped",
        Status::Playing => "▶ Playing",
        Status::Paused => "⏸ Paused",
        Status::Finished => "⏹ Finished",
    }
}

fn status_color(status: Status) -> Color32 {
    match status {
        Status::Playing => Color32::from_rgb(0x00, 0xd2, 0x5b),
        Status::Paused => Color32::from_rgb(0xff, 0xc1, 0x07),
        Status::Stopped | Status::Finished => Color32::GRAY,
    }
}

/// Playlist row: display name plus the probed length when known.
pub fn playlist_row_text(track: &Track) -> String {
    if track.has_duration() {
        format!("{} [{}]", track.display, format_mmss(track.duration))
    } else {
        track.display.clone()
    }
}

pub fn track_counter(current: Option<usize>, total: usize) -> String {
    match current {
        Some(i) if total > 0 => format!("Track: {} / {}", i + 1, total),
        _ => format!("Track: 0 / {total}"),
    }
}

/// Render one frame and collect the user's interactions.
pub fn draw<T: Transport>(
    ctx: &egui::Context,
    player: &Player<T>,
    selected: Option<usize>,
    controls: &ControlsSettings,
    tray_available: bool,
) -> Vec<UiAction> {
    let mut actions = Vec::new();
    let seek = controls.seek_seconds.min(i64::MAX as u64) as i64;

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("🎵 rondo");
        });
        ui.add_space(4.0);

        let now_playing = player
            .current_track()
            .map(|t| format!("🎵 {}", t.display))
            .unwrap_or_else(|| "No file selected".to_string());
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.label(now_playing);
        });

        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(status_label(player.status()))
                    .color(status_color(player.status())),
            );
        });

        ui.add(ProgressBar::new(player.progress()));
        let total = player
            .current_track()
            .map(|t| t.duration)
            .unwrap_or(Duration::ZERO);
        ui.vertical_centered(|ui| {
            ui.label(format!(
                "{} / {}",
                format_mmss(player.elapsed()),
                format_mmss(total)
            ));
            ui.label(track_counter(player.current_index(), player.len()));
        });
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            if ui.button("📁").on_hover_text("Open files").clicked() {
                actions.push(UiAction::OpenFiles);
            }
            if ui.button("⏮").on_hover_text("Previous track").clicked() {
                actions.push(UiAction::Control(ControlCmd::Prev));
            }
            if ui
                .button("⏪")
                .on_hover_text(format!("Back {seek}s"))
                .clicked()
            {
                actions.push(UiAction::SeekBy(-seek));
            }
            let play_glyph = if player.status() == Status::Playing {
                "⏸"
            } else {
                "▶"
            };
            if ui.button(play_glyph).on_hover_text("Play/Pause").clicked() {
                actions.push(UiAction::Control(ControlCmd::PlayPause));
            }
            if ui
                .button("⏩")
                .on_hover_text(format!("Forward {seek}s"))
                .clicked()
            {
                actions.push(UiAction::SeekBy(seek));
            }
            if ui.button("⏹").on_hover_text("Stop").clicked() {
                actions.push(UiAction::Control(ControlCmd::Stop));
            }
            if ui.button("⏭").on_hover_text("Next track").clicked() {
                actions.push(UiAction::Control(ControlCmd::Next));
            }
        });

        ui.horizontal(|ui| {
            let mut volume = player.volume_percent();
            ui.label(volume_icon(volume));
            let resp = ui.add(Slider::new(&mut volume, 0.0..=100.0).show_value(false));
            if resp.changed() {
                actions.push(UiAction::SetVolumePercent(volume));
            }
            ui.label(format!("{volume:.0}%"));
        });
        ui.add_space(4.0);

        ui.label(RichText::new("📋 Playlist").strong());
        ScrollArea::vertical()
            .auto_shrink([false, true])
            .max_height((ui.available_height() - 32.0).max(64.0))
            .show(ui, |ui| {
                for (i, track) in player.tracks().iter().enumerate() {
                    let is_current = player.current_index() == Some(i);
                    let is_selected = selected == Some(i) || is_current;
                    let resp = ui.selectable_label(is_selected, playlist_row_text(track));
                    if resp.double_clicked() {
                        actions.push(UiAction::PlayRow(i));
                    } else if resp.clicked() {
                        actions.push(UiAction::SelectRow(i));
                    }
                }
            });

        ui.horizontal(|ui| {
            if ui.button("🗑 Clear").clicked() {
                actions.push(UiAction::ClearPlaylist);
            }
            if ui.button("➖ Remove").clicked() {
                actions.push(UiAction::RemoveSelected);
            }
            if tray_available {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("📥 To Tray").clicked() {
                        actions.push(UiAction::HideToTray);
                    }
                });
            }
        });
    });

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn format_mmss_handles_minute_wrap() {
        assert_eq!(format_mmss(Duration::ZERO), "00:00");
        assert_eq!(format_mmss(Duration::from_secs(59)), "00:59");
        assert_eq!(format_mmss(Duration::from_secs(60)), "01:00");
        assert_eq!(format_mmss(Duration::from_secs(61 * 60 + 5)), "61:05");
    }

    #[test]
    fn volume_icon_thresholds() {
        assert_eq!(volume_icon(0.0), "🔇");
        assert_eq!(volume_icon(0.9), "🔇");
        assert_eq!(volume_icon(1.0), "🔈");
        assert_eq!(volume_icon(32.9), "🔈");
        assert_eq!(volume_icon(33.0), "🔉");
        assert_eq!(volume_icon(65.9), "🔉");
        assert_eq!(volume_icon(66.0), "🔊");
        assert_eq!(volume_icon(100.0), "🔊");
    }

    #[test]
    fn playlist_row_text_appends_known_durations_only() {
        let with = Track {
            path: PathBuf::from("/m/a.mp3"),
            title: "a".into(),
            duration: Duration::from_secs(75),
            display: "Artist - a".into(),
        };
        let without = Track {
            path: PathBuf::from("/m/b.mp3"),
            title: "b".into(),
            duration: Duration::ZERO,
            display: "b".into(),
        };
        assert_eq!(playlist_row_text(&with), "Artist - a [01:15]");
        assert_eq!(playlist_row_text(&without), "b");
    }

    #[test]
    fn track_counter_is_one_based_and_zero_when_empty() {
        assert_eq!(track_counter(None, 0), "Track: 0 / 0");
        assert_eq!(track_counter(Some(0), 3), "Track: 1 / 3");
        assert_eq!(track_counter(Some(2), 3), "Track: 3 / 3");
    }
}
