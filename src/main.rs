use std::path::Path;
use std::sync::mpsc;

use eframe::egui;

mod app;
mod audio;
mod config;
mod library;
mod player;
mod tray;
mod ui;

use app::App;
use config::Settings;
use library::Track;
use tray::{ControlCmd, TrayController};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    stderrlog::new()
        .module(module_path!())
        .verbosity(2)
        .init()
        .ok();

    let settings = Settings::load_or_default();
    let preload = preload_from_args(&settings);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.ui.window_width, settings.ui.window_height])
            .with_min_inner_size([400.0, 420.0]),
        ..Default::default()
    };

    let run_res = eframe::run_native(
        "rondo",
        native_options,
        Box::new(
            move |_cc| -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
                // The tray wants to be created on the event-loop thread;
                // its menu events are drained each frame by the app.
                let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
                let tray = TrayController::new(control_tx.clone());
                Ok(Box::new(App::new(
                    settings, preload, tray, control_tx, control_rx,
                )))
            },
        ),
    );
    if let Err(e) = run_res {
        return Err(Box::new(e));
    }

    Ok(())
}

/// Optional CLI arguments: directories are scanned for audio files,
/// plain files are probed and queued directly.
fn preload_from_args(settings: &Settings) -> Vec<Track> {
    let mut tracks = Vec::new();
    for arg in std::env::args().skip(1) {
        let path = Path::new(&arg);
        if path.is_dir() {
            tracks.extend(library::scan(path, &settings.library));
        } else if path.is_file() {
            tracks.push(library::probe(path));
        } else {
            log::warn!("ignoring argument {arg}: not a file or directory");
        }
    }
    tracks
}
