//! System-tray mini-controller.
//!
//! The tray exposes the transport actions as a menu; every activation is
//! translated into a [`ControlCmd`] and pushed into the control channel
//! the UI loop drains. The tray never touches player state itself.

use std::sync::mpsc::Sender;

use tray_icon::menu::{Menu, MenuEvent, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

/// Actions a controller surface can request. Applied on the UI thread
/// only, in arrival order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    PlayPause,
    Stop,
    Prev,
    Next,
    VolumeUp,
    VolumeDown,
    Show,
    Quit,
}

const MENU_PLAY_PAUSE: &str = "play-pause";
const MENU_STOP: &str = "stop";
const MENU_PREV: &str = "prev";
const MENU_NEXT: &str = "next";
const MENU_VOLUME_UP: &str = "volume-up";
const MENU_VOLUME_DOWN: &str = "volume-down";
const MENU_SHOW: &str = "show";
const MENU_QUIT: &str = "quit";

const ICON_SIZE: u32 = 64;

/// Map a menu item id to its control command.
pub fn command_for_menu_id(id: &str) -> Option<ControlCmd> {
    match id {
        MENU_PLAY_PAUSE => Some(ControlCmd::PlayPause),
        MENU_STOP => Some(ControlCmd::Stop),
        MENU_PREV => Some(ControlCmd::Prev),
        MENU_NEXT => Some(ControlCmd::Next),
        MENU_VOLUME_UP => Some(ControlCmd::VolumeUp),
        MENU_VOLUME_DOWN => Some(ControlCmd::VolumeDown),
        MENU_SHOW => Some(ControlCmd::Show),
        MENU_QUIT => Some(ControlCmd::Quit),
        _ => None,
    }
}

/// The tray icon plus the sending half of the control channel.
///
/// Created on the UI thread (the OS tray wants to live on the main event
/// loop); dropping it removes the icon.
pub struct TrayController {
    _tray: TrayIcon,
    tx: Sender<ControlCmd>,
}

impl TrayController {
    /// Build the tray icon and menu. A failure (headless session, no tray
    /// area) is logged and tolerated; the player works without it.
    pub fn new(tx: Sender<ControlCmd>) -> Option<Self> {
        match build_tray() {
            Ok(tray) => Some(Self { _tray: tray, tx }),
            Err(e) => {
                log::warn!("tray unavailable: {e}");
                None
            }
        }
    }

    /// Drain pending menu events into the control channel. Called once
    /// per UI frame.
    pub fn pump(&self) {
        while let Ok(ev) = MenuEvent::receiver().try_recv() {
            if let Some(cmd) = command_for_menu_id(ev.id.0.as_str()) {
                if self.tx.send(cmd).is_err() {
                    log::warn!("control channel closed; dropping tray action");
                }
            }
        }
    }
}

fn build_tray() -> Result<TrayIcon, Box<dyn std::error::Error>> {
    let menu = Menu::new();
    menu.append(&MenuItem::with_id(MENU_PLAY_PAUSE, "Play/Pause", true, None))?;
    menu.append(&MenuItem::with_id(MENU_STOP, "Stop", true, None))?;
    menu.append(&MenuItem::with_id(MENU_PREV, "Previous", true, None))?;
    menu.append(&MenuItem::with_id(MENU_NEXT, "Next", true, None))?;
    menu.append(&PredefinedMenuItem::separator())?;
    menu.append(&MenuItem::with_id(MENU_VOLUME_UP, "Volume +", true, None))?;
    menu.append(&MenuItem::with_id(MENU_VOLUME_DOWN, "Volume -", true, None))?;
    menu.append(&PredefinedMenuItem::separator())?;
    menu.append(&MenuItem::with_id(MENU_SHOW, "Show window", true, None))?;
    menu.append(&MenuItem::with_id(MENU_QUIT, "Exit", true, None))?;

    let icon = Icon::from_rgba(icon_rgba(ICON_SIZE), ICON_SIZE, ICON_SIZE)?;

    let tray = TrayIconBuilder::new()
        .with_tooltip("rondo")
        .with_menu(Box::new(menu))
        .with_icon(icon)
        .build()?;
    Ok(tray)
}

const ICON_ACCENT: [u8; 4] = [0xe9, 0x45, 0x60, 0xff];

/// Draw the tray bitmap: a beamed pair of eighth notes on a transparent
/// background. Coordinates are in a 64x64 grid, scaled to `size`.
fn icon_rgba(size: u32) -> Vec<u8> {
    let mut buf = vec![0u8; (size * size * 4) as usize];
    let s = |v: u32| v * size / 64;

    // Note heads.
    fill_ellipse(&mut buf, size, s(10), s(40), s(26), s(52));
    fill_ellipse(&mut buf, size, s(38), s(36), s(54), s(48));
    // Stems.
    fill_rect(&mut buf, size, s(22), s(14), s(26), s(46));
    fill_rect(&mut buf, size, s(50), s(10), s(54), s(42));
    // Beam connecting the stems.
    fill_rect(&mut buf, size, s(22), s(10), s(54), s(18));

    buf
}

fn put(buf: &mut [u8], size: u32, x: u32, y: u32) {
    if x >= size || y >= size {
        return;
    }
    let i = ((y * size + x) * 4) as usize;
    buf[i..i + 4].copy_from_slice(&ICON_ACCENT);
}

fn fill_rect(buf: &mut [u8], size: u32, x0: u32, y0: u32, x1: u32, y1: u32) {
    for y in y0..y1 {
        for x in x0..x1 {
            put(buf, size, x, y);
        }
    }
}

fn fill_ellipse(buf: &mut [u8], size: u32, x0: u32, y0: u32, x1: u32, y1: u32) {
    let cx = (x0 + x1) as f32 / 2.0;
    let cy = (y0 + y1) as f32 / 2.0;
    let rx = ((x1 - x0) as f32 / 2.0).max(1.0);
    let ry = ((y1 - y0) as f32 / 2.0).max(1.0);
    for y in y0..y1 {
        for x in x0..x1 {
            let dx = (x as f32 + 0.5 - cx) / rx;
            let dy = (y as f32 + 0.5 - cy) / ry;
            if dx * dx + dy * dy <= 1.0 {
                put(buf, size, x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests;
