//! Application shell: owns the player, the control channel and the tray,
//! and drives the polling ticks from the UI loop.

mod model;
mod update;

pub use model::*;
