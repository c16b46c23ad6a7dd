//! UI module - fire progress HUD and pause menu.

mod hud;
mod plugin;

pub use hud::{approach_progress, DisplayedProgress, FireProgressBar, FireProgressText};
pub use plugin::UiPlugin;
