//! Fire module - progress accumulator, threshold bands, and fire groups.

mod components;
mod plugin;
mod progress;
mod systems;
mod thresholds;

pub use components::*;
pub use plugin::FirePlugin;
pub use progress::{FireProgress, FireRng, ProgressAccumulator, ProgressUpdate};
pub use thresholds::{BandLatches, FireBand};
