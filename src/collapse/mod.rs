//! Collapse module - staged tower fall, restart timer, and reset.

mod components;
mod plugin;
mod sequence;
mod systems;

pub use components::*;
pub use plugin::CollapsePlugin;
pub use sequence::{CollapseStage, CollapseTimeline, TimelineFrame};
