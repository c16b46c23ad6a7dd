//! Core module - game states, tower events, the `TowerSet` ordering and
//! pose tween helpers shared by every other plugin.

mod events;
mod plugin;
mod states;
mod tween;

pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
pub use tween::*;
