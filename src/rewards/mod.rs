//! Rewards module - cells that spawn around the tower between fires.

mod components;
mod placement;
mod plugin;
mod rarity;
mod systems;

pub use components::*;
pub use placement::place_cells;
pub use plugin::RewardsPlugin;
pub use rarity::{opening_time, pick_rarity, resolve_chances, Rarity};
