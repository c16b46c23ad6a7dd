//! World module - the demo scene around the tower.

mod materials;
mod plugin;
mod spawning;
mod zone;

pub use plugin::{setup_scene, WorldPlugin};
pub use spawning::TOWER_SCALE;
pub use zone::{TowerZoneOccupancy, ZoneVisitor};
