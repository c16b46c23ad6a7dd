//! Reward cell components and resources.

use bevy::prelude::*;

use super::rarity::Rarity;

/// A reward waiting on the floor next to the tower.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RewardCell {
    pub rarity: Rarity,
    pub base_income: u64,
    /// Seconds to open at the current opening level
    pub open_time: f32,
}

/// Player's opening upgrade level. Changing it recomputes every open time.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq, Deref, DerefMut)]
pub struct OpeningLevel(pub u32);

/// Mesh and per-rarity materials for cells.
///
/// Optional: without it cells are spawned as bare entities.
#[derive(Resource, Debug, Clone)]
pub struct CellVisuals {
    pub mesh: Handle<Mesh>,
    pub materials: Vec<Handle<StandardMaterial>>,
}

impl CellVisuals {
    pub fn material_for(&self, rarity: Rarity) -> Option<Handle<StandardMaterial>> {
        self.materials
            .get(rarity.index())
            .or(self.materials.first())
            .cloned()
    }
}
