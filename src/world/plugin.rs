//! World plugin - demo scene and tower zone tracking.

use bevy::prelude::*;

use super::materials::SceneMaterials;
use super::spawning::*;
use super::zone::{track_zone_occupancy, wander_visitors, TowerZoneOccupancy};
use crate::core::GameState;
use crate::rewards::CellVisuals;

/// World plugin - builds the scene once at startup.
///
/// The scene survives pausing, so it is not tied to `OnEnter(InGame)`.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TowerZoneOccupancy>()
            .add_systems(Startup, setup_scene)
            .add_systems(
                Update,
                (wander_visitors, track_zone_occupancy)
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

/// Spawn the demo scene and register cell visuals.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mats = SceneMaterials::new(&mut materials);

    spawn_camera_and_lights(&mut commands);
    spawn_ground(&mut commands, &mut meshes, &mats);
    spawn_tower(&mut commands, &mut meshes, &mats);
    spawn_floor_markers(&mut commands, &mut meshes, &mats);
    spawn_zone_colliders(&mut commands);
    spawn_visitor(&mut commands, &mut meshes, &mats);

    commands.insert_resource(CellVisuals {
        mesh: meshes.add(Cuboid::new(0.6, 0.6, 0.6)),
        materials: mats.cells.clone(),
    });

    info!("Scene ready");
}
