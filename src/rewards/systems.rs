//! Reward cell systems - spawning, clearing and open time refresh.

use bevy::prelude::*;
use rand::Rng;

use super::components::*;
use super::placement::place_cells;
use super::rarity::{opening_time, pick_rarity, resolve_chances};
use crate::config::{CellSettings, TowerFireConfig};
use crate::core::{ProgressChanged, ProgressComplete, TowerSet};
use crate::fire::{FireProgress, FireRng};

/// Configure reward systems.
pub fn setup_reward_systems(app: &mut App) {
    app.init_resource::<OpeningLevel>()
        .add_systems(PostStartup, spawn_initial_cells)
        .add_systems(
            Update,
            (
                respawn_cells_on_reset,
                clear_cells_on_complete,
                refresh_open_times.run_if(resource_changed::<OpeningLevel>),
            )
                .chain()
                .in_set(TowerSet::Effects),
        );
}

/// Roll and spawn one batch of cells. Returns how many were placed.
fn spawn_cell_batch(
    commands: &mut Commands,
    settings: &CellSettings,
    level: u32,
    rng: &mut FireRng,
    visuals: Option<&CellVisuals>,
) -> usize {
    let chances = resolve_chances(&settings.rarity_chances);
    let positions = place_cells(settings, &mut rng.0);

    for (i, position) in positions.iter().enumerate() {
        let rarity = pick_rarity(&chances, &mut rng.0);
        let base_income = if settings.income_min < settings.income_max {
            rng.0.gen_range(settings.income_min..=settings.income_max)
        } else {
            settings.income_min
        };
        let cell = RewardCell {
            rarity,
            base_income,
            open_time: opening_time(settings, base_income, rarity, level),
        };

        let mut entity = commands.spawn((
            cell,
            Transform::from_translation(*position),
            Visibility::default(),
            Name::new(format!("Cell_{}_{}", i, rarity.name())),
        ));
        if let Some(visuals) = visuals {
            entity.insert(Mesh3d(visuals.mesh.clone()));
            if let Some(material) = visuals.material_for(rarity) {
                entity.insert(MeshMaterial3d(material));
            }
        }
    }

    if positions.len() < settings.count {
        warn!(
            "Only placed {} of {} cells, spawn area too crowded",
            positions.len(),
            settings.count
        );
    }
    positions.len()
}

fn spawn_initial_cells(
    mut commands: Commands,
    config: Res<TowerFireConfig>,
    level: Res<OpeningLevel>,
    mut rng: ResMut<FireRng>,
    visuals: Option<Res<CellVisuals>>,
) {
    let placed = spawn_cell_batch(
        &mut commands,
        &config.cells,
        level.0,
        &mut rng,
        visuals.as_deref(),
    );
    info!("Spawned {} reward cells", placed);
}

/// The tower is gone, and so are its rewards.
///
/// A reset later in the same frame wins over the completion.
fn clear_cells_on_complete(
    mut commands: Commands,
    mut complete: EventReader<ProgressComplete>,
    progress: Res<FireProgress>,
    cells: Query<Entity, With<RewardCell>>,
) {
    if complete.read().count() == 0 || !progress.is_complete() {
        return;
    }

    for entity in cells.iter() {
        commands.entity(entity).despawn_recursive();
    }
    debug!("Cleared reward cells");
}

/// A fresh batch whenever progress drops back to zero.
///
/// Leftover cells from an interrupted cycle are replaced, not stacked. A
/// completion later in the same frame wins over the reset.
fn respawn_cells_on_reset(
    mut commands: Commands,
    mut changed: EventReader<ProgressChanged>,
    progress: Res<FireProgress>,
    config: Res<TowerFireConfig>,
    level: Res<OpeningLevel>,
    mut rng: ResMut<FireRng>,
    visuals: Option<Res<CellVisuals>>,
    cells: Query<Entity, With<RewardCell>>,
) {
    let dropped_to_zero = changed.read().fold(false, |seen, event| seen || event.progress <= 0.0);
    if !dropped_to_zero || progress.is_complete() {
        return;
    }

    for entity in cells.iter() {
        commands.entity(entity).despawn_recursive();
    }
    let placed = spawn_cell_batch(
        &mut commands,
        &config.cells,
        level.0,
        &mut rng,
        visuals.as_deref(),
    );
    debug!("Respawned {} reward cells", placed);
}

fn refresh_open_times(
    config: Res<TowerFireConfig>,
    level: Res<OpeningLevel>,
    mut cells: Query<&mut RewardCell>,
) {
    for mut cell in cells.iter_mut() {
        cell.open_time = opening_time(&config.cells, cell.base_income, cell.rarity, level.0);
    }
}
