//! Core plugin that sets up game states, events, and system ordering.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Paused)
/// - Global events (ProgressChanged, ProgressCommand, CameraShakeEvent, etc.)
/// - The `TowerSet` ordering every gameplay plugin slots into
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<ProgressChanged>()
            .add_event::<ProgressComplete>()
            .add_event::<ProgressCommand>()
            .add_event::<FireReset>()
            .add_event::<CollapseStarted>()
            .add_event::<CameraShakeEvent>()

            // Tower cycle ordering, frozen outside of gameplay
            .configure_sets(
                Update,
                (
                    TowerSet::Input,
                    TowerSet::Progress,
                    TowerSet::Thresholds,
                    TowerSet::Effects,
                    TowerSet::Collapse,
                    TowerSet::Feedback,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )

            // Tuning data is read at Startup, so Loading can end right away
            .add_systems(OnEnter(GameState::Loading), transition_to_game)

            // Virtual time stands still while paused, so fire intervals,
            // timelines and the restart timer resume where they stopped
            .add_systems(OnEnter(GameState::Paused), freeze_virtual_time)
            .add_systems(OnExit(GameState::Paused), resume_virtual_time)

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame).or(in_state(GameState::Paused))),
            );
    }
}

/// Move from Loading to InGame once startup data is in place.
fn transition_to_game(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

fn freeze_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn resume_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}
