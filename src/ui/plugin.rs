//! UI plugin - fire HUD and the pause overlay.

use bevy::prelude::*;

use super::hud;
use crate::core::{GameState, ProgressCommand};
use crate::fire::FireProgress;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);

        app.add_systems(OnEnter(GameState::Paused), spawn_pause_overlay)
            .add_systems(Update, pause_actions.run_if(in_state(GameState::Paused)))
            .add_systems(OnExit(GameState::Paused), despawn_pause_overlay);
    }
}

#[derive(Component)]
struct PauseOverlay;

/// What a pause overlay button does.
#[derive(Component, Clone, Copy)]
enum PauseAction {
    Resume,
    /// Put the tower back and keep playing
    Rebuild,
    Quit,
}

impl PauseAction {
    fn label(self) -> &'static str {
        match self {
            PauseAction::Resume => "Resume",
            PauseAction::Rebuild => "Rebuild Tower",
            PauseAction::Quit => "Quit",
        }
    }
}

const IDLE: Color = Color::srgb(0.18, 0.12, 0.1);
const HOVER: Color = Color::srgb(0.32, 0.18, 0.12);
const PRESSED: Color = Color::srgb(0.55, 0.25, 0.1);

fn spawn_pause_overlay(mut commands: Commands, progress: Res<FireProgress>) {
    let status = if progress.is_active() {
        format!("Fire at {:.0}%", progress.progress_percent())
    } else {
        format!("Fire at {:.0}% (held)", progress.progress_percent())
    };

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.0, 0.0, 0.75)),
            PauseOverlay,
        ))
        .with_children(|overlay| {
            overlay.spawn((
                Text::new("PAUSED"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.75, 0.5)),
            ));
            overlay.spawn((
                Text::new(status),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.7, 0.6)),
                Node {
                    margin: UiRect::bottom(Val::Px(24.0)),
                    ..default()
                },
            ));

            for action in [PauseAction::Resume, PauseAction::Rebuild, PauseAction::Quit] {
                overlay
                    .spawn((
                        Button,
                        Node {
                            width: Val::Px(220.0),
                            height: Val::Px(46.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BackgroundColor(IDLE),
                        action,
                    ))
                    .with_child((
                        Text::new(action.label()),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.9, 0.85, 0.8)),
                    ));
            }

            overlay.spawn((
                Text::new("P hold fire  -  R rebuild  -  C burn down"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.55, 0.5)),
                Node {
                    margin: UiRect::top(Val::Px(24.0)),
                    ..default()
                },
            ));
        });
}

/// Button hover feedback and actions.
///
/// Rebuild leaves the pause first; the reset command is picked up on the
/// next gameplay frame.
fn pause_actions(
    mut buttons: Query<(&Interaction, &PauseAction, &mut BackgroundColor), Changed<Interaction>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut commands: EventWriter<ProgressCommand>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, action, mut background) in buttons.iter_mut() {
        background.0 = match interaction {
            Interaction::Pressed => PRESSED,
            Interaction::Hovered => HOVER,
            Interaction::None => IDLE,
        };
        if *interaction != Interaction::Pressed {
            continue;
        }

        match action {
            PauseAction::Resume => next_state.set(GameState::InGame),
            PauseAction::Rebuild => {
                commands.send(ProgressCommand::Reset);
                next_state.set(GameState::InGame);
            }
            PauseAction::Quit => {
                exit.send(AppExit::Success);
            }
        }
    }
}

fn despawn_pause_overlay(mut commands: Commands, overlays: Query<Entity, With<PauseOverlay>>) {
    for entity in overlays.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
