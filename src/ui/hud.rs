//! In-game HUD - the fire progress bar.

use bevy::prelude::*;

use crate::config::TowerFireConfig;
use crate::core::{move_towards, GameState};
use crate::fire::FireProgress;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for the fire bar fill.
#[derive(Component)]
pub struct FireProgressBar;

/// Marker for the percentage label.
#[derive(Component)]
pub struct FireProgressText;

/// Value the bar currently shows, trailing the real progress.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Deref, DerefMut)]
pub struct DisplayedProgress(pub f32);

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.init_resource::<DisplayedProgress>()
        .add_systems(Startup, spawn_hud)
        .add_systems(
            Update,
            (follow_fire_progress, update_fire_bar)
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
}

/// Step the displayed value toward the target.
///
/// Closes `clamp01(dt / fill_duration)` of the gap per call; a non-positive
/// fill duration jumps straight to the target.
pub fn approach_progress(displayed: f32, target: f32, dt: f32, fill_duration: f32) -> f32 {
    if fill_duration <= 0.0 {
        return target;
    }
    let step = (target - displayed).abs() * (dt / fill_duration).clamp(0.0, 1.0);
    move_towards(displayed, target, step)
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // HUD root container (top-left corner)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Start,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|row| {
                    // Label
                    row.spawn((
                        Text::new("Fire"),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.9, 0.8, 0.7)),
                        Node {
                            width: Val::Px(50.0),
                            ..default()
                        },
                    ));

                    // Bar background
                    row.spawn((
                        Node {
                            width: Val::Px(240.0),
                            height: Val::Px(16.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                    ))
                    .with_children(|bg| {
                        // Bar fill
                        bg.spawn((
                            Node {
                                width: Val::Percent(0.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(Color::srgb(0.95, 0.4, 0.1)),
                            FireProgressBar,
                        ));
                    });

                    row.spawn((
                        Text::new("0%"),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.9, 0.8, 0.7)),
                        Node {
                            margin: UiRect::left(Val::Px(10.0)),
                            ..default()
                        },
                        FireProgressText,
                    ));
                });
        });
}

fn follow_fire_progress(
    time: Res<Time>,
    config: Res<TowerFireConfig>,
    progress: Res<FireProgress>,
    mut displayed: ResMut<DisplayedProgress>,
) {
    let next = approach_progress(
        displayed.0,
        progress.progress(),
        time.delta_secs(),
        config.progress_bar.fill_duration,
    );
    if next != displayed.0 {
        displayed.0 = next;
    }
}

/// Resize the fill and rewrite the label.
fn update_fire_bar(
    displayed: Res<DisplayedProgress>,
    mut bar_query: Query<&mut Node, With<FireProgressBar>>,
    mut text_query: Query<&mut Text, With<FireProgressText>>,
) {
    if !displayed.is_changed() {
        return;
    }

    if let Ok(mut bar) = bar_query.get_single_mut() {
        bar.width = Val::Percent(displayed.0 * 100.0);
    }
    if let Ok(mut text) = text_query.get_single_mut() {
        text.0 = format!("{:.0}%", displayed.0 * 100.0);
    }
}
