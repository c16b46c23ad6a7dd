//! Full fire cycles on a headless app: burn, collapse, reset.

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::ColliderDisabled;

use tower_fire::collapse::{
    CollapsePlugin, CollapseState, CollapseTimeline, InvisibleWall, RestartTimer, TowerPart,
    TowerZone,
};
use tower_fire::config::{TowerFireConfig, CONFIG_PATH};
use tower_fire::core::{
    rotation_from_degrees, CameraShakeEvent, CorePlugin, GameState, ProgressCommand,
    ProgressComplete, TowerSet,
};
use tower_fire::fire::{BandCrossed, BandLatches, FireBand, FireGroup, FirePlugin, FireProgress, FireRng};
use tower_fire::rewards::{RewardCell, RewardsPlugin};

/// Fixed frame length for every test app.
const FRAME: Duration = Duration::from_millis(50);

#[derive(Resource, Default)]
struct Seen {
    completions: usize,
    bands: Vec<FireBand>,
    shakes: Vec<f32>,
}

fn record_events(
    mut seen: ResMut<Seen>,
    mut complete: EventReader<ProgressComplete>,
    mut crossed: EventReader<BandCrossed>,
    mut shakes: EventReader<CameraShakeEvent>,
) {
    seen.completions += complete.read().count();
    seen.bands.extend(crossed.read().map(|e| e.band));
    seen.shakes.extend(shakes.read().map(|e| e.intensity));
}

struct Scene {
    top: Entity,
    body: Entity,
    zone: Entity,
    wall: Entity,
}

fn test_app() -> (App, Scene) {
    test_app_with(TowerFireConfig::default())
}

fn test_app_with(config: TowerFireConfig) -> (App, Scene) {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .init_resource::<ButtonInput<KeyCode>>()
        .insert_resource(config)
        .insert_resource(FireRng::seeded(42))
        .init_resource::<Seen>()
        .add_plugins((CorePlugin, FirePlugin, CollapsePlugin, RewardsPlugin))
        .add_systems(Update, record_events.after(TowerSet::Feedback));

    let world = app.world_mut();
    let top = world
        .spawn((TowerPart::Top, Transform::from_xyz(0.0, 8.0, 0.0)))
        .id();
    let body = world
        .spawn((TowerPart::Body, Transform::from_xyz(0.0, 0.0, 0.0)))
        .id();
    for band in FireBand::ALL {
        world.spawn((FireGroup(band), Visibility::Hidden));
    }
    let zone = world.spawn(TowerZone).id();
    let wall = world.spawn((InvisibleWall, ColliderDisabled)).id();

    // Startup, then Loading -> InGame
    for _ in 0..3 {
        app.update();
    }
    (app, Scene { top, body, zone, wall })
}

fn send(app: &mut App, command: ProgressCommand) {
    app.world_mut().send_event(command);
    app.update();
}

fn step(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn progress(app: &App) -> f32 {
    app.world().resource::<FireProgress>().progress()
}

fn visible_bands(app: &mut App) -> Vec<FireBand> {
    let mut bands: Vec<FireBand> = app
        .world_mut()
        .query::<(&FireGroup, &Visibility)>()
        .iter(app.world())
        .filter(|(_, v)| **v != Visibility::Hidden)
        .map(|(g, _)| g.0)
        .collect();
    bands.sort_by_key(|b| b.index());
    bands
}

fn cell_count(app: &mut App) -> usize {
    app.world_mut()
        .query::<&RewardCell>()
        .iter(app.world())
        .count()
}

#[test]
fn full_burn_collapses_the_tower() {
    let (mut app, scene) = test_app();
    assert_eq!(cell_count(&mut app), 5);

    send(&mut app, ProgressCommand::Set(1.0));

    let world = app.world();
    assert!(world.resource::<FireProgress>().is_complete());
    assert!(FireBand::ALL
        .iter()
        .all(|b| world.resource::<BandLatches>().is_latched(*b)));
    assert_eq!(world.resource::<Seen>().completions, 1);
    assert_eq!(world.resource::<Seen>().bands, FireBand::ALL.to_vec());

    assert!(world.resource::<CollapseState>().started);
    assert!(world.resource::<RestartTimer>().is_running());
    assert!(world.get::<CollapseTimeline>(scene.top).is_some());
    assert!(world.get::<CollapseTimeline>(scene.body).is_some());
    assert!(world.get::<ColliderDisabled>(scene.zone).is_some());
    assert!(world.get::<ColliderDisabled>(scene.wall).is_none());

    assert_eq!(visible_bands(&mut app), vec![FireBand::Collapse]);
    assert_eq!(cell_count(&mut app), 0);
}

#[test]
fn completion_is_reported_once() {
    let (mut app, _) = test_app();

    send(&mut app, ProgressCommand::Set(1.0));
    send(&mut app, ProgressCommand::Set(1.0));
    app.update();

    let seen = app.world().resource::<Seen>();
    assert_eq!(seen.completions, 1);
    assert_eq!(seen.bands.len(), FireBand::ALL.len());
}

#[test]
fn reset_restores_the_tower() {
    let (mut app, scene) = test_app();
    let rest = *app.world().get::<Transform>(scene.top).unwrap();

    send(&mut app, ProgressCommand::Set(1.0));
    send(&mut app, ProgressCommand::Reset);

    let world = app.world();
    let progress = world.resource::<FireProgress>();
    assert_eq!(progress.progress(), 0.0);
    assert!(!progress.is_complete());
    assert_eq!(*world.resource::<BandLatches>(), BandLatches::default());

    assert!(!world.resource::<CollapseState>().started);
    assert!(!world.resource::<RestartTimer>().is_running());
    assert!(world.get::<CollapseTimeline>(scene.top).is_none());
    assert!(world.get::<CollapseTimeline>(scene.body).is_none());
    assert_eq!(world.get::<Transform>(scene.top).unwrap().translation, rest.translation);
    assert!(world.get::<ColliderDisabled>(scene.zone).is_none());
    assert!(world.get::<ColliderDisabled>(scene.wall).is_some());

    assert!(visible_bands(&mut app).is_empty());
    assert_eq!(cell_count(&mut app), 5);
}

#[test]
fn next_cycle_completes_again_after_reset() {
    let (mut app, _) = test_app();

    send(&mut app, ProgressCommand::Set(1.0));
    send(&mut app, ProgressCommand::Reset);
    send(&mut app, ProgressCommand::Set(1.0));

    assert_eq!(app.world().resource::<Seen>().completions, 2);
    assert!(app.world().resource::<CollapseState>().started);
}

#[test]
fn jump_fires_every_crossed_band_in_order() {
    let (mut app, _) = test_app();

    send(&mut app, ProgressCommand::Set(0.65));

    assert_eq!(
        app.world().resource::<Seen>().bands,
        vec![FireBand::Kindled, FireBand::Spreading, FireBand::Raging]
    );
    assert_eq!(
        visible_bands(&mut app),
        vec![FireBand::Kindled, FireBand::Spreading, FireBand::Raging]
    );
    assert!(!app.world().resource::<CollapseState>().started);
}

#[test]
fn reset_behind_set_latches_nothing() {
    let (mut app, _) = test_app();

    app.world_mut().send_event(ProgressCommand::Set(0.9));
    app.world_mut().send_event(ProgressCommand::Reset);
    app.update();

    assert_eq!(app.world().resource::<FireProgress>().progress(), 0.0);
    assert!(app.world().resource::<Seen>().bands.is_empty());
    assert!(visible_bands(&mut app).is_empty());
}

#[test]
fn pause_and_resume_toggle_accumulation() {
    let (mut app, _) = test_app();
    assert!(app.world().resource::<FireProgress>().is_active());

    send(&mut app, ProgressCommand::Pause);
    assert!(!app.world().resource::<FireProgress>().is_active());

    send(&mut app, ProgressCommand::Resume);
    assert!(app.world().resource::<FireProgress>().is_active());
}

#[test]
fn shipped_tuning_file_is_valid() {
    let config = TowerFireConfig::from_file(CONFIG_PATH).unwrap();
    let defaults = TowerFireConfig::default();

    assert_eq!(config.progress.max_add, defaults.progress.max_add);
    assert_eq!(config.collapse.top.len(), defaults.collapse.top.len());
    assert_eq!(config.collapse.body[1].translation.y, Some(-80.0));
    assert_eq!(config.collapse.restart_wait(), defaults.collapse.restart_wait());
    assert_eq!(config.cells.rarity_chances, defaults.cells.rarity_chances);
}

#[test]
fn reset_and_burn_in_one_frame_ends_burning() {
    let (mut app, _) = test_app();

    app.world_mut().send_event(ProgressCommand::Reset);
    app.world_mut().send_event(ProgressCommand::Set(1.0));
    app.update();

    assert!(app.world().resource::<FireProgress>().is_complete());
    assert_eq!(visible_bands(&mut app), vec![FireBand::Collapse]);
    assert_eq!(cell_count(&mut app), 0);
    assert!(app.world().resource::<CollapseState>().started);
}

#[test]
fn burn_and_reset_in_one_frame_ends_restored() {
    let (mut app, _) = test_app();

    app.world_mut().send_event(ProgressCommand::Set(1.0));
    app.world_mut().send_event(ProgressCommand::Reset);
    app.update();

    assert_eq!(progress(&app), 0.0);
    assert!(visible_bands(&mut app).is_empty());
    assert_eq!(cell_count(&mut app), 5);
    assert!(!app.world().resource::<CollapseState>().started);
}

#[test]
fn fire_grows_on_its_own() {
    let (mut app, _) = test_app();
    assert_eq!(progress(&app), 0.0);

    // First add lands within the 4 s maximum interval
    step(&mut app, 90);

    let value = progress(&app);
    assert!(value > 0.0 && value <= 1.0);
    assert!(value <= 0.05 * 2.0 + 1e-6);
}

#[test]
fn collapse_restarts_after_the_restart_wait() {
    let (mut app, scene) = test_app();
    let rest = *app.world().get::<Transform>(scene.top).unwrap();

    send(&mut app, ProgressCommand::Set(1.0));

    // 10 s in: the tower has fallen but the cycle has not restarted
    step(&mut app, 199);
    assert!(app.world().resource::<FireProgress>().is_complete());
    assert!(app.world().get::<CollapseTimeline>(scene.top).is_none());
    assert_ne!(app.world().get::<Transform>(scene.top).unwrap().translation, rest.translation);
    assert!(app.world().resource::<RestartTimer>().is_running());

    // Past max(6, 4) + 5 = 11 s
    step(&mut app, 30);
    assert_eq!(progress(&app), 0.0);
    assert!(!app.world().resource::<RestartTimer>().is_running());
    assert!(!app.world().resource::<CollapseState>().started);
    let top = app.world().get::<Transform>(scene.top).unwrap();
    assert_eq!(top.translation, rest.translation);
    assert_eq!(top.rotation, rest.rotation);
    assert!(visible_bands(&mut app).is_empty());
    assert_eq!(cell_count(&mut app), 5);
}

#[test]
fn collapse_ends_on_the_last_keyframe() {
    let mut config = TowerFireConfig::default();
    config.collapse.restart_delay = 0.0;
    let (mut app, scene) = test_app_with(config);

    send(&mut app, ProgressCommand::Set(1.0));
    step(&mut app, 140);

    let world = app.world();
    assert!(world.get::<CollapseTimeline>(scene.top).is_none());
    assert!(world.get::<CollapseTimeline>(scene.body).is_none());
    assert!(!world.resource::<RestartTimer>().is_running());
    assert!(world.resource::<FireProgress>().is_complete());

    let top = world.get::<Transform>(scene.top).unwrap();
    assert_eq!(top.translation, Vec3::new(-150.0, -200.0, 0.0));
    assert!(top
        .rotation
        .abs_diff_eq(rotation_from_degrees(Vec3::new(-10.0, 0.0, -90.0)), 1e-5));

    let body = world.get::<Transform>(scene.body).unwrap();
    assert_eq!(body.translation, Vec3::new(0.0, -80.0, 0.0));

    // Collapse band shake, then the two later top stages
    let shakes = &world.resource::<Seen>().shakes;
    assert!(shakes.contains(&0.25));
    assert!(shakes.contains(&0.15));
    assert!(shakes.contains(&0.2));
}

#[test]
fn pausing_freezes_the_fire() {
    let (mut app, _) = test_app();

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Paused);
    step(&mut app, 200);
    assert_eq!(progress(&app), 0.0);
    assert!(app.world().resource::<Time<Virtual>>().elapsed_secs() < 1.0);

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    step(&mut app, 2);
    assert_eq!(progress(&app), 0.0);
}
