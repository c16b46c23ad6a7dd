//! Collapse systems - timelines, zone locking, restart and reset.

use bevy::prelude::*;
use bevy_rapier3d::prelude::ColliderDisabled;

use super::components::*;
use super::sequence::CollapseTimeline;
use crate::config::TowerFireConfig;
use crate::core::{CameraShakeEvent, CollapseStarted, FireReset, Pose, ProgressCommand, TowerSet};

/// Configure collapse systems.
pub fn setup_collapse_systems(app: &mut App) {
    app.init_resource::<CollapseState>()
        .init_resource::<RestartTimer>()
        .add_systems(
            Update,
            (
                record_rest_poses,
                restore_on_reset,
                (start_collapse, lock_tower_zone),
                advance_timelines,
                tick_restart_timer,
            )
                .chain()
                .in_set(TowerSet::Collapse),
        );
}

/// Remember where each tower part starts so reset can put it back.
fn record_rest_poses(
    mut commands: Commands,
    parts: Query<(Entity, &Transform), (With<TowerPart>, Without<RestPose>)>,
) {
    for (entity, transform) in parts.iter() {
        commands
            .entity(entity)
            .insert(RestPose(Pose::from_transform(transform)));
    }
}

/// Attach a timeline to both tower parts and arm the restart timer.
fn start_collapse(
    mut commands: Commands,
    mut events: EventReader<CollapseStarted>,
    config: Res<TowerFireConfig>,
    mut state: ResMut<CollapseState>,
    mut restart: ResMut<RestartTimer>,
    parts: Query<(Entity, &TowerPart, &Transform)>,
    mut shakes: EventWriter<CameraShakeEvent>,
) {
    if events.read().count() == 0 || state.started {
        return;
    }
    state.started = true;

    let settings = &config.collapse;
    for (entity, part, transform) in parts.iter() {
        let stages = match part {
            TowerPart::Top => &settings.top,
            TowerPart::Body => &settings.body,
        };
        let timeline = CollapseTimeline::from_settings(stages, Pose::from_transform(transform));

        if let Some(intensity) = timeline.opening_shake() {
            shakes.send(CameraShakeEvent {
                intensity,
                duration: config.thresholds.shake_duration,
            });
        }
        debug!("{:?} starts falling, {:.1}s", part, timeline.total_duration());
        commands.entity(entity).insert(timeline);
    }

    if let Some(wait) = settings.restart_wait() {
        info!("Tower resets in {:.1}s", wait);
        restart.start(wait);
    }
}

/// Hide floor markers, close the tower zone, raise the invisible wall.
fn lock_tower_zone(
    mut commands: Commands,
    mut events: EventReader<CollapseStarted>,
    mut markers: Query<&mut Visibility, With<FloorMarkers>>,
    zones: Query<Entity, With<TowerZone>>,
    walls: Query<Entity, With<InvisibleWall>>,
) {
    if events.read().count() == 0 {
        return;
    }

    for mut visibility in markers.iter_mut() {
        *visibility = Visibility::Hidden;
    }
    for zone in zones.iter() {
        commands.entity(zone).insert(ColliderDisabled);
    }
    for wall in walls.iter() {
        commands.entity(wall).remove::<ColliderDisabled>();
    }
}

/// Step every running timeline and write its pose.
fn advance_timelines(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<TowerFireConfig>,
    mut parts: Query<(Entity, &TowerPart, &mut Transform, &mut CollapseTimeline)>,
    mut shakes: EventWriter<CameraShakeEvent>,
) {
    let dt = time.delta_secs();

    for (entity, part, mut transform, mut timeline) in parts.iter_mut() {
        let frame = timeline.advance(dt);
        frame.pose.apply_to(&mut transform);

        if let Some(intensity) = frame.shake {
            shakes.send(CameraShakeEvent {
                intensity,
                duration: config.thresholds.shake_duration,
            });
        }
        if frame.finished {
            debug!("{:?} finished falling", part);
            commands.entity(entity).remove::<CollapseTimeline>();
        }
    }
}

/// Ask for a reset once the fall and the restart delay are over.
fn tick_restart_timer(
    time: Res<Time>,
    mut restart: ResMut<RestartTimer>,
    mut commands: EventWriter<ProgressCommand>,
) {
    let Some(timer) = restart.0.as_mut() else {
        return;
    };

    if timer.tick(time.delta()).just_finished() {
        info!("Restart delay over, resetting the tower");
        restart.cancel();
        commands.send(ProgressCommand::Reset);
    }
}

/// Cancel the fall and put the tower and its surroundings back.
fn restore_on_reset(
    mut commands: Commands,
    mut events: EventReader<FireReset>,
    mut state: ResMut<CollapseState>,
    mut restart: ResMut<RestartTimer>,
    mut parts: Query<(Entity, &mut Transform, Option<&RestPose>), With<TowerPart>>,
    mut markers: Query<&mut Visibility, With<FloorMarkers>>,
    zones: Query<Entity, With<TowerZone>>,
    walls: Query<Entity, With<InvisibleWall>>,
) {
    if events.read().count() == 0 {
        return;
    }

    state.started = false;
    restart.cancel();

    for (entity, mut transform, rest) in parts.iter_mut() {
        commands.entity(entity).remove::<CollapseTimeline>();
        if let Some(rest) = rest {
            rest.0.apply_to(&mut transform);
        }
    }
    for mut visibility in markers.iter_mut() {
        *visibility = Visibility::Inherited;
    }
    for zone in zones.iter() {
        commands.entity(zone).remove::<ColliderDisabled>();
    }
    for wall in walls.iter() {
        commands.entity(wall).insert(ColliderDisabled);
    }
    debug!("Tower restored to its rest pose");
}
