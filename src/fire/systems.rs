//! Fire systems - accumulation, commands, band dispatch and fire groups.

use bevy::prelude::*;

use super::components::*;
use super::progress::{FireProgress, FireRng, ProgressUpdate};
use super::thresholds::{BandLatches, FireBand};
use crate::config::{load_tower_config, TowerFireConfig};
use crate::core::{
    CameraShakeEvent, CollapseStarted, FireReset, ProgressChanged, ProgressCommand,
    ProgressComplete, TowerSet,
};

/// Configure fire systems.
pub fn setup_fire_systems(app: &mut App) {
    app
        // Resources
        .init_resource::<FireProgress>()
        .init_resource::<BandLatches>()
        .init_resource::<FireRng>()

        // Events
        .add_event::<BandCrossed>()

        // Tuning data first, then the first interval
        .add_systems(
            Startup,
            (
                load_tower_config.run_if(not(resource_exists::<TowerFireConfig>)),
                arm_accumulator,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (keyboard_commands, apply_progress_commands)
                .chain()
                .in_set(TowerSet::Input),
        )
        .add_systems(Update, accumulate_progress.in_set(TowerSet::Progress))
        .add_systems(Update, dispatch_thresholds.in_set(TowerSet::Thresholds))
        .add_systems(
            Update,
            // Bands re-latch from the post-reset value, so put the fire out first
            (extinguish_on_reset, apply_band_effects)
                .chain()
                .in_set(TowerSet::Effects),
        );
}

/// Schedule the very first add.
fn arm_accumulator(
    time: Res<Time>,
    config: Res<TowerFireConfig>,
    mut rng: ResMut<FireRng>,
    mut progress: ResMut<FireProgress>,
) {
    let wait = progress.schedule_next(time.elapsed_secs(), &config.progress, &mut rng.0);
    debug!("Fire armed, first add in {:.1}s", wait);
}

/// Keyboard shortcuts: P pauses/resumes, R resets, C forces completion.
fn keyboard_commands(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    progress: Res<FireProgress>,
    mut commands: EventWriter<ProgressCommand>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    if keyboard.just_pressed(KeyCode::KeyP) {
        commands.send(if progress.is_active() {
            ProgressCommand::Pause
        } else {
            ProgressCommand::Resume
        });
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        commands.send(ProgressCommand::Reset);
    }
    if keyboard.just_pressed(KeyCode::KeyC) {
        commands.send(ProgressCommand::Set(1.0));
    }
}

/// Apply collaborator commands in the order they were sent.
fn apply_progress_commands(
    time: Res<Time>,
    config: Res<TowerFireConfig>,
    mut rng: ResMut<FireRng>,
    mut progress: ResMut<FireProgress>,
    mut latches: ResMut<BandLatches>,
    mut commands: EventReader<ProgressCommand>,
    mut changed: EventWriter<ProgressChanged>,
    mut complete: EventWriter<ProgressComplete>,
    mut reset: EventWriter<FireReset>,
) {
    let now = time.elapsed_secs();

    for command in commands.read() {
        match *command {
            ProgressCommand::Set(value) => {
                let update = progress.set_progress(value);
                debug!("Fire progress set to {:.1}%", update.progress * 100.0);
                notify(update, &mut changed, &mut complete);
            }
            ProgressCommand::Pause => {
                progress.set_active(false, now, &config.progress, &mut rng.0);
                debug!("Fire accumulation paused");
            }
            ProgressCommand::Resume => {
                progress.set_active(true, now, &config.progress, &mut rng.0);
                debug!("Fire accumulation resumed");
            }
            ProgressCommand::Reset => {
                let update = progress.reset(now, &config.progress, &mut rng.0);
                latches.clear();
                info!("Fire progress reset");
                reset.send(FireReset);
                notify(update, &mut changed, &mut complete);
            }
        }
    }
}

/// Add random progress when the timer elapses.
fn accumulate_progress(
    time: Res<Time>,
    config: Res<TowerFireConfig>,
    mut rng: ResMut<FireRng>,
    mut progress: ResMut<FireProgress>,
    mut changed: EventWriter<ProgressChanged>,
    mut complete: EventWriter<ProgressComplete>,
) {
    let Some(update) = progress.tick(time.elapsed_secs(), &config.progress, &mut rng.0) else {
        return;
    };

    debug!(
        "Fire progress +{:.1}%, now {:.1}%",
        update.delta * 100.0,
        update.progress * 100.0
    );
    notify(update, &mut changed, &mut complete);
}

fn notify(
    update: ProgressUpdate,
    changed: &mut EventWriter<ProgressChanged>,
    complete: &mut EventWriter<ProgressComplete>,
) {
    changed.send(ProgressChanged {
        progress: update.progress,
    });
    if update.just_completed {
        info!("Fire progress reached 100%, the tower is destroyed");
        complete.send(ProgressComplete);
    }
}

/// Latch newly reached bands against the current progress.
///
/// Reading the resource instead of each event means a reset queued behind a
/// set in the same frame never latches anything.
fn dispatch_thresholds(
    mut changed: EventReader<ProgressChanged>,
    progress: Res<FireProgress>,
    mut latches: ResMut<BandLatches>,
    mut crossed: EventWriter<BandCrossed>,
) {
    if changed.read().count() == 0 {
        return;
    }

    for band in latches.cross(progress.progress()) {
        debug!("Fire band {:?} crossed", band);
        crossed.send(BandCrossed { band });
    }
}

/// Shake, light the band's fire group, and start the collapse at 100%.
fn apply_band_effects(
    config: Res<TowerFireConfig>,
    mut crossed: EventReader<BandCrossed>,
    mut groups: Query<(&FireGroup, &mut Visibility)>,
    mut shakes: EventWriter<CameraShakeEvent>,
    mut collapse: EventWriter<CollapseStarted>,
) {
    for event in crossed.read() {
        let (intensity, duration) = event.band.shake(&config.thresholds);
        shakes.send(CameraShakeEvent {
            intensity,
            duration,
        });

        if event.band == FireBand::Collapse {
            // Only the collapse fire burns while the tower falls
            for (group, mut visibility) in groups.iter_mut() {
                *visibility = if group.0 == FireBand::Collapse {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
            }
            collapse.send(CollapseStarted);
            info!("Tower collapse triggered");
        } else {
            for (group, mut visibility) in groups.iter_mut() {
                if group.0 == event.band {
                    *visibility = Visibility::Inherited;
                }
            }
        }
    }
}

/// Hide every fire group when the cycle restarts.
fn extinguish_on_reset(
    mut reset: EventReader<FireReset>,
    mut groups: Query<&mut Visibility, With<FireGroup>>,
) {
    if reset.read().count() == 0 {
        return;
    }

    for mut visibility in groups.iter_mut() {
        *visibility = Visibility::Hidden;
    }
}
