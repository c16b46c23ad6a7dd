//! Entity spawning functions for the demo scene.
//!
//! The tower is modelled in its own units and scaled down by [`TOWER_SCALE`].
//! Both tower parts sit at the tower origin with their meshes offset, so
//! collapse targets are expressed in tower units around the base.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::materials::SceneMaterials;
use super::zone::ZoneVisitor;
use crate::collapse::{FloorMarkers, InvisibleWall, TowerPart, TowerZone};
use crate::feedback::ShakeCamera;
use crate::fire::{FireBand, FireGroup};

pub const TOWER_SCALE: f32 = 0.05;
const BODY_RADIUS: f32 = 30.0;
const BODY_HEIGHT: f32 = 160.0;
const ROOF_HEIGHT: f32 = 50.0;

/// Camera, sun and ambient light.
pub fn spawn_camera_and_lights(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(22.0, 9.0, 24.0).looking_at(Vec3::new(5.0, 3.0, 2.0), Vec3::Y),
        ShakeCamera::default(),
        Name::new("Camera"),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.8, 0.8, 0.9),
        brightness: 200.0,
    });
}

/// Flat ground with a floor collider.
pub fn spawn_ground(commands: &mut Commands, meshes: &mut Assets<Mesh>, mats: &SceneMaterials) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(80.0, 80.0))),
        MeshMaterial3d(mats.ground.clone()),
        Transform::IDENTITY,
        Collider::cuboid(40.0, 0.1, 40.0),
        Name::new("Ground"),
    ));
}

/// Tower root with body, top and the five fire groups.
pub fn spawn_tower(commands: &mut Commands, meshes: &mut Assets<Mesh>, mats: &SceneMaterials) {
    let body_mesh = meshes.add(Cylinder::new(BODY_RADIUS, BODY_HEIGHT));
    let roof_mesh = meshes.add(Cone {
        radius: BODY_RADIUS * 1.2,
        height: ROOF_HEIGHT,
    });
    let ember_mesh = meshes.add(Sphere::new(4.0));

    commands
        .spawn((
            Transform::from_scale(Vec3::splat(TOWER_SCALE)),
            Visibility::default(),
            Name::new("Tower"),
        ))
        .with_children(|tower| {
            tower
                .spawn((
                    TowerPart::Body,
                    Transform::IDENTITY,
                    Visibility::default(),
                    Name::new("TowerBody"),
                ))
                .with_children(|body| {
                    body.spawn((
                        Mesh3d(body_mesh),
                        MeshMaterial3d(mats.tower.clone()),
                        Transform::from_xyz(0.0, BODY_HEIGHT / 2.0, 0.0),
                    ));

                    for band in FireBand::ALL {
                        spawn_fire_group(body, band, ember_mesh.clone(), mats.ember.clone());
                    }
                });

            tower
                .spawn((
                    TowerPart::Top,
                    Transform::IDENTITY,
                    Visibility::default(),
                    Name::new("TowerTop"),
                ))
                .with_children(|top| {
                    top.spawn((
                        Mesh3d(roof_mesh),
                        MeshMaterial3d(mats.roof.clone()),
                        Transform::from_xyz(0.0, BODY_HEIGHT + ROOF_HEIGHT / 2.0, 0.0),
                    ));
                });
        });
}

/// Hidden fire group: an ember and a point light, higher for later bands.
fn spawn_fire_group(
    parent: &mut ChildBuilder,
    band: FireBand,
    ember_mesh: Handle<Mesh>,
    ember_material: Handle<StandardMaterial>,
) {
    let height = 25.0 + band.index() as f32 * 30.0;
    // Wrap around the tower so the groups don't stack
    let angle = band.index() as f32 * 1.3;
    let offset = Vec3::new(angle.cos(), 0.0, angle.sin()) * BODY_RADIUS;

    parent
        .spawn((
            FireGroup(band),
            Transform::from_translation(offset + Vec3::Y * height),
            Visibility::Hidden,
            Name::new(format!("Fire_{:?}", band)),
        ))
        .with_children(|group| {
            group.spawn((Mesh3d(ember_mesh), MeshMaterial3d(ember_material)));
            group.spawn(PointLight {
                color: Color::srgb(1.0, 0.5, 0.15),
                intensity: 200_000.0 * (band.index() + 1) as f32,
                range: 15.0,
                shadows_enabled: false,
                ..default()
            });
        });
}

/// Markers on the floor around the tower entrance.
pub fn spawn_floor_markers(commands: &mut Commands, meshes: &mut Assets<Mesh>, mats: &SceneMaterials) {
    let marker_mesh = meshes.add(Cuboid::new(0.8, 0.05, 0.8));

    commands
        .spawn((
            FloorMarkers,
            Transform::IDENTITY,
            Visibility::default(),
            Name::new("FloorMarkers"),
        ))
        .with_children(|markers| {
            for i in 0..4 {
                let angle = i as f32 * std::f32::consts::FRAC_PI_2;
                let radius = BODY_RADIUS * TOWER_SCALE + 1.5;
                markers.spawn((
                    Mesh3d(marker_mesh.clone()),
                    MeshMaterial3d(mats.marker.clone()),
                    Transform::from_xyz(angle.cos() * radius, 0.03, angle.sin() * radius),
                ));
            }
        });
}

/// Zone sensor around the tower and the wall that replaces it on collapse.
pub fn spawn_zone_colliders(commands: &mut Commands) {
    let radius = BODY_RADIUS * TOWER_SCALE + 2.0;
    let half_height = BODY_HEIGHT * TOWER_SCALE / 2.0;

    commands.spawn((
        TowerZone,
        Collider::cylinder(half_height, radius),
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
        Transform::from_xyz(0.0, half_height, 0.0),
        Name::new("TowerZone"),
    ));

    commands.spawn((
        InvisibleWall,
        Collider::cylinder(half_height, radius),
        ColliderDisabled,
        Transform::from_xyz(0.0, half_height, 0.0),
        Name::new("InvisibleWall"),
    ));
}

/// A small ball that wanders in and out of the tower zone.
pub fn spawn_visitor(commands: &mut Commands, meshes: &mut Assets<Mesh>, mats: &SceneMaterials) {
    commands.spawn((
        ZoneVisitor,
        Mesh3d(meshes.add(Sphere::new(0.4))),
        MeshMaterial3d(mats.marker.clone()),
        Transform::from_xyz(8.0, 0.4, 0.0),
        RigidBody::KinematicPositionBased,
        Collider::ball(0.4),
        ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
        ActiveEvents::COLLISION_EVENTS,
        Name::new("Visitor"),
    ));
}
