//! Tower zone occupancy from sensor collisions.

use std::collections::HashSet;

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

use crate::collapse::TowerZone;

/// Marker for entities the tower zone keeps track of.
#[derive(Component, Debug, Default)]
pub struct ZoneVisitor;

/// Visitors currently inside the tower zone.
#[derive(Resource, Debug, Default)]
pub struct TowerZoneOccupancy {
    visitors: HashSet<Entity>,
}

impl TowerZoneOccupancy {
    /// Returns true if the visitor was not already inside.
    pub fn enter(&mut self, visitor: Entity) -> bool {
        self.visitors.insert(visitor)
    }

    /// Returns true if the visitor was inside.
    pub fn leave(&mut self, visitor: Entity) -> bool {
        self.visitors.remove(&visitor)
    }

    pub fn contains(&self, visitor: Entity) -> bool {
        self.visitors.contains(&visitor)
    }

    pub fn count(&self) -> usize {
        self.visitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }
}

/// Turn zone sensor collisions into enter/leave updates.
pub fn track_zone_occupancy(
    mut collisions: EventReader<CollisionEvent>,
    zones: Query<(), With<TowerZone>>,
    visitors: Query<(), With<ZoneVisitor>>,
    mut occupancy: ResMut<TowerZoneOccupancy>,
) {
    for event in collisions.read() {
        let (a, b, started) = match *event {
            CollisionEvent::Started(a, b, _) => (a, b, true),
            CollisionEvent::Stopped(a, b, _) => (a, b, false),
        };

        let visitor = if zones.contains(a) && visitors.contains(b) {
            b
        } else if zones.contains(b) && visitors.contains(a) {
            a
        } else {
            continue;
        };

        if started {
            if occupancy.enter(visitor) {
                debug!("{:?} entered the tower zone", visitor);
            }
        } else if occupancy.leave(visitor) {
            debug!("{:?} left the tower zone", visitor);
        }
    }
}

/// Walk visitors back and forth through the zone.
pub fn wander_visitors(time: Res<Time>, mut visitors: Query<&mut Transform, With<ZoneVisitor>>) {
    let x = (time.elapsed_secs() * 0.4).sin() * 8.0;
    for mut transform in visitors.iter_mut() {
        transform.translation.x = x;
    }
}
