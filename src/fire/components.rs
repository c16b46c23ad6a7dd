//! Fire-related components and events.

use bevy::prelude::*;

use super::thresholds::FireBand;

/// A group of fire effects shown once its band is crossed.
///
/// The `Collapse` group only burns while the tower is falling.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireGroup(pub FireBand);

/// Sent once per band per cycle, lowest band first.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandCrossed {
    pub band: FireBand,
}
