//! Threshold bands and their latches.
//!
//! Five monotonic bands. Each one fires its side effects the first time the
//! progress passes it and then stays latched until the cycle resets.

use bevy::prelude::*;

use crate::config::ThresholdSettings;

/// A progress band with its own fire group and camera shake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FireBand {
    /// Progress above 20%
    Kindled,
    /// Progress above 40%
    Spreading,
    /// Progress above 60%
    Raging,
    /// Progress above 80%
    Blazing,
    /// Progress at 100% - the tower falls
    Collapse,
}

impl FireBand {
    /// All bands, lowest first.
    pub const ALL: [FireBand; 5] = [
        FireBand::Kindled,
        FireBand::Spreading,
        FireBand::Raging,
        FireBand::Blazing,
        FireBand::Collapse,
    ];

    pub fn index(self) -> usize {
        match self {
            FireBand::Kindled => 0,
            FireBand::Spreading => 1,
            FireBand::Raging => 2,
            FireBand::Blazing => 3,
            FireBand::Collapse => 4,
        }
    }

    /// Whether `progress` lies inside this band.
    pub fn reached(self, progress: f32) -> bool {
        match self {
            FireBand::Kindled => progress > 0.2,
            FireBand::Spreading => progress > 0.4,
            FireBand::Raging => progress > 0.6,
            FireBand::Blazing => progress > 0.8,
            FireBand::Collapse => progress >= 1.0,
        }
    }

    /// Camera shake `(intensity, duration)` for the first crossing.
    pub fn shake(self, settings: &ThresholdSettings) -> (f32, f32) {
        let duration = settings.shake_duration;
        match self {
            FireBand::Kindled => (settings.kindled_shake, duration),
            FireBand::Spreading => (settings.spreading_shake, duration),
            FireBand::Raging => (settings.raging_shake, duration),
            FireBand::Blazing => (settings.blazing_shake, duration),
            FireBand::Collapse => (settings.collapse_shake, duration * 2.0),
        }
    }
}

/// Latched "already fired" flag per band.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct BandLatches {
    latched: [bool; 5],
}

impl BandLatches {
    pub fn is_latched(&self, band: FireBand) -> bool {
        self.latched[band.index()]
    }

    /// Latch every band `progress` has reached that was not latched yet.
    ///
    /// Returns the newly latched bands lowest first, so a jump across several
    /// bands plays each band's effect in order within the same frame.
    pub fn cross(&mut self, progress: f32) -> Vec<FireBand> {
        let mut crossed = Vec::new();
        for band in FireBand::ALL {
            if band.reached(progress) && !self.latched[band.index()] {
                self.latched[band.index()] = true;
                crossed.push(band);
            }
        }
        crossed
    }

    pub fn clear(&mut self) {
        self.latched = [false; 5];
    }
}
