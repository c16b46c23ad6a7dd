//! Fire progress accumulator.
//!
//! Every few seconds (random) the fire eats a random slice of the tower.
//! When progress reaches 1.0 the tower is destroyed.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ProgressSettings;

/// Random source for fire timing and reward rolls.
///
/// Kept as a resource so tests can seed it.
#[derive(Resource)]
pub struct FireRng(pub StdRng);

impl Default for FireRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl FireRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Result of a progress change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressUpdate {
    /// Value after clamping
    pub progress: f32,
    /// Actual change applied (after clamping)
    pub delta: f32,
    /// True only on the change that first reached 1.0 this cycle
    pub just_completed: bool,
}

/// Timer-driven 0..1 accumulator with an edge-triggered completion latch.
#[derive(Debug, Clone)]
pub struct ProgressAccumulator {
    progress: f32,
    active: bool,
    next_add_at: f32,
    completion_sent: bool,
}

impl Default for ProgressAccumulator {
    fn default() -> Self {
        Self {
            progress: 0.0,
            active: true,
            next_add_at: 0.0,
            completion_sent: false,
        }
    }
}

impl ProgressAccumulator {
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn progress_percent(&self) -> f32 {
        self.progress * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Elapsed-time stamp of the next scheduled add.
    pub fn next_add_at(&self) -> f32 {
        self.next_add_at
    }

    /// Schedule the next add relative to `now`. Returns the sampled wait.
    pub fn schedule_next(&mut self, now: f32, settings: &ProgressSettings, rng: &mut impl Rng) -> f32 {
        let interval = settings.sample_interval(rng);
        self.next_add_at = now + interval;
        interval
    }

    /// Advance the accumulator to `now`. Adds at most once per call.
    pub fn tick(
        &mut self,
        now: f32,
        settings: &ProgressSettings,
        rng: &mut impl Rng,
    ) -> Option<ProgressUpdate> {
        if !self.active || self.is_complete() || now < self.next_add_at {
            return None;
        }

        let amount = settings.sample_add(rng);
        let update = self.apply(self.progress + amount);
        self.schedule_next(now, settings, rng);
        Some(update)
    }

    /// Jump to a value. Completion still fires only once per cycle.
    pub fn set_progress(&mut self, value: f32) -> ProgressUpdate {
        self.apply(value)
    }

    /// Pause or resume. Resuming waits a fresh interval from `now`.
    pub fn set_active(
        &mut self,
        active: bool,
        now: f32,
        settings: &ProgressSettings,
        rng: &mut impl Rng,
    ) {
        self.active = active;
        if active {
            self.schedule_next(now, settings, rng);
        }
    }

    /// Back to zero with the completion latch cleared and the timer re-armed.
    pub fn reset(&mut self, now: f32, settings: &ProgressSettings, rng: &mut impl Rng) -> ProgressUpdate {
        let previous = self.progress;
        self.progress = 0.0;
        self.completion_sent = false;
        self.schedule_next(now, settings, rng);
        ProgressUpdate {
            progress: 0.0,
            delta: -previous,
            just_completed: false,
        }
    }

    fn apply(&mut self, target: f32) -> ProgressUpdate {
        let previous = self.progress;
        if !target.is_nan() {
            self.progress = target.clamp(0.0, 1.0);
        }

        let just_completed = self.is_complete() && !self.completion_sent;
        if just_completed {
            self.completion_sent = true;
        }

        ProgressUpdate {
            progress: self.progress,
            delta: self.progress - previous,
            just_completed,
        }
    }
}

/// The tower's fire progress, readable by any collaborator.
///
/// Mutate it through `ProgressCommand` events so notifications are sent.
#[derive(Resource, Debug, Clone, Default, Deref, DerefMut)]
pub struct FireProgress(pub ProgressAccumulator);
