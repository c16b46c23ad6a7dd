//! Staged pose timelines for the falling tower.
//!
//! A timeline is an ordered list of (target pose, duration) stages. Each
//! stage eases from the pose it started at toward its target with
//! smoothstep, then snaps exactly onto the target before the next stage
//! begins on the following frame.

use bevy::prelude::*;

use crate::config::StageSettings;
use crate::core::{rotation_from_degrees, rotation_to_degrees, smoothstep, Pose};

/// One resolved keyframe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollapseStage {
    pub target: Pose,
    pub duration: f32,
    /// Camera shake intensity fired as this stage begins
    pub shake: Option<f32>,
}

/// What a timeline produced this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineFrame {
    pub pose: Pose,
    /// A stage with a shake just began
    pub shake: Option<f32>,
    pub finished: bool,
}

/// Running collapse animation attached to a tower part.
#[derive(Component, Debug, Clone)]
pub struct CollapseTimeline {
    stages: Vec<CollapseStage>,
    current: usize,
    elapsed: f32,
    from: Pose,
}

impl CollapseTimeline {
    pub fn new(stages: Vec<CollapseStage>, start: Pose) -> Self {
        Self {
            stages,
            current: 0,
            elapsed: 0.0,
            from: start,
        }
    }

    /// Resolve configured stages against the pose the part had when the
    /// collapse started. Unset axes keep that pose's values.
    pub fn from_settings(stages: &[StageSettings], start: Pose) -> Self {
        let base_euler = rotation_to_degrees(start.rotation);
        let resolved = stages
            .iter()
            .map(|stage| CollapseStage {
                target: Pose::new(
                    stage.translation.resolve(start.translation),
                    rotation_from_degrees(stage.rotation.resolve(base_euler)),
                ),
                duration: stage.duration.max(0.0),
                shake: stage.shake,
            })
            .collect();
        Self::new(resolved, start)
    }

    pub fn stages(&self) -> &[CollapseStage] {
        &self.stages
    }

    /// Index of the stage currently playing.
    pub fn current_stage(&self) -> usize {
        self.current
    }

    pub fn total_duration(&self) -> f32 {
        self.stages.iter().map(|s| s.duration).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.stages.len()
    }

    /// Shake requested by the very first stage, fired at collapse start.
    pub fn opening_shake(&self) -> Option<f32> {
        self.stages.first().and_then(|s| s.shake)
    }

    /// Advance by `dt` seconds. At most one stage boundary per call.
    pub fn advance(&mut self, dt: f32) -> TimelineFrame {
        let Some(stage) = self.stages.get(self.current).copied() else {
            return TimelineFrame {
                pose: self.from,
                shake: None,
                finished: true,
            };
        };

        self.elapsed += dt;
        if self.elapsed < stage.duration {
            let t = smoothstep(self.elapsed / stage.duration);
            return TimelineFrame {
                pose: self.from.interpolate(&stage.target, t),
                shake: None,
                finished: false,
            };
        }

        // Stage done: land exactly on target, next stage starts from there
        self.from = stage.target;
        self.current += 1;
        self.elapsed = 0.0;

        TimelineFrame {
            pose: stage.target,
            shake: self.stages.get(self.current).and_then(|s| s.shake),
            finished: self.is_finished(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollapseSettings;

    fn run_to_end(timeline: &mut CollapseTimeline, dt: f32) -> (Pose, Vec<f32>, f32) {
        let mut shakes = Vec::new();
        let mut elapsed = 0.0;
        loop {
            let frame = timeline.advance(dt);
            elapsed += dt;
            shakes.extend(frame.shake);
            if frame.finished {
                return (frame.pose, shakes, elapsed);
            }
            assert!(elapsed < 100.0, "timeline never finished");
        }
    }

    #[test]
    fn top_timeline_lands_on_last_keyframe() {
        let settings = CollapseSettings::default();
        let mut timeline = CollapseTimeline::from_settings(&settings.top, Pose::default());
        assert_eq!(timeline.total_duration(), 6.0);

        let (pose, shakes, _) = run_to_end(&mut timeline, 1.0 / 60.0);
        assert_eq!(pose.translation, Vec3::new(-150.0, -200.0, 0.0));
        assert!(pose
            .rotation
            .abs_diff_eq(rotation_from_degrees(Vec3::new(-10.0, 0.0, -90.0)), 1e-5));
        assert_eq!(shakes, vec![0.15, 0.2]);
        assert_eq!(timeline.opening_shake(), None);
    }

    #[test]
    fn body_keeps_unset_axes_from_start_pose() {
        let settings = CollapseSettings::default();
        let start = Pose::new(
            Vec3::new(3.0, 1.0, -2.0),
            rotation_from_degrees(Vec3::new(0.0, 30.0, 0.0)),
        );
        let timeline = CollapseTimeline::from_settings(&settings.body, start);
        let stages = timeline.stages();

        assert_eq!(stages[0].target.translation, start.translation);
        assert_eq!(stages[1].target.translation, Vec3::new(3.0, -80.0, -2.0));
        let euler = rotation_to_degrees(stages[1].target.rotation);
        assert!(euler.abs_diff_eq(Vec3::new(0.0, 30.0, 21.0), 1e-3));
    }

    #[test]
    fn midway_pose_is_eased_between_stage_ends() {
        let target = Pose::new(Vec3::new(10.0, 0.0, 0.0), Quat::IDENTITY);
        let mut timeline = CollapseTimeline::new(
            vec![CollapseStage {
                target,
                duration: 2.0,
                shake: None,
            }],
            Pose::default(),
        );

        let quarter = timeline.advance(0.5);
        assert!(!quarter.finished);
        assert!((quarter.pose.translation.x - 10.0 * smoothstep(0.25)).abs() < 1e-4);

        let half = timeline.advance(0.5);
        assert!((half.pose.translation.x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn overshooting_frame_snaps_and_waits_for_next_frame() {
        let mut timeline = CollapseTimeline::new(
            vec![
                CollapseStage {
                    target: Pose::new(Vec3::X, Quat::IDENTITY),
                    duration: 1.0,
                    shake: None,
                },
                CollapseStage {
                    target: Pose::new(Vec3::Y, Quat::IDENTITY),
                    duration: 1.0,
                    shake: Some(0.3),
                },
            ],
            Pose::default(),
        );

        let frame = timeline.advance(1.7);
        assert_eq!(frame.pose.translation, Vec3::X);
        assert_eq!(frame.shake, Some(0.3));
        assert!(!frame.finished);
        assert_eq!(timeline.current_stage(), 1);

        let frame = timeline.advance(0.5);
        assert!(frame.pose.translation.x < 1.0 && frame.pose.translation.y > 0.0);
    }

    #[test]
    fn zero_duration_stage_completes_immediately() {
        let target = Pose::new(Vec3::splat(4.0), Quat::IDENTITY);
        let mut timeline = CollapseTimeline::new(
            vec![CollapseStage {
                target,
                duration: 0.0,
                shake: None,
            }],
            Pose::default(),
        );
        let frame = timeline.advance(0.0);
        assert!(frame.finished);
        assert_eq!(frame.pose, target);
    }

    #[test]
    fn empty_timeline_is_already_finished() {
        let start = Pose::new(Vec3::ONE, Quat::IDENTITY);
        let mut timeline = CollapseTimeline::new(Vec::new(), start);
        assert!(timeline.is_finished());
        assert_eq!(timeline.advance(0.1).pose, start);
    }
}
