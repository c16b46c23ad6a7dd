//! Tower fire tuning loaded from an external RON file.
//!
//! Allows tweaking timings, shake strengths, collapse keyframes and reward
//! rolls without recompilation. Every section falls back to its defaults
//! when omitted from the file.

use bevy::prelude::*;
use rand::Rng;
use serde::Deserialize;
use std::fs;

use super::error::ConfigError;

/// Default location of the tuning file.
pub const CONFIG_PATH: &str = "assets/data/tower_fire.ron";

/// Root of `assets/data/tower_fire.ron`.
#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TowerFireConfig {
    pub progress: ProgressSettings,
    pub thresholds: ThresholdSettings,
    pub collapse: CollapseSettings,
    pub feedback: FeedbackSettings,
    pub progress_bar: ProgressBarSettings,
    pub cells: CellSettings,
}

/// How fast the fire creeps.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProgressSettings {
    /// Seconds between adds, sampled uniformly in [min, max]
    pub min_interval: f32,
    pub max_interval: f32,
    /// Progress added per tick (0-1 scale), sampled uniformly in [min, max]
    pub min_add: f32,
    pub max_add: f32,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            min_interval: 2.0,
            max_interval: 4.0,
            min_add: 0.01,
            max_add: 0.05,
        }
    }
}

impl ProgressSettings {
    pub fn sample_interval(&self, rng: &mut impl Rng) -> f32 {
        sample_range(rng, self.min_interval, self.max_interval)
    }

    pub fn sample_add(&self, rng: &mut impl Rng) -> f32 {
        sample_range(rng, self.min_add, self.max_add)
    }
}

/// Camera shake strength for each band.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThresholdSettings {
    pub kindled_shake: f32,
    pub spreading_shake: f32,
    pub raging_shake: f32,
    pub blazing_shake: f32,
    pub collapse_shake: f32,
    /// Base shake duration; the collapse band shakes twice as long
    pub shake_duration: f32,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            kindled_shake: 0.03,
            spreading_shake: 0.05,
            raging_shake: 0.08,
            blazing_shake: 0.12,
            collapse_shake: 0.25,
            shake_duration: 0.5,
        }
    }
}

/// Per-axis targets. An axis left as `None` keeps the value the part had
/// when the collapse started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AxisTargets {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
}

impl AxisTargets {
    pub const fn all(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    pub fn resolve(&self, base: Vec3) -> Vec3 {
        Vec3::new(
            self.x.unwrap_or(base.x),
            self.y.unwrap_or(base.y),
            self.z.unwrap_or(base.z),
        )
    }
}

/// One keyframe of a collapse timeline.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StageSettings {
    /// Seconds to reach the target
    pub duration: f32,
    /// Local position target
    pub translation: AxisTargets,
    /// Local rotation target, Euler degrees
    pub rotation: AxisTargets,
    /// Camera shake fired when this stage begins
    pub shake: Option<f32>,
}

/// Collapse keyframes for both tower parts plus the restart delay.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollapseSettings {
    pub top: Vec<StageSettings>,
    pub body: Vec<StageSettings>,
    /// Seconds after the longest timeline ends before everything resets.
    /// Zero disables the automatic restart.
    pub restart_delay: f32,
}

impl Default for CollapseSettings {
    fn default() -> Self {
        Self {
            top: vec![
                StageSettings {
                    duration: 1.5,
                    translation: AxisTargets::all(-19.0, -32.0, 0.0),
                    rotation: AxisTargets::all(0.0, 0.0, -10.0),
                    shake: None,
                },
                StageSettings {
                    duration: 2.0,
                    translation: AxisTargets::all(-39.0, -62.0, 0.0),
                    rotation: AxisTargets::all(-3.0, 0.0, -20.0),
                    shake: Some(0.15),
                },
                StageSettings {
                    duration: 2.5,
                    translation: AxisTargets::all(-150.0, -200.0, 0.0),
                    rotation: AxisTargets::all(-10.0, 0.0, -90.0),
                    shake: Some(0.2),
                },
            ],
            body: vec![
                StageSettings {
                    duration: 1.0,
                    translation: AxisTargets::default(),
                    rotation: AxisTargets {
                        z: Some(4.75),
                        ..default()
                    },
                    shake: None,
                },
                StageSettings {
                    duration: 3.0,
                    translation: AxisTargets {
                        y: Some(-80.0),
                        ..default()
                    },
                    rotation: AxisTargets {
                        z: Some(21.0),
                        ..default()
                    },
                    shake: None,
                },
            ],
            restart_delay: 5.0,
        }
    }
}

impl CollapseSettings {
    pub fn top_duration(&self) -> f32 {
        self.top.iter().map(|s| s.duration).sum()
    }

    pub fn body_duration(&self) -> f32 {
        self.body.iter().map(|s| s.duration).sum()
    }

    /// Seconds from collapse start to automatic reset, if enabled.
    pub fn restart_wait(&self) -> Option<f32> {
        (self.restart_delay > 0.0)
            .then(|| self.top_duration().max(self.body_duration()) + self.restart_delay)
    }
}

/// Rumble sound played with every camera shake.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedbackSettings {
    /// Asset path of the clip; `None` keeps shakes silent
    pub shake_sound: Option<String>,
    /// 0-1, clamped on use
    pub shake_volume: f32,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            shake_sound: Some("audio/tower_rumble.ogg".to_string()),
            shake_volume: 1.0,
        }
    }
}

/// HUD fill animation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProgressBarSettings {
    /// Seconds for the bar to catch up; 0 = instant
    pub fill_duration: f32,
}

impl Default for ProgressBarSettings {
    fn default() -> Self {
        Self { fill_duration: 0.3 }
    }
}

/// Reward cell spawning and opening-time tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CellSettings {
    /// Center of the spawn rectangle (world space)
    pub area_center: (f32, f32, f32),
    pub half_extent_x: f32,
    pub half_extent_z: f32,
    pub count: usize,
    pub min_spacing: f32,
    /// Placement tries per cell before it is skipped
    pub max_attempts: usize,
    /// Rolled base income range
    pub income_min: u64,
    pub income_max: u64,
    /// Percent chance per rarity, Common..Secret. 0 = never, negative =
    /// share of whatever is left to reach 100.
    pub rarity_chances: Vec<f32>,
    /// Base opening seconds per rarity, Common..Secret
    pub base_time_by_rarity: Vec<f32>,
    /// Income range whose midpoint gives an opening multiplier of 1
    pub open_income_min: u64,
    pub open_income_max: u64,
    pub level_multiplier: f32,
    pub min_open_time: f32,
    pub max_open_time: f32,
}

impl Default for CellSettings {
    fn default() -> Self {
        Self {
            area_center: (12.0, 0.0, 6.0),
            half_extent_x: 2.5,
            half_extent_z: 2.5,
            count: 5,
            min_spacing: 1.0,
            max_attempts: 50,
            income_min: 100,
            income_max: 1000,
            rarity_chances: vec![70.0, 20.0, 7.0, 2.0, 0.5, 0.4, 0.1],
            base_time_by_rarity: vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
            open_income_min: 0,
            open_income_max: 1000,
            level_multiplier: 0.1,
            min_open_time: 0.5,
            max_open_time: 10.0,
        }
    }
}

impl TowerFireConfig {
    /// Parse and validate RON text. `origin` only labels errors.
    pub fn from_ron_str(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(contents).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a tuning file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        Self::from_ron_str(&contents, path)
    }

    /// Load from [`CONFIG_PATH`], falling back to defaults on any error.
    pub fn load() -> Self {
        match Self::from_file(CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded tower fire config from {}", CONFIG_PATH);
                config
            }
            Err(e @ ConfigError::Read { .. }) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
            Err(e) => {
                error!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Reject inverted ranges and negative timings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.progress;
        check_range("progress.interval", p.min_interval, p.max_interval)?;
        check_range("progress.add", p.min_add, p.max_add)?;
        check_non_negative("progress.min_interval", p.min_interval)?;
        check_non_negative("progress.min_add", p.min_add)?;
        check_non_negative("thresholds.shake_duration", self.thresholds.shake_duration)?;

        for stage in self.collapse.top.iter().chain(self.collapse.body.iter()) {
            check_non_negative("collapse.stage.duration", stage.duration)?;
        }
        check_non_negative("collapse.restart_delay", self.collapse.restart_delay)?;

        let c = &self.cells;
        check_range("cells.income", c.income_min as f32, c.income_max as f32)?;
        check_range("cells.open_time", c.min_open_time, c.max_open_time)?;
        check_non_negative("cells.half_extent_x", c.half_extent_x)?;
        check_non_negative("cells.half_extent_z", c.half_extent_z)?;
        check_non_negative("cells.min_spacing", c.min_spacing)?;
        check_finite("cells.level_multiplier", c.level_multiplier)?;
        Ok(())
    }
}

fn check_range(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    check_finite(field, min)?;
    check_finite(field, max)?;
    if min > max {
        return Err(ConfigError::InvalidRange { field, min, max });
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field, value });
    }
    Ok(())
}

/// Uniform sample in [min, max]; a degenerate range returns `min`.
pub(crate) fn sample_range(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if min < max {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

/// System to load the tuning file at startup.
pub fn load_tower_config(mut commands: Commands) {
    commands.insert_resource(TowerFireConfig::load());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn defaults_are_valid() {
        assert!(TowerFireConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let text = "(progress: (min_add: 0.1, max_add: 0.2), collapse: (restart_delay: 0.0))";
        let config = TowerFireConfig::from_ron_str(text, "inline").unwrap();

        assert_eq!(config.progress.min_add, 0.1);
        assert_eq!(config.progress.max_interval, 4.0);
        assert_eq!(config.collapse.top.len(), 3);
        assert_eq!(config.collapse.restart_wait(), None);
    }

    #[test]
    fn stage_axes_parse_as_options() {
        let text = "(collapse: (body: [(duration: 2.0, translation: (y: Some(-10.0)))]))";
        let config = TowerFireConfig::from_ron_str(text, "inline").unwrap();
        let stage = &config.collapse.body[0];

        assert_eq!(stage.translation.y, Some(-10.0));
        assert_eq!(stage.translation.x, None);
        assert_eq!(stage.shake, None);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let text = "(progress: (min_interval: 5.0, max_interval: 1.0))";
        let err = TowerFireConfig::from_ron_str(text, "inline").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRange { field: "progress.interval", .. }));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut config = TowerFireConfig::default();
        config.progress.max_interval = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "progress.interval", .. })
        ));

        let mut config = TowerFireConfig::default();
        config.progress.min_interval = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::NotFinite { .. })));

        let mut config = TowerFireConfig::default();
        config.collapse.restart_delay = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "collapse.restart_delay", .. })
        ));
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        let err = TowerFireConfig::from_ron_str("(progress: ", "broken.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == "broken.ron"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = TowerFireConfig::from_file("does/not/exist.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn restart_wait_uses_longest_timeline() {
        let collapse = CollapseSettings::default();
        assert_eq!(collapse.top_duration(), 6.0);
        assert_eq!(collapse.body_duration(), 4.0);
        assert_eq!(collapse.restart_wait(), Some(11.0));
    }

    #[test]
    fn samples_stay_inside_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let settings = ProgressSettings::default();
        for _ in 0..200 {
            let add = settings.sample_add(&mut rng);
            let wait = settings.sample_interval(&mut rng);
            assert!((0.01..=0.05).contains(&add));
            assert!((2.0..=4.0).contains(&wait));
        }
        assert_eq!(sample_range(&mut rng, 0.3, 0.3), 0.3);
    }

    #[test]
    fn axis_targets_keep_unset_axes() {
        let targets = AxisTargets {
            y: Some(-80.0),
            ..default()
        };
        assert_eq!(targets.resolve(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, -80.0, 3.0));
    }
}
