//! Rarity rolls and opening times for reward cells.

use rand::Rng;

use crate::config::CellSettings;

/// Reward rarity, most common first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Exclusive,
    Epic,
    Mythic,
    Legendary,
    Secret,
}

impl Rarity {
    pub const ALL: [Rarity; 7] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::Exclusive,
        Rarity::Epic,
        Rarity::Mythic,
        Rarity::Legendary,
        Rarity::Secret,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Exclusive => "Exclusive",
            Rarity::Epic => "Epic",
            Rarity::Mythic => "Mythic",
            Rarity::Legendary => "Legendary",
            Rarity::Secret => "Secret",
        }
    }
}

/// Turn configured percentages into final weights.
///
/// Missing entries count as 0. Negative entries split whatever the positive
/// ones leave below 100 equally; if nothing is left they get 0.
pub fn resolve_chances(raw: &[f32]) -> [f32; 7] {
    let mut chances = [0.0; 7];
    let mut sum_positive = 0.0;
    let mut shared = 0;

    for (i, chance) in chances.iter_mut().enumerate() {
        let value = raw.get(i).copied().unwrap_or(0.0);
        if value > 0.0 {
            *chance = value;
            sum_positive += value;
        } else if value < 0.0 {
            *chance = -1.0;
            shared += 1;
        }
    }

    let remainder = 100.0 - sum_positive;
    let share = if shared > 0 && remainder > 0.0 {
        remainder / shared as f32
    } else {
        0.0
    };
    for chance in chances.iter_mut().filter(|c| **c < 0.0) {
        *chance = share;
    }
    chances
}

/// Weighted pick for a roll in `[0, total weight)`.
pub fn rarity_for_roll(chances: &[f32; 7], mut roll: f32) -> Rarity {
    for (rarity, chance) in Rarity::ALL.iter().zip(chances) {
        let weight = chance.max(0.0);
        if roll < weight {
            return *rarity;
        }
        roll -= weight;
    }
    Rarity::Secret
}

/// Weighted random rarity. All-zero weights always give `Common`.
pub fn pick_rarity(chances: &[f32; 7], rng: &mut impl Rng) -> Rarity {
    let total: f32 = chances.iter().map(|c| c.max(0.0)).sum();
    if total <= 0.0 {
        return Rarity::Common;
    }
    rarity_for_roll(chances, rng.gen_range(0.0..total))
}

/// Seconds to open a cell.
///
/// `(income / midpoint) * base_time[rarity] / (1 + level_multiplier * level)`,
/// clamped to the configured bounds.
pub fn opening_time(settings: &CellSettings, base_income: u64, rarity: Rarity, level: u32) -> f32 {
    let midpoint = (settings
        .open_income_min
        .saturating_add(settings.open_income_max)
        / 2)
        .max(1);
    let multiplier = base_income as f32 / midpoint as f32;

    let base_time = settings
        .base_time_by_rarity
        .get(rarity.index())
        .or(settings.base_time_by_rarity.first())
        .copied()
        .unwrap_or(2.0);

    let mut denominator = 1.0 + settings.level_multiplier * level as f32;
    if denominator <= 0.0 {
        denominator = 1.0;
    }

    (multiplier * base_time / denominator)
        .max(settings.min_open_time)
        .min(settings.max_open_time)
}
