//! Random cell placement with a minimum spacing.

use bevy::prelude::*;
use rand::Rng;

use crate::config::{sample_range, CellSettings};

/// Pick up to `settings.count` points in the spawn rectangle.
///
/// A cell that finds no free spot within `max_attempts` tries is skipped.
pub fn place_cells(settings: &CellSettings, rng: &mut impl Rng) -> Vec<Vec3> {
    let center = Vec3::from(settings.area_center);
    let mut placed: Vec<Vec3> = Vec::with_capacity(settings.count);

    for _ in 0..settings.count {
        for _ in 0..settings.max_attempts {
            let candidate = center
                + Vec3::new(
                    sample_range(rng, -settings.half_extent_x, settings.half_extent_x),
                    0.0,
                    sample_range(rng, -settings.half_extent_z, settings.half_extent_z),
                );

            if placed
                .iter()
                .all(|p| p.distance(candidate) >= settings.min_spacing)
            {
                placed.push(candidate);
                break;
            }
        }
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn cells_respect_area_and_spacing() {
        let settings = CellSettings::default();
        let mut rng = StdRng::seed_from_u64(3);
        let cells = place_cells(&settings, &mut rng);

        assert_eq!(cells.len(), settings.count);
        let center = Vec3::from(settings.area_center);
        for (i, a) in cells.iter().enumerate() {
            assert!((a.x - center.x).abs() <= settings.half_extent_x);
            assert!((a.z - center.z).abs() <= settings.half_extent_z);
            assert_eq!(a.y, center.y);
            for b in &cells[i + 1..] {
                assert!(a.distance(*b) >= settings.min_spacing);
            }
        }
    }

    #[test]
    fn crowded_area_skips_cells() {
        let settings = CellSettings {
            half_extent_x: 0.0,
            half_extent_z: 0.0,
            count: 3,
            max_attempts: 5,
            ..CellSettings::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(place_cells(&settings, &mut rng).len(), 1);
    }
}
