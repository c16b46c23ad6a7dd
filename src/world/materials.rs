//! Materials for the demo scene.

use bevy::prelude::*;

use crate::rewards::Rarity;

/// Handles shared by the scene builders.
pub struct SceneMaterials {
    pub ground: Handle<StandardMaterial>,
    pub tower: Handle<StandardMaterial>,
    pub roof: Handle<StandardMaterial>,
    pub marker: Handle<StandardMaterial>,
    pub ember: Handle<StandardMaterial>,
    /// One per rarity, in `Rarity::ALL` order
    pub cells: Vec<Handle<StandardMaterial>>,
}

impl SceneMaterials {
    pub fn new(materials: &mut Assets<StandardMaterial>) -> Self {
        // Ground - dry grass
        let ground = materials.add(StandardMaterial {
            base_color: Color::srgb(0.30, 0.36, 0.22),
            perceptual_roughness: 0.95,
            ..default()
        });

        // Tower walls - pale stone
        let tower = materials.add(StandardMaterial {
            base_color: Color::srgb(0.62, 0.58, 0.52),
            perceptual_roughness: 0.85,
            ..default()
        });

        // Roof - dark wood shingles
        let roof = materials.add(StandardMaterial {
            base_color: Color::srgb(0.35, 0.20, 0.15),
            perceptual_roughness: 0.7,
            ..default()
        });

        let marker = materials.add(StandardMaterial {
            base_color: Color::srgb(0.9, 0.8, 0.2),
            emissive: LinearRgba::new(0.4, 0.3, 0.0, 1.0),
            ..default()
        });

        let ember = materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.45, 0.1),
            emissive: LinearRgba::new(6.0, 2.0, 0.3, 1.0),
            unlit: true,
            ..default()
        });

        let cells = Rarity::ALL
            .iter()
            .map(|rarity| {
                let color = rarity_color(*rarity);
                materials.add(StandardMaterial {
                    base_color: color,
                    emissive: color.to_linear() * 0.3,
                    perceptual_roughness: 0.4,
                    ..default()
                })
            })
            .collect();

        Self {
            ground,
            tower,
            roof,
            marker,
            ember,
            cells,
        }
    }
}

fn rarity_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Common => Color::srgb(0.7, 0.7, 0.7),
        Rarity::Rare => Color::srgb(0.2, 0.5, 1.0),
        Rarity::Exclusive => Color::srgb(0.2, 0.9, 0.4),
        Rarity::Epic => Color::srgb(0.6, 0.2, 0.9),
        Rarity::Mythic => Color::srgb(1.0, 0.3, 0.3),
        Rarity::Legendary => Color::srgb(1.0, 0.75, 0.1),
        Rarity::Secret => Color::srgb(0.05, 0.05, 0.05),
    }
}
