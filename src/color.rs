//! Colors and palette presets for waves.
//!
//! Colors are linear RGB stored in a [`Vec3`] with components in `0.0..=1.0`.
//! Opacity is carried separately on each particle, so a palette only
//! describes hue.
//!
//! ```ignore
//! let config = WaveConfig::default().colors(Palette::Ocean.colors());
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
pub const GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);
pub const PURPLE: Vec3 = Vec3::new(0.5, 0.0, 0.5);
pub const WHITE: Vec3 = Vec3::ONE;

/// Named color sets to sample wave colors from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Palette {
    /// Red, green and blue (default).
    #[default]
    Primary,

    /// Cool blues and teals.
    Ocean,

    /// Warm oranges and pinks.
    Sunset,

    /// Vibrant pink, purple, blue and cyan.
    Neon,

    /// Reds through yellow.
    Fire,
}

impl Palette {
    /// The colors of this palette, in display order.
    pub fn colors(&self) -> Vec<Vec3> {
        match self {
            Palette::Primary => vec![RED, GREEN, BLUE],
            Palette::Ocean => vec![
                Vec3::new(0.0, 0.2, 0.4),   // Dark blue
                Vec3::new(0.0, 0.4, 0.6),   // Blue
                Vec3::new(0.2, 0.6, 0.8),   // Light blue
                Vec3::new(0.6, 0.9, 1.0),   // Cyan
            ],
            Palette::Sunset => vec![
                Vec3::new(0.5, 0.0, 0.5),   // Purple
                Vec3::new(1.0, 0.2, 0.4),   // Pink
                Vec3::new(1.0, 0.5, 0.2),   // Orange
                Vec3::new(1.0, 0.9, 0.4),   // Yellow
            ],
            Palette::Neon => vec![
                Vec3::new(1.0, 0.0, 0.5),   // Pink
                Vec3::new(0.5, 0.0, 1.0),   // Purple
                Vec3::new(0.0, 0.5, 1.0),   // Blue
                Vec3::new(0.0, 1.0, 1.0),   // Cyan
            ],
            Palette::Fire => vec![
                Vec3::new(0.5, 0.0, 0.0),   // Red
                Vec3::new(1.0, 0.3, 0.0),   // Orange
                Vec3::new(1.0, 0.7, 0.0),   // Yellow-orange
                Vec3::new(1.0, 1.0, 0.8),   // White-yellow
            ],
        }
    }

    /// Display name of the palette.
    pub fn name(&self) -> &'static str {
        match self {
            Palette::Primary => "Primary",
            Palette::Ocean => "Ocean",
            Palette::Sunset => "Sunset",
            Palette::Neon => "Neon",
            Palette::Fire => "Fire",
        }
    }

    /// All palette presets, in declaration order.
    pub fn variants() -> &'static [Palette] {
        &[
            Palette::Primary,
            Palette::Ocean,
            Palette::Sunset,
            Palette::Neon,
            Palette::Fire,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_is_rgb() {
        assert_eq!(Palette::default().colors(), vec![RED, GREEN, BLUE]);
    }

    #[test]
    fn test_palette_colors_in_unit_range() {
        for palette in Palette::variants() {
            let colors = palette.colors();
            assert!(!colors.is_empty(), "{} is empty", palette.name());
            for c in colors {
                assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
            }
        }
    }
}
