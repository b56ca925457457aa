//! Shade Scales
//!
//! An 11-step scale keeps the base hue and remaps lightness and saturation
//! through a fixed table. The `base` slot is the unmodified input color.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::constants::palette::NEUTRAL_SATURATION;
use crate::types::Color;

/// (shade key, target lightness %, saturation multiplier), lightest first
pub const SHADE_TABLE: [(u16, f64, f64); 11] = [
    (50, 97.0, 0.30),
    (100, 94.0, 0.40),
    (200, 86.0, 0.55),
    (300, 77.0, 0.70),
    (400, 66.0, 0.85),
    (500, 55.0, 1.00),
    (600, 45.0, 1.00),
    (700, 36.0, 1.05),
    (800, 27.0, 1.10),
    (900, 19.0, 1.15),
    (950, 12.0, 1.20),
];

/// Steps in the neutral scale
pub const NEUTRAL_STEPS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    pub base: Color,
    shades: Vec<(u16, Color)>,
}

impl ColorScale {
    /// Color for a shade key (`50`, `100`, ..., `950`)
    pub fn shade(&self, key: u16) -> Option<&Color> {
        self.shades.iter().find(|(k, _)| *k == key).map(|(_, c)| c)
    }

    /// Shades from lightest to darkest
    pub fn shades(&self) -> impl Iterator<Item = (u16, &Color)> {
        self.shades.iter().map(|(k, c)| (*k, c))
    }
}

impl Serialize for ColorScale {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.shades.len() + 1))?;
        for (key, color) in &self.shades {
            map.serialize_entry(&key.to_string(), color)?;
        }
        map.serialize_entry("base", &self.base)?;
        map.end()
    }
}

pub fn generate_shade_scale(base: &Color) -> ColorScale {
    let hsl = base.hsl();
    let hue = f64::from(hsl.h);
    let saturation = f64::from(hsl.s);

    let shades = SHADE_TABLE
        .iter()
        .map(|&(key, lightness, multiplier)| {
            let s = (saturation * multiplier).clamp(0.0, 100.0);
            (key, Color::from_hsl(hue, s, lightness))
        })
        .collect();

    ColorScale {
        base: base.clone(),
        shades,
    }
}

/// Near-gray scale tinted with the primary hue; index 0 is darkest.
/// Lightness runs from 2.5% to 97.5% in even steps.
pub fn generate_neutral_scale(primary: &Color) -> Vec<Color> {
    let hue = f64::from(primary.hue());
    let step = 95.0 / (NEUTRAL_STEPS - 1) as f64;

    (0..NEUTRAL_STEPS)
        .map(|i| {
            let lightness = 2.5 + step * i as f64;
            Color::from_hsl(hue, NEUTRAL_SATURATION, lightness)
        })
        .collect()
}
