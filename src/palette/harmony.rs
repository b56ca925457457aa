//! Color Harmonies
//!
//! Fixed hue-wheel offsets from a base color. Saturation and lightness stay
//! those of the base.

use serde::Serialize;

use crate::types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyKind {
    Complementary,
    Analogous,
    Triadic,
    SplitComplementary,
    Square,
}

impl HarmonyKind {
    pub const ALL: [HarmonyKind; 5] = [
        Self::Complementary,
        Self::Analogous,
        Self::Triadic,
        Self::SplitComplementary,
        Self::Square,
    ];

    /// Hue offsets in degrees; `0` is the base itself
    pub fn offsets(&self) -> &'static [f64] {
        match self {
            Self::Complementary => &[0.0, 180.0],
            Self::Analogous => &[-30.0, 0.0, 30.0],
            Self::Triadic => &[0.0, 120.0, 240.0],
            Self::SplitComplementary => &[0.0, 150.0, 210.0],
            Self::Square => &[0.0, 90.0, 180.0, 270.0],
        }
    }
}

impl std::fmt::Display for HarmonyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complementary => write!(f, "complementary"),
            Self::Analogous => write!(f, "analogous"),
            Self::Triadic => write!(f, "triadic"),
            Self::SplitComplementary => write!(f, "split-complementary"),
            Self::Square => write!(f, "square"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorHarmony {
    pub kind: HarmonyKind,
    pub colors: Vec<Color>,
}

pub fn generate_harmonies(base: &Color) -> Vec<ColorHarmony> {
    HarmonyKind::ALL
        .iter()
        .map(|&kind| ColorHarmony {
            kind,
            colors: kind
                .offsets()
                .iter()
                .map(|&offset| {
                    if offset == 0.0 {
                        base.clone()
                    } else {
                        base.rotate_hue(offset)
                    }
                })
                .collect(),
        })
        .collect()
}
