//! Color Derivation Engine
//!
//! `build_color_palette` is a pure function of its input list:
//!
//! 1. Drop unparseable colors and those too dark or too light for a role
//! 2. Cluster by ΔE, keeping the most saturated member per cluster
//! 3. Order representatives (chromatic first, then by prominence)
//! 4. Assign primary, secondary and accent with distance thresholds,
//!    falling back to fixed defaults
//! 5. Derive shade scales, the neutral scale and fixed utility/semantic
//!    colors

pub mod cluster;
pub mod contrast;
pub mod harmony;
pub mod scale;

pub use cluster::{cluster_colors, order_representatives, role_candidates};
pub use contrast::{ContrastResult, get_contrast_ratio, readable_text_color};
pub use harmony::{ColorHarmony, HarmonyKind, generate_harmonies};
pub use scale::{ColorScale, SHADE_TABLE, generate_neutral_scale, generate_shade_scale};

use serde::Serialize;
use tracing::debug;

use crate::config::PaletteConfig;
use crate::constants::palette::{
    DEFAULT_ACCENT, DEFAULT_PRIMARY, DEFAULT_SECONDARY, ERROR, INFO, SUCCESS, UTILITY, WARNING,
};
use crate::types::Color;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticColors {
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
}

impl Default for SemanticColors {
    fn default() -> Self {
        Self {
            success: fixed(SUCCESS, "Success"),
            error: fixed(ERROR, "Error"),
            warning: fixed(WARNING, "Warning"),
            info: fixed(INFO, "Info"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorPalette {
    pub primary: ColorScale,
    pub secondary: ColorScale,
    pub accent: ColorScale,
    /// Darkest first
    pub neutral: Vec<Color>,
    pub utility: Vec<Color>,
    pub semantic: SemanticColors,
}

/// Constant colors are compile-time literals; black stands in if one ever
/// fails to parse
fn fixed(hex: &str, name: &str) -> Color {
    Color::from_hex(hex)
        .unwrap_or_else(|_| Color::from_rgb(0, 0, 0))
        .with_name(name)
}

pub fn utility_colors() -> Vec<Color> {
    UTILITY.iter().map(|(hex, name)| fixed(hex, name)).collect()
}

/// Primary, secondary and accent role colors
#[derive(Debug, Clone, PartialEq)]
pub struct RoleColors {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
}

pub fn assign_roles(ordered: &[Color], config: &PaletteConfig) -> RoleColors {
    let primary = ordered
        .first()
        .cloned()
        .unwrap_or_else(|| fixed(DEFAULT_PRIMARY, "Primary"));

    let secondary = ordered
        .iter()
        .skip(1)
        .find(|c| c.delta_e(&primary) > config.secondary_distance)
        .cloned()
        .unwrap_or_else(|| fixed(DEFAULT_SECONDARY, "Secondary"));

    let accent = ordered
        .iter()
        .skip(1)
        .filter(|c| c.hex() != secondary.hex())
        .find(|c| {
            c.delta_e(&primary) > config.accent_primary_distance
                && c.delta_e(&secondary) > config.accent_secondary_distance
        })
        .cloned()
        .unwrap_or_else(|| fixed(DEFAULT_ACCENT, "Accent"));

    RoleColors {
        primary: primary.with_usage("primary"),
        secondary: secondary.with_usage("secondary"),
        accent: accent.with_usage("accent"),
    }
}

/// Build with the default thresholds
pub fn build_color_palette(hex_colors: &[String]) -> ColorPalette {
    build_color_palette_with(hex_colors, &PaletteConfig::default())
}

pub fn build_color_palette_with(hex_colors: &[String], config: &PaletteConfig) -> ColorPalette {
    let candidates = role_candidates(hex_colors);
    let representatives = cluster_colors(&candidates, config.cluster_threshold);
    let ordered = order_representatives(representatives);
    debug!(
        "Palette: {} inputs, {} candidates, {} clusters",
        hex_colors.len(),
        candidates.len(),
        ordered.len()
    );

    let roles = assign_roles(&ordered, config);

    ColorPalette {
        neutral: generate_neutral_scale(&roles.primary),
        primary: generate_shade_scale(&roles.primary),
        secondary: generate_shade_scale(&roles.secondary),
        accent: generate_shade_scale(&roles.accent),
        utility: utility_colors(),
        semantic: SemanticColors::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hexes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_navy_teal_orange_roles() {
        let palette = build_color_palette(&hexes(&["#1e3a8a", "#028393", "#f65625"]));
        assert_eq!(palette.primary.base.hex(), "#1e3a8a");
        assert_eq!(palette.secondary.base.hex(), "#028393");
        assert_eq!(palette.accent.base.hex(), "#f65625");
        assert_eq!(palette.primary.base.usage.as_deref(), Some("primary"));
    }

    #[test]
    fn test_empty_input_uses_defaults() {
        let palette = build_color_palette(&[]);
        assert_eq!(palette.primary.base.hex(), DEFAULT_PRIMARY);
        assert_eq!(palette.secondary.base.hex(), DEFAULT_SECONDARY);
        assert_eq!(palette.accent.base.hex(), DEFAULT_ACCENT);
        assert_eq!(palette.primary.shades().count(), 11);
        assert_eq!(palette.neutral.len(), 10);
        assert_eq!(palette.utility.len(), 3);
        assert_eq!(palette.semantic.success.hex(), SUCCESS);
    }

    #[test]
    fn test_only_extremes_fall_back() {
        let palette = build_color_palette(&hexes(&["#0a0a0a", "#f8f8f8"]));
        assert_eq!(palette.primary.base.hex(), DEFAULT_PRIMARY);
    }

    #[test]
    fn test_close_secondary_rejected() {
        // Second blue is a near-duplicate of the first; teal default fills in
        let palette = build_color_palette(&hexes(&["#1e3a8a", "#2a4580"]));
        assert_eq!(palette.primary.base.hex(), "#1e3a8a");
        assert_eq!(palette.secondary.base.hex(), DEFAULT_SECONDARY);
    }

    #[test]
    fn test_idempotent() {
        let input = hexes(&["#f65625", "#1e3a8a", "#64748b", "#028393", "#7c3aed"]);
        let a = serde_json::to_string(&build_color_palette(&input)).unwrap();
        let b = serde_json::to_string(&build_color_palette(&input)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_neutral_follows_primary_hue() {
        let palette = build_color_palette(&hexes(&["#f65625"]));
        let mid = &palette.neutral[5];
        assert!(mid.saturation() <= 10);
        assert!((i32::from(mid.hue()) - 14).abs() <= 20);
    }
}
