//! Typography Derivation Engine
//!
//! Picks four font roles from detected fonts and lays a fixed heading and
//! body table over them. Only the families depend on input; sizes come
//! from static tables and the modular scale.

pub mod scale;

pub use scale::{ScaleRatio, TypeScale, TypeScaleStep, generate_type_scale, type_scale};

use serde::Serialize;
use tracing::debug;

use crate::config::TypographyConfig;
use crate::constants::typography::{
    DEFAULT_BASE_SIZE, DEFAULT_BODY, DEFAULT_CODE, DEFAULT_HEADLINES, DEFAULT_SUBHEADINGS,
};
use crate::types::{Font, FontCategory};

/// Which role font a text style uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontRole {
    Headlines,
    Subheadings,
    Body,
    Code,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub name: String,
    pub role: FontRole,
    pub font_family: String,
    pub font_size_px: f64,
    pub font_weight: u16,
    pub line_height: f64,
    pub letter_spacing: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontRoles {
    pub headlines: Font,
    pub subheadings: Font,
    pub body: Font,
    pub code: Font,
}

impl FontRoles {
    pub fn font(&self, role: FontRole) -> &Font {
        match role {
            FontRole::Headlines => &self.headlines,
            FontRole::Subheadings => &self.subheadings,
            FontRole::Body => &self.body,
            FontRole::Code => &self.code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Typography {
    #[serde(flatten)]
    pub fonts: FontRoles,
    pub headings: Vec<TextStyle>,
    pub body_styles: Vec<TextStyle>,
    pub scale: TypeScale,
}

/// (level, role, size px, weight, line height, letter spacing)
const HEADING_TABLE: [(&str, FontRole, f64, u16, f64, &str); 6] = [
    ("h1", FontRole::Headlines, 48.0, 700, 1.1, "-0.02em"),
    ("h2", FontRole::Headlines, 36.0, 700, 1.2, "-0.01em"),
    ("h3", FontRole::Subheadings, 30.0, 600, 1.25, "0"),
    ("h4", FontRole::Subheadings, 24.0, 600, 1.3, "0"),
    ("h5", FontRole::Subheadings, 20.0, 600, 1.4, "0"),
    ("h6", FontRole::Subheadings, 16.0, 600, 1.5, "0.01em"),
];

/// (name, size px, weight, line height, letter spacing)
const BODY_TABLE: [(&str, f64, u16, f64, &str); 4] = [
    ("lead", 20.0, 400, 1.6, "0"),
    ("body", 16.0, 400, 1.6, "0"),
    ("small", 14.0, 400, 1.5, "0"),
    ("caption", 12.0, 400, 1.4, "0.01em"),
];

fn first_of<'a>(
    fonts: &'a [Font],
    categories: &[FontCategory],
    taken: &[&Font],
) -> Option<&'a Font> {
    fonts.iter().find(|f| {
        categories.contains(&f.category)
            && !taken
                .iter()
                .any(|t| t.family.eq_ignore_ascii_case(&f.family))
    })
}

pub fn assign_font_roles(fonts: &[Font]) -> FontRoles {
    let headlines = first_of(fonts, &[FontCategory::Serif, FontCategory::Display], &[])
        .cloned()
        .unwrap_or_else(|| Font::fallback(DEFAULT_HEADLINES, FontCategory::Serif));

    let subheadings = first_of(fonts, &[FontCategory::SansSerif], &[&headlines])
        .cloned()
        .unwrap_or_else(|| Font::fallback(DEFAULT_SUBHEADINGS, FontCategory::SansSerif));

    let body = first_of(fonts, &[FontCategory::SansSerif], &[&headlines, &subheadings])
        .cloned()
        .unwrap_or_else(|| Font::fallback(DEFAULT_BODY, FontCategory::SansSerif));

    let code = first_of(fonts, &[FontCategory::Monospace], &[])
        .cloned()
        .unwrap_or_else(|| Font::fallback(DEFAULT_CODE, FontCategory::Monospace));

    FontRoles {
        headlines,
        subheadings,
        body,
        code,
    }
}

fn heading_styles(roles: &FontRoles) -> Vec<TextStyle> {
    HEADING_TABLE
        .iter()
        .map(|&(level, role, size, weight, line_height, spacing)| TextStyle {
            name: level.to_string(),
            role,
            font_family: roles.font(role).family.clone(),
            font_size_px: size,
            font_weight: weight,
            line_height,
            letter_spacing: spacing.to_string(),
        })
        .collect()
}

fn body_styles(roles: &FontRoles) -> Vec<TextStyle> {
    BODY_TABLE
        .iter()
        .map(|&(name, size, weight, line_height, spacing)| TextStyle {
            name: name.to_string(),
            role: FontRole::Body,
            font_family: roles.body.family.clone(),
            font_size_px: size,
            font_weight: weight,
            line_height,
            letter_spacing: spacing.to_string(),
        })
        .collect()
}

/// Build with the default scale (16px, major third)
pub fn build_typography(fonts: &[Font]) -> Typography {
    let scale = type_scale(DEFAULT_BASE_SIZE, ScaleRatio::MajorThird);
    build_with_scale(fonts, scale)
}

/// Build with the configured scale; an unknown ratio key falls back to the
/// major third
pub fn build_typography_with(fonts: &[Font], config: &TypographyConfig) -> Typography {
    let ratio = ScaleRatio::from_key(&config.ratio).unwrap_or(ScaleRatio::MajorThird);
    let base = if config.base_size > 0.0 {
        config.base_size
    } else {
        DEFAULT_BASE_SIZE
    };
    build_with_scale(fonts, type_scale(base, ratio))
}

fn build_with_scale(fonts: &[Font], scale: TypeScale) -> Typography {
    let roles = assign_font_roles(fonts);
    debug!(
        "Typography: headlines={}, subheadings={}, body={}, code={}",
        roles.headlines.family, roles.subheadings.family, roles.body.family, roles.code.family
    );

    Typography {
        headings: heading_styles(&roles),
        body_styles: body_styles(&roles),
        fonts: roles,
        scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FontSource;

    fn font(family: &str) -> Font {
        Font::new(family, vec!["400".to_string()], Some(FontSource::Stylesheet))
    }

    #[test]
    fn test_defaults_when_nothing_detected() {
        let typography = build_typography(&[]);
        assert_eq!(typography.fonts.headlines.family, "Palatino Linotype");
        assert_eq!(typography.fonts.headlines.category, FontCategory::Serif);
        assert_eq!(typography.fonts.subheadings.family, "Montserrat");
        assert_eq!(typography.fonts.body.family, "PT Sans");
        assert_eq!(typography.fonts.code.family, "IBM Plex Mono");
        assert_eq!(typography.headings.len(), 6);
        assert_eq!(typography.body_styles.len(), 4);
        assert_eq!(typography.scale.steps.len(), 9);
    }

    #[test]
    fn test_roles_from_detected_fonts() {
        let fonts = vec![
            font("Inter"),
            font("Playfair Display"),
            font("Work Sans"),
            font("JetBrains Mono"),
        ];
        let roles = assign_font_roles(&fonts);
        assert_eq!(roles.headlines.family, "Playfair Display");
        assert_eq!(roles.subheadings.family, "Inter");
        assert_eq!(roles.body.family, "Work Sans");
        assert_eq!(roles.code.family, "JetBrains Mono");
    }

    #[test]
    fn test_single_sans_leaves_body_default() {
        let roles = assign_font_roles(&[font("Inter")]);
        assert_eq!(roles.subheadings.family, "Inter");
        assert_eq!(roles.body.family, "PT Sans");
        assert_eq!(roles.headlines.family, "Palatino Linotype");
    }

    #[test]
    fn test_heading_fonts_follow_roles() {
        let typography = build_typography(&[font("Lora"), font("Inter")]);
        let families: Vec<&str> = typography
            .headings
            .iter()
            .map(|h| h.font_family.as_str())
            .collect();
        assert_eq!(families, vec!["Lora", "Lora", "Inter", "Inter", "Inter", "Inter"]);
        assert!(typography.body_styles.iter().all(|s| s.font_family == "PT Sans"));
        assert_eq!(typography.headings[0].font_size_px, 48.0);
    }

    #[test]
    fn test_configured_scale() {
        let config = TypographyConfig {
            base_size: 18.0,
            ratio: "perfect-fifth".to_string(),
        };
        let typography = build_typography_with(&[], &config);
        assert_eq!(typography.scale.ratio, ScaleRatio::PerfectFifth);
        assert_eq!(typography.scale.step("lg").map(|s| s.size_px), Some(27.0));
    }
}
