//! Design Tokens
//!
//! Flattens the palette and typography into dotted token names
//! (`color.primary.500`, `font.headlines.family`, `font.size.xl`) exportable
//! as JSON or CSS custom properties.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::palette::{ColorPalette, ColorScale};
use crate::types::{Gradient, Result};
use crate::typography::Typography;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DesignTokens {
    tokens: BTreeMap<String, String>,
}

fn slug(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

impl DesignTokens {
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.tokens.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.tokens.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn insert_scale(&mut self, role: &str, scale: &ColorScale) {
        for (key, color) in scale.shades() {
            self.insert(format!("color.{}.{}", role, key), color.hex());
        }
        self.insert(format!("color.{}.base", role), scale.base.hex());
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.tokens)?)
    }

    /// `:root` block of custom properties; dots become dashes
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.tokens {
            css.push_str(&format!("  --{}: {};\n", name.replace('.', "-"), value));
        }
        css.push('}');
        css.push('\n');
        css
    }
}

pub fn generate_tokens(
    palette: &ColorPalette,
    typography: &Typography,
    gradients: &[Gradient],
) -> DesignTokens {
    let mut tokens = DesignTokens::default();

    tokens.insert_scale("primary", &palette.primary);
    tokens.insert_scale("secondary", &palette.secondary);
    tokens.insert_scale("accent", &palette.accent);
    for (i, color) in palette.neutral.iter().enumerate() {
        tokens.insert(format!("color.neutral.{}", i), color.hex());
    }
    for color in &palette.utility {
        let name = color.name.as_deref().map(slug).unwrap_or_else(|| slug(color.hex()));
        tokens.insert(format!("color.utility.{}", name), color.hex());
    }
    let semantic = &palette.semantic;
    tokens.insert("color.semantic.success", semantic.success.hex());
    tokens.insert("color.semantic.error", semantic.error.hex());
    tokens.insert("color.semantic.warning", semantic.warning.hex());
    tokens.insert("color.semantic.info", semantic.info.hex());

    let roles = [
        ("headlines", &typography.fonts.headlines),
        ("subheadings", &typography.fonts.subheadings),
        ("body", &typography.fonts.body),
        ("code", &typography.fonts.code),
    ];
    for (role, font) in roles {
        tokens.insert(format!("font.{}.family", role), font.stack());
    }
    for step in &typography.scale.steps {
        tokens.insert(format!("font.size.{}", step.name), format!("{}rem", step.size_rem));
        tokens.insert(format!("font.line-height.{}", step.name), step.line_height.to_string());
    }

    for gradient in gradients {
        tokens.insert(format!("gradient.{}", gradient.id), gradient.css.clone());
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::build_color_palette;
    use crate::typography::build_typography;

    fn tokens() -> DesignTokens {
        let palette = build_color_palette(&["#1e3a8a".to_string()]);
        generate_tokens(&palette, &build_typography(&[]), &[])
    }

    #[test]
    fn test_token_names() {
        let tokens = tokens();
        assert_eq!(tokens.get("color.primary.base"), Some("#1e3a8a"));
        assert!(tokens.get("color.primary.500").is_some());
        assert_eq!(tokens.get("color.utility.light-blue"), Some("#bae6fd"));
        assert_eq!(tokens.get("font.headlines.family"), Some("\"Palatino Linotype\", serif"));
        assert_eq!(tokens.get("font.size.base"), Some("1rem"));
        assert_eq!(tokens.get("font.line-height.5xl"), Some("1.1"));
    }

    #[test]
    fn test_css_export() {
        let css = tokens().to_css();
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --color-primary-base: #1e3a8a;\n"));
        assert!(css.contains("--font-size-xl: "));
        assert!(css.ends_with("}\n"));
    }

    #[test]
    fn test_json_export() {
        let json: serde_json::Value = serde_json::from_str(&tokens().to_json().unwrap()).unwrap();
        assert_eq!(json["color.semantic.error"], "#dc2626");
    }
}
