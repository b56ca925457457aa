//! Raw Signal Derivation
//!
//! Turns accumulated `RawCssData` into the typed lists of an
//! `ExtractionResult`: validated and deduplicated colors, classified
//! gradients and fonts.

use std::collections::HashSet;

use super::css::RawCssData;
use crate::constants::collector::{COLOR_DENYLIST, MAX_COLORS, MAX_FONTS};
use crate::types::{Color, ExtractedGradient, Font, extract_color_tokens, is_system_font};

pub fn is_denied_color(hex: &str) -> bool {
    let lower = hex.to_lowercase();
    COLOR_DENYLIST.contains(&lower.as_str())
}

/// Canonical hex colors: every harvested token, then color tokens inside
/// custom property values. Unparseable tokens and denylisted neutrals are
/// dropped.
pub fn derive_colors(raw: &RawCssData) -> Vec<String> {
    let variable_tokens = raw
        .css_variables()
        .iter()
        .flat_map(|(_, value)| extract_color_tokens(value));

    let tokens = raw.colors().iter().cloned().chain(variable_tokens);
    dedupe_hex(tokens, MAX_COLORS)
}

/// Parse, canonicalize, filter and dedupe color tokens, keeping first-seen
/// order
pub fn dedupe_hex(tokens: impl IntoIterator<Item = String>, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut colors = Vec::new();

    for token in tokens {
        if colors.len() >= cap {
            break;
        }
        let Some(color) = Color::parse(&token) else {
            continue;
        };
        let hex = color.hex().to_string();
        if is_denied_color(&hex) || is_denied_color(token.trim()) {
            continue;
        }
        if seen.insert(hex.clone()) {
            colors.push(hex);
        }
    }

    colors
}

/// Gradients keep their harvested order; duplicates were removed on insert
pub fn derive_gradients(raw: &RawCssData) -> Vec<ExtractedGradient> {
    raw.gradients()
        .iter()
        .map(|css| ExtractedGradient::from_css(css.as_str()))
        .collect()
}

pub fn derive_fonts(raw: &RawCssData) -> Vec<Font> {
    raw.fonts()
        .iter()
        .filter(|entry| !is_system_font(&entry.family))
        .take(MAX_FONTS)
        .map(|entry| {
            let mut variants = entry.weights.clone();
            variants.sort_by_key(|w| w.parse::<u32>().unwrap_or(400));
            if variants.is_empty() {
                variants.push("400".to_string());
            }
            Font::new(entry.family.clone(), variants, entry.source)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FontCategory, FontSource, GradientType};

    #[test]
    fn test_denylist_filtering() {
        let mut raw = RawCssData::new();
        for token in ["#ffffff", "#333", "#1E3A8A", "rgb(51, 51, 51)", "#028393", "#1e3a8a"] {
            raw.add_color(token);
        }
        assert_eq!(derive_colors(&raw), vec!["#1e3a8a", "#028393"]);
    }

    #[test]
    fn test_variable_values_scanned() {
        let mut raw = RawCssData::new();
        raw.add_color("#f65625");
        raw.set_variable("--shadow", "0 1px 2px rgba(2, 131, 147, 1)");
        raw.set_variable("--gap", "8px");
        assert_eq!(derive_colors(&raw), vec!["#f65625", "#028393"]);
    }

    #[test]
    fn test_invalid_tokens_dropped_and_capped() {
        let tokens = (0..30).map(|i| format!("#{:02x}3a8a", i + 16)).chain(["#zzzzzz".to_string()]);
        let colors = dedupe_hex(tokens, MAX_COLORS);
        assert_eq!(colors.len(), MAX_COLORS);
    }

    #[test]
    fn test_gradients_classified() {
        let mut raw = RawCssData::new();
        raw.add_gradient("linear-gradient(to right, #1e3a8a, #028393)");
        raw.add_gradient("radial-gradient(circle, #fff, #000)");
        let gradients = derive_gradients(&raw);
        assert_eq!(gradients[0].angle, Some(90.0));
        assert_eq!(gradients[1].gradient_type, GradientType::Radial);
        assert_eq!(gradients[1].angle, None);
    }

    #[test]
    fn test_fonts_filtered_and_classified() {
        let mut raw = RawCssData::new();
        raw.add_font("Helvetica Neue", &[], Some(FontSource::Stylesheet));
        raw.add_font("Fira Code", &["700".to_string(), "400".to_string()], Some(FontSource::Stylesheet));
        raw.add_font("Lora", &[], Some(FontSource::FontFace));

        let fonts = derive_fonts(&raw);
        assert_eq!(fonts.len(), 2);
        assert_eq!(fonts[0].family, "Fira Code");
        assert_eq!(fonts[0].variants, vec!["400", "700"]);
        assert_eq!(fonts[0].category, FontCategory::Monospace);
        assert_eq!(fonts[1].category, FontCategory::Serif);
        assert_eq!(fonts[1].variants, vec!["400"]);
    }
}
