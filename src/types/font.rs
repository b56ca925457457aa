//! Font Types and Classification
//!
//! Family-name cleanup and keyword-based category assignment shared by every
//! font source (stylesheets, Google Fonts links, vision and LLM suggestions).

use serde::{Deserialize, Serialize};

use crate::constants::collector::FONT_DENYLIST;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FontCategory {
    Serif,
    #[default]
    SansSerif,
    Display,
    Handwriting,
    Monospace,
}

impl FontCategory {
    /// CSS generic family used at the end of a font stack
    pub fn generic_family(&self) -> &'static str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Display => "sans-serif",
            Self::Handwriting => "cursive",
            Self::Monospace => "monospace",
        }
    }
}

impl std::fmt::Display for FontCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serif => write!(f, "serif"),
            Self::SansSerif => write!(f, "sans-serif"),
            Self::Display => write!(f, "display"),
            Self::Handwriting => write!(f, "handwriting"),
            Self::Monospace => write!(f, "monospace"),
        }
    }
}

/// Where a font declaration was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontSource {
    /// `font-family` declaration in a stylesheet or inline style
    Stylesheet,
    /// `@font-face` block
    FontFace,
    /// Google Fonts `<link>` URL
    GoogleFonts,
    /// Suggested by screenshot analysis
    Vision,
    /// Suggested by CSS interpretation
    Llm,
    /// Curated fallback
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub variants: Vec<String>,
    pub category: FontCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<FontSource>,
}

impl Font {
    /// Build a font, classifying it from its family name
    pub fn new(family: impl Into<String>, variants: Vec<String>, source: Option<FontSource>) -> Self {
        let family = family.into();
        let category = classify_font(&family);
        Self {
            family,
            variants,
            category,
            source,
        }
    }

    /// Curated fallback font with an explicit category
    pub fn fallback(family: &str, category: FontCategory) -> Self {
        Self {
            family: family.to_string(),
            variants: vec!["400".to_string(), "700".to_string()],
            category,
            source: Some(FontSource::Default),
        }
    }

    /// CSS font stack, e.g. `"PT Sans", sans-serif`
    pub fn stack(&self) -> String {
        format!("\"{}\", {}", self.family, self.category.generic_family())
    }
}

// =============================================================================
// Category Keyword Tables (checked in priority order)
// =============================================================================

const MONOSPACE_KEYWORDS: &[&str] = &[
    "mono", "code", "courier", "consolas", "menlo", "monaco", "inconsolata", "hack", "terminal",
    "typewriter",
];

const HANDWRITING_KEYWORDS: &[&str] = &[
    "script", "hand", "brush", "caveat", "dancing", "pacifico", "satisfy", "kalam", "marker",
    "indie flower", "shadows into light", "sacramento", "great vibes", "cursive",
];

const DISPLAY_KEYWORDS: &[&str] = &[
    "display", "bebas", "lobster", "anton", "abril", "righteous", "bungee", "alfa slab", "titan",
    "poster", "black ops", "fredoka", "shrikhand", "headline",
];

const SERIF_KEYWORDS: &[&str] = &[
    "serif", "georgia", "times", "garamond", "baskerville", "playfair", "merriweather", "lora",
    "palatino", "didot", "bodoni", "cormorant", "crimson", "caslon", "spectral", "libre",
    "tiempos", "freight", "slab",
];

const SANS_KEYWORDS: &[&str] = &[
    "sans", "grotesk", "grotesque", "helvetica", "arial", "inter", "roboto", "montserrat", "lato",
    "poppins", "nunito", "raleway", "futura", "avenir", "gotham",
];

/// Assign a category by keyword membership. Checked in order monospace,
/// handwriting, display, serif, sans-serif; anything else is sans-serif.
pub fn classify_font(family: &str) -> FontCategory {
    let lower = family.to_lowercase();
    let has_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if has_any(MONOSPACE_KEYWORDS) {
        return FontCategory::Monospace;
    }
    if has_any(HANDWRITING_KEYWORDS) {
        return FontCategory::Handwriting;
    }
    if has_any(DISPLAY_KEYWORDS) {
        return FontCategory::Display;
    }
    // "sans-serif" and "Noto Sans" both contain a serif keyword
    if !lower.contains("sans") && has_any(SERIF_KEYWORDS) {
        return FontCategory::Serif;
    }
    if has_any(SANS_KEYWORDS) {
        return FontCategory::SansSerif;
    }
    FontCategory::SansSerif
}

/// CSS generic keywords and variable references that never name a font
fn is_generic_token(token: &str) -> bool {
    let lower = token.to_lowercase();
    matches!(
        lower.as_str(),
        "serif"
            | "sans-serif"
            | "monospace"
            | "cursive"
            | "fantasy"
            | "system-ui"
            | "ui-serif"
            | "ui-sans-serif"
            | "ui-monospace"
            | "ui-rounded"
            | "math"
            | "emoji"
            | "fangsong"
            | "inherit"
            | "initial"
            | "unset"
            | "revert"
            | "-apple-system"
            | "blinkmacsystemfont"
    ) || lower.starts_with("var(")
}

/// Pick the first non-generic family from a `font-family` value, with quotes
/// and `!important` stripped.
pub fn clean_font_family(value: &str) -> Option<String> {
    let value = value.replace("!important", "");
    value
        .split(',')
        .map(|token| {
            token
                .trim()
                .trim_matches(|c| c == '"' || c == '\'')
                .trim()
                .to_string()
        })
        .find(|token| !token.is_empty() && !is_generic_token(token))
}

/// System/generic families that carry no brand identity
pub fn is_system_font(family: &str) -> bool {
    let lower = family.trim().to_lowercase();
    FONT_DENYLIST.iter().any(|denied| *denied == lower)
}

/// Normalize a `font-weight` value into a numeric variant string
pub fn normalize_weight(value: &str) -> Vec<String> {
    value
        .replace("!important", "")
        .split_whitespace()
        .filter_map(|token| match token.to_lowercase().as_str() {
            "normal" | "regular" => Some("400".to_string()),
            "bold" => Some("700".to_string()),
            "lighter" | "bolder" | "inherit" | "initial" | "unset" => None,
            t if t.chars().all(|c| c.is_ascii_digit()) && !t.is_empty() => Some(t.to_string()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_categories() {
        assert_eq!(classify_font("JetBrains Mono"), FontCategory::Monospace);
        assert_eq!(classify_font("Dancing Script"), FontCategory::Handwriting);
        assert_eq!(classify_font("Bebas Neue"), FontCategory::Display);
        assert_eq!(classify_font("Playfair Display"), FontCategory::Display);
        assert_eq!(classify_font("Merriweather"), FontCategory::Serif);
        assert_eq!(classify_font("PT Serif"), FontCategory::Serif);
        assert_eq!(classify_font("Source Sans Pro"), FontCategory::SansSerif);
        assert_eq!(classify_font("Brandname Custom"), FontCategory::SansSerif);
    }

    #[test]
    fn test_monospace_wins_over_sans() {
        assert_eq!(classify_font("Mono Sans Test"), FontCategory::Monospace);
    }

    #[test]
    fn test_clean_font_family() {
        assert_eq!(
            clean_font_family("'Inter', -apple-system, sans-serif"),
            Some("Inter".to_string())
        );
        assert_eq!(
            clean_font_family("system-ui, \"Helvetica Neue\", Arial"),
            Some("Helvetica Neue".to_string())
        );
        assert_eq!(clean_font_family("var(--font-body), serif"), None);
        assert_eq!(clean_font_family("sans-serif"), None);
    }

    #[test]
    fn test_system_fonts() {
        assert!(is_system_font("Arial"));
        assert!(is_system_font("Segoe UI"));
        assert!(!is_system_font("Inter"));
    }

    #[test]
    fn test_normalize_weight() {
        assert_eq!(normalize_weight("bold"), vec!["700"]);
        assert_eq!(normalize_weight("100 900"), vec!["100", "900"]);
        assert!(normalize_weight("bolder").is_empty());
    }

    #[test]
    fn test_font_stack() {
        let font = Font::new("Lora", vec![], None);
        assert_eq!(font.stack(), "\"Lora\", serif");
    }
}
