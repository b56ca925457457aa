//! Extraction Contract
//!
//! `ExtractionResult` is what the extraction subsystem hands to the rest of
//! the pipeline. It is built once per brand kit build and never mutated.

use serde::{Deserialize, Serialize};

use super::font::Font;
use super::gradient::ExtractedGradient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogoKind {
    /// Inline `<svg>` inside a logo-marked element
    InlineSvg,
    /// `<img>` whose src/alt/class/id mentions "logo"
    Image,
    /// `apple-touch-icon` / `mask-icon`
    TouchIcon,
    /// `og:image` meta
    OpenGraph,
    /// `icon` / `shortcut icon`
    Favicon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    /// Absolute URL, or the SVG markup for inline logos
    pub url: String,
    pub kind: LogoKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Textual content of the page used for voice and personality analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub site_name: Option<String>,
    pub keywords: Vec<String>,
    pub language: Option<String>,
    pub headings: Vec<String>,
    pub paragraphs: Vec<String>,
    /// Navigation and button labels
    pub labels: Vec<String>,
}

impl ExtractedContent {
    /// All text joined for keyword analysis
    pub fn corpus(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        parts.extend(self.title.as_deref());
        parts.extend(self.description.as_deref());
        parts.extend(self.site_name.as_deref());
        parts.extend(self.keywords.iter().map(String::as_str));
        parts.extend(self.headings.iter().map(String::as_str));
        parts.extend(self.paragraphs.iter().map(String::as_str));
        parts.extend(self.labels.iter().map(String::as_str));
        parts.join(" ")
    }

    /// Best available display name for the brand
    pub fn brand_name(&self) -> Option<String> {
        if let Some(name) = &self.site_name {
            return Some(name.clone());
        }
        self.title.as_ref().map(|title| {
            title
                .split(['|', '-', '–', '—', ':'])
                .next()
                .unwrap_or(title)
                .trim()
                .to_string()
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Canonical lowercase hex colors, most prominent first
    pub colors: Vec<String>,
    pub gradients: Vec<ExtractedGradient>,
    pub fonts: Vec<Font>,
    pub logos: Vec<Logo>,
    pub content: ExtractedContent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_name_from_title() {
        let content = ExtractedContent {
            title: Some("Acme Rockets | Fast delivery".to_string()),
            ..Default::default()
        };
        assert_eq!(content.brand_name().as_deref(), Some("Acme Rockets"));
    }

    #[test]
    fn test_site_name_preferred() {
        let content = ExtractedContent {
            title: Some("Home - Acme".to_string()),
            site_name: Some("Acme".to_string()),
            ..Default::default()
        };
        assert_eq!(content.brand_name().as_deref(), Some("Acme"));
    }

    #[test]
    fn test_corpus_joins_fields() {
        let content = ExtractedContent {
            title: Some("Acme".to_string()),
            headings: vec!["Build faster".to_string()],
            ..Default::default()
        };
        assert_eq!(content.corpus(), "Acme Build faster");
    }
}
