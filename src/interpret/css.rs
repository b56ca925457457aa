//! CSS Interpretation
//!
//! Asks a text model which of the harvested signals are the brand's own.
//! Suggestions are re-validated through the collector's color parser and
//! font cleanup before anything downstream sees them.

use std::time::Duration;

use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

use super::string_items;
use crate::ai::{LlmProvider, PromptBuilder, RetryPolicy, with_timeout};
use crate::collector::{RawCssData, dedupe_hex};
use crate::constants::collector::{MAX_COLORS, MAX_FONTS};
use crate::constants::interpret::{
    BRAND_VARIABLE_HINTS, PROMPT_MAX_COLORS, PROMPT_MAX_DESCRIPTION_CHARS, PROMPT_MAX_FONTS,
    PROMPT_MAX_VARIABLES,
};
use crate::types::{
    ExtractedContent, Font, FontSource, Result, clean_font_family, is_system_font, truncate_chars,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CssInterpretation {
    /// Canonical hex colors, most brand-relevant first
    pub suggested_colors: Vec<String>,
    pub suggested_fonts: Vec<Font>,
}

impl CssInterpretation {
    pub fn is_empty(&self) -> bool {
        self.suggested_colors.is_empty() && self.suggested_fonts.is_empty()
    }
}

/// Custom properties whose name hints at a brand color
fn brand_variables(raw: &RawCssData) -> Vec<String> {
    raw.css_variables()
        .iter()
        .filter(|(name, _)| {
            let lower = name.to_lowercase();
            BRAND_VARIABLE_HINTS.iter().any(|hint| lower.contains(hint))
        })
        .take(PROMPT_MAX_VARIABLES)
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect()
}

pub fn build_css_prompt(raw: &RawCssData, content: &ExtractedContent) -> String {
    let description = content
        .description
        .as_deref()
        .map(|d| truncate_chars(d, PROMPT_MAX_DESCRIPTION_CHARS));

    PromptBuilder::new()
        .role("brand designer", "reading a website's CSS to find its brand identity")
        .objectives(&[
            "Pick the colors that belong to the brand, most important first",
            "Ignore framework defaults, grays used only for text, and state colors",
            "Pick the font families the brand uses for headings and body text",
        ])
        .optional_section("Title", content.title.as_deref())
        .optional_section("Description", description.as_deref())
        .list("Brand custom properties", brand_variables(raw))
        .list(
            "Colors found in CSS",
            raw.colors().iter().take(PROMPT_MAX_COLORS).cloned().collect(),
        )
        .list(
            "Font families found in CSS",
            raw.fonts()
                .iter()
                .take(PROMPT_MAX_FONTS)
                .map(|f| f.family.clone())
                .collect(),
        )
        .output(r##"{"colors": ["#rrggbb"], "fonts": ["Family Name"]}"##)
        .build()
}

/// Validate a model response into typed suggestions
pub fn parse_css_response(value: &Value) -> CssInterpretation {
    let suggested_colors = dedupe_hex(string_items(value, "colors", &["hex", "color"]), MAX_COLORS);
    let suggested_fonts = validated_fonts(
        string_items(value, "fonts", &["family", "name"]),
        FontSource::Llm,
    );

    CssInterpretation {
        suggested_colors,
        suggested_fonts,
    }
}

/// Run model font names through the same cleanup the collector applies
pub(crate) fn validated_fonts(names: Vec<String>, source: FontSource) -> Vec<Font> {
    let mut fonts: Vec<Font> = Vec::new();
    for name in names {
        let Some(family) = clean_font_family(&name) else {
            continue;
        };
        if is_system_font(&family) || fonts.iter().any(|f| f.family.eq_ignore_ascii_case(&family)) {
            continue;
        }
        fonts.push(Font::new(family, vec!["400".to_string(), "700".to_string()], Some(source)));
        if fonts.len() >= MAX_FONTS {
            break;
        }
    }
    fonts
}

/// Interpret harvested CSS. Never fails: provider errors, timeouts and
/// malformed responses all yield an empty interpretation.
#[instrument(skip_all, fields(provider = provider.name()))]
pub async fn interpret_css(
    provider: &dyn LlmProvider,
    raw: &RawCssData,
    content: &ExtractedContent,
    retry: RetryPolicy,
    timeout: Duration,
) -> CssInterpretation {
    let prompt = build_css_prompt(raw, content);
    let schema = json!({"colors": ["#rrggbb"], "fonts": ["Family Name"]});

    let response: Result<_> = retry
        .run("CSS interpretation", || {
            with_timeout(timeout, provider.generate(&prompt, &schema), "CSS interpretation")
        })
        .await;

    match response {
        Ok(response) => {
            let interpretation = parse_css_response(&response.content);
            info!(
                "CSS interpretation suggested {} colors, {} fonts",
                interpretation.suggested_colors.len(),
                interpretation.suggested_fonts.len()
            );
            debug!("Token usage: {}", response.usage.total());
            interpretation
        }
        Err(e) => {
            warn!("CSS interpretation unavailable: {}", e);
            CssInterpretation::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpret::testing::ScriptedProvider;
    use crate::types::BrandError;

    fn raw() -> RawCssData {
        let mut raw = RawCssData::new();
        raw.add_color("#1e3a8a");
        raw.set_variable("--brand-primary", "#1e3a8a");
        raw.set_variable("--gap", "4px");
        raw.add_font("Inter", &[], Some(FontSource::Stylesheet));
        raw
    }

    #[test]
    fn test_prompt_contents() {
        let content = ExtractedContent {
            title: Some("Acme".to_string()),
            ..Default::default()
        };
        let prompt = build_css_prompt(&raw(), &content);
        assert!(prompt.contains("# Title\n\nAcme"));
        assert!(prompt.contains("--brand-primary: #1e3a8a"));
        assert!(!prompt.contains("--gap"));
        assert!(prompt.contains("- Inter"));
        assert!(!prompt.contains("# Description"));
    }

    #[test]
    fn test_response_validation() {
        let value = serde_json::json!({
            "colors": ["#1E3A8A", "not-a-color", {"hex": "rgb(2, 131, 147)"}, "#ffffff"],
            "fonts": ["'Inter', sans-serif", "Arial", {"family": "Lora"}, "inter"]
        });
        let parsed = parse_css_response(&value);
        assert_eq!(parsed.suggested_colors, vec!["#1e3a8a", "#028393"]);
        let families: Vec<&str> = parsed.suggested_fonts.iter().map(|f| f.family.as_str()).collect();
        assert_eq!(families, vec!["Inter", "Lora"]);
        assert_eq!(parsed.suggested_fonts[0].source, Some(FontSource::Llm));
    }

    #[tokio::test]
    async fn test_failure_yields_empty() {
        let provider = ScriptedProvider::new(vec![Err(BrandError::LlmApi("boom".to_string()))]);
        let result = interpret_css(
            &provider,
            &raw(),
            &ExtractedContent::default(),
            RetryPolicy::none(),
            Duration::from_secs(5),
        )
        .await;
        assert!(result.is_empty());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_success() {
        let provider = ScriptedProvider::new(vec![Ok(serde_json::json!({
            "colors": ["#1e3a8a", "#f65625"],
            "fonts": ["Inter"]
        }))]);
        let result = interpret_css(
            &provider,
            &raw(),
            &ExtractedContent::default(),
            RetryPolicy::none(),
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(result.suggested_colors.len(), 2);
        assert_eq!(result.suggested_fonts[0].family, "Inter");
    }
}
