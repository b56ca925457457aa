//! Screenshot Interpretation
//!
//! Sends a rendered screenshot to a multimodal model. What the model sees is
//! the brand as visitors experience it, so fusion ranks this source first.

use std::time::Duration;

use serde_json::{Value, json};
use tracing::{info, instrument, warn};
use url::Url;

use super::css::validated_fonts;
use super::string_items;
use crate::ai::{ImageInput, LlmProvider, PromptBuilder, RetryPolicy, with_timeout};
use crate::collector::dedupe_hex;
use crate::constants::collector::MAX_COLORS;
use crate::types::{ExtractedGradient, Font, FontSource, find_gradients, json_string};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisionAnalysis {
    pub colors: Vec<String>,
    pub fonts: Vec<Font>,
    pub gradients: Vec<ExtractedGradient>,
    pub description: Option<String>,
}

impl VisionAnalysis {
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.fonts.is_empty() && self.gradients.is_empty()
    }
}

const VISION_SHAPE: &str = r##"{"colors": ["#rrggbb"], "fonts": ["Family Name"], "gradients": ["linear-gradient(...)"], "description": "one sentence"}"##;

pub fn build_vision_prompt(url: &Url) -> String {
    PromptBuilder::new()
        .role("brand designer", "identifying visual brand identity from screenshots")
        .objectives(&[
            "List the brand colors visible on the page as hex, most dominant brand color first",
            "Skip plain white, black and body-text grays unless they clearly carry the brand",
            "Name the font families used for headings and body text as closely as you can",
            "Write any visible gradients as CSS gradient expressions",
            "Describe the overall visual style in one sentence",
        ])
        .section("Page", url.as_str())
        .output(VISION_SHAPE)
        .build()
}

/// Validate a model response; gradients must be complete CSS expressions
pub fn parse_vision_response(value: &Value) -> VisionAnalysis {
    let colors = dedupe_hex(string_items(value, "colors", &["hex", "color"]), MAX_COLORS);
    let fonts = validated_fonts(
        string_items(value, "fonts", &["family", "name"]),
        FontSource::Vision,
    );

    let mut gradients: Vec<ExtractedGradient> = Vec::new();
    for candidate in string_items(value, "gradients", &["css"]) {
        for css in find_gradients(&candidate) {
            if !gradients.iter().any(|g| g.css == css) {
                gradients.push(ExtractedGradient::from_css(css));
            }
        }
    }

    let description = json_string(value, "description")
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    VisionAnalysis {
        colors,
        fonts,
        gradients,
        description,
    }
}

/// Interpret a screenshot. Never fails: unsupported providers, errors,
/// timeouts and malformed JSON all yield an empty analysis.
#[instrument(skip_all, fields(url = %url))]
pub async fn interpret_screenshot(
    provider: &dyn LlmProvider,
    image: &ImageInput,
    url: &Url,
    retry: RetryPolicy,
    timeout: Duration,
) -> VisionAnalysis {
    if !provider.supports_vision() {
        warn!("Provider {} has no vision support; skipping screenshot", provider.name());
        return VisionAnalysis::default();
    }

    let prompt = build_vision_prompt(url);
    let schema = json!({
        "colors": ["#rrggbb"],
        "fonts": ["Family Name"],
        "gradients": ["css"],
        "description": "text"
    });

    let response = retry
        .run("screenshot interpretation", || {
            with_timeout(
                timeout,
                provider.generate_with_image(&prompt, image, &schema),
                "screenshot interpretation",
            )
        })
        .await;

    match response {
        Ok(response) => {
            let analysis = parse_vision_response(&response.content);
            info!(
                "Vision found {} colors, {} fonts, {} gradients",
                analysis.colors.len(),
                analysis.fonts.len(),
                analysis.gradients.len()
            );
            analysis
        }
        Err(e) => {
            warn!("Screenshot interpretation unavailable: {}", e);
            VisionAnalysis::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpret::testing::ScriptedProvider;
    use crate::types::{BrandError, GradientType};

    fn image() -> ImageInput {
        ImageInput::png(vec![1, 2, 3])
    }

    fn url() -> Url {
        Url::parse("https://brand.test/").unwrap()
    }

    #[test]
    fn test_parse_response() {
        let value = json!({
            "colors": ["#F65625", "#ffffff", "teal", "rgb(30, 58, 138)"],
            "fonts": ["Playfair Display", "system-ui"],
            "gradients": [
                "background: linear-gradient(to right, #1e3a8a, #028393);",
                "a blue fade"
            ],
            "description": "  Bold and warm.  "
        });
        let analysis = parse_vision_response(&value);
        assert_eq!(analysis.colors, vec!["#f65625", "#1e3a8a"]);
        assert_eq!(analysis.fonts.len(), 1);
        assert_eq!(analysis.fonts[0].source, Some(FontSource::Vision));
        assert_eq!(analysis.gradients.len(), 1);
        assert_eq!(analysis.gradients[0].gradient_type, GradientType::Linear);
        assert_eq!(analysis.gradients[0].angle, Some(90.0));
        assert_eq!(analysis.description.as_deref(), Some("Bold and warm."));
    }

    #[tokio::test]
    async fn test_malformed_payload_yields_empty() {
        let provider = ScriptedProvider::new(vec![Ok(json!({"unexpected": true}))]);
        let analysis =
            interpret_screenshot(&provider, &image(), &url(), RetryPolicy::none(), Duration::from_secs(5))
                .await;
        assert!(analysis.is_empty());
        assert!(analysis.description.is_none());
    }

    #[tokio::test]
    async fn test_error_yields_empty() {
        let provider = ScriptedProvider::new(vec![Err(BrandError::LlmApi("down".to_string()))]);
        let analysis =
            interpret_screenshot(&provider, &image(), &url(), RetryPolicy::none(), Duration::from_secs(5))
                .await;
        assert!(analysis.is_empty());
        assert_eq!(provider.call_count(), 1);
    }
}
