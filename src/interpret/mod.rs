//! Vision/LLM Interpreter
//!
//! Optional model-backed stages that run only when the collector
//! under-delivers and a credential is configured:
//!
//! - `css`: interpret harvested CSS signals with a text model
//! - `vision`: interpret a page screenshot with a multimodal model
//! - `screenshot`: screenshot provider seam
//!
//! Every stage degrades to an empty result on any failure.

pub mod css;
pub mod screenshot;
pub mod vision;

pub use css::{CssInterpretation, interpret_css};
pub use screenshot::{
    HttpScreenshotProvider, ScreenshotProvider, SharedScreenshotProvider,
    create_screenshot_provider,
};
pub use vision::{VisionAnalysis, interpret_screenshot};

use serde_json::Value;

use crate::constants::interpret::MIN_COLLECTED_COLORS;
use crate::types::ExtractionResult;

/// Collector output too thin to stand on its own: fewer than three colors
/// or no fonts
pub fn needs_interpretation(collected: &ExtractionResult) -> bool {
    collected.colors.len() < MIN_COLLECTED_COLORS || collected.fonts.is_empty()
}

/// Strings under `key`, accepting bare strings or objects carrying one of
/// `fields`
pub(crate) fn string_items(value: &Value, key: &str, fields: &[&str]) -> Vec<String> {
    let Some(items) = value.get(key).and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => fields
                .iter()
                .find_map(|field| map.get(*field).and_then(Value::as_str))
                .map(str::to_string),
            _ => None,
        })
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Font;
    use serde_json::json;

    #[test]
    fn test_needs_interpretation() {
        let mut result = ExtractionResult {
            colors: vec!["#1e3a8a".into(), "#028393".into(), "#f65625".into()],
            fonts: vec![Font::new("Inter", vec![], None)],
            ..Default::default()
        };
        assert!(!needs_interpretation(&result));

        result.fonts.clear();
        assert!(needs_interpretation(&result));

        result.fonts.push(Font::new("Inter", vec![], None));
        result.colors.pop();
        assert!(needs_interpretation(&result));
    }

    #[test]
    fn test_string_items_mixed_shapes() {
        let value = json!({"colors": ["#fff000", {"hex": "#00ff00"}, {"role": "x"}, 3, " "]});
        assert_eq!(string_items(&value, "colors", &["hex"]), vec!["#fff000", "#00ff00"]);
        assert!(string_items(&value, "fonts", &["family"]).is_empty());
    }
}
