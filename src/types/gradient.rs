//! Gradient Types
//!
//! `ExtractedGradient` is the raw form harvested from CSS text; `Gradient` is
//! the enriched form handed to downstream consumers.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::color::{Color, extract_color_tokens};

static DEGREES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)gradient\(\s*(-?\d+(?:\.\d+)?)deg").expect("valid degrees regex")
});

static GRADIENT_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:repeating-)?(?:linear|radial|conic)-gradient\(").expect("valid gradient regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientType {
    Linear,
    Radial,
    Conic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedGradient {
    pub css: String,
    #[serde(rename = "type")]
    pub gradient_type: GradientType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

impl ExtractedGradient {
    /// Classify a gradient CSS string and infer its angle
    pub fn from_css(css: impl Into<String>) -> Self {
        let css = css.into();
        let gradient_type = classify_gradient(&css);
        let angle = match gradient_type {
            GradientType::Linear => infer_linear_angle(&css),
            _ => None,
        };
        Self {
            css,
            gradient_type,
            angle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientSource {
    Extracted,
    Generated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub id: String,
    pub name: String,
    pub css: String,
    #[serde(rename = "type")]
    pub gradient_type: GradientType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    /// Colors found in the CSS text; empty for keyword or variable stops
    pub colors: Vec<Color>,
    pub source: GradientSource,
}

/// Classify by substring: radial, conic, otherwise linear
pub fn classify_gradient(css: &str) -> GradientType {
    let lower = css.to_lowercase();
    if lower.contains("radial-gradient") {
        GradientType::Radial
    } else if lower.contains("conic-gradient") {
        GradientType::Conic
    } else {
        GradientType::Linear
    }
}

/// Explicit `Ndeg` first, then direction keywords; `None` when neither
/// appears.
pub fn infer_linear_angle(css: &str) -> Option<f64> {
    if let Some(caps) = DEGREES_RE.captures(css)
        && let Ok(deg) = caps[1].parse::<f64>()
    {
        return Some(deg);
    }

    let lower = css.to_lowercase();
    let direction = |a: &str, b: &str| {
        lower.contains(&format!("to {} {}", a, b)) || lower.contains(&format!("to {} {}", b, a))
    };

    if direction("top", "right") {
        Some(45.0)
    } else if direction("bottom", "right") {
        Some(135.0)
    } else if direction("bottom", "left") {
        Some(225.0)
    } else if direction("top", "left") {
        Some(315.0)
    } else if lower.contains("to right") {
        Some(90.0)
    } else if lower.contains("to left") {
        Some(270.0)
    } else if lower.contains("to bottom") {
        Some(180.0)
    } else if lower.contains("to top") {
        Some(0.0)
    } else {
        None
    }
}

/// Parse every color token inside a gradient string
pub fn gradient_colors(css: &str) -> Vec<Color> {
    extract_color_tokens(css)
        .iter()
        .filter_map(|token| Color::parse(token))
        .collect()
}

/// Find complete `*-gradient(...)` expressions in a CSS value, honoring
/// nested parentheses.
pub fn find_gradients(value: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut search_from = 0;

    while let Some(m) = GRADIENT_START_RE.find_at(value, search_from) {
        let mut depth = 0usize;
        let mut end = None;
        for (offset, ch) in value[m.end() - 1..].char_indices() {
            match ch {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(m.end() - 1 + offset + 1);
                        break;
                    }
                }
                _ => {}
            }
        }

        match end {
            Some(end) => {
                found.push(value[m.start()..end].to_string());
                search_from = end;
            }
            None => break,
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_from_direction_keyword() {
        let g = ExtractedGradient::from_css("linear-gradient(to right, #fff, #000)");
        assert_eq!(g.gradient_type, GradientType::Linear);
        assert_eq!(g.angle, Some(90.0));
    }

    #[test]
    fn test_angle_from_degrees() {
        let g = ExtractedGradient::from_css("linear-gradient(45deg, #fff, #000)");
        assert_eq!(g.angle, Some(45.0));
    }

    #[test]
    fn test_radial_has_no_angle() {
        let g = ExtractedGradient::from_css("radial-gradient(circle, #fff, #000)");
        assert_eq!(g.gradient_type, GradientType::Radial);
        assert_eq!(g.angle, None);
    }

    #[test]
    fn test_diagonal_keywords() {
        assert_eq!(infer_linear_angle("linear-gradient(to top right, red, blue)"), Some(45.0));
        assert_eq!(infer_linear_angle("linear-gradient(to right bottom, red, blue)"), Some(135.0));
        assert_eq!(infer_linear_angle("linear-gradient(to bottom left, red, blue)"), Some(225.0));
        assert_eq!(infer_linear_angle("linear-gradient(to left top, red, blue)"), Some(315.0));
        assert_eq!(infer_linear_angle("linear-gradient(to top, red, blue)"), Some(0.0));
        assert_eq!(infer_linear_angle("linear-gradient(red, blue)"), None);
    }

    #[test]
    fn test_conic_classification() {
        let g = ExtractedGradient::from_css("conic-gradient(from 90deg, red, blue)");
        assert_eq!(g.gradient_type, GradientType::Conic);
        assert_eq!(g.angle, None);
    }

    #[test]
    fn test_find_gradients_nested() {
        let value = "url(bg.png), linear-gradient(180deg, rgba(0, 0, 0, 0.5) 0%, hsl(210 40% 50%) 100%), radial-gradient(var(--a), #fff)";
        let found = find_gradients(value);
        assert_eq!(found.len(), 2);
        assert_eq!(
            found[0],
            "linear-gradient(180deg, rgba(0, 0, 0, 0.5) 0%, hsl(210 40% 50%) 100%)"
        );
        assert_eq!(found[1], "radial-gradient(var(--a), #fff)");
    }

    #[test]
    fn test_gradient_colors_may_be_empty() {
        assert!(gradient_colors("linear-gradient(var(--from), var(--to))").is_empty());
        assert_eq!(gradient_colors("linear-gradient(#fff, rgb(0,0,0))").len(), 2);
    }
}
