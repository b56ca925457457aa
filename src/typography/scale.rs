//! Modular Type Scale
//!
//! Nine steps `xs`..`5xl` at `base * ratio^n`, with `base` at `n = 0`.

use serde::Serialize;

use crate::types::{BrandError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleRatio {
    MinorSecond,
    MajorSecond,
    MinorThird,
    MajorThird,
    PerfectFourth,
    AugmentedFourth,
    PerfectFifth,
    GoldenRatio,
}

impl ScaleRatio {
    pub const ALL: [ScaleRatio; 8] = [
        Self::MinorSecond,
        Self::MajorSecond,
        Self::MinorThird,
        Self::MajorThird,
        Self::PerfectFourth,
        Self::AugmentedFourth,
        Self::PerfectFifth,
        Self::GoldenRatio,
    ];

    pub fn value(&self) -> f64 {
        match self {
            Self::MinorSecond => 1.067,
            Self::MajorSecond => 1.125,
            Self::MinorThird => 1.2,
            Self::MajorThird => 1.25,
            Self::PerfectFourth => 1.333,
            Self::AugmentedFourth => 1.414,
            Self::PerfectFifth => 1.5,
            Self::GoldenRatio => 1.618,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::MinorSecond => "minor-second",
            Self::MajorSecond => "major-second",
            Self::MinorThird => "minor-third",
            Self::MajorThird => "major-third",
            Self::PerfectFourth => "perfect-fourth",
            Self::AugmentedFourth => "augmented-fourth",
            Self::PerfectFifth => "perfect-fifth",
            Self::GoldenRatio => "golden-ratio",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|r| r.key() == key)
    }
}

impl std::fmt::Display for ScaleRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.key(), self.value())
    }
}

/// (step name, exponent, line height)
const SCALE_STEPS: [(&str, i32, f64); 9] = [
    ("xs", -2, 1.6),
    ("sm", -1, 1.6),
    ("base", 0, 1.6),
    ("lg", 1, 1.5),
    ("xl", 2, 1.4),
    ("2xl", 3, 1.3),
    ("3xl", 4, 1.2),
    ("4xl", 5, 1.15),
    ("5xl", 6, 1.1),
];

/// Letter spacing applied to the two largest steps
const DISPLAY_LETTER_SPACING: &str = "-0.02em";

/// Root font size rem values are relative to
const ROOT_FONT_SIZE: f64 = 16.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeScaleStep {
    pub name: String,
    pub size_px: f64,
    pub size_rem: f64,
    pub line_height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeScale {
    pub base_size: f64,
    pub ratio: ScaleRatio,
    pub ratio_value: f64,
    pub steps: Vec<TypeScaleStep>,
}

impl TypeScale {
    pub fn step(&self, name: &str) -> Option<&TypeScaleStep> {
        self.steps.iter().find(|s| s.name == name)
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

pub fn type_scale(base_size: f64, ratio: ScaleRatio) -> TypeScale {
    let largest = SCALE_STEPS.len() - 2;
    let steps = SCALE_STEPS
        .iter()
        .enumerate()
        .map(|(i, &(name, exponent, line_height))| {
            let size = base_size * ratio.value().powi(exponent);
            TypeScaleStep {
                name: name.to_string(),
                size_px: round2(size),
                size_rem: round3(size / ROOT_FONT_SIZE),
                line_height,
                letter_spacing: (i >= largest).then(|| DISPLAY_LETTER_SPACING.to_string()),
            }
        })
        .collect();

    TypeScale {
        base_size,
        ratio,
        ratio_value: ratio.value(),
        steps,
    }
}

/// Scale from a ratio key such as `major-third`
pub fn generate_type_scale(base_size: f64, ratio_key: &str) -> Result<TypeScale> {
    if !(base_size.is_finite() && base_size > 0.0) {
        return Err(BrandError::Config(format!(
            "base size must be a positive number, got {}",
            base_size
        )));
    }
    let ratio = ScaleRatio::from_key(ratio_key).ok_or_else(|| {
        let known: Vec<&str> = ScaleRatio::ALL.iter().map(|r| r.key()).collect();
        BrandError::Config(format!(
            "Unknown scale ratio '{}'. Supported: {}",
            ratio_key,
            known.join(", ")
        ))
    })?;
    Ok(type_scale(base_size, ratio))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_third_steps() {
        let scale = generate_type_scale(16.0, "major-third").unwrap();
        let names: Vec<&str> = scale.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl", "5xl"]);

        assert_eq!(scale.step("base").unwrap().size_px, 16.0);
        assert_eq!(scale.step("base").unwrap().size_rem, 1.0);
        assert_eq!(scale.step("lg").unwrap().size_px, 20.0);
        assert_eq!(scale.step("xs").unwrap().size_px, 10.24);
        assert_eq!(scale.step("5xl").unwrap().size_px, 61.04);
    }

    #[test]
    fn test_line_height_tapers_and_spacing_on_largest() {
        let scale = generate_type_scale(16.0, "golden-ratio").unwrap();
        assert_eq!(scale.step("sm").unwrap().line_height, 1.6);
        assert_eq!(scale.step("5xl").unwrap().line_height, 1.1);
        assert!(scale.steps.windows(2).all(|w| w[0].line_height >= w[1].line_height));

        let spaced: Vec<&str> = scale
            .steps
            .iter()
            .filter(|s| s.letter_spacing.is_some())
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(spaced, vec!["4xl", "5xl"]);
    }

    #[test]
    fn test_ratio_keys() {
        assert_eq!(ScaleRatio::from_key("Perfect_Fourth"), Some(ScaleRatio::PerfectFourth));
        assert_eq!(ScaleRatio::from_key("minor-second").map(|r| r.value()), Some(1.067));
        assert!(ScaleRatio::from_key("huge").is_none());
        assert_eq!(ScaleRatio::ALL.len(), 8);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(generate_type_scale(16.0, "huge").is_err());
        assert!(generate_type_scale(0.0, "major-third").is_err());
    }
}
