//! Core Data Model
//!
//! Typed values shared by the collector, the interpreters and the
//! derivation engines.

pub mod color;
pub mod error;
pub mod extraction;
pub mod font;
pub mod gradient;
pub mod utils;

pub use color::{Color, Hsl, Lab, Rgb, extract_color_tokens};
pub use error::{BrandError, ErrorCategory, ErrorClassifier, LlmError, Result, ResultExt};
pub use extraction::{ExtractedContent, ExtractionResult, Logo, LogoKind};
pub use font::{
    Font, FontCategory, FontSource, classify_font, clean_font_family, is_system_font,
    normalize_weight,
};
pub use gradient::{
    ExtractedGradient, Gradient, GradientSource, GradientType, classify_gradient, find_gradients,
    gradient_colors, infer_linear_angle,
};
pub use utils::{json_string, json_string_array, truncate_chars};
