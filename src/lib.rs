//! brandkit - Brand Kit Generator
//!
//! Builds a brand kit (color palette, typography, gradients, voice and
//! design tokens) from a single web page.
//!
//! ## Pipeline
//!
//! - **Collector**: fetches the page, walks its HTML and CSS with
//!   tree-sitter (regex fallback) and harvests colors, fonts and gradients
//! - **Interpreter**: optional model pass over a screenshot and the
//!   harvested CSS, used only when the collector under-delivers
//! - **Fusion**: merges every source by precedence, filling gaps only
//! - **Derivation**: palette roles and shade scales, harmonies, contrast,
//!   typography hierarchy and modular scale
//!
//! ## Quick Start
//!
//! ```ignore
//! use brandkit::{BrandExtractor, BrandKitBuilder, Config};
//!
//! let config = Config::default();
//! let extractor = BrandExtractor::from_config(&config, None, None)?;
//! let kit = BrandKitBuilder::new(extractor).build(&url).await?;
//! println!("{}", kit.palette.primary.base.hex());
//! ```
//!
//! The derivation engines are pure and usable on their own:
//!
//! ```ignore
//! let palette = brandkit::build_color_palette(&["#1e3a8a".to_string()]);
//! let typography = brandkit::build_typography(&[]);
//! ```

pub mod ai;
pub mod buttons;
pub mod cli;
pub mod collector;
pub mod config;
pub mod constants;
pub mod fusion;
pub mod gradients;
pub mod interpret;
pub mod palette;
pub mod personality;
pub mod pipeline;
pub mod storage;
pub mod tokens;
pub mod types;
pub mod typography;
pub mod voice;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use config::{Config, ConfigLoader};
pub use types::error::{BrandError, ErrorCategory, Result, ResultExt};
pub use types::{Color, ExtractedContent, ExtractionResult, Font, FontCategory, Gradient};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use pipeline::{
    BrandExtractor, BrandKit, BrandKitBuilder, PipelineStep, StepRecord, StepStatus,
};
pub use storage::{Database, MemoryStepStore, StepStore};

// =============================================================================
// Derivation Re-exports
// =============================================================================

pub use palette::{
    ColorPalette, ContrastResult, build_color_palette, generate_harmonies, get_contrast_ratio,
};
pub use typography::{Typography, build_typography, generate_type_scale};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{LlmProvider, LlmResponse, SharedProvider, TimeoutConfig, with_timeout};
