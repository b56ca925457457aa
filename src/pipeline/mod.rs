//! Brand Kit Pipeline
//!
//! Extraction, derivation and step tracking for one build.

pub mod builder;
pub mod extract;
pub mod steps;
pub mod tracker;

pub use builder::{BrandKit, BrandKitBuilder};
pub use extract::{BrandExtractor, ExtractionReport, ExtractionSummary};
pub use steps::{PipelineStep, StepRecord, StepStatus};
pub use tracker::JobTracker;
