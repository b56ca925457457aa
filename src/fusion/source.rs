//! Signal Sources
//!
//! Each extraction strategy reports what it found in the same shape. The
//! source decides the precedence its signals get during fusion.

use serde::{Deserialize, Serialize};

use crate::collector::CollectedPage;
use crate::interpret::{CssInterpretation, VisionAnalysis};
use crate::types::{ExtractedGradient, Font};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalSource {
    /// Multimodal analysis of a screenshot
    Vision,
    /// Static HTML/CSS harvesting
    Collector,
    /// Text-model interpretation of harvested CSS
    LlmInterpretation,
}

impl SignalSource {
    /// Lower runs first
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Vision => 0,
            Self::Collector => 1,
            Self::LlmInterpretation => 2,
        }
    }
}

impl std::fmt::Display for SignalSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vision => write!(f, "vision"),
            Self::Collector => write!(f, "collector"),
            Self::LlmInterpretation => write!(f, "llm-interpretation"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceSignals {
    pub source: SignalSource,
    pub colors: Vec<String>,
    pub fonts: Vec<Font>,
    pub gradients: Vec<ExtractedGradient>,
}

impl SourceSignals {
    pub fn new(source: SignalSource) -> Self {
        Self {
            source,
            colors: Vec::new(),
            fonts: Vec::new(),
            gradients: Vec::new(),
        }
    }

    pub fn with_colors(mut self, colors: Vec<String>) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_fonts(mut self, fonts: Vec<Font>) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_gradients(mut self, gradients: Vec<ExtractedGradient>) -> Self {
        self.gradients = gradients;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.fonts.is_empty() && self.gradients.is_empty()
    }
}

impl From<&CollectedPage> for SourceSignals {
    fn from(page: &CollectedPage) -> Self {
        let result = page.to_extraction();
        Self::new(SignalSource::Collector)
            .with_colors(result.colors)
            .with_fonts(result.fonts)
            .with_gradients(result.gradients)
    }
}

impl From<VisionAnalysis> for SourceSignals {
    fn from(analysis: VisionAnalysis) -> Self {
        Self::new(SignalSource::Vision)
            .with_colors(analysis.colors)
            .with_fonts(analysis.fonts)
            .with_gradients(analysis.gradients)
    }
}

impl From<CssInterpretation> for SourceSignals {
    fn from(interpretation: CssInterpretation) -> Self {
        Self::new(SignalSource::LlmInterpretation)
            .with_colors(interpretation.suggested_colors)
            .with_fonts(interpretation.suggested_fonts)
    }
}
