//! Fusion/Decision Engine
//!
//! Merges the signals of every extraction strategy into one list per kind.
//! Sources run in fixed precedence (vision, collector, LLM interpretation).
//! The first source with anything to offer is taken whole; lower sources
//! only fill gaps while the accepted count is under the sufficiency
//! threshold. Gradients come from the first source that has any.

pub mod source;

pub use source::{SignalSource, SourceSignals};

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::constants::collector::{MAX_COLORS, MAX_FONTS};
use crate::constants::fusion::{COLOR_SUFFICIENCY, FONT_SUFFICIENCY};
use crate::types::{ExtractedGradient, Font};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sufficiency {
    pub colors: usize,
    pub fonts: usize,
}

impl Default for Sufficiency {
    fn default() -> Self {
        Self {
            colors: COLOR_SUFFICIENCY,
            fonts: FONT_SUFFICIENCY,
        }
    }
}

/// How much each source contributed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Contribution {
    pub source: SignalSource,
    pub colors: usize,
    pub fonts: usize,
    pub gradients: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FusedSignals {
    pub colors: Vec<String>,
    pub fonts: Vec<Font>,
    pub gradients: Vec<ExtractedGradient>,
    pub contributions: Vec<Contribution>,
}

/// Fuse with the default sufficiency thresholds
pub fn fuse(sources: Vec<SourceSignals>) -> FusedSignals {
    fuse_with(sources, Sufficiency::default())
}

pub fn fuse_with(mut sources: Vec<SourceSignals>, sufficiency: Sufficiency) -> FusedSignals {
    sources.sort_by_key(|s| s.source.precedence());

    let mut fused = FusedSignals::default();
    let mut seen_hex: HashSet<String> = HashSet::new();
    let mut seen_family: HashSet<String> = HashSet::new();

    for signals in sources {
        let mut contribution = Contribution {
            source: signals.source,
            colors: 0,
            fonts: 0,
            gradients: 0,
        };

        if fused.colors.len() < sufficiency.colors {
            for hex in signals.colors {
                if fused.colors.len() >= MAX_COLORS {
                    break;
                }
                if seen_hex.insert(hex.to_lowercase()) {
                    fused.colors.push(hex);
                    contribution.colors += 1;
                }
            }
        }

        if fused.fonts.len() < sufficiency.fonts {
            for font in signals.fonts {
                if fused.fonts.len() >= MAX_FONTS {
                    break;
                }
                if seen_family.insert(font.family.to_lowercase()) {
                    fused.fonts.push(font);
                    contribution.fonts += 1;
                }
            }
        }

        if fused.gradients.is_empty() && !signals.gradients.is_empty() {
            contribution.gradients = signals.gradients.len();
            fused.gradients = signals.gradients;
        }

        debug!(
            "Fusion: {} contributed {} colors, {} fonts, {} gradients",
            contribution.source, contribution.colors, contribution.fonts, contribution.gradients
        );
        fused.contributions.push(contribution);
    }

    fused
}
