//! WCAG Contrast

use serde::Serialize;

use crate::constants::palette::{WCAG_AA, WCAG_AA_LARGE, WCAG_AAA};
use crate::types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastResult {
    /// Rounded to two decimals
    pub ratio: f64,
    pub passes_aa: bool,
    pub passes_aa_large: bool,
    pub passes_aaa: bool,
}

pub fn get_contrast_ratio(a: &Color, b: &Color) -> ContrastResult {
    let la = a.relative_luminance();
    let lb = b.relative_luminance();
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    let ratio = ((lighter + 0.05) / (darker + 0.05) * 100.0).round() / 100.0;

    ContrastResult {
        ratio,
        passes_aa: ratio >= WCAG_AA,
        passes_aa_large: ratio >= WCAG_AA_LARGE,
        passes_aaa: ratio >= WCAG_AAA,
    }
}

/// White or black, whichever reads better on `background`
pub fn readable_text_color(background: &Color) -> Color {
    let white = Color::from_rgb(255, 255, 255);
    let black = Color::from_rgb(0, 0, 0);
    if get_contrast_ratio(background, &white).ratio >= get_contrast_ratio(background, &black).ratio {
        white
    } else {
        black
    }
}
