//! Button Styles
//!
//! Primary, secondary and outline buttons from the palette. Text colors are
//! picked for contrast and the resulting ratio is reported with each style.

use serde::Serialize;

use crate::palette::{ColorPalette, ColorScale, ContrastResult, get_contrast_ratio, readable_text_color};
use crate::types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Outline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonStyle {
    pub variant: ButtonVariant,
    pub background: String,
    pub text: String,
    pub border: String,
    pub hover_background: String,
    pub contrast: ContrastResult,
}

fn hover_shade(scale: &ColorScale) -> Color {
    scale.shade(700).cloned().unwrap_or_else(|| scale.base.clone())
}

fn filled(variant: ButtonVariant, scale: &ColorScale) -> ButtonStyle {
    let background = &scale.base;
    let text = readable_text_color(background);
    ButtonStyle {
        variant,
        background: background.hex().to_string(),
        text: text.hex().to_string(),
        border: background.hex().to_string(),
        hover_background: hover_shade(scale).hex().to_string(),
        contrast: get_contrast_ratio(background, &text),
    }
}

/// Outline buttons sit on white; the primary 700 shade is used for text
/// when the base color is too light to read
fn outline(scale: &ColorScale) -> ButtonStyle {
    let white = Color::from_rgb(255, 255, 255);
    let base_contrast = get_contrast_ratio(&scale.base, &white);
    let text = if base_contrast.passes_aa_large {
        scale.base.clone()
    } else {
        hover_shade(scale)
    };
    let hover = scale.shade(50).cloned().unwrap_or_else(|| white.clone());

    ButtonStyle {
        variant: ButtonVariant::Outline,
        background: "transparent".to_string(),
        text: text.hex().to_string(),
        border: text.hex().to_string(),
        hover_background: hover.hex().to_string(),
        contrast: get_contrast_ratio(&text, &white),
    }
}

pub fn generate_button_styles(palette: &ColorPalette) -> Vec<ButtonStyle> {
    vec![
        filled(ButtonVariant::Primary, &palette.primary),
        filled(ButtonVariant::Secondary, &palette.secondary),
        outline(&palette.primary),
    ]
}
