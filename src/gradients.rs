//! Gradient Enrichment
//!
//! Extracted gradients gain an id, a name and their parsed colors. A fixed
//! set of brand gradients is generated from the palette and rendered back
//! to CSS.

use crate::palette::ColorPalette;
use crate::types::{
    Color, ExtractedGradient, Gradient, GradientSource, GradientType, gradient_colors,
};

fn describe(gradient_type: GradientType, angle: Option<f64>) -> String {
    match (gradient_type, angle) {
        (GradientType::Linear, Some(angle)) => format!("Linear {}°", angle),
        (GradientType::Linear, None) => "Linear".to_string(),
        (GradientType::Radial, _) => "Radial".to_string(),
        (GradientType::Conic, _) => "Conic".to_string(),
    }
}

pub fn enrich_gradient(index: usize, extracted: &ExtractedGradient) -> Gradient {
    Gradient {
        id: format!("gradient-{}", index + 1),
        name: format!("Brand {} {}", describe(extracted.gradient_type, extracted.angle), index + 1),
        css: extracted.css.clone(),
        gradient_type: extracted.gradient_type,
        angle: extracted.angle,
        colors: gradient_colors(&extracted.css),
        source: GradientSource::Extracted,
    }
}

pub fn render_css(gradient_type: GradientType, angle: Option<f64>, colors: &[Color]) -> String {
    let stops: Vec<&str> = colors.iter().map(Color::hex).collect();
    let stops = stops.join(", ");
    match gradient_type {
        GradientType::Linear => format!("linear-gradient({}deg, {})", angle.unwrap_or(180.0), stops),
        GradientType::Radial => format!("radial-gradient(circle, {})", stops),
        GradientType::Conic => format!("conic-gradient(from {}deg, {})", angle.unwrap_or(0.0), stops),
    }
}

fn generated(
    id: usize,
    name: &str,
    gradient_type: GradientType,
    angle: Option<f64>,
    colors: Vec<Color>,
) -> Gradient {
    Gradient {
        id: format!("gradient-{}", id),
        name: name.to_string(),
        css: render_css(gradient_type, angle, &colors),
        gradient_type,
        angle: match gradient_type {
            GradientType::Radial => None,
            _ => angle,
        },
        colors,
        source: GradientSource::Generated,
    }
}

fn shade_or_base(scale: &crate::palette::ColorScale, key: u16) -> Color {
    scale.shade(key).cloned().unwrap_or_else(|| scale.base.clone())
}

/// Brand gradients derived from role colors; ids continue after `first_id`
pub fn generate_brand_gradients(palette: &ColorPalette, first_id: usize) -> Vec<Gradient> {
    let primary = palette.primary.base.clone();
    let secondary = palette.secondary.base.clone();
    let accent = palette.accent.base.clone();

    vec![
        generated(
            first_id,
            "Primary to Secondary",
            GradientType::Linear,
            Some(135.0),
            vec![primary, secondary.clone()],
        ),
        generated(
            first_id + 1,
            "Primary Depth",
            GradientType::Linear,
            Some(180.0),
            vec![shade_or_base(&palette.primary, 400), shade_or_base(&palette.primary, 800)],
        ),
        generated(
            first_id + 2,
            "Secondary to Accent",
            GradientType::Linear,
            Some(90.0),
            vec![secondary, accent.clone()],
        ),
        generated(
            first_id + 3,
            "Accent Glow",
            GradientType::Radial,
            None,
            vec![accent, shade_or_base(&palette.accent, 50)],
        ),
    ]
}

/// Extracted gradients first, then generated ones
pub fn build_gradients(extracted: &[ExtractedGradient], palette: &ColorPalette) -> Vec<Gradient> {
    let mut gradients: Vec<Gradient> = extracted
        .iter()
        .enumerate()
        .map(|(i, g)| enrich_gradient(i, g))
        .collect();
    let next_id = gradients.len() + 1;
    gradients.extend(generate_brand_gradients(palette, next_id));
    gradients
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::build_color_palette;

    #[test]
    fn test_enrich_extracted() {
        let extracted = ExtractedGradient::from_css("linear-gradient(to right, #1e3a8a, rgb(2, 131, 147))");
        let gradient = enrich_gradient(0, &extracted);
        assert_eq!(gradient.id, "gradient-1");
        assert_eq!(gradient.angle, Some(90.0));
        assert_eq!(gradient.colors.len(), 2);
        assert_eq!(gradient.colors[1].hex(), "#028393");
        assert_eq!(gradient.source, GradientSource::Extracted);
    }

    #[test]
    fn test_variable_stops_have_no_colors() {
        let extracted = ExtractedGradient::from_css("linear-gradient(var(--a), var(--b))");
        assert!(enrich_gradient(0, &extracted).colors.is_empty());
    }

    #[test]
    fn test_generated_gradients() {
        let palette = build_color_palette(&["#1e3a8a".to_string(), "#028393".to_string()]);
        let gradients = build_gradients(
            &[ExtractedGradient::from_css("radial-gradient(#fff, #000)")],
            &palette,
        );

        assert_eq!(gradients.len(), 5);
        let ids: Vec<&str> = gradients.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["gradient-1", "gradient-2", "gradient-3", "gradient-4", "gradient-5"]);

        let first = &gradients[1];
        assert_eq!(first.source, GradientSource::Generated);
        assert_eq!(first.css, "linear-gradient(135deg, #1e3a8a, #028393)");

        let glow = &gradients[4];
        assert_eq!(glow.gradient_type, GradientType::Radial);
        assert_eq!(glow.angle, None);
        assert!(glow.css.starts_with("radial-gradient(circle, "));
    }
}
