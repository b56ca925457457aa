//! Google Fonts Links
//!
//! Family and weight extraction from `fonts.googleapis.com` stylesheet URLs:
//!
//! - css2: `?family=Inter:wght@400;700&family=Lora:ital,wght@0,400;1,700`
//! - css (v1): `?family=Inter:400,700|Open+Sans:400italic`

use url::Url;

use crate::types::{Font, FontSource};

pub fn is_google_fonts_url(url: &Url) -> bool {
    url.host_str()
        .is_some_and(|host| host.eq_ignore_ascii_case("fonts.googleapis.com"))
}

/// Fonts requested by a Google Fonts URL, in URL order
pub fn parse_google_fonts_url(url: &Url) -> Vec<Font> {
    let mut fonts: Vec<Font> = Vec::new();

    for (key, value) in url.query_pairs() {
        if key != "family" {
            continue;
        }
        for spec in value.split('|') {
            let Some((family, weights)) = parse_family_spec(spec) else {
                continue;
            };
            if fonts.iter().any(|f| f.family.eq_ignore_ascii_case(&family)) {
                continue;
            }
            fonts.push(Font::new(family, weights, Some(FontSource::GoogleFonts)));
        }
    }

    fonts
}

fn parse_family_spec(spec: &str) -> Option<(String, Vec<String>)> {
    let (name, axes) = match spec.split_once(':') {
        Some((name, axes)) => (name, Some(axes)),
        None => (spec, None),
    };

    let family = name.replace('+', " ").trim().to_string();
    if family.is_empty() {
        return None;
    }

    let mut weights = match axes {
        Some(axes) if axes.contains('@') => css2_weights(axes),
        Some(axes) => v1_weights(axes),
        None => Vec::new(),
    };
    if weights.is_empty() {
        weights.push("400".to_string());
    }

    Some((family, weights))
}

/// `ital,wght@0,400;1,700` or `wght@300..700`
fn css2_weights(axes: &str) -> Vec<String> {
    let Some((names, tuples)) = axes.split_once('@') else {
        return Vec::new();
    };
    let Some(wght_index) = names.split(',').position(|axis| axis.trim() == "wght") else {
        return Vec::new();
    };

    let mut weights = Vec::new();
    for tuple in tuples.split(';') {
        let Some(value) = tuple.split(',').nth(wght_index) else {
            continue;
        };
        for weight in value.split("..") {
            push_unique(&mut weights, weight.trim());
        }
    }
    weights
}

/// `400,700italic,regular,bold`
fn v1_weights(axes: &str) -> Vec<String> {
    let mut weights = Vec::new();
    for variant in axes.split(',') {
        let variant = variant.trim().to_lowercase();
        let stem = variant
            .strip_suffix("italic")
            .or_else(|| variant.strip_suffix('i'))
            .unwrap_or(&variant);
        let weight = match stem {
            "" | "regular" => "400",
            "bold" => "700",
            other => other,
        };
        push_unique(&mut weights, weight);
    }
    weights
}

fn push_unique(weights: &mut Vec<String>, weight: &str) {
    if !weight.is_empty()
        && weight.chars().all(|c| c.is_ascii_digit())
        && !weights.iter().any(|w| w == weight)
    {
        weights.push(weight.to_string());
    }
}
