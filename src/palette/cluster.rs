//! Perceptual Clustering
//!
//! Collapses near-duplicate colors (hover states, tints of the same brand
//! blue) into one representative per cluster before roles are assigned.

use crate::constants::palette::{CHROMATIC_SATURATION, MAX_ROLE_LIGHTNESS, MIN_ROLE_LIGHTNESS};
use crate::types::Color;

/// Parse hex inputs and keep colors usable for brand roles. Near-black and
/// near-white are treated as text and background.
pub fn role_candidates(hex_colors: &[String]) -> Vec<Color> {
    hex_colors
        .iter()
        .filter_map(|hex| Color::parse(hex))
        .filter(|c| c.lightness() > MIN_ROLE_LIGHTNESS && c.lightness() < MAX_ROLE_LIGHTNESS)
        .collect()
}

/// Greedy single pass in input order. A color joins the first cluster whose
/// current representative is within `threshold` ΔE; each cluster keeps its
/// most saturated member (earliest wins ties).
pub fn cluster_colors(colors: &[Color], threshold: f64) -> Vec<Color> {
    let mut representatives: Vec<Color> = Vec::new();

    for color in colors {
        match representatives
            .iter_mut()
            .find(|rep| rep.delta_e(color) < threshold)
        {
            Some(rep) => {
                if color.saturation() > rep.saturation() {
                    *rep = color.clone();
                }
            }
            None => representatives.push(color.clone()),
        }
    }

    representatives
}

/// Chromatic representatives ahead of muted ones, each group keeping input
/// (prominence) order.
///
/// This is deliberately not a plain saturation sort: the most prominent
/// chromatic color must stay primary even when a later accent is more
/// saturated (navy, teal, orange keeps navy as primary).
pub fn order_representatives(mut representatives: Vec<Color>) -> Vec<Color> {
    representatives.sort_by_key(|c| c.saturation() < CHROMATIC_SATURATION);
    representatives
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(hexes: &[&str]) -> Vec<Color> {
        hexes.iter().map(|h| Color::from_hex(h).unwrap()).collect()
    }

    #[test]
    fn test_role_candidates_drop_extremes() {
        let input: Vec<String> = ["#050505", "#fafafa", "#1e3a8a", "nope"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let candidates = role_candidates(&input);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].hex(), "#1e3a8a");
    }

    #[test]
    fn test_near_duplicates_collapse_to_most_saturated() {
        // Brand blue and a slightly duller hover variant
        let colors = parse(&["#2a4580", "#1e3a8a", "#f65625"]);
        let reps = cluster_colors(&colors, 25.0);
        assert_eq!(reps.len(), 2);
        assert_eq!(reps[0].hex(), "#1e3a8a");
        assert_eq!(reps[1].hex(), "#f65625");
    }

    #[test]
    fn test_membership_follows_current_representative() {
        let threshold = 25.0;
        let blue = Color::from_hsl(225.0, 65.0, 33.0);
        // Duller first member, near enough that `blue` replaces it
        let dull = (0..65)
            .rev()
            .map(|s| Color::from_hsl(225.0, f64::from(s), 33.0))
            .find(|c| (15.0..threshold).contains(&c.delta_e(&blue)))
            .unwrap();
        // Near the new representative but out of reach of the first member
        let neighbor = (190..260)
            .flat_map(|h| (20..50).map(move |l| Color::from_hsl(f64::from(h), 60.0, f64::from(l))))
            .find(|c| {
                c.delta_e(&blue) < threshold
                    && c.delta_e(&dull) >= threshold
                    && c.saturation() <= blue.saturation()
            })
            .unwrap();

        let reps = cluster_colors(&[dull, blue.clone(), neighbor], threshold);
        assert_eq!(reps, vec![blue]);
    }

    #[test]
    fn test_distinct_colors_stay_separate() {
        let colors = parse(&["#1e3a8a", "#028393", "#f65625"]);
        assert_eq!(cluster_colors(&colors, 25.0).len(), 3);
    }

    #[test]
    fn test_muted_colors_sort_last() {
        let reps = order_representatives(parse(&["#64748b", "#1e3a8a", "#708090", "#f65625"]));
        let hexes: Vec<&str> = reps.iter().map(|c| c.hex()).collect();
        assert_eq!(hexes, vec!["#1e3a8a", "#f65625", "#64748b", "#708090"]);
    }
}
