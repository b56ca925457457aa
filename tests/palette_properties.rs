use brandkit::Color;
use brandkit::palette::{build_color_palette, generate_harmonies, generate_shade_scale};
use proptest::prelude::*;

fn rgb() -> impl Strategy<Value = Color> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::from_rgb(r, g, b))
}

proptest! {
    #[test]
    fn shade_lightness_strictly_decreases(color in rgb()) {
        let scale = generate_shade_scale(&color);
        let lightness: Vec<u8> = scale.shades().map(|(_, c)| c.lightness()).collect();
        prop_assert_eq!(lightness.len(), 11);
        prop_assert!(
            lightness.windows(2).all(|w| w[0] > w[1]),
            "{} gave {:?}", color.hex(), lightness
        );
    }

    #[test]
    fn derived_colors_round_trip_through_hex(color in rgb()) {
        let scale = generate_shade_scale(&color);
        for (_, shade) in scale.shades() {
            let parsed = Color::from_hex(shade.hex()).unwrap();
            prop_assert_eq!(parsed.hex(), shade.hex());
            prop_assert_eq!(parsed.rgb(), shade.rgb());
        }
        for harmony in generate_harmonies(&color) {
            for c in &harmony.colors {
                let parsed = Color::from_hex(c.hex()).unwrap();
                prop_assert_eq!(parsed.hex(), c.hex());
            }
        }
    }

    #[test]
    fn palette_is_deterministic_and_complete(colors in prop::collection::vec(rgb(), 0..8)) {
        let hexes: Vec<String> = colors.iter().map(|c| c.hex().to_string()).collect();
        let first = build_color_palette(&hexes);
        let second = build_color_palette(&hexes);
        prop_assert_eq!(&first, &second);

        prop_assert_eq!(first.neutral.len(), 10);
        for base in [&first.primary.base, &first.secondary.base, &first.accent.base] {
            prop_assert!(Color::from_hex(base.hex()).is_ok());
        }
    }

    #[test]
    fn harmonies_keep_lightness(color in rgb()) {
        let hsl = color.hsl();
        for harmony in generate_harmonies(&color) {
            for c in &harmony.colors {
                // 8-bit channels allow a little drift
                prop_assert!((i16::from(c.hsl().l) - i16::from(hsl.l)).abs() <= 1);
            }
        }
    }
}
