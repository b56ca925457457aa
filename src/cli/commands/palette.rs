//! Palette Command
//!
//! Usage:
//!   brandkit palette <hex>... [-f json|yaml]

use crate::cli::ui::{Output, OutputFormat, render};
use crate::config::ConfigLoader;
use crate::palette::{ColorScale, build_color_palette_with};
use crate::types::Result;

pub fn run(colors: &[String], format: OutputFormat) -> Result<()> {
    let config = ConfigLoader::load()?;
    let palette = build_color_palette_with(colors, &config.palette);

    if let Some(content) = render(&palette, format)? {
        println!("{}", content.trim_end());
        return Ok(());
    }

    let out = Output::new();
    for (role, scale) in [
        ("Primary", &palette.primary),
        ("Secondary", &palette.secondary),
        ("Accent", &palette.accent),
    ] {
        print_scale(&out, role, scale);
    }

    out.section("Neutral");
    for (i, color) in palette.neutral.iter().enumerate() {
        out.color(&i.to_string(), color);
    }

    out.section("Semantic");
    out.color("success", &palette.semantic.success);
    out.color("error", &palette.semantic.error);
    out.color("warning", &palette.semantic.warning);
    out.color("info", &palette.semantic.info);
    Ok(())
}

fn print_scale(out: &Output, role: &str, scale: &ColorScale) {
    out.section(&format!("{} ({})", role, scale.base.hex()));
    for (key, color) in scale.shades() {
        out.color(&key.to_string(), color);
    }
}
