//! Contrast Command
//!
//! Usage:
//!   brandkit contrast <foreground> <background> [-f json|yaml]

use crate::cli::ui::{Output, OutputFormat, parse_color, render};
use crate::palette::get_contrast_ratio;
use crate::types::Result;

fn verdict(passes: bool) -> &'static str {
    if passes { "pass" } else { "fail" }
}

pub fn run(foreground: &str, background: &str, format: OutputFormat) -> Result<()> {
    let fg = parse_color(foreground)?;
    let bg = parse_color(background)?;
    let result = get_contrast_ratio(&fg, &bg);

    if let Some(content) = render(&result, format)? {
        println!("{}", content.trim_end());
        return Ok(());
    }

    let out = Output::new();
    out.header(&format!("{} on {}", fg.hex(), bg.hex()));
    out.field("ratio", &format!("{:.2}:1", result.ratio));
    out.field("AA", verdict(result.passes_aa));
    out.field("AA large", verdict(result.passes_aa_large));
    out.field("AAA", verdict(result.passes_aaa));
    Ok(())
}
