//! Harmonies Command
//!
//! Usage:
//!   brandkit harmonies <hex> [-f json|yaml]

use crate::cli::ui::{Output, OutputFormat, parse_color, render};
use crate::palette::generate_harmonies;
use crate::types::Result;

pub fn run(color: &str, format: OutputFormat) -> Result<()> {
    let base = parse_color(color)?;
    let harmonies = generate_harmonies(&base);

    if let Some(content) = render(&harmonies, format)? {
        println!("{}", content.trim_end());
        return Ok(());
    }

    let out = Output::new();
    out.header(&format!("Harmonies of {}", base.hex()));
    for harmony in &harmonies {
        let hexes: Vec<&str> = harmony.colors.iter().map(|c| c.hex()).collect();
        out.field(&harmony.kind.to_string(), &hexes.join("  "));
    }
    Ok(())
}
