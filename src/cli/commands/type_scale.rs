//! Type Scale Command
//!
//! Usage:
//!   brandkit type-scale [--base 16] [--ratio major-third] [-f json|yaml]

use crate::cli::ui::{Output, OutputFormat, render};
use crate::typography::generate_type_scale;
use crate::types::Result;

pub fn run(base: f64, ratio: &str, format: OutputFormat) -> Result<()> {
    let scale = generate_type_scale(base, ratio)?;

    if let Some(content) = render(&scale, format)? {
        println!("{}", content.trim_end());
        return Ok(());
    }

    let out = Output::new();
    out.header(&format!(
        "{}px base, {} ({})",
        scale.base_size,
        scale.ratio.key(),
        scale.ratio_value
    ));
    for step in &scale.steps {
        let spacing = step.letter_spacing.as_deref().unwrap_or("");
        out.field(
            &step.name,
            &format!(
                "{:>7.2}px  {:>6.3}rem  lh {:<5} {}",
                step.size_px, step.size_rem, step.line_height, spacing
            ),
        );
    }
    Ok(())
}
