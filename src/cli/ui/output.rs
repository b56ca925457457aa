use std::path::Path;

use clap::ValueEnum;
use console::style;
use serde::Serialize;

use crate::types::{BrandError, Color, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Serialize for machine-readable formats; `None` for text
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<Option<String>> {
    match format {
        OutputFormat::Text => Ok(None),
        OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(value)?)),
        OutputFormat::Yaml => Ok(Some(serde_yaml::to_string(value)?)),
    }
}

/// Write to `path`, or stdout when unset
pub fn emit(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)?;
            Output::new().success(&format!("Wrote {}", path.display()));
        }
        None => println!("{}", content.trim_end()),
    }
    Ok(())
}

pub fn parse_color(input: &str) -> Result<Color> {
    Color::parse(input).ok_or_else(|| BrandError::InvalidColor(input.to_string()))
}

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// `label  #rrggbb  name`
    pub fn color(&self, label: &str, color: &Color) {
        let name = color.name.as_deref().unwrap_or("");
        println!("  {:<12} {}  {}", label, style(color.hex()).bold(), style(name).dim());
    }

    pub fn field(&self, label: &str, value: &str) {
        println!("  {:<12} {}", label, value);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_formats() {
        let value = serde_json::json!({"primary": "#1e3a8a"});
        assert!(render(&value, OutputFormat::Text).unwrap().is_none());
        assert!(
            render(&value, OutputFormat::Json)
                .unwrap()
                .unwrap()
                .contains("\"primary\": \"#1e3a8a\"")
        );
        let yaml = render(&value, OutputFormat::Yaml).unwrap().unwrap();
        assert!(yaml.starts_with("primary: "));
        assert!(yaml.contains("#1e3a8a"));
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        assert!(parse_color("#1e3a8a").is_ok());
        assert!(matches!(parse_color("nope"), Err(BrandError::InvalidColor(_))));
    }
}
