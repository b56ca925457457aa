//! Config Command
//!
//! Manage brandkit configuration.
//!
//! Usage:
//!   brandkit config show [-f json]
//!   brandkit config path
//!   brandkit config init [-g] [--force]

use crate::cli::ui::{Output, OutputFormat};
use crate::config::ConfigLoader;
use crate::types::Result;

/// Show the merged effective configuration
pub fn show(format: OutputFormat) -> Result<()> {
    ConfigLoader::show_config(format == OutputFormat::Json)
}

pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

pub fn init(global: bool, force: bool) -> Result<()> {
    let path = ConfigLoader::init(global, force)?;
    Output::new().success(&format!(
        "{} configuration: {}",
        if global { "Global" } else { "Project" },
        path.display()
    ));
    Ok(())
}
