//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/brandkit/config.toml)
//! 3. Project config (./brandkit.toml)
//! 4. Environment variables (BRANDKIT_* prefix)

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use tracing::{debug, info};

use super::types::Config;
use crate::types::{BrandError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // BRANDKIT_LLM_MODEL -> llm.model
        figment = figment.merge(Env::prefixed("BRANDKIT_").split('_').lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| BrandError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| BrandError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Global config directory (e.g. ~/.config/brandkit/)
    pub fn global_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "brandkit").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from("brandkit.toml")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Show current effective configuration
    pub fn show_config(as_json: bool) -> Result<()> {
        let config = Self::load()?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| BrandError::Config(e.to_string()))?
            );
        }

        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write a default config file, globally or in the current directory
    pub fn init(global: bool, force: bool) -> Result<PathBuf> {
        let path = if global {
            let dir = Self::global_dir().ok_or_else(|| {
                BrandError::Config("Cannot determine global config directory".to_string())
            })?;
            fs::create_dir_all(&dir)?;
            dir.join("config.toml")
        } else {
            Self::project_config_path()
        };

        if !path.exists() || force {
            fs::write(&path, Self::default_config())?;
            info!("Created config: {}", path.display());
        } else {
            info!("Config exists: {}", path.display());
        }

        Ok(path)
    }

    /// Default config content (TOML)
    fn default_config() -> String {
        r#"# brandkit configuration
# Project settings in ./brandkit.toml override the global file.

version = "1.0"

[fetch]
timeout_secs = 30
stylesheet_timeout_secs = 10
max_stylesheets = 5

# LLM interpretation runs only when the stylesheets yield fewer than
# three colors or no fonts, and only when an API key is available
# (api_key here or OPENAI_API_KEY).
[llm]
provider = "openai"
model = "gpt-4o-mini"
vision_model = "gpt-4o"
temperature = 0.3

# Screenshots need an access key (access_key here or SCREENSHOT_API_KEY).
[screenshot]
timeout_secs = 30

[palette]
cluster_threshold = 25.0
secondary_distance = 30.0
accent_primary_distance = 40.0
accent_secondary_distance = 30.0

[typography]
base_size = 16.0
ratio = "major-third"
"#
        .to_string()
    }
}
