//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/brandkit/) and project (./brandkit.toml) files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{network, palette, typography};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Page and stylesheet fetching
    pub fetch: FetchConfig,

    /// LLM provider settings
    pub llm: LlmConfig,

    /// Screenshot provider settings
    pub screenshot: ScreenshotConfig,

    /// Color derivation thresholds
    pub palette: PaletteConfig,

    /// Typography scale settings
    pub typography: TypographyConfig,

    /// Job tracking storage
    pub storage: StorageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            fetch: FetchConfig::default(),
            llm: LlmConfig::default(),
            screenshot: ScreenshotConfig::default(),
            palette: PaletteConfig::default(),
            typography: TypographyConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `BrandError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(crate::types::BrandError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.fetch.timeout_secs == 0 || self.llm.timeout_secs == 0 {
            return Err(crate::types::BrandError::Config(
                "Timeouts must be greater than 0".to_string(),
            ));
        }

        if self.fetch.max_stylesheets > 20 {
            return Err(crate::types::BrandError::Config(format!(
                "fetch.max_stylesheets must be at most 20, got {}",
                self.fetch.max_stylesheets
            )));
        }

        if self.palette.cluster_threshold <= 0.0 {
            return Err(crate::types::BrandError::Config(
                "palette.cluster_threshold must be positive".to_string(),
            ));
        }

        if self.typography.base_size <= 0.0 {
            return Err(crate::types::BrandError::Config(
                "typography.base_size must be positive".to_string(),
            ));
        }

        if crate::typography::ScaleRatio::from_key(&self.typography.ratio).is_none() {
            return Err(crate::types::BrandError::Config(format!(
                "Unknown typography.ratio '{}'",
                self.typography.ratio
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Fetch Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User-Agent sent with page and stylesheet requests
    pub user_agent: String,

    /// Page fetch timeout in seconds
    pub timeout_secs: u64,

    /// Per-stylesheet timeout in seconds
    pub stylesheet_timeout_secs: u64,

    /// External stylesheets fetched per page
    pub max_stylesheets: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: network::USER_AGENT.to_string(),
            timeout_secs: network::PAGE_TIMEOUT_SECS,
            stylesheet_timeout_secs: network::STYLESHEET_TIMEOUT_SECS,
            max_stylesheets: crate::constants::collector::MAX_STYLESHEETS,
        }
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name
    pub provider: String,

    /// Text model name
    pub model: String,

    /// Multimodal model used for screenshots
    pub vision_model: String,

    /// API base URL (OpenAI-compatible)
    pub api_base: Option<String>,

    /// API key; never serialized. Falls back to `OPENAI_API_KEY`.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Temperature for generation
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: usize,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("vision_model", &self.vision_model)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            vision_model: "gpt-4o".to_string(),
            api_base: None,
            api_key: None,
            timeout_secs: network::LLM_TIMEOUT_SECS,
            temperature: 0.3,
            max_tokens: 1500,
        }
    }
}

// =============================================================================
// Screenshot Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotConfig {
    /// Screenshot API endpoint taking `url` and `access_key` query parameters
    pub api_base: String,

    /// Access key; never serialized. Falls back to `SCREENSHOT_API_KEY`.
    #[serde(skip_serializing)]
    pub access_key: Option<String>,

    /// Capture timeout in seconds
    pub timeout_secs: u64,

    /// Milliseconds the provider waits for the page to settle
    pub settle_delay_ms: u64,

    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl std::fmt::Debug for ScreenshotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenshotConfig")
            .field("api_base", &self.api_base)
            .field("access_key", &self.access_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("settle_delay_ms", &self.settle_delay_ms)
            .field("viewport_width", &self.viewport_width)
            .field("viewport_height", &self.viewport_height)
            .finish()
    }
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.screenshotone.com/take".to_string(),
            access_key: None,
            timeout_secs: network::SCREENSHOT_TIMEOUT_SECS,
            settle_delay_ms: 2000,
            viewport_width: 1440,
            viewport_height: 900,
        }
    }
}

// =============================================================================
// Palette Configuration
// =============================================================================

/// Distance thresholds used by role assignment. Empirical values; tune them
/// against real palettes rather than treating them as exact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub cluster_threshold: f64,
    pub secondary_distance: f64,
    pub accent_primary_distance: f64,
    pub accent_secondary_distance: f64,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            cluster_threshold: palette::CLUSTER_THRESHOLD,
            secondary_distance: palette::SECONDARY_DISTANCE,
            accent_primary_distance: palette::ACCENT_PRIMARY_DISTANCE,
            accent_secondary_distance: palette::ACCENT_SECONDARY_DISTANCE,
        }
    }
}

// =============================================================================
// Typography Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypographyConfig {
    /// Base font size in px
    pub base_size: f64,

    /// Modular scale ratio key, e.g. `major-third`
    pub ratio: String,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            base_size: typography::DEFAULT_BASE_SIZE,
            ratio: typography::DEFAULT_RATIO.to_string(),
        }
    }
}

// =============================================================================
// Storage Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file for job/step tracking; in-memory tracking when unset
    pub database_path: Option<PathBuf>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.fetch.max_stylesheets, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.llm.temperature = 3.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.typography.ratio = "silver".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.fetch.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_secrets_not_serialized() {
        let mut config = Config::default();
        config.llm.api_key = Some("sk-secret".to_string());
        config.screenshot.access_key = Some("shot-secret".to_string());

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
        assert!(!json.contains("shot-secret"));
        assert!(format!("{:?}", config.llm).contains("[REDACTED]"));
    }
}
