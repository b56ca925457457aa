//! Screenshot Provider
//!
//! Captures a rendered page as an image for vision analysis. A missing
//! access key means the feature is unavailable; it is never an error.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::ai::ImageInput;
use crate::config::ScreenshotConfig;
use crate::types::{BrandError, Result};

#[async_trait]
pub trait ScreenshotProvider: Send + Sync {
    async fn capture(&self, url: &Url) -> Result<ImageInput>;

    fn name(&self) -> &str;
}

pub type SharedScreenshotProvider = Arc<dyn ScreenshotProvider>;

/// Screenshot-as-a-service client taking the target page as a query
/// parameter and answering with the image body
pub struct HttpScreenshotProvider {
    client: reqwest::Client,
    api_base: String,
    access_key: SecretString,
    viewport_width: u32,
    viewport_height: u32,
    settle_delay_ms: u64,
}

impl HttpScreenshotProvider {
    pub fn new(config: &ScreenshotConfig, access_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BrandError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            access_key: SecretString::from(access_key),
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            settle_delay_ms: config.settle_delay_ms,
        })
    }

    /// Query parameters for one capture; the access key is appended
    /// separately so it never reaches logs
    fn capture_params(&self, url: &Url) -> Vec<(&'static str, String)> {
        vec![
            ("url", url.to_string()),
            ("viewport_width", self.viewport_width.to_string()),
            ("viewport_height", self.viewport_height.to_string()),
            ("delay", (self.settle_delay_ms / 1000).max(1).to_string()),
            ("format", "png".to_string()),
            ("block_cookie_banners", "true".to_string()),
        ]
    }
}

#[async_trait]
impl ScreenshotProvider for HttpScreenshotProvider {
    async fn capture(&self, url: &Url) -> Result<ImageInput> {
        debug!("Capturing screenshot of {}", url);

        let response = self
            .client
            .get(&self.api_base)
            .query(&self.capture_params(url))
            .query(&[("access_key", self.access_key.expose_secret())])
            .send()
            .await
            .map_err(|e| BrandError::fetch(&self.api_base, None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrandError::fetch(
                &self.api_base,
                Some(status.as_u16()),
                format!("screenshot capture failed: HTTP {}", status),
            ));
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("image/"))
            .unwrap_or("image/png")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BrandError::fetch(&self.api_base, Some(status.as_u16()), e.to_string()))?;

        if bytes.is_empty() {
            return Err(BrandError::fetch(&self.api_base, Some(status.as_u16()), "empty screenshot"));
        }

        debug!("Screenshot captured: {} bytes ({})", bytes.len(), mime_type);
        Ok(ImageInput {
            bytes: bytes.to_vec(),
            mime_type,
        })
    }

    fn name(&self) -> &str {
        "http"
    }
}

pub fn resolve_access_key(config: &ScreenshotConfig) -> Option<String> {
    config
        .access_key
        .clone()
        .or_else(|| std::env::var("SCREENSHOT_API_KEY").ok())
        .filter(|key| !key.trim().is_empty())
}

/// `Ok(None)` when no access key is configured
pub fn create_screenshot_provider(
    config: &ScreenshotConfig,
) -> Result<Option<SharedScreenshotProvider>> {
    match resolve_access_key(config) {
        Some(key) => Ok(Some(Arc::new(HttpScreenshotProvider::new(config, key)?))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_params_exclude_key() {
        let provider =
            HttpScreenshotProvider::new(&ScreenshotConfig::default(), "secret-key".to_string())
                .unwrap();
        let url = Url::parse("https://brand.test/").unwrap();
        let params = provider.capture_params(&url);

        assert!(params.contains(&("url", "https://brand.test/".to_string())));
        assert!(params.contains(&("viewport_width", "1440".to_string())));
        assert!(params.contains(&("delay", "2".to_string())));
        assert!(params.iter().all(|(_, v)| v != "secret-key"));
    }

    #[test]
    fn test_configured_key_creates_provider() {
        let config = ScreenshotConfig {
            access_key: Some("key".to_string()),
            ..Default::default()
        };
        let provider = create_screenshot_provider(&config).unwrap();
        assert_eq!(provider.map(|p| p.name().to_string()).as_deref(), Some("http"));
    }

    #[test]
    fn test_blank_key_is_unavailable() {
        let config = ScreenshotConfig {
            access_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(create_screenshot_provider(&config).unwrap().is_none());
    }
}
