//! Page Fetching
//!
//! `PageFetcher` is the seam between the collector and the network. The
//! HTTP implementation sends a fixed desktop User-Agent and treats any
//! non-2xx status as a failed fetch.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::config::FetchConfig;
use crate::types::{BrandError, Result};

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a document body as text
    async fn fetch_text(&self, url: &Url) -> Result<String>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BrandError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &Url) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header("Accept", "text/html,text/css,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| BrandError::fetch(url.as_str(), None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrandError::fetch(
                url.as_str(),
                Some(status.as_u16()),
                format!("HTTP {}", status),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| BrandError::fetch(url.as_str(), Some(status.as_u16()), e.to_string()))
    }
}

/// Parse user input into an absolute http(s) URL, assuming https when the
/// scheme is missing
pub fn normalize_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&candidate).map_err(|e| BrandError::InvalidUrl {
        url: input.to_string(),
        message: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        scheme => Err(BrandError::InvalidUrl {
            url: input.to_string(),
            message: format!("unsupported scheme '{}'", scheme),
        }),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_adds_scheme() {
        let url = normalize_url("example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_normalize_url_rejects_other_schemes() {
        assert!(normalize_url("ftp://example.com").is_err());
        assert!(normalize_url("https://").is_err());
    }

    #[tokio::test]
    async fn test_fake_fetcher_404() {
        let fetcher = testing::FakeFetcher::new();
        let err = fetcher
            .fetch_text(&Url::parse("https://missing.test/").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, BrandError::Fetch { status: Some(404), .. }));
    }
}
