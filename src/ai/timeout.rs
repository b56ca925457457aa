//! Timeout Configuration
//!
//! Every external call of a build (page fetch, stylesheet fetch, screenshot,
//! LLM request) runs under its own deadline. Nothing cancels across builds.

use std::future::Future;
use std::time::Duration;

use crate::config::Config;
use crate::types::{BrandError, Result};

/// Per-operation deadlines for one build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    pub page: Duration,
    pub stylesheet: Duration,
    pub screenshot: Duration,
    pub llm_request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl TimeoutConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            page: Duration::from_secs(config.fetch.timeout_secs),
            stylesheet: Duration::from_secs(config.fetch.stylesheet_timeout_secs),
            screenshot: Duration::from_secs(config.screenshot.timeout_secs),
            llm_request: Duration::from_secs(config.llm.timeout_secs),
        }
    }
}

/// Execute an async operation with a timeout
///
/// Returns `BrandError::Timeout` if the operation doesn't complete within the
/// specified duration.
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(BrandError::timeout(operation_name, timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_config_defaults() {
        let config = TimeoutConfig::default();
        assert_eq!(config.page.as_secs(), 30);
        assert_eq!(config.stylesheet.as_secs(), 10);
        assert_eq!(config.screenshot.as_secs(), 30);
    }

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result = with_timeout(
            Duration::from_secs(1),
            async { Ok::<_, BrandError>(42) },
            "test operation",
        )
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result = with_timeout(
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, BrandError>(42)
            },
            "slow stylesheet",
        )
        .await;
        assert!(matches!(result.unwrap_err(), BrandError::Timeout { .. }));
    }
}
