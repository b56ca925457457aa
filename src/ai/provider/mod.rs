//! LLM Provider Abstraction
//!
//! Defines the `LlmProvider` trait used by CSS interpretation, screenshot
//! analysis and model-backed personality analysis. Providers return parsed
//! JSON plus usage metrics; callers decide what to do with failures.

mod openai;

pub use openai::OpenAiProvider;

pub use crate::types::{ErrorCategory, ErrorClassifier, LlmError};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::config::LlmConfig;
use crate::types::{BrandError, Result};

// =============================================================================
// LLM Response with Usage Metrics
// =============================================================================

#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Generated content (parsed JSON)
    pub content: Value,
    pub usage: TokenUsage,
    pub timing: ResponseTiming,
    pub metadata: ResponseMetadata,
}

impl LlmResponse {
    /// Create response with content only (usage unknown)
    pub fn content_only(content: Value) -> Self {
        Self {
            content,
            usage: TokenUsage::default(),
            timing: ResponseTiming::default(),
            metadata: ResponseMetadata::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }

    /// Create from OpenAI-style usage response
    pub fn from_openai(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            input_tokens: prompt_tokens,
            output_tokens: completion_tokens,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResponseTiming {
    /// Wall clock time in milliseconds
    pub total_ms: u64,
}

impl ResponseTiming {
    pub fn from_duration(duration: std::time::Duration) -> Self {
        Self {
            total_ms: duration.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResponseMetadata {
    pub model: String,
    pub provider: String,
}

// =============================================================================
// Image Input
// =============================================================================

/// Encoded image sent alongside a prompt
#[derive(Clone)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl std::fmt::Debug for ImageInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageInput")
            .field("bytes", &format!("{} bytes", self.bytes.len()))
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

impl ImageInput {
    pub fn png(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            mime_type: "image/png".to_string(),
        }
    }

    /// `data:` URI accepted by OpenAI-compatible vision endpoints
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

/// Shared LLM provider type for concurrent access across pipeline stages.
pub type SharedProvider = Arc<dyn LlmProvider + Send + Sync>;

// =============================================================================
// LLM Provider Trait
// =============================================================================

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate JSON output for a text prompt. `schema` is an example shape
    /// or JSON Schema; `Value::Null` means free-form JSON.
    async fn generate(&self, prompt: &str, schema: &Value) -> Result<LlmResponse>;

    /// Generate JSON output for a prompt plus one image
    async fn generate_with_image(
        &self,
        _prompt: &str,
        _image: &ImageInput,
        _schema: &Value,
    ) -> Result<LlmResponse> {
        Err(BrandError::Llm(LlmError::with_provider(
            ErrorCategory::Unavailable,
            "Image input not supported",
            self.name(),
        )))
    }

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;

    fn supports_vision(&self) -> bool {
        false
    }
}

/// API key from config, falling back to `OPENAI_API_KEY`
pub fn resolve_api_key(config: &LlmConfig) -> Option<String> {
    config
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .filter(|key| !key.trim().is_empty())
}

/// Create a shared provider from configuration.
///
/// Returns `Ok(None)` when no credential is configured; a missing key means
/// the model-backed features are unavailable, not that the build failed.
pub fn create_provider(config: &LlmConfig) -> Result<Option<SharedProvider>> {
    let Some(api_key) = resolve_api_key(config) else {
        return Ok(None);
    };

    match config.provider.as_str() {
        "openai" => Ok(Some(Arc::new(OpenAiProvider::new(config, api_key)?))),
        _ => Err(BrandError::Config(format!(
            "Unknown provider: {}. Supported: openai",
            config.provider
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri() {
        let image = ImageInput::png(vec![0x89, b'P', b'N', b'G']);
        assert_eq!(image.data_uri(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_configured_key_wins() {
        let config = LlmConfig {
            api_key: Some("sk-config".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_api_key(&config).as_deref(), Some("sk-config"));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let config = LlmConfig {
            provider: "mystery".to_string(),
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        assert!(create_provider(&config).is_err());
    }

    #[test]
    fn test_token_usage_total() {
        let usage = TokenUsage::from_openai(100, 50);
        assert_eq!(usage.total(), 150);
    }
}
