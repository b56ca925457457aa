//! AI Integration Layer
//!
//! Model access for the optional interpretation stages: provider trait and
//! OpenAI-compatible implementation, prompt construction, response JSON
//! repair, per-call timeouts and retry policy.

pub mod prompt;
pub mod provider;
pub mod retry;
pub mod timeout;
pub mod validation;

pub use prompt::{PromptBuilder, PromptSection};
pub use provider::{
    ImageInput, LlmProvider, LlmResponse, OpenAiProvider, ResponseMetadata, ResponseTiming,
    SharedProvider, TokenUsage, create_provider, resolve_api_key,
};
pub use retry::RetryPolicy;
pub use timeout::{TimeoutConfig, with_timeout};
pub use validation::{parse_model_json, parse_with_repair_status};
