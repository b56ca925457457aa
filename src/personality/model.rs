//! Model-Backed Personality Analysis
//!
//! One prompt per analysis. Any failure (provider error, timeout, missing
//! or out-of-range fields) falls back to the keyword heuristic for that
//! analysis only.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::heuristic::KeywordAnalyzer;
use super::{Archetype, ArchetypeScore, PersonalityAnalyzer, ToneDimensions};
use crate::ai::{PromptBuilder, RetryPolicy, SharedProvider, with_timeout};
use crate::constants::interpret::PROMPT_MAX_DESCRIPTION_CHARS;
use crate::types::{ExtractedContent, Result, json_string_array, truncate_chars};

/// Maximum corpus characters sent per prompt
const MAX_CORPUS_CHARS: usize = 3000;

pub struct ModelAnalyzer {
    provider: SharedProvider,
    fallback: KeywordAnalyzer,
    retry: RetryPolicy,
    timeout: Duration,
}

impl ModelAnalyzer {
    pub fn new(provider: SharedProvider, retry: RetryPolicy, timeout: Duration) -> Self {
        Self {
            provider,
            fallback: KeywordAnalyzer::new(),
            retry,
            timeout,
        }
    }

    fn base_prompt(content: &ExtractedContent) -> PromptBuilder {
        let description = content
            .description
            .as_deref()
            .map(|d| truncate_chars(d, PROMPT_MAX_DESCRIPTION_CHARS));
        PromptBuilder::new()
            .role("brand strategist", "brand personality and voice")
            .optional_section("Brand", content.brand_name().as_deref())
            .optional_section("Description", description.as_deref())
            .section("Website copy", &truncate_chars(&content.corpus(), MAX_CORPUS_CHARS))
    }

    async fn ask(&self, operation: &str, prompt: String, schema: Value) -> Result<Value> {
        let provider = self.provider.as_ref();
        let response = self
            .retry
            .run(operation, || {
                with_timeout(self.timeout, provider.generate(&prompt, &schema), operation)
            })
            .await?;
        debug!("{} used {} tokens", operation, response.usage.total());
        Ok(response.content)
    }
}

/// Archetype ranking; unknown names are dropped and unmentioned archetypes
/// score zero
pub fn parse_archetypes(value: &Value) -> Option<Vec<ArchetypeScore>> {
    let items = value.get("archetypes")?.as_array()?;
    let mut scores: Vec<ArchetypeScore> = Vec::new();
    for item in items {
        let Some(archetype) = item
            .get("archetype")
            .and_then(Value::as_str)
            .and_then(Archetype::from_key)
        else {
            continue;
        };
        if scores.iter().any(|s| s.archetype == archetype) {
            continue;
        }
        let score = item.get("score").and_then(Value::as_u64).unwrap_or(0).min(100) as u32;
        scores.push(ArchetypeScore { archetype, score });
    }
    if scores.is_empty() {
        return None;
    }

    scores.sort_by(|a, b| b.score.cmp(&a.score));
    for archetype in Archetype::ALL {
        if !scores.iter().any(|s| s.archetype == archetype) {
            scores.push(ArchetypeScore { archetype, score: 0 });
        }
    }
    Some(scores)
}

pub fn parse_dimensions(value: &Value) -> Option<ToneDimensions> {
    let field = |key: &str| -> Option<u8> {
        let n = value.get(key)?.as_u64()?;
        (n <= 100).then_some(n as u8)
    };
    Some(ToneDimensions {
        formal_casual: field("formalCasual")?,
        serious_playful: field("seriousPlayful")?,
        modern_classic: field("modernClassic")?,
        bold_subtle: field("boldSubtle")?,
    })
}

pub fn parse_tone(value: &Value) -> Option<Vec<String>> {
    let tone: Vec<String> = json_string_array(value, "tone")
        .into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .take(6)
        .collect();
    (!tone.is_empty()).then_some(tone)
}

#[async_trait]
impl PersonalityAnalyzer for ModelAnalyzer {
    async fn analyze_archetype(&self, content: &ExtractedContent) -> Vec<ArchetypeScore> {
        let keys: Vec<String> = Archetype::ALL.iter().map(|a| a.key().to_string()).collect();
        let prompt = Self::base_prompt(content)
            .objectives(&["Score how strongly the brand expresses each Jungian archetype (0-100)"])
            .list("Archetypes", keys)
            .output(r#"{"archetypes": [{"archetype": "sage", "score": 80}]}"#)
            .build();
        let schema = json!({"archetypes": [{"archetype": "string", "score": 0}]});

        match self.ask("archetype analysis", prompt, schema).await {
            Ok(value) => match parse_archetypes(&value) {
                Some(scores) => return scores,
                None => warn!("Archetype response had no known archetypes; using keywords"),
            },
            Err(e) => warn!("Archetype analysis failed ({}); using keywords", e),
        }
        self.fallback.analyze_archetype(content).await
    }

    async fn analyze_tone(&self, content: &ExtractedContent) -> Vec<String> {
        let prompt = Self::base_prompt(content)
            .objectives(&["Describe the brand's tone of voice in three to six adjectives"])
            .output(r#"{"tone": ["confident", "warm"]}"#)
            .build();
        let schema = json!({"tone": ["string"]});

        match self.ask("tone analysis", prompt, schema).await {
            Ok(value) => match parse_tone(&value) {
                Some(tone) => return tone,
                None => warn!("Tone response was empty; using keywords"),
            },
            Err(e) => warn!("Tone analysis failed ({}); using keywords", e),
        }
        self.fallback.analyze_tone(content).await
    }

    async fn analyze_dimensions(&self, content: &ExtractedContent) -> ToneDimensions {
        let prompt = Self::base_prompt(content)
            .objectives(&[
                "Rate each tone dimension from 0 to 100",
                "0 means fully the first word, 100 fully the second",
            ])
            .output(
                r#"{"formalCasual": 50, "seriousPlayful": 50, "modernClassic": 50, "boldSubtle": 50}"#,
            )
            .build();
        let schema = json!({
            "formalCasual": 0, "seriousPlayful": 0, "modernClassic": 0, "boldSubtle": 0
        });

        match self.ask("dimension analysis", prompt, schema).await {
            Ok(value) => match parse_dimensions(&value) {
                Some(dimensions) => return dimensions,
                None => warn!("Dimension response incomplete; using keywords"),
            },
            Err(e) => warn!("Dimension analysis failed ({}); using keywords", e),
        }
        self.fallback.analyze_dimensions(content).await
    }

    fn name(&self) -> &str {
        "model"
    }
}
