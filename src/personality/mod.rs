//! Brand Personality
//!
//! `PersonalityAnalyzer` has two implementations selected by availability:
//! the keyword heuristic (always available) and a model-backed analyzer
//! that falls back to the heuristic per analysis. Archetype, tone and
//! dimension analyses are independent reads of the same content and run
//! concurrently.

pub mod heuristic;
pub mod model;

pub use heuristic::{KeywordAnalyzer, score_archetypes, score_dimensions};
pub use model::ModelAnalyzer;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::ai::{RetryPolicy, SharedProvider};
use crate::types::ExtractedContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Innocent,
    Sage,
    Explorer,
    Outlaw,
    Magician,
    Hero,
    Lover,
    Jester,
    Everyman,
    Caregiver,
    Ruler,
    Creator,
}

impl Archetype {
    pub const ALL: [Archetype; 12] = [
        Self::Innocent,
        Self::Sage,
        Self::Explorer,
        Self::Outlaw,
        Self::Magician,
        Self::Hero,
        Self::Lover,
        Self::Jester,
        Self::Everyman,
        Self::Caregiver,
        Self::Ruler,
        Self::Creator,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Innocent => "innocent",
            Self::Sage => "sage",
            Self::Explorer => "explorer",
            Self::Outlaw => "outlaw",
            Self::Magician => "magician",
            Self::Hero => "hero",
            Self::Lover => "lover",
            Self::Jester => "jester",
            Self::Everyman => "everyman",
            Self::Caregiver => "caregiver",
            Self::Ruler => "ruler",
            Self::Creator => "creator",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        let key = key.strip_prefix("the ").unwrap_or(&key);
        Self::ALL.into_iter().find(|a| a.key() == key)
    }

    pub fn tone_words(&self) -> &'static [&'static str] {
        match self {
            Self::Innocent => &["optimistic", "honest", "warm"],
            Self::Sage => &["knowledgeable", "thoughtful", "clear"],
            Self::Explorer => &["adventurous", "independent", "inspiring"],
            Self::Outlaw => &["rebellious", "direct", "provocative"],
            Self::Magician => &["visionary", "imaginative", "charismatic"],
            Self::Hero => &["confident", "motivating", "determined"],
            Self::Lover => &["passionate", "sensual", "intimate"],
            Self::Jester => &["playful", "witty", "lighthearted"],
            Self::Everyman => &["friendly", "down-to-earth", "approachable"],
            Self::Caregiver => &["caring", "reassuring", "supportive"],
            Self::Ruler => &["authoritative", "refined", "assured"],
            Self::Creator => &["inventive", "expressive", "original"],
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypeScore {
    pub archetype: Archetype,
    pub score: u32,
}

/// Each dimension is 0-100: 0 leans to the first pole, 100 to the second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneDimensions {
    pub formal_casual: u8,
    pub serious_playful: u8,
    pub modern_classic: u8,
    pub bold_subtle: u8,
}

impl Default for ToneDimensions {
    fn default() -> Self {
        Self {
            formal_casual: 50,
            serious_playful: 50,
            modern_classic: 50,
            bold_subtle: 50,
        }
    }
}

impl ToneDimensions {
    /// Adjectives for dimensions that clearly lean one way
    pub fn descriptors(&self) -> Vec<&'static str> {
        let lean = |value: u8, low: &'static str, high: &'static str| match value {
            0..=35 => Some(low),
            65..=100 => Some(high),
            _ => None,
        };
        [
            lean(self.formal_casual, "formal", "casual"),
            lean(self.serious_playful, "serious", "playful"),
            lean(self.modern_classic, "modern", "classic"),
            lean(self.bold_subtle, "bold", "subtle"),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityProfile {
    pub archetype: Archetype,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_archetype: Option<Archetype>,
    pub archetype_scores: Vec<ArchetypeScore>,
    pub tone: Vec<String>,
    pub dimensions: ToneDimensions,
    pub analyzer: String,
}

impl PersonalityProfile {
    pub fn from_parts(
        scores: Vec<ArchetypeScore>,
        tone: Vec<String>,
        dimensions: ToneDimensions,
        analyzer: &str,
    ) -> Self {
        let mut ranked = scores.iter().filter(|s| s.score > 0);
        let archetype = ranked
            .next()
            .map(|s| s.archetype)
            .unwrap_or(Archetype::Everyman);
        let secondary_archetype = ranked.next().map(|s| s.archetype);

        Self {
            archetype,
            secondary_archetype,
            archetype_scores: scores,
            tone,
            dimensions,
            analyzer: analyzer.to_string(),
        }
    }
}

#[async_trait]
pub trait PersonalityAnalyzer: Send + Sync {
    /// Archetypes ranked best first
    async fn analyze_archetype(&self, content: &ExtractedContent) -> Vec<ArchetypeScore>;

    async fn analyze_tone(&self, content: &ExtractedContent) -> Vec<String>;

    async fn analyze_dimensions(&self, content: &ExtractedContent) -> ToneDimensions;

    fn name(&self) -> &str;

    /// Run the three analyses concurrently and combine them
    async fn analyze(&self, content: &ExtractedContent) -> PersonalityProfile {
        let (scores, tone, dimensions) = tokio::join!(
            self.analyze_archetype(content),
            self.analyze_tone(content),
            self.analyze_dimensions(content),
        );
        PersonalityProfile::from_parts(scores, tone, dimensions, self.name())
    }
}

pub type SharedAnalyzer = Arc<dyn PersonalityAnalyzer>;

/// Model-backed analyzer when a provider exists, keyword heuristic otherwise
pub fn create_analyzer(
    provider: Option<SharedProvider>,
    retry: RetryPolicy,
    timeout: std::time::Duration,
) -> SharedAnalyzer {
    match provider {
        Some(provider) => Arc::new(ModelAnalyzer::new(provider, retry, timeout)),
        None => Arc::new(KeywordAnalyzer::new()),
    }
}

#[instrument(skip_all, fields(analyzer = analyzer.name()))]
pub async fn analyze_personality(
    analyzer: &dyn PersonalityAnalyzer,
    content: &ExtractedContent,
) -> PersonalityProfile {
    let profile = analyzer.analyze(content).await;
    info!(
        "Personality: {} (tone: {})",
        profile.archetype,
        profile.tone.join(", ")
    );
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archetype_keys_round_trip() {
        for archetype in Archetype::ALL {
            assert_eq!(Archetype::from_key(archetype.key()), Some(archetype));
        }
        assert_eq!(Archetype::from_key("The Sage"), Some(Archetype::Sage));
        assert_eq!(Archetype::from_key("wizard"), None);
    }

    #[test]
    fn test_descriptors() {
        let dims = ToneDimensions {
            formal_casual: 80,
            serious_playful: 50,
            modern_classic: 10,
            bold_subtle: 64,
        };
        assert_eq!(dims.descriptors(), vec!["casual", "modern"]);
    }

    #[test]
    fn test_profile_defaults_without_signal() {
        let scores = Archetype::ALL
            .iter()
            .map(|&archetype| ArchetypeScore { archetype, score: 0 })
            .collect();
        let profile = PersonalityProfile::from_parts(scores, vec![], ToneDimensions::default(), "keyword");
        assert_eq!(profile.archetype, Archetype::Everyman);
        assert!(profile.secondary_archetype.is_none());
    }

    #[tokio::test]
    async fn test_no_provider_uses_keywords() {
        let analyzer = create_analyzer(None, RetryPolicy::none(), std::time::Duration::from_secs(1));
        assert_eq!(analyzer.name(), "keyword");
        let profile = analyze_personality(analyzer.as_ref(), &ExtractedContent::default()).await;
        assert_eq!(profile.analyzer, "keyword");
        assert_eq!(profile.archetype_scores.len(), 12);
    }
}
