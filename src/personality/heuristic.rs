//! Keyword Personality Analysis
//!
//! Scores the page text against static keyword tables. Works offline and
//! never fails, which makes it the fallback for the model-backed analyzer.

use async_trait::async_trait;

use super::{Archetype, ArchetypeScore, PersonalityAnalyzer, ToneDimensions};
use crate::types::ExtractedContent;

/// Keywords per archetype, in `Archetype::ALL` order
const ARCHETYPE_KEYWORDS: [(Archetype, &[&str]); 12] = [
    (Archetype::Innocent, &["simple", "pure", "honest", "natural", "wholesome", "happy", "clean", "fresh"]),
    (Archetype::Sage, &["learn", "knowledge", "research", "insight", "expert", "data", "truth", "understand", "science"]),
    (Archetype::Explorer, &["discover", "adventure", "explore", "journey", "freedom", "travel", "outdoor", "wild"]),
    (Archetype::Outlaw, &["disrupt", "rebel", "break", "revolution", "radical", "bold", "unconventional"]),
    (Archetype::Magician, &["transform", "magic", "vision", "imagine", "innovate", "future", "dream", "possible"]),
    (Archetype::Hero, &["achieve", "win", "strong", "perform", "challenge", "courage", "power", "fast"]),
    (Archetype::Lover, &["love", "beauty", "passion", "luxury", "intimate", "sensual", "elegant", "indulge"]),
    (Archetype::Jester, &["fun", "play", "joy", "laugh", "humor", "enjoy", "silly", "party"]),
    (Archetype::Everyman, &["everyone", "everyday", "affordable", "friendly", "community", "together", "real", "people"]),
    (Archetype::Caregiver, &["care", "help", "support", "protect", "health", "safe", "family", "comfort"]),
    (Archetype::Ruler, &["leader", "premium", "control", "enterprise", "quality", "exclusive", "trusted", "standard"]),
    (Archetype::Creator, &["create", "design", "build", "craft", "make", "original", "art", "studio"]),
];

const FORMAL: &[&str] = &["enterprise", "solutions", "professional", "compliance", "services", "institution", "regulated"];
const CASUAL: &[&str] = &["hey", "awesome", "cool", "love", "easy", "fun", "!", "you'll"];
const SERIOUS: &[&str] = &["security", "reliable", "secure", "trusted", "risk", "critical", "compliance"];
const PLAYFUL: &[&str] = &["fun", "play", "joy", "delight", "magic", "party", "emoji"];
const MODERN: &[&str] = &["ai", "platform", "cloud", "digital", "app", "smart", "next-gen", "innovative"];
const CLASSIC: &[&str] = &["heritage", "tradition", "since", "classic", "timeless", "established", "craftsmanship"];
const BOLD: &[&str] = &["bold", "powerful", "fearless", "disrupt", "revolution", "unstoppable", "best"];
const SUBTLE: &[&str] = &["calm", "gentle", "quiet", "minimal", "soft", "simple", "thoughtful"];

/// Points one keyword hit moves a dimension away from the midpoint
const DIMENSION_STEP: i32 = 10;

fn words(content: &ExtractedContent) -> Vec<String> {
    content
        .corpus()
        .to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '-' || c == '\'' || c == '!'))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn hits(words: &[String], keywords: &[&str]) -> i32 {
    words
        .iter()
        .filter(|w| {
            keywords
                .iter()
                .any(|k| w.as_str() == *k || (k.len() > 3 && w.starts_with(k)) || (*k == "!" && w.contains('!')))
        })
        .count() as i32
}

/// 0 leans to the first pole, 100 to the second
fn dimension(words: &[String], first: &[&str], second: &[&str]) -> u8 {
    let score = 50 + (hits(words, second) - hits(words, first)) * DIMENSION_STEP;
    score.clamp(0, 100) as u8
}

pub fn score_archetypes(content: &ExtractedContent) -> Vec<ArchetypeScore> {
    let words = words(content);
    let mut scores: Vec<ArchetypeScore> = ARCHETYPE_KEYWORDS
        .iter()
        .map(|(archetype, keywords)| ArchetypeScore {
            archetype: *archetype,
            score: hits(&words, keywords) as u32,
        })
        .collect();
    // Stable: ties keep table order
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores
}

pub fn score_dimensions(content: &ExtractedContent) -> ToneDimensions {
    let words = words(content);
    ToneDimensions {
        formal_casual: dimension(&words, FORMAL, CASUAL),
        serious_playful: dimension(&words, SERIOUS, PLAYFUL),
        modern_classic: dimension(&words, MODERN, CLASSIC),
        bold_subtle: dimension(&words, BOLD, SUBTLE),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordAnalyzer;

impl KeywordAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PersonalityAnalyzer for KeywordAnalyzer {
    async fn analyze_archetype(&self, content: &ExtractedContent) -> Vec<ArchetypeScore> {
        score_archetypes(content)
    }

    async fn analyze_tone(&self, content: &ExtractedContent) -> Vec<String> {
        let dimensions = score_dimensions(content);
        let archetype = score_archetypes(content)
            .first()
            .filter(|s| s.score > 0)
            .map(|s| s.archetype)
            .unwrap_or(Archetype::Everyman);

        let mut tone: Vec<String> = archetype.tone_words().iter().map(|s| s.to_string()).collect();
        for word in dimensions.descriptors() {
            if !tone.iter().any(|t| t == word) {
                tone.push(word.to_string());
            }
        }
        tone
    }

    async fn analyze_dimensions(&self, content: &ExtractedContent) -> ToneDimensions {
        score_dimensions(content)
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(text: &str) -> ExtractedContent {
        ExtractedContent {
            paragraphs: vec![text.to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_archetype_ranking() {
        let scores = score_archetypes(&content(
            "Explore the wild outdoors. Discover your next adventure and journey with freedom.",
        ));
        assert_eq!(scores[0].archetype, Archetype::Explorer);
        assert!(scores[0].score >= 5);
        assert_eq!(scores.len(), 12);
    }

    #[test]
    fn test_empty_content_is_neutral() {
        let dims = score_dimensions(&ExtractedContent::default());
        assert_eq!(dims, ToneDimensions::default());
        assert!(score_archetypes(&ExtractedContent::default()).iter().all(|s| s.score == 0));
    }

    #[test]
    fn test_dimensions_lean() {
        let dims = score_dimensions(&content(
            "Enterprise security solutions for regulated institutions. Professional services.",
        ));
        assert!(dims.formal_casual < 50);
        assert!(dims.serious_playful < 50);
    }

    #[tokio::test]
    async fn test_tone_falls_back_to_everyman() {
        let tone = KeywordAnalyzer::new().analyze_tone(&ExtractedContent::default()).await;
        let expected: Vec<String> = Archetype::Everyman
            .tone_words()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(&tone[..expected.len()], expected.as_slice());
    }
}
