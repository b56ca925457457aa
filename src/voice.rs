//! Voice Guidelines
//!
//! Do/don't guidance derived from the personality profile.

use serde::Serialize;

use crate::personality::PersonalityProfile;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceGuidelines {
    pub summary: String,
    pub tone: Vec<String>,
    pub dos: Vec<String>,
    pub donts: Vec<String>,
}

/// (low pole do, low pole don't, high pole do, high pole don't)
const DIMENSION_GUIDANCE: [(&str, &str, &str, &str); 4] = [
    (
        "Use precise, professional language",
        "Use slang or overly casual phrasing",
        "Write conversationally, as if talking to a friend",
        "Sound stiff or bureaucratic",
    ),
    (
        "Lead with facts and clear outcomes",
        "Joke about things customers rely on",
        "Use humor and a light touch",
        "Take yourself too seriously",
    ),
    (
        "Keep sentences short and forward-looking",
        "Lean on dated idioms",
        "Draw on heritage and proven craft",
        "Chase trends or buzzwords",
    ),
    (
        "Make strong, direct claims",
        "Hedge or bury the main point",
        "Let the work speak with understated confidence",
        "Overstate or shout",
    ),
];

pub fn generate_voice(profile: &PersonalityProfile) -> VoiceGuidelines {
    let dims = profile.dimensions;
    let values = [
        dims.formal_casual,
        dims.serious_playful,
        dims.modern_classic,
        dims.bold_subtle,
    ];

    let mut dos = Vec::new();
    let mut donts = Vec::new();
    for (value, (low_do, low_dont, high_do, high_dont)) in values.iter().zip(DIMENSION_GUIDANCE) {
        if *value < 50 {
            dos.push(low_do.to_string());
            donts.push(low_dont.to_string());
        } else if *value > 50 {
            dos.push(high_do.to_string());
            donts.push(high_dont.to_string());
        }
    }
    if dos.is_empty() {
        dos.push("Be clear and helpful".to_string());
        donts.push("Use jargon the reader has to decode".to_string());
    }

    let tone = if profile.tone.is_empty() {
        profile
            .archetype
            .tone_words()
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else {
        profile.tone.clone()
    };

    VoiceGuidelines {
        summary: format!(
            "A {} voice: {}.",
            profile.archetype,
            tone.join(", ")
        ),
        tone,
        dos,
        donts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::personality::{Archetype, ArchetypeScore, ToneDimensions};

    fn profile(dimensions: ToneDimensions, tone: Vec<String>) -> PersonalityProfile {
        PersonalityProfile::from_parts(
            vec![ArchetypeScore {
                archetype: Archetype::Jester,
                score: 3,
            }],
            tone,
            dimensions,
            "keyword",
        )
    }

    #[test]
    fn test_neutral_profile_gets_generic_guidance() {
        let voice = generate_voice(&profile(ToneDimensions::default(), vec![]));
        assert_eq!(voice.dos.len(), 1);
        assert_eq!(voice.tone, vec!["playful", "witty", "lighthearted"]);
        assert!(voice.summary.starts_with("A jester voice"));
    }

    #[test]
    fn test_leaning_dimensions() {
        let dims = ToneDimensions {
            formal_casual: 90,
            serious_playful: 20,
            modern_classic: 50,
            bold_subtle: 50,
        };
        let voice = generate_voice(&profile(dims, vec!["warm".to_string()]));
        assert_eq!(voice.dos.len(), 2);
        assert!(voice.dos[0].contains("conversationally"));
        assert!(voice.dos[1].contains("facts"));
        assert_eq!(voice.tone, vec!["warm"]);
    }
}
