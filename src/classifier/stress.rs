use super::keywords::{KeywordGroup, first_match};
use super::linguistic::analyze;
use super::{Candidate, ParserProfile, ParserResult, settle_classification};

pub const PROFILE: ParserProfile = ParserProfile {
    name: "classifyStress",
    min_confidence: 0.25,
    clarification_prompt: "I didn't quite understand. Are you feeling relaxed, somewhat stressed, or very stressed?",
};

/// Negated distress first so "not panicking" never reads as "panic", then
/// crisis phrases, calm phrases last.
pub const GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        category: "LOW_STRESS",
        keywords: &[
            "not stressed",
            "not anxious",
            "not worried",
            "not nervous",
            "not tense",
            "no stress",
            "not scared",
            "not panicking",
            "not overwhelmed",
            "not terrified",
            "no longer scared",
        ],
        confidence: 0.85,
    },
    KeywordGroup {
        category: "HIGH_STRESS",
        keywords: &[
            "cant breathe",
            "cannot breathe",
            "panic",
            "terrified",
            "overwhelmed",
            "crisis",
            "scared",
            "heart is racing",
            "heart racing",
            "racing heart",
            "losing control",
            "going to die",
            "help me",
            "need help",
            "please help",
            "help!",
            "shaking",
            "trembling",
        ],
        confidence: 0.95,
    },
    KeywordGroup {
        category: "CONFUSED",
        keywords: &[
            "confused",
            "dont understand",
            "dont know what",
            "what is happening",
            "whats happening",
            "disoriented",
            "cant think",
            "cant focus",
        ],
        confidence: 0.8,
    },
    KeywordGroup {
        category: "MODERATE_STRESS",
        keywords: &[
            "anxious",
            "worried",
            "nervous",
            "uneasy",
            "uncomfortable",
            "tense",
            "stressed",
            "on edge",
            "not good",
            "not great",
            "not okay",
            "not ok",
            "not fine",
            "not calm",
            "somewhat",
            "a bit",
        ],
        confidence: 0.85,
    },
    KeywordGroup {
        category: "CAREGIVER",
        keywords: &[
            "caregiver",
            "helping someone",
            "taking care of",
            "looking after",
            "care facility",
            "nursing",
        ],
        confidence: 0.85,
    },
    KeywordGroup {
        category: "IN_TRANSIT",
        keywords: &[
            "in the car",
            "in a car",
            "in my car",
            "on the bus",
            "on a bus",
            "on the train",
            "on a train",
            "driving",
            "in transit",
            "on the road",
            "on the highway",
            "vehicle",
        ],
        confidence: 0.9,
    },
    KeywordGroup {
        category: "OUTDOOR_WORKER",
        keywords: &[
            "outside",
            "outdoors",
            "construction",
            "open space",
            "in the field",
            "working outdoors",
        ],
        confidence: 0.85,
    },
    KeywordGroup {
        category: "LOW_STRESS",
        keywords: &[
            "good",
            "fine",
            "okay",
            "calm",
            "relaxed",
            "better",
            "alright",
            "peaceful",
            "just checking",
            "exploring",
            "curious",
        ],
        confidence: 0.9,
    },
];

fn linguistic_tier(input: &str) -> Option<Candidate> {
    let analysis = analyze(input);
    if !analysis.has_evidence() {
        return Some(Candidate::new("LOW_STRESS", 0.2, "No emotional signal"));
    }
    let candidate = match analysis.score {
        s if s <= -3 => Candidate::new("HIGH_STRESS", 0.7, format!("Negative sentiment ({s})")),
        s if s < 0 => Candidate::new(
            "MODERATE_STRESS",
            0.6,
            format!("Slightly negative sentiment ({s})"),
        ),
        s => Candidate::new("LOW_STRESS", 0.6, format!("Neutral or positive sentiment ({s})")),
    };
    Some(candidate)
}

/// Classifies how stressed the speaker sounds.
///
/// Besides the three stress buckets this may return the context categories
/// `CONFUSED`, `CAREGIVER`, `IN_TRANSIT` and `OUTDOOR_WORKER`, which only the
/// keyword tier produces.
pub fn classify_stress(input: &str) -> ParserResult {
    settle_classification(&PROFILE, input, first_match(GROUPS, input), linguistic_tier)
}
