use super::keywords::{KeywordGroup, first_match};
use super::linguistic::{Tag, analyze};
use super::{Candidate, ParserProfile, ParserResult, settle_classification};

pub const PROFILE: ParserProfile = ParserProfile {
    name: "classifySafety",
    min_confidence: 0.3,
    clarification_prompt: "I need to make sure - are you in a safe, protected space right now?",
};

/// Danger is checked first: "not safe" must never read as "safe".
pub const GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        category: "DANGER",
        keywords: &[
            "not safe",
            "unsafe",
            "not secure",
            "insecure",
            "not protected",
            "unprotected",
            "in danger",
            "danger",
            "trapped",
            "stuck",
            "help",
            "emergency",
            "attack",
            "exposed",
            "at risk",
            "vulnerable",
            "under fire",
        ],
        confidence: 0.95,
    },
    KeywordGroup {
        category: "SAFE",
        keywords: &[
            "safe",
            "protected",
            "secure",
            "sheltered",
            "im good",
            "all good",
            "im okay",
            "im ok",
        ],
        confidence: 0.9,
    },
    KeywordGroup {
        category: "UNSURE",
        keywords: &[
            "maybe",
            "not sure",
            "i think",
            "possibly",
            "sort of",
            "kind of",
            "dont know",
        ],
        confidence: 0.7,
    },
];

fn linguistic_tier(input: &str) -> Option<Candidate> {
    let analysis = analyze(input);
    if analysis.has(Tag::Affirmative) {
        Some(Candidate::new("SAFE", 0.8, "Affirmative response"))
    } else if analysis.has(Tag::Refusal) {
        Some(Candidate::new("DANGER", 0.8, "Negative response"))
    } else {
        None
    }
}

/// Classifies an answer to "are you somewhere safe?" as `SAFE`, `DANGER` or `UNSURE`.
pub fn classify_safety(input: &str) -> ParserResult {
    settle_classification(&PROFILE, input, first_match(GROUPS, input), linguistic_tier)
}
