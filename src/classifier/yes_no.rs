use super::keywords::{KeywordGroup, first_match};
use super::linguistic::{Tag, analyze};
use super::{Candidate, ParserProfile, ParserResult, settle_classification};

pub const PROFILE: ParserProfile = ParserProfile {
    name: "parseYesNo",
    min_confidence: 0.3,
    clarification_prompt: "I need a yes or no answer to continue. Can you please clarify?",
};

/// Hedges are checked before "yes" so that "not sure" never reads as "sure".
pub const GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        category: "maybe",
        keywords: &[
            "not sure",
            "dont know",
            "no idea",
            "maybe",
            "perhaps",
            "possibly",
            "unsure",
        ],
        confidence: 0.7,
    },
    KeywordGroup {
        category: "no",
        keywords: &[
            "no way",
            "not really",
            "nope",
            "nah",
            "dont want",
            "rather not",
            "no thanks",
            "skip",
        ],
        confidence: 0.9,
    },
    KeywordGroup {
        category: "yes",
        keywords: &[
            "yes",
            "yeah",
            "yep",
            "yup",
            "of course",
            "definitely",
            "absolutely",
            "sure",
        ],
        confidence: 0.9,
    },
];

fn linguistic_tier(input: &str) -> Option<Candidate> {
    let analysis = analyze(input);
    if analysis.has(Tag::Refusal) {
        Some(Candidate::new("no", 0.75, "Negative marker"))
    } else if analysis.has(Tag::Affirmative) {
        Some(Candidate::new("yes", 0.75, "Affirmative marker"))
    } else if analysis.has(Tag::Uncertain) {
        Some(Candidate::new("maybe", 0.6, "Uncertain marker"))
    } else {
        None
    }
}

/// Reads an answer as `yes`, `no` or `maybe`.
pub fn parse_yes_no(input: &str) -> ParserResult {
    settle_classification(&PROFILE, input, first_match(GROUPS, input), linguistic_tier)
}
