use super::keywords::{KeywordGroup, first_match};
use super::linguistic::normalize;
use super::{Candidate, ParserProfile, ParserResult, parse_yes_no, settle_classification};

pub const PROFILE: ParserProfile = ParserProfile {
    name: "parseActivityPreference",
    min_confidence: 0.3,
    clarification_prompt: "Would you like to try breathing exercises, stretching, or perhaps a matching game?",
};

/// Activities a host can launch, in the order they are suggested.
pub const ACTIVITY_CATALOG: &[&str] = &[
    "breathing",
    "stretching",
    "matching-cards",
    "sudoku",
    "puzzle",
    "paint",
    "grounding",
    "music",
    "story",
];

/// The category returned when the user declines every activity.
pub const NO_ACTIVITY: &str = "no_activity";

const fn group(category: &'static str, keywords: &'static [&'static str]) -> KeywordGroup {
    KeywordGroup {
        category,
        keywords,
        confidence: 0.85,
    }
}

pub const GROUPS: &[KeywordGroup] = &[
    group("breathing", &["breath", "breathing", "breathe"]),
    group("stretching", &["stretch", "stretching", "exercise"]),
    group("matching-cards", &["game", "match", "play", "cards", "memory"]),
    group("sudoku", &["sudoku", "numbers", "puzzle", "logic"]),
    group("puzzle", &["jigsaw", "piece", "pieces"]),
    group("paint", &["draw", "drawing", "paint", "painting", "creative", "color"]),
    group("grounding", &["grounding", "ground", "5-4-3-2-1"]),
    group("music", &["music", "song", "listen", "audio", "sound"]),
    group("story", &["story", "tale", "narrative", "talking"]),
];

fn decline_tier(input: &str) -> Option<Candidate> {
    let text = normalize(input);
    let declined = parse_yes_no(input).category() == Some("no")
        || text.contains("nothing")
        || text.contains("none");
    declined.then(|| Candidate::new(NO_ACTIVITY, 0.8, "User declined activity"))
}

/// Maps a request to one of [`ACTIVITY_CATALOG`], or `no_activity`.
pub fn parse_activity_preference(input: &str) -> ParserResult {
    settle_classification(&PROFILE, input, first_match(GROUPS, input), decline_tier)
}
