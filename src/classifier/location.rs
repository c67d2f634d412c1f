use std::sync::LazyLock;

use regex::Regex;

use super::linguistic::{Token, analyze, normalize, tokenize};
use super::{Extraction, ParserProfile, ParserResult, Strategy, settle_extraction};

pub const PROFILE: ParserProfile = ParserProfile {
    name: "extractLocation",
    min_confidence: 0.3,
    clarification_prompt: "Where exactly are you right now? For example: at home, in a shelter, or somewhere else?",
};

pub const INFORMATION_TYPE: &str = "location";

/// Known place names, matched case-insensitively and returned as written here.
const PLACE_NAMES: &[&str] = &[
    "Tel Aviv",
    "Jerusalem",
    "Haifa",
    "Beer Sheva",
    "Beersheba",
    "Ashdod",
    "Ashkelon",
    "Netanya",
    "Rishon LeZion",
    "Petah Tikva",
    "Holon",
    "Bat Yam",
    "Ramat Gan",
    "Herzliya",
    "Rehovot",
    "Sderot",
    "Eilat",
    "Nazareth",
    "Tiberias",
    "Nahariya",
    "Kiryat Shmona",
    "Modiin",
];

/// Words that open a locative phrase.
const LOCATIVE_PREPOSITIONS: &[&str] = &[
    "at", "in", "from", "on", "inside", "near", "by", "under", "into", "behind",
];

/// Words that end a locative phrase.
const PHRASE_BREAKS: &[&str] = &[
    "at", "in", "from", "on", "inside", "near", "by", "under", "into", "behind", "with", "to",
    "of", "for", "and", "or", "but", "so", "because", "while", "when", "right", "now", "is",
    "am", "are", "was",
];

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "my", "our", "his", "her", "their", "your", "this", "that", "some",
];

/// Heads that follow a preposition without naming a place ("in danger", "on my way").
const NON_PLACES: &[&str] = &[
    "danger", "trouble", "pain", "shock", "panic", "fear", "risk", "lot", "mind", "moment",
    "time", "way", "general", "fact", "case", "control", "love", "bed", "myself", "me", "you",
    "it", "us", "them", "here", "there", "hurry", "rush", "tears", "charge", "total",
];

const MAX_PHRASE_WORDS: usize = 4;

/// Common place nouns, multi-word forms first.
const LOCATION_NOUNS: &[&str] = &[
    "safe room",
    "protected room",
    "reinforced room",
    "bomb shelter",
    "public shelter",
    "parking lot",
    "mamad",
    "miklat",
    "shelter",
    "bunker",
    "stairwell",
    "stairway",
    "staircase",
    "stairs",
    "basement",
    "home",
    "house",
    "apartment",
    "flat",
    "office",
    "work",
    "building",
    "hospital",
    "school",
    "car",
    "bus",
    "train",
    "street",
    "park",
    "outside",
];

/// Words with no locative content of their own.
const STOPWORDS: &[&str] = &[
    "i", "im", "am", "is", "are", "was", "the", "a", "an", "and", "or", "but", "so", "just",
    "right", "now", "here", "there", "it", "its", "me", "my", "you", "we", "um", "uh", "hmm",
    "hm", "well", "idk", "dont", "know", "not", "sure", "yes", "no", "ok", "okay",
];

static ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b\d+(?:st|nd|rd|th)?(?:\s+[a-z]+){0,2}?\s+(?:street|road|avenue|boulevard|lane|drive|st|rd|ave|blvd)\b",
    )
    .expect("address pattern is valid")
});

static CLAUSE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,.;:!?()\n]").expect("clause pattern is valid"));

fn place_name(input: &str) -> Option<Extraction> {
    let text = normalize(input);
    PLACE_NAMES
        .iter()
        .find(|place| contains_phrase(&text, &normalize(place)))
        .map(|place| Extraction::new(*place, 0.9, "place_name"))
}

fn locative_phrase(input: &str) -> Option<Extraction> {
    CLAUSE_BREAK
        .split(input)
        .map(tokenize)
        .find_map(|tokens| phrase_in_clause(&tokens))
        .map(|phrase| Extraction::new(phrase, 0.85, "prepositional_phrase"))
}

fn phrase_in_clause(tokens: &[Token]) -> Option<String> {
    tokens.iter().enumerate().find_map(|(i, token)| {
        if !LOCATIVE_PREPOSITIONS.contains(&token.norm.as_str()) {
            return None;
        }
        let words: Vec<&str> = tokens[i + 1..]
            .iter()
            .skip_while(|t| DETERMINERS.contains(&t.norm.as_str()))
            .take_while(|t| !PHRASE_BREAKS.contains(&t.norm.as_str()))
            .take(MAX_PHRASE_WORDS)
            .map(|t| t.text.as_str())
            .collect();
        let head = words.first()?;
        if NON_PLACES.contains(&normalize(head).as_str()) {
            return None;
        }
        Some(words.join(" "))
    })
}

fn location_noun(input: &str) -> Option<Extraction> {
    let text = normalize(input);
    LOCATION_NOUNS
        .iter()
        .find(|noun| contains_phrase(&text, noun))
        .map(|noun| Extraction::new(*noun, 0.8, "location_noun"))
}

fn address(input: &str) -> Option<Extraction> {
    ADDRESS
        .find(input)
        .map(|m| Extraction::new(m.as_str(), 0.75, "address_pattern"))
}

fn full_text(input: &str) -> Option<Extraction> {
    let analysis = analyze(input);
    let has_content = analysis
        .tokens
        .iter()
        .any(|t| !STOPWORDS.contains(&t.norm.as_str()));
    let confidence = if has_content && !analysis.is_only_filler() {
        0.5
    } else {
        0.2
    };
    Some(Extraction::new(input.trim(), confidence, "full_text"))
}

/// Whole-word containment on already normalised text.
fn contains_phrase(text: &str, phrase: &str) -> bool {
    text.match_indices(phrase).any(|(start, _)| {
        let end = start + phrase.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

const STRATEGIES: &[Strategy] = &[place_name, locative_phrase, location_noun, address, full_text];

/// Pulls a location out of a free-text answer.
///
/// Strategies run from most to least specific: known place names, a phrase
/// after a locative preposition, a common location noun, a street address,
/// and finally the whole answer.
pub fn extract_location(input: &str) -> ParserResult {
    settle_extraction(&PROFILE, INFORMATION_TYPE, input, STRATEGIES)
}
