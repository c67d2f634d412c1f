//! Extractors for the first-run profile questions.

use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

use super::keywords::{KeywordGroup, all_matches, first_match};
use super::linguistic::{analyze, normalize, tokenize};
use super::{Extraction, ParserProfile, ParserResult, Strategy, settle_extraction};

const MIN_CONFIDENCE: f64 = 0.3;

const fn profile(name: &'static str, clarification_prompt: &'static str) -> ParserProfile {
    ParserProfile {
        name,
        min_confidence: MIN_CONFIDENCE,
        clarification_prompt,
    }
}

pub const NAME_PROFILE: ParserProfile =
    profile("extractName", "Sorry, I didn't catch that. What name should I use for you?");
pub const DURATION_PROFILE: ParserProfile = profile(
    "extractDuration",
    "About how long does it take you to get there? For example: 30 seconds, 1 minute, 2 minutes?",
);
pub const ACCESSIBILITY_PROFILE: ParserProfile = profile(
    "extractAccessibilityNeeds",
    "Do you need any special assistance during emergencies? You can also say none.",
);
pub const COMMUNICATION_PROFILE: ParserProfile = profile(
    "extractCommunicationPreference",
    "Would you prefer voice instructions, visual text, or both?",
);
pub const CONTACT_PROFILE: ParserProfile =
    profile("extractContact", "Who should I notify? A name and phone number is enough.");
pub const CHANGE_PROFILE: ParserProfile = profile(
    "extractChangeRequest",
    "Which part would you like to change: your name, safe space, time, accessibility or calming method?",
);

static NAME_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:my\s+name\s+is|my\s+name['’]?s|call\s+me|i\s+am|i['’]?m|this\s+is|it['’]?s)\s+(\p{L}[\p{L}'’\-]*)",
    )
    .expect("name pattern is valid")
});

/// Words that can follow "I'm" or open a sentence without being a name.
const NOT_A_NAME: &[&str] = &[
    "i", "im", "my", "me", "the", "a", "an", "hi", "hello", "hey", "call", "it", "its", "this",
    "yes", "no", "ok", "okay", "name", "just", "so", "very", "not", "fine", "good", "here",
    "ready", "sure", "scared", "feeling", "called", "please", "well", "thanks", "at", "in", "on",
    "from", "home",
];

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_name_word(word: &str) -> bool {
    !NOT_A_NAME.contains(&normalize(word).as_str())
}

fn introduced_name(input: &str) -> Option<Extraction> {
    NAME_PHRASE
        .captures_iter(input)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|word| is_name_word(word))
        .map(|word| Extraction::new(capitalize(word), 0.9, "introduction_phrase"))
}

fn capitalized_word(input: &str) -> Option<Extraction> {
    tokenize(input)
        .into_iter()
        .find(|t| t.text.chars().next().is_some_and(char::is_uppercase) && is_name_word(&t.text))
        .map(|t| Extraction::new(t.text, 0.8, "capitalized_word"))
}

fn short_answer(input: &str) -> Option<Extraction> {
    let analysis = analyze(input);
    let words: Vec<&str> = analysis
        .tokens
        .iter()
        .map(|t| t.text.as_str())
        .filter(|w| is_name_word(w))
        .collect();
    let has_number = analysis
        .tokens
        .iter()
        .any(|t| t.text.chars().all(|c| c.is_ascii_digit()));
    if has_number || words.is_empty() || words.len() > 3 || analysis.is_only_filler() {
        return None;
    }
    Some(Extraction::new(
        words.iter().map(|w| capitalize(w)).join(" "),
        0.6,
        "short_answer",
    ))
}

const NAME_STRATEGIES: &[Strategy] = &[introduced_name, capitalized_word, short_answer];

/// Pulls the name the user wants to be called.
pub fn extract_name(input: &str) -> ParserResult {
    settle_extraction(&NAME_PROFILE, "name", input, NAME_STRATEGIES)
}

static MINUTE_AND_A_HALF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:a|one)?\s*minute\s+and\s+a\s+half\b").expect("duration pattern is valid")
});
static HALF_A_MINUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\bhalf|½)\s*(?:a\s+)?minute\b").expect("duration pattern is valid")
});
static NUMERIC_MINUTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(?:minutes?|mins?|m)\b").expect("duration pattern is valid")
});
static NUMERIC_SECONDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(?:seconds?|secs?|s)\b").expect("duration pattern is valid")
});
static WORD_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(a|an|one|two|three|four|five|ten|fifteen|twenty|thirty|forty|fifty|sixty)\s+(seconds?|minutes?)\b",
    )
    .expect("duration pattern is valid")
});

fn word_number(word: &str) -> Option<u32> {
    let n = match word.to_lowercase().as_str() {
        "a" | "an" | "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "ten" => 10,
        "fifteen" => 15,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        _ => return None,
    };
    Some(n)
}

/// Rounds to the nearest whole unit; the cast saturates.
fn whole(amount: f64) -> u32 {
    amount.round() as u32
}

fn unit_phrase(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Resolves a spoken duration to a canonical phrase such as `"90 seconds"`.
fn canonical_duration(input: &str) -> Option<(String, u32)> {
    if MINUTE_AND_A_HALF.is_match(input) {
        return Some(("90 seconds".to_string(), 90));
    }
    if HALF_A_MINUTE.is_match(input) {
        return Some(("30 seconds".to_string(), 30));
    }
    if let Some(minutes) = NUMERIC_MINUTES
        .captures(input)
        .and_then(|caps| caps[1].parse::<f64>().ok())
    {
        if minutes.fract() == 0.0 {
            let n = whole(minutes);
            return Some((unit_phrase(n, "minute"), n.saturating_mul(60)));
        }
        let secs = whole(minutes * 60.0);
        return Some((unit_phrase(secs, "second"), secs));
    }
    if let Some(seconds) = NUMERIC_SECONDS
        .captures(input)
        .and_then(|caps| caps[1].parse::<f64>().ok())
    {
        let secs = whole(seconds);
        return Some((unit_phrase(secs, "second"), secs));
    }
    let caps = WORD_QUANTITY.captures(input)?;
    let n = word_number(&caps[1])?;
    if caps[2].to_lowercase().starts_with("minute") {
        Some((unit_phrase(n, "minute"), n.saturating_mul(60)))
    } else {
        Some((unit_phrase(n, "second"), n))
    }
}

/// Seconds in a duration phrase, if one is recognised.
pub fn duration_seconds(input: &str) -> Option<u32> {
    canonical_duration(input).map(|(_, secs)| secs)
}

fn duration_pattern(input: &str) -> Option<Extraction> {
    canonical_duration(input).map(|(phrase, _)| Extraction::new(phrase, 0.9, "duration_pattern"))
}

fn raw_duration(input: &str) -> Option<Extraction> {
    Some(Extraction::new(input.trim(), 0.5, "full_text"))
}

const DURATION_STRATEGIES: &[Strategy] = &[duration_pattern, raw_duration];

/// Pulls how long it takes to reach safety.
pub fn extract_duration(input: &str) -> ParserResult {
    settle_extraction(&DURATION_PROFILE, "duration", input, DURATION_STRATEGIES)
}

/// Value reported when no need is mentioned.
pub const NO_NEEDS: &str = "none";

const fn need(category: &'static str, keywords: &'static [&'static str]) -> KeywordGroup {
    KeywordGroup {
        category,
        keywords,
        confidence: 0.8,
    }
}

pub const ACCESSIBILITY_GROUPS: &[KeywordGroup] = &[
    need("mobility", &["wheelchair", "walk", "move", "mobility", "slow", "crutches", "cane"]),
    need("hearing", &["deaf", "hearing", "sound", "audio"]),
    need("vision", &["blind", "vision", "sight", "visual"]),
    need("cognitive", &["simple", "confused", "repeat", "clear"]),
    need("medical", &["medication", "medical", "condition", "insulin", "inhaler"]),
    need("dependents", &["children", "kids", "baby", "elderly", "pets", "family"]),
];

fn listed_needs(input: &str) -> Option<Extraction> {
    let needs = all_matches(ACCESSIBILITY_GROUPS, input);
    if needs.is_empty() {
        return None;
    }
    Some(Extraction::new(needs.iter().join(", "), 0.8, "keyword"))
}

fn no_needs(input: &str) -> Option<Extraction> {
    tokenize(input)
        .first()
        .map(|_| Extraction::new(NO_NEEDS, 0.8, "none_detected"))
}

const ACCESSIBILITY_STRATEGIES: &[Strategy] = &[listed_needs, no_needs];

/// Lists every accessibility need mentioned, comma separated, or `"none"`.
pub fn extract_accessibility_needs(input: &str) -> ParserResult {
    settle_extraction(
        &ACCESSIBILITY_PROFILE,
        "accessibility",
        input,
        ACCESSIBILITY_STRATEGIES,
    )
}

pub const COMMUNICATION_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        category: "both",
        keywords: &["both", "either", "all of"],
        confidence: 0.85,
    },
    KeywordGroup {
        category: "audio",
        keywords: &["voice", "audio", "sound", "speak", "hear", "spoken", "talk"],
        confidence: 0.85,
    },
    KeywordGroup {
        category: "visual",
        keywords: &["text", "visual", "read", "screen", "written", "see"],
        confidence: 0.85,
    },
];

fn stated_channel(input: &str) -> Option<Extraction> {
    first_match(COMMUNICATION_GROUPS, input)
        .map(|hit| Extraction::new(hit.category, hit.confidence, "keyword"))
}

fn default_channel(input: &str) -> Option<Extraction> {
    tokenize(input)
        .first()
        .map(|_| Extraction::new("both", 0.5, "default"))
}

const COMMUNICATION_STRATEGIES: &[Strategy] = &[stated_channel, default_channel];

/// Reads the preferred channel as `audio`, `visual` or `both`.
pub fn extract_communication_preference(input: &str) -> ParserResult {
    settle_extraction(
        &COMMUNICATION_PROFILE,
        "communication",
        input,
        COMMUNICATION_STRATEGIES,
    )
}

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\s\-()]{5,}\d").expect("phone pattern is valid"));

/// The first phone-number-like run of digits in `input`.
pub fn phone_number(input: &str) -> Option<&str> {
    PHONE.find(input).map(|m| m.as_str())
}

fn contact_with_phone(input: &str) -> Option<Extraction> {
    phone_number(input).map(|_| Extraction::new(input.trim(), 0.9, "phone_pattern"))
}

fn contact_text(input: &str) -> Option<Extraction> {
    if analyze(input).is_only_filler() {
        return None;
    }
    Some(Extraction::new(input.trim(), 0.7, "full_text"))
}

const CONTACT_STRATEGIES: &[Strategy] = &[contact_with_phone, contact_text];

/// Keeps the emergency contact as given, preferring answers with a phone number.
pub fn extract_contact(input: &str) -> ParserResult {
    settle_extraction(&CONTACT_PROFILE, "contact", input, CONTACT_STRATEGIES)
}

pub const CHANGE_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        category: "name",
        keywords: &["name", "call me"],
        confidence: 0.8,
    },
    KeywordGroup {
        category: "location",
        keywords: &["location", "space", "place", "shelter", "room", "where"],
        confidence: 0.8,
    },
    KeywordGroup {
        category: "time",
        keywords: &["time", "how long", "minute", "second", "duration"],
        confidence: 0.8,
    },
    KeywordGroup {
        category: "accessibility",
        keywords: &["access", "assistance", "special needs", "disability"],
        confidence: 0.8,
    },
    KeywordGroup {
        category: "calming",
        keywords: &["calm", "breathing", "relax", "method"],
        confidence: 0.8,
    },
    KeywordGroup {
        category: "communication",
        keywords: &["communicat", "voice", "text", "contact"],
        confidence: 0.8,
    },
];

fn named_section(input: &str) -> Option<Extraction> {
    first_match(CHANGE_GROUPS, input)
        .map(|hit| Extraction::new(hit.category, hit.confidence, "keyword"))
}

fn general_change(input: &str) -> Option<Extraction> {
    tokenize(input)
        .first()
        .map(|_| Extraction::new("general", 0.7, "default"))
}

const CHANGE_STRATEGIES: &[Strategy] = &[named_section, general_change];

/// Works out which profile section the user wants to revisit.
pub fn extract_change_request(input: &str) -> ParserResult {
    settle_extraction(&CHANGE_PROFILE, "change_request", input, CHANGE_STRATEGIES)
}
