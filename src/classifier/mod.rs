//! Rule-based semantic classifier.
//!
//! Every parser is a pure `fn(&str) -> ParserResult`. Classification parsers
//! run three tiers in order:
//!
//! 1. an ordered keyword table (first group with a contained keyword wins),
//! 2. a linguistic fallback built on [`linguistic::analyze`],
//! 3. a clarification request when neither tier reaches the parser's
//!    minimum confidence.
//!
//! Extraction parsers run an ordered list of pattern strategies with the same
//! "first success wins, then threshold" discipline.
//!
//! Nothing here holds state between calls; identical input always yields an
//! identical result, so parsers may be shared freely across sessions.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub mod activity;
pub mod keywords;
pub mod linguistic;
pub mod location;
pub mod onboarding;
mod result;
pub mod safety;
pub mod stress;
pub mod yes_no;

pub use activity::parse_activity_preference;
pub use keywords::{KeywordGroup, KeywordMatch};
pub use location::extract_location;
pub use onboarding::{
    extract_accessibility_needs, extract_change_request, extract_communication_preference,
    extract_contact, extract_duration, extract_name,
};
pub use result::{ClassificationResult, ExtractionResult, ParserResult};
pub use safety::classify_safety;
pub use stress::classify_stress;
pub use yes_no::parse_yes_no;

/// Defines `ParserType` together with its wire names and dispatch table.
macro_rules! define_parsers {
    ( $( ($variant:ident, $name:literal, $func:path) ),* $(,)? ) => {
        /// The parser a node declares for its expected answer.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum ParserType {
            $( #[serde(rename = $name)] $variant, )*
        }

        impl ParserType {
            /// Every registered parser, in declaration order.
            pub const ALL: &'static [ParserType] = &[ $( ParserType::$variant, )* ];

            /// The canonical name used in graph definitions.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( ParserType::$variant => $name, )*
                }
            }

            /// Looks a parser up by its canonical name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $name => Some(ParserType::$variant), )*
                    _ => None,
                }
            }

            /// Runs the parser on one utterance.
            pub fn parse(&self, utterance: &str) -> ParserResult {
                match self {
                    $( ParserType::$variant => $func(utterance), )*
                }
            }
        }
    };
}

define_parsers! {
    (ClassifySafety, "classifySafety", classify_safety),
    (ClassifyStress, "classifyStress", classify_stress),
    (ExtractLocation, "extractLocation", extract_location),
    (ParseYesNo, "parseYesNo", parse_yes_no),
    (ParseActivityPreference, "parseActivityPreference", parse_activity_preference),
    (ExtractName, "extractName", extract_name),
    (ExtractDuration, "extractDuration", extract_duration),
    (ExtractAccessibilityNeeds, "extractAccessibilityNeeds", extract_accessibility_needs),
    (ExtractCommunicationPreference, "extractCommunicationPreference", extract_communication_preference),
    (ExtractContact, "extractContact", extract_contact),
    (ExtractChangeRequest, "extractChangeRequest", extract_change_request),
}

impl fmt::Display for ParserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs `parser` on `utterance`.
pub fn classify(parser: ParserType, utterance: &str) -> ParserResult {
    parser.parse(utterance)
}

/// Per-parser constants for the low-confidence tier.
#[derive(Debug, Clone, Copy)]
pub struct ParserProfile {
    pub name: &'static str,
    pub min_confidence: f64,
    pub clarification_prompt: &'static str,
}

/// A category proposed by the linguistic tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub category: &'static str,
    pub confidence: f64,
    pub reasoning: String,
}

impl Candidate {
    pub fn new(category: &'static str, confidence: f64, reasoning: impl Into<String>) -> Self {
        Self {
            category,
            confidence,
            reasoning: reasoning.into(),
        }
    }
}

/// A value proposed by one extraction strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub value: String,
    pub confidence: f64,
    pub method: &'static str,
}

impl Extraction {
    pub fn new(value: impl Into<String>, confidence: f64, method: &'static str) -> Self {
        Self {
            value: value.into(),
            confidence,
            method,
        }
    }
}

/// One ordered extraction strategy.
pub type Strategy = fn(&str) -> Option<Extraction>;

/// Settles a classification: keyword tier, then linguistic tier, then clarification.
pub(crate) fn settle_classification(
    profile: &ParserProfile,
    input: &str,
    keyword_hit: Option<KeywordMatch>,
    linguistic: impl FnOnce(&str) -> Option<Candidate>,
) -> ParserResult {
    if let Some(hit) = keyword_hit.filter(|h| h.confidence >= profile.min_confidence) {
        debug!(
            parser = profile.name,
            keyword = hit.keyword,
            category = hit.category,
            "keyword tier matched"
        );
        return ParserResult::classified(
            hit.category,
            hit.confidence,
            format!("Keyword match: {}", hit.keyword),
        );
    }

    let candidate = linguistic(input);
    match candidate {
        Some(c) if c.confidence >= profile.min_confidence => {
            debug!(
                parser = profile.name,
                category = c.category,
                confidence = c.confidence,
                "linguistic tier matched"
            );
            ParserResult::classified(c.category, c.confidence, c.reasoning)
        }
        rejected => {
            debug!(parser = profile.name, "no tier reached the threshold, asking to clarify");
            ParserResult::Classification(ClassificationResult {
                category: None,
                confidence: rejected.as_ref().map_or(0.0, |c| c.confidence),
                reasoning: Some(rejected.map_or_else(
                    || "No keyword or linguistic signal".to_string(),
                    |c| format!("Below threshold: {}", c.reasoning),
                )),
                needs_clarification: true,
                clarification_prompt: Some(profile.clarification_prompt.to_string()),
            })
        }
    }
}

/// Settles an extraction: the first strategy yielding a non-empty value wins,
/// provided it reaches the threshold.
pub(crate) fn settle_extraction(
    profile: &ParserProfile,
    information_type: &str,
    input: &str,
    strategies: &[Strategy],
) -> ParserResult {
    let found = strategies
        .iter()
        .find_map(|strategy| strategy(input).filter(|e| !e.value.trim().is_empty()));

    match found {
        Some(e) if e.confidence >= profile.min_confidence => {
            debug!(
                parser = profile.name,
                method = e.method,
                value = %e.value,
                "extraction strategy matched"
            );
            ParserResult::extracted(e.value, e.confidence, information_type, e.method)
        }
        rejected => {
            debug!(parser = profile.name, "no extraction reached the threshold, asking to clarify");
            ParserResult::Extraction(ExtractionResult {
                extracted_value: None,
                confidence: rejected.as_ref().map_or(0.0, |e| e.confidence),
                information_type: Some(information_type.to_string()),
                extraction_method: rejected.map(|e| e.method.to_string()),
                needs_clarification: true,
                clarification_prompt: Some(profile.clarification_prompt.to_string()),
            })
        }
    }
}
