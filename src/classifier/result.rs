use serde::{Deserialize, Serialize};

/// A categorical reading of an utterance, e.g. `SAFE` or `HIGH_STRESS`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub needs_clarification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarification_prompt: Option<String>,
}

/// A value pulled out of an utterance, e.g. a location or a duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_value: Option<String>,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub information_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_method: Option<String>,
    #[serde(default)]
    pub needs_clarification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarification_prompt: Option<String>,
}

/// The output of any parser, the only shape the engine branches on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ParserResult {
    Classification(ClassificationResult),
    Extraction(ExtractionResult),
}

impl ParserResult {
    /// A confident, empty result. Used to step through nodes that ask nothing.
    pub fn acknowledged() -> Self {
        ParserResult::Classification(ClassificationResult {
            confidence: 1.0,
            reasoning: Some("Acknowledged".to_string()),
            ..Default::default()
        })
    }

    /// Builds a classification result with the given category.
    pub fn classified(category: &str, confidence: f64, reasoning: impl Into<String>) -> Self {
        ParserResult::Classification(ClassificationResult {
            category: Some(category.to_string()),
            confidence,
            reasoning: Some(reasoning.into()),
            ..Default::default()
        })
    }

    /// Builds an extraction result carrying `value`.
    pub fn extracted(
        value: impl Into<String>,
        confidence: f64,
        information_type: &str,
        method: &str,
    ) -> Self {
        ParserResult::Extraction(ExtractionResult {
            extracted_value: Some(value.into()),
            confidence,
            information_type: Some(information_type.to_string()),
            extraction_method: Some(method.to_string()),
            ..Default::default()
        })
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            ParserResult::Classification(c) => c.category.as_deref(),
            ParserResult::Extraction(_) => None,
        }
    }

    pub fn extracted_value(&self) -> Option<&str> {
        match self {
            ParserResult::Classification(_) => None,
            ParserResult::Extraction(e) => e.extracted_value.as_deref(),
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            ParserResult::Classification(c) => c.confidence,
            ParserResult::Extraction(e) => e.confidence,
        }
    }

    pub fn needs_clarification(&self) -> bool {
        match self {
            ParserResult::Classification(c) => c.needs_clarification,
            ParserResult::Extraction(e) => e.needs_clarification,
        }
    }

    pub fn clarification_prompt(&self) -> Option<&str> {
        match self {
            ParserResult::Classification(c) => c.clarification_prompt.as_deref(),
            ParserResult::Extraction(e) => e.clarification_prompt.as_deref(),
        }
    }

    /// The value a node's `capture` stores: the extracted value for
    /// extractions, the category for classifications. Empty values yield `None`.
    pub fn captured_value(&self) -> Option<&str> {
        let value = match self {
            ParserResult::Classification(c) => c.category.as_deref(),
            ParserResult::Extraction(e) => e.extracted_value.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

impl From<ClassificationResult> for ParserResult {
    fn from(result: ClassificationResult) -> Self {
        ParserResult::Classification(result)
    }
}

impl From<ExtractionResult> for ParserResult {
    fn from(result: ExtractionResult) -> Self {
        ParserResult::Extraction(result)
    }
}
