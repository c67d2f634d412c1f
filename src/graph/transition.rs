use crate::classifier::ParserResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric comparison against a result's confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "==")]
    Eq,
}

impl Comparison {
    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparison::Gt => lhs > rhs,
            Comparison::Ge => lhs >= rhs,
            Comparison::Lt => lhs < rhs,
            Comparison::Le => lhs <= rhs,
            Comparison::Eq => lhs == rhs,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Eq => "==",
        }
    }
}

/// Confidence as the predicates see it: clamped to `[0, 1]`, NaN read as 0.
fn bounded(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

/// A condition over a parser result.
///
/// Serialized externally tagged, e.g. `{"categoryIs": "SAFE"}` or
/// `{"anyOf": [{"valueContains": "home"}, {"valueContains": "house"}]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Predicate {
    /// The classification category equals this string exactly.
    CategoryIs(String),
    /// The extracted value contains this string, ignoring case.
    ValueContains(String),
    Confidence { op: Comparison, value: f64 },
    /// True when any sub-predicate is true. Evaluated left to right.
    AnyOf(Vec<Predicate>),
}

impl Predicate {
    pub fn category(category: impl Into<String>) -> Self {
        Predicate::CategoryIs(category.into())
    }

    pub fn value_contains(needle: impl Into<String>) -> Self {
        Predicate::ValueContains(needle.into())
    }

    pub fn confidence(op: Comparison, value: f64) -> Self {
        Predicate::Confidence { op, value }
    }

    pub fn any_of(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::AnyOf(predicates.into_iter().collect())
    }

    pub fn evaluate(&self, result: &ParserResult) -> bool {
        match self {
            Predicate::CategoryIs(expected) => result.category() == Some(expected.as_str()),
            Predicate::ValueContains(needle) => result
                .extracted_value()
                .is_some_and(|value| value.to_lowercase().contains(&needle.to_lowercase())),
            Predicate::Confidence { op, value } => op.holds(bounded(result.confidence()), *value),
            Predicate::AnyOf(predicates) => predicates.iter().any(|p| p.evaluate(result)),
        }
    }

    /// True when the predicate holds for every result. Confidence is bounded
    /// before comparison, so this covers hand-built out-of-range values too.
    pub fn is_tautology(&self) -> bool {
        match self {
            Predicate::Confidence { op, value } => match op {
                Comparison::Ge => *value <= 0.0,
                Comparison::Le => *value >= 1.0,
                Comparison::Gt => *value < 0.0,
                Comparison::Lt => *value > 1.0,
                Comparison::Eq => false,
            },
            Predicate::AnyOf(predicates) => predicates.iter().any(Predicate::is_tautology),
            Predicate::CategoryIs(_) | Predicate::ValueContains(_) => false,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::CategoryIs(category) => write!(f, "category == {category:?}"),
            Predicate::ValueContains(needle) => write!(f, "value contains {needle:?}"),
            Predicate::Confidence { op, value } => write!(f, "confidence {} {value}", op.symbol()),
            Predicate::AnyOf(predicates) => {
                f.write_str("(")?;
                for (i, p) in predicates.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" || ")?;
                    }
                    write!(f, "{p}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// One branch of a conditional transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionRule {
    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<Predicate>,
    #[serde(rename = "default", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
    pub goto: String,
}

impl ConditionRule {
    pub fn when(predicate: Predicate, goto: impl Into<String>) -> Self {
        Self {
            predicate: Some(predicate),
            is_default: false,
            goto: goto.into(),
        }
    }

    pub fn otherwise(goto: impl Into<String>) -> Self {
        Self {
            predicate: None,
            is_default: true,
            goto: goto.into(),
        }
    }

    pub fn matches(&self, result: &ParserResult) -> bool {
        self.is_default || self.predicate.as_ref().is_some_and(|p| p.evaluate(result))
    }

    /// True when this rule matches every possible result.
    pub fn always_matches(&self) -> bool {
        self.is_default || self.predicate.as_ref().is_some_and(Predicate::is_tautology)
    }
}

impl fmt::Display for ConditionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.predicate, self.is_default) {
            (_, true) => f.write_str("default"),
            (Some(p), false) => write!(f, "{p}"),
            (None, false) => f.write_str("never"),
        }
    }
}

/// How a node picks its successor.
///
/// In a definition a bare string is a direct transition and an object with a
/// `conditions` list is a conditional one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Transition {
    Direct(String),
    Conditional { conditions: Vec<ConditionRule> },
}

/// The outcome of resolving a transition against one result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'a> {
    pub target: &'a str,
    /// Index of the rule that matched, `None` for direct transitions and fallbacks.
    pub rule: Option<usize>,
    /// Set when no rule matched and the first rule's target was taken.
    pub fallback: bool,
}

impl Transition {
    pub fn direct(target: impl Into<String>) -> Self {
        Transition::Direct(target.into())
    }

    pub fn conditional(conditions: impl IntoIterator<Item = ConditionRule>) -> Self {
        Transition::Conditional {
            conditions: conditions.into_iter().collect(),
        }
    }

    pub fn as_direct(&self) -> Option<&str> {
        match self {
            Transition::Direct(target) => Some(target),
            Transition::Conditional { .. } => None,
        }
    }

    pub fn is_conditional(&self) -> bool {
        matches!(self, Transition::Conditional { .. })
    }

    /// Every node id this transition can lead to, in rule order.
    pub fn targets(&self) -> Vec<&str> {
        match self {
            Transition::Direct(target) => vec![target.as_str()],
            Transition::Conditional { conditions } => {
                conditions.iter().map(|rule| rule.goto.as_str()).collect()
            }
        }
    }

    /// Picks the successor for `result`.
    ///
    /// Conditional rules are tried in order and the first match wins. When
    /// nothing matches, the first rule's target is returned with
    /// `fallback = true`. Only an empty rule list yields `None`.
    pub fn resolve(&self, result: &ParserResult) -> Option<Resolution<'_>> {
        match self {
            Transition::Direct(target) => Some(Resolution {
                target,
                rule: None,
                fallback: false,
            }),
            Transition::Conditional { conditions } => {
                if let Some((index, rule)) = conditions
                    .iter()
                    .enumerate()
                    .find(|(_, rule)| rule.matches(result))
                {
                    return Some(Resolution {
                        target: &rule.goto,
                        rule: Some(index),
                        fallback: false,
                    });
                }
                conditions.first().map(|rule| Resolution {
                    target: &rule.goto,
                    rule: None,
                    fallback: true,
                })
            }
        }
    }
}

impl From<&str> for Transition {
    fn from(target: &str) -> Self {
        Transition::direct(target)
    }
}

impl From<Vec<ConditionRule>> for Transition {
    fn from(conditions: Vec<ConditionRule>) -> Self {
        Transition::Conditional { conditions }
    }
}
