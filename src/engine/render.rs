use crate::classifier::ParserType;
use crate::graph::{ConversationNode, NodeKind, Transition};
use ahash::AHashMap;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
});

/// Replaces every `{name}` with its variable. Unknown names stay as written.
pub fn substitute(template: &str, variables: &AHashMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match variables.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// A node as the host shows it: content with variables filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderableNode {
    pub id: String,
    pub kind: NodeKind,
    pub content: String,
    pub next: Option<Transition>,
    pub parser: Option<ParserType>,
    pub activity: Option<String>,
    /// Set on the transient re-ask node produced for a low-confidence answer.
    pub clarification: bool,
}

impl RenderableNode {
    pub(crate) fn render(node: &ConversationNode, variables: &AHashMap<String, String>) -> Self {
        Self {
            id: node.id.clone(),
            kind: node.kind,
            content: substitute(&node.content, variables),
            next: node.next.clone(),
            parser: node.parser,
            activity: node.activity.clone(),
            clarification: false,
        }
    }

    /// The transient node that re-asks `node` with `prompt`.
    pub(crate) fn clarify(
        node: &ConversationNode,
        prompt: &str,
        variables: &AHashMap<String, String>,
    ) -> Self {
        Self {
            id: format!("{}_clarify", node.id),
            kind: NodeKind::Question,
            content: substitute(prompt, variables),
            next: node.next.clone(),
            parser: node.parser,
            activity: None,
            clarification: true,
        }
    }

    pub fn is_end(&self) -> bool {
        self.kind == NodeKind::End
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> AHashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn known_placeholders_are_replaced_everywhere() {
        let v = vars(&[("name", "Dana")]);
        assert_eq!(substitute("{name}, {name}!", &v), "Dana, Dana!");
    }

    #[test]
    fn unknown_placeholders_are_left_verbatim() {
        let v = vars(&[("name", "Dana")]);
        assert_eq!(
            substitute("{name} is at {safeSpace}", &v),
            "Dana is at {safeSpace}"
        );
    }

    #[test]
    fn substituted_values_are_not_expanded_again() {
        let v = vars(&[("a", "{b}"), ("b", "x")]);
        assert_eq!(substitute("{a}", &v), "{b}");
    }

    #[test]
    fn braces_that_are_not_placeholders_survive() {
        assert_eq!(substitute("{ not one } {}", &AHashMap::new()), "{ not one } {}");
    }
}
