use super::{DialogueGraph, NodeKind, Transition};
use std::fmt;

/// Renders a compiled graph as a Mermaid `flowchart` diagram.
///
/// ```rust
/// use calme::prelude::*;
///
/// let graphs = GraphSet::builtin().unwrap();
/// let diagram = MermaidDiagram::new(graphs.get(GraphId::Alert)).to_string();
/// assert!(diagram.starts_with("flowchart TD"));
/// ```
pub struct MermaidDiagram<'a> {
    graph: &'a DialogueGraph,
}

impl<'a> MermaidDiagram<'a> {
    pub fn new(graph: &'a DialogueGraph) -> Self {
        Self { graph }
    }
}

/// Mermaid labels cannot contain quotes or line breaks.
fn label(text: &str, max_chars: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| match c {
            '"' => '\'',
            '\n' | '\r' => ' ',
            other => other,
        })
        .collect();
    let mut chars = flat.chars();
    let short: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{short}...")
    } else {
        short
    }
}

impl fmt::Display for MermaidDiagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "flowchart TD")?;
        writeln!(f, "    %% {} graph, start: {}", self.graph.id(), self.graph.start())?;

        for node in self.graph.nodes() {
            let text = label(&node.content, 40);
            match node.kind {
                NodeKind::Question => writeln!(f, "    {}[\"{}\"]", node.id, text)?,
                NodeKind::Activity => writeln!(
                    f,
                    "    {}[[\"{}: {}\"]]",
                    node.id,
                    node.activity.as_deref().unwrap_or_default(),
                    text
                )?,
                NodeKind::End => writeln!(f, "    {}([\"{}\"])", node.id, text)?,
            }
        }

        for node in self.graph.nodes() {
            match &node.next {
                Some(Transition::Direct(target)) => writeln!(f, "    {} --> {}", node.id, target)?,
                Some(Transition::Conditional { conditions }) => {
                    for rule in conditions {
                        writeln!(
                            f,
                            "    {} -->|\"{}\"| {}",
                            node.id,
                            label(&rule.to_string(), 60),
                            rule.goto
                        )?;
                    }
                }
                None => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_flattened_and_truncated() {
        assert_eq!(label("a \"b\"\nc", 40), "a 'b' c");
        assert_eq!(label("abcdef", 3), "abc...");
        assert_eq!(label("abc", 3), "abc");
    }
}
