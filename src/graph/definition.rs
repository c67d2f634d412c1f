use super::{GraphId, NodeKind, Transition};
use crate::error::GraphError;
use serde::{Deserialize, Serialize};

/// The loose, serde-loadable description of a graph, ready for compilation.
///
/// Parser names are still plain strings here; the compiler resolves them and
/// checks every structural rule before a [`DialogueGraph`](super::DialogueGraph)
/// exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDefinition {
    #[serde(default)]
    pub id: GraphId,
    #[serde(alias = "startNode")]
    pub start: String,
    pub nodes: Vec<NodeDefinition>,
}

/// Defines a single node of a graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDefinition {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Transition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<String>,
}

impl NodeDefinition {
    pub fn question(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Question,
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn activity(
        id: impl Into<String>,
        content: impl Into<String>,
        activity: impl Into<String>,
        return_node: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Activity,
            content: content.into(),
            next: Some(Transition::direct(return_node)),
            activity: Some(activity.into()),
            ..Default::default()
        }
    }

    pub fn end(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::End,
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_next(mut self, next: impl Into<Transition>) -> Self {
        self.next = Some(next.into());
        self
    }

    pub fn with_parser(mut self, parser: impl Into<String>) -> Self {
        self.parser = Some(parser.into());
        self
    }

    pub fn with_capture(mut self, variable: impl Into<String>) -> Self {
        self.capture = Some(variable.into());
        self
    }
}

impl GraphDefinition {
    pub fn new(id: GraphId, start: impl Into<String>, nodes: Vec<NodeDefinition>) -> Self {
        Self {
            id,
            start: start.into(),
            nodes,
        }
    }

    /// Parses the JSON node table format.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        serde_json::from_str(json).map_err(|e| GraphError::Json(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, GraphError> {
        serde_json::to_string_pretty(self).map_err(|e| GraphError::Json(e.to_string()))
    }
}

/// A trait for host data models that can be converted into a [`GraphDefinition`].
///
/// Implement this on your own conversation format to feed it to the
/// [`GraphCompiler`](crate::compiler::GraphCompiler).
///
/// # Example
///
/// ```rust
/// use calme::prelude::*;
///
/// struct Script {
///     lines: Vec<(String, String)>,
/// }
///
/// impl IntoGraph for Script {
///     fn into_graph(self) -> Result<GraphDefinition, GraphError> {
///         let ids: Vec<String> = self.lines.iter().map(|(id, _)| id.clone()).collect();
///         let mut nodes = Vec::new();
///         for (i, (id, text)) in self.lines.into_iter().enumerate() {
///             nodes.push(match ids.get(i + 1) {
///                 Some(next) => NodeDefinition::question(id, text).with_next(next.as_str()),
///                 None => NodeDefinition::end(id, text),
///             });
///         }
///         let start = ids.first().cloned().unwrap_or_default();
///         Ok(GraphDefinition::new(GraphId::Main, start, nodes))
///     }
/// }
///
/// let script = Script {
///     lines: vec![
///         ("hello".into(), "Hello.".into()),
///         ("bye".into(), "Goodbye.".into()),
///     ],
/// };
/// let graph = GraphCompiler::builder(script).build().compile().unwrap();
/// assert_eq!(graph.start(), "hello");
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into a graph definition.
    fn into_graph(self) -> Result<GraphDefinition, GraphError>;
}

impl IntoGraph for GraphDefinition {
    fn into_graph(self) -> Result<GraphDefinition, GraphError> {
        Ok(self)
    }
}
