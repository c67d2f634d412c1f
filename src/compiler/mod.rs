//! Turns a [`GraphDefinition`] into a validated [`DialogueGraph`].
//!
//! Compilation runs once, at load time: parser names are resolved through the
//! [`ParserRegistry`], then the static validator rejects anything that could
//! stall or crash a conversation later.

use crate::classifier::ParserType;
use crate::error::GraphError;
use crate::graph::{ConversationNode, DialogueGraph, GraphDefinition, IntoGraph, NodeDefinition};
use ahash::AHashSet;
use tracing::debug;

pub mod parsing;
mod validator;

pub use parsing::ParserRegistry;

pub struct GraphCompiler {
    definition: Result<GraphDefinition, GraphError>,
    registry: ParserRegistry,
}

pub struct GraphCompilerBuilder {
    definition: Result<GraphDefinition, GraphError>,
    registry: ParserRegistry,
}

impl GraphCompilerBuilder {
    pub fn new(source: impl IntoGraph) -> Self {
        Self {
            definition: source.into_graph(),
            registry: ParserRegistry::default(),
        }
    }

    /// Lets definitions refer to `parser` by a host-specific name.
    pub fn with_parser_alias(mut self, name: &str, parser: ParserType) -> Self {
        self.registry.alias(name, parser);
        self
    }

    pub fn build(self) -> GraphCompiler {
        GraphCompiler {
            definition: self.definition,
            registry: self.registry,
        }
    }
}

impl GraphCompiler {
    pub fn builder(source: impl IntoGraph) -> GraphCompilerBuilder {
        GraphCompilerBuilder::new(source)
    }

    pub fn compile(self) -> Result<DialogueGraph, GraphError> {
        let definition = self.definition?;

        let mut seen = AHashSet::new();
        let mut nodes = Vec::with_capacity(definition.nodes.len());
        for node in definition.nodes {
            if !seen.insert(node.id.clone()) {
                return Err(GraphError::DuplicateNode(node.id));
            }
            nodes.push(self.registry.lower(node)?);
        }

        let graph = DialogueGraph::from_parts(definition.id, definition.start, nodes);
        validator::validate(&graph)?;
        validator::warn_unreachable(&graph);

        debug!(graph = %graph.id(), nodes = graph.len(), start = graph.start(), "compiled graph");
        Ok(graph)
    }
}

impl ParserRegistry {
    fn lower(&self, node: NodeDefinition) -> Result<ConversationNode, GraphError> {
        let parser = match node.parser {
            Some(name) => Some(self.resolve(&name).ok_or_else(|| GraphError::UnknownParser {
                node: node.id.clone(),
                parser: name,
            })?),
            None => None,
        };
        Ok(ConversationNode {
            id: node.id,
            kind: node.kind,
            content: node.content,
            next: node.next,
            parser,
            activity: node.activity,
            capture: node.capture,
        })
    }
}
