//! Compiled, immutable dialogue graphs.
//!
//! A [`DialogueGraph`] is only ever produced by the
//! [`GraphCompiler`](crate::compiler::GraphCompiler), so every graph reachable
//! from this module has already passed static validation.

use crate::classifier::ParserType;
use crate::compiler::GraphCompiler;
use crate::error::GraphError;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

pub mod definition;
pub mod transition;
pub mod visualizer;

pub use definition::{GraphDefinition, IntoGraph, NodeDefinition};
pub use transition::{Comparison, ConditionRule, Predicate, Resolution, Transition};

/// Which of the three conversations a graph implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum GraphId {
    Onboarding,
    #[default]
    Main,
    Alert,
}

impl GraphId {
    pub const ALL: [GraphId; 3] = [GraphId::Onboarding, GraphId::Main, GraphId::Alert];

    pub fn as_str(&self) -> &'static str {
        match self {
            GraphId::Onboarding => "onboarding",
            GraphId::Main => "main",
            GraphId::Alert => "alert",
        }
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Asks something or says something. A branching "decision" is a question
    /// with a conditional `next`.
    #[default]
    #[serde(alias = "decision")]
    Question,
    /// Hands control to an external activity, then returns through `next`.
    Activity,
    /// Terminal node.
    End,
}

/// A validated node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationNode {
    pub id: String,
    pub kind: NodeKind,
    pub content: String,
    pub next: Option<Transition>,
    pub parser: Option<ParserType>,
    pub activity: Option<String>,
    /// Session variable that receives this node's answer.
    pub capture: Option<String>,
}

impl ConversationNode {
    pub fn is_end(&self) -> bool {
        self.kind == NodeKind::End
    }

    pub fn is_activity(&self) -> bool {
        self.kind == NodeKind::Activity
    }

    /// The node an activity returns to. `None` for any other kind.
    pub fn return_node(&self) -> Option<&str> {
        if !self.is_activity() {
            return None;
        }
        self.next.as_ref().and_then(Transition::as_direct)
    }
}

/// An immutable conversation graph.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueGraph {
    id: GraphId,
    start: String,
    nodes: AHashMap<String, ConversationNode>,
    order: Vec<String>,
}

impl DialogueGraph {
    /// Assembles a graph from nodes in definition order. Validation is the
    /// caller's job.
    pub(crate) fn from_parts(id: GraphId, start: String, nodes: Vec<ConversationNode>) -> Self {
        let order = nodes.iter().map(|n| n.id.clone()).collect();
        let nodes = nodes.into_iter().map(|n| (n.id.clone(), n)).collect();
        Self {
            id,
            start,
            nodes,
            order,
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn node(&self, id: &str) -> Option<&ConversationNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Nodes in definition order.
    pub fn nodes(&self) -> impl Iterator<Item = &ConversationNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Node ids reachable from the start node, breadth first.
    pub fn reachable(&self) -> Vec<&str> {
        let mut seen = AHashSet::new();
        let mut queue = VecDeque::from([self.start.as_str()]);
        let mut visited = Vec::new();
        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            visited.push(node.id.as_str());
            if let Some(next) = &node.next {
                queue.extend(next.targets());
            }
        }
        visited
    }
}

/// The three graphs a session can switch between.
#[derive(Debug, Clone)]
pub struct GraphSet {
    onboarding: Arc<DialogueGraph>,
    main: Arc<DialogueGraph>,
    alert: Arc<DialogueGraph>,
}

impl GraphSet {
    /// Compiles the built-in onboarding, main and alert flows.
    pub fn builtin() -> Result<Self, GraphError> {
        Self::builder().build()
    }

    pub fn builder() -> GraphSetBuilder {
        GraphSetBuilder::default()
    }

    pub fn get(&self, id: GraphId) -> &Arc<DialogueGraph> {
        match id {
            GraphId::Onboarding => &self.onboarding,
            GraphId::Main => &self.main,
            GraphId::Alert => &self.alert,
        }
    }
}

/// Replaces individual built-in graphs with host-supplied ones.
#[derive(Debug, Default)]
pub struct GraphSetBuilder {
    graphs: AHashMap<GraphId, Arc<DialogueGraph>>,
}

impl GraphSetBuilder {
    /// Uses `graph` for the slot named by its own id.
    pub fn with_graph(mut self, graph: DialogueGraph) -> Self {
        self.graphs.insert(graph.id(), Arc::new(graph));
        self
    }

    /// Compiles the built-in flow for every slot left empty.
    pub fn build(mut self) -> Result<GraphSet, GraphError> {
        let mut take = |id: GraphId| -> Result<Arc<DialogueGraph>, GraphError> {
            match self.graphs.remove(&id) {
                Some(graph) => Ok(graph),
                None => Ok(Arc::new(
                    GraphCompiler::builder(crate::flows::definition(id)?)
                        .build()
                        .compile()?,
                )),
            }
        };
        Ok(GraphSet {
            onboarding: take(GraphId::Onboarding)?,
            main: take(GraphId::Main)?,
            alert: take(GraphId::Alert)?,
        })
    }
}
