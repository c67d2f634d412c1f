//! The dialogue graph engine.
//!
//! One [`DialogueEngine`] drives one conversation. It owns its [`Session`]
//! exclusively and shares only the immutable graphs, so any number of engines
//! may run side by side. Nothing here blocks or performs I/O; activities are a
//! two-phase hand-off: [`submit_result`](DialogueEngine::submit_result)
//! returns an [`ActivityTrigger`], and the engine stays parked until the host
//! calls [`resume_after_activity`](DialogueEngine::resume_after_activity).

use crate::classifier::activity::ACTIVITY_CATALOG;
use crate::classifier::{ParserResult, ParserType};
use crate::error::EngineError;
use crate::graph::{ConversationNode, DialogueGraph, GraphId, GraphSet, Transition};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

mod render;
mod session;

pub use render::{RenderableNode, substitute};
pub use session::{ActivityTrigger, Session, SessionSnapshot};

/// Why the engine landed where it did.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// The answer was too uncertain; the same question is asked again.
    Clarification,
    Direct,
    /// Rule `index` of a conditional transition matched.
    Rule { index: usize, condition: String },
    /// No rule matched; the first rule's target was taken.
    Fallback,
    /// Returned from an activity.
    Resumed { activity: String, completed: bool },
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Clarification => f.write_str("clarification"),
            Route::Direct => f.write_str("direct"),
            Route::Rule { index, condition } => write!(f, "rule #{index}: {condition}"),
            Route::Fallback => f.write_str("fallback to first rule"),
            Route::Resumed {
                activity,
                completed,
            } => write!(f, "resumed after {activity} (completed: {completed})"),
        }
    }
}

/// The result of one engine step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub node: RenderableNode,
    pub activity_trigger: Option<ActivityTrigger>,
    pub route: Route,
}

pub struct DialogueEngine {
    graphs: GraphSet,
    session: Session,
    catalog: Vec<String>,
}

pub struct DialogueEngineBuilder {
    graphs: GraphSet,
    graph: GraphId,
    variables: Vec<(String, String)>,
    catalog: Vec<String>,
}

impl DialogueEngineBuilder {
    pub fn new(graphs: GraphSet) -> Self {
        Self {
            graphs,
            graph: GraphId::Main,
            variables: Vec::new(),
            catalog: ACTIVITY_CATALOG.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Starts the session at the start node of `graph` instead of the main graph.
    pub fn start_in(mut self, graph: GraphId) -> Self {
        self.graph = graph;
        self
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.push((name.into(), value.into()));
        self
    }

    /// Replaces the activities reported by `unattempted_activities`.
    pub fn with_activity_catalog<I, S>(mut self, activities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.catalog = activities.into_iter().map(Into::into).collect();
        self
    }

    /// Rebuilds an engine from a snapshot, checking it against the graphs.
    ///
    /// The snapshot supplies the graph, position and variables; only the
    /// builder's activity catalog is kept.
    pub fn restore(self, snapshot: SessionSnapshot) -> Result<DialogueEngine, EngineError> {
        let session = snapshot.into_session();
        let graph = self.graphs.get(session.graph);
        let referenced = std::iter::once(session.current_node.as_str())
            .chain(session.pending.as_ref().map(|p| p.return_node.as_str()));
        for node in referenced {
            if !graph.contains(node) {
                return Err(EngineError::UnknownNode {
                    graph: session.graph,
                    node: node.to_string(),
                });
            }
        }
        Ok(DialogueEngine {
            graphs: self.graphs,
            session,
            catalog: self.catalog,
        })
    }

    pub fn build(self) -> DialogueEngine {
        let mut session = Session::new(self.graph, self.graphs.get(self.graph).start());
        session.variables.extend(self.variables);
        DialogueEngine {
            graphs: self.graphs,
            session,
            catalog: self.catalog,
        }
    }
}

impl DialogueEngine {
    pub fn builder(graphs: GraphSet) -> DialogueEngineBuilder {
        DialogueEngineBuilder::new(graphs)
    }

    pub fn new(graphs: GraphSet) -> Self {
        Self::builder(graphs).build()
    }

    /// Rebuilds an engine from a snapshot with the default activity catalog.
    /// Use [`DialogueEngineBuilder::restore`] to keep a custom one.
    pub fn restore(graphs: GraphSet, snapshot: SessionSnapshot) -> Result<Self, EngineError> {
        Self::builder(graphs).restore(snapshot)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(self.session.clone())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn graph_id(&self) -> GraphId {
        self.session.graph
    }

    pub fn graphs(&self) -> &GraphSet {
        &self.graphs
    }

    fn active_graph(&self) -> Arc<DialogueGraph> {
        Arc::clone(self.graphs.get(self.session.graph))
    }

    fn current(&self) -> Result<&ConversationNode, EngineError> {
        let graph = self.graphs.get(self.session.graph);
        graph
            .node(&self.session.current_node)
            .ok_or_else(|| EngineError::UnknownNode {
                graph: self.session.graph,
                node: self.session.current_node.clone(),
            })
    }

    /// The current node with its `{var}` placeholders filled in.
    pub fn get_current_node(&self) -> Result<RenderableNode, EngineError> {
        let node = self.current()?;
        Ok(RenderableNode::render(node, &self.session.variables))
    }

    /// Jumps to `id` in the active graph.
    pub fn move_to_node(&mut self, id: &str) -> Result<RenderableNode, EngineError> {
        let graph = self.active_graph();
        let node = graph.node(id).ok_or_else(|| EngineError::UnknownNode {
            graph: graph.id(),
            node: id.to_string(),
        })?;
        self.session.current_node = node.id.clone();
        Ok(RenderableNode::render(node, &self.session.variables))
    }

    pub fn get_current_parser_type(&self) -> Option<ParserType> {
        self.current().ok().and_then(|node| node.parser)
    }

    pub fn is_complete(&self) -> bool {
        self.current().is_ok_and(ConversationNode::is_end)
    }

    /// Feeds one parser result into the current node's transition.
    ///
    /// A result that needs clarification returns a transient `<id>_clarify`
    /// node and leaves the session untouched. Any other result is captured
    /// into the node's `capture` variable, the transition is resolved and the
    /// engine moves. Landing on an activity node returns a trigger and parks
    /// the engine until [`resume_after_activity`](Self::resume_after_activity).
    pub fn submit_result(&mut self, result: &ParserResult) -> Result<Step, EngineError> {
        if let Some(pending) = &self.session.pending {
            return Err(EngineError::ActivityPending {
                activity: pending.activity_name.clone(),
            });
        }

        let graph = self.active_graph();
        let node = graph
            .node(&self.session.current_node)
            .ok_or_else(|| EngineError::UnknownNode {
                graph: graph.id(),
                node: self.session.current_node.clone(),
            })?;

        if result.needs_clarification() {
            let prompt = result
                .clarification_prompt()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or(&node.content);
            debug!(graph = %graph.id(), node = %node.id, "answer needs clarification");
            return Ok(Step {
                node: RenderableNode::clarify(node, prompt, &self.session.variables),
                activity_trigger: None,
                route: Route::Clarification,
            });
        }

        let missing = || EngineError::MissingTransition {
            node: node.id.clone(),
        };
        let resolution = node
            .next
            .as_ref()
            .ok_or_else(missing)?
            .resolve(result)
            .ok_or_else(missing)?;

        let route = match (resolution.rule, &node.next) {
            _ if resolution.fallback => {
                warn!(
                    graph = %graph.id(),
                    node = %node.id,
                    target = resolution.target,
                    "no condition matched, falling back to the first rule"
                );
                Route::Fallback
            }
            (Some(index), Some(Transition::Conditional { conditions })) => {
                Route::Rule {
                    index,
                    condition: conditions[index].to_string(),
                }
            }
            _ => Route::Direct,
        };

        if let (Some(variable), Some(value)) = (&node.capture, result.captured_value()) {
            self.session
                .variables
                .insert(variable.clone(), value.to_string());
        }

        self.enter(&graph, resolution.target, route)
    }

    /// Moves onto `target` and builds the step, arming an activity if needed.
    fn enter(
        &mut self,
        graph: &DialogueGraph,
        target: &str,
        route: Route,
    ) -> Result<Step, EngineError> {
        let node = graph.node(target).ok_or_else(|| EngineError::UnknownNode {
            graph: graph.id(),
            node: target.to_string(),
        })?;

        let trigger = match (&node.activity, node.return_node()) {
            (Some(activity), Some(return_node)) if node.is_activity() => Some(ActivityTrigger {
                activity_name: activity.clone(),
                return_node: return_node.to_string(),
            }),
            _ => None,
        };

        debug!(
            graph = %graph.id(),
            from = %self.session.current_node,
            to = %node.id,
            route = %route,
            "transition"
        );
        self.session.current_node = node.id.clone();
        self.session.pending = trigger.clone();

        Ok(Step {
            node: RenderableNode::render(node, &self.session.variables),
            activity_trigger: trigger,
            route,
        })
    }

    /// Resumes after the host has run the pending activity.
    ///
    /// Records the activity as attempted whether or not it was completed, then
    /// moves to its return node.
    pub fn resume_after_activity(&mut self, completed: bool) -> Result<Step, EngineError> {
        let pending = self
            .session
            .pending
            .take()
            .ok_or(EngineError::NoPendingActivity)?;
        self.session.attempted.insert(pending.activity_name.clone());
        info!(
            activity = %pending.activity_name,
            completed,
            return_node = %pending.return_node,
            "resuming after activity"
        );
        let graph = self.active_graph();
        self.enter(
            &graph,
            &pending.return_node,
            Route::Resumed {
                activity: pending.activity_name,
                completed,
            },
        )
    }

    /// Back to the start node with empty variables and activity history.
    pub fn reset(&mut self) {
        let start = self.graphs.get(self.session.graph).start().to_string();
        self.session.current_node = start;
        self.session.variables.clear();
        self.session.attempted.clear();
        self.session.pending = None;
        debug!(graph = %self.session.graph, "session reset");
    }

    /// Makes `graph` active and moves to its start node.
    ///
    /// Variables and activity history carry over; a pending activity is dropped.
    pub fn switch_graph(&mut self, graph: GraphId) -> Result<RenderableNode, EngineError> {
        info!(from = %self.session.graph, to = %graph, "switching graph");
        self.session.graph = graph;
        self.session.pending = None;
        let start = self.graphs.get(graph).start().to_string();
        self.move_to_node(&start)
    }

    /// Runs the current node's parser on `utterance` and submits the result.
    /// Nodes without a parser treat any input as an acknowledgement.
    pub fn respond(&mut self, utterance: &str) -> Result<Step, EngineError> {
        let result = match self.get_current_parser_type() {
            Some(parser) => parser.parse(utterance),
            None => ParserResult::acknowledged(),
        };
        self.submit_result(&result)
    }

    /// Moves past a node that asks nothing.
    pub fn advance(&mut self) -> Result<Step, EngineError> {
        self.submit_result(&ParserResult::acknowledged())
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.session.variables.insert(name.into(), value.into());
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.session.variable(name)
    }

    pub fn pending_activity(&self) -> Option<&ActivityTrigger> {
        self.session.pending.as_ref()
    }

    /// Catalog activities not yet attempted this session, in catalog order.
    pub fn unattempted_activities(&self) -> Vec<&str> {
        self.catalog
            .iter()
            .filter(|activity| !self.session.attempted.contains(activity.as_str()))
            .map(String::as_str)
            .collect()
    }
}
