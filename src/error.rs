use crate::graph::GraphId;
use thiserror::Error;

/// Errors raised while compiling a graph definition into a `DialogueGraph`.
///
/// Every variant is a load-time fatal: a graph that fails here never reaches
/// a conversation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Failed to parse graph definition JSON: {0}")]
    Json(String),

    #[error("Node '{0}' is defined more than once")]
    DuplicateNode(String),

    #[error("Start node '{0}' is not defined in the graph")]
    UnknownStartNode(String),

    #[error("Node '{target}' not found, which is required by a transition from node '{node}'")]
    UnknownTarget { node: String, target: String },

    #[error("Node '{node}' is not an end node but has no `next` transition")]
    MissingTransition { node: String },

    #[error("End node '{node}' must not declare a `next` transition")]
    UnexpectedTransition { node: String },

    #[error("Node '{node}' has a conditional transition with no rules")]
    EmptyConditions { node: String },

    #[error(
        "Node '{node}' has a conditional transition with neither a default rule nor an always-true predicate"
    )]
    NoDefaultRule { node: String },

    #[error("Activity node '{node}' must return through a direct transition")]
    ConditionalActivityReturn { node: String },

    #[error("Activity node '{node}' does not name an activity")]
    MissingActivityName { node: String },

    #[error("Node '{node}' names an activity but is not an activity node")]
    UnexpectedActivityName { node: String },

    #[error("Node '{node}' branches on a parser result but declares no parser")]
    MissingParser { node: String },

    #[error("Node '{node}' uses an unregistered parser type: '{parser}'")]
    UnknownParser { node: String, parser: String },
}

/// Errors raised by a running `DialogueEngine`.
///
/// These are developer-facing. A user never sees one of them; low-confidence
/// input surfaces as a clarification prompt instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Node '{node}' not found in the {graph} graph")]
    UnknownNode { graph: GraphId, node: String },

    #[error("Node '{node}' has no transition to follow")]
    MissingTransition { node: String },

    #[error("Activity '{activity}' is still running; resume it before submitting input")]
    ActivityPending { activity: String },

    #[error("No activity is pending, nothing to resume")]
    NoPendingActivity,

    #[error("Session snapshot error: {0}")]
    Snapshot(String),
}

/// Errors raised by a `ProfileStore` or by the `Companion` adapter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Profile '{id}' not found")]
    NotFound { id: String },

    #[error("Profile storage failed: {0}")]
    Storage(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
