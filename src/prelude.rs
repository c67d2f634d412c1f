//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the calme crate.
//!
//! # Example
//!
//! ```rust
//! use calme::prelude::*;
//!
//! # fn run_example() -> Result<(), Box<dyn std::error::Error>> {
//! let json = std::fs::read_to_string("path/to/graph.json")?;
//! let graph = GraphCompiler::builder(GraphDefinition::from_json(&json)?)
//!     .with_parser_alias("mood", ParserType::ClassifyStress)
//!     .build()
//!     .compile()?;
//!
//! let graphs = GraphSet::builder().with_graph(graph).build()?;
//! let mut engine = DialogueEngine::new(graphs);
//! let step = engine.respond("I'm okay")?;
//! println!("{} ({})", step.node.content, step.route);
//! # Ok(())
//! # }
//! ```

// Compilation
pub use crate::compiler::{GraphCompiler, ParserRegistry};

// Graph model
pub use crate::graph::visualizer::MermaidDiagram;
pub use crate::graph::{
    Comparison, ConditionRule, ConversationNode, DialogueGraph, GraphDefinition, GraphId,
    GraphSet, IntoGraph, NodeDefinition, NodeKind, Predicate, Transition,
};

// Runtime
pub use crate::engine::{
    ActivityTrigger, DialogueEngine, RenderableNode, Route, Session, SessionSnapshot, Step,
};

// Classifiers
pub use crate::classifier::{ClassificationResult, ExtractionResult, ParserResult, ParserType};

// Profiles
pub use crate::profile::{Companion, MemoryProfileStore, Profile, ProfileStore, SafeSpaceType};

// Error types
pub use crate::error::{EngineError, GraphError, ProfileError};
