//! # CALMe - Dialogue Graph Engine and Rule-Based Classifier
//!
//! **CALMe** drives short, supportive conversations for people under acute
//! stress, such as the minutes around a rocket alert. A conversation is a
//! statically validated graph of nodes; every user utterance is classified by
//! a deterministic rule-based parser, and the result picks the next node.
//!
//! ## Core Workflow
//!
//! 1.  **Describe the graph**: load a [`GraphDefinition`](graph::GraphDefinition) from JSON, build
//!     one in code, or implement [`IntoGraph`](graph::IntoGraph) for your own format.
//! 2.  **Compile**: [`GraphCompiler::builder`](compiler::GraphCompiler::builder) resolves parser
//!     names and rejects dangling targets, missing default rules and malformed activity nodes once,
//!     at load time.
//! 3.  **Converse**: a [`DialogueEngine`](engine::DialogueEngine) owns one session. Feed it
//!     utterances with `respond`, or parser results with `submit_result`, and show the
//!     [`RenderableNode`](engine::RenderableNode) it returns.
//! 4.  **Run activities**: when a step carries an [`ActivityTrigger`](engine::ActivityTrigger),
//!     run the activity and call `resume_after_activity`.
//!
//! ## Quick Start
//!
//! ```rust
//! use calme::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let graphs = GraphSet::builtin()?;
//!     let mut engine = DialogueEngine::new(graphs);
//!
//!     println!("{}", engine.get_current_node()?.content);
//!
//!     let step = engine.respond("yes, I'm safe at home")?;
//!     assert_eq!(step.node.id, "stress_level");
//!
//!     let step = engine.respond("I can't breathe, I'm panicking")?;
//!     if let Some(trigger) = step.activity_trigger {
//!         println!("-> launching {}", trigger.activity_name);
//!         let back = engine.resume_after_activity(true)?;
//!         assert_eq!(back.node.id, "breathing_return");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! The library only emits [`tracing`] events. Install a subscriber in the
//! host to see transitions, fallbacks and graph switches.

pub mod classifier;
pub mod compiler;
pub mod engine;
pub mod error;
pub mod flows;
pub mod graph;
pub mod prelude;
pub mod profile;
