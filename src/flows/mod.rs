//! The built-in conversations.
//!
//! Each flow ships as a JSON node table, compiled by
//! [`GraphSet::builtin`](crate::graph::GraphSet::builtin) the same way a host
//! graph loaded with `--definition` would be.

use crate::error::GraphError;
use crate::graph::{GraphDefinition, GraphId};

const ONBOARDING: &str = include_str!("onboarding.json");
const MAIN: &str = include_str!("main.json");
const ALERT: &str = include_str!("alert.json");

/// The raw JSON table of a built-in flow.
pub fn source(id: GraphId) -> &'static str {
    match id {
        GraphId::Onboarding => ONBOARDING,
        GraphId::Main => MAIN,
        GraphId::Alert => ALERT,
    }
}

/// Parses the built-in definition for `id`.
pub fn definition(id: GraphId) -> Result<GraphDefinition, GraphError> {
    let mut definition = GraphDefinition::from_json(source(id))?;
    definition.id = id;
    Ok(definition)
}
