use crate::error::GraphError;
use crate::graph::{ConversationNode, DialogueGraph, NodeKind, Transition};
use ahash::AHashSet;
use tracing::warn;

/// Checks every structural rule, failing on the first violation in
/// definition order.
pub(super) fn validate(graph: &DialogueGraph) -> Result<(), GraphError> {
    if !graph.contains(graph.start()) {
        return Err(GraphError::UnknownStartNode(graph.start().to_string()));
    }
    for node in graph.nodes() {
        check_node(graph, node)?;
    }
    Ok(())
}

fn check_node(graph: &DialogueGraph, node: &ConversationNode) -> Result<(), GraphError> {
    let id = || node.id.clone();

    match (node.kind, &node.next) {
        (NodeKind::End, Some(_)) => return Err(GraphError::UnexpectedTransition { node: id() }),
        (NodeKind::End, None) => {}
        (_, None) => return Err(GraphError::MissingTransition { node: id() }),
        (_, Some(_)) => {}
    }

    let names_activity = node.activity.as_deref().is_some_and(|a| !a.trim().is_empty());
    match node.kind {
        NodeKind::Activity if !names_activity => {
            return Err(GraphError::MissingActivityName { node: id() });
        }
        NodeKind::Question | NodeKind::End if node.activity.is_some() => {
            return Err(GraphError::UnexpectedActivityName { node: id() });
        }
        _ => {}
    }

    if let Some(Transition::Conditional { conditions }) = &node.next {
        if node.is_activity() {
            return Err(GraphError::ConditionalActivityReturn { node: id() });
        }
        if conditions.is_empty() {
            return Err(GraphError::EmptyConditions { node: id() });
        }
        if !conditions.iter().any(|rule| rule.always_matches()) {
            return Err(GraphError::NoDefaultRule { node: id() });
        }
        if node.parser.is_none() {
            return Err(GraphError::MissingParser { node: id() });
        }
    }

    if let Some(next) = &node.next {
        if let Some(target) = next.targets().into_iter().find(|t| !graph.contains(t)) {
            return Err(GraphError::UnknownTarget {
                node: id(),
                target: target.to_string(),
            });
        }
    }
    Ok(())
}

/// Logs nodes that no path from the start node reaches. Not an error: a
/// graph may keep an entry point that is only reached through `move_to_node`.
pub(super) fn warn_unreachable(graph: &DialogueGraph) {
    let reachable: AHashSet<&str> = graph.reachable().into_iter().collect();
    for node in graph.nodes().filter(|n| !reachable.contains(n.id.as_str())) {
        warn!(graph = %graph.id(), node = %node.id, "node is unreachable from the start node");
    }
}
