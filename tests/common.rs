//! Common test utilities for building graphs and engines.
use calme::prelude::*;

/// Compiles the built-in graphs, panicking on failure.
#[allow(dead_code)]
pub fn builtin_graphs() -> GraphSet {
    GraphSet::builtin().expect("built-in graphs compile")
}

/// An engine on the start node of a built-in graph.
#[allow(dead_code)]
pub fn engine_in(graph: GraphId) -> DialogueEngine {
    DialogueEngine::builder(builtin_graphs())
        .start_in(graph)
        .build()
}

/// A small, valid graph exercising every node kind.
///
/// `mood` (classifyStress): HIGH -> `calm` (breathing activity) -> `check`,
/// LOW -> `bye`, otherwise `check`. `check` captures a yes/no into `again`.
#[allow(dead_code)]
pub fn create_simple_graph() -> GraphDefinition {
    GraphDefinition::new(
        GraphId::Main,
        "mood",
        vec![
            NodeDefinition::question("mood", "How are you, {name}?")
                .with_parser("classifyStress")
                .with_capture("mood")
                .with_next(vec![
                    ConditionRule::when(Predicate::category("HIGH_STRESS"), "calm"),
                    ConditionRule::when(Predicate::category("LOW_STRESS"), "bye"),
                    ConditionRule::otherwise("check"),
                ]),
            NodeDefinition::activity("calm", "Let's breathe.", "breathing", "check"),
            NodeDefinition::question("check", "Feeling {mood}. Keep going?")
                .with_parser("parseYesNo")
                .with_capture("again")
                .with_next(vec![
                    ConditionRule::when(Predicate::category("yes"), "mood"),
                    ConditionRule::otherwise("bye"),
                ]),
            NodeDefinition::end("bye", "Take care."),
        ],
    )
}

/// Compiles [`create_simple_graph`] into the main slot of a graph set.
#[allow(dead_code)]
pub fn simple_engine() -> DialogueEngine {
    let graph = GraphCompiler::builder(create_simple_graph())
        .build()
        .compile()
        .expect("simple graph compiles");
    let graphs = GraphSet::builder()
        .with_graph(graph)
        .build()
        .expect("graph set builds");
    DialogueEngine::builder(graphs)
        .with_variable("name", "Dana")
        .build()
}
