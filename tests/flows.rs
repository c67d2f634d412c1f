//! Tests for the built-in onboarding, main and alert graphs.
mod common;
use calme::classifier::activity::ACTIVITY_CATALOG;
use common::*;
use calme::prelude::*;

/// One confident result per category any built-in parser can produce, plus
/// extractions and the acknowledgement used by statement nodes.
fn sample_results() -> Vec<ParserResult> {
    let categories = [
        "SAFE",
        "DANGER",
        "UNSURE",
        "HIGH_STRESS",
        "MODERATE_STRESS",
        "LOW_STRESS",
        "CONFUSED",
        "CAREGIVER",
        "IN_TRANSIT",
        "OUTDOOR_WORKER",
        "yes",
        "no",
        "maybe",
        "no_activity",
    ];
    let mut results: Vec<ParserResult> = categories
        .iter()
        .chain(ACTIVITY_CATALOG)
        .map(|c| ParserResult::classified(c, 0.9, "sample"))
        .collect();
    for value in ["home", "public shelter", "car", "somewhere else", "none", "name", "time"] {
        results.push(ParserResult::extracted(value, 0.8, "sample", "sample"));
    }
    results.push(ParserResult::acknowledged());
    results
}

#[test]
fn test_builtin_graphs_compile() {
    let graphs = builtin_graphs();
    assert_eq!(graphs.get(GraphId::Onboarding).start(), "onboard_start");
    assert_eq!(graphs.get(GraphId::Main).start(), "safety_check");
    assert_eq!(graphs.get(GraphId::Alert).start(), "alert_start");
}

#[test]
fn test_every_builtin_node_is_reachable() {
    let graphs = builtin_graphs();
    for id in GraphId::ALL {
        let graph = graphs.get(id);
        assert_eq!(graph.reachable().len(), graph.len(), "{id} graph has orphans");
    }
}

#[test]
fn test_no_reachable_node_can_stall() {
    let graphs = builtin_graphs();
    let results = sample_results();
    for id in GraphId::ALL {
        let graph = graphs.get(id);
        for node_id in graph.reachable() {
            let node = graph.node(node_id).unwrap();
            let Some(next) = &node.next else {
                assert!(node.is_end(), "{id}/{node_id} has no way out");
                continue;
            };
            for result in &results {
                let resolution = next.resolve(result).expect("a target");
                assert!(!resolution.fallback, "{id}/{node_id} fell back");
                assert!(graph.contains(resolution.target), "{id}/{node_id} -> {}", resolution.target);
            }
        }
    }
}

#[test]
fn test_activity_nodes_return_to_their_next() {
    let graphs = builtin_graphs();
    for id in GraphId::ALL {
        for node in graphs.get(id).nodes().filter(|n| n.is_activity()) {
            let next = node.next.as_ref().unwrap();
            assert!(!next.is_conditional());
            assert_eq!(node.return_node(), next.as_direct());
        }
    }
}

#[test]
fn test_unmatched_rules_fall_back_to_the_first_target() {
    let transition = Transition::conditional([
        ConditionRule::when(Predicate::category("SAFE"), "stress_level"),
        ConditionRule::when(Predicate::category("DANGER"), "emergency_mode"),
    ]);
    let resolution = transition
        .resolve(&ParserResult::classified("UNSURE", 0.7, "test"))
        .unwrap();
    assert_eq!(resolution.target, "stress_level");
    assert!(resolution.fallback);
    assert_eq!(resolution.rule, None);

    let empty = Transition::conditional(Vec::<ConditionRule>::new());
    assert!(empty.resolve(&ParserResult::acknowledged()).is_none());
}

#[test]
fn test_danger_goes_straight_to_emergency_mode() {
    let mut engine = engine_in(GraphId::Main);
    let step = engine.respond("I'm trapped, help!").unwrap();
    assert_eq!(step.node.id, "emergency_mode");
    assert!(engine.is_complete());

    engine.reset();
    assert_eq!(engine.session().current_node(), "safety_check");
}

#[test]
fn test_safe_user_with_no_injuries_moves_on_to_stress_check() {
    let mut engine = engine_in(GraphId::Main);
    let step = engine.respond("I'm safe and nobody is hurt").unwrap();
    assert_eq!(step.node.id, "stress_level");
    assert!(!engine.is_complete());

    let step = engine.respond("not panicking, doing fine").unwrap();
    assert_eq!(step.node.id, "social_check");
    assert!(step.activity_trigger.is_none());
}

#[test]
fn test_hmm_at_safety_check_keeps_the_question() {
    let mut engine = engine_in(GraphId::Main);
    let step = engine.respond("hmm").unwrap();
    assert!(step.node.clarification);
    assert_eq!(engine.session().current_node(), "safety_check");
}

#[test]
fn test_main_flow_with_breathing_and_activity_menu() {
    let mut engine = engine_in(GraphId::Main);

    assert_eq!(engine.respond("yes I'm safe at home").unwrap().node.id, "stress_level");

    let step = engine.respond("I can't breathe, my heart is racing").unwrap();
    assert_eq!(step.node.id, "breathing_activity");
    assert_eq!(
        step.activity_trigger,
        Some(ActivityTrigger {
            activity_name: "breathing".to_string(),
            return_node: "breathing_return".to_string(),
        })
    );

    assert_eq!(engine.resume_after_activity(true).unwrap().node.id, "breathing_return");
    assert_eq!(engine.respond("a bit better now").unwrap().node.id, "location_check");
    assert_eq!(engine.respond("at home").unwrap().node.id, "family_check");
    assert_eq!(engine.variable("location"), Some("home"));
    assert_eq!(engine.respond("yes, they're all calm").unwrap().node.id, "positive_coping");
    assert_eq!(engine.advance().unwrap().node.id, "ongoing_support");
    assert_eq!(engine.respond("I'm a bit anxious still").unwrap().node.id, "activity_offer");
    assert_eq!(engine.respond("yes").unwrap().node.id, "activity_choice");

    let step = engine.respond("some music please").unwrap();
    assert_eq!(step.activity_trigger.unwrap().activity_name, "music");
    assert_eq!(engine.resume_after_activity(true).unwrap().node.id, "continue_loop");

    let unattempted = engine.unattempted_activities();
    assert!(!unattempted.contains(&"breathing"));
    assert!(!unattempted.contains(&"music"));
    assert!(unattempted.contains(&"story"));

    assert_eq!(engine.respond("I feel calm now").unwrap().node.id, "positive_ending");
    assert!(engine.is_complete());
}

#[test]
fn test_alert_fast_path_in_a_car() {
    let mut engine = engine_in(GraphId::Alert);
    assert_eq!(engine.advance().unwrap().node.id, "alert_focus");
    assert_eq!(engine.respond("in my car").unwrap().node.id, "alert_transit");

    let step = engine.advance().unwrap();
    assert_eq!(step.node.id, "alert_breathing");
    assert_eq!(step.activity_trigger.unwrap().return_node, "alert_wait");

    assert_eq!(engine.resume_after_activity(true).unwrap().node.id, "alert_wait");
    assert_eq!(engine.advance().unwrap().node.id, "alert_all_clear");
    assert!(engine.is_complete());
}

#[test]
fn test_alert_recognises_protected_spaces() {
    let mut engine = engine_in(GraphId::Alert);
    engine.advance().unwrap();
    assert_eq!(engine.respond("I'm in the mamad").unwrap().node.id, "alert_protected");
}

#[test]
fn test_onboarding_review_substitutes_answers() {
    let mut engine = engine_in(GraphId::Onboarding);
    for answer in [
        "My name is Dana",
        "yes",
        "a public shelter",
        "on Herzl street",
        "about two minutes",
        "the stairwell",
        "none",
        "breathing exercises",
        "voice please",
        "no",
    ] {
        let step = engine.respond(answer).unwrap();
        assert!(!step.node.clarification, "'{answer}' needed clarification");
    }

    let review = engine.get_current_node().unwrap();
    assert_eq!(review.id, "onboard_review");
    assert!(review.content.starts_with("Dana, here's your emergency profile"));
    assert!(review.content.contains("Safe space: public shelter (2 minutes to reach)"));
    assert!(review.content.contains("Calming method: breathing"));
    assert!(review.content.contains("Communication: audio"));
}

#[test]
fn test_onboarding_change_request_loops_back() {
    let mut engine = engine_in(GraphId::Onboarding);
    engine.move_to_node("onboard_review").unwrap();

    assert_eq!(engine.respond("no").unwrap().node.id, "onboard_what_to_change");
    assert_eq!(
        engine.respond("my name please").unwrap().node.id,
        "onboard_name_retry"
    );
    engine.respond("Call me Avi").unwrap();
    assert_eq!(engine.variable("name"), Some("Avi"));

    engine.move_to_node("onboard_what_to_change").unwrap();
    assert_eq!(
        engine.respond("the time it takes").unwrap().node.id,
        "onboard_time_to_safety"
    );
}

#[test]
fn test_builtin_graphs_export_to_mermaid() {
    let graphs = builtin_graphs();
    for id in GraphId::ALL {
        let graph = graphs.get(id);
        let diagram = MermaidDiagram::new(graph).to_string();
        for node in graph.nodes() {
            assert!(diagram.contains(&format!("    {}", node.id)), "{} missing", node.id);
        }
    }
}

#[test]
fn test_builtin_sources_are_json_tables() {
    for id in GraphId::ALL {
        let definition = GraphDefinition::from_json(calme::flows::source(id)).unwrap();
        assert!(!definition.nodes.is_empty());
    }
}
