//! Property tests for parser determinism and engine state invariants.
mod common;
use common::*;
use calme::prelude::*;
use proptest::prelude::*;

const VOCABULARY: &[&str] = &[
    "yes", "no", "maybe", "hmm", "safe", "not", "trapped", "help", "calm", "panic", "home",
    "shelter", "in", "the", "car", "breathing", "music", "I'm", "can't", "breathe", "fine",
    "very", "scared", "okay", "nothing", "my", "name", "is", "Dana", "2", "minutes",
];

fn utterance() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::collection::vec(prop::sample::select(VOCABULARY), 0..8).prop_map(|w| w.join(" ")),
        ".{0,40}",
    ]
}

proptest! {
    #[test]
    fn parsers_are_deterministic(input in utterance()) {
        for parser in ParserType::ALL {
            prop_assert_eq!(parser.parse(&input), parser.parse(&input));
        }
    }

    #[test]
    fn clarification_never_moves_the_session(inputs in prop::collection::vec(utterance(), 1..12)) {
        let mut engine = engine_in(GraphId::Main);
        for input in inputs {
            if engine.is_complete() {
                break;
            }
            if engine.pending_activity().is_some() {
                engine.resume_after_activity(true).unwrap();
                continue;
            }
            let before = engine.session().current_node().to_string();
            let step = engine.respond(&input).unwrap();
            if step.route == Route::Clarification {
                prop_assert_eq!(engine.session().current_node(), before.as_str());
            } else {
                prop_assert_eq!(engine.session().current_node(), step.node.id.as_str());
            }
        }
    }

    #[test]
    fn reset_always_returns_to_a_clean_start(
        graph in prop::sample::select(GraphId::ALL.to_vec()),
        inputs in prop::collection::vec(utterance(), 0..12),
    ) {
        let mut engine = engine_in(graph);
        for input in inputs {
            if engine.is_complete() {
                break;
            }
            if engine.pending_activity().is_some() {
                engine.resume_after_activity(false).unwrap();
            } else {
                engine.respond(&input).unwrap();
            }
        }

        engine.reset();

        let start = engine.graphs().get(graph).start().to_string();
        prop_assert_eq!(engine.session().current_node(), start.as_str());
        prop_assert!(engine.session().variables().is_empty());
        prop_assert!(engine.session().attempted_activities().is_empty());
        prop_assert!(engine.pending_activity().is_none());
    }

    #[test]
    fn activity_steps_return_to_the_node_next(inputs in prop::collection::vec(utterance(), 1..12)) {
        let mut engine = engine_in(GraphId::Main);
        for input in inputs {
            if engine.is_complete() {
                break;
            }
            let step = match engine.pending_activity() {
                Some(_) => engine.resume_after_activity(true).unwrap(),
                None => engine.respond(&input).unwrap(),
            };
            if let Some(trigger) = &step.activity_trigger {
                let node = engine.graphs().get(GraphId::Main).node(&step.node.id).unwrap();
                prop_assert_eq!(node.return_node(), Some(trigger.return_node.as_str()));
            }
        }
    }
}
