//! Tests for the rule-based parsers.
use calme::classifier::*;
use calme::prelude::*;

#[test]
fn test_trapped_and_calling_for_help_is_danger() {
    let result = classify_safety("I'm trapped, help!");
    assert_eq!(result.category(), Some("DANGER"));
    assert!(result.confidence() >= 0.8);
    assert!(!result.needs_clarification());
}

#[test]
fn test_safe_at_home_is_safe() {
    let result = classify_safety("yes I'm safe at home");
    assert_eq!(result.category(), Some("SAFE"));
}

#[test]
fn test_negated_safety_wins_over_safe() {
    assert_eq!(classify_safety("I'm not safe here").category(), Some("DANGER"));
}

#[test]
fn test_bare_yes_to_safety_reads_as_affirmative() {
    let result = classify_safety("yep");
    assert_eq!(result.category(), Some("SAFE"));
    assert!(result.confidence() < 0.9, "linguistic tier, not keyword tier");
}

#[test]
fn test_cant_breathe_is_high_stress() {
    let result = classify_stress("I can't breathe, my heart is racing");
    assert_eq!(result.category(), Some("HIGH_STRESS"));
    assert!(result.confidence() >= 0.9);
}

#[test]
fn test_stress_keyword_order() {
    assert_eq!(classify_stress("I'm not stressed at all").category(), Some("LOW_STRESS"));
    assert_eq!(classify_stress("not good, kind of tense").category(), Some("MODERATE_STRESS"));
    assert_eq!(classify_stress("I'm so confused").category(), Some("CONFUSED"));
    assert_eq!(classify_stress("I'm on the bus").category(), Some("IN_TRANSIT"));
    assert_eq!(classify_stress("I'm fine, just checking").category(), Some("LOW_STRESS"));
}

#[test]
fn test_stress_linguistic_buckets() {
    let high = classify_stress("everything is awful and horrible");
    assert_eq!(high.category(), Some("HIGH_STRESS"));
    assert!((high.confidence() - 0.7).abs() < 1e-9);

    let moderate = classify_stress("a little sad");
    assert_eq!(moderate.category(), Some("MODERATE_STRESS"));
}

#[test]
fn test_hmm_needs_clarification_without_a_category() {
    for parser in [ParserType::ClassifySafety, ParserType::ClassifyStress, ParserType::ParseYesNo] {
        let result = parser.parse("hmm");
        assert!(result.needs_clarification(), "{parser} should clarify");
        assert_eq!(result.category(), None);
        assert!(result.clarification_prompt().is_some_and(|p| !p.is_empty()));
    }
}

#[test]
fn test_downtown_shelter_is_extracted() {
    let result = extract_location("I'm at the downtown shelter on 5th street");
    let value = result.extracted_value().expect("a location");
    assert!(value.contains("shelter") || value.contains("5th street"), "got {value}");
    assert!(result.confidence() >= 0.7);
}

#[test]
fn test_location_tiers() {
    let city = extract_location("we are in Tel Aviv");
    assert_eq!(city.extracted_value(), Some("Tel Aviv"));

    let noun = extract_location("the bomb shelter");
    assert_eq!(noun.extracted_value(), Some("bomb shelter"));

    let vague = extract_location("hmm");
    assert!(vague.needs_clarification());
    assert_eq!(vague.extracted_value(), None);
}

#[test]
fn test_yes_no_maybe() {
    assert_eq!(parse_yes_no("yeah, sure").category(), Some("yes"));
    assert_eq!(parse_yes_no("nope").category(), Some("no"));
    assert_eq!(parse_yes_no("no").category(), Some("no"));
    assert_eq!(parse_yes_no("I'm not sure").category(), Some("maybe"));
}

#[test]
fn test_activity_preference() {
    assert_eq!(parse_activity_preference("let's do some breathing").category(), Some("breathing"));
    assert_eq!(parse_activity_preference("a memory game").category(), Some("matching-cards"));
    assert_eq!(parse_activity_preference("nothing, thanks").category(), Some("no_activity"));
}

#[test]
fn test_onboarding_extractors() {
    assert_eq!(extract_name("My name is dana").extracted_value(), Some("Dana"));
    assert_eq!(extract_name("Avi").extracted_value(), Some("Avi"));
    assert_eq!(extract_duration("about two minutes").extracted_value(), Some("2 minutes"));
    assert_eq!(extract_accessibility_needs("no").extracted_value(), Some("none"));
    assert_eq!(
        extract_accessibility_needs("I use a wheelchair and have kids").extracted_value(),
        Some("mobility, dependents")
    );
    assert_eq!(extract_communication_preference("voice please").extracted_value(), Some("audio"));
    assert_eq!(extract_change_request("change my name").extracted_value(), Some("name"));

    let contact = extract_contact("Mom 054-123-4567");
    assert_eq!(contact.extracted_value(), Some("Mom 054-123-4567"));
    assert!(contact.confidence() >= 0.9);
}

#[test]
fn test_parser_type_names_round_trip() {
    for parser in ParserType::ALL {
        assert_eq!(ParserType::from_name(parser.as_str()), Some(*parser));
        let json = serde_json::to_string(parser).unwrap();
        assert_eq!(json, format!("\"{}\"", parser.as_str()));
    }
    assert_eq!(ParserType::from_name("classifyWeather"), None);
}

#[test]
fn test_results_serialize_in_camel_case() {
    let json = serde_json::to_value(extract_location("at home")).unwrap();
    assert_eq!(json["kind"], "extraction");
    assert_eq!(json["extractedValue"], "home");
    assert_eq!(json["informationType"], "location");
}

#[test]
fn test_safe_answers_mentioning_no_injury_stay_safe() {
    assert_eq!(classify_safety("I'm safe and nobody is hurt").category(), Some("SAFE"));
    assert_eq!(classify_safety("yes I'm safe, not injured").category(), Some("SAFE"));
}

#[test]
fn test_insecure_and_unprotected_are_danger() {
    assert_eq!(classify_safety("I feel insecure here").category(), Some("DANGER"));
    assert_eq!(classify_safety("we are unprotected").category(), Some("DANGER"));
}

#[test]
fn test_negated_crisis_words_are_low_stress() {
    assert_eq!(classify_stress("not panicking, doing fine").category(), Some("LOW_STRESS"));
    assert_eq!(classify_stress("I'm not scared anymore").category(), Some("LOW_STRESS"));
    assert_eq!(classify_stress("no longer scared").category(), Some("LOW_STRESS"));
    assert_eq!(classify_stress("I'm scared").category(), Some("HIGH_STRESS"));
}

#[test]
fn test_prepositions_and_numbers_are_not_names() {
    let at_home = extract_name("Hi, I'm at home");
    assert!(at_home.needs_clarification(), "got {:?}", at_home.extracted_value());

    let number = extract_name("1.5 minutes");
    assert!(number.needs_clarification(), "got {:?}", number.extracted_value());
}

#[test]
fn test_decimal_durations_round_to_seconds() {
    assert_eq!(extract_duration("1.5 minutes").extracted_value(), Some("90 seconds"));
    assert_eq!(onboarding::duration_seconds("1.5 minutes"), Some(90));
    assert_eq!(onboarding::duration_seconds("2.5 seconds"), Some(3));
    assert_eq!(onboarding::duration_seconds("2 minutes"), Some(120));
}
