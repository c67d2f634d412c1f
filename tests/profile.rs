//! Tests for the onboarding hand-off and activity recording.
mod common;
use calme::profile::DEFAULT_PROFILE_ID;
use common::*;
use calme::prelude::*;

const ONBOARDING_ANSWERS: &[&str] = &[
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
    "yes",
];

fn onboarded() -> Companion<MemoryProfileStore> {
    let mut companion = Companion::start(builtin_graphs(), MemoryProfileStore::new()).unwrap();
    assert_eq!(companion.engine().graph_id(), GraphId::Onboarding);
    for answer in ONBOARDING_ANSWERS {
        companion.respond(answer).unwrap();
    }
    assert_eq!(companion.current_node().unwrap().id, "onboard_test_offer");

    let farewell = companion.respond("no thanks").unwrap();
    assert_eq!(farewell.node.id, "onboard_complete");
    assert!(farewell.node.content.contains("ready, Dana"));
    companion
}

#[test]
fn test_onboarding_builds_and_saves_a_profile() {
    let companion = onboarded();

    let profile = companion.profile().expect("profile built");
    assert_eq!(profile.id, DEFAULT_PROFILE_ID);
    assert_eq!(profile.name, "Dana");
    assert_eq!(profile.safe_space_type, SafeSpaceType::Miklat);
    assert_eq!(profile.safe_space_location, "Herzl street");
    assert_eq!(profile.time_to_reach_safety, 120);
    assert_eq!(profile.backup_location.as_deref(), Some("stairwell"));
    assert!(profile.accessibility_needs.is_empty());
    assert_eq!(profile.calming_preferences, ["breathing"]);
    assert_eq!(profile.communication_preference.as_deref(), Some("audio"));
    assert!(profile.onboarding_completed);

    assert_eq!(
        companion.store().get_active_profile().unwrap().as_ref(),
        Some(profile)
    );
}

#[test]
fn test_onboarding_hands_off_to_the_main_graph() {
    let companion = onboarded();
    assert_eq!(companion.engine().graph_id(), GraphId::Main);
    assert_eq!(companion.current_node().unwrap().id, "safety_check");
    assert_eq!(companion.engine().variable("name"), Some("Dana"));
}

#[test]
fn test_returning_user_starts_in_main_with_name() {
    let (_, store) = onboarded().into_parts();
    let companion = Companion::start(builtin_graphs(), store).unwrap();
    assert_eq!(companion.engine().graph_id(), GraphId::Main);
    assert_eq!(companion.engine().variable("name"), Some("Dana"));
}

#[test]
fn test_incomplete_profile_restarts_onboarding() {
    let store = MemoryProfileStore::with_profile(Profile::default());
    let companion = Companion::start(builtin_graphs(), store).unwrap();
    assert_eq!(companion.engine().graph_id(), GraphId::Onboarding);
}

#[test]
fn test_activities_are_recorded_against_the_profile() {
    let mut companion = onboarded();
    companion.respond("yes I'm safe at home").unwrap();
    let step = companion.respond("I can't breathe").unwrap();
    assert!(step.activity_trigger.is_some());

    companion.resume_after_activity(true).unwrap();

    let history = companion.store().history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].profile_id, DEFAULT_PROFILE_ID);
    assert_eq!(history[0].activity, "breathing");
    assert!(history[0].completed);
}

#[test]
fn test_onboarding_test_activity_is_not_recorded() {
    let mut companion = Companion::start(builtin_graphs(), MemoryProfileStore::new()).unwrap();
    companion.engine_mut().move_to_node("onboard_test_offer").unwrap();
    assert_eq!(companion.respond("yes").unwrap().node.id, "onboard_test_sound");

    let step = companion.respond("yes, ready").unwrap();
    assert_eq!(step.activity_trigger.unwrap().activity_name, "breathing");
    companion.resume_after_activity(true).unwrap();
    assert!(companion.store().history().is_empty());

    let farewell = companion.advance().unwrap();
    assert!(farewell.node.is_end());
    assert_eq!(companion.profile().map(|p| p.name.as_str()), Some("User"));
    assert_eq!(companion.engine().graph_id(), GraphId::Main);
}

#[test]
fn test_alert_switch_from_companion() {
    let mut companion = onboarded();
    assert_eq!(companion.alert().unwrap().id, "alert_start");
    assert_eq!(companion.engine().graph_id(), GraphId::Alert);
}

#[test]
fn test_recording_for_an_unknown_profile_fails() {
    let mut store = MemoryProfileStore::new();
    assert_eq!(
        store.record_activity("ghost", "breathing", true),
        Err(ProfileError::NotFound {
            id: "ghost".to_string()
        })
    );
}

#[test]
fn test_profile_serializes_in_camel_case() {
    let json = serde_json::to_value(Profile::default()).unwrap();
    assert_eq!(json["timeToReachSafety"], 60);
    assert_eq!(json["safeSpaceType"], "other");
    assert_eq!(json["language"], "en");
}

/// Delegates to a `MemoryProfileStore` but fails the first `failures` activity writes.
struct FlakyStore {
    inner: MemoryProfileStore,
    failures: usize,
}

impl ProfileStore for FlakyStore {
    fn get_active_profile(&self) -> Result<Option<Profile>, ProfileError> {
        self.inner.get_active_profile()
    }

    fn save_profile(&mut self, profile: Profile) -> Result<(), ProfileError> {
        self.inner.save_profile(profile)
    }

    fn record_activity(
        &mut self,
        profile_id: &str,
        activity: &str,
        completed: bool,
    ) -> Result<(), ProfileError> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(ProfileError::Storage("disk full".to_string()));
        }
        self.inner.record_activity(profile_id, activity, completed)
    }
}

#[test]
fn test_failed_activity_write_leaves_the_activity_pending() {
    let (_, inner) = onboarded().into_parts();
    let store = FlakyStore { inner, failures: 1 };
    let mut companion = Companion::start(builtin_graphs(), store).unwrap();
    companion.respond("yes I'm safe at home").unwrap();
    assert!(companion.respond("I can't breathe").unwrap().activity_trigger.is_some());

    assert_eq!(
        companion.resume_after_activity(true).unwrap_err(),
        ProfileError::Storage("disk full".to_string())
    );
    assert_eq!(
        companion.engine().pending_activity().map(|t| t.activity_name.as_str()),
        Some("breathing")
    );

    let step = companion.resume_after_activity(true).unwrap();
    assert_eq!(step.node.id, "breathing_return");
    assert_eq!(companion.store().inner.history().len(), 1);
}
