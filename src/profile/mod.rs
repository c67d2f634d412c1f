//! User profiles and the onboarding hand-off.
//!
//! The engine itself never touches storage. A [`Companion`] wraps an engine
//! and a [`ProfileStore`], turns the variables captured during onboarding
//! into a [`Profile`], and forwards activity completions to the store.

use crate::classifier::activity::NO_ACTIVITY;
use crate::classifier::onboarding::{NO_NEEDS, duration_seconds, phone_number};
use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

mod companion;
mod store;

pub use companion::Companion;
pub use store::{ActivityRecord, MemoryProfileStore, ProfileStore};

/// Seconds assumed when the user gave no usable time to safety.
pub const DEFAULT_TIME_TO_SAFETY: u32 = 60;

pub const DEFAULT_PROFILE_ID: &str = "primary";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafeSpaceType {
    /// Public shelter.
    Miklat,
    /// Reinforced room inside the home.
    Mamad,
    Stairway,
    #[default]
    Other,
}

impl SafeSpaceType {
    /// Infers the kind of safe space from a free-text answer.
    pub fn infer(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("miklat") || text.contains("shelter") {
            SafeSpaceType::Miklat
        } else if ["mamad", "safe room", "reinforced"]
            .iter()
            .any(|k| text.contains(k))
        {
            SafeSpaceType::Mamad
        } else if text.contains("stair") {
            SafeSpaceType::Stairway
        } else {
            SafeSpaceType::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    He,
    Ar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    /// The answer as given, usually a name and a number.
    pub details: String,
    pub phone: Option<String>,
}

impl EmergencyContact {
    pub fn parse(details: &str) -> Self {
        Self {
            details: details.trim().to_string(),
            phone: phone_number(details).map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub safe_space_type: SafeSpaceType,
    pub safe_space_location: String,
    /// Seconds.
    pub time_to_reach_safety: u32,
    pub backup_location: Option<String>,
    pub accessibility_needs: Vec<String>,
    pub calming_preferences: Vec<String>,
    pub communication_preference: Option<String>,
    pub emergency_contacts: Vec<EmergencyContact>,
    pub language: Language,
    pub onboarding_completed: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            id: DEFAULT_PROFILE_ID.to_string(),
            name: "User".to_string(),
            safe_space_type: SafeSpaceType::Other,
            safe_space_location: String::new(),
            time_to_reach_safety: DEFAULT_TIME_TO_SAFETY,
            backup_location: None,
            accessibility_needs: Vec::new(),
            calming_preferences: Vec::new(),
            communication_preference: None,
            emergency_contacts: Vec::new(),
            language: Language::En,
            onboarding_completed: false,
        }
    }
}

/// Splits a comma separated answer, dropping blanks and repeats.
fn list(values: impl IntoIterator<Item = Option<String>>, skip: &str) -> Vec<String> {
    values
        .into_iter()
        .flatten()
        .flat_map(|value| {
            value
                .split(',')
                .map(|item| item.trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|item| !item.is_empty() && item != skip)
        .unique()
        .collect()
}

impl Profile {
    /// Builds a completed profile from the variables captured by the
    /// onboarding graph. Missing answers fall back to the defaults.
    pub fn from_variables(variables: &AHashMap<String, String>) -> Self {
        let get = |name: &str| {
            variables
                .get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Profile::default();
        let safe_space = get("safeSpace").unwrap_or_default();

        Self {
            name: get("name").unwrap_or(defaults.name),
            safe_space_type: SafeSpaceType::infer(&safe_space),
            safe_space_location: get("safeSpaceLocation").unwrap_or(safe_space),
            time_to_reach_safety: get("timeToSafety")
                .and_then(|t| duration_seconds(&t))
                .unwrap_or(DEFAULT_TIME_TO_SAFETY),
            backup_location: get("backupLocation"),
            accessibility_needs: list(
                [get("accessibilityNeeds"), get("accessibilityDetails")],
                NO_NEEDS,
            ),
            calming_preferences: list([get("calmingPreference")], NO_ACTIVITY),
            communication_preference: get("communicationPreference"),
            emergency_contacts: get("emergencyContact")
                .map(|c| vec![EmergencyContact::parse(&c)])
                .unwrap_or_default(),
            onboarding_completed: true,
            ..defaults
        }
    }
}
