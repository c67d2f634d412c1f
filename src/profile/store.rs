use super::Profile;
use crate::error::ProfileError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// The persistence port used at the onboarding and activity boundaries.
///
/// Hosts back this with whatever storage they have; the engine never calls it
/// directly.
pub trait ProfileStore {
    fn get_active_profile(&self) -> Result<Option<Profile>, ProfileError>;

    /// Stores `profile` and makes it the active one.
    fn save_profile(&mut self, profile: Profile) -> Result<(), ProfileError>;

    fn record_activity(
        &mut self,
        profile_id: &str,
        activity: &str,
        completed: bool,
    ) -> Result<(), ProfileError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub profile_id: String,
    pub activity: String,
    pub completed: bool,
}

/// A `ProfileStore` that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profiles: AHashMap<String, Profile>,
    active: Option<String>,
    history: Vec<ActivityRecord>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `profile` as the active one.
    pub fn with_profile(profile: Profile) -> Self {
        let mut store = Self::new();
        store.active = Some(profile.id.clone());
        store.profiles.insert(profile.id.clone(), profile);
        store
    }

    pub fn profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.get(id)
    }

    /// Every recorded activity, oldest first.
    pub fn history(&self) -> &[ActivityRecord] {
        &self.history
    }
}

impl ProfileStore for MemoryProfileStore {
    fn get_active_profile(&self) -> Result<Option<Profile>, ProfileError> {
        Ok(self
            .active
            .as_ref()
            .and_then(|id| self.profiles.get(id))
            .cloned())
    }

    fn save_profile(&mut self, profile: Profile) -> Result<(), ProfileError> {
        self.active = Some(profile.id.clone());
        self.profiles.insert(profile.id.clone(), profile);
        Ok(())
    }

    fn record_activity(
        &mut self,
        profile_id: &str,
        activity: &str,
        completed: bool,
    ) -> Result<(), ProfileError> {
        if !self.profiles.contains_key(profile_id) {
            return Err(ProfileError::NotFound {
                id: profile_id.to_string(),
            });
        }
        self.history.push(ActivityRecord {
            profile_id: profile_id.to_string(),
            activity: activity.to_string(),
            completed,
        });
        Ok(())
    }
}
