use super::{Profile, ProfileStore};
use crate::classifier::ParserResult;
use crate::engine::{DialogueEngine, RenderableNode, Step};
use crate::error::ProfileError;
use crate::graph::{GraphId, GraphSet};
use tracing::info;

/// Drives a [`DialogueEngine`] on behalf of one user.
///
/// A user without a completed profile starts in onboarding. When onboarding
/// reaches its end node the captured answers become a [`Profile`], the store
/// saves it and the engine moves on to the main graph. The step that reached
/// the end node is still returned so the host can show its farewell; the
/// engine is already on the main graph's start node by then.
pub struct Companion<S: ProfileStore> {
    engine: DialogueEngine,
    store: S,
    profile: Option<Profile>,
}

impl<S: ProfileStore> Companion<S> {
    pub fn start(graphs: GraphSet, store: S) -> Result<Self, ProfileError> {
        let profile = store
            .get_active_profile()?
            .filter(|profile| profile.onboarding_completed);
        let engine = match &profile {
            Some(profile) => DialogueEngine::builder(graphs)
                .start_in(GraphId::Main)
                .with_variable("name", profile.name.as_str())
                .build(),
            None => DialogueEngine::builder(graphs)
                .start_in(GraphId::Onboarding)
                .build(),
        };
        info!(graph = %engine.graph_id(), "companion session started");
        Ok(Self {
            engine,
            store,
            profile,
        })
    }

    pub fn engine(&self) -> &DialogueEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut DialogueEngine {
        &mut self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn into_parts(self) -> (DialogueEngine, S) {
        (self.engine, self.store)
    }

    pub fn current_node(&self) -> Result<RenderableNode, ProfileError> {
        Ok(self.engine.get_current_node()?)
    }

    pub fn respond(&mut self, utterance: &str) -> Result<Step, ProfileError> {
        let step = self.engine.respond(utterance)?;
        self.after(step)
    }

    pub fn submit(&mut self, result: &ParserResult) -> Result<Step, ProfileError> {
        let step = self.engine.submit_result(result)?;
        self.after(step)
    }

    pub fn advance(&mut self) -> Result<Step, ProfileError> {
        let step = self.engine.advance()?;
        self.after(step)
    }

    /// Records the activity against the active profile, then resumes the engine.
    /// Activities run before a profile exists are not recorded. If the store
    /// fails the engine stays parked on the activity, so the call can be retried.
    pub fn resume_after_activity(&mut self, completed: bool) -> Result<Step, ProfileError> {
        if let (Some(profile), Some(trigger)) = (&self.profile, self.engine.pending_activity()) {
            self.store
                .record_activity(&profile.id, &trigger.activity_name, completed)?;
        }
        let step = self.engine.resume_after_activity(completed)?;
        self.after(step)
    }

    /// Jumps to the alert fast path.
    pub fn alert(&mut self) -> Result<RenderableNode, ProfileError> {
        Ok(self.engine.switch_graph(GraphId::Alert)?)
    }

    fn after(&mut self, step: Step) -> Result<Step, ProfileError> {
        if self.engine.graph_id() == GraphId::Onboarding && step.node.is_end() {
            self.finish_onboarding()?;
        }
        Ok(step)
    }

    fn finish_onboarding(&mut self) -> Result<(), ProfileError> {
        let profile = Profile::from_variables(self.engine.session().variables());
        info!(
            profile = %profile.id,
            safe_space = ?profile.safe_space_type,
            seconds_to_safety = profile.time_to_reach_safety,
            "onboarding complete"
        );
        self.store.save_profile(profile.clone())?;
        self.profile = Some(profile);
        self.engine.switch_graph(GraphId::Main)?;
        Ok(())
    }
}
