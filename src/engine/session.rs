use crate::error::EngineError;
use crate::graph::GraphId;
use ahash::{AHashMap, AHashSet};
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};

/// A request for the host to run an activity, then resume at `return_node`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTrigger {
    pub activity_name: String,
    pub return_node: String,
}

/// The mutable state of one conversation.
///
/// Only [`DialogueEngine`](super::DialogueEngine) mutates a session; hosts
/// read it through the accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub(crate) graph: GraphId,
    pub(crate) current_node: String,
    pub(crate) variables: AHashMap<String, String>,
    pub(crate) attempted: AHashSet<String>,
    pub(crate) pending: Option<ActivityTrigger>,
}

impl Session {
    pub(crate) fn new(graph: GraphId, start: &str) -> Self {
        Self {
            graph,
            current_node: start.to_string(),
            variables: AHashMap::new(),
            attempted: AHashSet::new(),
            pending: None,
        }
    }

    pub fn graph(&self) -> GraphId {
        self.graph
    }

    pub fn current_node(&self) -> &str {
        &self.current_node
    }

    pub fn variables(&self) -> &AHashMap<String, String> {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn attempted_activities(&self) -> &AHashSet<String> {
        &self.attempted
    }

    /// The activity the host is running, if any.
    pub fn pending_activity(&self) -> Option<&ActivityTrigger> {
        self.pending.as_ref()
    }
}

const SNAPSHOT_VERSION: u32 = 1;

/// A serialized session, restorable with
/// [`DialogueEngine::restore`](super::DialogueEngine::restore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    version: u32,
    session: Session,
}

impl SessionSnapshot {
    pub(crate) fn new(session: Session) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn into_session(self) -> Session {
        self.session
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        encode_to_vec(self, standard())
            .map_err(|e| EngineError::Snapshot(format!("Serialization failed: {}", e)))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        let snapshot: Self = decode_from_slice(bytes, standard())
            .map(|(snapshot, _)| snapshot)
            .map_err(|e| EngineError::Snapshot(format!("Deserialization failed: {}", e)))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(EngineError::Snapshot(format!(
                "Unsupported snapshot version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }
        Ok(snapshot)
    }
}
