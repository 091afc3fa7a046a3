//! Node ID generation and management

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for an element or page in a canvas document.
///
/// Stored documents carry arbitrary string ids, so the id is kept as a string.
/// Fresh ids are UUID v4 strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a new random NodeId
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the string form of this id
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the stored id is empty (legacy records)
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<Uuid> for NodeId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }
}
