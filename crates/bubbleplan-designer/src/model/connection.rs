use serde::{Deserialize, Serialize};

use super::SpaceId;

/// Required-adjacency edge between two spaces. Endpoint order carries no
/// meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub from_id: SpaceId,
    pub to_id: SpaceId,
}

impl Connection {
    pub fn new(from_id: SpaceId, to_id: SpaceId) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            from_id,
            to_id,
        }
    }

    /// True when this connection joins `a` and `b` in either direction.
    pub fn joins(&self, a: &SpaceId, b: &SpaceId) -> bool {
        (&self.from_id == a && &self.to_id == b) || (&self.from_id == b && &self.to_id == a)
    }

    pub fn involves(&self, id: &SpaceId) -> bool {
        &self.from_id == id || &self.to_id == id
    }
}
