use crate::error::EngineError;

use super::types::{Intersection, Road};

/// Read-only access to the directed road graph.
///
/// Implementations backed by a remote store return `EngineError::Backend` when a
/// query fails. Road sequences are returned in the store's order; the engine
/// relies on that order for downstream discovery.
pub trait TopologyProvider {
    fn get_intersection(&self, id: &str) -> Result<Option<Intersection>, EngineError>;

    /// Roads with `from == id`.
    fn outgoing_roads(&self, id: &str) -> Result<Vec<Road>, EngineError>;

    /// Roads with `to == id`.
    fn incoming_roads(&self, id: &str) -> Result<Vec<Road>, EngineError>;

    fn contains_intersection(&self, id: &str) -> Result<bool, EngineError> {
        Ok(self.get_intersection(id)?.is_some())
    }
}
