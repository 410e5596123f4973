use std::collections::HashMap;

use crate::error::EngineError;
use crate::topology::RoadId;

use super::types::Observation;

/// Read-only access to the latest observation per road.
pub trait TrafficStateStore {
    /// `Ok(None)` is a data gap, not an error: the road contributes nothing.
    fn get_observation(&self, road_id: &str) -> Result<Option<Observation>, EngineError>;
}

/// Whether an upsert created a new record or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// In-memory traffic state keyed by road id.
#[derive(Debug, Clone, Default)]
pub struct TrafficStateTable {
    observations: HashMap<RoadId, Observation>,
}

impl TrafficStateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&mut self, road_id: RoadId, observation: Observation) -> UpsertOutcome {
        match self.observations.insert(road_id, observation) {
            Some(_) => UpsertOutcome::Updated,
            None => UpsertOutcome::Created,
        }
    }

    pub fn get(&self, road_id: &str) -> Option<&Observation> {
        self.observations.get(road_id)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn clear(&mut self) {
        self.observations.clear();
    }
}

impl TrafficStateStore for TrafficStateTable {
    fn get_observation(&self, road_id: &str) -> Result<Option<Observation>, EngineError> {
        Ok(self.observations.get(road_id).cloned())
    }
}
