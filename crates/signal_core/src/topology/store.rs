use std::collections::HashMap;

use crate::error::EngineError;

use super::provider::TopologyProvider;
use super::types::{Intersection, IntersectionId, Road};

/// In-memory road graph with per-node incoming/outgoing edge indexes.
///
/// Edge indexes keep insertion order, so repeated queries return roads in the
/// order they were added. Parallel roads between the same pair of
/// intersections are kept as separate edges.
#[derive(Debug, Clone, Default)]
pub struct RoadNetworkStore {
    intersections: HashMap<IntersectionId, Intersection>,
    /// Intersection ids in first-insertion order, for stable listings.
    order: Vec<IntersectionId>,
    roads: Vec<Road>,
    outgoing: HashMap<IntersectionId, Vec<usize>>,
    incoming: HashMap<IntersectionId, Vec<usize>>,
}

impl RoadNetworkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an intersection by id. Existing roads are untouched.
    pub fn upsert_intersection(&mut self, intersection: Intersection) {
        if !self.intersections.contains_key(&intersection.id) {
            self.order.push(intersection.id.clone());
        }
        self.intersections
            .insert(intersection.id.clone(), intersection);
    }

    /// Append a directed road. Endpoints are not required to exist yet; a road
    /// pointing at an unknown intersection simply resolves to NotFound when the
    /// engine follows it.
    pub fn add_road(&mut self, road: Road) {
        let index = self.roads.len();
        self.outgoing
            .entry(road.from.clone())
            .or_default()
            .push(index);
        self.incoming.entry(road.to.clone()).or_default().push(index);
        self.roads.push(road);
    }

    /// Remove every intersection and road.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn intersection(&self, id: &str) -> Option<&Intersection> {
        self.intersections.get(id)
    }

    /// All intersections in first-insertion order.
    pub fn intersections(&self) -> impl Iterator<Item = &Intersection> {
        self.order
            .iter()
            .filter_map(|id| self.intersections.get(id))
    }

    pub fn intersection_ids(&self) -> impl Iterator<Item = &IntersectionId> {
        self.order.iter()
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    pub fn intersection_count(&self) -> usize {
        self.intersections.len()
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    fn edges<'a>(
        &'a self,
        index: &'a HashMap<IntersectionId, Vec<usize>>,
        id: &str,
    ) -> impl Iterator<Item = &'a Road> + 'a {
        index
            .get(id)
            .into_iter()
            .flatten()
            .map(move |&i| &self.roads[i])
    }

    /// Outgoing roads of an existing intersection; NotFound otherwise.
    pub fn outgoing_checked(&self, id: &str) -> Result<Vec<Road>, EngineError> {
        if !self.intersections.contains_key(id) {
            return Err(EngineError::not_found(id));
        }
        Ok(self.edges(&self.outgoing, id).cloned().collect())
    }

    /// Incoming roads of an existing intersection; NotFound otherwise.
    pub fn incoming_checked(&self, id: &str) -> Result<Vec<Road>, EngineError> {
        if !self.intersections.contains_key(id) {
            return Err(EngineError::not_found(id));
        }
        Ok(self.edges(&self.incoming, id).cloned().collect())
    }
}

impl TopologyProvider for RoadNetworkStore {
    fn get_intersection(&self, id: &str) -> Result<Option<Intersection>, EngineError> {
        Ok(self.intersections.get(id).cloned())
    }

    fn outgoing_roads(&self, id: &str) -> Result<Vec<Road>, EngineError> {
        Ok(self.edges(&self.outgoing, id).cloned().collect())
    }

    fn incoming_roads(&self, id: &str) -> Result<Vec<Road>, EngineError> {
        Ok(self.edges(&self.incoming, id).cloned().collect())
    }

    fn contains_intersection(&self, id: &str) -> Result<bool, EngineError> {
        Ok(self.intersections.contains_key(id))
    }
}
