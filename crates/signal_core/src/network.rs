//! The engine's data source: topology plus traffic state behind one handle.
//!
//! [`TrafficNetwork`] holds the current [`NetworkSnapshot`] in an `Arc`.
//! Decision tasks clone the `Arc` when they are dispatched and read from that
//! snapshot for their whole lifetime, while writes go through
//! `Arc::make_mut` and only ever touch a fresh copy once a task holds the old one.

use std::sync::Arc;

use bevy::prelude::*;

use crate::error::{EngineError, UpdateRejected};
use crate::topology::{road_id_for, Intersection, Road, RoadNetworkStore, TopologyProvider};
use crate::traffic_state::{
    Observation, RoadTrafficUpdate, TrafficStateStore, TrafficStateTable, UpsertOutcome,
};

/// Everything the engine reads: the road graph and per-road traffic.
pub trait DataSource: TopologyProvider + TrafficStateStore {}

impl<T: TopologyProvider + TrafficStateStore + ?Sized> DataSource for T {}

/// Immutable view of topology and traffic at one point in time.
#[derive(Debug, Clone, Default)]
pub struct NetworkSnapshot {
    pub topology: RoadNetworkStore,
    pub traffic: TrafficStateTable,
}

impl NetworkSnapshot {
    pub fn new(topology: RoadNetworkStore, traffic: TrafficStateTable) -> Self {
        Self { topology, traffic }
    }

    // -----------------------------------------------------------------------
    // Builder helpers (fixtures, benches, the agent binary)
    // -----------------------------------------------------------------------

    pub fn with_intersections<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        for id in ids {
            self.topology.upsert_intersection(Intersection::new(id));
        }
        self
    }

    /// Add a road `from -> to` with the conventional id.
    pub fn with_road(mut self, from: &str, to: &str) -> Self {
        self.topology.add_road(Road::between(from, to));
        self
    }

    /// Record an observation for the road `from -> to`.
    pub fn with_observation(
        mut self,
        from: &str,
        to: &str,
        queue_length: u32,
        vehicle_count: u32,
        avg_speed: f64,
    ) -> Self {
        self.traffic.upsert(
            road_id_for(from, to),
            Observation::new(vehicle_count, avg_speed, queue_length),
        );
        self
    }
}

impl TopologyProvider for NetworkSnapshot {
    fn get_intersection(&self, id: &str) -> Result<Option<Intersection>, EngineError> {
        self.topology.get_intersection(id)
    }

    fn outgoing_roads(&self, id: &str) -> Result<Vec<Road>, EngineError> {
        self.topology.outgoing_roads(id)
    }

    fn incoming_roads(&self, id: &str) -> Result<Vec<Road>, EngineError> {
        self.topology.incoming_roads(id)
    }

    fn contains_intersection(&self, id: &str) -> Result<bool, EngineError> {
        self.topology.contains_intersection(id)
    }
}

impl TrafficStateStore for NetworkSnapshot {
    fn get_observation(&self, road_id: &str) -> Result<Option<Observation>, EngineError> {
        self.traffic.get_observation(road_id)
    }
}

/// Resource owning the live network snapshot.
#[derive(Resource, Default)]
pub struct TrafficNetwork {
    snapshot: Arc<NetworkSnapshot>,
    /// Bumped on every mutation.
    pub version: u64,
}

impl TrafficNetwork {
    pub fn new(snapshot: NetworkSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
            version: 0,
        }
    }

    /// Shared handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<NetworkSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn topology(&self) -> &RoadNetworkStore {
        &self.snapshot.topology
    }

    pub fn traffic(&self) -> &TrafficStateTable {
        &self.snapshot.traffic
    }

    pub fn topology_mut(&mut self) -> &mut RoadNetworkStore {
        self.version += 1;
        &mut Arc::make_mut(&mut self.snapshot).topology
    }

    pub fn traffic_mut(&mut self) -> &mut TrafficStateTable {
        self.version += 1;
        &mut Arc::make_mut(&mut self.snapshot).traffic
    }

    /// Validate and upsert one road's observation.
    pub fn apply_update(
        &mut self,
        update: RoadTrafficUpdate,
    ) -> Result<UpsertOutcome, UpdateRejected> {
        let (road_id, observation) = update.into_observation()?;
        info!(
            "Road traffic update: road_id={}, timestamp={}, vehicle_count={}, avg_speed={}, queue_length={}",
            road_id,
            observation.timestamp,
            observation.vehicle_count,
            observation.avg_speed,
            observation.queue_length
        );
        Ok(self.traffic_mut().upsert(road_id, observation))
    }
}
