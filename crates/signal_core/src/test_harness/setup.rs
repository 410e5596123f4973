//! Builder methods for topology, traffic and phase setup.

use crate::network::TrafficNetwork;
use crate::phase_state::{Axis, PhaseStatesHandle};
use crate::topology::{road_id_for, seed_grid, Intersection, Road};
use crate::traffic_state::Observation;

use super::TestNetwork;

impl TestNetwork {
    pub fn with_intersections<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut network = self.app.world_mut().resource_mut::<TrafficNetwork>();
        for id in ids {
            network
                .topology_mut()
                .upsert_intersection(Intersection::new(id));
        }
        self
    }

    /// Add a directed road `from -> to` with the conventional id.
    pub fn with_road(mut self, from: &str, to: &str) -> Self {
        self.app
            .world_mut()
            .resource_mut::<TrafficNetwork>()
            .topology_mut()
            .add_road(Road::between(from, to));
        self
    }

    /// Write an observation for `from -> to` directly, bypassing validation
    /// and the event queue.
    pub fn with_observation(
        mut self,
        from: &str,
        to: &str,
        queue_length: u32,
        vehicle_count: u32,
        avg_speed: f64,
    ) -> Self {
        self.app
            .world_mut()
            .resource_mut::<TrafficNetwork>()
            .traffic_mut()
            .upsert(
                road_id_for(from, to),
                Observation::new(vehicle_count, avg_speed, queue_length),
            );
        self
    }

    /// Replace the topology with a seeded grid.
    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        let mut network = self.app.world_mut().resource_mut::<TrafficNetwork>();
        seed_grid(
            network.topology_mut(),
            rows,
            cols,
            crate::config::DEFAULT_GRID_SPACING,
        );
        self
    }

    /// Preset the active axis of an intersection.
    pub fn with_phase(self, id: &str, axis: Axis) -> Self {
        self.app.world().resource::<PhaseStatesHandle>().0.store(id, axis);
        self
    }
}
