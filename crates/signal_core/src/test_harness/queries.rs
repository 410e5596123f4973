use std::time::Duration;

use bevy::prelude::*;

use crate::coordination::CoordinationOutcome;
use crate::error::EngineError;
use crate::network::TrafficNetwork;
use crate::phase_state::{Axis, PhaseStatesHandle};
use crate::service::{DecisionQueue, LatestDecisions, SignalDecisionReady};
use crate::topology::IntersectionId;
use crate::traffic_state::RoadTrafficUpdate;

use super::TestNetwork;

/// Upper bound on ticks spent waiting for one decision.
const MAX_WAIT_TICKS: u32 = 10_000;

impl TestNetwork {
    // -----------------------------------------------------------------------
    // Simulation control
    // -----------------------------------------------------------------------

    /// Run N fixed-update ticks by executing the `FixedUpdate` schedule
    /// directly, yielding between ticks so the async task pool progresses.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
            std::thread::yield_now();
        }
    }

    /// Queue a road measurement; it is applied on the next tick.
    pub fn send_update(&mut self, update: RoadTrafficUpdate) {
        self.app.world_mut().send_event(update);
    }

    /// Queue a decision request and return its ticket.
    pub fn request(&mut self, id: &str) -> u64 {
        self.app
            .world_mut()
            .resource_mut::<DecisionQueue>()
            .push(id)
    }

    /// Tick until the decision for `ticket` has been collected.
    ///
    /// Panics if it does not arrive within `MAX_WAIT_TICKS`.
    pub fn wait_for(&mut self, id: &str, ticket: u64) -> Result<CoordinationOutcome, EngineError> {
        for attempt in 0..MAX_WAIT_TICKS {
            if let Some(record) = self.latest().answered(id, ticket) {
                return record.result.clone();
            }
            self.tick(1);
            if attempt > 100 {
                std::thread::sleep(Duration::from_millis(1));
            }
        }
        panic!("no decision for {id} (ticket {ticket}) after {MAX_WAIT_TICKS} ticks");
    }

    /// Request a decision and wait for it.
    pub fn decide(&mut self, id: &str) -> Result<CoordinationOutcome, EngineError> {
        let ticket = self.request(id);
        self.wait_for(id, ticket)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn network(&self) -> &TrafficNetwork {
        self.resource::<TrafficNetwork>()
    }

    pub fn latest(&self) -> &LatestDecisions {
        self.resource::<LatestDecisions>()
    }

    /// Stored active axis of `id`, if it has been seen.
    pub fn phase(&self, id: &str) -> Option<Axis> {
        self.resource::<PhaseStatesHandle>().0.get(id)
    }

    /// Remove and return every `SignalDecisionReady` event sent so far.
    pub fn drain_ready(&mut self) -> Vec<SignalDecisionReady> {
        self.app
            .world_mut()
            .resource_mut::<Events<SignalDecisionReady>>()
            .drain()
            .collect()
    }

    /// Ids of every intersection, in insertion order.
    pub fn intersection_ids(&self) -> Vec<IntersectionId> {
        self.network().topology().intersection_ids().cloned().collect()
    }
}
