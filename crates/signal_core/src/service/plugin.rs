use bevy::prelude::*;

use crate::signal_sets::SignalSet;
use crate::traffic_state::RoadTrafficUpdate;

use super::systems::{
    advance_tick, apply_road_updates, collect_decisions, dispatch_decision_requests,
    queue_decision_requests,
};
use super::types::{
    DecisionQueue, LatestDecisions, SignalDecisionReady, SignalDecisionRequest, TickCounter,
};

pub struct DecisionServicePlugin;

impl Plugin for DecisionServicePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TickCounter>()
            .init_resource::<DecisionQueue>()
            .init_resource::<LatestDecisions>()
            .add_event::<RoadTrafficUpdate>()
            .add_event::<SignalDecisionRequest>()
            .add_event::<SignalDecisionReady>()
            .add_systems(
                FixedUpdate,
                (advance_tick, apply_road_updates, queue_decision_requests)
                    .chain()
                    .in_set(SignalSet::Ingest),
            )
            .add_systems(
                FixedUpdate,
                dispatch_decision_requests.in_set(SignalSet::Dispatch),
            )
            .add_systems(
                FixedUpdate,
                (bevy::ecs::schedule::apply_deferred, collect_decisions)
                    .chain()
                    .in_set(SignalSet::Collect),
            );
    }
}
