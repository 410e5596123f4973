//! Bevy-side request handling: road updates come in as events, decision
//! requests are queued with a ticket, computed on the async task pool and
//! published to [`LatestDecisions`] and as [`SignalDecisionReady`] events.

mod plugin;
mod systems;
mod types;

pub use plugin::DecisionServicePlugin;
pub use systems::{
    advance_tick, apply_road_updates, collect_decisions, dispatch_decision_requests,
    queue_decision_requests, ComputingDecision,
};
pub use types::{
    DecisionQueue, DecisionRecord, LatestDecisions, SignalDecisionReady, SignalDecisionRequest,
    TickCounter,
};
