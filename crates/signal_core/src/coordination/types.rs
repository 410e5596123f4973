use std::fmt;

use serde::{Deserialize, Serialize};

use crate::congestion::CongestionLevel;
use crate::phase_state::Axis;
use crate::topology::IntersectionId;

/// Externally visible signal decision for one intersection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalDecision {
    pub intersection_id: IntersectionId,
    pub active_axis: Axis,
    pub green_time: u32,
    pub red_time: u32,
    pub level: CongestionLevel,
    /// This node's own one-hop block status, independent of the chosen axis.
    pub downstream_blocked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoordinationReason {
    DownstreamBlocked,
    GreenWaveAlignment,
    LocalDefault,
}

impl CoordinationReason {
    pub fn as_str(self) -> &'static str {
        match self {
            CoordinationReason::DownstreamBlocked => "DOWNSTREAM_BLOCKED",
            CoordinationReason::GreenWaveAlignment => "GREEN_WAVE_ALIGNMENT",
            CoordinationReason::LocalDefault => "LOCAL_DEFAULT",
        }
    }
}

impl fmt::Display for CoordinationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a downstream neighbour contributes to rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownstreamState {
    pub intersection_id: IntersectionId,
    /// `None` when the neighbour reported no axis; such states only ever
    /// fall through to the next rule.
    pub active_axis: Option<Axis>,
    pub downstream_blocked: bool,
}

impl DownstreamState {
    pub fn from_decision(decision: &SignalDecision) -> Self {
        Self {
            intersection_id: decision.intersection_id.clone(),
            active_axis: Some(decision.active_axis),
            downstream_blocked: decision.downstream_blocked,
        }
    }
}

/// Output of the rule set: the axis, why it was chosen, and the neighbour it
/// was taken from (none for `LOCAL_DEFAULT`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisResolution {
    pub axis: Axis,
    pub reason: CoordinationReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<IntersectionId>,
}

/// A decision together with how its axis was obtained. `resolution` is `None`
/// for local-only decisions (cycle or depth limit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoordinationOutcome {
    pub decision: SignalDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<AxisResolution>,
}
