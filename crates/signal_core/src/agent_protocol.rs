//! JSON-lines protocol for the headless `signaliq` binary.
//!
//! Each line on stdin is one [`AgentCommand`] tagged by `"cmd"`; each line on
//! stdout is one [`AgentResponse`] carrying `"protocol_version"` and a
//! `"type"` tag. The I/O loop lives in `crates/app/src/agent_mode.rs`; the
//! types live here so they can be tested without the binary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aggregation::LoadSnapshot;
use crate::config::DEFAULT_GRID_SPACING;
use crate::congestion::CongestionReport;
use crate::coordination::{AxisResolution, CoordinationOutcome, SignalDecision};
use crate::error::EngineError;
use crate::phase_state::Axis;
use crate::topology::{Intersection, IntersectionId, Road, RoadId, SeedSummary};
use crate::traffic_state::{Observation, RoadTrafficUpdate};

// ---------------------------------------------------------------------------
// Commands (stdin → engine)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(tag = "cmd")]
pub enum AgentCommand {
    /// Replace the topology with a `rows × cols` grid.
    #[serde(rename = "seed_grid")]
    SeedGrid {
        rows: usize,
        cols: usize,
        #[serde(default = "default_spacing")]
        spacing: f64,
    },

    #[serde(rename = "add_intersection")]
    AddIntersection { intersection: Intersection },

    #[serde(rename = "add_road")]
    AddRoad(RoadSpec),

    /// Ingest one road measurement.
    #[serde(rename = "road_update")]
    RoadUpdate(RoadTrafficUpdate),

    /// Current observation of one road.
    #[serde(rename = "road")]
    Road { road_id: RoadId },

    #[serde(rename = "intersection")]
    Intersection { intersection_id: IntersectionId },

    /// Roads ending at an intersection, in insertion order.
    #[serde(rename = "incoming")]
    Incoming { intersection_id: IntersectionId },

    /// Roads starting at an intersection, in insertion order.
    #[serde(rename = "outgoing")]
    Outgoing { intersection_id: IntersectionId },

    #[serde(rename = "snapshot")]
    Snapshot { intersection_id: IntersectionId },

    #[serde(rename = "congestion")]
    Congestion { intersection_id: IntersectionId },

    /// Coordinated signal decision for one intersection.
    #[serde(rename = "signal")]
    Signal {
        intersection_id: IntersectionId,
        /// Include the rule resolution in the response.
        #[serde(default)]
        trace: bool,
    },

    /// Decisions for every intersection, in topology order.
    #[serde(rename = "signal_all")]
    SignalAll,

    #[serde(rename = "topology")]
    Topology,

    /// Current active axis of every intersection seen so far.
    #[serde(rename = "phases")]
    Phases,

    #[serde(rename = "quit")]
    Quit,
}

fn default_spacing() -> f64 {
    DEFAULT_GRID_SPACING
}

/// A road as written by clients: the id is optional and defaults to
/// `"{from}->{to}"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoadSpec {
    pub from: IntersectionId,
    pub to: IntersectionId,
    #[serde(default)]
    pub road_id: Option<RoadId>,
    #[serde(default)]
    pub length_m: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl RoadSpec {
    pub fn into_road(self) -> Road {
        let mut road = Road::between(self.from, self.to);
        if let Some(id) = self.road_id {
            road = road.with_id(id);
        }
        if let Some(length) = self.length_m {
            road = road.with_length(length);
        }
        road.name = self.name;
        road
    }
}

/// Initial network loaded by the binary from `SIGNALIQ_NETWORK`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NetworkFile {
    pub intersections: Vec<Intersection>,
    pub roads: Vec<RoadSpec>,
    pub observations: Vec<RoadTrafficUpdate>,
}

// ---------------------------------------------------------------------------
// Responses (engine → stdout)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub protocol_version: u32,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ResponsePayload {
    #[serde(rename = "ready")]
    Ready,

    #[serde(rename = "seeded")]
    Seeded { summary: SeedSummary },

    #[serde(rename = "road_added")]
    RoadAdded { road: Road },

    #[serde(rename = "update_applied")]
    UpdateApplied { road_id: RoadId, created: bool },

    #[serde(rename = "road_state")]
    RoadState {
        road_id: RoadId,
        observation: Observation,
    },

    #[serde(rename = "intersection")]
    Intersection { intersection: Intersection },

    #[serde(rename = "incoming_roads")]
    IncomingRoads {
        intersection_id: IntersectionId,
        roads: Vec<Road>,
    },

    #[serde(rename = "outgoing_roads")]
    OutgoingRoads {
        intersection_id: IntersectionId,
        roads: Vec<Road>,
    },

    #[serde(rename = "snapshot")]
    Snapshot { snapshot: LoadSnapshot },

    #[serde(rename = "congestion")]
    Congestion { report: CongestionReport },

    #[serde(rename = "decision")]
    Decision {
        decision: SignalDecision,
        #[serde(skip_serializing_if = "Option::is_none")]
        resolution: Option<AxisResolution>,
    },

    #[serde(rename = "decisions")]
    Decisions {
        decisions: Vec<SignalDecision>,
        /// Intersections whose decision failed, with the error text.
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        failed: BTreeMap<IntersectionId, String>,
    },

    #[serde(rename = "topology")]
    Topology {
        intersections: Vec<Intersection>,
        roads: Vec<Road>,
    },

    #[serde(rename = "phases")]
    Phases { phases: BTreeMap<IntersectionId, Axis> },

    #[serde(rename = "ok")]
    Ok,

    #[serde(rename = "not_found")]
    NotFound { message: String },

    #[serde(rename = "error")]
    Error { message: String },

    #[serde(rename = "goodbye")]
    Goodbye,
}

/// Bump when the command/response schema changes.
pub const PROTOCOL_VERSION: u32 = 1;

pub fn make_response(payload: ResponsePayload) -> AgentResponse {
    AgentResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}

/// Map an engine error to its response; NotFound gets its own type so
/// clients can tell a bad id from a backend failure.
pub fn error_response(err: &EngineError) -> AgentResponse {
    let message = err.to_string();
    if err.is_not_found() {
        make_response(ResponsePayload::NotFound { message })
    } else {
        make_response(ResponsePayload::Error { message })
    }
}

/// A road with no recorded observation is reported as not found.
pub fn road_state_response(road_id: RoadId, observation: Option<Observation>) -> AgentResponse {
    match observation {
        Some(observation) => make_response(ResponsePayload::RoadState {
            road_id,
            observation,
        }),
        None => make_response(ResponsePayload::NotFound {
            message: format!("Road traffic state not found: {road_id}"),
        }),
    }
}

pub fn decision_response(outcome: CoordinationOutcome, trace: bool) -> AgentResponse {
    make_response(ResponsePayload::Decision {
        decision: outcome.decision,
        resolution: outcome.resolution.filter(|_| trace),
    })
}
