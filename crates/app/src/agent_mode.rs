//! Blocking JSON-lines loop: one command per stdin line, one response per
//! stdout line. Logging goes to stderr through `LogPlugin` so it never mixes
//! with the protocol.

use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Duration;

use bevy::log::LogPlugin;
use bevy::prelude::*;

use signal_core::agent_protocol::{
    decision_response, error_response, make_response, road_state_response, AgentCommand,
    AgentResponse, NetworkFile, ResponsePayload, PROTOCOL_VERSION,
};
use signal_core::aggregation::snapshot;
use signal_core::change_log::ObserverHandle;
use signal_core::congestion::classify;
use signal_core::coordination::{CoordinationOutcome, SignalDecision};
use signal_core::error::EngineError;
use signal_core::network::TrafficNetwork;
use signal_core::params::SignalParams;
use signal_core::phase_state::PhaseStatesHandle;
use signal_core::service::{DecisionQueue, LatestDecisions};
use signal_core::topology::{seed_grid, IntersectionId};
use signal_core::SignalCoordinationPlugin;

const PARAMS_ENV: &str = "SIGNALIQ_PARAMS";
const NETWORK_ENV: &str = "SIGNALIQ_NETWORK";

/// Upper bound on ticks spent waiting for a batch of decisions.
const MAX_WAIT_TICKS: u32 = 10_000;

pub fn run_agent_mode() {
    let mut app = build_app(true);

    if let Some(path) = env_path(NETWORK_ENV) {
        match read_json::<NetworkFile>(&path) {
            Ok(file) => load_network(&mut app, file),
            Err(message) => warn!("Ignoring {}: {}", NETWORK_ENV, message),
        }
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    write_response(&mut stdout, &make_response(ResponsePayload::Ready));
    info!(
        "signaliq agent mode v{} ready, waiting for commands on stdin",
        PROTOCOL_VERSION
    );

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("stdin read error: {e}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let cmd: AgentCommand = match serde_json::from_str(&line) {
            Ok(c) => c,
            Err(e) => {
                write_response(
                    &mut stdout,
                    &make_response(ResponsePayload::Error {
                        message: format!("Parse error: {e}"),
                    }),
                );
                continue;
            }
        };

        let response = process_command(cmd, &mut app);
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);
        write_response(&mut stdout, &response);

        if is_goodbye {
            break;
        }
    }

    info!("signaliq agent mode shutting down");
}

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

fn build_app(with_logging: bool) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    if with_logging {
        app.add_plugins(LogPlugin::default());
    }

    if let Some(path) = env_path(PARAMS_ENV) {
        match read_json::<SignalParams>(&path) {
            Ok(params) => {
                app.insert_resource(params);
            }
            Err(message) => warn!("Ignoring {}: {}", PARAMS_ENV, message),
        }
    }

    app.add_plugins(SignalCoordinationPlugin);
    app.update();
    app
}

fn env_path(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn read_json<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("cannot parse {}: {e}", path.display()))
}

fn load_network(app: &mut App, file: NetworkFile) {
    let mut network = app.world_mut().resource_mut::<TrafficNetwork>();
    for intersection in file.intersections {
        network.topology_mut().upsert_intersection(intersection);
    }
    for spec in file.roads {
        network.topology_mut().add_road(spec.into_road());
    }
    let mut rejected = 0usize;
    for update in file.observations {
        let road_id = update.road_id.clone();
        if let Err(reason) = network.apply_update(update) {
            warn!("Rejected observation for road_id={}: {}", road_id, reason);
            rejected += 1;
        }
    }
    info!(
        "Loaded network: {} intersections, {} roads, {} observations ({} rejected)",
        network.topology().intersection_count(),
        network.topology().road_count(),
        network.traffic().len(),
        rejected
    );
}

fn write_response(out: &mut impl Write, response: &AgentResponse) {
    let line = match serde_json::to_string(response) {
        Ok(line) => line,
        Err(e) => {
            error!("cannot serialize response: {e}");
            format!(
                r#"{{"protocol_version":{PROTOCOL_VERSION},"type":"error","message":"serialization failed"}}"#
            )
        }
    };
    let _ = writeln!(out, "{line}");
    let _ = out.flush();
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

fn process_command(cmd: AgentCommand, app: &mut App) -> AgentResponse {
    match cmd {
        AgentCommand::SeedGrid {
            rows,
            cols,
            spacing,
        } => {
            let summary = {
                let mut network = app.world_mut().resource_mut::<TrafficNetwork>();
                network.traffic_mut().clear();
                seed_grid(network.topology_mut(), rows, cols, spacing)
            };
            // A new topology starts with fresh phases and log caches.
            app.insert_resource(PhaseStatesHandle::default());
            app.insert_resource(ObserverHandle::default());
            app.world_mut().resource_mut::<LatestDecisions>().clear();
            make_response(ResponsePayload::Seeded { summary })
        }

        AgentCommand::AddIntersection { intersection } => {
            app.world_mut()
                .resource_mut::<TrafficNetwork>()
                .topology_mut()
                .upsert_intersection(intersection);
            make_response(ResponsePayload::Ok)
        }

        AgentCommand::AddRoad(spec) => {
            let road = spec.into_road();
            app.world_mut()
                .resource_mut::<TrafficNetwork>()
                .topology_mut()
                .add_road(road.clone());
            make_response(ResponsePayload::RoadAdded { road })
        }

        AgentCommand::RoadUpdate(update) => {
            if let Err(reason) = update.validate() {
                return make_response(ResponsePayload::Error {
                    message: reason.to_string(),
                });
            }
            let road_id = update.road_id.clone();
            let created = app
                .world()
                .resource::<TrafficNetwork>()
                .traffic()
                .get(road_id.as_str())
                .is_none();
            app.world_mut().send_event(update);
            step(app);
            make_response(ResponsePayload::UpdateApplied { road_id, created })
        }

        AgentCommand::Road { road_id } => {
            let observation = app
                .world()
                .resource::<TrafficNetwork>()
                .traffic()
                .get(road_id.as_str())
                .cloned();
            road_state_response(road_id, observation)
        }

        AgentCommand::Intersection { intersection_id } => {
            let network = app.world().resource::<TrafficNetwork>();
            match network.topology().intersection(intersection_id.as_str()) {
                Some(intersection) => make_response(ResponsePayload::Intersection {
                    intersection: intersection.clone(),
                }),
                None => error_response(&EngineError::not_found(intersection_id.as_str())),
            }
        }

        AgentCommand::Incoming { intersection_id } => {
            let network = app.world().resource::<TrafficNetwork>();
            match network.topology().incoming_checked(intersection_id.as_str()) {
                Ok(roads) => make_response(ResponsePayload::IncomingRoads {
                    intersection_id,
                    roads,
                }),
                Err(err) => error_response(&err),
            }
        }

        AgentCommand::Outgoing { intersection_id } => {
            let network = app.world().resource::<TrafficNetwork>();
            match network.topology().outgoing_checked(intersection_id.as_str()) {
                Ok(roads) => make_response(ResponsePayload::OutgoingRoads {
                    intersection_id,
                    roads,
                }),
                Err(err) => error_response(&err),
            }
        }

        AgentCommand::Snapshot { intersection_id } => {
            let data = app.world().resource::<TrafficNetwork>().snapshot();
            match snapshot(data.as_ref(), intersection_id.as_str()) {
                Ok(snapshot) => make_response(ResponsePayload::Snapshot { snapshot }),
                Err(err) => error_response(&err),
            }
        }

        AgentCommand::Congestion { intersection_id } => {
            let data = app.world().resource::<TrafficNetwork>().snapshot();
            let thresholds = app.world().resource::<SignalParams>().congestion;
            match classify(data.as_ref(), intersection_id.as_str(), &thresholds) {
                Ok(report) => {
                    app.world()
                        .resource::<ObserverHandle>()
                        .0
                        .congestion_classified(&report);
                    make_response(ResponsePayload::Congestion { report })
                }
                Err(err) => error_response(&err),
            }
        }

        AgentCommand::Signal {
            intersection_id,
            trace,
        } => {
            let results = decide(app, vec![intersection_id]);
            match results.into_iter().next() {
                Some((_, Ok(outcome))) => decision_response(outcome, trace),
                Some((_, Err(err))) => error_response(&err),
                None => make_response(ResponsePayload::Error {
                    message: "no decision produced".to_string(),
                }),
            }
        }

        AgentCommand::SignalAll => {
            let ids: Vec<IntersectionId> = app
                .world()
                .resource::<TrafficNetwork>()
                .topology()
                .intersection_ids()
                .cloned()
                .collect();
            let mut decisions: Vec<SignalDecision> = Vec::with_capacity(ids.len());
            let mut failed = std::collections::BTreeMap::new();
            for (id, result) in decide(app, ids) {
                match result {
                    Ok(outcome) => decisions.push(outcome.decision),
                    Err(err) => {
                        failed.insert(id, err.to_string());
                    }
                }
            }
            make_response(ResponsePayload::Decisions { decisions, failed })
        }

        AgentCommand::Topology => {
            let network = app.world().resource::<TrafficNetwork>();
            make_response(ResponsePayload::Topology {
                intersections: network.topology().intersections().cloned().collect(),
                roads: network.topology().roads().to_vec(),
            })
        }

        AgentCommand::Phases => {
            let phases = app.world().resource::<PhaseStatesHandle>().0.to_map();
            make_response(ResponsePayload::Phases { phases })
        }

        AgentCommand::Quit => make_response(ResponsePayload::Goodbye),
    }
}

/// Run the plugin's `FixedUpdate` systems once.
fn step(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

/// Queue one request per id and tick until every one has been answered.
/// Results come back in request order.
fn decide(
    app: &mut App,
    ids: Vec<IntersectionId>,
) -> Vec<(IntersectionId, Result<CoordinationOutcome, EngineError>)> {
    let pending: Vec<(IntersectionId, u64)> = {
        let mut queue = app.world_mut().resource_mut::<DecisionQueue>();
        ids.into_iter()
            .map(|id| {
                let ticket = queue.push(id.clone());
                (id, ticket)
            })
            .collect()
    };

    for attempt in 0..MAX_WAIT_TICKS {
        let latest = app.world().resource::<LatestDecisions>();
        if pending
            .iter()
            .all(|(id, ticket)| latest.answered(id.as_str(), *ticket).is_some())
        {
            break;
        }
        step(app);
        std::thread::yield_now();
        if attempt > 100 {
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    let latest = app.world().resource::<LatestDecisions>();
    pending
        .into_iter()
        .map(|(id, ticket)| {
            let result = match latest.answered(id.as_str(), ticket) {
                Some(record) => record.result.clone(),
                None => Err(EngineError::Backend(format!(
                    "decision for {id} timed out"
                ))),
            };
            (id, result)
        })
        .collect()
}
