use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::{block_on, AsyncComputeTaskPool, Task};

use crate::change_log::ObserverHandle;
use crate::coordination::{CoordinationEngine, CoordinationOutcome};
use crate::error::EngineError;
use crate::network::TrafficNetwork;
use crate::params::SignalParams;
use crate::phase_state::PhaseStatesHandle;
use crate::topology::IntersectionId;
use crate::traffic_state::RoadTrafficUpdate;

use super::types::{
    DecisionQueue, DecisionRecord, LatestDecisions, SignalDecisionReady, SignalDecisionRequest,
    TickCounter,
};

/// A decision being computed on the async task pool.
#[derive(Component)]
pub struct ComputingDecision {
    intersection_id: IntersectionId,
    ticket: u64,
    task: Task<Result<CoordinationOutcome, EngineError>>,
}

pub fn advance_tick(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}

/// Validate and upsert incoming road measurements. Rejected updates are
/// logged and dropped; they never reach the store.
pub fn apply_road_updates(
    mut updates: EventReader<RoadTrafficUpdate>,
    mut network: ResMut<TrafficNetwork>,
) {
    for update in updates.read() {
        if let Err(reason) = network.apply_update(update.clone()) {
            warn!(
                "Rejected road traffic update for road_id={}: {}",
                update.road_id, reason
            );
        }
    }
}

pub fn queue_decision_requests(
    mut requests: EventReader<SignalDecisionRequest>,
    mut queue: ResMut<DecisionQueue>,
) {
    for request in requests.read() {
        queue.push(request.intersection_id.clone());
    }
}

/// Spawn one coordination task per queued request, up to
/// `max_dispatch_per_tick` per run.
///
/// Every task spawned in the same run shares one `Arc` of the current network
/// snapshot, so updates applied afterwards are not visible to it. The phase
/// container and the observer are shared with every other task.
pub fn dispatch_decision_requests(
    mut commands: Commands,
    mut queue: ResMut<DecisionQueue>,
    network: Res<TrafficNetwork>,
    phases: Res<PhaseStatesHandle>,
    observer: Res<ObserverHandle>,
    params: Res<SignalParams>,
) {
    if queue.is_empty() {
        return;
    }

    let snapshot = network.snapshot();
    let pool = AsyncComputeTaskPool::get();

    for _ in 0..params.coordination.max_dispatch_per_tick {
        let Some((ticket, intersection_id)) = queue.pop() else {
            break;
        };

        let snapshot = Arc::clone(&snapshot);
        let phases = Arc::clone(&phases.0);
        let observer = Arc::clone(&observer.0);
        let params = params.clone();
        let target = intersection_id.clone();
        let task = pool.spawn(async move {
            CoordinationEngine::new(
                snapshot.as_ref(),
                phases.as_ref(),
                observer.as_ref(),
                &params,
            )
            .coordinate_traced(target.as_str())
        });

        commands.spawn(ComputingDecision {
            intersection_id,
            ticket,
            task,
        });
    }
}

/// Poll in-flight decision tasks and publish finished results.
pub fn collect_decisions(
    mut commands: Commands,
    tick: Res<TickCounter>,
    mut latest: ResMut<LatestDecisions>,
    mut ready: EventWriter<SignalDecisionReady>,
    mut query: Query<(Entity, &mut ComputingDecision)>,
) {
    for (entity, mut computing) in &mut query {
        let Some(result) = block_on(futures_lite::future::poll_once(&mut computing.task)) else {
            continue;
        };

        if let Err(err) = &result {
            warn!(
                "Signal decision for intersection_id={} failed: {}",
                computing.intersection_id, err
            );
        }

        latest.insert(
            computing.intersection_id.clone(),
            DecisionRecord {
                ticket: computing.ticket,
                tick: tick.0,
                result: result.clone(),
            },
        );
        ready.send(SignalDecisionReady {
            intersection_id: computing.intersection_id.clone(),
            ticket: computing.ticket,
            result,
        });
        commands.entity(entity).despawn();
    }
}
