use bevy::prelude::*;
use serde::{Serialize, Serializer};

use crate::error::EngineError;
use crate::network::DataSource;
use crate::topology::{IntersectionId, RoadId};

/// Derived load for one intersection. Recomputed on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSnapshot {
    pub intersection_id: IntersectionId,
    pub total_queue: u64,
    pub total_vehicles: u64,
    /// Mean over roads with data; rounded to 2 decimals on the wire only.
    #[serde(serialize_with = "round_2dp")]
    pub avg_speed: f64,
    pub load_score: u64,
    pub incoming_road_ids: Vec<RoadId>,
    pub roads_with_data: usize,
}

impl LoadSnapshot {
    /// Snapshot of an intersection with no incoming roads.
    pub fn empty(intersection_id: IntersectionId) -> Self {
        Self {
            intersection_id,
            total_queue: 0,
            total_vehicles: 0,
            avg_speed: 0.0,
            load_score: 0,
            incoming_road_ids: Vec::new(),
            roads_with_data: 0,
        }
    }
}

fn round_2dp<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 100.0).round() / 100.0)
}

/// Aggregate incoming-road traffic for `id`.
///
/// Fails with `IntersectionNotFound` when the intersection itself is unknown;
/// zero incoming roads yields an all-zero snapshot.
pub fn snapshot<S: DataSource + ?Sized>(source: &S, id: &str) -> Result<LoadSnapshot, EngineError> {
    if !source.contains_intersection(id)? {
        return Err(EngineError::not_found(id));
    }

    let incoming = source.incoming_roads(id)?;
    if incoming.is_empty() {
        debug!("Intersection snapshot: {}, no incoming roads", id);
        return Ok(LoadSnapshot::empty(IntersectionId::from(id)));
    }

    let mut total_queue = 0u64;
    let mut total_vehicles = 0u64;
    let mut speed_sum = 0.0_f64;
    let mut roads_with_data = 0usize;

    for road in &incoming {
        let Some(obs) = source.get_observation(road.id.as_str())? else {
            continue;
        };
        total_queue += u64::from(obs.queue_length);
        total_vehicles += u64::from(obs.vehicle_count);
        speed_sum += obs.avg_speed;
        roads_with_data += 1;
    }

    let avg_speed = if roads_with_data > 0 {
        speed_sum / roads_with_data as f64
    } else {
        0.0
    };
    let load_score = total_queue + total_vehicles;

    debug!(
        "Intersection snapshot: {}, total_queue={}, total_vehicles={}, avg_speed={:.2}, load_score={}",
        id, total_queue, total_vehicles, avg_speed, load_score
    );

    Ok(LoadSnapshot {
        intersection_id: IntersectionId::from(id),
        total_queue,
        total_vehicles,
        avg_speed,
        load_score,
        incoming_road_ids: incoming.into_iter().map(|r| r.id).collect(),
        roads_with_data,
    })
}
