use serde::Serialize;

use crate::aggregation::snapshot;
use crate::error::EngineError;
use crate::network::DataSource;
use crate::params::CongestionThresholds;
use crate::topology::IntersectionId;

use super::level::CongestionLevel;

/// Congestion classification for one intersection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CongestionReport {
    pub intersection_id: IntersectionId,
    pub level: CongestionLevel,
    pub base_level: CongestionLevel,
    pub escalated: bool,
    pub downstream_blocked: bool,
    pub load_score: u64,
    /// Targets of the outgoing roads in road order; parallel roads repeat.
    pub downstream_intersection_ids: Vec<IntersectionId>,
}

/// Targets of every outgoing road of `id`, in road order, duplicates kept.
pub fn downstream_ids<S: DataSource + ?Sized>(
    source: &S,
    id: &str,
) -> Result<Vec<IntersectionId>, EngineError> {
    Ok(source
        .outgoing_roads(id)?
        .into_iter()
        .map(|road| road.to)
        .collect())
}

/// Base level of `id` from a fresh aggregation, or `None` if the intersection
/// does not exist.
pub fn base_level_of<S: DataSource + ?Sized>(
    source: &S,
    id: &str,
    thresholds: &CongestionThresholds,
) -> Result<Option<CongestionLevel>, EngineError> {
    match snapshot(source, id) {
        Ok(snap) => Ok(Some(CongestionLevel::from_load_score(
            snap.load_score,
            thresholds,
        ))),
        Err(EngineError::IntersectionNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Classify `id`, escalating one step when a downstream neighbour is HIGH.
///
/// Always recomputed from the current data source; nothing is cached here.
pub fn classify<S: DataSource + ?Sized>(
    source: &S,
    id: &str,
    thresholds: &CongestionThresholds,
) -> Result<CongestionReport, EngineError> {
    let snap = snapshot(source, id)?;
    let base_level = CongestionLevel::from_load_score(snap.load_score, thresholds);

    let downstream = downstream_ids(source, id)?;
    let mut downstream_blocked = false;
    for down_id in &downstream {
        if base_level_of(source, down_id.as_str(), thresholds)? == Some(CongestionLevel::High) {
            downstream_blocked = true;
            break;
        }
    }

    let level = if downstream_blocked {
        base_level.escalate()
    } else {
        base_level
    };

    Ok(CongestionReport {
        intersection_id: snap.intersection_id,
        level,
        base_level,
        escalated: level != base_level,
        downstream_blocked,
        load_score: snap.load_score,
        downstream_intersection_ids: downstream,
    })
}
