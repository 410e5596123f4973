use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use bevy::prelude::*;

use crate::congestion::{CongestionLevel, CongestionReport};
use crate::coordination::{AxisResolution, SignalDecision};
use crate::error::EngineError;
use crate::phase_state::Axis;
use crate::topology::IntersectionId;

use super::observer::CoordinationObserver;

/// Change-triggered logger.
///
/// Congestion is logged when `(level, downstream_blocked)` differs from the
/// last value logged for that intersection; coordinated axes when the axis
/// differs from the last logged axis.
#[derive(Debug, Default)]
pub struct ChangeLog {
    congestion: Mutex<HashMap<IntersectionId, (CongestionLevel, bool)>>,
    axes: Mutex<HashMap<IntersectionId, Axis>>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a classification; returns true if it should be logged.
    pub fn record_congestion(&self, report: &CongestionReport) -> bool {
        let key = (report.level, report.downstream_blocked);
        let mut cache = self
            .congestion
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if cache.get(&report.intersection_id) == Some(&key) {
            return false;
        }
        cache.insert(report.intersection_id.clone(), key);
        true
    }

    /// Record a coordinated axis; returns true if it should be logged.
    pub fn record_axis(&self, id: &IntersectionId, axis: Axis) -> bool {
        let mut cache = self.axes.lock().unwrap_or_else(PoisonError::into_inner);
        if cache.get(id) == Some(&axis) {
            return false;
        }
        cache.insert(id.clone(), axis);
        true
    }

    pub fn last_congestion(&self, id: &str) -> Option<(CongestionLevel, bool)> {
        self.congestion
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .copied()
    }

    pub fn last_axis(&self, id: &str) -> Option<Axis> {
        self.axes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .copied()
    }
}

impl CoordinationObserver for ChangeLog {
    fn phase_initialized(&self, id: &IntersectionId) {
        info!(
            "Initialized signal phase for intersection_id={}: active_axis=X",
            id
        );
    }

    fn congestion_classified(&self, report: &CongestionReport) {
        if self.record_congestion(report) {
            info!(
                "Congestion: intersection_id={}, base_level={}, level={}, escalated={}, downstream_blocked={}, load_score={}",
                report.intersection_id,
                report.base_level,
                report.level,
                report.escalated,
                report.downstream_blocked,
                report.load_score
            );
        }
    }

    fn axis_resolved(&self, id: &IntersectionId, resolution: &AxisResolution) {
        if self.record_axis(id, resolution.axis) {
            info!(
                "Signal coordination: intersection_id={}, active_axis={}, reason={}, inherited_from={}",
                id,
                resolution.axis,
                resolution.reason,
                resolution
                    .inherited_from
                    .as_ref()
                    .map_or("-", IntersectionId::as_str)
            );
        }
    }

    fn neighbor_unavailable(
        &self,
        id: &IntersectionId,
        neighbor: &IntersectionId,
        reason: &EngineError,
    ) {
        warn!(
            "Signal coordination: intersection_id={} skipped downstream {}: {}",
            id, neighbor, reason
        );
    }

    fn decision_made(&self, decision: &SignalDecision) {
        debug!(
            "Signal timing decision: intersection_id={}, active_axis={}, level={}, downstream_blocked={}, green_time={}, red_time={}",
            decision.intersection_id,
            decision.active_axis,
            decision.level,
            decision.downstream_blocked,
            decision.green_time,
            decision.red_time
        );
    }
}
