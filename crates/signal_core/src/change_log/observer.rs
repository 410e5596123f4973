use std::sync::Arc;

use bevy::prelude::*;

use crate::congestion::CongestionReport;
use crate::coordination::{AxisResolution, SignalDecision};
use crate::error::EngineError;
use crate::topology::IntersectionId;

use super::recorder::ChangeLog;

/// Receives engine events. All methods default to doing nothing.
pub trait CoordinationObserver: Send + Sync {
    /// A phase entry was created for `id` (axis X).
    fn phase_initialized(&self, _id: &IntersectionId) {}

    fn congestion_classified(&self, _report: &CongestionReport) {}

    /// Coordination rules ran for `id` and produced `resolution`.
    fn axis_resolved(&self, _id: &IntersectionId, _resolution: &AxisResolution) {}

    /// A downstream neighbour could not be resolved and was left out.
    fn neighbor_unavailable(
        &self,
        _id: &IntersectionId,
        _neighbor: &IntersectionId,
        _reason: &EngineError,
    ) {
    }

    /// Final decision for a root request.
    fn decision_made(&self, _decision: &SignalDecision) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CoordinationObserver for NoopObserver {}

/// Resource handing the shared observer to decision tasks.
#[derive(Resource, Clone)]
pub struct ObserverHandle(pub Arc<dyn CoordinationObserver>);

impl Default for ObserverHandle {
    fn default() -> Self {
        Self(Arc::new(ChangeLog::default()))
    }
}
