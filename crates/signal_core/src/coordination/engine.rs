use crate::change_log::CoordinationObserver;
use crate::congestion::classify;
use crate::error::EngineError;
use crate::network::DataSource;
use crate::params::SignalParams;
use crate::phase_state::PhaseStates;
use crate::signal_timing::compute_timing;
use crate::topology::IntersectionId;

use super::path::VisitPath;
use super::rules::resolve_axis;
use super::types::{CoordinationOutcome, DownstreamState, SignalDecision};

/// Result of resolving one downstream neighbour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NeighborOutcome {
    Resolved(DownstreamState),
    /// The neighbour does not exist; it contributes nothing to the rules.
    Unavailable {
        neighbor: IntersectionId,
        reason: EngineError,
    },
}

/// Recursive, cycle-safe signal coordination over a data source.
///
/// The engine borrows everything it needs: the data source (read-only), the
/// phase container (the only state it writes), the observer and the params.
/// It holds no state of its own, so one engine per request is cheap.
pub struct CoordinationEngine<'a, S: DataSource + ?Sized> {
    source: &'a S,
    phases: &'a PhaseStates,
    observer: &'a dyn CoordinationObserver,
    params: &'a SignalParams,
}

impl<'a, S: DataSource + ?Sized> CoordinationEngine<'a, S> {
    pub fn new(
        source: &'a S,
        phases: &'a PhaseStates,
        observer: &'a dyn CoordinationObserver,
        params: &'a SignalParams,
    ) -> Self {
        Self {
            source,
            phases,
            observer,
            params,
        }
    }

    /// Coordinated signal decision for `id`. NotFound for an unknown root.
    pub fn coordinate(&self, id: &str) -> Result<SignalDecision, EngineError> {
        self.coordinate_traced(id).map(|outcome| outcome.decision)
    }

    /// Like [`coordinate`](Self::coordinate), keeping the rule resolution.
    pub fn coordinate_traced(&self, id: &str) -> Result<CoordinationOutcome, EngineError> {
        let outcome = self.resolve(id, None)?;
        self.observer.decision_made(&outcome.decision);
        Ok(outcome)
    }

    /// Congestion, timing and the stored (or freshly initialized) axis for
    /// `id`. Does not recurse and does not touch the stored axis beyond
    /// initializing it.
    pub fn local_decision(&self, id: &str) -> Result<SignalDecision, EngineError> {
        let report = classify(self.source, id, &self.params.congestion)?;
        self.observer.congestion_classified(&report);

        let timing = compute_timing(
            report.level,
            report.downstream_blocked,
            &self.params.timing,
        );

        let phase = self.phases.get_or_init(id);
        if phase.initialized {
            self.observer.phase_initialized(&report.intersection_id);
        }

        Ok(SignalDecision {
            intersection_id: report.intersection_id,
            active_axis: phase.axis,
            green_time: timing.green_time,
            red_time: timing.red_time,
            level: report.level,
            downstream_blocked: report.downstream_blocked,
        })
    }

    fn resolve(
        &self,
        id: &str,
        parent: Option<&VisitPath<'_>>,
    ) -> Result<CoordinationOutcome, EngineError> {
        let on_path = parent.is_some_and(|p| p.contains(id));
        let at_limit = parent.is_some_and(|p| p.depth() >= self.params.coordination.max_depth);
        if on_path || at_limit {
            return Ok(CoordinationOutcome {
                decision: self.local_decision(id)?,
                resolution: None,
            });
        }

        let mut decision = self.local_decision(id)?;
        let path = match parent {
            Some(p) => p.extend(id),
            None => VisitPath::root(id),
        };

        let downstream: Vec<IntersectionId> = self
            .source
            .outgoing_roads(id)?
            .into_iter()
            .map(|road| road.to)
            .take(self.params.coordination.max_fan_out)
            .collect();

        let mut states = Vec::with_capacity(downstream.len());
        for neighbor in &downstream {
            match self.resolve_neighbor(neighbor, &path)? {
                NeighborOutcome::Resolved(state) => states.push(state),
                NeighborOutcome::Unavailable { neighbor, reason } => {
                    self.observer
                        .neighbor_unavailable(&decision.intersection_id, &neighbor, &reason);
                }
            }
        }

        let resolution = resolve_axis(decision.active_axis, &states);
        self.phases.store(id, resolution.axis);
        self.observer
            .axis_resolved(&decision.intersection_id, &resolution);
        decision.active_axis = resolution.axis;

        Ok(CoordinationOutcome {
            decision,
            resolution: Some(resolution),
        })
    }

    /// Resolve one neighbour. Only NotFound is absorbed; any other failure
    /// propagates to the caller.
    fn resolve_neighbor(
        &self,
        neighbor: &IntersectionId,
        path: &VisitPath<'_>,
    ) -> Result<NeighborOutcome, EngineError> {
        match self.resolve(neighbor.as_str(), Some(path)) {
            Ok(outcome) => Ok(NeighborOutcome::Resolved(DownstreamState::from_decision(
                &outcome.decision,
            ))),
            Err(reason @ EngineError::IntersectionNotFound(_)) => Ok(NeighborOutcome::Unavailable {
                neighbor: neighbor.clone(),
                reason,
            }),
            Err(e) => Err(e),
        }
    }
}
