use crate::phase_state::Axis;

use super::types::{AxisResolution, CoordinationReason, DownstreamState};

/// Apply the coordination rules to the collected downstream states.
///
/// Rule 2 takes the first neighbour with an axis regardless of how congested
/// it is, and there is no tie-break among neighbours that disagree.
pub fn resolve_axis(local_axis: Axis, downstream: &[DownstreamState]) -> AxisResolution {
    // Rule 1: downstream block dominance
    for state in downstream {
        if !state.downstream_blocked {
            continue;
        }
        if let Some(axis) = state.active_axis {
            return AxisResolution {
                axis,
                reason: CoordinationReason::DownstreamBlocked,
                inherited_from: Some(state.intersection_id.clone()),
            };
        }
    }

    // Rule 2: green-wave alignment
    if let Some((state, axis)) = downstream
        .iter()
        .find_map(|s| s.active_axis.map(|axis| (s, axis)))
    {
        return AxisResolution {
            axis,
            reason: CoordinationReason::GreenWaveAlignment,
            inherited_from: Some(state.intersection_id.clone()),
        };
    }

    // Rule 3: local default
    AxisResolution {
        axis: local_axis,
        reason: CoordinationReason::LocalDefault,
        inherited_from: None,
    }
}
