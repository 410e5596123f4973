//! Runtime-tunable engine parameters.
//!
//! Collects the classification thresholds, timing constants and coordination
//! limits into a single [`SignalParams`] resource so they can be overridden
//! (e.g. from a JSON file) without recompilation. Every field defaults to the
//! matching constant in [`crate::config`].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{
    BASE_GREEN_TIME, CYCLE_TIME, EXTENSION_HIGH, EXTENSION_LOW, EXTENSION_MEDIUM, LOAD_LOW_MAX,
    LOAD_MEDIUM_MAX, MAX_COORDINATION_DEPTH, MAX_COORDINATION_FAN_OUT, MAX_DISPATCH_PER_TICK,
    MAX_GREEN_TIME, MIN_GREEN_TIME,
};

/// Load-score thresholds for base classification. Both bounds are exclusive:
/// a score equal to `medium_max` is HIGH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CongestionThresholds {
    pub low_max: u64,
    pub medium_max: u64,
}

impl Default for CongestionThresholds {
    fn default() -> Self {
        Self {
            low_max: LOAD_LOW_MAX,
            medium_max: LOAD_MEDIUM_MAX,
        }
    }
}

/// Signal timing constants, all in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingParams {
    pub base_green: u32,
    pub min_green: u32,
    pub max_green: u32,
    pub cycle: u32,
    pub extension_low: u32,
    pub extension_medium: u32,
    pub extension_high: u32,
}

impl Default for TimingParams {
    fn default() -> Self {
        Self {
            base_green: BASE_GREEN_TIME,
            min_green: MIN_GREEN_TIME,
            max_green: MAX_GREEN_TIME,
            cycle: CYCLE_TIME,
            extension_low: EXTENSION_LOW,
            extension_medium: EXTENSION_MEDIUM,
            extension_high: EXTENSION_HIGH,
        }
    }
}

/// Bounds on the recursive coordination walk, on top of the cycle guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinationLimits {
    /// Traversal depth (root = 1) at which nodes are resolved local-only.
    pub max_depth: usize,
    /// Downstream entries recursed into per node.
    pub max_fan_out: usize,
    /// Decision tasks spawned per update by the plugin.
    pub max_dispatch_per_tick: usize,
}

impl Default for CoordinationLimits {
    fn default() -> Self {
        Self {
            max_depth: MAX_COORDINATION_DEPTH,
            max_fan_out: MAX_COORDINATION_FAN_OUT,
            max_dispatch_per_tick: MAX_DISPATCH_PER_TICK,
        }
    }
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalParams {
    pub congestion: CongestionThresholds,
    pub timing: TimingParams,
    pub coordination: CoordinationLimits,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let params = SignalParams::default();
        assert_eq!(params.congestion.low_max, 10);
        assert_eq!(params.congestion.medium_max, 30);
        assert_eq!(params.timing.base_green, 30);
        assert_eq!(params.timing.min_green, 15);
        assert_eq!(params.timing.max_green, 60);
        assert_eq!(params.timing.cycle, 90);
        assert_eq!(params.coordination.max_depth, MAX_COORDINATION_DEPTH);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let params: SignalParams =
            serde_json::from_str(r#"{"coordination":{"max_depth":4},"timing":{"cycle":120}}"#)
                .unwrap();
        assert_eq!(params.coordination.max_depth, 4);
        assert_eq!(params.coordination.max_fan_out, MAX_COORDINATION_FAN_OUT);
        assert_eq!(params.timing.cycle, 120);
        assert_eq!(params.timing.base_green, 30);
        assert_eq!(params.congestion, CongestionThresholds::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        let params: SignalParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, SignalParams::default());
    }
}
