use serde::{Deserialize, Serialize};

use crate::params::CongestionThresholds;

/// Discrete congestion level, totally ordered `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum CongestionLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl CongestionLevel {
    pub fn from_load_score(load_score: u64, thresholds: &CongestionThresholds) -> Self {
        if load_score < thresholds.low_max {
            CongestionLevel::Low
        } else if load_score < thresholds.medium_max {
            CongestionLevel::Medium
        } else {
            CongestionLevel::High
        }
    }

    /// One step up; HIGH stays HIGH.
    pub fn escalate(self) -> Self {
        match self {
            CongestionLevel::Low => CongestionLevel::Medium,
            CongestionLevel::Medium | CongestionLevel::High => CongestionLevel::High,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CongestionLevel::Low => "LOW",
            CongestionLevel::Medium => "MEDIUM",
            CongestionLevel::High => "HIGH",
        }
    }
}

impl std::fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
