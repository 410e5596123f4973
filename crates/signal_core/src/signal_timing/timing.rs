use serde::Serialize;

use crate::congestion::CongestionLevel;
use crate::params::TimingParams;

/// Green/red split in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalTiming {
    pub green_time: u32,
    pub red_time: u32,
}

fn extension(level: CongestionLevel, params: &TimingParams) -> u32 {
    match level {
        CongestionLevel::Low => params.extension_low,
        CongestionLevel::Medium => params.extension_medium,
        CongestionLevel::High => params.extension_high,
    }
}

/// Pure timing decision for one intersection.
pub fn compute_timing(
    level: CongestionLevel,
    downstream_blocked: bool,
    params: &TimingParams,
) -> SignalTiming {
    let mut green = params.base_green.saturating_add(extension(level, params));

    // Spillback avoidance wins over the congestion extension.
    if downstream_blocked {
        green = params.min_green;
    }

    // Not `clamp`: that panics when min_green > max_green.
    let green_time = green.min(params.max_green).max(params.min_green);
    let red_time = params.cycle.saturating_sub(green_time);

    SignalTiming {
        green_time,
        red_time,
    }
}
