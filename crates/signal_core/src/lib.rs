use bevy::prelude::*;

pub mod agent_protocol;
pub mod aggregation;
pub mod change_log;
pub mod config;
pub mod congestion;
pub mod coordination;
pub mod error;
pub mod network;
pub mod params;
pub mod phase_state;
pub mod service;
pub mod signal_sets;
pub mod signal_timing;
pub mod topology;
pub mod traffic_state;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use signal_sets::SignalSet;

use change_log::ObserverHandle;
use network::TrafficNetwork;
use params::SignalParams;
use phase_state::PhaseStatesHandle;
use service::DecisionServicePlugin;

/// Registers the engine's shared resources and the decision service.
///
/// Resources inserted before the plugin is added (params, a pre-built network,
/// a custom observer) are kept.
pub struct SignalCoordinationPlugin;

impl Plugin for SignalCoordinationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SignalParams>()
            .init_resource::<TrafficNetwork>()
            .init_resource::<PhaseStatesHandle>()
            .init_resource::<ObserverHandle>()
            .configure_sets(
                FixedUpdate,
                (SignalSet::Ingest, SignalSet::Dispatch, SignalSet::Collect).chain(),
            )
            .add_plugins(DecisionServicePlugin);
    }
}
