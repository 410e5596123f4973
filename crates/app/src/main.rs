//! `signaliq`: reads JSON commands on stdin, answers on stdout, logs to
//! stderr. See [`signal_core::agent_protocol`] for the schema.
//!
//! Environment:
//! - `SIGNALIQ_PARAMS`: path to a JSON `SignalParams` override.
//! - `SIGNALIQ_NETWORK`: path to a JSON network (`intersections`, `roads`,
//!   `observations`) loaded before the first command.

mod agent_mode;

fn main() {
    agent_mode::run_agent_mode();
}
