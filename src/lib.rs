//! Diagnostic SimConnect client: subscribes to the simulator's system events
//! and logs every message the host sends until it quits.

pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod exception;
pub mod host;
pub mod recv;
pub mod session;
#[cfg(all(windows, feature = "simconnect"))]
pub mod simconnect;

use crate::config::Config;
use crate::data::{DataType, SimData};
use crate::host::SimHost;
use crate::session::Session;
use tracing::{info, warn};

/// Run a full probe over an already open host: setup, poll until QUIT, close.
/// Hands the closed session back for inspection.
pub fn run_probe<H: SimHost>(host: H, config: &Config) -> Session<H> {
    let mut session = Session::new(host);

    session.register_value_definition(
        SimData::DEFINITION_ID,
        DataType::Float64,
        "SIMULATION TIME",
        "NUMBER",
    );
    let failed = session.subscribe_system_events();
    if failed > 0 {
        warn!(failed, "continuing with partial setup");
    }

    info!(poll_interval = ?config.poll_interval(), "polling");
    session.run(config.poll_interval(), config.request_sim_data);
    session.close();
    session
}
