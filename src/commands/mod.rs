//! Command implementations behind the `ticketdesk` CLI.
//!
//! Every command starts from the seed collection; nothing is persisted
//! between invocations.

mod analytics;
mod config;
mod create;
mod list;
mod status;

pub use analytics::{cmd_charts, cmd_report};
pub use config::{cmd_config_init, cmd_config_show};
pub use create::{CreateOptions, cmd_create};
pub use list::{ListOptions, cmd_list};
pub use status::{cmd_advance, cmd_batch};

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::seed::initial_tickets;
use crate::table::TableState;
use crate::workflow::SimulatedBackend;

/// Pretty-print a serializable value as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Loaded configuration plus a table over the seed tickets.
pub(crate) fn load_table() -> Result<(Config, TableState)> {
    let config = Config::load()?;
    let state = TableState::new(initial_tickets(), config.page_size);
    Ok((config, state))
}

pub(crate) fn simulated_backend(config: &Config) -> SimulatedBackend {
    SimulatedBackend::new(&config.backend)
}
