#[macro_use]
mod macros;

pub mod charts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod query;
pub mod report;
pub mod seed;
pub mod table;
pub mod types;
pub mod workflow;

pub use config::Config;
pub use error::{Result, TicketDeskError};
pub use query::{PageInfo, QueryParams, SortColumn, SortDirection, TicketPage, run_query};
pub use table::{SelectionSet, TableState, TableView};
pub use types::{Ticket, TicketId, TicketStatus, Zone, ZoneFilter};
pub use workflow::{
    AdvanceNotice, BackendError, BatchNotice, BatchTarget, RetryPolicy, SimulatedBackend,
    StatusBackend, advance, apply_batch,
};
