use owo_colors::OwoColorize;

use crate::cli::OutputOptions;
use crate::commands::{load_table, print_json, simulated_backend};
use crate::display::format_status_colored;
use crate::error::Result;
use crate::form::{self, Priority, RequestType, TaskClassification, TicketDraft};
use crate::types::Zone;

/// Options for creating a new trouble ticket
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub service_number: String,
    pub classification: Option<TaskClassification>,
    pub request_type: RequestType,
    pub specific_request_type: String,
    pub zone: Option<Zone>,
    pub handler: String,
    pub remarks: String,
    pub priority: Priority,
}

impl From<CreateOptions> for TicketDraft {
    fn from(options: CreateOptions) -> Self {
        TicketDraft {
            service_number: options.service_number,
            tasks_classification: options.classification,
            request_type: options.request_type,
            specific_request_type: options.specific_request_type,
            zone: options.zone,
            handler: options.handler,
            remarks: options.remarks,
            priority: options.priority,
        }
    }
}

/// Validate and submit a trouble ticket draft
pub async fn cmd_create(options: CreateOptions, output: OutputOptions) -> Result<()> {
    let (config, state) = load_table()?;
    let draft = TicketDraft::from(options);
    let backend = simulated_backend(&config);
    let policy = config.backend.retry_policy();

    let ticket = form::submit(&draft, state.tickets(), &backend, &policy).await?;

    if output.json {
        return print_json(&ticket);
    }

    println!("{}", "Trouble ticket submitted successfully!".green());
    println!(
        "  {} {} {} ({})",
        ticket.id.cyan(),
        format_status_colored(ticket.status),
        ticket.service_number,
        ticket.zone
    );
    Ok(())
}
