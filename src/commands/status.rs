use serde_json::json;
use tracing::warn;

use crate::cli::OutputOptions;
use crate::commands::list::{ListOptions, print_table};
use crate::commands::{load_table, print_json, simulated_backend};
use crate::display::{format_advance_notice, format_batch_notice, format_status_colored};
use crate::error::Result;
use crate::types::TicketId;
use crate::workflow::{self, AdvanceNotice, BatchTarget};

/// Select `ids`, run a batch action and print the notice and the table.
pub async fn cmd_batch(
    target: BatchTarget,
    ids: &[TicketId],
    options: &ListOptions,
    output: OutputOptions,
) -> Result<()> {
    let (config, mut state) = load_table()?;
    options.apply(&mut state);
    for id in ids {
        if !state.toggle_selection(id, true) {
            warn!(%id, "ticket is outside the filtered result, leaving it unselected");
        }
    }

    let backend = simulated_backend(&config);
    let policy = config.backend.retry_policy();
    let notice = workflow::apply_batch(&mut state, &backend, &policy, target).await;

    if output.json {
        return print_json(&json!({
            "notice": notice,
            "message": notice.message(),
            "table": state.view(),
        }));
    }

    println!("{}", format_batch_notice(&notice));
    println!();
    print_table(&state, output)
}

/// Move one ticket a single step forward.
pub async fn cmd_advance(id: &TicketId, output: OutputOptions) -> Result<()> {
    let (config, mut state) = load_table()?;
    let backend = simulated_backend(&config);
    let policy = config.backend.retry_policy();

    let notice = workflow::advance(&mut state, &backend, &policy, id).await?;

    if output.json {
        return print_json(&json!({
            "notice": notice,
            "message": notice.message(),
            "ticket": state.ticket(id),
        }));
    }

    println!("{}", format_advance_notice(&notice));
    if let AdvanceNotice::Applied { status, .. } = &notice {
        println!("  {} {}", id, format_status_colored(*status));
    }
    Ok(())
}
