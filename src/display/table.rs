//! Terminal rendering of the results table and chart series.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::charts::ChartData;
use crate::query::PageInfo;
use crate::table::{SelectAllState, SelectionSet, TableView};
use crate::types::Ticket;

pub const NO_RESULTS: &str = "No results found for the current filters.";

#[derive(Tabled)]
struct TicketRow {
    #[tabled(rename = "")]
    selected: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Zone")]
    zone: &'static str,
    #[tabled(rename = "Service Number")]
    service_number: String,
    #[tabled(rename = "Handler")]
    handler: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Duration")]
    duration: String,
}

impl TicketRow {
    fn new(ticket: &Ticket, selection: &SelectionSet) -> Self {
        Self {
            selected: checkbox(selection.contains(&ticket.id)),
            id: ticket.id.to_string(),
            zone: ticket.zone.label(),
            service_number: ticket.service_number.clone(),
            handler: ticket.handler.clone(),
            status: ticket.status.to_string(),
            duration: ticket.duration.clone(),
        }
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

pub fn format_page_footer(info: &PageInfo) -> String {
    format!(
        "Showing page {} of {} ({} total results)",
        info.current_page, info.total_pages, info.total_matching
    )
}

/// Render the visible page, its footer and the batch action summary.
pub fn render_table(view: &TableView, selection: &SelectionSet) -> String {
    if view.page.is_empty() {
        return NO_RESULTS.to_string();
    }

    let rows: Vec<TicketRow> = view
        .page
        .tickets
        .iter()
        .map(|t| TicketRow::new(t, selection))
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());

    let select_all = match view.select_all {
        SelectAllState::None => "none",
        SelectAllState::Some => "some",
        SelectAllState::All => "all",
    };

    let mut out = table.to_string();
    out.push('\n');
    out.push_str(&format_page_footer(&view.page.info));
    if view.selected_count > 0 {
        out.push_str(&format!(
            "\n{} selected ({} of the filtered results). Start work: {}, Resolve: {}",
            view.selected_count,
            select_all,
            view.actions.pending_to_start,
            view.actions.in_progress_to_resolve,
        ));
    }
    out
}

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Series")]
    series: String,
    #[tabled(rename = "Value")]
    value: u32,
}

/// Flatten a chart into one row per (label, dataset) point.
pub fn render_chart(title: &str, chart: &ChartData) -> String {
    let rows: Vec<SeriesRow> = chart
        .datasets
        .iter()
        .flat_map(|dataset| {
            let series = dataset.label.clone().unwrap_or_default();
            chart
                .labels
                .iter()
                .zip(&dataset.data)
                .map(move |(label, value)| SeriesRow {
                    label: label.clone(),
                    series: series.clone(),
                    value: *value,
                })
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{title}\n{table}")
}
