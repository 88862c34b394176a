use tracing::debug;

use crate::cli::OutputOptions;
use crate::commands::{load_table, print_json};
use crate::display::render_table;
use crate::error::Result;
use crate::query::{SortColumn, SortDirection};
use crate::table::TableState;
use crate::types::ZoneFilter;

/// Query parameters for the table commands; `None` keeps the default.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub search: Option<String>,
    pub zone: Option<ZoneFilter>,
    pub sort: Option<SortColumn>,
    pub direction: Option<SortDirection>,
    pub page: usize,
}

impl ListOptions {
    /// Apply the options the same way the dashboard controls would, so the
    /// page is clamped against the filtered result.
    pub fn apply(&self, state: &mut TableState) {
        if let Some(search) = &self.search {
            state.set_search_text(search.as_str());
        }
        if let Some(zone) = self.zone {
            state.set_zone(zone);
        }
        if self.sort.is_some() || self.direction.is_some() {
            let params = state.params();
            let column = self.sort.unwrap_or(params.sort_column);
            let direction = self.direction.unwrap_or(params.sort_direction);
            state.set_sort(column, direction);
        }
        let page = state.go_to_page(self.page);
        debug!(requested = self.page, page, "page selected");
    }
}

pub(crate) fn print_table(state: &TableState, output: OutputOptions) -> Result<()> {
    let view = state.view();
    if output.json {
        print_json(&view)
    } else {
        println!("{}", render_table(&view, state.selection()));
        Ok(())
    }
}

/// Show one page of the results table.
pub fn cmd_list(options: &ListOptions, output: OutputOptions) -> Result<()> {
    let (_config, mut state) = load_table()?;
    options.apply(&mut state);
    print_table(&state, output)
}
