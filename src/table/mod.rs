//! Results table state.
//!
//! [`TableState`] is the single owner of the raw ticket collection, the query
//! parameters, the checkbox selection and the in-flight flags. Views are
//! computed on demand with [`TableState::view`]; nothing here is cached. The
//! collection is only ever swapped for a freshly derived one, so every view
//! observes a consistent snapshot.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::query::{self, QueryParams, SortColumn, SortDirection, TicketPage};
use crate::types::{Ticket, TicketId, TicketStatus, ZoneFilter};

pub mod selection;

pub use selection::SelectionSet;

/// Tri-state of the "select all visible" header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectAllState {
    None,
    Some,
    All,
}

/// Counts behind the batch action buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchActions {
    /// Selected tickets that "Batch Start Work" would move
    pub pending_to_start: usize,
    /// Selected tickets that "Batch Mark Resolve" would move
    pub in_progress_to_resolve: usize,
}

/// Computed view of the table for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub page: TicketPage,
    pub selected_count: usize,
    pub select_all: SelectAllState,
    pub actions: BatchActions,
    pub batch_in_flight: bool,
}

/// Presentation-layer state of the results table.
#[derive(Debug, Clone)]
pub struct TableState {
    tickets: Vec<Ticket>,
    params: QueryParams,
    page_size: usize,
    selection: SelectionSet,
    batch_in_flight: bool,
    advancing: HashSet<TicketId>,
    epoch: u64,
}

impl TableState {
    pub fn new(tickets: Vec<Ticket>, page_size: usize) -> Self {
        Self {
            tickets,
            params: QueryParams::default(),
            page_size: page_size.max(1),
            selection: SelectionSet::new(),
            batch_in_flight: false,
            advancing: HashSet::new(),
            epoch: 0,
        }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn ticket(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| &t.id == id)
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_batch_in_flight(&self) -> bool {
        self.batch_in_flight
    }

    pub fn is_advancing(&self, id: &TicketId) -> bool {
        self.advancing.contains(id)
    }

    // Query parameters

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.params.search_text != text {
            self.params.search_text = text;
            self.filters_changed();
        }
    }

    pub fn set_zone(&mut self, zone: ZoneFilter) {
        if self.params.zone != zone {
            self.params.zone = zone;
            self.filters_changed();
        }
    }

    pub fn set_sort(&mut self, column: SortColumn, direction: SortDirection) {
        if self.params.sort_column != column || self.params.sort_direction != direction {
            self.params.sort_column = column;
            self.params.sort_direction = direction;
            self.params.page = 1;
        }
    }

    /// Header click: flip direction on the active column, otherwise switch to
    /// the new column ascending.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        if self.params.sort_column == column {
            let reversed = self.params.sort_direction.reversed();
            self.set_sort(column, reversed);
        } else {
            self.set_sort(column, SortDirection::Ascending);
        }
    }

    /// Move to `page`, clamped to the pages of the current result.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        let total = query::total_pages(self.filtered().len(), self.page_size);
        self.params.page = query::clamp_page(page, total);
        self.params.page
    }

    fn filters_changed(&mut self) {
        self.params.page = 1;
        let visible: HashSet<TicketId> = self.filtered().into_iter().map(|t| t.id).collect();
        let before = self.selection.len();
        self.selection.retain(|id| visible.contains(id));
        if self.selection.len() != before {
            debug!(
                dropped = before - self.selection.len(),
                "selection narrowed to filtered tickets"
            );
        }
    }

    /// Tickets passing the zone and search filters, unsorted and unpaged.
    pub fn filtered(&self) -> Vec<Ticket> {
        query::filter_tickets(&self.tickets, self.params.zone, &self.params.search_text)
    }

    // Selection

    /// Tick or untick one row. Only tickets in the filtered result can be
    /// ticked; returns false when `id` was refused for that reason.
    pub fn toggle_selection(&mut self, id: &TicketId, checked: bool) -> bool {
        if checked && !self.filtered().iter().any(|t| &t.id == id) {
            debug!(%id, "refusing to select a ticket outside the filtered result");
            return false;
        }
        self.selection.set(id, checked);
        true
    }

    /// Header checkbox: select every filtered ticket (all pages) or none.
    pub fn select_all_visible(&mut self, checked: bool) {
        if checked {
            let visible = self.filtered();
            self.selection.replace(visible.into_iter().map(|t| t.id));
        } else {
            self.selection.clear();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected tickets that are part of the filtered result.
    pub fn selected_visible(&self) -> Vec<Ticket> {
        self.filtered()
            .into_iter()
            .filter(|t| self.selection.contains(&t.id))
            .collect()
    }

    /// Batch button counts for the selected tickets in the filtered result.
    pub fn batch_actions(&self) -> BatchActions {
        let mut actions = BatchActions::default();
        for ticket in self.selected_visible() {
            match ticket.status {
                TicketStatus::Pending => actions.pending_to_start += 1,
                TicketStatus::InProgress => actions.in_progress_to_resolve += 1,
                TicketStatus::Resolved => {}
            }
        }
        actions
    }

    pub fn view(&self) -> TableView {
        let filtered_count = self.filtered().len();
        let selected = self.selected_visible().len();
        let select_all = if selected == 0 || filtered_count == 0 {
            SelectAllState::None
        } else if selected >= filtered_count {
            SelectAllState::All
        } else {
            SelectAllState::Some
        };

        TableView {
            page: query::run_query(&self.tickets, &self.params, self.page_size),
            selected_count: selected,
            select_all,
            actions: self.batch_actions(),
            batch_in_flight: self.batch_in_flight,
        }
    }

    // Lifecycle

    /// Drop every in-flight flag and invalidate outstanding commits, so a
    /// commit finishing after teardown cannot touch the collection.
    pub fn teardown(&mut self) {
        self.batch_in_flight = false;
        self.advancing.clear();
        self.epoch += 1;
        debug!(epoch = self.epoch, "table state torn down");
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn set_batch_in_flight(&mut self, in_flight: bool) {
        self.batch_in_flight = in_flight;
    }

    pub(crate) fn set_advancing(&mut self, id: &TicketId, in_flight: bool) {
        if in_flight {
            self.advancing.insert(id.clone());
        } else {
            self.advancing.remove(id);
        }
    }

    /// Swap in a collection derived from the current one.
    pub(crate) fn replace_tickets(&mut self, derive: impl FnOnce(&[Ticket]) -> Vec<Ticket>) {
        self.tickets = derive(&self.tickets);
    }

    pub(crate) fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }
}
