//! Query pipeline for the ticket results table.
//!
//! A view is derived in a fixed order: zone filter, search filter, stable
//! sort, then pagination. Filters are composed with the builder pattern over
//! the [`TicketFilter`] trait; the whole pipeline is recomputed from scratch
//! for every call and never mutates its input.

use tracing::debug;

use crate::types::{Ticket, ZoneFilter};

pub mod sort;

pub use sort::{SortColumn, SortDirection, sort_tickets_by};

/// Rows per page in the reference table.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Trait for ticket filters
pub trait TicketFilter: Send + Sync {
    fn matches(&self, ticket: &Ticket) -> bool;
}

/// Keep tickets filed under one zone, or all of them for `ZoneFilter::All`.
pub struct ZoneMatch {
    zone: ZoneFilter,
}

impl ZoneMatch {
    pub fn new(zone: ZoneFilter) -> Self {
        Self { zone }
    }
}

impl TicketFilter for ZoneMatch {
    fn matches(&self, ticket: &Ticket) -> bool {
        self.zone.matches(ticket.zone)
    }
}

/// Case-insensitive substring search over service number, handler and id.
pub struct SearchFilter {
    needle: String,
}

impl SearchFilter {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }
}

impl TicketFilter for SearchFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        ticket.service_number.to_lowercase().contains(&self.needle)
            || ticket.handler.to_lowercase().contains(&self.needle)
            || ticket.id.as_str().to_lowercase().contains(&self.needle)
    }
}

/// The full set of inputs that determines a rendered table view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub search_text: String,
    pub zone: ZoneFilter,
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
    /// 1-based; clamped into range when the query runs.
    pub page: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            zone: ZoneFilter::All,
            sort_column: SortColumn::Id,
            sort_direction: SortDirection::Descending,
            page: 1,
        }
    }
}

/// Pagination metadata for a rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_matching: usize,
}

/// One page of the sorted, filtered result.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TicketPage {
    pub tickets: Vec<Ticket>,
    #[serde(flatten)]
    pub info: PageInfo,
}

impl TicketPage {
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

/// A configured filter-and-sort query that can be applied to ticket data.
pub struct TicketQuery {
    filters: Vec<Box<dyn TicketFilter>>,
    sort_column: SortColumn,
    sort_direction: SortDirection,
}

impl TicketQuery {
    /// Apply the filters in insertion order, then stable-sort the survivors.
    pub fn apply(&self, tickets: &[Ticket]) -> Vec<Ticket> {
        let mut filtered: Vec<Ticket> = tickets
            .iter()
            .filter(|t| self.filters.iter().all(|f| f.matches(t)))
            .cloned()
            .collect();

        sort::sort_tickets_by(&mut filtered, self.sort_column, self.sort_direction);
        filtered
    }
}

/// Query builder for filtering and sorting tickets
pub struct TicketQueryBuilder {
    filters: Vec<Box<dyn TicketFilter>>,
    sort_column: SortColumn,
    sort_direction: SortDirection,
}

impl TicketQueryBuilder {
    /// Create a new query builder with default settings
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort_column: SortColumn::default(),
            sort_direction: SortDirection::default(),
        }
    }

    /// Add a filter to the query (AND composition)
    pub fn with_filter(mut self, filter: Box<dyn TicketFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set the sort column and direction
    pub fn with_sort(mut self, column: SortColumn, direction: SortDirection) -> Self {
        self.sort_column = column;
        self.sort_direction = direction;
        self
    }

    pub fn build(self) -> TicketQuery {
        TicketQuery {
            filters: self.filters,
            sort_column: self.sort_column,
            sort_direction: self.sort_direction,
        }
    }
}

impl Default for TicketQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&QueryParams> for TicketQuery {
    fn from(params: &QueryParams) -> Self {
        TicketQueryBuilder::new()
            .with_filter(Box::new(ZoneMatch::new(params.zone)))
            .with_filter(Box::new(SearchFilter::new(&params.search_text)))
            .with_sort(params.sort_column, params.sort_direction)
            .build()
    }
}

/// Zone and search filtering only, in input order.
pub fn filter_tickets(tickets: &[Ticket], zone: ZoneFilter, search_text: &str) -> Vec<Ticket> {
    let zone = ZoneMatch::new(zone);
    let search = SearchFilter::new(search_text);
    tickets
        .iter()
        .filter(|t| zone.matches(t) && search.matches(t))
        .cloned()
        .collect()
}

/// Number of pages for `matching` rows; never less than one.
pub fn total_pages(matching: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    matching.div_ceil(page_size).max(1)
}

/// Clamp a requested 1-based page into `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slice one page out of an already sorted result.
pub fn paginate(sorted: Vec<Ticket>, page: usize, page_size: usize) -> TicketPage {
    let page_size = page_size.max(1);
    let total_matching = sorted.len();
    let total_pages = total_pages(total_matching, page_size);
    let current_page = clamp_page(page, total_pages);

    let tickets = sorted
        .into_iter()
        .skip((current_page - 1) * page_size)
        .take(page_size)
        .collect();

    TicketPage {
        tickets,
        info: PageInfo {
            current_page,
            total_pages,
            total_matching,
        },
    }
}

/// Run the whole pipeline for one set of query parameters.
pub fn run_query(tickets: &[Ticket], params: &QueryParams, page_size: usize) -> TicketPage {
    let sorted = TicketQuery::from(params).apply(tickets);
    debug!(
        zone = %params.zone,
        search = %params.search_text,
        sort = %params.sort_column,
        direction = %params.sort_direction,
        matching = sorted.len(),
        "ticket query evaluated"
    );
    paginate(sorted, params.page, page_size)
}
