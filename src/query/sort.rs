//! Sort functions for tickets.
//!
//! Every column compares its display text lexicographically, so numeric-looking
//! ids and durations order as strings ("1000" before "999"). Sorting is stable
//! in both directions: descending reverses the comparison, not the output, so
//! equal rows keep their input order.

use std::cmp::Ordering;

use crate::types::Ticket;

/// Column of the results table the user can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Id,
    Zone,
    ServiceNumber,
    Handler,
    Status,
    Duration,
}

impl SortColumn {
    /// All valid string representations of this enum.
    pub const ALL_STRINGS: &'static [&'static str] = &[
        "id",
        "zone",
        "servicenumber",
        "handler",
        "status",
        "duration",
    ];

    /// Columns in table order.
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Id,
        SortColumn::Zone,
        SortColumn::ServiceNumber,
        SortColumn::Handler,
        SortColumn::Status,
        SortColumn::Duration,
    ];

    /// Header label shown above the column.
    pub fn label(self) -> &'static str {
        match self {
            SortColumn::Id => "ID",
            SortColumn::Zone => "Zone",
            SortColumn::ServiceNumber => "Service Number",
            SortColumn::Handler => "Handler",
            SortColumn::Status => "Status",
            SortColumn::Duration => "Duration",
        }
    }

    /// Compare two tickets on this column, ascending.
    pub fn compare(self, a: &Ticket, b: &Ticket) -> Ordering {
        match self {
            SortColumn::Id => a.id.as_str().cmp(b.id.as_str()),
            SortColumn::Zone => a.zone.label().cmp(b.zone.label()),
            SortColumn::ServiceNumber => a.service_number.cmp(&b.service_number),
            SortColumn::Handler => a.handler.cmp(&b.handler),
            SortColumn::Status => a.status.to_string().cmp(&b.status.to_string()),
            SortColumn::Duration => a.duration.cmp(&b.duration),
        }
    }
}

enum_display_fromstr!(
    SortColumn,
    crate::error::TicketDeskError::InvalidSortColumn,
    {
        Id => "id",
        Zone => "zone",
        ServiceNumber => "servicenumber" | "service-number" | "service_number",
        Handler => "handler",
        Status => "status",
        Duration => "duration",
    }
);

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

enum_display_fromstr!(
    SortDirection,
    crate::error::TicketDeskError::InvalidSortDirection,
    {
        Ascending => "ascending" | "asc",
        Descending => "descending" | "desc",
    }
);

/// Stable-sort tickets by the given column and direction.
pub fn sort_tickets_by(tickets: &mut [Ticket], column: SortColumn, direction: SortDirection) {
    tickets.sort_by(|a, b| direction.apply(column.compare(a, b)));
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::types::{TicketId, TicketStatus, Zone};

    fn ticket(id: &str, handler: &str, status: TicketStatus, duration: &str) -> Ticket {
        Ticket {
            id: TicketId::new_unchecked(id),
            zone: Zone::Caaz,
            service_number: format!("SR-{id}"),
            handler: handler.to_string(),
            status,
            duration: duration.to_string(),
        }
    }

    fn ids(tickets: &[Ticket]) -> Vec<&str> {
        tickets.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_id_sorts_lexicographically_not_numerically() {
        let mut tickets = vec![
            ticket("999", "a", TicketStatus::Pending, "01:00"),
            ticket("1000", "b", TicketStatus::Pending, "01:00"),
        ];

        sort_tickets_by(&mut tickets, SortColumn::Id, SortDirection::Ascending);

        assert_eq!(ids(&tickets), vec!["1000", "999"]);
    }

    #[test]
    fn test_duration_sorts_lexicographically() {
        let mut tickets = vec![
            ticket("1", "a", TicketStatus::Pending, "10:00"),
            ticket("2", "a", TicketStatus::Pending, "9:30"),
            ticket("3", "a", TicketStatus::Pending, "02:59"),
        ];

        sort_tickets_by(&mut tickets, SortColumn::Duration, SortDirection::Ascending);

        assert_eq!(ids(&tickets), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_status_sorts_by_display_text() {
        let mut tickets = vec![
            ticket("1", "a", TicketStatus::Resolved, "01:00"),
            ticket("2", "a", TicketStatus::Pending, "01:00"),
            ticket("3", "a", TicketStatus::InProgress, "01:00"),
        ];

        sort_tickets_by(&mut tickets, SortColumn::Status, SortDirection::Ascending);

        assert_eq!(ids(&tickets), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let base = vec![
            ticket("1", "Ermias", TicketStatus::Pending, "01:00"),
            ticket("2", "Abdulhafiz", TicketStatus::Pending, "01:00"),
            ticket("3", "Ermias", TicketStatus::Pending, "01:00"),
            ticket("4", "Abdulhafiz", TicketStatus::Pending, "01:00"),
        ];

        let mut asc = base.clone();
        sort_tickets_by(&mut asc, SortColumn::Handler, SortDirection::Ascending);
        assert_eq!(ids(&asc), vec!["2", "4", "1", "3"]);

        let mut desc = base;
        sort_tickets_by(&mut desc, SortColumn::Handler, SortDirection::Descending);
        assert_eq!(ids(&desc), vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn test_descending_reverses_distinct_values() {
        let base = vec![
            ticket("b", "x", TicketStatus::Pending, "01:00"),
            ticket("d", "x", TicketStatus::Pending, "01:00"),
            ticket("a", "x", TicketStatus::Pending, "01:00"),
            ticket("c", "x", TicketStatus::Pending, "01:00"),
        ];

        let mut asc = base.clone();
        sort_tickets_by(&mut asc, SortColumn::Id, SortDirection::Ascending);
        let mut desc = base;
        sort_tickets_by(&mut desc, SortColumn::Id, SortDirection::Descending);

        let mut reversed = ids(&asc);
        reversed.reverse();
        assert_eq!(ids(&desc), reversed);
    }

    #[test]
    fn test_sort_column_parse() {
        assert_eq!(
            SortColumn::from_str("serviceNumber").unwrap(),
            SortColumn::ServiceNumber
        );
        assert_eq!(
            SortColumn::from_str("service-number").unwrap(),
            SortColumn::ServiceNumber
        );
        assert_eq!(SortColumn::from_str("ID").unwrap(), SortColumn::Id);
        assert!(SortColumn::from_str("priority").is_err());
        assert_eq!(SortColumn::ServiceNumber.to_string(), "servicenumber");
    }

    #[test]
    fn test_sort_direction_parse_and_reverse() {
        assert_eq!(
            SortDirection::from_str("asc").unwrap(),
            SortDirection::Ascending
        );
        assert_eq!(
            SortDirection::Ascending.reversed(),
            SortDirection::Descending
        );
        assert_eq!(SortDirection::default(), SortDirection::Descending);
    }
}
