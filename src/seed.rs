//! Built-in sample data.
//!
//! The dashboard has no ingestion path, so the results table starts from
//! [`initial_tickets`] and the analytics charts from the weekly figures below.

use crate::types::{Ticket, TicketId, TicketStatus, Zone};

fn ticket(
    id: &str,
    zone: Zone,
    service_number: &str,
    handler: &str,
    status: TicketStatus,
    duration: &str,
) -> Ticket {
    Ticket {
        id: TicketId::new_unchecked(id),
        zone,
        service_number: service_number.to_string(),
        handler: handler.to_string(),
        status,
        duration: duration.to_string(),
    }
}

/// Tickets shown in the results table on first load.
pub fn initial_tickets() -> Vec<Ticket> {
    use TicketStatus::*;
    vec![
        ticket("1001", Zone::Caaz, "SR-2023-001", "Alegntaye", Resolved, "03:12"),
        ticket("1002", Zone::SerAdama, "SR-2023-002", "Yehualaeshet", Pending, "05:41"),
        ticket("1003", Zone::Caaz, "SR-2023-003", "semanu", InProgress, "01:55"),
        ticket("1004", Zone::SrHawassa, "SR-2023-004", "Ermias", Resolved, "02:10"),
        ticket("1005", Zone::SerAdama, "SR-2023-005", "Abdulhafiz", Resolved, "02:59"),
        ticket("1006", Zone::SrHawassa, "SR-2023-006", "Alegntaye", Pending, "04:21"),
        ticket("1007", Zone::Caaz, "SR-2023-007", "Yehualaeshet", InProgress, "03:44"),
        ticket("1008", Zone::SerAdama, "SR-2023-008", "semanu", Resolved, "01:28"),
        ticket("1009", Zone::Eaaz, "SR-2023-009", "Ermias", InProgress, "02:30"),
        ticket("1010", Zone::Eaaz, "SR-2023-010", "Abdulhafiz", Pending, "01:15"),
    ]
}

/// Weekly total tasks per handler.
pub const HANDLER_PERFORMANCE: &[(&str, u32)] = &[
    ("Alegntaye", 94),
    ("Yehualaeshet", 82),
    ("Ermias", 76),
    ("Semanu", 49),
    ("Abdulhafiz", 19),
];

/// Weekly task counts per classification.
pub const TASK_COUNTS: &[(&str, u32)] = &[("Provisioning", 155), ("Maintenance", 157), ("Others", 8)];

/// Weekly task volume by zone/region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonalTasks {
    pub region: &'static str,
    pub provisioning: u32,
    pub maintenance: u32,
    pub others: u32,
}

pub const ZONAL_TASKS: &[ZonalTasks] = &[
    ZonalTasks { region: "CAAZ", provisioning: 38, maintenance: 32, others: 5 },
    ZonalTasks { region: "WAAZ", provisioning: 120, maintenance: 70, others: 0 },
    ZonalTasks { region: "EAAZ", provisioning: 1, maintenance: 8, others: 0 },
    ZonalTasks { region: "SCAZ", provisioning: 39, maintenance: 0, others: 3 },
    ZonalTasks { region: "CNR", provisioning: 0, maintenance: 2, others: 0 },
];

/// Daily task volume over the reporting week.
pub const DAILY_TASK_HISTORY: &[(&str, u32)] = &[
    ("Oct 27", 60),
    ("Oct 28", 55),
    ("Oct 29", 75),
    ("Oct 30", 80),
    ("Oct 31", 65),
    ("Nov 01", 40),
    ("Nov 02", 10),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_seed_ids_are_unique() {
        let tickets = initial_tickets();
        let ids: HashSet<_> = tickets.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), tickets.len());
    }

    #[test]
    fn test_history_has_seven_points() {
        assert_eq!(DAILY_TASK_HISTORY.len(), 7);
    }
}
