//! Mock data builders for creating test tickets without the seed collection.

use ticketdesk::types::{Ticket, TicketId, TicketStatus, Zone};

/// Builder for creating test tickets
pub struct TicketBuilder {
    ticket: Ticket,
}

impl TicketBuilder {
    /// Create a new pending ticket with the given ID
    pub fn new(id: &str) -> Self {
        Self {
            ticket: Ticket {
                id: TicketId::new(id).expect("test id should be valid"),
                zone: Zone::Caaz,
                service_number: format!("SR-{id}"),
                handler: "Ermias".to_string(),
                status: TicketStatus::Pending,
                duration: "01:00".to_string(),
            },
        }
    }

    pub fn zone(mut self, zone: Zone) -> Self {
        self.ticket.zone = zone;
        self
    }

    pub fn service_number(mut self, service_number: &str) -> Self {
        self.ticket.service_number = service_number.to_string();
        self
    }

    pub fn handler(mut self, handler: &str) -> Self {
        self.ticket.handler = handler.to_string();
        self
    }

    pub fn status(mut self, status: TicketStatus) -> Self {
        self.ticket.status = status;
        self
    }

    pub fn duration(mut self, duration: &str) -> Self {
        self.ticket.duration = duration.to_string();
        self
    }

    pub fn build(self) -> Ticket {
        self.ticket
    }
}

/// Eight tickets over three zones; two of them are in SER - Adama and only
/// one of those has a handler matching "Sami".
pub fn eight_tickets() -> Vec<Ticket> {
    use TicketStatus::*;
    vec![
        TicketBuilder::new("2001").zone(Zone::Caaz).handler("Samira").status(Pending).build(),
        TicketBuilder::new("2002").zone(Zone::Caaz).handler("Ermias").status(InProgress).build(),
        TicketBuilder::new("2003").zone(Zone::Caaz).handler("Abdulhafiz").status(Resolved).build(),
        TicketBuilder::new("2004")
            .zone(Zone::SerAdama)
            .handler("Sami Tesfaye")
            .status(Pending)
            .build(),
        TicketBuilder::new("2005")
            .zone(Zone::SerAdama)
            .handler("Yehualaeshet")
            .status(InProgress)
            .build(),
        TicketBuilder::new("2006").zone(Zone::SrHawassa).handler("Alegntaye").status(Pending).build(),
        TicketBuilder::new("2007").zone(Zone::SrHawassa).handler("semanu").status(Resolved).build(),
        TicketBuilder::new("2008").zone(Zone::SrHawassa).handler("Ermias").status(InProgress).build(),
    ]
}

/// The five-ticket selection scenario: 2 Pending, 2 In-Progress, 1 Resolved.
pub fn mixed_selection() -> Vec<Ticket> {
    use TicketStatus::*;
    [
        ("1", Pending),
        ("2", Pending),
        ("3", InProgress),
        ("4", InProgress),
        ("5", Resolved),
    ]
    .into_iter()
    .map(|(id, status)| TicketBuilder::new(id).status(status).build())
    .collect()
}

pub fn ids(tickets: &[Ticket]) -> Vec<&str> {
    tickets.iter().map(|t| t.id.as_str()).collect()
}
