use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicase::UniCase;

use crate::error::{Result, TicketDeskError};

/// Identifier of a ticket. Non-empty, immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketId(String);

impl TicketId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(TicketDeskError::InvalidTicketId(id));
        }
        Ok(TicketId(trimmed.to_string()))
    }

    /// Build an id without validation. Intended for seed data and tests.
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        TicketId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TicketId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for TicketId {
    type Err = TicketDeskError;

    fn from_str(s: &str) -> Result<Self> {
        TicketId::new(s)
    }
}

impl TryFrom<String> for TicketId {
    type Error = TicketDeskError;

    fn try_from(value: String) -> Result<Self> {
        TicketId::new(value)
    }
}

impl From<TicketId> for String {
    fn from(id: TicketId) -> Self {
        id.0
    }
}

/// Workflow status of a ticket. Only ever advances
/// `Pending -> In-Progress -> Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TicketStatus {
    #[default]
    Pending,
    #[serde(rename = "In-Progress")]
    InProgress,
    Resolved,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [
        TicketStatus::Pending,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
    ];

    /// The single forward successor, or `None` for the terminal status.
    pub fn next(self) -> Option<TicketStatus> {
        match self {
            TicketStatus::Pending => Some(TicketStatus::InProgress),
            TicketStatus::InProgress => Some(TicketStatus::Resolved),
            TicketStatus::Resolved => None,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketStatus::Pending => write!(f, "Pending"),
            TicketStatus::InProgress => write!(f, "In-Progress"),
            TicketStatus::Resolved => write!(f, "Resolved"),
        }
    }
}

impl FromStr for TicketStatus {
    type Err = TicketDeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TicketStatus::Pending),
            "in-progress" | "in_progress" | "inprogress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            _ => Err(TicketDeskError::InvalidStatus(s.to_string())),
        }
    }
}

macro_rules! zones {
    ($($variant:ident => $label:literal),+ $(,)?) => {
        /// Region code a ticket is filed under.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Zone {
            $(#[serde(rename = $label)] $variant,)+
        }

        impl Zone {
            /// Every zone, in declaration order.
            pub const ALL: &'static [Zone] = &[$(Zone::$variant,)+];

            pub fn label(self) -> &'static str {
                match self {
                    $(Zone::$variant => $label,)+
                }
            }
        }
    };
}

zones! {
    Caaz => "CAAZ",
    Saaz => "SAAZ",
    Naaz => "NAAZ",
    Eaaz => "EAAZ",
    EnterpriseOffice => "Enterprise office",
    Waaz => "WAAZ",
    Swaaz => "SWAAZ",
    NrMekele => "NR- Mekele",
    NeerSemera => "NEER - Semera",
    CnrDebreBirhan => "CNR - D. Birhan",
    SerAdama => "SER - Adama",
    SrHawassa => "SR - Hawassa",
    WrNekempt => "WR - Nekempt",
    ErDireDawa => "ER - Dire Dawa",
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Zone {
    type Err = TicketDeskError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = UniCase::new(s.trim());
        Zone::ALL
            .iter()
            .copied()
            .find(|zone| UniCase::new(zone.label()) == wanted)
            .ok_or_else(|| TicketDeskError::InvalidZone(s.to_string()))
    }
}

/// Zone filter as chosen in the dropdown. `All` is the sentinel that keeps
/// every ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneFilter {
    #[default]
    All,
    Only(Zone),
}

impl ZoneFilter {
    pub fn matches(self, zone: Zone) -> bool {
        match self {
            ZoneFilter::All => true,
            ZoneFilter::Only(wanted) => wanted == zone,
        }
    }

    /// Dropdown options: `All` followed by every zone, sorted by label.
    pub fn options() -> Vec<ZoneFilter> {
        let mut zones: Vec<Zone> = Zone::ALL.to_vec();
        zones.sort_by_key(|z| z.label());
        std::iter::once(ZoneFilter::All)
            .chain(zones.into_iter().map(ZoneFilter::Only))
            .collect()
    }
}

impl fmt::Display for ZoneFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneFilter::All => f.write_str("All"),
            ZoneFilter::Only(zone) => zone.fmt(f),
        }
    }
}

impl FromStr for ZoneFilter {
    type Err = TicketDeskError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() || UniCase::new(s.trim()) == UniCase::new("All") {
            return Ok(ZoneFilter::All);
        }
        s.parse().map(ZoneFilter::Only)
    }
}

impl From<Zone> for ZoneFilter {
    fn from(zone: Zone) -> Self {
        ZoneFilter::Only(zone)
    }
}

/// A service trouble ticket as shown in the results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub zone: Zone,
    pub service_number: String,
    pub handler: String,
    pub status: TicketStatus,
    pub duration: String,
}

impl Ticket {
    /// Copy of this ticket with a different status.
    pub fn with_status(&self, status: TicketStatus) -> Ticket {
        Ticket {
            status,
            ..self.clone()
        }
    }
}
