//! Trouble ticket creation form.
//!
//! Holds the draft a user fills in, reports which mandatory fields are still
//! empty, and submits a complete draft through a [`TicketBackend`]. A newly
//! created ticket starts `Pending` with a zero duration.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, TicketDeskError};
use crate::workflow::backend::{BackendError, RetryPolicy, SimulatedBackend, commit_with_retry};
use crate::types::{Ticket, TicketId, TicketStatus, Zone};

/// Handlers offered by the assignment dropdown.
pub const HANDLERS: &[&str] = &["Alegntaye", "Yehualaeshet", "semanu", "Ermias", "Abdulhafiz"];

/// Specific request types offered by the form.
pub const SPECIFIC_REQUEST_TYPES: &[&str] = &[
    "Centrex group configuration(Hunting as PBX) (01)",
    "IMS SIP, GPON Combo service configuration (02)",
    "Online Support PSTN Migration, Incoming and Outgoing call solution, Caller Id Display, Routing for O&M, Enterprise & Others Stakeholders (06)",
    "Other tasks (Data collection, data checking, hundred group configuration, and routing, caller ID display, additional E1 No of range configuration) (07)",
    "Short code 3 and 4 Digits configuration for Fixed Number, ISDN SIP service and SMS orders closed (09)",
];

/// Id handed out when the collection has no numeric ids yet.
const FIRST_TICKET_ID: u64 = 1001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskClassification {
    Provisioning,
    Maintenance,
    Others,
}

enum_display!(TaskClassification, {
    Provisioning => "Provisioning",
    Maintenance => "Maintenance",
    Others => "Others",
});

impl FromStr for TaskClassification {
    type Err = TicketDeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "provisioning" => Ok(TaskClassification::Provisioning),
            "maintenance" => Ok(TaskClassification::Maintenance),
            "others" | "other" => Ok(TaskClassification::Others),
            _ => Err(TicketDeskError::InvalidClassification(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RequestType {
    #[default]
    Email,
    Phone,
    #[serde(rename = "SMS order")]
    SmsOrder,
    #[serde(rename = "Manual order")]
    ManualOrder,
}

enum_display!(RequestType, {
    Email => "Email",
    Phone => "Phone",
    SmsOrder => "SMS order",
    ManualOrder => "Manual order",
});

impl FromStr for RequestType {
    type Err = TicketDeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(RequestType::Email),
            "phone" => Ok(RequestType::Phone),
            "sms order" | "sms" => Ok(RequestType::SmsOrder),
            "manual order" | "manual" => Ok(RequestType::ManualOrder),
            _ => Err(TicketDeskError::InvalidRequestType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

impl FromStr for Priority {
    type Err = TicketDeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(TicketDeskError::InvalidPriority(s.to_string())),
        }
    }
}

/// Contents of the creation form before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDraft {
    pub service_number: String,
    pub tasks_classification: Option<TaskClassification>,
    pub request_type: RequestType,
    pub specific_request_type: String,
    pub zone: Option<Zone>,
    pub handler: String,
    pub remarks: String,
    pub priority: Priority,
}

impl TicketDraft {
    /// Mandatory fields that are still empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.service_number.trim().is_empty() {
            missing.push("service number");
        }
        if self.tasks_classification.is_none() {
            missing.push("tasks classification");
        }
        if self.specific_request_type.trim().is_empty() {
            missing.push("specific request type");
        }
        if self.zone.is_none() {
            missing.push("zone");
        }
        if self.handler.trim().is_empty() {
            missing.push("handler");
        }
        if self.remarks.trim().is_empty() {
            missing.push("remarks");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Check the draft and build the ticket it would create.
    pub fn to_ticket(&self, id: TicketId) -> Result<Ticket> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(TicketDeskError::IncompleteDraft(missing));
        }
        let zone = self
            .zone
            .ok_or(TicketDeskError::IncompleteDraft(vec!["zone"]))?;

        Ok(Ticket {
            id,
            zone,
            service_number: self.service_number.trim().to_string(),
            handler: self.handler.trim().to_string(),
            status: TicketStatus::Pending,
            duration: "00:00".to_string(),
        })
    }
}

/// Next id after the largest numeric id in `existing`.
pub fn next_ticket_id(existing: &[Ticket]) -> TicketId {
    let next = existing
        .iter()
        .filter_map(|t| t.id.as_str().parse::<u64>().ok())
        .max()
        .map(|max| max + 1)
        .unwrap_or(FIRST_TICKET_ID);
    TicketId::new_unchecked(next.to_string())
}

/// Remote side of ticket creation.
#[async_trait]
pub trait TicketBackend: Send + Sync {
    async fn create_ticket(&self, ticket: &Ticket, draft: &TicketDraft)
    -> std::result::Result<(), BackendError>;
}

#[async_trait]
impl TicketBackend for SimulatedBackend {
    async fn create_ticket(
        &self,
        ticket: &Ticket,
        _draft: &TicketDraft,
    ) -> std::result::Result<(), BackendError> {
        tracing::debug!(id = %ticket.id, "simulating ticket creation");
        self.round_trip(self.create_delay()).await
    }
}

/// Validate and submit a draft; returns the created ticket.
pub async fn submit(
    draft: &TicketDraft,
    existing: &[Ticket],
    backend: &dyn TicketBackend,
    policy: &RetryPolicy,
) -> Result<Ticket> {
    let ticket = draft.to_ticket(next_ticket_id(existing))?;
    commit_with_retry(policy, || backend.create_ticket(&ticket, draft)).await?;
    info!(id = %ticket.id, zone = %ticket.zone, "trouble ticket submitted");
    Ok(ticket)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn complete_draft() -> TicketDraft {
        TicketDraft {
            service_number: "251911000000".to_string(),
            tasks_classification: Some(TaskClassification::Provisioning),
            request_type: RequestType::Phone,
            specific_request_type: SPECIFIC_REQUEST_TYPES[1].to_string(),
            zone: Some(Zone::SrHawassa),
            handler: "Ermias".to_string(),
            remarks: "GPON combo setup".to_string(),
            priority: Priority::High,
        }
    }

    fn existing(ids: &[&str]) -> Vec<Ticket> {
        ids.iter()
            .map(|id| Ticket {
                id: TicketId::new_unchecked(*id),
                zone: Zone::Caaz,
                service_number: "SR".to_string(),
                handler: "h".to_string(),
                status: TicketStatus::Resolved,
                duration: "01:00".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_default_draft_reports_all_mandatory_fields() {
        let draft = TicketDraft::default();
        assert_eq!(
            draft.missing_fields(),
            vec![
                "service number",
                "tasks classification",
                "specific request type",
                "zone",
                "handler",
                "remarks"
            ]
        );
        assert_eq!(draft.request_type, RequestType::Email);
        assert_eq!(draft.priority, Priority::Medium);
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let draft = TicketDraft {
            remarks: "   ".to_string(),
            ..complete_draft()
        };
        assert_eq!(draft.missing_fields(), vec!["remarks"]);
        assert!(matches!(
            draft.to_ticket(TicketId::new_unchecked("1")),
            Err(TicketDeskError::IncompleteDraft(_))
        ));
    }

    #[test]
    fn test_next_ticket_id() {
        assert_eq!(next_ticket_id(&[]).as_str(), "1001");
        assert_eq!(
            next_ticket_id(&existing(&["1001", "1010", "abc", "1003"])).as_str(),
            "1011"
        );
    }

    #[test]
    fn test_parse_form_enums() {
        assert_eq!(
            "sms order".parse::<RequestType>().unwrap(),
            RequestType::SmsOrder
        );
        assert_eq!(RequestType::ManualOrder.to_string(), "Manual order");
        assert_eq!(
            "Maintenance".parse::<TaskClassification>().unwrap(),
            TaskClassification::Maintenance
        );
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[tokio::test]
    async fn test_submit_creates_pending_ticket() {
        let backend = SimulatedBackend::instant();
        let policy = RetryPolicy::no_retry(Duration::from_secs(1));

        let ticket = submit(
            &complete_draft(),
            &existing(&["1001", "1002"]),
            &backend,
            &policy,
        )
        .await
        .unwrap();

        assert_eq!(ticket.id.as_str(), "1003");
        assert_eq!(ticket.status, TicketStatus::Pending);
        assert_eq!(ticket.zone, Zone::SrHawassa);
        assert_eq!(ticket.duration, "00:00");
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_submit_incomplete_draft_skips_backend() {
        let backend = SimulatedBackend::instant();
        let policy = RetryPolicy::no_retry(Duration::from_secs(1));

        let err = submit(&TicketDraft::default(), &[], &backend, &policy)
            .await
            .unwrap_err();

        assert!(matches!(err, TicketDeskError::IncompleteDraft(_)));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_submit_surfaces_backend_failure() {
        let backend = SimulatedBackend::instant();
        backend.fail_next(BackendError::Rejected("duplicate".into()));
        let policy = RetryPolicy::no_retry(Duration::from_secs(1));

        let err = submit(&complete_draft(), &[], &backend, &policy)
            .await
            .unwrap_err();

        assert!(matches!(err, TicketDeskError::Backend(BackendError::Rejected(_))));
    }
}
