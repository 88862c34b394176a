//! User-facing outcomes of workflow operations

use serde::Serialize;

use crate::types::{TicketId, TicketStatus};

use super::BatchTarget;

/// Severity level of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
    Success,
}

/// Outcome of a batch status action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BatchNotice {
    /// Eligible tickets were committed and the selection cleared.
    #[serde(rename_all = "camelCase")]
    Applied {
        target: BatchTarget,
        changed_count: usize,
        ignored_count: usize,
    },
    /// Nothing in the selection could take the transition.
    #[serde(rename_all = "camelCase")]
    NoOp {
        target: BatchTarget,
        ignored_count: usize,
    },
    /// Another batch is still committing.
    Busy,
    /// The backend failed; tickets and selection are unchanged.
    #[serde(rename_all = "camelCase")]
    Failed {
        target: BatchTarget,
        reason: String,
        transient: bool,
    },
    /// The table was torn down before the commit returned.
    Discarded,
}

impl BatchNotice {
    pub fn changed_count(&self) -> usize {
        match self {
            BatchNotice::Applied { changed_count, .. } => *changed_count,
            _ => 0,
        }
    }

    pub fn ignored_count(&self) -> usize {
        match self {
            BatchNotice::Applied { ignored_count, .. } | BatchNotice::NoOp { ignored_count, .. } => {
                *ignored_count
            }
            _ => 0,
        }
    }

    pub fn level(&self) -> NoticeLevel {
        match self {
            BatchNotice::Applied { .. } => NoticeLevel::Success,
            BatchNotice::NoOp { .. } | BatchNotice::Discarded => NoticeLevel::Info,
            BatchNotice::Busy => NoticeLevel::Warning,
            BatchNotice::Failed { .. } => NoticeLevel::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            BatchNotice::Applied {
                target,
                changed_count,
                ..
            } => format!("Successfully {} {} tickets.", target.verb(), changed_count),
            BatchNotice::NoOp { target, .. } => format!(
                "No eligible tickets selected to change status to {}.",
                target.status()
            ),
            BatchNotice::Busy => "A batch update is already in progress.".to_string(),
            BatchNotice::Failed { .. } => {
                "Failed to perform batch action. Please try again.".to_string()
            }
            BatchNotice::Discarded => {
                "Batch update discarded because the table was closed.".to_string()
            }
        }
    }
}

/// Outcome of a single-ticket status advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AdvanceNotice {
    Applied { id: TicketId, status: TicketStatus },
    /// The ticket is already resolved; nothing was sent.
    Terminal { id: TicketId },
    Busy { id: TicketId },
    Failed { id: TicketId, reason: String },
    /// The ticket moved or the table closed while the commit was pending.
    Discarded { id: TicketId },
}

impl AdvanceNotice {
    pub fn level(&self) -> NoticeLevel {
        match self {
            AdvanceNotice::Applied { .. } => NoticeLevel::Success,
            AdvanceNotice::Terminal { .. } | AdvanceNotice::Discarded { .. } => NoticeLevel::Info,
            AdvanceNotice::Busy { .. } => NoticeLevel::Warning,
            AdvanceNotice::Failed { .. } => NoticeLevel::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AdvanceNotice::Applied { id, status } => format!("Ticket {id} is now {status}."),
            AdvanceNotice::Terminal { id } => format!("Ticket {id} is already Resolved."),
            AdvanceNotice::Busy { id } => format!("Ticket {id} is already being updated."),
            AdvanceNotice::Failed { .. } => "Failed to update status.".to_string(),
            AdvanceNotice::Discarded { id } => format!("Update for ticket {id} was discarded."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_messages() {
        let applied = BatchNotice::Applied {
            target: BatchTarget::Start,
            changed_count: 2,
            ignored_count: 3,
        };
        insta::assert_snapshot!(applied.message(), @"Successfully started work on 2 tickets.");

        let resolved = BatchNotice::Applied {
            target: BatchTarget::Resolve,
            changed_count: 1,
            ignored_count: 0,
        };
        insta::assert_snapshot!(resolved.message(), @"Successfully resolved 1 tickets.");

        let noop = BatchNotice::NoOp {
            target: BatchTarget::Resolve,
            ignored_count: 2,
        };
        insta::assert_snapshot!(noop.message(), @"No eligible tickets selected to change status to Resolved.");
        assert_eq!(noop.changed_count(), 0);
        assert_eq!(noop.ignored_count(), 2);
        assert_eq!(noop.level(), NoticeLevel::Info);
    }

    #[test]
    fn test_failure_is_distinct() {
        let failed = BatchNotice::Failed {
            target: BatchTarget::Start,
            reason: "backend unavailable: down".to_string(),
            transient: true,
        };
        assert_eq!(failed.level(), NoticeLevel::Error);
        assert_eq!(
            failed.message(),
            "Failed to perform batch action. Please try again."
        );
    }

    #[test]
    fn test_advance_messages() {
        let id = TicketId::new_unchecked("1002");
        let applied = AdvanceNotice::Applied {
            id: id.clone(),
            status: TicketStatus::InProgress,
        };
        assert_eq!(applied.message(), "Ticket 1002 is now In-Progress.");
        assert_eq!(
            AdvanceNotice::Failed {
                id,
                reason: "x".into()
            }
            .message(),
            "Failed to update status."
        );
    }

    #[test]
    fn test_notice_json_shape() {
        let notice = BatchNotice::Applied {
            target: BatchTarget::Start,
            changed_count: 2,
            ignored_count: 1,
        };
        let value = serde_json::to_value(&notice).unwrap();
        assert_eq!(value["kind"], "applied");
        assert_eq!(value["changedCount"], 2);
        assert_eq!(value["ignoredCount"], 1);
        assert_eq!(value["target"], "start");
    }
}
