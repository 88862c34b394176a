//! Batch status workflow.
//!
//! Bulk and single-ticket transitions over the table's ticket collection.
//! A transition only ever moves a ticket one step forward, and only when its
//! current status is exactly the required source status; everything else in
//! the selection is left alone. Each operation comes in two forms: a split
//! `begin_*`/`finish_*` pair for event loops that keep handling input while
//! the backend call is pending, and a convenience `async fn` that runs both
//! halves around the backend call.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Result, TicketDeskError};
use crate::table::{SelectionSet, TableState};
use crate::types::{Ticket, TicketId, TicketStatus};

pub mod backend;
pub mod notice;

pub use backend::{BackendError, RetryPolicy, SimulatedBackend, StatusBackend, commit_with_retry};
pub use notice::{AdvanceNotice, BatchNotice, NoticeLevel};

/// Status a batch action moves tickets into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchTarget {
    /// Pending -> In-Progress
    Start,
    /// In-Progress -> Resolved
    Resolve,
}

impl BatchTarget {
    pub fn status(self) -> TicketStatus {
        match self {
            BatchTarget::Start => TicketStatus::InProgress,
            BatchTarget::Resolve => TicketStatus::Resolved,
        }
    }

    /// The exact status a ticket must hold to be eligible.
    pub fn source(self) -> TicketStatus {
        match self {
            BatchTarget::Start => TicketStatus::Pending,
            BatchTarget::Resolve => TicketStatus::InProgress,
        }
    }

    pub(crate) fn verb(self) -> &'static str {
        match self {
            BatchTarget::Start => "started work on",
            BatchTarget::Resolve => "resolved",
        }
    }
}

enum_display_fromstr!(
    BatchTarget,
    crate::error::TicketDeskError::InvalidBatchTarget,
    {
        Start => "start" | "in-progress" | "in_progress",
        Resolve => "resolve" | "resolved",
    }
);

/// Selection split by eligibility for one target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub eligible: Vec<TicketId>,
    pub ignored: Vec<TicketId>,
}

/// Split `selection` into tickets that can move to `target` and the rest.
/// Selected ids missing from the collection count as ignored.
pub fn partition(tickets: &[Ticket], selection: &SelectionSet, target: BatchTarget) -> Partition {
    let source = target.source();
    let mut result = Partition::default();
    for id in selection.iter() {
        match tickets.iter().find(|t| &t.id == id) {
            Some(ticket) if ticket.status == source => result.eligible.push(id.clone()),
            _ => result.ignored.push(id.clone()),
        }
    }
    result
}

/// A batch that passed eligibility and is waiting on the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBatch {
    pub target: BatchTarget,
    pub eligible: Vec<TicketId>,
    pub ignored_count: usize,
    epoch: u64,
}

/// Result of starting a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchBegin {
    /// Send `PendingBatch::eligible` to the backend, then call [`finish_batch`].
    Commit(PendingBatch),
    /// Nothing to send; the operation is already complete.
    Done(BatchNotice),
}

/// Check eligibility and mark the batch in flight.
pub fn begin_batch(state: &mut TableState, target: BatchTarget) -> BatchBegin {
    if state.is_batch_in_flight() {
        return BatchBegin::Done(BatchNotice::Busy);
    }

    // Selected ids outside the filtered result count as ignored.
    let visible = state.filtered();
    let Partition { eligible, ignored } = partition(&visible, state.selection(), target);
    if eligible.is_empty() {
        info!(batch = %target, ignored = ignored.len(), "no eligible tickets for batch");
        return BatchBegin::Done(BatchNotice::NoOp {
            target,
            ignored_count: ignored.len(),
        });
    }

    state.set_batch_in_flight(true);
    BatchBegin::Commit(PendingBatch {
        target,
        eligible,
        ignored_count: ignored.len(),
        epoch: state.epoch(),
    })
}

/// Apply the backend outcome of a pending batch to the table.
pub fn finish_batch(
    state: &mut TableState,
    pending: PendingBatch,
    outcome: std::result::Result<(), BackendError>,
) -> BatchNotice {
    if pending.epoch != state.epoch() {
        warn!(batch = %pending.target, "discarding batch result after teardown");
        return BatchNotice::Discarded;
    }
    state.set_batch_in_flight(false);

    if let Err(err) = outcome {
        warn!(batch = %pending.target, error = %err, "batch action failed");
        return BatchNotice::Failed {
            target: pending.target,
            reason: err.to_string(),
            transient: err.is_transient(),
        };
    }

    let source = pending.target.source();
    let status = pending.target.status();
    let mut changed = 0;
    state.replace_tickets(|tickets| {
        tickets
            .iter()
            .map(|t| {
                if t.status == source && pending.eligible.contains(&t.id) {
                    changed += 1;
                    t.with_status(status)
                } else {
                    t.clone()
                }
            })
            .collect()
    });
    state.selection_mut().clear();

    let ignored_count = pending.ignored_count + (pending.eligible.len() - changed);
    info!(batch = %pending.target, changed, ignored = ignored_count, "batch action applied");
    BatchNotice::Applied {
        target: pending.target,
        changed_count: changed,
        ignored_count,
    }
}

/// Run a whole batch action against `backend`.
pub async fn apply_batch(
    state: &mut TableState,
    backend: &dyn StatusBackend,
    policy: &RetryPolicy,
    target: BatchTarget,
) -> BatchNotice {
    let pending = match begin_batch(state, target) {
        BatchBegin::Commit(pending) => pending,
        BatchBegin::Done(notice) => return notice,
    };

    let ids = pending.eligible.clone();
    let outcome = commit_with_retry(policy, || backend.commit_batch(&ids, target.status())).await;
    finish_batch(state, pending, outcome)
}

/// A single-ticket advance waiting on the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAdvance {
    pub id: TicketId,
    pub from: TicketStatus,
    pub to: TicketStatus,
    epoch: u64,
}

/// Result of starting a single-ticket advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceBegin {
    Commit(PendingAdvance),
    Done(AdvanceNotice),
}

/// Look up the ticket and mark it in flight unless it is terminal or busy.
pub fn begin_advance(state: &mut TableState, id: &TicketId) -> Result<AdvanceBegin> {
    let ticket = state
        .ticket(id)
        .ok_or_else(|| TicketDeskError::TicketNotFound(id.to_string()))?;
    let from = ticket.status;

    let Some(to) = from.next() else {
        return Ok(AdvanceBegin::Done(AdvanceNotice::Terminal { id: id.clone() }));
    };
    if state.is_advancing(id) {
        return Ok(AdvanceBegin::Done(AdvanceNotice::Busy { id: id.clone() }));
    }

    state.set_advancing(id, true);
    Ok(AdvanceBegin::Commit(PendingAdvance {
        id: id.clone(),
        from,
        to,
        epoch: state.epoch(),
    }))
}

/// Apply the backend outcome of a single advance.
pub fn finish_advance(
    state: &mut TableState,
    pending: PendingAdvance,
    outcome: std::result::Result<(), BackendError>,
) -> AdvanceNotice {
    if pending.epoch != state.epoch() {
        warn!(id = %pending.id, "discarding status update after teardown");
        return AdvanceNotice::Discarded { id: pending.id };
    }
    state.set_advancing(&pending.id, false);

    if let Err(err) = outcome {
        warn!(id = %pending.id, error = %err, "status update failed");
        return AdvanceNotice::Failed {
            id: pending.id,
            reason: err.to_string(),
        };
    }

    let mut applied = false;
    state.replace_tickets(|tickets| {
        tickets
            .iter()
            .map(|t| {
                if t.id == pending.id && t.status == pending.from {
                    applied = true;
                    t.with_status(pending.to)
                } else {
                    t.clone()
                }
            })
            .collect()
    });

    if !applied {
        warn!(id = %pending.id, "ticket changed while its update was pending");
        return AdvanceNotice::Discarded { id: pending.id };
    }

    info!(id = %pending.id, status = %pending.to, "ticket advanced");
    AdvanceNotice::Applied {
        id: pending.id,
        status: pending.to,
    }
}

/// Move one ticket a single step forward through `backend`.
pub async fn advance(
    state: &mut TableState,
    backend: &dyn StatusBackend,
    policy: &RetryPolicy,
    id: &TicketId,
) -> Result<AdvanceNotice> {
    let pending = match begin_advance(state, id)? {
        AdvanceBegin::Commit(pending) => pending,
        AdvanceBegin::Done(notice) => return Ok(notice),
    };

    let outcome = commit_with_retry(policy, || backend.commit_single(&pending.id, pending.to)).await;
    Ok(finish_advance(state, pending, outcome))
}
