use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classifies a ledger event. Transfer legs are tagged so that per-account
/// transfer totals can be reported; the balance arithmetic itself only uses
/// the signed amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventKind {
    /// A plain confirmed or draft transaction.
    Entry,
    /// The inbound leg of a transfer, attributed to the destination account.
    TransferIn,
    /// The outbound leg of a transfer, attributed to the source account.
    TransferOut,
}

/// A confirmed or draft transaction, or one leg of a transfer.
///
/// `amount` is signed per the owning account's domain convention (positive is
/// "more spend" on expense accounts, "more income" on income accounts).
/// `effective_date` places the event in a period bucket; `recorded_at` is the
/// insertion time the anchor cutoff compares against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEvent {
    pub id: Uuid,
    pub account_id: Uuid,
    pub amount: f64,
    pub kind: EventKind,
    pub effective_date: NaiveDate,
    pub recorded_at: DateTime<Utc>,
    pub is_draft: bool,
}

impl LedgerEvent {
    /// Creates a confirmed plain entry.
    pub fn entry(
        account_id: Uuid,
        amount: f64,
        effective_date: NaiveDate,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            amount,
            kind: EventKind::Entry,
            effective_date,
            recorded_at,
            is_draft: false,
        }
    }

    /// Creates one transfer leg with the given tag.
    pub fn transfer_leg(
        account_id: Uuid,
        amount: f64,
        kind: EventKind,
        effective_date: NaiveDate,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            amount,
            kind,
            effective_date,
            recorded_at,
            is_draft: false,
        }
    }

    /// Marks the event as a pending draft.
    pub fn as_draft(mut self) -> Self {
        self.is_draft = true;
        self
    }
}
