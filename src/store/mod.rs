//! Collaborator seams the engine reads through. Persistence and querying of
//! raw records live behind these traits; the engine itself holds no state
//! between calls.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    Account, BalanceAnchor, DateWindow, Granularity, LedgerEvent, PeriodBucket,
};

/// Failure of a collaborator read or write. The engine propagates these
/// immediately; a failed fetch is never substituted with zero.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("ledger read failed: {0}")]
    Read(String),
    #[error("ledger write failed: {0}")]
    Write(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Sum and count of a set of ledger events, in domain-convention amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EventTotals {
    pub sum: f64,
    pub count: u64,
}

/// Per-account transfer-leg totals as positive magnitudes. Each leg belongs
/// to exactly one account, so these never double-count a transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransferLegTotals {
    pub inbound: f64,
    pub outbound: f64,
}

/// Read (and single-upsert) interface over the ledger records the engine
/// derives balances from.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn fetch_account(&self, account_id: Uuid) -> StoreResult<Option<Account>>;

    async fn fetch_anchor(
        &self,
        account_id: Uuid,
        owner_id: Uuid,
    ) -> StoreResult<Option<BalanceAnchor>>;

    /// Atomically replaces the anchor keyed by `(account_id, owner_id)`.
    /// This is the engine's only write path.
    async fn upsert_anchor(&self, anchor: BalanceAnchor) -> StoreResult<()>;

    /// Totals of non-draft events with `recorded_at > since`.
    async fn fetch_confirmed_since(
        &self,
        account_id: Uuid,
        since: DateTime<Utc>,
    ) -> StoreResult<EventTotals>;

    /// Totals of all draft events, independent of any timestamp.
    async fn fetch_drafts(&self, account_id: Uuid) -> StoreResult<EventTotals>;

    /// Confirmed transfer-leg magnitudes attributed to this account,
    /// optionally restricted to a window of effective dates.
    async fn fetch_transfer_legs(
        &self,
        account_id: Uuid,
        window: Option<DateWindow>,
    ) -> StoreResult<TransferLegTotals>;

    /// Frozen historical buckets at the given granularity, newest first.
    async fn fetch_archived_buckets(
        &self,
        account_id: Uuid,
        granularity: Granularity,
    ) -> StoreResult<Vec<PeriodBucket>>;

    /// Raw events with `effective_date >= since`, i.e. the live region past
    /// the archival cutoff. Recomputed sources, never cached aggregates.
    async fn fetch_live_events(
        &self,
        account_id: Uuid,
        since: NaiveDate,
    ) -> StoreResult<Vec<LedgerEvent>>;
}

/// Maps a user to an optional linked partner for shared read access.
#[async_trait]
pub trait HouseholdDirectory: Send + Sync {
    /// At most one active link per user.
    async fn resolve_linked_user(&self, user_id: Uuid) -> StoreResult<Option<Uuid>>;
}
