//! Event aggregation: the confirmed-since-anchor, draft, and transfer-leg
//! reads are independent and issued concurrently. The fan-in is fail-closed;
//! one failed read aborts the whole computation.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::EngineResult;
use crate::store::{EventTotals, LedgerStore, TransferLegTotals};

/// The three independent aggregates the balance calculation consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventAggregates {
    /// Non-draft events recorded strictly after the anchor timestamp.
    pub confirmed: EventTotals,
    /// All drafts, unconditionally; drafts are pending regardless of anchor.
    pub drafts: EventTotals,
    /// Transfer-leg magnitudes, for the diagnostics breakdown only.
    pub transfers: TransferLegTotals,
}

/// Fans out the three reads for `account_id` and waits for all of them.
pub async fn totals<S: LedgerStore + ?Sized>(
    store: &S,
    account_id: Uuid,
    anchor_set_at: DateTime<Utc>,
) -> EngineResult<EventAggregates> {
    let (confirmed, drafts, transfers) = tokio::try_join!(
        store.fetch_confirmed_since(account_id, anchor_set_at),
        store.fetch_drafts(account_id),
        store.fetch_transfer_legs(account_id, None),
    )?;
    Ok(EventAggregates {
        confirmed,
        drafts,
        transfers,
    })
}
