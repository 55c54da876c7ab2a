//! Pure current-balance combination. Never mutates the anchor; the optional
//! breakdown exists for observability and plays no part in correctness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AccountKind, BalanceAnchor};
use crate::engine::aggregate::EventAggregates;

/// Diagnostic decomposition of a computed balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceBreakdown {
    pub anchor_balance: f64,
    pub confirmed_delta: f64,
    pub draft_delta: f64,
    pub transfer_inbound: f64,
    pub transfer_outbound: f64,
}

/// The live balance of an account plus its pending-draft summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentBalance {
    pub balance: f64,
    pub pending_drafts: f64,
    pub draft_count: u64,
    pub anchor_set_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<BalanceBreakdown>,
}

/// Combines the anchor with the aggregated deltas under the account kind's
/// sign convention. Expense accounts subtract spend; income accounts add.
pub fn combine(
    kind: AccountKind,
    anchor: &BalanceAnchor,
    aggregates: &EventAggregates,
    with_breakdown: bool,
) -> CurrentBalance {
    let balance = kind.combine(anchor.balance, aggregates.confirmed.sum, aggregates.drafts.sum);
    let breakdown = with_breakdown.then(|| BalanceBreakdown {
        anchor_balance: anchor.balance,
        confirmed_delta: aggregates.confirmed.sum,
        draft_delta: aggregates.drafts.sum,
        transfer_inbound: aggregates.transfers.inbound,
        transfer_outbound: aggregates.transfers.outbound,
    });
    CurrentBalance {
        balance,
        pending_drafts: aggregates.drafts.sum,
        draft_count: aggregates.drafts.count,
        anchor_set_at: anchor.set_at,
        breakdown,
    }
}
