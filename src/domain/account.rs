use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a financial account whose balance the engine tracks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub kind: AccountKind,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account owned by `owner_id`, stamped at `created_at`.
    pub fn new(
        owner_id: Uuid,
        name: impl Into<String>,
        kind: AccountKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            kind,
            created_at,
        }
    }
}

/// Enumerates the supported account classifications.
///
/// Event amounts are recorded signed per the account's domain convention:
/// positive means "more spend" on an expense account and "more income" on an
/// income account. The kind decides how a summed delta moves the balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountKind {
    Expense,
    Income,
}

impl AccountKind {
    /// Combines an anchor balance with confirmed and draft deltas.
    ///
    /// Expense accounts subtract their deltas (spending reduces the balance);
    /// income accounts add them.
    pub fn combine(self, anchor_balance: f64, confirmed_delta: f64, draft_delta: f64) -> f64 {
        match self {
            AccountKind::Expense => anchor_balance - confirmed_delta - draft_delta,
            AccountKind::Income => anchor_balance + confirmed_delta + draft_delta,
        }
    }

    /// Maps a domain-convention amount to its signed balance-direction change.
    pub fn balance_impact(self, amount: f64) -> f64 {
        match self {
            AccountKind::Expense => -amount,
            AccountKind::Income => amount,
        }
    }
}
