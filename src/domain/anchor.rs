use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-committed `(balance, set_at)` pair that current-balance computation
/// is relative to. One anchor exists per `(account, owner)`; an explicit
/// "set balance" replaces it wholesale, never merges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceAnchor {
    pub account_id: Uuid,
    pub owner_id: Uuid,
    pub balance: f64,
    pub set_at: DateTime<Utc>,
}

impl BalanceAnchor {
    /// The lazy default used when no anchor record exists: zero balance,
    /// anchored at the account's creation time.
    pub fn default_for(account_id: Uuid, owner_id: Uuid, account_epoch: DateTime<Utc>) -> Self {
        Self {
            account_id,
            owner_id,
            balance: 0.0,
            set_at: account_epoch,
        }
    }
}
