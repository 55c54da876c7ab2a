//! Anchor resolution: loads the account, checks view authorization, and
//! returns the owner's anchor or the lazy zero default. The owner's anchor is
//! used even when a linked partner is the requester.

use uuid::Uuid;

use crate::domain::{Account, BalanceAnchor};
use crate::engine::household;
use crate::errors::{EngineError, EngineResult};
use crate::store::{HouseholdDirectory, LedgerStore};

/// An account together with the anchor its balance is computed against.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAnchor {
    pub account: Account,
    pub anchor: BalanceAnchor,
}

/// Resolves the anchor for `account_id` on behalf of `requester`.
///
/// Fails `AccountNotFound` if the account does not exist and `Unauthorized`
/// if neither the requester nor their linked partner owns it. A missing
/// anchor record is not an error: it resolves to zero at the account epoch.
pub async fn resolve<S, H>(
    store: &S,
    household: &H,
    account_id: Uuid,
    requester: Uuid,
) -> EngineResult<ResolvedAnchor>
where
    S: LedgerStore + ?Sized,
    H: HouseholdDirectory + ?Sized,
{
    let account = store
        .fetch_account(account_id)
        .await?
        .ok_or(EngineError::AccountNotFound(account_id))?;
    household::authorize_view(household, requester, account.owner_id).await?;

    let anchor = match store.fetch_anchor(account_id, account.owner_id).await? {
        Some(anchor) => anchor,
        None => BalanceAnchor::default_for(account_id, account.owner_id, account.created_at),
    };
    Ok(ResolvedAnchor { account, anchor })
}
