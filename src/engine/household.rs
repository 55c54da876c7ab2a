//! Read-authorization predicate for household-linked accounts. Reads are
//! widened to an active partner link; writes stay scoped to the literal
//! owner and never come through here.

use uuid::Uuid;

use crate::errors::{EngineError, EngineResult};
use crate::store::HouseholdDirectory;

/// Whether `requester` may view resources owned by `owner`, given the
/// requester's resolved partner link.
pub fn can_view(requester: Uuid, owner: Uuid, link: Option<Uuid>) -> bool {
    requester == owner || link == Some(owner)
}

/// Resolves the requester's link and applies [`can_view`], failing
/// `Unauthorized` otherwise. The link is only resolved when needed.
pub async fn authorize_view<H: HouseholdDirectory + ?Sized>(
    household: &H,
    requester: Uuid,
    owner: Uuid,
) -> EngineResult<()> {
    if requester == owner {
        return Ok(());
    }
    let link = household.resolve_linked_user(requester).await?;
    if can_view(requester, owner, link) {
        Ok(())
    } else {
        Err(EngineError::Unauthorized(requester))
    }
}
