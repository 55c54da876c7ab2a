pub mod aggregate;
pub mod anchor;
pub mod boundary;
pub mod calculate;
pub mod household;
pub mod reconstruct;

use std::sync::Arc;

use uuid::Uuid;

pub use aggregate::EventAggregates;
pub use anchor::ResolvedAnchor;
pub use calculate::{BalanceBreakdown, CurrentBalance};

use crate::domain::{
    Account, BalanceAnchor, DateWindow, Granularity, PeriodBucket, ReconstructedPeriod,
};
use crate::errors::{EngineError, EngineResult};
use crate::store::{HouseholdDirectory, LedgerStore};
use crate::time::{Clock, SystemClock};

/// The balance reconstruction engine.
///
/// Stateless between calls: every read derives its result purely from the
/// current content of the ledger store. The only mutation is `set_balance`,
/// an atomic anchor replacement delegated to the store.
pub struct BalanceEngine<S, H> {
    store: Arc<S>,
    household: Arc<H>,
    clock: Arc<dyn Clock>,
    diagnostics: bool,
}

impl<S, H> BalanceEngine<S, H>
where
    S: LedgerStore,
    H: HouseholdDirectory,
{
    pub fn new(store: Arc<S>, household: Arc<H>) -> Self {
        Self {
            store,
            household,
            clock: Arc::new(SystemClock),
            diagnostics: false,
        }
    }

    /// Replaces the clock, for deterministic tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Enables the diagnostic breakdown on computed balances.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Derives the live balance of an account: the owner's anchor plus the
    /// confirmed-since-anchor and pending-draft deltas, signed by kind.
    pub async fn current_balance(
        &self,
        account_id: Uuid,
        requester: Uuid,
    ) -> EngineResult<CurrentBalance> {
        let (_, current) = self.snapshot(account_id, requester).await?;
        Ok(current)
    }

    /// Replaces the balance anchor for an account. Household links never
    /// widen writes: only the literal owner may set a balance.
    pub async fn set_balance(
        &self,
        account_id: Uuid,
        requester: Uuid,
        new_balance: f64,
    ) -> EngineResult<BalanceAnchor> {
        if !new_balance.is_finite() {
            return Err(EngineError::InvalidInput(
                "balance must be a finite number".into(),
            ));
        }
        let account = self
            .store
            .fetch_account(account_id)
            .await?
            .ok_or(EngineError::AccountNotFound(account_id))?;
        if requester != account.owner_id {
            return Err(EngineError::Unauthorized(requester));
        }

        let anchor = BalanceAnchor {
            account_id,
            owner_id: account.owner_id,
            balance: new_balance,
            set_at: self.clock.now(),
        };
        self.store.upsert_anchor(anchor.clone()).await?;
        tracing::debug!(%account_id, balance = new_balance, "anchor replaced");
        Ok(anchor)
    }

    /// Reconstructs per-day opening/closing balances inside `window`, newest
    /// first, up to `limit` entries.
    pub async fn daily_history(
        &self,
        account_id: Uuid,
        requester: Uuid,
        window: DateWindow,
        limit: Option<usize>,
    ) -> EngineResult<Vec<ReconstructedPeriod>> {
        let (account, current) = self.snapshot(account_id, requester).await?;
        let buckets =
            boundary::series(self.store.as_ref(), &account, Granularity::Daily, self.clock.today())
                .await?;

        // Buckets newer than the window fold into the anchoring term; walking
        // stops once the series drops below the window start.
        let mut live_net = 0.0;
        let mut walk: Vec<PeriodBucket> = Vec::new();
        for bucket in buckets {
            let start = bucket.key.start_date();
            if start >= window.end {
                live_net += bucket.net_change;
            } else if start >= window.start {
                walk.push(bucket);
            } else {
                break;
            }
        }

        let mut periods = reconstruct::reconstruct(current.balance, live_net, &walk)?;
        if let Some(limit) = limit {
            periods.truncate(limit);
        }
        Ok(periods)
    }

    /// Reconstructs per-month opening/closing balances across the full
    /// archive, newest first, the live current month included.
    pub async fn monthly_archive_summary(
        &self,
        account_id: Uuid,
        requester: Uuid,
    ) -> EngineResult<Vec<ReconstructedPeriod>> {
        let (account, current) = self.snapshot(account_id, requester).await?;
        let buckets = boundary::series(
            self.store.as_ref(),
            &account,
            Granularity::Monthly,
            self.clock.today(),
        )
        .await?;
        reconstruct::reconstruct(current.balance, 0.0, &buckets)
    }

    /// Resolves the account and anchor, aggregates events, and combines them
    /// into the current balance. Shared by every read operation, so a failure
    /// anywhere aborts before any figure is produced.
    async fn snapshot(
        &self,
        account_id: Uuid,
        requester: Uuid,
    ) -> EngineResult<(Account, CurrentBalance)> {
        let ResolvedAnchor { account, anchor } = anchor::resolve(
            self.store.as_ref(),
            self.household.as_ref(),
            account_id,
            requester,
        )
        .await?;
        let aggregates =
            aggregate::totals(self.store.as_ref(), account_id, anchor.set_at).await?;
        let current = calculate::combine(account.kind, &anchor, &aggregates, self.diagnostics);
        tracing::debug!(
            %account_id,
            balance = current.balance,
            drafts = current.draft_count,
            "balance computed"
        );
        Ok((account, current))
    }
}
