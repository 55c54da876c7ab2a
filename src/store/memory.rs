//! In-memory reference implementations of the collaborator seams, used by the
//! test suites and as a template for real backends.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::domain::{
    Account, BalanceAnchor, DateWindow, EventKind, Granularity, LedgerEvent, PeriodBucket,
};
use crate::store::{
    EventTotals, HouseholdDirectory, LedgerStore, StoreError, StoreResult, TransferLegTotals,
};
use crate::time::Clock;

#[derive(Default)]
struct Inner {
    accounts: HashMap<Uuid, Account>,
    anchors: HashMap<(Uuid, Uuid), BalanceAnchor>,
    events: Vec<LedgerEvent>,
    archived: HashMap<(Uuid, Granularity), Vec<PeriodBucket>>,
    failing: bool,
}

impl Inner {
    fn guard(&self) -> StoreResult<()> {
        if self.failing {
            return Err(StoreError::Read("injected failure".into()));
        }
        Ok(())
    }
}

/// In-memory ledger store with interior mutability.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_account(&self, account: Account) {
        self.inner.lock().accounts.insert(account.id, account);
    }

    pub fn add_event(&self, event: LedgerEvent) {
        self.inner.lock().events.push(event);
    }

    /// Records both legs of a transfer, attributing each to exactly one
    /// account with the sign its owning account's domain convention expects.
    pub fn record_transfer(
        &self,
        from_account: Uuid,
        to_account: Uuid,
        amount: f64,
        effective_date: NaiveDate,
        recorded_at: DateTime<Utc>,
    ) {
        let mut inner = self.inner.lock();
        let out_amount = match inner.accounts.get(&from_account) {
            Some(account) => -account.kind.balance_impact(amount),
            None => amount,
        };
        let in_amount = match inner.accounts.get(&to_account) {
            Some(account) => account.kind.balance_impact(amount),
            None => -amount,
        };
        inner.events.push(LedgerEvent::transfer_leg(
            from_account,
            out_amount,
            EventKind::TransferOut,
            effective_date,
            recorded_at,
        ));
        inner.events.push(LedgerEvent::transfer_leg(
            to_account,
            in_amount,
            EventKind::TransferIn,
            effective_date,
            recorded_at,
        ));
    }

    /// Freezes a historical bucket. Archival itself is owned by external
    /// writers; the engine only reads the result.
    pub fn archive_bucket(&self, account_id: Uuid, granularity: Granularity, bucket: PeriodBucket) {
        self.inner
            .lock()
            .archived
            .entry((account_id, granularity))
            .or_default()
            .push(bucket);
    }

    /// Makes every subsequent read fail, to exercise fail-closed paths.
    pub fn set_failing(&self, failing: bool) {
        self.inner.lock().failing = failing;
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn fetch_account(&self, account_id: Uuid) -> StoreResult<Option<Account>> {
        let inner = self.inner.lock();
        inner.guard()?;
        Ok(inner.accounts.get(&account_id).cloned())
    }

    async fn fetch_anchor(
        &self,
        account_id: Uuid,
        owner_id: Uuid,
    ) -> StoreResult<Option<BalanceAnchor>> {
        let inner = self.inner.lock();
        inner.guard()?;
        Ok(inner.anchors.get(&(account_id, owner_id)).cloned())
    }

    async fn upsert_anchor(&self, anchor: BalanceAnchor) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        if inner.failing {
            return Err(StoreError::Write("injected failure".into()));
        }
        inner
            .anchors
            .insert((anchor.account_id, anchor.owner_id), anchor);
        Ok(())
    }

    async fn fetch_confirmed_since(
        &self,
        account_id: Uuid,
        since: DateTime<Utc>,
    ) -> StoreResult<EventTotals> {
        let inner = self.inner.lock();
        inner.guard()?;
        let mut totals = EventTotals::default();
        for event in inner
            .events
            .iter()
            .filter(|e| e.account_id == account_id && !e.is_draft && e.recorded_at > since)
        {
            totals.sum += event.amount;
            totals.count += 1;
        }
        Ok(totals)
    }

    async fn fetch_drafts(&self, account_id: Uuid) -> StoreResult<EventTotals> {
        let inner = self.inner.lock();
        inner.guard()?;
        let mut totals = EventTotals::default();
        for event in inner
            .events
            .iter()
            .filter(|e| e.account_id == account_id && e.is_draft)
        {
            totals.sum += event.amount;
            totals.count += 1;
        }
        Ok(totals)
    }

    async fn fetch_transfer_legs(
        &self,
        account_id: Uuid,
        window: Option<DateWindow>,
    ) -> StoreResult<TransferLegTotals> {
        let inner = self.inner.lock();
        inner.guard()?;
        let mut totals = TransferLegTotals::default();
        for event in inner.events.iter().filter(|e| {
            e.account_id == account_id
                && !e.is_draft
                && window.map_or(true, |w| w.contains(e.effective_date))
        }) {
            match event.kind {
                EventKind::TransferIn => totals.inbound += event.amount.abs(),
                EventKind::TransferOut => totals.outbound += event.amount.abs(),
                EventKind::Entry => {}
            }
        }
        Ok(totals)
    }

    async fn fetch_archived_buckets(
        &self,
        account_id: Uuid,
        granularity: Granularity,
    ) -> StoreResult<Vec<PeriodBucket>> {
        let inner = self.inner.lock();
        inner.guard()?;
        let mut buckets = inner
            .archived
            .get(&(account_id, granularity))
            .cloned()
            .unwrap_or_default();
        buckets.sort_by(|a, b| b.key.cmp(&a.key));
        Ok(buckets)
    }

    async fn fetch_live_events(
        &self,
        account_id: Uuid,
        since: NaiveDate,
    ) -> StoreResult<Vec<LedgerEvent>> {
        let inner = self.inner.lock();
        inner.guard()?;
        Ok(inner
            .events
            .iter()
            .filter(|e| e.account_id == account_id && e.effective_date >= since)
            .cloned()
            .collect())
    }
}

/// In-memory household directory holding symmetric partner links.
#[derive(Default)]
pub struct MemoryHousehold {
    links: Mutex<HashMap<Uuid, Uuid>>,
}

impl MemoryHousehold {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links two users in both directions.
    pub fn link(&self, a: Uuid, b: Uuid) {
        let mut links = self.links.lock();
        links.insert(a, b);
        links.insert(b, a);
    }
}

#[async_trait]
impl HouseholdDirectory for MemoryHousehold {
    async fn resolve_linked_user(&self, user_id: Uuid) -> StoreResult<Option<Uuid>> {
        Ok(self.links.lock().get(&user_id).copied())
    }
}

/// Deterministic clock pinned to a fixed instant.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
