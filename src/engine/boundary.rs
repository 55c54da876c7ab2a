//! Archive boundary management: frozen historical buckets are taken as-is,
//! and everything past the archival cutoff (the live region) is recomputed
//! from raw events on every call. Drafts never enter a bucket.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{Account, Granularity, PeriodBucket, PeriodKey};
use crate::errors::EngineResult;
use crate::store::LedgerStore;

/// Produces the ordered bucket series for one account: fresh live buckets
/// first, then the archived buckets, newest first throughout.
///
/// The cutoff is the first day after the newest archived bucket, or the
/// account's creation date when nothing is archived yet. The current period
/// is always present, with a zero net change if no events touched it.
pub async fn series<S: LedgerStore + ?Sized>(
    store: &S,
    account: &Account,
    granularity: Granularity,
    today: NaiveDate,
) -> EngineResult<Vec<PeriodBucket>> {
    let archived = store.fetch_archived_buckets(account.id, granularity).await?;
    let cutoff = archived
        .first()
        .map(|bucket| bucket.key.next_period_start())
        .unwrap_or_else(|| account.created_at.date_naive());

    let events = store.fetch_live_events(account.id, cutoff).await?;
    let mut live: BTreeMap<PeriodKey, f64> = BTreeMap::new();
    for event in events.iter().filter(|e| !e.is_draft) {
        let key = PeriodKey::for_date(event.effective_date, granularity);
        *live.entry(key).or_insert(0.0) += account.kind.balance_impact(event.amount);
    }

    let current_key = PeriodKey::for_date(today, granularity);
    if current_key.start_date() >= cutoff {
        live.entry(current_key).or_insert(0.0);
    }

    let mut buckets: Vec<PeriodBucket> = live
        .into_iter()
        .rev()
        .map(|(key, net_change)| PeriodBucket::live(key, net_change))
        .collect();
    buckets.extend(archived);
    Ok(buckets)
}
