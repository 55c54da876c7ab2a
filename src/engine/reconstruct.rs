//! Backward-walk reconstruction: starting from the current balance, each
//! bucket's closing and opening balances are derived newest to oldest as a
//! fold over the immutable ordered series.

use crate::domain::{PeriodBucket, ReconstructedPeriod};
use crate::errors::{EngineError, EngineResult};

/// Reconstructs opening and closing balances for `buckets`, newest first.
///
/// `live_net` is the summed net change of events newer than the newest walked
/// bucket; subtracting it anchors the walk at the boundary between "now" and
/// that bucket. Gaps in the key sequence are zero-activity periods and chain
/// through unchanged; duplicate or out-of-order keys mean the upstream
/// aggregation is broken and fail the whole reconstruction.
pub fn reconstruct(
    current_balance: f64,
    live_net: f64,
    buckets: &[PeriodBucket],
) -> EngineResult<Vec<ReconstructedPeriod>> {
    for pair in buckets.windows(2) {
        if pair[0].key <= pair[1].key {
            return Err(EngineError::Upstream(format!(
                "bucket keys not strictly descending: {} then {}",
                pair[0].key, pair[1].key
            )));
        }
    }

    let start = current_balance - live_net;
    let (periods, _) = buckets.iter().fold(
        (Vec::with_capacity(buckets.len()), start),
        |(mut periods, running), bucket| {
            let closing = running;
            let opening = running - bucket.net_change;
            periods.push(ReconstructedPeriod {
                bucket: *bucket,
                opening_balance: opening,
                closing_balance: closing,
            });
            (periods, opening)
        },
    );
    Ok(periods)
}
