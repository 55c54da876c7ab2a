use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Fixed rounding tolerance for monetary invariant checks (half a cent).
pub const CENT_TOLERANCE: f64 = 0.005;

/// Granularity of a period bucket sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Granularity {
    Daily,
    Monthly,
}

/// A calendar month key, displayed as `yyyy-mm`.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of this month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    /// First day of the following month.
    pub fn next_first_day(&self) -> NaiveDate {
        if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1).unwrap()
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1).unwrap()
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Identifies one period bucket: a calendar day or a calendar month.
///
/// Keys are unique per bucket sequence by construction of the upstream
/// aggregation; ordering compares the underlying calendar position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriodKey {
    Day(NaiveDate),
    Month(MonthKey),
}

impl PeriodKey {
    /// The key of the period containing `date` at the given granularity.
    pub fn for_date(date: NaiveDate, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Daily => PeriodKey::Day(date),
            Granularity::Monthly => PeriodKey::Month(MonthKey::from_date(date)),
        }
    }

    /// First calendar day covered by this period.
    pub fn start_date(&self) -> NaiveDate {
        match self {
            PeriodKey::Day(date) => *date,
            PeriodKey::Month(month) => month.first_day(),
        }
    }

    /// First calendar day after this period ends, i.e. the archival cutoff
    /// when this is the newest archived bucket.
    pub fn next_period_start(&self) -> NaiveDate {
        match self {
            PeriodKey::Day(date) => date.succ_opt().unwrap(),
            PeriodKey::Month(month) => month.next_first_day(),
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            PeriodKey::Month(month) => write!(f, "{month}"),
        }
    }
}

/// A day or month aggregate carrying a signed net change in balance.
///
/// Archived buckets are frozen upstream; live buckets are recomputed from raw
/// events on every call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PeriodBucket {
    pub key: PeriodKey,
    pub net_change: f64,
    pub archived: bool,
}

impl PeriodBucket {
    pub fn archived(key: PeriodKey, net_change: f64) -> Self {
        Self {
            key,
            net_change,
            archived: true,
        }
    }

    pub fn live(key: PeriodKey, net_change: f64) -> Self {
        Self {
            key,
            net_change,
            archived: false,
        }
    }
}

/// One reconstructed period: derived opening and closing balances around a
/// bucket's net change. Never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReconstructedPeriod {
    pub bucket: PeriodBucket,
    pub opening_balance: f64,
    pub closing_balance: f64,
}

impl ReconstructedPeriod {
    /// Whether `closing - opening == net_change` within the cent tolerance.
    pub fn conserves_net_change(&self) -> bool {
        (self.closing_balance - self.opening_balance - self.bucket.net_change).abs()
            <= CENT_TOLERANCE
    }
}

/// A half-open date range: `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, EngineError> {
        if end <= start {
            return Err(EngineError::InvalidInput(
                "window end must be after start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}
