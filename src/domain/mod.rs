pub mod account;
pub mod anchor;
pub mod event;
pub mod period;

pub use account::{Account, AccountKind};
pub use anchor::BalanceAnchor;
pub use event::{EventKind, LedgerEvent};
pub use period::{
    DateWindow, Granularity, MonthKey, PeriodBucket, PeriodKey, ReconstructedPeriod,
    CENT_TOLERANCE,
};
