#![doc(test(attr(deny(warnings))))]

//! Balance Core derives live and historical per-account balances for a
//! household finance ledger: an anchor value plus a stream of dated events
//! yields the current balance, and archived period aggregates are walked
//! backward from it to reconstruct per-day and per-month opening/closing
//! balances.

pub mod domain;
pub mod engine;
pub mod errors;
pub mod store;
pub mod time;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("balance_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("Balance Core tracing initialized.");
    });
}
