#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use balance_core::domain::{Account, AccountKind};
use balance_core::engine::BalanceEngine;
use balance_core::store::memory::{FixedClock, MemoryHousehold, MemoryStore};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn ts(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// Shared scenario fixture: in-memory collaborators plus a pinned clock.
pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub household: Arc<MemoryHousehold>,
    pub clock: Arc<FixedClock>,
}

impl Fixture {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            household: Arc::new(MemoryHousehold::new()),
            clock: Arc::new(FixedClock::at(now)),
        }
    }

    pub fn engine(&self) -> BalanceEngine<MemoryStore, MemoryHousehold> {
        BalanceEngine::new(self.store.clone(), self.household.clone())
            .with_clock(self.clock.clone())
    }

    pub fn add_account(
        &self,
        owner: Uuid,
        name: &str,
        kind: AccountKind,
        created_at: DateTime<Utc>,
    ) -> Account {
        let account = Account::new(owner, name, kind, created_at);
        self.store.add_account(account.clone());
        account
    }
}
