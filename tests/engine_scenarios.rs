mod common;

use common::{date, ts, Fixture};

use balance_core::domain::{AccountKind, LedgerEvent};
use balance_core::errors::EngineError;
use uuid::Uuid;

#[tokio::test]
async fn expense_account_subtracts_confirmed_and_draft_deltas() {
    let fixture = Fixture::at(ts(2024, 3, 1, 12));
    let owner = Uuid::new_v4();
    let account = fixture.add_account(owner, "Groceries", AccountKind::Expense, ts(2024, 1, 1, 0));
    let engine = fixture.engine();

    engine.set_balance(account.id, owner, 100.0).await.unwrap();

    // One confirmed expense after the anchor, one pending draft.
    fixture.clock.set(ts(2024, 3, 5, 12));
    fixture.store.add_event(LedgerEvent::entry(
        account.id,
        30.0,
        date(2024, 3, 5),
        ts(2024, 3, 5, 9),
    ));
    fixture.store.add_event(
        LedgerEvent::entry(account.id, 5.0, date(2024, 3, 5), ts(2024, 3, 5, 10)).as_draft(),
    );

    let current = engine.current_balance(account.id, owner).await.unwrap();
    assert_eq!(current.balance, 65.0);
    assert_eq!(current.pending_drafts, 5.0);
    assert_eq!(current.draft_count, 1);
    assert_eq!(current.anchor_set_at, ts(2024, 3, 1, 12));
}

#[tokio::test]
async fn income_account_adds_confirmed_income() {
    let fixture = Fixture::at(ts(2024, 3, 10, 12));
    let owner = Uuid::new_v4();
    let account = fixture.add_account(owner, "Salary", AccountKind::Income, ts(2024, 1, 1, 0));
    fixture.store.add_event(LedgerEvent::entry(
        account.id,
        500.0,
        date(2024, 3, 1),
        ts(2024, 3, 1, 9),
    ));

    let current = fixture
        .engine()
        .current_balance(account.id, owner)
        .await
        .unwrap();
    assert_eq!(current.balance, 500.0);
}

#[tokio::test]
async fn set_balance_round_trips_exactly() {
    let fixture = Fixture::at(ts(2024, 3, 1, 12));
    let owner = Uuid::new_v4();
    let account = fixture.add_account(owner, "Groceries", AccountKind::Expense, ts(2024, 1, 1, 0));
    let engine = fixture.engine();

    let anchor = engine.set_balance(account.id, owner, 123.45).await.unwrap();
    assert_eq!(anchor.balance, 123.45);
    assert_eq!(anchor.set_at, ts(2024, 3, 1, 12));

    let current = engine.current_balance(account.id, owner).await.unwrap();
    assert_eq!(current.balance, 123.45);
    assert_eq!(current.pending_drafts, 0.0);
    assert_eq!(current.draft_count, 0);
}

#[tokio::test]
async fn repeated_reads_are_idempotent() {
    let fixture = Fixture::at(ts(2024, 3, 1, 12));
    let owner = Uuid::new_v4();
    let account = fixture.add_account(owner, "Groceries", AccountKind::Expense, ts(2024, 1, 1, 0));
    fixture.store.add_event(LedgerEvent::entry(
        account.id,
        30.0,
        date(2024, 2, 5),
        ts(2024, 2, 5, 9),
    ));
    let engine = fixture.engine();

    let first = engine.current_balance(account.id, owner).await.unwrap();
    let second = engine.current_balance(account.id, owner).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn drafts_never_shift_the_anchor_timestamp() {
    let fixture = Fixture::at(ts(2024, 3, 1, 12));
    let owner = Uuid::new_v4();
    let account = fixture.add_account(owner, "Groceries", AccountKind::Expense, ts(2024, 1, 1, 0));
    let engine = fixture.engine();

    engine.set_balance(account.id, owner, 80.0).await.unwrap();
    fixture.clock.set(ts(2024, 3, 8, 12));
    fixture.store.add_event(
        LedgerEvent::entry(account.id, 12.0, date(2024, 3, 8), ts(2024, 3, 8, 9)).as_draft(),
    );

    let current = engine.current_balance(account.id, owner).await.unwrap();
    assert_eq!(current.anchor_set_at, ts(2024, 3, 1, 12));
    assert_eq!(current.balance, 68.0);
    assert_eq!(current.pending_drafts, 12.0);
}

#[tokio::test]
async fn transfer_legs_land_on_exactly_one_account_each() {
    let fixture = Fixture::at(ts(2024, 3, 5, 12));
    let owner = Uuid::new_v4();
    let source =
        fixture.add_account(owner, "Checking", AccountKind::Expense, ts(2024, 1, 1, 0));
    let destination =
        fixture.add_account(owner, "Savings", AccountKind::Expense, ts(2024, 1, 1, 0));
    fixture.store.record_transfer(
        source.id,
        destination.id,
        40.0,
        date(2024, 3, 5),
        ts(2024, 3, 5, 9),
    );
    let engine = fixture.engine();

    let source_balance = engine.current_balance(source.id, owner).await.unwrap();
    let destination_balance = engine.current_balance(destination.id, owner).await.unwrap();
    assert_eq!(source_balance.balance, -40.0);
    assert_eq!(destination_balance.balance, 40.0);
}

#[tokio::test]
async fn partner_reads_use_the_owners_anchor_and_events() {
    let fixture = Fixture::at(ts(2024, 3, 1, 12));
    let owner = Uuid::new_v4();
    let partner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    fixture.household.link(owner, partner);
    let account = fixture.add_account(owner, "Joint", AccountKind::Expense, ts(2024, 1, 1, 0));
    let engine = fixture.engine();

    engine.set_balance(account.id, owner, 250.0).await.unwrap();

    let seen_by_partner = engine.current_balance(account.id, partner).await.unwrap();
    assert_eq!(seen_by_partner.balance, 250.0);
    assert_eq!(seen_by_partner.anchor_set_at, ts(2024, 3, 1, 12));

    let err = engine
        .current_balance(account.id, stranger)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Unauthorized(_)));
}

#[tokio::test]
async fn household_links_never_widen_writes() {
    let fixture = Fixture::at(ts(2024, 3, 1, 12));
    let owner = Uuid::new_v4();
    let partner = Uuid::new_v4();
    fixture.household.link(owner, partner);
    let account = fixture.add_account(owner, "Joint", AccountKind::Expense, ts(2024, 1, 1, 0));

    let err = fixture
        .engine()
        .set_balance(account.id, partner, 999.0)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Unauthorized(_)));
}

#[tokio::test]
async fn set_balance_rejects_non_finite_values() {
    let fixture = Fixture::at(ts(2024, 3, 1, 12));
    let owner = Uuid::new_v4();
    let account = fixture.add_account(owner, "Groceries", AccountKind::Expense, ts(2024, 1, 1, 0));
    let engine = fixture.engine();

    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = engine.set_balance(account.id, owner, bad).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }
}

#[tokio::test]
async fn reads_fail_closed_when_a_collaborator_fails() {
    let fixture = Fixture::at(ts(2024, 3, 1, 12));
    let owner = Uuid::new_v4();
    let account = fixture.add_account(owner, "Groceries", AccountKind::Expense, ts(2024, 1, 1, 0));
    let engine = fixture.engine();
    fixture.store.set_failing(true);

    let err = engine.current_balance(account.id, owner).await.unwrap_err();
    assert!(matches!(err, EngineError::Upstream(_)));
}

#[tokio::test]
async fn diagnostics_breakdown_is_optional_and_additive() {
    let fixture = Fixture::at(ts(2024, 3, 5, 12));
    let owner = Uuid::new_v4();
    let source =
        fixture.add_account(owner, "Checking", AccountKind::Expense, ts(2024, 1, 1, 0));
    let destination =
        fixture.add_account(owner, "Savings", AccountKind::Expense, ts(2024, 1, 1, 0));
    fixture.store.record_transfer(
        source.id,
        destination.id,
        40.0,
        date(2024, 3, 5),
        ts(2024, 3, 5, 9),
    );

    let plain = fixture
        .engine()
        .current_balance(source.id, owner)
        .await
        .unwrap();
    let diagnosed = fixture
        .engine()
        .with_diagnostics(true)
        .current_balance(source.id, owner)
        .await
        .unwrap();
    assert_eq!(plain.balance, diagnosed.balance);

    let breakdown = diagnosed.breakdown.as_ref().unwrap();
    assert_eq!(breakdown.transfer_outbound, 40.0);
    assert_eq!(breakdown.transfer_inbound, 0.0);

    let plain_json = serde_json::to_value(&plain).unwrap();
    assert!(plain_json.get("breakdown").is_none());
    let diagnosed_json = serde_json::to_value(&diagnosed).unwrap();
    assert!(diagnosed_json["breakdown"]["confirmed_delta"].is_number());
}

#[tokio::test]
async fn unknown_account_reports_not_found() {
    let fixture = Fixture::at(ts(2024, 3, 1, 12));
    let err = fixture
        .engine()
        .current_balance(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::AccountNotFound(_)));
}
