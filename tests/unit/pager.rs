// tests/unit/pager.rs
//! Unit tests for the pure pagination state machine.

use carelist::{ApplyOutcome, Cursor, Page, Pager, Record, RecordId, StoreError, StoreErrorCode};
use pretty_assertions::assert_eq;
use serde_json::json;

fn record(id: &str, name: &str) -> Record {
    let mut record = Record::new();
    record.set("id", json!(id));
    record.set("name", json!(name));
    record
}

fn page(ids: &[&str], next: Option<&str>) -> Page {
    let items = ids.iter().map(|id| record(id, id)).collect();
    Page::new(items, next.map(Cursor::new), next.is_some())
}

fn names(pager: &Pager) -> Vec<String> {
    pager
        .items()
        .iter()
        .map(|r| r.id().expect("test records carry ids").to_string())
        .collect()
}

fn permission_denied() -> StoreError {
    StoreError::service(StoreErrorCode::PermissionDenied, "permission-denied")
}

#[test]
fn pages_accumulate_in_fetch_order() {
    let mut pager = Pager::new(2);

    let ticket = pager.begin_fetch().expect("first fetch granted");
    assert!(ticket.cursor().is_none());
    assert_eq!(pager.apply(ticket, Ok(page(&["r1", "r2"], Some("c1")))), ApplyOutcome::Applied);

    let ticket = pager.begin_fetch().expect("second fetch granted");
    assert_eq!(ticket.cursor().map(ToString::to_string), Some("c1".to_string()));
    assert_eq!(pager.apply(ticket, Ok(page(&["r3"], None))), ApplyOutcome::Applied);

    assert_eq!(names(&pager), vec!["r1", "r2", "r3"]);
    assert!(!pager.has_more());
    assert_eq!(pager.server_pages_fetched(), 2);
}

#[test]
fn fetch_refused_while_loading() {
    let mut pager = Pager::new(2);
    let _outstanding = pager.begin_fetch().expect("granted");
    assert!(pager.begin_fetch().is_none());
    assert!(pager.is_loading());
}

#[test]
fn fetch_refused_when_no_more_data() {
    let mut pager = Pager::new(2);
    let ticket = pager.begin_fetch().unwrap();
    pager.apply(ticket, Ok(page(&["r1"], None)));

    assert!(!pager.has_more());
    assert!(pager.begin_fetch().is_none());
    assert_eq!(names(&pager), vec!["r1"]);
}

#[test]
fn first_page_failure_clears_items() {
    let mut pager = Pager::new(2);
    let ticket = pager.begin_fetch().unwrap();
    assert_eq!(pager.apply(ticket, Err(permission_denied())), ApplyOutcome::Failed);

    assert!(pager.items().is_empty());
    assert!(!pager.is_loading());
    assert_eq!(
        pager.error().and_then(StoreError::code),
        Some(&StoreErrorCode::PermissionDenied)
    );
}

#[test]
fn later_page_failure_keeps_prior_pages() {
    let mut pager = Pager::new(2);
    let ticket = pager.begin_fetch().unwrap();
    pager.apply(ticket, Ok(page(&["r1", "r2"], Some("c1"))));

    let ticket = pager.begin_fetch().unwrap();
    let outcome = pager.apply(
        ticket,
        Err(StoreError::service(StoreErrorCode::Unavailable, "try later")),
    );

    assert_eq!(outcome, ApplyOutcome::Failed);
    assert_eq!(names(&pager), vec!["r1", "r2"]);
    assert!(pager.error().is_some());
}

#[test]
fn success_clears_previous_error() {
    let mut pager = Pager::new(2);
    let ticket = pager.begin_fetch().unwrap();
    pager.apply(ticket, Err(permission_denied()));

    let ticket = pager.begin_fetch().expect("retry granted after failure");
    pager.apply(ticket, Ok(page(&["r1"], None)));

    assert!(pager.error().is_none());
    assert_eq!(names(&pager), vec!["r1"]);
}

#[test]
fn stale_ticket_is_discarded_after_reset() {
    let mut pager = Pager::new(2);
    let stale = pager.begin_fetch().unwrap();

    pager.reset();
    let fresh = pager.begin_fetch().unwrap();

    // The slow old response lands after the reset; nothing may change.
    assert_eq!(pager.apply(stale, Ok(page(&["old1", "old2"], Some("old")))), ApplyOutcome::Stale);
    assert!(pager.items().is_empty());
    assert!(pager.is_loading());

    assert_eq!(pager.apply(fresh, Ok(page(&["new1"], None))), ApplyOutcome::Applied);
    assert_eq!(names(&pager), vec!["new1"]);
}

#[test]
fn reset_returns_to_initial_state() {
    let mut pager = Pager::new(2);
    let ticket = pager.begin_fetch().unwrap();
    pager.apply(ticket, Ok(page(&["r1", "r2"], Some("c1"))));

    pager.reset();

    assert!(pager.items().is_empty());
    assert_eq!(pager.server_pages_fetched(), 0);
    assert!(pager.has_more());
    assert!(!pager.is_loading());
    assert!(pager.error().is_none());

    // Reset is idempotent and the refetch reproduces page one.
    pager.reset();
    let ticket = pager.begin_fetch().unwrap();
    assert!(ticket.cursor().is_none());
    pager.apply(ticket, Ok(page(&["r1", "r2"], Some("c1"))));
    assert_eq!(names(&pager), vec!["r1", "r2"]);
}

#[test]
fn remove_item_keeps_relative_order() {
    let mut pager = Pager::new(3);
    let ticket = pager.begin_fetch().unwrap();
    pager.apply(ticket, Ok(page(&["41", "42", "43"], None)));

    let id = RecordId::new("42").unwrap();
    assert!(pager.remove_item(&id));
    assert_eq!(names(&pager), vec!["41", "43"]);

    // Removing again is a no-op.
    assert!(!pager.remove_item(&id));
}

#[test]
fn page_size_is_clamped_into_bounds() {
    assert_eq!(Pager::new(0).page_size(), 1);
    assert_eq!(Pager::new(500).page_size(), 100);
    assert_eq!(Pager::new(20).page_size(), 20);
}
