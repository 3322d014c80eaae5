mod common;

use common::{date, qso, session};
use potalog::db::stats::{DateCount, new_park_counts_by_date, qso_counts_by_date};
use potalog::db::store::Store;
use potalog::models::HuntSession;

fn store_with_sessions(dates: &[&str]) -> (Store, Vec<HuntSession>) {
    let store = Store::open_in_memory().expect("open store");
    let sessions = dates
        .iter()
        .map(|d| store.create_session(&session(d)).expect("create session"))
        .collect();
    (store, sessions)
}

fn row(d: &str, count: i64) -> DateCount {
    DateCount {
        date: date(d),
        count,
    }
}

#[test]
fn test_new_park_counts_empty_store() {
    let store = Store::open_in_memory().expect("open store");
    assert_eq!(new_park_counts_by_date(&store).unwrap(), Vec::<DateCount>::new());
}

#[test]
fn test_new_park_counts_single_park_once() {
    let (store, sessions) = store_with_sessions(&["2024-01-01"]);
    store
        .insert_qso(&qso(&sessions[0].id, "W1AW", Some("K-0001"), 14.225))
        .unwrap();

    assert_eq!(
        new_park_counts_by_date(&store).unwrap(),
        vec![row("2024-01-01", 1)]
    );
}

#[test]
fn test_new_park_counts_same_park_two_dates_keeps_earlier() {
    let (store, sessions) = store_with_sessions(&["2024-01-01", "2024-01-02"]);
    // same park, different callsigns so the duplicate key does not trip
    store
        .insert_qso(&qso(&sessions[0].id, "W1AW", Some("K-0001"), 14.225))
        .unwrap();
    store
        .insert_qso(&qso(&sessions[1].id, "K2ABC", Some("K-0001"), 14.225))
        .unwrap();

    assert_eq!(
        new_park_counts_by_date(&store).unwrap(),
        vec![row("2024-01-01", 1)]
    );
}

#[test]
fn test_new_park_counts_two_parks_same_date() {
    let (store, sessions) = store_with_sessions(&["2024-01-01"]);
    store
        .insert_qso(&qso(&sessions[0].id, "W1AW", Some("K-0001"), 14.225))
        .unwrap();
    store
        .insert_qso(&qso(&sessions[0].id, "W2XYZ", Some("K-0002"), 14.225))
        .unwrap();

    assert_eq!(
        new_park_counts_by_date(&store).unwrap(),
        vec![row("2024-01-01", 2)]
    );
}

#[test]
fn test_new_park_counts_spread_across_dates() {
    let (store, sessions) = store_with_sessions(&["2024-01-01", "2024-01-03"]);
    store
        .insert_qso(&qso(&sessions[0].id, "W1AW", Some("K-0001"), 14.225))
        .unwrap();
    store
        .insert_qso(&qso(&sessions[0].id, "W2XYZ", Some("K-0002"), 14.225))
        .unwrap();
    store
        .insert_qso(&qso(&sessions[1].id, "W1AW", Some("K-0003"), 14.225))
        .unwrap();

    assert_eq!(
        new_park_counts_by_date(&store).unwrap(),
        vec![row("2024-01-01", 2), row("2024-01-03", 1)]
    );
}

#[test]
fn test_new_park_counts_null_park_excluded() {
    let (store, sessions) = store_with_sessions(&["2024-01-01"]);
    store
        .insert_qso(&qso(&sessions[0].id, "W1AW", None, 14.225))
        .unwrap();

    assert_eq!(new_park_counts_by_date(&store).unwrap(), Vec::<DateCount>::new());
}

#[test]
fn test_new_park_counts_ascending_by_date() {
    let (store, sessions) =
        store_with_sessions(&["2024-03-01", "2024-01-01", "2024-02-01"]);
    store
        .insert_qso(&qso(&sessions[0].id, "W1AW", Some("K-0003"), 14.225))
        .unwrap();
    store
        .insert_qso(&qso(&sessions[1].id, "W1AW", Some("K-0001"), 14.225))
        .unwrap();
    store
        .insert_qso(&qso(&sessions[2].id, "W1AW", Some("K-0002"), 14.225))
        .unwrap();

    let dates: Vec<_> = new_park_counts_by_date(&store)
        .unwrap()
        .into_iter()
        .map(|r| r.date)
        .collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
}

#[test]
fn test_new_park_counts_min_date_wins_across_many_sessions() {
    // K-0001 worked on 01-05, 01-01 and 01-10: only the earliest date
    // counts, via the MIN aggregation
    let (store, sessions) =
        store_with_sessions(&["2024-01-05", "2024-01-01", "2024-01-10"]);
    store
        .insert_qso(&qso(&sessions[0].id, "AA1A", Some("K-0001"), 14.225))
        .unwrap();
    store
        .insert_qso(&qso(&sessions[1].id, "BB2B", Some("K-0001"), 14.225))
        .unwrap();
    store
        .insert_qso(&qso(&sessions[2].id, "CC3C", Some("K-0001"), 14.225))
        .unwrap();

    assert_eq!(
        new_park_counts_by_date(&store).unwrap(),
        vec![row("2024-01-01", 1)]
    );
}

#[test]
fn test_qso_counts_zero_qso_session_yields_count_zero() {
    let (store, _) = store_with_sessions(&["2024-01-01"]);
    assert_eq!(
        qso_counts_by_date(&store).unwrap(),
        vec![row("2024-01-01", 0)]
    );
}

#[test]
fn test_qso_counts_per_session() {
    let (store, sessions) = store_with_sessions(&["2024-01-01", "2024-01-02"]);
    store
        .insert_qso(&qso(&sessions[0].id, "W1AW", Some("K-0001"), 14.225))
        .unwrap();
    store
        .insert_qso(&qso(&sessions[0].id, "W2XYZ", Some("K-0002"), 14.225))
        .unwrap();
    store
        .insert_qso(&qso(&sessions[0].id, "W3ABC", Some("K-0003"), 14.225))
        .unwrap();

    assert_eq!(
        qso_counts_by_date(&store).unwrap(),
        vec![row("2024-01-01", 3), row("2024-01-02", 0)]
    );
}
