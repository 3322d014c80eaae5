mod common;

use common::{draft, mem_store};
use potalog::core::logbook::log_qso;
use potalog::core::session::today_session;
use potalog::models::InsertOutcome;

#[tokio::test]
async fn test_today_session_is_created_lazily_then_reused() {
    let store = mem_store();

    let first = today_session(&store).await.unwrap();
    let second = today_session(&store).await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(first.session_date, second.session_date);
}

#[tokio::test]
async fn test_log_qso_normalizes_and_stores() {
    let store = mem_store();
    let session = today_session(&store).await.unwrap();

    let outcome = log_qso(
        &store,
        None,
        &session,
        draft("w1aw ", Some(" k-0001"), 14.225),
    )
    .await
    .unwrap();
    assert!(matches!(outcome, InsertOutcome::Inserted { .. }));

    let logged = store.qsos_for_session(&session.id).await.unwrap();
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].callsign, "W1AW");
    assert_eq!(logged[0].park_reference.as_deref(), Some("K-0001"));
    assert_eq!(logged[0].band, "20m");
    // without a remote the row waits in the push queue
    assert!(!logged[0].synced);
}

#[tokio::test]
async fn test_log_qso_reports_duplicate_distinctly() {
    let store = mem_store();
    let session = today_session(&store).await.unwrap();

    let first = log_qso(&store, None, &session, draft("W1AW", Some("K-0001"), 14.225))
        .await
        .unwrap();
    assert!(!first.is_duplicate());

    let second = log_qso(&store, None, &session, draft("W1AW", Some("K-0001"), 14.225))
        .await
        .unwrap();
    assert_eq!(second, InsertOutcome::Duplicate);
    assert_eq!(store.qsos_for_session(&session.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_blank_park_reference_is_stored_as_null() {
    let store = mem_store();
    let session = today_session(&store).await.unwrap();

    log_qso(&store, None, &session, draft("W1AW", Some("   "), 14.225))
        .await
        .unwrap();

    let logged = store.qsos_for_session(&session.id).await.unwrap();
    assert_eq!(logged[0].park_reference, None);
    // and a park-less contact never feeds the worked-park set
    assert!(store.worked_parks().await.unwrap().is_empty());
}
