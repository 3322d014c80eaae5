//! High-level logging operations, wiring the store to the sync triggers.

use std::collections::BTreeSet;

use tracing::warn;

use crate::db::StoreHandle;
use crate::errors::AppResult;
use crate::models::{HuntSession, InsertOutcome, Qso, QsoDraft};
use crate::sync::{RemoteStore, reconciler};

/// Log a new QSO into a session.
///
/// The draft is normalized (uppercased identifiers, derived band) before the
/// insert; a duplicate rejection comes back as `InsertOutcome::Duplicate`
/// with the store untouched. On acceptance the record is pushed to the
/// remote immediately, fire-and-forget, so a slow or unreachable remote
/// never blocks the logging path.
pub async fn log_qso(
    store: &StoreHandle,
    remote: Option<&RemoteStore>,
    session: &HuntSession,
    draft: QsoDraft,
) -> AppResult<InsertOutcome> {
    let qso = Qso::new(&session.id, draft);
    let outcome = store.insert_qso(qso.clone()).await?;

    if let (InsertOutcome::Inserted { .. }, Some(remote)) = (&outcome, remote) {
        let store = store.clone();
        let remote = remote.clone();
        let session = session.clone();
        tokio::spawn(async move {
            reconciler::sync_new_qso(&store, &remote, &qso, &session).await;
        });
    }

    Ok(outcome)
}

/// App-start trigger, run once the remote credentials are known: push
/// unsynced rows, pull the remote history, then refresh the worked-park
/// set. Each phase's failure is logged and does not abort the next; with no
/// remote configured only the local worked-park view runs.
pub async fn startup_sync(
    store: &StoreHandle,
    remote: Option<&RemoteStore>,
) -> AppResult<BTreeSet<String>> {
    if let Some(remote) = remote {
        if let Err(e) = reconciler::push_unsynced(store, remote).await {
            warn!("startup push failed: {e}");
        }
        if let Err(e) = reconciler::pull_all(store, remote).await {
            warn!("startup pull failed: {e}");
        }
    }
    reconciler::worked_parks(store, remote).await
}
