//! Reconciliation between the local store and the remote mirror.
//!
//! The per-row sync flag is monotonic: a row moves Unsynced → Synced on
//! remote acknowledgement and never back. Remote failures are never fatal
//! here: the failed unit of work is logged and skipped, and an unsynced row
//! is simply retried on the next cycle. Local store failures keep their
//! usual fatal semantics.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::db::StoreHandle;
use crate::errors::AppResult;
use crate::models::{HuntSession, Qso};
use crate::sync::remote::RemoteStore;

/// Push every locally unsynced QSO, oldest first.
///
/// Each distinct owning session is upserted before any of its rows so the
/// remote foreign key holds; a failed session upsert is swallowed and does
/// not block the rows. Rows fail independently: one rejected row does not
/// abort the rest. Returns the number of rows the remote acknowledged.
pub async fn push_unsynced(store: &StoreHandle, remote: &RemoteStore) -> AppResult<usize> {
    let unsynced = store.unsynced_qsos().await?;
    if unsynced.is_empty() {
        return Ok(0);
    }

    let mut session_ids: Vec<String> = Vec::new();
    for qso in &unsynced {
        if !session_ids.contains(&qso.hunt_session_id) {
            session_ids.push(qso.hunt_session_id.clone());
        }
    }
    for session_id in &session_ids {
        match store.session_by_id(session_id).await {
            Ok(Some(session)) => {
                if let Err(e) = remote.upsert_session(&session).await {
                    warn!("push of session {session_id} failed: {e}");
                }
            }
            Ok(None) => {}
            Err(e) => warn!("lookup of session {session_id} failed: {e}"),
        }
    }

    let mut pushed = 0usize;
    for qso in &unsynced {
        match remote.upsert_qso(qso).await {
            Ok(()) => {
                store.mark_synced(&qso.id).await?;
                pushed += 1;
            }
            Err(e) => {
                // Row stays unsynced, retried on the next cycle.
                warn!("push of qso {} failed: {e}", qso.id);
            }
        }
    }
    debug!("pushed {pushed} of {} unsynced QSOs", unsynced.len());
    Ok(pushed)
}

/// Immediate push of a freshly logged QSO, so new contacts reach the remote
/// without waiting for the next bulk cycle. Fire-and-forget: every failure
/// is logged and swallowed, the row just stays unsynced.
pub async fn sync_new_qso(
    store: &StoreHandle,
    remote: &RemoteStore,
    qso: &Qso,
    session: &HuntSession,
) {
    // A failed session upsert must not prevent the record upsert.
    if let Err(e) = remote.upsert_session(session).await {
        warn!("push of session {} failed: {e}", session.id);
    }
    match remote.upsert_qso(qso).await {
        Ok(()) => {
            if let Err(e) = store.mark_synced(&qso.id).await {
                warn!("marking qso {} synced failed: {e}", qso.id);
            }
        }
        Err(e) => warn!("push of qso {} failed: {e}", qso.id),
    }
}

/// Pull the complete remote history and merge it by id.
///
/// Re-pulling identical remote state is a no-op: the merge skips ids the
/// store already has. A remote failure leaves the local log untouched and is
/// swallowed; the local merge itself is atomic and its failure propagates.
pub async fn pull_all(store: &StoreHandle, remote: &RemoteStore) -> AppResult<()> {
    let sessions = match remote.fetch_sessions().await {
        Ok(s) => s,
        Err(e) => {
            warn!("session pull failed: {e}");
            return Ok(());
        }
    };
    let qsos = match remote.fetch_qsos().await {
        Ok(q) => q,
        Err(e) => {
            warn!("qso pull failed: {e}");
            return Ok(());
        }
    };

    let qsos: Vec<Qso> = qsos.into_iter().map(Qso::from).collect();
    store.upsert_from_remote(sessions, qsos).await
}

/// The set of all parks the operator has ever worked.
///
/// Prefers the remote read-model; with no remote configured, or an
/// unreachable one, falls back to the local distinct-parks view so existing
/// history never reads as an empty set.
pub async fn worked_parks(
    store: &StoreHandle,
    remote: Option<&RemoteStore>,
) -> AppResult<BTreeSet<String>> {
    if let Some(remote) = remote {
        match remote.fetch_worked_parks().await {
            Ok(parks) => return Ok(parks),
            Err(e) => warn!("worked-parks fetch failed, using local view: {e}"),
        }
    }
    store.worked_parks().await
}
