//! Session lifecycle: one session per UTC day, created lazily on first
//! access and never mutated afterwards.

use crate::db::StoreHandle;
use crate::errors::AppResult;
use crate::models::HuntSession;
use crate::utils::date::today_utc;

/// Get or create the session for today's UTC date. Creation is
/// insert-or-ignore keyed on the date, so concurrent first calls still end
/// up sharing a single row.
pub async fn today_session(store: &StoreHandle) -> AppResult<HuntSession> {
    let today = today_utc();
    if let Some(session) = store.session_by_date(today).await? {
        return Ok(session);
    }
    store.create_session(HuntSession::new(today)).await
}
