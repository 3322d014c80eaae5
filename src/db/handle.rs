//! Store access boundary.
//!
//! A dedicated writer thread owns the one SQLite connection and serializes
//! every operation; callers hold a cloneable `StoreHandle` whose methods are
//! all async request/response calls over a channel. Callers never observe
//! interleaved partial writes, and the store engine never sees a second
//! writer.

use std::collections::BTreeSet;
use std::sync::OnceLock;
use std::thread;

use chrono::NaiveDate;
use tokio::sync::{mpsc, oneshot};

use crate::config::Settings;
use crate::db::stats::{self, DateCount};
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::{HuntSession, InsertOutcome, Qso};

/// Requests served by the writer thread, one variant per store operation.
enum StoreRequest {
    SessionByDate {
        date: NaiveDate,
        respond: oneshot::Sender<AppResult<Option<HuntSession>>>,
    },
    SessionById {
        id: String,
        respond: oneshot::Sender<AppResult<Option<HuntSession>>>,
    },
    CreateSession {
        session: HuntSession,
        respond: oneshot::Sender<AppResult<HuntSession>>,
    },
    InsertQso {
        qso: Qso,
        respond: oneshot::Sender<AppResult<InsertOutcome>>,
    },
    DeleteQso {
        id: String,
        respond: oneshot::Sender<AppResult<()>>,
    },
    QsosForSession {
        session_id: String,
        respond: oneshot::Sender<AppResult<Vec<Qso>>>,
    },
    QsosForCallsign {
        callsign: String,
        respond: oneshot::Sender<AppResult<Vec<Qso>>>,
    },
    QsosForPark {
        park: String,
        respond: oneshot::Sender<AppResult<Vec<Qso>>>,
    },
    UnsyncedQsos {
        respond: oneshot::Sender<AppResult<Vec<Qso>>>,
    },
    MarkSynced {
        id: String,
        respond: oneshot::Sender<AppResult<()>>,
    },
    AllQsos {
        respond: oneshot::Sender<AppResult<Vec<Qso>>>,
    },
    WorkedParks {
        respond: oneshot::Sender<AppResult<BTreeSet<String>>>,
    },
    QsoCountsByDate {
        respond: oneshot::Sender<AppResult<Vec<DateCount>>>,
    },
    NewParkCountsByDate {
        respond: oneshot::Sender<AppResult<Vec<DateCount>>>,
    },
    UpsertFromRemote {
        sessions: Vec<HuntSession>,
        qsos: Vec<Qso>,
        respond: oneshot::Sender<AppResult<()>>,
    },
}

/// Async handle to the single store instance. Cheap to clone; every clone
/// feeds the same writer thread.
#[derive(Clone)]
pub struct StoreHandle {
    tx: mpsc::UnboundedSender<StoreRequest>,
}

impl StoreHandle {
    /// Open (or create) the database at `path` and start the writer thread.
    /// Schema setup runs before the thread starts, so a broken database
    /// fails here and not on the first query.
    pub fn spawn(path: &str) -> AppResult<Self> {
        Self::start(Store::open(path)?)
    }

    /// In-memory store, used by tests and embedders that want no file.
    pub fn spawn_in_memory() -> AppResult<Self> {
        Self::start(Store::open_in_memory()?)
    }

    fn start(store: Store) -> AppResult<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        thread::Builder::new()
            .name("potalog-store".to_string())
            .spawn(move || writer_loop(store, rx))?;
        Ok(Self { tx })
    }

    fn send(&self, req: StoreRequest) -> AppResult<()> {
        self.tx
            .send(req)
            .map_err(|_| AppError::StoreClosed("writer thread is gone".to_string()))
    }

    async fn recv<T>(rx: oneshot::Receiver<AppResult<T>>) -> AppResult<T> {
        rx.await
            .map_err(|_| AppError::StoreClosed("response channel closed".to_string()))?
    }

    pub async fn session_by_date(&self, date: NaiveDate) -> AppResult<Option<HuntSession>> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreRequest::SessionByDate { date, respond: tx })?;
        Self::recv(rx).await
    }

    pub async fn session_by_id(&self, id: &str) -> AppResult<Option<HuntSession>> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreRequest::SessionById {
            id: id.to_string(),
            respond: tx,
        })?;
        Self::recv(rx).await
    }

    pub async fn create_session(&self, session: HuntSession) -> AppResult<HuntSession> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreRequest::CreateSession {
            session,
            respond: tx,
        })?;
        Self::recv(rx).await
    }

    pub async fn insert_qso(&self, qso: Qso) -> AppResult<InsertOutcome> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreRequest::InsertQso { qso, respond: tx })?;
        Self::recv(rx).await
    }

    pub async fn delete_qso(&self, id: &str) -> AppResult<()> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreRequest::DeleteQso {
            id: id.to_string(),
            respond: tx,
        })?;
        Self::recv(rx).await
    }

    pub async fn qsos_for_session(&self, session_id: &str) -> AppResult<Vec<Qso>> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreRequest::QsosForSession {
            session_id: session_id.to_string(),
            respond: tx,
        })?;
        Self::recv(rx).await
    }

    pub async fn qsos_for_callsign(&self, callsign: &str) -> AppResult<Vec<Qso>> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreRequest::QsosForCallsign {
            callsign: callsign.to_string(),
            respond: tx,
        })?;
        Self::recv(rx).await
    }

    pub async fn qsos_for_park(&self, park: &str) -> AppResult<Vec<Qso>> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreRequest::QsosForPark {
            park: park.to_string(),
            respond: tx,
        })?;
        Self::recv(rx).await
    }

    pub async fn unsynced_qsos(&self) -> AppResult<Vec<Qso>> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreRequest::UnsyncedQsos { respond: tx })?;
        Self::recv(rx).await
    }

    pub async fn mark_synced(&self, id: &str) -> AppResult<()> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreRequest::MarkSynced {
            id: id.to_string(),
            respond: tx,
        })?;
        Self::recv(rx).await
    }

    pub async fn all_qsos(&self) -> AppResult<Vec<Qso>> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreRequest::AllQsos { respond: tx })?;
        Self::recv(rx).await
    }

    pub async fn worked_parks(&self) -> AppResult<BTreeSet<String>> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreRequest::WorkedParks { respond: tx })?;
        Self::recv(rx).await
    }

    pub async fn qso_counts_by_date(&self) -> AppResult<Vec<DateCount>> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreRequest::QsoCountsByDate { respond: tx })?;
        Self::recv(rx).await
    }

    pub async fn new_park_counts_by_date(&self) -> AppResult<Vec<DateCount>> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreRequest::NewParkCountsByDate { respond: tx })?;
        Self::recv(rx).await
    }

    pub async fn upsert_from_remote(
        &self,
        sessions: Vec<HuntSession>,
        qsos: Vec<Qso>,
    ) -> AppResult<()> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreRequest::UpsertFromRemote {
            sessions,
            qsos,
            respond: tx,
        })?;
        Self::recv(rx).await
    }
}

fn writer_loop(mut store: Store, mut rx: mpsc::UnboundedReceiver<StoreRequest>) {
    while let Some(req) = rx.blocking_recv() {
        match req {
            StoreRequest::SessionByDate { date, respond } => {
                let _ = respond.send(store.session_by_date(date));
            }
            StoreRequest::SessionById { id, respond } => {
                let _ = respond.send(store.session_by_id(&id));
            }
            StoreRequest::CreateSession { session, respond } => {
                let _ = respond.send(store.create_session(&session));
            }
            StoreRequest::InsertQso { qso, respond } => {
                let _ = respond.send(store.insert_qso(&qso));
            }
            StoreRequest::DeleteQso { id, respond } => {
                let _ = respond.send(store.delete_qso(&id));
            }
            StoreRequest::QsosForSession {
                session_id,
                respond,
            } => {
                let _ = respond.send(store.qsos_for_session(&session_id));
            }
            StoreRequest::QsosForCallsign { callsign, respond } => {
                let _ = respond.send(store.qsos_for_callsign(&callsign));
            }
            StoreRequest::QsosForPark { park, respond } => {
                let _ = respond.send(store.qsos_for_park(&park));
            }
            StoreRequest::UnsyncedQsos { respond } => {
                let _ = respond.send(store.unsynced_qsos());
            }
            StoreRequest::MarkSynced { id, respond } => {
                let _ = respond.send(store.mark_synced(&id));
            }
            StoreRequest::AllQsos { respond } => {
                let _ = respond.send(store.all_qsos());
            }
            StoreRequest::WorkedParks { respond } => {
                let _ = respond.send(store.worked_parks());
            }
            StoreRequest::QsoCountsByDate { respond } => {
                let _ = respond.send(stats::qso_counts_by_date(&store));
            }
            StoreRequest::NewParkCountsByDate { respond } => {
                let _ = respond.send(stats::new_park_counts_by_date(&store));
            }
            StoreRequest::UpsertFromRemote {
                sessions,
                qsos,
                respond,
            } => {
                let _ = respond.send(store.upsert_from_remote(&sessions, &qsos));
            }
        }
    }
}

static SHARED: OnceLock<Result<StoreHandle, String>> = OnceLock::new();

/// Process-wide store handle, lazily created from the settings' database
/// path. The first caller runs setup; concurrent first callers block on the
/// same in-flight initialization instead of racing to open two stores. A
/// setup failure is memoized, so every pending and future caller observes
/// the failure rather than a half-initialized store.
pub fn shared(settings: &Settings) -> AppResult<StoreHandle> {
    SHARED
        .get_or_init(|| StoreHandle::spawn(&settings.database).map_err(|e| e.to_string()))
        .clone()
        .map_err(AppError::Init)
}
