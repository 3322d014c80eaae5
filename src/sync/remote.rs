//! HTTP client for the remote mirror.
//!
//! The remote is a hosted Postgres exposing the same two tables through a
//! PostgREST-style interface. Upserts are addressed by primary-key conflict
//! target, and one RPC returns the credentialed operator's distinct worked
//! parks.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::errors::{AppError, AppResult};
use crate::models::{HuntSession, Qso};

/// Page size of the full-history pull; the loop stops at the first short
/// page.
pub const PAGE_SIZE: usize = 1000;

#[derive(Clone)]
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Wire form of a QSO row. The remote mirror carries no sync flag, that is
/// purely local state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteQso {
    pub id: String,
    pub hunt_session_id: String,
    pub park_reference: Option<String>,
    pub callsign: String,
    pub frequency: f64,
    pub band: String,
    pub mode: String,
    pub rst_sent: String,
    pub rst_received: String,
    pub timestamp: String,
    pub created_at: String,
}

impl From<&Qso> for RemoteQso {
    fn from(q: &Qso) -> Self {
        Self {
            id: q.id.clone(),
            hunt_session_id: q.hunt_session_id.clone(),
            park_reference: q.park_reference.clone(),
            callsign: q.callsign.clone(),
            frequency: q.frequency,
            band: q.band.clone(),
            mode: q.mode.clone(),
            rst_sent: q.rst_sent.clone(),
            rst_received: q.rst_received.clone(),
            timestamp: q.timestamp.clone(),
            created_at: q.created_at.clone(),
        }
    }
}

impl From<RemoteQso> for Qso {
    fn from(r: RemoteQso) -> Self {
        Self {
            id: r.id,
            hunt_session_id: r.hunt_session_id,
            park_reference: r.park_reference,
            callsign: r.callsign,
            frequency: r.frequency,
            band: r.band,
            mode: r.mode,
            rst_sent: r.rst_sent,
            rst_received: r.rst_received,
            timestamp: r.timestamp,
            created_at: r.created_at,
            synced: true, // originated remotely
        }
    }
}

impl RemoteStore {
    /// Build a client when both credentials are present. `None` keeps the
    /// whole sync layer inert, which is how the log runs local-only.
    pub fn new(url: &str, key: &str) -> Option<Self> {
        if url.is_empty() || key.is_empty() {
            return None;
        }
        Some(Self {
            client: reqwest::Client::new(),
            base_url: url.trim_end_matches('/').to_string(),
            api_key: key.to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Option<Self> {
        Self::new(&settings.remote_url, &settings.remote_key)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, rb: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        rb.header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Upsert one session by id.
    pub async fn upsert_session(&self, session: &HuntSession) -> AppResult<()> {
        let resp = self
            .authed(
                self.client
                    .post(format!("{}?on_conflict=id", self.table_url("hunt_sessions"))),
            )
            .header("Prefer", "resolution=merge-duplicates")
            .json(&[session])
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    /// Upsert one QSO by id.
    pub async fn upsert_qso(&self, qso: &Qso) -> AppResult<()> {
        let resp = self
            .authed(
                self.client
                    .post(format!("{}?on_conflict=id", self.table_url("qsos"))),
            )
            .header("Prefer", "resolution=merge-duplicates")
            .json(&[RemoteQso::from(qso)])
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    /// The complete remote session set.
    pub async fn fetch_sessions(&self) -> AppResult<Vec<HuntSession>> {
        let resp = self
            .authed(
                self.client
                    .get(format!("{}?select=*", self.table_url("hunt_sessions"))),
            )
            .send()
            .await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// The complete remote QSO set, fetched in fixed-size pages until a
    /// short page signals end-of-data.
    pub async fn fetch_qsos(&self) -> AppResult<Vec<RemoteQso>> {
        let mut all = Vec::new();
        let mut from = 0usize;
        loop {
            let resp = self
                .authed(
                    self.client
                        .get(format!("{}?select=*", self.table_url("qsos"))),
                )
                .header("Range-Unit", "items")
                .header("Range", format!("{}-{}", from, from + PAGE_SIZE - 1))
                .send()
                .await?;
            let resp = check_status(resp).await?;
            let page: Vec<RemoteQso> = resp.json().await?;
            let short = page.len() < PAGE_SIZE;
            all.extend(page);
            if short {
                break;
            }
            from += PAGE_SIZE;
        }
        Ok(all)
    }

    /// Distinct worked parks for the current operator, via the remote
    /// read-model RPC.
    pub async fn fetch_worked_parks(&self) -> AppResult<BTreeSet<String>> {
        let resp = self
            .authed(
                self.client
                    .post(format!("{}/rest/v1/rpc/get_worked_parks", self.base_url)),
            )
            .header("Content-Type", "application/json")
            .body("{}")
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let parks: Option<Vec<Option<String>>> = resp.json().await?;
        Ok(parks
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect())
    }
}

async fn check_status(resp: reqwest::Response) -> AppResult<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(AppError::Remote(format!("HTTP {status}: {body}")))
}
