//! Snapshot sources — where the view's state documents come from.
//!
//! DESIGN
//! ======
//! The viewer only needs "give me the current state document". That is the
//! [`SnapshotSource`] trait; [`HttpSource`] pulls it from the estimation
//! backend's state endpoint and tests substitute in-memory sources. A source
//! either returns a fully decoded [`Snapshot`] or an error, never a partial
//! document.

use canvas::doc::{Snapshot, SnapshotError};

use crate::config::Timeouts;

/// Path of the backend's state document, relative to the base URL.
pub const STATE_PATH: &str = "/api/multilat/state";

/// Errors produced while fetching a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request did not complete (connect, timeout, body read).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body is not a snapshot document.
    #[error("snapshot decode failed: {0}")]
    Decode(#[from] SnapshotError),
}

/// Anything that can produce the current state document. Enables mocking in
/// tests.
#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch and decode the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the transport fails or the body does not
    /// decode.
    async fn fetch(&self) -> Result<Snapshot, SourceError>;
}

/// Pulls snapshots from `GET {base_url}/api/multilat/state`.
///
/// The backend accepts either a browser session or
/// `Authorization: Bearer <token>` on its API routes; a headless viewer only
/// has the token.
pub struct HttpSource {
    http: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl HttpSource {
    /// Build a source for `base_url` (no trailing slash), authenticating with
    /// `token` when one is given.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::HttpClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new(base_url: &str, timeouts: Timeouts, token: Option<String>) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(timeouts.request)
            .connect_timeout(timeouts.connect)
            .build()
            .map_err(|e| SourceError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url: format!("{base_url}{STATE_PATH}"), token })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

#[async_trait::async_trait]
impl SnapshotSource for HttpSource {
    async fn fetch(&self) -> Result<Snapshot, SourceError> {
        let mut request = self.http.get(&self.url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(SourceError::Status { status: status.as_u16(), body: text });
        }

        Ok(Snapshot::from_json(&text)?)
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
