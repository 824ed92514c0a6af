//! API client and session state for standup.
//!
//! [`ApiClient`] is a thin reqwest wrapper over the HTTP resource API.
//! [`Session`] owns the in-memory entry list a front end renders from,
//! with explicit loading/failed/ready states.

use serde::Deserialize;
use tracing::debug;

use crate::entry::{EntryPayload, StandupEntry};
use crate::error::{Error, Result};

/// Error body returned by the API on failure.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// HTTP client for the standup API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client against the given base URL (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Get the base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all entries, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API responds with a
    /// non-success status.
    pub async fn list(&self) -> Result<Vec<StandupEntry>> {
        let response = self
            .http
            .get(format!("{}/standups", self.base_url))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Create a new entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the
    /// payload.
    pub async fn create(&self, payload: &EntryPayload) -> Result<StandupEntry> {
        let response = self
            .http
            .post(format!("{}/standups", self.base_url))
            .json(payload)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Fetch a single entry by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the entry does not exist.
    pub async fn get(&self, id: &str) -> Result<StandupEntry> {
        let response = self
            .http
            .get(format!("{}/standups/{id}", self.base_url))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Replace an entry's user fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the payload is rejected, or
    /// the entry does not exist.
    pub async fn update(&self, id: &str, payload: &EntryPayload) -> Result<StandupEntry> {
        let response = self
            .http
            .put(format!("{}/standups/{id}", self.base_url))
            .json(payload)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Delete a single entry by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the entry does not exist.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let response = self
            .http
            .delete(format!("{}/standups/{id}", self.base_url))
            .send()
            .await?;
        Self::check(response).await
    }

    /// Delete all entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn clear_all(&self) -> Result<()> {
        let response = self
            .http
            .delete(format!("{}/standups/clear", self.base_url))
            .send()
            .await?;
        Self::check(response).await
    }

    /// Decode a JSON response body, converting non-success statuses into
    /// [`Error::Api`].
    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::status_error(status, response).await)
        }
    }

    /// Check a response for success, discarding the body.
    async fn check(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::status_error(status, response).await)
        }
    }

    /// Build an [`Error::Api`] from a failed response, using the `{error}`
    /// body when it parses.
    async fn status_error(status: reqwest::StatusCode, response: reqwest::Response) -> Error {
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        Error::api(status.as_u16(), message)
    }
}

/// Load state of a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// The initial fetch has not completed yet.
    #[default]
    Loading,
    /// The last operation failed; the message is user-facing.
    Failed(String),
    /// The list reflects the last successful fetch plus local actions.
    Ready,
}

/// An explicitly-owned client session.
///
/// Holds the single in-memory entry list between user actions. The list
/// is populated by [`load`](Session::load) and then mutated in place by
/// [`submit`](Session::submit) and [`clear_all`](Session::clear_all)
/// without re-fetching; staleness against the server persists until the
/// next load.
#[derive(Debug)]
pub struct Session {
    client: ApiClient,
    entries: Vec<StandupEntry>,
    state: LoadState,
}

impl Session {
    /// Create a session over the given client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            entries: Vec::new(),
            state: LoadState::Loading,
        }
    }

    /// The current load state.
    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The in-memory entry list.
    #[must_use]
    pub fn entries(&self) -> &[StandupEntry] {
        &self.entries
    }

    /// Fetch the full list from the API.
    ///
    /// On success the list is replaced and the session is ready; on
    /// failure the session records the error and the list is left as-is.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        match self.client.list().await {
            Ok(entries) => {
                debug!("Loaded {} entries", entries.len());
                self.entries = entries;
                self.state = LoadState::Ready;
            }
            Err(err) => self.state = LoadState::Failed(err.to_string()),
        }
    }

    /// Submit a new entry.
    ///
    /// On success the created record is prepended to the local list (the
    /// store lists newest first, so this keeps local ordering without a
    /// re-fetch). On failure the list is untouched and the error is
    /// surfaced through the state.
    ///
    /// # Errors
    ///
    /// Returns the created entry, or the error that was also recorded in
    /// the session state.
    pub async fn submit(&mut self, payload: &EntryPayload) -> Result<StandupEntry> {
        match self.client.create(payload).await {
            Ok(entry) => {
                self.entries.insert(0, entry.clone());
                self.state = LoadState::Ready;
                Ok(entry)
            }
            Err(err) => {
                self.state = LoadState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Clear all entries.
    ///
    /// On success the local list is emptied; on failure it is unchanged
    /// and the error is surfaced through the state.
    ///
    /// # Errors
    ///
    /// Returns the error that was also recorded in the session state.
    pub async fn clear_all(&mut self) -> Result<()> {
        match self.client.clear_all().await {
            Ok(()) => {
                self.entries.clear();
                self.state = LoadState::Ready;
                Ok(())
            }
            Err(err) => {
                self.state = LoadState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Retry after a failure by re-running the initial fetch.
    pub async fn retry(&mut self) {
        self.load().await;
    }
}
