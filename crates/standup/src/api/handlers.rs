//! Request handlers for the standup API.
//!
//! Handlers translate HTTP verbs and paths into store calls. Input
//! validation and status-code mapping happen here, not in the store.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::entry::{EntryPayload, StandupEntry};
use crate::error::Error;

use super::AppState;

/// JSON body for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

/// JSON body for confirmation responses.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    /// Human-readable confirmation message.
    pub message: String,
}

/// Error wrapper that maps store/validation errors to HTTP responses.
///
/// Validation failures map to 400 and unknown ids to 404, with the error
/// message in the body. Anything else is a 500; the underlying error is
/// logged and a generic message returned, so internal detail never leaks
/// to the caller.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = if self.0.is_validation() {
            (StatusCode::BAD_REQUEST, self.0.to_string())
        } else if self.0.is_not_found() {
            (StatusCode::NOT_FOUND, "Standup not found".to_string())
        } else {
            error!("request failed: {}", self.0);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Validate a submitted payload.
///
/// Required fields must be non-empty after trimming; `blockers` is
/// trimmed and coerced to `None` when empty, so it is stored as null
/// rather than an empty string.
fn validate(payload: EntryPayload) -> Result<EntryPayload, Error> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(Error::missing_field("name"));
    }
    let date = payload.date.trim();
    if date.is_empty() {
        return Err(Error::missing_field("date"));
    }
    let yesterday = payload.yesterday.trim();
    if yesterday.is_empty() {
        return Err(Error::missing_field("yesterday"));
    }
    let today = payload.today.trim();
    if today.is_empty() {
        return Err(Error::missing_field("today"));
    }

    let blockers = payload.blockers.as_deref().map(str::trim).and_then(|b| {
        if b.is_empty() {
            None
        } else {
            Some(b.to_string())
        }
    });

    Ok(EntryPayload::new(name, date, yesterday, today, blockers))
}

/// `GET /standups` — list all entries, most recent first.
pub async fn list_standups(
    State(state): State<AppState>,
) -> Result<Json<Vec<StandupEntry>>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(store.list()?))
}

/// `POST /standups` — create a new entry.
pub async fn create_standup(
    State(state): State<AppState>,
    Json(payload): Json<EntryPayload>,
) -> Result<(StatusCode, Json<StandupEntry>), ApiError> {
    let payload = validate(payload)?;
    let store = state.store.lock().await;
    let entry = store.create(&payload)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// `GET /standups/:id` — fetch one entry.
pub async fn get_standup(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StandupEntry>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(store.get(&id)?))
}

/// `PUT /standups/:id` — replace an entry's user fields.
pub async fn update_standup(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<EntryPayload>,
) -> Result<Json<StandupEntry>, ApiError> {
    let payload = validate(payload)?;
    let store = state.store.lock().await;
    Ok(Json(store.update(&id, &payload)?))
}

/// `DELETE /standups/:id` — delete one entry.
pub async fn delete_standup(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    let store = state.store.lock().await;
    store.delete(&id)?;
    Ok(Json(MessageBody {
        message: "Standup deleted successfully".to_string(),
    }))
}

/// `DELETE /standups/clear` — remove all entries.
pub async fn clear_standups(State(state): State<AppState>) -> Result<Json<MessageBody>, ApiError> {
    let store = state.store.lock().await;
    store.clear()?;
    Ok(Json(MessageBody {
        message: "All standups cleared successfully".to_string(),
    }))
}
