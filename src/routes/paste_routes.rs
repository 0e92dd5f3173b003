//! Storing and fetching the per-user paste record.

use axum::body::Bytes;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tracing::{debug, info};

use super::record_outcome;
use crate::models::{CopyRequest, Message};
use crate::session::Session;
use crate::state::AppState;
use crate::utils::http_helpers::{bearer_token, AppError};

/// Registers the paste record routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/copy", post(post_copy))
        .route("/copyForm", post(copy_form))
        .route("/paste", get(paste))
}

#[derive(Deserialize)]
struct CopyForm {
    #[serde(default)]
    pasta: String,
}

/// Stores a record sent as JSON. The identifier comes from the body.
async fn post_copy(State(app): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let result = store_json_copy(&app, &body).await;
    record_outcome(&app.metrics, "copy", &result);
    result
}

async fn store_json_copy(app: &AppState, body: &[u8]) -> Result<Response, AppError> {
    let request: CopyRequest = serde_json::from_slice(body)
        .map_err(|e| AppError::MalformedInput(format!("Decoding paste record: {}", e)))?;
    let message = request.into_message().map_err(AppError::MalformedInput)?;

    save(app, &message).await?;
    Ok(([(CONTENT_TYPE, "application/json")], r#"{"success": true}"#).into_response())
}

/// Stores a record from the sign-in page form, keyed by the session's identity.
async fn copy_form(
    State(app): State<AppState>,
    session: Session,
    form: Result<Form<CopyForm>, FormRejection>,
) -> Result<Response, AppError> {
    let result = store_form_copy(&app, &session, form).await;
    record_outcome(&app.metrics, "copy_form", &result);
    result
}

async fn store_form_copy(
    app: &AppState,
    session: &Session,
    form: Result<Form<CopyForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form?;
    let identifier = session
        .gplus_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::MalformedInput("Current user not connected".to_string()))?;

    save(app, &Message::new(identifier, form.pasta)).await?;
    Ok("Check your phone!".into_response())
}

/// Returns the caller's record. The caller is identified by validating the bearer token.
async fn paste(State(app): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let result = fetch_paste(&app, &headers).await;
    record_outcome(&app.metrics, "paste", &result);
    result
}

async fn fetch_paste(app: &AppState, headers: &HeaderMap) -> Result<Response, AppError> {
    let token = bearer_token(headers)?;
    let user_id = app.identity.validate_token(&token).await?;

    let message = app
        .store
        .get_message(&user_id)
        .await
        .map_err(AppError::Storage)?
        .ok_or_else(|| AppError::Storage(format!("no paste record for '{}'", user_id)))?;

    let body = serde_json::to_string(&message)
        .map_err(|e| AppError::Internal(format!("Encoding paste record: {}", e)))?;

    debug!("Serving paste record for '{}'", user_id);
    Ok(([(CONTENT_TYPE, "text/json; charset=utf-8")], body).into_response())
}

async fn save(app: &AppState, message: &Message) -> Result<(), AppError> {
    app.store
        .put_message(message)
        .await
        .map_err(AppError::Storage)?;
    info!(identifier = %message.identifier, "Stored paste record");
    Ok(())
}
