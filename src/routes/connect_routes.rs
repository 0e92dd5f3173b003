//! Connecting and disconnecting the federated identity.

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use tracing::info;

use super::record_outcome;
use crate::identity::decode_id_token;
use crate::session::Session;
use crate::state::AppState;
use crate::utils::http_helpers::AppError;

/// Registers the connect and disconnect routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/connect", post(connect))
        .route("/disconnect", get(disconnect))
}

#[derive(Deserialize)]
struct ConnectParams {
    state: Option<String>,
}

/// Exchanges the one-time authorization code in the body for tokens and stores
/// them in the session.
async fn connect(
    State(app): State<AppState>,
    session: Session,
    params: Result<Query<ConnectParams>, QueryRejection>,
    body: Bytes,
) -> Result<Response, AppError> {
    let result = connect_user(&app, session, params, body).await;
    record_outcome(&app.metrics, "connect", &result);
    result
}

async fn connect_user(
    app: &AppState,
    mut session: Session,
    params: Result<Query<ConnectParams>, QueryRejection>,
    body: Bytes,
) -> Result<Response, AppError> {
    let Query(params) = params?;
    // The state stays in the session afterwards so the page can connect again
    // after a disconnect without being reloaded.
    if !session.state_matches(params.state.as_deref()) {
        return Err(AppError::Authentication(
            "Invalid state parameter".to_string(),
        ));
    }

    // The code is sent on as received; the provider rejects empty or stale codes.
    let code = String::from_utf8(body.to_vec()).map_err(|e| {
        AppError::MalformedInput(format!("Authorization code is not UTF-8: {}", e))
    })?;

    let token = app.identity.exchange(&code).await?;
    let gplus_id = decode_id_token(&token.id_token)?;

    if session.is_connected_as(&gplus_id) {
        info!(gplus_id = %gplus_id, "User is already connected");
        return Ok("Connected".into_response());
    }

    session.access_token = Some(token.access_token);
    session.gplus_id = Some(gplus_id.clone());
    let cookie = app.sessions.save(&session)?;

    info!(gplus_id = %gplus_id, "User connected");
    Ok(([(SET_COOKIE, cookie)], "Connected").into_response())
}

/// Revokes the stored access token and forgets it.
async fn disconnect(State(app): State<AppState>, session: Session) -> Result<Response, AppError> {
    let result = disconnect_user(&app, session).await;
    record_outcome(&app.metrics, "disconnect", &result);
    result
}

async fn disconnect_user(app: &AppState, mut session: Session) -> Result<Response, AppError> {
    let Some(access_token) = session.access_token.take() else {
        return Err(AppError::MalformedInput(
            "Current user not connected".to_string(),
        ));
    };

    app.identity.revoke(&access_token).await?;
    let cookie = app.sessions.save(&session)?;

    info!(gplus_id = ?session.gplus_id, "User disconnected");
    Ok(([(SET_COOKIE, cookie)], "Disconnected").into_response())
}
