//! The sign-in page.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tracing::debug;

use super::record_outcome;
use crate::page::PageData;
use crate::session::Session;
use crate::state::AppState;
use crate::utils::http_helpers::AppError;
use crate::utils::random::state_token;

/// Registers the index route. Only the exact root path is served here.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Issues a fresh anti-forgery token, stores it in the session and renders the page.
async fn index(State(app): State<AppState>, session: Session) -> Result<Response, AppError> {
    let result = render_index(&app, session);
    record_outcome(&app.metrics, "index", &result);
    result
}

fn render_index(app: &AppState, mut session: Session) -> Result<Response, AppError> {
    let token = state_token();
    session.state = Some(token.clone());
    let cookie = app.sessions.save(&session)?;
    debug!("Issued new anti-forgery state token");

    let identity = app.identity.config();
    let html = app.page.render(&PageData {
        application_name: &app.config.application_name,
        client_id: &identity.client_id,
        scope: &identity.scope,
        state: &token,
    });

    Ok(([(SET_COOKIE, cookie)], Html(html)).into_response())
}
