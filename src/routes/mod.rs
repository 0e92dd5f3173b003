//! HTTP route definitions and handlers.
//!
//! This module organizes all HTTP endpoints into logical groups:
//! the sign-in page, connect/disconnect, paste records, health and metrics.

mod connect_routes;
mod health_routes;
mod index_routes;
mod metrics_routes;
mod paste_routes;

use crate::metrics::{Metrics, MetricsRecorder};
use crate::state::AppState;
use crate::utils::http_helpers::{not_found, AppError};
use axum::Router;

/// Creates the application router with all configured routes.
///
/// Unmatched paths get the plain-text 404 page.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(index_routes::routes())
        .merge(connect_routes::routes())
        .merge(paste_routes::routes())
        .merge(health_routes::routes())
        .merge(metrics_routes::routes())
        .fallback(not_found)
        .with_state(state)
}

/// Counts the outcome of a handler, labelled with the error kind on failure.
fn record_outcome<T>(metrics: &Metrics, route: &str, result: &Result<T, AppError>) {
    let outcome = match result {
        Ok(_) => "success",
        Err(e) => e.kind(),
    };
    metrics.record_request(route, outcome);
}
