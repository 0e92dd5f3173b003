//! Application startup and server initialization.
//!
//! Builds the store, identity client, session codec and page template from the
//! configuration, then serves the router.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::routes;
use crate::state::AppState;
use crate::store::create_store;

/// Initializes and runs the application server.
///
/// # Errors
///
/// Returns an error if the store or template cannot be set up, if the server
/// fails to bind to the configured address, or if serving fails.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let store = create_store(&config.store).await?;
    let state = AppState::build(config.clone(), store)?;

    let app = routes::create_router(state);

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .map_err(|e| format!("Could not bind to '{}': {}", config.bind_address, e))?;
    info!("Starting server on {}", config.bind_address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}
