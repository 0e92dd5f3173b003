//! Shared application state.
//!
//! Everything a handler needs is constructed once at startup and injected
//! here; there are no process-wide singletons.

use std::sync::Arc;

use crate::config::ConfigV1;
use crate::identity::IdentityClient;
use crate::metrics::Metrics;
use crate::page::IndexPage;
use crate::session::SessionStore;
use crate::store::Store;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Client for the identity provider's token endpoints.
    pub identity: Arc<IdentityClient>,
    /// Signed cookie session codec.
    pub sessions: Arc<SessionStore>,
    /// Paste record storage.
    pub store: Arc<dyn Store>,
    /// The parsed sign-in page.
    pub page: Arc<IndexPage>,
    pub metrics: Metrics,
}

impl AppState {
    /// Builds the state from configuration around an already created store.
    ///
    /// Fails if the page template cannot be loaded.
    pub fn build(config: Arc<ConfigV1>, store: Arc<dyn Store>) -> Result<Self, String> {
        let metrics = Metrics::new();
        let page = IndexPage::load(&config.template_path)?;

        Ok(AppState {
            identity: Arc::new(IdentityClient::new(&config.identity, metrics.clone())),
            sessions: Arc::new(SessionStore::new(&config.session)),
            page: Arc::new(page),
            store,
            metrics,
            config,
        })
    }
}
