//! Shared application state

use ballpark_client::{AdminApi, Endpoints, HttpAdminApi};
use ballpark_core::config::DisplayConfig;
use ballpark_core::{BoardDirectory, Config, FilterContext, ResyncPolicy};
use std::fmt;
use std::sync::Arc;

/// Configuration plus the API handle every screen works against
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    api: Arc<dyn AdminApi>,
    filter: FilterContext,
}

impl AppState {
    /// Create state over any API implementation
    pub fn new(config: Config, api: Arc<dyn AdminApi>) -> Self {
        let filter = FilterContext::from(&config);
        Self {
            config: Arc::new(config),
            api,
            filter,
        }
    }

    /// Create state talking to the configured backend
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from `[api]`.
    pub fn connect(config: Config) -> crate::Result<Self> {
        let api = HttpAdminApi::new(&config.api)?;
        Ok(Self::new(config, Arc::new(api)))
    }

    /// Resolved configuration
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Display settings
    #[must_use]
    pub fn display(&self) -> &DisplayConfig {
        &self.config.display
    }

    /// API handle
    #[must_use]
    pub fn api(&self) -> &Arc<dyn AdminApi> {
        &self.api
    }

    /// URL builder for attachment links
    #[must_use]
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(self.api.base_url())
    }

    /// Lookups used by search and rendering
    #[must_use]
    pub const fn filter_context(&self) -> &FilterContext {
        &self.filter
    }

    /// Board names
    #[must_use]
    pub const fn boards(&self) -> &BoardDirectory {
        self.filter.boards()
    }

    /// Resync policy shared by every mutation
    #[must_use]
    pub fn resync(&self) -> ResyncPolicy {
        self.config.console.resync
    }

    /// Fan-out width for bulk actions and stats loading
    #[must_use]
    pub fn max_concurrency(&self) -> usize {
        self.config.api.max_concurrency
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("base_url", &self.api.base_url())
            .field("resync", &self.config.console.resync)
            .field("boards", &self.boards().len())
            .finish_non_exhaustive()
    }
}
