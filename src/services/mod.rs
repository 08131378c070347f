//! Browsing services

pub mod coordinator;
pub mod suggestions;

pub use coordinator::{Notice, RetrievalMode, SearchCoordinator};
pub use suggestions::SuggestionService;

use std::sync::Arc;
use tokio::time::Duration;

use crate::{
    config::{ClientConfig, SearchConfig},
    debounce::Debouncer,
    error::ClientResult,
    models::ResourceKind,
    provider::{HttpProvider, ResourceProvider},
};

/// Everything needed to drive one resource kind's browse page: the
/// filter/search coordinator plus the suggestion service, sharing one
/// provider.
pub struct BrowseSession<P: ResourceProvider> {
    pub coordinator: SearchCoordinator<P>,
    pub suggestions: SuggestionService<P>,
    search: SearchConfig,
}

impl BrowseSession<HttpProvider> {
    /// Connect a session against the configured backend.
    pub fn connect(config: &ClientConfig, kind: ResourceKind) -> ClientResult<Self> {
        let provider = Arc::new(HttpProvider::new(&config.backend)?);
        Ok(Self::with_provider(provider, kind, config.search.clone()))
    }
}

impl<P: ResourceProvider> BrowseSession<P> {
    pub fn with_provider(provider: Arc<P>, kind: ResourceKind, search: SearchConfig) -> Self {
        Self {
            coordinator: SearchCoordinator::new(provider.clone(), kind),
            suggestions: SuggestionService::new(provider, kind, search.suggestion_min_chars),
            search,
        }
    }

    /// Debouncer sized for the configured quiet period, for feeding raw
    /// keystrokes into the suggestion service.
    pub fn query_debouncer(&self) -> Debouncer<String> {
        Debouncer::new(String::new(), Duration::from_millis(self.search.debounce_ms))
    }

    /// Page-link window size for the grid view.
    pub fn page_window(&self) -> usize {
        self.search.page_window
    }

    /// Tear both services down; nothing is committed afterwards.
    pub fn close(&mut self) {
        self.coordinator.close();
        self.suggestions.close();
    }
}
