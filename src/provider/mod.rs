//! Paginated resource provider boundary.
//!
//! The backend is an external collaborator; everything the client needs
//! from it goes through [`ResourceProvider`].

pub mod http;

use async_trait::async_trait;

use crate::{
    error::ClientResult,
    models::{Book, FilterCatalog, FilterState, ResourceKind, ResultPage, SuggestionSet},
};

pub use http::HttpProvider;

/// The five retrieval operations the catalog backend offers per resource
/// kind. Implementations must not mutate any client state; responses are
/// committed by the calling service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    /// Unfiltered listing at the given zero-based page (Browse mode).
    async fn fetch_all(&self, kind: ResourceKind, page: u32) -> ClientResult<ResultPage<Book>>;

    /// Listing restricted by the filter state (Filtered mode).
    async fn fetch_filtered(
        &self,
        kind: ResourceKind,
        filters: &FilterState,
    ) -> ClientResult<ResultPage<Book>>;

    /// Free-text search combined with the filter state (Searched mode).
    async fn fetch_searched(
        &self,
        kind: ResourceKind,
        filters: &FilterState,
    ) -> ClientResult<ResultPage<Book>>;

    /// Server-reported universe of valid filter values.
    async fn fetch_catalog(&self, kind: ResourceKind) -> ClientResult<FilterCatalog>;

    /// Grouped autocomplete suggestions for a partial query.
    async fn fetch_suggestions(
        &self,
        kind: ResourceKind,
        query: &str,
    ) -> ClientResult<SuggestionSet>;
}
