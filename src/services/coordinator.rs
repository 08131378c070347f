//! Filter/search reconciliation for one resource kind.
//!
//! The coordinator owns the filter state, the current result page and the
//! catalog snapshot, and decides per fetch whether to browse, filter or
//! search. Responses are committed in issue order: a stale response never
//! overwrites a newer one, and nothing is committed after `close`.

use std::sync::Arc;

use indexmap::IndexSet;
use validator::Validate;

use crate::{
    error::{ClientError, ClientResult},
    models::{filters::Availability, Book, FilterCatalog, FilterState, ResourceKind, ResultPage},
    provider::ResourceProvider,
};

/// Retrieval mode of a single fetch; a non-empty query always wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalMode {
    Browse,
    Filtered,
    Searched,
}

impl std::fmt::Display for RetrievalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RetrievalMode::Browse => "browse",
            RetrievalMode::Filtered => "filtered",
            RetrievalMode::Searched => "searched",
        };
        write!(f, "{}", label)
    }
}

/// Transient, dismissible user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub struct SearchCoordinator<P: ResourceProvider> {
    provider: Arc<P>,
    kind: ResourceKind,
    filters: FilterState,
    catalog: FilterCatalog,
    results: ResultPage<Book>,
    notice: Option<Notice>,
    issued_seq: u64,
    committed_seq: u64,
    closed: bool,
}

impl<P: ResourceProvider> SearchCoordinator<P> {
    pub fn new(provider: Arc<P>, kind: ResourceKind) -> Self {
        Self {
            provider,
            kind,
            filters: FilterState::default(),
            catalog: FilterCatalog::default(),
            results: ResultPage::default(),
            notice: None,
            issued_seq: 0,
            committed_seq: 0,
            closed: false,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn results(&self) -> &ResultPage<Book> {
        &self.results
    }

    pub fn catalog(&self) -> &FilterCatalog {
        &self.catalog
    }

    /// Mode the next fetch will use, judged against the catalog snapshot.
    pub fn mode(&self) -> RetrievalMode {
        if self.filters.active_query().is_some() {
            RetrievalMode::Searched
        } else if self.filters.has_non_default_filters(&self.catalog) {
            RetrievalMode::Filtered
        } else {
            RetrievalMode::Browse
        }
    }

    /// Replace the free-text query; any change resets pagination.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.filters.query {
            self.filters.query = query;
            self.filters.page = 0;
        }
    }

    /// Toggle a category selection; returns whether it is now selected.
    pub fn toggle_category(&mut self, name: &str) -> bool {
        let selected = Self::toggle(&mut self.filters.categories, name);
        self.filters.page = 0;
        selected
    }

    /// Toggle a language selection; returns whether it is now selected.
    pub fn toggle_language(&mut self, name: &str) -> bool {
        let selected = Self::toggle(&mut self.filters.languages, name);
        self.filters.page = 0;
        selected
    }

    fn toggle(set: &mut IndexSet<String>, name: &str) -> bool {
        if set.shift_remove(name) {
            false
        } else {
            set.insert(name.to_string());
            true
        }
    }

    /// Narrow the publication-year bounds. Invalid bounds are rejected
    /// locally and nothing is mutated or sent.
    pub fn set_year_bounds(&mut self, min_year: i32, max_year: i32) -> ClientResult<()> {
        if (min_year, max_year) == (self.filters.min_year, self.filters.max_year) {
            return Ok(());
        }
        let mut candidate = self.filters.clone();
        candidate.min_year = min_year;
        candidate.max_year = max_year;
        candidate.validate()?;
        candidate.page = 0;
        self.filters = candidate;
        Ok(())
    }

    /// Restrict the availability set; the empty set is rejected.
    pub fn set_availability(&mut self, availability: IndexSet<Availability>) -> ClientResult<()> {
        if availability.is_empty() {
            return Err(ClientError::Validation(
                "availability selection cannot be empty".to_string(),
            ));
        }
        if availability != self.filters.availability {
            self.filters.availability = availability;
            self.filters.page = 0;
        }
        Ok(())
    }

    /// Move to another page. Never touches the other filter fields.
    pub fn goto_page(&mut self, page: u32) {
        self.filters.page = page;
    }

    /// Fetch the result page for the current mode and commit it unless a
    /// newer fetch has been committed meanwhile. On failure the previous
    /// page stays visible and a dismissible notice is recorded.
    pub async fn refresh(&mut self) -> ClientResult<&ResultPage<Book>> {
        if self.closed {
            return Err(ClientError::Closed);
        }
        self.filters.validate()?;

        let seq = self.issue();
        let mode = self.mode();
        tracing::debug!(kind = %self.kind, %mode, page = self.filters.page, seq, "fetching results");

        let outcome = match mode {
            RetrievalMode::Browse => self.provider.fetch_all(self.kind, self.filters.page).await,
            RetrievalMode::Filtered => {
                self.provider.fetch_filtered(self.kind, &self.filters).await
            }
            RetrievalMode::Searched => {
                self.provider.fetch_searched(self.kind, &self.filters).await
            }
        };
        self.resolve(seq, outcome)
    }

    /// Refresh the catalog snapshot. Failure keeps the previous snapshot.
    pub async fn load_catalog(&mut self) -> ClientResult<&FilterCatalog> {
        if self.closed {
            return Err(ClientError::Closed);
        }
        match self.provider.fetch_catalog(self.kind).await {
            Ok(catalog) => {
                if self.closed {
                    return Err(ClientError::Closed);
                }
                self.catalog = catalog;
                Ok(&self.catalog)
            }
            Err(err) => {
                tracing::warn!(kind = %self.kind, error = %err, "catalog fetch failed; keeping previous snapshot");
                Err(err)
            }
        }
    }

    /// Optimistically add a user-entered category to the catalog snapshot.
    pub fn add_unconfirmed_category(&mut self, name: &str) -> bool {
        self.catalog.add_unconfirmed_category(name)
    }

    /// Optimistically add a user-entered language to the catalog snapshot.
    pub fn add_unconfirmed_language(&mut self, name: &str) -> bool {
        self.catalog.add_unconfirmed_language(name)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Tear down; pending responses are dropped and later calls fail.
    pub fn close(&mut self) {
        self.closed = true;
    }

    fn issue(&mut self) -> u64 {
        self.issued_seq += 1;
        self.issued_seq
    }

    fn resolve(
        &mut self,
        seq: u64,
        outcome: ClientResult<ResultPage<Book>>,
    ) -> ClientResult<&ResultPage<Book>> {
        if self.closed {
            return Err(ClientError::Closed);
        }
        match outcome {
            Ok(page) => {
                if seq <= self.committed_seq {
                    tracing::debug!(seq, committed = self.committed_seq, "discarding stale result page");
                    return Ok(&self.results);
                }
                if !page.is_consistent() {
                    tracing::warn!(kind = %self.kind, "result page violates its envelope invariants");
                }
                self.committed_seq = seq;
                self.results = page;
                self.notice = None;
                Ok(&self.results)
            }
            Err(err) => {
                tracing::warn!(kind = %self.kind, error = %err, "result fetch failed; keeping previous page");
                self.notice = Some(Notice::new(format!(
                    "Could not load {}: {}",
                    self.kind.label().to_lowercase(),
                    err
                )));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{filters::YearRange, BookCategory, BookType};
    use crate::provider::MockResourceProvider;
    use mockall::predicate::eq;
    use tokio_test::assert_ok;

    fn book(id: &str) -> Book {
        Book {
            book_id: id.to_string(),
            title: "Nineteen Eighty-Four".to_string(),
            author: "George Orwell".to_string(),
            publisher: "Secker & Warburg".to_string(),
            published_year: 1949,
            isbn: "9780141036144".to_string(),
            language: "English".to_string(),
            image_url: None,
            book_type: BookType::Public,
            number_of_copies: 3,
            number_of_available_to_borrow_copies: 1,
            book_category: BookCategory {
                book_category_id: "c-1".to_string(),
                subject: "Fiction".to_string(),
            },
        }
    }

    fn page(ids: &[&str]) -> ResultPage<Book> {
        ResultPage {
            content: ids.iter().map(|id| book(id)).collect(),
            page_number: 0,
            page_size: 10,
            total_pages: 1,
            total_elements: ids.len() as u64,
            first: true,
            last: true,
            empty: ids.is_empty(),
        }
    }

    fn catalog(min_year: i32, max_year: i32) -> FilterCatalog {
        FilterCatalog {
            published_year_range: YearRange { min_year, max_year },
            ..FilterCatalog::default()
        }
    }

    fn coordinator_with(mock: MockResourceProvider) -> SearchCoordinator<MockResourceProvider> {
        let mut coordinator = SearchCoordinator::new(Arc::new(mock), ResourceKind::Books);
        coordinator.catalog = catalog(1950, 2024);
        coordinator
    }

    #[test]
    fn defaults_select_browse_mode() {
        let coordinator = coordinator_with(MockResourceProvider::new());
        assert_eq!(coordinator.mode(), RetrievalMode::Browse);
    }

    #[test]
    fn a_filter_selects_filtered_mode_and_a_query_wins_over_it() {
        let mut coordinator = coordinator_with(MockResourceProvider::new());

        coordinator.toggle_category("Fiction");
        assert_eq!(coordinator.mode(), RetrievalMode::Filtered);

        coordinator.set_query("orwell");
        assert_eq!(coordinator.mode(), RetrievalMode::Searched);

        // A blank query falls back to the filters.
        coordinator.set_query("   ");
        assert_eq!(coordinator.mode(), RetrievalMode::Filtered);
    }

    #[test]
    fn filter_changes_reset_pagination_but_page_moves_do_not() {
        let mut coordinator = coordinator_with(MockResourceProvider::new());
        coordinator.goto_page(3);

        coordinator.toggle_category("Fiction");
        assert_eq!(coordinator.filters().page, 0);

        let before = coordinator.filters().clone();
        coordinator.goto_page(4);
        assert_eq!(coordinator.filters().page, 4);
        assert_eq!(coordinator.filters().categories, before.categories);
        assert_eq!(coordinator.filters().languages, before.languages);
        assert_eq!(coordinator.filters().query, before.query);
        assert_eq!(coordinator.filters().min_year, before.min_year);
        assert_eq!(coordinator.filters().max_year, before.max_year);
    }

    #[tokio::test]
    async fn refresh_dispatches_by_mode() {
        let mut mock = MockResourceProvider::new();
        mock.expect_fetch_all()
            .with(eq(ResourceKind::Books), eq(0))
            .times(1)
            .returning(|_, _| Ok(page(&["a"])));
        mock.expect_fetch_filtered()
            .times(1)
            .returning(|_, _| Ok(page(&["a", "b"])));
        mock.expect_fetch_searched()
            .times(1)
            .returning(|_, _| Ok(page(&["a", "b", "c"])));

        let mut coordinator = coordinator_with(mock);

        assert_ok!(coordinator.refresh().await);
        assert_eq!(coordinator.results().content.len(), 1);

        coordinator.toggle_category("Fiction");
        assert_ok!(coordinator.refresh().await);
        assert_eq!(coordinator.results().content.len(), 2);

        coordinator.set_query("orwell");
        assert_ok!(coordinator.refresh().await);
        assert_eq!(coordinator.results().content.len(), 3);
    }

    #[tokio::test]
    async fn invalid_bounds_block_the_fetch_entirely() {
        let mut mock = MockResourceProvider::new();
        mock.expect_fetch_all().never();
        mock.expect_fetch_filtered().never();
        mock.expect_fetch_searched().never();

        let mut coordinator = coordinator_with(mock);
        assert!(matches!(
            coordinator.set_year_bounds(2010, 1990),
            Err(ClientError::Validation(_))
        ));
        // The rejected bounds were never applied.
        assert_eq!(coordinator.filters().min_year, 1000);

        coordinator.filters.min_year = 3000;
        assert!(matches!(
            coordinator.refresh().await,
            Err(ClientError::Validation(_))
        ));
    }

    #[test]
    fn stale_responses_never_overwrite_newer_ones() {
        let mut coordinator = coordinator_with(MockResourceProvider::new());

        let first = coordinator.issue();
        let second = coordinator.issue();

        assert_ok!(coordinator.resolve(second, Ok(page(&["b1", "b2"]))));
        assert_ok!(coordinator.resolve(first, Ok(page(&["a1"]))));

        assert_eq!(coordinator.results().content.len(), 2);
        assert_eq!(coordinator.results().content[0].book_id, "b1");
    }

    #[test]
    fn failures_keep_the_previous_page_and_record_a_notice() {
        let mut coordinator = coordinator_with(MockResourceProvider::new());

        let seq = coordinator.issue();
        assert_ok!(coordinator.resolve(seq, Ok(page(&["a1"]))));

        let seq = coordinator.issue();
        let result = coordinator.resolve(
            seq,
            Err(ClientError::Status {
                status: 502,
                message: "bad gateway".to_string(),
            }),
        );
        assert!(result.is_err());
        assert_eq!(coordinator.results().content.len(), 1);
        assert!(coordinator.notice().is_some());

        coordinator.dismiss_notice();
        assert!(coordinator.notice().is_none());
    }

    #[test]
    fn nothing_is_committed_after_close() {
        let mut coordinator = coordinator_with(MockResourceProvider::new());
        let seq = coordinator.issue();
        coordinator.close();

        assert!(matches!(
            coordinator.resolve(seq, Ok(page(&["a1"]))),
            Err(ClientError::Closed)
        ));
        assert!(coordinator.results().is_empty());

        // A failure response arriving after teardown records no notice.
        let seq = coordinator.issue();
        assert!(matches!(
            coordinator.resolve(
                seq,
                Err(ClientError::Status {
                    status: 502,
                    message: "bad gateway".to_string(),
                }),
            ),
            Err(ClientError::Closed)
        ));
        assert!(coordinator.notice().is_none());
    }

    #[test]
    fn availability_restriction_is_a_filter_and_empty_sets_are_rejected() {
        let mut coordinator = coordinator_with(MockResourceProvider::new());

        coordinator
            .set_availability(IndexSet::from([Availability::ReservedOnly]))
            .unwrap();
        assert_eq!(coordinator.mode(), RetrievalMode::Filtered);

        assert!(matches!(
            coordinator.set_availability(IndexSet::new()),
            Err(ClientError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn load_catalog_replaces_the_snapshot_wholesale() {
        let mut mock = MockResourceProvider::new();
        mock.expect_fetch_catalog()
            .times(1)
            .returning(|_| Ok(catalog(1900, 2020)));

        let mut coordinator = coordinator_with(mock);
        coordinator.add_unconfirmed_category("Poetry");
        assert!(coordinator.catalog().categories.contains_key("Poetry"));

        assert_ok!(coordinator.load_catalog().await);
        assert_eq!(coordinator.catalog().published_year_range.min_year, 1900);
        assert!(!coordinator.catalog().categories.contains_key("Poetry"));
    }

    #[tokio::test]
    async fn catalog_fetch_failure_keeps_the_previous_snapshot() {
        let mut mock = MockResourceProvider::new();
        mock.expect_fetch_catalog().times(1).returning(|_| {
            Err(ClientError::Status {
                status: 503,
                message: "unavailable".to_string(),
            })
        });

        let mut coordinator = coordinator_with(mock);
        let before = coordinator.catalog().clone();

        assert!(matches!(
            coordinator.load_catalog().await,
            Err(ClientError::Status { status: 503, .. })
        ));
        assert_eq!(coordinator.catalog(), &before);
    }
}
