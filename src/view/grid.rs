//! Result grid view model

use crate::models::ResultPage;

use super::pager::PagerModel;

/// What the results area renders: either a "no results" message (which
/// suppresses the page control entirely) or the rows plus their pager.
#[derive(Debug, Clone, PartialEq)]
pub enum GridView<T> {
    NoResults,
    Page { rows: Vec<T>, pager: PagerModel },
}

impl<T: Clone> GridView<T> {
    pub fn build(page: &ResultPage<T>, window_size: usize) -> Self {
        if page.content.is_empty() {
            return GridView::NoResults;
        }
        GridView::Page {
            rows: page.content.clone(),
            pager: PagerModel::build(page.display_page(), page.total_pages, window_size),
        }
    }
}
