//! Paginated backend responses

use serde::{Deserialize, Serialize};

/// One page of resource items, replaced wholesale on every successful fetch.
///
/// Field names follow the backend's page envelope (`number`, `size`,
/// `totalPages`, ...); extra envelope fields are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage<T> {
    #[serde(default)]
    pub content: Vec<T>,
    #[serde(rename = "number")]
    pub page_number: u32,
    #[serde(rename = "size")]
    pub page_size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> ResultPage<T> {
    /// One-based page number for display.
    pub fn display_page(&self) -> u32 {
        self.page_number + 1
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Checks the page envelope invariants: the content never exceeds the
    /// page size and the page number stays within the page count unless the
    /// result set is empty.
    pub fn is_consistent(&self) -> bool {
        self.content.len() <= self.page_size as usize
            && (self.total_elements == 0 || self.page_number < self.total_pages)
    }
}

impl<T> Default for ResultPage<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            page_number: 0,
            page_size: 10,
            total_pages: 0,
            total_elements: 0,
            first: true,
            last: true,
            empty: true,
        }
    }
}
