//! Grouped autocomplete suggestions

use serde::{Deserialize, Serialize};

/// Suggestion lists grouped by the field they matched on. Fully ephemeral:
/// replaced wholesale on each successful fetch, cleared on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionSet {
    pub title: Vec<String>,
    pub author: Vec<String>,
    pub isbn: Vec<String>,
    pub publisher: Vec<String>,
}

impl SuggestionSet {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.author.is_empty()
            && self.isbn.is_empty()
            && self.publisher.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Non-empty groups in display order, for rendering the panel.
    pub fn groups(&self) -> Vec<(&'static str, &[String])> {
        [
            ("title", self.title.as_slice()),
            ("author", self.author.as_slice()),
            ("isbn", self.isbn.as_slice()),
            ("publisher", self.publisher.as_slice()),
        ]
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .collect()
    }
}
