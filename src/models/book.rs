//! Book (catalog entry) model as served by the resource endpoints

use serde::{Deserialize, Serialize};

/// Lending class of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookType {
    CourseLiterature,
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCategory {
    pub book_category_id: String,
    pub subject: String,
}

/// Full book payload as returned inside result pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub published_year: i32,
    pub isbn: String,
    pub language: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub book_type: BookType,
    pub number_of_copies: u32,
    pub number_of_available_to_borrow_copies: u32,
    pub book_category: BookCategory,
}

impl Book {
    /// At least one copy can currently be borrowed.
    pub fn is_available_to_borrow(&self) -> bool {
        self.number_of_available_to_borrow_copies > 0
    }
}
