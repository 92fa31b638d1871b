//! Book model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A book record held in the inventory
///
/// Ids are supplied by the caller and are not required to be unique;
/// lookups resolve to the first record carrying a given id. Fields left
/// out of a request body decode as zero or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Copies on hand
    pub quantity: i64,
}

impl Book {
    pub fn new(id: i64, title: impl Into<String>, author: impl Into<String>, quantity: i64) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            quantity,
        }
    }

    /// Records the inventory starts with
    pub fn seed() -> Vec<Book> {
        vec![
            Book::new(1, "Hell Divers", "Nicholas Sansbury Smith", 3),
            Book::new(2, "Harry Potter and the Prisoner of Azkaban", "J. K. Rowling", 5),
            Book::new(3, "A Clash of Kings", "George R. R. Martin", 8),
        ]
    }
}
