//! Repository layer over the in-memory book collection

pub mod books;

use crate::models::Book;

/// Main repository struct holding the book store
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a repository over the given records
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: books::BooksRepository::new(books),
        }
    }

    /// Create a repository holding the starting inventory
    pub fn seeded() -> Self {
        Self::new(Book::seed())
    }
}
