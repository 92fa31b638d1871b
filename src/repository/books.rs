//! Books repository
//!
//! The collection is an ordered `Vec<Book>` guarded by a single `RwLock`.
//! Order is insertion order and duplicate ids are kept, so every lookup is
//! a linear scan that resolves to the first match.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{error::InventoryError, models::Book};

/// Parse a textual book identifier
pub fn parse_id(id: &str) -> Result<i64, InventoryError> {
    id.parse::<i64>().map_err(|_| InventoryError::InvalidId)
}

/// Index of the first book whose id matches `id`
pub fn position(books: &[Book], id: &str) -> Result<usize, InventoryError> {
    let id = parse_id(id)?;
    books
        .iter()
        .position(|book| book.id == id)
        .ok_or(InventoryError::NotFound)
}

/// Mutable handle to the first book whose id matches `id`
pub fn find_mut<'a>(books: &'a mut [Book], id: &str) -> Result<&'a mut Book, InventoryError> {
    let index = position(books, id)?;
    Ok(&mut books[index])
}

#[derive(Clone)]
pub struct BooksRepository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BooksRepository {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(RwLock::new(books)),
        }
    }

    /// Snapshot of every book in current order
    pub async fn list(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Book, InventoryError> {
        let books = self.books.read().await;
        let index = position(&books, id)?;
        Ok(books[index].clone())
    }

    /// Append a book at the end of the collection
    pub async fn append(&self, book: Book) -> Book {
        self.books.write().await.push(book.clone());
        book
    }

    /// Remove the first book matching `id` and return the remaining books
    pub async fn remove_first(&self, id: &str) -> Result<Vec<Book>, InventoryError> {
        let mut books = self.books.write().await;
        let index = position(&books, id)?;
        books.remove(index);
        Ok(books.clone())
    }

    /// Apply `change` to the first book matching `id` under the write lock.
    ///
    /// `change` must check its preconditions before mutating; its error is
    /// returned as-is.
    pub async fn update<F>(&self, id: &str, change: F) -> Result<Book, InventoryError>
    where
        F: FnOnce(&mut Book) -> Result<(), InventoryError>,
    {
        let mut books = self.books.write().await;
        let book = find_mut(&mut books, id)?;
        change(&mut *book)?;
        Ok(book.clone())
    }

    pub async fn count(&self) -> usize {
        self.books.read().await.len()
    }
}
