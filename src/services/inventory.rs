//! Inventory service: listing, creation, selling off, checkout and return

use crate::{error::InventoryError, models::Book, repository::Repository};

#[derive(Clone)]
pub struct InventoryService {
    repository: Repository,
}

impl InventoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books in current order
    pub async fn list_books(&self) -> Vec<Book> {
        self.repository.books.list().await
    }

    pub async fn count(&self) -> usize {
        self.repository.books.count().await
    }

    pub async fn get_book(&self, id: &str) -> Result<Book, InventoryError> {
        self.repository.books.get_by_id(id).await
    }

    /// Append a book; ids are not checked for collisions
    pub async fn create_book(&self, book: Book) -> Book {
        let book = self.repository.books.append(book).await;
        tracing::info!(id = book.id, quantity = book.quantity, "Book created");
        book
    }

    /// Remove the first book with the given id, returning what is left
    pub async fn sell_all(&self, id: &str) -> Result<Vec<Book>, InventoryError> {
        let remaining = self.repository.books.remove_first(id).await?;
        tracing::info!(id, remaining = remaining.len(), "Book sold off");
        Ok(remaining)
    }

    /// Lend one copy of a book
    pub async fn checkout(&self, id: &str) -> Result<Book, InventoryError> {
        let book = self
            .repository
            .books
            .update(id, |book| {
                if book.quantity <= 0 {
                    return Err(InventoryError::OutOfStock);
                }
                book.quantity -= 1;
                Ok(())
            })
            .await?;

        tracing::info!(id = book.id, quantity = book.quantity, "Book checked out");
        Ok(book)
    }

    /// Take one copy of a book back
    pub async fn return_book(&self, id: &str) -> Result<Book, InventoryError> {
        let book = self
            .repository
            .books
            .update(id, |book| {
                book.quantity = book.quantity.saturating_add(1);
                Ok(())
            })
            .await?;

        tracing::info!(id = book.id, quantity = book.quantity, "Book returned");
        Ok(book)
    }
}
