//! Inventory use-case service.
//!
//! # Responsibility
//! - Provide the create/read/update/delete entry points the shell calls.
//! - Apply the duplicate-title confirmation and patch-merge rules.
//!
//! # Invariants
//! - Operations take already-parsed values; prompting is a caller concern.
//! - Log events carry ids and counts only, never titles or authors.

use crate::model::book::{Book, BookId, BookPatch, NewBook, SearchField};
use crate::repo::book_repo::{BookRepository, RepoError, RepoResult};
use log::{debug, info, warn};

/// Result of [`InventoryService::create_book`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(BookId),
    /// A book with the same title exists and the caller declined to add another.
    Cancelled,
}

/// Use-case service wrapper for inventory operations.
pub struct InventoryService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> InventoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a book, asking `confirm_duplicate` first when the title is taken.
    ///
    /// # Contract
    /// - `confirm_duplicate` is called at most once, and only for duplicates.
    /// - Declining returns `CreateOutcome::Cancelled` without touching storage.
    pub fn create_book<F>(&self, book: &NewBook, confirm_duplicate: F) -> RepoResult<CreateOutcome>
    where
        F: FnOnce(&NewBook) -> bool,
    {
        if self.repo.title_exists(&book.title)? && !confirm_duplicate(book) {
            info!("event=book_create module=service status=cancelled reason=duplicate_title");
            return Ok(CreateOutcome::Cancelled);
        }

        let id = self.repo.create_book(book)?;
        info!("event=book_create module=service status=ok id={id}");
        Ok(CreateOutcome::Created(id))
    }

    pub fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let book = self.repo.get_book(id)?;
        debug!(
            "event=book_get module=service status=ok id={} found={}",
            id,
            book.is_some()
        );
        Ok(book)
    }

    pub fn search_by_title(&self, text: &str) -> RepoResult<Vec<Book>> {
        self.search(SearchField::Title, text)
    }

    pub fn search_by_author(&self, text: &str) -> RepoResult<Vec<Book>> {
        self.search(SearchField::Author, text)
    }

    /// Lists every book in storage order.
    pub fn list_books(&self) -> RepoResult<Vec<Book>> {
        let books = self.repo.list_books()?;
        debug!(
            "event=book_list module=service status=ok count={}",
            books.len()
        );
        Ok(books)
    }

    /// Merges `patch` onto the stored book and writes all mutable fields.
    ///
    /// Returns the record as stored. An empty patch rewrites the current
    /// values unchanged.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when `id` does not exist; nothing is written.
    pub fn update_book(&self, id: BookId, patch: &BookPatch) -> RepoResult<Book> {
        let Some(current) = self.repo.get_book(id)? else {
            warn!("event=book_update module=service status=not_found id={id}");
            return Err(RepoError::NotFound(id));
        };

        let updated = patch.apply_to(&current);
        self.repo.update_book(&updated)?;
        info!(
            "event=book_update module=service status=ok id={} noop={}",
            id,
            patch.is_empty()
        );
        Ok(updated)
    }

    /// Deletes a book by id and returns the number of removed rows.
    ///
    /// A missing id removes nothing and is not an error.
    pub fn delete_book(&self, id: BookId) -> RepoResult<usize> {
        let removed = self.repo.delete_book(id)?;
        info!("event=book_delete module=service status=ok id={id} removed={removed}");
        Ok(removed)
    }

    pub fn count_books(&self) -> RepoResult<u64> {
        self.repo.count_books()
    }

    fn search(&self, field: SearchField, text: &str) -> RepoResult<Vec<Book>> {
        let books = self.repo.search_books(field, text)?;
        debug!(
            "event=book_search module=service status=ok field={} count={}",
            field.column(),
            books.len()
        );
        Ok(books)
    }
}
