//! Core inventory logic for the bookstore manager.
//! This crate owns the `books` table and every statement that touches it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{
    close_db, initialize_store, open_db, open_db_in_memory, rollback_pending, DbError, DbResult,
    DEFAULT_DB_FILE_NAME, SEED_BOOKS, SEED_FIRST_ID,
};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::book::{Book, BookId, BookPatch, NewBook, SearchField};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use service::inventory_service::{CreateOutcome, InventoryService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
