//! SQLite storage bootstrap for the bookstore inventory.
//!
//! # Responsibility
//! - Open and configure the single process-wide SQLite connection.
//! - Create the `books` table and seed it on first run.
//! - Close the connection and discard uncommitted work at session end.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Callers never see a connection before migrations and seeding succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
mod seed;

pub use open::{close_db, open_db, open_db_in_memory, rollback_pending};
pub use seed::{initialize_store, SEED_BOOKS, SEED_FIRST_ID};

/// File name of the inventory database, resolved against the working directory.
pub const DEFAULT_DB_FILE_NAME: &str = "ebookstore2.db";

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "inventory schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
