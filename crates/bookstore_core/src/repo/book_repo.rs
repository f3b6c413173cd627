//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and substring search over the `books` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Substring search uses SQLite `LIKE '%text%'`: ASCII letters match
//!   case-insensitively, other characters match exactly, and `%`/`_` in the
//!   input act as wildcards.
//! - Deleting a missing id is a no-op, not an error.
//! - NULL `title`/`author`/`qty` values read as `""`/`""`/`0`, so one
//!   incomplete row never fails a listing.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::book::{Book, BookId, NewBook, SearchField};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_SELECT_SQL: &str = "SELECT id, title, author, qty FROM books";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(BookId),
    InvalidData(String),
    /// Connection was not bootstrapped through `open_db`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is below required {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_)
            | Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for inventory CRUD operations.
pub trait BookRepository {
    fn create_book(&self, book: &NewBook) -> RepoResult<BookId>;
    fn title_exists(&self, title: &str) -> RepoResult<bool>;
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    fn search_books(&self, field: SearchField, text: &str) -> RepoResult<Vec<Book>>;
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    fn update_book(&self, book: &Book) -> RepoResult<()>;
    fn delete_book(&self, id: BookId) -> RepoResult<usize>;
    fn count_books(&self) -> RepoResult<u64>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when `books` does not exist.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version < expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let has_books: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'books'
            );",
            [],
            |row| row.get(0),
        )?;
        if !has_books {
            return Err(RepoError::MissingRequiredTable("books"));
        }

        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn create_book(&self, book: &NewBook) -> RepoResult<BookId> {
        self.conn.execute(
            "INSERT INTO books (title, author, qty) VALUES (?1, ?2, ?3);",
            params![book.title.as_str(), book.author.as_str(), book.quantity],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn title_exists(&self, title: &str) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row("SELECT 1 FROM books WHERE title = ?1;", [title], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn search_books(&self, field: SearchField, text: &str) -> RepoResult<Vec<Book>> {
        let sql = format!("{BOOK_SELECT_SQL} WHERE {} LIKE ?1;", field.column());
        collect_books(self.conn, &sql, [format!("%{text}%")])
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        collect_books(self.conn, &format!("{BOOK_SELECT_SQL};"), params![])
    }

    fn update_book(&self, book: &Book) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE books SET title = ?1, author = ?2, qty = ?3 WHERE id = ?4;",
            params![
                book.title.as_str(),
                book.author.as_str(),
                book.quantity,
                book.id
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(book.id));
        }

        Ok(())
    }

    fn delete_book(&self, id: BookId) -> RepoResult<usize> {
        let changed = self.conn.execute("DELETE FROM books WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn count_books(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }
}

fn collect_books<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> RepoResult<Vec<Book>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut books = Vec::new();

    while let Some(row) = rows.next()? {
        books.push(parse_book_row(row)?);
    }

    Ok(books)
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let id: BookId = row.get("id")?;
    let title: Option<String> = row.get("title")?;
    let author: Option<String> = row.get("author")?;
    let quantity: Option<i64> = row.get("qty")?;

    // NULL columns read as empty text / zero stock.
    Ok(Book {
        id,
        title: title.unwrap_or_default(),
        author: author.unwrap_or_default(),
        quantity: quantity.unwrap_or_default(),
    })
}
