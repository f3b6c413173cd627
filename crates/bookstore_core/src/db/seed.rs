//! First-run initialization of the `books` table.
//!
//! # Invariants
//! - Seeding runs only when `books` has zero rows. Any existing row, even one
//!   unrelated to the seed list, skips seeding entirely.
//! - The first seeded id is [`SEED_FIRST_ID`]; ids already handed out by the
//!   AUTOINCREMENT sequence are never lowered.
//! - Seed rows are inserted in one transaction, in list order.

use super::migrations::apply_migrations;
use super::DbResult;
use crate::model::book::BookId;
use log::{debug, info};
use rusqlite::{params, Connection, Transaction};

/// Id assigned to the first seeded book.
pub const SEED_FIRST_ID: BookId = 3001;

/// Books inserted into an empty inventory, as `(title, author, quantity)`.
pub const SEED_BOOKS: [(&str, &str, i64); 10] = [
    ("A Tale of Two Cities", "Charles Dickens", 30),
    (
        "Harry Potter and the Philosopher's Stone",
        "J.K. Rowling",
        40,
    ),
    ("The Lion, the Witch and the Wardrobe", "C. S. Lewis", 25),
    ("The Lord of the Rings", "J.R.R Tolkien", 37),
    ("Alice in Wonderland", "Lewis Carroll", 12),
    ("Oliver Twist", "Charles Dickens", 50),
    ("Great Expectations", "Charles Dickens", 25),
    ("David Copperfield", "Charles Dickens", 35),
    ("The Pickwick Papers", "Charles Dickens", 26),
    ("Harry Potter and the Chamber of Secrets", "J.K. Rowling", 100),
];

/// Creates the inventory table when absent and seeds it when empty.
///
/// Returns the number of seeded rows, `0` when the table already had data.
///
/// # Errors
/// - Returns `DbError::UnsupportedSchemaVersion` for databases written by a
///   newer binary.
/// - Returns `DbError::Sqlite` when any statement fails; the seed
///   transaction is rolled back in that case.
pub fn initialize_store(conn: &mut Connection) -> DbResult<usize> {
    apply_migrations(conn)?;

    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))?;
    if existing > 0 {
        debug!(
            "event=store_seed module=db status=skipped existing_rows={}",
            existing
        );
        return Ok(0);
    }

    let tx = conn.transaction()?;
    reserve_ids_below(&tx, SEED_FIRST_ID)?;
    {
        let mut insert =
            tx.prepare("INSERT INTO books (title, author, qty) VALUES (?1, ?2, ?3);")?;
        for (title, author, quantity) in SEED_BOOKS {
            insert.execute(params![title, author, quantity])?;
        }
    }
    tx.commit()?;

    info!(
        "event=store_seed module=db status=ok seeded_rows={}",
        SEED_BOOKS.len()
    );
    Ok(SEED_BOOKS.len())
}

/// Moves the `books` AUTOINCREMENT sequence so the next generated id is at
/// least `next_id`.
fn reserve_ids_below(tx: &Transaction<'_>, next_id: BookId) -> DbResult<()> {
    let floor = next_id - 1;
    let changed = tx.execute(
        "UPDATE sqlite_sequence SET seq = MAX(seq, ?1) WHERE name = 'books';",
        [floor],
    )?;
    if changed == 0 {
        tx.execute(
            "INSERT INTO sqlite_sequence (name, seq) VALUES ('books', ?1);",
            [floor],
        )?;
    }
    Ok(())
}
