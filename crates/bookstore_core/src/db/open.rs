//! Connection lifecycle for the inventory database.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections and bootstrap them.
//! - Close the connection explicitly and roll back unfinished work.
//!
//! # Invariants
//! - Returned connections have migrations applied and seed data present
//!   (unless the table already held rows).
//! - A dropped connection is closed by rusqlite, so error paths release it too.

use super::seed::initialize_store;
use super::DbResult;
use log::{error, info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the inventory database file, creating and seeding it when needed.
///
/// # Side effects
/// - Creates the file when absent.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path.as_ref()))
}

/// Opens an in-memory inventory database with schema and seed data.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

/// Closes the connection, surfacing errors that a plain drop would swallow.
pub fn close_db(conn: Connection) -> DbResult<()> {
    match conn.close() {
        Ok(()) => {
            info!("event=db_close module=db status=ok");
            Ok(())
        }
        Err((_conn, err)) => {
            error!("event=db_close module=db status=error error={}", err);
            Err(err.into())
        }
    }
}

/// Rolls back the open transaction, if any.
///
/// Returns `true` when a rollback was issued. Connections in auto-commit
/// mode have nothing pending and are left untouched.
pub fn rollback_pending(conn: &Connection) -> DbResult<bool> {
    if conn.is_autocommit() {
        return Ok(false);
    }

    conn.execute_batch("ROLLBACK;")?;
    warn!("event=db_rollback module=db status=ok");
    Ok(true)
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match connect() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(seeded) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={} seeded_rows={}",
                mode,
                started_at.elapsed().as_millis(),
                seeded
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<usize> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    initialize_store(conn)
}
