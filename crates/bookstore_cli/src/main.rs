//! Interactive bookstore inventory manager.
//!
//! # Responsibility
//! - Own the session: configuration, logging, one database connection.
//! - Guarantee the connection is released and unfinished work rolled back
//!   on every exit path.

mod config;
mod error;
mod input;
mod shell;
mod table;

use crate::config::AppConfig;
use crate::error::ShellResult;
use crate::input::Prompter;
use crate::shell::Shell;
use bookstore_core::{
    close_db, init_logging, open_db, rollback_pending, InventoryService, SqliteBookRepository,
};
use log::{error, info};
use rusqlite::Connection;
use std::io::{BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let result = run();
    let status = finish(&result, &mut std::io::stdout(), &mut std::io::stderr());
    ExitCode::from(status)
}

fn run() -> ShellResult<()> {
    let config = AppConfig::from_working_dir()?;
    if let Err(err) = init_logging(&config.log_settings) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let conn = open_db(&config.db_path)?;
    run_session(&conn, std::io::stdin().lock(), std::io::stdout().lock())?;
    close_db(conn)?;
    info!("event=session_end module=cli status=ok");
    Ok(())
}

/// Runs the shell over `conn`; on failure, rolls back pending work before
/// returning the error.
fn run_session<I: BufRead, O: Write>(conn: &Connection, input: I, output: O) -> ShellResult<()> {
    let outcome = SqliteBookRepository::try_new(conn)
        .map_err(Into::into)
        .and_then(|repo| {
            Shell::new(InventoryService::new(repo), Prompter::new(input, output)).run()
        });

    if let Err(err) = &outcome {
        error!("event=session_end module=cli status=error error={err}");
        if let Err(rollback_err) = rollback_pending(conn) {
            error!("event=db_rollback module=cli status=error error={rollback_err}");
        }
    }
    outcome
}

/// Prints the farewell, reports any error and returns the process exit status.
fn finish(result: &ShellResult<()>, out: &mut impl Write, err_out: &mut impl Write) -> u8 {
    // Output failures here have nowhere left to be reported.
    let _ = writeln!(out, "Goodbye!");
    match result {
        Ok(()) => 0,
        Err(err) => {
            let _ = writeln!(err_out, "error: {err}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{finish, run_session};
    use crate::error::ShellError;
    use bookstore_core::{open_db_in_memory, BookRepository, SqliteBookRepository};
    use std::io::{self, Cursor, Write};

    struct BrokenTerminal;

    impl Write for BrokenTerminal {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_session_rolls_back_then_says_goodbye_with_failure_status() {
        let conn = open_db_in_memory().unwrap();
        conn.execute_batch(
            "BEGIN;
             INSERT INTO books (title, author, qty) VALUES ('Draft', 'Nobody', 1);",
        )
        .unwrap();

        let result = run_session(&conn, Cursor::new("1\n"), BrokenTerminal);

        assert!(matches!(result, Err(ShellError::Io(_))));
        assert!(conn.is_autocommit());
        let repo = SqliteBookRepository::try_new(&conn).unwrap();
        assert_eq!(repo.count_books().unwrap(), 10);

        let mut out = Vec::new();
        let mut err_out = Vec::new();
        assert_eq!(finish(&result, &mut out, &mut err_out), 1);
        assert_eq!(String::from_utf8(out).unwrap(), "Goodbye!\n");
        assert!(String::from_utf8(err_out)
            .unwrap()
            .contains("terminal i/o failed"));
    }

    #[test]
    fn clean_session_keeps_data_and_exits_successfully() {
        let conn = open_db_in_memory().unwrap();

        let result = run_session(&conn, Cursor::new("1\nDune\nFrank Herbert\n5\n0\n"), Vec::new());

        assert!(result.is_ok());
        let repo = SqliteBookRepository::try_new(&conn).unwrap();
        assert_eq!(repo.count_books().unwrap(), 11);

        let mut out = Vec::new();
        let mut err_out = Vec::new();
        assert_eq!(finish(&result, &mut out, &mut err_out), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "Goodbye!\n");
        assert!(err_out.is_empty());
    }
}
