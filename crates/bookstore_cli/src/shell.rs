//! Interactive menus over the inventory service.
//!
//! # Invariants
//! - Malformed numbers abort only the current action; the menu keeps running.
//! - Not-found lookups print a message and never end the session.
//! - End of input ends the session normally.

use crate::error::{ShellError, ShellResult};
use crate::input::{is_confirmation, non_empty, parse_int, parse_optional_int, Prompter};
use crate::table::render_books;
use bookstore_core::{
    Book, BookPatch, BookRepository, CreateOutcome, InventoryService, NewBook, RepoError,
    SearchField,
};
use log::debug;
use std::io::{BufRead, Write};

const INVALID_DATA: &str = "Invalid input. Please enter the correct data type.";
const INVALID_NUMBER: &str = "Invalid input. Please enter a number.";
const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

const ROOT_MENU: &str = "
1. Enter book
2. Update book
3. Delete book
4. Search books
0. Exit";

const SEARCH_MENU: &str = "
Search books by:
1. ID
2. Title
3. Author
4. Display all books
0. Return to main menu";

pub struct Shell<R: BookRepository, I, O> {
    service: InventoryService<R>,
    io: Prompter<I, O>,
}

impl<R, I, O> Shell<R, I, O>
where
    R: BookRepository,
    I: BufRead,
    O: Write,
{
    pub fn new(service: InventoryService<R>, io: Prompter<I, O>) -> Self {
        Self { service, io }
    }

    /// Runs the root menu until the user exits or input ends.
    pub fn run(&mut self) -> ShellResult<()> {
        match self.root_menu() {
            Err(ShellError::InputClosed) => {
                debug!("event=shell_exit module=cli status=ok reason=input_closed");
                Ok(())
            }
            other => other,
        }
    }

    #[cfg(test)]
    pub fn into_prompter(self) -> Prompter<I, O> {
        self.io
    }

    fn root_menu(&mut self) -> ShellResult<()> {
        loop {
            self.io.say(ROOT_MENU)?;
            let Some(choice) = self.read_choice()? else {
                continue;
            };

            match choice {
                0 => return Ok(()),
                1 => self.enter_book()?,
                2 => self.update_book()?,
                3 => self.delete_book()?,
                4 => self.search_menu()?,
                _ => self.io.say(INVALID_CHOICE)?,
            }
        }
    }

    fn search_menu(&mut self) -> ShellResult<()> {
        loop {
            self.io.say(SEARCH_MENU)?;
            let Some(choice) = self.read_choice()? else {
                continue;
            };

            match choice {
                0 => return Ok(()),
                1 => self.search_by_id()?,
                2 => self.search_by_text(SearchField::Title, "Enter the book title: ")?,
                3 => self.search_by_text(SearchField::Author, "Enter the author's name: ")?,
                4 => self.display_all()?,
                _ => self.io.say(INVALID_CHOICE)?,
            }
        }
    }

    fn read_choice(&mut self) -> ShellResult<Option<i64>> {
        let answer = self.io.ask("\nEnter your choice: ")?;
        match parse_int(&answer) {
            Ok(choice) => Ok(Some(choice)),
            Err(_) => {
                self.io.say(INVALID_NUMBER)?;
                Ok(None)
            }
        }
    }

    /// Asks for an integer; prints the data-type message and yields `None` on bad input.
    fn ask_int(&mut self, prompt: &str) -> ShellResult<Option<i64>> {
        let answer = self.io.ask(prompt)?;
        match parse_int(&answer) {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                debug!("event=input_rejected module=cli prompt_kind=integer");
                self.io.say(INVALID_DATA)?;
                Ok(None)
            }
        }
    }

    fn enter_book(&mut self) -> ShellResult<()> {
        let title = self.io.ask("Enter the book title: ")?;
        let author = self.io.ask("Enter the book author: ")?;
        let Some(quantity) = self.ask_int("Enter the quantity: ")? else {
            return Ok(());
        };
        let book = NewBook::new(title, author, quantity);

        let io = &mut self.io;
        let mut prompt_failure = None;
        let outcome = self.service.create_book(&book, |duplicate| {
            match confirm_duplicate(io, &duplicate.title) {
                Ok(confirmed) => confirmed,
                Err(err) => {
                    prompt_failure = Some(err);
                    false
                }
            }
        })?;
        if let Some(err) = prompt_failure {
            return Err(err);
        }

        match outcome {
            CreateOutcome::Created(_) => self.io.say(format_args!(
                "Book '{}' by {} has been added successfully.",
                book.title, book.author
            )),
            CreateOutcome::Cancelled => self.io.say("Book insertion cancelled."),
        }
    }

    fn update_book(&mut self) -> ShellResult<()> {
        let Some(id) = self.ask_int("Enter the book ID to update: ")? else {
            return Ok(());
        };
        let Some(current) = self.service.get_book(id)? else {
            return self.io.say("No book found with the given ID.");
        };

        self.io.say("\nCurrent book information:")?;
        self.show_results(std::slice::from_ref(&current))?;

        let title = self
            .io
            .ask("\nEnter the new book title or leave empty to keep the current title: ")?;
        let author = self
            .io
            .ask("Enter the new author or leave empty to keep the current author: ")?;
        let quantity = self
            .io
            .ask("Enter the new quantity or leave empty to keep the current quantity: ")?;
        let Ok(quantity) = parse_optional_int(&quantity) else {
            debug!("event=input_rejected module=cli prompt_kind=quantity id={id}");
            return self.io.say(INVALID_DATA);
        };

        let patch = BookPatch {
            title: non_empty(title),
            author: non_empty(author),
            quantity,
        };
        match self.service.update_book(id, &patch) {
            Ok(_) => self.io.say(format_args!(
                "Book with ID {id} has been updated successfully."
            )),
            Err(RepoError::NotFound(_)) => self.io.say("No book found with the given ID."),
            Err(err) => Err(err.into()),
        }
    }

    fn delete_book(&mut self) -> ShellResult<()> {
        let Some(id) = self.ask_int("Enter the book ID to delete: ")? else {
            return Ok(());
        };
        self.service.delete_book(id)?;
        self.io.say("Book deleted successfully.")
    }

    fn search_by_id(&mut self) -> ShellResult<()> {
        let Some(id) = self.ask_int("Enter the book ID: ")? else {
            return Ok(());
        };
        match self.service.get_book(id)? {
            Some(book) => self.show_results(&[book]),
            None => self.io.say("No books found with the given ID."),
        }
    }

    fn search_by_text(&mut self, field: SearchField, prompt: &str) -> ShellResult<()> {
        let text = self.io.ask(prompt)?;
        let books = match field {
            SearchField::Title => self.service.search_by_title(&text)?,
            SearchField::Author => self.service.search_by_author(&text)?,
        };

        if books.is_empty() {
            return self.io.say(format_args!(
                "No books found with the given {}.",
                field.column()
            ));
        }
        self.show_results(&books)
    }

    fn display_all(&mut self) -> ShellResult<()> {
        self.io.say("\nFull inventory:")?;
        let books = self.service.list_books()?;
        self.show_results(&books)
    }

    fn show_results(&mut self, books: &[Book]) -> ShellResult<()> {
        self.io.say("\nSearch result:")?;
        let table = render_books(books);
        self.io.say(table.trim_end())
    }
}

fn confirm_duplicate<I: BufRead, O: Write>(
    io: &mut Prompter<I, O>,
    title: &str,
) -> ShellResult<bool> {
    io.say(format_args!(
        "Warning: A book with the title '{title}' already exists in the database."
    ))?;
    let answer = io.ask("Do you want to continue with the insertion? (y/n): ")?;
    Ok(is_confirmation(&answer))
}

#[cfg(test)]
mod tests {
    use super::Shell;
    use crate::input::Prompter;
    use bookstore_core::{open_db_in_memory, BookRepository, InventoryService, SqliteBookRepository};
    use rusqlite::Connection;
    use std::io::Cursor;

    fn run_script(conn: &Connection, script: &str) -> String {
        let repo = SqliteBookRepository::try_new(conn).unwrap();
        let prompter = Prompter::new(Cursor::new(script.to_string()), Vec::new());
        let mut shell = Shell::new(InventoryService::new(repo), prompter);
        shell.run().unwrap();
        String::from_utf8(shell.into_prompter().into_output()).unwrap()
    }

    fn repo(conn: &Connection) -> SqliteBookRepository<'_> {
        SqliteBookRepository::try_new(conn).unwrap()
    }

    #[test]
    fn enter_book_adds_record() {
        let conn = open_db_in_memory().unwrap();
        let output = run_script(&conn, "1\nDune\nFrank Herbert\n5\n0\n");

        assert!(output.contains("Book 'Dune' by Frank Herbert has been added successfully."));
        let stored = repo(&conn).get_book(3011).unwrap().unwrap();
        assert_eq!(stored.title, "Dune");
        assert_eq!(stored.quantity, 5);
    }

    #[test]
    fn enter_book_with_bad_quantity_is_aborted() {
        let conn = open_db_in_memory().unwrap();
        let output = run_script(&conn, "1\nDune\nFrank Herbert\nfive\n0\n");

        assert!(output.contains("Invalid input. Please enter the correct data type."));
        assert_eq!(repo(&conn).count_books().unwrap(), 10);
    }

    #[test]
    fn declined_duplicate_is_cancelled() {
        let conn = open_db_in_memory().unwrap();
        let output = run_script(&conn, "1\nOliver Twist\nCharles Dickens\n3\nn\n0\n");

        assert!(output.contains(
            "Warning: A book with the title 'Oliver Twist' already exists in the database."
        ));
        assert!(output.contains("Book insertion cancelled."));
        assert_eq!(repo(&conn).count_books().unwrap(), 10);
    }

    #[test]
    fn accepted_duplicate_is_inserted() {
        let conn = open_db_in_memory().unwrap();
        run_script(&conn, "1\nOliver Twist\nCharles Dickens\n3\ny\n0\n");

        assert_eq!(repo(&conn).count_books().unwrap(), 11);
    }

    #[test]
    fn update_with_empty_answers_keeps_record() {
        let conn = open_db_in_memory().unwrap();
        let before = repo(&conn).get_book(3003).unwrap().unwrap();

        let output = run_script(&conn, "2\n3003\n\n\n\n0\n");

        assert!(output.contains("Current book information:"));
        assert!(output.contains("The Lion, the Witch and the Wardrobe"));
        assert!(output.contains("Book with ID 3003 has been updated successfully."));
        assert_eq!(repo(&conn).get_book(3003).unwrap().unwrap(), before);
    }

    #[test]
    fn update_with_invalid_quantity_does_not_mutate() {
        let conn = open_db_in_memory().unwrap();
        let before = repo(&conn).get_book(3003).unwrap().unwrap();

        let output = run_script(&conn, "2\n3003\nNew Title\nNew Author\nlots\n0\n");

        assert!(output.contains("Invalid input. Please enter the correct data type."));
        assert!(!output.contains("has been updated successfully"));
        assert_eq!(repo(&conn).get_book(3003).unwrap().unwrap(), before);
    }

    #[test]
    fn update_with_whitespace_quantity_is_rejected() {
        let conn = open_db_in_memory().unwrap();
        let before = repo(&conn).get_book(3002).unwrap().unwrap();

        let output = run_script(&conn, "2\n3002\nRetitled\n\n   \n0\n");

        assert!(output.contains("Invalid input. Please enter the correct data type."));
        assert_eq!(repo(&conn).get_book(3002).unwrap().unwrap(), before);
    }

    #[test]
    fn update_changes_only_answered_fields() {
        let conn = open_db_in_memory().unwrap();
        run_script(&conn, "2\n3008\n\n\n1\n0\n");

        let stored = repo(&conn).get_book(3008).unwrap().unwrap();
        assert_eq!(stored.title, "David Copperfield");
        assert_eq!(stored.quantity, 1);
    }

    #[test]
    fn update_unknown_id_reports_not_found() {
        let conn = open_db_in_memory().unwrap();
        let output = run_script(&conn, "2\n1\n0\n");

        assert!(output.contains("No book found with the given ID."));
    }

    #[test]
    fn delete_removes_record_and_missing_id_is_harmless() {
        let conn = open_db_in_memory().unwrap();
        let output = run_script(&conn, "3\n3001\n3\n77\n3\nabc\n0\n");

        assert_eq!(output.matches("Book deleted successfully.").count(), 2);
        assert!(output.contains("Invalid input. Please enter the correct data type."));
        assert!(repo(&conn).get_book(3001).unwrap().is_none());
        assert_eq!(repo(&conn).count_books().unwrap(), 9);
    }

    #[test]
    fn search_submenu_covers_every_lookup() {
        let conn = open_db_in_memory().unwrap();
        let script = "4\n1\n3004\n1\n99\n2\npotter\n3\nTolstoy\n4\n0\n0\n";
        let output = run_script(&conn, script);

        assert!(output.contains("The Lord of the Rings"));
        assert!(output.contains("No books found with the given ID."));
        assert!(output.contains("Harry Potter and the Chamber of Secrets"));
        assert!(output.contains("No books found with the given author."));
        assert!(output.contains("Full inventory:"));
        assert!(output.contains("│ 3010 │"));
    }

    #[test]
    fn bad_menu_choices_are_reported_and_loop_continues() {
        let conn = open_db_in_memory().unwrap();
        let output = run_script(&conn, "x\n9\n4\nq\n7\n0\n0\n");

        assert_eq!(
            output
                .matches("Invalid input. Please enter a number.")
                .count(),
            2
        );
        assert_eq!(output.matches("Invalid choice. Please try again.").count(), 2);
    }

    #[test]
    fn end_of_input_ends_session_cleanly() {
        let conn = open_db_in_memory().unwrap();
        let output = run_script(&conn, "1\nHalf typed");

        assert!(output.contains("Enter the book author: "));
        assert_eq!(repo(&conn).count_books().unwrap(), 10);
    }
}
