//! Error types of the interactive shell.

use bookstore_core::{DbError, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ShellResult<T> = Result<T, ShellError>;

/// Failure that ends the interactive session.
#[derive(Debug)]
pub enum ShellError {
    Io(std::io::Error),
    Db(DbError),
    Repo(RepoError),
    /// Standard input reached end of file.
    InputClosed,
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "terminal i/o failed: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InputClosed => write!(f, "input closed"),
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::InputClosed => None,
        }
    }
}

impl From<std::io::Error> for ShellError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<DbError> for ShellError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for ShellError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Text that was expected to be an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputError {
    pub text: String,
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "expected an integer, got `{}`", self.text)
    }
}

impl Error for InputError {}
