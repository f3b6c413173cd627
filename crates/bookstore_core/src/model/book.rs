//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical inventory record.
//! - Provide the patch semantics used by interactive updates.
//!
//! # Invariants
//! - `id` is assigned by the store and never changed by a patch.
//! - Titles are not unique; duplicates are a caller-side confirmation concern.
//! - `quantity` is not range-checked; negative stock is representable.

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a book row.
pub type BookId = i64;

/// One row of the `books` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Stored in the `qty` column.
    pub quantity: i64,
}

/// Field values for a book that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub quantity: i64,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, quantity: i64) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            quantity,
        }
    }

    /// Attaches a store-assigned id.
    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            quantity: self.quantity,
        }
    }
}

/// Partial update for a stored book.
///
/// `None` keeps the current value of that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub quantity: Option<i64>,
}

impl BookPatch {
    /// Returns whether applying this patch would keep every field.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.quantity.is_none()
    }

    /// Merges this patch onto `current`, keeping `current.id`.
    pub fn apply_to(&self, current: &Book) -> Book {
        Book {
            id: current.id,
            title: self
                .title
                .clone()
                .unwrap_or_else(|| current.title.clone()),
            author: self
                .author
                .clone()
                .unwrap_or_else(|| current.author.clone()),
            quantity: self.quantity.unwrap_or(current.quantity),
        }
    }
}

/// Column targeted by a substring search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
}

impl SearchField {
    /// Column name in `books`, also used as the label in messages and logs.
    pub fn column(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
        }
    }
}
