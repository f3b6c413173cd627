//! Inventory domain model.
//!
//! # Responsibility
//! - Define the book record and the value types used to create, patch and
//!   search it.
//!
//! # Invariants
//! - Every stored book is identified by a store-assigned `BookId`.
//! - Deletion is permanent; there is no tombstone state.

pub mod book;
