//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for inventory rows.
//! - Isolate SQLite statements from the use-case service.
//!
//! # Invariants
//! - Every write runs in auto-commit mode; no transaction spans two calls.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod book_repo;
