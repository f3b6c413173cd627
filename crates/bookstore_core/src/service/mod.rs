//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the interactive shell decoupled from storage details.

pub mod inventory_service;
