//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the persistence contract for saved entries.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Entry::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod entry_repo;
