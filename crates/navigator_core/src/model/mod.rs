//! Domain model for value self-assessment.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep score semantics and domain metadata in one place.
//!
//! # Invariants
//! - Every value point and entry is identified by a stable UUID.
//! - Scores are validated at construction; nothing downstream re-checks them.

pub mod domain;
pub mod entry;
pub mod score;
pub mod value_point;
