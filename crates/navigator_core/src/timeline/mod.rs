//! Trend projections over saved history.
//!
//! # Responsibility
//! - Reshape entry sequences into row/column series for trend charts.
//! - Keep the column set stable across renders of the same history.

pub mod projector;
