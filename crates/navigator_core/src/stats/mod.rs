//! Summary statistics consumed by the summary and history views.

pub mod summary;
