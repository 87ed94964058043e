//! Flutter-facing bridge over `navigator_core`.

pub mod api;
mod config;
