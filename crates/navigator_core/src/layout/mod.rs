//! Bullseye layout engine.
//!
//! # Responsibility
//! - Convert domain + score pairs into unit-disk coordinates.
//! - Provide the inverse mapping used by drag adapters.
//!
//! # Invariants
//! - Every function here is pure and keeps no state between calls.
//! - Callers scale unit-disk output to pixels themselves (see `canvas`).

pub mod canvas;
pub mod engine;
pub mod geometry;
