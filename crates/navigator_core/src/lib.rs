//! Core domain logic for Values Navigator.
//! This crate is the single source of truth for scoring, layout and history
//! invariants; UI layers only render what it returns.

pub mod db;
pub mod layout;
pub mod logging;
pub mod model;
pub mod refine;
pub mod repo;
pub mod service;
pub mod stats;
pub mod timeline;

pub use layout::canvas::CanvasFrame;
pub use layout::engine::{layout, Layout, LayoutError, PlacedPoint};
pub use layout::geometry::{
    domain_at, radius_for, ring_boundary, score_at, Position, Quadrant, FAN_PADDING_DEG,
    PLOT_RADIUS, QUADRANT_SPAN_DEG,
};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::domain::{Domain, DomainMetadata};
pub use model::entry::{Draft, DraftError, Entry, EntryId, EntryValidationError, ToggleOutcome};
pub use model::score::{score_to_layer, Layer, Score, ScoreError, LAYER_COUNT, ON_TARGET_THRESHOLD};
pub use model::value_point::{normalize_label, ValuePoint, ValuePointError, ValuePointId};
pub use refine::{refine_or_keep, PassThroughRefiner, RefineError, ValueRefiner};
pub use repo::entry_repo::{
    EntryListQuery, EntryRepository, RepoError, RepoResult, SqliteEntryRepository,
};
pub use service::entry_service::{EntryService, EntryServiceError, ServiceResult};
pub use stats::summary::{
    summarize, summarize_by_domain, DomainCount, DomainSummary, ScoreCount, SessionSummary,
};
pub use timeline::projector::{
    date_label, project, project_domain_averages, DomainAverage, DomainTrendRow, Timeline,
    TimelineRow,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
