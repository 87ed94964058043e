//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose layout, summary and history functions to Dart via FRB.
//! - Translate core types into flat, string-keyed transfer records.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Errors are reported in response envelopes, never thrown.
//! - Layout and summary calls are pure and safe on every drag tick.

use crate::config;
use log::warn;
use navigator_core::db::open_db;
use navigator_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, layout,
    ping as ping_inner, score_at, summarize_by_domain, CanvasFrame, Domain, Draft, Entry,
    EntryId, EntryService, Score, SqliteEntryRepository, ValuePoint, ValuePointId,
};
use uuid::Uuid;

const HISTORY_DEFAULT_LIMIT: u32 = 50;
const HISTORY_LIMIT_MAX: u32 = 500;

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Value point as exchanged with the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiValuePoint {
    /// UUID string; empty for points not created by core yet.
    pub id: String,
    pub label: String,
    /// Domain display name, e.g. `Work & Education`.
    pub domain: String,
    pub score: i64,
}

/// One placed marker in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct FfiPlacedPoint {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub angle_deg: f64,
    pub layer: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResponse {
    pub ok: bool,
    pub items: Vec<FfiPlacedPoint>,
    pub message: String,
}

/// Computes marker positions for a square canvas of `canvas_size` pixels.
///
/// # FFI contract
/// - Sync, pure, no DB access.
/// - Invalid input (bad id, domain, score or duplicate id) yields `ok=false`
///   and no items.
#[flutter_rust_bridge::frb(sync)]
pub fn layout_points(points: Vec<FfiValuePoint>, canvas_size: f64, inset: f64) -> LayoutResponse {
    let frame = CanvasFrame {
        size: canvas_size,
        inset,
    };
    let result = decode_points(&points).and_then(|decoded| {
        let placed = layout(&decoded).map_err(|err| err.to_string())?;
        Ok(placed
            .iter()
            .map(|point| {
                let (x, y) = frame.project(point.position);
                FfiPlacedPoint {
                    id: point.id.to_string(),
                    x,
                    y,
                    angle_deg: point.angle_deg,
                    layer: point.score.layer().value(),
                }
            })
            .collect::<Vec<_>>())
    });

    match result {
        Ok(items) => LayoutResponse {
            ok: true,
            items,
            message: String::new(),
        },
        Err(message) => LayoutResponse {
            ok: false,
            items: Vec::new(),
            message: format!("layout_points failed: {message}"),
        },
    }
}

/// Maps a drag position in canvas pixels to the score of the ring under it.
///
/// Positions outside the target clamp to the outermost ring.
#[flutter_rust_bridge::frb(sync)]
pub fn score_for_drag(x: f64, y: f64, canvas_size: f64, inset: f64) -> u8 {
    let frame = CanvasFrame {
        size: canvas_size,
        inset,
    };
    score_at(frame.unproject(x, y)).value()
}

/// Summary of one domain group.
#[derive(Debug, Clone, PartialEq)]
pub struct FfiDomainSummary {
    pub domain: String,
    pub total: u32,
    pub on_target: u32,
    pub off_course: u32,
    pub average: f64,
    /// Counts for scores 5, 4, 3, 2, 1.
    pub score_counts: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryResponse {
    pub ok: bool,
    pub domains: Vec<FfiDomainSummary>,
    pub message: String,
}

/// Summarizes a set of points per domain.
#[flutter_rust_bridge::frb(sync)]
pub fn session_summary(points: Vec<FfiValuePoint>) -> SummaryResponse {
    match decode_points(&points) {
        Ok(decoded) => SummaryResponse {
            ok: true,
            domains: summarize_by_domain(&decoded)
                .into_iter()
                .map(|group| FfiDomainSummary {
                    domain: group.domain.name().to_string(),
                    total: group.summary.total as u32,
                    on_target: group.summary.on_target as u32,
                    off_course: group.summary.off_course as u32,
                    average: group.summary.average,
                    score_counts: group
                        .summary
                        .score_counts
                        .iter()
                        .map(|bucket| bucket.count as u32)
                        .collect(),
                })
                .collect(),
            message: String::new(),
        },
        Err(message) => SummaryResponse {
            ok: false,
            domains: Vec::new(),
            message: format!("session_summary failed: {message}"),
        },
    }
}

/// Saved entry as exchanged with the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiEntry {
    pub id: String,
    pub timestamp_ms: i64,
    pub points: Vec<FfiValuePoint>,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    pub ok: bool,
    pub entry_id: Option<String>,
    pub message: String,
}

impl EntryActionResponse {
    fn success(message: impl Into<String>, entry_id: String) -> Self {
        Self {
            ok: true,
            entry_id: Some(entry_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entry_id: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryResponse {
    /// Most recent first.
    pub entries: Vec<FfiEntry>,
    pub message: String,
    pub applied_limit: u32,
}

/// Saves the current draft points as a new entry stamped with the current time.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Supplied point ids are persisted as-is; blank ids get fresh ones.
/// - Empty point lists, repeated ids and repeated values are rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_save(points: Vec<FfiValuePoint>) -> EntryActionResponse {
    let result = decode_points(&points).and_then(|decoded| {
        let draft = Draft::from_points(decoded).map_err(|err| err.to_string())?;
        with_entry_service(|service| service.save_draft(&draft).map_err(|err| err.to_string()))
    });

    match result {
        Ok(entry) => EntryActionResponse::success("Entry saved.", entry.id().to_string()),
        Err(err) => EntryActionResponse::failure(format!("entry_save failed: {err}")),
    }
}

/// Lists saved entries, most recent first.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_history(limit: Option<u32>) -> HistoryResponse {
    let applied_limit = normalize_history_limit(limit);
    match with_entry_service(|service| {
        service
            .history(Some(applied_limit))
            .map_err(|err| err.to_string())
    }) {
        Ok(entries) => HistoryResponse {
            message: format!("Loaded {} entr(ies).", entries.len()),
            entries: entries.iter().map(encode_entry).collect(),
            applied_limit,
        },
        Err(err) => HistoryResponse {
            entries: Vec::new(),
            message: format!("entry_history failed: {err}"),
            applied_limit,
        },
    }
}

/// Deletes a saved entry when `code` matches the configured delete code.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete(entry_id: String, code: String) -> EntryActionResponse {
    let id = match Uuid::parse_str(entry_id.trim()) {
        Ok(uuid) => EntryId::from_uuid(uuid),
        Err(_) => {
            return EntryActionResponse::failure(format!(
                "entry_delete failed: invalid entry id `{entry_id}`"
            ))
        }
    };

    match with_entry_service(|service| {
        service
            .delete_entry(id, code.as_str())
            .map_err(|err| err.to_string())
    }) {
        Ok(()) => EntryActionResponse::success("Entry deleted.", id.to_string()),
        Err(err) => EntryActionResponse::failure(format!("entry_delete failed: {err}")),
    }
}

/// One trend row; `scores[i]` belongs to `labels[i]` and is `None` when the
/// value was not rated in that entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiTimelineRow {
    pub entry_id: String,
    pub date: String,
    pub timestamp_ms: i64,
    pub scores: Vec<Option<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineResponse {
    pub ok: bool,
    pub labels: Vec<String>,
    pub rows: Vec<FfiTimelineRow>,
    pub message: String,
}

/// Trend series over the full history, oldest entry first.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_timeline() -> TimelineResponse {
    match with_entry_service(|service| service.timeline().map_err(|err| err.to_string())) {
        Ok(timeline) => {
            let rows = timeline
                .rows
                .iter()
                .map(|row| FfiTimelineRow {
                    entry_id: row.entry_id.to_string(),
                    date: row.date.clone(),
                    timestamp_ms: row.timestamp_ms,
                    scores: timeline
                        .labels
                        .iter()
                        .map(|label| row.score(label).map(Score::value))
                        .collect(),
                })
                .collect();
            TimelineResponse {
                ok: true,
                labels: timeline.labels,
                rows,
                message: String::new(),
            }
        }
        Err(err) => TimelineResponse {
            ok: false,
            labels: Vec::new(),
            rows: Vec::new(),
            message: format!("entry_timeline failed: {err}"),
        },
    }
}

fn normalize_history_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => HISTORY_DEFAULT_LIMIT,
        Some(value) => value.min(HISTORY_LIMIT_MAX),
    }
}

fn decode_points(points: &[FfiValuePoint]) -> Result<Vec<ValuePoint>, String> {
    points.iter().map(decode_point).collect()
}

fn decode_point(point: &FfiValuePoint) -> Result<ValuePoint, String> {
    let domain = Domain::from_name(point.domain.trim())
        .ok_or_else(|| format!("unknown domain `{}`", point.domain))?;
    let score = Score::new(point.score).map_err(|err| err.to_string())?;
    let id = if point.id.trim().is_empty() {
        ValuePointId::new()
    } else {
        Uuid::parse_str(point.id.trim())
            .map(ValuePointId::from_uuid)
            .map_err(|_| format!("invalid value point id `{}`", point.id))?
    };
    ValuePoint::with_id(id, &point.label, domain, score).map_err(|err| err.to_string())
}

fn encode_entry(entry: &Entry) -> FfiEntry {
    FfiEntry {
        id: entry.id().to_string(),
        timestamp_ms: entry.timestamp_ms(),
        points: entry
            .value_points()
            .iter()
            .map(|point| FfiValuePoint {
                id: point.id.to_string(),
                label: point.label.clone(),
                domain: point.domain.name().to_string(),
                score: i64::from(point.score.value()),
            })
            .collect(),
    }
}

fn with_entry_service<T>(
    f: impl FnOnce(&EntryService<SqliteEntryRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_db(config::db_path()).map_err(|err| {
        warn!("event=ffi_db_open module=ffi status=error error={err}");
        format!("entry DB open failed: {err}")
    })?;
    let repo = SqliteEntryRepository::try_new(&conn).map_err(|err| {
        warn!("event=ffi_repo_init module=ffi status=error error={err}");
        format!("entry repo init failed: {err}")
    })?;
    let service = EntryService::new(repo, config::delete_code());
    f(&service)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, entry_delete, entry_history, entry_save, entry_timeline, init_logging,
        layout_points, ping, score_for_drag, session_summary, FfiValuePoint, HISTORY_LIMIT_MAX,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    fn point(id: &str, label: &str, domain: &str, score: i64) -> FfiValuePoint {
        FfiValuePoint {
            id: id.to_string(),
            label: label.to_string(),
            domain: domain.to_string(),
            score,
        }
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn layout_points_projects_into_canvas() {
        let response = layout_points(
            vec![point("", "Trust", "Relationships", 5)],
            600.0,
            40.0,
        );
        assert!(response.ok, "{}", response.message);
        let placed = &response.items[0];
        // Relationships sits bottom-right in screen coordinates.
        assert!(placed.x > 300.0 && placed.y > 300.0);
        assert_eq!(placed.layer, 1);
    }

    #[test]
    fn layout_points_rejects_duplicate_ids_without_partial_output() {
        let id = "11111111-2222-4333-8444-555555555555";
        let response = layout_points(
            vec![
                point(id, "Trust", "Relationships", 5),
                point(id, "Focus", "Work & Education", 2),
            ],
            600.0,
            40.0,
        );
        assert!(!response.ok);
        assert!(response.items.is_empty());
        assert!(response.message.contains("more than once"));
    }

    #[test]
    fn layout_points_rejects_out_of_range_score() {
        let response = layout_points(vec![point("", "Rest", "Leisure", 9)], 600.0, 40.0);
        assert!(!response.ok);
        assert!(response.message.contains("outside the valid range"));
    }

    #[test]
    fn score_for_drag_reads_ring_under_pointer() {
        assert_eq!(score_for_drag(300.0, 300.0, 600.0, 40.0), 5);
        assert_eq!(score_for_drag(599.0, 300.0, 600.0, 40.0), 1);
    }

    #[test]
    fn session_summary_reports_every_domain() {
        let response = session_summary(vec![
            point("", "Trust", "Relationships", 5),
            point("", "Humor", "Relationships", 2),
        ]);
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.domains.len(), 4);
        let relationships = &response.domains[1];
        assert_eq!(relationships.domain, "Relationships");
        assert_eq!(relationships.total, 2);
        assert_eq!(relationships.on_target, 1);
        assert_eq!(relationships.average, 3.5);
    }

    #[test]
    fn saved_entry_shows_up_in_history_and_timeline() {
        let label = unique_token("ffi-save");
        let saved = entry_save(vec![point("", &label, "Leisure", 4)]);
        assert!(saved.ok, "{}", saved.message);
        let entry_id = saved.entry_id.expect("save should return entry_id");

        let history = entry_history(Some(0));
        assert_eq!(history.applied_limit, 50);
        assert!(history.entries.iter().any(|entry| entry.id == entry_id));

        let timeline = entry_timeline();
        assert!(timeline.ok, "{}", timeline.message);
        let column = timeline
            .labels
            .iter()
            .position(|candidate| candidate == &label)
            .expect("label should be a timeline column");
        let row = timeline
            .rows
            .iter()
            .find(|row| row.entry_id == entry_id)
            .expect("entry should have a timeline row");
        assert_eq!(row.scores[column], Some(4));
    }

    #[test]
    fn entry_save_keeps_supplied_point_ids() {
        let id = "aaaaaaaa-2222-4333-8444-555555555555";
        let saved = entry_save(vec![
            point(id, &unique_token("ffi-keep-id"), "Relationships", 5),
            point("", &unique_token("ffi-fresh-id"), "Leisure", 2),
        ]);
        assert!(saved.ok, "{}", saved.message);
        let entry_id = saved.entry_id.expect("save should return entry_id");

        let history = entry_history(Some(HISTORY_LIMIT_MAX));
        let entry = history
            .entries
            .iter()
            .find(|entry| entry.id == entry_id)
            .expect("saved entry should be listed");
        assert_eq!(entry.points.len(), 2);
        assert_eq!(entry.points[0].id, id);
        assert!(!entry.points[1].id.is_empty());
    }

    #[test]
    fn entry_save_rejects_repeated_point_ids() {
        let id = "bbbbbbbb-2222-4333-8444-555555555555";
        let response = entry_save(vec![
            point(id, &unique_token("ffi-dup-a"), "Relationships", 5),
            point(id, &unique_token("ffi-dup-b"), "Leisure", 1),
        ]);
        assert!(!response.ok);
        assert!(response.entry_id.is_none());
        assert!(response.message.contains("supplied more than once"));
    }

    #[test]
    fn entry_save_rejects_repeated_values() {
        let label = unique_token("ffi-dup-value");
        let response = entry_save(vec![
            point("", &label, "Leisure", 5),
            point("", &label, "Leisure", 1),
        ]);
        assert!(!response.ok);
        assert!(response.message.contains("supplied twice"));
    }

    #[test]
    fn score_for_drag_treats_non_finite_input_as_outer_ring() {
        assert_eq!(score_for_drag(f64::NAN, 300.0, 600.0, 40.0), 1);
        assert_eq!(score_for_drag(f64::INFINITY, 300.0, 600.0, 40.0), 1);
    }

    #[test]
    fn entry_save_rejects_empty_draft() {
        let response = entry_save(Vec::new());
        assert!(!response.ok);
        assert!(response.message.contains("without value points"));
    }

    #[test]
    fn entry_delete_requires_code() {
        let saved = entry_save(vec![point("", &unique_token("ffi-delete"), "Leisure", 3)]);
        let entry_id = saved.entry_id.expect("save should return entry_id");

        let rejected = entry_delete(entry_id.clone(), "0000".to_string());
        assert!(!rejected.ok);
        assert!(rejected.message.contains("delete code rejected"));

        let deleted = entry_delete(entry_id.clone(), "1983".to_string());
        assert!(deleted.ok, "{}", deleted.message);

        let again = entry_delete(entry_id, "1983".to_string());
        assert!(!again.ok);
        assert!(again.message.contains("entry not found"));
    }
}
