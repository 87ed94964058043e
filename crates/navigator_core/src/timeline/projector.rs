//! Projection of saved entries into chartable trend rows.
//!
//! # Responsibility
//! - Order entries chronologically and collect every label ever used.
//! - Emit one row per entry with per-label scores for line charts.
//!
//! # Invariants
//! - Entries are stably sorted ascending by timestamp; ties keep input order.
//! - `labels` lists distinct labels in first-seen order over the sorted history.
//! - A label missing from an entry is absent from its row, never zero.
//! - When one entry uses a label twice (different domains), the later point wins.

use crate::model::domain::Domain;
use crate::model::entry::{Entry, EntryId};
use crate::model::score::Score;
use crate::stats::summary::rounded_mean;
use chrono::DateTime;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// One chart row per saved entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineRow {
    pub entry_id: EntryId,
    pub timestamp_ms: i64,
    /// Short display date, e.g. `Feb 13`.
    pub date: String,
    /// Label to score, serialized under its own `scores` key.
    scores: BTreeMap<String, Score>,
}

impl TimelineRow {
    /// Score recorded for `label` in this entry, if the label was used.
    pub fn score(&self, label: &str) -> Option<Score> {
        self.scores.get(label).copied()
    }

    pub fn scores(&self) -> &BTreeMap<String, Score> {
        &self.scores
    }
}

/// Trend series over the whole history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timeline {
    pub labels: Vec<String>,
    pub rows: Vec<TimelineRow>,
}

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DomainAverage {
    pub domain: Domain,
    /// `None` when the entry has no points in this domain.
    pub average: Option<f64>,
}

/// Per-domain averages of one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainTrendRow {
    pub entry_id: EntryId,
    pub timestamp_ms: i64,
    pub date: String,
    pub averages: Vec<DomainAverage>,
}

impl DomainTrendRow {
    pub fn average_for(&self, domain: Domain) -> Option<f64> {
        self.averages
            .iter()
            .find(|item| item.domain == domain)
            .and_then(|item| item.average)
    }
}

/// Projects entries into per-label trend rows.
pub fn project(entries: &[Entry]) -> Timeline {
    let sorted = chronological(entries);

    let mut seen = HashSet::new();
    let mut labels = Vec::new();
    for entry in &sorted {
        for point in entry.value_points() {
            if seen.insert(point.label.as_str()) {
                labels.push(point.label.clone());
            }
        }
    }

    let rows = sorted
        .iter()
        .map(|entry| TimelineRow {
            entry_id: entry.id(),
            timestamp_ms: entry.timestamp_ms(),
            date: date_label(entry.timestamp_ms()),
            scores: entry
                .value_points()
                .iter()
                .map(|point| (point.label.clone(), point.score))
                .collect(),
        })
        .collect();

    Timeline { labels, rows }
}

/// Projects entries into per-domain average rows.
pub fn project_domain_averages(entries: &[Entry]) -> Vec<DomainTrendRow> {
    chronological(entries)
        .into_iter()
        .map(|entry| {
            let averages = Domain::ALL
                .into_iter()
                .map(|domain| {
                    let (sum, count) = entry
                        .points_in(domain)
                        .fold((0u64, 0usize), |(sum, count), point| {
                            (sum + u64::from(point.score.value()), count + 1)
                        });
                    DomainAverage {
                        domain,
                        average: (count > 0).then(|| rounded_mean(sum, count)),
                    }
                })
                .collect();
            DomainTrendRow {
                entry_id: entry.id(),
                timestamp_ms: entry.timestamp_ms(),
                date: date_label(entry.timestamp_ms()),
                averages,
            }
        })
        .collect()
}

fn chronological(entries: &[Entry]) -> Vec<&Entry> {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    // `sort_by_key` is stable, so equal timestamps keep input order.
    sorted.sort_by_key(|entry| entry.timestamp_ms());
    sorted
}

/// Formats epoch milliseconds as a short UTC date such as `Feb 13`.
///
/// Timestamps outside chrono's range fall back to the raw number.
pub fn date_label(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|value| value.format("%b %-d").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}
