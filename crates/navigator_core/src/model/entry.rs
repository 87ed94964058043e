//! Saved sessions and the mutable draft they are frozen from.
//!
//! # Responsibility
//! - Define the immutable `Entry` snapshot persisted after a session.
//! - Define the `Draft` owned by the drafting surface while scoring.
//!
//! # Invariants
//! - An `Entry` exposes no mutating accessors; its points are frozen.
//! - A `Draft` holds at most one point per `(domain, label)` pair.
//! - Freezing an empty draft is rejected.

use crate::model::domain::Domain;
use crate::model::score::Score;
use crate::model::value_point::{ValuePoint, ValuePointError, ValuePointId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one saved entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One immutable, timestamped snapshot of all points rated in one sitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    id: EntryId,
    /// Unix epoch milliseconds.
    #[serde(rename = "timestamp")]
    timestamp_ms: i64,
    value_points: Vec<ValuePoint>,
}

impl Entry {
    /// Rebuilds an entry from already-validated parts (storage read path).
    pub fn from_parts(id: EntryId, timestamp_ms: i64, value_points: Vec<ValuePoint>) -> Self {
        Self {
            id,
            timestamp_ms,
            value_points,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    pub fn value_points(&self) -> &[ValuePoint] {
        &self.value_points
    }

    /// Points belonging to one domain, in saved order.
    pub fn points_in(&self, domain: Domain) -> impl Iterator<Item = &ValuePoint> {
        self.value_points
            .iter()
            .filter(move |point| point.domain == domain)
    }

    /// Validates entry-level invariants before persistence.
    ///
    /// # Errors
    /// - `EntryValidationError::NoValuePoints` for an empty snapshot.
    /// - `EntryValidationError::DuplicatePointId` when two points share an id.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.value_points.is_empty() {
            return Err(EntryValidationError::NoValuePoints);
        }
        let mut seen = HashSet::with_capacity(self.value_points.len());
        for point in &self.value_points {
            if !seen.insert(point.id) {
                return Err(EntryValidationError::DuplicatePointId(point.id));
            }
        }
        Ok(())
    }
}

/// Entry-level invariant violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    NoValuePoints,
    DuplicatePointId(ValuePointId),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoValuePoints => write!(f, "entry must contain at least one value point"),
            Self::DuplicatePointId(id) => write!(f, "entry contains value point {id} twice"),
        }
    }
}

impl Error for EntryValidationError {}

/// Errors raised by draft editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Nothing to save.
    EmptyDraft,
    PointNotFound(ValuePointId),
    InvalidPoint(ValuePointError),
    /// Two supplied points share one id.
    DuplicatePointId(ValuePointId),
    /// Two supplied points name the same value in one domain.
    DuplicateValue { domain: Domain, label: String },
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDraft => write!(f, "cannot save a session without value points"),
            Self::PointNotFound(id) => write!(f, "value point not found in draft: {id}"),
            Self::InvalidPoint(err) => write!(f, "{err}"),
            Self::DuplicatePointId(id) => write!(f, "value point {id} supplied more than once"),
            Self::DuplicateValue { domain, label } => {
                write!(f, "value `{label}` supplied twice in {domain}")
            }
        }
    }
}

impl Error for DraftError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPoint(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValuePointError> for DraftError {
    fn from(value: ValuePointError) -> Self {
        Self::InvalidPoint(value)
    }
}

/// Outcome of toggling a value on the drafting surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The value was selected and has been removed.
    Removed(ValuePoint),
    /// The value is not selected yet; the caller must ask for a score and
    /// then call [`Draft::add`].
    NeedsScore,
}

/// Mutable working set of value points before a session is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    points: Vec<ValuePoint>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a draft from the points of an earlier entry, with fresh ids.
    pub fn seeded_from(entry: &Entry) -> Self {
        let points = entry
            .value_points()
            .iter()
            .map(|point| ValuePoint {
                id: ValuePointId::new(),
                ..point.clone()
            })
            .collect();
        Self { points }
    }

    /// Rebuilds a draft from points held by the drafting surface, keeping
    /// their ids and order.
    ///
    /// # Errors
    /// - `DraftError::DuplicatePointId` when two points share an id.
    /// - `DraftError::DuplicateValue` when two points repeat a `(domain, label)`.
    pub fn from_points(points: Vec<ValuePoint>) -> Result<Self, DraftError> {
        let mut ids = HashSet::with_capacity(points.len());
        let mut values = HashSet::with_capacity(points.len());
        for point in &points {
            if !ids.insert(point.id) {
                return Err(DraftError::DuplicatePointId(point.id));
            }
            if !values.insert((point.domain, point.label.as_str())) {
                return Err(DraftError::DuplicateValue {
                    domain: point.domain,
                    label: point.label.clone(),
                });
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[ValuePoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Removes the value when selected, otherwise reports that a score is needed.
    pub fn toggle(&mut self, domain: Domain, label: &str) -> ToggleOutcome {
        match self
            .points
            .iter()
            .position(|point| point.matches(domain, label))
        {
            Some(index) => ToggleOutcome::Removed(self.points.remove(index)),
            None => ToggleOutcome::NeedsScore,
        }
    }

    /// Adds a scored value, replacing the score of an existing same-named value.
    ///
    /// Returns the id of the stored point.
    pub fn add(
        &mut self,
        domain: Domain,
        label: &str,
        score: Score,
    ) -> Result<ValuePointId, DraftError> {
        if let Some(existing) = self
            .points
            .iter_mut()
            .find(|point| point.matches(domain, label))
        {
            existing.score = score;
            return Ok(existing.id);
        }

        let point = ValuePoint::new(label, domain, score)?;
        let id = point.id;
        self.points.push(point);
        Ok(id)
    }

    /// Updates the score of one point, typically on every drag tick.
    pub fn set_score(&mut self, id: ValuePointId, score: Score) -> Result<(), DraftError> {
        let point = self
            .points
            .iter_mut()
            .find(|point| point.id == id)
            .ok_or(DraftError::PointNotFound(id))?;
        point.score = score;
        Ok(())
    }

    pub fn remove(&mut self, id: ValuePointId) -> Result<ValuePoint, DraftError> {
        let index = self
            .points
            .iter()
            .position(|point| point.id == id)
            .ok_or(DraftError::PointNotFound(id))?;
        Ok(self.points.remove(index))
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Freezes the draft into an entry stamped with `timestamp_ms`.
    ///
    /// The draft is left untouched so callers can clear it after the save
    /// has been persisted.
    pub fn freeze(&self, timestamp_ms: i64) -> Result<Entry, DraftError> {
        if self.points.is_empty() {
            return Err(DraftError::EmptyDraft);
        }
        Ok(Entry {
            id: EntryId::new(),
            timestamp_ms,
            value_points: self.points.clone(),
        })
    }
}
