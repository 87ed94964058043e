//! Value point domain model.
//!
//! # Responsibility
//! - Define one user-named value with its domain and self-rated score.
//! - Normalize labels so equal values compare equal across sessions.
//!
//! # Invariants
//! - `id` is stable, non-nil and never reused for another point.
//! - `label` is trimmed, whitespace-collapsed and never empty.
//! - The display layer is derived from `score` on every read; it is not stored.

use crate::model::domain::Domain;
use crate::model::score::{Layer, Score};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Stable identifier of one value point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValuePointId(Uuid);

impl ValuePointId {
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

impl Default for ValuePointId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ValuePointId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for value point construction and decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValuePointError {
    /// Label is empty after normalization.
    EmptyLabel,
    /// Identifier is the nil UUID.
    NilId,
}

impl Display for ValuePointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "value label cannot be empty"),
            Self::NilId => write!(f, "value point id cannot be nil"),
        }
    }
}

impl Error for ValuePointError {}

/// One value and how aligned the user currently feels with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawValuePoint")]
pub struct ValuePoint {
    pub id: ValuePointId,
    pub label: String,
    pub domain: Domain,
    pub score: Score,
}

impl ValuePoint {
    /// Creates a point with a freshly generated id.
    ///
    /// # Errors
    /// - `ValuePointError::EmptyLabel` when `label` is blank.
    pub fn new(
        label: impl AsRef<str>,
        domain: Domain,
        score: Score,
    ) -> Result<Self, ValuePointError> {
        Self::with_id(ValuePointId::new(), label, domain, score)
    }

    /// Creates a point with a caller-provided id, used by storage read paths.
    pub fn with_id(
        id: ValuePointId,
        label: impl AsRef<str>,
        domain: Domain,
        score: Score,
    ) -> Result<Self, ValuePointError> {
        if id.as_uuid().is_nil() {
            return Err(ValuePointError::NilId);
        }
        let label = normalize_label(label.as_ref()).ok_or(ValuePointError::EmptyLabel)?;
        Ok(Self {
            id,
            label,
            domain,
            score,
        })
    }

    /// Display layer, always recomputed from `score`.
    pub fn layer(&self) -> Layer {
        self.score.layer()
    }

    /// Whether this point names the same value as `(domain, label)`.
    pub fn matches(&self, domain: Domain, label: &str) -> bool {
        self.domain == domain && normalize_label(label).as_deref() == Some(self.label.as_str())
    }
}

/// Trims a label and collapses inner whitespace runs to one space.
///
/// Returns `None` when nothing remains.
pub fn normalize_label(value: &str) -> Option<String> {
    let collapsed = WHITESPACE_RE.replace_all(value.trim(), " ");
    if collapsed.is_empty() {
        return None;
    }
    Some(collapsed.into_owned())
}

// Legacy documents may carry a `layer` field; it is ignored and recomputed.
#[derive(Deserialize)]
struct RawValuePoint {
    id: ValuePointId,
    label: String,
    domain: Domain,
    score: Score,
}

impl TryFrom<RawValuePoint> for ValuePoint {
    type Error = ValuePointError;

    fn try_from(raw: RawValuePoint) -> Result<Self, Self::Error> {
        Self::with_id(raw.id, raw.label, raw.domain, raw.score)
    }
}
