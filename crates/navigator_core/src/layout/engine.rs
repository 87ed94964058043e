//! Value-point layout on the bullseye target.
//!
//! # Responsibility
//! - Place every value point inside its domain quadrant at its score ring.
//! - Fan out points sharing a domain and score so they never overlap.
//!
//! # Invariants
//! - Pure: the same input slice always yields the same positions.
//! - Siblings are ranked by input order.
//! - Duplicate ids fail the whole call; no partial layout is returned.

use crate::layout::geometry::{radius_for, Position, Quadrant};
use crate::model::domain::Domain;
use crate::model::score::Score;
use crate::model::value_point::{ValuePoint, ValuePointId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Contract violations detected by [`layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    DuplicatePointId(ValuePointId),
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicatePointId(id) => {
                write!(f, "value point id supplied more than once: {id}")
            }
        }
    }
}

impl Error for LayoutError {}

/// Computed placement of one value point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedPoint {
    pub id: ValuePointId,
    pub domain: Domain,
    pub score: Score,
    pub angle_deg: f64,
    pub radius: f64,
    pub position: Position,
}

/// Placements for one layout call, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    placed: Vec<PlacedPoint>,
    index: HashMap<ValuePointId, usize>,
}

impl Layout {
    pub fn get(&self, id: ValuePointId) -> Option<&PlacedPoint> {
        self.index.get(&id).map(|position| &self.placed[*position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedPoint> {
        self.placed.iter()
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn into_points(self) -> Vec<PlacedPoint> {
        self.placed
    }
}

/// Lays out `points` on the unit disk.
///
/// # Errors
/// - `LayoutError::DuplicatePointId` when two points share an id.
pub fn layout(points: &[ValuePoint]) -> Result<Layout, LayoutError> {
    let mut seen = HashSet::with_capacity(points.len());
    for point in points {
        if !seen.insert(point.id) {
            return Err(LayoutError::DuplicatePointId(point.id));
        }
    }

    let mut sibling_counts: HashMap<(Domain, Score), usize> = HashMap::new();
    for point in points {
        *sibling_counts.entry((point.domain, point.score)).or_default() += 1;
    }

    let mut next_rank: HashMap<(Domain, Score), usize> = HashMap::new();
    let mut placed = Vec::with_capacity(points.len());
    let mut index = HashMap::with_capacity(points.len());

    for point in points {
        let key = (point.domain, point.score);
        let rank = next_rank.entry(key).or_default();
        let count = sibling_counts.get(&key).copied().unwrap_or(1);

        let angle_deg = Quadrant::for_domain(point.domain).fan_angle_deg(*rank, count);
        let radius = radius_for(point.score);
        *rank += 1;

        index.insert(point.id, placed.len());
        placed.push(PlacedPoint {
            id: point.id,
            domain: point.domain,
            score: point.score,
            angle_deg,
            radius,
            position: Position::from_polar(radius, angle_deg),
        });
    }

    Ok(Layout { placed, index })
}
