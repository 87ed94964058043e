//! Score scale and score-to-layer mapping.
//!
//! # Responsibility
//! - Define the canonical 1..=5 alignment scale (5 = best).
//! - Map scores to display layers counted outward from the bullseye center.
//!
//! # Invariants
//! - A `Score` value is always inside `Score::MIN..=Score::MAX`.
//! - A `Layer` is a pure function of a `Score`; it is never authored directly.
//! - Better scores map to inner (smaller) layers, with no inversions.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Scores at or above this value count as "on target".
pub const ON_TARGET_THRESHOLD: Score = Score(4);

/// Number of concentric rings drawn on the target.
pub const LAYER_COUNT: u8 = 5;

/// Error raised when a raw score lies outside the canonical scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreError {
    InvalidScore(i64),
}

impl Display for ScoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidScore(value) => write!(
                f,
                "score {value} is outside the valid range {}..={}",
                Score::MIN.0,
                Score::MAX.0
            ),
        }
    }
}

impl Error for ScoreError {}

/// Self-rated alignment of one value, 1 (off course) to 5 (fully aligned).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: Score = Score(1);
    pub const MAX: Score = Score(5);

    /// Validates a raw score.
    ///
    /// # Errors
    /// - `ScoreError::InvalidScore` when `raw` lies outside `1..=5`.
    pub fn new(raw: i64) -> Result<Self, ScoreError> {
        if raw < i64::from(Self::MIN.0) || raw > i64::from(Self::MAX.0) {
            return Err(ScoreError::InvalidScore(raw));
        }
        Ok(Self(raw as u8))
    }

    /// Clamps an arbitrary raw value into the scale.
    ///
    /// Only input adapters (drag gestures) should use this; model code must
    /// call [`Score::new`] so caller bugs surface as errors.
    pub fn clamped(raw: i64) -> Self {
        Self(raw.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Display layer for this score.
    pub fn layer(self) -> Layer {
        Layer(Self::MAX.0 + 1 - self.0)
    }

    /// Whether this score meets [`ON_TARGET_THRESHOLD`].
    pub fn is_on_target(self) -> bool {
        self >= ON_TARGET_THRESHOLD
    }

    /// All scores ordered best first (`5, 4, 3, 2, 1`).
    pub fn all() -> impl DoubleEndedIterator<Item = Score> + ExactSizeIterator {
        (Self::MIN.0..=Self::MAX.0).rev().map(Score)
    }
}

impl TryFrom<i64> for Score {
    type Error = ScoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(value: Score) -> Self {
        value.0
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX.0)
    }
}

/// Ring index on the target: 1 is the bullseye, [`LAYER_COUNT`] the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Layer(u8);

impl Layer {
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Maps a raw score to its display layer.
///
/// # Errors
/// - `ScoreError::InvalidScore` when `raw` lies outside the scale. Values are
///   never clamped here.
pub fn score_to_layer(raw: i64) -> Result<Layer, ScoreError> {
    Score::new(raw).map(Score::layer)
}

#[cfg(test)]
mod tests {
    use super::{score_to_layer, Score, ScoreError, LAYER_COUNT};

    #[test]
    fn best_score_is_innermost_layer() {
        assert_eq!(score_to_layer(5).unwrap().value(), 1);
        assert_eq!(score_to_layer(1).unwrap().value(), LAYER_COUNT);
    }

    #[test]
    fn layers_never_invert() {
        let mut previous = None;
        for raw in 1..=5 {
            let layer = score_to_layer(raw).unwrap();
            if let Some(prev) = previous {
                assert!(layer <= prev, "score {raw} mapped outside its predecessor");
            }
            previous = Some(layer);
        }
    }

    #[test]
    fn out_of_range_is_rejected_not_clamped() {
        assert_eq!(score_to_layer(0), Err(ScoreError::InvalidScore(0)));
        assert_eq!(score_to_layer(6), Err(ScoreError::InvalidScore(6)));
        assert_eq!(score_to_layer(-3), Err(ScoreError::InvalidScore(-3)));
    }

    #[test]
    fn clamped_is_explicit() {
        assert_eq!(Score::clamped(11), Score::MAX);
        assert_eq!(Score::clamped(-2), Score::MIN);
        assert_eq!(Score::clamped(3).value(), 3);
    }

    #[test]
    fn all_lists_best_first() {
        let values: Vec<u8> = Score::all().map(Score::value).collect();
        assert_eq!(values, vec![5, 4, 3, 2, 1]);
    }
}
