//! Bullseye geometry: quadrants, rings and unit-disk positions.
//!
//! # Responsibility
//! - Own the fixed domain-to-quadrant table.
//! - Map scores to radial distances and back.
//!
//! # Invariants
//! - Quadrants are 90 degrees wide and never overlap.
//! - Angles are degrees, clockwise from +x, in screen coordinates (y down).
//! - `radius_for` is strictly increasing in layer, so better scores sit closer
//!   to the center.

use crate::model::domain::Domain;
use crate::model::score::{Layer, Score, LAYER_COUNT};
use serde::Serialize;

/// Outer radius used for plotting, leaving a margin inside the unit disk so
/// markers never clip the boundary.
pub const PLOT_RADIUS: f64 = 0.9;

pub const QUADRANT_SPAN_DEG: f64 = 90.0;

/// Angular inset kept free at both edges of a quadrant when fanning out.
pub const FAN_PADDING_DEG: f64 = 12.0;

/// Point in the unit disk centered at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const CENTER: Position = Position { x: 0.0, y: 0.0 };

    pub fn from_polar(radius: f64, angle_deg: f64) -> Self {
        let radians = angle_deg.to_radians();
        Self {
            x: radius * radians.cos(),
            y: radius * radians.sin(),
        }
    }

    pub fn distance_from_center(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle in `[0, 360)`.
    pub fn angle_deg(&self) -> f64 {
        self.y.atan2(self.x).to_degrees().rem_euclid(360.0)
    }
}

/// Fixed angular region owned by one domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrant {
    start_deg: f64,
}

impl Quadrant {
    /// Relationships bottom-right, Growth bottom-left, Work top-left,
    /// Leisure top-right.
    pub fn for_domain(domain: Domain) -> Self {
        let start_deg = match domain {
            Domain::Relationships => 0.0,
            Domain::PersonalGrowthHealth => 90.0,
            Domain::WorkEducation => 180.0,
            Domain::Leisure => 270.0,
        };
        Self { start_deg }
    }

    pub fn start_deg(&self) -> f64 {
        self.start_deg
    }

    pub fn end_deg(&self) -> f64 {
        self.start_deg + QUADRANT_SPAN_DEG
    }

    pub fn mid_deg(&self) -> f64 {
        self.start_deg + QUADRANT_SPAN_DEG / 2.0
    }

    /// Arc available to fanned-out points.
    pub fn fan_bounds_deg(&self) -> (f64, f64) {
        (
            self.start_deg + FAN_PADDING_DEG,
            self.end_deg() - FAN_PADDING_DEG,
        )
    }

    /// Angle of the `rank`-th of `count` siblings, evenly spread.
    ///
    /// A single sibling sits on the quadrant midpoint.
    pub fn fan_angle_deg(&self, rank: usize, count: usize) -> f64 {
        if count <= 1 {
            return self.mid_deg();
        }
        let (first, last) = self.fan_bounds_deg();
        first + rank as f64 * (last - first) / (count - 1) as f64
    }
}

/// Radial distance of a score: the middle of its ring.
pub fn radius_for(score: Score) -> f64 {
    ring_mid(score.layer())
}

fn ring_mid(layer: Layer) -> f64 {
    PLOT_RADIUS * (f64::from(layer.value()) - 0.5) / f64::from(LAYER_COUNT)
}

/// Outer boundary of the ring for `layer`, used to draw the target.
pub fn ring_boundary(layer: Layer) -> f64 {
    PLOT_RADIUS * f64::from(layer.value()) / f64::from(LAYER_COUNT)
}

/// Score whose ring contains `position`.
///
/// Drag input may land anywhere, so the ring index is clamped explicitly
/// rather than rejected. Non-finite coordinates resolve to the outer ring.
pub fn score_at(position: Position) -> Score {
    let distance = position.distance_from_center();
    if !distance.is_finite() {
        return Score::MIN;
    }
    let ring_width = PLOT_RADIUS / f64::from(LAYER_COUNT);
    let layer = (distance / ring_width).floor() as i64 + 1;
    let layer = layer.clamp(1, i64::from(LAYER_COUNT));
    Score::clamped(i64::from(Score::MAX.value()) + 1 - layer)
}

/// Domain whose quadrant contains `position`. The exact center resolves to
/// the quadrant starting at 0 degrees.
pub fn domain_at(position: Position) -> Domain {
    let angle = position.angle_deg();
    Domain::ALL
        .into_iter()
        .find(|domain| {
            let quadrant = Quadrant::for_domain(*domain);
            angle >= quadrant.start_deg() && angle < quadrant.end_deg()
        })
        .unwrap_or(Domain::Relationships)
}

#[cfg(test)]
mod tests {
    use super::{domain_at, radius_for, ring_boundary, score_at, Position, Quadrant, PLOT_RADIUS};
    use crate::model::domain::Domain;
    use crate::model::score::Score;

    #[test]
    fn best_score_sits_near_center_and_worst_near_edge() {
        let best = radius_for(Score::MAX);
        let worst = radius_for(Score::MIN);
        assert!(best < 0.1, "best radius {best}");
        assert!(worst > 0.8 && worst < PLOT_RADIUS, "worst radius {worst}");
    }

    #[test]
    fn quadrant_midpoints_match_chart_diagonals() {
        assert_eq!(Quadrant::for_domain(Domain::Relationships).mid_deg(), 45.0);
        assert_eq!(
            Quadrant::for_domain(Domain::PersonalGrowthHealth).mid_deg(),
            135.0
        );
        assert_eq!(Quadrant::for_domain(Domain::WorkEducation).mid_deg(), 225.0);
        assert_eq!(Quadrant::for_domain(Domain::Leisure).mid_deg(), 315.0);
    }

    #[test]
    fn score_at_inverts_radius_for() {
        for score in Score::all() {
            let position = Position::from_polar(radius_for(score), 200.0);
            assert_eq!(score_at(position), score);
        }
    }

    #[test]
    fn score_at_clamps_outside_the_target() {
        assert_eq!(score_at(Position { x: 3.0, y: -4.0 }), Score::MIN);
        assert_eq!(score_at(Position::CENTER), Score::MAX);
    }

    #[test]
    fn score_at_maps_non_finite_positions_to_outer_ring() {
        assert_eq!(score_at(Position { x: f64::NAN, y: 0.0 }), Score::MIN);
        assert_eq!(score_at(Position { x: 0.0, y: f64::NEG_INFINITY }), Score::MIN);
    }

    #[test]
    fn domain_at_follows_quadrant_table() {
        for domain in Domain::ALL {
            let mid = Quadrant::for_domain(domain).mid_deg();
            assert_eq!(domain_at(Position::from_polar(0.5, mid)), domain);
        }
    }

    #[test]
    fn outermost_ring_boundary_is_plot_radius() {
        assert!((ring_boundary(Score::MIN.layer()) - PLOT_RADIUS).abs() < 1e-12);
    }
}
