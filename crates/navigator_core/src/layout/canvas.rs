//! Projection between the unit disk and a square pixel canvas.

use crate::layout::geometry::Position;

/// Square drawing surface with a fixed inset around the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasFrame {
    pub size: f64,
    pub inset: f64,
}

impl Default for CanvasFrame {
    fn default() -> Self {
        Self {
            size: 600.0,
            inset: 40.0,
        }
    }
}

impl CanvasFrame {
    pub fn center(&self) -> f64 {
        self.size / 2.0
    }

    /// Pixel length of one unit-disk radius.
    pub fn scale(&self) -> f64 {
        (self.size / 2.0 - self.inset).max(0.0)
    }

    pub fn project(&self, position: Position) -> (f64, f64) {
        let scale = self.scale();
        (
            self.center() + position.x * scale,
            self.center() + position.y * scale,
        )
    }

    /// Inverse of [`CanvasFrame::project`]. A degenerate frame maps
    /// everything to the center.
    pub fn unproject(&self, x: f64, y: f64) -> Position {
        let scale = self.scale();
        if scale == 0.0 {
            return Position::CENTER;
        }
        Position {
            x: (x - self.center()) / scale,
            y: (y - self.center()) / scale,
        }
    }
}
