//! Planar coordinate type and lane-shape geometry.
//!
//! Network coordinates are projected metres (`x` east, `y` north), so plain
//! Euclidean arithmetic applies.  Angles are radians, counter-clockwise from
//! the positive `x` axis.

use std::fmt;

/// A point in the projected network plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_to(self, other: Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Component-wise closeness check for tests and de-duplication.
    #[inline]
    pub fn almost_same(self, other: Position, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2},{:.2}", self.x, self.y)
    }
}

// ── Polyline ──────────────────────────────────────────────────────────────────

/// An open chain of points describing a lane's centre line.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyline {
    pub points: Vec<Position>,
}

impl Polyline {
    pub fn new(points: Vec<Position>) -> Self {
        Self { points }
    }

    /// Total length in metres.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_to(w[1]))
            .sum()
    }

    /// The segment containing offset `pos` and the offset remaining within it.
    ///
    /// Offsets beyond either end are clamped onto the first/last segment.
    fn segment_at(&self, pos: f64) -> Option<(Position, Position, f64)> {
        let mut seen = 0.0;
        let last = self.points.len().checked_sub(2)?;
        for (i, w) in self.points.windows(2).enumerate() {
            let len = w[0].distance_to(w[1]);
            if pos <= seen + len || i == last {
                return Some((w[0], w[1], (pos - seen).max(0.0)));
            }
            seen += len;
        }
        None
    }

    /// Point at `pos` metres along the line, moved `lateral` metres to the
    /// right of the direction of travel (negative moves left).
    pub fn position_at_offset(&self, pos: f64, lateral: f64) -> Position {
        let Some((a, b, along)) = self.segment_at(pos) else {
            return self.points.first().copied().unwrap_or_default();
        };
        let len = a.distance_to(b);
        if len == 0.0 {
            return a;
        }
        let along = along.min(len);
        let (dx, dy) = ((b.x - a.x) / len, (b.y - a.y) / len);
        // Right-hand normal of (dx, dy) is (dy, -dx).
        Position::new(
            a.x + dx * along + dy * lateral,
            a.y + dy * along - dx * lateral,
        )
    }

    /// Direction of travel at `pos`, in radians.
    pub fn rotation_at_offset(&self, pos: f64) -> f64 {
        match self.segment_at(pos) {
            Some((a, b, _)) => (b.y - a.y).atan2(b.x - a.x),
            None => 0.0,
        }
    }
}
