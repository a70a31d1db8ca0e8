//! Orientation and point-in-triangle predicates.
//!
//! All predicates are evaluated in plain `f64` arithmetic, without exact or
//! adaptive fallbacks.

use crate::geometry::vertex::Vertex;
use std::fmt;

/// Orientation of an ordered vertex triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Clockwise turn
    NEGATIVE,
    /// The three vertices are collinear
    DEGENERATE,
    /// Counter-clockwise turn
    POSITIVE,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NEGATIVE => write!(f, "NEGATIVE"),
            Self::DEGENERATE => write!(f, "DEGENERATE"),
            Self::POSITIVE => write!(f, "POSITIVE"),
        }
    }
}

/// Twice the signed area of the triangle `a`, `b`, `c`.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn orient2d(a: &Vertex, b: &Vertex, c: &Vertex) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Classifies the turn `a` → `b` → `c`.
#[must_use]
pub fn orientation(a: &Vertex, b: &Vertex, c: &Vertex) -> Orientation {
    let det = orient2d(a, b, c);
    if det > 0.0 {
        Orientation::POSITIVE
    } else if det < 0.0 {
        Orientation::NEGATIVE
    } else {
        Orientation::DEGENERATE
    }
}

/// Returns `true` if `point` lies on the closed segment `a`-`b`.
#[must_use]
pub fn on_segment(point: &Vertex, a: &Vertex, b: &Vertex) -> bool {
    orientation(a, b, point) == Orientation::DEGENERATE
        && point.x >= a.x.min(b.x)
        && point.x <= a.x.max(b.x)
        && point.y >= a.y.min(b.y)
        && point.y <= a.y.max(b.y)
}

/// Cached closed region of a triangle, used for point location and hit testing.
///
/// The bounding box rejects most queries before any orientation test runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleRegion {
    corners: [Vertex; 3],
    min: Vertex,
    max: Vertex,
}

impl TriangleRegion {
    /// Builds the region bounded by the three corners.
    #[must_use]
    pub fn new(corners: [Vertex; 3]) -> Self {
        let [a, b, c] = corners;
        Self {
            corners,
            min: Vertex::new(a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y)),
            max: Vertex::new(a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y)),
        }
    }

    /// Boundary-inclusive containment test.
    #[must_use]
    pub fn contains(&self, point: &Vertex) -> bool {
        if point.x < self.min.x || point.x > self.max.x || point.y < self.min.y || point.y > self.max.y
        {
            return false;
        }

        let [a, b, c] = &self.corners;
        let d1 = orient2d(a, b, point);
        let d2 = orient2d(b, c, point);
        let d3 = orient2d(c, a, point);

        let has_negative = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_positive = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_negative && has_positive)
    }

    /// Lower-left corner of the bounding box.
    #[must_use]
    pub const fn min(&self) -> Vertex {
        self.min
    }

    /// Upper-right corner of the bounding box.
    #[must_use]
    pub const fn max(&self) -> Vertex {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle() -> TriangleRegion {
        TriangleRegion::new([
            Vertex::new(0.0, 0.0),
            Vertex::new(4.0, 0.0),
            Vertex::new(0.0, 4.0),
        ])
    }

    #[test]
    fn test_orientation() {
        let a = Vertex::new(0.0, 0.0);
        let b = Vertex::new(1.0, 0.0);
        assert_eq!(orientation(&a, &b, &Vertex::new(0.0, 1.0)), Orientation::POSITIVE);
        assert_eq!(orientation(&a, &b, &Vertex::new(0.0, -1.0)), Orientation::NEGATIVE);
        assert_eq!(orientation(&a, &b, &Vertex::new(7.0, 0.0)), Orientation::DEGENERATE);
        assert_relative_eq!(orient2d(&a, &b, &Vertex::new(0.0, 2.0)), 2.0);
        assert_eq!(Orientation::POSITIVE.to_string(), "POSITIVE");
    }

    #[test]
    fn test_on_segment() {
        let a = Vertex::new(0.0, 0.0);
        let b = Vertex::new(2.0, 2.0);
        assert!(on_segment(&Vertex::new(1.0, 1.0), &a, &b));
        assert!(on_segment(&b, &a, &b));
        assert!(!on_segment(&Vertex::new(3.0, 3.0), &a, &b));
        assert!(!on_segment(&Vertex::new(1.0, 1.5), &a, &b));
    }

    #[test]
    fn test_region_interior_and_exterior() {
        let region = unit_triangle();
        assert!(region.contains(&Vertex::new(1.0, 1.0)));
        assert!(!region.contains(&Vertex::new(3.0, 3.0)));
        assert!(!region.contains(&Vertex::new(-0.5, 1.0)));
        assert!(!region.contains(&Vertex::new(10.0, 10.0)));
    }

    #[test]
    fn test_region_boundary_inclusive() {
        let region = unit_triangle();
        assert!(region.contains(&Vertex::new(0.0, 0.0)));
        assert!(region.contains(&Vertex::new(2.0, 0.0)));
        assert!(region.contains(&Vertex::new(2.0, 2.0)));
        assert!(region.contains(&Vertex::new(0.0, 3.0)));
    }

    #[test]
    fn test_region_orientation_independent() {
        let cw = TriangleRegion::new([
            Vertex::new(0.0, 0.0),
            Vertex::new(0.0, 4.0),
            Vertex::new(4.0, 0.0),
        ]);
        assert!(cw.contains(&Vertex::new(1.0, 1.0)));
        assert!(!cw.contains(&Vertex::new(3.0, 3.0)));
        assert_eq!(cw.min(), Vertex::new(0.0, 0.0));
        assert_eq!(cw.max(), Vertex::new(4.0, 4.0));
    }
}
