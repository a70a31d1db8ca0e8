//! Circumcircle computation and the in-circle test.
//!
//! The centre is found by intersecting perpendicular bisectors. Horizontal
//! vertex pairs have vertical bisectors with infinite slope, so the formulation
//! branches on which pair (if any) shares a y-coordinate.

use crate::geometry::vertex::Vertex;
use std::fmt;

/// Position of a point relative to a circumcircle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InCircle {
    /// Strictly outside the circle
    OUTSIDE,
    /// On the circle, within the relative tolerance
    BOUNDARY,
    /// Strictly inside the circle
    INSIDE,
}

impl fmt::Display for InCircle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OUTSIDE => write!(f, "OUTSIDE"),
            Self::BOUNDARY => write!(f, "BOUNDARY"),
            Self::INSIDE => write!(f, "INSIDE"),
        }
    }
}

/// Circle through the three vertices of a triangle.
///
/// Only the squared radius is kept so the hot comparison path needs no square
/// root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumcircle {
    /// Vertices the circle was computed from
    pub vertices: [Vertex; 3],
    /// Centre of the circle
    pub center: Vertex,
    /// Squared radius
    pub radius_squared: f64,
}

impl Circumcircle {
    /// Computes the circle through `v1`, `v2` and `v3`.
    ///
    /// Collinear input produces a non-finite centre; see [`Self::is_degenerate`].
    #[must_use]
    pub fn through(v1: Vertex, v2: Vertex, v3: Vertex) -> Self {
        let y1y2 = (v1.y - v2.y).abs();
        let y2y3 = (v2.y - v3.y).abs();

        let (xc, yc) = if y1y2 < f64::EPSILON {
            let m2 = -((v3.x - v2.x) / (v3.y - v2.y));
            let mx2 = (v2.x + v3.x) / 2.0;
            let my2 = (v2.y + v3.y) / 2.0;
            let xc = (v2.x + v1.x) / 2.0;
            (xc, m2.mul_add(xc - mx2, my2))
        } else if y2y3 < f64::EPSILON {
            let m1 = -((v2.x - v1.x) / (v2.y - v1.y));
            let mx1 = (v1.x + v2.x) / 2.0;
            let my1 = (v1.y + v2.y) / 2.0;
            let xc = (v3.x + v2.x) / 2.0;
            (xc, m1.mul_add(xc - mx1, my1))
        } else {
            let m1 = -((v2.x - v1.x) / (v2.y - v1.y));
            let m2 = -((v3.x - v2.x) / (v3.y - v2.y));
            let mx1 = (v1.x + v2.x) / 2.0;
            let mx2 = (v2.x + v3.x) / 2.0;
            let my1 = (v1.y + v2.y) / 2.0;
            let my2 = (v2.y + v3.y) / 2.0;
            let xc = (m1.mul_add(mx1, -(m2 * mx2)) + my2 - my1) / (m1 - m2);

            // Use the bisector whose vertex pair is further apart in y.
            let yc = if y1y2 > y2y3 {
                m1.mul_add(xc - mx1, my1)
            } else {
                m2.mul_add(xc - mx2, my2)
            };
            (xc, yc)
        };

        let center = Vertex::new(xc, yc);
        Self {
            vertices: [v1, v2, v3],
            center,
            radius_squared: v1.distance_squared(&center),
        }
    }

    /// Returns `true` when the vertices were (numerically) collinear and no
    /// finite circle exists.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        !(self.center.is_finite() && self.radius_squared.is_finite())
    }

    /// Classifies `point` against the circle.
    ///
    /// `tolerance` is relative to the squared radius: points whose squared
    /// distance from the centre is within `radius_squared * tolerance` of the
    /// squared radius count as [`InCircle::BOUNDARY`]. A degenerate circle
    /// reports every point as [`InCircle::OUTSIDE`].
    #[must_use]
    pub fn position(&self, point: &Vertex, tolerance: f64) -> InCircle {
        if self.is_degenerate() {
            return InCircle::OUTSIDE;
        }

        let distance_squared = point.distance_squared(&self.center);
        let slack = self.radius_squared * tolerance;
        if distance_squared < self.radius_squared - slack {
            InCircle::INSIDE
        } else if distance_squared > self.radius_squared + slack {
            InCircle::OUTSIDE
        } else {
            InCircle::BOUNDARY
        }
    }

    /// Returns `true` if `point` lies strictly inside the circle.
    #[must_use]
    pub fn contains(&self, point: &Vertex, tolerance: f64) -> bool {
        self.position(point, tolerance) == InCircle::INSIDE
    }
}
