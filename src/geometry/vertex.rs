//! Planar points and the axis-aligned rectangles used to seed a mesh.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A point in the plane.
///
/// Two vertices are the same vertex only when their coordinates match exactly;
/// no positional tolerance is applied. `-0.0` and `0.0` compare equal, so they
/// also hash identically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vertex {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Vertex {
    /// Creates a vertex from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Squared Euclidean distance to `other`.
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    // Folds -0.0 onto 0.0 so equal coordinates share one bit pattern.
    fn canonical_bits(&self) -> (u64, u64) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_bits() == other.canonical_bits()
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_bits().hash(state);
    }
}

impl PartialOrd for Vertex {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Lexicographic by `x`, then `y`, using IEEE total ordering.
impl Ord for Vertex {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.x + 0.0)
            .total_cmp(&(other.x + 0.0))
            .then_with(|| (self.y + 0.0).total_cmp(&(other.y + 0.0)))
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Vertex {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Vertex {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned rectangle given by its minimum corner and its extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Minimum corner
    pub origin: Vertex,
    /// Extent along x
    pub width: f64,
    /// Extent along y
    pub height: f64,
}

impl Rectangle {
    /// Creates a rectangle from its minimum corner and extent.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Vertex::new(x, y),
            width,
            height,
        }
    }

    /// Creates the rectangle spanned by two opposite corners.
    #[must_use]
    pub fn from_corners(a: Vertex, b: Vertex) -> Self {
        Self::new(
            a.x.min(b.x),
            a.y.min(b.y),
            (a.x - b.x).abs(),
            (a.y - b.y).abs(),
        )
    }

    /// Corner with the largest coordinates.
    #[must_use]
    pub fn max_corner(&self) -> Vertex {
        Vertex::new(self.origin.x + self.width, self.origin.y + self.height)
    }

    /// Larger of the two extents.
    #[must_use]
    pub fn max_extent(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Boundary-inclusive containment.
    #[must_use]
    pub fn contains(&self, point: &Vertex) -> bool {
        let max = self.max_corner();
        (self.origin.x..=max.x).contains(&point.x) && (self.origin.y..=max.y).contains(&point.y)
    }

    /// Checks that the rectangle can seed a mesh.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if a coordinate is not finite or an
    /// extent is not strictly positive.
    pub fn validate(&self) -> Result<(), String> {
        if !self.origin.is_finite() || !self.width.is_finite() || !self.height.is_finite() {
            return Err(format!("non-finite rectangle {self:?}"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(format!(
                "extent must be positive, got {} x {}",
                self.width, self.height
            ));
        }
        Ok(())
    }
}
