//! High-level triangulation operations.
//!
//! These work on anything implementing [`TriangulationQuery`] and are mostly
//! used to check a mesh from the outside, in tests and in the `--validate`
//! mode of the binary.

use super::traits::TriangulationQuery;
use crate::geometry::vertex::Vertex;
use crate::mesh::triangle::Face;

/// A vertex found strictly inside the circumcircle of a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelaunayViolation {
    /// Face whose circumcircle is not empty
    pub face: Face,
    /// Vertex lying inside it
    pub vertex: Vertex,
}

/// Common utility operations for triangulations
pub trait TriangulationOps: TriangulationQuery {
    /// Lists every face/vertex pair breaking the empty-circumcircle property.
    ///
    /// Faces touching an auxiliary vertex are skipped and auxiliary vertices
    /// are never tested, so only the triangulation of the real vertices is
    /// judged. This is a brute-force check over all pairs.
    fn delaunay_violations(&self, tolerance: f64) -> Vec<DelaunayViolation> {
        let real: Vec<Vertex> = self
            .vertices()
            .filter(|v| !self.is_auxiliary(v))
            .collect();
        let faces = self
            .faces()
            .filter(|face| !face.vertices().iter().any(|v| self.is_auxiliary(v)));
        violations_among(faces, &real, tolerance)
    }

    /// Like [`Self::delaunay_violations`], but over every face and every
    /// vertex, auxiliary ones included.
    fn full_delaunay_violations(&self, tolerance: f64) -> Vec<DelaunayViolation> {
        let vertices: Vec<Vertex> = self.vertices().collect();
        violations_among(self.faces(), &vertices, tolerance)
    }

    /// Check if the triangulation of the real vertices is Delaunay
    fn is_delaunay(&self, tolerance: f64) -> bool {
        self.delaunay_violations(tolerance).is_empty()
    }

    /// Check if the whole triangulation, auxiliary faces included, is Delaunay
    fn is_fully_delaunay(&self, tolerance: f64) -> bool {
        self.full_delaunay_violations(tolerance).is_empty()
    }

    /// Find the first face containing `point`, boundary inclusive
    fn hit_test(&self, point: &Vertex) -> Option<Face> {
        self.faces().find(|face| face.contains(point))
    }
}

// Blanket implementation for all types that implement TriangulationQuery
impl<T: TriangulationQuery> TriangulationOps for T {}

fn violations_among(
    faces: impl Iterator<Item = Face>,
    vertices: &[Vertex],
    tolerance: f64,
) -> Vec<DelaunayViolation> {
    faces
        .flat_map(|face| {
            let circle = face.circumcircle();
            vertices
                .iter()
                .filter(move |v| !face.has_vertex(v) && circle.contains(v, tolerance))
                .map(move |&vertex| DelaunayViolation { face, vertex })
        })
        .collect()
}
