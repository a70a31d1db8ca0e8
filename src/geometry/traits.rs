//! Read-only view of a planar triangulation.
//!
//! Collaborators that only draw or index a mesh depend on this trait rather
//! than on [`crate::DelaunayMesh`] itself.

use crate::geometry::vertex::Vertex;
use crate::mesh::triangle::Face;

/// Read-only triangulation queries
pub trait TriangulationQuery {
    /// Get the number of vertices in the triangulation
    fn vertex_count(&self) -> usize;

    /// Get the number of edges in the triangulation
    fn edge_count(&self) -> usize;

    /// Get the number of faces in the triangulation
    fn face_count(&self) -> usize;

    /// Iterate over all vertices in the triangulation
    fn vertices(&self) -> Box<dyn Iterator<Item = Vertex> + '_>;

    /// Iterate over all faces in the triangulation
    fn faces(&self) -> Box<dyn Iterator<Item = Face> + '_>;

    /// Returns `true` for synthetic vertices that only exist to enclose the
    /// real ones
    fn is_auxiliary(&self, _vertex: &Vertex) -> bool {
        false
    }

    /// Check if the triangulation is structurally valid
    fn is_valid(&self) -> bool;

    /// Calculate the Euler characteristic (V - E + F)
    ///
    /// A triangulated disc without holes yields 1, since the unbounded outer
    /// face is not counted.
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    fn euler_characteristic(&self) -> i32 {
        let v = self.vertex_count() as i32;
        let e = self.edge_count() as i32;
        let f = self.face_count() as i32;
        v - e + f
    }
}

impl TriangulationQuery for crate::DelaunayMesh {
    fn vertex_count(&self) -> usize {
        Self::vertex_count(self)
    }

    fn edge_count(&self) -> usize {
        Self::edge_count(self)
    }

    fn face_count(&self) -> usize {
        self.triangle_count()
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = Vertex> + '_> {
        Box::new(Self::vertices(self).copied())
    }

    fn faces(&self) -> Box<dyn Iterator<Item = Face> + '_> {
        Box::new(self.triangles())
    }

    fn is_auxiliary(&self, vertex: &Vertex) -> bool {
        self.is_super_vertex(vertex)
    }

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
