//! Error types for the triangulation engine.
//!
//! Two classes of failure exist. Caller errors ([`MeshError::InvalidConfiguration`],
//! [`MeshError::InvalidBoundingArea`], [`MeshError::AlreadySeeded`],
//! [`MeshError::Poisoned`]) leave the mesh untouched.
//! Invariant violations indicate a bookkeeping bug inside the engine; once one is
//! reported the mesh refuses further insertions until it is reset.
//!
//! Ordinary no-op insertions (duplicates, points outside the mesh) are not errors
//! at all and are reported as `Ok(None)` by [`crate::DelaunayMesh::insert`].

use crate::geometry::vertex::Vertex;

/// Main error type for mesh operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// The seeding rectangle is empty or has non-finite coordinates
    #[error("Invalid bounding area: {0}")]
    InvalidBoundingArea(String),

    /// A run configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// `seed` was called on a mesh that already has a super-triangle
    #[error("Mesh is already seeded; call reset() before seeding again")]
    AlreadySeeded,

    /// A previous invariant violation left the mesh in an unknown state
    #[error("Mesh is poisoned by an earlier invariant violation; call reset()")]
    Poisoned,

    /// An edge was built from fewer than two distinct vertices
    #[error("Degenerate edge: both endpoints are {0}")]
    DegenerateEdge(Vertex),

    /// A triangle was assembled from the wrong number of edges or vertices
    #[error("Malformed triangle: expected 3 edges and 3 vertices, found {edges} edges and {vertices} vertices")]
    MalformedTriangle {
        /// Number of distinct edges supplied
        edges: usize,
        /// Number of distinct vertices spanned by those edges
        vertices: usize,
    },

    /// An edge was asked to hold a third adjacent triangle
    #[error("Edge {a} - {b} already has two adjacent triangles")]
    EdgeOverflow {
        /// First endpoint
        a: Vertex,
        /// Second endpoint
        b: Vertex,
    },

    /// A flip was attempted across an edge with nothing on the other side
    #[error("No opposite triangle across edge {a} - {b}")]
    MissingOppositeTriangle {
        /// First endpoint
        a: Vertex,
        /// Second endpoint
        b: Vertex,
    },

    /// A key handed around inside the engine no longer resolves
    #[error("Stale {0} handle")]
    StaleHandle(&'static str),

    /// Edge and triangle records disagree about which triangles share an edge
    #[error("Inconsistent adjacency: {0}")]
    InconsistentAdjacency(String),

    /// Vertices were found inside circumcircles of a finished mesh
    #[error("Mesh is not Delaunay: {0} vertices lie inside circumcircles")]
    NotDelaunay(usize),

    /// The flip loop exceeded its budget without reaching a legal mesh
    #[error("Legalization did not converge after {flips} flips while inserting {point}")]
    LegalizationDiverged {
        /// The point being inserted
        point: Vertex,
        /// Number of flips performed before giving up
        flips: usize,
    },
}

impl MeshError {
    /// Returns `true` for errors caused by broken mesh bookkeeping rather than by
    /// the caller's input.
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        !matches!(
            self,
            Self::InvalidConfiguration(_)
                | Self::InvalidBoundingArea(_)
                | Self::AlreadySeeded
                | Self::Poisoned
        )
    }
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_classification() {
        assert!(!MeshError::AlreadySeeded.is_invariant_violation());
        assert!(!MeshError::Poisoned.is_invariant_violation());
        assert!(!MeshError::InvalidBoundingArea("empty".to_string()).is_invariant_violation());
        assert!(!MeshError::InvalidConfiguration("scale".to_string()).is_invariant_violation());
        assert!(MeshError::NotDelaunay(1).is_invariant_violation());

        assert!(
            MeshError::MalformedTriangle {
                edges: 2,
                vertices: 3
            }
            .is_invariant_violation()
        );
        assert!(MeshError::StaleHandle("edge").is_invariant_violation());
        assert!(
            MeshError::EdgeOverflow {
                a: Vertex::new(0.0, 0.0),
                b: Vertex::new(1.0, 0.0),
            }
            .is_invariant_violation()
        );
    }

    #[test]
    fn test_error_messages() {
        let err = MeshError::MalformedTriangle {
            edges: 4,
            vertices: 3,
        };
        assert_eq!(
            err.to_string(),
            "Malformed triangle: expected 3 edges and 3 vertices, found 4 edges and 3 vertices"
        );

        let err = MeshError::MissingOppositeTriangle {
            a: Vertex::new(0.0, 0.0),
            b: Vertex::new(1.0, 2.5),
        };
        assert_eq!(
            err.to_string(),
            "No opposite triangle across edge (0, 0) - (1, 2.5)"
        );
    }
}
