//! Mesh triangles and the owned [`Face`] snapshots handed to callers.

use crate::errors::{MeshError, MeshResult};
use crate::geometry::circle::Circumcircle;
use crate::geometry::predicates::TriangleRegion;
use crate::geometry::vertex::Vertex;
use crate::mesh::edge::{EdgeId, EdgeKey};
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use std::hash::{Hash, Hasher};

new_key_type! {
    /// Stable handle of a triangle in the mesh arena.
    pub struct TriangleKey;
}

/// Opaque caller-assigned value carried by triangles through splits and flips.
pub type Tag = i64;

/// Arena record of a triangle.
///
/// The edge and vertex sets are fixed at construction; only the tag and the
/// active flag change afterwards.
#[derive(Debug, Clone)]
pub struct Triangle {
    edges: [(EdgeKey, EdgeId); 3],
    vertices: [Vertex; 3],
    region: TriangleRegion,
    tag: Tag,
    active: bool,
}

impl Triangle {
    /// Assembles a triangle from its sides.
    ///
    /// Sides with equal [`EdgeId`]s are counted once, so the same edge listed
    /// twice does not make a fourth side.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::MalformedTriangle`] unless the sides amount to
    /// exactly 3 distinct edges spanning exactly 3 distinct vertices.
    pub fn from_edges(sides: &[(EdgeKey, EdgeId)], tag: Tag) -> MeshResult<Self> {
        let mut edges: Vec<(EdgeKey, EdgeId)> = Vec::with_capacity(3);
        let mut vertices: Vec<Vertex> = Vec::with_capacity(3);

        for &(key, id) in sides {
            if edges.iter().any(|(_, existing)| *existing == id) {
                continue;
            }
            edges.push((key, id));
            for endpoint in id.endpoints() {
                if !vertices.contains(&endpoint) {
                    vertices.push(endpoint);
                }
            }
        }

        let malformed = MeshError::MalformedTriangle {
            edges: edges.len(),
            vertices: vertices.len(),
        };
        let edges: [(EdgeKey, EdgeId); 3] = edges.try_into().map_err(|_| malformed.clone())?;
        let vertices: [Vertex; 3] = vertices.try_into().map_err(|_| malformed)?;

        Ok(Self {
            edges,
            vertices,
            region: TriangleRegion::new(vertices),
            tag,
            active: false,
        })
    }

    /// The three sides with their arena keys.
    #[must_use]
    pub const fn edges(&self) -> &[(EdgeKey, EdgeId); 3] {
        &self.edges
    }

    /// The three corners.
    #[must_use]
    pub const fn vertices(&self) -> &[Vertex; 3] {
        &self.vertices
    }

    /// Caller tag.
    #[must_use]
    pub const fn tag(&self) -> Tag {
        self.tag
    }

    pub(crate) const fn set_tag(&mut self, tag: Tag) {
        self.tag = tag;
    }

    /// Returns `true` while the triangle is part of the mesh.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) const fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Boundary-inclusive containment test.
    #[must_use]
    pub fn contains(&self, point: &Vertex) -> bool {
        self.region.contains(point)
    }

    /// Returns `true` if `vertex` is a corner of this triangle.
    #[must_use]
    pub fn has_vertex(&self, vertex: &Vertex) -> bool {
        self.vertices.contains(vertex)
    }

    /// Number of corners shared with `others`.
    #[must_use]
    pub fn shared_vertex_count(&self, others: &[Vertex]) -> usize {
        self.vertices.iter().filter(|v| others.contains(v)).count()
    }

    /// The side not touching `vertex`, or `None` if `vertex` is not a corner.
    #[must_use]
    pub fn opposite_edge(&self, vertex: &Vertex) -> Option<(EdgeKey, EdgeId)> {
        if !self.has_vertex(vertex) {
            return None;
        }
        self.edges.iter().find(|(_, id)| !id.contains(vertex)).copied()
    }

    /// The corner not on `edge`, or `None` if `edge` is not a side.
    #[must_use]
    pub fn opposite_vertex(&self, edge: &EdgeId) -> Option<Vertex> {
        if !self.edges.iter().any(|(_, id)| id == edge) {
            return None;
        }
        self.vertices.iter().find(|v| !edge.contains(v)).copied()
    }

    /// Circle through the three corners.
    #[must_use]
    pub fn circumcircle(&self) -> Circumcircle {
        let [a, b, c] = self.vertices;
        Circumcircle::through(a, b, c)
    }

    /// Owned snapshot for callers.
    #[must_use]
    pub const fn face(&self) -> Face {
        Face::new(self.vertices, self.tag)
    }
}

/// Owned description of a mesh triangle: its corners and its tag.
///
/// Faces compare and hash by their vertex set, regardless of corner order or
/// tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Face {
    vertices: [Vertex; 3],
    tag: Tag,
}

impl Face {
    /// Creates a face from its corners and tag.
    #[must_use]
    pub const fn new(vertices: [Vertex; 3], tag: Tag) -> Self {
        Self { vertices, tag }
    }

    /// The three corners.
    #[must_use]
    pub const fn vertices(&self) -> &[Vertex; 3] {
        &self.vertices
    }

    /// Caller tag.
    #[must_use]
    pub const fn tag(&self) -> Tag {
        self.tag
    }

    /// Corners in ascending order; the canonical identity of the face.
    #[must_use]
    pub fn sorted_vertices(&self) -> [Vertex; 3] {
        let mut sorted = self.vertices;
        sorted.sort();
        sorted
    }

    /// Returns `true` if `vertex` is a corner of this face.
    #[must_use]
    pub fn has_vertex(&self, vertex: &Vertex) -> bool {
        self.vertices.contains(vertex)
    }

    /// Boundary-inclusive hit test.
    #[must_use]
    pub fn contains(&self, point: &Vertex) -> bool {
        TriangleRegion::new(self.vertices).contains(point)
    }

    /// Circle through the three corners.
    #[must_use]
    pub fn circumcircle(&self) -> Circumcircle {
        let [a, b, c] = self.vertices;
        Circumcircle::through(a, b, c)
    }
}

impl PartialEq for Face {
    fn eq(&self, other: &Self) -> bool {
        self.sorted_vertices() == other.sorted_vertices()
    }
}

impl Eq for Face {}

impl Hash for Face {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted_vertices().hash(state);
    }
}
