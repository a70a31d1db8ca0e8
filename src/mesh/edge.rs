//! Mesh edges and their triangle adjacency.
//!
//! An edge is identified by its unordered endpoint pair ([`EdgeId`]); the arena
//! record ([`Edge`]) additionally tracks the at most two triangles currently
//! using it as a side.

use crate::errors::{MeshError, MeshResult};
use crate::geometry::vertex::Vertex;
use crate::mesh::triangle::TriangleKey;
use slotmap::new_key_type;

new_key_type! {
    /// Stable handle of an edge in the mesh arena.
    pub struct EdgeKey;
}

/// Canonical, orientation-free identity of an edge.
///
/// `EdgeId::new(a, b) == EdgeId::new(b, a)`; the endpoints are stored in
/// ascending [`Vertex`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    a: Vertex,
    b: Vertex,
}

impl EdgeId {
    /// Creates the identity of the edge between `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::DegenerateEdge`] if `a` and `b` are the same vertex.
    pub fn new(a: Vertex, b: Vertex) -> MeshResult<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Ok(Self { a, b }),
            std::cmp::Ordering::Greater => Ok(Self { a: b, b: a }),
            std::cmp::Ordering::Equal => Err(MeshError::DegenerateEdge(a)),
        }
    }

    /// Both endpoints in canonical order.
    #[must_use]
    pub const fn endpoints(&self) -> [Vertex; 2] {
        [self.a, self.b]
    }

    /// Returns `true` if `vertex` is one of the endpoints.
    #[must_use]
    pub fn contains(&self, vertex: &Vertex) -> bool {
        self.a == *vertex || self.b == *vertex
    }

    /// Number of endpoints shared with `other` (0, 1 or 2).
    #[must_use]
    pub fn shared_vertex_count(&self, other: &Self) -> usize {
        other.endpoints().iter().filter(|v| self.contains(v)).count()
    }
}

/// Arena record of an edge.
#[derive(Debug, Clone)]
pub struct Edge {
    id: EdgeId,
    triangles: [Option<TriangleKey>; 2],
}

impl Edge {
    /// Creates an edge with no adjacent triangles.
    #[must_use]
    pub const fn new(id: EdgeId) -> Self {
        Self {
            id,
            triangles: [None, None],
        }
    }

    /// Identity of this edge.
    #[must_use]
    pub const fn id(&self) -> EdgeId {
        self.id
    }

    /// Triangles currently registered on this edge.
    pub fn triangles(&self) -> impl Iterator<Item = TriangleKey> + '_ {
        self.triangles.iter().flatten().copied()
    }

    /// Number of adjacent triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.iter().flatten().count()
    }

    /// An edge without adjacent triangles is no longer part of the mesh.
    #[must_use]
    pub fn is_retired(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Registers `triangle` as adjacent. Registering twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::EdgeOverflow`] if two other triangles are already
    /// registered.
    pub fn attach(&mut self, triangle: TriangleKey) -> MeshResult<()> {
        if self.triangles.contains(&Some(triangle)) {
            return Ok(());
        }
        match self.triangles.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(triangle);
                Ok(())
            }
            None => {
                let [a, b] = self.id.endpoints();
                Err(MeshError::EdgeOverflow { a, b })
            }
        }
    }

    /// Unregisters `triangle`. Returns `false` if it was not registered.
    pub fn detach(&mut self, triangle: TriangleKey) -> bool {
        self.triangles
            .iter_mut()
            .find(|slot| **slot == Some(triangle))
            .map(Option::take)
            .is_some()
    }

    /// The triangle on the other side of this edge from `triangle`.
    ///
    /// `triangle` itself need not be registered; this is how a deactivated
    /// candidate finds its neighbour.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::EdgeOverflow`] if two triangles other than
    /// `triangle` are registered, which leaves the neighbour ambiguous.
    pub fn opposite(&self, triangle: TriangleKey) -> MeshResult<Option<TriangleKey>> {
        let mut others = self.triangles().filter(|&t| t != triangle);
        let first = others.next();
        if others.next().is_some() {
            let [a, b] = self.id.endpoints();
            return Err(MeshError::EdgeOverflow { a, b });
        }
        Ok(first)
    }
}
