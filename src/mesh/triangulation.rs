//! Incremental Delaunay triangulation engine.
//!
//! [`DelaunayMesh`] owns all mesh state. Triangles and edges live in two
//! slotmap arenas and refer to each other by key, so the edge/triangle
//! adjacency cycle never turns into an ownership cycle.
//!
//! Every insertion runs in three steps:
//!
//! 1. **Locate**: linear scan over active triangles for the one containing the
//!    point (boundary inclusive).
//! 2. **Split**: the located triangle is replaced by three triangles fanning out
//!    from the new point.
//! 3. **Legalize**: a FIFO queue of candidate triangles is drained; each one is
//!    accepted if it touches the super-triangle boundary or if the vertex
//!    across its far edge lies outside its circumcircle, otherwise that edge is
//!    flipped and the two new triangles are queued.
//!
//! # Examples
//!
//! ```rust
//! use incremental_delaunay::{DelaunayMesh, Rectangle, Vertex};
//!
//! let mut mesh = DelaunayMesh::new();
//! mesh.seed(Rectangle::new(0.0, 0.0, 10.0, 10.0))?;
//!
//! let delta = mesh.insert(Vertex::new(2.0, 2.0))?.expect("point is inside the mesh");
//! assert_eq!(delta.removed.len(), 1);
//! assert_eq!(delta.added.len(), 3);
//!
//! // Inserting the same point again has no effect.
//! assert!(mesh.insert(Vertex::new(2.0, 2.0))?.is_none());
//! # Ok::<(), incremental_delaunay::MeshError>(())
//! ```

use crate::errors::{MeshError, MeshResult};
use crate::geometry::predicates::{Orientation, on_segment, orientation};
use crate::geometry::vertex::{Rectangle, Vertex};
use crate::mesh::edge::{Edge, EdgeId, EdgeKey};
use crate::mesh::statistics::{InsertionStatistics, SkipReason};
use crate::mesh::triangle::{Face, Tag, Triangle, TriangleKey};
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use std::collections::{HashSet, VecDeque};

/// Default ratio between the super-triangle's reach and the seeded area's
/// larger extent.
pub const DEFAULT_SUPER_TRIANGLE_SCALE: f64 = 3.0;

/// Default relative tolerance of the in-circle test.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

// Flips allowed per insertion on top of four per live triangle.
const BASE_FLIP_BUDGET: usize = 64;

/// Changes produced by one successful insertion.
///
/// Applying the delta to a view means erasing every face in `removed` and
/// drawing every face in `added`. `removed` also lists triangles that were
/// created and flipped out within the same insertion; erasing those is a no-op
/// for a view that never drew them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsertionDelta {
    /// Triangles that left the mesh
    pub removed: Vec<Face>,
    /// Triangles that joined the mesh and are still part of it
    pub added: Vec<Face>,
    /// Edge flips performed during legalization
    pub flips: usize,
}

/// Result of flipping the far edge of a candidate.
struct Flip {
    opposite: TriangleKey,
    retired: [Face; 2],
    created: [TriangleKey; 2],
}

/// Incrementally maintained Delaunay triangulation.
#[derive(Debug, Clone)]
pub struct DelaunayMesh {
    triangles: SlotMap<TriangleKey, Triangle>,
    edges: SlotMap<EdgeKey, Edge>,
    vertices: HashSet<Vertex>,
    super_triangle: Option<Face>,
    tolerance: f64,
    super_triangle_scale: f64,
    poisoned: bool,
    statistics: InsertionStatistics,
}

impl Default for DelaunayMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl DelaunayMesh {
    /// Creates an empty, unseeded mesh.
    #[must_use]
    pub fn new() -> Self {
        Self {
            triangles: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            vertices: HashSet::new(),
            super_triangle: None,
            tolerance: DEFAULT_TOLERANCE,
            super_triangle_scale: DEFAULT_SUPER_TRIANGLE_SCALE,
            poisoned: false,
            statistics: InsertionStatistics::new(),
        }
    }

    /// Sets the relative tolerance of the in-circle test.
    ///
    /// A vertex counts as strictly inside a circumcircle only when its squared
    /// distance from the centre is below `r² · (1 − tolerance)`.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets how far the super-triangle reaches beyond the seeded area, as a
    /// multiple of the area's larger extent. Values must exceed 2 for the area
    /// to be enclosed; see [`crate::TriangulationConfig::validate`].
    #[must_use]
    pub fn with_super_triangle_scale(mut self, scale: f64) -> Self {
        self.super_triangle_scale = scale;
        self
    }

    /// Relative tolerance of the in-circle test.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    // ------------------------------------------------------------------
    // Seeding and reset
    // ------------------------------------------------------------------

    /// Seeds the mesh with a super-triangle enclosing `area`.
    ///
    /// The super-triangle becomes the only active triangle and its corners the
    /// first three vertices. It is returned for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::AlreadySeeded`] if the mesh already has a
    /// super-triangle and [`MeshError::InvalidBoundingArea`] if `area` is
    /// empty or not finite, the configured scale is 2 or less, or the
    /// super-triangle corners overflow or collapse in `f64`.
    pub fn seed(&mut self, area: Rectangle) -> MeshResult<Face> {
        if self.super_triangle.is_some() {
            return Err(MeshError::AlreadySeeded);
        }
        area.validate().map_err(MeshError::InvalidBoundingArea)?;
        if !(self.super_triangle_scale.is_finite() && self.super_triangle_scale > 2.0) {
            return Err(MeshError::InvalidBoundingArea(format!(
                "super-triangle scale {} does not enclose the area",
                self.super_triangle_scale
            )));
        }

        let reach = area.max_extent() * self.super_triangle_scale;
        let Vertex { x, y } = area.origin;
        let a = Vertex::new(x + reach, y);
        let b = Vertex::new(x, y + reach);
        let c = Vertex::new(x - reach, y - reach);
        if ![a, b, c].iter().all(Vertex::is_finite)
            || orientation(&a, &b, &c) == Orientation::DEGENERATE
        {
            return Err(MeshError::InvalidBoundingArea(format!(
                "super-triangle {a}, {b}, {c} for area {area:?} is not representable"
            )));
        }

        let sides = [
            self.create_edge(EdgeId::new(a, b)?),
            self.create_edge(EdgeId::new(b, c)?),
            self.create_edge(EdgeId::new(c, a)?),
        ];
        let key = self.create_triangle(&sides, 0)?;
        self.activate(key)?;

        let face = self.triangle(key)?.face();
        self.super_triangle = Some(face);

        log::info!("Seeded mesh for area {area:?} with super-triangle {a}, {b}, {c}");
        Ok(face)
    }

    /// Returns `true` once [`Self::seed`] has succeeded.
    #[must_use]
    pub const fn is_seeded(&self) -> bool {
        self.super_triangle.is_some()
    }

    /// Clears all state, returning the mesh to its unseeded condition.
    pub fn reset(&mut self) {
        log::info!(
            "Resetting mesh with {} triangles and {} vertices",
            self.triangle_count(),
            self.vertices.len()
        );
        self.triangles.clear();
        self.edges.clear();
        self.vertices.clear();
        self.super_triangle = None;
        self.poisoned = false;
        self.statistics = InsertionStatistics::new();
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// The super-triangle, if the mesh is seeded.
    #[must_use]
    pub const fn super_triangle(&self) -> Option<Face> {
        self.super_triangle
    }

    /// Returns `true` if `vertex` is one of the synthetic super-triangle corners.
    #[must_use]
    pub fn is_super_vertex(&self, vertex: &Vertex) -> bool {
        self.super_triangle
            .is_some_and(|face| face.has_vertex(vertex))
    }

    /// Active triangles.
    pub fn triangles(&self) -> impl Iterator<Item = Face> + '_ {
        self.triangles
            .values()
            .filter(|t| t.is_active())
            .map(Triangle::face)
    }

    /// Every vertex ever inserted, including the super-triangle corners.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.iter()
    }

    /// Returns `true` if `vertex` is a mesh vertex.
    #[must_use]
    pub fn contains_vertex(&self, vertex: &Vertex) -> bool {
        self.vertices.contains(vertex)
    }

    /// Number of active triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.values().filter(|t| t.is_active()).count()
    }

    /// Number of vertices, including the super-triangle corners.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges bordering at least one active triangle.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.values().filter(|e| !e.is_retired()).count()
    }

    /// Counters over all insertions since the last reset.
    #[must_use]
    pub const fn statistics(&self) -> &InsertionStatistics {
        &self.statistics
    }

    /// Returns `true` after an invariant violation, until [`Self::reset`].
    #[must_use]
    pub const fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Finds the active triangle containing `point` (boundary inclusive).
    #[must_use]
    pub fn locate(&self, point: &Vertex) -> Option<Face> {
        self.locate_key(point)
            .and_then(|key| self.triangles.get(key))
            .map(Triangle::face)
    }

    fn locate_key(&self, point: &Vertex) -> Option<TriangleKey> {
        self.triangles
            .iter()
            .find(|(_, t)| t.is_active() && t.contains(point))
            .map(|(key, _)| key)
    }

    /// Assigns `tag` to the active triangle equal to `face`.
    ///
    /// Returns `false` if no active triangle has the same vertex set.
    pub fn set_tag(&mut self, face: &Face, tag: Tag) -> bool {
        match self
            .triangles
            .values_mut()
            .find(|t| t.is_active() && t.face() == *face)
        {
            Some(triangle) => {
                triangle.set_tag(tag);
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Insertion
    // ------------------------------------------------------------------

    /// Inserts `point` and restores the Delaunay property around it.
    ///
    /// Returns `Ok(None)` when the insertion has no effect: the mesh is not
    /// seeded, the point is not finite, it is already a vertex, it lies
    /// outside the mesh, or it lies on the super-triangle outline.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::Poisoned`] if an earlier insertion failed, and an
    /// invariant-violation error if the mesh bookkeeping breaks during this
    /// one. Either way the mesh stays poisoned until [`Self::reset`].
    pub fn insert(&mut self, point: Vertex) -> MeshResult<Option<InsertionDelta>> {
        if self.poisoned {
            return Err(MeshError::Poisoned);
        }
        self.statistics.record_attempt();

        let located = match self.admit(&point) {
            Ok(key) => key,
            Err(reason) => {
                log::debug!("Ignoring insertion of {point}: {reason}");
                self.statistics.record_skip(reason);
                return Ok(None);
            }
        };

        match self.insert_into(located, point) {
            Ok(delta) => {
                self.collect_garbage();
                self.statistics
                    .record_success(delta.added.len(), delta.removed.len(), delta.flips);
                log::debug!(
                    "Inserted {point}: removed {}, added {}, {} flips",
                    delta.removed.len(),
                    delta.added.len(),
                    delta.flips
                );
                Ok(Some(delta))
            }
            Err(err) => {
                self.poisoned = true;
                log::warn!("Mesh poisoned while inserting {point}: {err}");
                Err(err)
            }
        }
    }

    /// Decides whether `point` can be inserted and finds its triangle.
    fn admit(&self, point: &Vertex) -> Result<TriangleKey, SkipReason> {
        let super_face = self.super_triangle.ok_or(SkipReason::Unseeded)?;
        if !point.is_finite() {
            return Err(SkipReason::NonFinite);
        }
        if self.vertices.contains(point) {
            return Err(SkipReason::Duplicate);
        }
        let located = self.locate_key(point).ok_or(SkipReason::OutsideMesh)?;

        let [a, b, c] = *super_face.vertices();
        if on_segment(point, &a, &b) || on_segment(point, &b, &c) || on_segment(point, &c, &a) {
            return Err(SkipReason::OnMeshBoundary);
        }
        Ok(located)
    }

    fn insert_into(&mut self, located: TriangleKey, point: Vertex) -> MeshResult<InsertionDelta> {
        let replaced = self.triangle(located)?.clone();
        self.deactivate(located)?;

        let mut removed = vec![replaced.face()];
        let candidates = self.split(&replaced, point)?;

        let mut accepted = Vec::with_capacity(candidates.len());
        let flips = self.legalize(point, candidates.into(), &mut removed, &mut accepted)?;

        let added = accepted
            .into_iter()
            .filter_map(|key| self.triangles.get(key))
            .filter(|t| t.is_active())
            .map(Triangle::face)
            .collect();

        Ok(InsertionDelta {
            removed,
            added,
            flips,
        })
    }

    /// Replaces `replaced` by three triangles fanning out from `point`.
    fn split(&mut self, replaced: &Triangle, point: Vertex) -> MeshResult<Vec<TriangleKey>> {
        // Every spoke is created once and shared by the two triangles using it.
        let mut spokes: Vec<(EdgeKey, EdgeId)> = Vec::with_capacity(3);
        for (_, side) in replaced.edges() {
            for endpoint in side.endpoints() {
                let id = EdgeId::new(point, endpoint)?;
                if !spokes.iter().any(|(_, existing)| *existing == id) {
                    spokes.push(self.create_edge(id));
                }
            }
        }

        let mut candidates = Vec::with_capacity(3);
        for &(key, side) in replaced.edges() {
            let mut sides = vec![(key, side)];
            sides.extend(
                spokes
                    .iter()
                    .filter(|(_, spoke)| spoke.shared_vertex_count(&side) == 1)
                    .copied(),
            );
            if sides.len() != 3 {
                return Err(MeshError::MalformedTriangle {
                    edges: sides.len(),
                    vertices: 3,
                });
            }

            let candidate = self.create_triangle(&sides, replaced.tag())?;
            self.activate(candidate)?;
            candidates.push(candidate);
        }
        Ok(candidates)
    }

    /// Drains the candidate queue, flipping illegal edges. Returns the number
    /// of flips performed.
    fn legalize(
        &mut self,
        point: Vertex,
        mut queue: VecDeque<TriangleKey>,
        removed: &mut Vec<Face>,
        accepted: &mut Vec<TriangleKey>,
    ) -> MeshResult<usize> {
        let budget = BASE_FLIP_BUDGET + 4 * self.triangles.len();
        let mut flips = 0;

        while let Some(candidate) = queue.pop_front() {
            self.deactivate(candidate)?;

            if self.is_boundary(candidate)? || self.is_legal(candidate, &point)? {
                self.activate(candidate)?;
                accepted.push(candidate);
                continue;
            }

            flips += 1;
            if flips > budget {
                return Err(MeshError::LegalizationDiverged { point, flips });
            }

            let flip = self.flip(candidate, &point)?;
            queue.retain(|&key| key != flip.opposite);
            removed.extend(flip.retired);
            queue.extend(flip.created);
        }
        Ok(flips)
    }

    /// A candidate sharing two corners with the super-triangle lies on the
    /// mesh boundary; there is nothing beyond its far edge to test against.
    fn is_boundary(&self, key: TriangleKey) -> MeshResult<bool> {
        let Some(super_face) = self.super_triangle else {
            return Ok(false);
        };
        Ok(self.triangle(key)?.shared_vertex_count(super_face.vertices()) == 2)
    }

    /// Checks the vertex across the far edge of `key` against its circumcircle.
    fn is_legal(&self, key: TriangleKey, point: &Vertex) -> MeshResult<bool> {
        let triangle = self.triangle(key)?;
        let (far_key, far_side) = self.far_edge(triangle, point)?;

        let Some(neighbor) = self.edge(far_key)?.opposite(key)? else {
            return Ok(true);
        };
        let apex = self
            .triangle(neighbor)?
            .opposite_vertex(&far_side)
            .ok_or(MeshError::StaleHandle("triangle"))?;

        let [a, b] = far_side.endpoints();
        if orientation(&a, &b, point) == Orientation::DEGENERATE {
            // The point sits on the far edge; flipping splits that edge.
            return Ok(!on_segment(point, &a, &b));
        }

        let circle = triangle.circumcircle();
        if circle.is_degenerate() {
            return Ok(true);
        }
        Ok(!circle.contains(&apex, self.tolerance))
    }

    /// Replaces the far edge of `candidate` with the diagonal from `point` to
    /// the apex of the neighbouring triangle.
    fn flip(&mut self, candidate: TriangleKey, point: &Vertex) -> MeshResult<Flip> {
        let triangle = self.triangle(candidate)?.clone();
        let (shared_key, shared) = self.far_edge(&triangle, point)?;

        let [a, b] = shared.endpoints();
        let opposite_key = self
            .edge(shared_key)?
            .opposite(candidate)?
            .ok_or(MeshError::MissingOppositeTriangle { a, b })?;
        let opposite = self.triangle(opposite_key)?.clone();
        let apex = opposite
            .opposite_vertex(&shared)
            .ok_or(MeshError::StaleHandle("triangle"))?;

        self.deactivate(opposite_key)?;
        log::trace!("Flipping {a} - {b} to {point} - {apex}");

        let diagonal = self.create_edge(EdgeId::new(*point, apex)?);
        let mut side_a = vec![diagonal];
        let mut side_b = vec![diagonal];
        for &(key, id) in triangle.edges().iter().chain(opposite.edges()) {
            if id == shared {
                continue;
            }
            if id.contains(&a) {
                side_a.push((key, id));
            } else if id.contains(&b) {
                side_b.push((key, id));
            }
        }

        let mut created = [candidate; 2];
        for (slot, sides) in created.iter_mut().zip([side_a, side_b]) {
            let key = self.create_triangle(&sides, triangle.tag())?;
            self.activate(key)?;
            *slot = key;
        }

        Ok(Flip {
            opposite: opposite_key,
            retired: [triangle.face(), opposite.face()],
            created,
        })
    }

    fn far_edge(&self, triangle: &Triangle, point: &Vertex) -> MeshResult<(EdgeKey, EdgeId)> {
        triangle
            .opposite_edge(point)
            .ok_or(MeshError::StaleHandle("candidate triangle"))
    }

    // ------------------------------------------------------------------
    // Bookkeeping
    // ------------------------------------------------------------------

    /// Registers a triangle on the mesh and on each of its edges.
    fn activate(&mut self, key: TriangleKey) -> MeshResult<()> {
        let triangle = self
            .triangles
            .get_mut(key)
            .ok_or(MeshError::StaleHandle("triangle"))?;
        triangle.set_active(true);
        self.vertices.extend(triangle.vertices().iter().copied());

        for &(edge_key, _) in triangle.edges() {
            self.edges
                .get_mut(edge_key)
                .ok_or(MeshError::StaleHandle("edge"))?
                .attach(key)?;
        }
        Ok(())
    }

    /// Unregisters a triangle from the mesh and from each of its edges.
    fn deactivate(&mut self, key: TriangleKey) -> MeshResult<()> {
        let triangle = self
            .triangles
            .get_mut(key)
            .ok_or(MeshError::StaleHandle("triangle"))?;
        triangle.set_active(false);

        for &(edge_key, _) in triangle.edges() {
            self.edges
                .get_mut(edge_key)
                .ok_or(MeshError::StaleHandle("edge"))?
                .detach(key);
        }
        Ok(())
    }

    fn create_edge(&mut self, id: EdgeId) -> (EdgeKey, EdgeId) {
        (self.edges.insert(Edge::new(id)), id)
    }

    fn create_triangle(&mut self, sides: &[(EdgeKey, EdgeId)], tag: Tag) -> MeshResult<TriangleKey> {
        let triangle = Triangle::from_edges(sides, tag)?;
        Ok(self.triangles.insert(triangle))
    }

    /// Releases triangles and edges that are no longer part of the mesh.
    fn collect_garbage(&mut self) {
        self.triangles.retain(|_, t| t.is_active());
        self.edges.retain(|_, e| !e.is_retired());
    }

    fn triangle(&self, key: TriangleKey) -> MeshResult<&Triangle> {
        self.triangles
            .get(key)
            .ok_or(MeshError::StaleHandle("triangle"))
    }

    fn edge(&self, key: EdgeKey) -> MeshResult<&Edge> {
        self.edges.get(key).ok_or(MeshError::StaleHandle("edge"))
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Checks the structural invariants of the mesh.
    ///
    /// Every active triangle must have 3 distinct corners known to the vertex
    /// set and be registered on each of its edges; every live edge must be
    /// claimed by exactly the active triangles containing both endpoints. The
    /// adjacency check scans all triangles per edge and is meant for tests and
    /// diagnostics.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant found.
    pub fn validate(&self) -> MeshResult<()> {
        for (key, triangle) in self.triangles.iter().filter(|(_, t)| t.is_active()) {
            let [a, b, c] = triangle.vertices();
            if a == b || b == c || a == c {
                return Err(MeshError::MalformedTriangle {
                    edges: 3,
                    vertices: triangle.vertices().iter().collect::<HashSet<_>>().len(),
                });
            }
            if let Some(unknown) = triangle.vertices().iter().find(|v| !self.vertices.contains(*v)) {
                return Err(MeshError::InconsistentAdjacency(format!(
                    "vertex {unknown} of an active triangle is missing from the vertex set"
                )));
            }
            for &(edge_key, id) in triangle.edges() {
                let edge = self.edge(edge_key)?;
                if edge.id() != id || !edge.triangles().any(|t| t == key) {
                    let [a, b] = id.endpoints();
                    return Err(MeshError::InconsistentAdjacency(format!(
                        "edge {a} - {b} does not list its triangle"
                    )));
                }
            }
        }

        for edge in self.edges.values().filter(|e| !e.is_retired()) {
            let [a, b] = edge.id().endpoints();
            let claimed: HashSet<TriangleKey> = edge.triangles().collect();
            let expected: HashSet<TriangleKey> = self
                .triangles
                .iter()
                .filter(|(_, t)| t.is_active() && t.has_vertex(&a) && t.has_vertex(&b))
                .map(|(key, _)| key)
                .collect();
            if expected.len() > 2 {
                return Err(MeshError::EdgeOverflow { a, b });
            }
            if claimed != expected {
                return Err(MeshError::InconsistentAdjacency(format!(
                    "edge {a} - {b} lists {} triangles but {} active triangles use it",
                    claimed.len(),
                    expected.len()
                )));
            }
        }
        Ok(())
    }
}
