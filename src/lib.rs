#![allow(clippy::multiple_crate_versions)]
#![warn(missing_docs)]

//! Incremental 2D Delaunay triangulation.
//!
//! This library maintains a Delaunay triangulation of a growing point set.
//! Points are inserted one at a time and every insertion reports exactly which
//! triangles left the mesh and which joined it, so dependent views (renderers,
//! spatial indexes) can be updated without rescanning the whole mesh.
//!
//! # Key Features
//!
//! - Super-triangle seeding from a bounding rectangle
//! - Split-and-flip insertion with a FIFO legalization queue
//! - Add/remove deltas per insertion, with caller tags carried through edits
//! - Structural validation and brute-force Delaunay checks for tests
//! - Per-mesh insertion statistics
//!
//! # Example
//!
//! ```rust
//! use incremental_delaunay::{DelaunayMesh, Rectangle, TriangulationOps, Vertex};
//!
//! let mut mesh = DelaunayMesh::new();
//! mesh.seed(Rectangle::new(0.0, 0.0, 10.0, 10.0))?;
//!
//! for (x, y) in [(2.0, 2.0), (8.0, 2.0), (5.0, 8.0), (5.0, 4.0)] {
//!     mesh.insert(Vertex::new(x, y))?;
//! }
//!
//! assert_eq!(mesh.triangle_count(), 9);
//! assert!(mesh.is_delaunay(1e-9));
//! # Ok::<(), incremental_delaunay::MeshError>(())
//! ```

use std::time::{Duration, Instant};

// Module declarations (avoiding mod.rs files)
/// Configuration of triangulation runs.
pub mod config;

/// Error types for the triangulation engine.
pub mod errors;

/// Random point generation.
pub mod util;

/// Planar geometry: points, predicates and query traits.
pub mod geometry {
    /// Circumcircles and the in-circle test.
    pub mod circle;
    /// High-level triangulation operations.
    pub mod operations;
    /// Orientation and containment predicates.
    pub mod predicates;
    /// Read-only triangulation trait.
    pub mod traits;
    /// Points and rectangles.
    pub mod vertex;
}

/// Mesh data structures and the insertion engine.
pub mod mesh {
    /// Edges and their adjacency.
    pub mod edge;
    /// Insertion counters.
    pub mod statistics;
    /// Triangles and face snapshots.
    pub mod triangle;
    /// The incremental Delaunay engine.
    pub mod triangulation;
}

// Re-exports for convenience
pub use config::{TestConfig, TriangulationConfig};
pub use errors::{MeshError, MeshResult};
pub use geometry::circle::{Circumcircle, InCircle};
pub use geometry::operations::{DelaunayViolation, TriangulationOps};
pub use geometry::predicates::Orientation;
pub use geometry::traits::TriangulationQuery;
pub use geometry::vertex::{Rectangle, Vertex};
pub use mesh::statistics::{InsertionStatistics, SkipReason};
pub use mesh::triangle::{Face, Tag};
pub use mesh::triangulation::{DelaunayMesh, InsertionDelta};

/// Tolerance used when the finished mesh is checked for the Delaunay property.
///
/// Looser than the engine's own in-circle tolerance, so that rounding in the
/// brute-force check does not report cocircular vertices as violations.
pub const VALIDATION_TOLERANCE: f64 = 1e-9;

/// Outcome of [`run`].
#[derive(Debug, Clone)]
pub struct RunResults {
    /// Configuration the run used
    pub config: TriangulationConfig,
    /// Seed the random points were generated from
    pub seed: u64,
    /// Number of insertions that changed the mesh
    pub inserted: usize,
    /// Wall-clock time spent inserting
    pub elapsed_time: Duration,
    /// The finished mesh
    pub mesh: DelaunayMesh,
}

/// Seeds a mesh with the configured area and inserts random points into it.
///
/// # Errors
///
/// Returns [`MeshError::InvalidConfiguration`] if the configuration fails
/// validation, any error raised while seeding or inserting, and, when
/// `config.validate` is set, the first structural problem or
/// [`MeshError::NotDelaunay`] found in the finished mesh.
pub fn run(config: &TriangulationConfig) -> MeshResult<RunResults> {
    config.validate().map_err(MeshError::InvalidConfiguration)?;

    let area = config.bounding_area();
    let seed = config.seed.unwrap_or_else(util::generate_random_seed);

    log::info!(
        "Bounding area: {} x {} at ({}, {})",
        area.width,
        area.height,
        area.origin.x,
        area.origin.y
    );
    log::info!("Number of points: {}", config.points);
    log::info!("Random seed: {seed}");

    let mut mesh = config.to_mesh();
    mesh.seed(area)?;

    let points = util::generate_random_points(config.points, &area, seed);
    let start = Instant::now();
    let mut inserted = 0;
    for point in points {
        if mesh.insert(point)?.is_some() {
            inserted += 1;
        }
    }
    let elapsed_time = start.elapsed();

    if config.validate {
        mesh.validate()?;
        let violations = mesh.delaunay_violations(VALIDATION_TOLERANCE);
        if !violations.is_empty() {
            return Err(MeshError::NotDelaunay(violations.len()));
        }
        log::info!("Mesh passed structural and Delaunay validation");
    }

    let stats = mesh.statistics();
    log::info!(
        "Triangulation finished with {} vertices, {} edges, {} faces",
        mesh.vertex_count(),
        mesh.edge_count(),
        mesh.triangle_count()
    );
    log::info!(
        "  Inserted {inserted} of {} points in {elapsed_time:?} ({} skipped, {:.2} flips per insertion)",
        config.points,
        stats.skipped(),
        stats.average_flips()
    );

    Ok(RunResults {
        config: config.clone(),
        seed,
        inserted,
        elapsed_time,
        mesh,
    })
}
