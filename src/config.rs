//! Configuration management for triangulation runs.
//!
//! [`TriangulationConfig`] doubles as the command-line interface of the `idt`
//! binary and as a programmatic configuration for demos, benchmarks and tests.
//! It covers:
//! - The bounding area to seed the mesh with
//! - The number of random points to insert and their seed
//! - Engine parameters (super-triangle scale, in-circle tolerance)

use crate::geometry::vertex::Rectangle;
use crate::mesh::triangulation::{DEFAULT_SUPER_TRIANGLE_SCALE, DEFAULT_TOLERANCE, DelaunayMesh};
use clap::Parser;

/// Main configuration structure for triangulation runs.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct TriangulationConfig {
    /// Number of random points to insert
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub points: u32,

    /// Width of the bounding area
    #[arg(long, default_value = "100.0")]
    pub width: f64,

    /// Height of the bounding area
    #[arg(long, default_value = "100.0")]
    pub height: f64,

    /// Horizontal coordinate of the bounding area's lower-left corner
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    pub origin_x: f64,

    /// Vertical coordinate of the bounding area's lower-left corner
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    pub origin_y: f64,

    /// Seed for the random point generator (random if omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Super-triangle reach as a multiple of the area's larger extent
    #[arg(long, default_value_t = DEFAULT_SUPER_TRIANGLE_SCALE)]
    pub scale: f64,

    /// Relative tolerance of the in-circle test
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Check mesh consistency and the Delaunay property after all insertions
    #[arg(long, default_value = "false")]
    pub validate: bool,
}

impl TriangulationConfig {
    /// Builds a new instance of `TriangulationConfig` from command line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Creates a configuration inserting `points` points into a
    /// `width` x `height` area at the origin, with default engine parameters.
    #[must_use]
    pub const fn new(points: u32, width: f64, height: f64) -> Self {
        Self {
            points,
            width,
            height,
            origin_x: 0.0,
            origin_y: 0.0,
            seed: None,
            scale: DEFAULT_SUPER_TRIANGLE_SCALE,
            tolerance: DEFAULT_TOLERANCE,
            validate: false,
        }
    }

    /// Returns the same configuration with a fixed random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The area the mesh is seeded with.
    #[must_use]
    pub const fn bounding_area(&self) -> Rectangle {
        Rectangle::new(self.origin_x, self.origin_y, self.width, self.height)
    }

    /// Creates an unseeded mesh with this configuration's engine parameters.
    #[must_use]
    pub fn to_mesh(&self) -> DelaunayMesh {
        DelaunayMesh::new()
            .with_super_triangle_scale(self.scale)
            .with_tolerance(self.tolerance)
    }

    /// Validates the configuration parameters.
    ///
    /// # Errors
    ///
    /// Returns an error message if any parameters are invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.points == 0 {
            return Err("Number of points must be positive".to_string());
        }

        self.bounding_area().validate()?;

        if !self.scale.is_finite() || self.scale <= 2.0 {
            return Err(format!(
                "Super-triangle scale must be a finite number greater than 2, got {}",
                self.scale
            ));
        }

        if !(0.0..1.0).contains(&self.tolerance) {
            return Err(format!(
                "Tolerance must be in [0, 1), got {}",
                self.tolerance
            ));
        }

        Ok(())
    }
}

/// Configuration preset for quick testing.
#[derive(Debug, Clone)]
pub struct TestConfig;

impl TestConfig {
    /// Creates a small, fast configuration suitable for unit tests.
    #[must_use]
    pub const fn small() -> TriangulationConfig {
        TriangulationConfig::new(16, 10.0, 10.0).with_seed(7)
    }

    /// Creates a medium-sized configuration for integration tests.
    #[must_use]
    pub const fn medium() -> TriangulationConfig {
        TriangulationConfig::new(128, 100.0, 50.0).with_seed(42)
    }

    /// Creates a large configuration for performance testing.
    #[must_use]
    pub const fn large() -> TriangulationConfig {
        TriangulationConfig::new(1024, 1000.0, 1000.0).with_seed(1234)
    }
}
