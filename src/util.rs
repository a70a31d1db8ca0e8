use crate::geometry::vertex::{Rectangle, Vertex};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng, random};

/// Generates a random seed for reproducible point sets.
///
/// # Returns
///
/// A random `u64`, suitable for [`generate_random_points`].
#[must_use]
pub fn generate_random_seed() -> u64 {
    random::<u64>()
}

/// Generates `count` points uniformly distributed over `area`.
///
/// The same `seed` always yields the same points. Coordinates lie in the
/// half-open range `[origin, origin + extent)` on each axis.
#[must_use]
pub fn generate_random_points(count: u32, area: &Rectangle, seed: u64) -> Vec<Vertex> {
    let mut rng = StdRng::seed_from_u64(seed);
    let max = area.max_corner();

    (0..count)
        .map(|_| {
            Vertex::new(
                rng.random_range(area.origin.x..max.x),
                rng.random_range(area.origin.y..max.y),
            )
        })
        .collect()
}
