//! Running counters over the insertions applied to a mesh.

use num_traits::cast::NumCast;
use std::fmt;

/// Reason an insertion had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The mesh has not been seeded
    Unseeded,
    /// A coordinate is NaN or infinite
    NonFinite,
    /// The point is already a mesh vertex
    Duplicate,
    /// No active triangle contains the point
    OutsideMesh,
    /// The point lies on the outline of the super-triangle
    OnMeshBoundary,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unseeded => write!(f, "mesh is not seeded"),
            Self::NonFinite => write!(f, "non-finite coordinates"),
            Self::Duplicate => write!(f, "duplicate vertex"),
            Self::OutsideMesh => write!(f, "outside the mesh"),
            Self::OnMeshBoundary => write!(f, "on the super-triangle outline"),
        }
    }
}

/// Statistics tracking for point insertions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertionStatistics {
    /// Number of insertions attempted
    pub attempted: u64,
    /// Number of insertions that changed the mesh
    pub succeeded: u64,
    /// Rejected because the mesh was not seeded
    pub unseeded: u64,
    /// Rejected for non-finite coordinates
    pub non_finite: u64,
    /// Rejected as duplicates
    pub duplicates: u64,
    /// Rejected as lying outside the mesh
    pub outside: u64,
    /// Rejected as lying on the super-triangle outline
    pub on_boundary: u64,
    /// Edge flips performed
    pub flips: u64,
    /// Triangles reported as added
    pub triangles_added: u64,
    /// Triangles reported as removed
    pub triangles_removed: u64,
}

impl InsertionStatistics {
    /// Creates a new statistics tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an attempted insertion.
    pub const fn record_attempt(&mut self) {
        self.attempted += 1;
    }

    /// Records an insertion that had no effect.
    pub const fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::Unseeded => self.unseeded += 1,
            SkipReason::NonFinite => self.non_finite += 1,
            SkipReason::Duplicate => self.duplicates += 1,
            SkipReason::OutsideMesh => self.outside += 1,
            SkipReason::OnMeshBoundary => self.on_boundary += 1,
        }
    }

    /// Records a successful insertion and the size of its delta.
    pub fn record_success(&mut self, added: usize, removed: usize, flips: usize) {
        self.succeeded += 1;
        self.triangles_added += added as u64;
        self.triangles_removed += removed as u64;
        self.flips += flips as u64;
    }

    /// Total number of insertions that had no effect.
    #[must_use]
    pub const fn skipped(&self) -> u64 {
        self.unseeded + self.non_finite + self.duplicates + self.outside + self.on_boundary
    }

    /// Fraction of attempted insertions that changed the mesh.
    ///
    /// # Panics
    ///
    /// This function should never panic as u64 to f64 conversion is always valid.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            <f64 as NumCast>::from(self.succeeded).expect("u64 to f64 conversion should never fail")
                / <f64 as NumCast>::from(self.attempted)
                    .expect("u64 to f64 conversion should never fail")
        }
    }

    /// Mean number of flips per successful insertion.
    ///
    /// # Panics
    ///
    /// This function should never panic as u64 to f64 conversion is always valid.
    #[must_use]
    pub fn average_flips(&self) -> f64 {
        if self.succeeded == 0 {
            0.0
        } else {
            <f64 as NumCast>::from(self.flips).expect("u64 to f64 conversion should never fail")
                / <f64 as NumCast>::from(self.succeeded)
                    .expect("u64 to f64 conversion should never fail")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_statistics() {
        let stats = InsertionStatistics::new();
        assert_eq!(stats.skipped(), 0);
        assert_relative_eq!(stats.success_rate(), 0.0);
        assert_relative_eq!(stats.average_flips(), 0.0);
    }

    #[test]
    fn test_record_and_rates() {
        let mut stats = InsertionStatistics::new();
        for _ in 0..4 {
            stats.record_attempt();
        }
        stats.record_success(3, 1, 0);
        stats.record_success(5, 3, 2);
        stats.record_skip(SkipReason::Duplicate);
        stats.record_skip(SkipReason::OutsideMesh);

        assert_eq!(stats.succeeded, 2);
        assert_eq!(stats.skipped(), 2);
        assert_eq!(stats.triangles_added, 8);
        assert_eq!(stats.triangles_removed, 4);
        assert_relative_eq!(stats.success_rate(), 0.5);
        assert_relative_eq!(stats.average_flips(), 1.0);
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::Duplicate.to_string(), "duplicate vertex");
        assert_eq!(SkipReason::Unseeded.to_string(), "mesh is not seeded");
    }
}
