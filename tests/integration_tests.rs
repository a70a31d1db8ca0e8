//! Integration tests for the incremental Delaunay engine.
//!
//! These drive the public API only: seeding, insertion deltas, rejections,
//! tags, reset, and the structural and Delaunay checks on the finished mesh.

use incremental_delaunay::{
    DelaunayMesh, Face, MeshError, Rectangle, SkipReason, TestConfig, TriangulationOps,
    TriangulationQuery, Vertex, run, util::generate_random_points,
};
use std::collections::HashSet;

const CHECK_TOLERANCE: f64 = 1e-9;

fn seeded_mesh() -> DelaunayMesh {
    let mut mesh = DelaunayMesh::new();
    mesh.seed(Rectangle::new(0.0, 0.0, 10.0, 10.0))
        .expect("Failed to seed mesh");
    mesh
}

fn real_faces(mesh: &DelaunayMesh) -> Vec<Face> {
    mesh.triangles()
        .filter(|face| !face.vertices().iter().any(|v| mesh.is_super_vertex(v)))
        .collect()
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_three_points_form_one_real_triangle() {
        let mut mesh = seeded_mesh();

        let first = mesh
            .insert(Vertex::new(2.0, 2.0))
            .unwrap()
            .expect("first point should be inserted");
        assert_eq!(first.removed.len(), 1);
        assert_eq!(first.added.len(), 3);
        assert_eq!(first.flips, 0);

        // (-30, -30) lies inside the circumcircle of (8, 2), (2, 2), (30, 0),
        // so the edge towards the super-triangle corner is flipped once.
        let second = mesh
            .insert(Vertex::new(8.0, 2.0))
            .unwrap()
            .expect("second point should be inserted");
        assert_eq!(second.flips, 1);
        assert_eq!(second.removed.len(), 3);
        assert_eq!(second.added.len(), 4);

        mesh.insert(Vertex::new(5.0, 8.0)).unwrap().unwrap();

        assert_eq!(mesh.triangle_count(), 7);
        let real = real_faces(&mesh);
        assert_eq!(real.len(), 1, "Only one triangle should avoid the super-triangle");
        assert_eq!(
            real[0],
            Face::new(
                [
                    Vertex::new(2.0, 2.0),
                    Vertex::new(8.0, 2.0),
                    Vertex::new(5.0, 8.0)
                ],
                0
            )
        );
        mesh.validate().expect("Mesh should be consistent");
    }

    #[test]
    fn test_interior_insertion_replaces_containing_triangle() {
        let mut mesh = seeded_mesh();
        for v in [(2.0, 2.0), (8.0, 2.0), (5.0, 8.0)] {
            mesh.insert(v.into()).unwrap();
        }

        let point = Vertex::new(5.0, 4.0);
        let container = mesh.locate(&point).expect("point should be inside the mesh");
        let before = mesh.triangle_count();

        let delta = mesh.insert(point).unwrap().unwrap();

        assert_eq!(mesh.triangle_count(), before + 2);
        assert!(delta.removed.contains(&container));
        assert!(mesh.triangles().all(|face| face != container));
        assert!(delta.added.iter().all(|face| face.has_vertex(&point)));
        assert_eq!(real_faces(&mesh).len(), 3);
        assert!(mesh.is_delaunay(CHECK_TOLERANCE));
    }

    #[test]
    fn test_delta_matches_mesh_difference() {
        let mut mesh = seeded_mesh();
        let area = Rectangle::new(0.0, 0.0, 10.0, 10.0);

        for point in generate_random_points(40, &area, 2024) {
            let before: HashSet<Face> = mesh.triangles().collect();
            let Some(delta) = mesh.insert(point).unwrap() else {
                continue;
            };
            let after: HashSet<Face> = mesh.triangles().collect();

            let gone: HashSet<Face> = before.difference(&after).copied().collect();
            let new: HashSet<Face> = after.difference(&before).copied().collect();
            let removed: HashSet<Face> = delta.removed.iter().copied().collect();
            let added: HashSet<Face> = delta.added.iter().copied().collect();

            assert!(gone.is_subset(&removed), "every vanished face is reported");
            assert_eq!(new, added, "added faces are exactly the new faces");
            assert!(added.is_disjoint(&before));
        }
    }

    #[test]
    fn test_duplicate_insertion_is_noop() {
        let mut mesh = seeded_mesh();
        assert!(mesh.insert(Vertex::new(2.0, 2.0)).unwrap().is_some());

        let faces: HashSet<Face> = mesh.triangles().collect();
        let vertex_count = mesh.vertex_count();

        assert!(mesh.insert(Vertex::new(2.0, 2.0)).unwrap().is_none());
        assert_eq!(mesh.triangles().collect::<HashSet<_>>(), faces);
        assert_eq!(mesh.vertex_count(), vertex_count);
        assert_eq!(mesh.statistics().duplicates, 1);
    }

    #[test]
    fn test_signed_zero_is_duplicate() {
        let mut mesh = DelaunayMesh::new();
        mesh.seed(Rectangle::new(-1.0, -1.0, 2.0, 2.0)).unwrap();
        assert!(mesh.insert(Vertex::new(0.0, 0.5)).unwrap().is_some());
        assert!(mesh.insert(Vertex::new(-0.0, 0.5)).unwrap().is_none());
    }

    #[test]
    fn test_out_of_bounds_insertion_is_noop() {
        let mut mesh = seeded_mesh();
        mesh.insert(Vertex::new(3.0, 3.0)).unwrap();
        let faces: HashSet<Face> = mesh.triangles().collect();

        assert!(mesh.insert(Vertex::new(-500.0, 40.0)).unwrap().is_none());
        assert_eq!(mesh.triangles().collect::<HashSet<_>>(), faces);
        assert_eq!(mesh.statistics().outside, 1);
    }

    #[test]
    fn test_vertex_conservation() {
        let mut mesh = seeded_mesh();
        let area = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let points = generate_random_points(100, &area, 5);

        let mut inserted = 0;
        for point in &points {
            if mesh.insert(*point).unwrap().is_some() {
                inserted += 1;
            }
        }
        // Second pass: all duplicates.
        for point in &points {
            assert!(mesh.insert(*point).unwrap().is_none());
        }

        assert_eq!(mesh.vertex_count(), inserted + 3);
        assert_eq!(mesh.triangle_count(), 1 + 2 * inserted);
        assert_eq!(mesh.statistics().skipped(), mesh.statistics().attempted - inserted as u64);
    }

    #[test]
    fn test_random_insertions_stay_delaunay() {
        let mut mesh = seeded_mesh();
        let area = Rectangle::new(0.0, 0.0, 10.0, 10.0);

        for point in generate_random_points(150, &area, 77) {
            mesh.insert(point).unwrap();
            assert!(mesh.is_fully_delaunay(CHECK_TOLERANCE), "after {point}");
        }

        mesh.validate().expect("Mesh should be consistent");
        let violations = mesh.delaunay_violations(CHECK_TOLERANCE);
        assert!(violations.is_empty(), "violations: {violations:?}");
        assert_eq!(mesh.euler_characteristic(), 1);
    }

    #[test]
    fn test_grid_points_are_handled() {
        // Cocircular and collinear configurations everywhere.
        let mut mesh = DelaunayMesh::new();
        mesh.seed(Rectangle::new(0.0, 0.0, 6.0, 6.0)).unwrap();

        let mut inserted = 0;
        for i in 0..=6 {
            for j in 0..=6 {
                if mesh
                    .insert(Vertex::new(f64::from(i), f64::from(j)))
                    .unwrap()
                    .is_some()
                {
                    inserted += 1;
                }
                let violations = mesh.full_delaunay_violations(CHECK_TOLERANCE);
                assert!(violations.is_empty(), "after ({i}, {j}): {violations:?}");
            }
        }

        assert_eq!(inserted, 49);
        assert_eq!(mesh.triangle_count(), 1 + 2 * inserted);
        mesh.validate().expect("Mesh should be consistent");
        assert!(mesh.is_delaunay(CHECK_TOLERANCE));
    }

    #[test]
    fn test_tags_survive_edits() {
        let mut mesh = seeded_mesh();
        mesh.insert(Vertex::new(2.0, 2.0)).unwrap();

        for face in mesh.triangles().collect::<Vec<_>>() {
            assert!(mesh.set_tag(&face, 5));
        }
        mesh.insert(Vertex::new(6.0, 6.0)).unwrap();
        mesh.insert(Vertex::new(4.0, 1.0)).unwrap();

        assert!(mesh.triangles().all(|face| face.tag() == 5));
    }

    #[test]
    fn test_reset_and_reseed() {
        let mut mesh = seeded_mesh();
        mesh.insert(Vertex::new(2.0, 2.0)).unwrap();

        assert_eq!(
            mesh.seed(Rectangle::new(0.0, 0.0, 1.0, 1.0)),
            Err(MeshError::AlreadySeeded)
        );

        mesh.reset();
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.super_triangle().is_none());
        assert!(mesh.insert(Vertex::new(2.0, 2.0)).unwrap().is_none());
        assert_eq!(mesh.statistics().unseeded, 1);

        mesh.seed(Rectangle::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        assert!(mesh.insert(Vertex::new(0.5, 0.5)).unwrap().is_some());
        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn test_skip_reasons_are_counted() {
        let mut mesh = seeded_mesh();
        mesh.insert(Vertex::new(1.0, 1.0)).unwrap();
        mesh.insert(Vertex::new(1.0, 1.0)).unwrap();
        mesh.insert(Vertex::new(f64::INFINITY, 1.0)).unwrap();
        mesh.insert(Vertex::new(1e9, 0.0)).unwrap();

        let stats = mesh.statistics();
        assert_eq!(stats.attempted, 4);
        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stats.non_finite, 1);
        assert_eq!(stats.outside, 1);
        assert_eq!(SkipReason::OutsideMesh.to_string(), "outside the mesh");
    }

    #[test]
    fn test_medium_run_validates() {
        let config = incremental_delaunay::TriangulationConfig {
            validate: true,
            ..TestConfig::medium()
        };
        let results = run(&config).expect("Failed to run triangulation");
        assert_eq!(results.inserted, 128);
        assert!(results.mesh.is_valid());
    }

    #[test]
    fn test_delta_serializes() {
        let mut mesh = seeded_mesh();
        let delta = mesh.insert(Vertex::new(4.0, 7.0)).unwrap().unwrap();

        let json = serde_json::to_string(&delta).expect("delta should serialize");
        let back: incremental_delaunay::InsertionDelta =
            serde_json::from_str(&json).expect("delta should deserialize");
        assert_eq!(back, delta);
    }
}
