//! Basic example of using the incremental Delaunay library
//!
//! This example shows how to:
//! - Seed a mesh with a bounding area
//! - Insert points one at a time and apply each delta to a dependent view
//! - Tag triangles and watch the tags travel through later edits
//! - Check the finished mesh

use incremental_delaunay::{
    DelaunayMesh, Face, Rectangle, TriangulationOps, TriangulationQuery, Vertex,
    util::generate_random_points,
};
use log::{LevelFilter, info};
use std::collections::HashSet;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .init();

    info!("Starting incremental insertion example");

    let area = Rectangle::new(0.0, 0.0, 40.0, 20.0);
    let mut mesh = DelaunayMesh::new();
    let super_triangle = mesh.seed(area)?;
    info!("Super-triangle: {:?}", super_triangle.vertices());

    // A stand-in for a renderer: the set of faces currently drawn.
    let mut view: HashSet<Face> = mesh.triangles().collect();

    let mut points = vec![Vertex::new(5.0, 5.0), Vertex::new(35.0, 5.0), Vertex::new(20.0, 18.0)];
    points.extend(generate_random_points(20, &area, 2024));
    // Rejected: already present, then outside the mesh.
    points.push(Vertex::new(5.0, 5.0));
    points.push(Vertex::new(-1000.0, 0.0));

    for (i, point) in points.into_iter().enumerate() {
        match mesh.insert(point)? {
            Some(delta) => {
                for face in &delta.removed {
                    view.remove(face);
                }
                view.extend(delta.added.iter().copied());
                info!(
                    "#{i} {point}: -{} +{} ({} flips)",
                    delta.removed.len(),
                    delta.added.len(),
                    delta.flips
                );
            }
            None => info!("#{i} {point}: no change"),
        }

        if i == 2 {
            // Mark everything present after the first three points.
            for face in mesh.triangles().collect::<Vec<_>>() {
                mesh.set_tag(&face, 1);
            }
        }
    }

    let mesh_faces: HashSet<Face> = mesh.triangles().collect();
    assert_eq!(view, mesh_faces, "view should track the mesh exactly");

    let tagged = mesh.triangles().filter(|face| face.tag() == 1).count();
    info!(
        "Final mesh: {} vertices, {} edges, {} faces ({tagged} tagged)",
        mesh.vertex_count(),
        mesh.edge_count(),
        mesh.face_count()
    );

    mesh.validate()?;
    info!("Delaunay: {}", mesh.is_delaunay(1e-9));
    info!(
        "Statistics: {} attempted, {} inserted, {:.2} flips per insertion",
        mesh.statistics().attempted,
        mesh.statistics().succeeded,
        mesh.statistics().average_flips()
    );

    Ok(())
}
