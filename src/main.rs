//! Incremental Delaunay triangulation binary executable.
//!
//! Seeds a mesh with the configured bounding area, inserts random points into
//! it and logs a summary. Set `RUST_LOG=debug` to see every insertion delta.

use incremental_delaunay::{TriangulationConfig, run};

fn main() {
    // Initialize logging
    env_logger::init();

    let config = TriangulationConfig::from_args();
    match run(&config) {
        Ok(_results) => {
            log::info!("Triangulation completed successfully");
        }
        Err(e) => {
            log::error!("Triangulation failed: {e}");
            std::process::exit(1);
        }
    }
}
