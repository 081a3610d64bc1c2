//! Simplify a curved grid surface by edge contraction
//!
//! Run with `RUST_LOG=debug` to see every contraction pass.

use simplexcrate::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn curved_grid(size: usize) -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 / (size - 1) as f32 * std::f32::consts::PI;
            let fy = y as f32 / (size - 1) as f32 * std::f32::consts::PI;
            mesh.add_vertex(Point3f::new(x as f32, y as f32, fx.sin() * fy.sin() * 2.0));
        }
    }
    for y in 0..(size - 1) {
        for x in 0..(size - 1) {
            let tl = y * size + x;
            let tr = tl + 1;
            let bl = (y + 1) * size + x;
            let br = bl + 1;
            mesh.add_face([tl, bl, tr]);
            mesh.add_face([tr, bl, br]);
        }
    }
    mesh
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mesh = curved_grid(16);
    info!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "input mesh"
    );

    let mut tree = MeshSimplexTree::from_mesh(&mesh)?;
    let before = tree.tree().f_vector();
    let stats = tree.simplify(mesh.vertex_count() / 2, true);
    let after = tree.tree().f_vector();

    info!(?before, ?after, ?stats, "contracted with homotopy");
    info!(
        euler_before = euler_characteristic(&before),
        euler_after = euler_characteristic(&after),
        "euler characteristic"
    );

    let simplified = tree.to_triangle_mesh();
    simplified.check_faces()?;
    let (min, max) = simplified.bounding_box();
    info!(
        vertices = simplified.vertex_count(),
        faces = simplified.face_count(),
        ?min,
        ?max,
        "simplified mesh"
    );

    // the same budget through the MeshSimplifier interface, without the link condition
    let free = ContractionSimplifier::with_params(false, 2).simplify(&mesh, 0.5)?;
    info!(
        vertices = free.vertex_count(),
        faces = free.face_count(),
        "simplified without homotopy guarantee"
    );

    Ok(())
}
