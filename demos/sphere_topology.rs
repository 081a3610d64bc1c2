//! Explore links and the link condition on an octahedron
//!
//! Contracting with the link condition reduces the octahedron to the boundary
//! of a tetrahedron and then stops. Without it the sphere keeps collapsing.

use simplexcrate::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn octahedron() -> SimplexTree {
    let mut tree = SimplexTree::new();
    for face in [
        [0, 1, 2],
        [0, 2, 3],
        [0, 3, 4],
        [0, 1, 4],
        [1, 2, 5],
        [2, 3, 5],
        [3, 4, 5],
        [1, 4, 5],
    ] {
        tree.add(&face, None);
    }
    tree
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let tree = octahedron();
    tree.validate()?;
    info!(f_vector = ?tree.f_vector().by_dim, chi = tree.euler_characteristic(), "octahedron");
    info!(link = ?tree.get_link(&[0]), "link of vertex 0");
    info!(link = ?tree.get_link(&[0, 1]), "link of edge [0, 1]");

    for keep_homotopy in [true, false] {
        let mut copy = tree.clone();
        let stats = contract_edges(&mut copy, usize::MAX, keep_homotopy, 2);
        copy.validate()?;
        info!(
            keep_homotopy,
            contractions = stats.contractions,
            f_vector = ?copy.f_vector().by_dim,
            chi = copy.euler_characteristic(),
            facets = ?copy.facets(),
            "contracted"
        );
    }

    Ok(())
}
