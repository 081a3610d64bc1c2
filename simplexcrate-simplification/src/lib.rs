//! Mesh simplification on simplex trees
//!
//! This crate turns triangle meshes into [`SimplexTree`]s and reduces them by
//! repeated edge contraction:
//! - Coordinate-deduplicating mesh ingestion
//! - A greedy contraction loop with an optional homotopy guarantee
//! - Conversion back to triangles for rendering
//!
//! [`SimplexTree`]: simplexcrate_tree::SimplexTree

pub mod mesh_tree;
pub mod contraction;

pub use mesh_tree::*;
pub use contraction::*;

use simplexcrate_core::{Result, TriangleMesh};

/// Simplify a mesh by reducing the number of faces/vertices
pub trait MeshSimplifier {
    /// Simplify mesh with target reduction ratio (0.0 = no reduction, 1.0 = maximum reduction)
    fn simplify(&self, mesh: &TriangleMesh, reduction_ratio: f32) -> Result<TriangleMesh>;
}
