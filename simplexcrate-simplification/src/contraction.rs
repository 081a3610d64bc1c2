//! Greedy edge contraction
//!
//! The loop walks a snapshot of the current edges and tries to contract each
//! one. When the snapshot is used up the edges are derived again, and the
//! loop stops once the contraction budget is spent or enough consecutive
//! passes go by without a single contraction.

use crate::{MeshSimplexTree, MeshSimplifier};
use serde::{Deserialize, Serialize};
use simplexcrate_core::{Error, Result, TriangleMesh};
use simplexcrate_tree::SimplexTree;
use tracing::{debug, info, trace};

/// Consecutive passes without progress after which contraction gives up
pub const DEFAULT_IDLE_PASS_LIMIT: usize = 2;

/// Outcome of a contraction run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimplifyStats {
    /// Edges actually contracted
    pub contractions: usize,
    /// Calls to `edge_contract`, successful or not
    pub attempts: usize,
    /// Edge snapshots taken
    pub passes: usize,
}

/// Contract up to `budget` edges of `tree`.
///
/// Edges are visited in ascending order within a pass. A pass that ends with
/// at least one contraction resets the idle counter, and `idle_pass_limit`
/// consecutive idle passes end the run. A limit of 0 behaves like 1.
///
/// With `keep_homotopy` every contraction preserves the homotopy type of the
/// complex, so the loop can stop short of the budget.
pub fn contract_edges<V: Clone>(
    tree: &mut SimplexTree<V>,
    budget: usize,
    keep_homotopy: bool,
    idle_pass_limit: usize,
) -> SimplifyStats {
    let mut stats = SimplifyStats::default();
    if budget == 0 {
        return stats;
    }
    let idle_pass_limit = idle_pass_limit.max(1);

    let mut edges = tree.get_simplices(1).into_iter();
    stats.passes = 1;
    let mut pass_contractions = 0usize;
    let mut idle_passes = 0usize;

    while stats.contractions < budget {
        match edges.next() {
            Some(edge) => {
                stats.attempts += 1;
                if tree.edge_contract(edge[0], edge[1], keep_homotopy) {
                    stats.contractions += 1;
                    pass_contractions += 1;
                } else {
                    trace!(v1 = edge[0], v2 = edge[1], "edge not contracted");
                }
            }
            None => {
                debug!(
                    pass = stats.passes,
                    contractions = pass_contractions,
                    "contraction pass finished"
                );
                if pass_contractions == 0 {
                    idle_passes += 1;
                    if idle_passes >= idle_pass_limit {
                        break;
                    }
                } else {
                    idle_passes = 0;
                }
                pass_contractions = 0;
                edges = tree.get_simplices(1).into_iter();
                stats.passes += 1;
            }
        }
    }

    info!(
        budget,
        contractions = stats.contractions,
        attempts = stats.attempts,
        passes = stats.passes,
        keep_homotopy,
        "edge contraction finished"
    );
    stats
}

/// Mesh simplifier built on simplex tree edge contraction.
///
/// Positions are never moved: a contracted edge collapses onto its lower
/// numbered endpoint, and that endpoint keeps its own coordinates.
#[derive(Debug, Clone)]
pub struct ContractionSimplifier {
    /// Only contract edges that satisfy the link condition
    pub keep_homotopy: bool,
    /// Consecutive passes without progress before giving up
    pub idle_pass_limit: usize,
}

impl Default for ContractionSimplifier {
    fn default() -> Self {
        Self {
            keep_homotopy: true,
            idle_pass_limit: DEFAULT_IDLE_PASS_LIMIT,
        }
    }
}

impl ContractionSimplifier {
    /// Create a new contraction simplifier with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a contraction simplifier with custom parameters
    pub fn with_params(keep_homotopy: bool, idle_pass_limit: usize) -> Self {
        Self {
            keep_homotopy,
            idle_pass_limit,
        }
    }

    /// Contract up to `n` edges of an already built tree
    pub fn run(&self, tree: &mut MeshSimplexTree, n: usize) -> SimplifyStats {
        tree.simplify_with_limit(n, self.keep_homotopy, self.idle_pass_limit)
    }
}

impl MeshSimplifier for ContractionSimplifier {
    fn simplify(&self, mesh: &TriangleMesh, reduction_ratio: f32) -> Result<TriangleMesh> {
        if mesh.is_empty() {
            return Err(Error::InvalidData("Mesh is empty".to_string()));
        }

        if !(0.0..=1.0).contains(&reduction_ratio) {
            return Err(Error::InvalidData(
                "Reduction ratio must be between 0.0 and 1.0".to_string(),
            ));
        }

        if reduction_ratio == 0.0 {
            return Ok(mesh.clone());
        }

        let mut tree = MeshSimplexTree::from_mesh(mesh)?;
        let budget = (reduction_ratio as f64 * tree.vertex_count() as f64).floor() as usize;
        self.run(&mut tree, budget);
        Ok(tree.to_triangle_mesh())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplexcrate_core::Point3;

    fn make_single_triangle() -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    fn make_tetrahedron() -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
                Point3::new(0.5, 0.5, 1.0),
            ],
            vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
        )
    }

    fn make_octahedron() -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(-1.0, 0.0, 0.0),
                Point3::new(0.0, -1.0, 0.0),
                Point3::new(0.0, 0.0, -1.0),
            ],
            vec![
                [0, 1, 2],
                [0, 2, 3],
                [0, 3, 4],
                [0, 4, 1],
                [5, 2, 1],
                [5, 3, 2],
                [5, 4, 3],
                [5, 1, 4],
            ],
        )
    }

    fn make_plane_grid(size: usize) -> TriangleMesh {
        let mut vertices = Vec::new();
        for y in 0..size {
            for x in 0..size {
                vertices.push(Point3::new(x as f32, y as f32, 0.0));
            }
        }
        let mut faces = Vec::new();
        for y in 0..(size - 1) {
            for x in 0..(size - 1) {
                let tl = y * size + x;
                let tr = tl + 1;
                let bl = (y + 1) * size + x;
                let br = bl + 1;
                faces.push([tl, bl, tr]);
                faces.push([tr, bl, br]);
            }
        }
        TriangleMesh::from_vertices_and_faces(vertices, faces)
    }

    // ---- Construction tests ----

    #[test]
    fn test_creation() {
        let s = ContractionSimplifier::new();
        assert!(s.keep_homotopy);
        assert_eq!(s.idle_pass_limit, 2);
    }

    #[test]
    fn test_with_params() {
        let s = ContractionSimplifier::with_params(false, 5);
        assert!(!s.keep_homotopy);
        assert_eq!(s.idle_pass_limit, 5);
    }

    // ---- Contraction loop tests ----

    #[test]
    fn test_zero_budget_does_nothing() {
        let mut tree: SimplexTree = SimplexTree::new();
        tree.add(&[0, 1, 2], None);
        let stats = contract_edges(&mut tree, 0, true, 2);
        assert_eq!(stats, SimplifyStats::default());
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn test_budget_is_respected() {
        let mut tree = MeshSimplexTree::from_mesh(&make_plane_grid(6)).unwrap();
        let stats = tree.simplify(3, true);
        assert_eq!(stats.contractions, 3);
        assert_eq!(tree.vertex_count(), 33);
        assert_eq!(tree.tree().euler_characteristic(), 1);
    }

    #[test]
    fn test_empty_tree_stops_after_idle_passes() {
        let mut tree: SimplexTree = SimplexTree::new();
        let stats = contract_edges(&mut tree, 10, true, 2);
        assert_eq!(stats.contractions, 0);
        assert_eq!(stats.attempts, 0);
        assert_eq!(stats.passes, 2);
    }

    #[test]
    fn test_tetrahedron_boundary_is_irreducible() {
        let mut tree = MeshSimplexTree::from_mesh(&make_tetrahedron()).unwrap();
        let stats = tree.simplify(10, true);
        assert_eq!(stats.contractions, 0);
        assert_eq!(stats.attempts, 12);
        assert_eq!(stats.passes, 2);
        assert_eq!(tree.triangle_count(), 4);
    }

    #[test]
    fn test_idle_pass_limit_bounds_attempts() {
        let mut tree = MeshSimplexTree::from_mesh(&make_tetrahedron()).unwrap();
        let stats = tree.simplify_with_limit(10, true, 4);
        assert_eq!(stats.attempts, 24);
        assert_eq!(stats.passes, 4);
    }

    #[test]
    fn test_octahedron_reduces_to_tetrahedron_boundary() {
        let mut tree = MeshSimplexTree::from_mesh(&make_octahedron()).unwrap();
        assert_eq!(tree.tree().euler_characteristic(), 2);
        let stats = tree.simplify(100, true);
        assert_eq!(stats.contractions, 2);
        assert_eq!(tree.tree().f_vector().by_dim, vec![4, 6, 4]);
        assert_eq!(tree.tree().euler_characteristic(), 2);
        assert!(tree.tree().validate().is_ok());
    }

    #[test]
    fn test_without_homotopy_sphere_collapses() {
        let mut tree = MeshSimplexTree::from_mesh(&make_tetrahedron()).unwrap();
        let stats = tree.simplify(10, false);
        assert_eq!(stats.contractions, 3);
        assert_eq!(tree.vertex_count(), 1);
        assert_eq!(tree.tree().euler_characteristic(), 1);
    }

    #[test]
    fn test_grid_keeps_disc_topology() {
        let mesh = make_plane_grid(6);
        let mut tree = MeshSimplexTree::from_mesh(&mesh).unwrap();
        tree.simplify(usize::MAX, true);
        assert!(tree.vertex_count() < mesh.vertex_count());
        assert_eq!(tree.tree().euler_characteristic(), 1);
        assert!(tree.tree().validate().is_ok());
    }

    // ---- MeshSimplifier tests ----

    #[test]
    fn test_empty_mesh() {
        let s = ContractionSimplifier::new();
        let mesh = TriangleMesh::new();
        assert!(s.simplify(&mesh, 0.5).is_err());
    }

    #[test]
    fn test_invalid_reduction_ratio() {
        let s = ContractionSimplifier::new();
        let mesh = make_single_triangle();
        assert!(s.simplify(&mesh, -0.1).is_err());
        assert!(s.simplify(&mesh, 1.1).is_err());
    }

    #[test]
    fn test_zero_reduction() {
        let s = ContractionSimplifier::new();
        let mesh = make_single_triangle();
        let result = s.simplify(&mesh, 0.0).unwrap();
        assert_eq!(result.vertex_count(), 3);
        assert_eq!(result.face_count(), 1);
    }

    #[test]
    fn test_planar_grid_simplification() {
        let s = ContractionSimplifier::new();
        let mesh = make_plane_grid(6);
        assert_eq!(mesh.face_count(), 50); // 5*5*2

        let result = s.simplify(&mesh, 0.5).unwrap();
        // floor(0.5 * 36) contractions, one vertex each
        assert_eq!(result.vertex_count(), 18);
        assert!(result.face_count() < mesh.face_count());
        assert!(result.face_count() > 0);
        assert!(result.check_faces().is_ok());
    }

    #[test]
    fn test_tetrahedron_unchanged_with_homotopy() {
        let s = ContractionSimplifier::new();
        let mesh = make_tetrahedron();
        let result = s.simplify(&mesh, 1.0).unwrap();
        assert_eq!(result.vertex_count(), 4);
        assert_eq!(result.face_count(), 4);
    }

    #[test]
    fn test_bad_face_index() {
        let s = ContractionSimplifier::new();
        let mut mesh = make_single_triangle();
        mesh.add_face([0, 1, 9]);
        assert!(s.simplify(&mesh, 0.5).is_err());
    }
}
