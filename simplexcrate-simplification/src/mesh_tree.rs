//! Triangle meshes as simplex trees
//!
//! A [`MeshSimplexTree`] stores every point of a mesh as a vertex of a
//! [`SimplexTree`] whose payload is the point itself. Coincident points share
//! one vertex, so contracting an edge never tears the surface apart.

use crate::contraction::{contract_edges, SimplifyStats, DEFAULT_IDLE_PASS_LIMIT};
use simplexcrate_core::{coordinate_key, Point3f, Result, TriangleMesh};
use simplexcrate_tree::{SimplexTree, VertexId};
use std::collections::HashMap;
use tracing::debug;

/// A simplex tree over mesh points, carrying coordinates as vertex payloads
#[derive(Debug, Clone, Default)]
pub struct MeshSimplexTree {
    tree: SimplexTree<Point3f>,
}

impl MeshSimplexTree {
    /// Build a tree from a triangle soup.
    ///
    /// Points with identical coordinates become one vertex, numbered in
    /// order of first appearance. A triangle with repeated corners is
    /// inserted as the edge or vertex it degenerates to.
    pub fn from_triangles(triangles: &[[Point3f; 3]]) -> Self {
        let mesh = TriangleMesh::from_triangles(triangles);
        Self::from_indexed(&mesh.vertices, &mesh.faces)
    }

    /// Build a tree from an indexed mesh, merging coincident points
    pub fn from_mesh(mesh: &TriangleMesh) -> Result<Self> {
        mesh.check_faces()?;
        Ok(Self::from_indexed(&mesh.vertices, &mesh.faces))
    }

    fn from_indexed(vertices: &[Point3f], faces: &[[usize; 3]]) -> Self {
        let mut ids: HashMap<[u32; 3], VertexId> = HashMap::with_capacity(vertices.len());
        let canonical: Vec<VertexId> = vertices
            .iter()
            .map(|p| {
                let next = ids.len();
                *ids.entry(coordinate_key(p)).or_insert(next)
            })
            .collect();

        let mut tree = SimplexTree::new();
        for face in faces {
            let mut corners: Vec<(VertexId, Point3f)> = face
                .iter()
                .map(|&index| (canonical[index], vertices[index]))
                .collect();
            corners.sort_by_key(|&(id, _)| id);
            corners.dedup_by_key(|corner| corner.0);

            let simplex: Vec<VertexId> = corners.iter().map(|&(id, _)| id).collect();
            let points: Vec<Point3f> = corners.iter().map(|&(_, p)| p).collect();
            tree.add(&simplex, Some(points.as_slice()));
        }

        debug!(
            faces = faces.len(),
            points = vertices.len(),
            vertices = ids.len(),
            "built mesh simplex tree"
        );
        Self { tree }
    }

    /// The underlying complex
    pub fn tree(&self) -> &SimplexTree<Point3f> {
        &self.tree
    }

    pub fn into_tree(self) -> SimplexTree<Point3f> {
        self.tree
    }

    pub fn vertex_count(&self) -> usize {
        self.tree.get_simplices(0).len()
    }

    pub fn triangle_count(&self) -> usize {
        self.tree.get_simplices(2).len()
    }

    /// Contract up to `n` edges, see [`contract_edges`].
    pub fn simplify(&mut self, n: usize, keep_homotopy: bool) -> SimplifyStats {
        contract_edges(&mut self.tree, n, keep_homotopy, DEFAULT_IDLE_PASS_LIMIT)
    }

    /// Like [`simplify`](Self::simplify) with an explicit idle pass limit
    pub fn simplify_with_limit(
        &mut self,
        n: usize,
        keep_homotopy: bool,
        idle_pass_limit: usize,
    ) -> SimplifyStats {
        contract_edges(&mut self.tree, n, keep_homotopy, idle_pass_limit)
    }

    /// Coordinates of every remaining 2-simplex, in ascending vertex order
    pub fn triangles(&self) -> Vec<[Point3f; 3]> {
        self.tree
            .simplices(2)
            .filter_map(|s| {
                Some([
                    *self.tree.value(s[0])?,
                    *self.tree.value(s[1])?,
                    *self.tree.value(s[2])?,
                ])
            })
            .collect()
    }

    /// Convert back to an indexed mesh.
    ///
    /// Every vertex that still carries a point is kept, including vertices
    /// no longer covered by a triangle.
    pub fn to_triangle_mesh(&self) -> TriangleMesh {
        let mut mesh = TriangleMesh::new();
        let mut index: HashMap<VertexId, usize> = HashMap::new();
        for v in self.tree.vertices() {
            if let Some(p) = self.tree.value(v) {
                index.insert(v, mesh.add_vertex(*p));
            }
        }
        for s in self.tree.simplices(2) {
            if let (Some(&a), Some(&b), Some(&c)) =
                (index.get(&s[0]), index.get(&s[1]), index.get(&s[2]))
            {
                mesh.add_face([a, b, c]);
            }
        }
        mesh
    }
}

impl From<SimplexTree<Point3f>> for MeshSimplexTree {
    fn from(tree: SimplexTree<Point3f>) -> Self {
        Self { tree }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use simplexcrate_core::Point3;

    fn quad_soup() -> Vec<[Point3f; 3]> {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(1.0, 1.0, 0.0);
        let d = Point3::new(0.0, 1.0, 0.0);
        vec![[a, b, c], [a, c, d]]
    }

    #[test]
    fn test_coincident_points_share_a_vertex() {
        let mesh = MeshSimplexTree::from_triangles(&quad_soup());
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.tree().get_simplices(1).len(), 5);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.tree().contains(&[0, 2]));
        assert!(mesh.tree().validate().is_ok());
    }

    #[test]
    fn test_vertices_carry_points() {
        let mesh = MeshSimplexTree::from_triangles(&quad_soup());
        let p = mesh.tree().value(2).unwrap();
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 1.0);
        assert_relative_eq!(p.z, 0.0);
    }

    #[test]
    fn test_negative_zero_is_merged() {
        let soup = [
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            [
                Point3::new(-0.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(-1.0, 0.0, 0.0),
            ],
        ];
        let mesh = MeshSimplexTree::from_triangles(&soup);
        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn test_degenerate_triangle_becomes_edge() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 0.0);
        let mesh = MeshSimplexTree::from_triangles(&[[a, b, a]]);
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.tree().contains(&[0, 1]));
    }

    #[test]
    fn test_from_mesh_merges_duplicate_points() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [3, 4, 2]],
        );
        let tree = MeshSimplexTree::from_mesh(&mesh).unwrap();
        assert_eq!(tree.vertex_count(), 4);
        assert!(tree.tree().contains(&[1, 2, 3]));
    }

    #[test]
    fn test_from_mesh_rejects_bad_indices() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            vec![[0, 1, 5]],
        );
        assert!(MeshSimplexTree::from_mesh(&mesh).is_err());
    }

    #[test]
    fn test_round_trip_keeps_geometry() {
        let tree = MeshSimplexTree::from_triangles(&quad_soup());
        let mesh = tree.to_triangle_mesh();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert!(mesh.check_faces().is_ok());

        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(min.x, 0.0);
        assert_relative_eq!(max.x, 1.0);
        assert_relative_eq!(max.y, 1.0);

        assert_eq!(tree.triangles().len(), 2);
    }

    #[test]
    fn test_triangle_collapses_to_a_point() {
        let mut tree = MeshSimplexTree::from_triangles(&quad_soup()[..1]);
        let stats = tree.simplify(10, true);
        assert_eq!(stats.contractions, 2);
        assert_eq!(stats.attempts, 3);
        assert_eq!(stats.passes, 3);
        assert_eq!(tree.vertex_count(), 1);
        assert!(tree.triangles().is_empty());
        assert_eq!(tree.tree().euler_characteristic(), 1);

        // the surviving vertex keeps its own point
        let p = tree.tree().value(0).unwrap();
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 0.0);

        let mesh = tree.to_triangle_mesh();
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.face_count(), 0);
    }
}
