//! Mesh data structures and functionality

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// A triangle mesh with vertices and faces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Create a mesh from a triangle soup, sharing coincident points.
    ///
    /// Points are deduplicated by exact coordinate identity and numbered in
    /// order of first appearance.
    pub fn from_triangles(triangles: &[[Point3f; 3]]) -> Self {
        let mut mesh = Self::new();
        let mut lookup = std::collections::HashMap::new();
        for triangle in triangles {
            let mut face = [0usize; 3];
            for (slot, p) in face.iter_mut().zip(triangle) {
                *slot = *lookup
                    .entry(coordinate_key(p))
                    .or_insert_with(|| mesh.add_vertex(*p));
            }
            mesh.add_face(face);
        }
        mesh
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Ensure every face references an existing vertex
    pub fn check_faces(&self) -> Result<()> {
        for (fi, face) in self.faces.iter().enumerate() {
            if let Some(&bad) = face.iter().find(|&&v| v >= self.vertices.len()) {
                return Err(Error::InvalidData(format!(
                    "face {} references vertex {} but the mesh has {} vertices",
                    fi,
                    bad,
                    self.vertices.len()
                )));
            }
        }
        Ok(())
    }

    /// Iterate over faces as coordinate triples
    ///
    /// Faces with out-of-range indices are skipped; call [`check_faces`](Self::check_faces)
    /// first when the mesh comes from an untrusted source.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3f; 3]> + '_ {
        self.faces.iter().filter_map(|face| {
            Some([
                *self.vertices.get(face[0])?,
                *self.vertices.get(face[1])?,
                *self.vertices.get(face[2])?,
            ])
        })
    }

    /// Get the axis-aligned bounding box of the vertices
    pub fn bounding_box(&self) -> (Point3f, Point3f) {
        if self.vertices.is_empty() {
            return (Point3f::origin(), Point3f::origin());
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for vertex in &self.vertices {
            min.x = min.x.min(vertex.x);
            min.y = min.y.min(vertex.y);
            min.z = min.z.min(vertex.z);

            max.x = max.x.max(vertex.x);
            max.y = max.y.max(vertex.y);
            max.z = max.z.max(vertex.z);
        }

        (min, max)
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}
