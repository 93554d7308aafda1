//! Triangle mesh geometry.
//!
//! A `Mesh` is fully built at load time (faces validated, vertex normals and
//! bounds computed) and immutable afterwards, so it can be shared across
//! render threads by reference.

use lumo_math::{Aabb, Vec3};

use crate::material::Material;

/// Three 0-based indices into the vertex buffer.
pub type Face = [u32; 3];

/// A triangle mesh with a single material.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Object name (from `o`, or the file stem)
    name: String,

    /// Vertex positions
    vertices: Vec<Vec3>,

    /// Triangles; every index is < `vertices.len()`
    faces: Vec<Face>,

    /// One normal per vertex: normalized sum of adjacent unit face normals
    vertex_normals: Vec<Vec3>,

    /// Interpolate vertex normals instead of using flat face normals
    smooth_shading: bool,

    material: Material,

    bounds: Aabb,
}

impl Mesh {
    /// Build a mesh, dropping faces that index outside the vertex buffer.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vec3>,
        faces: Vec<Face>,
        smooth_shading: bool,
        material: Material,
    ) -> Self {
        let name = name.into();
        let vertex_count = vertices.len();

        let face_count = faces.len();
        let faces: Vec<Face> = faces
            .into_iter()
            .filter(|face| face.iter().all(|&i| (i as usize) < vertex_count))
            .collect();

        if faces.len() != face_count {
            log::warn!(
                "Mesh '{}': dropped {} face(s) with indices outside {} vertices",
                name,
                face_count - faces.len(),
                vertex_count
            );
        }

        let vertex_normals = Self::compute_vertex_normals(&vertices, &faces);
        let bounds = Aabb::enclosing(&vertices);

        Self {
            name,
            vertices,
            faces,
            vertex_normals,
            smooth_shading,
            material,
            bounds,
        }
    }

    /// Compute smooth vertex normals by summing unit face normals.
    ///
    /// Faces are not area-weighted. Vertices touched only by degenerate faces
    /// (or by none) get a zero normal.
    fn compute_vertex_normals(vertices: &[Vec3], faces: &[Face]) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; vertices.len()];

        for face in faces {
            let [i0, i1, i2] = face.map(|i| i as usize);
            let edge1 = vertices[i1] - vertices[i0];
            let edge2 = vertices[i2] - vertices[i0];
            let face_normal = edge1.cross(edge2).normalize_or_zero();

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
        }

        normals
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_normals(&self) -> &[Vec3] {
        &self.vertex_normals
    }

    pub fn smooth_shading(&self) -> bool {
        self.smooth_shading
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Axis-aligned bounds of all vertices.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Positions of the three corners of a face.
    ///
    /// Panics if `face_id` is out of range.
    #[inline]
    pub fn triangle(&self, face_id: usize) -> [Vec3; 3] {
        self.faces[face_id].map(|i| self.vertices[i as usize])
    }

    /// Vertex normals of the three corners of a face.
    #[inline]
    pub fn triangle_normals(&self, face_id: usize) -> [Vec3; 3] {
        self.faces[face_id].map(|i| self.vertex_normals[i as usize])
    }

    /// Unit geometric normal `normalize(cross(v1 - v0, v2 - v0))`.
    pub fn face_normal(&self, face_id: usize) -> Vec3 {
        let [v0, v1, v2] = self.triangle(face_id);
        (v1 - v0).cross(v2 - v0).normalize_or_zero()
    }
}
