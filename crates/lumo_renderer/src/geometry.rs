//! Closed set of renderable primitives.

use lumo_core::{Material, Mesh};
use lumo_math::{Aabb, Ray, Vec3};

use crate::hittable::{FaceHit, Hittable};

/// Every kind of geometry a `Scene` can hold.
///
/// New primitive kinds are added as variants; every method dispatches by `match`.
#[derive(Clone, Debug)]
pub enum Geometry {
    TriangleMesh(Mesh),
}

impl Geometry {
    pub fn name(&self) -> &str {
        match self {
            Geometry::TriangleMesh(mesh) => mesh.name(),
        }
    }

    /// Number of triangles this geometry tests per ray.
    pub fn triangle_count(&self) -> usize {
        match self {
            Geometry::TriangleMesh(mesh) => mesh.triangle_count(),
        }
    }
}

impl From<Mesh> for Geometry {
    fn from(mesh: Mesh) -> Self {
        Geometry::TriangleMesh(mesh)
    }
}

impl Hittable for Geometry {
    fn bounding_box(&self) -> &Aabb {
        match self {
            Geometry::TriangleMesh(mesh) => mesh.bounding_box(),
        }
    }

    fn bound_hit(&self, ray: &Ray) -> bool {
        match self {
            Geometry::TriangleMesh(mesh) => mesh.bound_hit(ray),
        }
    }

    fn hit(&self, ray: &Ray) -> Option<FaceHit> {
        match self {
            Geometry::TriangleMesh(mesh) => mesh.hit(ray),
        }
    }

    fn normal_at(&self, face_id: usize, ray: &Ray) -> Vec3 {
        match self {
            Geometry::TriangleMesh(mesh) => mesh.normal_at(face_id, ray),
        }
    }

    fn material(&self) -> &Material {
        match self {
            Geometry::TriangleMesh(mesh) => Hittable::material(mesh),
        }
    }
}
