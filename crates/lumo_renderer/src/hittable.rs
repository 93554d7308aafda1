//! Hittable trait and hit records for ray-object intersection.

use lumo_core::Material;
use lumo_math::{Aabb, Ray, Vec3};

/// Nearest intersection with a single object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceHit {
    /// Ray parameter of the hit, always > `HIT_EPSILON`
    pub t: f64,
    /// Index of the triangle that was hit
    pub face_id: usize,
}

/// Stable handle to a geometry in a `Scene`, in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub usize);

/// Nearest intersection across a whole scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub t: f64,
    pub face_id: usize,
    /// The geometry that owns `face_id`
    pub mesh: MeshId,
}

impl RayHit {
    /// Hit position along `ray`.
    #[inline]
    pub fn point(&self, ray: &Ray) -> Vec3 {
        ray.at(self.t)
    }
}

/// Trait for objects that can be hit by rays.
///
/// Implementors are immutable during rendering and shared between threads.
pub trait Hittable: Send + Sync {
    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> &Aabb;

    /// Cheap conservative test: `false` only if `hit` would also miss.
    fn bound_hit(&self, ray: &Ray) -> bool {
        self.bounding_box().hit(ray)
    }

    /// Nearest hit beyond `HIT_EPSILON`.
    ///
    /// Does not consult the bounding box; callers gate it with `bound_hit`.
    fn hit(&self, ray: &Ray) -> Option<FaceHit>;

    /// Unit shading normal for a face previously hit by `ray`.
    ///
    /// Not oriented towards the ray.
    fn normal_at(&self, face_id: usize, ray: &Ray) -> Vec3;

    fn material(&self) -> &Material;
}
