//! Scene aggregation and the path-tracing estimator.

use lumo_core::Mesh;
use lumo_math::{Aabb, Color, Ray};
use rand::RngCore;

use crate::geometry::Geometry;
use crate::hittable::{Hittable, MeshId, RayHit};
use crate::sampling::{bounce_direction, face_forward};

/// An unordered collection of geometry, exclusively owned.
///
/// Immutable while rendering; `&Scene` is shared across render threads.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    geometry: Vec<Geometry>,
    bounds: Aabb,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from meshes, in order.
    pub fn from_meshes(meshes: impl IntoIterator<Item = Mesh>) -> Self {
        let mut scene = Self::new();
        for mesh in meshes {
            scene.add(mesh);
        }
        scene
    }

    /// Add geometry and return its handle.
    pub fn add(&mut self, geometry: impl Into<Geometry>) -> MeshId {
        let geometry = geometry.into();
        self.bounds = Aabb::surrounding(&self.bounds, geometry.bounding_box());
        self.geometry.push(geometry);
        MeshId(self.geometry.len() - 1)
    }

    pub fn get(&self, id: MeshId) -> Option<&Geometry> {
        self.geometry.get(id.0)
    }

    pub fn geometry(&self) -> &[Geometry] {
        &self.geometry
    }

    /// Get the number of geometries.
    pub fn len(&self) -> usize {
        self.geometry.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    /// Total triangles across all geometry.
    pub fn triangle_count(&self) -> usize {
        self.geometry.iter().map(Geometry::triangle_count).sum()
    }

    /// Bounds of everything in the scene.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Nearest hit across all geometry, skipping meshes whose bounds the ray misses.
    ///
    /// Ties go to the geometry added first.
    pub fn hit(&self, ray: &Ray) -> Option<RayHit> {
        self.nearest(ray, true)
    }

    /// Same as `hit` without the bounding-box prefilter.
    pub fn hit_exhaustive(&self, ray: &Ray) -> Option<RayHit> {
        self.nearest(ray, false)
    }

    fn nearest(&self, ray: &Ray, prefilter: bool) -> Option<RayHit> {
        let mut closest: Option<RayHit> = None;

        for (index, geometry) in self.geometry.iter().enumerate() {
            if prefilter && !geometry.bound_hit(ray) {
                continue;
            }
            let Some(hit) = geometry.hit(ray) else {
                continue;
            };
            if closest.map_or(true, |c| hit.t < c.t) {
                closest = Some(RayHit {
                    t: hit.t,
                    face_id: hit.face_id,
                    mesh: MeshId(index),
                });
            }
        }

        closest
    }

    /// Monte Carlo estimate of the radiance arriving back along `ray`.
    ///
    /// Averages `samples` independent walks. Each walk gathers emission at
    /// up to `max_bounces` surfaces, counting the primary hit, and is weighted
    /// by the product of diffuse colors met so far. Returns black when
    /// `samples` is 0 or the ray hits nothing.
    pub fn trace_path(&self, ray: &Ray, samples: u32, max_bounces: u32, rng: &mut dyn RngCore) -> Color {
        if samples == 0 {
            return Color::ZERO;
        }

        // Resolved once; every walk starts from the same surface
        let Some(primary) = self.hit(ray) else {
            return Color::ZERO;
        };

        let mut sum = Color::ZERO;
        for _ in 0..samples {
            sum += self.walk(*ray, primary, max_bounces, rng);
        }

        sum / samples as f64
    }

    /// One light path starting at `hit`.
    fn walk(&self, mut ray: Ray, mut hit: RayHit, max_bounces: u32, rng: &mut dyn RngCore) -> Color {
        let mut throughput = Color::ONE;
        let mut accumulated = Color::ZERO;
        let mut depth = 1;

        loop {
            let geometry = &self.geometry[hit.mesh.0];
            let material = geometry.material();

            accumulated += throughput * material.emission;
            throughput *= material.diffuse;

            if depth >= max_bounces || throughput == Color::ZERO {
                break;
            }

            let normal = face_forward(geometry.normal_at(hit.face_id, &ray), ray.direction());
            let direction = bounce_direction(ray.direction(), normal, material.roughness, rng);
            ray = Ray::new(hit.point(&ray), direction);

            match self.hit(&ray) {
                Some(next) => hit = next,
                None => break,
            }
            depth += 1;
        }

        accumulated
    }
}
