//! `Hittable` for triangle meshes.

use lumo_core::{Material, Mesh};
use lumo_math::{Aabb, Ray, Vec3};

use crate::hittable::{FaceHit, Hittable};
use crate::triangle::{barycentric, intersect_triangle};

impl Hittable for Mesh {
    fn bounding_box(&self) -> &Aabb {
        self.bounds()
    }

    /// Linear scan over every face, keeping the first strictly nearest hit.
    fn hit(&self, ray: &Ray) -> Option<FaceHit> {
        let mut closest: Option<FaceHit> = None;

        for face_id in 0..self.triangle_count() {
            let Some(t) = intersect_triangle(ray, self.triangle(face_id)) else {
                continue;
            };
            if closest.map_or(true, |hit| t < hit.t) {
                closest = Some(FaceHit { t, face_id });
            }
        }

        closest
    }

    fn normal_at(&self, face_id: usize, ray: &Ray) -> Vec3 {
        let flat = self.face_normal(face_id);
        if !self.smooth_shading() {
            return flat;
        }

        match barycentric(ray, self.triangle(face_id)) {
            Some(bary) => {
                let blended = bary.interpolate(self.triangle_normals(face_id));
                let normal = blended.normalize_or_zero();
                if normal == Vec3::ZERO {
                    flat
                } else {
                    normal
                }
            }
            None => flat,
        }
    }

    fn material(&self) -> &Material {
        Mesh::material(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_core::load_mesh_from_str;
    use lumo_core::MaterialPolicy;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Square in the z = -3 plane split along its diagonal.
    fn square(smooth: bool) -> Mesh {
        Mesh::new(
            "square",
            vec![
                Vec3::new(-1.0, -1.0, -3.0),
                Vec3::new(1.0, -1.0, -3.0),
                Vec3::new(1.0, 1.0, -3.0),
                Vec3::new(-1.0, 1.0, -3.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
            smooth,
            Material::default(),
        )
    }

    /// Two faces folded 90 degrees along the y axis edge.
    fn fold() -> Mesh {
        Mesh::new(
            "fold",
            vec![
                Vec3::new(0.0, -1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(-1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, -1.0),
            ],
            vec![[0, 1, 2], [1, 0, 3]],
            true,
            Material::default(),
        )
    }

    #[test]
    fn test_hit_picks_nearest_face() {
        // Two parallel triangles; the nearer one is listed second
        let mesh = Mesh::new(
            "stack",
            vec![
                Vec3::new(-1.0, -1.0, -5.0),
                Vec3::new(1.0, -1.0, -5.0),
                Vec3::new(0.0, 1.0, -5.0),
                Vec3::new(-1.0, -1.0, -2.0),
                Vec3::new(1.0, -1.0, -2.0),
                Vec3::new(0.0, 1.0, -2.0),
            ],
            vec![[0, 1, 2], [3, 4, 5]],
            false,
            Material::default(),
        );

        let hit = mesh.hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)).unwrap();
        assert_eq!(hit.face_id, 1);
        assert!((hit.t - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_miss() {
        let mesh = square(false);
        assert!(mesh.hit(&Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_Z)).is_none());
        assert!(mesh.hit(&Ray::new(Vec3::ZERO, Vec3::Z)).is_none());
    }

    #[test]
    fn test_flat_normal() {
        let mesh = square(false);
        let ray = Ray::new(Vec3::new(0.5, -0.5, 0.0), Vec3::NEG_Z);
        let hit = mesh.hit(&ray).unwrap();
        assert_eq!(mesh.normal_at(hit.face_id, &ray), Vec3::Z);
    }

    #[test]
    fn test_smooth_normal_on_coplanar_faces() {
        let mesh = square(true);
        let ray = Ray::new(Vec3::new(0.3, 0.6, 0.0), Vec3::NEG_Z);
        let hit = mesh.hit(&ray).unwrap();
        assert!((mesh.normal_at(hit.face_id, &ray) - Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_smooth_normal_continuous_across_shared_edge() {
        // Coplanar pair, evaluated on the shared diagonal from both faces
        let mesh = square(true);
        let ray = Ray::new(Vec3::new(0.2, 0.2, 0.0), Vec3::NEG_Z);
        let a = mesh.normal_at(0, &ray);
        let b = mesh.normal_at(1, &ray);
        assert!((a - b).length() < 1e-12);

        // Folded pair: the blend depends only on the edge's vertex normals
        let mesh = fold();
        for y in [-0.8, -0.3, 0.0, 0.4, 0.9] {
            let ray = Ray::new(Vec3::new(1.0, y, 1.0), Vec3::new(-1.0, 0.0, -1.0));
            let a = mesh.normal_at(0, &ray);
            let b = mesh.normal_at(1, &ray);
            assert!((a - b).length() < 1e-9, "y={}: {:?} vs {:?}", y, a, b);
            assert!((a.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_smooth_normal_interpolates_between_faces() {
        let mesh = fold();
        // Face 0 lies in the z = 0 plane, its far corner has a pure face normal
        let n0 = mesh.face_normal(0);
        let ray = Ray::new(Vec3::new(-0.9, 0.0, 1.0), Vec3::NEG_Z);
        let hit = mesh.hit(&ray).unwrap();
        assert_eq!(hit.face_id, 0);

        let n = mesh.normal_at(0, &ray);
        assert!(n.dot(n0) > 0.99);
        assert!(n.dot(n0) < 1.0);
    }

    #[test]
    fn test_bound_hit_is_sound() {
        // Every ray the exact test accepts must pass the prefilter
        let mut rng = StdRng::seed_from_u64(42);
        let obj = "v -1 -1 -3\nv 1 -1 -3\nv 0 1 -2\nv 0 0 -4\nf 1 2 3\nf 1 2 4\nf 2 3 4\nf 3 1 4\n";
        let mesh = load_mesh_from_str(obj, ".", MaterialPolicy::Fallback).unwrap();

        let mut accepted = 0;
        for _ in 0..5000 {
            let origin = Vec3::new(
                rng.gen_range(-4.0..4.0),
                rng.gen_range(-4.0..4.0),
                rng.gen_range(-6.0..2.0),
            );

            // Aim at a uniformly sampled point on a random face
            let [a, b, c] = mesh.triangle(rng.gen_range(0..mesh.triangle_count()));
            let (mut r1, mut r2): (f64, f64) = (rng.gen(), rng.gen());
            if r1 + r2 > 1.0 {
                (r1, r2) = (1.0 - r1, 1.0 - r2);
            }
            let target = a + r1 * (b - a) + r2 * (c - a);
            if (target - origin).length_squared() < 1e-6 {
                continue;
            }
            let ray = Ray::new(origin, target - origin);

            if mesh.hit(&ray).is_some() {
                accepted += 1;
                assert!(mesh.bound_hit(&ray), "prefilter rejected a hit ray {:?}", ray);
            }
        }
        assert!(accepted > 4000, "only {} rays hit the mesh", accepted);
    }

    #[test]
    fn test_round_trip_face_id() {
        // A loaded grid answers rays aimed at each face's centroid with that face
        let mut obj = String::new();
        for j in 0..4 {
            for i in 0..4 {
                obj.push_str(&format!("v {} {} -3\n", i, j));
            }
        }
        for j in 0..3 {
            for i in 0..3 {
                let a = j * 4 + i + 1;
                obj.push_str(&format!("f {} {} {}\n", a, a + 1, a + 5));
                obj.push_str(&format!("f {} {} {}\n", a, a + 5, a + 4));
            }
        }

        let mesh = load_mesh_from_str(&obj, ".", MaterialPolicy::Fallback).unwrap();
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.triangle_count(), 18);

        for face_id in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle(face_id);
            let centroid = (a + b + c) / 3.0;
            let ray = Ray::new(centroid + Vec3::new(0.0, 0.0, 4.0), Vec3::NEG_Z);

            let hit = mesh.hit(&ray).unwrap();
            assert_eq!(hit.face_id, face_id);
            assert!((hit.t - 4.0).abs() < 1e-9);
        }
    }
}
