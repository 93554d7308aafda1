//! Ray-triangle intersection.
//!
//! Uses the Möller-Trumbore algorithm. Only the hit distance is returned;
//! shading recovers the barycentric coordinates separately.

use lumo_math::{Ray, Vec3, DETERMINANT_EPSILON, HIT_EPSILON};

/// Barycentric coordinates of a point on a triangle.
///
/// The point is `w * v0 + u * v1 + v * v2` with `w = 1 - u - v`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Barycentric {
    pub u: f64,
    pub v: f64,
    pub w: f64,
}

impl Barycentric {
    /// Blend three per-vertex values.
    #[inline]
    pub fn interpolate(&self, [a, b, c]: [Vec3; 3]) -> Vec3 {
        self.w * a + self.u * b + self.v * c
    }
}

/// Möller-Trumbore terms shared by the distance and barycentric queries.
#[inline]
fn solve(ray: &Ray, [v0, v1, v2]: [Vec3; 3]) -> Option<(f64, Barycentric)> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let p = ray.direction().cross(edge2);
    let det = edge1.dot(p);

    // Ray is parallel to the triangle, or the triangle is degenerate
    if det.abs() < DETERMINANT_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = ray.origin() - v0;
    let u = tvec.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = tvec.cross(edge1);
    let v = ray.direction().dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    Some((t, Barycentric { u, v, w: 1.0 - u - v }))
}

/// Distance along `ray` to the triangle, if it is hit beyond `HIT_EPSILON`.
#[inline]
pub fn intersect_triangle(ray: &Ray, triangle: [Vec3; 3]) -> Option<f64> {
    match solve(ray, triangle) {
        Some((t, _)) if t > HIT_EPSILON => Some(t),
        _ => None,
    }
}

/// Barycentric coordinates where `ray` crosses the triangle.
///
/// Applies the same rejection rules as `intersect_triangle`, so it returns
/// `Some` exactly when that function does.
pub fn barycentric(ray: &Ray, triangle: [Vec3; 3]) -> Option<Barycentric> {
    match solve(ray, triangle) {
        Some((t, bary)) if t > HIT_EPSILON => Some(bary),
        _ => None,
    }
}
