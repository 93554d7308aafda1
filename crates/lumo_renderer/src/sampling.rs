//! Bounce direction sampling.

use std::f64::consts::PI;

use lumo_math::Vec3;
use rand::{Rng, RngCore};

/// Mirror `v` about the plane with unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Flip `n` so it faces against `direction`.
#[inline]
pub fn face_forward(n: Vec3, direction: Vec3) -> Vec3 {
    if direction.dot(n) > 0.0 {
        -n
    } else {
        n
    }
}

/// Tangent and bitangent completing a right-handed frame around unit `n`.
pub fn tangent_frame(n: Vec3) -> (Vec3, Vec3) {
    let seed = if n.x.abs() > 0.99 { Vec3::Y } else { Vec3::X };
    let tangent = n.cross(seed).normalize();
    let bitangent = n.cross(tangent);
    (tangent, bitangent)
}

/// Cosine-weighted direction on the hemisphere around unit `n`.
pub fn cosine_hemisphere(n: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let r1: f64 = rng.gen();
    let r2: f64 = rng.gen();

    let phi = 2.0 * PI * r2;
    let radius = (1.0 - r1).sqrt();
    let local = Vec3::new(phi.cos() * radius, phi.sin() * radius, r1.sqrt());

    let (tangent, bitangent) = tangent_frame(n);
    (local.x * tangent + local.y * bitangent + local.z * n).normalize()
}

/// Outgoing direction for a ray arriving along `direction` at a surface with
/// shading normal `n` (already facing the ray).
///
/// Blends the mirror reflection (roughness 0) towards a cosine-weighted
/// diffuse sample (roughness 1). Falls back to `n` if the blend cancels out.
pub fn bounce_direction(direction: Vec3, n: Vec3, roughness: f64, rng: &mut dyn RngCore) -> Vec3 {
    let mirror = reflect(direction.normalize(), n);
    let diffuse = cosine_hemisphere(n, rng);

    let blended = mirror.lerp(diffuse, roughness);
    if blended.length_squared() < 1e-12 {
        n
    } else {
        blended.normalize()
    }
}
