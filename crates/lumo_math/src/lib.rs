//! Math primitives for lumo.
//!
//! Everything is double precision: `Vec3` is `glam::DVec3` and is used
//! interchangeably as a point, a direction or a linear RGB color.

// Re-export glam for convenience
pub use glam;
pub use glam::{dvec3, DVec3};

mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;

/// Point, direction or linear color.
pub type Vec3 = DVec3;

/// Linear RGB color (components nominally in [0, 1], unbounded above for emitters).
pub type Color = DVec3;

/// Minimum accepted hit distance along a ray.
///
/// Shared by triangle, mesh and scene queries so a bounced ray never
/// re-hits the surface it starts on.
pub const HIT_EPSILON: f64 = 1e-4;

/// Determinant threshold below which a ray is treated as parallel to a triangle.
pub const DETERMINANT_EPSILON: f64 = 1e-6;

/// Direction components smaller than this are treated as axis-parallel by the slab test.
pub const PARALLEL_EPSILON: f64 = 1e-12;
