//! Lumo Renderer - CPU Monte Carlo path tracing over triangle meshes.
//!
//! The transport core is `Scene::trace_path`: each sample walks from the
//! primary hit through up to `max_bounces` surfaces, gathering emission
//! weighted by the diffuse colors met along the way. Bounce directions blend
//! a mirror reflection and a cosine-weighted diffuse sample by roughness.
//!
//! Around it sit a pinhole camera, bucketed parallel rendering and PPM/PNG
//! encoders.

mod bucket;
mod camera;
mod geometry;
mod hittable;
mod mesh;
mod output;
mod renderer;
mod sampling;
mod scene;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use geometry::Geometry;
pub use hittable::{FaceHit, Hittable, MeshId, RayHit};
pub use output::{save_png, save_ppm, write_ppm};
pub use renderer::{color_to_bytes, pixel_rng, render, render_pixel, render_with_progress, ImageBuffer, RenderConfig};
pub use sampling::{bounce_direction, cosine_hemisphere, face_forward, reflect, tangent_frame};
pub use scene::Scene;
pub use triangle::{barycentric, intersect_triangle, Barycentric};

/// Re-export math types from lumo_math
pub use lumo_math::{Aabb, Color, Ray, Vec3};
