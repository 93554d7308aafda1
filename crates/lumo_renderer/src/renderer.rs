//! Pixel loop and image buffer.
//!
//! Every pixel gets its own random stream derived from the render seed and
//! the pixel index, so an image is reproducible regardless of how buckets
//! are scheduled across threads.

use std::sync::atomic::{AtomicUsize, Ordering};

use lumo_core::RenderSettings;
use lumo_math::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::camera::Camera;
use crate::scene::Scene;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Paths traced per pixel
    pub samples: u32,
    /// Surfaces visited per path, counting the primary hit
    pub max_bounces: u32,
    /// Base seed for per-pixel random streams
    pub seed: u64,
    /// Tile edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples: 3,
            max_bounces: 3,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl From<&RenderSettings> for RenderConfig {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            samples: settings.samples,
            max_bounces: settings.max_bounces,
            seed: settings.seed,
            bucket_size: settings.bucket_size.max(1),
        }
    }
}

/// Random stream for one pixel.
pub fn pixel_rng(seed: u64, pixel_index: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ pixel_index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Render a single pixel.
pub fn render_pixel(scene: &Scene, camera: &Camera, x: u32, y: u32, config: &RenderConfig) -> Color {
    let pixel_index = y as u64 * camera.image_width as u64 + x as u64;
    let mut rng = pixel_rng(config.seed, pixel_index);

    let ray = camera.primary_ray(x, y);
    scene.trace_path(&ray, config.samples, config.max_bounces, &mut rng)
}

/// Linear color to 8-bit RGB: `floor(255.999 * min(c, 1))` per channel.
///
/// Negative components are a caller error; the float-to-int cast maps them to 0.
pub fn color_to_bytes(color: Color) -> [u8; 3] {
    color.to_array().map(|c| (255.999 * c.min(1.0)) as u8)
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Row-major offset of (x, y), in `usize` to stay exact past `u32::MAX` pixels.
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Copy a finished bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        for ((x, y), color) in result.bucket.pixels().zip(&result.pixels) {
            self.set(x, y, *color);
        }
    }

    /// Packed RGB bytes, row-major from the top row.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_bytes(*c)).collect()
    }
}

/// Render the entire scene to an image buffer.
pub fn render(scene: &Scene, camera: &Camera, config: &RenderConfig) -> ImageBuffer {
    render_with_progress(scene, camera, config, |_, _, _| {})
}

/// Render buckets in parallel, calling `on_bucket(result, finished, total)`
/// as each bucket completes.
///
/// The callback runs on worker threads in completion order.
pub fn render_with_progress<F>(scene: &Scene, camera: &Camera, config: &RenderConfig, on_bucket: F) -> ImageBuffer
where
    F: Fn(&BucketResult, usize, usize) + Sync,
{
    let buckets = generate_buckets(camera.image_width, camera.image_height, config.bucket_size);
    let total = buckets.len();
    let finished = AtomicUsize::new(0);

    log::debug!(
        "Rendering {}x{} in {} buckets of {} px",
        camera.image_width,
        camera.image_height,
        total,
        config.bucket_size
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let result = BucketResult::new(*bucket, render_bucket(bucket, scene, camera, config));
            let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
            on_bucket(&result, done, total);
            result
        })
        .collect();

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    for result in &results {
        image.write_bucket(result);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_core::{Material, Mesh};
    use lumo_math::Vec3;
    use std::sync::Mutex;

    /// Emissive square filling the middle of the default view.
    fn lamp_scene() -> Scene {
        let lamp = Material::new("lamp", Color::ZERO).with_emission(Color::new(1.0, 0.5, 0.25));
        Scene::from_meshes([Mesh::new(
            "lamp",
            vec![
                Vec3::new(-1.0, -1.0, -1.0),
                Vec3::new(1.0, -1.0, -1.0),
                Vec3::new(1.0, 1.0, -1.0),
                Vec3::new(-1.0, 1.0, -1.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
            false,
            lamp,
        )])
    }

    #[test]
    fn test_color_to_bytes() {
        assert_eq!(color_to_bytes(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_bytes(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_bytes(Color::new(0.5, 0.25, 0.999)), [127, 63, 255]);
        // Values above 1 clamp
        assert_eq!(color_to_bytes(Color::new(4.0, 1.0001, 0.0)), [255, 255, 0]);
        // 1/255 lands just above 1
        assert_eq!(color_to_bytes(Color::splat(1.0 / 255.0)), [1, 1, 1]);
    }

    #[test]
    fn test_render_config_from_settings() {
        let settings = RenderSettings {
            samples: 8,
            max_bounces: 4,
            seed: 11,
            bucket_size: 0,
            ..Default::default()
        };
        let config = RenderConfig::from(&settings);
        assert_eq!(config.samples, 8);
        assert_eq!(config.max_bounces, 4);
        assert_eq!(config.seed, 11);
        assert_eq!(config.bucket_size, 1);
    }

    #[test]
    fn test_render_pixel_center_and_corner() {
        let scene = lamp_scene();
        let camera = Camera::new(16, 16);
        let config = RenderConfig::default();

        assert_eq!(render_pixel(&scene, &camera, 8, 8, &config), Color::new(1.0, 0.5, 0.25));
        assert_eq!(render_pixel(&scene, &camera, 0, 0, &config), Color::ZERO);
    }

    #[test]
    fn test_render_matches_per_pixel_loop() {
        let scene = lamp_scene();
        let camera = Camera::new(20, 12);
        let config = RenderConfig {
            bucket_size: 7,
            ..Default::default()
        };

        let image = render(&scene, &camera, &config);
        assert_eq!(image.pixels.len(), 240);
        for y in 0..camera.image_height {
            for x in 0..camera.image_width {
                assert_eq!(image.get(x, y), render_pixel(&scene, &camera, x, y, &config));
            }
        }
    }

    #[test]
    fn test_render_is_reproducible() {
        // Diffuse floor lit by the lamp: noisy, but seeded per pixel
        let mut scene = lamp_scene();
        let floor = Material::new("floor", Color::splat(0.8)).with_roughness(1.0);
        scene.add(Mesh::new(
            "floor",
            vec![
                Vec3::new(-3.0, -1.5, 1.0),
                Vec3::new(3.0, -1.5, 1.0),
                Vec3::new(3.0, -1.5, -3.0),
                Vec3::new(-3.0, -1.5, -3.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
            false,
            floor,
        ));
        let camera = Camera::new(24, 24);
        let config = RenderConfig {
            samples: 4,
            bucket_size: 5,
            seed: 3,
            ..Default::default()
        };

        let a = render(&scene, &camera, &config);
        let b = render(&scene, &camera, &RenderConfig { bucket_size: 16, ..config.clone() });
        assert_eq!(a.pixels, b.pixels);

        let c = render(&scene, &camera, &RenderConfig { seed: 4, ..config });
        assert_ne!(a.pixels, c.pixels);
    }

    #[test]
    fn test_progress_reports_every_bucket() {
        let scene = lamp_scene();
        let camera = Camera::new(30, 30);
        let config = RenderConfig {
            bucket_size: 8,
            ..Default::default()
        };

        let seen = Mutex::new(Vec::new());
        render_with_progress(&scene, &camera, &config, |result, done, total| {
            assert_eq!(total, 16);
            seen.lock().unwrap().push((result.bucket.index, done));
        });

        let mut seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 16);
        seen.sort();
        assert_eq!(seen.iter().map(|s| s.0).collect::<Vec<_>>(), (0..16).collect::<Vec<_>>());

        let mut counts: Vec<usize> = seen.iter().map(|s| s.1).collect();
        counts.sort();
        assert_eq!(counts, (1..=16).collect::<Vec<_>>());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_pixel_index_past_u32_range() {
        // 100000 x 50000 pixels is more than u32::MAX; only the index math is exercised
        let image = ImageBuffer {
            width: 100_000,
            height: 50_000,
            pixels: Vec::new(),
        };
        assert_eq!(image.index(5, 49_999), 4_999_900_005);
        assert_eq!(image.index(99_999, 0), 99_999);
    }

    #[test]
    fn test_to_rgb() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(1, 0, Color::new(1.0, 0.5, 0.0));
        assert_eq!(image.to_rgb(), vec![0, 0, 0, 255, 127, 0]);
    }

    #[test]
    fn test_render_bundled_cornell_scene() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenes/cornell/scene.json");
        let description = lumo_core::SceneDescription::load(path).unwrap();
        let scene = Scene::from_meshes(description.load_meshes().unwrap());

        let camera = Camera::from_description(&description.camera, 24, 24);
        let config = RenderConfig {
            samples: 16,
            ..RenderConfig::from(&description.render)
        };
        let image = render(&scene, &camera, &config);

        // The view looks into a closed box lit from above
        assert!(scene.hit(&camera.primary_ray(12, 12)).is_some());
        let lit = image.pixels.iter().filter(|c| c.length_squared() > 0.0).count();
        assert!(lit > 24 * 24 / 4, "only {} lit pixels", lit);
    }
}
