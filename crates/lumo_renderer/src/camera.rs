//! Camera for primary ray generation.

use lumo_core::CameraDescription;
use lumo_math::{Ray, Vec3};

/// Pinhole camera looking down -Z through an image plane at `z = image_plane_z`.
///
/// Primary rays start at the pixel's cell center on the image plane, not at
/// the eye, so geometry between the eye and the plane is never hit.
/// Pixels are square; the plane spans `[-half_width, half_width]`
/// horizontally and row 0 is the top of the image.
#[derive(Clone, Debug)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    eye: Vec3,
    image_plane_z: f64,
    half_width: f64,

    // Cached computed values
    pixel_size: f64,
    half_height: f64,
}

impl Camera {
    /// Create a camera with the default placement (eye at z = 5, plane at z = 2).
    pub fn new(image_width: u32, image_height: u32) -> Self {
        Self::from_description(&CameraDescription::default(), image_width, image_height)
    }

    pub fn from_description(description: &CameraDescription, image_width: u32, image_height: u32) -> Self {
        let width = image_width.max(1) as f64;
        Self {
            image_width,
            image_height,
            eye: Vec3::from_array(description.eye),
            image_plane_z: description.image_plane_z,
            half_width: description.half_width,
            pixel_size: 2.0 * description.half_width / width,
            half_height: description.half_width * image_height as f64 / width,
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Edge length of one pixel on the image plane.
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// Center of pixel (x, y) on the image plane.
    pub fn cell_center(&self, x: u32, y: u32) -> Vec3 {
        Vec3::new(
            -self.half_width + self.pixel_size * (x as f64 + 0.5),
            self.half_height - self.pixel_size * (y as f64 + 0.5),
            self.image_plane_z,
        )
    }

    /// Generate the primary ray for pixel (x, y).
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray {
        let cell = self.cell_center(x, y);
        Ray::new(cell, (cell - self.eye).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_placement() {
        let camera = Camera::new(480, 480);

        assert_eq!(camera.eye(), Vec3::new(0.0, 0.0, 5.0));
        assert!((camera.pixel_size() - 4.0 / 480.0).abs() < 1e-15);

        let top_left = camera.cell_center(0, 0);
        let half = camera.pixel_size() / 2.0;
        assert!((top_left - Vec3::new(-2.0 + half, 2.0 - half, 2.0)).length() < 1e-12);

        let bottom_right = camera.cell_center(479, 479);
        assert!((bottom_right - Vec3::new(2.0 - half, -2.0 + half, 2.0)).length() < 1e-12);
    }

    #[test]
    fn test_center_rays_point_down_negative_z() {
        let camera = Camera::new(2, 2);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let ray = camera.primary_ray(x, y);
            assert_eq!(ray.origin().z, 2.0);
            assert!(ray.direction().z < 0.0);
            assert!((ray.direction().length() - 1.0).abs() < 1e-12);
        }

        // Symmetric about the view axis
        let a = camera.primary_ray(0, 0).direction();
        let b = camera.primary_ray(1, 1).direction();
        assert!((a.x + b.x).abs() < 1e-12 && (a.y + b.y).abs() < 1e-12);
    }

    #[test]
    fn test_row_zero_is_top() {
        let camera = Camera::new(10, 10);
        assert!(camera.primary_ray(5, 0).direction().y > 0.0);
        assert!(camera.primary_ray(5, 9).direction().y < 0.0);
    }

    #[test]
    fn test_non_square_image_keeps_square_pixels() {
        let camera = Camera::new(200, 100);
        let pixel = camera.pixel_size();
        let step_x = camera.cell_center(1, 0) - camera.cell_center(0, 0);
        let step_y = camera.cell_center(0, 0) - camera.cell_center(0, 1);
        assert!((step_x.x - pixel).abs() < 1e-12);
        assert!((step_y.y - pixel).abs() < 1e-12);
        assert!((camera.cell_center(0, 0).y - (1.0 - pixel / 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_from_description() {
        let description = CameraDescription {
            eye: [0.0, 1.0, 10.0],
            image_plane_z: 4.0,
            half_width: 1.0,
        };
        let camera = Camera::from_description(&description, 100, 100);
        assert_eq!(camera.eye(), Vec3::new(0.0, 1.0, 10.0));
        assert_eq!(camera.primary_ray(0, 0).origin().z, 4.0);
        assert!((camera.pixel_size() - 0.02).abs() < 1e-15);
    }
}
