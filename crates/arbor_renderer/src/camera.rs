//! Pinhole camera for primary ray generation.

use arbor_math::{Ray, Vec3};

/// A pinhole camera at the view-space origin looking down -Z.
///
/// The image plane sits at the distance where `height` pixels span the
/// vertical field of view, so one pixel is one unit on that plane.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
}

impl Camera {
    pub fn new(image_width: u32, image_height: u32, fov_degrees: f32) -> Self {
        Self {
            image_width,
            image_height,
            fov_degrees,
        }
    }

    /// Distance from the eye to the image plane, in pixels.
    pub fn focal_distance(&self) -> f32 {
        0.5 * self.image_height as f32 / (0.5 * self.fov_degrees).to_radians().tan()
    }

    /// View-space ray through pixel (`row`, `col`).
    ///
    /// The direction is not normalized.
    pub fn primary_ray(&self, row: u32, col: u32) -> Ray {
        let direction = Vec3::new(
            col as f32 - 0.5 * self.image_width as f32,
            row as f32 - 0.5 * self.image_height as f32,
            -self.focal_distance(),
        );
        Ray::new(Vec3::ZERO, direction)
    }
}
