//! Frame rendering.
//!
//! Casts exactly one primary ray per pixel through a pinhole camera:
//! - No anti-aliasing or multi-sampling
//! - Recursive reflection bounded by `RenderConfig::max_depth`
//! - Sequential or scanline-parallel (rayon) frame loops with identical output

use std::path::Path;
use std::time::Instant;

use arbor_core::{Scenegraph, TextureTable};
use arbor_math::{Interval, Mat4};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Camera, Color, RayTracer, RenderError, RenderResult};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Color of rays that hit nothing, or run out of bounces
    pub background: Color,
    /// Deepest reflection bounce that is still shaded
    pub max_depth: u32,
    /// Shadow ray origins move this far towards the light
    pub shadow_epsilon: f32,
    /// Reflection ray origins move this far along the reflected direction
    pub reflection_epsilon: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fov_degrees: 60.0,
            background: Color::ZERO,
            max_depth: 5,
            shadow_epsilon: 0.01,
            reflection_epsilon: 0.01,
        }
    }
}

impl RenderConfig {
    /// Check the configuration describes a renderable frame.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(RenderError::InvalidConfig(format!(
                "field of view must be between 0 and 180 degrees, got {}",
                self.fov_degrees
            )));
        }
        Ok(())
    }

    /// Camera described by this configuration.
    pub fn camera(&self) -> Camera {
        Camera::new(self.width, self.height, self.fov_degrees)
    }
}

/// RGBA float image, row-major with row 0 at the bottom (OpenGL raster order).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[f32; 4]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with opaque white.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[1.0; 4]; width as usize * height as usize],
        }
    }

    /// Pixels of one row, left to right.
    pub fn row(&self, y: u32) -> &[[f32; 4]] {
        let width = self.width as usize;
        let start = y as usize * width;
        &self.pixels[start..start + width]
    }

    /// Flat view of all channels: 4 floats per pixel.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Convert to RGBA bytes (for display or saving). No gamma is applied.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.as_floats().iter().map(|&c| quantize(c)).collect()
    }

    /// Convert to RGBA bytes with the top row first, as image files expect.
    pub fn to_rgba8_top_down(&self) -> Vec<u8> {
        (0..self.height)
            .rev()
            .flat_map(|y| self.row(y))
            .flatten()
            .map(|&c| quantize(c))
            .collect()
    }

    /// Write the image as a PNG file, upright.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        image::save_buffer(
            path,
            &self.to_rgba8_top_down(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )?;
        Ok(())
    }
}

fn quantize(channel: f32) -> u8 {
    (255.0 * Interval::UNIT.clamp(channel)).round() as u8
}

fn write_rgb(pixel: &mut [f32; 4], color: Color) {
    pixel[0] = color.x;
    pixel[1] = color.y;
    pixel[2] = color.z;
}

/// Render one scanline into `row_pixels`.
fn render_row(
    tracer: &RayTracer<'_>,
    camera: &Camera,
    row: u32,
    row_pixels: &mut [[f32; 4]],
) -> RenderResult<()> {
    for (col, pixel) in row_pixels.iter_mut().enumerate() {
        let ray = camera.primary_ray(row, col as u32);
        let color = tracer.trace(&ray)?;
        write_rgb(pixel, color);
    }
    Ok(())
}

fn prepare<'a>(
    scene: &'a Scenegraph,
    textures: &'a TextureTable,
    modelview: Mat4,
    config: &'a RenderConfig,
) -> RenderResult<(RayTracer<'a>, ImageBuffer)> {
    config.validate()?;

    let tracer = RayTracer::new(scene, textures, modelview, config);
    log::info!(
        "Rendering '{}' at {}x{} (fov {}, {} leaves, {} lights)",
        scene.name,
        config.width,
        config.height,
        config.fov_degrees,
        scene.leaf_count(),
        tracer.lights().len()
    );

    Ok((tracer, ImageBuffer::new(config.width, config.height)))
}

/// Render the entire scene to an image buffer.
///
/// `modelview` maps the scene root into view space (the camera sits at the
/// view-space origin looking down -Z). Fails on the first pixel whose
/// shading needs a texture missing from `textures`.
pub fn render(
    scene: &Scenegraph,
    textures: &TextureTable,
    modelview: Mat4,
    config: &RenderConfig,
) -> RenderResult<ImageBuffer> {
    let start = Instant::now();
    let (tracer, mut image) = prepare(scene, textures, modelview, config)?;
    let camera = config.camera();

    for (row, row_pixels) in image.pixels.chunks_mut(config.width as usize).enumerate() {
        render_row(&tracer, &camera, row as u32, row_pixels)?;
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}

/// Render the entire scene, one rayon task per scanline.
///
/// Produces exactly the same pixels as [`render`].
pub fn render_parallel(
    scene: &Scenegraph,
    textures: &TextureTable,
    modelview: Mat4,
    config: &RenderConfig,
) -> RenderResult<ImageBuffer> {
    let start = Instant::now();
    let (tracer, mut image) = prepare(scene, textures, modelview, config)?;
    let camera = config.camera();

    image
        .pixels
        .par_chunks_mut(config.width as usize)
        .enumerate()
        .try_for_each(|(row, row_pixels)| render_row(&tracer, &camera, row as u32, row_pixels))?;

    log::info!("Rendered in {:?} ({} threads)", start.elapsed(), rayon::current_num_threads());
    Ok(image)
}
