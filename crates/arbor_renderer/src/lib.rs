//! Arbor Renderer - recursive Whitted-style ray tracing
//!
//! Shades each pixel with one primary ray: Phong lighting with hard shadows,
//! plus mirror reflections followed up to a fixed bounce depth.

mod camera;
mod error;
mod renderer;
mod tracer;

pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use renderer::{render, render_parallel, ImageBuffer, RenderConfig};
pub use tracer::RayTracer;

/// Linear RGB color, nominally in [0, 1]
pub type Color = arbor_math::Vec3;

/// Re-export common math types from arbor_math
pub use arbor_math::{Interval, Mat4, Ray, Vec3, Vec4};
