//! Phong material attributes.

use arbor_math::Vec3;
use serde::{Deserialize, Serialize};

/// Surface reflectances for the Phong model plus the two weights that
/// decide how local shading and mirror reflection are combined.
///
/// `absorption` scales the locally shaded color and `reflection` scales
/// the recursively traced mirror color. They are independent and need not
/// sum to one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Ambient reflectance (RGB, 0-1)
    pub ambient: Vec3,

    /// Diffuse reflectance (RGB, 0-1)
    pub diffuse: Vec3,

    /// Specular reflectance (RGB, 0-1)
    pub specular: Vec3,

    /// Phong exponent
    pub shininess: f32,

    /// Weight on the locally shaded color
    pub absorption: f32,

    /// Weight on the reflected color (0 = no reflection ray is cast)
    pub reflection: f32,
}

impl Material {
    /// Material used for hit records that carry no intersection.
    pub const NONE: Material = Material {
        ambient: Vec3::ZERO,
        diffuse: Vec3::ZERO,
        specular: Vec3::ZERO,
        shininess: 0.0,
        absorption: 0.0,
        reflection: 0.0,
    };

    /// Create a matte material whose ambient and diffuse reflectances
    /// both derive from one color.
    pub fn matte(color: Vec3) -> Self {
        Self {
            ambient: color * 0.3,
            diffuse: color,
            ..Default::default()
        }
    }

    /// Create a perfect mirror: no local contribution, full reflection.
    pub fn mirror() -> Self {
        Self {
            ambient: Vec3::ZERO,
            diffuse: Vec3::ZERO,
            specular: Vec3::ZERO,
            shininess: 1.0,
            absorption: 0.0,
            reflection: 1.0,
        }
    }

    /// Set the specular reflectance and exponent.
    pub fn with_specular(mut self, specular: Vec3, shininess: f32) -> Self {
        self.specular = specular;
        self.shininess = shininess;
        self
    }

    /// Set the absorption and reflection weights.
    pub fn with_weights(mut self, absorption: f32, reflection: f32) -> Self {
        self.absorption = absorption;
        self.reflection = reflection;
        self
    }

    /// Check if a reflection ray has to be traced for this material.
    pub fn is_reflective(&self) -> bool {
        self.reflection != 0.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec3::splat(0.15),
            diffuse: Vec3::splat(0.5), // Grey default
            specular: Vec3::ZERO,
            shininess: 1.0,
            absorption: 1.0,
            reflection: 0.0,
        }
    }
}
