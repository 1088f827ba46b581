//! Point, directional and spot lights.

use arbor_math::{Mat4, Mat4Ext, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// A light source.
///
/// `position.w == 0` marks a directional light; its xyz is the direction the
/// light travels, so surfaces see it along `-position`. Any other w is a
/// positional light.
///
/// A zero `spot_direction` disables the cone test.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    pub position: Vec4,
    pub spot_direction: Vec4,
    /// Cone half angle in degrees
    pub spot_cutoff: f32,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec4::new(0.0, 0.0, 0.0, 1.0),
            spot_direction: Vec4::ZERO,
            spot_cutoff: 180.0,
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::splat(0.8),
            specular: Vec3::splat(0.8),
        }
    }
}

impl Light {
    /// Positional light at `position`.
    pub fn point(position: Vec3) -> Self {
        Self {
            position: position.extend(1.0),
            ..Default::default()
        }
    }

    /// Directional light shining along `direction`.
    pub fn directional(direction: Vec3) -> Self {
        Self {
            position: direction.extend(0.0),
            ..Default::default()
        }
    }

    /// Turn this light into a spot light.
    pub fn with_spot(mut self, direction: Vec3, cutoff_degrees: f32) -> Self {
        self.spot_direction = direction.extend(0.0);
        self.spot_cutoff = cutoff_degrees;
        self
    }

    /// Set ambient, diffuse and specular intensities.
    pub fn with_intensities(mut self, ambient: Vec3, diffuse: Vec3, specular: Vec3) -> Self {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self.specular = specular;
        self
    }

    pub fn is_directional(&self) -> bool {
        self.position.w == 0.0
    }

    pub fn is_spot(&self) -> bool {
        self.spot_direction.truncate().length_squared() > 0.0
    }

    /// This light expressed in the frame reached through `modelview`.
    pub fn transformed(&self, modelview: &Mat4) -> Light {
        Light {
            position: *modelview * self.position,
            spot_direction: modelview.transform_direction4(self.spot_direction),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert!(Light::directional(Vec3::NEG_Y).is_directional());
        assert!(!Light::point(Vec3::ZERO).is_directional());
        assert!(!Light::point(Vec3::ZERO).is_spot());
        assert!(Light::point(Vec3::ZERO).with_spot(Vec3::NEG_Z, 30.0).is_spot());
    }

    #[test]
    fn test_transformed_point_light() {
        let light = Light::point(Vec3::new(1.0, 2.0, 3.0)).with_spot(Vec3::NEG_Z, 20.0);
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0));
        let moved = light.transformed(&view);

        assert_eq!(moved.position, Vec4::new(1.0, 2.0, -7.0, 1.0));
        // Directions ignore translation
        assert_eq!(moved.spot_direction, Vec4::new(0.0, 0.0, -1.0, 0.0));
        assert_eq!(moved.spot_cutoff, 20.0);
    }

    #[test]
    fn test_transformed_directional_light() {
        use std::f32::consts::FRAC_PI_2;

        let light = Light::directional(Vec3::X);
        let view = Mat4::from_rotation_z(FRAC_PI_2) * Mat4::from_translation(Vec3::splat(5.0));
        let moved = light.transformed(&view);

        assert!(moved.is_directional());
        assert!((moved.position.truncate() - Vec3::Y).length() < 1e-5);
    }
}
