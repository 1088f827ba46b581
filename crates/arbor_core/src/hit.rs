//! Intersection results.

use arbor_math::{Vec2, Vec4};

use crate::material::Material;
use crate::texture::WHITE_TEXTURE;

/// Record of a ray-scene intersection.
///
/// The "no hit" state is the default record, whose `distance` is infinite.
/// When `intersected()` is false none of the other fields carry meaning.
#[derive(Clone, Debug)]
pub struct HitRecord<'a> {
    /// Ray parameter of the hit
    pub distance: f32,
    /// Hit point in view space (w = 1)
    pub point: Vec4,
    /// Unit surface normal in view space (w = 0)
    pub normal: Vec4,
    /// Material of the leaf that was hit
    pub material: &'a Material,
    /// Name of the texture of the leaf that was hit
    pub texture_name: &'a str,
    /// Texture coordinates of the hit
    pub texcoord: Vec2,
}

impl<'a> HitRecord<'a> {
    /// The no-hit sentinel.
    pub fn none() -> Self {
        Self {
            distance: f32::INFINITY,
            point: Vec4::W,
            normal: Vec4::ZERO,
            material: &Material::NONE,
            texture_name: WHITE_TEXTURE,
            texcoord: Vec2::ZERO,
        }
    }

    pub fn intersected(&self) -> bool {
        self.distance.is_finite()
    }

    /// Keep whichever of the two records is nearer. Ties keep `self`.
    pub fn nearest(self, other: HitRecord<'a>) -> HitRecord<'a> {
        if other.distance < self.distance {
            other
        } else {
            self
        }
    }
}

impl Default for HitRecord<'_> {
    fn default() -> Self {
        Self::none()
    }
}
