use crate::{Mat4, Vec3, Vec4};

/// A ray in homogeneous coordinates.
///
/// `origin` is a point (w = 1) and `direction` is a vector (w = 0). The
/// direction is deliberately left unnormalized: the parametric distance `t`
/// of a hit is only meaningful relative to the direction the ray was built
/// with, and transforming a ray between spaces keeps `t` unchanged.
///
/// Rays are never modified across spaces; every transformed, offset,
/// reflected or shadow variant is a new value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec4,
    pub direction: Vec4,
}

impl Ray {
    /// Create a new ray from a 3D origin point and direction vector.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin: origin.extend(1.0),
            direction: direction.extend(0.0),
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction (w stays 1)
    #[inline]
    pub fn at(&self, t: f32) -> Vec4 {
        self.origin + self.direction * t
    }

    /// Express this ray in another coordinate frame.
    ///
    /// The direction's w is forced back to 0 so that a projective row in
    /// `matrix` can never turn it into a point.
    pub fn transformed(&self, matrix: &Mat4) -> Ray {
        let mut direction = *matrix * self.direction;
        direction.w = 0.0;
        Ray {
            origin: *matrix * self.origin,
            direction,
        }
    }

    /// Direction as a 3D vector.
    #[inline]
    pub fn direction3(&self) -> Vec3 {
        self.direction.truncate()
    }
}
