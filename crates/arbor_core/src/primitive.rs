//! Implicit primitives and their object-space intersection tests.
//!
//! Both shapes live in their own local frame: the sphere is the unit sphere
//! at the origin and the box is the unit cube spanning [-0.5, 0.5] on every
//! axis. Callers transform rays into that frame first.

use std::f32::consts::PI;

use arbor_math::{Interval, Ray, Vec2, Vec4};

/// Direction components smaller than this are treated as parallel to a slab.
const PARALLEL_EPSILON: f32 = 1e-4;

/// Distance from a face plane within which a box hit counts as on that face.
const FACE_EPSILON: f32 = 1e-3;

/// Intersection expressed in the primitive's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalHit {
    /// Ray parameter; identical in every frame the ray is transformed into
    pub t: f32,
    /// Hit point in local space (w = 1)
    pub point: Vec4,
    /// Outward normal in local space (w = 0), not necessarily unit length
    pub normal: Vec4,
    pub texcoord: Vec2,
}

/// The shape carried by a leaf, resolved once from its name.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere,
    AxisAlignedBox,
    /// Any other shape name. Never intersects.
    Unsupported(String),
}

impl Primitive {
    pub fn from_name(name: &str) -> Self {
        match name {
            "sphere" => Primitive::Sphere,
            "box" => Primitive::AxisAlignedBox,
            other => Primitive::Unsupported(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Primitive::Sphere => "sphere",
            Primitive::AxisAlignedBox => "box",
            Primitive::Unsupported(name) => name,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Primitive::Unsupported(_))
    }

    /// Nearest forward intersection of a local-space ray with this shape.
    pub fn intersect(&self, ray: &Ray) -> Option<LocalHit> {
        match self {
            Primitive::Sphere => intersect_sphere(ray),
            Primitive::AxisAlignedBox => intersect_box(ray),
            Primitive::Unsupported(_) => None,
        }
    }
}

fn intersect_sphere(ray: &Ray) -> Option<LocalHit> {
    let a = ray.direction.length_squared();
    let b = 2.0 * ray.origin.dot(ray.direction);
    // The origin's w = 1 adds one to its squared length, on top of radius^2 = 1
    let c = ray.origin.length_squared() - 2.0;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || a == 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let t_near = (-b - sqrtd) / (2.0 * a);
    let t_far = (-b + sqrtd) / (2.0 * a);

    let t = if t_near >= 0.0 {
        t_near
    } else if t_far >= 0.0 {
        t_far
    } else {
        return None;
    };

    let point = ray.at(t);
    let normal = point.truncate().extend(0.0);

    Some(LocalHit {
        t,
        point,
        normal,
        texcoord: sphere_uv(normal),
    })
}

/// Spherical mapping of a point on the unit sphere.
fn sphere_uv(normal: Vec4) -> Vec2 {
    let n = normal.truncate().normalize_or_zero();
    let phi = (-n.y).clamp(-1.0, 1.0).asin();
    let theta = (-n.z).atan2(n.x);

    Vec2::new(theta / (2.0 * PI), 0.5 + phi / PI)
}

fn intersect_box(ray: &Ray) -> Option<LocalHit> {
    let mut span = Interval::UNIVERSE;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let direction = ray.direction[axis];

        if direction.abs() < PARALLEL_EPSILON {
            // Parallel to this slab: either always inside it or never
            if !(-0.5..=0.5).contains(&origin) {
                return None;
            }
        } else {
            let slab = Interval::spanning(
                (-0.5 - origin) / direction,
                (0.5 - origin) / direction,
            );
            span = span.intersect(&slab);
        }
    }

    if span.is_empty() || span.max < 0.0 {
        return None;
    }

    // Starting inside the box reports the exit face
    let t = if span.min > 0.0 { span.min } else { span.max };
    let point = ray.at(t);

    let mut face = Vec4::ZERO;
    for axis in 0..3 {
        if (point[axis] - 0.5).abs() < FACE_EPSILON {
            face[axis] = 1.0;
        } else if (point[axis] + 0.5).abs() < FACE_EPSILON {
            face[axis] = -1.0;
        }
    }

    Some(LocalHit {
        t,
        point,
        normal: face,
        texcoord: box_uv(face, point),
    })
}

/// Map a box hit into an unwrapped-cube texture layout.
///
/// The texture is split into four columns and two rows; each face owns one
/// cell and the in-face position of the hit picks the spot inside it.
/// Hits that touch more than one face (edges and corners) get (0, 0).
fn box_uv(face: Vec4, p: Vec4) -> Vec2 {
    let (x, y, z) = (p.x, p.y, p.z);

    let (s, t) = match (face.x, face.y, face.z) {
        // front
        (0.0, 0.0, 1.0) => (0.25 * (x + 0.5), 0.5 * (y + 0.5) + 0.5),
        // back
        (0.0, 0.0, -1.0) => (0.25 * (0.5 - x) + 0.25, 0.5 * (y - 0.5) + 0.5),
        // right
        (1.0, 0.0, 0.0) => (0.25 * (0.5 - z) + 0.25, 0.5 * (y + 0.5)),
        // left
        (-1.0, 0.0, 0.0) => (0.25 * (z + 0.5), 0.5 * (y + 0.5)),
        // top
        (0.0, 1.0, 0.0) => (0.25 * (0.5 - x) + 0.75, 0.5 * (0.5 - z)),
        // bottom
        (0.0, -1.0, 0.0) => (0.25 * (0.5 - x) + 0.25, 0.5 * (z + 0.5)),
        _ => (0.0, 0.0),
    };

    Vec2::new(s, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_math::Vec3;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-4, "expected {} to be close to {}", a, b);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Primitive::from_name("sphere"), Primitive::Sphere);
        assert_eq!(Primitive::from_name("box"), Primitive::AxisAlignedBox);
        assert_eq!(
            Primitive::from_name("teapot"),
            Primitive::Unsupported("teapot".to_string())
        );
        assert_eq!(Primitive::from_name("teapot").name(), "teapot");
        assert!(!Primitive::from_name("teapot").is_supported());
    }

    #[test]
    fn test_sphere_hit_through_center() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = Primitive::Sphere.intersect(&ray).unwrap();

        // Near side, smaller positive root
        assert_close(hit.t, 4.0);
        assert_close(hit.point.z, 1.0);

        // Normal equals the local hit position and is unit length
        assert_eq!(hit.normal.truncate(), hit.point.truncate());
        assert_close(hit.normal.length(), 1.0);
        assert_eq!(hit.normal.w, 0.0);

        // Equator
        assert_close(hit.texcoord.y, 0.5);
    }

    #[test]
    fn test_sphere_unnormalized_direction() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -2.0));
        let hit = Primitive::Sphere.intersect(&ray).unwrap();
        assert_close(hit.t, 2.0);
    }

    #[test]
    fn test_sphere_from_inside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let hit = Primitive::Sphere.intersect(&ray).unwrap();
        assert_close(hit.t, 1.0);
        assert_close(hit.normal.x, 1.0);
    }

    #[test]
    fn test_sphere_miss() {
        let ray = Ray::new(Vec3::new(0.0, 2.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(Primitive::Sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_sphere_behind() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(Primitive::Sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_sphere_uv_poles_and_seam() {
        // Bottom pole: -y maps to v = 1
        let down = Ray::new(Vec3::new(0.0, -5.0, 0.0), Vec3::Y);
        let hit = Primitive::Sphere.intersect(&down).unwrap();
        assert_close(hit.texcoord.y, 1.0);

        // +x on the equator sits at u = 0
        let side = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X);
        let hit = Primitive::Sphere.intersect(&side).unwrap();
        assert_close(hit.texcoord.x, 0.0);
        assert_close(hit.texcoord.y, 0.5);

        // -z is a quarter turn
        let back = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let hit = Primitive::Sphere.intersect(&back).unwrap();
        assert_close(hit.texcoord.x, 0.25);
    }

    #[test]
    fn test_box_front_face() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = Primitive::AxisAlignedBox.intersect(&ray).unwrap();

        assert_close(hit.t, 4.5);
        assert_eq!(hit.normal, Vec4::new(0.0, 0.0, 1.0, 0.0));
        // Center of the front cell
        assert_close(hit.texcoord.x, 0.125);
        assert_close(hit.texcoord.y, 0.75);
    }

    #[test]
    fn test_box_from_inside_reports_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let hit = Primitive::AxisAlignedBox.intersect(&ray).unwrap();

        assert_close(hit.t, 0.5);
        assert_eq!(hit.normal, Vec4::new(1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_box_parallel_outside_slab() {
        // Travels along z but sits above the box
        let ray = Ray::new(Vec3::new(0.0, 0.7, 5.0), Vec3::NEG_Z);
        assert!(Primitive::AxisAlignedBox.intersect(&ray).is_none());
    }

    #[test]
    fn test_box_miss_and_behind() {
        let diagonal = Ray::new(Vec3::new(2.0, 0.0, 2.0), Vec3::new(1.0, 0.0, 1.0));
        assert!(Primitive::AxisAlignedBox.intersect(&diagonal).is_none());

        let skew = Ray::new(Vec3::new(-2.0, 3.0, 0.0), Vec3::new(1.0, 0.1, 0.0));
        assert!(Primitive::AxisAlignedBox.intersect(&skew).is_none());
    }

    #[test]
    fn test_box_oblique_hit() {
        let ray = Ray::new(Vec3::new(-3.0, 0.1, 0.2), Vec3::new(1.0, 0.0, 0.0));
        let hit = Primitive::AxisAlignedBox.intersect(&ray).unwrap();

        assert_close(hit.t, 2.5);
        assert_eq!(hit.normal, Vec4::new(-1.0, 0.0, 0.0, 0.0));
        // Left cell: s = 0.25 * (z + 0.5), t = 0.5 * (y + 0.5)
        assert_close(hit.texcoord.x, 0.175);
        assert_close(hit.texcoord.y, 0.3);
    }

    #[test]
    fn test_box_face_cells() {
        let cases = [
            (Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y, Vec2::new(0.875, 0.25)),
            (Vec3::new(0.0, -5.0, 0.0), Vec3::Y, Vec2::new(0.375, 0.25)),
            (Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X, Vec2::new(0.375, 0.25)),
            (Vec3::new(0.0, 0.0, -5.0), Vec3::Z, Vec2::new(0.375, 0.25)),
        ];

        for (origin, direction, expected) in cases {
            let hit = Primitive::AxisAlignedBox
                .intersect(&Ray::new(origin, direction))
                .unwrap();
            assert!(
                (hit.texcoord - expected).length() < 1e-4,
                "ray from {:?}: got {:?}, expected {:?}",
                origin,
                hit.texcoord,
                expected
            );
        }
    }

    #[test]
    fn test_box_edge_hit_has_two_face_components() {
        // Aimed exactly at the edge where x = 0.5 meets z = 0.5
        let ray = Ray::new(Vec3::new(3.0, 0.0, 3.0), Vec3::new(-1.0, 0.0, -1.0));
        let hit = Primitive::AxisAlignedBox.intersect(&ray).unwrap();

        assert_eq!(hit.normal, Vec4::new(1.0, 0.0, 1.0, 0.0));
        assert_eq!(hit.texcoord, Vec2::ZERO);
    }

    #[test]
    fn test_unsupported_never_hits() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(Primitive::from_name("cylinder").intersect(&ray).is_none());
    }
}
