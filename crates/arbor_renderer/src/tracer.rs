//! Recursive ray casting and Phong shading.
//!
//! Every hit is shaded locally (ambient, diffuse and specular per light,
//! with one shadow ray per light) and, for reflective materials, combined
//! with a mirror ray traced recursively up to `RenderConfig::max_depth`.

use arbor_core::{HitRecord, Light, Material, Scenegraph, TextureTable};
use arbor_math::{Interval, Mat4, Ray, Vec3};

use crate::{Color, RenderConfig, RenderResult};

/// Casts and shades rays against one scene for one frame.
///
/// Holds the lights already transformed into view space, so it is built
/// once per frame and then shared (it is `Sync`) by every pixel.
pub struct RayTracer<'a> {
    scene: &'a Scenegraph,
    textures: &'a TextureTable,
    modelview: Mat4,
    lights: Vec<Light>,
    config: &'a RenderConfig,
}

impl<'a> RayTracer<'a> {
    /// Prepare a tracer. `modelview` maps the scene root into view space.
    pub fn new(
        scene: &'a Scenegraph,
        textures: &'a TextureTable,
        modelview: Mat4,
        config: &'a RenderConfig,
    ) -> Self {
        let lights = scene.lights(&modelview);
        Self {
            scene,
            textures,
            modelview,
            lights,
            config,
        }
    }

    /// View-space lights used for shading.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Color seen along a view-space primary ray.
    pub fn trace(&self, ray: &Ray) -> RenderResult<Color> {
        self.raycast(ray, 0)
    }

    /// Color seen along `ray` at the given bounce depth.
    ///
    /// Past the depth limit, and wherever nothing is hit, the result is the
    /// background color.
    pub fn raycast(&self, ray: &Ray, depth: u32) -> RenderResult<Color> {
        if depth > self.config.max_depth {
            return Ok(self.config.background);
        }

        let hit = self.scene.intersect(ray, &self.modelview);
        if !hit.intersected() {
            return Ok(self.config.background);
        }

        self.shade(ray, &hit, depth)
    }

    /// Final color of a hit: local shading plus the weighted reflection.
    pub fn shade(&self, ray: &Ray, hit: &HitRecord<'_>, depth: u32) -> RenderResult<Color> {
        let incident = ray.direction3().normalize_or_zero();
        let local = self.local_illumination(hit, -incident)?;
        let material = hit.material;

        if !material.is_reflective() {
            return Ok(local * material.absorption);
        }

        let normal = hit.normal.truncate();
        let reflected_dir = incident - 2.0 * incident.dot(normal) * normal;
        let origin = hit.point.truncate() + reflected_dir * self.config.reflection_epsilon;
        let reflected = self.raycast(&Ray::new(origin, reflected_dir), depth + 1)?;

        // The raw local term is added on top of its absorbed share
        Ok(local + local * material.absorption + reflected * material.reflection)
    }

    /// Phong shading of a hit over all lights, clamped and multiplied by
    /// the hit's texture. `view_vec` points from the hit towards the viewer.
    pub fn local_illumination(&self, hit: &HitRecord<'_>, view_vec: Vec3) -> RenderResult<Color> {
        let point = hit.point.truncate();
        let normal = hit.normal.truncate().normalize_or_zero();
        let material = hit.material;

        let mut color = Color::ZERO;
        for light in &self.lights {
            color += self.light_contribution(light, point, normal, material, view_vec);
        }

        let color = clamp_color(color);

        let texture = self.textures.get(hit.texture_name)?;
        let texel = texture.color_at(hit.texcoord.x, hit.texcoord.y) / 255.0;

        Ok(color * texel)
    }

    fn light_contribution(
        &self,
        light: &Light,
        point: Vec3,
        normal: Vec3,
        material: &Material,
        view_vec: Vec3,
    ) -> Color {
        let light_vec = light_vector(light, point);
        let ambient = material.ambient * light.ambient;

        if self.in_shadow(light, point, light_vec) {
            return ambient;
        }

        if light.is_spot() {
            let spot = light.spot_direction.truncate().normalize();
            if (-light_vec).dot(spot) <= light.spot_cutoff.to_radians().cos() {
                return ambient;
            }
        }

        let n_dot_l = normal.dot(light_vec);
        let diffuse = material.diffuse * light.diffuse * n_dot_l.max(0.0);

        let specular = if n_dot_l > 0.0 {
            let reflect_vec = (2.0 * n_dot_l * normal - light_vec).normalize_or_zero();
            let r_dot_v = reflect_vec.dot(view_vec).max(0.0);
            material.specular * light.specular * r_dot_v.powf(material.shininess)
        } else {
            Color::ZERO
        };

        ambient + diffuse + specular
    }

    /// True if something lies between `point` and the light.
    ///
    /// Shadow rays towards positional lights are not normalized: they reach
    /// the light at t = 1, so only hits in (0, 1) occlude. Directional
    /// lights are infinitely far away and any forward hit occludes.
    fn in_shadow(&self, light: &Light, point: Vec3, light_vec: Vec3) -> bool {
        let origin = point + light_vec * self.config.shadow_epsilon;

        let (shadow_ray, range) = if light.is_directional() {
            (
                Ray::new(origin, light_vec),
                Interval::new(0.0, f32::INFINITY),
            )
        } else {
            (
                Ray::new(origin, light_position(light) - origin),
                Interval::UNIT,
            )
        };

        let hit = self.scene.intersect(&shadow_ray, &self.modelview);
        hit.intersected() && range.surrounds(hit.distance)
    }
}

fn clamp_color(color: Color) -> Color {
    Color::new(
        Interval::UNIT.clamp(color.x),
        Interval::UNIT.clamp(color.y),
        Interval::UNIT.clamp(color.z),
    )
}

/// Unit vector from `point` towards the light.
fn light_vector(light: &Light, point: Vec3) -> Vec3 {
    if light.is_directional() {
        (-light.position.truncate()).normalize_or_zero()
    } else {
        (light_position(light) - point).normalize_or_zero()
    }
}

/// Position of a positional light after the homogeneous divide.
fn light_position(light: &Light) -> Vec3 {
    light.position.truncate() / light.position.w
}
