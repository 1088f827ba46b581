//! Built-in demo scenes.

use arbor_core::{LeafNode, Light, Material, SceneNode, Scenegraph, Texture};
use arbor_math::{Mat4, Vec3};

use crate::cli::SceneChoice;

/// A scene ready to render: graph, camera placement and in-memory textures.
pub struct Demo {
    pub scene: Scenegraph,
    /// Maps the scene root into view space
    pub modelview: Mat4,
    /// Procedural textures the scene refers to by name
    pub textures: Vec<(String, Texture)>,
}

pub fn build(choice: SceneChoice) -> Demo {
    match choice {
        SceneChoice::Spheres => spheres(),
        SceneChoice::Boxes => boxes(),
        SceneChoice::Mirrors => mirrors(),
    }
}

/// Square checkerboard of `cells` x `cells` squares, 8 texels per square.
fn checker(cells: u32, a: [u8; 3], b: [u8; 3]) -> Texture {
    let size = cells * 8;
    let pixels = (0..size * size)
        .map(|i| {
            let (x, y) = (i % size / 8, i / size / 8);
            let [r, g, b] = if (x + y) % 2 == 0 { a } else { b };
            [r, g, b, 255]
        })
        .collect();
    Texture::new(size, size, pixels, "procedural:checker")
}

/// A unit box stretched to `size` and centered on `center`.
fn placed_box(center: Vec3, size: Vec3) -> Mat4 {
    Mat4::from_translation(center) * Mat4::from_scale(size)
}

fn sphere_at(name: &str, offset: Vec3, material: Material) -> SceneNode {
    let leaf = SceneNode::leaf(format!("{}-sphere", name), LeafNode::new("sphere", material));
    SceneNode::transform(name, Mat4::from_translation(offset)).with_child(leaf)
}

fn spheres() -> Demo {
    let floor = SceneNode::transform(
        "floor",
        placed_box(Vec3::new(0.0, -1.25, 0.0), Vec3::new(12.0, 0.5, 12.0)),
    )
    .with_child(SceneNode::leaf(
        "floor-box",
        LeafNode::new("box", Material::matte(Vec3::splat(0.8))).with_texture("checker"),
    ));

    let red = Material::matte(Vec3::new(0.8, 0.15, 0.1)).with_specular(Vec3::splat(0.6), 40.0);
    let gold = Material::matte(Vec3::new(0.8, 0.6, 0.2))
        .with_specular(Vec3::splat(0.9), 80.0)
        .with_weights(0.6, 0.4);
    let blue = Material::matte(Vec3::new(0.15, 0.3, 0.8));

    let root = SceneNode::group("spheres")
        .with_light(Light::point(Vec3::new(-4.0, 6.0, 4.0)))
        .with_light(
            Light::point(Vec3::new(3.0, 5.0, 2.0))
                .with_spot(Vec3::new(-0.5, -1.0, -0.4), 30.0)
                .with_intensities(Vec3::ZERO, Vec3::splat(0.5), Vec3::splat(0.5)),
        )
        .with_child(floor)
        .with_child(sphere_at("left", Vec3::new(-2.2, 0.0, 0.0), red))
        .with_child(sphere_at("middle", Vec3::ZERO, gold))
        .with_child(sphere_at("right", Vec3::new(2.2, 0.0, 0.0), blue));

    Demo {
        scene: Scenegraph::new("spheres", root),
        modelview: Mat4::look_at_rh(Vec3::new(0.0, 2.0, 7.0), Vec3::ZERO, Vec3::Y),
        textures: vec![("checker".to_string(), checker(8, [230, 230, 230], [60, 60, 60]))],
    }
}

fn boxes() -> Demo {
    let crate_material =
        Material::matte(Vec3::new(0.9, 0.8, 0.6)).with_specular(Vec3::splat(0.2), 8.0);

    let mut root = SceneNode::group("boxes")
        .with_light(Light::directional(Vec3::new(-0.4, -1.0, -0.6)))
        .with_light(
            Light::point(Vec3::new(0.0, 1.0, 6.0))
                .with_intensities(Vec3::ZERO, Vec3::splat(0.3), Vec3::ZERO),
        );

    for i in 0..5 {
        let x = (i as f32 - 2.0) * 1.8;
        let angle = (i as f32 * 20.0).to_radians();
        let transform = Mat4::from_translation(Vec3::new(x, 0.0, -(i % 2) as f32))
            * Mat4::from_rotation_y(angle)
            * Mat4::from_rotation_x(0.3);
        root = root.with_child(SceneNode::transform(format!("box-{}", i), transform).with_child(
            SceneNode::leaf(
                format!("box-{}-leaf", i),
                LeafNode::new("box", crate_material.clone()).with_texture("tiles"),
            ),
        ));
    }

    Demo {
        scene: Scenegraph::new("boxes", root),
        modelview: Mat4::look_at_rh(Vec3::new(0.0, 3.0, 8.0), Vec3::new(0.0, 0.0, -0.5), Vec3::Y),
        textures: vec![("tiles".to_string(), checker(4, [200, 90, 40], [250, 220, 170]))],
    }
}

fn mirrors() -> Demo {
    let mirror = Material::mirror().with_weights(0.1, 0.85);
    let wall = |name: &str, x: f32| {
        let leaf = SceneNode::leaf(format!("{}-box", name), LeafNode::new("box", mirror.clone()));
        SceneNode::transform(name, placed_box(Vec3::new(x, 0.0, 0.0), Vec3::new(0.2, 6.0, 12.0)))
            .with_child(leaf)
    };

    let ball = Material::matte(Vec3::new(0.2, 0.8, 0.3)).with_specular(Vec3::ONE, 60.0);

    let root = SceneNode::group("mirrors")
        .with_light(Light::point(Vec3::new(0.0, 4.0, 4.0)))
        .with_child(wall("left-mirror", -3.0))
        .with_child(wall("right-mirror", 3.0))
        .with_child(SceneNode::leaf("ball", LeafNode::new("sphere", ball)));

    Demo {
        scene: Scenegraph::new("mirrors", root),
        modelview: Mat4::look_at_rh(Vec3::new(0.5, 1.0, 6.0), Vec3::ZERO, Vec3::Y),
        textures: Vec::new(),
    }
}
