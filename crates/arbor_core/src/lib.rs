//! Arbor Core - scene graph, primitives and shading inputs.
//!
//! This crate provides:
//!
//! - **Scene graph types**: `Scenegraph`, `SceneNode`, `LeafNode`
//! - **Primitives**: unit sphere and unit box intersection in object space
//! - **Shading inputs**: `Material`, `Light`, `TextureTable`
//!
//! # Example
//!
//! ```ignore
//! use arbor_core::{LeafNode, Light, Material, SceneNode, Scenegraph};
//!
//! let root = SceneNode::group("root")
//!     .with_light(Light::point(Vec3::new(0.0, 5.0, 5.0)))
//!     .with_child(SceneNode::leaf("ball", LeafNode::new("sphere", Material::default())));
//! let scene = Scenegraph::new("demo", root);
//! ```

pub mod hit;
pub mod light;
pub mod material;
pub mod primitive;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use hit::HitRecord;
pub use light::Light;
pub use material::Material;
pub use primitive::{LocalHit, Primitive};
pub use scene::{LeafNode, NodeKind, SceneNode, Scenegraph};
pub use texture::{Texture, TextureError, TextureResult, TextureTable, WHITE_TEXTURE};
