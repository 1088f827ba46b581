//! Scene graph types for Arbor.
//!
//! A scene is a tree of nodes. Group nodes only hold children, transform
//! nodes additionally apply a matrix to everything below them, and leaf
//! nodes carry one implicit primitive together with its material and
//! texture. Any node may carry lights, which are expressed in the frame
//! of that node.
//!
//! Traversal always carries the accumulated modelview matrix (view matrix
//! times every transform on the path from the root), so a leaf can move a
//! view-space ray into its own object space and back.

use std::collections::BTreeMap;
use std::path::PathBuf;

use arbor_math::{Mat4, Mat4Ext, Ray};

use crate::hit::HitRecord;
use crate::light::Light;
use crate::material::Material;
use crate::primitive::Primitive;
use crate::texture::WHITE_TEXTURE;

/// A leaf of the scene graph: the only kind of node with geometry.
#[derive(Clone, Debug)]
pub struct LeafNode {
    pub primitive: Primitive,
    pub material: Material,
    pub texture_name: String,
}

impl LeafNode {
    /// Create a leaf for the named primitive ("sphere" or "box").
    ///
    /// Other names produce a leaf that is never hit.
    pub fn new(primitive_name: &str, material: Material) -> Self {
        let primitive = Primitive::from_name(primitive_name);
        if !primitive.is_supported() {
            log::debug!("Unsupported primitive '{}', leaf will never be hit", primitive.name());
        }

        Self {
            primitive,
            material,
            texture_name: WHITE_TEXTURE.to_string(),
        }
    }

    /// Set the name of the texture used for this leaf.
    pub fn with_texture(mut self, name: impl Into<String>) -> Self {
        self.texture_name = name.into();
        self
    }

    /// Intersect a view-space ray with this leaf.
    ///
    /// `modelview` maps this leaf's object space into view space.
    pub fn intersect(&self, ray_view: &Ray, modelview: &Mat4) -> HitRecord<'_> {
        let view_to_leaf = modelview.inverse();
        let ray_object = ray_view.transformed(&view_to_leaf);

        let Some(local) = self.primitive.intersect(&ray_object) else {
            return HitRecord::none();
        };

        let normal = modelview.normal_matrix().transform_normal4(local.normal);

        HitRecord {
            distance: local.t,
            point: ray_view.at(local.t),
            normal,
            material: &self.material,
            texture_name: &self.texture_name,
            texcoord: local.texcoord,
        }
    }
}

/// What a node does besides carrying lights.
#[derive(Clone, Debug)]
pub enum NodeKind {
    Group(Vec<SceneNode>),
    Transform(Mat4, Vec<SceneNode>),
    Leaf(LeafNode),
}

/// A named node in the scene graph.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub lights: Vec<Light>,
    pub kind: NodeKind,
}

impl SceneNode {
    /// Create an empty group node.
    pub fn group(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Group(Vec::new()))
    }

    /// Create a transform node with no children yet.
    pub fn transform(name: impl Into<String>, transform: Mat4) -> Self {
        Self::with_kind(name, NodeKind::Transform(transform, Vec::new()))
    }

    /// Create a leaf node.
    pub fn leaf(name: impl Into<String>, leaf: LeafNode) -> Self {
        Self::with_kind(name, NodeKind::Leaf(leaf))
    }

    fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            lights: Vec::new(),
            kind,
        }
    }

    /// Add a child. Leaves ignore children (with a warning).
    pub fn with_child(mut self, child: SceneNode) -> Self {
        match &mut self.kind {
            NodeKind::Group(children) | NodeKind::Transform(_, children) => children.push(child),
            NodeKind::Leaf(_) => {
                log::warn!("Leaf '{}' cannot have children, dropping '{}'", self.name, child.name);
            }
        }
        self
    }

    /// Attach a light, expressed in this node's frame.
    pub fn with_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    /// Child nodes (empty for leaves).
    pub fn children(&self) -> &[SceneNode] {
        match &self.kind {
            NodeKind::Group(children) | NodeKind::Transform(_, children) => children,
            NodeKind::Leaf(_) => &[],
        }
    }

    /// Nearest hit in this subtree. `modelview` is the accumulated matrix
    /// of this node's parent.
    pub fn intersect(&self, ray_view: &Ray, modelview: &Mat4) -> HitRecord<'_> {
        match &self.kind {
            NodeKind::Leaf(leaf) => leaf.intersect(ray_view, modelview),
            NodeKind::Group(children) => nearest_child_hit(children, ray_view, modelview),
            NodeKind::Transform(transform, children) => {
                let modelview = *modelview * *transform;
                nearest_child_hit(children, ray_view, &modelview)
            }
        }
    }

    /// Append every light in this subtree, transformed into view space.
    pub fn collect_lights(&self, modelview: &Mat4, out: &mut Vec<Light>) {
        let modelview = match &self.kind {
            NodeKind::Transform(transform, _) => *modelview * *transform,
            _ => *modelview,
        };

        out.extend(self.lights.iter().map(|light| light.transformed(&modelview)));

        for child in self.children() {
            child.collect_lights(&modelview, out);
        }
    }

    /// Number of leaf nodes in this subtree.
    pub fn leaf_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 1,
            _ => self.children().iter().map(SceneNode::leaf_count).sum(),
        }
    }

    /// Visit every leaf in this subtree.
    pub fn for_each_leaf<'a>(&'a self, f: &mut impl FnMut(&'a LeafNode)) {
        match &self.kind {
            NodeKind::Leaf(leaf) => f(leaf),
            _ => {
                for child in self.children() {
                    child.for_each_leaf(f);
                }
            }
        }
    }
}

fn nearest_child_hit<'a>(
    children: &'a [SceneNode],
    ray_view: &Ray,
    modelview: &Mat4,
) -> HitRecord<'a> {
    children
        .iter()
        .map(|child| child.intersect(ray_view, modelview))
        .fold(HitRecord::none(), HitRecord::nearest)
}

/// A complete scene: the node tree plus the textures it refers to.
#[derive(Clone, Debug)]
pub struct Scenegraph {
    /// Scene name
    pub name: String,

    pub root: SceneNode,

    /// Texture image paths by texture name
    pub textures: BTreeMap<String, PathBuf>,
}

impl Scenegraph {
    /// Create a scene around a root node.
    pub fn new(name: impl Into<String>, root: SceneNode) -> Self {
        Self {
            name: name.into(),
            root,
            textures: BTreeMap::new(),
        }
    }

    /// Register a texture image to be loaded before rendering.
    pub fn add_texture(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.textures.insert(name.into(), path.into());
    }

    /// Nearest hit of a view-space ray anywhere in the scene.
    pub fn intersect(&self, ray_view: &Ray, modelview: &Mat4) -> HitRecord<'_> {
        self.root.intersect(ray_view, modelview)
    }

    /// All lights in the scene, transformed into view space.
    pub fn lights(&self, modelview: &Mat4) -> Vec<Light> {
        let mut lights = Vec::new();
        self.root.collect_lights(modelview, &mut lights);
        lights
    }

    /// Names of all textures referenced by leaves, deduplicated and sorted.
    pub fn referenced_textures(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.root.for_each_leaf(&mut |leaf| names.push(leaf.texture_name.as_str()));
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Get total leaf count.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }
}
