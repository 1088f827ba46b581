//! Texture storage and lookup for shading.
//!
//! Textures are decoded up front into a name-keyed `TextureTable` that the
//! renderer owns for the duration of a frame. Lookups of unknown names are
//! hard errors.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use arbor_math::Vec3;
use thiserror::Error;

/// Name of the built-in 1x1 white texture every table starts with.
pub const WHITE_TEXTURE: &str = "white";

/// Errors that can occur during texture loading and lookup.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Texture '{0}' is not loaded")]
    Missing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode texture {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A decoded texture image.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Pixel data, RGBA8, row-major from the top row
    pub pixels: Vec<[u8; 4]>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 4]>, path: impl Into<String>) -> Self {
        Self {
            width,
            height,
            pixels,
            path: path.into(),
        }
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: [u8; 3]) -> Self {
        Self::new(1, 1, vec![[color[0], color[1], color[2], 255]], "<solid>")
    }

    /// Load a texture from a file path.
    pub fn open(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| match source {
            image::ImageError::IoError(e) => TextureError::Io(e),
            source => TextureError::Decode {
                path: path.display().to_string(),
                source,
            },
        })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels = rgba.pixels().map(|p| p.0).collect();

        Ok(Self::new(width, height, pixels, path.to_string_lossy()))
    }

    /// Color at texture coordinates, RGB channels in [0, 255].
    ///
    /// Nearest-texel lookup. Both coordinates wrap, and v = 0 is the
    /// bottom row of the image.
    pub fn color_at(&self, u: f32, v: f32) -> Vec3 {
        let u = u.rem_euclid(1.0);
        let v = v.rem_euclid(1.0);

        let x = ((u * self.width as f32) as u32).min(self.width.saturating_sub(1));
        let y = (((1.0 - v) * self.height as f32) as u32).min(self.height.saturating_sub(1));

        let [r, g, b, _] = self.get_pixel(x, y);
        Vec3::new(r as f32, g as f32, b as f32)
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y * self.width + x) as usize;
        self.pixels.get(idx).copied().unwrap_or([0, 0, 0, 255])
    }
}

/// Owned table of textures keyed by name.
#[derive(Clone, Debug)]
pub struct TextureTable {
    textures: HashMap<String, Arc<Texture>>,
}

impl TextureTable {
    /// Create a table holding only the built-in white texture.
    pub fn new() -> Self {
        let mut textures = HashMap::new();
        textures.insert(
            WHITE_TEXTURE.to_string(),
            Arc::new(Texture::solid_color([255, 255, 255])),
        );
        Self { textures }
    }

    /// Register an already decoded texture under `name`.
    pub fn insert(&mut self, name: impl Into<String>, texture: Texture) {
        self.textures.insert(name.into(), Arc::new(texture));
    }

    /// Decode the image at `path` and register it under `name`.
    pub fn load(&mut self, name: &str, path: impl AsRef<Path>) -> TextureResult<()> {
        let texture = Texture::open(path)?;

        log::debug!(
            "Loaded texture '{}': {} ({}x{})",
            name,
            texture.path,
            texture.width,
            texture.height
        );

        self.insert(name, texture);
        Ok(())
    }

    /// Look up a texture by name.
    pub fn get(&self, name: &str) -> TextureResult<&Texture> {
        self.textures
            .get(name)
            .map(|t| t.as_ref())
            .ok_or_else(|| TextureError::Missing(name.to_string()))
    }

    /// Check if a texture is present.
    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    /// Names of all textures, including the built-in one, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.textures.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for TextureTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Texture {
        // 2x2: top row red, green; bottom row blue, white
        Texture::new(
            2,
            2,
            vec![
                [255, 0, 0, 255],
                [0, 255, 0, 255],
                [0, 0, 255, 255],
                [255, 255, 255, 255],
            ],
            "<checker>",
        )
    }

    #[test]
    fn test_solid_color_texture() {
        let tex = Texture::solid_color([255, 128, 0]);
        assert_eq!(tex.width, 1);
        assert_eq!(tex.color_at(0.3, 0.7), Vec3::new(255.0, 128.0, 0.0));
    }

    #[test]
    fn test_color_at_orientation() {
        let tex = checker();

        // v = 0 is the bottom of the image
        assert_eq!(tex.color_at(0.25, 0.25), Vec3::new(0.0, 0.0, 255.0));
        assert_eq!(tex.color_at(0.75, 0.25), Vec3::splat(255.0));
        assert_eq!(tex.color_at(0.25, 0.75), Vec3::new(255.0, 0.0, 0.0));
        assert_eq!(tex.color_at(0.75, 0.75), Vec3::new(0.0, 255.0, 0.0));
    }

    #[test]
    fn test_color_at_wraps() {
        let tex = checker();
        assert_eq!(tex.color_at(-0.75, 0.25), tex.color_at(0.25, 0.25));
        assert_eq!(tex.color_at(1.75, 1.75), tex.color_at(0.75, 0.75));
        // Exactly 1.0 wraps to 0.0 rather than reading out of bounds
        assert_eq!(tex.color_at(1.0, 0.25), tex.color_at(0.0, 0.25));
    }

    #[test]
    fn test_table_has_white() {
        let table = TextureTable::new();
        assert_eq!(table.names(), vec![WHITE_TEXTURE]);
        let white = table.get(WHITE_TEXTURE).unwrap();
        assert_eq!(white.color_at(0.5, 0.5), Vec3::splat(255.0));
    }

    #[test]
    fn test_missing_texture_is_error() {
        let table = TextureTable::new();
        match table.get("earth") {
            Err(TextureError::Missing(name)) => assert_eq!(name, "earth"),
            other => panic!("expected missing texture error, got {:?}", other.map(|t| t.width)),
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let mut table = TextureTable::new();
        assert!(table.load("nope", "/definitely/not/here.png").is_err());
        assert!(!table.contains("nope"));
    }

    #[test]
    fn test_names_sorted() {
        let mut table = TextureTable::new();
        table.insert("marble", Texture::solid_color([200, 200, 200]));
        table.insert("brick", Texture::solid_color([150, 60, 40]));
        assert_eq!(table.names(), vec!["brick", "marble", WHITE_TEXTURE]);
    }
}
