//! Render errors.

use arbor_core::TextureError;
use thiserror::Error;

/// Errors that abort a frame.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Texture lookup failed: {0}")]
    Texture(#[from] TextureError),

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;
