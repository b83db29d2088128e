//! Mask Compositor
//!
//! Places a themed overlay over the detected face: scaled past the face box,
//! anchored above the eyes, rotated with the head and alpha-blended into the
//! frame. Without an overlay image a procedural mask is drawn from the mesh.

pub mod blend;
pub mod compositor;
pub mod default_mask;
pub mod offsets;
pub mod overlay;
pub mod placement;

pub use blend::{blend_overlay, BlendAlpha};
pub use compositor::{MaskCompositor, MaskConfig};
pub use default_mask::draw_default_mask;
pub use offsets::MaskOffsets;
pub use overlay::Overlay;
pub use placement::Placement;

use std::path::PathBuf;

use thiserror::Error;

/// Compositor error types
#[derive(Error, Debug)]
pub enum CompositorError {
    #[error("Failed to load overlay {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Overlay not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
