//! Overlay image loading

use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbaImage};
use tracing::{debug, info, warn};

use crate::CompositorError;

/// Decoded overlay image
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub image: RgbaImage,
    /// The source carried a transparency channel
    pub has_alpha: bool,
}

impl Overlay {
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let has_alpha = image.color().has_alpha();
        Self {
            image: image.to_rgba8(),
            has_alpha,
        }
    }

    /// Decode the overlay at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CompositorError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| CompositorError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let overlay = Self::from_dynamic(decoded);
        info!(
            "Overlay loaded: {} ({}x{}, alpha={})",
            path.display(),
            overlay.width(),
            overlay.height(),
            overlay.has_alpha
        );
        Ok(overlay)
    }

    /// Try `file_name` inside each directory in order, then as given
    pub fn find(file_name: &str, dirs: &[PathBuf]) -> Result<(Self, PathBuf), CompositorError> {
        let candidates = dirs
            .iter()
            .map(|dir| dir.join(file_name))
            .chain(std::iter::once(PathBuf::from(file_name)));

        for candidate in candidates {
            if !candidate.is_file() {
                debug!("No overlay at {}", candidate.display());
                continue;
            }
            match Self::load(&candidate) {
                Ok(overlay) => return Ok((overlay, candidate)),
                Err(e) => warn!("{}", e),
            }
        }

        Err(CompositorError::NotFound(file_name.to_string()))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
