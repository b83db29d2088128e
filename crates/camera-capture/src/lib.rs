//! Camera Capture Library
//!
//! Provides the frame buffer type shared by the pipeline and the pull-based
//! frame sources that feed it:
//! - Directory of still images played back as a video stream
//! - Single still image repeated as a static camera

pub mod frame;
pub mod source;

pub use frame::VideoFrame;
pub use source::{FrameRead, FrameSource, ImageDirSource, StillImageSource};

use std::path::PathBuf;
use thiserror::Error;

/// Camera error types
#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Failed to open source: {0}")]
    Open(String),

    #[error("Invalid format: {0}")]
    Format(String),

    #[error("Failed to decode frame: {0}")]
    Decode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source not available")]
    NotAvailable,
}

/// Frame source configuration
#[derive(Debug, Clone)]
pub enum SourceConfig {
    /// Directory of image files, read in file-name order
    Directory {
        path: PathBuf,
        /// Restart from the first file when the directory is exhausted
        loop_frames: bool,
    },
    /// Single image repeated forever
    Still(PathBuf),
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Directory {
            path: PathBuf::from("frames"),
            loop_frames: false,
        }
    }
}

/// Open the frame source described by `config`
pub fn open_source(config: &SourceConfig) -> Result<Box<dyn FrameSource>, CameraError> {
    match config {
        SourceConfig::Directory { path, loop_frames } => {
            Ok(Box::new(ImageDirSource::open(path, *loop_frames)?))
        }
        SourceConfig::Still(path) => Ok(Box::new(StillImageSource::open(path)?)),
    }
}
