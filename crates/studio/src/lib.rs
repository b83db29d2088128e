//! Face Mask Studio
//!
//! Ties the pipeline together: configuration, themes, the per-frame
//! render path, photo capture and the interactive frame loop.

pub mod app;
pub mod config;
pub mod input;
pub mod pipeline;
pub mod session;
pub mod theme;

pub use app::{App, SessionSummary};
pub use config::StudioConfig;
pub use input::{InputSource, Key, KeyCommand, Poll, ScriptedInput, StdinInput};
pub use pipeline::{CaptureOutcome, Pipeline, RenderedFrame};
pub use session::Session;
pub use theme::Theme;

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Studio error types
#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Camera(#[from] camera_capture::CameraError),

    #[error(transparent)]
    FaceMesh(#[from] face_mesh::FaceMeshError),

    #[error(transparent)]
    Compositor(#[from] mask_compositor::CompositorError),

    #[error(transparent)]
    Storage(#[from] storage::StorageError),

    #[error("Failed to write {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frame source not available")]
    SourceUnavailable,
}

/// Initialize logging
pub fn init_logging(level: &str, json: bool) {
    let level = Level::from_str(level).unwrap_or(Level::INFO);
    let builder = FmtSubscriber::builder().with_max_level(level).with_target(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())
            .expect("Failed to set tracing subscriber");
    } else {
        tracing::subscriber::set_global_default(builder.finish())
            .expect("Failed to set tracing subscriber");
    }
}
