//! Pull-based frame sources

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::frame::VideoFrame;
use crate::CameraError;

/// File extensions recognised as frames
const FRAME_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "webp"];

/// Result of a single read from a frame source
#[derive(Debug, Clone, PartialEq)]
pub enum FrameRead {
    /// A decoded frame
    Frame(VideoFrame),
    /// Nothing usable this time; skip and read again
    Empty,
    /// The source has no more frames
    End,
}

/// Pull-based source of video frames
pub trait FrameSource {
    /// Whether the device behind the source can deliver frames at all
    fn is_available(&self) -> bool;

    /// Read the next frame
    fn read(&mut self) -> Result<FrameRead, CameraError>;
}

/// Plays back a directory of images as a video stream
pub struct ImageDirSource {
    files: Vec<PathBuf>,
    cursor: usize,
    loop_frames: bool,
    sequence: u32,
    started: Instant,
}

impl ImageDirSource {
    /// Open a directory; files are read in file-name order
    pub fn open(dir: impl AsRef<Path>, loop_frames: bool) -> Result<Self, CameraError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(CameraError::Open(format!("{} is not a directory", dir.display())));
        }

        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| is_frame_file(path))
            .collect();
        files.sort();

        info!("Opened frame directory {} ({} frames)", dir.display(), files.len());

        Ok(Self {
            files,
            cursor: 0,
            loop_frames,
            sequence: 0,
            started: Instant::now(),
        })
    }

    /// Number of frame files found
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the directory holds no frames
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FrameSource for ImageDirSource {
    fn is_available(&self) -> bool {
        !self.files.is_empty()
    }

    fn read(&mut self) -> Result<FrameRead, CameraError> {
        if self.files.is_empty() {
            return Err(CameraError::NotAvailable);
        }

        if self.cursor >= self.files.len() {
            if !self.loop_frames {
                return Ok(FrameRead::End);
            }
            self.cursor = 0;
        }

        let path = &self.files[self.cursor];
        self.cursor += 1;

        match image::open(path) {
            Ok(decoded) => {
                let frame = VideoFrame::from_rgb_image(
                    decoded.to_rgb8(),
                    self.started.elapsed().as_nanos() as u64,
                    self.sequence,
                );
                self.sequence = self.sequence.wrapping_add(1);
                debug!("Read frame {} from {}", frame.sequence, path.display());
                Ok(FrameRead::Frame(frame))
            }
            Err(e) => {
                warn!("Skipping unreadable frame {}: {}", path.display(), e);
                Ok(FrameRead::Empty)
            }
        }
    }
}

/// Repeats a single image, like a camera pointed at a photo
pub struct StillImageSource {
    frame: VideoFrame,
    sequence: u32,
    started: Instant,
}

impl StillImageSource {
    /// Decode the image at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CameraError> {
        let path = path.as_ref();
        let decoded = image::open(path)?;
        info!("Opened still image {}", path.display());
        Ok(Self::from_frame(VideoFrame::from_rgb_image(decoded.to_rgb8(), 0, 0)))
    }

    /// Repeat an already decoded frame
    pub fn from_frame(frame: VideoFrame) -> Self {
        Self {
            frame,
            sequence: 0,
            started: Instant::now(),
        }
    }
}

impl FrameSource for StillImageSource {
    fn is_available(&self) -> bool {
        !self.frame.is_empty()
    }

    fn read(&mut self) -> Result<FrameRead, CameraError> {
        if self.frame.is_empty() {
            return Ok(FrameRead::Empty);
        }
        let mut frame = self.frame.clone();
        frame.timestamp_ns = self.started.elapsed().as_nanos() as u64;
        frame.sequence = self.sequence;
        self.sequence = self.sequence.wrapping_add(1);
        Ok(FrameRead::Frame(frame))
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
}
