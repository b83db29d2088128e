//! Face Mesh Analysis
//!
//! Turns a detected face rectangle into everything the overlay pipeline
//! needs:
//! - 68 procedurally placed landmarks
//! - Face mesh (landmarks plus jaw midpoints) and in-plane rotation
//! - Mouth open/closed state from brightness statistics

pub mod analysis;
pub mod config;
pub mod detector;
pub mod landmarks;
pub mod mesh;
pub mod mouth;

pub use analysis::DetectedFace;
pub use config::{DetectorConfig, FaceMeshConfig, MouthThresholds};
pub use detector::{largest_region, FaceDetector, FaceRegion, FixedRegionDetector};
pub use landmarks::{Landmark, LandmarkSynthesizer, Point2, LANDMARK_COUNT};
pub use mesh::{face_angle, FaceMesh};
pub use mouth::{MouthDetector, MouthReading};

use camera_capture::frame::VideoFrame;
use thiserror::Error;
use tracing::{debug, info};

/// Face analysis error types
#[derive(Error, Debug)]
pub enum FaceMeshError {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Face analysis module
pub struct FaceAnalyzer {
    detector: Box<dyn FaceDetector>,
    synthesizer: LandmarkSynthesizer,
    mouth_detector: MouthDetector,
}

impl FaceAnalyzer {
    /// Create an analyzer with the built-in fixed-region detector
    pub fn new(config: &FaceMeshConfig) -> Result<Self, FaceMeshError> {
        config.validate()?;
        Ok(Self::with_detector(
            config,
            Box::new(FixedRegionDetector::new(&config.detector)),
        ))
    }

    /// Create an analyzer around any detector
    pub fn with_detector(config: &FaceMeshConfig, detector: Box<dyn FaceDetector>) -> Self {
        if !detector.is_available() {
            info!("Face detector unavailable; frames will pass through without analysis");
        }
        Self {
            detector,
            synthesizer: LandmarkSynthesizer::new(),
            mouth_detector: MouthDetector::new(config.mouth.clone()),
        }
    }

    /// Whether faces can be detected at all
    pub fn detection_enabled(&self) -> bool {
        self.detector.is_available()
    }

    /// Analyze a frame: at most one face, the largest detected
    pub fn analyze(&mut self, frame: &VideoFrame) -> Vec<DetectedFace> {
        if !self.detector.is_available() {
            return Vec::new();
        }

        let regions = self.detector.detect(frame);
        match largest_region(&regions) {
            Some(region) => vec![self.analyze_region(frame, region)],
            None => Vec::new(),
        }
    }

    /// Analyze a known face rectangle
    pub fn analyze_region(&self, frame: &VideoFrame, region: FaceRegion) -> DetectedFace {
        let landmarks = self.synthesizer.synthesize(&region);
        let mesh = FaceMesh::from_landmarks(&landmarks);
        let angle = face_angle(&landmarks);

        let mouth_open = region
            .clamp_to(frame.width, frame.height)
            .and_then(|r| frame.crop(r.x as u32, r.y as u32, r.width as u32, r.height as u32))
            .map(|crop| self.mouth_detector.is_open(&crop))
            .unwrap_or(false);

        let mouth_center = landmarks::mouth_center(&landmarks);
        debug!(
            "Face {:?}: angle={:.2} mouth_open={} mouth_center=({:.1}, {:.1})",
            region, angle, mouth_open, mouth_center.x, mouth_center.y
        );

        DetectedFace {
            region,
            center: region.center(),
            confidence: 1.0,
            landmarks,
            mesh,
            face_angle: angle,
            mouth_open,
            mouth_center,
        }
    }
}
