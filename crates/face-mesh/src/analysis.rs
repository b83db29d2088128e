//! Per-face analysis results

use serde::{Deserialize, Serialize};

use crate::detector::FaceRegion;
use crate::landmarks::{Landmark, Point2, LEFT_EYE_CENTER, RIGHT_EYE_CENTER};
use crate::mesh::FaceMesh;

/// Everything derived for one face in one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedFace {
    /// Detector rectangle
    pub region: FaceRegion,

    /// Rectangle center
    pub center: Point2,

    /// Always 1.0; the detector does not score its output
    pub confidence: f64,

    /// 68 synthesized landmarks
    pub landmarks: Vec<Landmark>,

    /// Landmarks plus jaw midpoints
    pub mesh: FaceMesh,

    /// In-plane rotation (degrees)
    pub face_angle: f64,

    /// Mouth state
    pub mouth_open: bool,

    /// Mouth-center landmark position
    pub mouth_center: Point2,
}

impl DetectedFace {
    /// The two eye-center positions (right, left), if present
    pub fn eye_centers(&self) -> Option<(Point2, Point2)> {
        let right = self.landmarks.get(RIGHT_EYE_CENTER)?;
        let left = self.landmarks.get(LEFT_EYE_CENTER)?;
        Some((right.position, left.position))
    }

    /// Face width as a float
    pub fn width(&self) -> f32 {
        self.region.width as f32
    }

    /// Face height as a float
    pub fn height(&self) -> f32 {
        self.region.height as f32
    }
}
