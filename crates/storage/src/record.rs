//! Capture record types

use chrono::{DateTime, Local, Utc};
use face_mesh::DetectedFace;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag stored with every record
pub const ANALYSIS_TYPE: &str = "face_mesh_overlay";

/// `YYYYmmdd_HHMMSS` in local time
pub fn capture_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y%m%d_%H%M%S").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectRecord {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkRecord {
    pub id: usize,
    pub name: String,
    pub x: f32,
    pub y: f32,
}

/// One analysed face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceRecord {
    pub face_rect: RectRecord,
    pub confidence: f64,
    pub center: PointRecord,
    pub landmarks: Vec<LandmarkRecord>,
    pub face_mesh: Vec<PointRecord>,
    pub face_angle: f64,
    pub mouth_open: bool,
    pub landmarks_count: usize,
    pub mesh_points_count: usize,
}

impl From<&DetectedFace> for FaceRecord {
    fn from(face: &DetectedFace) -> Self {
        Self {
            face_rect: RectRecord {
                x: face.region.x,
                y: face.region.y,
                width: face.region.width,
                height: face.region.height,
            },
            confidence: face.confidence,
            center: PointRecord {
                x: face.center.x,
                y: face.center.y,
            },
            landmarks: face
                .landmarks
                .iter()
                .map(|l| LandmarkRecord {
                    id: l.id,
                    name: l.name.clone(),
                    x: l.position.x,
                    y: l.position.y,
                })
                .collect(),
            face_mesh: face.mesh.points.iter().map(|p| PointRecord { x: p.x, y: p.y }).collect(),
            face_angle: face.face_angle,
            mouth_open: face.mouth_open,
            landmarks_count: face.landmarks.len(),
            mesh_points_count: face.mesh.len(),
        }
    }
}

/// One captured photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureRecord {
    pub id: Uuid,
    pub filename: String,
    pub theme_name: String,
    pub mask_file: String,
    /// Local `YYYYmmdd_HHMMSS`
    pub timestamp: String,
    pub captured_at: DateTime<Utc>,
    pub faces_detected: usize,
    pub faces: Vec<FaceRecord>,
    pub analysis_type: String,
    pub app_version: String,
}

impl CaptureRecord {
    pub fn new(
        filename: impl Into<String>,
        theme_name: impl Into<String>,
        mask_file: impl Into<String>,
        captured_at: DateTime<Utc>,
        faces: &[DetectedFace],
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: filename.into(),
            theme_name: theme_name.into(),
            mask_file: mask_file.into(),
            timestamp: capture_timestamp(captured_at),
            captured_at,
            faces_detected: faces.len(),
            faces: faces.iter().map(FaceRecord::from).collect(),
            analysis_type: ANALYSIS_TYPE.to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
