//! Procedural 68-point landmark synthesis
//!
//! Landmarks are placed with closed-form formulas relative to the detected
//! face rectangle; there is no landmark regression model behind them. The
//! output is a pure function of the rectangle.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::detector::FaceRegion;

/// Number of landmarks produced for every face
pub const LANDMARK_COUNT: usize = 68;

/// Jaw line, ids 0-16
pub const JAW: std::ops::Range<usize> = 0..17;
/// Right eyebrow, ids 17-21
pub const RIGHT_EYEBROW: std::ops::Range<usize> = 17..22;
/// Left eyebrow, ids 22-26
pub const LEFT_EYEBROW: std::ops::Range<usize> = 22..27;
/// Nose, ids 27-35
pub const NOSE: std::ops::Range<usize> = 27..36;
/// Right eye, ids 36-41 (center first)
pub const RIGHT_EYE: std::ops::Range<usize> = 36..42;
/// Left eye, ids 42-47 (center first)
pub const LEFT_EYE: std::ops::Range<usize> = 42..48;
/// Mouth, ids 48-67 (center first)
pub const MOUTH: std::ops::Range<usize> = 48..68;

/// Right eye center landmark
pub const RIGHT_EYE_CENTER: usize = 36;
/// Left eye center landmark
pub const LEFT_EYE_CENTER: usize = 42;
/// Nose landmark used for the default mask marker
pub const NOSE_TIP: usize = 30;
/// Mouth center landmark
pub const MOUTH_CENTER: usize = 48;

/// Outer mouth points use the wide radius band
const MOUTH_OUTER_POINTS: usize = 11;

/// Names for the 68 landmarks, indexed by id
pub const LANDMARK_NAMES: [&str; LANDMARK_COUNT] = [
    "jaw_1", "jaw_2", "jaw_3", "jaw_4", "jaw_5", "jaw_6", "jaw_7", "jaw_8", "jaw_9",
    "jaw_10", "jaw_11", "jaw_12", "jaw_13", "jaw_14", "jaw_15", "jaw_16", "jaw_17",
    "right_eyebrow_1", "right_eyebrow_2", "right_eyebrow_3", "right_eyebrow_4", "right_eyebrow_5",
    "left_eyebrow_1", "left_eyebrow_2", "left_eyebrow_3", "left_eyebrow_4", "left_eyebrow_5",
    "nose_1", "nose_2", "nose_3", "nose_4", "nose_5", "nose_6", "nose_7", "nose_8", "nose_9",
    "right_eye_center", "right_eye_1", "right_eye_2", "right_eye_3", "right_eye_4", "right_eye_5",
    "left_eye_center", "left_eye_1", "left_eye_2", "left_eye_3", "left_eye_4", "left_eye_5",
    "mouth_center", "mouth_outer_1", "mouth_outer_2", "mouth_outer_3", "mouth_outer_4",
    "mouth_outer_5", "mouth_outer_6", "mouth_outer_7", "mouth_outer_8", "mouth_outer_9",
    "mouth_outer_10", "mouth_outer_11", "mouth_inner_1", "mouth_inner_2", "mouth_inner_3",
    "mouth_inner_4", "mouth_inner_5", "mouth_inner_6", "mouth_inner_7", "mouth_inner_8",
];

/// 2D point in frame pixel coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point halfway between `self` and `other`
    pub fn midpoint(self, other: Point2) -> Point2 {
        Point2::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

/// A single facial landmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub position: Point2,
    /// Equals the landmark's index in the synthesized sequence
    pub id: usize,
    pub name: String,
}

/// Places the 68 landmarks for a face rectangle
#[derive(Debug, Clone)]
pub struct LandmarkSynthesizer {
    names: Vec<String>,
}

impl Default for LandmarkSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl LandmarkSynthesizer {
    /// Synthesizer using the standard name table
    pub fn new() -> Self {
        Self::with_names(LANDMARK_NAMES.iter().map(|s| s.to_string()).collect())
    }

    /// Synthesizer with a custom name table; ids past its end get generated names
    pub fn with_names(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Generate all 68 landmarks for `region`
    pub fn synthesize(&self, region: &FaceRegion) -> Vec<Landmark> {
        let mut landmarks = Vec::with_capacity(LANDMARK_COUNT);

        let face_width = region.width as f32;
        let face_height = region.height as f32;
        let origin_x = region.x as f32;
        let origin_y = region.y as f32;
        let center_x = origin_x + face_width / 2.0;
        let center_y = origin_y + face_height / 2.0;

        // Jaw: sine-bulged line along 80% of the height
        for i in 0..JAW.len() {
            let t = i as f32 / 16.0;
            let x = origin_x + t * face_width;
            let y = origin_y + face_height * 0.8 + (t * PI).sin() * face_height * 0.1;
            self.push(&mut landmarks, Point2::new(x, y), || format!("jaw_{}", i + 1));
        }

        // Eyebrows arch upward from a line a quarter height above center
        for i in 0..RIGHT_EYEBROW.len() {
            let t = i as f32 / 4.0;
            let x = center_x - face_width * 0.25 + t * face_width * 0.25;
            let y = center_y - face_height * 0.25 - face_height * 0.05 * (t * PI).sin();
            self.push(&mut landmarks, Point2::new(x, y), || format!("right_eyebrow_{}", i + 1));
        }
        for i in 0..LEFT_EYEBROW.len() {
            let t = i as f32 / 4.0;
            let x = center_x + t * face_width * 0.25;
            let y = center_y - face_height * 0.25 - face_height * 0.05 * (t * PI).sin();
            self.push(&mut landmarks, Point2::new(x, y), || format!("left_eyebrow_{}", i + 1));
        }

        // Nose: three columns stepping down the bridge
        for i in 0..NOSE.len() {
            let t = i as f32 / 8.0;
            let column = (i % 3) as f32 - 1.0;
            let x = center_x + column * face_width * 0.05;
            let y = center_y - face_height * 0.1 + t * face_height * 0.2;
            self.push(&mut landmarks, Point2::new(x, y), || format!("nose_{}", i + 1));
        }

        let eye_y = center_y - face_height * 0.1;
        self.push_eye(
            &mut landmarks,
            Point2::new(center_x - face_width * 0.18, eye_y),
            face_width,
            face_height,
            "right_eye",
        );
        self.push_eye(
            &mut landmarks,
            Point2::new(center_x + face_width * 0.18, eye_y),
            face_width,
            face_height,
            "left_eye",
        );

        // Mouth: center plus 19 points at 18 degree steps, wide band then narrow band
        let mouth_center = Point2::new(center_x, center_y + face_height * 0.42);
        self.push(&mut landmarks, mouth_center, || "mouth_center".to_string());
        for i in 1..MOUTH.len() {
            let angle = i as f32 * 2.0 * PI / 20.0;
            let radius = if i <= MOUTH_OUTER_POINTS {
                face_width * 0.15
            } else {
                face_width * 0.1
            };
            let x = mouth_center.x + angle.cos() * radius;
            let y = mouth_center.y + angle.sin() * face_height * 0.08;
            self.push(&mut landmarks, Point2::new(x, y), || format!("mouth_{}", i));
        }

        landmarks
    }

    /// Eye center followed by 5 points at 60 degree steps on a 6% x 3% ellipse
    fn push_eye(
        &self,
        landmarks: &mut Vec<Landmark>,
        center: Point2,
        face_width: f32,
        face_height: f32,
        prefix: &str,
    ) {
        self.push(landmarks, center, || format!("{}_center", prefix));
        for i in 1..6 {
            let angle = i as f32 * 2.0 * PI / 6.0;
            let x = center.x + angle.cos() * face_width * 0.06;
            let y = center.y + angle.sin() * face_height * 0.03;
            self.push(landmarks, Point2::new(x, y), || format!("{}_{}", prefix, i));
        }
    }

    fn push(&self, landmarks: &mut Vec<Landmark>, position: Point2, fallback: impl FnOnce() -> String) {
        let id = landmarks.len();
        let name = self.names.get(id).cloned().unwrap_or_else(fallback);
        landmarks.push(Landmark { position, id, name });
    }
}

/// Position of the mouth-center landmark, or the origin if it is missing
pub fn mouth_center(landmarks: &[Landmark]) -> Point2 {
    landmarks
        .get(MOUTH_CENTER)
        .map(|l| l.position)
        .unwrap_or_default()
}
