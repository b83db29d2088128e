//! Face mesh and in-plane rotation from landmarks

use serde::{Deserialize, Serialize};

use crate::landmarks::{Landmark, Point2, JAW, LEFT_EYE_CENTER, RIGHT_EYE_CENTER};

/// Landmark positions followed by the jaw midpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceMesh {
    pub points: Vec<Point2>,
}

impl FaceMesh {
    /// Build the mesh for a landmark sequence
    ///
    /// Jaw midpoints are only added when the full jaw (17 points) is present.
    pub fn from_landmarks(landmarks: &[Landmark]) -> Self {
        let mut points: Vec<Point2> = landmarks.iter().map(|l| l.position).collect();

        if landmarks.len() >= JAW.len() {
            for pair in landmarks[JAW].windows(2) {
                points.push(pair[0].position.midpoint(pair[1].position));
            }
        }

        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Face rotation in degrees, from the right eye center towards the left eye center
///
/// Zero when either eye center is missing.
pub fn face_angle(landmarks: &[Landmark]) -> f64 {
    let (Some(right), Some(left)) = (landmarks.get(RIGHT_EYE_CENTER), landmarks.get(LEFT_EYE_CENTER)) else {
        return 0.0;
    };
    let dx = f64::from(left.position.x - right.position.x);
    let dy = f64::from(left.position.y - right.position.y);
    dy.atan2(dx).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::FaceRegion;
    use crate::landmarks::{LandmarkSynthesizer, LANDMARK_COUNT};
    use proptest::prelude::*;

    fn landmarks() -> Vec<Landmark> {
        LandmarkSynthesizer::new().synthesize(&FaceRegion::new(0, 0, 200, 200))
    }

    #[test]
    fn test_mesh_appends_jaw_midpoints() {
        let landmarks = landmarks();
        let mesh = FaceMesh::from_landmarks(&landmarks);
        assert_eq!(mesh.len(), LANDMARK_COUNT + 16);

        let first_mid = mesh.points[LANDMARK_COUNT];
        let expected = landmarks[0].position.midpoint(landmarks[1].position);
        assert_eq!(first_mid, expected);
        assert_eq!(mesh.points[5], landmarks[5].position);
    }

    #[test]
    fn test_short_landmark_list_has_no_midpoints() {
        let landmarks = landmarks();
        let mesh = FaceMesh::from_landmarks(&landmarks[..10]);
        assert_eq!(mesh.len(), 10);
    }

    #[test]
    fn test_level_eyes_give_zero_angle() {
        assert_eq!(face_angle(&landmarks()), 0.0);
    }

    #[test]
    fn test_missing_eyes_give_zero_angle() {
        let landmarks = landmarks();
        assert_eq!(face_angle(&landmarks[..40]), 0.0);
        assert_eq!(face_angle(&[]), 0.0);
    }

    #[test]
    fn test_tilted_eyes() {
        let mut landmarks = landmarks();
        landmarks[RIGHT_EYE_CENTER].position = Point2::new(0.0, 0.0);
        landmarks[LEFT_EYE_CENTER].position = Point2::new(10.0, 10.0);
        assert!((face_angle(&landmarks) - 45.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_angle_sign_flips_with_eye_offset(dy in 0.1f32..100.0, dx in 1.0f32..200.0) {
            let mut landmarks = landmarks();
            landmarks[RIGHT_EYE_CENTER].position = Point2::new(50.0, 0.0);
            landmarks[LEFT_EYE_CENTER].position = Point2::new(50.0 + dx, dy);
            let down = face_angle(&landmarks);
            landmarks[LEFT_EYE_CENTER].position = Point2::new(50.0 + dx, -dy);
            let up = face_angle(&landmarks);
            prop_assert!(down > 0.0);
            prop_assert!((down + up).abs() < 1e-6);
        }
    }
}
