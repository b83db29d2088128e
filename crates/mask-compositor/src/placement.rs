//! Where the scaled overlay lands on the frame

use face_mesh::{DetectedFace, Point2};

use crate::{MaskConfig, MaskOffsets};

/// Overlay geometry for one face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Top-left corner in frame pixels (may be negative)
    pub x: i32,
    pub y: i32,
    /// Scaled overlay size
    pub width: u32,
    pub height: u32,
    /// Point the overlay is centered on
    pub anchor: Point2,
    /// Clockwise rotation (degrees, image coordinates)
    pub angle: f64,
}

impl Placement {
    /// Compute placement; `None` when the scaled overlay would be empty
    pub fn compute(face: &DetectedFace, offsets: &MaskOffsets, config: &MaskConfig) -> Option<Self> {
        let face_w = face.width();
        let face_h = face.height();
        let width = (face_w * config.scale) as u32;
        let height = (face_h * config.scale) as u32;
        if width == 0 || height == 0 {
            return None;
        }

        // Eye midpoint, or the box center for a short landmark set
        let eyes = face
            .eye_centers()
            .map(|(right, left)| right.midpoint(left))
            .unwrap_or(face.center);
        let anchor = Point2::new(eyes.x, eyes.y + face_h * config.eye_offset);

        let x = anchor.x - width as f32 / 2.0 + face_w * offsets.horizontal;
        let y = anchor.y - height as f32 / 2.0 + face_h * offsets.vertical;

        Some(Self {
            x: x.round() as i32,
            y: y.round() as i32,
            width,
            height,
            anchor,
            angle: face.face_angle,
        })
    }

    /// Center of the placed overlay
    pub fn center(&self) -> Point2 {
        Point2::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camera_capture::VideoFrame;
    use face_mesh::{FaceAnalyzer, FaceMeshConfig, FaceRegion};
    use proptest::prelude::*;

    fn face(region: FaceRegion) -> DetectedFace {
        FaceAnalyzer::new(&FaceMeshConfig::default())
            .unwrap()
            .analyze_region(&VideoFrame::filled(8, 8, [0, 0, 0]), region)
    }

    fn eye_midpoint(face: &DetectedFace) -> Point2 {
        let (right, left) = face.eye_centers().unwrap();
        right.midpoint(left)
    }

    #[test]
    fn test_scaled_size() {
        let face = face(FaceRegion::new(50, 40, 200, 100));
        let placement = Placement::compute(&face, &MaskOffsets::default(), &MaskConfig::default()).unwrap();
        assert_eq!((placement.width, placement.height), (280, 140));
    }

    #[test]
    fn test_anchor_sits_above_eyes() {
        let face = face(FaceRegion::new(0, 0, 200, 200));
        let placement = Placement::compute(&face, &MaskOffsets::default(), &MaskConfig::default()).unwrap();
        let eyes = eye_midpoint(&face);
        assert!((placement.anchor.x - eyes.x).abs() < 1e-4);
        assert!((placement.anchor.y - (eyes.y - 70.0)).abs() < 1e-3);
    }

    #[test]
    fn test_offsets_shift_by_face_units() {
        let face = face(FaceRegion::new(100, 100, 200, 160));
        let config = MaskConfig::default();
        let base = Placement::compute(&face, &MaskOffsets::default(), &config).unwrap();
        let moved = Placement::compute(&face, &MaskOffsets::new(0.25, -0.5), &config).unwrap();
        assert!((moved.x - base.x + 100).abs() <= 1);
        assert!((moved.y - base.y - 40).abs() <= 1);
    }

    #[test]
    fn test_tiny_face_has_no_placement() {
        let face = face(FaceRegion::new(10, 10, 0, 0));
        assert!(Placement::compute(&face, &MaskOffsets::default(), &MaskConfig::default()).is_none());
    }

    proptest! {
        #[test]
        fn prop_overlay_center_tracks_anchor(
            x in 0i32..400,
            y in 0i32..400,
            w in 20i32..300,
            h in 20i32..300,
        ) {
            let face = face(FaceRegion::new(x, y, w, h));
            let placement = Placement::compute(&face, &MaskOffsets::default(), &MaskConfig::default()).unwrap();
            let eyes = eye_midpoint(&face);
            let expected = Point2::new(eyes.x, eyes.y - 0.35 * h as f32);
            let center = placement.center();
            prop_assert!((center.x - expected.x).abs() <= 1.0);
            prop_assert!((center.y - expected.y).abs() <= 1.0);
        }
    }
}
