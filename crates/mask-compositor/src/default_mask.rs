//! Procedural mask drawn when no overlay image is available

use face_mesh::landmarks::{LEFT_EYE_CENTER, NOSE_TIP, RIGHT_EYE_CENTER};
use face_mesh::{DetectedFace, Point2};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_polygon_mut};
use imageproc::point::Point;

const MASK_FILL: Rgb<u8> = Rgb([255, 200, 100]);
const EYE_MARKER: Rgb<u8> = Rgb([0, 255, 255]);
const NOSE_MARKER: Rgb<u8> = Rgb([255, 255, 0]);
const EYE_MARKER_RADIUS: i32 = 5;
const NOSE_MARKER_RADIUS: i32 = 3;

fn pixel(point: Point2) -> Point<i32> {
    Point::new(point.x as i32, point.y as i32)
}

/// Fill the mesh outline and mark the eyes and nose tip.
///
/// Depends only on `face`, so repeated calls on the same frame are stable.
pub fn draw_default_mask(frame: &mut RgbImage, face: &DetectedFace) {
    let mut outline: Vec<Point<i32>> = Vec::with_capacity(face.mesh.len());
    for point in face.mesh.points.iter().copied().map(pixel) {
        if outline.last() != Some(&point) {
            outline.push(point);
        }
    }
    while outline.len() > 1 && outline.first() == outline.last() {
        outline.pop();
    }
    if outline.len() <= 3 {
        return;
    }

    draw_polygon_mut(frame, &outline, MASK_FILL);

    for index in [RIGHT_EYE_CENTER, LEFT_EYE_CENTER] {
        if let Some(eye) = face.landmarks.get(index) {
            let p = pixel(eye.position);
            draw_filled_circle_mut(frame, (p.x, p.y), EYE_MARKER_RADIUS, EYE_MARKER);
        }
    }
    if let Some(nose) = face.landmarks.get(NOSE_TIP) {
        let p = pixel(nose.position);
        draw_filled_circle_mut(frame, (p.x, p.y), NOSE_MARKER_RADIUS, NOSE_MARKER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camera_capture::VideoFrame;
    use face_mesh::{FaceAnalyzer, FaceMeshConfig, FaceRegion};

    fn face(region: FaceRegion) -> DetectedFace {
        FaceAnalyzer::new(&FaceMeshConfig::default())
            .unwrap()
            .analyze_region(&VideoFrame::filled(8, 8, [0, 0, 0]), region)
    }

    #[test]
    fn test_markers_drawn_at_landmarks() {
        let face = face(FaceRegion::new(40, 40, 160, 160));
        let mut frame = RgbImage::from_pixel(240, 240, Rgb([5, 5, 5]));
        draw_default_mask(&mut frame, &face);

        let right = pixel(face.landmarks[RIGHT_EYE_CENTER].position);
        let left = pixel(face.landmarks[LEFT_EYE_CENTER].position);
        let nose = pixel(face.landmarks[NOSE_TIP].position);
        assert_eq!(*frame.get_pixel(right.x as u32, right.y as u32), EYE_MARKER);
        assert_eq!(*frame.get_pixel(left.x as u32, left.y as u32), EYE_MARKER);
        assert_eq!(*frame.get_pixel(nose.x as u32, nose.y as u32), NOSE_MARKER);
        assert!(frame.pixels().any(|p| *p == MASK_FILL));
        // Corners outside the face are untouched
        assert_eq!(*frame.get_pixel(0, 0), Rgb([5, 5, 5]));
    }

    #[test]
    fn test_default_mask_is_idempotent() {
        let face = face(FaceRegion::new(20, 30, 120, 140));
        let base = RgbImage::from_fn(200, 200, |x, y| Rgb([x as u8, y as u8, 77]));

        let mut once = base.clone();
        draw_default_mask(&mut once, &face);
        let mut again = base.clone();
        draw_default_mask(&mut again, &face);
        assert_eq!(once, again);

        let mut twice = once.clone();
        draw_default_mask(&mut twice, &face);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_collapsed_face_draws_nothing() {
        let face = face(FaceRegion::new(10, 10, 0, 0));
        let mut frame = RgbImage::new(20, 20);
        draw_default_mask(&mut frame, &face);
        assert!(frame.pixels().all(|p| p.0 == [0, 0, 0]));
    }
}
