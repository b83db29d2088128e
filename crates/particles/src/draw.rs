//! Raster helpers shared by the particle variants
//!
//! Thin wrappers over `imageproc::drawing` that accept float coordinates and
//! tolerate the degenerate shapes tiny or far-away particles produce.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;

/// Segments used to approximate an ellipse
const ELLIPSE_SEGMENTS: usize = 36;

fn to_pixel(point: (f32, f32)) -> Point<i32> {
    Point::new(point.0.round() as i32, point.1.round() as i32)
}

/// Filled disc
pub fn fill_circle(canvas: &mut RgbImage, center: (f32, f32), radius: i32, color: Rgb<u8>) {
    if radius < 0 {
        return;
    }
    let center = to_pixel(center);
    draw_filled_circle_mut(canvas, (center.x, center.y), radius, color);
}

/// Filled polygon; collapsed outlines degrade to their edges
pub fn fill_polygon(canvas: &mut RgbImage, points: &[(f32, f32)], color: Rgb<u8>) {
    let mut poly: Vec<Point<i32>> = Vec::with_capacity(points.len());
    for point in points.iter().copied().map(to_pixel) {
        if poly.last() != Some(&point) {
            poly.push(point);
        }
    }
    while poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }

    if poly.len() >= 3 {
        draw_polygon_mut(canvas, &poly, color);
    } else {
        outline_polygon(canvas, points, color, 1);
    }
}

/// Closed outline of `thickness` pixels
pub fn outline_polygon(canvas: &mut RgbImage, points: &[(f32, f32)], color: Rgb<u8>, thickness: u32) {
    if points.is_empty() {
        return;
    }
    for (i, &start) in points.iter().enumerate() {
        let end = points[(i + 1) % points.len()];
        thick_line(canvas, start, end, color, thickness);
    }
}

/// Line segment of `thickness` pixels
pub fn thick_line(canvas: &mut RgbImage, start: (f32, f32), end: (f32, f32), color: Rgb<u8>, thickness: u32) {
    if thickness <= 1 {
        draw_line_segment_mut(canvas, start, end, color);
        return;
    }

    // Stamp discs along the segment
    let radius = (thickness / 2) as i32;
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        fill_circle(canvas, (start.0 + dx * t, start.1 + dy * t), radius, color);
    }
}

/// Outline of an ellipse with semi-axes `axes`, rotated clockwise by `angle` radians
pub fn ellipse_points(center: (f32, f32), axes: (f32, f32), angle: f32) -> Vec<(f32, f32)> {
    let (sin, cos) = angle.sin_cos();
    (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let t = i as f32 * std::f32::consts::TAU / ELLIPSE_SEGMENTS as f32;
            let (lx, ly) = (axes.0 * t.cos(), axes.1 * t.sin());
            (center.0 + lx * cos - ly * sin, center.1 + lx * sin + ly * cos)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    fn painted(canvas: &RgbImage) -> usize {
        canvas.pixels().filter(|p| p.0 != [0, 0, 0]).count()
    }

    #[test]
    fn test_fill_polygon_paints_interior() {
        let mut canvas = RgbImage::new(20, 20);
        fill_polygon(&mut canvas, &[(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0)], RED);
        assert_eq!(*canvas.get_pixel(10, 10), RED);
        assert_eq!(*canvas.get_pixel(1, 1), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_degenerate_polygons_do_not_panic() {
        let mut canvas = RgbImage::new(10, 10);
        fill_polygon(&mut canvas, &[], RED);
        fill_polygon(&mut canvas, &[(3.0, 3.0); 4], RED);
        fill_polygon(&mut canvas, &[(1.0, 1.0), (4.0, 4.0), (1.0, 1.0)], RED);
        assert_eq!(*canvas.get_pixel(3, 3), RED);
    }

    #[test]
    fn test_offscreen_shapes_are_clipped() {
        let mut canvas = RgbImage::new(10, 10);
        fill_circle(&mut canvas, (-50.0, 4000.0), 6, RED);
        thick_line(&mut canvas, (-100.0, -100.0), (-40.0, -20.0), RED, 3);
        fill_polygon(&mut canvas, &[(100.0, 100.0), (120.0, 100.0), (110.0, 130.0)], RED);
        assert_eq!(painted(&canvas), 0);
    }

    #[test]
    fn test_thick_line_is_wider_than_thin_line() {
        let mut thin = RgbImage::new(30, 30);
        let mut thick = RgbImage::new(30, 30);
        thick_line(&mut thin, (5.0, 15.0), (25.0, 15.0), RED, 1);
        thick_line(&mut thick, (5.0, 15.0), (25.0, 15.0), RED, 4);
        assert!(painted(&thick) > painted(&thin) * 2);
    }

    #[test]
    fn test_ellipse_rotation_swaps_axes() {
        let flat = ellipse_points((0.0, 0.0), (10.0, 2.0), 0.0);
        let upright = ellipse_points((0.0, 0.0), (10.0, 2.0), std::f32::consts::FRAC_PI_2);
        let max_x = |pts: &[(f32, f32)]| pts.iter().map(|p| p.0.abs()).fold(0.0f32, f32::max);
        let max_y = |pts: &[(f32, f32)]| pts.iter().map(|p| p.1.abs()).fold(0.0f32, f32::max);
        assert!((max_x(&flat) - 10.0).abs() < 1e-3);
        assert!((max_y(&upright) - 10.0).abs() < 1e-3);
        assert!(max_x(&upright) <= 2.0 + 1e-3);
    }
}
