//! Face region detection
//!
//! The real face detector is an external collaborator: anything that turns a
//! frame into zero or more rectangles can implement [`FaceDetector`]. The
//! pipeline only ever keeps the largest rectangle.

use camera_capture::frame::VideoFrame;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::DetectorConfig;
use crate::landmarks::Point2;

/// Face bounding box in frame pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceRegion {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Area in pixels (zero for degenerate rectangles)
    pub fn area(&self) -> i64 {
        i64::from(self.width.max(0)) * i64::from(self.height.max(0))
    }

    /// Whether the rectangle has no area
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Rectangle center
    pub fn center(&self) -> Point2 {
        Point2::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    /// Intersection with a `width` x `height` frame, `None` when empty
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<FaceRegion> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = (i64::from(self.x) + i64::from(self.width)).min(i64::from(width)) as i32;
        let y1 = (i64::from(self.y) + i64::from(self.height)).min(i64::from(height)) as i32;
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(FaceRegion::new(x0, y0, x1 - x0, y1 - y0))
    }
}

/// Pick the rectangle with the largest area; the first one wins ties
pub fn largest_region(regions: &[FaceRegion]) -> Option<FaceRegion> {
    let mut best: Option<FaceRegion> = None;
    for region in regions {
        match best {
            Some(current) if region.area() <= current.area() => {}
            _ => best = Some(*region),
        }
    }
    best
}

/// Source of face rectangles for a frame
pub trait FaceDetector {
    /// Whether detection is enabled (e.g. the model could be loaded)
    fn is_available(&self) -> bool {
        true
    }

    /// Detect faces; no ordering is implied
    fn detect(&mut self, frame: &VideoFrame) -> Vec<FaceRegion>;
}

/// Reports one fixed fractional region of every frame
///
/// Stands in for a real detector so the pipeline can run headless.
pub struct FixedRegionDetector {
    config: DetectorConfig,
}

impl FixedRegionDetector {
    pub fn new(config: &DetectorConfig) -> Self {
        if config.enabled {
            info!(
                "Using fixed-region face detector ({:.2}, {:.2}, {:.2}x{:.2})",
                config.x_fraction, config.y_fraction, config.width_fraction, config.height_fraction
            );
        } else {
            info!("Face detection disabled");
        }
        Self {
            config: config.clone(),
        }
    }
}

impl FaceDetector for FixedRegionDetector {
    fn is_available(&self) -> bool {
        self.config.enabled
    }

    fn detect(&mut self, frame: &VideoFrame) -> Vec<FaceRegion> {
        if !self.config.enabled || frame.is_empty() {
            return Vec::new();
        }

        let width = frame.width as f32;
        let height = frame.height as f32;
        let region = FaceRegion::new(
            (width * self.config.x_fraction) as i32,
            (height * self.config.y_fraction) as i32,
            (width * self.config.width_fraction) as i32,
            (height * self.config.height_fraction) as i32,
        );
        debug!("Fixed detector region {:?}", region);

        if region.is_degenerate() {
            Vec::new()
        } else {
            vec![region]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_largest_region_selection() {
        let regions = [
            FaceRegion::new(0, 0, 10, 10),
            FaceRegion::new(5, 5, 30, 20),
            FaceRegion::new(50, 50, 20, 30),
        ];
        assert_eq!(largest_region(&regions), Some(FaceRegion::new(5, 5, 30, 20)));
        assert_eq!(largest_region(&[]), None);
    }

    #[test]
    fn test_clamp_to_frame() {
        let region = FaceRegion::new(-10, 20, 50, 100);
        assert_eq!(region.clamp_to(100, 80), Some(FaceRegion::new(0, 20, 40, 60)));
        assert_eq!(FaceRegion::new(200, 0, 10, 10).clamp_to(100, 80), None);
    }

    #[test]
    fn test_fixed_detector_uses_fractions() {
        let mut detector = FixedRegionDetector::new(&DetectorConfig::default());
        let frame = VideoFrame::filled(640, 480, [0, 0, 0]);
        let regions = detector.detect(&frame);
        assert_eq!(regions, vec![FaceRegion::new(192, 96, 256, 240)]);
    }

    #[test]
    fn test_disabled_detector_finds_nothing() {
        let config = DetectorConfig {
            enabled: false,
            ..Default::default()
        };
        let mut detector = FixedRegionDetector::new(&config);
        assert!(!detector.is_available());
        assert!(detector.detect(&VideoFrame::filled(64, 64, [0, 0, 0])).is_empty());
    }
}
