//! Mouth open/closed detection from relative brightness
//!
//! An open mouth shows up as a dark cavity in the lower-center band of the
//! face. Brightness is judged relative to a cheek patch so the heuristic
//! tolerates global lighting changes.

use camera_capture::frame::VideoFrame;
use image::GrayImage;
use imageproc::filter::gaussian_blur_f32;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MouthThresholds;

/// Scan band, as fractions of the face crop
const BAND_TOP: f32 = 0.75;
const BAND_HEIGHT: f32 = 0.08;
const BAND_LEFT: f32 = 0.4;
const BAND_RIGHT: f32 = 0.6;

/// Cheek reference patch, as fractions of the face crop
const CHEEK_LEFT: f32 = 0.15;
const CHEEK_TOP: f32 = 0.5;
const CHEEK_WIDTH: f32 = 0.2;
const CHEEK_HEIGHT: f32 = 0.15;

/// Measurements behind one open/closed decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MouthReading {
    pub open: bool,
    /// Share of scanned pixels below the dark threshold
    pub dark_ratio: f32,
    /// Share of scanned pixels below the very-dark threshold
    pub very_dark_ratio: f32,
    /// Dark threshold derived from the cheek (gray levels)
    pub threshold: i32,
    pub scanned_pixels: usize,
}

impl MouthReading {
    /// Reading used when the geometry cannot be scanned
    pub fn closed() -> Self {
        Self::default()
    }
}

/// Classifies the mouth in a face crop as open or closed
#[derive(Debug, Clone, Default)]
pub struct MouthDetector {
    thresholds: MouthThresholds,
}

impl MouthDetector {
    pub fn new(thresholds: MouthThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &MouthThresholds {
        &self.thresholds
    }

    /// Whether the mouth in `face_crop` is open
    pub fn is_open(&self, face_crop: &VideoFrame) -> bool {
        self.measure(face_crop).open
    }

    /// Scan `face_crop` and report the ratios alongside the decision
    pub fn measure(&self, face_crop: &VideoFrame) -> MouthReading {
        if face_crop.is_empty() {
            return MouthReading::closed();
        }

        let cols = face_crop.width as i32;
        let rows = face_crop.height as i32;

        let band_y = (rows as f32 * BAND_TOP) as i32;
        let band_x_start = (cols as f32 * BAND_LEFT) as i32;
        let band_x_end = (cols as f32 * BAND_RIGHT) as i32;
        let band_height = (rows as f32 * BAND_HEIGHT) as i32;

        if band_y >= rows || band_x_start >= band_x_end || band_y + band_height >= rows {
            return MouthReading::closed();
        }

        let cheek_x = (cols as f32 * CHEEK_LEFT) as i32;
        let cheek_y = (rows as f32 * CHEEK_TOP) as i32;
        let cheek_w = (cols as f32 * CHEEK_WIDTH) as i32;
        let cheek_h = (rows as f32 * CHEEK_HEIGHT) as i32;

        if cheek_w <= 0 || cheek_h <= 0 || cheek_x + cheek_w >= cols || cheek_y + cheek_h >= rows {
            return MouthReading::closed();
        }

        let gray = self.denoise(face_crop.to_grayscale());

        let cheek_mean = mean_brightness(&gray, cheek_x as u32, cheek_y as u32, cheek_w as u32, cheek_h as u32);
        let threshold = (cheek_mean * self.thresholds.cheek_factor) as i32;
        let very_dark_threshold = threshold as f32 * self.thresholds.very_dark_factor;

        let mut total = 0usize;
        let mut dark = 0usize;
        let mut very_dark = 0usize;

        // Every other row of the band
        for y_offset in (0..band_height).step_by(2) {
            let scan_y = band_y + y_offset;
            if scan_y >= rows {
                break;
            }
            for x in band_x_start..band_x_end.min(cols) {
                let value = gray.get_pixel(x as u32, scan_y as u32)[0];
                total += 1;
                if i32::from(value) < threshold {
                    dark += 1;
                }
                if f32::from(value) < very_dark_threshold {
                    very_dark += 1;
                }
            }
        }

        let (dark_ratio, very_dark_ratio) = if total > 0 {
            (dark as f32 / total as f32, very_dark as f32 / total as f32)
        } else {
            (0.0, 0.0)
        };
        let open = self.thresholds.is_open(dark_ratio, very_dark_ratio);

        debug!(
            "Mouth scan: cheek={:.1} threshold={} dark={}/{} ({:.3}) very_dark={} ({:.3}) open={}",
            cheek_mean, threshold, dark, total, dark_ratio, very_dark, very_dark_ratio, open
        );

        MouthReading {
            open,
            dark_ratio,
            very_dark_ratio,
            threshold,
            scanned_pixels: total,
        }
    }

    fn denoise(&self, gray: GrayImage) -> GrayImage {
        if self.thresholds.blur_sigma > 0.0 {
            gaussian_blur_f32(&gray, self.thresholds.blur_sigma)
        } else {
            gray
        }
    }
}

fn mean_brightness(gray: &GrayImage, x: u32, y: u32, w: u32, h: u32) -> f32 {
    let mut sum = 0u64;
    for row in y..y + h {
        for col in x..x + w {
            sum += u64::from(gray.get_pixel(col, row)[0]);
        }
    }
    sum as f32 / (w * h) as f32
}
