//! Overlay compositing for one face

use face_mesh::DetectedFace;
use image::imageops::{self, FilterType};
use image::{RgbImage, Rgba, RgbaImage};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::blend::{blend_overlay, BlendAlpha};
use crate::default_mask::draw_default_mask;
use crate::{CompositorError, MaskOffsets, Overlay, Placement};

/// Mask placement and blending configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    /// Overlay size relative to the face box
    pub scale: f32,

    /// Vertical shift of the anchor from the eye line (face heights)
    pub eye_offset: f32,

    /// Global opacity applied to the overlay alpha channel
    pub opacity: f32,

    /// Overlay pixels with an RGB sum at or below this are not painted
    pub near_black_threshold: u32,

    /// Offset change per nudge key (face units)
    pub nudge_step: f32,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            scale: 1.4,
            eye_offset: -0.35,
            opacity: 0.7,
            near_black_threshold: 30,
            nudge_step: 0.05,
        }
    }
}

impl MaskConfig {
    pub fn validate(&self) -> Result<(), CompositorError> {
        if !(self.scale > 0.0) {
            return Err(CompositorError::Config(format!("scale must be positive, got {}", self.scale)));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(CompositorError::Config(format!(
                "opacity must be within [0, 1], got {}",
                self.opacity
            )));
        }
        if !(self.nudge_step > 0.0) {
            return Err(CompositorError::Config(format!(
                "nudge_step must be positive, got {}",
                self.nudge_step
            )));
        }
        Ok(())
    }
}

/// Draws the themed mask over detected faces
pub struct MaskCompositor {
    config: MaskConfig,
    overlay: Option<Overlay>,
}

impl MaskCompositor {
    pub fn new(config: MaskConfig, overlay: Option<Overlay>) -> Result<Self, CompositorError> {
        config.validate()?;
        Ok(Self { config, overlay })
    }

    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Placement the overlay would take for `face`
    pub fn placement(&self, face: &DetectedFace, offsets: &MaskOffsets) -> Option<Placement> {
        Placement::compute(face, offsets, &self.config)
    }

    /// Copy of `frame` with the mask applied
    pub fn composite(&self, frame: &RgbImage, face: &DetectedFace, offsets: &MaskOffsets) -> RgbImage {
        let mut out = frame.clone();
        self.composite_in_place(&mut out, face, offsets);
        out
    }

    /// Apply the mask directly onto `frame`
    pub fn composite_in_place(&self, frame: &mut RgbImage, face: &DetectedFace, offsets: &MaskOffsets) {
        let Some(overlay) = &self.overlay else {
            draw_default_mask(frame, face);
            return;
        };

        let Some(placement) = self.placement(face, offsets) else {
            debug!("Face {:?} too small for the overlay", face.region);
            return;
        };

        let prepared = self.prepare(overlay, &placement);
        let alpha = if overlay.has_alpha {
            BlendAlpha::Channel {
                opacity: self.config.opacity,
            }
        } else {
            BlendAlpha::Opaque
        };

        let written = blend_overlay(
            frame,
            &prepared,
            (placement.x, placement.y),
            alpha,
            self.config.near_black_threshold,
        );
        debug!(
            "Overlay {}x{} at ({}, {}) angle={:.2} wrote {} pixels",
            placement.width, placement.height, placement.x, placement.y, placement.angle, written
        );
    }

    /// Scale to the placement size, then rotate with the head.
    ///
    /// Positive angles turn the overlay counter-clockwise on screen.
    fn prepare(&self, overlay: &Overlay, placement: &Placement) -> RgbaImage {
        let scaled = imageops::resize(&overlay.image, placement.width, placement.height, FilterType::Triangle);
        if placement.angle == 0.0 {
            return scaled;
        }
        // rotate_about_center turns clockwise for positive theta
        rotate_about_center(
            &scaled,
            -placement.angle.to_radians() as f32,
            Interpolation::Bilinear,
            Rgba([0, 0, 0, 0]),
        )
    }
}
