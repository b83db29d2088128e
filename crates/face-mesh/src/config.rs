//! Face analysis configuration

use serde::{Deserialize, Serialize};

use crate::FaceMeshError;

/// Face analysis configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceMeshConfig {
    /// Stand-in detector region
    pub detector: DetectorConfig,

    /// Mouth open/closed heuristic
    pub mouth: MouthThresholds,
}

impl FaceMeshConfig {
    /// Check every section
    pub fn validate(&self) -> Result<(), FaceMeshError> {
        self.detector.validate()?;
        self.mouth.validate()
    }
}

/// Fixed-region detector configuration (fractions of the frame)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Enable face detection
    pub enabled: bool,
    pub x_fraction: f32,
    pub y_fraction: f32,
    pub width_fraction: f32,
    pub height_fraction: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            x_fraction: 0.3,
            y_fraction: 0.2,
            width_fraction: 0.4,
            height_fraction: 0.5,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<(), FaceMeshError> {
        let fractions = [
            ("x_fraction", self.x_fraction),
            ("y_fraction", self.y_fraction),
            ("width_fraction", self.width_fraction),
            ("height_fraction", self.height_fraction),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(FaceMeshError::Config(format!(
                    "detector.{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Mouth open/closed thresholds
///
/// Empirical constants; kept configurable rather than derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MouthThresholds {
    /// Open when the very-dark ratio exceeds this on its own
    pub very_dark_ratio: f32,

    /// Open when the dark ratio exceeds this...
    pub dark_ratio: f32,

    /// ...and the very-dark ratio exceeds this
    pub very_dark_support_ratio: f32,

    /// Dark threshold as a fraction of mean cheek brightness
    pub cheek_factor: f32,

    /// Very-dark threshold as a fraction of the dark threshold
    pub very_dark_factor: f32,

    /// Gaussian blur sigma applied before scanning (0 disables)
    pub blur_sigma: f32,
}

impl Default for MouthThresholds {
    fn default() -> Self {
        Self {
            very_dark_ratio: 0.12,
            dark_ratio: 0.35,
            very_dark_support_ratio: 0.05,
            cheek_factor: 0.6,
            very_dark_factor: 0.7,
            blur_sigma: 0.8,
        }
    }
}

impl MouthThresholds {
    /// Classification rule on the scanned ratios
    pub fn is_open(&self, dark_ratio: f32, very_dark_ratio: f32) -> bool {
        very_dark_ratio > self.very_dark_ratio
            || (dark_ratio > self.dark_ratio && very_dark_ratio > self.very_dark_support_ratio)
    }

    pub fn validate(&self) -> Result<(), FaceMeshError> {
        if self.blur_sigma < 0.0 {
            return Err(FaceMeshError::Config(format!(
                "mouth.blur_sigma must not be negative, got {}",
                self.blur_sigma
            )));
        }
        if self.cheek_factor <= 0.0 || self.very_dark_factor <= 0.0 {
            return Err(FaceMeshError::Config(
                "mouth brightness factors must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
