//! User-adjustable mask offsets

use serde::{Deserialize, Serialize};

/// Mask nudges in face-size units (1.0 = one face height / width)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MaskOffsets {
    /// Positive moves the mask down
    pub vertical: f32,
    /// Positive moves the mask right
    pub horizontal: f32,
}

impl MaskOffsets {
    pub fn new(vertical: f32, horizontal: f32) -> Self {
        Self { vertical, horizontal }
    }

    pub fn nudge_up(&mut self, step: f32) {
        self.vertical -= step;
    }

    pub fn nudge_down(&mut self, step: f32) {
        self.vertical += step;
    }

    pub fn nudge_left(&mut self, step: f32) {
        self.horizontal -= step;
    }

    pub fn nudge_right(&mut self, step: f32) {
        self.horizontal += step;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_zero(&self) -> bool {
        self.vertical == 0.0 && self.horizontal == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nudges_and_reset() {
        let mut offsets = MaskOffsets::default();
        offsets.nudge_up(0.05);
        offsets.nudge_up(0.05);
        offsets.nudge_right(0.05);
        assert!((offsets.vertical + 0.1).abs() < 1e-6);
        assert!((offsets.horizontal - 0.05).abs() < 1e-6);

        offsets.nudge_down(0.1);
        offsets.nudge_left(0.05);
        assert!(offsets.vertical.abs() < 1e-6);
        assert!(offsets.horizontal.abs() < 1e-6);

        offsets.nudge_down(0.3);
        offsets.reset();
        assert!(offsets.is_zero());
    }
}
