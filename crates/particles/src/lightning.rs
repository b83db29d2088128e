//! Lightning bolts

use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::Rng;

use crate::draw::thick_line;
use crate::particle::{Particle, ParticleState};
use crate::ParticleKind;

pub const GRAVITY: f32 = 0.6;
pub const DECAY: f32 = 0.020;

/// Vertices in the zigzag
pub const PATH_POINTS: usize = 5;
const PATH_SPACING: f32 = 8.0;
const PATH_SWAY: f32 = 10.0;

const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
const GLOW: Rgb<u8> = Rgb([255, 255, 150]);

/// Zigzag bolt that moves rigidly with the particle
#[derive(Debug, Clone)]
pub struct LightningParticle {
    state: ParticleState,
    path: Vec<(f32, f32)>,
}

impl LightningParticle {
    pub fn new(position: (f32, f32), rng: &mut StdRng) -> Self {
        let velocity = (rng.gen_range(-2.0..2.0), rng.gen_range(-3.0..-2.0));
        let size = rng.gen_range(3..=4) as f32;
        let path = (0..PATH_POINTS)
            .map(|i| {
                (
                    position.0 + rng.gen_range(-PATH_SWAY..PATH_SWAY),
                    position.1 + i as f32 * PATH_SPACING,
                )
            })
            .collect();
        Self {
            state: ParticleState::new(position, velocity, size, YELLOW),
            path,
        }
    }

    pub fn path(&self) -> &[(f32, f32)] {
        &self.path
    }
}

impl Particle for LightningParticle {
    fn kind(&self) -> ParticleKind {
        ParticleKind::Lightning
    }

    fn state(&self) -> &ParticleState {
        &self.state
    }

    fn update(&mut self) {
        self.state.step(GRAVITY, DECAY);
        let (dx, dy) = self.state.velocity;
        for point in &mut self.path {
            point.0 += dx;
            point.1 += dy;
        }
    }

    fn draw(&self, canvas: &mut RgbImage) {
        if !self.is_alive() {
            return;
        }
        let thickness = self.state.size as u32;
        for pair in self.path.windows(2) {
            thick_line(canvas, pair[0], pair[1], self.state.color, thickness);
        }
        for pair in self.path.windows(2) {
            thick_line(canvas, pair[0], pair[1], GLOW, 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_path_shape() {
        let mut rng = StdRng::seed_from_u64(9);
        let bolt = LightningParticle::new((50.0, 50.0), &mut rng);
        assert_eq!(bolt.path().len(), PATH_POINTS);
        for (i, point) in bolt.path().iter().enumerate() {
            assert!((point.0 - 50.0).abs() <= PATH_SWAY);
            assert_eq!(point.1, 50.0 + i as f32 * PATH_SPACING);
        }
    }

    #[test]
    fn test_path_moves_rigidly() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut bolt = LightningParticle::new((50.0, 50.0), &mut rng);
        let before: Vec<_> = bolt.path().to_vec();
        let start = bolt.state().position;
        for _ in 0..3 {
            bolt.update();
        }
        let end = bolt.state().position;
        let shift = (end.0 - start.0, end.1 - start.1);
        for (old, new) in before.iter().zip(bolt.path()) {
            assert!((new.0 - old.0 - shift.0).abs() < 1e-4);
            assert!((new.1 - old.1 - shift.1).abs() < 1e-4);
        }
    }

    #[test]
    fn test_draw_core_and_glow() {
        let mut rng = StdRng::seed_from_u64(10);
        let bolt = LightningParticle::new((30.0, 20.0), &mut rng);
        let mut canvas = RgbImage::new(60, 80);
        bolt.draw(&mut canvas);
        assert!(canvas.pixels().any(|p| *p == YELLOW));
        assert!(canvas.pixels().any(|p| *p == GLOW));
    }

    #[test]
    fn test_dies_after_fifty_ticks() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut bolt = LightningParticle::new((30.0, 20.0), &mut rng);
        for _ in 0..49 {
            bolt.update();
        }
        assert!(bolt.is_alive());
        bolt.update();
        assert!(!bolt.is_alive());
    }
}
