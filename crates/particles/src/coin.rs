//! Spinning coins

use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::Rng;

use crate::draw::{ellipse_points, fill_polygon, outline_polygon};
use crate::particle::{Particle, ParticleState};
use crate::ParticleKind;

pub const GRAVITY: f32 = 0.5;
pub const DECAY: f32 = 0.012;
/// Spin per tick (radians)
pub const SPIN: f32 = 0.2;

const GOLD: Rgb<u8> = Rgb([255, 215, 0]);
const RIM: Rgb<u8> = Rgb([255, 255, 0]);

#[derive(Debug, Clone)]
pub struct CoinParticle {
    state: ParticleState,
    rotation: f32,
}

impl CoinParticle {
    pub fn new(position: (f32, f32), rng: &mut StdRng) -> Self {
        let velocity = (rng.gen_range(-2.0..2.0), rng.gen_range(-4.0..-2.0));
        let size = rng.gen_range(6..=8) as f32;
        Self {
            state: ParticleState::new(position, velocity, size, GOLD),
            rotation: 0.0,
        }
    }

    /// Accumulated spin (radians)
    pub fn rotation(&self) -> f32 {
        self.rotation
    }
}

impl Particle for CoinParticle {
    fn kind(&self) -> ParticleKind {
        ParticleKind::Coin
    }

    fn state(&self) -> &ParticleState {
        &self.state
    }

    fn update(&mut self) {
        self.state.step(GRAVITY, DECAY);
        self.rotation += SPIN;
    }

    fn draw(&self, canvas: &mut RgbImage) {
        if !self.is_alive() {
            return;
        }
        let size = self.state.size;
        let face = ellipse_points(self.state.position, (size, size * 0.7), self.rotation);
        fill_polygon(canvas, &face, self.state.color);
        let rim = ellipse_points(self.state.position, (size * 0.6, size * 0.4), self.rotation);
        outline_polygon(canvas, &rim, RIM, 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_rotation_accumulates() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut coin = CoinParticle::new((0.0, 0.0), &mut rng);
        for _ in 0..5 {
            coin.update();
        }
        assert!((coin.rotation() - 1.0).abs() < 1e-5);
        assert!((coin.life() - (1.0 - 5.0 * DECAY)).abs() < 1e-5);
    }

    #[test]
    fn test_draw_fills_gold_face() {
        let mut rng = StdRng::seed_from_u64(2);
        let coin = CoinParticle::new((30.0, 30.0), &mut rng);
        let mut canvas = RgbImage::new(60, 60);
        coin.draw(&mut canvas);
        let size = coin.state().size as u32;
        // Outer vertex on the major axis, clear of the rim
        assert_eq!(*canvas.get_pixel(30 + size, 30), GOLD);
        assert!(canvas.pixels().any(|p| *p == RIM));
    }
}
