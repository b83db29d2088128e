//! Floating hearts

use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::Rng;

use crate::draw::{fill_circle, fill_polygon};
use crate::particle::{Particle, ParticleState};
use crate::ParticleKind;

pub const GRAVITY: f32 = 0.3;
pub const DECAY: f32 = 0.008;

const PINK: Rgb<u8> = Rgb([255, 20, 180]);

#[derive(Debug, Clone)]
pub struct HeartParticle {
    state: ParticleState,
}

impl HeartParticle {
    pub fn new(position: (f32, f32), rng: &mut StdRng) -> Self {
        let velocity = (rng.gen_range(-1.5..1.5), rng.gen_range(-3.5..-1.5));
        let size = rng.gen_range(5..=7) as f32;
        Self {
            state: ParticleState::new(position, velocity, size, PINK),
        }
    }
}

impl Particle for HeartParticle {
    fn kind(&self) -> ParticleKind {
        ParticleKind::Heart
    }

    fn state(&self) -> &ParticleState {
        &self.state
    }

    fn update(&mut self) {
        self.state.step(GRAVITY, DECAY);
    }

    fn draw(&self, canvas: &mut RgbImage) {
        if !self.is_alive() {
            return;
        }
        let (x, y) = self.state.position;
        let size = self.state.size as i32;
        let lobe = (size / 2) as f32;
        let lift = (size / 3) as f32;

        fill_circle(canvas, (x - lobe, y - lift), size / 2, self.state.color);
        fill_circle(canvas, (x + lobe, y - lift), size / 2, self.state.color);

        let s = size as f32;
        fill_polygon(canvas, &[(x - s, y), (x + s, y), (x, y + s)], self.state.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_slow_fall_and_decay() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut heart = HeartParticle::new((0.0, 0.0), &mut rng);
        let vy = heart.state().velocity.1;
        heart.update();
        assert!((heart.state().velocity.1 - (vy + GRAVITY)).abs() < 1e-6);
        assert!((heart.life() - (1.0 - DECAY)).abs() < 1e-6);
    }

    #[test]
    fn test_draw_silhouette() {
        let mut rng = StdRng::seed_from_u64(4);
        let heart = HeartParticle::new((20.0, 20.0), &mut rng);
        let mut canvas = RgbImage::new(40, 40);
        heart.draw(&mut canvas);
        let size = heart.state().size as u32;
        // Triangle tip and both lobes
        assert_eq!(*canvas.get_pixel(20, 20 + size - 1), PINK);
        assert_eq!(*canvas.get_pixel(20 - size / 2, 20 - size / 3), PINK);
        assert_eq!(*canvas.get_pixel(20 + size / 2, 20 - size / 3), PINK);
        // Notch above the centre between the lobes
        assert_eq!(*canvas.get_pixel(20, 20 - size), Rgb([0, 0, 0]));
    }
}
