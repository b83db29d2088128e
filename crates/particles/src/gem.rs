//! Multicolored gems

use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::Rng;

use crate::draw::{fill_polygon, outline_polygon};
use crate::particle::{Particle, ParticleState};
use crate::ParticleKind;

pub const GRAVITY: f32 = 0.4;
pub const DECAY: f32 = 0.010;

/// Red, green, blue, magenta, cyan, purple
pub const GEM_COLORS: [Rgb<u8>; 6] = [
    Rgb([255, 0, 0]),
    Rgb([0, 255, 0]),
    Rgb([0, 0, 255]),
    Rgb([255, 0, 255]),
    Rgb([0, 255, 255]),
    Rgb([128, 0, 255]),
];

const OUTLINE: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Debug, Clone)]
pub struct GemParticle {
    state: ParticleState,
}

impl GemParticle {
    pub fn new(position: (f32, f32), rng: &mut StdRng) -> Self {
        let velocity = (rng.gen_range(-2.5..2.5), rng.gen_range(-4.0..-1.0));
        let size = rng.gen_range(4..=6) as f32;
        let color = GEM_COLORS[rng.gen_range(0..GEM_COLORS.len())];
        Self {
            state: ParticleState::new(position, velocity, size, color),
        }
    }

    fn diamond(&self) -> [(f32, f32); 4] {
        let (x, y) = self.state.position;
        let s = self.state.size;
        [(x, y - s), (x + s, y), (x, y + s), (x - s, y)]
    }
}

impl Particle for GemParticle {
    fn kind(&self) -> ParticleKind {
        ParticleKind::Gem
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
        let diamond = self.diamond();
        fill_polygon(canvas, &diamond, self.state.color);
        outline_polygon(canvas, &diamond, OUTLINE, 1);
    }
}
