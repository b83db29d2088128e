//! Water droplets

use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::Rng;

use crate::draw::fill_circle;
use crate::particle::{Particle, ParticleState};
use crate::ParticleKind;

pub const GRAVITY: f32 = 0.7;
pub const DECAY: f32 = 0.015;

const HIGHLIGHT: Rgb<u8> = Rgb([200, 255, 255]);

/// Blue droplet whose green channel fades with remaining life
#[derive(Debug, Clone)]
pub struct WaterParticle {
    state: ParticleState,
}

impl WaterParticle {
    pub fn new(position: (f32, f32), rng: &mut StdRng) -> Self {
        let velocity = (rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..-1.0));
        let size = rng.gen_range(5..=8) as f32;
        let color = Rgb([0, 150 + rng.gen_range(0..50u8), 255]);
        Self {
            state: ParticleState::new(position, velocity, size, color),
        }
    }

    fn faded_color(life: f32) -> Rgb<u8> {
        Rgb([0, 150 + (life * 50.0) as u8, 255])
    }
}

impl Particle for WaterParticle {
    fn kind(&self) -> ParticleKind {
        ParticleKind::Water
    }

    fn state(&self) -> &ParticleState {
        &self.state
    }

    fn update(&mut self) {
        self.state.step(GRAVITY, DECAY);
        self.state.color = Self::faded_color(self.state.life);
    }

    fn draw(&self, canvas: &mut RgbImage) {
        if !self.is_alive() {
            return;
        }
        let (x, y) = self.state.position;
        fill_circle(canvas, (x, y), self.state.size as i32, self.state.color);
        let highlight = ((self.state.size * 0.5) as i32).max(1);
        fill_circle(canvas, (x - 1.0, y - 1.0), highlight, HIGHLIGHT);
    }
}
