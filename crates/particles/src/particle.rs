//! Shared particle contract and kinematics

use image::{Rgb, RgbImage};

use crate::ParticleKind;

/// Life below this counts as spent; absorbs f32 drift in the decay sum
const LIFE_EPSILON: f32 = 1e-4;

/// Kinematic and visual state every variant carries
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleState {
    pub position: (f32, f32),
    pub velocity: (f32, f32),
    /// 1.0 at birth, 0.0 when spent
    pub life: f32,
    pub size: f32,
    pub color: Rgb<u8>,
}

impl ParticleState {
    pub fn new(position: (f32, f32), velocity: (f32, f32), size: f32, color: Rgb<u8>) -> Self {
        Self {
            position,
            velocity,
            life: 1.0,
            size,
            color,
        }
    }

    /// One tick: gravity, then motion, then decay
    pub fn step(&mut self, gravity: f32, decay: f32) {
        self.velocity.1 += gravity;
        self.position.0 += self.velocity.0;
        self.position.1 += self.velocity.1;
        self.life -= decay;
        if self.life < LIFE_EPSILON {
            self.life = 0.0;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// A single particle
pub trait Particle {
    fn kind(&self) -> ParticleKind;

    fn state(&self) -> &ParticleState;

    /// Advance one tick
    fn update(&mut self);

    /// Render onto `canvas`; dead particles draw nothing
    fn draw(&self, canvas: &mut RgbImage);

    fn is_alive(&self) -> bool {
        self.state().is_alive()
    }

    fn life(&self) -> f32 {
        self.state().life
    }
}

/// Ticks until a fresh particle with this decay is spent
pub fn lifetime_ticks(decay: f32) -> u32 {
    // 1/decay lands a hair above an integer for rates like 0.01
    (1.0 / decay - 1e-3).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_applies_gravity_before_motion() {
        let mut state = ParticleState::new((10.0, 10.0), (1.0, -2.0), 4.0, Rgb([0, 0, 0]));
        state.step(0.5, 0.1);
        assert_eq!(state.velocity, (1.0, -1.5));
        assert_eq!(state.position, (11.0, 8.5));
        assert!((state.life - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_life_clamps_at_zero() {
        let mut state = ParticleState::new((0.0, 0.0), (0.0, 0.0), 1.0, Rgb([0, 0, 0]));
        state.life = 0.005;
        state.step(0.0, 0.015);
        assert_eq!(state.life, 0.0);
        assert!(!state.is_alive());
        state.step(0.0, 0.015);
        assert_eq!(state.life, 0.0);
    }

    #[test]
    fn test_decay_reaches_zero_on_schedule() {
        for decay in [0.015f32, 0.012, 0.010, 0.008, 0.020] {
            let ticks = lifetime_ticks(decay);
            let mut state = ParticleState::new((0.0, 0.0), (0.0, 0.0), 1.0, Rgb([0, 0, 0]));
            for _ in 0..ticks - 1 {
                state.step(0.0, decay);
            }
            assert!(state.is_alive(), "decay {} died early", decay);
            state.step(0.0, decay);
            assert!(!state.is_alive(), "decay {} outlived {} ticks", decay, ticks);
        }
    }
}
