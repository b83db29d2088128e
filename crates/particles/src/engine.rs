//! Particle engine: emission, update, pruning and drawing

use std::collections::HashMap;

use image::RgbImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::coin::CoinParticle;
use crate::gem::GemParticle;
use crate::heart::HeartParticle;
use crate::lightning::LightningParticle;
use crate::particle::Particle;
use crate::water::WaterParticle;
use crate::ParticleKind;

/// Maximum emission jitter on each axis (pixels)
pub const EMIT_JITTER: i32 = 2;

/// Builds one particle at a position
pub type ParticleFactory = fn((f32, f32), &mut StdRng) -> Box<dyn Particle>;

fn spawn_water(pos: (f32, f32), rng: &mut StdRng) -> Box<dyn Particle> {
    Box::new(WaterParticle::new(pos, rng))
}

fn spawn_coin(pos: (f32, f32), rng: &mut StdRng) -> Box<dyn Particle> {
    Box::new(CoinParticle::new(pos, rng))
}

fn spawn_gem(pos: (f32, f32), rng: &mut StdRng) -> Box<dyn Particle> {
    Box::new(GemParticle::new(pos, rng))
}

fn spawn_heart(pos: (f32, f32), rng: &mut StdRng) -> Box<dyn Particle> {
    Box::new(HeartParticle::new(pos, rng))
}

fn spawn_lightning(pos: (f32, f32), rng: &mut StdRng) -> Box<dyn Particle> {
    Box::new(LightningParticle::new(pos, rng))
}

/// Owns the live particle set
pub struct ParticleEngine {
    particles: Vec<Box<dyn Particle>>,
    emit_position: (f32, f32),
    emitting: bool,
    emission_counter: u32,
    kind: ParticleKind,
    factories: HashMap<ParticleKind, ParticleFactory>,
    rng: StdRng,
}

impl Default for ParticleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleEngine {
    /// Engine seeded from the OS
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Engine with reproducible emission
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut factories: HashMap<ParticleKind, ParticleFactory> = HashMap::new();
        factories.insert(ParticleKind::Water, spawn_water);
        factories.insert(ParticleKind::Coin, spawn_coin);
        factories.insert(ParticleKind::Gem, spawn_gem);
        factories.insert(ParticleKind::Heart, spawn_heart);
        factories.insert(ParticleKind::Lightning, spawn_lightning);

        Self {
            particles: Vec::new(),
            emit_position: (0.0, 0.0),
            emitting: false,
            emission_counter: 0,
            kind: ParticleKind::default(),
            factories,
            rng,
        }
    }

    /// Kind used for future emissions; live particles keep theirs
    pub fn set_particle_kind(&mut self, kind: ParticleKind) {
        if kind != self.kind {
            debug!("Particle kind {} -> {}", self.kind, kind);
        }
        self.kind = kind;
    }

    pub fn particle_kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn set_emit_position(&mut self, position: (f32, f32)) {
        self.emit_position = position;
    }

    pub fn emit_position(&self) -> (f32, f32) {
        self.emit_position
    }

    pub fn start_emission(&mut self) {
        self.emitting = true;
    }

    pub fn stop_emission(&mut self) {
        self.emitting = false;
    }

    /// Follow the mouth state
    pub fn set_emitting(&mut self, emitting: bool) {
        self.emitting = emitting;
    }

    pub fn is_emitting(&self) -> bool {
        self.emitting
    }

    /// One tick: maybe emit, update everything, drop the dead
    pub fn update(&mut self) {
        if self.emitting {
            self.emission_counter = self.emission_counter.wrapping_add(1);
            if self.emission_counter % self.kind.emission_interval() == 0 {
                self.emit();
            }
        }

        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(|p| p.is_alive());
    }

    fn emit(&mut self) {
        let Some(factory) = self.factories.get(&self.kind).copied() else {
            return;
        };
        let position = self.jittered(self.emit_position);
        self.particles.push(factory(position, &mut self.rng));
    }

    fn jittered(&mut self, (x, y): (f32, f32)) -> (f32, f32) {
        let dx = self.rng.gen_range(-EMIT_JITTER..=EMIT_JITTER) as f32;
        let dy = self.rng.gen_range(-EMIT_JITTER..=EMIT_JITTER) as f32;
        (x + dx, y + dy)
    }

    /// Draw live particles in creation order
    pub fn draw(&self, canvas: &mut RgbImage) {
        for particle in self.particles.iter().filter(|p| p.is_alive()) {
            particle.draw(canvas);
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> impl Iterator<Item = &dyn Particle> {
        self.particles.iter().map(|p| p.as_ref())
    }
}
