//! Per-run mutable state carried between frames

use mask_compositor::MaskOffsets;
use particles::{ParticleEngine, ParticleKind};
use tracing::info;

use crate::input::KeyCommand;

/// State that outlives a single frame: mask nudges and live particles
pub struct Session {
    pub offsets: MaskOffsets,
    pub particles: ParticleEngine,
    nudge_step: f32,
}

impl Session {
    pub fn new(kind: ParticleKind, nudge_step: f32) -> Self {
        Self::with_engine(ParticleEngine::new(), kind, nudge_step)
    }

    /// Session with a caller-supplied engine (seeded engines in tests)
    pub fn with_engine(mut particles: ParticleEngine, kind: ParticleKind, nudge_step: f32) -> Self {
        particles.set_particle_kind(kind);
        Self {
            offsets: MaskOffsets::default(),
            particles,
            nudge_step,
        }
    }

    /// Apply an offset command; returns false for anything else
    pub fn adjust(&mut self, command: KeyCommand) -> bool {
        let step = self.nudge_step;
        match command {
            KeyCommand::NudgeUp => self.offsets.nudge_up(step),
            KeyCommand::NudgeDown => self.offsets.nudge_down(step),
            KeyCommand::NudgeLeft => self.offsets.nudge_left(step),
            KeyCommand::NudgeRight => self.offsets.nudge_right(step),
            KeyCommand::ResetOffsets => {
                self.offsets.reset();
                info!("Mask position reset");
                return true;
            }
            _ => return false,
        }
        info!(
            "Mask offset: vertical={:.2} horizontal={:.2}",
            self.offsets.vertical, self.offsets.horizontal
        );
        true
    }
}
