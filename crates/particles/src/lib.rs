//! Particle Effects
//!
//! Short-lived sprites emitted from the mouth while it is open. Five themed
//! variants share the [`Particle`] contract; the [`ParticleEngine`] owns the
//! live set, decides when to emit and prunes dead particles.

pub mod coin;
pub mod draw;
pub mod engine;
pub mod gem;
pub mod heart;
pub mod lightning;
pub mod particle;
pub mod water;

pub use engine::{ParticleEngine, ParticleFactory};
pub use particle::{Particle, ParticleState};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Particle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParticleError {
    #[error("Unknown particle kind: {0}")]
    UnknownKind(String),
}

/// Particle variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    #[default]
    Water,
    Coin,
    Gem,
    Heart,
    Lightning,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; 5] = [
        ParticleKind::Water,
        ParticleKind::Coin,
        ParticleKind::Gem,
        ParticleKind::Heart,
        ParticleKind::Lightning,
    ];

    /// Ticks between two emissions
    pub fn emission_interval(self) -> u32 {
        match self {
            ParticleKind::Lightning => 6,
            _ => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParticleKind::Water => "water",
            ParticleKind::Coin => "coin",
            ParticleKind::Gem => "gem",
            ParticleKind::Heart => "heart",
            ParticleKind::Lightning => "lightning",
        }
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticleKind {
    type Err = ParticleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        ParticleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| ParticleError::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Lightning".parse::<ParticleKind>(), Ok(ParticleKind::Lightning));
        assert_eq!(" gem ".parse::<ParticleKind>(), Ok(ParticleKind::Gem));
        assert!("smoke".parse::<ParticleKind>().is_err());
        for kind in ParticleKind::ALL {
            assert_eq!(kind.to_string().parse::<ParticleKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_emission_intervals() {
        assert_eq!(ParticleKind::Lightning.emission_interval(), 6);
        assert_eq!(ParticleKind::Water.emission_interval(), 4);
        assert_eq!(ParticleKind::Heart.emission_interval(), 4);
    }
}
