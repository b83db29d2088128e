//! Studio configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file (`studio.toml`, or the path in `STUDIO_CONFIG`), then `STUDIO_*`
//! environment variables with `__` between nested keys.

use std::path::{Path, PathBuf};

use camera_capture::SourceConfig;
use ::config::{Config, Environment, File};
use face_mesh::{DetectorConfig, FaceMeshConfig, MouthThresholds};
use mask_compositor::MaskConfig;
use particles::ParticleKind;
use serde::{Deserialize, Serialize};
use storage::StorageConfig;

use crate::StudioError;

/// Default configuration file
pub const DEFAULT_CONFIG_FILE: &str = "studio.toml";

/// Environment variable overriding the configuration file path
pub const CONFIG_PATH_ENV: &str = "STUDIO_CONFIG";

/// Studio configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Where frames come from
    pub source: SourceSettings,

    /// Theme (overlay + particles)
    pub theme: ThemeConfig,

    /// Stand-in face detector
    pub detector: DetectorConfig,

    /// Mouth open/closed heuristic
    pub mouth: MouthThresholds,

    /// Mask placement and blending
    pub mask: MaskConfig,

    /// Capture record persistence
    pub storage: StorageConfig,

    /// Directory receiving captured photos
    pub output_dir: PathBuf,

    /// How long to wait for a key after each frame (ms)
    pub key_timeout_ms: u64,

    /// Scripted key sequence; reads stdin when absent
    pub keys: Option<String>,

    /// Log level: trace, debug, info, warn or error
    pub log_level: String,

    /// Emit JSON log lines
    pub log_json: bool,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            source: SourceSettings::default(),
            theme: ThemeConfig::default(),
            detector: DetectorConfig::default(),
            mouth: MouthThresholds::default(),
            mask: MaskConfig::default(),
            storage: StorageConfig::default(),
            output_dir: PathBuf::from("captures"),
            key_timeout_ms: 1,
            keys: None,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

/// Frame source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Directory of frames played in file-name order
    pub frames_dir: PathBuf,

    /// Single image used instead of `frames_dir`
    pub still: Option<PathBuf>,

    /// Restart the directory when exhausted
    pub loop_frames: bool,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            frames_dir: PathBuf::from("frames"),
            still: None,
            loop_frames: false,
        }
    }
}

impl SourceSettings {
    pub fn to_source_config(&self) -> SourceConfig {
        match &self.still {
            Some(path) => SourceConfig::Still(path.clone()),
            None => SourceConfig::Directory {
                path: self.frames_dir.clone(),
                loop_frames: self.loop_frames,
            },
        }
    }
}

/// Theme selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Preset name (Mudkip, Meowth, Eevee, Sylveon, Pikachu) or a custom one
    pub name: String,

    /// Overlay file name; derived from the name when absent
    pub mask_file: Option<String>,

    /// Particle kind; derived from the name when absent
    pub particles: Option<ParticleKind>,

    /// Directories searched for the overlay, in order
    pub mask_dirs: Vec<PathBuf>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Mudkip".to_string(),
            mask_file: None,
            particles: None,
            mask_dirs: vec![PathBuf::from("images"), PathBuf::from(".")],
        }
    }
}

impl StudioConfig {
    /// Load from `STUDIO_CONFIG` (or `studio.toml`) and the environment
    pub fn load() -> Result<Self, StudioError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load with an explicit file path; a missing file is not an error
    pub fn load_from(path: &Path) -> Result<Self, StudioError> {
        let settings = Config::builder()
            .add_source(Config::try_from(&StudioConfig::default())?)
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("STUDIO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: StudioConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), StudioError> {
        self.face_mesh_config().validate()?;
        self.mask.validate()?;
        if self.theme.name.trim().is_empty() {
            return Err(StudioError::Invalid("theme name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Face analysis section
    pub fn face_mesh_config(&self) -> FaceMeshConfig {
        FaceMeshConfig {
            detector: self.detector.clone(),
            mouth: self.mouth.clone(),
        }
    }
}
