//! Mask themes

use std::fmt;

use particles::ParticleKind;

use crate::config::ThemeConfig;

/// Built-in presets: (name, particle kind)
const PRESETS: [(&str, ParticleKind); 5] = [
    ("Mudkip", ParticleKind::Water),
    ("Meowth", ParticleKind::Coin),
    ("Eevee", ParticleKind::Gem),
    ("Sylveon", ParticleKind::Heart),
    ("Pikachu", ParticleKind::Lightning),
];

/// Resolved theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    /// Overlay file name (searched for in the mask directories)
    pub mask_file: String,
    pub particle_kind: ParticleKind,
}

impl Theme {
    /// Theme for `name`; unknown names get water particles
    pub fn named(name: &str) -> Self {
        let name = name.trim();
        let preset = PRESETS.iter().find(|(preset, _)| preset.eq_ignore_ascii_case(name));
        let (name, particle_kind) = match preset {
            Some((preset, kind)) => (preset.to_string(), *kind),
            None => (name.to_string(), ParticleKind::Water),
        };
        Self {
            mask_file: format!("{}_mask.png", name.to_lowercase()),
            name,
            particle_kind,
        }
    }

    /// Apply explicit overrides from configuration
    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut theme = Self::named(&config.name);
        if let Some(mask_file) = &config.mask_file {
            theme.mask_file = mask_file.clone();
        }
        if let Some(kind) = config.particles {
            theme.particle_kind = kind;
        }
        theme
    }

    /// Names of the built-in presets
    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|(name, _)| *name)
    }

    /// Lower-case slug used in file names
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {} particles)", self.name, self.mask_file, self.particle_kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let expected = [
            ("Mudkip", "mudkip_mask.png", ParticleKind::Water),
            ("Meowth", "meowth_mask.png", ParticleKind::Coin),
            ("Eevee", "eevee_mask.png", ParticleKind::Gem),
            ("Sylveon", "sylveon_mask.png", ParticleKind::Heart),
            ("Pikachu", "pikachu_mask.png", ParticleKind::Lightning),
        ];
        for (name, mask, kind) in expected {
            let theme = Theme::named(name);
            assert_eq!(theme.mask_file, mask);
            assert_eq!(theme.particle_kind, kind);
        }
        assert_eq!(Theme::preset_names().count(), 5);
    }

    #[test]
    fn test_lookup_ignores_case() {
        let theme = Theme::named("pikachu");
        assert_eq!(theme.name, "Pikachu");
        assert_eq!(theme.particle_kind, ParticleKind::Lightning);
    }

    #[test]
    fn test_unknown_theme_defaults_to_water() {
        let theme = Theme::named("Snorlax");
        assert_eq!(theme.mask_file, "snorlax_mask.png");
        assert_eq!(theme.particle_kind, ParticleKind::Water);
    }

    #[test]
    fn test_config_overrides() {
        let config = ThemeConfig {
            name: "Eevee".to_string(),
            mask_file: Some("custom.png".to_string()),
            particles: Some(ParticleKind::Heart),
            ..Default::default()
        };
        let theme = Theme::from_config(&config);
        assert_eq!(theme.name, "Eevee");
        assert_eq!(theme.mask_file, "custom.png");
        assert_eq!(theme.particle_kind, ParticleKind::Heart);
    }

    #[test]
    fn test_slug() {
        assert_eq!(Theme::named("Mr. Mime").slug(), "mr__mime");
        assert_eq!(Theme::named("Eevee").slug(), "eevee");
    }
}
