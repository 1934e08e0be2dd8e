//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

const APP_DIR: &str = "terra";

/// `<os config dir>/terra`, or `None` when the OS exposes no config dir.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub planet: PlanetConfig,
    pub sculpt: SculptConfig,
    pub persistence: PersistenceConfig,
    pub debug: DebugConfig,
}

/// Planet shape and height limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Base sphere radius in world units.
    pub radius: f64,
    /// Quads along each edge of a cube face.
    pub segments: u32,
    pub min_height: f32,
    pub max_height: f32,
    /// Sea surface height relative to the base radius.
    pub water_level: f32,
}

/// Brush settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SculptConfig {
    pub radius: f64,
    pub strength: f64,
    /// Strokes per second while a gesture is held.
    pub rate_hz: f64,
}

/// Save-slot settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PersistenceConfig {
    pub enabled: bool,
    /// Where saves are written; the platform data dir when unset.
    pub save_dir: Option<PathBuf>,
    pub heights_debounce_ms: u64,
    pub camera_debounce_ms: u64,
}

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Write the JSON log file even in release builds.
    pub file_logging: bool,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: 60.0,
            segments: 64,
            min_height: -3.75,
            max_height: 3.0,
            water_level: -3.0,
        }
    }
}

impl Default for SculptConfig {
    fn default() -> Self {
        Self {
            radius: 3.0,
            strength: 0.25,
            rate_hz: 30.0,
        }
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            save_dir: None,
            heights_debounce_ms: 250,
            camera_debounce_ms: 200,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            file_logging: false,
        }
    }
}

impl Config {
    /// Read `config.ron` from `config_dir`, writing the defaults there first
    /// when the file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("wrote default sandbox config to {}", path.display());
            return Ok(config);
        }
        let config = Self::read_file(&path)?;
        log::info!("sandbox config loaded from {}", path.display());
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&text).map_err(ConfigError::ParseError)
    }

    /// Write `self` as pretty RON to `config_dir/config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Re-read `config.ron`; `Some` only when the file no longer matches `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = Self::read_file(&config_dir.join(CONFIG_FILE))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("sandbox config changed on disk");
        Ok(Some(fresh))
    }

    /// Reject settings the planet cannot be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let planet = &self.planet;
        if !(planet.radius.is_finite() && planet.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "planet radius must be positive, got {}",
                planet.radius
            )));
        }
        if planet.segments == 0 {
            return Err(ConfigError::Invalid("planet segments must be at least 1".into()));
        }
        if !(planet.min_height.is_finite()
            && planet.max_height.is_finite()
            && planet.min_height <= planet.max_height)
        {
            return Err(ConfigError::Invalid(format!(
                "height range [{}, {}] is empty",
                planet.min_height, planet.max_height
            )));
        }
        let sculpt = &self.sculpt;
        if !(sculpt.radius.is_finite() && sculpt.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "sculpt radius must be positive, got {}",
                sculpt.radius
            )));
        }
        if !sculpt.strength.is_finite() {
            return Err(ConfigError::Invalid("sculpt strength must be finite".into()));
        }
        if !(sculpt.rate_hz.is_finite() && sculpt.rate_hz > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "sculpt rate must be positive, got {}",
                sculpt.rate_hz
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(2))
                .unwrap();
        assert!(ron_str.contains("segments: 64"));
        assert!(ron_str.contains("heights_debounce_ms: 250"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.persistence.save_dir = Some(PathBuf::from("/tmp/terra-saves"));
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(planet: (radius: 80.0))").unwrap();
        assert_eq!(config.planet.radius, 80.0);
        assert_eq!(config.planet.segments, 64);
        assert_eq!(config.sculpt, SculptConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.planet.segments = 32;
        config.sculpt.strength = 0.5;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());

        let mut modified = config.clone();
        modified.sculpt.rate_hz = 60.0;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap().unwrap();
        assert_eq!(reloaded.sculpt.rate_hz, 60.0);
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.planet.segments = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.planet.min_height = 5.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.sculpt.rate_hz = 0.0;
        assert!(config.validate().is_err());
    }
}
