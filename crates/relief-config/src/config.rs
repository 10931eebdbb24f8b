//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "relief.ron";

/// Directory name under the OS config root.
const APP_DIR_NAME: &str = "relief";

/// The OS-specific default config directory, e.g. `~/.config/relief` on Linux.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_DIR_NAME))
}

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Heightmap mapping and level bands.
    pub terrain: TerrainConfig,
    /// Cave carving.
    pub caves: CaveSettings,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Heightmap mapping and vertical level bands.
///
/// Every level except `base_level` is an offset from `base_level`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// World blocks per heightmap pixel.
    pub scale: f32,
    /// World Y that a heightmap value of 0 maps to.
    pub base_level: i32,
    /// Sea level offset.
    pub water_level: i32,
    /// Forest hills offset.
    pub forest_level: i32,
    /// Ice mountains offset.
    pub snow_mountain_level: i32,
    /// Heightmap image. Relative paths resolve against the config directory.
    /// `None` generates flat terrain.
    pub heightmap: Option<PathBuf>,
}

/// Cave carving settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaveSettings {
    /// Carve caves into generated chunks.
    pub enabled: bool,
    /// Noise seed.
    pub seed: u64,
    /// Noise at or below this value becomes air.
    pub threshold: f64,
    pub octaves: u32,
    /// Base frequency in cycles per block.
    pub frequency: f64,
    pub lacunarity: f64,
    pub persistence: f64,
    /// Depth below the surface that is never carved.
    pub min_depth: f64,
    /// Depth at which caves have fully faded out.
    pub max_depth: f64,
    /// Solid blocks kept under flooded columns.
    pub ocean_floor_buffer: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Write a JSON log file alongside console output.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            scale: 10.0,
            base_level: 56,
            water_level: 10,
            forest_level: 18,
            snow_mountain_level: 54,
            heightmap: None,
        }
    }
}

impl Default for CaveSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            seed: 0,
            threshold: -0.45,
            octaves: 3,
            frequency: 0.045,
            lacunarity: 2.0,
            persistence: 0.5,
            min_depth: 4.0,
            max_depth: 96.0,
            ocean_floor_buffer: 6.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: cfg!(debug_assertions),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as [`CONFIG_FILE_NAME`].
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject settings the generator cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let terrain = &self.terrain;
        if !terrain.scale.is_finite() || terrain.scale <= 0.0 {
            return Err(invalid("terrain.scale", format!("{} is not a positive number", terrain.scale)));
        }
        if !(0..=255).contains(&terrain.base_level) {
            return Err(invalid(
                "terrain.base_level",
                format!("{} is outside 0..=255", terrain.base_level),
            ));
        }
        let caves = &self.caves;
        if caves.octaves == 0 {
            return Err(invalid("caves.octaves", "must be at least 1".to_string()));
        }
        if caves.min_depth > caves.max_depth {
            return Err(invalid(
                "caves.min_depth",
                format!("{} exceeds max_depth {}", caves.min_depth, caves.max_depth),
            ));
        }
        Ok(())
    }

    /// Heightmap path with relative paths resolved against `config_dir`.
    pub fn heightmap_path(&self, config_dir: &Path) -> Option<PathBuf> {
        self.terrain
            .heightmap
            .as_ref()
            .map(|path| if path.is_absolute() { path.clone() } else { config_dir.join(path) })
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidValue { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("scale: 10.0"));
        assert!(ron_str.contains("base_level: 56"));
        assert!(ron_str.contains("heightmap: None"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.terrain.heightmap = Some(PathBuf::from("maps/island.png"));
        config.caves.enabled = true;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: Config = ron::from_str("(terrain: (scale: 4.0))").unwrap();
        assert_eq!(config.terrain.scale, 4.0);
        assert_eq!(config.terrain.water_level, 10);
        assert_eq!(config.caves, CaveSettings::default());
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
        config.terrain.scale = 2.5;
        config.terrain.snow_mountain_level = 80;
        config.debug.log_level = "debug".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.terrain.forest_level = 30;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().terrain.forest_level, 30);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_scale() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.terrain.scale = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "terrain.scale", .. })
        ));
        config.terrain.scale = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_cave_depths() {
        let mut config = Config::default();
        config.caves.min_depth = 100.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "caves.min_depth", .. })
        ));
    }

    #[test]
    fn test_default_config_dir_is_app_scoped() {
        if let Some(dir) = default_config_dir() {
            assert!(dir.ends_with(APP_DIR_NAME));
        }
    }

    #[test]
    fn test_heightmap_path_resolution() {
        let dir = Path::new("/etc/relief");
        let mut config = Config::default();
        assert_eq!(config.heightmap_path(dir), None);

        config.terrain.heightmap = Some(PathBuf::from("map.png"));
        assert_eq!(config.heightmap_path(dir), Some(dir.join("map.png")));

        let absolute = std::env::temp_dir().join("map.png");
        config.terrain.heightmap = Some(absolute.clone());
        assert_eq!(config.heightmap_path(dir), Some(absolute));
    }
}
