use std::path::PathBuf;

use relief_config::ConfigError;
use relief_terrain::{BiomeLookupError, TerrainError};

use crate::platform::PlatformError;

/// Anything that aborts a `relief` command.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Terrain(#[from] TerrainError),
    #[error(transparent)]
    BiomeLookup(#[from] BiomeLookupError),
    #[error("unknown biome `{0}`")]
    UnknownBiome(String),
    #[error("failed to write {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
