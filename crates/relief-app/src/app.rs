//! Turns a loaded [`Config`] into a running generator.

use std::path::Path;
use std::sync::Arc;

use relief_config::{CaveSettings, Config, TerrainConfig};
use relief_terrain::{
    BiomeRegistry, BiomeSource, CaveCarver, CaveConfig, EngineConfig, EngineHandle,
    HeightmapGenerator, NoCaves, NoiseCaveCarver, TerrainEngine,
};

use crate::error::AppError;
use crate::loader;

/// Engine parameters from the persisted terrain section.
pub fn engine_config(terrain: &TerrainConfig) -> EngineConfig {
    EngineConfig {
        scale: terrain.scale,
        base_level: terrain.base_level,
        water_level: terrain.water_level,
        forest_level: terrain.forest_level,
        snow_mountain_level: terrain.snow_mountain_level,
    }
}

/// The carver selected by the cave settings.
pub fn cave_carver(caves: &CaveSettings) -> Box<dyn CaveCarver> {
    if !caves.enabled {
        return Box::new(NoCaves);
    }
    Box::new(NoiseCaveCarver::new(CaveConfig {
        seed: caves.seed,
        threshold: caves.threshold,
        octaves: caves.octaves,
        frequency: caves.frequency,
        lacunarity: caves.lacunarity,
        persistence: caves.persistence,
        min_depth: caves.min_depth,
        max_depth: caves.max_depth,
        ocean_floor_buffer: caves.ocean_floor_buffer,
    }))
}

/// A generator with its engine slot and biome query surface.
pub struct App {
    handle: Arc<EngineHandle>,
    generator: Arc<HeightmapGenerator>,
    biomes: BiomeSource,
}

impl App {
    /// Validate `config`, load its heightmap (falling back to flat terrain),
    /// and assemble the generator.
    pub fn build(config: &Config, config_dir: &Path) -> Result<Self, AppError> {
        config.validate()?;
        let grid = loader::load_or_flat(config.heightmap_path(config_dir).as_deref());
        let engine = TerrainEngine::new(engine_config(&config.terrain), grid)?;
        let handle = Arc::new(EngineHandle::new(engine));
        let generator = Arc::new(HeightmapGenerator::new(
            Arc::clone(&handle),
            cave_carver(&config.caves),
        ));
        let biomes = BiomeSource::new(generator.clone(), Arc::new(BiomeRegistry::standard()));
        Ok(Self {
            handle,
            generator,
            biomes,
        })
    }

    pub fn engine(&self) -> Arc<TerrainEngine> {
        self.handle.snapshot()
    }

    pub fn generator(&self) -> &HeightmapGenerator {
        &self.generator
    }

    pub fn biomes(&self) -> &BiomeSource {
        &self.biomes
    }
}
