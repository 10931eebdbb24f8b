//! Heightmap-driven voxel terrain: samples a grayscale elevation grid,
//! interpolates it across world space, and synthesizes block volumes and
//! biome maps from the resulting surface heights.

mod block;
mod cave;
mod chunk;
mod classify;
mod config;
mod engine;
mod error;
mod heightmap;
mod interpolate;
mod region;

pub mod biome;
pub mod debug_viz;

pub use biome::{
    BiomeDef, BiomeId, BiomeLookupError, BiomeRegistry, BiomeRegistryError, BiomeSource,
    LookupCategory,
};
pub use block::BlockType;
pub use cave::{CaveCarver, CaveConfig, NoCaves, NoiseCaveCarver};
pub use chunk::{
    CHUNK_AREA, CHUNK_HEIGHT, CHUNK_VOLUME, CHUNK_WIDTH, ChunkResult, block_index, column_index,
};
pub use classify::{Biome, Classifier};
pub use config::EngineConfig;
pub use engine::{ChunkGenerator, EngineHandle, HeightmapGenerator, TerrainEngine};
pub use error::TerrainError;
pub use heightmap::{HeightSampler, HeightmapGrid};
pub use interpolate::{LocalHeightBuffer, Stencil, cubic};
pub use region::{BiomeRegion, SurfaceGrid};
