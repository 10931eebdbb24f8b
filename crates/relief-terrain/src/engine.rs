//! Engine façade: an immutable snapshot of configuration plus heightmap, the
//! pluggable generator strategy a world pipeline calls, and atomic
//! publication of new snapshots.

use std::sync::{Arc, PoisonError, RwLock};

use crate::cave::CaveCarver;
use crate::chunk::{ChunkResult, synthesize_chunk};
use crate::classify::Classifier;
use crate::config::EngineConfig;
use crate::error::TerrainError;
use crate::heightmap::{HeightSampler, HeightmapGrid};
use crate::interpolate::Stencil;
use crate::region::{BiomeRegion, SurfaceGrid, sample_region, synthesize_biome_region};

/// Validated configuration bound to an optional heightmap.
///
/// Every method is a pure function of the snapshot and its arguments.
#[derive(Clone, Debug)]
pub struct TerrainEngine {
    config: EngineConfig,
    sampler: HeightSampler,
}

impl TerrainEngine {
    /// Bind `config` to `grid`.
    ///
    /// # Errors
    ///
    /// Returns the first violated [`EngineConfig`] invariant.
    pub fn new(config: EngineConfig, grid: Option<Arc<HeightmapGrid>>) -> Result<Self, TerrainError> {
        config.validate()?;
        if grid.is_none() {
            tracing::warn!(
                fallback = config.fallback_height(),
                "no heightmap loaded, generating flat terrain"
            );
        }
        let sampler = HeightSampler::new(grid, &config);
        Ok(Self { config, sampler })
    }

    /// Engine over the flat fallback height.
    pub fn flat(config: EngineConfig) -> Result<Self, TerrainError> {
        Self::new(config, None)
    }

    /// A new snapshot sharing this configuration with a different heightmap.
    pub fn with_heightmap(&self, grid: Option<Arc<HeightmapGrid>>) -> Self {
        Self {
            config: self.config,
            sampler: HeightSampler::new(grid, &self.config),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sampler(&self) -> &HeightSampler {
        &self.sampler
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(&self.config)
    }

    /// Raw normalized height at heightmap pixel `(px, pz)`.
    pub fn height_at(&self, px: i32, pz: i32) -> f32 {
        self.sampler.sample(px, pz)
    }

    /// Interpolated surface Y over a world rectangle.
    pub fn surface_region(
        &self,
        x: i32,
        z: i32,
        width: usize,
        depth: usize,
        stencil: Stencil,
    ) -> SurfaceGrid {
        sample_region(
            &self.sampler,
            &self.config,
            i64::from(x),
            i64::from(z),
            width,
            depth,
            stencil,
        )
    }

    /// Synthesize one 16×16×256 chunk, handing the volume to `carver` before
    /// it is sealed.
    pub fn synthesize_chunk(&self, chunk_x: i32, chunk_z: i32, carver: &dyn CaveCarver) -> ChunkResult {
        synthesize_chunk(&self.sampler, &self.config, carver, chunk_x, chunk_z)
    }

    /// Biome ids for a world rectangle, `z * width + x`.
    pub fn synthesize_biomes(&self, x: i32, z: i32, width: usize, depth: usize) -> BiomeRegion {
        synthesize_biome_region(&self.sampler, &self.config, x, z, width, depth)
    }
}

/// Shared slot holding the current [`TerrainEngine`] snapshot.
///
/// Readers clone out an `Arc` and keep using it for the whole call, so a
/// concurrent [`publish`](Self::publish) never splits one chunk across two
/// configurations.
#[derive(Debug)]
pub struct EngineHandle {
    current: RwLock<Arc<TerrainEngine>>,
}

impl EngineHandle {
    pub fn new(engine: TerrainEngine) -> Self {
        Self {
            current: RwLock::new(Arc::new(engine)),
        }
    }

    /// The snapshot in effect right now.
    pub fn snapshot(&self) -> Arc<TerrainEngine> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the snapshot, returning the previous one.
    pub fn publish(&self, engine: TerrainEngine) -> Arc<TerrainEngine> {
        let next = Arc::new(engine);
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        tracing::info!(
            scale = next.config().scale,
            flat = next.sampler().is_flat(),
            "published terrain engine"
        );
        std::mem::replace(&mut *slot, next)
    }
}

/// What a world pipeline needs from a terrain source.
pub trait ChunkGenerator: Send + Sync {
    /// Produce the chunk at chunk-grid `(chunk_x, chunk_z)`.
    fn generate_chunk(&self, chunk_x: i32, chunk_z: i32) -> ChunkResult;

    /// Biome ids for a block-resolution world rectangle.
    fn generate_biomes(&self, x: i32, z: i32, width: usize, depth: usize) -> BiomeRegion;
}

/// [`ChunkGenerator`] backed by a swappable engine and a cave carver.
pub struct HeightmapGenerator {
    engine: Arc<EngineHandle>,
    carver: Box<dyn CaveCarver>,
}

impl HeightmapGenerator {
    pub fn new(engine: Arc<EngineHandle>, carver: Box<dyn CaveCarver>) -> Self {
        Self { engine, carver }
    }

    pub fn engine(&self) -> &Arc<EngineHandle> {
        &self.engine
    }
}

impl ChunkGenerator for HeightmapGenerator {
    fn generate_chunk(&self, chunk_x: i32, chunk_z: i32) -> ChunkResult {
        self.engine
            .snapshot()
            .synthesize_chunk(chunk_x, chunk_z, self.carver.as_ref())
    }

    fn generate_biomes(&self, x: i32, z: i32, width: usize, depth: usize) -> BiomeRegion {
        self.engine.snapshot().synthesize_biomes(x, z, width, depth)
    }
}
