//! Full-column chunk synthesis: surface sampling, block filling, water, and
//! the delegated cave pass.

use crate::biome::BiomeId;
use crate::block::BlockType;
use crate::cave::CaveCarver;
use crate::classify::Classifier;
use crate::config::EngineConfig;
use crate::heightmap::HeightSampler;
use crate::interpolate::Stencil;
use crate::region::sample_region;

/// Chunk footprint edge length in blocks.
pub const CHUNK_WIDTH: usize = 16;

/// Vertical extent of a chunk in blocks.
pub const CHUNK_HEIGHT: usize = 256;

/// Columns per chunk (16²).
pub const CHUNK_AREA: usize = CHUNK_WIDTH * CHUNK_WIDTH;

/// Blocks per chunk (16 × 16 × 256).
pub const CHUNK_VOLUME: usize = CHUNK_AREA * CHUNK_HEIGHT;

/// Index of block `(x, y, z)` in a chunk volume. Y is innermost, so each
/// column is a contiguous run of [`CHUNK_HEIGHT`] entries.
#[inline]
pub const fn block_index(x: usize, y: usize, z: usize) -> usize {
    (x << 12) | (z << 8) | y
}

/// Index of column `(x, z)` in a chunk's biome and surface grids.
#[inline]
pub const fn column_index(x: usize, z: usize) -> usize {
    (z << 4) | x
}

/// A synthesized chunk, handed over to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkResult {
    chunk_x: i32,
    chunk_z: i32,
    blocks: Box<[BlockType]>,
    metadata: Box<[u8]>,
    biomes: [BiomeId; CHUNK_AREA],
    surface: [u8; CHUNK_AREA],
}

impl ChunkResult {
    /// Chunk-grid coordinates.
    pub fn coords(&self) -> (i32, i32) {
        (self.chunk_x, self.chunk_z)
    }

    /// Block at local `(x, y, z)`.
    pub fn block(&self, x: usize, y: usize, z: usize) -> BlockType {
        self.blocks[block_index(x, y, z)]
    }

    /// The whole block volume, indexed by [`block_index`].
    pub fn blocks(&self) -> &[BlockType] {
        &self.blocks
    }

    /// Per-block metadata, same layout as [`blocks`](Self::blocks). Always zero.
    pub fn metadata(&self) -> &[u8] {
        &self.metadata
    }

    /// Biome of column `(x, z)`.
    pub fn biome(&self, x: usize, z: usize) -> BiomeId {
        self.biomes[column_index(x, z)]
    }

    /// Biome grid, indexed by [`column_index`].
    pub fn biomes(&self) -> &[BiomeId; CHUNK_AREA] {
        &self.biomes
    }

    /// Interpolated surface Y of column `(x, z)` before cave carving.
    pub fn surface_y(&self, x: usize, z: usize) -> u8 {
        self.surface[column_index(x, z)]
    }

    /// Surface grid, indexed by [`column_index`].
    pub fn surface(&self) -> &[u8; CHUNK_AREA] {
        &self.surface
    }
}

/// Synthesize the chunk at chunk-grid `(chunk_x, chunk_z)`.
pub(crate) fn synthesize_chunk(
    sampler: &HeightSampler,
    config: &EngineConfig,
    carver: &dyn CaveCarver,
    chunk_x: i32,
    chunk_z: i32,
) -> ChunkResult {
    let world_x = i64::from(chunk_x) * CHUNK_WIDTH as i64;
    let world_z = i64::from(chunk_z) * CHUNK_WIDTH as i64;
    let heights = sample_region(
        sampler,
        config,
        world_x,
        world_z,
        CHUNK_WIDTH,
        CHUNK_WIDTH,
        Stencil::Bicubic,
    );

    let classifier = Classifier::new(config);
    let water_top = config.sea_level().clamp(0, CHUNK_HEIGHT as i32) as usize;

    let mut blocks = vec![BlockType::Air; CHUNK_VOLUME].into_boxed_slice();
    let mut biomes = [BiomeId(0); CHUNK_AREA];
    let mut surface = [0u8; CHUNK_AREA];

    for z in 0..CHUNK_WIDTH {
        for x in 0..CHUNK_WIDTH {
            let y = heights.get(x, z);
            surface[column_index(x, z)] = y;
            biomes[column_index(x, z)] = classifier.biome_at(i32::from(y)).id();

            let top = usize::from(y);
            let column = &mut blocks[block_index(x, 0, z)..block_index(x, 0, z) + CHUNK_HEIGHT];
            for (iy, block) in column.iter_mut().enumerate().take(top) {
                *block = classifier.block_at(iy as i32);
            }
            if top < water_top {
                column[top..water_top].fill(BlockType::Water);
            }
        }
    }

    carver.carve(chunk_x, chunk_z, &mut blocks);

    tracing::debug!(chunk_x, chunk_z, "synthesized chunk");

    ChunkResult {
        chunk_x,
        chunk_z,
        blocks,
        metadata: vec![0; CHUNK_VOLUME].into_boxed_slice(),
        biomes,
        surface,
    }
}
