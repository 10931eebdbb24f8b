//! Biome queries on behalf of a host world: resolved biome arrays, rainfall,
//! viability checks and randomized biome search.

use std::fmt;
use std::sync::Arc;

use glam::IVec2;
use rand::Rng;

use super::{BiomeDef, BiomeId, BiomeRegistry};
use crate::engine::ChunkGenerator;

/// Biome cells per coarse biome-map cell along each axis.
const COARSE_SCALE: i32 = 4;

/// Which query hit an unknown biome id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupCategory {
    /// Coarse biome arrays for generation.
    RawBiomeBlock,
    /// Block-resolution biome arrays.
    BiomeIndex,
    /// Rainfall lookups.
    DownfallBlock,
    /// Viability checks and biome search.
    Layer,
}

impl fmt::Display for LookupCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LookupCategory::RawBiomeBlock => "RawBiomeBlock",
            LookupCategory::BiomeIndex => "BiomeIndex",
            LookupCategory::DownfallBlock => "DownfallBlock",
            LookupCategory::Layer => "Layer",
        })
    }
}

/// A synthesized id has no registry entry. This points at a threshold or
/// registry misconfiguration, so the query is abandoned rather than patched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BiomeLookupError {
    #[error(
        "invalid biome id {id} at index {index} [{category}] (x={x}, z={z}, w={width}, h={height})"
    )]
    InvalidBiomeId {
        category: LookupCategory,
        id: u8,
        index: usize,
        x: i32,
        z: i32,
        width: usize,
        height: usize,
    },
}

/// Resolves generator biome ids through a [`BiomeRegistry`].
pub struct BiomeSource {
    generator: Arc<dyn ChunkGenerator>,
    registry: Arc<BiomeRegistry>,
}

impl BiomeSource {
    pub fn new(generator: Arc<dyn ChunkGenerator>, registry: Arc<BiomeRegistry>) -> Self {
        Self {
            generator,
            registry,
        }
    }

    pub fn registry(&self) -> &BiomeRegistry {
        &self.registry
    }

    /// Biomes for generation at coarse origin `(x, z)`. The origin is scaled
    /// to blocks by 4 and `width × height` adjacent block biomes are read.
    pub fn biomes_for_generation(
        &self,
        x: i32,
        z: i32,
        width: usize,
        height: usize,
    ) -> Result<Vec<&BiomeDef>, BiomeLookupError> {
        let ids = self.coarse_ids(x, z, width, height);
        self.resolve(&ids, LookupCategory::RawBiomeBlock, x, z, width, height)
    }

    /// Biomes for a rectangle at block resolution.
    pub fn biome_index(
        &self,
        x: i32,
        z: i32,
        width: usize,
        height: usize,
    ) -> Result<Vec<&BiomeDef>, BiomeLookupError> {
        let ids = self.generator.generate_biomes(x, z, width, height).into_vec();
        self.resolve(&ids, LookupCategory::BiomeIndex, x, z, width, height)
    }

    /// Rainfall per block of a rectangle, capped at 1.
    pub fn rainfall(
        &self,
        x: i32,
        z: i32,
        width: usize,
        height: usize,
    ) -> Result<Vec<f32>, BiomeLookupError> {
        let ids = self.generator.generate_biomes(x, z, width, height).into_vec();
        let defs = self.resolve(&ids, LookupCategory::DownfallBlock, x, z, width, height)?;
        Ok(defs.into_iter().map(|def| def.rainfall.min(1.0)).collect())
    }

    /// Whether every biome of the coarse query covering `radius` blocks
    /// around `(x, z)` is one of the `allowed` biomes.
    pub fn are_biomes_viable(
        &self,
        x: i32,
        z: i32,
        radius: i32,
        allowed: &[BiomeId],
    ) -> Result<bool, BiomeLookupError> {
        let area = CoarseArea::around(x, z, radius);
        let ids = self.coarse_ids(area.x, area.z, area.width, area.height);
        self.check_known(&ids, &area)?;
        Ok(ids.iter().all(|id| allowed.contains(id)))
    }

    /// Pick a uniformly random matching entry of the coarse query covering
    /// `radius` blocks around `(x, z)`, returned as the block corner of its
    /// coarse cell.
    pub fn find_biome_position(
        &self,
        x: i32,
        z: i32,
        radius: i32,
        allowed: &[BiomeId],
        rng: &mut impl Rng,
    ) -> Result<Option<IVec2>, BiomeLookupError> {
        let area = CoarseArea::around(x, z, radius);
        let ids = self.coarse_ids(area.x, area.z, area.width, area.height);
        self.check_known(&ids, &area)?;

        let mut found = None;
        let mut matches = 0u32;
        for (i, id) in ids.iter().enumerate() {
            if !allowed.contains(id) {
                continue;
            }
            // Reservoir sampling: the k-th match replaces the pick with p = 1/k.
            if found.is_none() || rng.random_range(0..=matches) == 0 {
                let cell_x = i64::from(area.x) + (i % area.width) as i64;
                let cell_z = i64::from(area.z) + (i / area.width) as i64;
                found = Some(IVec2::new(block_of(cell_x), block_of(cell_z)));
            }
            matches += 1;
        }
        Ok(found)
    }

    /// Ids for a coarse rectangle. Only the origin is scaled to block
    /// space; the `width × height` ids are read from adjacent blocks there,
    /// which is the host's coarse-map convention.
    fn coarse_ids(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<BiomeId> {
        self.generator
            .generate_biomes(
                x.saturating_mul(COARSE_SCALE),
                z.saturating_mul(COARSE_SCALE),
                width,
                height,
            )
            .into_vec()
    }

    fn check_known(&self, ids: &[BiomeId], area: &CoarseArea) -> Result<(), BiomeLookupError> {
        self.resolve(ids, LookupCategory::Layer, area.x, area.z, area.width, area.height)
            .map(drop)
    }

    fn resolve(
        &self,
        ids: &[BiomeId],
        category: LookupCategory,
        x: i32,
        z: i32,
        width: usize,
        height: usize,
    ) -> Result<Vec<&BiomeDef>, BiomeLookupError> {
        ids.iter()
            .enumerate()
            .map(|(index, &id)| {
                self.registry.get(id).ok_or_else(|| {
                    let err = BiomeLookupError::InvalidBiomeId {
                        category,
                        id: id.0,
                        index,
                        x,
                        z,
                        width,
                        height,
                    };
                    tracing::error!(%err, "biome lookup failed");
                    err
                })
            })
            .collect()
    }
}

/// Coarse-grid rectangle covering a block-space circle's bounding box.
struct CoarseArea {
    x: i32,
    z: i32,
    width: usize,
    height: usize,
}

impl CoarseArea {
    fn around(x: i32, z: i32, radius: i32) -> Self {
        let radius = i64::from(radius.max(0));
        let (x, z) = (i64::from(x), i64::from(z));
        let x0 = (x - radius) >> 2;
        let z0 = (z - radius) >> 2;
        let x1 = (x + radius) >> 2;
        let z1 = (z + radius) >> 2;
        // Quartered i64 bounds of i32 inputs fit back into i32.
        Self {
            x: x0 as i32,
            z: z0 as i32,
            width: (x1 - x0 + 1) as usize,
            height: (z1 - z0 + 1) as usize,
        }
    }
}

/// Block coordinate of a coarse cell's corner, saturated to the `i32` range.
fn block_of(cell: i64) -> i32 {
    (cell * i64::from(COARSE_SCALE)).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
