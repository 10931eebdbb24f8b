//! Cave carving: the post-processing step applied to a freshly filled chunk
//! volume, plus a 3D noise carver using the Swiss cheese model.

use glam::DVec3;
use noise::{NoiseFn, Simplex};

use crate::block::BlockType;
use crate::chunk::{CHUNK_HEIGHT, CHUNK_VOLUME, CHUNK_WIDTH, block_index};

/// Mutates a chunk's block volume in place after terrain filling.
///
/// `blocks` is indexed by [`block_index`](crate::block_index) and always
/// holds [`CHUNK_VOLUME`](crate::CHUNK_VOLUME) entries.
pub trait CaveCarver: Send + Sync {
    fn carve(&self, chunk_x: i32, chunk_z: i32, blocks: &mut [BlockType]);
}

/// Leaves the volume untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCaves;

impl CaveCarver for NoCaves {
    fn carve(&self, _chunk_x: i32, _chunk_z: i32, _blocks: &mut [BlockType]) {}
}

/// Configuration for 3D noise-based cave generation.
#[derive(Clone, Debug, PartialEq)]
pub struct CaveConfig {
    /// Seed for the cave noise field.
    pub seed: u64,
    /// Normalized noise at or below this value becomes air. Typical range:
    /// -0.6 to -0.2. Default: -0.45.
    pub threshold: f64,
    /// Number of noise octaves. Default: 3.
    pub octaves: u32,
    /// Base frequency in cycles per block. Default: 0.045.
    pub frequency: f64,
    /// Frequency multiplier per octave. Default: 2.0.
    pub lacunarity: f64,
    /// Amplitude multiplier per octave. Default: 0.5.
    pub persistence: f64,
    /// Blocks below the column surface that are never carved. Default: 4.
    pub min_depth: f64,
    /// Depth below the surface at which caves have fully faded out. Default: 96.
    pub max_depth: f64,
    /// Blocks under a flooded column's floor that stay solid so water does
    /// not drain into caves. Default: 6.
    pub ocean_floor_buffer: f64,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
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

/// Carves tunnels where multi-octave simplex noise dips below a
/// depth-faded threshold.
pub struct NoiseCaveCarver {
    noise: Simplex,
    config: CaveConfig,
}

impl NoiseCaveCarver {
    pub fn new(config: CaveConfig) -> Self {
        let noise = Simplex::new(config.seed.wrapping_add(0xCAFE_BABE) as u32);
        Self { noise, config }
    }

    pub fn config(&self) -> &CaveConfig {
        &self.config
    }

    /// Whether the block at world `pos`, `depth` blocks under its column
    /// surface, should be hollowed out.
    pub fn is_cave(&self, pos: DVec3, depth: f64, flooded: bool) -> bool {
        let config = &self.config;
        if pos.y < 1.0 || depth < config.min_depth || depth > config.max_depth {
            return false;
        }
        if flooded && depth < config.ocean_floor_buffer {
            return false;
        }

        // Fade towards -1 so nothing is carved at max_depth.
        let span = (config.max_depth - config.min_depth).max(f64::EPSILON);
        let fade = ((depth - config.min_depth) / span).powi(2);
        let threshold = config.threshold - (1.0 + config.threshold) * fade;

        self.sample_noise(pos) <= threshold
    }

    /// Multi-octave 3D noise normalized to `[-1, 1]`.
    fn sample_noise(&self, pos: DVec3) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.config.frequency;
        let mut amplitude = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..self.config.octaves {
            let p = pos * frequency;
            total += self.noise.get([p.x, p.y, p.z]) * amplitude;
            max_amplitude += amplitude;

            frequency *= self.config.lacunarity;
            amplitude *= self.config.persistence;
        }

        if max_amplitude > 0.0 {
            total / max_amplitude
        } else {
            0.0
        }
    }
}

impl CaveCarver for NoiseCaveCarver {
    fn carve(&self, chunk_x: i32, chunk_z: i32, blocks: &mut [BlockType]) {
        debug_assert_eq!(blocks.len(), CHUNK_VOLUME);
        let origin_x = f64::from(chunk_x) * CHUNK_WIDTH as f64;
        let origin_z = f64::from(chunk_z) * CHUNK_WIDTH as f64;
        let mut carved = 0usize;

        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                let start = block_index(x, 0, z);
                let column = &mut blocks[start..start + CHUNK_HEIGHT];

                let Some(top) = column.iter().rposition(|b| b.is_solid()) else {
                    continue;
                };
                let surface = top + 1;
                let flooded = column[surface..].contains(&BlockType::Water);

                for y in 1..surface {
                    if !column[y].is_solid() {
                        continue;
                    }
                    let pos = DVec3::new(origin_x + x as f64, y as f64, origin_z + z as f64);
                    if self.is_cave(pos, (surface - y) as f64, flooded) {
                        column[y] = BlockType::Air;
                        carved += 1;
                    }
                }
            }
        }

        tracing::trace!(chunk_x, chunk_z, carved, "carved caves");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Solid columns up to `surface`, water above when `flooded`.
    fn filled_volume(surface: usize, water_top: usize) -> Vec<BlockType> {
        let mut blocks = vec![BlockType::Air; CHUNK_VOLUME];
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                blocks[block_index(x, 0, z)] = BlockType::Bedrock;
                for y in 1..surface {
                    blocks[block_index(x, y, z)] = BlockType::Grass;
                }
                for y in surface..water_top {
                    blocks[block_index(x, y, z)] = BlockType::Water;
                }
            }
        }
        blocks
    }

    fn air_count(blocks: &[BlockType]) -> usize {
        blocks.iter().filter(|&&b| b == BlockType::Air).count()
    }

    #[test]
    fn test_no_caves_is_identity() {
        let mut blocks = filled_volume(100, 0);
        let before = blocks.clone();
        NoCaves.carve(0, 0, &mut blocks);
        assert_eq!(blocks, before);
    }

    #[test]
    fn test_carver_opens_some_caves() {
        let carver = NoiseCaveCarver::new(CaveConfig {
            seed: 42,
            ..Default::default()
        });
        let mut found = false;
        for chunk_x in 0..4 {
            let mut blocks = filled_volume(120, 0);
            let before = air_count(&blocks);
            carver.carve(chunk_x, 0, &mut blocks);
            if air_count(&blocks) > before {
                found = true;
                break;
            }
        }
        assert!(found, "expected at least one carved block across four chunks");
    }

    #[test]
    fn test_bedrock_and_shell_are_never_carved() {
        let carver = NoiseCaveCarver::new(CaveConfig {
            seed: 7,
            threshold: 0.9,
            ..Default::default()
        });
        let mut blocks = filled_volume(120, 0);
        carver.carve(3, -1, &mut blocks);
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                assert_eq!(blocks[block_index(x, 0, z)], BlockType::Bedrock);
                // depth < min_depth (4) for y in 117..120
                for y in 117..120 {
                    assert_eq!(blocks[block_index(x, y, z)], BlockType::Grass);
                }
            }
        }
    }

    #[test]
    fn test_flooded_columns_keep_floor_buffer() {
        let carver = NoiseCaveCarver::new(CaveConfig {
            seed: 9,
            threshold: 0.9,
            ocean_floor_buffer: 10.0,
            ..Default::default()
        });
        let mut blocks = filled_volume(50, 66);
        carver.carve(0, 0, &mut blocks);
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                for y in 41..50 {
                    assert_eq!(blocks[block_index(x, y, z)], BlockType::Grass);
                }
                for y in 50..66 {
                    assert_eq!(blocks[block_index(x, y, z)], BlockType::Water);
                }
            }
        }
    }

    #[test]
    fn test_threshold_controls_density() {
        let count = |threshold: f64| {
            let carver = NoiseCaveCarver::new(CaveConfig {
                seed: 42,
                threshold,
                ..Default::default()
            });
            let mut blocks = filled_volume(120, 0);
            carver.carve(0, 0, &mut blocks);
            air_count(&blocks)
        };
        assert!(count(0.0) > count(-0.6));
    }

    #[test]
    fn test_carving_is_deterministic() {
        let make = || {
            NoiseCaveCarver::new(CaveConfig {
                seed: 123,
                ..Default::default()
            })
        };
        let mut a = filled_volume(110, 0);
        let mut b = filled_volume(110, 0);
        make().carve(-2, 5, &mut a);
        make().carve(-2, 5, &mut b);
        assert_eq!(a, b);
    }
}
