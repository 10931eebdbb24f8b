//! Region sampling: caches raw pixels around a world rectangle and
//! evaluates interpolated surface heights over it.

use crate::biome::BiomeId;
use crate::classify::Classifier;
use crate::config::EngineConfig;
use crate::heightmap::HeightSampler;
use crate::interpolate::{LocalHeightBuffer, Stencil};

/// Surface Y per world position of a rectangle, row-major with Z outer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceGrid {
    width: usize,
    depth: usize,
    heights: Vec<u8>,
}

impl SurfaceGrid {
    /// Surface Y at offset `(x, z)` from the rectangle origin.
    pub fn get(&self, x: usize, z: usize) -> u8 {
        self.heights[z * self.width + x]
    }

    /// `(width, depth)` of the sampled rectangle.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.depth)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.heights
    }
}

/// Biome ids for a world rectangle, row-major with Z outer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BiomeRegion {
    x: i32,
    z: i32,
    width: usize,
    depth: usize,
    biomes: Vec<BiomeId>,
}

impl BiomeRegion {
    /// World position of the rectangle's first cell.
    pub fn origin(&self) -> (i32, i32) {
        (self.x, self.z)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.depth)
    }

    /// Biome at offset `(x, z)` from the origin.
    pub fn get(&self, x: usize, z: usize) -> BiomeId {
        self.biomes[z * self.width + x]
    }

    /// Flat `width * depth` array, index `z * width + x`.
    pub fn as_slice(&self) -> &[BiomeId] {
        &self.biomes
    }

    pub fn into_vec(self) -> Vec<BiomeId> {
        self.biomes
    }
}

/// Heightmap pixel containing world coordinate `world`.
#[inline]
fn pixel_floor(world: i64, scale: f64) -> i64 {
    (world as f64 / scale).floor() as i64
}

/// Pixels beyond the `i32` range clamp to the same grid edge.
#[inline]
fn sampler_pixel(p: i64) -> i32 {
    p.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Sample interpolated surface heights for the `width × depth` world
/// rectangle starting at `(x0, z0)`.
///
/// Raw pixels are read once each into a [`LocalHeightBuffer`] covering the
/// rectangle plus `stencil` padding, so the cost of sampling is bounded by
/// the pixel footprint rather than the number of world positions. World
/// and pixel coordinates are carried as `i64`, so rectangles touching the
/// ends of the `i32` world range neither overflow nor wrap.
pub fn sample_region(
    sampler: &HeightSampler,
    config: &EngineConfig,
    x0: i64,
    z0: i64,
    width: usize,
    depth: usize,
    stencil: Stencil,
) -> SurfaceGrid {
    if width == 0 || depth == 0 {
        return SurfaceGrid {
            width,
            depth,
            heights: Vec::new(),
        };
    }

    let scale = f64::from(config.scale);
    let pad = i64::from(stencil.padding());
    let buf_x0 = pixel_floor(x0, scale) - pad;
    let buf_z0 = pixel_floor(z0, scale) - pad;
    let buf_x1 = pixel_floor(x0 + width as i64 - 1, scale) + pad + 1;
    let buf_z1 = pixel_floor(z0 + depth as i64 - 1, scale) + pad + 1;
    let buf_width = (buf_x1 - buf_x0 + 1) as usize;
    let buf_depth = (buf_z1 - buf_z0 + 1) as usize;

    let buffer = LocalHeightBuffer::fill(buf_x0, buf_z0, buf_width, buf_depth, |px, pz| {
        sampler.sample(sampler_pixel(px), sampler_pixel(pz))
    });

    // Cell and fraction of a world coordinate relative to a buffer axis,
    // kept inside the cells the stencil can read.
    let locate = |world: i64, origin: i64, len: usize| {
        let hm = world as f64 / scale - origin as f64;
        let cell = hm.floor();
        let frac = (hm - cell) as f32;
        let cell = (cell as i64).clamp(pad - 1, len as i64 - pad - 1);
        (cell as usize, frac)
    };

    let mut heights = Vec::with_capacity(width * depth);
    for z in 0..depth {
        let (cell_z, dz) = locate(z0 + z as i64, buf_z0, buf_depth);
        for x in 0..width {
            let (cell_x, dx) = locate(x0 + x as i64, buf_x0, buf_width);
            let height = buffer.interpolate(stencil, cell_x, cell_z, dx, dz);
            heights.push(config.surface_y(height));
        }
    }

    tracing::trace!(
        x0,
        z0,
        width,
        depth,
        ?stencil,
        pixels = buf_width * buf_depth,
        "sampled region"
    );

    SurfaceGrid {
        width,
        depth,
        heights,
    }
}

/// Classify every position of a world rectangle into a biome.
///
/// Uses the bilinear stencil; callers wanting a coarse map pre-scale the
/// coordinates themselves.
pub fn synthesize_biome_region(
    sampler: &HeightSampler,
    config: &EngineConfig,
    x: i32,
    z: i32,
    width: usize,
    depth: usize,
) -> BiomeRegion {
    let surface = sample_region(
        sampler,
        config,
        i64::from(x),
        i64::from(z),
        width,
        depth,
        Stencil::Bilinear,
    );
    let classifier = Classifier::new(config);
    let biomes = surface
        .as_slice()
        .iter()
        .map(|&y| classifier.biome_at(i32::from(y)).id())
        .collect();

    BiomeRegion {
        x,
        z,
        width,
        depth,
        biomes,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::classify::Biome;
    use crate::heightmap::HeightmapGrid;

    fn sampler_for(grid: HeightmapGrid, config: &EngineConfig) -> HeightSampler {
        HeightSampler::new(Some(Arc::new(grid)), config)
    }

    #[test]
    fn test_flat_default_clamps_to_ceiling() {
        let config = EngineConfig::default();
        let sampler = HeightSampler::new(None, &config);
        for stencil in [Stencil::Bilinear, Stencil::Bicubic] {
            let grid = sample_region(&sampler, &config, -37, 512, 16, 16, stencil);
            assert!(grid.as_slice().iter().all(|&y| y == 255));
        }
    }

    #[test]
    fn test_uniform_half_height_gives_156() {
        let config = EngineConfig::default();
        let sampler = sampler_for(HeightmapGrid::uniform(8, 8, 0.5).unwrap(), &config);
        let grid = sample_region(&sampler, &config, 0, 0, 16, 16, Stencil::Bicubic);
        assert_eq!(grid.dimensions(), (16, 16));
        assert!(grid.as_slice().iter().all(|&y| y == 156));
    }

    #[test]
    fn test_pixel_aligned_positions_read_exact_pixels() {
        let config = EngineConfig {
            scale: 4.0,
            ..Default::default()
        };
        let grid = HeightmapGrid::from_fn(8, 8, |x, z| (x * 8 + z) as f32 / 63.0).unwrap();
        let expected: Vec<u8> = (0..8)
            .map(|px| config.surface_y(grid.get(px, 3)))
            .collect();
        let sampler = sampler_for(grid, &config);

        for stencil in [Stencil::Bilinear, Stencil::Bicubic] {
            let surface = sample_region(&sampler, &config, 0, 12, 32, 1, stencil);
            for px in 0..8 {
                assert_eq!(surface.get(px * 4, 0), expected[px], "{stencil:?} pixel {px}");
            }
        }
    }

    #[test]
    fn test_negative_coordinates_stay_in_buffer() {
        let config = EngineConfig {
            scale: 3.0,
            ..Default::default()
        };
        let grid = HeightmapGrid::from_fn(5, 5, |x, z| ((x + z) % 3) as f32 / 2.0).unwrap();
        let sampler = sampler_for(grid, &config);
        let surface = sample_region(&sampler, &config, -50, -17, 23, 9, Stencil::Bicubic);
        assert_eq!(surface.dimensions(), (23, 9));
        assert_eq!(surface.as_slice().len(), 23 * 9);
    }

    #[test]
    fn test_empty_rectangle() {
        let config = EngineConfig::default();
        let sampler = HeightSampler::new(None, &config);
        let surface = sample_region(&sampler, &config, 0, 0, 0, 5, Stencil::Bilinear);
        assert!(surface.as_slice().is_empty());
    }

    #[test]
    fn test_single_pixel_only_affects_its_footprint() {
        let config = EngineConfig {
            scale: 4.0,
            ..Default::default()
        };
        // 0.2 -> y=96 (forest hills), 0.9 -> y=235 (ice mountains)
        let grid =
            HeightmapGrid::from_fn(8, 8, |x, z| if (x, z) == (2, 2) { 0.9 } else { 0.2 })
                .unwrap();
        let sampler = sampler_for(grid, &config);
        let region = synthesize_biome_region(&sampler, &config, 0, 0, 16, 16);

        assert_eq!(region.dimensions(), (16, 16));
        assert_eq!(region.get(8, 8), Biome::IceMountains.id());
        for z in 0..16 {
            for x in 0..16 {
                // Bilinear weight of pixel 2 is zero outside world 5..=11.
                let inside = (5..12).contains(&x) && (5..12).contains(&z);
                if !inside {
                    assert_eq!(
                        region.get(x, z),
                        Biome::ForestHills.id(),
                        "({x}, {z}) should be unaffected"
                    );
                }
            }
        }
    }

    #[test]
    fn test_biome_region_layout_is_z_major() {
        let config = EngineConfig {
            scale: 1.0,
            ..Default::default()
        };
        // Low rows become ocean, high rows ice mountains.
        let grid = HeightmapGrid::from_fn(4, 4, |_, z| if z < 2 { 0.0 } else { 1.0 }).unwrap();
        let sampler = sampler_for(grid, &config);
        let region = synthesize_biome_region(&sampler, &config, 0, 0, 4, 4);
        let flat = region.as_slice();
        assert_eq!(flat[0], Biome::Ocean.id());
        assert_eq!(flat[3], Biome::Ocean.id());
        assert_eq!(flat[2 * 4], Biome::IceMountains.id());
        assert_eq!(flat[3 * 4 + 3], Biome::IceMountains.id());
    }

    #[test]
    fn test_rectangles_at_world_extremes() {
        let config = EngineConfig {
            scale: 10.0,
            ..Default::default()
        };
        let grid = HeightmapGrid::from_fn(4, 4, |x, _| if x < 2 { 0.0 } else { 1.0 }).unwrap();
        let sampler = sampler_for(grid, &config);

        // Far edge reaches i32::MAX: every pixel clamps to the high edge.
        let east = synthesize_biome_region(&sampler, &config, i32::MAX - 1, 0, 4, 1);
        assert_eq!(east.dimensions(), (4, 1));
        assert!(east.as_slice().iter().all(|&id| id == Biome::IceMountains.id()));

        // Near edge at i32::MIN: every pixel clamps to the low edge.
        let west = synthesize_biome_region(&sampler, &config, i32::MIN, i32::MIN, 3, 3);
        assert!(west.as_slice().iter().all(|&id| id == Biome::Ocean.id()));

        for stencil in [Stencil::Bilinear, Stencil::Bicubic] {
            let surface = sample_region(
                &sampler,
                &config,
                i64::from(i32::MAX) - 15,
                i64::from(i32::MIN),
                16,
                16,
                stencil,
            );
            assert!(surface.as_slice().iter().all(|&y| y == 255), "{stencil:?}");
        }
    }

    #[test]
    fn test_region_sampling_is_deterministic() {
        let config = EngineConfig {
            scale: 2.5,
            ..Default::default()
        };
        let grid = HeightmapGrid::from_fn(16, 16, |x, z| ((x * 31 + z * 17) % 23) as f32 / 22.0)
            .unwrap();
        let sampler = sampler_for(grid, &config);
        let a = sample_region(&sampler, &config, 3, -9, 20, 20, Stencil::Bicubic);
        let b = sample_region(&sampler, &config, 3, -9, 20, 20, Stencil::Bicubic);
        assert_eq!(a, b);
    }
}
