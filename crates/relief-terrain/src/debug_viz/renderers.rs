//! Surface-height and biome map renderers.

use super::image::DebugImage;
use crate::biome::BiomeId;
use crate::classify::Biome;
use crate::config::EngineConfig;
use crate::engine::TerrainEngine;
use crate::interpolate::Stencil;

/// Render the bicubic surface of a world rectangle, one pixel per block.
///
/// Water-covered columns are shaded by depth below sea level; land is
/// shaded from green at the shore through brown to white at the ceiling.
pub fn render_surface_debug(
    engine: &TerrainEngine,
    x: i32,
    z: i32,
    width: u32,
    height: u32,
) -> DebugImage {
    let mut image = DebugImage::new(width, height);
    let surface = engine.surface_region(x, z, width as usize, height as usize, Stencil::Bicubic);
    for py in 0..height {
        for px in 0..width {
            let y = surface.get(px as usize, py as usize);
            image.set_rgb(px, py, surface_color(y, engine.config()));
        }
    }
    image
}

/// Render the biome map of a world rectangle, one pixel per block.
pub fn render_biome_debug(
    engine: &TerrainEngine,
    x: i32,
    z: i32,
    width: u32,
    height: u32,
) -> DebugImage {
    let mut image = DebugImage::new(width, height);
    let biomes = engine.synthesize_biomes(x, z, width as usize, height as usize);
    for py in 0..height {
        for px in 0..width {
            image.set_rgb(px, py, biome_color(biomes.get(px as usize, py as usize)));
        }
    }
    image
}

/// Map a surface Y to an RGB color relative to the configured sea level.
pub fn surface_color(y: u8, config: &EngineConfig) -> (u8, u8, u8) {
    let y = i32::from(y);
    let sea = config.sea_level();
    if y < sea {
        // Deeper water is darker.
        let depth = ((sea - y) as f32 / sea.max(1) as f32).clamp(0.0, 1.0);
        (0, (80.0 * (1.0 - depth)) as u8, (220.0 - depth * 120.0) as u8)
    } else {
        let t = ((y - sea) as f32 / (255 - sea).max(1) as f32).clamp(0.0, 1.0);
        if t < 0.5 {
            let s = t * 2.0;
            ((40.0 + s * 100.0) as u8, (160.0 - s * 60.0) as u8, (40.0 + s * 20.0) as u8)
        } else {
            let s = (t - 0.5) * 2.0;
            let c = 140.0 + s * 115.0;
            (c as u8, (100.0 + s * 155.0) as u8, (60.0 + s * 195.0) as u8)
        }
    }
}

/// Fixed color per biome; unknown ids render magenta.
pub fn biome_color(id: BiomeId) -> (u8, u8, u8) {
    match Biome::from_id(id) {
        Some(Biome::Ocean) => (20, 40, 140),
        Some(Biome::River) => (50, 110, 220),
        Some(Biome::Beach) => (220, 205, 140),
        Some(Biome::Plains) => (120, 180, 70),
        Some(Biome::ForestHills) => (40, 100, 40),
        Some(Biome::IceMountains) => (235, 240, 250),
        None => (255, 0, 255),
    }
}
