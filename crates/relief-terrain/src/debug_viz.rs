//! Terrain debug visualization: 2D image rendering of synthesized surface
//! heights and biome maps, used to eyeball a heightmap's mapping before
//! generating a world from it.

mod image;
mod renderers;

pub use self::image::DebugImage;
pub use renderers::{biome_color, render_biome_debug, render_surface_debug, surface_color};
