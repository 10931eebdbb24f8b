//! Biome system: registry of biome definitions and the biome query surface
//! a host world uses for spawn search, rainfall and viability checks.

mod def;
mod registry;
mod source;

pub use def::BiomeDef;
pub use registry::{BiomeId, BiomeRegistry, BiomeRegistryError};
pub use source::{BiomeLookupError, BiomeSource, LookupCategory};
