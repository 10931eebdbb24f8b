//! Biome definition: describes the properties of a single biome type.

/// Full descriptor for a biome type.
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeDef {
    /// Human-readable biome name (e.g., "forest_hills").
    pub name: String,
    /// Nominal temperature, 0 = frozen.
    pub temperature: f32,
    /// Rainfall in `[0, 1]`; values above 1 are capped when queried.
    pub rainfall: f32,
}

impl BiomeDef {
    pub fn new(name: impl Into<String>, temperature: f32, rainfall: f32) -> Self {
        Self {
            name: name.into(),
            temperature,
            rainfall,
        }
    }
}
