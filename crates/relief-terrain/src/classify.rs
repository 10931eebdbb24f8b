//! Height-to-material and height-to-biome classification.

use crate::biome::BiomeId;
use crate::block::BlockType;
use crate::config::EngineConfig;

/// Biomes reachable from the height ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Biome {
    Ocean,
    River,
    Beach,
    Plains,
    ForestHills,
    IceMountains,
}

impl Biome {
    /// All variants, lowest band first.
    pub const ALL: [Biome; 6] = [
        Biome::Ocean,
        Biome::River,
        Biome::Beach,
        Biome::Plains,
        Biome::ForestHills,
        Biome::IceMountains,
    ];

    /// The id the host biome table uses for this biome.
    pub const fn id(self) -> BiomeId {
        BiomeId(match self {
            Biome::Ocean => 0,
            Biome::Plains => 1,
            Biome::River => 7,
            Biome::IceMountains => 13,
            Biome::Beach => 16,
            Biome::ForestHills => 18,
        })
    }

    /// Reverse of [`id`](Self::id).
    pub fn from_id(id: BiomeId) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.id() == id)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Biome::Ocean => "ocean",
            Biome::River => "river",
            Biome::Beach => "beach",
            Biome::Plains => "plains",
            Biome::ForestHills => "forest_hills",
            Biome::IceMountains => "ice_mountains",
        }
    }
}

/// Pure classification of integer world Y against the configured bands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classifier {
    base_level: i32,
    water_level: i32,
    forest_level: i32,
    snow_mountain_level: i32,
}

impl Classifier {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base_level: config.base_level,
            water_level: config.water_level,
            forest_level: config.forest_level,
            snow_mountain_level: config.snow_mountain_level,
        }
    }

    /// Material for the block at height `y` of a column.
    ///
    /// Bedrock at the bottom, grass everywhere else. No stone or dirt bands
    /// are emitted.
    pub fn block_at(&self, y: i32) -> BlockType {
        if y == 0 {
            BlockType::Bedrock
        } else {
            BlockType::Grass
        }
    }

    /// Biome for a column whose surface sits at `y`. First matching band wins.
    pub fn biome_at(&self, y: i32) -> Biome {
        let sea = self.base_level + self.water_level;
        if y < sea - 2 {
            Biome::Ocean
        } else if y < sea {
            Biome::River
        } else if y < sea + 1 {
            Biome::Beach
        } else if y < self.base_level + self.forest_level {
            Biome::Plains
        } else if y < self.base_level + self.snow_mountain_level {
            Biome::ForestHills
        } else {
            Biome::IceMountains
        }
    }
}
