//! Immutable engine parameters: heightmap scale and vertical level bands.

use crate::error::TerrainError;

/// Highest world Y a surface may reach.
pub(crate) const MAX_SURFACE_Y: i32 = 255;

/// Parameters shared by every synthesis call.
///
/// The level fields other than `base_level` are offsets from `base_level`.
/// An engine copies its config at construction and never mutates it; to
/// reconfigure, build a new engine and publish it through an
/// [`EngineHandle`](crate::EngineHandle).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// World blocks per heightmap pixel along X and Z. Default: 10.
    pub scale: f32,
    /// World Y that a heightmap value of 0 maps to. Default: 56.
    pub base_level: i32,
    /// Water fills columns up to `base_level + water_level`. Default: 10.
    pub water_level: i32,
    /// Plains give way to forest hills at `base_level + forest_level`. Default: 18.
    pub forest_level: i32,
    /// Ice mountains start at `base_level + snow_mountain_level`. Default: 54.
    pub snow_mountain_level: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scale: 10.0,
            base_level: 56,
            water_level: 10,
            forest_level: 18,
            snow_mountain_level: 54,
        }
    }
}

impl EngineConfig {
    /// Check the invariants the numeric core relies on.
    ///
    /// # Errors
    ///
    /// [`TerrainError::InvalidScale`] for a non-finite or non-positive scale;
    /// [`TerrainError::LevelOutOfRange`] if the base level or the sea level
    /// fall outside the world column.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(TerrainError::InvalidScale(self.scale));
        }
        if !(0..=MAX_SURFACE_Y).contains(&self.base_level) {
            return Err(TerrainError::LevelOutOfRange {
                name: "base_level",
                value: self.base_level,
                max: MAX_SURFACE_Y,
            });
        }
        let sea_level = self.base_level.saturating_add(self.water_level);
        if !(0..=MAX_SURFACE_Y + 1).contains(&sea_level) {
            return Err(TerrainError::LevelOutOfRange {
                name: "water_level",
                value: sea_level,
                max: MAX_SURFACE_Y + 1,
            });
        }
        Ok(())
    }

    /// Absolute world Y up to which (exclusive) columns are flooded.
    pub fn sea_level(&self) -> i32 {
        self.base_level + self.water_level
    }

    /// Height returned for every pixel when no heightmap is loaded.
    pub fn fallback_height(&self) -> f32 {
        256.0 / (self.base_level + self.water_level + 4) as f32
    }

    /// Map a normalized height to an integer surface Y in `[0, 255]`.
    pub fn surface_y(&self, height: f32) -> u8 {
        let span = (MAX_SURFACE_Y - self.base_level) as f32;
        let y = height * span + self.base_level as f32;
        // Inputs are non-negative after the clamp, so `round` matches half-up.
        y.clamp(0.0, MAX_SURFACE_Y as f32).round() as u8
    }
}
