//! Normalized elevation grid and edge-clamped pixel sampling.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::error::TerrainError;

/// Immutable 2D grid of normalized heights in `[0, 1]`, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightmapGrid {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl HeightmapGrid {
    /// Wrap a row-major sample buffer (`values[z * width + x]`).
    ///
    /// # Errors
    ///
    /// Fails if either dimension is zero, the buffer length is not
    /// `width * height`, or any sample is NaN or outside `[0, 1]`.
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> Result<Self, TerrainError> {
        if width == 0 || height == 0 {
            return Err(TerrainError::EmptyGrid { width, height });
        }
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(TerrainError::SampleCountMismatch {
                expected,
                actual: values.len(),
            });
        }
        if let Some(i) = values.iter().position(|v| !(0.0..=1.0).contains(v)) {
            return Err(TerrainError::SampleOutOfRange {
                x: (i % width as usize) as u32,
                z: (i / width as usize) as u32,
                value: values[i],
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Build a grid by evaluating `f(x, z)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> f32,
    ) -> Result<Self, TerrainError> {
        let mut values = Vec::with_capacity(width as usize * height as usize);
        for z in 0..height {
            for x in 0..width {
                values.push(f(x, z));
            }
        }
        Self::new(width, height, values)
    }

    /// A grid holding the same value everywhere.
    pub fn uniform(width: u32, height: u32, value: f32) -> Result<Self, TerrainError> {
        Self::from_fn(width, height, |_, _| value)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height (Z extent) in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample at an in-bounds pixel.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `z >= height`.
    pub fn get(&self, x: u32, z: u32) -> f32 {
        assert!(x < self.width && z < self.height, "pixel ({x}, {z}) out of bounds");
        self.values[z as usize * self.width as usize + x as usize]
    }
}

/// Reads heights at integer pixel coordinates, clamping to the grid edge.
///
/// Without a grid every read returns the configured flat-world fallback.
#[derive(Clone, Debug)]
pub struct HeightSampler {
    grid: Option<Arc<HeightmapGrid>>,
    fallback: f32,
}

impl HeightSampler {
    /// Create a sampler over `grid`, using `config` for the fallback height.
    pub fn new(grid: Option<Arc<HeightmapGrid>>, config: &EngineConfig) -> Self {
        Self {
            grid,
            fallback: config.fallback_height(),
        }
    }

    /// Sample the normalized height at pixel `(px, pz)`.
    ///
    /// Coordinates may lie anywhere; reads outside the grid return the
    /// nearest edge pixel.
    pub fn sample(&self, px: i32, pz: i32) -> f32 {
        let Some(grid) = &self.grid else {
            return self.fallback;
        };
        let x = px.clamp(0, grid.width.saturating_sub(1).min(i32::MAX as u32) as i32);
        let z = pz.clamp(0, grid.height.saturating_sub(1).min(i32::MAX as u32) as i32);
        grid.get(x as u32, z as u32)
    }

    /// The loaded grid, if any.
    pub fn grid(&self) -> Option<&HeightmapGrid> {
        self.grid.as_deref()
    }

    /// Returns `true` when sampling falls back to the flat default.
    pub fn is_flat(&self) -> bool {
        self.grid.is_none()
    }
}
