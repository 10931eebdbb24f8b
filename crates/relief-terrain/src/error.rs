//! Construction-time validation errors for grids and engine parameters.

/// Errors raised while building a [`HeightmapGrid`](crate::HeightmapGrid) or
/// validating an [`EngineConfig`](crate::EngineConfig).
///
/// Synthesis itself never fails; everything that could make the numeric core
/// misbehave is rejected here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// The world-units-per-pixel scale must be finite and strictly positive.
    #[error("heightmap scale must be finite and > 0, got {0}")]
    InvalidScale(f32),

    /// A vertical level lies outside the representable world column.
    #[error("{name} resolves to y={value}, outside 0..={max}")]
    LevelOutOfRange {
        /// Which level failed (e.g. `"base_level"`).
        name: &'static str,
        /// The absolute world Y it resolved to.
        value: i32,
        /// Largest accepted value.
        max: i32,
    },

    /// A grid was created with a zero-sized dimension.
    #[error("heightmap grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// The sample buffer does not match `width * height`.
    #[error("heightmap grid expects {expected} samples, got {actual}")]
    SampleCountMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },

    /// A sample is NaN or outside `[0, 1]`.
    #[error("heightmap sample at ({x}, {z}) is {value}, expected a value in [0, 1]")]
    SampleOutOfRange {
        /// Pixel column.
        x: u32,
        /// Pixel row.
        z: u32,
        /// The offending value.
        value: f32,
    },
}
