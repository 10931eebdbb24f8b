//! Bilinear and bicubic reconstruction over a local buffer of raw samples.

/// Interpolation kernel used when sampling a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stencil {
    /// 2×2 kernel. Used for biome-only queries.
    Bilinear,
    /// 4×4 Catmull-Rom kernel. Used for full chunk synthesis.
    Bicubic,
}

impl Stencil {
    /// Border cells sampled on each side of the covered pixel range.
    ///
    /// Region buffers add one more cell past the far edge on top of this.
    pub const fn padding(self) -> i32 {
        match self {
            Stencil::Bilinear => 1,
            Stencil::Bicubic => 2,
        }
    }
}

/// Catmull-Rom cubic through `p1` (t = 0) and `p2` (t = 1).
#[inline]
pub fn cubic(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    p1 + 0.5
        * t
        * (p2 - p0
            + t * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3 + t * (3.0 * (p1 - p2) + p3 - p0)))
}

/// Transient cache of raw heightmap samples covering a pixel rectangle.
///
/// Cells are addressed relative to [`origin`](Self::origin). Stored x-major
/// so a column of Z samples is contiguous.
#[derive(Clone, Debug)]
pub struct LocalHeightBuffer {
    origin_x: i64,
    origin_z: i64,
    width: usize,
    depth: usize,
    samples: Vec<f32>,
}

impl LocalHeightBuffer {
    /// Fill a `width × depth` buffer whose cell `(0, 0)` is pixel
    /// `(origin_x, origin_z)`, calling `sample` once per pixel.
    ///
    /// Pixel coordinates are `i64` so a padded footprint may extend past the
    /// `i32` world range.
    pub fn fill(
        origin_x: i64,
        origin_z: i64,
        width: usize,
        depth: usize,
        mut sample: impl FnMut(i64, i64) -> f32,
    ) -> Self {
        let mut samples = Vec::with_capacity(width * depth);
        for bx in 0..width {
            let px = origin_x + bx as i64;
            for bz in 0..depth {
                samples.push(sample(px, origin_z + bz as i64));
            }
        }
        Self {
            origin_x,
            origin_z,
            width,
            depth,
            samples,
        }
    }

    /// Pixel coordinate of cell `(0, 0)`.
    pub fn origin(&self) -> (i64, i64) {
        (self.origin_x, self.origin_z)
    }

    /// Buffer extent in cells as `(width, depth)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.depth)
    }

    /// Raw sample at a buffer cell.
    #[inline]
    pub fn get(&self, x: usize, z: usize) -> f32 {
        debug_assert!(x < self.width && z < self.depth);
        self.samples[x * self.depth + z]
    }

    /// Bilinear interpolation inside cell `(cell_x, cell_z)`.
    ///
    /// Reads cells `cell..=cell + 1` on both axes.
    pub fn bilinear(&self, cell_x: usize, cell_z: usize, dx: f32, dz: f32) -> f32 {
        self.get(cell_x, cell_z) * (1.0 - dx) * (1.0 - dz)
            + self.get(cell_x + 1, cell_z) * dx * (1.0 - dz)
            + self.get(cell_x, cell_z + 1) * dz * (1.0 - dx)
            + self.get(cell_x + 1, cell_z + 1) * dx * dz
    }

    /// Bicubic interpolation inside cell `(cell_x, cell_z)`.
    ///
    /// Interpolates four rows along X, then the results along Z. Reads cells
    /// `cell - 1..=cell + 2` on both axes, so both cell coordinates must be
    /// at least 1.
    pub fn bicubic(&self, cell_x: usize, cell_z: usize, dx: f32, dz: f32) -> f32 {
        let row = |z: usize| {
            cubic(
                self.get(cell_x - 1, z),
                self.get(cell_x, z),
                self.get(cell_x + 1, z),
                self.get(cell_x + 2, z),
                dx,
            )
        };
        cubic(
            row(cell_z - 1),
            row(cell_z),
            row(cell_z + 1),
            row(cell_z + 2),
            dz,
        )
    }

    /// Dispatch to the kernel named by `stencil`.
    #[inline]
    pub fn interpolate(
        &self,
        stencil: Stencil,
        cell_x: usize,
        cell_z: usize,
        dx: f32,
        dz: f32,
    ) -> f32 {
        match stencil {
            Stencil::Bilinear => self.bilinear(cell_x, cell_z, dx, dz),
            Stencil::Bicubic => self.bicubic(cell_x, cell_z, dx, dz),
        }
    }
}
