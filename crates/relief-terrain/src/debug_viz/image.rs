//! A 2D debug image represented as a flat array of RGBA pixels.

/// A 2D debug image, stored as row-major RGBA pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data in row-major RGBA format. Length = `width * height * 4`.
    pub pixels: Vec<u8>,
}

impl DebugImage {
    /// Create a new transparent black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Set an opaque pixel.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_rgb(&mut self, x: u32, y: u32, (r, g, b): (u8, u8, u8)) {
        let idx = self.offset(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&[r, g, b, 255]);
    }

    /// Get a pixel's RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get_pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let idx = self.offset(x, y);
        (
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        (y as usize * self.width as usize + x as usize) * 4
    }
}
