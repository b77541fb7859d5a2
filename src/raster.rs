//! The finished raster handed back to callers.

use image::{Rgba as Pixel, RgbaImage};

/// A fully composed image: straight (non-premultiplied) RGBA8 pixels.
///
/// Produced once per render; the caller owns it outright.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    image: RgbaImage,
    has_alpha: bool,
}

impl RasterImage {
    pub(crate) fn new(image: RgbaImage, has_alpha: bool) -> Self {
        Self { image, has_alpha }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Whether any pixel may be less than fully opaque.
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// The pixel at `x`, `y` as `[r, g, b, a]`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let Pixel(rgba) = *self.image.get_pixel(x, y);
        rgba
    }

    /// Row-major RGBA bytes.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
