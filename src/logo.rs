//! Logo compositor.
//!
//! The logo sits on a small background plate in the middle of the symbol,
//! stretched to fill the exclusion square the module painter left empty.

use std::sync::Arc;

use image::RgbaImage;
use tiny_skia::{ColorU8, FillRule, FilterQuality, Paint, Pattern, Pixmap, SpreadMode, Transform};

use crate::canvas::{self, Canvas};
use crate::config::{LogoShape, StyleConfig};
use crate::error::{RenderError, Result};
use crate::layout::Layout;

/// How much larger, in pixels, the background plate is than the logo itself.
pub const LOGO_PLATE_GROWTH: f32 = 4.0;

/// A user-supplied logo, either already decoded or still encoded (PNG, JPEG, ...).
///
/// Both variants share their pixels, so cloning a config that carries a logo is cheap.
#[derive(Debug, Clone)]
pub enum LogoImage {
    Decoded(Arc<RgbaImage>),
    Encoded(Arc<[u8]>),
}

impl LogoImage {
    pub fn from_image(image: RgbaImage) -> Self {
        LogoImage::Decoded(Arc::new(image))
    }

    /// Wraps a raw straight-alpha RGBA buffer.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        RgbaImage::from_raw(width, height, pixels)
            .map(Self::from_image)
            .ok_or_else(|| {
                RenderError::InvalidConfig(format!(
                    "logo buffer does not hold {width}x{height} RGBA pixels"
                ))
            })
    }

    /// Keeps encoded bytes to be decoded when the render starts.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        LogoImage::Encoded(bytes.into())
    }

    /// Returns the logo's pixels, decoding them if needed.
    pub fn decode(&self) -> Result<Arc<RgbaImage>> {
        let image = match self {
            LogoImage::Decoded(image) => Arc::clone(image),
            LogoImage::Encoded(bytes) => {
                let decoded = image::load_from_memory(bytes)
                    .map_err(|e| RenderError::LogoDecodeFailure(e.to_string()))?;
                Arc::new(decoded.to_rgba8())
            }
        };
        if image.width() == 0 || image.height() == 0 {
            return Err(RenderError::LogoDecodeFailure("logo has no pixels".to_string()));
        }
        Ok(image)
    }
}

/// A logo converted to the premultiplied pixmap the compositor samples from.
pub struct PreparedLogo {
    pixmap: Pixmap,
}

impl PreparedLogo {
    pub fn prepare(logo: &LogoImage) -> Result<Self> {
        let image = logo.decode()?;
        let (width, height) = image.dimensions();
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| RenderError::LogoDecodeFailure(format!("cannot hold a {width}x{height} logo")))?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        Ok(PreparedLogo { pixmap })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }
}

/// Side, in pixels, of the square the logo fills.
pub fn logo_exclusion_px(config: &StyleConfig, layout: &Layout, module_count: usize) -> f64 {
    module_count as f64 * config.logo_size_fraction * layout.module_size(module_count)
}

pub fn draw_logo(
    canvas: &mut Canvas,
    config: &StyleConfig,
    layout: &Layout,
    module_count: usize,
    logo: &PreparedLogo,
) {
    let side = logo_exclusion_px(config, layout, module_count) as f32;
    let (cx, cy) = layout.symbol_center();
    let (cx, cy) = (cx as f32, cy as f32);
    let (x, y) = (cx - side / 2.0, cy - side / 2.0);
    log::debug!("logo {:?} into a {side:.1}px square at ({x:.1}, {y:.1})", logo.dimensions());

    let plate = side + LOGO_PLATE_GROWTH;
    let grow = LOGO_PLATE_GROWTH / 2.0;
    let plate_path = match config.logo_shape {
        LogoShape::Circle => canvas::circle_path(cx, cy, plate / 2.0),
        LogoShape::Square => canvas::rect_path(x - grow, y - grow, plate, plate),
        LogoShape::None => None,
    };
    if let Some(path) = plate_path {
        canvas.fill_path(&path, &canvas::solid(config.logo_bg_color), FillRule::Winding);
    }

    let (width, height) = logo.dimensions();
    let mut paint = Paint::default();
    paint.anti_alias = true;
    paint.shader = Pattern::new(
        logo.pixmap.as_ref(),
        SpreadMode::Pad,
        FilterQuality::Bilinear,
        1.0,
        Transform::from_row(side / width as f32, 0.0, 0.0, side / height as f32, x, y),
    );
    let clip = match config.logo_shape {
        LogoShape::Circle => canvas::circle_path(cx, cy, side / 2.0),
        LogoShape::Square | LogoShape::None => canvas::rect_path(x, y, side, side),
    };
    if let Some(path) = clip {
        canvas.fill_path(&path, &paint, FillRule::Winding);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rgba;
    use image::{ImageFormat, Rgba as Pixel};
    use std::io::Cursor;

    fn red_logo() -> LogoImage {
        LogoImage::from_image(RgbaImage::from_pixel(8, 4, Pixel([255, 0, 0, 255])))
    }

    fn composite(shape: LogoShape) -> (crate::RasterImage, Layout, f64) {
        let config = StyleConfig {
            logo_shape: shape,
            logo_bg_color: Rgba::rgb(0, 255, 0),
            logo_size_fraction: 0.2,
            ..Default::default()
        };
        let layout = Layout::compute(&config, 1.0);
        let (w, h) = layout.canvas_size_px();
        let mut canvas = Canvas::new(w, h).unwrap();
        let prepared = PreparedLogo::prepare(&red_logo()).unwrap();
        draw_logo(&mut canvas, &config, &layout, 29, &prepared);
        let side = logo_exclusion_px(&config, &layout, 29);
        (canvas.into_raster(true).unwrap(), layout, side)
    }

    #[test]
    fn test_exclusion_is_fraction_of_symbol() {
        let config = StyleConfig {
            logo_size_fraction: 0.2,
            ..Default::default()
        };
        let layout = Layout::compute(&config, 1.0);
        let side = logo_exclusion_px(&config, &layout, 29);
        assert!((side - 29.0 * 0.2 * layout.module_size(29)).abs() < 1e-9);
        assert!((side - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_square_logo_fills_exclusion_square() {
        let (raster, layout, side) = composite(LogoShape::Square);
        let (cx, cy) = layout.symbol_center();
        let corner = (cx - side / 2.0 + 2.0) as u32;
        assert_eq!(raster.pixel(cx as u32, cy as u32), [255, 0, 0, 255]);
        // Stretched, not letterboxed: the corners of the square are logo too.
        assert_eq!(raster.pixel(corner, (cy - side / 2.0 + 2.0) as u32), [255, 0, 0, 255]);
        // The plate shows in the 2px rim.
        let rim = (cx - side / 2.0 - 1.5) as u32;
        assert_eq!(raster.pixel(rim, cy as u32), [0, 255, 0, 255]);
    }

    #[test]
    fn test_circle_logo_is_clipped() {
        let (raster, layout, side) = composite(LogoShape::Circle);
        let (cx, cy) = layout.symbol_center();
        assert_eq!(raster.pixel(cx as u32, cy as u32), [255, 0, 0, 255]);
        let corner = (cx - side / 2.0 + 2.0) as u32;
        assert_eq!(raster.pixel(corner, (cy - side / 2.0 + 2.0) as u32)[3], 0);
    }

    #[test]
    fn test_no_shape_draws_image_without_plate() {
        let (raster, layout, side) = composite(LogoShape::None);
        let (cx, cy) = layout.symbol_center();
        assert_eq!(raster.pixel(cx as u32, cy as u32), [255, 0, 0, 255]);
        let rim = (cx - side / 2.0 - 1.5) as u32;
        assert_eq!(raster.pixel(rim, cy as u32)[3], 0);
    }

    #[test]
    fn test_decode_encoded_png() {
        let mut bytes = Vec::new();
        RgbaImage::from_pixel(3, 2, Pixel([1, 2, 3, 255]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        let decoded = LogoImage::from_bytes(bytes).decode().unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [1, 2, 3, 255]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = LogoImage::from_bytes(vec![0u8, 1, 2, 3]).decode().unwrap_err();
        assert!(matches!(err, RenderError::LogoDecodeFailure(_)));
    }

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(LogoImage::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            LogoImage::from_rgba(2, 2, vec![0; 15]),
            Err(RenderError::InvalidConfig(_))
        ));
    }
}
