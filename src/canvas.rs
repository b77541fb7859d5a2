//! A thin drawing surface over a tiny-skia `Pixmap`.
//!
//! Stages never touch the pixmap directly; they build paths with the helpers
//! below and fill or stroke them here. Everything is anti-aliased and drawn
//! with the identity transform, since layout already works in device pixels.

use image::RgbaImage;
use tiny_skia::{FillRule, LineCap, Mask, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::config::Rgba;
use crate::error::{RenderError, Result};
use crate::raster::RasterImage;

/// Control-point distance for a quarter circle drawn as one cubic, as a fraction of its radius.
pub const KAPPA: f32 = 0.552_284_8;

pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Allocates a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Pixmap::new(width, height)
            .map(|pixmap| Canvas { pixmap })
            .ok_or(RenderError::CanvasAllocation { width, height })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Replaces every pixel with `color`.
    pub fn fill_color(&mut self, color: Rgba) {
        self.pixmap.fill(color.to_skia());
    }

    pub fn fill_path(&mut self, path: &Path, paint: &Paint, rule: FillRule) {
        self.pixmap
            .fill_path(path, paint, rule, Transform::identity(), None);
    }

    /// Strokes `path` with round caps.
    pub fn stroke_path(&mut self, path: &Path, color: Rgba, width: f32) {
        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(path, &solid(color), &stroke, Transform::identity(), None);
    }

    /// Paints `color` wherever `mask` has coverage. The mask must match the canvas size.
    pub fn fill_mask(&mut self, mask: &Mask, color: Rgba) {
        if let Some(rect) = Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32) {
            self.pixmap
                .fill_rect(rect, &solid(color), Transform::identity(), Some(mask));
        }
    }

    /// An empty coverage mask the size of the canvas.
    pub fn new_mask(&self) -> Result<Mask> {
        Mask::new(self.width(), self.height()).ok_or(RenderError::CanvasAllocation {
            width: self.width(),
            height: self.height(),
        })
    }

    /// Un-premultiplies the pixmap into the caller-facing raster.
    pub fn into_raster(self, has_alpha: bool) -> Result<RasterImage> {
        let (width, height) = (self.width(), self.height());
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        RgbaImage::from_raw(width, height, data)
            .map(|image| RasterImage::new(image, has_alpha))
            .ok_or(RenderError::CanvasAllocation { width, height })
    }
}

/// An anti-aliased solid paint.
pub fn solid(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

/*---- Path helpers ----*/

pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Option<Rect> {
    Rect::from_xywh(x, y, w, h)
}

/// Draws a quarter arc from the current point (`from`) to `to`, bulging toward `corner`.
///
/// `from` and `to` must each be one radius away from `corner` along an axis,
/// which is the same tangent construction as a canvas `arcTo`.
pub fn arc_around(pb: &mut PathBuilder, from: (f32, f32), corner: (f32, f32), to: (f32, f32)) {
    let c1 = (
        from.0 + (corner.0 - from.0) * KAPPA,
        from.1 + (corner.1 - from.1) * KAPPA,
    );
    let c2 = (
        to.0 + (corner.0 - to.0) * KAPPA,
        to.1 + (corner.1 - to.1) * KAPPA,
    );
    pb.cubic_to(c1.0, c1.1, c2.0, c2.1, to.0, to.1);
}

/// Appends a closed rounded rectangle. The radius is capped at half the shorter side.
pub fn push_rounded_rect(pb: &mut PathBuilder, x: f32, y: f32, w: f32, h: f32, radius: f32) {
    let r = radius.min(w.min(h) / 2.0).max(0.0);
    if r == 0.0 {
        if let Some(rect) = rect(x, y, w, h) {
            pb.push_rect(rect);
        }
        return;
    }
    let (right, bottom) = (x + w, y + h);

    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    arc_around(pb, (right - r, y), (right, y), (right, y + r));
    pb.line_to(right, bottom - r);
    arc_around(pb, (right, bottom - r), (right, bottom), (right - r, bottom));
    pb.line_to(x + r, bottom);
    arc_around(pb, (x + r, bottom), (x, bottom), (x, bottom - r));
    pb.line_to(x, y + r);
    arc_around(pb, (x, y + r), (x, y), (x + r, y));
    pb.close();
}

pub fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    push_rounded_rect(&mut pb, x, y, w, h, radius);
    pb.finish()
}

pub fn rect_path(x: f32, y: f32, w: f32, h: f32) -> Option<Path> {
    rect(x, y, w, h).map(PathBuilder::from_rect)
}

pub fn circle_path(cx: f32, cy: f32, radius: f32) -> Option<Path> {
    PathBuilder::from_circle(cx, cy, radius)
}
