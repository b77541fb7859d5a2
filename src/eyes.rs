//! Finder pattern ("eye") renderer.
//!
//! Every eye is an outer ring followed by a center block. The ring's hole is
//! cut with an even-odd fill, so it shows whatever the background stage left
//! there: the background color, or nothing at all on a transparent canvas.

use tiny_skia::{FillRule, PathBuilder};

use crate::canvas::{self, Canvas};
use crate::config::{EyeShape, StyleConfig};
use crate::grid::{finder_origins, FINDER_SIZE};
use crate::layout::Layout;

/// Outer corner radius of a rounded eye, in modules.
const ROUNDED_RADIUS: f32 = 1.5;
/// Corner radius factors of the rounded eye's hole and center.
const ROUNDED_INNER: f32 = 0.7;
const ROUNDED_CENTER: f32 = 0.4;

/// Pixel placement of one eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eye {
    pub x: f32,
    pub y: f32,
    /// One module, in pixels.
    pub module: f32,
}

impl Eye {
    pub fn size(&self) -> f32 {
        FINDER_SIZE as f32 * self.module
    }

    pub fn center(&self) -> (f32, f32) {
        let half = self.size() / 2.0;
        (self.x + half, self.y + half)
    }

    /// The square inset by `modules` on every side.
    fn inset(&self, modules: f32) -> (f32, f32, f32) {
        let offset = modules * self.module;
        (self.x + offset, self.y + offset, self.size() - 2.0 * offset)
    }
}

/// The three eyes: top-left, top-right, bottom-left.
pub fn eyes(layout: &Layout, module_count: usize) -> [Eye; 3] {
    let module = layout.module_size(module_count);
    finder_origins(module_count).map(|(row, col)| Eye {
        x: (layout.symbol_x + col as f64 * module) as f32,
        y: (layout.symbol_y + row as f64 * module) as f32,
        module: module as f32,
    })
}

/// Radii of the circle eye's outer edge, hole and center dot.
pub fn circle_radii(module: f32, eye_scale: f32) -> (f32, f32, f32) {
    (3.5 * module * eye_scale, 2.5 * module * eye_scale, 1.5 * module * eye_scale)
}

pub fn draw_eyes(canvas: &mut Canvas, config: &StyleConfig, layout: &Layout, module_count: usize) {
    for eye in eyes(layout, module_count) {
        draw_eye(canvas, config, &eye);
    }
}

fn draw_eye(canvas: &mut Canvas, config: &StyleConfig, eye: &Eye) {
    let mut ring = PathBuilder::new();
    let mut center = PathBuilder::new();

    match config.eye_shape {
        EyeShape::Square => {
            let square = |inset: f32| {
                let (x, y, side) = eye.inset(inset);
                canvas::rect(x, y, side, side)
            };
            for rect in [square(0.0), square(1.0)].into_iter().flatten() {
                ring.push_rect(rect);
            }
            if let Some(rect) = square(2.0) {
                center.push_rect(rect);
            }
        }
        EyeShape::Circle => {
            let (cx, cy) = eye.center();
            let (outer, hole, dot) = circle_radii(eye.module, config.eye_scale as f32);
            ring.push_circle(cx, cy, outer);
            ring.push_circle(cx, cy, hole);
            center.push_circle(cx, cy, dot);
        }
        EyeShape::Rounded => {
            let radius = ROUNDED_RADIUS * eye.module;
            for (inset, r) in [(0.0, radius), (1.0, radius * ROUNDED_INNER)] {
                let (x, y, side) = eye.inset(inset);
                canvas::push_rounded_rect(&mut ring, x, y, side, side, r);
            }
            let (x, y, side) = eye.inset(2.0);
            canvas::push_rounded_rect(&mut center, x, y, side, side, radius * ROUNDED_CENTER);
        }
    }

    let paint = canvas::solid(config.eye_color);
    if let Some(path) = ring.finish() {
        canvas.fill_path(&path, &paint, FillRule::EvenOdd);
    }
    if let Some(path) = center.finish() {
        canvas.fill_path(&path, &paint, FillRule::Winding);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rgba;

    const EYE: Rgba = Rgba::rgb(0, 90, 200);
    const BG: Rgba = Rgba::rgb(250, 250, 240);

    fn render_eyes(shape: EyeShape, eye_scale: f64, background: bool) -> (crate::RasterImage, Layout) {
        let config = StyleConfig {
            eye_shape: shape,
            eye_scale,
            eye_color: EYE,
            background_color: BG,
            ..Default::default()
        };
        let layout = Layout::compute(&config, 1.0);
        let (w, h) = layout.canvas_size_px();
        let mut canvas = Canvas::new(w, h).unwrap();
        if background {
            canvas.fill_color(BG);
        }
        draw_eyes(&mut canvas, &config, &layout, 21);
        (canvas.into_raster(!background).unwrap(), layout)
    }

    /// Pixel `dx`, `dy` modules away from the top-left eye's center.
    fn sample(raster: &crate::RasterImage, layout: &Layout, dx: f64, dy: f64) -> [u8; 4] {
        let module = layout.module_size(21);
        let cx = layout.symbol_x + 3.5 * module;
        let cy = layout.symbol_y + 3.5 * module;
        raster.pixel((cx + dx * module) as u32, (cy + dy * module) as u32)
    }

    #[test]
    fn test_eye_positions() {
        let layout = Layout::compute(&StyleConfig::default(), 1.0);
        let [tl, tr, bl] = eyes(&layout, 21);
        let module = (400.0f64 / 21.0) as f32;
        assert_eq!((tl.x, tl.y), (60.0, 60.0));
        assert!((tr.x - (60.0 + 14.0 * module)).abs() < 1e-3);
        assert_eq!(tr.y, 60.0);
        assert_eq!(bl.x, 60.0);
        assert!((bl.y - (60.0 + 14.0 * module)).abs() < 1e-3);
        assert!((tl.size() - 7.0 * module).abs() < 1e-3);
    }

    #[test]
    fn test_circle_radii_follow_module_size() {
        let (outer, hole, dot) = circle_radii(10.0, 1.0);
        assert_eq!((outer, hole, dot), (35.0, 25.0, 15.0));
        let (outer, _, _) = circle_radii(10.0, 0.5);
        assert_eq!(outer, 17.5);
    }

    #[test]
    fn test_square_eye_rings() {
        let (raster, layout) = render_eyes(EyeShape::Square, 1.0, true);
        let eye = EYE.to_array();
        assert_eq!(sample(&raster, &layout, 0.0, 0.0), eye);
        assert_eq!(sample(&raster, &layout, 2.0, 0.0), BG.to_array());
        assert_eq!(sample(&raster, &layout, 3.0, 0.0), eye);
        // Square corners are filled.
        assert_eq!(sample(&raster, &layout, -3.3, -3.3), eye);
    }

    #[test]
    fn test_square_eye_hole_is_transparent_without_background() {
        let (raster, layout) = render_eyes(EyeShape::Square, 1.0, false);
        assert_eq!(sample(&raster, &layout, 2.0, 0.0)[3], 0);
        assert_eq!(sample(&raster, &layout, 0.0, 0.0), EYE.to_array());
    }

    #[test]
    fn test_circle_eye_rings() {
        let (raster, layout) = render_eyes(EyeShape::Circle, 1.0, true);
        let eye = EYE.to_array();
        assert_eq!(sample(&raster, &layout, 0.0, 0.0), eye);
        assert_eq!(sample(&raster, &layout, 2.0, 0.0), BG.to_array());
        assert_eq!(sample(&raster, &layout, 3.0, 0.0), eye);
        // Outside the radius-3.5 circle, in the square's corner.
        assert_eq!(sample(&raster, &layout, -3.3, -3.3), BG.to_array());
    }

    #[test]
    fn test_circle_eye_scale_shrinks_rings() {
        let (raster, layout) = render_eyes(EyeShape::Circle, 0.5, true);
        // Outer radius 1.75, hole 1.25, dot 0.75 modules.
        assert_eq!(sample(&raster, &layout, 3.0, 0.0), BG.to_array());
        assert_eq!(sample(&raster, &layout, 1.5, 0.0), EYE.to_array());
        assert_eq!(sample(&raster, &layout, 1.0, 0.0), BG.to_array());
        assert_eq!(sample(&raster, &layout, 0.0, 0.0), EYE.to_array());
    }

    #[test]
    fn test_rounded_eye_rounds_corners_only() {
        let (raster, layout) = render_eyes(EyeShape::Rounded, 1.0, true);
        let eye = EYE.to_array();
        assert_eq!(sample(&raster, &layout, 3.0, 0.0), eye);
        assert_eq!(sample(&raster, &layout, 2.0, 0.0), BG.to_array());
        assert_eq!(sample(&raster, &layout, 0.0, 0.0), eye);
        assert_eq!(sample(&raster, &layout, -3.4, -3.4), BG.to_array());
    }
}
