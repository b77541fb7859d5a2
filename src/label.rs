//! Label renderer: a line of text with an optional badge behind it.

use tiny_skia::{FillRule, PathBuilder};

use crate::canvas::{self, Canvas};
use crate::config::{LabelPosition, LabelShape, StyleConfig};
use crate::error::Result;
use crate::layout::Layout;
use crate::text::{FontBook, TextMetrics};

/// Horizontal and vertical padding around the text at scale 1.0.
pub const LABEL_PAD_X: f64 = 20.0;
pub const LABEL_PAD_Y: f64 = 12.0;
/// Corner radius of rounded and callout badges at scale 1.0.
pub const LABEL_RADIUS: f64 = 8.0;
/// Half-width (and height) of the callout pointer at scale 1.0.
pub const POINTER_HALF_WIDTH: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Which way a callout pointer points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    /// Hangs below a label that sits above the symbol.
    Down,
    /// Rises above a label that sits below the symbol.
    Up,
}

/// Where the text and its badge go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub text: TextMetrics,
    /// Badge rectangle; `None` for `LabelShape::None`.
    pub background: Option<Rect>,
    pub pointer: Option<Pointer>,
}

/// Vertical center of the label for its position.
pub fn anchor_y(config: &StyleConfig, layout: &Layout) -> f64 {
    match config.label_position {
        LabelPosition::Top => layout.label_band_height / 2.0 + layout.outer_margin,
        LabelPosition::Bottom => layout.box_y + layout.box_size + layout.label_band_height / 2.0,
        LabelPosition::Center => layout.box_center().1,
    }
}

/// Lays out a label whose text measures `text`, on a canvas `canvas_width` pixels wide.
pub fn label_geometry(
    config: &StyleConfig,
    layout: &Layout,
    canvas_width: f64,
    text: TextMetrics,
) -> LabelGeometry {
    let center_x = canvas_width / 2.0;
    let center_y = anchor_y(config, layout);

    let pad_x = LABEL_PAD_X * layout.scale;
    let pad_y = LABEL_PAD_Y * layout.scale;
    let height = text.height as f64 + 2.0 * pad_y;
    let y = center_y - height / 2.0;

    let background = match config.label_shape {
        LabelShape::None => None,
        LabelShape::Full => Some(Rect {
            x: 0.0,
            y,
            width: canvas_width,
            height,
        }),
        _ => {
            let width = text.width as f64 + 2.0 * pad_x;
            Some(Rect {
                x: center_x - width / 2.0,
                y,
                width,
                height,
            })
        }
    };

    let pointer = match (config.label_shape, config.label_position) {
        (LabelShape::Callout, LabelPosition::Top) => Some(Pointer::Down),
        (LabelShape::Callout, LabelPosition::Bottom) => Some(Pointer::Up),
        _ => None,
    };

    LabelGeometry {
        center_x,
        center_y,
        text,
        background,
        pointer,
    }
}

pub fn draw_label(
    canvas: &mut Canvas,
    config: &StyleConfig,
    layout: &Layout,
    fonts: &FontBook,
) -> Result<()> {
    if config.label.is_empty() {
        return Ok(());
    }

    let face = fonts.face(&config.font_family, config.font_weight, config.font_style);
    let size = layout.font_size as f32;
    let metrics = face.measure(&config.label, size);
    let geometry = label_geometry(config, layout, canvas.width() as f64, metrics);
    log::debug!(
        "label {:?} {:?}/{:?} at y={:.1}",
        config.label,
        config.label_position,
        config.label_shape,
        geometry.center_y
    );

    if let Some(bg) = geometry.background {
        let (x, y, w, h) = (bg.x as f32, bg.y as f32, bg.width as f32, bg.height as f32);
        let radius = (LABEL_RADIUS * layout.scale) as f32;
        let mut pb = PathBuilder::new();
        match config.label_shape {
            LabelShape::Rectangle | LabelShape::Full => {
                if let Some(rect) = canvas::rect(x, y, w, h) {
                    pb.push_rect(rect);
                }
            }
            LabelShape::Rounded | LabelShape::Callout => {
                canvas::push_rounded_rect(&mut pb, x, y, w, h, radius);
            }
            LabelShape::Pill => canvas::push_rounded_rect(&mut pb, x, y, w, h, h / 2.0),
            LabelShape::None => {}
        }
        if let Some(pointer) = geometry.pointer {
            let half = (POINTER_HALF_WIDTH * layout.scale) as f32;
            let cx = geometry.center_x as f32;
            let (edge, tip) = match pointer {
                Pointer::Down => (y + h, y + h + half),
                Pointer::Up => (y, y - half),
            };
            pb.move_to(cx - half, edge);
            pb.line_to(cx + half, edge);
            pb.line_to(cx, tip);
            pb.close();
        }
        if let Some(path) = pb.finish() {
            canvas.fill_path(&path, &canvas::solid(config.label_bg_color), FillRule::Winding);
        }
    }

    let x = (geometry.center_x - metrics.width as f64 / 2.0) as f32;
    let top = (geometry.center_y - metrics.height as f64 / 2.0) as f32;
    face.draw(canvas, &config.label, size, x, top, config.label_text_color)
}
