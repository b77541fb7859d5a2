//! Frame renderer: an optional stroked border around the quiet-zone box.

use tiny_skia::{Path, PathBuilder};

use crate::canvas::{self, Canvas};
use crate::config::{FrameStyle, StyleConfig};
use crate::layout::Layout;

/// Corner radius of the rounded frame at scale 1.0.
pub const ROUNDED_FRAME_RADIUS: f64 = 30.0;
/// Leg length of each corner bracket at scale 1.0.
pub const CORNER_LEG: f64 = 50.0;

/// The outline to stroke for `config.frame_style`, or `None` when there is no frame.
pub fn frame_path(config: &StyleConfig, layout: &Layout) -> Option<Path> {
    let x = layout.box_x as f32;
    let y = layout.box_y as f32;
    let size = layout.box_size as f32;
    let scale = layout.scale as f32;

    match config.frame_style {
        FrameStyle::None => None,
        FrameStyle::Box => canvas::rect_path(x, y, size, size),
        FrameStyle::Rounded => {
            canvas::rounded_rect_path(x, y, size, size, ROUNDED_FRAME_RADIUS as f32 * scale)
        }
        FrameStyle::Circle => {
            let (cx, cy) = layout.box_center();
            canvas::circle_path(cx as f32, cy as f32, size / 2.0)
        }
        FrameStyle::Corners => {
            let leg = CORNER_LEG as f32 * scale;
            let radius = (config.frame_corner_radius as f32 * scale).min(leg);
            corner_brackets(x, y, size, leg, radius)
        }
    }
}

/// Four open L-shaped brackets, one per corner of the `size` square at `x`, `y`.
///
/// Each bracket runs leg, arc, leg and is its own subpath, so the stroke
/// never connects neighbouring corners.
fn corner_brackets(x: f32, y: f32, size: f32, leg: f32, radius: f32) -> Option<Path> {
    let (right, bottom) = (x + size, y + size);
    // (corner, direction of the first leg, direction of the second leg)
    let corners = [
        ((x, y), (0.0, 1.0), (1.0, 0.0)),
        ((right, y), (-1.0, 0.0), (0.0, 1.0)),
        ((right, bottom), (0.0, -1.0), (-1.0, 0.0)),
        ((x, bottom), (1.0, 0.0), (0.0, -1.0)),
    ];

    let mut pb = PathBuilder::new();
    for ((cx, cy), (ax, ay), (bx, by)) in corners {
        let start = (cx + ax * leg, cy + ay * leg);
        let arc_start = (cx + ax * radius, cy + ay * radius);
        let arc_end = (cx + bx * radius, cy + by * radius);
        let end = (cx + bx * leg, cy + by * leg);

        pb.move_to(start.0, start.1);
        pb.line_to(arc_start.0, arc_start.1);
        if radius > 0.0 {
            canvas::arc_around(&mut pb, arc_start, (cx, cy), arc_end);
        }
        pb.line_to(end.0, end.1);
    }
    pb.finish()
}

pub fn draw_frame(canvas: &mut Canvas, config: &StyleConfig, layout: &Layout) {
    let Some(path) = frame_path(config, layout) else {
        return;
    };
    let width = (config.border_width * layout.scale) as f32;
    if width <= 0.0 {
        // tiny-skia strokes width 0 as a hairline; no border means no stroke.
        return;
    }
    log::debug!("{:?} frame, stroke {width:.1}px", config.frame_style);
    canvas.stroke_path(&path, config.border_color, width);
}
