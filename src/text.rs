//! Text faces for labels.
//!
//! Outline fonts are registered in a [`FontBook`] under a family name, weight
//! and style. When a label asks for a family nobody registered, it is set in
//! the built-in 8x8 bitmap face instead, so a label always renders.

use std::collections::HashMap;

use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use tiny_skia::{FillRule, PathBuilder};

use crate::canvas::{self, Canvas};
use crate::config::{FontStyle, FontWeight, Rgba};
use crate::error::{RenderError, Result};

/// Rows and columns in a bitmap glyph.
const BITMAP_CELLS: f32 = 8.0;
/// Horizontal shift per row, in cells, of the synthetic italic.
const ITALIC_SLANT: f32 = 0.2;

/// Width and height of a line of text, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub height: f32,
}

/// Registered outline fonts, keyed by lowercase family, weight and style.
#[derive(Clone, Default)]
pub struct FontBook {
    faces: HashMap<(String, FontWeight, FontStyle), FontArc>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.faces.keys().collect();
        keys.sort_by(|a, b| a.0.cmp(&b.0));
        f.debug_struct("FontBook").field("faces", &keys).finish()
    }
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a TrueType/OpenType font for one family, weight and style.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidFont`] if `bytes` cannot be parsed.
    pub fn register(
        &mut self,
        family: &str,
        weight: FontWeight,
        style: FontStyle,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| RenderError::InvalidFont(format!("{family}: {e}")))?;
        log::debug!("registered font face {family} {weight:?} {style:?}");
        self.faces.insert((family.to_lowercase(), weight, style), font);
        Ok(())
    }

    pub fn has_family(&self, family: &str) -> bool {
        let family = family.to_lowercase();
        self.faces.keys().any(|(f, _, _)| *f == family)
    }

    /// The best face for a request: the exact face, the family's regular face,
    /// or the built-in bitmap face with synthetic weight and style.
    pub fn face(&self, family: &str, weight: FontWeight, style: FontStyle) -> Face<'_> {
        let family = family.to_lowercase();
        self.faces
            .get(&(family.clone(), weight, style))
            .or_else(|| self.faces.get(&(family, FontWeight::Normal, FontStyle::Normal)))
            .map(Face::Outline)
            .unwrap_or(Face::Builtin {
                bold: weight == FontWeight::Bold,
                italic: style == FontStyle::Italic,
            })
    }
}

/// A face ready to measure and draw text.
#[derive(Clone, Copy)]
pub enum Face<'a> {
    Outline(&'a FontArc),
    Builtin { bold: bool, italic: bool },
}

impl Face<'_> {
    pub fn measure(&self, text: &str, size: f32) -> TextMetrics {
        match *self {
            Face::Outline(font) => {
                let scaled = font.as_scaled(PxScale::from(size));
                let mut width = 0.0;
                let mut previous: Option<GlyphId> = None;
                for c in text.chars() {
                    let id = scaled.glyph_id(c);
                    if let Some(prev) = previous {
                        width += scaled.kern(prev, id);
                    }
                    width += scaled.h_advance(id);
                    previous = Some(id);
                }
                TextMetrics {
                    width,
                    height: scaled.ascent() - scaled.descent(),
                }
            }
            Face::Builtin { bold, .. } => {
                let count = text.chars().count() as f32;
                let extra = if bold && count > 0.0 { size / BITMAP_CELLS } else { 0.0 };
                TextMetrics {
                    width: count * size + extra,
                    height: size,
                }
            }
        }
    }

    /// Draws `text` with its top-left corner at `x`, `top`.
    pub fn draw(
        &self,
        canvas: &mut Canvas,
        text: &str,
        size: f32,
        x: f32,
        top: f32,
        color: Rgba,
    ) -> Result<()> {
        match *self {
            Face::Outline(font) => draw_outline(canvas, font, text, size, x, top, color),
            Face::Builtin { bold, italic } => {
                draw_bitmap(canvas, text, size, x, top, color, bold, italic);
                Ok(())
            }
        }
    }
}

fn bitmap_glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

#[allow(clippy::too_many_arguments)]
fn draw_bitmap(
    canvas: &mut Canvas,
    text: &str,
    size: f32,
    x: f32,
    top: f32,
    color: Rgba,
    bold: bool,
    italic: bool,
) {
    let cell = size / BITMAP_CELLS;
    let cell_width = if bold { cell * 2.0 } else { cell };

    let mut pb = PathBuilder::new();
    for (i, c) in text.chars().enumerate() {
        let origin = x + i as f32 * size;
        for (row, &bits) in bitmap_glyph(c).iter().enumerate() {
            let slant = if italic {
                (BITMAP_CELLS - row as f32 - 0.5) * ITALIC_SLANT * cell
            } else {
                0.0
            };
            let y = top + row as f32 * cell;
            for bit in 0..8 {
                if bits & (1u8 << bit) == 0 {
                    continue;
                }
                let cx = origin + bit as f32 * cell + slant;
                if let Some(rect) = canvas::rect(cx, y, cell_width, cell) {
                    pb.push_rect(rect);
                }
            }
        }
    }
    if let Some(path) = pb.finish() {
        canvas.fill_path(&path, &canvas::solid(color), FillRule::Winding);
    }
}

fn draw_outline(
    canvas: &mut Canvas,
    font: &FontArc,
    text: &str,
    size: f32,
    x: f32,
    top: f32,
    color: Rgba,
) -> Result<()> {
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);
    let baseline = top + scaled.ascent();
    let (width, height) = (canvas.width() as i32, canvas.height() as i32);

    let mut mask = canvas.new_mask()?;
    let coverage = mask.data_mut();
    let mut caret = x;
    let mut previous: Option<GlyphId> = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, baseline));
        caret += scaled.h_advance(id);
        previous = Some(id);

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, cov| {
            let px = bounds.min.x as i32 + gx as i32;
            let py = bounds.min.y as i32 + gy as i32;
            if px < 0 || py < 0 || px >= width || py >= height {
                return;
            }
            let idx = (py * width + px) as usize;
            let value = (cov.clamp(0.0, 1.0) * 255.0).round() as u8;
            coverage[idx] = coverage[idx].max(value);
        });
    }
    canvas.fill_mask(&mask, color);
    Ok(())
}
