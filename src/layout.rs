//! Pixel geometry of a styled QR code.
//!
//! Everything here is derived from a [`StyleConfig`] and a scale factor only;
//! the module grid never changes the canvas size.

use crate::config::{FrameStyle, LabelPosition, StyleConfig};

/// Symbol body side at scale 1.0.
pub const SYMBOL_SIZE: f64 = 400.0;
/// Quiet zone around the symbol at scale 1.0.
pub const QUIET_ZONE: f64 = 40.0;
/// Label band height as a multiple of the font size.
pub const LABEL_BAND_FACTOR: f64 = 3.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub scale: f64,
    pub symbol_size: f64,
    pub quiet_zone: f64,
    /// Quiet zone plus border padding, between the symbol and the box edge.
    pub total_padding: f64,
    pub border_thickness: f64,
    /// Side of the square box the frame is drawn on.
    pub box_size: f64,
    pub font_size: f64,
    pub label_band_height: f64,
    pub outer_margin: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub box_x: f64,
    pub box_y: f64,
    pub symbol_x: f64,
    pub symbol_y: f64,
}

impl Layout {
    /// Computes the geometry for `config` at `scale`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qrstyle::{Layout, StyleConfig};
    ///
    /// let layout = Layout::compute(&StyleConfig::default(), 1.0);
    /// assert_eq!(layout.canvas_size_px(), (520, 520));
    /// ```
    pub fn compute(config: &StyleConfig, scale: f64) -> Layout {
        let symbol_size = SYMBOL_SIZE * scale;
        let quiet_zone = QUIET_ZONE * scale;
        let total_padding = quiet_zone + config.border_padding * scale;
        let border_thickness = if config.frame_style == FrameStyle::None {
            0.0
        } else {
            config.border_width * scale
        };
        let box_size = symbol_size + 2.0 * total_padding;
        let font_size = config.font_size_px * scale;
        let label_band_height = if config.has_label_band() {
            font_size * LABEL_BAND_FACTOR
        } else {
            0.0
        };
        let outer_margin = config.outer_margin * scale;

        let canvas_width = box_size + 2.0 * border_thickness + 2.0 * outer_margin;
        let canvas_height = canvas_width + label_band_height;

        let box_x = border_thickness + outer_margin;
        let mut box_y = border_thickness + outer_margin;
        if config.label_position == LabelPosition::Top {
            box_y += label_band_height;
        }

        Layout {
            scale,
            symbol_size,
            quiet_zone,
            total_padding,
            border_thickness,
            box_size,
            font_size,
            label_band_height,
            outer_margin,
            canvas_width,
            canvas_height,
            box_x,
            box_y,
            symbol_x: box_x + total_padding,
            symbol_y: box_y + total_padding,
        }
    }

    /// Whole-pixel canvas dimensions.
    ///
    /// The unit-scale extent is rounded first and then scaled, so every
    /// integer scale is an exact multiple of the 1x size.
    pub fn canvas_size_px(&self) -> (u32, u32) {
        let unit = |extent: f64| (extent / self.scale).round();
        let w = (unit(self.canvas_width) * self.scale).round();
        let h = (unit(self.canvas_height) * self.scale).round();
        (w.max(1.0) as u32, h.max(1.0) as u32)
    }

    /// Side of one module for a grid of `module_count` modules.
    pub fn module_size(&self, module_count: usize) -> f64 {
        self.symbol_size / module_count as f64
    }

    pub fn box_center(&self) -> (f64, f64) {
        let half = self.box_size / 2.0;
        (self.box_x + half, self.box_y + half)
    }

    pub fn symbol_center(&self) -> (f64, f64) {
        let half = self.symbol_size / 2.0;
        (self.symbol_x + half, self.symbol_y + half)
    }
}
