//! Style configuration.
//!
//! A [`StyleConfig`] is an immutable snapshot of everything a user can
//! style on a QR code. It serializes to the same camel-cased JSON the editor
//! stores, and every omitted key falls back to its default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};
use crate::logo::LogoImage;

/// Longest label, in characters, the layout is designed for.
pub const MAX_LABEL_CHARS: usize = 25;

/// Allowed range for [`StyleConfig::logo_size_fraction`].
pub const LOGO_FRACTION_RANGE: (f64, f64) = (0.1, 0.4);

/*---- Colors ----*/

/// An 8-bit RGBA color, serialized as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }

    /// The same color as a `[r, g, b, a]` array, the layout `image` pixels use.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// A color string that is not `#rgb`, `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}, expected #rgb, #rrggbb or #rrggbbaa")]
pub struct ColorParseError(pub String);

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        match hex.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| err())
                };
                Ok(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Rgba::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/*---- Style enums ----*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

/// Shape of the three finder patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EyeShape {
    #[default]
    Square,
    Circle,
    Rounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameStyle {
    #[default]
    None,
    Box,
    Rounded,
    Circle,
    Corners,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    Top,
    #[default]
    Bottom,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelShape {
    #[default]
    None,
    Rectangle,
    Rounded,
    Pill,
    Callout,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoShape {
    None,
    #[default]
    Square,
    Circle,
}

/*---- StyleConfig ----*/

/// Everything that determines how a QR code looks.
///
/// Given the same config, module grid, scale and transparency flag the
/// renderer always produces the same pixels. Lengths are in pixels at
/// scale 1.0.
///
/// # Example
///
/// ```rust
/// use qrstyle::{StyleConfig, FrameStyle};
///
/// let config = StyleConfig::from_json_str(r##"{"frameStyle": "corners", "label": "SCAN ME"}"##).unwrap();
/// assert_eq!(config.frame_style, FrameStyle::Corners);
/// assert_eq!(config.border_padding, 20.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleConfig {
    /// Content handed to the grid provider; the renderer itself never reads it.
    pub url: String,
    pub label: String,

    pub background_color: Rgba,
    pub module_color: Rgba,
    pub use_gradient: bool,
    pub gradient_kind: GradientKind,
    pub gradient_start: Rgba,
    pub gradient_end: Rgba,

    pub eye_color: Rgba,
    pub eye_shape: EyeShape,
    /// Relative to the standard 7x7 finder pattern, in (0, 1].
    pub eye_scale: f64,

    pub frame_style: FrameStyle,
    /// Bracket arc radius, used by the corners frame.
    pub frame_corner_radius: f64,
    pub border_color: Rgba,
    pub border_width: f64,
    /// Gap between the quiet zone and the frame.
    pub border_padding: f64,
    /// Space outside the frame.
    pub outer_margin: f64,

    pub label_position: LabelPosition,
    pub label_shape: LabelShape,
    pub label_text_color: Rgba,
    pub label_bg_color: Rgba,
    pub font_family: String,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub font_size_px: f64,

    #[serde(skip)]
    pub logo_image: Option<LogoImage>,
    /// Logo side as a fraction of the symbol's module span, in [0.1, 0.4].
    pub logo_size_fraction: f64,
    pub logo_bg_color: Rgba,
    pub logo_shape: LogoShape,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            label: String::new(),
            background_color: Rgba::WHITE,
            module_color: Rgba::BLACK,
            use_gradient: false,
            gradient_kind: GradientKind::Linear,
            gradient_start: Rgba::BLACK,
            gradient_end: Rgba::rgb(0x1e, 0x3a, 0x8a),
            eye_color: Rgba::BLACK,
            eye_shape: EyeShape::Square,
            eye_scale: 1.0,
            frame_style: FrameStyle::None,
            frame_corner_radius: 20.0,
            border_color: Rgba::BLACK,
            border_width: 4.0,
            border_padding: 20.0,
            outer_margin: 0.0,
            label_position: LabelPosition::Bottom,
            label_shape: LabelShape::None,
            label_text_color: Rgba::BLACK,
            label_bg_color: Rgba::WHITE,
            font_family: "sans-serif".to_string(),
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            font_size_px: 24.0,
            logo_image: None,
            logo_size_fraction: 0.2,
            logo_bg_color: Rgba::WHITE,
            logo_shape: LogoShape::Square,
        }
    }
}

impl StyleConfig {
    /// Parses a config from the editor's JSON form.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RenderError::InvalidConfig(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| RenderError::InvalidConfig(e.to_string()))
    }

    /// Returns a copy with the given logo attached.
    pub fn with_logo(mut self, logo: LogoImage) -> Self {
        self.logo_image = Some(logo);
        self
    }

    /// Checks every ranged value. Called by the renderer before anything is drawn.
    pub fn validate(&self) -> Result<()> {
        if !(self.eye_scale > 0.0 && self.eye_scale <= 1.0) {
            return Err(invalid(format!("eyeScale must be in (0, 1], got {}", self.eye_scale)));
        }
        let (lo, hi) = LOGO_FRACTION_RANGE;
        if !(lo..=hi).contains(&self.logo_size_fraction) {
            return Err(invalid(format!(
                "logoSizeFraction must be in [{lo}, {hi}], got {}",
                self.logo_size_fraction
            )));
        }
        let label_chars = self.label.chars().count();
        if label_chars > MAX_LABEL_CHARS {
            return Err(invalid(format!(
                "label is {label_chars} characters, at most {MAX_LABEL_CHARS} allowed"
            )));
        }
        let lengths = [
            ("borderWidth", self.border_width),
            ("borderPadding", self.border_padding),
            ("outerMargin", self.outer_margin),
            ("frameCornerRadius", self.frame_corner_radius),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{name} must be a non-negative length, got {value}")));
            }
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(invalid(format!("fontSizePx must be positive, got {}", self.font_size_px)));
        }
        Ok(())
    }

    /// Returns a copy with ranged values pulled into range, for editors that
    /// prefer clamping at acceptance time over rejecting at render time.
    pub fn clamped(&self) -> Self {
        let mut config = self.clone();
        config.eye_scale = if config.eye_scale.is_nan() {
            1.0
        } else {
            config.eye_scale.clamp(0.1, 1.0)
        };
        let (lo, hi) = LOGO_FRACTION_RANGE;
        config.logo_size_fraction = if config.logo_size_fraction.is_nan() {
            0.2
        } else {
            config.logo_size_fraction.clamp(lo, hi)
        };
        if config.label.chars().count() > MAX_LABEL_CHARS {
            config.label = config.label.chars().take(MAX_LABEL_CHARS).collect();
        }
        for length in [
            &mut config.border_width,
            &mut config.border_padding,
            &mut config.outer_margin,
            &mut config.frame_corner_radius,
        ] {
            if !length.is_finite() || *length < 0.0 {
                *length = 0.0;
            }
        }
        if !config.font_size_px.is_finite() || config.font_size_px <= 0.0 {
            config.font_size_px = StyleConfig::default().font_size_px;
        }
        config
    }

    /// True when a label band is reserved above or below the box.
    pub fn has_label_band(&self) -> bool {
        !self.label.is_empty() && self.label_position != LabelPosition::Center
    }
}

fn invalid(message: String) -> RenderError {
    RenderError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colors() {
        assert_eq!("#ff8000".parse::<Rgba>().unwrap(), Rgba::rgb(255, 128, 0));
        assert_eq!("#fff".parse::<Rgba>().unwrap(), Rgba::WHITE);
        assert_eq!("#00000080".parse::<Rgba>().unwrap(), Rgba::rgba(0, 0, 0, 128));
        assert!("ff8000".parse::<Rgba>().is_err());
        assert!("#ff80".parse::<Rgba>().is_err());
        assert!("#gg0000".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_color_display_round_trips_alpha_only_when_needed() {
        assert_eq!(Rgba::rgb(1, 2, 3).to_string(), "#010203");
        assert_eq!(Rgba::rgba(1, 2, 3, 4).to_string(), "#01020304");
    }

    #[test]
    fn test_json_defaults_fill_missing_keys() {
        let config = StyleConfig::from_json_str(
            r##"{"eyeShape": "circle", "labelShape": "callout", "moduleColor": "#112233"}"##,
        )
        .unwrap();
        assert_eq!(config.eye_shape, EyeShape::Circle);
        assert_eq!(config.label_shape, LabelShape::Callout);
        assert_eq!(config.module_color, Rgba::rgb(0x11, 0x22, 0x33));
        assert_eq!(config.frame_style, FrameStyle::None);
        assert_eq!(config.font_size_px, 24.0);
        assert!(config.logo_image.is_none());
    }

    #[test]
    fn test_json_rejects_bad_color() {
        let err = StyleConfig::from_json_str(r#"{"moduleColor": "black"}"#).unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfig(_)));
    }

    #[test]
    fn test_json_serializes_camel_case() {
        let json = StyleConfig::default().to_json_string().unwrap();
        assert!(json.contains("\"logoSizeFraction\""));
        assert!(json.contains("\"backgroundColor\": \"#ffffff\""));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = StyleConfig::default();
        assert!(config.validate().is_ok());

        config.eye_scale = 0.0;
        assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));

        config.eye_scale = 1.0;
        config.logo_size_fraction = 0.5;
        assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));

        config.logo_size_fraction = 0.4;
        config.label = "x".repeat(MAX_LABEL_CHARS + 1);
        assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));

        config.label.clear();
        config.border_width = -1.0;
        assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn test_clamped_is_always_valid() {
        let config = StyleConfig {
            eye_scale: 3.0,
            logo_size_fraction: 0.01,
            label: "y".repeat(40),
            border_width: -2.0,
            font_size_px: f64::NAN,
            ..Default::default()
        };
        let clamped = config.clamped();
        assert!(clamped.validate().is_ok());
        assert_eq!(clamped.eye_scale, 1.0);
        assert_eq!(clamped.logo_size_fraction, 0.1);
        assert_eq!(clamped.label.chars().count(), MAX_LABEL_CHARS);
        assert_eq!(clamped.border_width, 0.0);
        assert_eq!(clamped.font_size_px, 24.0);
    }

    #[test]
    fn test_label_band_only_off_center() {
        let mut config = StyleConfig {
            label: "HELLO".into(),
            ..Default::default()
        };
        assert!(config.has_label_band());
        config.label_position = LabelPosition::Center;
        assert!(!config.has_label_band());
        config.label_position = LabelPosition::Top;
        config.label.clear();
        assert!(!config.has_label_band());
    }
}
