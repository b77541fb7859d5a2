use crate::error::{RenderError, Result};
use crate::grid::ModuleGrid;
use crate::pipeline::Renderer;
use crate::raster::RasterImage;
use crate::config::StyleConfig;

use image::ImageFormat;
use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/*---- Export presets ----*/

/// The fixed export sizes offered next to the live preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportScale {
    X1,
    X2,
    X4,
}

impl ExportScale {
    pub const ALL: [ExportScale; 3] = [ExportScale::X1, ExportScale::X2, ExportScale::X4];

    /// The render scale for this preset.
    pub fn factor(self) -> f64 {
        match self {
            ExportScale::X1 => 1.0,
            ExportScale::X2 => 2.0,
            ExportScale::X4 => 4.0,
        }
    }
}

impl fmt::Display for ExportScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.factor() as u32)
    }
}

impl FromStr for ExportScale {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1x" | "1" => Ok(ExportScale::X1),
            "2x" | "2" => Ok(ExportScale::X2),
            "4x" | "4" => Ok(ExportScale::X4),
            other => Err(RenderError::InvalidConfig(format!(
                "unknown export preset {other:?}, expected 1x, 2x or 4x"
            ))),
        }
    }
}

/// Renders the same config at each preset.
///
/// # Example
///
/// ```rust
/// use qrstyle::grid::BitGrid;
/// use qrstyle::helper::{export_presets, ExportScale};
/// use qrstyle::{Renderer, StyleConfig};
///
/// let grid = BitGrid::from_fn(21, |row, col| row % 2 == col % 3);
/// let exports = export_presets(&Renderer::new(), &StyleConfig::default(), &grid, false,
///     &[ExportScale::X1, ExportScale::X2]).unwrap();
/// assert_eq!(exports[1].1.dimensions(), (1040, 1040));
/// ```
pub fn export_presets(
    renderer: &Renderer,
    config: &StyleConfig,
    grid: &dyn ModuleGrid,
    transparent: bool,
    presets: &[ExportScale],
) -> Result<Vec<(ExportScale, RasterImage)>> {
    presets
        .iter()
        .map(|&preset| {
            renderer
                .render(config, grid, preset.factor(), transparent)
                .map(|raster| (preset, raster))
        })
        .collect()
}

/*---- Encoding and saving ----*/

/// Encodes a raster as PNG bytes. Opaque rasters are written without an alpha channel.
pub fn encode_png(raster: &RasterImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut cursor = Cursor::new(&mut bytes);
    if raster.has_alpha() {
        raster.as_image().write_to(&mut cursor, ImageFormat::Png)?;
    } else {
        image::DynamicImage::ImageRgba8(raster.as_image().clone())
            .to_rgb8()
            .write_to(&mut cursor, ImageFormat::Png)?;
    }
    Ok(bytes)
}

/// Saves a raster as a PNG file and returns its path.
///
/// # Arguments
///
/// * `raster` - The rendered image.
/// * `directory_path` - Optional. Where to save. Defaults to "generated"; created if missing.
/// * `filename` - Optional. File name without extension. Defaults to a millisecond timestamp.
///
/// # Example
///
/// ```no_run
/// use qrstyle::grid::BitGrid;
/// use qrstyle::helper::save_png;
/// use qrstyle::{render, StyleConfig};
///
/// let grid = BitGrid::encode("https://example.com").unwrap();
/// let raster = render(&StyleConfig::default(), &grid, 1.0, false).unwrap();
/// save_png(&raster, Some("images"), Some("qr_code")).unwrap();
/// ```
pub fn save_png(
    raster: &RasterImage,
    directory_path: Option<&str>,
    filename: Option<&str>,
) -> Result<PathBuf> {
    let directory_path = directory_path.unwrap_or("generated");
    let filename = match filename {
        Some(name) => name.to_string(),
        None => {
            let since_the_epoch = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            since_the_epoch.as_millis().to_string()
        }
    };

    // Check if the directory exists, create it if it doesn't
    if !Path::new(directory_path).exists() {
        fs::create_dir_all(directory_path)?;
    }

    let file_path = Path::new(directory_path).join(format!("{filename}.png"));
    fs::write(&file_path, encode_png(raster)?)?;
    log::info!("saved {}x{} image to {}", raster.width(), raster.height(), file_path.display());
    Ok(file_path)
}

/// Encodes `content`, renders it with `config` and saves one PNG per preset.
///
/// Files are named `<filename>@<preset>.png`.
#[cfg(feature = "encode")]
pub fn generate_styled(
    content: &str,
    config: &StyleConfig,
    renderer: &Renderer,
    presets: &[ExportScale],
    transparent: bool,
    directory: Option<&str>,
    filename: &str,
) -> Result<Vec<PathBuf>> {
    let grid = crate::grid::BitGrid::encode(content)?;
    export_presets(renderer, config, &grid, transparent, presets)?
        .iter()
        .map(|(preset, raster)| save_png(raster, directory, Some(&format!("{filename}@{preset}"))))
        .collect()
}

/*---- Console preview ----*/

/// Renders a grid as text, two characters per module, with a 4-module border.
pub fn grid_to_string(grid: &dyn ModuleGrid) -> String {
    let border: i64 = 4;
    let size = grid.size() as i64;
    let mut result = String::new();
    for y in -border..size + border {
        for x in -border..size + border {
            let dark = x >= 0 && y >= 0 && grid.is_dark(y as usize, x as usize);
            result.push_str(if dark { "██" } else { "  " });
        }
        result.push('\n');
    }
    result
}

/// Prints the given grid to the console.
pub fn print_grid(grid: &dyn ModuleGrid) {
    println!("{}", grid_to_string(grid));
}
