//! The module grid boundary.
//!
//! The renderer never encodes content itself. It only asks a [`ModuleGrid`]
//! how many modules a side has and which of them are dark.

use crate::error::{RenderError, Result};

/// Smallest symbol the renderer accepts (QR version 1).
pub const MIN_GRID_SIZE: usize = 21;

/// Side length, in modules, of a finder pattern.
pub const FINDER_SIZE: usize = 7;

/// A square grid of dark and light modules.
pub trait ModuleGrid {
    /// Modules per side.
    fn size(&self) -> usize;

    /// Whether the module at `row`, `col` is dark. Out-of-range coordinates are light.
    fn is_dark(&self, row: usize, col: usize) -> bool;
}

impl<G: ModuleGrid + ?Sized> ModuleGrid for &G {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn is_dark(&self, row: usize, col: usize) -> bool {
        (**self).is_dark(row, col)
    }
}

/// Rejects grids with nothing to draw.
pub fn check_grid(grid: &dyn ModuleGrid) -> Result<()> {
    let size = grid.size();
    if size < MIN_GRID_SIZE {
        return Err(RenderError::EmptyModuleGrid { size });
    }
    let any_dark = (0..size).any(|row| (0..size).any(|col| grid.is_dark(row, col)));
    if !any_dark {
        return Err(RenderError::EmptyModuleGrid { size });
    }
    Ok(())
}

/// Top-left `(row, col)` of the three finder patterns: top-left, top-right, bottom-left.
pub fn finder_origins(size: usize) -> [(usize, usize); 3] {
    let far = size.saturating_sub(FINDER_SIZE);
    [(0, 0), (0, far), (far, 0)]
}

/// Whether `row`, `col` falls inside one of the three finder blocks.
pub fn in_finder(size: usize, row: usize, col: usize) -> bool {
    finder_origins(size).iter().any(|&(r0, c0)| {
        (r0..r0 + FINDER_SIZE).contains(&row) && (c0..c0 + FINDER_SIZE).contains(&col)
    })
}

/// An owned, row-major module grid.
///
/// # Example
///
/// ```rust
/// use qrstyle::grid::{BitGrid, ModuleGrid};
///
/// let grid = BitGrid::from_fn(21, |row, col| (row + col) % 2 == 0);
/// assert!(grid.is_dark(0, 0));
/// assert!(!grid.is_dark(0, 1));
/// assert!(!grid.is_dark(99, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitGrid {
    size: usize,
    modules: Vec<bool>,
}

impl BitGrid {
    /// Builds a grid from row-major modules. Fails unless `modules` holds `size * size` entries.
    pub fn new(size: usize, modules: Vec<bool>) -> Result<Self> {
        if modules.len() != size * size {
            return Err(RenderError::InvalidConfig(format!(
                "grid of size {size} needs {} modules, got {}",
                size * size,
                modules.len()
            )));
        }
        Ok(BitGrid { size, modules })
    }

    pub fn from_fn(size: usize, f: impl Fn(usize, usize) -> bool) -> Self {
        let modules = (0..size * size).map(|i| f(i / size, i % size)).collect();
        BitGrid { size, modules }
    }

    /// Encodes `content` at error-correction level H, the level the logo
    /// overlay is designed around.
    #[cfg(feature = "encode")]
    pub fn encode(content: &str) -> Result<Self> {
        use qrcode::{Color, EcLevel, QrCode};

        let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::H)?;
        let size = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|color| color == Color::Dark)
            .collect();
        let grid = Self::new(size, modules)?;
        log::debug!(
            "encoded {} bytes into a {size}x{size} grid, {} dark",
            content.len(),
            grid.dark_count()
        );
        Ok(grid)
    }

    /// Number of dark modules.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&dark| dark).count()
    }
}

impl ModuleGrid for BitGrid {
    fn size(&self) -> usize {
        self.size
    }

    fn is_dark(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.modules[row * self.size + col]
    }
}
