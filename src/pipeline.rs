//! The render pipeline: validation, logo preparation, then every drawing stage
//! in a fixed back-to-front order over one canvas.

use crate::canvas::Canvas;
use crate::config::StyleConfig;
use crate::error::{RenderError, Result};
use crate::eyes::draw_eyes;
use crate::frame::draw_frame;
use crate::grid::{check_grid, ModuleGrid};
use crate::label::draw_label;
use crate::layout::Layout;
use crate::logo::{draw_logo, PreparedLogo};
use crate::modules::{paint_modules, LogoZone};
use crate::raster::RasterImage;
use crate::text::FontBook;

/// What to do when the logo cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogoPolicy {
    /// Fail the whole render.
    #[default]
    Strict,
    /// Render without the logo and log a warning.
    BestEffort,
}

/// One drawing step. Stages run in [`Stage::ORDER`], back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Background,
    Modules,
    Eyes,
    Logo,
    Frame,
    Label,
}

impl Stage {
    pub const ORDER: [Stage; 6] = [
        Stage::Background,
        Stage::Modules,
        Stage::Eyes,
        Stage::Logo,
        Stage::Frame,
        Stage::Label,
    ];
}

/// Everything a stage reads. Nothing in here is mutated while drawing.
struct RenderPass<'a> {
    config: &'a StyleConfig,
    layout: Layout,
    grid: &'a dyn ModuleGrid,
    transparent: bool,
    logo: Option<PreparedLogo>,
    fonts: &'a FontBook,
}

impl RenderPass<'_> {
    fn draw(&self, stage: Stage, canvas: &mut Canvas) -> Result<()> {
        let module_count = self.grid.size();
        match stage {
            Stage::Background => {
                if !self.transparent {
                    canvas.fill_color(self.config.background_color);
                }
            }
            Stage::Modules => {
                let zone = self
                    .logo
                    .as_ref()
                    .map(|_| LogoZone::new(module_count, self.config.logo_size_fraction));
                paint_modules(canvas, self.config, &self.layout, self.grid, zone);
            }
            Stage::Eyes => draw_eyes(canvas, self.config, &self.layout, module_count),
            Stage::Logo => {
                if let Some(logo) = &self.logo {
                    draw_logo(canvas, self.config, &self.layout, module_count, logo);
                }
            }
            Stage::Frame => draw_frame(canvas, self.config, &self.layout),
            Stage::Label => draw_label(canvas, self.config, &self.layout, self.fonts)?,
        }
        Ok(())
    }
}

/// Renders styled QR codes. Holds only read-only state, so one renderer can
/// serve any number of threads at once.
///
/// # Example
///
/// ```rust
/// use qrstyle::{grid::BitGrid, Renderer, StyleConfig};
///
/// let grid = BitGrid::from_fn(21, |row, col| (row * col) % 3 == 0);
/// let raster = Renderer::new().render(&StyleConfig::default(), &grid, 1.0, false).unwrap();
/// assert_eq!(raster.dimensions(), (520, 520));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    fonts: FontBook,
    logo_policy: LogoPolicy,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fonts(mut self, fonts: FontBook) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_logo_policy(mut self, policy: LogoPolicy) -> Self {
        self.logo_policy = policy;
        self
    }

    /// Renders `grid` styled by `config` at `scale` (1.0 draws a 400px symbol).
    ///
    /// With `transparent` set, everything not covered by a module, eye, logo,
    /// frame or label is left fully transparent.
    ///
    /// # Errors
    ///
    /// Fails before anything is drawn on an invalid config or scale, a grid
    /// with nothing to draw, or (under [`LogoPolicy::Strict`]) a logo that
    /// cannot be decoded.
    pub fn render(
        &self,
        config: &StyleConfig,
        grid: &dyn ModuleGrid,
        scale: f64,
        transparent: bool,
    ) -> Result<RasterImage> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "scale must be positive, got {scale}"
            )));
        }
        config.validate()?;
        check_grid(grid)?;

        let logo = match config.logo_image.as_ref().map(PreparedLogo::prepare) {
            None => None,
            Some(Ok(logo)) => Some(logo),
            Some(Err(err)) if self.logo_policy == LogoPolicy::BestEffort => {
                log::warn!("rendering without logo: {err}");
                None
            }
            Some(Err(err)) => return Err(err),
        };

        let layout = Layout::compute(config, scale);
        let (width, height) = layout.canvas_size_px();
        log::debug!(
            "rendering {0}x{0} grid into {width}x{height} at scale {scale}",
            grid.size()
        );

        let pass = RenderPass {
            config,
            layout,
            grid,
            transparent,
            logo,
            fonts: &self.fonts,
        };
        let mut canvas = Canvas::new(width, height)?;
        for stage in Stage::ORDER {
            log::trace!("stage {stage:?}");
            pass.draw(stage, &mut canvas)?;
        }

        let has_alpha = transparent || !config.background_color.is_opaque();
        canvas.into_raster(has_alpha)
    }
}

/// Renders with a default [`Renderer`]: built-in label face, strict logo decoding.
///
/// # Example
///
/// ```rust
/// use qrstyle::{grid::BitGrid, render, StyleConfig};
///
/// let grid = BitGrid::from_fn(21, |row, col| (row + col) % 2 == 0);
/// let raster = render(&StyleConfig::default(), &grid, 2.0, true).unwrap();
/// assert_eq!(raster.dimensions(), (1040, 1040));
/// assert!(raster.has_alpha());
/// ```
pub fn render(
    config: &StyleConfig,
    grid: &dyn ModuleGrid,
    scale: f64,
    transparent: bool,
) -> Result<RasterImage> {
    Renderer::new().render(config, grid, scale, transparent)
}
