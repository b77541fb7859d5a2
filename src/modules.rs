//! Module painter: every dark data module, in a solid color or a gradient.

use tiny_skia::{FillRule, GradientStop, LinearGradient, Paint, PathBuilder, Point, RadialGradient, Shader, SpreadMode, Transform};

use crate::canvas::{self, Canvas};
use crate::config::{GradientKind, StyleConfig};
use crate::grid::{in_finder, ModuleGrid};
use crate::layout::Layout;

/// Extra width and height given to every module so neighbours overlap
/// instead of leaving anti-aliased seams.
pub const MODULE_OVERDRAW: f64 = 0.5;

/// The square, in module units, the logo keeps clear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoZone {
    pub start: f64,
    pub side: f64,
}

impl LogoZone {
    /// Centered on a grid of `module_count` modules, `fraction` of its span wide.
    pub fn new(module_count: usize, fraction: f64) -> Self {
        let side = module_count as f64 * fraction;
        LogoZone {
            start: (module_count as f64 - side) / 2.0,
            side,
        }
    }

    /// Whether the center of cell `row`, `col` lies inside the zone.
    pub fn contains_cell(&self, row: usize, col: usize) -> bool {
        let end = self.start + self.side;
        let inside = |i: usize| {
            let center = i as f64 + 0.5;
            center >= self.start && center < end
        };
        inside(row) && inside(col)
    }
}

/// Cells the painter fills: dark, outside the finders, outside the logo zone.
pub fn painted_cells<'a>(
    grid: &'a dyn ModuleGrid,
    logo_zone: Option<LogoZone>,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    let size = grid.size();
    (0..size)
        .flat_map(move |row| (0..size).map(move |col| (row, col)))
        .filter(move |&(row, col)| {
            grid.is_dark(row, col)
                && !in_finder(size, row, col)
                && !logo_zone.is_some_and(|zone| zone.contains_cell(row, col))
        })
}

/// The paint for data modules: solid, or a gradient across the symbol.
pub fn module_paint(config: &StyleConfig, layout: &Layout) -> Paint<'static> {
    let mut paint = canvas::solid(config.module_color);
    if !config.use_gradient {
        return paint;
    }

    let stops = vec![
        GradientStop::new(0.0, config.gradient_start.to_skia()),
        GradientStop::new(1.0, config.gradient_end.to_skia()),
    ];
    let x = layout.symbol_x as f32;
    let y = layout.symbol_y as f32;
    let size = layout.symbol_size as f32;
    let shader: Option<Shader<'static>> = match config.gradient_kind {
        GradientKind::Linear => LinearGradient::new(
            Point::from_xy(x, y),
            Point::from_xy(x + size, y + size),
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        ),
        GradientKind::Radial => {
            let center = Point::from_xy(x + size / 2.0, y + size / 2.0);
            let radius = size / 2.0 * std::f32::consts::SQRT_2;
            RadialGradient::new(center, center, radius, stops, SpreadMode::Pad, Transform::identity())
        }
    };
    match shader {
        Some(shader) => paint.shader = shader,
        None => log::warn!("degenerate module gradient, falling back to the solid module color"),
    }
    paint
}

/// Fills every painted cell in one pass.
pub fn paint_modules(
    canvas: &mut Canvas,
    config: &StyleConfig,
    layout: &Layout,
    grid: &dyn ModuleGrid,
    logo_zone: Option<LogoZone>,
) {
    let module = layout.module_size(grid.size());
    let side = (module + MODULE_OVERDRAW) as f32;

    let mut pb = PathBuilder::new();
    let mut count = 0usize;
    for (row, col) in painted_cells(grid, logo_zone) {
        let x = layout.symbol_x + col as f64 * module;
        let y = layout.symbol_y + row as f64 * module;
        if let Some(cell) = canvas::rect(x as f32, y as f32, side, side) {
            pb.push_rect(cell);
            count += 1;
        }
    }
    log::debug!("painting {count} modules of {module:.3}px");

    if let Some(path) = pb.finish() {
        canvas.fill_path(&path, &module_paint(config, layout), FillRule::Winding);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rgba;
    use crate::grid::{BitGrid, FINDER_SIZE};

    #[test]
    fn test_finders_are_never_painted() {
        let grid = BitGrid::from_fn(21, |_, _| true);
        let cells: Vec<_> = painted_cells(&grid, None).collect();
        assert_eq!(cells.len(), 21 * 21 - 3 * FINDER_SIZE * FINDER_SIZE);
        assert!(cells.iter().all(|&(r, c)| !in_finder(21, r, c)));
    }

    #[test]
    fn test_logo_zone_cells_are_never_painted() {
        let grid = BitGrid::from_fn(29, |_, _| true);
        let zone = LogoZone::new(29, 0.2);
        assert!((zone.side - 5.8).abs() < 1e-9);
        for (row, col) in painted_cells(&grid, Some(zone)) {
            let (cx, cy) = (col as f64 + 0.5, row as f64 + 0.5);
            let end = zone.start + zone.side;
            assert!(!(cx >= zone.start && cx < end && cy >= zone.start && cy < end));
        }
        // The middle module is dark but owned by the logo.
        assert!(!painted_cells(&grid, Some(zone)).any(|cell| cell == (14, 14)));
        assert!(painted_cells(&grid, None).any(|cell| cell == (14, 14)));
    }

    #[test]
    fn test_light_cells_are_skipped() {
        let grid = BitGrid::from_fn(21, |row, col| row == 10 && col == 12);
        let cells: Vec<_> = painted_cells(&grid, None).collect();
        assert_eq!(cells, vec![(10, 12)]);
    }

    #[test]
    fn test_module_pixels_use_module_color() {
        let config = StyleConfig {
            module_color: Rgba::rgb(200, 10, 10),
            ..Default::default()
        };
        let layout = Layout::compute(&config, 1.0);
        let grid = BitGrid::from_fn(21, |row, col| row == 10 && col == 10);
        let (w, h) = layout.canvas_size_px();
        let mut canvas = Canvas::new(w, h).unwrap();
        paint_modules(&mut canvas, &config, &layout, &grid, None);
        let raster = canvas.into_raster(true).unwrap();

        let module = layout.module_size(21);
        let center = (layout.symbol_x + 10.5 * module) as u32;
        assert_eq!(raster.pixel(center, center), [200, 10, 10, 255]);
        // The neighbouring module stays empty.
        let next = (layout.symbol_x + 11.5 * module) as u32;
        assert_eq!(raster.pixel(next, center)[3], 0);
    }

    #[test]
    fn test_gradient_runs_corner_to_corner() {
        let config = StyleConfig {
            use_gradient: true,
            gradient_start: Rgba::rgb(255, 0, 0),
            gradient_end: Rgba::rgb(0, 0, 255),
            ..Default::default()
        };
        let layout = Layout::compute(&config, 1.0);
        let grid = BitGrid::from_fn(21, |_, _| true);
        let (w, h) = layout.canvas_size_px();
        let mut canvas = Canvas::new(w, h).unwrap();
        paint_modules(&mut canvas, &config, &layout, &grid, None);
        let raster = canvas.into_raster(true).unwrap();

        let module = layout.module_size(21);
        // Top-left data module (just right of the top-left finder) is mostly red,
        // the bottom-right module mostly blue.
        let near = (layout.symbol_x + 8.5 * module) as u32;
        let far = (layout.symbol_x + 20.5 * module) as u32;
        let [r0, _, b0, _] = raster.pixel(near, (layout.symbol_y + 0.5 * module) as u32);
        let [r1, _, b1, _] = raster.pixel(far, far);
        assert!(r0 > b0);
        assert!(b1 > r1);
    }

    #[test]
    fn test_radial_gradient_runs_center_to_corner() {
        let config = StyleConfig {
            use_gradient: true,
            gradient_kind: GradientKind::Radial,
            gradient_start: Rgba::rgb(255, 0, 0),
            gradient_end: Rgba::rgb(0, 0, 255),
            ..Default::default()
        };
        let layout = Layout::compute(&config, 1.0);
        let grid = BitGrid::from_fn(21, |_, _| true);
        let (w, h) = layout.canvas_size_px();
        let mut canvas = Canvas::new(w, h).unwrap();
        paint_modules(&mut canvas, &config, &layout, &grid, None);
        let raster = canvas.into_raster(true).unwrap();

        let (cx, cy) = layout.symbol_center();
        let [r, _, b, a] = raster.pixel(cx as u32, cy as u32);
        assert_eq!(a, 255);
        assert!(r >= 245 && b <= 10, "center is {r},{b}");

        // The bottom-right module sits 95% of the way out to the half-diagonal.
        let module = layout.module_size(21);
        let far = (layout.symbol_x + 20.5 * module) as u32;
        let [r, _, b, _] = raster.pixel(far, far);
        assert!(b >= 215 && r <= 40, "corner is {r},{b}");

        // Halfway along an edge is a mix of both stops.
        let edge = (layout.symbol_y + 20.5 * module) as u32;
        let [r, _, b, _] = raster.pixel(cx as u32, edge);
        assert!(r > 40 && b > 100, "edge is {r},{b}");
    }
}
