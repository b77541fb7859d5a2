use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use qrstyle::grid::BitGrid;
use qrstyle::helper::{generate_styled, print_grid, save_png, ExportScale};
use qrstyle::{FontBook, LogoImage, LogoPolicy, ModuleGrid, Renderer, StyleConfig};
use std::fs;
use std::path::PathBuf;

/// Render a styled QR code to PNG
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON style config (camelCase keys, every key optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content to encode; overrides the config's `url`
    #[arg(long)]
    content: Option<String>,

    /// Logo image file (PNG, JPEG, ...)
    #[arg(long)]
    logo: Option<PathBuf>,

    /// TrueType/OpenType font for the label, registered under the config's font family
    #[arg(long)]
    font: Option<PathBuf>,

    /// Render scale when no preset is given
    #[arg(short, long, default_value = "1.0")]
    scale: f64,

    /// Export preset (1x, 2x or 4x); repeat for several files
    #[arg(short, long)]
    preset: Vec<ExportScale>,

    /// Leave the background transparent
    #[arg(short, long)]
    transparent: bool,

    /// Skip a logo that cannot be decoded instead of failing
    #[arg(long)]
    best_effort_logo: bool,

    /// Print the module grid to the console
    #[arg(long)]
    preview: bool,

    /// Directory to write images into
    #[arg(short, long, default_value = "generated")]
    output_dir: String,

    /// File name without extension; defaults to a timestamp
    #[arg(short, long)]
    name: Option<String>,
}

fn load_config(args: &Args) -> Result<StyleConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            StyleConfig::from_json_str(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => StyleConfig::default(),
    };
    if let Some(content) = &args.content {
        config.url = content.clone();
    }
    if let Some(path) = &args.logo {
        let bytes = fs::read(path).with_context(|| format!("reading logo {}", path.display()))?;
        config = config.with_logo(LogoImage::from_bytes(bytes));
    }
    Ok(config)
}

fn build_renderer(args: &Args, config: &StyleConfig) -> Result<Renderer> {
    let mut fonts = FontBook::new();
    if let Some(path) = &args.font {
        let bytes = fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
        fonts.register(&config.font_family, config.font_weight, config.font_style, bytes)?;
    }
    let policy = if args.best_effort_logo {
        LogoPolicy::BestEffort
    } else {
        LogoPolicy::Strict
    };
    Ok(Renderer::new().with_fonts(fonts).with_logo_policy(policy))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = load_config(&args)?;
    if config.url.is_empty() {
        bail!("nothing to encode: pass --content or set `url` in the config");
    }
    let renderer = build_renderer(&args, &config)?;

    let grid = BitGrid::encode(&config.url).context("encoding content")?;
    info!(
        "encoded {:?} into a {}x{} grid ({} dark modules)",
        config.url,
        grid.size(),
        grid.size(),
        grid.dark_count()
    );
    if args.preview {
        print_grid(&grid);
    }

    let dir = Some(args.output_dir.as_str());
    if args.preset.is_empty() {
        let raster = renderer.render(&config, &grid, args.scale, args.transparent)?;
        let path = save_png(&raster, dir, args.name.as_deref())?;
        println!("{}", path.display());
        return Ok(());
    }

    let base = args.name.clone().unwrap_or_else(|| "qrstyle".to_string());
    let paths = generate_styled(
        &config.url,
        &config,
        &renderer,
        &args.preset,
        args.transparent,
        dir,
        &base,
    )?;
    for path in paths {
        println!("{}", path.display());
    }
    Ok(())
}
