//! # qrstyle
//!
//! A Rust library for rendering styled QR codes into raster images.
//!
//! `qrstyle` takes a square grid of dark/light modules (from any encoder) and a
//! [`StyleConfig`], and composes a single RGBA image: background, modules with an
//! optional gradient, restyled finder "eyes", a centered logo, a decorative frame
//! and a text label, drawn back to front in that order. The same config renders
//! at any scale, so a small preview and a 4x export differ only in size.
//!
//! ## Features
//!
//! - Solid, linear or radial gradient module fills.
//! - Square, circle and rounded finder eyes in their own color.
//! - Centered logos on a white plate, with the modules beneath left clear.
//! - Box, rounded, circle and corner-bracket frames.
//! - Labels above, below or over the symbol, with rectangle, rounded, pill,
//!   callout and full-width badges.
//! - Transparent or opaque output; deterministic pixels for a given input.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qrstyle = "0.1" # Replace with the latest version
//! ```
//!
//! The default `encode` feature pulls in the `qrcode` crate so that
//! [`grid::BitGrid::encode`] can turn text into a grid. Without it, bring your
//! own encoder and implement [`ModuleGrid`] for its output.
//!
//! ## Example
//!
//! Render a framed, labelled code at twice the base size:
//!
//! ```rust
//! use qrstyle::{grid::BitGrid, render, FrameStyle, LabelPosition, StyleConfig};
//!
//! let grid = BitGrid::from_fn(25, |row, col| (row * 3 + col) % 4 == 0);
//! let config = StyleConfig {
//!     frame_style: FrameStyle::Rounded,
//!     label: "SCAN ME".into(),
//!     label_position: LabelPosition::Bottom,
//!     ..Default::default()
//! };
//! let raster = render(&config, &grid, 2.0, false).unwrap();
//! assert_eq!(raster.width(), 1040);
//! ```
//!
//! Work out the canvas size before rendering:
//!
//! ```rust
//! use qrstyle::{Layout, StyleConfig};
//!
//! let layout = Layout::compute(&StyleConfig::default(), 1.0);
//! assert_eq!(layout.canvas_size_px(), (520, 520));
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Style configuration, colors and JSON (de)serialization.
//! - [`grid`]: The module grid abstraction and a bit-packed implementation.
//! - [`layout`]: Canvas geometry for a config and scale.
//! - [`pipeline`]: The renderer and its drawing stages.
//! - [`helper`]: PNG export, scale presets and console preview.

#![forbid(unsafe_code)]

mod canvas;
pub mod config;
pub mod error;
pub mod eyes;
pub mod frame;
pub mod grid;
pub mod helper;
pub mod label;
pub mod layout;
pub mod logo;
pub mod modules;
pub mod pipeline;
pub mod raster;
pub mod text;

pub use config::{
    EyeShape, FontStyle, FontWeight, FrameStyle, GradientKind, LabelPosition, LabelShape,
    LogoShape, Rgba, StyleConfig,
};
pub use error::{RenderError, Result};
pub use grid::ModuleGrid;
pub use layout::Layout;
pub use logo::LogoImage;
pub use pipeline::{render, LogoPolicy, Renderer, Stage};
pub use raster::RasterImage;
pub use text::FontBook;
