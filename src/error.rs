//! Error types for the rendering pipeline

use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while rendering or exporting a styled QR code.
///
/// Every error aborts the render it came from; no partially drawn raster is
/// ever handed back alongside one.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A config value or the requested scale is outside its documented range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The supplied logo bytes could not be turned into pixels
    #[error("Logo could not be decoded: {0}")]
    LogoDecodeFailure(String),

    /// The module grid is too small or has nothing to draw
    #[error("Module grid is empty (size {size}, need at least 21 with one dark module)")]
    EmptyModuleGrid { size: usize },

    /// The raster target could not be allocated
    #[error("Cannot allocate a {width}x{height} canvas")]
    CanvasAllocation { width: u32, height: u32 },

    /// Font bytes handed to a `FontBook` are not a usable font
    #[error("Invalid font: {0}")]
    InvalidFont(String),

    /// Encoding the finished raster failed
    #[error("Export failed: {0}")]
    Export(#[from] image::ImageError),

    /// Filesystem error while saving an export
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Content did not fit in any QR symbol version
    #[cfg(feature = "encode")]
    #[error("Content could not be encoded: {0}")]
    Encode(String),
}

#[cfg(feature = "encode")]
impl From<qrcode::types::QrError> for RenderError {
    fn from(err: qrcode::types::QrError) -> Self {
        RenderError::Encode(err.to_string())
    }
}
