//! Error types for the imgs2pdf library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the imgs2pdf library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Multi-page TIFF decoding error
    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Path exists but is not a regular file
    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// No image paths were given
    #[error("No image paths provided.")]
    NoInputs,

    /// Every given path was skipped during validation
    #[error("No valid image files found.")]
    NoValidImages,

    /// No image dimensions could be read
    #[error("Could not determine image dimensions.")]
    UnknownDimensions,

    /// Asked to build a PDF with no pages
    #[error("Cannot build a PDF from an empty image list")]
    EmptyImageList,

    /// Malformed image data that the decoder accepted but we cannot embed
    #[error("Invalid image {}: {reason}", .path.display())]
    InvalidImage { path: PathBuf, reason: String },

    /// General error
    #[error("{0}")]
    General(String),
}
