//! imgs2pdf Library
//!
//! Combines a list of images into a single PDF whose pages all share one size:
//! the widest image width by the tallest image height.
//! This library provides functionality to:
//! - Collect image paths and an output name from an interactive prompt
//! - Validate paths and probe image dimensions
//! - Compute a uniform page size and fit each image onto it
//! - Embed images and assemble the PDF
//!
//! # Example
//!
//! ```no_run
//! use imgs2pdf::convert::{create_pdf, ConvertOptions};
//! use std::path::PathBuf;
//!
//! let options = ConvertOptions {
//!     image_paths: vec![PathBuf::from("scan1.png"), PathBuf::from("scan2.jpg")],
//!     output_dir: PathBuf::from("output"),
//!     output_name: "scans.pdf".to_string(),
//! };
//!
//! let report = create_pdf(&options).expect("Failed to create PDF");
//! println!("{} pages", report.page_count);
//! ```

pub mod error;
pub mod input;
pub mod probe;
pub mod frames;
pub mod layout;
pub mod pdf;
pub mod convert;

// Re-export commonly used items
pub use error::{Error, Result};
