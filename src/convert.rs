//! The image-to-PDF pipeline
//!
//! Validate paths, probe dimensions, size the page to the largest width and
//! height, embed every image and write the result under the output directory.

use std::fs;
use std::path::PathBuf;
use crate::error::{Error, Result};
use crate::layout::PageSize;
use crate::pdf::{DocumentInfo, EmbeddedImage, PdfBuilder};
use crate::probe::{max_dimensions, validate_paths};

/// Directory the PDF is written to unless told otherwise
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Options for converting images into a PDF
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Image paths, in page order
    pub image_paths: Vec<PathBuf>,
    /// Directory the PDF is written into; created if missing
    pub output_dir: PathBuf,
    /// File name of the PDF inside `output_dir`
    pub output_name: String,
}

impl ConvertOptions {
    /// Full path of the PDF to be written
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_name)
    }
}

/// Summary of a successful conversion
#[derive(Debug, Clone)]
pub struct ConvertReport {
    /// Absolute path of the written PDF
    pub output_path: PathBuf,
    /// Number of pages written; multi-frame images add one page per frame
    pub page_count: usize,
    /// Size shared by every page, in points
    pub page_size: PageSize,
    /// Number of input paths skipped during validation
    pub skipped: usize,
}

/// Create a PDF from image paths with page size matching the max dimensions
///
/// # Example
///
/// ```no_run
/// use imgs2pdf::convert::{create_pdf, ConvertOptions};
/// use std::path::PathBuf;
///
/// let options = ConvertOptions {
///     image_paths: vec![PathBuf::from("page1.png")],
///     output_dir: PathBuf::from("output"),
///     output_name: "untitled.pdf".to_string(),
/// };
///
/// create_pdf(&options).expect("Failed to create PDF");
/// ```
pub fn create_pdf(options: &ConvertOptions) -> Result<ConvertReport> {
    if options.image_paths.is_empty() {
        return Err(Error::NoInputs);
    }

    let valid_paths = validate_paths(&options.image_paths);
    if valid_paths.is_empty() {
        return Err(Error::NoValidImages);
    }
    let skipped = options.image_paths.len() - valid_paths.len();

    log::info!("Analyzing image dimensions...");
    let (max_width, max_height) = max_dimensions(&valid_paths);
    if max_width == 0 || max_height == 0 {
        return Err(Error::UnknownDimensions);
    }
    log::info!("Maximum dimensions: {} x {} pixels", max_width, max_height);

    let page_size = PageSize::from_pixels(max_width, max_height);

    fs::create_dir_all(&options.output_dir)?;
    let output_path = options.output_path();
    log::info!("Creating PDF: {}", options.output_name);

    let mut builder = PdfBuilder::new(page_size, DocumentInfo::default());
    for path in &valid_paths {
        let frames = EmbeddedImage::load_frames(path).map_err(|e| {
            log::error!("Error embedding image {}: {}", path.display(), e);
            e
        })?;
        for image in &frames {
            log::debug!("Embedding {} ({:?}, {:?})", path.display(), image.encoding, image.color_space);
            builder.add_image_page(image);
        }
    }
    let page_count = builder.page_count();

    let bytes = builder.finish()?;
    fs::write(&output_path, bytes)?;

    Ok(ConvertReport {
        output_path: fs::canonicalize(&output_path)?,
        page_count,
        page_size,
        skipped,
    })
}
