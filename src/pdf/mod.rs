//! PDF generation module

pub mod embed;
pub mod build;
pub mod metadata;

// Re-export commonly used items
pub use embed::{EmbeddedImage, ColorSpace, ImageEncoding};
pub use build::{render_pdf, DocumentInfo, PdfBuilder};
pub use metadata::{count_pages, page_sizes};
