//! PDF assembly using lopdf
//!
//! Every page gets the same MediaBox, and each page draws one image scaled
//! to fit and centered on it.

use chrono::{DateTime, Utc};
use lopdf::{Document, Object, ObjectId, Dictionary, Stream, StringFormat};
use crate::error::{Error, Result};
use crate::layout::{fit_into, ImagePlacement, PageSize};
use super::embed::EmbeddedImage;

/// Values written to the document Info dictionary
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    /// Producer string
    pub producer: String,
    /// Used for both CreationDate and ModDate
    pub created: DateTime<Utc>,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            producer: format!("imgs2pdf {}", env!("CARGO_PKG_VERSION")),
            created: Utc::now(),
        }
    }
}

/// Incrementally builds a document with one fixed page size
pub struct PdfBuilder {
    doc: Document,
    page_size: PageSize,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    info: DocumentInfo,
}

impl PdfBuilder {
    /// Start an empty document whose pages will all be `page_size`
    pub fn new(page_size: PageSize, info: DocumentInfo) -> Self {
        let mut doc = Document::with_version("1.5");
        // Reserve the page tree id so pages can point at their parent
        let pages_id = doc.new_object_id();

        Self {
            doc,
            page_size,
            pages_id,
            page_ids: Vec::new(),
            info,
        }
    }

    /// Number of pages added so far
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Add a page showing `image` fitted into the page and centered
    pub fn add_image_page(&mut self, image: &EmbeddedImage) -> ObjectId {
        let image_id = image.add_to_document(&mut self.doc);
        let placement = fit_into(image.width as f64, image.height as f64, &self.page_size);

        let content = image_content(&placement);
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut xobjects = Dictionary::new();
        xobjects.set("Im0", Object::Reference(image_id));
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(self.pages_id));
        page.set("MediaBox", Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            pdf_number(self.page_size.width),
            pdf_number(self.page_size.height),
        ]));
        page.set("Resources", Object::Dictionary(resources));
        page.set("Contents", Object::Reference(content_id));

        let page_id = self.doc.add_object(Object::Dictionary(page));
        self.page_ids.push(page_id);
        page_id
    }

    /// Write the page tree, catalog and Info dictionary, then serialize
    pub fn finish(mut self) -> Result<Vec<u8>> {
        if self.page_ids.is_empty() {
            return Err(Error::EmptyImageList);
        }

        let kids: Vec<Object> = self.page_ids
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();

        let mut pages_object = Dictionary::new();
        pages_object.set("Type", Object::Name(b"Pages".to_vec()));
        pages_object.set("Count", Object::Integer(self.page_ids.len() as i64));
        pages_object.set("Kids", Object::Array(kids));
        self.doc.objects.insert(self.pages_id, Object::Dictionary(pages_object));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(self.pages_id));
        let catalog_id = self.doc.add_object(Object::Dictionary(catalog));

        let date = pdf_date(&self.info.created);
        let mut info = Dictionary::new();
        info.set("Producer", Object::String(self.info.producer.clone().into_bytes(), StringFormat::Literal));
        info.set("CreationDate", Object::String(date.clone().into_bytes(), StringFormat::Literal));
        info.set("ModDate", Object::String(date.into_bytes(), StringFormat::Literal));
        let info_id = self.doc.add_object(Object::Dictionary(info));

        self.doc.trailer.set("Root", Object::Reference(catalog_id));
        self.doc.trailer.set("Info", Object::Reference(info_id));

        self.doc.compress();

        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// Build a complete PDF with one page per image, in order
pub fn render_pdf(images: &[EmbeddedImage], page_size: PageSize, info: DocumentInfo) -> Result<Vec<u8>> {
    if images.is_empty() {
        return Err(Error::EmptyImageList);
    }

    let mut builder = PdfBuilder::new(page_size, info);
    for image in images {
        builder.add_image_page(image);
    }
    builder.finish()
}

/// Content stream that paints `/Im0` into the placement rectangle
fn image_content(placement: &ImagePlacement) -> String {
    let m = placement.matrix();
    format!(
        "q\n{} {} {} {} {} {} cm\n/Im0 Do\nQ\n",
        format_number(m[0]),
        format_number(m[1]),
        format_number(m[2]),
        format_number(m[3]),
        format_number(m[4]),
        format_number(m[5]),
    )
}

/// Format a number for a content stream: at most four decimals, no trailing zeros
fn format_number(value: f64) -> String {
    let s = format!("{:.4}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Integer object when the value is whole, Real otherwise
fn pdf_number(value: f64) -> Object {
    if value.fract() == 0.0 {
        Object::Integer(value as i64)
    } else {
        Object::Real(value as f32)
    }
}

/// PDF date string (`D:YYYYMMDDHHmmSSZ`)
fn pdf_date(date: &DateTime<Utc>) -> String {
    date.format("D:%Y%m%d%H%M%SZ").to_string()
}
