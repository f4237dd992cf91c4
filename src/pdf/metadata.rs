//! Reading back page count and page sizes from a written PDF

use std::path::Path;
use lopdf::{Document, Object};
use crate::error::{Error, Result};
use crate::layout::PageSize;

/// Count pages by reading the Count field from the Pages dictionary
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let catalog_id = doc.trailer.get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| Error::General("No Root reference in trailer".to_string()))?;

    let pages_id = doc.get_dictionary(catalog_id)?
        .get(b"Pages")
        .and_then(Object::as_reference)
        .map_err(|_| Error::General("No Pages reference in catalog".to_string()))?;

    let count = doc.get_dictionary(pages_id)?
        .get(b"Count")
        .and_then(Object::as_i64)
        .map_err(|_| Error::General("No integer Count in Pages".to_string()))?;

    Ok(count.max(0) as usize)
}

/// Numeric value of an Integer or Real object
fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

/// Width and height of a page's MediaBox
fn media_box_size(doc: &Document, page_id: lopdf::ObjectId) -> Result<PageSize> {
    let page = doc.get_dictionary(page_id)?;
    let media_box = page.get(b"MediaBox")?.as_array()?;

    let values: Vec<f64> = media_box.iter().filter_map(number).collect();
    if values.len() != 4 {
        return Err(Error::General(format!("Malformed MediaBox on page {:?}", page_id)));
    }

    Ok(PageSize {
        width: values[2] - values[0],
        height: values[3] - values[1],
    })
}

/// Count the number of pages in a PDF file
pub fn count_pages(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    count_pages_from_catalog(&doc)
}

/// Size of every page, in page order
pub fn page_sizes(path: &Path) -> Result<Vec<PageSize>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    doc.get_pages()
        .into_values()
        .map(|page_id| media_box_size(&doc, page_id))
        .collect()
}
