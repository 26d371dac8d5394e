//! PDF inspection for the CLI `info` command

use std::path::Path;

use lopdf::{Dictionary, Document, Object};

use crate::error::{Error, Result};

/// Summary of a PDF file
#[derive(Debug, Clone)]
pub struct PdfInfo {
    /// Number of pages in the PDF
    pub page_count: usize,
    /// Document title (if present)
    pub title: Option<String>,
    /// Document author (if present)
    pub author: Option<String>,
}

/// Count pages by reading the Count field from the root Pages dictionary.
/// More reliable than walking Kids for documents with nested page trees.
pub fn page_count(doc: &Document) -> Result<usize> {
    let root_id = doc
        .trailer
        .get(b"Root")
        .map_err(|_| Error::General("no Root in trailer".to_string()))?
        .as_reference()
        .map_err(|_| Error::General("Root is not a reference".to_string()))?;

    let pages_id = doc
        .get_dictionary(root_id)?
        .get(b"Pages")
        .map_err(|_| Error::General("no Pages in catalog".to_string()))?
        .as_reference()
        .map_err(|_| Error::General("Pages is not a reference".to_string()))?;

    let count = doc
        .get_dictionary(pages_id)?
        .get(b"Count")
        .map_err(|_| Error::General("no Count in Pages".to_string()))?
        .as_i64()
        .map_err(|_| Error::General("Count is not an integer".to_string()))?;

    Ok(count as usize)
}

fn info_string(info: &Dictionary, key: &[u8]) -> Option<String> {
    let bytes = info.get(key).ok()?.as_str().ok()?;
    String::from_utf8(bytes.to_vec()).ok()
}

/// Read page count, title, and author from a PDF file
pub fn inspect(path: &Path) -> Result<PdfInfo> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    let page_count = page_count(&doc)?;
    if page_count == 0 {
        return Err(Error::EmptyDocument);
    }

    let mut title = None;
    let mut author = None;
    if let Ok(Object::Reference(info_id)) = doc.trailer.get(b"Info") {
        if let Ok(info) = doc.get_dictionary(*info_id) {
            title = info_string(info, b"Title");
            author = info_string(info, b"Author");
        }
    }

    Ok(PdfInfo {
        page_count,
        title,
        author,
    })
}
