//! PDF transformation module

use lopdf::Document;

use crate::error::{Error, Result};

pub mod assemble;
pub mod merge;
pub mod metadata;
pub mod split;

// Re-export commonly used items
pub use merge::{merge, Direction, MergeMode};
pub use metadata::{inspect, PdfInfo};
pub use split::{split, SplitMode, SplitPart};

/// Parse a PDF from memory, rejecting documents without pages
pub(crate) fn load_document(bytes: &[u8]) -> Result<Document> {
    let doc = Document::load_mem(bytes)?;
    if doc.get_pages().is_empty() {
        return Err(Error::EmptyDocument);
    }
    Ok(doc)
}

/// Serialize an assembled document into a byte buffer
pub(crate) fn document_to_bytes(mut doc: Document) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
