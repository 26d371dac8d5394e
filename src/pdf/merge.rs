//! Merge policies: append, overlay, alternate

use crate::error::Result;
use crate::pdf::assemble::{PageAssembler, Placement};
use crate::pdf::{document_to_bytes, load_document};

/// Axis along which two pages are combined (overlay) or a page is halved
/// (content split)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Side by side / left-right halves
    Horizontal,
    /// Stacked / top-bottom halves
    Vertical,
}

/// How two documents are combined into one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// All of A's pages, then all of B's
    Append,
    /// Page i of A and page i of B drawn together on one larger page
    Overlay(Direction),
    /// Pages interleaved one at a time: A0, B0, A1, B1, ...
    Alternate,
}

/// Merge two PDF documents into one.
///
/// Both inputs must parse and contain at least one page. The result is a
/// freshly assembled document; the inputs are never modified.
///
/// # Example
///
/// ```no_run
/// use pdf_splice::pdf::{merge, MergeMode};
///
/// let a = std::fs::read("a.pdf").unwrap();
/// let b = std::fs::read("b.pdf").unwrap();
/// let merged = merge(&a, &b, MergeMode::Append).unwrap();
/// std::fs::write("merged.pdf", merged).unwrap();
/// ```
pub fn merge(bytes_a: &[u8], bytes_b: &[u8], mode: MergeMode) -> Result<Vec<u8>> {
    match mode {
        MergeMode::Append => append(bytes_a, bytes_b),
        MergeMode::Overlay(direction) => overlay(bytes_a, bytes_b, direction),
        MergeMode::Alternate => alternate(bytes_a, bytes_b),
    }
}

/// Concatenate all pages of A followed by all pages of B
fn append(bytes_a: &[u8], bytes_b: &[u8]) -> Result<Vec<u8>> {
    let doc_a = load_document(bytes_a)?;
    let doc_b = load_document(bytes_b)?;

    let mut assembler = PageAssembler::new();
    for page_id in assembler.import(doc_a) {
        assembler.push_page(page_id);
    }
    for page_id in assembler.import(doc_b) {
        assembler.push_page(page_id);
    }

    log::debug!("append merge produced {} pages", assembler.page_count());
    document_to_bytes(assembler.finish()?)
}

/// Interleave pages one at a time, padding naturally when one document is
/// shorter
fn alternate(bytes_a: &[u8], bytes_b: &[u8]) -> Result<Vec<u8>> {
    let doc_a = load_document(bytes_a)?;
    let doc_b = load_document(bytes_b)?;

    let mut assembler = PageAssembler::new();
    let pages_a = assembler.import(doc_a);
    let pages_b = assembler.import(doc_b);

    for i in 0..pages_a.len().max(pages_b.len()) {
        if let Some(&page_id) = pages_a.get(i) {
            assembler.push_page(page_id);
        }
        if let Some(&page_id) = pages_b.get(i) {
            assembler.push_page(page_id);
        }
    }

    log::debug!("alternate merge produced {} pages", assembler.page_count());
    document_to_bytes(assembler.finish()?)
}

/// Draw page i of both documents onto one larger page.
///
/// The composite page's size is the sum of the source sizes along the given
/// axis and the max across it. Both sources are anchored to the top edge
/// (horizontal) or left edge (vertical): shorter pages are not centered or
/// scaled. A page with no counterpart at the same index passes through
/// unchanged.
fn overlay(bytes_a: &[u8], bytes_b: &[u8], direction: Direction) -> Result<Vec<u8>> {
    let mut doc_a = load_document(bytes_a)?;
    let mut doc_b = load_document(bytes_b)?;
    // Content stream bytes are copied into Form XObjects below, so they must
    // be raw operators rather than flate data
    doc_a.decompress();
    doc_b.decompress();

    let mut assembler = PageAssembler::new();
    let pages_a = assembler.import(doc_a);
    let pages_b = assembler.import(doc_b);

    for i in 0..pages_a.len().max(pages_b.len()) {
        let (page_a, page_b) = (pages_a.get(i).copied(), pages_b.get(i).copied());

        let (page_a, page_b) = match (page_a, page_b) {
            (Some(a), Some(b)) => (a, b),
            (Some(a), None) => {
                assembler.push_page(a);
                continue;
            }
            (None, Some(b)) => {
                assembler.push_page(b);
                continue;
            }
            (None, None) => unreachable!("loop is bounded by the longer document"),
        };

        let bounds_a = assembler.page_bounds(page_a)?;
        let bounds_b = assembler.page_bounds(page_b)?;
        let (width_a, height_a) = (bounds_a.width(), bounds_a.height());
        let (width_b, height_b) = (bounds_b.width(), bounds_b.height());

        let (width, height) = match direction {
            Direction::Horizontal => (width_a + width_b, height_a.max(height_b)),
            Direction::Vertical => (width_a.max(width_b), height_a + height_b),
        };

        let form_a = assembler.embed_page(page_a)?;
        let form_b = assembler.embed_page(page_b)?;

        // Anchor positions of each page's lower-left corner; `- bounds.x0/y0`
        // compensates for MediaBoxes that don't start at the origin
        let placements = match direction {
            Direction::Horizontal => [
                Placement {
                    xobject: form_a,
                    tx: -bounds_a.x0,
                    ty: (height - height_a) - bounds_a.y0,
                },
                Placement {
                    xobject: form_b,
                    tx: width_a - bounds_b.x0,
                    ty: (height - height_b) - bounds_b.y0,
                },
            ],
            Direction::Vertical => [
                Placement {
                    xobject: form_a,
                    tx: -bounds_a.x0,
                    ty: height_b - bounds_a.y0,
                },
                Placement {
                    xobject: form_b,
                    tx: -bounds_b.x0,
                    ty: -bounds_b.y0,
                },
            ],
        };

        assembler.push_composite_page(width, height, &placements);
    }

    log::debug!(
        "overlay merge ({:?}) produced {} pages",
        direction,
        assembler.page_count()
    );
    document_to_bytes(assembler.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_merge_rejects_garbage_input() {
        let result = merge(b"not a pdf", b"also not a pdf", MergeMode::Append);
        assert!(matches!(result, Err(Error::Pdf(_))));
    }

    #[test]
    fn test_merge_rejects_empty_input() {
        let result = merge(&[], &[], MergeMode::Alternate);
        assert!(result.is_err());
    }
}
