//! Split policies: page ranges, half-page content crops, odd/even pages

use crate::error::{Error, Result};
use crate::pdf::assemble::{PageAssembler, Placement};
use crate::pdf::merge::Direction;
use crate::pdf::{document_to_bytes, load_document};
use crate::ranges::PageRange;

/// How one document is partitioned into output documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitMode {
    /// One output per page range, clipped to the source page count
    ByRanges(Vec<PageRange>),
    /// Two outputs, each page cropped to one half of the original canvas
    ByContent(Direction),
    /// Odd pages (1st, 3rd, ...) in the first output, even pages in the second
    ByAlternate,
}

/// One split output, ready to hand off for archiving or writing to disk
#[derive(Debug, Clone)]
pub struct SplitPart {
    /// Policy-derived filename, e.g. `pages_1-3.pdf` or `odd_pages.pdf`
    pub name: String,
    /// Serialized PDF bytes
    pub bytes: Vec<u8>,
}

/// Split a PDF document into an ordered list of `(filename, bytes)` parts.
///
/// The input must parse and contain at least one page. `ByRanges` with an
/// empty range list is rejected before the document is touched.
pub fn split(bytes: &[u8], mode: SplitMode) -> Result<Vec<SplitPart>> {
    match mode {
        SplitMode::ByRanges(ranges) => split_by_ranges(bytes, &ranges),
        SplitMode::ByContent(direction) => split_by_content(bytes, direction),
        SplitMode::ByAlternate => split_by_alternate(bytes),
    }
}

/// One output document per accepted page range.
///
/// Ranges reaching past the last page are clipped; ranges that start beyond
/// it produce no part at all.
fn split_by_ranges(bytes: &[u8], ranges: &[PageRange]) -> Result<Vec<SplitPart>> {
    if ranges.is_empty() {
        return Err(Error::InvalidPageRanges(
            "no valid page ranges given".to_string(),
        ));
    }

    let page_count = load_document(bytes)?.get_pages().len();

    let mut parts = Vec::new();
    for range in ranges {
        // The parser never yields these, but the fields are public
        if range.end < range.start {
            log::debug!(
                "range {}-{} runs backwards, skipping",
                range.start + 1,
                range.end + 1
            );
            continue;
        }
        if range.start >= page_count {
            log::debug!(
                "range {}-{} is beyond the last page, skipping",
                range.start + 1,
                range.end + 1
            );
            continue;
        }
        let end = range.end.min(page_count - 1);

        let mut assembler = PageAssembler::new();
        let pages = assembler.import(load_document(bytes)?);
        for &page_id in &pages[range.start..=end] {
            assembler.push_page(page_id);
        }

        parts.push(SplitPart {
            // Named after the requested range, not the clipped one
            name: format!("pages_{}-{}.pdf", range.start + 1, range.end + 1),
            bytes: document_to_bytes(assembler.finish()?)?,
        });
    }

    log::debug!("range split produced {} documents", parts.len());
    Ok(parts)
}

/// Two output documents, each page showing one half of the source page.
///
/// The full source page is drawn as a Form XObject at an offset against a
/// half-size page viewport, cropping it visually rather than editing content.
fn split_by_content(bytes: &[u8], direction: Direction) -> Result<Vec<SplitPart>> {
    let names = match direction {
        Direction::Horizontal => ["left.pdf", "right.pdf"],
        Direction::Vertical => ["top.pdf", "bottom.pdf"],
    };

    let mut parts = Vec::new();
    for (half, name) in names.into_iter().enumerate() {
        let mut doc = load_document(bytes)?;
        doc.decompress();

        let mut assembler = PageAssembler::new();
        let pages = assembler.import(doc);

        for &page_id in &pages {
            let bounds = assembler.page_bounds(page_id)?;
            let (width, height) = (bounds.width(), bounds.height());
            let form = assembler.embed_page(page_id)?;

            let (page_width, page_height, tx, ty) = match (direction, half) {
                // Left half: full page at the origin of a half-wide viewport
                (Direction::Horizontal, 0) => (width / 2.0, height, 0.0, 0.0),
                // Right half: shifted left so the right side lands in view
                (Direction::Horizontal, _) => (width / 2.0, height, -width / 2.0, 0.0),
                // Top half: shifted down against a half-tall viewport
                (Direction::Vertical, 0) => (width, height / 2.0, 0.0, -height / 2.0),
                // Bottom half
                (Direction::Vertical, _) => (width, height / 2.0, 0.0, 0.0),
            };

            assembler.push_composite_page(
                page_width,
                page_height,
                &[Placement {
                    xobject: form,
                    tx: tx - bounds.x0,
                    ty: ty - bounds.y0,
                }],
            );
        }

        parts.push(SplitPart {
            name: name.to_string(),
            bytes: document_to_bytes(assembler.finish()?)?,
        });
    }

    log::debug!("content split ({:?}) produced 2 documents", direction);
    Ok(parts)
}

/// Partition pages by index parity: even zero-based indices are the odd
/// pages in 1-indexed terms and go first.
fn split_by_alternate(bytes: &[u8]) -> Result<Vec<SplitPart>> {
    let mut parts = Vec::new();

    for (parity, name) in [(0usize, "odd_pages.pdf"), (1, "even_pages.pdf")] {
        let mut assembler = PageAssembler::new();
        let pages = assembler.import(load_document(bytes)?);

        for (i, &page_id) in pages.iter().enumerate() {
            if i % 2 == parity {
                assembler.push_page(page_id);
            }
        }

        // A single-page source has no even pages; emit nothing for that side
        if assembler.page_count() == 0 {
            continue;
        }

        parts.push(SplitPart {
            name: name.to_string(),
            bytes: document_to_bytes(assembler.finish()?)?,
        });
    }

    log::debug!("alternate split produced {} documents", parts.len());
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_empty_ranges_rejected_before_parsing() {
        // The range check runs first, so even garbage bytes never get loaded
        let result = split(b"not a pdf", SplitMode::ByRanges(Vec::new()));
        assert!(matches!(result, Err(Error::InvalidPageRanges(_))));
    }

    #[test]
    fn test_split_rejects_garbage_input() {
        let result = split(b"not a pdf", SplitMode::ByAlternate);
        assert!(matches!(result, Err(Error::Pdf(_))));
    }
}
