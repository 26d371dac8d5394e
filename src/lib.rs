//! PDF Splice Library
//!
//! A library for merging two PDF documents or splitting one, with several
//! page-arrangement policies:
//! - Merge: append, overlay two pages onto one larger canvas, or interleave
//! - Split: by page ranges, by cropping each page in half, or by odd/even pages
//!
//! All operations take raw PDF bytes and produce freshly assembled documents;
//! inputs are never modified.
//!
//! # Example
//!
//! ```no_run
//! use pdf_splice::pdf::{merge, split, MergeMode, SplitMode};
//! use pdf_splice::ranges::parse_page_ranges;
//!
//! let a = std::fs::read("a.pdf").expect("read a.pdf");
//! let b = std::fs::read("b.pdf").expect("read b.pdf");
//!
//! // One document with all of A's pages, then all of B's
//! let merged = merge(&a, &b, MergeMode::Append).expect("merge failed");
//!
//! // One document per page range
//! let ranges = parse_page_ranges("1-3,4-8");
//! let parts = split(&merged, SplitMode::ByRanges(ranges)).expect("split failed");
//! for part in parts {
//!     std::fs::write(&part.name, &part.bytes).expect("write part");
//! }
//! ```

pub mod error;
pub mod pdf;
pub mod ranges;

// Re-export commonly used items
pub use error::{Error, Result};
