//! Page-range parsing
//!
//! Turns a human-entered specification like `"1-3,4-8,9-13"` into validated,
//! zero-indexed inclusive page ranges. Tokens are comma-separated, trimmed,
//! and must be two positive 1-indexed integers joined by a hyphen. Tokens
//! that don't parse, start at page 0, or run backwards are dropped.

use regex::Regex;
use std::sync::OnceLock;

/// A contiguous, inclusive span of zero-indexed page indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    /// First page index in the range (inclusive)
    pub start: usize,
    /// Last page index in the range (inclusive); the parser guarantees
    /// `>= start`, consumers tolerate less
    pub end: usize,
}

impl PageRange {
    /// Number of pages the range covers before clipping. An inverted range
    /// (possible through the public fields) covers no pages.
    pub fn page_count(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            self.end - self.start + 1
        }
    }
}

fn range_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)-(\d+)$").unwrap())
}

/// Parse a comma-separated page-range specification.
///
/// Input pages are 1-indexed; the returned ranges are zero-indexed and
/// inclusive. Invalid tokens are skipped rather than reported, so the result
/// may be empty - callers treat an empty result as an invalid specification.
///
/// # Example
///
/// ```
/// use pdf_splice::ranges::parse_page_ranges;
///
/// let ranges = parse_page_ranges("1-3,4-8");
/// assert_eq!(ranges.len(), 2);
/// assert_eq!((ranges[0].start, ranges[0].end), (0, 2));
/// assert_eq!((ranges[1].start, ranges[1].end), (3, 7));
/// ```
pub fn parse_page_ranges(spec: &str) -> Vec<PageRange> {
    let mut ranges = Vec::new();

    for token in spec.split(',').map(str::trim) {
        let Some(caps) = range_token_re().captures(token) else {
            log::debug!("dropping malformed range token: {:?}", token);
            continue;
        };

        // Both captures are all-digit; overflow is the only way parse fails
        let (Ok(start), Ok(end)) = (caps[1].parse::<usize>(), caps[2].parse::<usize>()) else {
            log::debug!("dropping out-of-range token: {:?}", token);
            continue;
        };

        if start >= 1 && end >= start {
            ranges.push(PageRange {
                start: start - 1,
                end: end - 1,
            });
        } else {
            log::debug!("dropping out-of-order range token: {:?}", token);
        }
    }

    ranges
}
