//! Signature matchers.
//!
//! Each matcher is a pure predicate over a byte buffer (or a [`Sample`] for
//! the formats validated by a trailing marker).  Matchers never index out
//! of range: a buffer shorter than the pattern they need is simply not a
//! match.  The order in which they are tried lives in
//! [`crate::classify::RULES`], not here.
//!
//! [`Sample`]: crate::probe::Sample

pub mod archive;
pub mod disk;
pub mod image;
pub mod media;
pub mod program;
pub mod text;

pub use archive::ZipMethod;

use crate::probe::Sample;

/// True when `buf` holds `pattern` starting at `offset`.
#[inline]
pub(crate) fn has_at(buf: &[u8], offset: usize, pattern: &[u8]) -> bool {
    offset
        .checked_add(pattern.len())
        .and_then(|end| buf.get(offset..end))
        .is_some_and(|s| s == pattern)
}

/// True when `buf` starts with any of `patterns`.
#[inline]
pub(crate) fn has_any(buf: &[u8], offset: usize, patterns: &[&[u8]]) -> bool {
    patterns.iter().any(|p| has_at(buf, offset, p))
}

/// `buf` with trailing zero padding and ASCII whitespace removed.
pub(crate) fn trim_end_padding(buf: &[u8]) -> &[u8] {
    let end = buf
        .iter()
        .rposition(|b| *b != 0 && !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    &buf[..end]
}

/// True when the sample's tail ends in `marker` once trailing padding is
/// removed.
pub(crate) fn ends_with_marker(sample: &Sample<'_>, marker: &[u8]) -> bool {
    trim_end_padding(sample.tail).ends_with(marker)
}
