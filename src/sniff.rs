//! First-512-byte content-type sniff.
//!
//! A small subset of the WHATWG MIME sniffing rules, enough to tell text
//! from binary data.  DOS-era text often ends in a `0x1A` (SUB) end-of-file
//! marker followed by a SAUCE record or padding.  Such a marker ends the text
//! part of the window; a `0x1A` followed by anything else is binary.

use crate::probe::SNIFF_LEN;

pub const OCTET_STREAM: &str = "application/octet-stream";
pub const TEXT_PLAIN:   &str = "text/plain; charset=utf-8";
pub const TEXT_UTF16BE: &str = "text/plain; charset=utf-16be";
pub const TEXT_UTF16LE: &str = "text/plain; charset=utf-16le";
pub const TEXT_HTML:    &str = "text/html; charset=utf-8";

const DOS_EOF: u8 = 0x1A;
/// Records that may follow the end-of-file marker of DOS text.
const TRAILERS: [&[u8]; 2] = [b"SAUCE00", b"COMNT"];

const HTML_TAGS: [&[u8]; 6] = [
    b"<!DOCTYPE HTML", b"<HTML", b"<HEAD", b"<BODY", b"<TITLE", b"<!--",
];

/// Sniff the MIME content type of `buf` from at most its first 512 bytes.
pub fn content_type(buf: &[u8]) -> &'static str {
    let data = &buf[..buf.len().min(SNIFF_LEN)];
    if data.is_empty() {
        return TEXT_PLAIN;
    }
    if data.starts_with(&[0xFE, 0xFF]) {
        return TEXT_UTF16BE;
    }
    if data.starts_with(&[0xFF, 0xFE]) {
        return TEXT_UTF16LE;
    }
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return TEXT_PLAIN;
    }

    let text = match data.iter().position(|&b| b == DOS_EOF) {
        Some(end) if end > 0 && is_text_trailer(&data[end..]) => &data[..end],
        Some(_)   => return OCTET_STREAM,
        None      => data,
    };
    if text.iter().any(|&b| is_binary_byte(b)) {
        return OCTET_STREAM;
    }

    let trimmed = trim_leading_whitespace(text);
    if HTML_TAGS.iter().any(|tag| starts_with_ignore_case(trimmed, tag)) {
        return TEXT_HTML;
    }
    TEXT_PLAIN
}

/// `rest` starts at a `0x1A`.  It ends text when only padding follows or
/// when a SAUCE or comment record comes next, possibly after more padding.
fn is_text_trailer(rest: &[u8]) -> bool {
    let start = rest
        .iter()
        .position(|&b| b != DOS_EOF && b != 0x00)
        .unwrap_or(rest.len());
    let after = &rest[start..];
    after.is_empty() || TRAILERS.iter().any(|t| after.starts_with(t) || t.starts_with(after))
}

/// True for any `text/*` content type.
pub fn is_text(content_type: &str) -> bool {
    content_type.starts_with("text/")
}

/// Control bytes that never occur in text.  ESC (`0x1B`) is allowed, it
/// starts ANSI escape sequences.
fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}

fn trim_leading_whitespace(buf: &[u8]) -> &[u8] {
    let start = buf
        .iter()
        .position(|b| !matches!(*b, b'\t' | b'\n' | b'\x0C' | b'\r' | b' '))
        .unwrap_or(buf.len());
    &buf[start..]
}

fn starts_with_ignore_case(buf: &[u8], prefix: &[u8]) -> bool {
    buf.len() >= prefix.len() && buf[..prefix.len()].eq_ignore_ascii_case(prefix)
}
