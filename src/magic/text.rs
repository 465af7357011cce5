//! Document and text encoding matchers.

use super::{ends_with_marker, has_at};
use crate::probe::Sample;
use crate::sniff;

const PDF_HEADER: &[u8; 5] = b"%PDF-";
const PDF_TRAILER: &[u8; 5] = b"%%EOF";
const RTF_HEADER: &[u8; 6] = b"{\\rtf1";

/// PDF with the `%%EOF` marker at the end of the file.
pub fn pdf(sample: &Sample<'_>) -> bool {
    sample.len >= 10 && pdf_no_suffix(sample.head) && ends_with_marker(sample, PDF_TRAILER)
}

pub fn pdf_no_suffix(buf: &[u8]) -> bool {
    has_at(buf, 0, PDF_HEADER)
}

/// RTF whose outer group is closed at the end of the file.
pub fn rtf(sample: &Sample<'_>) -> bool {
    sample.len >= 7 && rtf_no_suffix(sample.head) && ends_with_marker(sample, b"}")
}

pub fn rtf_no_suffix(buf: &[u8]) -> bool {
    has_at(buf, 0, RTF_HEADER)
}

pub fn postscript(buf: &[u8]) -> bool {
    has_at(buf, 0, b"%!PS")
}

// ── Byte order marks ──────────────────────────────────────────────────────────

pub fn utf8_bom(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0xEF, 0xBB, 0xBF])
}

pub fn utf16_le(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0xFF, 0xFE])
}

pub fn utf16_be(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0xFE, 0xFF])
}

/// Must be tested before [`utf16_le`], which shares its first two bytes.
pub fn utf32_le(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0xFF, 0xFE, 0x00, 0x00])
}

pub fn utf32_be(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0x00, 0x00, 0xFE, 0xFF])
}

// ── Plain and ANSI text ───────────────────────────────────────────────────────

const ESC: u8 = 0x1B;

/// Text holding at least one ANSI control sequence, `ESC [` then numeric
/// parameters and a final byte.  The content-type sniff runs first so a
/// binary file with a stray `ESC [` is not taken for ANSI art.
pub fn ansi(buf: &[u8]) -> bool {
    buf.len() >= 3 && sniff::is_text(sniff::content_type(buf)) && has_control_sequence(buf)
}

fn has_control_sequence(buf: &[u8]) -> bool {
    let mut i = 0;
    while i + 2 < buf.len() {
        if buf[i] == ESC && buf[i + 1] == b'[' {
            let params = buf[i + 2..]
                .iter()
                .take_while(|b| b.is_ascii_digit() || matches!(**b, b';' | b'?'))
                .count();
            if let Some(&fin) = buf.get(i + 2 + params) {
                if is_ansi_final(fin) {
                    return true;
                }
            }
        }
        i += 1;
    }
    false
}

/// Final bytes ANSI.SYS understands: cursor movement, erase, graphics mode
/// and the save/restore pair.
fn is_ansi_final(b: u8) -> bool {
    matches!(b, b'A'..=b'D' | b'H' | b'f' | b'J' | b'K' | b'm' | b's' | b'u' | b'h' | b'l')
}

pub fn plain_text(buf: &[u8]) -> bool {
    !buf.is_empty() && sniff::is_text(sniff::content_type(buf))
}
