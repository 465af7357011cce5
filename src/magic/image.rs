//! Raster image matchers.

use byteorder::{ByteOrder, LittleEndian};

use super::{has_any, has_at};
use crate::probe::Sample;

pub const PNG: &[u8; 8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SOI: &[u8; 3] = &[0xFF, 0xD8, 0xFF];
const JPEG_EOI: &[u8; 2] = &[0xFF, 0xD9];
const TARGA_FOOTER: &[u8; 18] = b"TRUEVISION-XFILE.\0";

pub fn png(buf: &[u8]) -> bool {
    has_at(buf, 0, PNG)
}

/// JPEG with both the start-of-image marker and the end-of-image marker
/// at the end of the file.
pub fn jpeg(sample: &Sample<'_>) -> bool {
    sample.len >= 5 && jpeg_no_suffix(sample.head) && ends_with_jpeg_eoi(sample)
}

/// JPEG start-of-image marker alone, for truncated or padded files.
pub fn jpeg_no_suffix(buf: &[u8]) -> bool {
    has_at(buf, 0, JPEG_SOI)
}

/// Only NUL padding is skipped after the EOI.
fn ends_with_jpeg_eoi(sample: &Sample<'_>) -> bool {
    let tail = sample.tail;
    let end = tail.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    tail[..end].ends_with(JPEG_EOI)
}

pub fn jpeg2000(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0x00, 0x00, 0x00, 0x0C, b'j', b'P', b' ', b' ', 0x0D, 0x0A, 0x87, 0x0A])
}

pub fn gif(buf: &[u8]) -> bool {
    has_any(buf, 0, &[b"GIF87a", b"GIF89a"])
}

/// DIB header sizes written by the known BMP versions (OS/2 1.x through
/// BITMAPV5HEADER).
const BMP_DIB_SIZES: [u32; 7] = [12, 40, 52, 56, 64, 108, 124];

/// Windows or OS/2 bitmap: `BM`, zeroed reserved words and a known DIB
/// header size.
pub fn bmp(buf: &[u8]) -> bool {
    if buf.len() < 18 || !has_at(buf, 0, b"BM") || buf[6..10] != [0, 0, 0, 0] {
        return false;
    }
    BMP_DIB_SIZES.contains(&LittleEndian::read_u32(&buf[14..18]))
}

pub fn tiff(buf: &[u8]) -> bool {
    has_any(buf, 0, &[b"II*\x00", b"MM\x00*"])
}

pub fn webp(buf: &[u8]) -> bool {
    has_at(buf, 0, b"RIFF") && has_at(buf, 8, b"WEBP")
}

pub fn avif(buf: &[u8]) -> bool {
    has_any(buf, 4, &[b"ftypavif", b"ftypavis"])
}

/// IFF `FORM` holding an InterLeaved BitMap (or Deluxe Paint's `PBM `).
pub fn ilbm(buf: &[u8]) -> bool {
    has_at(buf, 0, b"FORM") && has_any(buf, 8, &[b"ILBM", b"PBM "])
}

/// ZSoft PCX: manufacturer `0A`, a known version, RLE encoding and a
/// plane bit depth of 1, 2, 4 or 8.
pub fn pcx(buf: &[u8]) -> bool {
    buf.len() >= 4
        && buf[0] == 0x0A
        && matches!(buf[1], 0 | 2 | 3 | 4 | 5)
        && buf[2] == 1
        && matches!(buf[3], 1 | 2 | 4 | 8)
}

/// Windows icon directory with at least one image.
pub fn ico(buf: &[u8]) -> bool {
    buf.len() >= 6 && has_at(buf, 0, &[0x00, 0x00, 0x01, 0x00]) && LittleEndian::read_u16(&buf[4..6]) > 0
}

pub fn photoshop(buf: &[u8]) -> bool {
    has_at(buf, 0, b"8BPS\x00\x01")
}

/// Truevision TGA 2.0, identified by its file footer.
pub fn targa(sample: &Sample<'_>) -> bool {
    sample.tail.ends_with(TARGA_FOOTER)
}

pub fn colorix(buf: &[u8]) -> bool {
    has_at(buf, 0, b"RIX3")
}

pub fn qoi(buf: &[u8]) -> bool {
    has_at(buf, 0, b"qoif")
}
