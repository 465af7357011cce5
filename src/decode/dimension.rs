//! Image width and height from fixed header fields.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use serde::Serialize;
use std::fmt;

use crate::signature::Signature;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Dimensions {
    pub width:  u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both sides decoded to something non-zero.
    pub fn is_known(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Decode dimensions for an image signature.  Formats without a decoder,
/// and every non-image signature, yield `(0, 0)`.
pub fn dimensions(signature: Signature, buf: &[u8]) -> Dimensions {
    match signature {
        Signature::Ilbm                        => ilbm(buf),
        Signature::Png                         => png(buf),
        Signature::Gif                         => gif(buf),
        Signature::Bmp                         => bmp(buf),
        Signature::Pcx                         => pcx(buf),
        Signature::Jpeg | Signature::JpegNoSuffix => jpeg(buf),
        Signature::Webp                        => webp(buf),
        _                                      => Dimensions::default(),
    }
}

/// IFF ILBM: `BMHD` width and height, big-endian u16 at offsets 20 and 22.
pub fn ilbm(buf: &[u8]) -> Dimensions {
    match (be16(buf, 20), be16(buf, 22)) {
        (Some(w), Some(h)) => Dimensions::new(w as u32, h as u32),
        _                  => Dimensions::default(),
    }
}

/// PNG `IHDR`, the first chunk after the signature.
pub fn png(buf: &[u8]) -> Dimensions {
    if buf.get(12..16) != Some(&b"IHDR"[..]) {
        return Dimensions::default();
    }
    match (be32(buf, 16), be32(buf, 20)) {
        (Some(w), Some(h)) => Dimensions::new(w, h),
        _                  => Dimensions::default(),
    }
}

/// GIF logical screen descriptor.
pub fn gif(buf: &[u8]) -> Dimensions {
    match (le16(buf, 6), le16(buf, 8)) {
        (Some(w), Some(h)) => Dimensions::new(w as u32, h as u32),
        _                  => Dimensions::default(),
    }
}

/// BMP: 16-bit fields in the OS/2 core header, signed 32-bit in the
/// Windows headers (negative height means top-down).
pub fn bmp(buf: &[u8]) -> Dimensions {
    match le32(buf, 14) {
        Some(12) => match (le16(buf, 18), le16(buf, 20)) {
            (Some(w), Some(h)) => Dimensions::new(w as u32, h as u32),
            _                  => Dimensions::default(),
        },
        Some(_) => match (le32(buf, 18), le32(buf, 22)) {
            (Some(w), Some(h)) => {
                Dimensions::new((w as i32).unsigned_abs(), (h as i32).unsigned_abs())
            }
            _ => Dimensions::default(),
        },
        None => Dimensions::default(),
    }
}

/// PCX image window (`xmin`, `ymin`, `xmax`, `ymax`), inclusive bounds.
pub fn pcx(buf: &[u8]) -> Dimensions {
    let (Some(x0), Some(y0), Some(x1), Some(y1)) =
        (le16(buf, 4), le16(buf, 6), le16(buf, 8), le16(buf, 10))
    else {
        return Dimensions::default();
    };
    match (x1.checked_sub(x0), y1.checked_sub(y0)) {
        (Some(w), Some(h)) => Dimensions::new(w as u32 + 1, h as u32 + 1),
        _                  => Dimensions::default(),
    }
}

/// Walk JPEG marker segments until a start-of-frame marker.
pub fn jpeg(buf: &[u8]) -> Dimensions {
    let mut pos = 2;
    while pos + 4 <= buf.len() {
        if buf[pos] != 0xFF {
            return Dimensions::default();
        }
        let marker = buf[pos + 1];
        match marker {
            // Fill byte before a marker.
            0xFF => {
                pos += 1;
                continue;
            }
            // Standalone markers carry no length.
            0x01 | 0xD0..=0xD7 => {
                pos += 2;
                continue;
            }
            0xD9 | 0xDA => return Dimensions::default(),
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                return match (be16(buf, pos + 5), be16(buf, pos + 7)) {
                    (Some(h), Some(w)) => Dimensions::new(w as u32, h as u32),
                    _                  => Dimensions::default(),
                };
            }
            _ => {}
        }
        let Some(len) = be16(buf, pos + 2) else {
            return Dimensions::default();
        };
        if len < 2 {
            return Dimensions::default();
        }
        pos += 2 + len as usize;
    }
    Dimensions::default()
}

/// WebP: lossy `VP8 `, lossless `VP8L` and extended `VP8X` layouts.
pub fn webp(buf: &[u8]) -> Dimensions {
    match buf.get(12..16) {
        Some(b"VP8 ") => {
            if buf.get(23..26) != Some(&[0x9D, 0x01, 0x2A][..]) {
                return Dimensions::default();
            }
            match (le16(buf, 26), le16(buf, 28)) {
                (Some(w), Some(h)) => Dimensions::new((w & 0x3FFF) as u32, (h & 0x3FFF) as u32),
                _                  => Dimensions::default(),
            }
        }
        Some(b"VP8L") => {
            let Some(b) = buf.get(20..25) else {
                return Dimensions::default();
            };
            if b[0] != 0x2F {
                return Dimensions::default();
            }
            let w = 1 + (b[1] as u32 | ((b[2] as u32 & 0x3F) << 8));
            let h = 1 + ((b[2] as u32 >> 6) | ((b[3] as u32) << 2) | ((b[4] as u32 & 0x0F) << 10));
            Dimensions::new(w, h)
        }
        Some(b"VP8X") => match (buf.get(24..27), buf.get(27..30)) {
            (Some(w), Some(h)) => Dimensions::new(
                LittleEndian::read_u24(w) + 1,
                LittleEndian::read_u24(h) + 1,
            ),
            _ => Dimensions::default(),
        },
        _ => Dimensions::default(),
    }
}

// ── Field readers ─────────────────────────────────────────────────────────────

fn be16(buf: &[u8], at: usize) -> Option<u16> {
    buf.get(at..at.checked_add(2)?).map(BigEndian::read_u16)
}

fn be32(buf: &[u8], at: usize) -> Option<u32> {
    buf.get(at..at.checked_add(4)?).map(BigEndian::read_u32)
}

fn le16(buf: &[u8], at: usize) -> Option<u16> {
    buf.get(at..at.checked_add(2)?).map(LittleEndian::read_u16)
}

fn le32(buf: &[u8], at: usize) -> Option<u32> {
    buf.get(at..at.checked_add(4)?).map(LittleEndian::read_u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ilbm_32x32() {
        let mut buf = b"FORM\x00\x00\x01\x00ILBMBMHD\x00\x00\x00\x14".to_vec();
        buf.extend_from_slice(&[0x00, 0x20, 0x00, 0x20]);
        buf.extend_from_slice(&[0u8; 16]);
        assert_eq!(ilbm(&buf), Dimensions::new(32, 32));
        assert_eq!(dimensions(Signature::Ilbm, &buf), Dimensions::new(32, 32));
    }

    #[test]
    fn ilbm_short_buffer() {
        let buf = b"FORM\x00\x00\x01\x00ILBMBMHD\x00\x00\x00\x14\x00\x20\x00";
        assert_eq!(ilbm(buf), Dimensions::default());
        assert!(!ilbm(buf).is_known());
    }

    #[test]
    fn png_ihdr() {
        let mut buf = crate::magic::image::PNG.to_vec();
        buf.extend_from_slice(&13u32.to_be_bytes());
        buf.extend_from_slice(b"IHDR");
        buf.extend_from_slice(&640u32.to_be_bytes());
        buf.extend_from_slice(&480u32.to_be_bytes());
        assert_eq!(png(&buf), Dimensions::new(640, 480));
    }

    #[test]
    fn gif_screen() {
        assert_eq!(gif(b"GIF89a\x40\x01\xC8\x00"), Dimensions::new(320, 200));
    }

    #[test]
    fn bmp_top_down() {
        let mut buf = vec![0u8; 26];
        buf[..2].copy_from_slice(b"BM");
        buf[14..18].copy_from_slice(&40u32.to_le_bytes());
        buf[18..22].copy_from_slice(&800i32.to_le_bytes());
        buf[22..26].copy_from_slice(&(-600i32).to_le_bytes());
        assert_eq!(bmp(&buf), Dimensions::new(800, 600));
    }

    #[test]
    fn pcx_window() {
        let mut buf = vec![0x0A, 5, 1, 8];
        for v in [0u16, 0, 319, 199] {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        assert_eq!(pcx(&buf), Dimensions::new(320, 200));
    }

    #[test]
    fn pcx_inverted_window() {
        let mut buf = vec![0x0A, 5, 1, 8];
        for v in [10u16, 0, 5, 199] {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        assert_eq!(pcx(&buf), Dimensions::default());
    }

    #[test]
    fn jpeg_sof_after_app0() {
        let mut buf = vec![0xFF, 0xD8];
        buf.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
        buf.extend_from_slice(&[0u8; 14]);
        buf.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08]);
        buf.extend_from_slice(&480u16.to_be_bytes());
        buf.extend_from_slice(&640u16.to_be_bytes());
        buf.extend_from_slice(&[0u8; 10]);
        assert_eq!(jpeg(&buf), Dimensions::new(640, 480));
    }

    #[test]
    fn jpeg_garbage_is_empty() {
        assert_eq!(jpeg(&[0xFF, 0xD8, 0x12, 0x34, 0x56, 0x78]), Dimensions::default());
        assert_eq!(jpeg(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x00]), Dimensions::default());
    }

    #[test]
    fn webp_vp8x() {
        let mut buf = b"RIFF\x00\x00\x00\x00WEBPVP8X\x0a\x00\x00\x00".to_vec();
        buf.extend_from_slice(&[0u8; 4]);
        buf.extend_from_slice(&[0x3F, 0x01, 0x00]); // 319
        buf.extend_from_slice(&[0xC7, 0x00, 0x00]); // 199
        assert_eq!(webp(&buf), Dimensions::new(320, 200));
    }

    #[test]
    fn non_image_is_zero() {
        assert_eq!(dimensions(Signature::Pkzip, b"PK\x03\x04"), Dimensions::default());
    }
}
