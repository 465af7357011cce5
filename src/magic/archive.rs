//! Archive and compressed-file matchers.

use byteorder::{ByteOrder, LittleEndian};

use super::{has_any, has_at};

// ── PKZIP ─────────────────────────────────────────────────────────────────────

pub const ZIP_LOCAL_HEADER: &[u8; 4] = b"PK\x03\x04";
/// Smallest buffer that reaches the local header's compression method.
pub const ZIP_MIN_LEN: usize = 10;
/// "Version needed to extract" value introduced with Zip64 (4.5).
pub const ZIP64_VERSION: u16 = 45;

/// Compression method family of the first PKZIP local file header.
///
/// Shrink, Reduce and Implode are the pre-deflate PKZIP 1.x encodings;
/// most extractors no longer decode them, so they are kept distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZipMethod {
    /// Stored, deflate and every later method.
    Standard,
    /// Method 1.
    Shrink,
    /// Methods 2 to 5 (compression factors 1 to 4).
    Reduce,
    /// Method 6.
    Implode,
}

/// Read the compression method of a `PK\x03\x04` local header.
pub fn zip_method(buf: &[u8]) -> Option<ZipMethod> {
    if buf.len() < ZIP_MIN_LEN || !has_at(buf, 0, ZIP_LOCAL_HEADER) {
        return None;
    }
    Some(match LittleEndian::read_u16(&buf[8..10]) {
        1      => ZipMethod::Shrink,
        2..=5  => ZipMethod::Reduce,
        6      => ZipMethod::Implode,
        _      => ZipMethod::Standard,
    })
}

/// Standard PKZIP archive that is not flagged as Zip64.
pub fn pkzip(buf: &[u8]) -> bool {
    zip_method(buf) == Some(ZipMethod::Standard) && !zip64(buf)
}

pub fn pkzip_shrink(buf: &[u8]) -> bool {
    zip_method(buf) == Some(ZipMethod::Shrink)
}

pub fn pkzip_reduce(buf: &[u8]) -> bool {
    zip_method(buf) == Some(ZipMethod::Reduce)
}

pub fn pkzip_implode(buf: &[u8]) -> bool {
    zip_method(buf) == Some(ZipMethod::Implode)
}

/// Zip64 archive: the first member needs version 4.5 or later to extract.
pub fn zip64(buf: &[u8]) -> bool {
    zip_method(buf) == Some(ZipMethod::Standard)
        && LittleEndian::read_u16(&buf[4..6]) >= ZIP64_VERSION
}

/// First volume of a spanned archive, led by the data-descriptor marker.
pub fn pkzip_multi_volume(buf: &[u8]) -> bool {
    has_any(buf, 0, &[b"PK\x07\x08", b"PK00"])
}

/// Archive with no members: only the end-of-central-directory record.
pub fn pkzip_empty(buf: &[u8]) -> bool {
    has_at(buf, 0, b"PK\x05\x06")
}

/// MZ executable compressed by PKLITE.
pub fn pklite(buf: &[u8]) -> bool {
    has_any(buf, 0, &[b"MZ", b"ZM"]) && has_at(buf, 30, b"PKLITE")
}

/// MZ executable carrying a PKZIP self-extractor stub.
pub fn pksfx(buf: &[u8]) -> bool {
    has_any(buf, 0, &[b"MZ", b"ZM"]) && has_at(buf, 30, b"PKSFX")
}

// ── DOS-era archivers ─────────────────────────────────────────────────────────

/// Header-version bytes SEA ARC writes after its `0x1A` marker.
const ARC_METHODS: [u8; 5] = [0x02, 0x03, 0x04, 0x08, 0x09];

/// SEA ARC.  Only the marker byte and the method byte are checked, so
/// unrelated files starting `1A 02` etc. also match.
pub fn arc(buf: &[u8]) -> bool {
    buf.len() >= 2 && buf[0] == 0x1A && ARC_METHODS.contains(&buf[1])
}

/// ARJ main header: `60 EA` and a basic header size within the 2600 byte
/// limit.
pub fn arj(buf: &[u8]) -> bool {
    if buf.len() < 4 || !has_at(buf, 0, &[0x60, 0xEA]) {
        return false;
    }
    let size = LittleEndian::read_u16(&buf[2..4]);
    (1..=2600).contains(&size)
}

/// LHA / LHarc: method id `-lh?-` or `-lz?-` at offset 2.
pub fn lha(buf: &[u8]) -> bool {
    buf.len() >= 7
        && has_at(buf, 2, b"-l")
        && matches!(buf[4], b'h' | b'z')
        && buf[6] == b'-'
}

pub fn zoo(buf: &[u8]) -> bool {
    has_at(buf, 0, b"ZOO ") && has_at(buf, 20, &[0xDC, 0xA7, 0xC4, 0xFD])
}

pub fn ace(buf: &[u8]) -> bool {
    has_at(buf, 7, b"**ACE**")
}

/// CP/M and DOS `SQ` squeezed file.
pub fn squeeze(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0x76, 0xFF])
}

// ── Modern compressors ────────────────────────────────────────────────────────

/// RAR 1.5 to 4.x.
pub fn rar(buf: &[u8]) -> bool {
    has_at(buf, 0, b"Rar!\x1A\x07\x00")
}

pub fn rar5(buf: &[u8]) -> bool {
    has_at(buf, 0, b"Rar!\x1A\x07\x01\x00")
}

/// gzip member using deflate, the only method ever defined.
pub fn gzip(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0x1F, 0x8B, 0x08])
}

pub fn bzip2(buf: &[u8]) -> bool {
    has_at(buf, 0, b"BZh") && buf.len() >= 4 && (b'1'..=b'9').contains(&buf[3])
}

pub fn seven_zip(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C])
}

pub fn xz(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00])
}

pub fn zstandard(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0x28, 0xB5, 0x2F, 0xFD])
}

/// POSIX tar: `ustar` magic in the first header block.
pub fn tar(buf: &[u8]) -> bool {
    has_at(buf, 257, b"ustar")
}

/// Unix `compress` (.Z) LZW stream.
pub fn unix_compress(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0x1F, 0x9D])
}

// ── Microsoft and installers ──────────────────────────────────────────────────

pub fn ms_cab(buf: &[u8]) -> bool {
    has_at(buf, 0, b"MSCF\0\0\0\0")
}

/// `COMPRESS.EXE` output, the `FILE.EX_` style files on install disks.
pub fn ms_compress_szdd(buf: &[u8]) -> bool {
    has_at(buf, 0, &[b'S', b'Z', b'D', b'D', 0x88, 0xF0, 0x27, 0x33])
}

pub fn ms_compress_kwaj(buf: &[u8]) -> bool {
    has_at(buf, 0, &[b'K', b'W', b'A', b'J', 0x88, 0xF0, 0x27, 0xD1])
}

pub fn installshield_cab(buf: &[u8]) -> bool {
    has_at(buf, 0, b"ISc(")
}

/// OLE2 structured storage (Word, Excel, MSI, ...).
pub fn ole_compound_file(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
}

// ── Amiga and Macintosh ───────────────────────────────────────────────────────

pub fn amiga_lzx(buf: &[u8]) -> bool {
    has_at(buf, 0, b"LZX")
}

pub fn amiga_dms(buf: &[u8]) -> bool {
    has_at(buf, 0, b"DMS!")
}

/// StuffIt 1.5 to 4 (`SIT!` ... `rLau`) and StuffIt 5.
pub fn stuffit(buf: &[u8]) -> bool {
    (has_at(buf, 0, b"SIT!") && has_at(buf, 10, b"rLau")) || has_at(buf, 0, b"StuffIt (c)1997-")
}

pub fn stuffit_x(buf: &[u8]) -> bool {
    has_at(buf, 0, b"StuffIt!")
}
