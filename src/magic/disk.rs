//! CD-ROM and floppy disk image matchers.

use super::has_at;
use crate::probe::Sample;

/// Offsets checked for the ISO-9660 `CD001` standard identifier.  The
/// primary volume descriptor lives in sector 16; 34817 and 36865 catch
/// images whose first descriptors are boot or supplementary records.
pub const ISO9660_OFFSETS: [usize; 4] = [0, 32769, 34817, 36865];
pub const ISO9660_ID: &[u8; 5] = b"CD001";

pub fn iso9660(buf: &[u8]) -> bool {
    ISO9660_OFFSETS.iter().any(|&off| has_at(buf, off, ISO9660_ID))
}

/// Alcohol 120% media descriptor sidecar.
pub fn alcohol_image(buf: &[u8]) -> bool {
    has_at(buf, 0, b"MEDIA DESCRIPTOR")
}

pub fn power_iso_image(buf: &[u8]) -> bool {
    has_at(buf, 0, b"DAA\0\0\0\0\0")
}

/// Amiga DOS boot block, `DOS` followed by the filesystem flavour 0 to 7.
pub fn amiga_disk_file(buf: &[u8]) -> bool {
    has_at(buf, 0, b"DOS") && buf.len() >= 4 && buf[3] <= 7
}

/// Nero images end with a `NERO` (v1, 8 byte) or `NER5` (v2, 12 byte)
/// footer pointing back at the chunk list.
pub fn nero_image(sample: &Sample<'_>) -> bool {
    let tail = sample.tail;
    let n = tail.len();
    (n >= 8 && has_at(tail, n - 8, b"NERO")) || (n >= 12 && has_at(tail, n - 12, b"NER5"))
}

/// Apple UDIF disk image: the final 512 bytes are the `koly` trailer.
pub fn apple_disk_image(sample: &Sample<'_>) -> bool {
    let tail = sample.tail;
    tail.len() >= 512 && has_at(tail, tail.len() - 512, b"koly")
}
