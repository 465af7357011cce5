//! Audio, video and tracker music matchers.

use byteorder::{ByteOrder, LittleEndian};

use super::{has_any, has_at};

// ── Audio ─────────────────────────────────────────────────────────────────────

/// MP3: an ID3v2 tag header, or a bare MPEG audio layer III frame sync.
pub fn mp3(buf: &[u8]) -> bool {
    id3v2_header(buf) || mpeg_layer3_sync(buf)
}

/// `ID3` followed by a major version the decoder understands.
pub fn id3v2_header(buf: &[u8]) -> bool {
    has_at(buf, 0, b"ID3") && buf.len() >= 4 && (2..=4).contains(&buf[3])
}

/// 11-bit frame sync plus the layer III bits.
fn mpeg_layer3_sync(buf: &[u8]) -> bool {
    buf.len() >= 2 && buf[0] == 0xFF && buf[1] & 0xE0 == 0xE0 && buf[1] & 0x06 == 0x02
}

pub fn wave(buf: &[u8]) -> bool {
    has_at(buf, 0, b"RIFF") && has_at(buf, 8, b"WAVE")
}

pub fn aiff(buf: &[u8]) -> bool {
    has_at(buf, 0, b"FORM") && has_any(buf, 8, &[b"AIFF", b"AIFC"])
}

/// Any other IFF `FORM` with a printable four-character type.
pub fn iff(buf: &[u8]) -> bool {
    has_at(buf, 0, b"FORM")
        && buf.len() >= 12
        && buf[8..12].iter().all(|b| b.is_ascii_alphanumeric() || *b == b' ')
}

pub fn ogg(buf: &[u8]) -> bool {
    has_at(buf, 0, b"OggS")
}

pub fn flac(buf: &[u8]) -> bool {
    has_at(buf, 0, b"fLaC")
}

/// Standard MIDI file: `MThd` with its fixed six byte header length.
pub fn midi(buf: &[u8]) -> bool {
    has_at(buf, 0, b"MThd\x00\x00\x00\x06")
}

pub fn creative_voice(buf: &[u8]) -> bool {
    has_at(buf, 0, b"Creative Voice File\x1A")
}

pub fn sun_audio(buf: &[u8]) -> bool {
    has_at(buf, 0, b".snd")
}

pub fn real_media(buf: &[u8]) -> bool {
    has_at(buf, 0, b".RMF")
}

// ── Video ─────────────────────────────────────────────────────────────────────

pub fn avi(buf: &[u8]) -> bool {
    has_at(buf, 0, b"RIFF") && has_at(buf, 8, b"AVI ")
}

const MP4_BRANDS: [&[u8]; 10] = [
    b"isom", b"iso2", b"iso5", b"mp41", b"mp42", b"M4V ", b"M4A ", b"avc1", b"dash", b"3gp4",
];

pub fn mp4(buf: &[u8]) -> bool {
    has_at(buf, 4, b"ftyp") && has_any(buf, 8, &MP4_BRANDS)
}

/// QuickTime: the `qt` brand, or a classic movie whose first atom is one
/// of the top-level QuickTime atoms.
pub fn quicktime(buf: &[u8]) -> bool {
    has_at(buf, 4, b"ftypqt  ") || has_any(buf, 4, &[b"moov", b"mdat", b"wide", b"pnot"])
}

/// MPEG-1/2 program stream pack or video sequence header.
pub fn mpeg(buf: &[u8]) -> bool {
    has_any(buf, 0, &[&[0x00, 0x00, 0x01, 0xBA], &[0x00, 0x00, 0x01, 0xB3]])
}

pub fn flv(buf: &[u8]) -> bool {
    has_at(buf, 0, b"FLV\x01")
}

/// ASF header object GUID (WMV, WMA).
pub fn asf(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11])
}

/// EBML header, shared by Matroska and WebM.
pub fn matroska(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0x1A, 0x45, 0xDF, 0xA3])
}

/// Autodesk Animator FLI (`0xAF11`) or FLC (`0xAF12`), magic at offset 4.
pub fn autodesk_fli(buf: &[u8]) -> bool {
    buf.len() >= 6 && matches!(LittleEndian::read_u16(&buf[4..6]), 0xAF11 | 0xAF12)
}

// ── Tracker music ─────────────────────────────────────────────────────────────

/// Offset of the four-byte sample-count tag in 31-instrument MOD files.
pub const MOD_TAG_OFFSET: usize = 1080;

pub fn multitracker(buf: &[u8]) -> bool {
    has_at(buf, 0, b"MTM")
}

pub fn impulse_tracker(buf: &[u8]) -> bool {
    has_at(buf, 0, b"IMPM")
}

pub fn extended_module(buf: &[u8]) -> bool {
    has_at(buf, 0, b"Extended Module: ")
}

/// 4-channel ProTracker: `M.K.` (or `M!K!` past 64 patterns) at 1080.
pub fn protracker(buf: &[u8]) -> bool {
    has_any(buf, MOD_TAG_OFFSET, &[b"M.K.", b"M!K!"])
}

/// MOD variants with more channels: `6CHN`, `8CHN`, `16CH`, `32CH`,
/// StarTrekker `FLT4`/`FLT8`, Falcon `CD81` and Oktalyzer's `OKTA`.
pub fn multichannel_module(buf: &[u8]) -> bool {
    let Some(tag) = buf.get(MOD_TAG_OFFSET..MOD_TAG_OFFSET + 4) else {
        return false;
    };
    match tag {
        [d, b'C', b'H', b'N'] => d.is_ascii_digit(),
        [d1, d2, b'C', b'H']  => d1.is_ascii_digit() && d2.is_ascii_digit(),
        _ => matches!(tag, b"FLT4" | b"FLT8" | b"CD81" | b"OKTA"),
    }
}

pub fn scream_tracker3(buf: &[u8]) -> bool {
    has_at(buf, 44, b"SCRM")
}

pub fn scream_tracker2(buf: &[u8]) -> bool {
    has_at(buf, 20, b"!Scream!")
}

pub fn oktalyzer(buf: &[u8]) -> bool {
    has_at(buf, 0, b"OKTASONG")
}
