//! Ordered signature rules.
//!
//! Classification walks [`RULES`] top to bottom and returns the first
//! signature whose test matches.  Order is the whole policy:
//!
//! * wrappers before what they wrap (PKLITE and PKSFX before bare MZ),
//! * specific ZIP variants before baseline PKZIP, RAR 5 before RAR,
//! * ILBM before the generic IFF container,
//! * strict JPEG/PDF/RTF before their `NoSuffix` fallbacks,
//! * tracker tags at 1080 before the two-byte heuristics (ARC, DOS COM),
//! * text last.

use std::fmt;

use crate::magic::{archive, disk, image, media, program, text};
use crate::probe::Sample;
use crate::signature::Signature;

/// How a rule looks at a file.
#[derive(Clone, Copy)]
pub enum Test {
    /// Prefix-only check over the head bytes.
    Head(fn(&[u8]) -> bool),
    /// Check that also needs the tail or the true file length.
    Sample(fn(&Sample<'_>) -> bool),
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub signature: Signature,
    /// Shortest file the test can match.
    pub min_len:   usize,
    pub test:      Test,
}

impl Rule {
    pub fn matches(&self, sample: &Sample<'_>) -> bool {
        match self.test {
            Test::Head(f)   => f(sample.head),
            Test::Sample(f) => f(sample),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("signature", &self.signature)
            .field("min_len", &self.min_len)
            .finish()
    }
}

const fn head(signature: Signature, min_len: usize, f: fn(&[u8]) -> bool) -> Rule {
    Rule { signature, min_len, test: Test::Head(f) }
}

const fn sample(signature: Signature, min_len: usize, f: fn(&Sample<'_>) -> bool) -> Rule {
    Rule { signature, min_len, test: Test::Sample(f) }
}

use Signature as S;

/// Every rule in priority order.
pub static RULES: &[Rule] = &[
    // ── MZ wrappers ───────────────────────────────────────────────────────────
    head(S::Pklite,               36,   archive::pklite),
    head(S::Pksfx,                35,   archive::pksfx),
    head(S::MsExe,                2,    program::ms_exe),
    // ── PKZIP ─────────────────────────────────────────────────────────────────
    head(S::PkzipMultiVolume,     4,    archive::pkzip_multi_volume),
    head(S::PkzipShrink,          10,   archive::pkzip_shrink),
    head(S::PkzipReduce,          10,   archive::pkzip_reduce),
    head(S::PkzipImplode,         10,   archive::pkzip_implode),
    head(S::Pkzip64,              10,   archive::zip64),
    head(S::Pkzip,                10,   archive::pkzip),
    head(S::PkzipEmpty,           4,    archive::pkzip_empty),
    // ── Other archives ────────────────────────────────────────────────────────
    head(S::Rar5,                 8,    archive::rar5),
    head(S::Rar,                  7,    archive::rar),
    head(S::SevenZip,             6,    archive::seven_zip),
    head(S::Xz,                   6,    archive::xz),
    head(S::Zstandard,            4,    archive::zstandard),
    head(S::Gzip,                 3,    archive::gzip),
    head(S::Bzip2,                4,    archive::bzip2),
    head(S::MsCab,                8,    archive::ms_cab),
    head(S::InstallShieldCab,     4,    archive::installshield_cab),
    head(S::MsCompressSzdd,       8,    archive::ms_compress_szdd),
    head(S::MsCompressKwaj,       8,    archive::ms_compress_kwaj),
    head(S::OleCompoundFile,      8,    archive::ole_compound_file),
    head(S::Ace,                  14,   archive::ace),
    head(S::Zoo,                  24,   archive::zoo),
    head(S::Lha,                  7,    archive::lha),
    head(S::StuffItX,             8,    archive::stuffit_x),
    head(S::StuffIt,              14,   archive::stuffit),
    head(S::AmigaLzx,             3,    archive::amiga_lzx),
    head(S::AmigaDms,             4,    archive::amiga_dms),
    head(S::Tar,                  262,  archive::tar),
    // ── Disk images ───────────────────────────────────────────────────────────
    head(S::Iso9660,              5,    disk::iso9660),
    head(S::AlcoholImage,         16,   disk::alcohol_image),
    head(S::PowerIsoImage,        8,    disk::power_iso_image),
    sample(S::NeroImage,          8,    disk::nero_image),
    sample(S::AppleDiskImage,     512,  disk::apple_disk_image),
    head(S::AmigaDiskFile,        4,    disk::amiga_disk_file),
    // ── Programs with real headers ────────────────────────────────────────────
    head(S::Elf,                  4,    program::elf),
    head(S::MachO,                4,    program::mach_o),
    head(S::JavaClass,            4,    program::java_class),
    head(S::AmigaHunk,            4,    program::amiga_hunk),
    head(S::WindowsHelp,          4,    program::windows_help),
    // ── Images ────────────────────────────────────────────────────────────────
    head(S::Png,                  8,    image::png),
    sample(S::Jpeg,               5,    image::jpeg),
    head(S::JpegNoSuffix,         3,    image::jpeg_no_suffix),
    head(S::Jpeg2000,             12,   image::jpeg2000),
    head(S::Gif,                  6,    image::gif),
    head(S::Webp,                 12,   image::webp),
    head(S::Avif,                 12,   image::avif),
    head(S::Tiff,                 4,    image::tiff),
    head(S::Photoshop,            6,    image::photoshop),
    head(S::Ilbm,                 12,   image::ilbm),
    head(S::Bmp,                  18,   image::bmp),
    head(S::Ico,                  6,    image::ico),
    head(S::Colorix,              4,    image::colorix),
    head(S::Qoi,                  4,    image::qoi),
    // ── Audio and video containers ────────────────────────────────────────────
    head(S::Wave,                 12,   media::wave),
    head(S::Avi,                  12,   media::avi),
    head(S::Aiff,                 12,   media::aiff),
    head(S::Iff,                  12,   media::iff),
    head(S::Ogg,                  4,    media::ogg),
    head(S::Flac,                 4,    media::flac),
    head(S::Midi,                 8,    media::midi),
    head(S::CreativeVoice,        20,   media::creative_voice),
    head(S::SunAudio,             4,    media::sun_audio),
    head(S::RealMedia,            4,    media::real_media),
    head(S::Asf,                  8,    media::asf),
    head(S::Matroska,             4,    media::matroska),
    head(S::Flv,                  4,    media::flv),
    head(S::Mp4,                  12,   media::mp4),
    head(S::QuickTime,            8,    media::quicktime),
    head(S::Mpeg,                 4,    media::mpeg),
    // ── Tracker music ─────────────────────────────────────────────────────────
    head(S::ExtendedModule,       17,   media::extended_module),
    head(S::ImpulseTrackerModule, 4,    media::impulse_tracker),
    head(S::MultiTrackerModule,   3,    media::multitracker),
    head(S::ScreamTracker3Module, 48,   media::scream_tracker3),
    head(S::ScreamTracker2Module, 28,   media::scream_tracker2),
    head(S::OktalyzerModule,      8,    media::oktalyzer),
    head(S::ProTrackerModule,     1084, media::protracker),
    head(S::MultiChannelModule,   1084, media::multichannel_module),
    // ── MP3 ───────────────────────────────────────────────────────────────────
    head(S::Mp3,                  2,    media::mp3),
    // ── Documents ─────────────────────────────────────────────────────────────
    sample(S::Pdf,                10,   text::pdf),
    head(S::PdfNoSuffix,          5,    text::pdf_no_suffix),
    sample(S::Rtf,                7,    text::rtf),
    head(S::RtfNoSuffix,          6,    text::rtf_no_suffix),
    head(S::PostScript,           4,    text::postscript),
    // ── Byte order marks ──────────────────────────────────────────────────────
    head(S::Utf32Le,              4,    text::utf32_le),
    head(S::Utf32Be,              4,    text::utf32_be),
    head(S::Utf8Bom,              3,    text::utf8_bom),
    head(S::Utf16Le,              2,    text::utf16_le),
    head(S::Utf16Be,              2,    text::utf16_be),
    // ── Loose heuristics ──────────────────────────────────────────────────────
    head(S::AutodeskFli,          6,    media::autodesk_fli),
    sample(S::Targa,              18,   image::targa),
    head(S::Arj,                  4,    archive::arj),
    head(S::Arc,                  2,    archive::arc),
    head(S::Squeeze,              2,    archive::squeeze),
    head(S::UnixCompress,         2,    archive::unix_compress),
    head(S::Pcx,                  4,    image::pcx),
    head(S::AtariProgram,         2,    program::atari_program),
    head(S::DosCom,               2,    program::dos_com),
    // ── Text ──────────────────────────────────────────────────────────────────
    head(S::Ansi,                 3,    text::ansi),
    head(S::PlainText,            1,    text::plain_text),
];

/// The rule table in priority order.
pub fn rules() -> &'static [Rule] {
    RULES
}

/// The first rule that matches `sample`.
pub fn matching_rule(sample: &Sample<'_>) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(sample))
}

/// Classify a sample taken from a file.
pub fn classify_sample(sample: &Sample<'_>) -> Signature {
    matching_rule(sample).map_or(Signature::Unknown, |rule| rule.signature)
}

/// Classify `sample` with the rules for `excluded` signatures skipped.
pub fn classify_excluding<F>(sample: &Sample<'_>, excluded: F) -> Signature
where
    F: Fn(Signature) -> bool,
{
    RULES
        .iter()
        .filter(|rule| !excluded(rule.signature))
        .find(|rule| rule.matches(sample))
        .map_or(Signature::Unknown, |rule| rule.signature)
}

/// Classify `buf` as a complete file.
pub fn classify(buf: &[u8]) -> Signature {
    classify_sample(&Sample::whole(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn position(signature: Signature) -> usize {
        RULES
            .iter()
            .position(|r| r.signature == signature)
            .unwrap_or_else(|| panic!("{signature:?} has no rule"))
    }

    fn zip_header(method: u16) -> Vec<u8> {
        let mut buf = b"PK\x03\x04\x14\x00\x00\x00".to_vec();
        buf.extend_from_slice(&method.to_le_bytes());
        buf.extend_from_slice(&[0u8; 20]);
        buf
    }

    #[test]
    fn zip_methods() {
        assert_eq!(classify(&zip_header(0x08)), Signature::Pkzip);
        assert_eq!(classify(&zip_header(0x00)), Signature::Pkzip);
        assert_eq!(classify(&zip_header(0x01)), Signature::PkzipShrink);
        assert_eq!(classify(&zip_header(0x03)), Signature::PkzipReduce);
        assert_eq!(classify(&zip_header(0x06)), Signature::PkzipImplode);
    }

    #[test]
    fn zip64_wins_over_pkzip() {
        let mut buf = zip_header(0x08);
        buf[4] = 45;
        assert_eq!(classify(&buf), Signature::Pkzip64);
    }

    #[test]
    fn every_signature_has_one_rule() {
        let mut seen = HashSet::new();
        for rule in RULES {
            assert!(seen.insert(rule.signature), "{:?} listed twice", rule.signature);
        }
        assert!(!seen.contains(&Signature::Unknown));
    }

    #[test]
    fn specific_before_generic() {
        assert!(position(Signature::Pklite) < position(Signature::MsExe));
        assert!(position(Signature::Pksfx) < position(Signature::MsExe));
        assert!(position(Signature::PkzipShrink) < position(Signature::Pkzip));
        assert!(position(Signature::Pkzip64) < position(Signature::Pkzip));
        assert!(position(Signature::Rar5) < position(Signature::Rar));
        assert!(position(Signature::Ilbm) < position(Signature::Iff));
        assert!(position(Signature::Jpeg) < position(Signature::JpegNoSuffix));
        assert!(position(Signature::Pdf) < position(Signature::PdfNoSuffix));
        assert!(position(Signature::Rtf) < position(Signature::RtfNoSuffix));
        assert!(position(Signature::ProTrackerModule) < position(Signature::Arc));
        assert!(position(Signature::MultiChannelModule) < position(Signature::DosCom));
        assert!(position(Signature::Utf32Le) < position(Signature::Utf16Le));
        assert_eq!(RULES.last().map(|r| r.signature), Some(Signature::PlainText));
    }

    #[test]
    fn pklite_is_not_plain_mz() {
        let mut buf = vec![0u8; 64];
        buf[..2].copy_from_slice(b"MZ");
        assert_eq!(classify(&buf), Signature::MsExe);
        buf[30..36].copy_from_slice(b"PKLITE");
        assert_eq!(classify(&buf), Signature::Pklite);
    }

    #[test]
    fn ilbm_and_other_iff() {
        assert_eq!(classify(b"FORM\x00\x00\x00\x10ILBMBMHD"), Signature::Ilbm);
        assert_eq!(classify(b"FORM\x00\x00\x00\x10AIFFCOMM"), Signature::Aiff);
        assert_eq!(classify(b"FORM\x00\x00\x00\x108SVXVHDR"), Signature::Iff);
    }

    #[test]
    fn jpeg_suffix_decides_variant() {
        let mut buf = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert_eq!(classify(&buf), Signature::JpegNoSuffix);
        buf.extend_from_slice(&[0xFF, 0xD9]);
        assert_eq!(classify(&buf), Signature::Jpeg);
    }

    #[test]
    fn tail_only_markers_use_the_sample() {
        let head = b"%PDF-1.4\n1 0 obj".to_vec();
        let tail = b"startxref\n0\n%%EOF\n".to_vec();
        let s = Sample { head: &head, tail: &tail, len: 100_000 };
        assert_eq!(classify_sample(&s), Signature::Pdf);
        assert_eq!(classify(&head), Signature::PdfNoSuffix);
    }

    #[test]
    fn protracker_before_text() {
        let mut buf = vec![b' '; 1084];
        buf[..8].copy_from_slice(b"BeatDown");
        buf[1080..1084].copy_from_slice(b"M.K.");
        assert_eq!(classify(&buf), Signature::ProTrackerModule);
        buf[1080..1084].copy_from_slice(b"8CHN");
        assert_eq!(classify(&buf), Signature::MultiChannelModule);
    }

    #[test]
    fn text_and_ansi() {
        assert_eq!(classify(b"Welcome to the BBS!\r\n"), Signature::PlainText);
        assert_eq!(classify(b"\x1b[1;33mWelcome\x1b[0m\r\n"), Signature::Ansi);
        assert_eq!(classify(b"\x00\x01\x02\x03binary"), Signature::Unknown);
        assert_eq!(classify(b""), Signature::Unknown);
    }

    #[test]
    fn excluded_rules_fall_through() {
        let buf = b"\x60\x1a\x00\x00\x10\x00";
        assert_eq!(classify(buf), Signature::AtariProgram);
        let s = Sample::whole(buf);
        assert_eq!(classify_excluding(&s, |sig| sig.is_ambiguous_program()), Signature::Unknown);
    }

    #[test]
    fn deterministic() {
        let buf = zip_header(0x08);
        let first = classify(&buf);
        for _ in 0..10 {
            assert_eq!(classify(&buf), first);
        }
    }

    // ── Minimum lengths ──────────────────────────────────────────────────────

    /// `len` zero bytes with `parts` written at their offsets.
    fn pad(len: usize, parts: &[(usize, &[u8])]) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        for (offset, bytes) in parts {
            buf[*offset..*offset + bytes.len()].copy_from_slice(bytes);
        }
        buf
    }

    /// The shortest buffer each rule accepts.
    fn shortest_matches() -> Vec<(Signature, Vec<u8>)> {
        vec![
            (S::Pklite,               pad(36, &[(0, b"MZ"), (30, b"PKLITE")])),
            (S::Pksfx,                pad(35, &[(0, b"MZ"), (30, b"PKSFX")])),
            (S::MsExe,                b"MZ".to_vec()),
            (S::PkzipMultiVolume,     b"PK\x07\x08".to_vec()),
            (S::PkzipShrink,          b"PK\x03\x04\x0a\x00\x00\x00\x01\x00".to_vec()),
            (S::PkzipReduce,          b"PK\x03\x04\x0a\x00\x00\x00\x03\x00".to_vec()),
            (S::PkzipImplode,         b"PK\x03\x04\x0a\x00\x00\x00\x06\x00".to_vec()),
            (S::Pkzip64,              b"PK\x03\x04\x2d\x00\x00\x00\x08\x00".to_vec()),
            (S::Pkzip,                b"PK\x03\x04\x14\x00\x00\x00\x08\x00".to_vec()),
            (S::PkzipEmpty,           b"PK\x05\x06".to_vec()),
            (S::Rar5,                 b"Rar!\x1a\x07\x01\x00".to_vec()),
            (S::Rar,                  b"Rar!\x1a\x07\x00".to_vec()),
            (S::SevenZip,             vec![0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C]),
            (S::Xz,                   vec![0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00]),
            (S::Zstandard,            vec![0x28, 0xB5, 0x2F, 0xFD]),
            (S::Gzip,                 vec![0x1F, 0x8B, 0x08]),
            (S::Bzip2,                b"BZh9".to_vec()),
            (S::MsCab,                b"MSCF\0\0\0\0".to_vec()),
            (S::InstallShieldCab,     b"ISc(".to_vec()),
            (S::MsCompressSzdd,       b"SZDD\x88\xf0\x27\x33".to_vec()),
            (S::MsCompressKwaj,       b"KWAJ\x88\xf0\x27\xd1".to_vec()),
            (S::OleCompoundFile,      vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]),
            (S::Ace,                  pad(14, &[(7, b"**ACE**")])),
            (S::Zoo,                  pad(24, &[(0, b"ZOO "), (20, &[0xDC, 0xA7, 0xC4, 0xFD])])),
            (S::Lha,                  b"\x00\x00-lh5-".to_vec()),
            (S::StuffItX,             b"StuffIt!".to_vec()),
            (S::StuffIt,              pad(14, &[(0, b"SIT!"), (10, b"rLau")])),
            (S::AmigaLzx,             b"LZX".to_vec()),
            (S::AmigaDms,             b"DMS!".to_vec()),
            (S::Tar,                  pad(262, &[(257, b"ustar")])),
            (S::Iso9660,              b"CD001".to_vec()),
            (S::AlcoholImage,         b"MEDIA DESCRIPTOR".to_vec()),
            (S::PowerIsoImage,        b"DAA\0\0\0\0\0".to_vec()),
            (S::NeroImage,            b"NERO\0\0\0\0".to_vec()),
            (S::AppleDiskImage,       pad(512, &[(0, b"koly")])),
            (S::AmigaDiskFile,        b"DOS\x00".to_vec()),
            (S::Elf,                  b"\x7fELF".to_vec()),
            (S::MachO,                vec![0xFE, 0xED, 0xFA, 0xCE]),
            (S::JavaClass,            vec![0xCA, 0xFE, 0xBA, 0xBE]),
            (S::AmigaHunk,            vec![0x00, 0x00, 0x03, 0xF3]),
            (S::WindowsHelp,          vec![0x3F, 0x5F, 0x03, 0x00]),
            (S::Png,                  image::PNG.to_vec()),
            (S::Jpeg,                 vec![0xFF, 0xD8, 0xFF, 0xFF, 0xD9]),
            (S::JpegNoSuffix,         vec![0xFF, 0xD8, 0xFF]),
            (S::Jpeg2000,             b"\x00\x00\x00\x0cjP  \x0d\x0a\x87\x0a".to_vec()),
            (S::Gif,                  b"GIF89a".to_vec()),
            (S::Webp,                 b"RIFF\0\0\0\0WEBP".to_vec()),
            (S::Avif,                 b"\0\0\0\0ftypavif".to_vec()),
            (S::Tiff,                 b"II*\x00".to_vec()),
            (S::Photoshop,            b"8BPS\x00\x01".to_vec()),
            (S::Ilbm,                 b"FORM\0\0\0\0ILBM".to_vec()),
            (S::Bmp,                  pad(18, &[(0, b"BM"), (14, &[40])])),
            (S::Ico,                  vec![0x00, 0x00, 0x01, 0x00, 0x01, 0x00]),
            (S::Colorix,              b"RIX3".to_vec()),
            (S::Qoi,                  b"qoif".to_vec()),
            (S::Wave,                 b"RIFF\0\0\0\0WAVE".to_vec()),
            (S::Avi,                  b"RIFF\0\0\0\0AVI ".to_vec()),
            (S::Aiff,                 b"FORM\0\0\0\0AIFF".to_vec()),
            (S::Iff,                  b"FORM\0\0\0\08SVX".to_vec()),
            (S::Ogg,                  b"OggS".to_vec()),
            (S::Flac,                 b"fLaC".to_vec()),
            (S::Midi,                 b"MThd\0\0\0\x06".to_vec()),
            (S::CreativeVoice,        b"Creative Voice File\x1a".to_vec()),
            (S::SunAudio,             b".snd".to_vec()),
            (S::RealMedia,            b".RMF".to_vec()),
            (S::Asf,                  vec![0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11]),
            (S::Matroska,             vec![0x1A, 0x45, 0xDF, 0xA3]),
            (S::Flv,                  b"FLV\x01".to_vec()),
            (S::Mp4,                  b"\0\0\0\0ftypisom".to_vec()),
            (S::QuickTime,            b"\0\0\0\0moov".to_vec()),
            (S::Mpeg,                 vec![0x00, 0x00, 0x01, 0xBA]),
            (S::ExtendedModule,       b"Extended Module: ".to_vec()),
            (S::ImpulseTrackerModule, b"IMPM".to_vec()),
            (S::MultiTrackerModule,   b"MTM".to_vec()),
            (S::ScreamTracker3Module, pad(48, &[(44, b"SCRM")])),
            (S::ScreamTracker2Module, pad(28, &[(20, b"!Scream!")])),
            (S::OktalyzerModule,      b"OKTASONG".to_vec()),
            (S::ProTrackerModule,     pad(1084, &[(1080, b"M.K.")])),
            (S::MultiChannelModule,   pad(1084, &[(1080, b"8CHN")])),
            (S::Mp3,                  vec![0xFF, 0xFB]),
            (S::Pdf,                  b"%PDF-%%EOF".to_vec()),
            (S::PdfNoSuffix,          b"%PDF-".to_vec()),
            (S::Rtf,                  b"{\\rtf1}".to_vec()),
            (S::RtfNoSuffix,          b"{\\rtf1".to_vec()),
            (S::PostScript,           b"%!PS".to_vec()),
            (S::Utf32Le,              vec![0xFF, 0xFE, 0x00, 0x00]),
            (S::Utf32Be,              vec![0x00, 0x00, 0xFE, 0xFF]),
            (S::Utf8Bom,              vec![0xEF, 0xBB, 0xBF]),
            (S::Utf16Le,              vec![0xFF, 0xFE]),
            (S::Utf16Be,              vec![0xFE, 0xFF]),
            (S::AutodeskFli,          pad(6, &[(4, &[0x11, 0xAF])])),
            (S::Targa,                b"TRUEVISION-XFILE.\0".to_vec()),
            (S::Arj,                  vec![0x60, 0xEA, 0x01, 0x00]),
            (S::Arc,                  vec![0x1A, 0x08]),
            (S::Squeeze,              vec![0x76, 0xFF]),
            (S::UnixCompress,         vec![0x1F, 0x9D]),
            (S::Pcx,                  vec![0x0A, 0x05, 0x01, 0x08]),
            (S::AtariProgram,         vec![0x60, 0x1A]),
            (S::DosCom,               vec![0xE9, 0x00]),
            (S::Ansi,                 b"\x1b[m".to_vec()),
            (S::PlainText,            b"a".to_vec()),
        ]
    }

    #[test]
    fn min_len_is_exact_for_every_rule() {
        let fixtures = shortest_matches();
        for rule in RULES {
            let (_, buf) = fixtures
                .iter()
                .find(|(sig, _)| *sig == rule.signature)
                .unwrap_or_else(|| panic!("no fixture for {:?}", rule.signature));
            assert_eq!(buf.len(), rule.min_len, "{:?} fixture length", rule.signature);
            assert!(rule.matches(&Sample::whole(buf)), "{:?} rejects its fixture", rule.signature);
            let short = &buf[..buf.len() - 1];
            assert!(!rule.matches(&Sample::whole(short)), "{:?} matched {} bytes", rule.signature, short.len());
        }
        assert_eq!(fixtures.len(), RULES.len());
    }
}
