//! The closed set of formats this crate can identify.
//!
//! Every classification produces exactly one [`Signature`].  The enum is
//! frozen data: titles and names are `'static`.  The category predicates
//! are explicit variant lists and may overlap (PKSFX is both an archive and
//! a program); a variant in none of them is listed by its title only.

use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signature {
    // ── Archives ─────────────────────────────────────────────────────────────
    Pkzip,
    PkzipShrink,
    PkzipReduce,
    PkzipImplode,
    Pkzip64,
    PkzipMultiVolume,
    PkzipEmpty,
    Pklite,
    Pksfx,
    Arc,
    Arj,
    Lha,
    Zoo,
    Rar,
    Rar5,
    Gzip,
    Bzip2,
    SevenZip,
    Xz,
    Zstandard,
    Tar,
    MsCab,
    MsCompressSzdd,
    MsCompressKwaj,
    InstallShieldCab,
    Ace,
    AmigaLzx,
    AmigaDms,
    StuffIt,
    StuffItX,
    Squeeze,
    UnixCompress,
    OleCompoundFile,

    // ── Disk images ──────────────────────────────────────────────────────────
    Iso9660,
    NeroImage,
    AlcoholImage,
    PowerIsoImage,
    AppleDiskImage,
    AmigaDiskFile,

    // ── Programs ─────────────────────────────────────────────────────────────
    MsExe,
    DosCom,
    Elf,
    MachO,
    AmigaHunk,
    AtariProgram,
    JavaClass,
    WindowsHelp,

    // ── Images ───────────────────────────────────────────────────────────────
    Png,
    Jpeg,
    JpegNoSuffix,
    Jpeg2000,
    Gif,
    Bmp,
    Tiff,
    Webp,
    Avif,
    Ilbm,
    Iff,
    Pcx,
    Ico,
    Photoshop,
    Targa,
    Colorix,
    Qoi,

    // ── Audio ────────────────────────────────────────────────────────────────
    Mp3,
    Wave,
    Aiff,
    Ogg,
    Flac,
    Midi,
    CreativeVoice,
    SunAudio,
    RealMedia,

    // ── Video ────────────────────────────────────────────────────────────────
    Avi,
    Mp4,
    QuickTime,
    Mpeg,
    Flv,
    Asf,
    Matroska,
    AutodeskFli,

    // ── Tracker music ────────────────────────────────────────────────────────
    MultiTrackerModule,
    ImpulseTrackerModule,
    ExtendedModule,
    ProTrackerModule,
    MultiChannelModule,
    ScreamTracker3Module,
    ScreamTracker2Module,
    OktalyzerModule,

    // ── Documents and text ───────────────────────────────────────────────────
    Pdf,
    PdfNoSuffix,
    Rtf,
    RtfNoSuffix,
    PostScript,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
    Ansi,
    PlainText,

    Unknown,
}

impl Signature {
    /// Stable lower-case identifier, used for CLI and JSON output.
    pub fn name(self) -> &'static str {
        use Signature::*;
        match self {
            Pkzip                => "pkzip",
            PkzipShrink          => "pkzip-shrink",
            PkzipReduce          => "pkzip-reduce",
            PkzipImplode         => "pkzip-implode",
            Pkzip64              => "pkzip64",
            PkzipMultiVolume     => "pkzip-multi-volume",
            PkzipEmpty           => "pkzip-empty",
            Pklite               => "pklite",
            Pksfx                => "pksfx",
            Arc                  => "arc",
            Arj                  => "arj",
            Lha                  => "lha",
            Zoo                  => "zoo",
            Rar                  => "rar",
            Rar5                 => "rar5",
            Gzip                 => "gzip",
            Bzip2                => "bzip2",
            SevenZip             => "7z",
            Xz                   => "xz",
            Zstandard            => "zstd",
            Tar                  => "tar",
            MsCab                => "ms-cab",
            MsCompressSzdd       => "ms-szdd",
            MsCompressKwaj       => "ms-kwaj",
            InstallShieldCab     => "installshield-cab",
            Ace                  => "ace",
            AmigaLzx             => "lzx",
            AmigaDms             => "dms",
            StuffIt              => "stuffit",
            StuffItX             => "stuffitx",
            Squeeze              => "squeeze",
            UnixCompress         => "compress",
            OleCompoundFile      => "ole2",
            Iso9660              => "iso9660",
            NeroImage            => "nrg",
            AlcoholImage         => "mds",
            PowerIsoImage        => "daa",
            AppleDiskImage       => "dmg",
            AmigaDiskFile        => "adf",
            MsExe                => "mz",
            DosCom               => "dos-com",
            Elf                  => "elf",
            MachO                => "mach-o",
            AmigaHunk            => "amiga-hunk",
            AtariProgram         => "atari-prg",
            JavaClass            => "java-class",
            WindowsHelp          => "winhelp",
            Png                  => "png",
            Jpeg                 => "jpeg",
            JpegNoSuffix         => "jpeg-no-suffix",
            Jpeg2000             => "jp2",
            Gif                  => "gif",
            Bmp                  => "bmp",
            Tiff                 => "tiff",
            Webp                 => "webp",
            Avif                 => "avif",
            Ilbm                 => "ilbm",
            Iff                  => "iff",
            Pcx                  => "pcx",
            Ico                  => "ico",
            Photoshop            => "psd",
            Targa                => "tga",
            Colorix              => "rix",
            Qoi                  => "qoi",
            Mp3                  => "mp3",
            Wave                 => "wave",
            Aiff                 => "aiff",
            Ogg                  => "ogg",
            Flac                 => "flac",
            Midi                 => "midi",
            CreativeVoice        => "voc",
            SunAudio             => "au",
            RealMedia            => "realmedia",
            Avi                  => "avi",
            Mp4                  => "mp4",
            QuickTime            => "quicktime",
            Mpeg                 => "mpeg",
            Flv                  => "flv",
            Asf                  => "asf",
            Matroska             => "matroska",
            AutodeskFli          => "fli",
            MultiTrackerModule   => "mtm",
            ImpulseTrackerModule => "it",
            ExtendedModule       => "xm",
            ProTrackerModule     => "mod",
            MultiChannelModule   => "mod-multichannel",
            ScreamTracker3Module => "s3m",
            ScreamTracker2Module => "stm",
            OktalyzerModule      => "okt",
            Pdf                  => "pdf",
            PdfNoSuffix          => "pdf-no-suffix",
            Rtf                  => "rtf",
            RtfNoSuffix          => "rtf-no-suffix",
            PostScript           => "postscript",
            Utf8Bom              => "utf8-bom",
            Utf16Le              => "utf16le",
            Utf16Be              => "utf16be",
            Utf32Le              => "utf32le",
            Utf32Be              => "utf32be",
            Ansi                 => "ansi",
            PlainText            => "text",
            Unknown              => "unknown",
        }
    }

    /// Human-readable format title.
    pub fn title(self) -> &'static str {
        use Signature::*;
        match self {
            Pkzip                => "PKZIP compressed archive",
            PkzipShrink          => "PKZIP shrunk archive",
            PkzipReduce          => "PKZIP reduced archive",
            PkzipImplode         => "PKZIP imploded archive",
            Pkzip64              => "PKZIP Zip64 archive",
            PkzipMultiVolume     => "PKZIP multi-volume archive",
            PkzipEmpty           => "PKZIP empty archive",
            Pklite               => "PKLITE compressed executable",
            Pksfx                => "PKZIP self-extracting archive",
            Arc                  => "ARC compressed archive",
            Arj                  => "ARJ compressed archive",
            Lha                  => "LHA compressed archive",
            Zoo                  => "Zoo compressed archive",
            Rar                  => "RAR compressed archive",
            Rar5                 => "RAR v5+ compressed archive",
            Gzip                 => "gzip compressed archive",
            Bzip2                => "bzip2 compressed archive",
            SevenZip             => "7-Zip compressed archive",
            Xz                   => "XZ compressed archive",
            Zstandard            => "Zstandard compressed archive",
            Tar                  => "Tape archive",
            MsCab                => "Microsoft cabinet archive",
            MsCompressSzdd       => "Microsoft compressed file (SZDD)",
            MsCompressKwaj       => "Microsoft compressed file (KWAJ)",
            InstallShieldCab     => "InstallShield cabinet archive",
            Ace                  => "ACE compressed archive",
            AmigaLzx             => "Amiga LZX compressed archive",
            AmigaDms             => "Amiga DiskMasher archive",
            StuffIt              => "StuffIt compressed archive",
            StuffItX             => "StuffIt X compressed archive",
            Squeeze              => "CP/M squeezed file",
            UnixCompress         => "Unix compressed file",
            OleCompoundFile      => "Microsoft compound document",
            Iso9660              => "ISO 9660 CD-ROM image",
            NeroImage            => "Nero CD image",
            AlcoholImage         => "Alcohol 120% CD image",
            PowerIsoImage        => "PowerISO CD image",
            AppleDiskImage       => "Apple disk image",
            AmigaDiskFile        => "Amiga disk file",
            MsExe                => "MS-DOS or Windows executable",
            DosCom               => "MS-DOS COM program",
            Elf                  => "Unix ELF executable",
            MachO                => "macOS Mach-O executable",
            AmigaHunk            => "Amiga hunk executable",
            AtariProgram         => "Atari ST program",
            JavaClass            => "Java class file",
            WindowsHelp          => "Windows help file",
            Png                  => "PNG",
            Jpeg                 => "JPEG",
            JpegNoSuffix         => "JPEG",
            Jpeg2000             => "JPEG 2000",
            Gif                  => "GIF",
            Bmp                  => "BMP",
            Tiff                 => "TIFF",
            Webp                 => "WebP",
            Avif                 => "AVIF",
            Ilbm                 => "Amiga IFF ILBM",
            Iff                  => "IFF interchange file",
            Pcx                  => "ZSoft PCX",
            Ico                  => "Windows icon",
            Photoshop            => "Photoshop",
            Targa                => "Truevision Targa",
            Colorix              => "ColoRIX",
            Qoi                  => "QOI",
            Mp3                  => "MPEG layer 3 audio",
            Wave                 => "Wave audio",
            Aiff                 => "AIFF audio",
            Ogg                  => "Ogg audio",
            Flac                 => "FLAC audio",
            Midi                 => "MIDI music",
            CreativeVoice        => "Creative Voice audio",
            SunAudio             => "Sun audio",
            RealMedia            => "RealMedia stream",
            Avi                  => "AVI video",
            Mp4                  => "MPEG-4 video",
            QuickTime            => "QuickTime video",
            Mpeg                 => "MPEG video",
            Flv                  => "Flash video",
            Asf                  => "Windows Media video",
            Matroska             => "Matroska video",
            AutodeskFli          => "Autodesk FLIC animation",
            MultiTrackerModule   => "MultiTracker module",
            ImpulseTrackerModule => "Impulse Tracker module",
            ExtendedModule       => "FastTracker 2 extended module",
            ProTrackerModule     => "ProTracker module",
            MultiChannelModule   => "multi-channel tracker module",
            ScreamTracker3Module => "ScreamTracker 3 module",
            ScreamTracker2Module => "ScreamTracker 2 module",
            OktalyzerModule      => "Oktalyzer module",
            Pdf                  => "PDF document",
            PdfNoSuffix          => "PDF document",
            Rtf                  => "Rich text document",
            RtfNoSuffix          => "Rich text document",
            PostScript           => "PostScript document",
            Utf8Bom              => "UTF-8 text",
            Utf16Le              => "UTF-16 text",
            Utf16Be              => "UTF-16 text",
            Utf32Le              => "UTF-32 text",
            Utf32Be              => "UTF-32 text",
            Ansi                 => "ANSI text",
            PlainText            => "plain text",
            Unknown              => "unknown format",
        }
    }

    pub fn is_archive(self) -> bool {
        use Signature::*;
        matches!(
            self,
            Pkzip | PkzipShrink | PkzipReduce | PkzipImplode | Pkzip64 | PkzipMultiVolume
                | PkzipEmpty | Pksfx | Arc | Arj | Lha | Zoo | Rar | Rar5 | Gzip | Bzip2
                | SevenZip | Xz | Zstandard | Tar | MsCab | MsCompressSzdd | MsCompressKwaj
                | InstallShieldCab | Ace | AmigaLzx | AmigaDms | StuffIt | StuffItX
                | Squeeze | UnixCompress
        )
    }

    /// PKZIP members stored with a method that modern extractors refuse.
    pub fn is_legacy_zip(self) -> bool {
        matches!(self, Signature::PkzipShrink | Signature::PkzipReduce | Signature::PkzipImplode)
    }

    pub fn is_disk_image(self) -> bool {
        use Signature::*;
        matches!(
            self,
            Iso9660 | NeroImage | AlcoholImage | PowerIsoImage | AppleDiskImage | AmigaDiskFile
        )
    }

    pub fn is_program(self) -> bool {
        use Signature::*;
        matches!(
            self,
            MsExe | Pklite | Pksfx | DosCom | Elf | MachO | AmigaHunk | AtariProgram | JavaClass
        )
    }

    /// Program signatures matched by a two-byte heuristic that also turns
    /// up in DOS data files.
    pub fn is_ambiguous_program(self) -> bool {
        matches!(self, Signature::AtariProgram)
    }

    /// Executables that carry an MZ header worth decoding.
    pub fn is_mz(self) -> bool {
        matches!(self, Signature::MsExe | Signature::Pklite | Signature::Pksfx)
    }

    pub fn is_image(self) -> bool {
        use Signature::*;
        matches!(
            self,
            Png | Jpeg | JpegNoSuffix | Jpeg2000 | Gif | Bmp | Tiff | Webp | Avif | Ilbm | Pcx
                | Ico | Photoshop | Targa | Colorix | Qoi
        )
    }

    pub fn is_audio(self) -> bool {
        use Signature::*;
        matches!(
            self,
            Mp3 | Wave | Aiff | Ogg | Flac | Midi | CreativeVoice | SunAudio | RealMedia
        )
    }

    pub fn is_video(self) -> bool {
        use Signature::*;
        matches!(self, Avi | Mp4 | QuickTime | Mpeg | Flv | Asf | Matroska | AutodeskFli)
    }

    pub fn is_tracker(self) -> bool {
        use Signature::*;
        matches!(
            self,
            MultiTrackerModule | ImpulseTrackerModule | ExtendedModule | ProTrackerModule
                | MultiChannelModule | ScreamTracker3Module | ScreamTracker2Module
                | OktalyzerModule
        )
    }

    /// Readable text, the candidates for a readme preview.
    pub fn is_text(self) -> bool {
        use Signature::*;
        matches!(
            self,
            Utf8Bom | Utf16Le | Utf16Be | Utf32Le | Utf32Be | Ansi | PlainText
        )
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
