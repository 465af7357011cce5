//! Executable and program matchers.

use super::{has_any, has_at};

/// MS-DOS, Windows or OS/2 executable with an `MZ` (or the rare `ZM`)
/// header.
pub fn ms_exe(buf: &[u8]) -> bool {
    has_any(buf, 0, &[b"MZ", b"ZM"])
}

/// Opening instruction pairs seen in DOS `.com` programs, which have no
/// header at all.  This is a loose heuristic: any data file that happens to
/// start with one of these pairs matches too.
const DOS_COM_PREFIXES: [[u8; 2]; 6] = [
    [0xB4, 0x09], // mov ah, 09h   (print string)
    [0xB4, 0x4C], // mov ah, 4Ch   (terminate)
    [0x0E, 0x1F], // push cs; pop ds
    [0x8C, 0xC8], // mov ax, cs
    [0xFC, 0xBE], // cld; mov si, imm16
    [0xFA, 0xBC], // cli; mov sp, imm16
];

/// Near or short jump opcodes; most `.com` files open with one.
const DOS_COM_JUMPS: [u8; 3] = [0xE8, 0xE9, 0xEB];

pub fn dos_com(buf: &[u8]) -> bool {
    if buf.len() < 2 {
        return false;
    }
    DOS_COM_JUMPS.contains(&buf[0]) || DOS_COM_PREFIXES.iter().any(|p| buf[..2] == p[..])
}

pub fn elf(buf: &[u8]) -> bool {
    has_at(buf, 0, b"\x7FELF")
}

/// Thin 32 or 64-bit Mach-O, either byte order.  The `CAFEBABE` fat
/// header is shared with Java class files and is left to [`java_class`].
pub fn mach_o(buf: &[u8]) -> bool {
    has_any(
        buf,
        0,
        &[
            &[0xFE, 0xED, 0xFA, 0xCE],
            &[0xCE, 0xFA, 0xED, 0xFE],
            &[0xFE, 0xED, 0xFA, 0xCF],
            &[0xCF, 0xFA, 0xED, 0xFE],
        ],
    )
}

/// AmigaDOS load file, `HUNK_HEADER`.
pub fn amiga_hunk(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0x00, 0x00, 0x03, 0xF3])
}

/// Atari ST GEMDOS program: a `bra.s` over the 28 byte header.
pub fn atari_program(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0x60, 0x1A])
}

pub fn java_class(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0xCA, 0xFE, 0xBA, 0xBE])
}

pub fn windows_help(buf: &[u8]) -> bool {
    has_at(buf, 0, &[0x3F, 0x5F, 0x03, 0x00])
}
