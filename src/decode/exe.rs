//! MZ executable headers.
//!
//! A plain MZ header describes a DOS program.  Windows and OS/2 programs
//! keep a DOS stub in front of their real header, found through the
//! `e_lfanew` pointer at offset 0x3C: `NE` for 16-bit New Executables,
//! `PE\0\0` for Portable Executables.

use byteorder::{ByteOrder, LittleEndian};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::fmt;

/// Offset of the `e_lfanew` pointer in the MZ header.
pub const E_LFANEW: usize = 0x3C;
/// First year a PE link timestamp is believed.
pub const FIRST_PE_YEAR: i32 = 1993;

const NE_TARGET_OS:   usize = 0x36;
const PE_TIMESTAMP:   usize = 8;
const PE_OPTIONAL:    usize = 24;
const PE_SUBSYSTEM:   usize = PE_OPTIONAL + 68;
const PE32_MAGIC:     u16   = 0x10b;
const PE32PLUS_MAGIC: u16   = 0x20b;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExeKind {
    Dos,
    NewExecutable,
    Pe32,
    Pe64,
}

/// NE target operating system byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeTarget {
    Unknown,
    Os2,
    Windows,
    Dos4,
    Windows386,
    Boss,
}

impl From<u8> for NeTarget {
    fn from(b: u8) -> Self {
        match b {
            1 => NeTarget::Os2,
            2 => NeTarget::Windows,
            3 => NeTarget::Dos4,
            4 => NeTarget::Windows386,
            5 => NeTarget::Boss,
            _ => NeTarget::Unknown,
        }
    }
}

/// PE optional header subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subsystem {
    Unknown,
    Native,
    WindowsGui,
    WindowsConsole,
    Os2Console,
    PosixConsole,
    WindowsCe,
    Efi,
    Xbox,
}

impl From<u16> for Subsystem {
    fn from(v: u16) -> Self {
        match v {
            1           => Subsystem::Native,
            2           => Subsystem::WindowsGui,
            3           => Subsystem::WindowsConsole,
            5           => Subsystem::Os2Console,
            7           => Subsystem::PosixConsole,
            9           => Subsystem::WindowsCe,
            10..=13     => Subsystem::Efi,
            14          => Subsystem::Xbox,
            _           => Subsystem::Unknown,
        }
    }
}

impl Subsystem {
    pub fn label(self) -> &'static str {
        match self {
            Subsystem::Unknown        => "unknown",
            Subsystem::Native         => "native",
            Subsystem::WindowsGui     => "GUI",
            Subsystem::WindowsConsole => "console",
            Subsystem::Os2Console     => "OS/2 console",
            Subsystem::PosixConsole   => "POSIX console",
            Subsystem::WindowsCe      => "Windows CE",
            Subsystem::Efi            => "EFI",
            Subsystem::Xbox           => "Xbox",
        }
    }
}

/// What the headers of an MZ program say about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Executable {
    pub kind:      ExeKind,
    /// Only set for New Executables.
    pub target:    Option<NeTarget>,
    /// Only set for Portable Executables.
    pub subsystem: Option<Subsystem>,
    /// PE link time, when plausible.
    pub built:     Option<DateTime<Utc>>,
}

impl Executable {
    fn dos() -> Self {
        Self { kind: ExeKind::Dos, target: None, subsystem: None, built: None }
    }

    /// Short platform label: `MS-DOS`, `Windows 16-bit`, `Windows 64-bit`...
    pub fn title(&self) -> &'static str {
        match (self.kind, self.target) {
            (ExeKind::Dos, _)                              => "MS-DOS",
            (ExeKind::NewExecutable, Some(NeTarget::Os2))  => "OS/2 16-bit",
            (ExeKind::NewExecutable, Some(NeTarget::Dos4)) => "European MS-DOS 4",
            (ExeKind::NewExecutable, _)                    => "Windows 16-bit",
            (ExeKind::Pe32, _)                             => "Windows 32-bit",
            (ExeKind::Pe64, _)                             => "Windows 64-bit",
        }
    }

    /// `"<title> executable"` with the build date when known.
    pub fn describe(&self) -> String {
        match self.built {
            Some(t) => format!("{} executable, built {}", self.title(), t.format("%Y-%m-%d")),
            None    => format!("{} executable", self.title()),
        }
    }
}

impl fmt::Display for Executable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Decode the headers of an MZ program.  Returns `None` when `buf` does not
/// start with an MZ header; a stub whose `e_lfanew` points nowhere useful
/// is a plain DOS program.
pub fn executable(buf: &[u8]) -> Option<Executable> {
    if !(buf.starts_with(b"MZ") || buf.starts_with(b"ZM")) {
        return None;
    }
    let Some(at) = le32(buf, E_LFANEW).map(|v| v as usize) else {
        return Some(Executable::dos());
    };
    if at < 0x40 {
        return Some(Executable::dos());
    }
    let exe = match buf.get(at..at.saturating_add(4)) {
        Some([b'P', b'E', 0, 0]) => portable(buf, at),
        Some([b'N', b'E', _, _]) => Some(Executable {
            kind:      ExeKind::NewExecutable,
            target:    buf.get(at + NE_TARGET_OS).map(|b| NeTarget::from(*b)),
            subsystem: None,
            built:     None,
        }),
        _ => None,
    };
    Some(exe.unwrap_or_else(Executable::dos))
}

fn portable(buf: &[u8], pe: usize) -> Option<Executable> {
    let kind = match le16(buf, pe + PE_OPTIONAL)? {
        PE32_MAGIC     => ExeKind::Pe32,
        PE32PLUS_MAGIC => ExeKind::Pe64,
        _              => return None,
    };
    Some(Executable {
        kind,
        target:    None,
        subsystem: le16(buf, pe + PE_SUBSYSTEM).map(Subsystem::from),
        built:     le32(buf, pe + PE_TIMESTAMP).and_then(link_time),
    })
}

/// A link timestamp, dropped when zero, from before 1993 or in the future.
fn link_time(secs: u32) -> Option<DateTime<Utc>> {
    let t = DateTime::<Utc>::from_timestamp(secs as i64, 0)?;
    (FIRST_PE_YEAR..=Utc::now().year()).contains(&t.year()).then_some(t)
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

    const PE_AT: usize = 0x80;

    fn pe(magic: u16, timestamp: u32, subsystem: u16) -> Vec<u8> {
        let mut buf = vec![0u8; 0x200];
        buf[..2].copy_from_slice(b"MZ");
        buf[E_LFANEW..E_LFANEW + 4].copy_from_slice(&(PE_AT as u32).to_le_bytes());
        buf[PE_AT..PE_AT + 4].copy_from_slice(b"PE\0\0");
        buf[PE_AT + 8..PE_AT + 12].copy_from_slice(&timestamp.to_le_bytes());
        buf[PE_AT + 24..PE_AT + 26].copy_from_slice(&magic.to_le_bytes());
        buf[PE_AT + 92..PE_AT + 94].copy_from_slice(&subsystem.to_le_bytes());
        buf
    }

    #[test]
    fn plain_dos() {
        let mut buf = vec![0u8; 64];
        buf[..2].copy_from_slice(b"MZ");
        let exe = executable(&buf).unwrap();
        assert_eq!(exe.kind, ExeKind::Dos);
        assert_eq!(exe.describe(), "MS-DOS executable");
        assert_eq!(executable(b"MZ").unwrap().kind, ExeKind::Dos);
    }

    #[test]
    fn not_mz() {
        assert!(executable(b"\x7fELF\x02\x01\x01").is_none());
    }

    #[test]
    fn pe32_with_timestamp() {
        // 1998-06-25 00:00:00 UTC
        let exe = executable(&pe(0x10b, 898_732_800, 2)).unwrap();
        assert_eq!(exe.kind, ExeKind::Pe32);
        assert_eq!(exe.subsystem, Some(Subsystem::WindowsGui));
        assert_eq!(exe.describe(), "Windows 32-bit executable, built 1998-06-25");
    }

    #[test]
    fn pe64_console() {
        let exe = executable(&pe(0x20b, 0, 3)).unwrap();
        assert_eq!(exe.kind, ExeKind::Pe64);
        assert_eq!(exe.subsystem, Some(Subsystem::WindowsConsole));
        assert_eq!(exe.built, None);
    }

    #[test]
    fn implausible_timestamps_dropped() {
        // 1990-01-01
        assert_eq!(executable(&pe(0x10b, 631_152_000, 2)).unwrap().built, None);
        // 2100-01-01
        assert_eq!(executable(&pe(0x10b, 4_102_444_800, 2)).unwrap().built, None);
    }

    #[test]
    fn new_executable_target() {
        let mut buf = vec![0u8; 0x100];
        buf[..2].copy_from_slice(b"MZ");
        buf[E_LFANEW..E_LFANEW + 4].copy_from_slice(&0x80u32.to_le_bytes());
        buf[0x80..0x82].copy_from_slice(b"NE");
        buf[0x80 + 0x36] = 2;
        let exe = executable(&buf).unwrap();
        assert_eq!(exe.kind, ExeKind::NewExecutable);
        assert_eq!(exe.target, Some(NeTarget::Windows));
        assert_eq!(exe.title(), "Windows 16-bit");
    }

    #[test]
    fn lfanew_out_of_range_is_dos() {
        let mut buf = vec![0u8; 0x80];
        buf[..2].copy_from_slice(b"MZ");
        buf[E_LFANEW..E_LFANEW + 4].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());
        assert_eq!(executable(&buf).unwrap().kind, ExeKind::Dos);
    }

    #[test]
    fn unknown_optional_magic_is_dos() {
        assert_eq!(executable(&pe(0x107, 0, 2)).unwrap().kind, ExeKind::Dos);
    }
}
