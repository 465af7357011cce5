//! Structural decoders: secondary data pulled out of an identified file.
//!
//! Decoders share the matchers' failure model.  Short or malformed input
//! yields an empty result (`Dimensions::default()`, an empty string,
//! `None`) and never an error or a panic.

pub mod dimension;
pub mod exe;
pub mod id3;
pub mod tracker;

pub use dimension::{dimensions, Dimensions};
pub use exe::{executable, ExeKind, Executable, NeTarget, Subsystem};
pub use id3::{id3v1, id3v2, Id3Frames};
pub use tracker::module_name;

/// Decode a fixed-width, NUL-padded text field as Latin-1 and trim it.
/// Control characters are dropped.
pub(crate) fn fixed_text(field: &[u8]) -> String {
    let end = field.iter().position(|b| *b == 0).unwrap_or(field.len());
    field[..end]
        .iter()
        .map(|&b| b as char)
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_text_padding() {
        assert_eq!(fixed_text(b"  Axel F \0\0\0"), "Axel F");
        assert_eq!(fixed_text(b"\0garbage"), "");
        assert_eq!(fixed_text(b"caf\xe9"), "caf\u{e9}");
        assert_eq!(fixed_text(b"a\x07b"), "ab");
    }
}
