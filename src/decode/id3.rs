//! ID3 tag text for MP3 files.
//!
//! ID3v1 is a fixed 128 byte block at the very end of the file; ID3v2 is a
//! variable length tag at the start whose sizes are synchsafe integers.

use super::fixed_text;

/// Length of an ID3v1 tag.
pub const ID3V1_LEN: usize = 128;
/// ID3v2 tag and frame headers are both ten bytes.
pub const ID3V2_HEADER_LEN: usize = 10;

// ── ID3v1 ─────────────────────────────────────────────────────────────────────

/// Decode the ID3v1 tag in the last 128 bytes of `tail`.
///
/// Returns `"<song> by <artist> (<year>)"` with empty parts omitted, or an
/// empty string when `tail` is shorter than a tag or lacks the `TAG` prefix.
pub fn id3v1(tail: &[u8]) -> String {
    if tail.len() < ID3V1_LEN {
        return String::new();
    }
    let tag = &tail[tail.len() - ID3V1_LEN..];
    if &tag[..3] != b"TAG" {
        return String::new();
    }
    let song   = fixed_text(&tag[3..33]);
    let artist = fixed_text(&tag[33..63]);
    let year   = fixed_text(&tag[93..97]);
    compose(&song, &artist, &year)
}

// ── ID3v2 ─────────────────────────────────────────────────────────────────────

/// Decode a synchsafe integer: 7 significant bits per byte, most
/// significant byte first.
pub fn synchsafe(b: [u8; 4]) -> u32 {
    ((b[0] as u32 & 0x7F) << 21)
        | ((b[1] as u32 & 0x7F) << 14)
        | ((b[2] as u32 & 0x7F) << 7)
        | (b[3] as u32 & 0x7F)
}

/// The text frames the listing cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Id3Frames {
    /// `TALB`
    pub album:         String,
    /// `TPE1`
    pub artist:        String,
    /// `TIT1`
    pub content_group: String,
    /// `TIT2`
    pub title:         String,
    /// `TYER`
    pub year:          String,
}

impl Id3Frames {
    pub fn is_empty(&self) -> bool {
        self.album.is_empty()
            && self.artist.is_empty()
            && self.content_group.is_empty()
            && self.title.is_empty()
            && self.year.is_empty()
    }

    /// Same sentence form as ID3v1.  The song is the title, falling back
    /// to the content group and then the album.
    pub fn describe(&self) -> String {
        let song = [&self.title, &self.content_group, &self.album]
            .into_iter()
            .find(|s| !s.is_empty())
            .map_or("", |s| s.as_str());
        compose(song, &self.artist, &self.year)
    }

    fn slot(&mut self, id: &[u8]) -> Option<&mut String> {
        match id {
            b"TALB" => Some(&mut self.album),
            b"TPE1" => Some(&mut self.artist),
            b"TIT1" => Some(&mut self.content_group),
            b"TIT2" => Some(&mut self.title),
            b"TYER" => Some(&mut self.year),
            _       => None,
        }
    }
}

/// Scan the frames of an ID3v2.3 or 2.4 tag at the start of `buf`.
///
/// The tag size and every frame size use the synchsafe decoding.  A frame
/// whose size runs past the end of the tag stops the scan: that frame is
/// left empty and only the frames read before it are returned.
pub fn id3v2_frames(buf: &[u8]) -> Id3Frames {
    let mut frames = Id3Frames::default();
    if buf.len() < ID3V2_HEADER_LEN || &buf[..3] != b"ID3" || !matches!(buf[3], 3 | 4) {
        return frames;
    }
    let size = synchsafe([buf[6], buf[7], buf[8], buf[9]]) as usize;
    let end = ID3V2_HEADER_LEN.saturating_add(size).min(buf.len());
    let body = &buf[ID3V2_HEADER_LEN..end];

    let mut pos = 0;
    while pos + ID3V2_HEADER_LEN <= body.len() {
        let id = &body[pos..pos + 4];
        // Padding after the last frame.
        if id[0] == 0 {
            break;
        }
        if !id.iter().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()) {
            break;
        }
        let frame_len = synchsafe([body[pos + 4], body[pos + 5], body[pos + 6], body[pos + 7]]) as usize;
        let start = pos + ID3V2_HEADER_LEN;
        if frame_len > body.len() - start {
            break;
        }
        let data = &body[start..start + frame_len];
        if let Some(slot) = frames.slot(id) {
            *slot = frame_text(data);
        }
        pos = start + frame_len;
    }
    frames
}

/// Describe the ID3v2 tag at the start of `buf`, or return an empty
/// string.
pub fn id3v2(buf: &[u8]) -> String {
    let frames = id3v2_frames(buf);
    if frames.is_empty() {
        return String::new();
    }
    frames.describe()
}

/// Decode a text frame body.  A leading encoding byte (0 to 3) selects
/// Latin-1, UTF-16 with BOM, UTF-16BE or UTF-8; anything else is read as
/// Latin-1 from the first byte.
fn frame_text(data: &[u8]) -> String {
    let text = match data.first() {
        Some(0) => latin1(&data[1..]),
        Some(1) => utf16(&data[1..], None),
        Some(2) => utf16(&data[1..], Some(false)),
        Some(3) => String::from_utf8_lossy(&data[1..]).into_owned(),
        Some(_) => latin1(data),
        None    => String::new(),
    };
    text.trim_matches(|c: char| c == '\0' || c.is_whitespace()).to_string()
}

fn latin1(data: &[u8]) -> String {
    data.iter().map(|&b| b as char).collect()
}

/// `little` is `None` when a byte order mark decides it.
fn utf16(data: &[u8], little: Option<bool>) -> String {
    let (little, data) = match (little, data) {
        (Some(l), d)                => (l, d),
        (None, [0xFF, 0xFE, rest @ ..]) => (true, rest),
        (None, [0xFE, 0xFF, rest @ ..]) => (false, rest),
        (None, d)                   => (false, d),
    };
    let units = data.chunks_exact(2).map(|c| {
        if little { u16::from_le_bytes([c[0], c[1]]) } else { u16::from_be_bytes([c[0], c[1]]) }
    });
    char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

// ── Shared ────────────────────────────────────────────────────────────────────

fn compose(song: &str, artist: &str, year: &str) -> String {
    let mut out = song.to_string();
    if !artist.is_empty() {
        if out.is_empty() {
            out.push_str(artist);
        } else {
            out.push_str(" by ");
            out.push_str(artist);
        }
    }
    if !year.is_empty() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push('(');
        out.push_str(year);
        out.push(')');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v1_tag(song: &str, artist: &str, year: &str) -> Vec<u8> {
        let mut tag = vec![0u8; ID3V1_LEN];
        tag[..3].copy_from_slice(b"TAG");
        tag[3..3 + song.len()].copy_from_slice(song.as_bytes());
        tag[33..33 + artist.len()].copy_from_slice(artist.as_bytes());
        tag[93..93 + year.len()].copy_from_slice(year.as_bytes());
        tag
    }

    fn frame(id: &[u8; 4], body: &[u8]) -> Vec<u8> {
        let mut f = id.to_vec();
        let n = body.len() as u32;
        f.extend_from_slice(&[(n >> 21) as u8 & 0x7F, (n >> 14) as u8 & 0x7F, (n >> 7) as u8 & 0x7F, n as u8 & 0x7F]);
        f.extend_from_slice(&[0, 0]);
        f.extend_from_slice(body);
        f
    }

    fn v2_tag(frames: &[Vec<u8>]) -> Vec<u8> {
        let body: Vec<u8> = frames.concat();
        let n = body.len() as u32 + 16;
        let mut tag = b"ID3\x03\x00\x00".to_vec();
        tag.extend_from_slice(&[(n >> 21) as u8 & 0x7F, (n >> 14) as u8 & 0x7F, (n >> 7) as u8 & 0x7F, n as u8 & 0x7F]);
        tag.extend_from_slice(&body);
        tag.extend_from_slice(&[0u8; 16]);
        tag
    }

    #[test]
    fn synchsafe_formula() {
        assert_eq!(synchsafe([0x00, 0x00, 0x02, 0x01]), 257);
        assert_eq!(synchsafe([0x7F, 0x7F, 0x7F, 0x7F]), (1 << 28) - 1);
        assert_eq!(synchsafe([0x80, 0x80, 0x80, 0x85]), 5);
    }

    #[test]
    fn v1_full() {
        let mut file = vec![0xFFu8; 300];
        file.extend(v1_tag("Jump", "Van Halen", "1984"));
        assert_eq!(id3v1(&file), "Jump by Van Halen (1984)");
    }

    #[test]
    fn v1_omits_empty_parts() {
        assert_eq!(id3v1(&v1_tag("Jump", "", "")), "Jump");
        assert_eq!(id3v1(&v1_tag("", "Van Halen", "1984")), "Van Halen (1984)");
        assert_eq!(id3v1(&v1_tag("   ", "", "")), "");
    }

    #[test]
    fn v1_requires_128_bytes_and_prefix() {
        let tag = v1_tag("Jump", "Van Halen", "1984");
        assert_eq!(id3v1(&tag[1..]), "");
        let mut bad = tag.clone();
        bad[0] = b'X';
        assert_eq!(id3v1(&bad), "");
    }

    #[test]
    fn v2_album_of_five_bytes() {
        let tag = v2_tag(&[frame(b"TALB", b" Dune")]);
        let frames = id3v2_frames(&tag);
        assert_eq!(frames.album, "Dune");
        assert_eq!(id3v2(&tag), "Dune");
    }

    #[test]
    fn v2_encoding_byte_and_sentence() {
        let tag = v2_tag(&[
            frame(b"TIT2", b"\x00Axel F"),
            frame(b"TPE1", b"\x03Harold Faltermeyer"),
            frame(b"TYER", b"\x001985"),
            frame(b"TALB", b"\x00Beverly Hills Cop"),
        ]);
        assert_eq!(id3v2(&tag), "Axel F by Harold Faltermeyer (1985)");
    }

    #[test]
    fn v2_utf16_with_bom() {
        let mut body = vec![0x01, 0xFF, 0xFE];
        for u in "Tune".encode_utf16() {
            body.extend_from_slice(&u.to_le_bytes());
        }
        let tag = v2_tag(&[frame(b"TIT2", &body)]);
        assert_eq!(id3v2_frames(&tag).title, "Tune");
    }

    #[test]
    fn v2_oversized_frame_is_dropped() {
        let mut tag = v2_tag(&[frame(b"TIT2", b"\x00Song")]);
        let mut big = b"TALB".to_vec();
        big.extend_from_slice(&[0x00, 0x00, 0x7F, 0x7F, 0, 0]);
        big.extend_from_slice(b"\x00Album");
        // Replace the padding with the oversized frame.
        let pad = tag.len() - 16;
        tag.truncate(pad);
        tag.extend_from_slice(&big);
        let n = (tag.len() - ID3V2_HEADER_LEN) as u32;
        tag[6..10].copy_from_slice(&[(n >> 21) as u8 & 0x7F, (n >> 14) as u8 & 0x7F, (n >> 7) as u8 & 0x7F, n as u8 & 0x7F]);

        let frames = id3v2_frames(&tag);
        assert_eq!(frames.title, "Song");
        assert_eq!(frames.album, "");
    }

    #[test]
    fn v2_rejects_other_versions() {
        let mut tag = v2_tag(&[frame(b"TIT2", b"\x00Song")]);
        tag[3] = 2;
        assert_eq!(id3v2(&tag), "");
        assert_eq!(id3v2(b"ID3"), "");
    }
}
