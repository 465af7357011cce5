//! Probe buffers: the head (and tail) bytes a classification looks at.
//!
//! Most matchers need only a prefix of the file.  A few validate an
//! end-of-file marker (PDF `%%EOF`, JPEG `FF D9`, the ID3v1 `TAG` block,
//! Apple's `koly` trailer), so a [`Probe`] also keeps the last `tail_size`
//! bytes of files too large to fit in the head.  The tail may overlap the
//! head when the file is only slightly larger than it.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// Default head length: 40 KiB covers the ISO-9660 descriptor at 36865.
pub const DEFAULT_HEAD_SIZE: usize = 40 * 1024;
/// Default tail length.
pub const DEFAULT_TAIL_SIZE: usize = 512;
/// Bytes the content-type sniff considers.
pub const SNIFF_LEN: usize = 512;

// ── Sample ────────────────────────────────────────────────────────────────────

/// Borrowed view over the bytes of one file.
///
/// `tail` always ends at the file's last byte.  When the whole file fits in
/// the head, `head` and `tail` are the same slice.
#[derive(Debug, Clone, Copy)]
pub struct Sample<'a> {
    pub head: &'a [u8],
    pub tail: &'a [u8],
    /// Length of the file the sample was taken from.
    pub len:  u64,
}

impl<'a> Sample<'a> {
    /// Treat `buf` as a complete file.
    pub fn whole(buf: &'a [u8]) -> Self {
        Self { head: buf, tail: buf, len: buf.len() as u64 }
    }

    /// True when `head` is the complete file.
    pub fn is_complete(&self) -> bool {
        self.head.len() as u64 == self.len
    }
}

impl<'a> From<&'a [u8]> for Sample<'a> {
    fn from(buf: &'a [u8]) -> Self {
        Sample::whole(buf)
    }
}

// ── Probe ─────────────────────────────────────────────────────────────────────

/// Owned probe bytes read from a file.
#[derive(Debug, Clone, Default)]
pub struct Probe {
    head: Vec<u8>,
    /// Empty when the head already holds the whole file.
    tail: Vec<u8>,
    len:  u64,
}

impl Probe {
    /// Read up to `head_size` bytes from the start of `reader` and, if the
    /// stream is longer, its last `tail_size` bytes.
    pub fn read<R: Read + Seek>(reader: &mut R, head_size: usize, tail_size: usize) -> io::Result<Self> {
        let len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let mut head = Vec::with_capacity(head_size.min(len as usize));
        reader.by_ref().take(head_size as u64).read_to_end(&mut head)?;

        let mut tail = Vec::new();
        if len > head.len() as u64 && tail_size > 0 {
            let want = (tail_size as u64).min(len);
            reader.seek(SeekFrom::End(-(want as i64)))?;
            reader.by_ref().take(want).read_to_end(&mut tail)?;
        }

        Ok(Self { head, tail, len })
    }

    /// Open `path`, read the probe and close the handle before returning.
    pub fn read_path<P: AsRef<Path>>(path: P, head_size: usize, tail_size: usize) -> io::Result<Self> {
        let mut file = File::open(path)?;
        Self::read(&mut file, head_size, tail_size)
    }

    pub fn sample(&self) -> Sample<'_> {
        let tail = if self.tail.is_empty() { &self.head[..] } else { &self.tail[..] };
        Sample { head: &self.head, tail, len: self.len }
    }

    pub fn head(&self) -> &[u8] { &self.head }
    pub fn len(&self) -> u64 { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }
}
