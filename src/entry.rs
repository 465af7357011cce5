//! Per-file entry parsing.
//!
//! One file in a listing goes through
//!
//! ```text
//! Start → Stat → Open → Probe → Classify → {Image | Program | Tracker | Id3 | Plain} → Done
//! ```
//!
//! Each state owns exactly what the next one needs: the file handle lives
//! only in `Probe` and is closed before classification starts.  Nothing in
//! here fails the whole listing.  A file that cannot be read becomes
//! [`SkipReason::Unreadable`] and the walk moves on.

use chrono::{DateTime, Utc};
use tracing::debug;
use serde::Serialize;
use std::fmt;
use std::fs::{self, File, Metadata};
use std::io;
use std::path::Path;

use crate::classify;
use crate::config::{ListingOptions, Platform};
use crate::decode::{self, Dimensions, Executable};
use crate::probe::Probe;
use crate::signature::Signature;

// ── Types ─────────────────────────────────────────────────────────────────────

/// One emitted listing row.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    /// Path relative to the listing root, `/` separated.
    pub path:        String,
    pub signature:   Signature,
    /// Human readable format title.
    pub format:      &'static str,
    pub size:        u64,
    pub size_text:   String,
    pub modified:    Option<DateTime<Utc>>,
    pub is_image:    bool,
    pub is_text:     bool,
    pub is_program:  bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions:  Option<Dimensions>,
    /// Tracker song name or ID3 text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music:       Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable:  Option<Executable>,
    pub description: String,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<40} {:>10}  {}", self.path, self.size_text, self.description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Directory,
    /// Counted in the listing's zero-byte total.
    ZeroByte,
    /// Sockets, devices, and symlinks when links are not followed.
    Special,
    Unreadable(io::ErrorKind),
}

#[derive(Debug, Clone)]
pub enum EntryOutcome {
    Emitted(Entry),
    Skipped(SkipReason),
}

impl EntryOutcome {
    pub fn entry(&self) -> Option<&Entry> {
        match self {
            EntryOutcome::Emitted(e) => Some(e),
            EntryOutcome::Skipped(_) => None,
        }
    }
}

/// How an identified file is described.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Image,
    Program,
    Tracker,
    Id3,
    Plain,
}

impl Branch {
    /// Images first, then programs, trackers and finally ID3 tagged audio.
    pub fn select(signature: Signature, platform: Platform) -> Branch {
        if signature.is_image() {
            Branch::Image
        } else if signature.is_program() {
            Branch::Program
        } else if signature.is_tracker() {
            Branch::Tracker
        } else if signature == Signature::Mp3 || platform == Platform::Audio {
            Branch::Id3
        } else {
            Branch::Plain
        }
    }
}

enum State {
    Start,
    Stat,
    Open     { meta: Metadata },
    Probe    { meta: Metadata, file: File },
    Classify { meta: Metadata, probe: Probe },
    Describe { meta: Metadata, probe: Probe, signature: Signature, branch: Branch },
    Done(EntryOutcome),
}

// ── EntryParser ───────────────────────────────────────────────────────────────

pub struct EntryParser<'a> {
    path:    &'a Path,
    display: String,
    options: &'a ListingOptions,
}

impl<'a> EntryParser<'a> {
    /// `display` is the name the entry is listed under.
    pub fn new(path: &'a Path, display: impl Into<String>, options: &'a ListingOptions) -> Self {
        Self { path, display: display.into(), options }
    }

    /// Run the state machine.  `zero_bytes` is the listing's running count
    /// of empty files and is bumped for every zero-length file seen.
    pub fn parse(&self, zero_bytes: &mut u64) -> EntryOutcome {
        let mut state = State::Start;
        loop {
            state = match state {
                State::Start => State::Stat,
                State::Stat => self.stat(zero_bytes),
                State::Open { meta } => match File::open(self.path) {
                    Ok(file) => State::Probe { meta, file },
                    Err(e)   => self.unreadable(e),
                },
                State::Probe { meta, mut file } => {
                    let read = Probe::read(&mut file, self.options.head_size, self.options.tail_size);
                    drop(file);
                    match read {
                        Ok(probe) => State::Classify { meta, probe },
                        Err(e)    => self.unreadable(e),
                    }
                }
                State::Classify { meta, probe } => {
                    let signature = self.classify(&probe);
                    let branch = Branch::select(signature, self.options.platform);
                    debug!("{}: {} ({:?})", self.display, signature.name(), branch);
                    State::Describe { meta, probe, signature, branch }
                }
                State::Describe { meta, probe, signature, branch } => {
                    State::Done(EntryOutcome::Emitted(self.describe(&meta, &probe, signature, branch)))
                }
                State::Done(outcome) => return outcome,
            };
        }
    }

    fn stat(&self, zero_bytes: &mut u64) -> State {
        let meta = if self.options.follow_links {
            fs::metadata(self.path)
        } else {
            fs::symlink_metadata(self.path)
        };
        let meta = match meta {
            Ok(m)  => m,
            Err(e) => return self.unreadable(e),
        };
        if meta.is_dir() {
            return State::Done(EntryOutcome::Skipped(SkipReason::Directory));
        }
        if !meta.is_file() {
            debug!("{}: not a regular file, skipped", self.display);
            return State::Done(EntryOutcome::Skipped(SkipReason::Special));
        }
        if meta.len() == 0 {
            *zero_bytes += 1;
            return State::Done(EntryOutcome::Skipped(SkipReason::ZeroByte));
        }
        State::Open { meta }
    }

    fn unreadable(&self, e: io::Error) -> State {
        debug!("{}: unreadable, skipped: {}", self.display, e);
        State::Done(EntryOutcome::Skipped(SkipReason::Unreadable(e.kind())))
    }

    /// Under the DOS platform the Atari `60 1A` branch heuristic is not
    /// trusted and classification carries on past it.
    fn classify(&self, probe: &Probe) -> Signature {
        let sample = probe.sample();
        let signature = classify::classify_sample(&sample);
        if self.options.platform == Platform::Dos && signature.is_ambiguous_program() {
            return classify::classify_excluding(&sample, Signature::is_ambiguous_program);
        }
        signature
    }

    fn describe(&self, meta: &Metadata, probe: &Probe, signature: Signature, branch: Branch) -> Entry {
        let sample = probe.sample();
        let title = signature.title();
        let mut entry = Entry {
            path:        self.display.clone(),
            signature,
            format:      title,
            size:        meta.len(),
            size_text:   size_text(meta.len()),
            modified:    meta.modified().ok().map(DateTime::<Utc>::from),
            is_image:    signature.is_image(),
            is_text:     signature.is_text(),
            is_program:  signature.is_program(),
            dimensions:  None,
            music:       None,
            executable:  None,
            description: title.to_string(),
        };

        match branch {
            Branch::Image => {
                let dims = decode::dimensions(signature, sample.head);
                if dims.is_known() {
                    entry.description = format!("{title} image, {dims}");
                    entry.dimensions = Some(dims);
                } else {
                    entry.description = format!("{title} image");
                }
            }
            Branch::Program => {
                let exe = signature.is_mz().then(|| decode::executable(sample.head)).flatten();
                if let Some(exe) = exe {
                    entry.description = exe.describe();
                    entry.executable = Some(exe);
                }
            }
            Branch::Tracker => {
                entry.music = decode::module_name(signature, sample.head);
                entry.description = decode::tracker::describe(signature, sample.head);
            }
            Branch::Id3 => {
                let mut text = decode::id3v2(sample.head);
                if text.is_empty() {
                    text = decode::id3v1(sample.tail);
                }
                if !text.is_empty() {
                    entry.description = format!("{title}, {text}");
                    entry.music = Some(text);
                }
            }
            Branch::Plain => {}
        }
        entry
    }
}

/// Byte count in binary units: `512 B`, `1.5 KiB`, `12.0 MiB`.
pub fn size_text(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
