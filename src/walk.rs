//! Bounded directory walker.
//!
//! A listing walks the extracted tree twice.  The first pass only counts
//! files so a truncated listing can say how many were left out; the second
//! parses entries until the cap is reached.  Both passes visit entries in
//! file name order so the output is stable across runs.

use tracing::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::ListingOptions;
use crate::entry::{Entry, EntryOutcome, EntryParser};

/// Name of the BBS description file paired with a readme.
pub const DIZ_NAME: &str = "file_id.diz";

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("Cannot enumerate {}: {source}", path.display())]
    Enumerate {
        path:   PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

// ── Lines ─────────────────────────────────────────────────────────────────────

/// One rendered listing line.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Line {
    Entry(Entry),
    /// The cap was hit; `remaining` files were not shown.
    Truncated { remaining: u64 },
    ZeroBytes { count: u64 },
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Entry(e) => write!(f, "{e}"),
            Line::Truncated { remaining } => {
                write!(f, "... and {remaining} more {} not shown", plural(*remaining, "file"))
            }
            Line::ZeroBytes { count } => {
                write!(f, "{count} zero-byte {} not shown", plural(*count, "file"))
            }
        }
    }
}

fn plural(n: u64, word: &str) -> String {
    if n == 1 { word.to_string() } else { format!("{word}s") }
}

/// The text file picked for preview, optionally with its `FILE_ID.DIZ`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadmeCandidate {
    pub readme: PathBuf,
    pub diz:    Option<PathBuf>,
}

impl ReadmeCandidate {
    /// The same candidate with both paths made relative to `root`.
    pub fn relative_to(&self, root: &Path) -> ReadmeCandidate {
        let rel = |p: &Path| p.strip_prefix(root).unwrap_or(p).to_path_buf();
        ReadmeCandidate { readme: rel(&self.readme), diz: self.diz.as_deref().map(rel) }
    }
}

fn is_diz(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.eq_ignore_ascii_case(DIZ_NAME))
}

/// Pick the readme from the text files of a listing.
///
/// `seen` holds the first text files found and `count` how many there were
/// in total.  One text file is the readme.  Two files where exactly one is
/// `file_id.diz` give the other as readme and the diz alongside.  Anything
/// else is ambiguous and yields nothing.
pub fn select_readme(seen: &[PathBuf], count: usize) -> Option<ReadmeCandidate> {
    match (count, seen) {
        (1, [only]) => Some(ReadmeCandidate { readme: only.clone(), diz: None }),
        (2, [a, b]) => match (is_diz(a), is_diz(b)) {
            (false, true) => Some(ReadmeCandidate { readme: a.clone(), diz: Some(b.clone()) }),
            (true, false) => Some(ReadmeCandidate { readme: b.clone(), diz: Some(a.clone()) }),
            _             => None,
        },
        _ => None,
    }
}

// ── Accumulator ───────────────────────────────────────────────────────────────

/// Running counters for one listing.
#[derive(Debug, Default)]
pub struct WalkAccumulator {
    pub total_files: u64,
    pub visited:     u64,
    pub emitted:     usize,
    pub zero_bytes:  u64,
    /// The first two text files, by absolute path.
    pub text_seen:   Vec<PathBuf>,
    pub text_count:  usize,
    lines:           Vec<Line>,
}

impl WalkAccumulator {
    pub fn new(total_files: u64) -> Self {
        Self { total_files, ..Default::default() }
    }

    fn record(&mut self, path: &Path, outcome: EntryOutcome) {
        if let EntryOutcome::Emitted(entry) = outcome {
            if entry.is_text {
                self.text_count += 1;
                if self.text_seen.len() < 2 {
                    self.text_seen.push(path.to_path_buf());
                }
            }
            self.emitted += 1;
            self.lines.push(Line::Entry(entry));
        }
    }

    fn finish(mut self) -> Listing {
        if self.zero_bytes > 0 {
            self.lines.push(Line::ZeroBytes { count: self.zero_bytes });
        }
        let readme = select_readme(&self.text_seen, self.text_count);
        Listing {
            lines:       self.lines,
            total_files: self.total_files,
            emitted:     self.emitted,
            zero_bytes:  self.zero_bytes,
            readme,
        }
    }
}

// ── Listing ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub lines:       Vec<Line>,
    pub total_files: u64,
    pub emitted:     usize,
    pub zero_bytes:  u64,
    pub readme:      Option<ReadmeCandidate>,
}

impl Listing {
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.lines.iter().filter_map(|l| match l {
            Line::Entry(e) => Some(e),
            _              => None,
        })
    }

    pub fn is_truncated(&self) -> bool {
        self.lines.iter().any(|l| matches!(l, Line::Truncated { .. }))
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// List a single file: the fallback for uploads that are not archives.
pub fn single_file(path: &Path, options: &ListingOptions) -> Listing {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mut acc = WalkAccumulator::new(1);
    acc.visited = 1;
    let outcome = EntryParser::new(path, name, options).parse(&mut acc.zero_bytes);
    acc.record(path, outcome);
    acc.finish()
}

// ── Walker ────────────────────────────────────────────────────────────────────

pub struct Walker<'a> {
    root:    &'a Path,
    options: &'a ListingOptions,
}

impl<'a> Walker<'a> {
    pub fn new(root: &'a Path, options: &'a ListingOptions) -> Self {
        Self { root, options }
    }

    fn walk(&self) -> WalkDir {
        WalkDir::new(self.root)
            .min_depth(1)
            .follow_links(self.options.follow_links)
            .sort_by_file_name()
    }

    /// Yield every non-directory entry.  A failure to read the root is
    /// fatal; unreadable subdirectories are logged and skipped.
    fn files(&self) -> impl Iterator<Item = Result<walkdir::DirEntry, WalkError>> + '_ {
        self.walk().into_iter().filter_map(move |item| match item {
            Ok(entry) if entry.file_type().is_dir() => None,
            Ok(entry) => Some(Ok(entry)),
            Err(e) if e.depth() == 0 => Some(Err(WalkError::Enumerate {
                path:   e.path().map_or_else(|| self.root.to_path_buf(), Path::to_path_buf),
                source: e,
            })),
            Err(e) => {
                debug!("skipping unreadable directory entry: {e}");
                None
            }
        })
    }

    pub fn count(&self) -> Result<u64, WalkError> {
        let mut n = 0;
        for item in self.files() {
            item?;
            n += 1;
        }
        Ok(n)
    }

    pub fn run(&self) -> Result<Listing, WalkError> {
        let total = self.count()?;
        let mut acc = WalkAccumulator::new(total);

        for item in self.files() {
            let entry = item?;
            acc.visited += 1;
            if acc.emitted >= self.options.cap {
                let remaining = total.saturating_sub(acc.visited) + 1;
                warn!("{}: listing capped at {}, {} not shown", self.root.display(), self.options.cap, remaining);
                acc.lines.push(Line::Truncated { remaining });
                break;
            }
            let display = relative_name(self.root, entry.path());
            let outcome = EntryParser::new(entry.path(), display, self.options).parse(&mut acc.zero_bytes);
            acc.record(entry.path(), outcome);
        }

        info!(
            "{}: {} files, {} listed, {} zero-byte",
            self.root.display(),
            acc.total_files,
            acc.emitted,
            acc.zero_bytes
        );
        Ok(acc.finish())
    }
}

/// `path` relative to `root` with `/` separators.
fn relative_name(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn lone_text_is_readme() {
        let c = select_readme(&paths(&["a/README.TXT"]), 1).unwrap();
        assert_eq!(c.readme, PathBuf::from("a/README.TXT"));
        assert_eq!(c.diz, None);
    }

    #[test]
    fn readme_with_diz() {
        let c = select_readme(&paths(&["FILE_ID.DIZ", "README.TXT"]), 2).unwrap();
        assert_eq!(c.readme, PathBuf::from("README.TXT"));
        assert_eq!(c.diz, Some(PathBuf::from("FILE_ID.DIZ")));
    }

    #[test]
    fn ambiguous_text_sets() {
        assert_eq!(select_readme(&paths(&["A.TXT", "B.TXT"]), 2), None);
        assert_eq!(select_readme(&paths(&["file_id.diz", "FILE_ID.DIZ"]), 2), None);
        assert_eq!(select_readme(&paths(&["A.TXT", "FILE_ID.DIZ"]), 3), None);
        assert_eq!(select_readme(&[], 0), None);
    }

    #[test]
    fn candidate_relative_to_root() {
        let c = ReadmeCandidate {
            readme: PathBuf::from("/tmp/x/DOCS/README.TXT"),
            diz:    Some(PathBuf::from("/tmp/x/FILE_ID.DIZ")),
        };
        let rel = c.relative_to(Path::new("/tmp/x"));
        assert_eq!(rel.readme, PathBuf::from("DOCS/README.TXT"));
        assert_eq!(rel.diz, Some(PathBuf::from("FILE_ID.DIZ")));
    }

    #[test]
    fn line_text() {
        assert_eq!(Line::Truncated { remaining: 5 }.to_string(), "... and 5 more files not shown");
        assert_eq!(Line::ZeroBytes { count: 1 }.to_string(), "1 zero-byte file not shown");
    }

    #[test]
    fn relative_names_use_slashes() {
        let root = Path::new("/tmp/x");
        assert_eq!(relative_name(root, Path::new("/tmp/x/GAMES/DOOM.EXE")), "GAMES/DOOM.EXE");
    }
}
