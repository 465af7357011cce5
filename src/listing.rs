//! Archive listing front end.
//!
//! An upload is extracted into a scratch directory, the directory is walked
//! and the readme candidate is handed to a renderer before the scratch
//! directory is removed.  Uploads that turn out not to be archives, or use
//! a compression method no extractor handles, are listed as a single file.

use tracing::{debug, warn};
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Command;
use thiserror::Error;

use crate::classify::classify_sample;
use crate::config::ListingOptions;
use crate::probe::Probe;
use crate::walk::{self, Listing, ReadmeCandidate, WalkError, Walker};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Not an archive")]
    NotArchive,
    #[error("Unsupported archive: {0}")]
    Unsupported(String),
    #[error("Extraction failed: {0}")]
    Failed(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ExtractError {
    /// Errors that downgrade the listing to a single entry instead of
    /// failing it.
    pub fn falls_back(&self) -> bool {
        matches!(self, ExtractError::NotArchive | ExtractError::Unsupported(_))
    }
}

#[derive(Error, Debug)]
pub enum ListError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error("Cannot create scratch directory: {0}")]
    Scratch(#[source] io::Error),
}

// ── Collaborators ─────────────────────────────────────────────────────────────

/// Unpacks an archive into an existing, empty directory.
pub trait Extractor {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<(), ExtractError>;
}

/// Receives the readme chosen for a listing.  The paths are only valid for
/// the duration of the call.
pub trait DeferredRender {
    fn render(&self, id: &str, readme: &Path, diz: Option<&Path>);
}

/// Renderer that ignores the readme.
pub struct NoRender;

impl DeferredRender for NoRender {
    fn render(&self, _id: &str, _readme: &Path, _diz: Option<&Path>) {}
}

/// Runs an external tool as `program [args..] <archive> <dest>`.
///
/// The upload is classified first: anything that is neither an archive nor
/// a disk image is refused with [`ExtractError::NotArchive`] and PKZIP
/// members using Shrink, Reduce or Implode with [`ExtractError::Unsupported`].
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    program: OsString,
    args:    Vec<OsString>,
}

impl CommandExtractor {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl Extractor for CommandExtractor {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<(), ExtractError> {
        let probe = Probe::read_path(archive, crate::probe::DEFAULT_HEAD_SIZE, crate::probe::DEFAULT_TAIL_SIZE)?;
        let signature = classify_sample(&probe.sample());
        if !signature.is_archive() && !signature.is_disk_image() {
            return Err(ExtractError::NotArchive);
        }
        if signature.is_legacy_zip() {
            return Err(ExtractError::Unsupported(signature.title().to_string()));
        }

        debug!("extracting {} with {:?}", archive.display(), self.program);
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(archive)
            .arg(dest)
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Failed(format!(
                "{} exited with {}: {}",
                self.program.to_string_lossy(),
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

// ── Listing ───────────────────────────────────────────────────────────────────

/// Walk an already extracted directory.
pub fn list_directory(root: &Path, options: &ListingOptions) -> Result<Listing, ListError> {
    Ok(Walker::new(root, options).run()?)
}

/// Extract `archive`, list its contents and hand the readme to `render`
/// under `id`.  The returned readme paths of an extracted archive are
/// relative to the archive root, like [`Entry::path`].
///
/// [`Entry::path`]: crate::entry::Entry::path
pub fn list_archive<E, R>(
    archive:   &Path,
    id:        &str,
    extractor: &E,
    render:    &R,
    options:   &ListingOptions,
) -> Result<Listing, ListError>
where
    E: Extractor + ?Sized,
    R: DeferredRender + ?Sized,
{
    let scratch = tempfile::Builder::new()
        .prefix("retromagic-")
        .tempdir()
        .map_err(ListError::Scratch)?;

    let extracted = match extractor.extract(archive, scratch.path()) {
        Ok(()) => true,
        Err(e) if e.falls_back() => {
            warn!("{}: {}, listing as a single file", archive.display(), e);
            false
        }
        Err(e) => return Err(e.into()),
    };
    let mut listing = if extracted {
        list_directory(scratch.path(), options)?
    } else {
        walk::single_file(archive, options)
    };

    if let Some(ReadmeCandidate { readme, diz }) = &listing.readme {
        render.render(id, readme, diz.as_deref());
    }
    // The scratch directory is removed on return.
    if extracted {
        listing.readme = listing.readme.map(|c| c.relative_to(scratch.path()));
    }
    Ok(listing)
}
