// Diff orchestration: fetch → locate/index → decode → diff.
//
// A linear pipeline with a fixed failure order: fetch A, fetch B,
// locate/index A, locate/index B, decode A, decode B. The first failing
// stage aborts the whole operation; no partial result is ever returned.
// Each archive is opened, fully walked, and closed (by scope) before the
// next one is opened.

use std::fs::File;
use std::fmt;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::archive::{self, ArchiveError, JobIndex, LocateError};
use crate::diff;
use crate::document::{self, DecodeError, Document};
use crate::fetch::{Fetch, FetchError};

/// Sentinel manifest filename at the top level of a release tarball.
pub const RELEASE_MANIFEST: &str = "release.MF";

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Which release of the comparison an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Error type for diff operations, attributing every failure to a side.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error("failed to fetch release {side} ({locator}): {source}")]
    Fetch {
        side: Side,
        locator: String,
        source: FetchError,
    },

    #[error("failed to read release {side}: {source}")]
    Archive { side: Side, source: ArchiveError },

    #[error("release {side} has no {filename}")]
    ManifestNotFound { side: Side, filename: String },

    #[error("could not find job {job} in release {side}")]
    JobNotFound { side: Side, job: String },

    #[error("failed to decode manifest from release {side}: {source}")]
    Decode { side: Side, source: DecodeError },
}

// ---------------------------------------------------------------------------
// DiffService
// ---------------------------------------------------------------------------

/// Compares two releases by locator, resolving them through a [`Fetch`]
/// collaborator.
pub struct DiffService<F: Fetch> {
    fetcher: F,
}

impl<F: Fetch> DiffService<F> {
    pub fn new(fetcher: F) -> Self {
        DiffService { fetcher }
    }

    /// Diff the top-level release manifests of two releases.
    pub fn release_diff(
        &self,
        locator_a: &str,
        locator_b: &str,
    ) -> Result<Vec<String>, DiffError> {
        let path_a = self.fetch(Side::A, locator_a)?;
        let path_b = self.fetch(Side::B, locator_b)?;
        let bytes_a = locate_release_manifest(Side::A, &path_a)?;
        let bytes_b = locate_release_manifest(Side::B, &path_b)?;
        let doc_a = decode_manifest(Side::A, &bytes_a)?;
        let doc_b = decode_manifest(Side::B, &bytes_b)?;
        Ok(diff::diff(&doc_a, &doc_b))
    }

    /// Diff one job's manifest between two releases.
    ///
    /// Fails with [`DiffError::JobNotFound`] naming the offending side when
    /// `job` is absent from either release's job index.
    pub fn job_diff(
        &self,
        job: &str,
        locator_a: &str,
        locator_b: &str,
    ) -> Result<Vec<String>, DiffError> {
        let path_a = self.fetch(Side::A, locator_a)?;
        let path_b = self.fetch(Side::B, locator_b)?;
        let bytes_a = lookup_job(Side::A, &path_a, job)?;
        let bytes_b = lookup_job(Side::B, &path_b, job)?;
        let doc_a = decode_manifest(Side::A, &bytes_a)?;
        let doc_b = decode_manifest(Side::B, &bytes_b)?;
        Ok(diff::diff(&doc_a, &doc_b))
    }

    fn fetch(&self, side: Side, locator: &str) -> Result<PathBuf, DiffError> {
        self.fetcher.fetch(locator).map_err(|source| DiffError::Fetch {
            side,
            locator: locator.to_string(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// Per-side pipeline stages
// ---------------------------------------------------------------------------

fn open_release(side: Side, path: &Path) -> Result<BufReader<File>, DiffError> {
    let file = File::open(path).map_err(|e| DiffError::Archive {
        side,
        source: ArchiveError::Io(e),
    })?;
    Ok(BufReader::with_capacity(BUF_SIZE, file))
}

fn locate_release_manifest(side: Side, path: &Path) -> Result<Vec<u8>, DiffError> {
    let reader = open_release(side, path)?;
    log::debug!("release {side}: locating {RELEASE_MANIFEST} in {}", path.display());
    archive::locate_manifest(reader, RELEASE_MANIFEST).map_err(|err| match err {
        LocateError::Archive(source) => DiffError::Archive { side, source },
        LocateError::NotFound { filename } => DiffError::ManifestNotFound { side, filename },
    })
}

fn build_index(side: Side, path: &Path) -> Result<JobIndex, DiffError> {
    let reader = open_release(side, path)?;
    log::debug!("release {side}: indexing job manifests in {}", path.display());
    archive::build_job_index(reader).map_err(|source| DiffError::Archive { side, source })
}

fn lookup_job(side: Side, path: &Path, job: &str) -> Result<Vec<u8>, DiffError> {
    let mut index = build_index(side, path)?;
    index.remove(job).ok_or_else(|| DiffError::JobNotFound {
        side,
        job: job.to_string(),
    })
}

fn decode_manifest(side: Side, bytes: &[u8]) -> Result<Document, DiffError> {
    document::decode(bytes).map_err(|source| DiffError::Decode { side, source })
}
