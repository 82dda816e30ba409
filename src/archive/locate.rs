// First-match lookup of a named file inside a release tarball.

use std::io::Read;

use super::walker::{ArchiveError, EntryKind, Tarball, base_name};

/// Error type for manifest lookup.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// The walk reached end of archive without seeing the requested file.
    #[error("no entry named {filename} in archive")]
    NotFound { filename: String },
}

/// Walk `reader` as a gzipped tarball and return the content of the first
/// regular-file entry whose base name equals `filename`.
///
/// First match wins; later entries with the same name are not examined.
pub fn locate_manifest<R: Read>(reader: R, filename: &str) -> Result<Vec<u8>, LocateError> {
    let mut tarball = Tarball::open(reader);
    let mut walk = tarball.walk()?;
    while let Some(entry) = walk.next_entry()? {
        if entry.kind() != EntryKind::File {
            continue;
        }
        if base_name(&entry.name()?) == filename {
            return Ok(entry.read_bytes()?);
        }
    }
    Err(LocateError::NotFound {
        filename: filename.to_string(),
    })
}
