// Sequential walker over a gzip-compressed tar stream.
//
// The stream is decompressed on the fly (`flate2::read::GzDecoder`) and
// interpreted as a tar archive (`tar::Archive`). Walking is strictly
// forward-only: each entry must be consumed (or abandoned) before the next
// advance, and the tar layer discards any unread remainder of the current
// entry automatically. A `Walk` mutably borrows its `Tarball`, so two
// concurrent walks over one handle are rejected at compile time.

use std::io::{self, Read};

use flate2::read::GzDecoder;
use tar::{Archive, EntryType};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for archive walking.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// Underlying I/O failure (file read, pipe, ...).
    #[error("I/O error: {0}")]
    Io(io::Error),

    /// The stream is not a well-formed gzipped tar archive: bad gzip magic,
    /// truncated deflate stream, or malformed tar entry header.
    #[error("corrupt archive: {0}")]
    Corrupt(String),
}

/// Classify an I/O error from the decompress/untar layers.
///
/// `flate2` reports an unrecognized gzip header as `InvalidInput` and a bad
/// deflate stream as `InvalidData`; the tar reader reports malformed or
/// truncated headers as `InvalidData`/`UnexpectedEof`. Everything else is a
/// genuine I/O failure.
fn classify(err: io::Error) -> ArchiveError {
    match err.kind() {
        io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
            ArchiveError::Corrupt(err.to_string())
        }
        _ => ArchiveError::Io(err),
    }
}

// ---------------------------------------------------------------------------
// Tarball / Walk / Entry
// ---------------------------------------------------------------------------

/// A gzip-compressed tar archive opened for a single forward walk.
pub struct Tarball<R: Read> {
    inner: Archive<GzDecoder<R>>,
}

impl<R: Read> Tarball<R> {
    /// Wrap `reader` in the gzip-then-tar read stack.
    ///
    /// No bytes are consumed until the first walk advance, so a corrupt
    /// stream surfaces from `next_entry()`, not from `open()`.
    pub fn open(reader: R) -> Self {
        Tarball {
            inner: Archive::new(GzDecoder::new(reader)),
        }
    }

    /// Begin walking the archive. The walk borrows the tarball mutably and
    /// can only be taken once per stream.
    pub fn walk(&mut self) -> Result<Walk<'_, R>, ArchiveError> {
        Ok(Walk {
            entries: self.inner.entries().map_err(classify)?,
        })
    }
}

/// An in-progress walk over a [`Tarball`].
pub struct Walk<'a, R: Read> {
    entries: tar::Entries<'a, GzDecoder<R>>,
}

impl<'a, R: Read> Walk<'a, R> {
    /// Advance to the next entry, discarding any unread remainder of the
    /// previous one. Returns `None` at end of archive.
    pub fn next_entry(&mut self) -> Result<Option<Entry<'a, R>>, ArchiveError> {
        match self.entries.next() {
            None => Ok(None),
            Some(Ok(inner)) => Ok(Some(Entry { inner })),
            Some(Err(err)) => Err(classify(err)),
        }
    }
}

/// Coarse entry classification; everything that is neither a regular file
/// nor a directory (symlinks, devices, pax headers, ...) is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// One archive entry, valid only until the walk advances.
///
/// Implements [`Read`] over the entry's content region so that a nested
/// tarball entry can be opened directly with [`Tarball::open`] without
/// first materializing it.
pub struct Entry<'a, R: Read> {
    inner: tar::Entry<'a, GzDecoder<R>>,
}

impl<R: Read> Entry<'_, R> {
    /// The entry's path as stored in the archive (e.g. `./jobs/foo.tgz`).
    pub fn name(&self) -> Result<String, ArchiveError> {
        let path = self.inner.path().map_err(classify)?;
        Ok(path.to_string_lossy().into_owned())
    }

    pub fn kind(&self) -> EntryKind {
        match self.inner.header().entry_type() {
            EntryType::Regular => EntryKind::File,
            EntryType::Directory => EntryKind::Directory,
            _ => EntryKind::Other,
        }
    }

    /// Entry content size from the tar header.
    pub fn size(&self) -> u64 {
        self.inner.header().size().unwrap_or(0)
    }

    /// Read the entry's content to completion.
    pub fn read_bytes(mut self) -> Result<Vec<u8>, ArchiveError> {
        let mut buf = Vec::with_capacity(self.size() as usize);
        self.inner.read_to_end(&mut buf).map_err(classify)?;
        Ok(buf)
    }
}

impl<R: Read> Read for Entry<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

/// Final path component of an archive entry name (`./jobs/foo.tgz` → `foo.tgz`).
pub(crate) fn base_name(name: &str) -> &str {
    name.trim_end_matches('/').rsplit('/').next().unwrap_or(name)
}
