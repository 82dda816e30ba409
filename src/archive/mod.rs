// Release tarball reading.
//
// A release is a gzip-compressed tar stream. Entries are visited strictly
// in archive order through a one-shot cursor; the underlying stream is
// never seeked backwards.
//
// # Modules
//
// - `walker` — Gzip+tar stream cursor yielding entries one at a time
// - `locate` — First-match lookup of a named manifest file in an archive
// - `index`  — Nested per-job tarball scan building a job manifest index

pub mod index;
pub mod locate;
pub mod walker;

// Re-export key types for convenience.
pub use index::{JobIndex, build_job_index};
pub use locate::{LocateError, locate_manifest};
pub use walker::{ArchiveError, Entry, EntryKind, Tarball, Walk};
