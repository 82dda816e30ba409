// Job manifest index built from the nested tarballs of a release.
//
// A release stores one gzipped tarball per job under `jobs/`; each of those
// contains the job's own `job.MF` manifest. The outer stream is sequential
// and non-seekable, so every job manifest is materialized into memory while
// the outer walk passes over its tarball.

use std::collections::BTreeMap;
use std::io::Read;

use super::walker::{ArchiveError, Entry, EntryKind, Tarball, base_name};

/// Sentinel manifest filename inside each nested job tarball.
pub const JOB_MANIFEST: &str = "job.MF";

/// Path prefix identifying job tarball entries in the outer archive.
const JOBS_PREFIX: &str = "jobs/";

/// Job name → raw `job.MF` bytes. `BTreeMap` keeps iteration order stable.
pub type JobIndex = BTreeMap<String, Vec<u8>>;

/// Walk `reader` as the outer release tarball and index every job's
/// manifest bytes by job name.
///
/// The job name is the nested tarball's base filename truncated at the
/// first `.` (`jobs/nats.tgz` → `nats`). A nested tarball without a
/// `job.MF` is omitted from the index; absence is not an error at this
/// layer, callers decide whether a missing job is fatal.
pub fn build_job_index<R: Read>(reader: R) -> Result<JobIndex, ArchiveError> {
    let mut index = JobIndex::new();
    let mut outer = Tarball::open(reader);
    let mut walk = outer.walk()?;
    while let Some(entry) = walk.next_entry()? {
        if entry.kind() != EntryKind::File {
            continue;
        }
        let name = entry.name()?;
        if !is_job_entry(&name) {
            continue;
        }
        let job = job_name(&name);
        match read_job_manifest(entry)? {
            Some(bytes) => {
                log::debug!("indexed job {job} ({} manifest bytes)", bytes.len());
                index.insert(job, bytes);
            }
            None => log::debug!("job tarball {name} has no {JOB_MANIFEST}, skipping"),
        }
    }
    Ok(index)
}

/// Entries may be archived with or without a leading `./`.
fn is_job_entry(name: &str) -> bool {
    name.strip_prefix("./").unwrap_or(name).starts_with(JOBS_PREFIX)
}

/// `./jobs/nats.tgz` → `nats`
fn job_name(entry_name: &str) -> String {
    let base = base_name(entry_name);
    base.split('.').next().unwrap_or(base).to_string()
}

/// Scan one nested job tarball for its manifest, reading the entry stream
/// directly (no intermediate copy of the nested tarball itself).
fn read_job_manifest<R: Read>(entry: Entry<'_, R>) -> Result<Option<Vec<u8>>, ArchiveError> {
    let mut nested = Tarball::open(entry);
    let mut walk = nested.walk()?;
    while let Some(inner) = walk.next_entry()? {
        if inner.kind() != EntryKind::File {
            continue;
        }
        if base_name(&inner.name()?) == JOB_MANIFEST {
            return Ok(Some(inner.read_bytes()?));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_entry_prefix_with_and_without_dot_slash() {
        assert!(is_job_entry("./jobs/nats.tgz"));
        assert!(is_job_entry("jobs/nats.tgz"));
        assert!(!is_job_entry("./packages/nats.tgz"));
        assert!(!is_job_entry("release.MF"));
    }

    #[test]
    fn job_name_truncates_at_first_dot() {
        assert_eq!(job_name("./jobs/nats.tgz"), "nats");
        assert_eq!(job_name("jobs/router.tar.gz"), "router");
        assert_eq!(job_name("jobs/plain"), "plain");
    }
}
