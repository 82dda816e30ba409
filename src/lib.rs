//! Reldiff: structural diff for release tarballs.
//!
//! A release tarball is a gzip-compressed tar archive bundling a top-level
//! `release.MF` manifest and, under `jobs/`, one nested gzipped tarball per
//! job, each carrying its own `job.MF`. This crate compares two such
//! releases and reports their manifest differences as human-readable lines.
//!
//! The crate provides:
//! - Sequential tarball walking and nested-archive indexing (`archive`)
//! - Generic YAML document decoding into a comparable tree (`document`)
//! - A deterministic recursive structural diff (`diff`)
//! - Orchestration over a pluggable fetch collaborator (`service`, `fetch`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```no_run
//! use reldiff::fetch::LocalFetch;
//! use reldiff::service::DiffService;
//!
//! let service = DiffService::new(LocalFetch);
//! let lines = service.release_diff("old-release.tgz", "new-release.tgz").unwrap();
//! for line in &lines {
//!     println!("{line}");
//! }
//! ```

pub mod archive;
pub mod diff;
pub mod document;
pub mod fetch;
pub mod service;

#[cfg(feature = "cli")]
pub mod cli;
