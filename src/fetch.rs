// Fetch collaborator: resolves a release locator to a local file path.
//
// Network and cache retrieval live behind this trait; the crate itself only
// ships `LocalFetch`, which accepts locators that already are local paths.

use std::path::PathBuf;

/// Error type for locator resolution.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("no such file: {locator}")]
    NotFound { locator: String },

    /// The locator names something this fetcher cannot retrieve (URLs,
    /// for `LocalFetch`).
    #[error("unsupported locator (expected a local file path): {locator}")]
    Unsupported { locator: String },
}

/// Resolves a release locator (path, URL, ...) to a local file.
pub trait Fetch {
    fn fetch(&self, locator: &str) -> Result<PathBuf, FetchError>;
}

/// Fetcher for locators that are already local file paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFetch;

impl Fetch for LocalFetch {
    fn fetch(&self, locator: &str) -> Result<PathBuf, FetchError> {
        if locator.contains("://") {
            return Err(FetchError::Unsupported {
                locator: locator.to_string(),
            });
        }
        let path = PathBuf::from(locator);
        if path.is_file() {
            Ok(path)
        } else {
            Err(FetchError::NotFound {
                locator: locator.to_string(),
            })
        }
    }
}
