//! Error types for version resolution and artifact acquisition.

use std::path::PathBuf;
use thiserror::Error;

use crate::fetch::FetchError;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can end an acquisition run.
///
/// Every variant is terminal for the run. The only failure the pipeline
/// recovers from locally is a native-library fetch, which is reported in the
/// placement report instead of being returned.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] FetchError),

    #[error("cannot read {}: {source}", .path.display())]
    CacheRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("version not found in catalog: {alias}")]
    VersionNotFound { alias: String },

    #[error("version {id} has no {kind} download")]
    MissingPayload { id: String, kind: &'static str },

    #[error("unsafe path (contains .. or is absolute): {path}")]
    UnsafePath { path: String },

    #[error("sha1 mismatch for {url}\n  expected: {expected}\n  got:      {actual}")]
    ChecksumMismatch {
        url: String,
        expected: String,
        actual: String,
    },
}

impl Error {
    pub(crate) fn parse(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            what: what.into(),
            source,
        }
    }
}
