//! Library error type.
//!
//! File-level failures abort the language being processed. Per-key
//! translation failures are not represented here; see
//! [`TranslateError`](crate::translator::TranslateError).

use std::{io, path::PathBuf};

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A language file exists but could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The translation cache could not be parsed. Callers treat the cache as empty.
    #[error("translation cache {} is corrupt", path.display())]
    CacheCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize translation cache")]
    CacheSerialize(#[source] serde_json::Error),
    #[error("invalid line pattern")]
    Pattern(#[from] regex::Error),
}

impl Error {
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
