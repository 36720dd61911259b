// SPDX-License-Identifier: GPL-3.0-only
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} fetching {url}")]
    Http {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid archive {}: {reason}", path.display())]
    Archive { path: PathBuf, reason: String },

    #[error("Invalid download URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{what} exceeds limit of {limit} bytes")]
    TooLarge { what: String, limit: u64 },

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl FetchError {
    pub fn fs(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn archive(path: impl AsRef<Path>, reason: impl ToString) -> Self {
        Self::Archive {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
