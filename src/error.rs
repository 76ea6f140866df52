use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a hashing run.
///
/// No variant is recoverable inside the pipeline: the first error stops the
/// run and is handed back to the caller.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read config file '{path}'")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("path '{0}' has no 'assets/' segment, cannot derive a manifest key")]
    MissingAssetsSegment(PathBuf),

    #[error("failed to delete '{path}'")]
    Clean {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk '{path}'")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to copy '{from}' to '{to}'")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize manifest")]
    ManifestSerialize(#[source] serde_json::Error),

    #[error("failed to write manifest '{path}'")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("run cancelled after {0} hashed files")]
    Cancelled(usize),
}

pub type Result<T, E = HashError> = std::result::Result<T, E>;
