//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// The single classification failure: no catalog rule matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DetectError {
    #[error("unknown format")]
    UnknownFormat,
}

/// Failures while probing a file on disk
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProbeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProbeError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the file was read but not recognised
    pub fn is_unknown_format(&self) -> bool {
        matches!(self, ProbeError::Detect(DetectError::UnknownFormat))
    }
}
