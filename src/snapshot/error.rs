//! Failures while writing or reading a machine snapshot.

use std::fmt;
use thiserror::Error;

/// The wire encoding a snapshot was written in or read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Bincode,
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotFormat::Json => f.write_str("JSON"),
            SnapshotFormat::Bincode => f.write_str("bincode"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Could not write machine snapshot as {format}: {reason}")]
    Encode {
        format: SnapshotFormat,
        reason: String,
    },

    /// The input is not a snapshot in this encoding.
    #[error("Input is not a {format} machine snapshot: {reason}")]
    Decode {
        format: SnapshotFormat,
        reason: String,
    },

    /// Snapshots record their layout version; only the current one is read.
    #[error("Snapshot layout v{found} cannot be read (this build reads v{supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

impl SnapshotError {
    pub(crate) fn encode(format: SnapshotFormat, error: impl fmt::Display) -> Self {
        SnapshotError::Encode {
            format,
            reason: error.to_string(),
        }
    }

    pub(crate) fn decode(format: SnapshotFormat, error: impl fmt::Display) -> Self {
        SnapshotError::Decode {
            format,
            reason: error.to_string(),
        }
    }
}
