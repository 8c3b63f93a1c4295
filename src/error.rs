use std::path::PathBuf;
use thiserror::Error;

/// Document-level failures. Either one aborts the whole run; per-conversation
/// faults are tallied in [`crate::export::ExportSummary`] instead.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The input file exists but is not well-formed JSON. Carries
    /// serde_json's message, which includes line and column.
    #[error("invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The input file could not be read at all (missing, permissions,
    /// not valid UTF-8).
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
