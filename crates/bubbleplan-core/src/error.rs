//! Error handling for Bubbleplan
//!
//! Only operations that cross a boundary produce errors:
//! - Document errors (edits that reference missing spaces or break invariants)
//! - Export errors (precondition failures, rasterization, encoding)
//! - Program errors (the external program-generation service)
//! - Snapshot errors (loading persisted documents)
//!
//! Geometry-kernel functions never fail; degenerate input falls back to a
//! simpler primitive instead. All error types use `thiserror`.

use thiserror::Error;

/// Document store error type
///
/// Raised by edits against the in-memory document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// No space with the given id exists
    #[error("Unknown space: {id}")]
    UnknownSpace {
        /// The id that failed to resolve.
        id: String,
    },

    /// A space with the same id is already in the document
    #[error("Space {id} already exists")]
    DuplicateSpace {
        /// The colliding id.
        id: String,
    },

    /// A connection between the two spaces already exists
    #[error("Spaces {from} and {to} are already connected")]
    DuplicateConnection {
        /// One endpoint.
        from: String,
        /// The other endpoint.
        to: String,
    },

    /// A space cannot be connected to itself
    #[error("Cannot connect space {id} to itself")]
    SelfConnection {
        /// The offending id.
        id: String,
    },

    /// Area must be a positive, finite number of square meters
    #[error("Invalid area {value} for space {id}")]
    InvalidArea {
        /// The space being edited.
        id: String,
        /// The rejected value.
        value: f64,
    },

    /// The requested floor does not exist
    #[error("Unknown floor: {index}")]
    UnknownFloor {
        /// The floor index that failed to resolve.
        index: usize,
    },

    /// The last remaining floor cannot be removed
    #[error("Cannot remove the last floor")]
    LastFloor,
}

/// Export error type
///
/// Represents failures while producing an output artifact.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Nothing is placed on the active floor
    #[error("Nothing to export: floor {floor} has no placed spaces")]
    NothingToExport {
        /// The floor that was requested.
        floor: usize,
    },

    /// The generated markup could not be parsed back for rasterization
    #[error("Failed to parse generated SVG: {reason}")]
    SvgParse {
        /// Parser message.
        reason: String,
    },

    /// A raster surface of the requested size could not be allocated
    #[error("Cannot allocate a {width}x{height} raster surface")]
    Surface {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// The raster encoder failed
    #[error("Failed to encode {format}: {reason}")]
    Encode {
        /// Target format name.
        format: String,
        /// Encoder message.
        reason: String,
    },
}

/// Program service error type
///
/// Failures of the external program-generation collaborator. Any of these
/// leaves the document untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProgramError {
    /// No credential is configured for the service
    #[error("No API key configured for the program service")]
    MissingCredential,

    /// The request did not complete
    #[error("Program service request failed: {message}")]
    Transport {
        /// Transport-level message.
        message: String,
    },

    /// The response was not valid JSON
    #[error("Program service returned malformed data: {reason}")]
    Malformed {
        /// Parser message.
        reason: String,
    },

    /// The response parsed but violates the expected schema
    #[error("Program entry {index} is invalid: {reason}")]
    Schema {
        /// Zero-based index of the offending entry.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// There is no program text to send
    #[error("Program description is empty")]
    EmptyRequest,

    /// The service returned no spaces at all
    #[error("Program service returned an empty program")]
    Empty,
}

impl ProgramError {
    /// Transport failures are the only ones worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProgramError::Transport { .. })
    }
}

/// Snapshot error type
///
/// Raised when a persisted document cannot be loaded at all. Individual
/// malformed room entries are skipped and reported, not raised.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The file is not JSON or its top level is not an object
    #[error("Failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    /// The snapshot was written by an incompatible version
    #[error("Unsupported snapshot version: {version}")]
    UnsupportedVersion {
        /// The version string found in the file.
        version: String,
    },
}

/// Main error type for Bubbleplan
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Document error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Program service error
    #[error(transparent)]
    Program(#[from] ProgramError),

    /// Snapshot error
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error should be shown as a blocking export notice
    pub fn is_export_precondition(&self) -> bool {
        matches!(self, Error::Export(ExportError::NothingToExport { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(ProgramError::Transport {
            message: "timeout".into()
        }
        .is_retryable());
        assert!(!ProgramError::MissingCredential.is_retryable());
        assert!(!ProgramError::Empty.is_retryable());
    }

    #[test]
    fn test_export_precondition_detection() {
        let err: Error = ExportError::NothingToExport { floor: 2 }.into();
        assert!(err.is_export_precondition());
        assert_eq!(
            err.to_string(),
            "Nothing to export: floor 2 has no placed spaces"
        );
    }
}
