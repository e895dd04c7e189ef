//! Error types for pagesift.
//!
//! This module defines the error types returned by extraction operations.
//! Provider and snapshot failures abort an extraction with no partial
//! output; classification failures are recovered by the walk and surface
//! through `extraction_errors` on the result instead.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document snapshot provider could not be reached.
    #[error("snapshot provider not found")]
    ProviderUnavailable,

    /// The snapshot capture step failed inside the hosting runtime.
    #[error("snapshot capture failed: {0}")]
    SnapshotFailed(String),

    /// The snapshot arena references nodes that do not exist or cannot
    /// be traversed safely.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// A single node could not be classified. The walk records this and
    /// skips the node; it never aborts the run.
    #[error("failed to classify <{tag}> node {node}: {reason}")]
    Classification {
        /// Arena index of the offending node.
        node: u32,
        /// Lowercase tag name of the offending node.
        tag: String,
        /// Underlying failure description.
        reason: String,
    },
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
