//! Error types for `eavgraphdb`.
//!
//! A single `Error` enum covers every failure mode the store can produce.
//! There are no panics on caller-triggerable conditions; every public
//! operation that can fail returns `Result<T>`.

use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the store.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested id does not identify a live object of that kind.
    #[error("not found: {0}")]
    NotFound(u64),

    /// An `addXxxValue` call's payload does not match the attribute's declared `DataType`.
    #[error("type mismatch: attribute expects {expected:?}, got {actual:?}")]
    TypeMismatch {
        /// The attribute's declared data type.
        expected: crate::catalog::attribute::DataType,
        /// The data type implied by the value actually supplied.
        actual: crate::catalog::attribute::DataType,
    },

    /// `addEntity`/`addAttribute`/`addRelationType` was called with a name that
    /// already indexes a live object of that kind.
    #[error("duplicate name: {0:?}")]
    DuplicateName(String),

    /// The snapshot file's header, version, or section framing is malformed.
    #[error("snapshot corrupt: {0}")]
    SnapshotCorrupt(String),

    /// An arena block could not be grown.
    #[error("out of memory")]
    OutOfMemory,

    /// Underlying file I/O failed during `save`/`load`.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
