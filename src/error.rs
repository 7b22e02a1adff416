// src/error.rs
//
// I/O failures at the file boundary. The fold engine itself cannot fail.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for file-level operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The source document could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The destination could not be created, written or renamed into place.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
