use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the filter pipeline.
///
/// All variants are fatal: the pipeline either runs to EOF or aborts.
/// The binary prints the diagnostic and exits nonzero; there is no retry
/// or partial recovery.
#[derive(Debug, Error)]
pub enum Error {
    /// A dictionary, input, or output path could not be opened.
    #[error("no access to file {}: {source}", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading from an already-open input stream failed.
    #[error("read error: {0}")]
    Read(#[source] io::Error),

    /// Writing to the output sink failed.
    #[error("write error: {0}")]
    Write(#[source] io::Error),

    /// An allocation could not be satisfied.
    #[error("out of memory")]
    OutOfMemory,

    /// Conflicting or missing command-line arguments.
    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
