// ABOUTME: Error types for batch file processing.
// ABOUTME: Provides BatchError with Io, Markup, Selector, and Walk variants carrying the offending path.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use trellis_markup::MarkupError;

/// Errors that can occur while processing files and directories.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Reading, writing, copying or creating a directory failed.
    #[error("i/o error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be decoded or parsed.
    #[error("failed to parse {}: {source}", .path.display())]
    Markup {
        path: PathBuf,
        #[source]
        source: MarkupError,
    },

    /// A glob or regex file selector did not compile.
    #[error("invalid file selector: {0}")]
    Selector(String),

    /// Walking the input directory failed.
    #[error("failed to walk directory: {0}")]
    Walk(String),
}

impl BatchError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        BatchError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn markup(path: impl AsRef<Path>, source: MarkupError) -> Self {
        BatchError::Markup {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn selector(err: impl fmt::Display) -> Self {
        BatchError::Selector(err.to_string())
    }

    pub fn walk(err: impl fmt::Display) -> Self {
        BatchError::Walk(err.to_string())
    }
}
