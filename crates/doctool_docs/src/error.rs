//! Error types for documentation lookup and tag parsing.

use crate::tags::TagKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading documentation from source files.
#[derive(Debug, Error)]
pub enum DocError {
    /// The source file could not be read.
    #[error("failed to read source file '{}': {source}", path.display())]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl DocError {
    /// Creates an [`Io`](Self::Io) error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A documentation tag whose payload does not match its grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid @{tag} tag format `{text}`: {reason}")]
pub struct TagError {
    /// The tag grammar that rejected the payload.
    pub tag: TagKind,
    /// Raw tag text as written in the comment.
    pub text: String,
    /// Why the payload was rejected.
    pub reason: String,
}

impl TagError {
    /// Creates a new tag format error.
    pub fn new(tag: TagKind, text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
            reason: reason.into(),
        }
    }
}
