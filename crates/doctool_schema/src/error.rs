//! Error types for schema conversion.

use doctool_docs::TagError;
use thiserror::Error;

/// Errors that abort a conversion. No partial schema is produced.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The target cannot be described as a tool: a positional parameter, a
    /// duplicate or empty parameter name, or an invalid callable name.
    #[error("cannot convert `{callable}`: {message}")]
    InvalidArgumentShape {
        /// Name of the callable or class being converted.
        callable: String,
        /// What is wrong with its shape.
        message: String,
    },

    /// A documentation tag does not match its grammar (strict tag policy).
    #[error(transparent)]
    InvalidTagFormat(#[from] TagError),

    /// A documented type name has no JSON Schema mapping (strict type policy).
    #[error("unsupported type `{type_name}` for parameter `{parameter}`")]
    UnsupportedType {
        /// Parameter whose `@param` tag named the type.
        parameter: String,
        /// The unmapped type name.
        type_name: String,
    },

    /// An element of a fail-fast batch failed.
    #[error("batch element {index} failed: {source}")]
    Batch {
        /// Position of the failing element in the input.
        index: usize,
        /// The element's error.
        source: Box<ConvertError>,
    },

    /// The schema could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ConvertError {
    /// Creates an [`InvalidArgumentShape`](Self::InvalidArgumentShape).
    pub fn invalid_shape(callable: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgumentShape {
            callable: callable.into(),
            message: message.into(),
        }
    }

    /// Returns the innermost error, looking through [`Batch`](Self::Batch).
    pub fn root(&self) -> &Self {
        match self {
            Self::Batch { source, .. } => source.root(),
            other => other,
        }
    }
}
