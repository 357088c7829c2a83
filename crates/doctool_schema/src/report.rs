//! Recoverable diagnostics collected during a conversion.

use crate::config::LogLevel;
use crate::schema::SchemaResult;
use doctool_docs::{SourceLocation, TagError};
use thiserror::Error;

/// Something that was wrong with a target's documentation but did not stop
/// the conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    /// A tag did not match its grammar and was skipped.
    #[error("skipped malformed tag: {0}")]
    MalformedTag(TagError),

    /// A tag documents a parameter the signature does not declare.
    #[error("@{tag} documents unknown parameter `{parameter}`")]
    UnknownParameter {
        /// Tag name without `@`.
        tag: String,
        /// Name used by the tag.
        parameter: String,
    },

    /// A `@param` type has no JSON Schema mapping; `string` was used.
    #[error("unknown type `{type_name}` for parameter `{parameter}`, using string")]
    UnknownType {
        /// Parameter whose tag named the type.
        parameter: String,
        /// The unmapped type name.
        type_name: String,
    },

    /// The source file behind a doc location could not be read.
    #[error("could not read documentation at {location}: {message}")]
    DocLookupFailed {
        /// The requested location.
        location: SourceLocation,
        /// The underlying error.
        message: String,
    },

    /// No doc comment is attached to the requested declaration line.
    #[error("no documentation found at {location}")]
    MissingDocs {
        /// The requested location.
        location: SourceLocation,
    },
}

/// A structured schema plus the warnings raised while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// The converted schema.
    pub schema: SchemaResult,
    /// Warnings in the order they were raised.
    pub warnings: Vec<Warning>,
}

impl Report {
    /// Returns `true` if no warnings were raised.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Collects warnings for one conversion and logs them at the configured
/// level.
#[derive(Debug)]
pub(crate) struct Diagnostics {
    callable: String,
    level: LogLevel,
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub(crate) fn new(callable: impl Into<String>, level: LogLevel) -> Self {
        Self {
            callable: callable.into(),
            level,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn callable(&self) -> &str {
        &self.callable
    }

    /// Returns `true` if pipeline `debug` events should be emitted.
    pub(crate) fn debug_enabled(&self) -> bool {
        self.level.enables(LogLevel::Debug)
    }

    pub(crate) fn warn(&mut self, warning: Warning) {
        if self.level.enables(LogLevel::Warn) {
            tracing::warn!(callable = %self.callable, "{warning}");
        }
        self.warnings.push(warning);
    }

    pub(crate) fn finish(self, schema: SchemaResult) -> Report {
        Report {
            schema,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctool_docs::TagKind;

    #[test]
    fn warning_messages() {
        let warning = Warning::UnknownParameter {
            tag: "values".to_string(),
            parameter: "colour".to_string(),
        };
        assert_eq!(warning.to_string(), "@values documents unknown parameter `colour`");

        let warning = Warning::MalformedTag(TagError::new(
            TagKind::MinItems,
            "ids x",
            "expected an integer",
        ));
        assert_eq!(
            warning.to_string(),
            "skipped malformed tag: invalid @min_items tag format `ids x`: expected an integer"
        );

        let warning = Warning::MissingDocs {
            location: SourceLocation::new("src/tools.rs", 7),
        };
        assert_eq!(warning.to_string(), "no documentation found at src/tools.rs:7");
    }
}
