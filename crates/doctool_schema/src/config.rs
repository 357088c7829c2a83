//! Converter configuration.

use serde::{Deserialize, Serialize};

pub use crate::types::TypePolicy;
pub use doctool_docs::ValuesParsing;

/// Verbosity of the converter's own log events.
///
/// Levels are ordered: `Silent < Warn < Debug`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Emit nothing.
    Silent,
    /// Emit a `warn` event per recoverable warning.
    #[default]
    Warn,
    /// Also emit `debug` events for each pipeline stage.
    Debug,
}

impl LogLevel {
    /// Returns `true` if events of `level` should be emitted.
    pub fn enables(self, level: Self) -> bool {
        level != Self::Silent && self >= level
    }
}

/// What to do with a tag that does not match its grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagPolicy {
    /// Skip the tag and record a warning.
    #[default]
    Lenient,
    /// Fail the conversion.
    Strict,
}

/// Settings for a [`Converter`](crate::Converter).
///
/// Every field has a default, so partial JSON files deserialize:
///
/// ```
/// use doctool_schema::{ConverterConfig, LogLevel, TagPolicy};
///
/// let config: ConverterConfig =
///     serde_json::from_str(r#"{ "tag_policy": "strict" }"#).unwrap();
/// assert_eq!(config.tag_policy, TagPolicy::Strict);
/// assert_eq!(config.log_level, LogLevel::Warn);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Converter log verbosity.
    pub log_level: LogLevel,
    /// Handling of malformed tags.
    pub tag_policy: TagPolicy,
    /// Handling of unknown documented types.
    pub type_policy: TypePolicy,
    /// `@values` parsing mode.
    pub values_parsing: ValuesParsing,
    /// Pretty-print serialized output.
    pub pretty: bool,
}

impl ConverterConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level.
    #[must_use]
    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    /// Sets the tag policy.
    #[must_use]
    pub fn with_tag_policy(mut self, tag_policy: TagPolicy) -> Self {
        self.tag_policy = tag_policy;
        self
    }

    /// Sets the type policy.
    #[must_use]
    pub fn with_type_policy(mut self, type_policy: TypePolicy) -> Self {
        self.type_policy = type_policy;
        self
    }

    /// Sets the `@values` parsing mode.
    #[must_use]
    pub fn with_values_parsing(mut self, values_parsing: ValuesParsing) -> Self {
        self.values_parsing = values_parsing;
        self
    }

    /// Enables or disables pretty-printed output.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Strict tags, strict types and strict `@values` parsing.
    #[must_use]
    pub fn strict(self) -> Self {
        self.with_tag_policy(TagPolicy::Strict)
            .with_type_policy(TypePolicy::Strict)
            .with_values_parsing(ValuesParsing::Strict)
    }
}
