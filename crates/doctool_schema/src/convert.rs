//! Conversion facade.
//!
//! A [`Converter`] validates a [`Target`], extracts its parameters, resolves
//! its documentation through a [`DocIndex`] and assembles the schema. The
//! free functions [`convert`] and [`batch_convert`] use a default converter.
//!
//! ```
//! use doctool_schema::{Callable, Format, Signature, convert};
//!
//! let target = Callable::new("missing_yard")
//!     .with_signature(Signature::new().required("text"))
//!     .into();
//! let output = convert(&target, Format::Serialized).unwrap();
//! assert_eq!(
//!     output.as_str(),
//!     Some(r#"{"type":"function","function":{"name":"missing_yard","description":"","parameters":{"type":"object","properties":{"text":{"type":"string","description":""}},"required":["text"]}}}"#)
//! );
//! ```

use crate::assemble::assemble;
use crate::config::ConverterConfig;
use crate::error::ConvertError;
use crate::extract::{ParameterRecord, extract_parameters, is_identifier};
use crate::report::{Diagnostics, Report, Warning};
use crate::schema::SchemaResult;
use crate::signature::{Class, DocSource, Signature, Target};
use doctool_docs::{DocComment, DocIndex};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Output representation requested from a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// JSON text.
    #[default]
    Serialized,
    /// The [`SchemaResult`] value.
    Structured,
}

/// Result of a conversion in the requested [`Format`].
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// JSON text.
    Serialized(String),
    /// Structured schema.
    Structured(SchemaResult),
}

impl Output {
    /// The JSON text, if this is serialized output.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Serialized(text) => Some(text),
            Self::Structured(_) => None,
        }
    }

    /// The schema, if this is structured output.
    pub fn as_schema(&self) -> Option<&SchemaResult> {
        match self {
            Self::Structured(schema) => Some(schema),
            Self::Serialized(_) => None,
        }
    }

    /// Converts into the JSON text, if serialized.
    pub fn into_string(self) -> Option<String> {
        match self {
            Self::Serialized(text) => Some(text),
            Self::Structured(_) => None,
        }
    }

    /// Converts into the schema, if structured.
    pub fn into_schema(self) -> Option<SchemaResult> {
        match self {
            Self::Structured(schema) => Some(schema),
            Self::Serialized(_) => None,
        }
    }
}

/// Converts targets into tool schemas.
///
/// Holds the configuration and the documentation index used for
/// [`DocSource::Location`] lookups. Converters are cheap to clone and can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConverterConfig,
    index: Arc<DocIndex>,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

impl Converter {
    /// Creates a converter backed by the process-wide [`DocIndex::global`].
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config,
            index: DocIndex::global(),
        }
    }

    /// Replaces the documentation index.
    #[must_use]
    pub fn with_doc_index(mut self, index: Arc<DocIndex>) -> Self {
        self.index = index;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// The documentation index in use.
    pub fn doc_index(&self) -> &Arc<DocIndex> {
        &self.index
    }

    /// Converts a target into the requested format.
    pub fn convert(&self, target: &Target, format: Format) -> Result<Output, ConvertError> {
        let schema = self.convert_structured(target)?;
        match format {
            Format::Structured => Ok(Output::Structured(schema)),
            Format::Serialized => {
                let text = if self.config.pretty {
                    schema.to_json_pretty()?
                } else {
                    schema.to_json()?
                };
                Ok(Output::Serialized(text))
            }
        }
    }

    /// Converts a target into a structured schema.
    pub fn convert_structured(&self, target: &Target) -> Result<SchemaResult, ConvertError> {
        self.report(target).map(|report| report.schema)
    }

    /// Converts a target and returns the schema with every warning raised.
    pub fn report(&self, target: &Target) -> Result<Report, ConvertError> {
        let name = target.name();
        let mut diagnostics = Diagnostics::new(name, self.config.log_level);
        if diagnostics.debug_enabled() {
            tracing::debug!(callable = name, "Converting target");
        }

        if !is_identifier(name) {
            return Err(ConvertError::invalid_shape(
                name,
                "the name must be a non-empty identifier",
            ));
        }

        let (records, doc) = match target {
            Target::Function(callable) => {
                let records = extract_parameters(name, &callable.signature)?;
                let doc = self.resolve_docs(&callable.docs, &mut diagnostics);
                (records, doc)
            }
            Target::Class(class) => self.class_parts(class, &mut diagnostics)?,
        };

        let schema = assemble(name, &doc, records, &self.config, &mut diagnostics)?;
        if diagnostics.debug_enabled() {
            tracing::debug!(
                callable = name,
                parameters = schema.function.parameters.properties.len(),
                "Assembled schema"
            );
        }
        Ok(diagnostics.finish(schema))
    }

    /// Converts every target, stopping at the first failure.
    ///
    /// Outputs keep input order. The failure is wrapped in
    /// [`ConvertError::Batch`] with its index.
    pub fn batch_convert(
        &self,
        targets: &[Target],
        format: Format,
    ) -> Result<Vec<Output>, ConvertError> {
        targets
            .iter()
            .enumerate()
            .map(|(index, target)| {
                self.convert(target, format).map_err(|source| ConvertError::Batch {
                    index,
                    source: Box::new(source),
                })
            })
            .collect()
    }

    /// Converts every target independently, one result per input, in order.
    pub fn batch_convert_each(
        &self,
        targets: &[Target],
        format: Format,
    ) -> Vec<Result<Output, ConvertError>> {
        targets
            .iter()
            .map(|target| self.convert(target, format))
            .collect()
    }

    /// Parameters and merged docs of a class: class tags first, then the
    /// constructor's, with the class description preferred.
    fn class_parts(
        &self,
        class: &Class,
        diagnostics: &mut Diagnostics,
    ) -> Result<(Vec<ParameterRecord>, DocComment), ConvertError> {
        let empty = Signature::new();
        let signature = class
            .constructor
            .as_ref()
            .map_or(&empty, |constructor| &constructor.signature);
        let records = extract_parameters(&class.name, signature)?;

        let mut doc = self.resolve_docs(&class.docs, diagnostics);
        if let Some(constructor) = &class.constructor {
            let constructor_doc = self.resolve_docs(&constructor.docs, diagnostics);
            if doc.description.is_empty() {
                doc.description.clone_from(&constructor_doc.description);
            }
            doc.extend_tags(constructor_doc);
        }
        Ok((records, doc))
    }

    fn resolve_docs(&self, source: &DocSource, diagnostics: &mut Diagnostics) -> DocComment {
        match source {
            DocSource::None => DocComment::default(),
            DocSource::Inline(text) => DocComment::parse(text),
            DocSource::Location(location) => match self.index.lookup(location) {
                Ok(Some(doc)) => {
                    if diagnostics.debug_enabled() {
                        tracing::debug!(
                            callable = %diagnostics.callable(),
                            location = %location,
                            tags = doc.tags.len(),
                            "Loaded documentation"
                        );
                    }
                    doc
                }
                Ok(None) => {
                    diagnostics.warn(Warning::MissingDocs {
                        location: location.clone(),
                    });
                    DocComment::default()
                }
                Err(err) => {
                    diagnostics.warn(Warning::DocLookupFailed {
                        location: location.clone(),
                        message: err.to_string(),
                    });
                    DocComment::default()
                }
            },
        }
    }
}

/// Converts a target with the default converter.
pub fn convert(target: &Target, format: Format) -> Result<Output, ConvertError> {
    Converter::default().convert(target, format)
}

/// Converts targets with the default converter, stopping at the first failure.
pub fn batch_convert(targets: &[Target], format: Format) -> Result<Vec<Output>, ConvertError> {
    Converter::default().batch_convert(targets, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use crate::signature::Callable;
    use doctool_docs::SourceLocation;

    fn quiet() -> Converter {
        Converter::new(ConverterConfig::default().with_log_level(LogLevel::Silent))
            .with_doc_index(Arc::new(DocIndex::new()))
    }

    #[test]
    fn rejects_invalid_names() {
        for name in ["", "has space", "9lives", "Foo::Bar"] {
            let target = Target::from(Callable::new(name));
            let err = quiet().convert(&target, Format::Structured).unwrap_err();
            assert!(matches!(err, ConvertError::InvalidArgumentShape { .. }), "{name}");
        }
    }

    #[test]
    fn shape_errors_come_before_doc_lookup() {
        let target = Target::from(
            Callable::new("f")
                .with_signature(Signature::new().positional("x"))
                .with_docs(DocSource::location("/does/not/exist.rs", 1)),
        );
        let err = quiet().report(&target).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidArgumentShape { .. }));
    }

    #[test]
    fn missing_file_is_a_warning() {
        let target = Target::from(
            Callable::new("f")
                .with_signature(Signature::new().required("a"))
                .with_docs(DocSource::location("/does/not/exist.rs", 1)),
        );
        let report = quiet().report(&target).unwrap();
        assert_eq!(report.schema.function.description, "");
        let expected = SourceLocation::new("/does/not/exist.rs", 1);
        assert!(matches!(
            report.warnings.as_slice(),
            [Warning::DocLookupFailed { location, .. }] if location == &expected
        ));
    }

    #[test]
    fn undocumented_line_is_missing_docs() {
        let converter = quiet();
        converter
            .doc_index()
            .insert_source("mem.rs", "/// Documented.\nfn a() {}\n\nfn b() {}\n");
        let target = Target::from(Callable::new("b").with_docs(DocSource::location("mem.rs", 4)));
        let report = converter.report(&target).unwrap();
        assert_eq!(
            report.warnings,
            [Warning::MissingDocs {
                location: SourceLocation::new("mem.rs", 4)
            }]
        );

        let target = Target::from(Callable::new("a").with_docs(DocSource::location("mem.rs", 2)));
        let report = converter.report(&target).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.schema.function.description, "Documented.");
    }

    #[test]
    fn class_merges_docs_and_constructor_tags_win() {
        let class = Class::new("User")
            .with_docs(DocSource::inline("A user.\n@param name Class-level."))
            .with_constructor(
                Callable::new("new")
                    .with_signature(Signature::new().required("name"))
                    .with_docs(DocSource::inline("Builds a user.\n@param name [String] The name.")),
            );
        let schema = quiet().convert_structured(&class.into()).unwrap();
        assert_eq!(schema.function.name, "User");
        assert_eq!(schema.function.description, "A user.");
        assert_eq!(
            schema.function.parameters.properties["name"].description,
            "The name."
        );
    }

    #[test]
    fn class_falls_back_to_constructor_description() {
        let class = Class::new("Point").with_constructor(
            Callable::new("new").with_docs(DocSource::inline("Makes a point.")),
        );
        let schema = quiet().convert_structured(&class.into()).unwrap();
        assert_eq!(schema.function.description, "Makes a point.");
    }

    #[test]
    fn class_without_constructor_has_no_parameters() {
        let schema = quiet().convert_structured(&Class::new("Marker").into()).unwrap();
        assert!(schema.function.parameters.properties.is_empty());
        assert!(schema.function.parameters.required.is_empty());
    }

    #[test]
    fn pretty_output_is_indented() {
        let converter = Converter::new(ConverterConfig::default().with_pretty(true));
        let output = converter
            .convert(&Callable::new("f").into(), Format::Serialized)
            .unwrap();
        assert!(output.as_str().unwrap().contains("\n  \"function\": {"));
    }

    #[test]
    fn format_deserializes_lowercase() {
        let format: Format = serde_json::from_str("\"structured\"").unwrap();
        assert_eq!(format, Format::Structured);
    }
}
