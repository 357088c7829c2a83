//! Callable descriptions: the parameter list and where its docs live.
//!
//! A [`Callable`] is what reflection over a function would yield: its name,
//! an ordered [`Signature`] of `(kind, name)` parameters and a
//! [`DocSource`]. A [`Class`] wraps a constructor callable and is converted
//! under the class name. Both are usually produced by `#[describe]`, but can
//! be built by hand or deserialized from a manifest:
//!
//! ```
//! use doctool_schema::{Callable, DocSource, ParamKind, Signature};
//!
//! let callable = Callable::new("get_current_temperature")
//!     .with_signature(Signature::new().required("location").required("unit"))
//!     .with_docs(DocSource::inline("Gets the current temperature."));
//!
//! assert_eq!(callable.signature.params()[1].kind, ParamKind::RequiredNamed);
//! ```

use doctool_docs::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// How a parameter is passed at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Passed by name, must be supplied.
    RequiredNamed,
    /// Passed by name, may be omitted.
    OptionalNamed,
    /// Passed by position, must be supplied.
    Positional,
    /// Passed by position, may be omitted.
    OptionalPositional,
    /// Collects remaining positional arguments.
    Rest,
    /// A block or callback argument.
    Block,
}

impl ParamKind {
    /// Returns `true` for the kinds a tool schema can describe.
    pub const fn is_named(self) -> bool {
        matches!(self, Self::RequiredNamed | Self::OptionalNamed)
    }

    /// Returns `true` only for [`ParamKind::RequiredNamed`].
    pub const fn is_required(self) -> bool {
        matches!(self, Self::RequiredNamed)
    }

    /// Human-readable name used in error messages.
    pub const fn describe(self) -> &'static str {
        match self {
            Self::RequiredNamed => "required named",
            Self::OptionalNamed => "optional named",
            Self::Positional => "positional",
            Self::OptionalPositional => "optional positional",
            Self::Rest => "rest",
            Self::Block => "block",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// One formal parameter of a callable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name.
    pub name: String,
    /// How the parameter is passed.
    pub kind: ParamKind,
    /// Description written next to the parameter itself, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl ParamSpec {
    /// Creates a parameter of the given kind.
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            doc: None,
        }
    }

    /// Attaches an inline description.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// Ordered parameter list of a callable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature {
    params: Vec<ParamSpec>,
}

impl Signature {
    /// Creates an empty signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Appends a required named parameter.
    #[must_use]
    pub fn required(self, name: impl Into<String>) -> Self {
        self.param(ParamSpec::new(name, ParamKind::RequiredNamed))
    }

    /// Appends an optional named parameter.
    #[must_use]
    pub fn optional(self, name: impl Into<String>) -> Self {
        self.param(ParamSpec::new(name, ParamKind::OptionalNamed))
    }

    /// Appends a positional parameter.
    #[must_use]
    pub fn positional(self, name: impl Into<String>) -> Self {
        self.param(ParamSpec::new(name, ParamKind::Positional))
    }

    /// Parameters in declaration order.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` when the callable takes no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl FromIterator<ParamSpec> for Signature {
    fn from_iter<I: IntoIterator<Item = ParamSpec>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

/// Where a callable's documentation comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocSource {
    /// No documentation.
    #[default]
    None,
    /// Comment text with markers already stripped.
    Inline(String),
    /// A declaration in a source file, resolved through the doc index.
    Location(SourceLocation),
}

impl DocSource {
    /// Inline comment text.
    pub fn inline(text: impl Into<String>) -> Self {
        Self::Inline(text.into())
    }

    /// A declaration at `line` of `file`.
    pub fn location(file: impl Into<PathBuf>, line: u32) -> Self {
        Self::Location(SourceLocation::new(file, line))
    }

    /// Returns `true` for [`DocSource::None`].
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// A function or method reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Callable {
    /// Function name; becomes the tool name.
    pub name: String,
    /// Declared parameters.
    #[serde(default, rename = "params")]
    pub signature: Signature,
    /// Documentation source.
    #[serde(default, skip_serializing_if = "DocSource::is_none")]
    pub docs: DocSource,
}

impl Callable {
    /// Creates a callable with no parameters and no docs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: Signature::new(),
            docs: DocSource::None,
        }
    }

    /// Replaces the signature.
    #[must_use]
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = signature;
        self
    }

    /// Appends one parameter.
    #[must_use]
    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.signature = self.signature.param(param);
        self
    }

    /// Sets the documentation source.
    #[must_use]
    pub fn with_docs(mut self, docs: DocSource) -> Self {
        self.docs = docs;
        self
    }
}

/// A class-like type converted through its constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    /// Type name; becomes the tool name.
    pub name: String,
    /// Class-level documentation; supplies the tool description.
    #[serde(default, skip_serializing_if = "DocSource::is_none")]
    pub docs: DocSource,
    /// Constructor whose parameters become the tool parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constructor: Option<Callable>,
}

impl Class {
    /// Creates a class with no constructor and no docs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docs: DocSource::None,
            constructor: None,
        }
    }

    /// Sets the class-level documentation source.
    #[must_use]
    pub fn with_docs(mut self, docs: DocSource) -> Self {
        self.docs = docs;
        self
    }

    /// Sets the constructor.
    #[must_use]
    pub fn with_constructor(mut self, constructor: Callable) -> Self {
        self.constructor = Some(constructor);
        self
    }
}

/// Anything that can be converted into a tool schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    /// A function or method.
    Function(Callable),
    /// A class, converted through its constructor.
    Class(Class),
}

impl Target {
    /// Name of the resulting tool.
    pub fn name(&self) -> &str {
        match self {
            Self::Function(callable) => &callable.name,
            Self::Class(class) => &class.name,
        }
    }
}

impl From<Callable> for Target {
    fn from(callable: Callable) -> Self {
        Self::Function(callable)
    }
}

impl From<Class> for Target {
    fn from(class: Class) -> Self {
        Self::Class(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_preserves_order() {
        let signature = Signature::new()
            .required("b")
            .optional("a")
            .positional("c");
        let names: Vec<_> = signature.params().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(signature.params()[2].kind, ParamKind::Positional);
    }

    #[test]
    fn only_named_kinds_are_convertible() {
        assert!(ParamKind::RequiredNamed.is_named());
        assert!(ParamKind::OptionalNamed.is_named());
        assert!(!ParamKind::Positional.is_named());
        assert!(!ParamKind::Rest.is_named());
        assert_eq!(ParamKind::OptionalPositional.to_string(), "optional positional");
    }

    #[test]
    fn target_deserializes_from_manifest_json() {
        let target: Target = serde_json::from_value(json!({
            "kind": "function",
            "name": "search",
            "params": [
                { "name": "query", "kind": "required_named" },
                { "name": "limit", "kind": "optional_named", "doc": "Max results." }
            ],
            "docs": { "location": { "file": "src/tools.rs", "line": 12 } }
        }))
        .unwrap();

        let Target::Function(callable) = target else {
            panic!("expected a function target");
        };
        assert_eq!(callable.signature.len(), 2);
        assert_eq!(callable.signature.params()[1].doc.as_deref(), Some("Max results."));
        assert_eq!(callable.docs, DocSource::location("src/tools.rs", 12));
    }

    #[test]
    fn class_target_round_trips() {
        let target = Target::from(
            Class::new("User")
                .with_docs(DocSource::inline("A user."))
                .with_constructor(
                    Callable::new("new").with_signature(Signature::new().required("name")),
                ),
        );
        let value = serde_json::to_value(&target).unwrap();
        assert_eq!(value["kind"], "class");
        assert_eq!(value["constructor"]["params"][0]["name"], "name");

        let back: Target = serde_json::from_value(value).unwrap();
        assert_eq!(back, target);
        assert_eq!(back.name(), "User");
    }
}
