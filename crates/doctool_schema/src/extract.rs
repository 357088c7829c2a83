//! Parameter extraction: signature to parameter records.

use crate::error::ConvertError;
use crate::signature::Signature;
use crate::types::JsonType;
use serde_json::Value;
use std::collections::HashSet;

/// Schema-relevant state of one parameter during assembly.
///
/// Seeded from the signature with `type = string` and an empty description,
/// then filled in by documentation tags.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRecord {
    name: String,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// JSON Schema type.
    pub json_type: JsonType,
    /// Description text.
    pub description: String,
    /// Allowed values from `@values`.
    pub enum_values: Option<Vec<Value>>,
    /// Element type from `@items_type`.
    pub items_type: Option<JsonType>,
    /// Minimum length from `@min_items`.
    pub min_items: Option<u64>,
    /// Maximum length from `@max_items`.
    pub max_items: Option<u64>,
}

impl ParameterRecord {
    /// Creates a record with default type and description.
    pub fn new(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
            json_type: JsonType::String,
            description: String::new(),
            enum_values: None,
            items_type: None,
            min_items: None,
            max_items: None,
        }
    }

    /// Parameter name; fixed once the record exists.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Builds one record per parameter of `signature`, in declaration order.
///
/// Fails with [`ConvertError::InvalidArgumentShape`] if any parameter is not
/// passed by name, or if a name is empty, not an identifier, or repeated.
pub fn extract_parameters(
    callable: &str,
    signature: &Signature,
) -> Result<Vec<ParameterRecord>, ConvertError> {
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(signature.len());

    for param in signature.params() {
        if !param.kind.is_named() {
            return Err(ConvertError::invalid_shape(
                callable,
                format!(
                    "only named arguments are supported, but `{}` is a {} parameter",
                    param.name, param.kind
                ),
            ));
        }
        if !is_identifier(&param.name) {
            return Err(ConvertError::invalid_shape(
                callable,
                format!("`{}` is not a valid parameter name", param.name),
            ));
        }
        if !seen.insert(param.name.as_str()) {
            return Err(ConvertError::invalid_shape(
                callable,
                format!("parameter `{}` is declared more than once", param.name),
            ));
        }

        let mut record = ParameterRecord::new(&param.name, param.kind.is_required());
        if let Some(doc) = &param.doc {
            record.description = doc.trim().to_string();
        }
        records.push(record);
    }

    Ok(records)
}

/// Returns `true` for ASCII identifiers (`[A-Za-z_][A-Za-z0-9_]*`).
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{ParamKind, ParamSpec};

    #[test]
    fn records_follow_declaration_order_with_defaults() {
        let signature = Signature::new().required("location").optional("unit");
        let records = extract_parameters("weather", &signature).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name(), "location");
        assert!(records[0].required);
        assert_eq!(records[1].name(), "unit");
        assert!(!records[1].required);
        for record in &records {
            assert_eq!(record.json_type, JsonType::String);
            assert_eq!(record.description, "");
            assert!(record.enum_values.is_none());
        }
    }

    #[test]
    fn inline_doc_seeds_description() {
        let signature = Signature::new()
            .param(ParamSpec::new("q", ParamKind::RequiredNamed).with_doc(" Query. "));
        let records = extract_parameters("search", &signature).unwrap();
        assert_eq!(records[0].description, "Query.");
    }

    #[test]
    fn positional_parameter_is_rejected() {
        let signature = Signature::new().required("a").positional("text");
        let err = extract_parameters("not_named_arg", &signature).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("named arguments"), "got: {message}");
        assert!(message.contains("positional"), "got: {message}");
        assert!(message.contains("`text`"), "got: {message}");
    }

    #[test]
    fn rest_and_block_are_rejected() {
        for kind in [ParamKind::Rest, ParamKind::Block, ParamKind::OptionalPositional] {
            let signature = Signature::new().param(ParamSpec::new("x", kind));
            let err = extract_parameters("f", &signature).unwrap_err();
            assert!(err.to_string().contains(kind.describe()));
        }
    }

    #[test]
    fn duplicate_and_invalid_names_are_rejected() {
        let dup = Signature::new().required("a").optional("a");
        assert!(matches!(
            extract_parameters("f", &dup),
            Err(ConvertError::InvalidArgumentShape { .. })
        ));

        let empty = Signature::new().required("");
        assert!(extract_parameters("f", &empty).is_err());

        let spaced = Signature::new().required("two words");
        assert!(extract_parameters("f", &spaced).is_err());
    }

    #[test]
    fn identifier_check() {
        assert!(is_identifier("_private"));
        assert!(is_identifier("unit2"));
        assert!(!is_identifier("2unit"));
        assert!(!is_identifier("kebab-case"));
    }
}
