//! Schema assembly: parameter records plus parsed tags into a [`SchemaResult`].
//!
//! Tags are applied in three passes regardless of where they appear in the
//! comment: `@param`, then `@values`, then the array constraints
//! (`@items_type`, `@min_items`, `@max_items`). Within a pass, written order
//! is kept. Array constraints therefore override a type declared by `@param`.

use crate::config::{ConverterConfig, TagPolicy};
use crate::error::ConvertError;
use crate::extract::ParameterRecord;
use crate::report::{Diagnostics, Warning};
use crate::schema::{FunctionSchema, SchemaResult};
use crate::types::{JsonType, TypePolicy, map_type};
use doctool_docs::{DocComment, ParsedTag, TagKind, parse_tag};

/// Builds the schema for `name` from its records and documentation.
pub(crate) fn assemble(
    name: &str,
    doc: &DocComment,
    mut records: Vec<ParameterRecord>,
    config: &ConverterConfig,
    diagnostics: &mut Diagnostics,
) -> Result<SchemaResult, ConvertError> {
    let tags = parse_tags(doc, config, diagnostics)?;

    let passes: [fn(TagKind) -> bool; 3] = [
        |kind| kind == TagKind::Param,
        |kind| kind == TagKind::Values,
        TagKind::is_array_constraint,
    ];
    for in_pass in passes {
        for tag in tags.iter().filter(|tag| in_pass(tag.kind())) {
            let Some(record) = records
                .iter_mut()
                .find(|record| record.name() == tag.parameter())
            else {
                diagnostics.warn(Warning::UnknownParameter {
                    tag: tag.kind().tag_name().to_string(),
                    parameter: tag.parameter().to_string(),
                });
                continue;
            };
            apply_tag(record, tag, config.type_policy, diagnostics)?;
        }
    }

    let function = records.iter().fold(
        FunctionSchema::new(name).with_description(doc.description.as_str()),
        FunctionSchema::add_parameter,
    );
    Ok(SchemaResult::new(function))
}

/// Parses every schema-relevant tag, applying the tag policy to failures.
fn parse_tags(
    doc: &DocComment,
    config: &ConverterConfig,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<ParsedTag>, ConvertError> {
    let mut parsed = Vec::new();
    for tag in &doc.tags {
        match parse_tag(tag, config.values_parsing) {
            None => {}
            Some(Ok(tag)) => parsed.push(tag),
            Some(Err(err)) => match config.tag_policy {
                TagPolicy::Strict => return Err(err.into()),
                TagPolicy::Lenient => diagnostics.warn(Warning::MalformedTag(err)),
            },
        }
    }
    Ok(parsed)
}

fn apply_tag(
    record: &mut ParameterRecord,
    tag: &ParsedTag,
    type_policy: TypePolicy,
    diagnostics: &mut Diagnostics,
) -> Result<(), ConvertError> {
    match tag {
        ParsedTag::Param {
            types, description, ..
        } => {
            record.description.clone_from(description);
            if let Some(type_name) = types.first() {
                record.json_type =
                    resolve_type(record.name(), type_name, type_policy, diagnostics)?;
            }
        }
        ParsedTag::Values { values, .. } => {
            record.enum_values = Some(values.clone());
        }
        ParsedTag::ItemsType { type_name, .. } => {
            record.json_type = JsonType::Array;
            record.items_type = Some(map_type(type_name).unwrap_or(JsonType::String));
        }
        ParsedTag::MinItems { count, .. } => {
            record.json_type = JsonType::Array;
            record.min_items = Some(*count);
        }
        ParsedTag::MaxItems { count, .. } => {
            record.json_type = JsonType::Array;
            record.max_items = Some(*count);
        }
    }

    if diagnostics.debug_enabled() {
        tracing::debug!(
            callable = diagnostics.callable(),
            parameter = record.name(),
            tag = %tag.kind(),
            json_type = %record.json_type,
            "Applied documentation tag"
        );
    }
    Ok(())
}

fn resolve_type(
    parameter: &str,
    type_name: &str,
    policy: TypePolicy,
    diagnostics: &mut Diagnostics,
) -> Result<JsonType, ConvertError> {
    if let Some(json_type) = map_type(type_name) {
        return Ok(json_type);
    }
    match policy {
        TypePolicy::Strict => Err(ConvertError::UnsupportedType {
            parameter: parameter.to_string(),
            type_name: type_name.to_string(),
        }),
        TypePolicy::Lenient => {
            diagnostics.warn(Warning::UnknownType {
                parameter: parameter.to_string(),
                type_name: type_name.to_string(),
            });
            Ok(JsonType::String)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use serde_json::json;

    fn run(
        doc: &str,
        params: &[(&str, bool)],
        config: &ConverterConfig,
    ) -> (Result<SchemaResult, ConvertError>, Vec<Warning>) {
        let records = params
            .iter()
            .map(|(name, required)| ParameterRecord::new(*name, *required))
            .collect();
        let mut diagnostics = Diagnostics::new("f", LogLevel::Silent);
        let result = assemble("f", &DocComment::parse(doc), records, config, &mut diagnostics);
        let warnings = diagnostics.finish(SchemaResult::new(FunctionSchema::new("f"))).warnings;
        (result, warnings)
    }

    fn property(schema: &SchemaResult, name: &str) -> serde_json::Value {
        serde_json::to_value(&schema.function.parameters.properties[name]).unwrap()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tag application
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn param_sets_description_and_first_type() {
        let (result, warnings) = run(
            "Adds.\n@param a [Integer, nil] First.\n@param b Second.",
            &[("a", true), ("b", false)],
            &ConverterConfig::default(),
        );
        let schema = result.unwrap();
        assert!(warnings.is_empty());
        assert_eq!(schema.function.description, "Adds.");
        assert_eq!(property(&schema, "a"), json!({ "type": "integer", "description": "First." }));
        assert_eq!(property(&schema, "b"), json!({ "type": "string", "description": "Second." }));
        assert_eq!(schema.function.parameters.required, ["a"]);
    }

    #[test]
    fn array_tags_override_declared_type_regardless_of_order() {
        let (result, _) = run(
            "@max_items ids 3\n@param ids [String] Ids.\n@items_type ids Integer",
            &[("ids", true)],
            &ConverterConfig::default(),
        );
        assert_eq!(
            property(&result.unwrap(), "ids"),
            json!({
                "type": "array",
                "description": "Ids.",
                "items": { "type": "integer" },
                "maxItems": 3
            })
        );
    }

    #[test]
    fn values_keep_declared_type() {
        let (result, _) = run(
            "@param level [Integer] Level.\n@values level [1, 2, 3]",
            &[("level", true)],
            &ConverterConfig::default(),
        );
        assert_eq!(
            property(&result.unwrap(), "level"),
            json!({ "type": "integer", "description": "Level.", "enum": [1, 2, 3] })
        );
    }

    #[test]
    fn no_docs_keeps_defaults() {
        let (result, warnings) = run("", &[("text", true)], &ConverterConfig::default());
        let schema = result.unwrap();
        assert!(warnings.is_empty());
        assert_eq!(schema.function.description, "");
        assert_eq!(property(&schema, "text"), json!({ "type": "string", "description": "" }));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Recoverable problems and policies
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn unknown_parameter_is_warned_and_ignored() {
        let (result, warnings) = run(
            "@param nope Missing.\n@values colour [\"red\"]",
            &[("color", true)],
            &ConverterConfig::default(),
        );
        let schema = result.unwrap();
        assert_eq!(property(&schema, "color"), json!({ "type": "string", "description": "" }));
        assert_eq!(
            warnings,
            [
                Warning::UnknownParameter {
                    tag: "param".to_string(),
                    parameter: "nope".to_string()
                },
                Warning::UnknownParameter {
                    tag: "values".to_string(),
                    parameter: "colour".to_string()
                },
            ]
        );
    }

    #[test]
    fn malformed_tag_follows_tag_policy() {
        let doc = "@min_items ids many\n@param ids [Array] Ids.";
        let (lenient, warnings) = run(doc, &[("ids", true)], &ConverterConfig::default());
        assert_eq!(property(&lenient.unwrap(), "ids")["type"], "array");
        assert!(matches!(
            warnings.as_slice(),
            [Warning::MalformedTag(err)] if err.tag == TagKind::MinItems
        ));

        let strict = ConverterConfig::default().with_tag_policy(TagPolicy::Strict);
        let (result, _) = run(doc, &[("ids", true)], &strict);
        assert!(matches!(result, Err(ConvertError::InvalidTagFormat(_))));
    }

    #[test]
    fn unknown_type_follows_type_policy() {
        let doc = "@param w [Widget] A widget.";
        let (lenient, warnings) = run(doc, &[("w", true)], &ConverterConfig::default());
        assert_eq!(property(&lenient.unwrap(), "w")["type"], "string");
        assert_eq!(
            warnings,
            [Warning::UnknownType {
                parameter: "w".to_string(),
                type_name: "Widget".to_string()
            }]
        );

        let strict = ConverterConfig::default().with_type_policy(TypePolicy::Strict);
        let (result, _) = run(doc, &[("w", true)], &strict);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "unsupported type `Widget` for parameter `w`");
    }
}
