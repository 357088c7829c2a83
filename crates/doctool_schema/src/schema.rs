//! Tool schema output types.
//!
//! [`SchemaResult`] is the `{ "type": "function", "function": { ... } }`
//! envelope consumed by LLM tool-calling APIs. Optional property fields are
//! omitted when absent, never written as `null`.

use crate::extract::ParameterRecord;
use crate::types::JsonType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discriminator of the tool envelope. Always `"function"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// `"function"`
    #[default]
    Function,
}

/// A finished tool schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaResult {
    /// Always [`ToolKind::Function`].
    #[serde(rename = "type")]
    pub kind: ToolKind,
    /// The described function.
    pub function: FunctionSchema,
}

impl SchemaResult {
    /// Wraps a function schema in the tool envelope.
    pub fn new(function: FunctionSchema) -> Self {
        Self {
            kind: ToolKind::Function,
            function,
        }
    }

    /// Serializes to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Converts into a [`serde_json::Value`].
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Name, description and parameters of the described function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSchema {
    /// Tool name.
    pub name: String,
    /// Tool description, possibly empty.
    pub description: String,
    /// Object schema of the parameters.
    pub parameters: ParametersSchema,
}

impl FunctionSchema {
    /// Creates a schema with the given name, no description and no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            parameters: ParametersSchema::default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a parameter, appending it to `required` when the record is
    /// required.
    #[must_use]
    pub fn add_parameter(mut self, record: &ParameterRecord) -> Self {
        self.parameters
            .properties
            .insert(record.name().to_string(), PropertySchema::from(record));
        if record.required {
            self.parameters.required.push(record.name().to_string());
        }
        self
    }
}

/// The `parameters` object schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametersSchema {
    /// Always [`JsonType::Object`].
    #[serde(rename = "type")]
    pub json_type: JsonType,
    /// Properties in declaration order.
    pub properties: IndexMap<String, PropertySchema>,
    /// Required property names in declaration order.
    pub required: Vec<String>,
}

impl Default for ParametersSchema {
    fn default() -> Self {
        Self {
            json_type: JsonType::Object,
            properties: IndexMap::new(),
            required: Vec::new(),
        }
    }
}

/// Schema of a single parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    /// JSON type.
    #[serde(rename = "type")]
    pub json_type: JsonType,
    /// Description, possibly empty.
    pub description: String,
    /// Allowed values.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Element schema for arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemsSchema>,
    /// Minimum array length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    /// Maximum array length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
}

impl From<&ParameterRecord> for PropertySchema {
    fn from(record: &ParameterRecord) -> Self {
        Self {
            json_type: record.json_type,
            description: record.description.clone(),
            enum_values: record.enum_values.clone(),
            items: record.items_type.map(|json_type| ItemsSchema { json_type }),
            min_items: record.min_items,
            max_items: record.max_items,
        }
    }
}

/// Element schema of an array property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsSchema {
    /// Element type.
    #[serde(rename = "type")]
    pub json_type: JsonType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_function_schema_shape() {
        let schema = SchemaResult::new(FunctionSchema::new("noop"));
        assert_eq!(
            schema.to_value().unwrap(),
            json!({
                "type": "function",
                "function": {
                    "name": "noop",
                    "description": "",
                    "parameters": { "type": "object", "properties": {}, "required": [] }
                }
            })
        );
    }

    #[test]
    fn absent_fields_are_omitted() {
        let record = ParameterRecord::new("text", true);
        let schema = FunctionSchema::new("f").add_parameter(&record);
        let value = serde_json::to_value(&schema.parameters.properties["text"]).unwrap();
        assert_eq!(value, json!({ "type": "string", "description": "" }));
    }

    #[test]
    fn array_fields_use_camel_case() {
        let mut record = ParameterRecord::new("ids", false);
        record.json_type = JsonType::Array;
        record.items_type = Some(JsonType::Integer);
        record.min_items = Some(1);
        record.max_items = Some(5);
        record.enum_values = Some(vec![json!(1), json!(2)]);

        let schema = FunctionSchema::new("f").add_parameter(&record);
        assert!(schema.parameters.required.is_empty());
        assert_eq!(
            serde_json::to_value(&schema.parameters.properties["ids"]).unwrap(),
            json!({
                "type": "array",
                "description": "",
                "enum": [1, 2],
                "items": { "type": "integer" },
                "minItems": 1,
                "maxItems": 5
            })
        );
    }

    #[test]
    fn parses_back_from_json() {
        let schema = SchemaResult::new(
            FunctionSchema::new("f")
                .with_description("Does f.")
                .add_parameter(&ParameterRecord::new("a", true))
                .add_parameter(&ParameterRecord::new("b", false)),
        );
        let text = schema.to_json().unwrap();
        let back: SchemaResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, schema);
        let keys: Vec<_> = back.function.parameters.properties.keys().collect();
        assert_eq!(keys, ["a", "b"]);
    }
}
