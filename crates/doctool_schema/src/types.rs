//! JSON Schema primitive types and the documented-type mapper.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A JSON Schema primitive type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    /// `"string"`
    String,
    /// `"integer"`
    Integer,
    /// `"number"`
    Number,
    /// `"boolean"`
    Boolean,
    /// `"array"`
    Array,
    /// `"object"`
    Object,
    /// `"null"`
    Null,
}

impl JsonType {
    /// Returns the JSON Schema spelling of this type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with a documented type name the mapper does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypePolicy {
    /// Fall back to `"string"` and record a warning.
    #[default]
    Lenient,
    /// Fail the conversion with an unsupported type error.
    Strict,
}

/// Maps a documented type name to a JSON Schema type.
///
/// Generic arguments and module paths are ignored, so `Array<String>` and
/// `std::vec::Vec<u8>` both map to [`JsonType::Array`]. Returns `None` for
/// names outside the table.
///
/// ```
/// use doctool_schema::{JsonType, map_type};
///
/// assert_eq!(map_type("Float"), Some(JsonType::Number));
/// assert_eq!(map_type("Hash{String => Integer}"), Some(JsonType::Object));
/// assert_eq!(map_type("Widget"), None);
/// ```
pub fn map_type(name: &str) -> Option<JsonType> {
    let ty = match base_name(name) {
        "String" | "string" | "Symbol" | "str" | "char" | "Cow" | "PathBuf" => JsonType::String,
        "Integer" | "integer" | "Int" | "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8"
        | "u16" | "u32" | "u64" | "u128" | "usize" => JsonType::Integer,
        "Float" | "Numeric" | "Number" | "number" | "Decimal" | "BigDecimal" | "f32" | "f64" => {
            JsonType::Number
        }
        "Boolean" | "boolean" | "Bool" | "bool" | "TrueClass" | "FalseClass" | "true"
        | "false" => JsonType::Boolean,
        "Array" | "array" | "Vec" | "VecDeque" | "Set" | "HashSet" | "BTreeSet" => JsonType::Array,
        "Hash" | "Object" | "object" | "Map" | "HashMap" | "BTreeMap" | "IndexMap" | "Value" => {
            JsonType::Object
        }
        "Null" | "null" | "nil" | "NilClass" | "None" | "()" => JsonType::Null,
        _ => return None,
    };
    Some(ty)
}

/// Strips references, module paths and generic arguments from a type name.
fn base_name(name: &str) -> &str {
    let name = name.trim().trim_start_matches('&').trim();
    if name == "()" {
        return name;
    }
    let end = name.find(['<', '{', '(', '[']).unwrap_or(name.len());
    let name = name[..end].trim_end();
    name.rsplit("::").next().unwrap_or(name)
}
