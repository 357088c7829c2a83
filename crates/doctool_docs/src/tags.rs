//! Tag grammars that feed schema assembly.
//!
//! Each grammar has its own parsing function so a new tag only needs a new
//! function and a [`TagKind`] variant:
//!
//! | Tag | Payload | Function |
//! |-----|---------|----------|
//! | `@param name [Types] text` | description and declared types | [`parse_param`] |
//! | `@values name [v1, v2]` | JSON array of scalars | [`parse_values`] |
//! | `@items_type name Type` | one of [`ITEM_TYPES`] | [`parse_items_type`] |
//! | `@min_items name n` | non-negative integer | [`parse_min_items`] |
//! | `@max_items name n` | positive integer | [`parse_max_items`] |
//!
//! Every function returns `(parameter name, parsed payload)`. Matching the
//! name against the callable's parameters is left to the caller.

use crate::comment::Tag;
use crate::error::TagError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

/// Type names accepted by `@items_type`.
pub const ITEM_TYPES: [&str; 7] = [
    "String", "Integer", "Float", "Boolean", "Object", "Array", "Null",
];

static NAME_AND_PAYLOAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*([A-Za-z_][A-Za-z0-9_]*)\s+(.*?)\s*$")
        .expect("tag payload pattern is valid")
});

static BAREWORD_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\[([^\[\]"'{}]*)\]$"#).expect("bareword list pattern is valid")
});

/// The tag grammars understood by schema assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    /// `@param`
    Param,
    /// `@values`
    Values,
    /// `@items_type`
    ItemsType,
    /// `@min_items`
    MinItems,
    /// `@max_items`
    MaxItems,
}

impl TagKind {
    /// All tag kinds, in assembly order.
    pub const ALL: [Self; 5] = [
        Self::Param,
        Self::Values,
        Self::ItemsType,
        Self::MinItems,
        Self::MaxItems,
    ];

    /// Returns the tag name as written after `@`.
    pub const fn tag_name(self) -> &'static str {
        match self {
            Self::Param => "param",
            Self::Values => "values",
            Self::ItemsType => "items_type",
            Self::MinItems => "min_items",
            Self::MaxItems => "max_items",
        }
    }

    /// Looks up a tag kind by its name as written after `@`.
    pub fn from_tag_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag_name() == name)
    }

    /// Returns `true` for tags that describe an array parameter.
    pub const fn is_array_constraint(self) -> bool {
        matches!(self, Self::ItemsType | Self::MinItems | Self::MaxItems)
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// How strictly `@values` payloads are parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValuesParsing {
    /// Only JSON array literals are accepted.
    Strict,
    /// JSON first, then a plain comma split for unquoted lists like `[a, b]`.
    #[default]
    Permissive,
}

/// A tag parsed by one of the grammars.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedTag {
    /// `@param`: description and declared type names.
    Param {
        /// Parameter name.
        name: String,
        /// Declared type names, possibly empty.
        types: Vec<String>,
        /// Parameter description.
        description: String,
    },
    /// `@values`: allowed values in written order.
    Values {
        /// Parameter name.
        name: String,
        /// Scalar values.
        values: Vec<Value>,
    },
    /// `@items_type`: element type name from [`ITEM_TYPES`].
    ItemsType {
        /// Parameter name.
        name: String,
        /// Element type name.
        type_name: String,
    },
    /// `@min_items`
    MinItems {
        /// Parameter name.
        name: String,
        /// Minimum element count.
        count: u64,
    },
    /// `@max_items`
    MaxItems {
        /// Parameter name.
        name: String,
        /// Maximum element count, always positive.
        count: u64,
    },
}

impl ParsedTag {
    /// The parameter this tag documents.
    pub fn parameter(&self) -> &str {
        match self {
            Self::Param { name, .. }
            | Self::Values { name, .. }
            | Self::ItemsType { name, .. }
            | Self::MinItems { name, .. }
            | Self::MaxItems { name, .. } => name,
        }
    }

    /// The grammar that produced this tag.
    pub const fn kind(&self) -> TagKind {
        match self {
            Self::Param { .. } => TagKind::Param,
            Self::Values { .. } => TagKind::Values,
            Self::ItemsType { .. } => TagKind::ItemsType,
            Self::MinItems { .. } => TagKind::MinItems,
            Self::MaxItems { .. } => TagKind::MaxItems,
        }
    }
}

/// Parses a tag with the grammar matching its name.
///
/// Returns `None` for tags that have no schema meaning (`@return`,
/// `@example`, ...).
pub fn parse_tag(tag: &Tag, mode: ValuesParsing) -> Option<Result<ParsedTag, TagError>> {
    let kind = TagKind::from_tag_name(&tag.tag_name)?;
    let parsed = match kind {
        TagKind::Param => parse_param(tag).map(|(name, (types, description))| ParsedTag::Param {
            name,
            types,
            description,
        }),
        TagKind::Values => {
            parse_values(&tag.text, mode).map(|(name, values)| ParsedTag::Values { name, values })
        }
        TagKind::ItemsType => parse_items_type(&tag.text)
            .map(|(name, type_name)| ParsedTag::ItemsType { name, type_name }),
        TagKind::MinItems => {
            parse_min_items(&tag.text).map(|(name, count)| ParsedTag::MinItems { name, count })
        }
        TagKind::MaxItems => {
            parse_max_items(&tag.text).map(|(name, count)| ParsedTag::MaxItems { name, count })
        }
    };
    Some(parsed)
}

/// Parses a `@param` tag into `(name, (types, description))`.
pub fn parse_param(tag: &Tag) -> Result<(String, (Vec<String>, String)), TagError> {
    let Some(name) = tag.name.clone() else {
        return Err(TagError::new(
            TagKind::Param,
            raw_param_text(tag),
            "expected a parameter name",
        ));
    };
    let types = tag.types.clone().unwrap_or_default();
    Ok((name, (types, tag.text.clone())))
}

/// Parses a `@values` payload into `(name, values)`.
pub fn parse_values(text: &str, mode: ValuesParsing) -> Result<(String, Vec<Value>), TagError> {
    let (name, payload) = split_name_and_payload(TagKind::Values, text)?;
    let err = |reason: &str| TagError::new(TagKind::Values, text, reason);

    if !payload.starts_with('[') || !payload.ends_with(']') {
        return Err(err("expected a list like [\"a\", \"b\"]"));
    }
    if !brackets_balanced(payload) {
        return Err(err("unbalanced brackets"));
    }

    let values = match serde_json::from_str::<Vec<Value>>(payload) {
        Ok(values) => values,
        Err(json_err) => match mode {
            ValuesParsing::Permissive => split_bareword_list(payload)
                .ok_or_else(|| err(&format!("not a JSON array: {json_err}")))?,
            ValuesParsing::Strict => return Err(err(&format!("not a JSON array: {json_err}"))),
        },
    };

    if values.is_empty() {
        return Err(err("expected at least one value"));
    }
    if let Some(bad) = values
        .iter()
        .find(|value| !matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_)))
    {
        return Err(err(&format!(
            "values must be strings, numbers or booleans, found {bad}"
        )));
    }

    Ok((name.to_string(), values))
}

/// Parses an `@items_type` payload into `(name, type name)`.
pub fn parse_items_type(text: &str) -> Result<(String, String), TagError> {
    let (name, payload) = split_name_and_payload(TagKind::ItemsType, text)?;
    if !ITEM_TYPES.contains(&payload) {
        return Err(TagError::new(
            TagKind::ItemsType,
            text,
            format!("expected one of {}", ITEM_TYPES.join(", ")),
        ));
    }
    Ok((name.to_string(), payload.to_string()))
}

/// Parses a `@min_items` payload into `(name, count)`.
pub fn parse_min_items(text: &str) -> Result<(String, u64), TagError> {
    let (name, payload) = split_name_and_payload(TagKind::MinItems, text)?;
    let count = parse_count(TagKind::MinItems, text, payload)?;
    Ok((name.to_string(), count))
}

/// Parses a `@max_items` payload into `(name, count)`. Zero is rejected.
pub fn parse_max_items(text: &str) -> Result<(String, u64), TagError> {
    let (name, payload) = split_name_and_payload(TagKind::MaxItems, text)?;
    let count = parse_count(TagKind::MaxItems, text, payload)?;
    if count == 0 {
        return Err(TagError::new(
            TagKind::MaxItems,
            text,
            "expected a positive integer",
        ));
    }
    Ok((name.to_string(), count))
}

fn split_name_and_payload(kind: TagKind, text: &str) -> Result<(&str, &str), TagError> {
    let caps = NAME_AND_PAYLOAD
        .captures(text)
        .ok_or_else(|| TagError::new(kind, text, "expected `<parameter> <value>`"))?;
    match (caps.get(1), caps.get(2)) {
        (Some(name), Some(payload)) if !payload.as_str().is_empty() => {
            Ok((name.as_str(), payload.as_str()))
        }
        _ => Err(TagError::new(kind, text, "expected `<parameter> <value>`")),
    }
}

fn parse_count(kind: TagKind, text: &str, payload: &str) -> Result<u64, TagError> {
    if payload.starts_with('-') {
        return Err(TagError::new(kind, text, "count must not be negative"));
    }
    if !payload.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(TagError::new(kind, text, "expected an integer"));
    }
    payload
        .parse::<u64>()
        .map_err(|err| TagError::new(kind, text, format!("count out of range: {err}")))
}

/// Checks `[`/`]` pairing outside of quoted strings.
fn brackets_balanced(payload: &str) -> bool {
    let mut depth = 0i64;
    let mut in_string = false;
    let mut escaped = false;
    for ch in payload.chars() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0 && !in_string
}

/// Splits an unquoted list like `[a, b]` into strings.
fn split_bareword_list(payload: &str) -> Option<Vec<Value>> {
    let caps = BAREWORD_LIST.captures(payload)?;
    let inner = caps.get(1)?.as_str();
    if inner.trim().is_empty() {
        return None;
    }
    inner
        .split(',')
        .map(|item| {
            let item = item.trim();
            (!item.is_empty()).then(|| Value::String(item.to_string()))
        })
        .collect()
}

fn raw_param_text(tag: &Tag) -> String {
    match &tag.types {
        Some(types) => format!("[{}] {}", types.join(", "), tag.text).trim().to_string(),
        None => tag.text.clone(),
    }
}
