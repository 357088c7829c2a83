//! Parsed doc comment model.
//!
//! Comment text follows the YARD layout: free text first, then `@tag` lines.
//! A tag's text continues on following lines until a blank line or the next
//! tag.
//!
//! ```text
//! Gets the current temperature for a location.
//!
//! @param location [String] The city and state, e.g. San Francisco, CA.
//! @param unit [String] The unit of temperature.
//! @values unit ["Celsius", "Fahrenheit"]
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Tags whose text may start with a `[Types]` list.
const TYPED_TAGS: &[&str] = &["param", "return", "raise", "yieldparam", "yieldreturn"];

/// Tags whose text carries a parameter name.
const NAMED_TAGS: &[&str] = &["param", "yieldparam"];

static TAG_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@([A-Za-z_][A-Za-z0-9_]*)(?:\s+(.*))?$").expect("tag head pattern is valid")
});

static IDENT_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)(?:\s+|$)").expect("identifier pattern is valid")
});

/// A parsed documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocComment {
    /// Free text preceding the first tag.
    pub description: String,
    /// Tags in the order they were written.
    pub tags: Vec<Tag>,
}

/// A single `@tag` entry of a doc comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name without the leading `@` (e.g. `param`, `values`).
    pub tag_name: String,
    /// Parameter name, for tags that carry one (`@param`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Declared types from a `[Type, ...]` list, for typed tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    /// Remaining free text of the tag.
    pub text: String,
}

impl Tag {
    /// Creates a tag with only raw text.
    pub fn new(tag_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            name: None,
            types: None,
            text: text.into(),
        }
    }

    /// Builds a tag from its name and raw body, splitting out the parameter
    /// name and type list where the tag kind carries them.
    fn from_raw(tag_name: String, body: &str) -> Self {
        let body = body.trim();
        if !TYPED_TAGS.contains(&tag_name.as_str()) {
            return Self::new(tag_name, body);
        }

        let named = NAMED_TAGS.contains(&tag_name.as_str());
        let mut rest = body;
        let mut name = None;
        let mut types = None;

        // `@param name [Types] text` and `@param [Types] name text` are both valid.
        if let Some((parsed, after)) = split_types(rest) {
            types = Some(parsed);
            rest = after;
            if named && let Some((ident, after)) = split_ident(rest) {
                name = Some(ident.to_string());
                rest = after;
            }
        } else if named && let Some((ident, after)) = split_ident(rest) {
            name = Some(ident.to_string());
            rest = after;
            if let Some((parsed, after)) = split_types(rest) {
                types = Some(parsed);
                rest = after;
            }
        }

        Self {
            tag_name,
            name,
            types,
            text: rest.trim().to_string(),
        }
    }
}

impl DocComment {
    /// Creates a doc comment with the given description and no tags.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            tags: Vec::new(),
        }
    }

    /// Parses comment text whose comment markers have already been stripped.
    pub fn parse(text: &str) -> Self {
        let mut description: Vec<&str> = Vec::new();
        let mut raw_tags: Vec<(String, String)> = Vec::new();
        let mut tag_open = false;

        for line in text.lines() {
            let trimmed = line.trim();

            if let Some(caps) = TAG_HEAD.captures(trimmed) {
                let tag_name = caps[1].to_string();
                let body = caps.get(2).map_or("", |m| m.as_str());
                raw_tags.push((tag_name, body.to_string()));
                tag_open = true;
                continue;
            }

            if trimmed.is_empty() {
                tag_open = false;
                description.push("");
                continue;
            }

            match raw_tags.last_mut() {
                Some((_, body)) if tag_open => {
                    if !body.is_empty() {
                        body.push(' ');
                    }
                    body.push_str(trimmed);
                }
                _ => description.push(trimmed),
            }
        }

        Self {
            description: join_paragraphs(&description),
            tags: raw_tags
                .into_iter()
                .map(|(tag_name, body)| Tag::from_raw(tag_name, &body))
                .collect(),
        }
    }

    /// Returns `true` when there is neither description nor any tag.
    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.tags.is_empty()
    }

    /// Iterates over the tags with the given name.
    pub fn tags_named<'a>(&'a self, tag_name: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
        self.tags.iter().filter(move |tag| tag.tag_name == tag_name)
    }

    /// Appends the tags of `other` after this comment's tags.
    pub fn extend_tags(&mut self, other: DocComment) {
        self.tags.extend(other.tags);
    }
}

/// Joins description lines, collapsing runs of blank lines into one and
/// dropping leading and trailing blanks.
fn join_paragraphs(lines: &[&str]) -> String {
    let mut out: Vec<&str> = Vec::new();
    for line in lines {
        if line.is_empty() && out.last().is_none_or(|last| last.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|last| last.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

/// Splits a leading parameter identifier off `text`.
fn split_ident(text: &str) -> Option<(&str, &str)> {
    let caps = IDENT_HEAD.captures(text)?;
    let ident = caps.get(1)?;
    let whole = caps.get(0)?;
    Some((ident.as_str(), &text[whole.end()..]))
}

/// Splits a leading `[Type, ...]` list off `text`.
///
/// Brackets nest, so `[Array<String>, Hash{Symbol => Integer}]` yields two
/// types. Returns `None` when `text` does not start with a balanced list.
fn split_types(text: &str) -> Option<(Vec<String>, &str)> {
    let inner_start = text.strip_prefix('[')?;
    let mut depth = 0usize;
    let mut close = None;
    for (idx, ch) in inner_start.char_indices() {
        match ch {
            '[' | '<' | '{' | '(' => depth += 1,
            ']' if depth == 0 => {
                close = Some(idx);
                break;
            }
            ']' | '>' | '}' | ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    let close = close?;
    let types = split_top_level(&inner_start[..close]);
    Some((types, inner_start[close + 1..].trim_start()))
}

/// Splits a type list on commas that are not nested inside brackets.
fn split_top_level(list: &str) -> Vec<String> {
    let mut types = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for ch in list.chars() {
        match ch {
            '[' | '<' | '{' | '(' => depth += 1,
            ']' | '>' | '}' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                let ty = current.trim();
                if !ty.is_empty() {
                    types.push(ty.to_string());
                }
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    let ty = current.trim();
    if !ty.is_empty() {
        types.push(ty.to_string());
    }
    types
}
