//! Process-wide documentation index.
//!
//! The [`DocIndex`] maps a source file to the doc comments found in it, keyed
//! by the line of the declaration each comment documents. Files are parsed
//! lazily on first lookup and cached; the cache is shared behind a
//! [`RwLock`], and a file parsed twice by racing threads is inserted only
//! once.
//!
//! # Comment layout
//!
//! A doc block is a run of consecutive `///` or `#` lines. It attaches to the
//! first following line that is not blank, not a comment and not an attribute
//! (`#[...]`). A blank line between the block and the declaration discards
//! the block.
//!
//! ```text
//! 10 | /// Gets the current temperature.
//! 11 | /// @param location [String] The city.
//! 12 | #[describe]
//! 13 | fn get_current_temperature(location: String) {}
//! ```
//!
//! Here the block is stored under line 13.

use crate::comment::DocComment;
use crate::error::DocError;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

static GLOBAL: LazyLock<Arc<DocIndex>> = LazyLock::new(|| Arc::new(DocIndex::new()));

/// Position of a declaration in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Source file path.
    pub file: PathBuf,
    /// 1-based line of the declaration.
    pub line: u32,
}

impl SourceLocation {
    /// Creates a new source location.
    pub fn new(file: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Resolves a relative `file` against `base`, leaving absolute paths as is.
    #[must_use]
    pub fn resolved_against(mut self, base: &Path) -> Self {
        if self.file.is_relative() {
            self.file = base.join(&self.file);
        }
        self
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// Doc comments of one source file, keyed by declaration line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDocs {
    blocks: BTreeMap<u32, DocComment>,
}

impl FileDocs {
    /// Extracts every doc block of `source`.
    pub fn parse(source: &str) -> Self {
        let mut blocks = BTreeMap::new();
        let mut pending: Vec<&str> = Vec::new();
        // Open brackets of a multi-line attribute.
        let mut attr_depth = 0usize;

        for (idx, line) in source.lines().enumerate() {
            let trimmed = line.trim_start();

            if attr_depth > 0 {
                attr_depth = bracket_depth(attr_depth, trimmed);
                continue;
            }
            if let Some(text) = doc_line(trimmed) {
                pending.push(text);
                continue;
            }
            if trimmed.is_empty() {
                pending.clear();
                continue;
            }
            if trimmed.starts_with("#[") {
                attr_depth = bracket_depth(0, trimmed);
                continue;
            }
            if trimmed.starts_with("//") {
                continue;
            }
            if !pending.is_empty() {
                let line_no = u32::try_from(idx + 1).unwrap_or(u32::MAX);
                blocks.insert(line_no, DocComment::parse(&pending.join("\n")));
                pending.clear();
            }
        }

        Self { blocks }
    }

    /// Returns the doc comment attached to the declaration on `line`.
    pub fn get(&self, line: u32) -> Option<&DocComment> {
        self.blocks.get(&line)
    }

    /// Declaration lines that carry documentation, ascending.
    pub fn lines(&self) -> impl Iterator<Item = u32> + '_ {
        self.blocks.keys().copied()
    }

    /// Number of documented declarations.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` when the file has no doc blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Strips the doc comment marker from a line, or returns `None` if the line
/// is not a doc comment line.
fn doc_line(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix("///") {
        if rest.starts_with('/') {
            return None;
        }
        return Some(rest.strip_prefix(' ').unwrap_or(rest));
    }
    if line.starts_with("#[") || line.starts_with("#!") {
        return None;
    }
    line.strip_prefix('#')
        .map(|rest| rest.strip_prefix(' ').unwrap_or(rest))
}

/// Bracket nesting after `line`, starting from `depth`.
fn bracket_depth(depth: usize, line: &str) -> usize {
    line.chars().fold(depth, |depth, ch| match ch {
        '[' => depth + 1,
        ']' => depth.saturating_sub(1),
        _ => depth,
    })
}

/// Lazily populated cache of per-file documentation.
///
/// Use [`DocIndex::global`] for the process-wide instance or
/// [`DocIndex::new`] for an isolated one (e.g. in tests).
#[derive(Default)]
pub struct DocIndex {
    files: RwLock<HashMap<PathBuf, Arc<FileDocs>>>,
}

impl fmt::Debug for DocIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let files = self.files.read();
        let mut paths: Vec<_> = files.keys().collect();
        paths.sort();
        f.debug_struct("DocIndex").field("files", &paths).finish()
    }
}

impl DocIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide index.
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Returns the parsed docs of `path`, reading and parsing the file on
    /// first access.
    pub fn file(&self, path: &Path) -> Result<Arc<FileDocs>, DocError> {
        if let Some(docs) = self.files.read().get(path) {
            return Ok(Arc::clone(docs));
        }

        // Parse outside the lock; if another thread won the race its entry is kept.
        let source = std::fs::read_to_string(path).map_err(|err| DocError::io(path, err))?;
        let parsed = Arc::new(FileDocs::parse(&source));

        let mut files = self.files.write();
        Ok(Arc::clone(
            files.entry(path.to_path_buf()).or_insert(parsed),
        ))
    }

    /// Returns the doc comment of the declaration at `location`.
    ///
    /// `Ok(None)` means the file was read but nothing is documented on that
    /// line.
    pub fn lookup(&self, location: &SourceLocation) -> Result<Option<DocComment>, DocError> {
        let docs = self.file(&location.file)?;
        Ok(docs.get(location.line).cloned())
    }

    /// Indexes in-memory source text under `path`, replacing any cached
    /// entry.
    pub fn insert_source(&self, path: impl Into<PathBuf>, source: &str) -> Arc<FileDocs> {
        let parsed = Arc::new(FileDocs::parse(source));
        self.files.write().insert(path.into(), Arc::clone(&parsed));
        parsed
    }

    /// Drops the cached entry of `path`. Returns whether one existed.
    pub fn invalidate(&self, path: &Path) -> bool {
        self.files.write().remove(path).is_some()
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.files.write().clear();
    }

    /// Returns `true` if `path` is cached.
    pub fn contains(&self, path: &Path) -> bool {
        self.files.read().contains_key(path)
    }

    /// Number of cached files.
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    /// Returns `true` when no file is cached.
    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUST_SOURCE: &str = "\
//! Module docs are not attached.

/// Gets the current temperature.
///
/// @param location [String] The city.
#[describe]
fn get_current_temperature(location: String) {}

/// Detached by a blank line.

fn undocumented() {}
//// Not a doc comment.
fn also_undocumented() {}
";

    const HASH_SOURCE: &str = "\
#!/usr/bin/env ruby
# frozen_string_literal: true

class Weather
  # Gets the current temperature.
  # @param unit [String] The unit.
  # @values unit [\"Celsius\", \"Fahrenheit\"]
  def get_current_temperature(unit:)
  end
end
";

    #[test]
    fn rust_doc_block_attaches_past_attributes() {
        let docs = FileDocs::parse(RUST_SOURCE);
        assert_eq!(docs.lines().collect::<Vec<_>>(), vec![7]);

        let doc = docs.get(7).unwrap();
        assert_eq!(doc.description, "Gets the current temperature.");
        assert_eq!(doc.tags.len(), 1);
        assert_eq!(doc.tags[0].name.as_deref(), Some("location"));
    }

    #[test]
    fn plain_comment_between_block_and_declaration_is_skipped() {
        let docs = FileDocs::parse("/// Documented.\n// note\nfn f() {}\n");
        assert_eq!(docs.lines().collect::<Vec<_>>(), vec![3]);
        assert_eq!(docs.get(3).unwrap().description, "Documented.");
    }

    #[test]
    fn multi_line_attribute_is_skipped_whole() {
        let source = "\
/// Documented.
#[cfg_attr(
    test,
    derive(Debug)
)]
fn f() {}
";
        let docs = FileDocs::parse(source);
        assert_eq!(docs.lines().collect::<Vec<_>>(), vec![6]);
        assert_eq!(docs.get(6).unwrap().description, "Documented.");
    }

    #[test]
    fn bracket_depth_tracks_nesting() {
        assert_eq!(bracket_depth(0, "#[cfg_attr("), 1);
        assert_eq!(bracket_depth(0, "#[doc = \"x\"]"), 0);
        assert_eq!(bracket_depth(1, "    a = [1, 2],"), 1);
        assert_eq!(bracket_depth(1, ")]"), 0);
    }

    #[test]
    fn blank_line_detaches_block() {
        let docs = FileDocs::parse(RUST_SOURCE);
        assert!(docs.get(11).is_none());
        assert!(docs.get(13).is_none());
    }

    #[test]
    fn hash_comments_are_doc_blocks() {
        let docs = FileDocs::parse(HASH_SOURCE);
        assert_eq!(docs.lines().collect::<Vec<_>>(), vec![8]);
        let doc = docs.get(8).unwrap();
        assert_eq!(doc.description, "Gets the current temperature.");
        assert_eq!(doc.tags[1].tag_name, "values");
    }

    #[test]
    fn insert_source_replaces_entry() {
        let index = DocIndex::new();
        let path = PathBuf::from("memory.rs");
        index.insert_source(&path, "/// First.\nfn a() {}\n");
        index.insert_source(&path, "/// Second.\nfn a() {}\n");

        let doc = index
            .lookup(&SourceLocation::new("memory.rs", 2))
            .unwrap()
            .unwrap();
        assert_eq!(doc.description, "Second.");
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let index = DocIndex::new();
        let location = SourceLocation::new("/definitely/not/here.rs", 1);
        let err = index.lookup(&location).unwrap_err();
        assert!(matches!(err, DocError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.rs"));
        assert!(index.is_empty());
    }

    #[test]
    fn invalidate_and_clear() {
        let index = DocIndex::new();
        index.insert_source("a.rs", "");
        index.insert_source("b.rs", "");
        assert!(index.invalidate(Path::new("a.rs")));
        assert!(!index.invalidate(Path::new("a.rs")));
        assert!(index.contains(Path::new("b.rs")));
        index.clear();
        assert!(index.is_empty());
    }

    #[test]
    fn location_resolves_relative_paths() {
        let base = Path::new("/work");
        let relative = SourceLocation::new("src/lib.rs", 3).resolved_against(base);
        assert_eq!(relative.file, PathBuf::from("/work/src/lib.rs"));

        let absolute = SourceLocation::new("/abs/lib.rs", 3).resolved_against(base);
        assert_eq!(absolute.file, PathBuf::from("/abs/lib.rs"));
        assert_eq!(absolute.to_string(), "/abs/lib.rs:3");
    }

    #[test]
    fn global_index_is_shared() {
        assert!(Arc::ptr_eq(&DocIndex::global(), &DocIndex::global()));
    }
}
