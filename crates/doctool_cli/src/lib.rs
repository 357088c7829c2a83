//! Library side of the `doctool` binary.
//!
//! A manifest is a JSON file listing conversion targets:
//!
//! ```json
//! {
//!   "targets": [
//!     {
//!       "kind": "function",
//!       "name": "get_current_temperature",
//!       "params": [
//!         { "name": "location", "kind": "required_named" },
//!         { "name": "unit", "kind": "required_named" }
//!       ],
//!       "docs": { "location": { "file": "src/weather.rs", "line": 9 } }
//!     }
//!   ]
//! }
//! ```
//!
//! Relative source paths are resolved against the manifest's directory.

use anyhow::{Context, Result};
use doctool_schema::{Converter, ConverterConfig, DocSource, Format, Output, SchemaResult, Target};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Targets to convert, in output order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Conversion targets.
    pub targets: Vec<Target>,
}

impl Manifest {
    /// Reads a manifest and resolves its source paths against the file's
    /// directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        let mut manifest: Self = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse manifest {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        manifest.resolve_paths(base);
        Ok(manifest)
    }

    /// Makes every relative doc location relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for target in &mut self.targets {
            match target {
                Target::Function(callable) => resolve_doc_source(&mut callable.docs, base),
                Target::Class(class) => {
                    resolve_doc_source(&mut class.docs, base);
                    if let Some(constructor) = &mut class.constructor {
                        resolve_doc_source(&mut constructor.docs, base);
                    }
                }
            }
        }
    }
}

fn resolve_doc_source(docs: &mut DocSource, base: &Path) {
    if let DocSource::Location(location) = docs {
        *location = location.clone().resolved_against(base);
    }
}

/// Reads a converter configuration file.
pub fn load_config(path: &Path) -> Result<ConverterConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

/// Converts every manifest target.
///
/// Without `keep_going` the first failure is returned. With it, each failure
/// is written to `errors` and the target is skipped.
pub fn run(
    manifest: &Manifest,
    converter: &Converter,
    keep_going: bool,
    mut errors: impl Write,
) -> Result<Vec<SchemaResult>> {
    if !keep_going {
        let outputs = converter.batch_convert(&manifest.targets, Format::Structured)?;
        return Ok(outputs.into_iter().filter_map(Output::into_schema).collect());
    }

    let results = converter.batch_convert_each(&manifest.targets, Format::Structured);
    let mut schemas = Vec::with_capacity(results.len());
    for (index, (target, result)) in manifest.targets.iter().zip(results).enumerate() {
        match result {
            Ok(output) => schemas.extend(output.into_schema()),
            Err(err) => {
                tracing::debug!(index, target = target.name(), "Skipping failed target");
                writeln!(errors, "error: target {index} (`{}`): {err}", target.name())
                    .context("failed to report conversion error")?;
            }
        }
    }
    Ok(schemas)
}

/// Serializes schemas as a JSON array.
pub fn render(schemas: &[SchemaResult], pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(schemas)?
    } else {
        serde_json::to_string(schemas)?
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctool_schema::{Callable, Class, SourceLocation};
    use std::path::PathBuf;

    #[test]
    fn resolves_relative_locations_only() {
        let mut manifest = Manifest {
            targets: vec![
                Callable::new("a")
                    .with_docs(DocSource::location("src/a.rs", 1))
                    .into(),
                Callable::new("b")
                    .with_docs(DocSource::location("/abs/b.rs", 2))
                    .into(),
                Class::new("C")
                    .with_docs(DocSource::location("c.rb", 3))
                    .with_constructor(
                        Callable::new("new").with_docs(DocSource::location("c.rb", 5)),
                    )
                    .into(),
            ],
        };
        manifest.resolve_paths(Path::new("/project"));

        let location = |target: &Target| match target {
            Target::Function(callable) => callable.docs.clone(),
            Target::Class(class) => class.docs.clone(),
        };
        assert_eq!(
            location(&manifest.targets[0]),
            DocSource::Location(SourceLocation::new("/project/src/a.rs", 1))
        );
        assert_eq!(
            location(&manifest.targets[1]),
            DocSource::Location(SourceLocation::new("/abs/b.rs", 2))
        );
        let Target::Class(class) = &manifest.targets[2] else {
            panic!("expected a class target");
        };
        assert_eq!(
            class.constructor.as_ref().unwrap().docs,
            DocSource::Location(SourceLocation::new(PathBuf::from("/project/c.rb"), 5))
        );
    }

    #[test]
    fn render_is_a_json_array() {
        assert_eq!(render(&[], false).unwrap(), "[]");
    }
}
