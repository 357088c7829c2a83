//! Documentation side of doctool.
//!
//! This crate turns raw comment text into structured [`DocComment`]s, parses
//! the schema-relevant `@tag` grammars, and caches per-file documentation in
//! a shared [`DocIndex`].
//!
//! # Quick Start
//!
//! ```
//! use doctool_docs::{DocComment, ParsedTag, ValuesParsing, parse_tag};
//!
//! let doc = DocComment::parse(
//!     "Gets the current temperature.\n\
//!      @param unit [String] The unit.\n\
//!      @values unit [\"Celsius\", \"Fahrenheit\"]",
//! );
//! assert_eq!(doc.description, "Gets the current temperature.");
//!
//! let parsed = parse_tag(&doc.tags[1], ValuesParsing::Strict)
//!     .expect("values is a known tag")
//!     .expect("payload is valid");
//! assert!(matches!(parsed, ParsedTag::Values { ref name, .. } if name == "unit"));
//! ```
//!
//! # Architecture
//!
//! - [`DocComment`] / [`Tag`]: parsed comment model
//! - [`tags`]: one parsing function per tag grammar
//! - [`DocIndex`]: lazily populated, lock-guarded cache of per-file docs

pub mod comment;
pub mod error;
pub mod index;
pub mod tags;

pub use comment::{DocComment, Tag};
pub use error::{DocError, TagError};
pub use index::{DocIndex, FileDocs, SourceLocation};
pub use tags::{ParsedTag, TagKind, ValuesParsing, parse_tag};
