//! JSON Schema tool definitions from callable signatures and doc comments.
//!
//! A [`Target`] (a [`Callable`] or a [`Class`]) describes a function's named
//! parameters and where its documentation lives. A [`Converter`] turns it into
//! a [`SchemaResult`] suitable for LLM function calling, using `@param`,
//! `@values`, `@items_type`, `@min_items` and `@max_items` tags to refine
//! types and constraints.
//!
//! # Quick Start
//!
//! ```
//! use doctool_schema::{describe, schema_of, Format};
//!
//! /// Get the current temperature at a location.
//! ///
//! /// @param location [String] The location to get the temperature for.
//! /// @param unit [String] The unit to return the temperature in.
//! /// @values unit ["Celsius", "Fahrenheit"]
//! #[describe]
//! fn get_current_temperature(location: String, unit: String) -> f64 {
//!     let _ = (location, unit);
//!     21.5
//! }
//!
//! let schema = schema_of::<GetCurrentTemperatureSchema>(Format::Structured)
//!     .unwrap()
//!     .into_schema()
//!     .unwrap();
//! let unit = &schema.function.parameters.properties["unit"];
//! assert_eq!(unit.enum_values.as_ref().unwrap().len(), 2);
//! assert_eq!(get_current_temperature("Paris".into(), "Celsius".into()), 21.5);
//! ```
//!
//! # Architecture
//!
//! - [`extract`]: signature to parameter records
//! - [`types`]: documented type names to JSON Schema types
//! - `assemble`: records plus tags to [`SchemaResult`]
//! - [`Converter`]: validation, doc lookup, single and batch conversion
//! - [`Describe`] / [`ToSchema`]: self-describing values and `#[describe]`

// Lets `#[describe]` output use `doctool_schema::` paths inside this crate.
extern crate self as doctool_schema;

mod assemble;
pub mod config;
pub mod convert;
pub mod describe;
pub mod error;
pub mod extract;
pub mod report;
pub mod schema;
pub mod signature;
pub mod types;

pub use config::{ConverterConfig, LogLevel, TagPolicy, TypePolicy, ValuesParsing};
pub use convert::{Converter, Format, Output, batch_convert, convert};
pub use describe::{Describe, DescribeType, Described, ToSchema, schema_of, to_schema};
pub use error::ConvertError;
pub use extract::{ParameterRecord, extract_parameters};
pub use report::{Report, Warning};
pub use schema::{
    FunctionSchema, ItemsSchema, ParametersSchema, PropertySchema, SchemaResult, ToolKind,
};
pub use signature::{Callable, Class, DocSource, ParamKind, ParamSpec, Signature, Target};
pub use types::{JsonType, map_type};

pub use describe_macros::describe;

// Documentation types callers need to build and inspect targets.
pub use doctool_docs::{DocComment, DocIndex, SourceLocation, TagError, TagKind};
