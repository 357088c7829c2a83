//! # doctool Internal Library
//!
//! Re-exports the core doctool crates for convenience.

/// Doc comment parsing, tag grammars and the documentation index.
pub use doctool_docs;

/// Signatures, conversion and schema output.
pub use doctool_schema;

/// Runtime setup shared by binaries.
pub use doctool_core;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use doctool_core::{TracingFormat, TracingSetup};
    pub use doctool_schema::{
        Callable, Class, ConvertError, Converter, ConverterConfig, Describe, DescribeType,
        Described, DocSource, Format, LogLevel, Output, ParamKind, ParamSpec, Report,
        SchemaResult, Signature, TagPolicy, Target, ToSchema, TypePolicy, ValuesParsing,
        Warning, batch_convert, convert, describe, schema_of, to_schema,
    };
}
