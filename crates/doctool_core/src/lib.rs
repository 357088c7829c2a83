//! Shared runtime setup for doctool binaries.
//!
//! Currently this is the tracing subscriber configuration used by the CLI.

pub mod tracing_setup;

pub use tracing_setup::{TracingFormat, TracingSetup};
