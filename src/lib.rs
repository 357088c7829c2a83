//! Turns documented callables into JSON Schema tool definitions for LLM
//! function calling.
//!

pub use doctool_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use doctool_internal::prelude::*;
}
