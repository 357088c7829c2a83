//! Shared utilities for doctool procedural macro crates.
//!
//! Provides crate-path resolution so that generated code emits correct
//! fully-qualified paths regardless of whether the consumer depends on
//! an individual doctool crate or the `doctool` umbrella re-export.

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// A doctool crate that macro-generated code may reference.
pub enum DoctoolCrate {
    /// `doctool_schema`
    Schema,
}

impl DoctoolCrate {
    /// Returns the `Cargo.toml` package name for this crate.
    fn as_str(&self) -> &'static str {
        match self {
            Self::Schema => "doctool_schema",
        }
    }
}

/// Returns a [`TokenStream`] path for the given doctool crate.
///
/// Resolution order:
/// 1. Direct dependency (possibly renamed in `Cargo.toml`).
/// 2. Indirect access via the `doctool` umbrella crate (`doctool::<name>`).
/// 3. Fallback to the literal crate name (compile error will point the user
///    to the missing dependency).
pub fn resolve_crate_path(krate: DoctoolCrate) -> TokenStream {
    let name = krate.as_str();

    match crate_name(name) {
        Ok(FoundCrate::Itself) => {
            let ident = format_ident!("{}", name);
            quote!(#ident)
        }
        Ok(FoundCrate::Name(found)) => {
            let ident = format_ident!("{}", found);
            quote!(#ident)
        }
        Err(_) => match crate_name("doctool") {
            Ok(FoundCrate::Name(found)) => {
                let doctool = format_ident!("{}", found);
                let ident = format_ident!("{}", name);
                quote!(#doctool::#ident)
            }
            _ => {
                let ident = format_ident!("{}", name);
                quote!(#ident)
            }
        },
    }
}
