//! Procedural macros for doctool schema generation.
//!
//! Provides `#[describe]` for free functions and structs.

mod common;
mod describe_fn;
mod describe_struct;

use proc_macro::TokenStream;
use syn::Item;

/// Captures a function's or struct's signature and doc comments.
///
/// On a function, the function is kept as written and a `<Name>Schema` unit
/// struct implementing `Describe` and `DescribeType` is emitted next to it.
/// On a struct, `Describe` and `DescribeType` are implemented for the struct
/// itself, with its fields as constructor parameters.
///
/// # Parameters
///
/// - identifier parameters and named fields are passed by name, optional
///   when their type is `Option<T>`
/// - wildcard or destructuring parameters and tuple fields are positional
///   (conversion then fails, since only named parameters are supported)
/// - `/// doc comment` on a parameter or field becomes its inline
///   description
///
/// # Example
///
/// ```
/// use doctool_schema::{describe, schema_of, Format};
///
/// /// Search for documents.
/// /// @param limit [Integer] Max results.
/// #[describe]
/// fn search(
///     /// The search query.
///     query: String,
///     limit: Option<u32>,
/// ) -> Vec<String> {
///     let _ = (query, limit);
///     Vec::new()
/// }
///
/// let schema = schema_of::<SearchSchema>(Format::Structured).unwrap();
/// let schema = schema.into_schema().unwrap();
/// assert_eq!(schema.function.parameters.required, ["query"]);
/// ```
#[proc_macro_attribute]
pub fn describe(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as Item);
    match input {
        Item::Fn(item_fn) => describe_fn::generate_describe_fn(&item_fn).into(),
        Item::Struct(item_struct) => describe_struct::generate_describe_struct(&item_struct).into(),
        other => syn::Error::new_spanned(
            other,
            "#[describe] can only be applied to free functions and structs",
        )
        .to_compile_error()
        .into(),
    }
}
