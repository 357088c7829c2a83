//! Code generation for `#[describe]` on structs.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Fields, ItemStruct};

use crate::common::{CapturedParam, extract_doc_comments, generate_doc_source, generate_signature};
use doctool_macro_utils::{DoctoolCrate, resolve_crate_path};

/// Captures struct fields as constructor parameters.
fn capture_fields(fields: &Fields) -> Vec<CapturedParam> {
    match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|field| {
                let ident = field.ident.as_ref()?.to_string();
                let name = ident.strip_prefix("r#").unwrap_or(&ident).to_string();
                Some(CapturedParam::named(name, &field.ty, &field.attrs))
            })
            .collect(),
        Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .iter()
            .enumerate()
            .map(|(index, field)| CapturedParam::positional(index.to_string(), &field.attrs))
            .collect(),
        Fields::Unit => Vec::new(),
    }
}

/// Generates `DescribeType` and `Describe` impls for a `#[describe]` struct.
///
/// The struct becomes a class target named after the type, whose
/// constructor takes the fields in declaration order.
pub(crate) fn generate_describe_struct(input: &ItemStruct) -> TokenStream {
    let ds = resolve_crate_path(DoctoolCrate::Schema);

    let name = &input.ident;
    let name_str = name.to_string();
    let params = capture_fields(&input.fields);
    let signature = generate_signature(&params, &ds);
    let docs = extract_doc_comments(&input.attrs);
    let doc_source = generate_doc_source(docs.as_deref(), &ds);

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        #input

        impl #impl_generics #ds::DescribeType for #name #ty_generics #where_clause {
            fn describe_type() -> #ds::Target {
                #ds::Class::new(#name_str)
                    .with_docs(#doc_source)
                    .with_constructor(#ds::Callable::new("new").with_signature(#signature))
                    .into()
            }
        }

        impl #impl_generics #ds::Describe for #name #ty_generics #where_clause {
            fn target(&self) -> #ds::Target {
                <Self as #ds::DescribeType>::describe_type()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::CapturedKind;
    use syn::parse_quote;

    #[test]
    fn named_fields_become_named_params() {
        let item: ItemStruct = parse_quote! {
            struct User {
                /// Display name.
                name: String,
                email: Option<String>,
            }
        };
        let params = capture_fields(&item.fields);
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].kind, CapturedKind::RequiredNamed);
        assert_eq!(params[0].description.as_deref(), Some("Display name."));
        assert_eq!(params[1].kind, CapturedKind::OptionalNamed);
    }

    #[test]
    fn tuple_fields_are_positional() {
        let item: ItemStruct = parse_quote! {
            struct Point(f64, f64);
        };
        let params = capture_fields(&item.fields);
        let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["0", "1"]);
        assert!(params.iter().all(|p| p.kind == CapturedKind::Positional));
    }

    #[test]
    fn generics_are_forwarded() {
        let item: ItemStruct = parse_quote! {
            struct Page<T: Clone> { items: Vec<T> }
        };
        let output = generate_describe_struct(&item).to_string();
        assert!(output.contains("for Page < T >"), "got: {output}");
    }
}
