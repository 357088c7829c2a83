//! Code generation for `#[describe]` on free functions.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{FnArg, ItemFn, Pat, Signature};

use crate::common::{
    CapturedParam, extract_doc_comments, generate_doc_source, generate_signature, to_pascal_case,
};
use doctool_macro_utils::{DoctoolCrate, resolve_crate_path};

/// Rejects methods: a described function must not take `self`.
fn validate_free_fn(sig: &Signature) -> Option<TokenStream> {
    if let Some(FnArg::Receiver(receiver)) = sig.inputs.first() {
        return Some(
            syn::Error::new_spanned(
                receiver,
                "#[describe] functions cannot have a `self` receiver; \
                 describe the type with a `Class` instead",
            )
            .to_compile_error(),
        );
    }
    None
}

/// Captures the parameters of a free function in declaration order.
fn capture_params(sig: &Signature) -> Vec<CapturedParam> {
    sig.inputs
        .iter()
        .enumerate()
        .filter_map(|(index, arg)| match arg {
            FnArg::Typed(pat_type) => Some(match &*pat_type.pat {
                Pat::Ident(pat_ident) => {
                    let ident = pat_ident.ident.to_string();
                    let name = ident.strip_prefix("r#").unwrap_or(&ident).to_string();
                    CapturedParam::named(name, &pat_type.ty, &pat_type.attrs)
                }
                _ => CapturedParam::positional(format!("arg{index}"), &pat_type.attrs),
            }),
            FnArg::Receiver(_) => None,
        })
        .collect()
}

/// Generates a schema struct for a `#[describe]` function.
///
/// The function is re-emitted unchanged except for doc attributes on its
/// parameters, which are not valid Rust once the macro is gone. Next to it:
/// - a `<Name>Schema` unit struct
/// - `DescribeType` and `Describe` impls returning the function's `Target`
pub(crate) fn generate_describe_fn(input: &ItemFn) -> TokenStream {
    if let Some(err) = validate_free_fn(&input.sig) {
        return err;
    }

    let ds = resolve_crate_path(DoctoolCrate::Schema);

    let fn_name_str = input.sig.ident.to_string();
    let struct_name = format_ident!("{}Schema", to_pascal_case(&fn_name_str));

    let params = capture_params(&input.sig);
    let signature = generate_signature(&params, &ds);
    let fn_docs = extract_doc_comments(&input.attrs);
    let doc_source = generate_doc_source(fn_docs.as_deref(), &ds);

    let mut cleaned = input.clone();
    for arg in &mut cleaned.sig.inputs {
        if let FnArg::Typed(pat_type) = arg {
            pat_type.attrs.retain(|attr| !attr.path().is_ident("doc"));
        }
    }

    let vis = &input.vis;
    let struct_doc = format!("Schema description of [`{fn_name_str}`].");

    quote! {
        #cleaned

        #[doc = #struct_doc]
        #[derive(Debug, Clone, Copy, Default)]
        #vis struct #struct_name;

        impl #ds::DescribeType for #struct_name {
            fn describe_type() -> #ds::Target {
                #ds::Callable::new(#fn_name_str)
                    .with_signature(#signature)
                    .with_docs(#doc_source)
                    .into()
            }
        }

        impl #ds::Describe for #struct_name {
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
    fn captures_named_optional_and_positional() {
        let item: ItemFn = parse_quote! {
            fn f(a: String, b: Option<u8>, (c, d): (u8, u8), _: bool, r#type: String) {}
        };
        let params = capture_params(&item.sig);
        let summary: Vec<_> = params.iter().map(|p| (p.name.as_str(), p.kind)).collect();
        assert_eq!(
            summary,
            [
                ("a", CapturedKind::RequiredNamed),
                ("b", CapturedKind::OptionalNamed),
                ("arg2", CapturedKind::Positional),
                ("arg3", CapturedKind::Positional),
                ("type", CapturedKind::RequiredNamed),
            ]
        );
    }

    #[test]
    fn self_receiver_is_rejected() {
        let item: ItemFn = parse_quote! {
            fn method(&self, a: u8) {}
        };
        let err = validate_free_fn(&item.sig).expect("receiver must be rejected");
        assert!(err.to_string().contains("self"));
    }

    #[test]
    fn param_doc_attrs_are_stripped_from_output() {
        let item: ItemFn = parse_quote! {
            /// Echoes.
            fn echo(
                /// Text to echo.
                text: String,
            ) -> String {
                text
            }
        };
        let output = generate_describe_fn(&item).to_string();
        assert!(output.contains("EchoSchema"));
        assert!(output.contains("\"Text to echo.\""));
        let fn_part = &output[..output.find("struct EchoSchema").unwrap()];
        assert!(!fn_part.contains("Text to echo."));
    }
}
