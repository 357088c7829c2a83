//! Shared utilities for `#[describe]` code generation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Expr, ExprLit, GenericArgument, Lit, Meta, PathArguments, Type};

/// How a captured parameter is passed; mirrors `ParamKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CapturedKind {
    RequiredNamed,
    OptionalNamed,
    Positional,
}

/// A parameter or field captured from the annotated item.
#[derive(Debug, Clone)]
pub(crate) struct CapturedParam {
    /// Parameter name.
    pub name: String,
    /// How the parameter is passed.
    pub kind: CapturedKind,
    /// Description from doc comments.
    pub description: Option<String>,
}

impl CapturedParam {
    /// Captures a named parameter or field, optional when its type is
    /// `Option<T>`.
    pub fn named(name: String, ty: &Type, attrs: &[Attribute]) -> Self {
        let kind = if is_option(ty) {
            CapturedKind::OptionalNamed
        } else {
            CapturedKind::RequiredNamed
        };
        Self {
            name,
            kind,
            description: extract_doc_comments(attrs),
        }
    }

    /// Captures a positional parameter or tuple field.
    pub fn positional(name: String, attrs: &[Attribute]) -> Self {
        Self {
            name,
            kind: CapturedKind::Positional,
            description: extract_doc_comments(attrs),
        }
    }
}

/// Extracts doc comment text from attributes, one line per attribute.
///
/// Blank doc lines are kept so the comment parser can see paragraph breaks.
pub(crate) fn extract_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let mut docs = Vec::new();

    for attr in attrs {
        if attr.path().is_ident("doc")
            && let Meta::NameValue(meta) = &attr.meta
            && let Expr::Lit(ExprLit {
                lit: Lit::Str(lit_str),
                ..
            }) = &meta.value
        {
            docs.push(lit_str.value().trim().to_string());
        }
    }

    if docs.is_empty() {
        None
    } else {
        Some(docs.join("\n"))
    }
}

/// Returns `true` if the type's last path segment is `Option<T>`.
fn is_option(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == "Option"
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && args.args.len() == 1
        && let Some(GenericArgument::Type(_)) = args.args.first()
    {
        true
    } else {
        false
    }
}

/// Converts a `snake_case` string to `PascalCase`.
pub(crate) fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().to_string() + &chars.as_str().to_lowercase(),
            }
        })
        .collect()
}

/// Generates a `Signature` expression from captured parameters.
pub(crate) fn generate_signature(params: &[CapturedParam], ds: &TokenStream) -> TokenStream {
    let param_additions = params.iter().map(|param| {
        let name = &param.name;
        let kind = match param.kind {
            CapturedKind::RequiredNamed => quote! { #ds::ParamKind::RequiredNamed },
            CapturedKind::OptionalNamed => quote! { #ds::ParamKind::OptionalNamed },
            CapturedKind::Positional => quote! { #ds::ParamKind::Positional },
        };
        let doc = param
            .description
            .as_ref()
            .map(|d| quote! { .with_doc(#d) })
            .unwrap_or_default();
        quote! {
            .param(#ds::ParamSpec::new(#name, #kind) #doc)
        }
    });

    quote! {
        #ds::Signature::new() #(#param_additions)*
    }
}

/// Generates a `DocSource` expression from optional doc text.
pub(crate) fn generate_doc_source(docs: Option<&str>, ds: &TokenStream) -> TokenStream {
    match docs {
        Some(text) => quote! { #ds::DocSource::inline(#text) },
        None => quote! { #ds::DocSource::None },
    }
}
