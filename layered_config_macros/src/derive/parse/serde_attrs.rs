//! Serde attribute parsing helpers.
//!
//! The file stage decodes through serde, so fields serde never deserializes
//! must stay out of the catalog, and fields serde flattens must be embedded.
//! File values are merged over the serialized record, so a field serde does
//! not serialize would vanish before the merge. `skip_serializing` is
//! rejected for that reason; a field using `skip_serializing_if` needs
//! `#[serde(default)]` to survive the merge when the condition holds.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Token, parenthesized};

/// The serde field attributes that affect catalog structure.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SerdeFieldAttrs {
    /// `skip` or `skip_deserializing`.
    pub skip_deserializing: bool,
    /// `skip_serializing` without `skip_deserializing`.
    pub skip_serializing: bool,
    /// `flatten`.
    pub flatten: bool,
}

/// Parse `#[serde(...)]` on a field, ignoring keys that do not affect
/// structure.
pub(crate) fn serde_field_attrs(attrs: &[Attribute]) -> syn::Result<SerdeFieldAttrs> {
    let mut out = SerdeFieldAttrs::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") || meta.path.is_ident("skip_deserializing") {
                out.skip_deserializing = true;
            } else if meta.path.is_ident("skip_serializing") {
                out.skip_serializing = true;
            } else if meta.path.is_ident("flatten") {
                out.flatten = true;
            } else {
                discard_unknown(&meta)?;
            }
            Ok(())
        })?;
    }
    out.skip_serializing &= !out.skip_deserializing;
    Ok(out)
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}
