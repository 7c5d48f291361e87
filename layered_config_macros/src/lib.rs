//! Procedural macros for `layered_config`.
//!
//! `#[derive(Configurable)]` emits the descriptor table the loader walks to
//! find every settable field of a record. Each field becomes either a leaf
//! with a writable location or a nested group expanded in place.
//!
//! Field attributes are written under `#[config(...)]`:
//!
//! - `default = "..."` records a raw default applied by the defaults stage.
//! - `skip` leaves the field out of the catalog.
//! - `flatten` merges a nested record into the enclosing scope.
//! - `rename = "..."` overrides the field's name segment.
//!
//! `#[serde(skip)]`, `#[serde(skip_deserializing)]` and `#[serde(flatten)]`
//! are honoured as well, so files and the catalog see the same structure.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `layered_config::Configurable`.
#[proc_macro_derive(Configurable, attributes(config))]
pub fn derive_configurable(input_tokens: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input_tokens as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
