//! Parsing of the struct and field attributes consumed by the derive.

mod input;
mod literals;
mod serde_attrs;

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Field, Ident};

pub(crate) use input::parse_input;
use literals::{lit_default, lit_str};
use serde_attrs::{SerdeFieldAttrs, serde_field_attrs};

/// Struct-level `#[config(...)]` attributes.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[config(crate = "my_alias")]`, generated code
    /// references types through `my_alias::` instead of `layered_config::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level `#[config(...)]` attributes.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    /// Raw default annotation, captured as literal text.
    pub default: Option<String>,
    /// Leave the field out of the catalog.
    pub skip: bool,
    /// Expand the nested record without adding a name segment.
    pub flatten: bool,
    /// Replacement for the field's name segment.
    pub rename: Option<String>,
}

/// A parsed record ready for code generation.
pub(crate) struct Record {
    pub ident: Ident,
    pub generics: syn::Generics,
    pub attrs: StructAttrs,
    pub fields: Vec<RecordField>,
    /// Fields left out of the catalog, in declaration order.
    pub skipped: Vec<Ident>,
}

/// What the derive does with one struct field.
pub(crate) enum ParsedField {
    /// The field enters the catalog.
    Catalog(Box<RecordField>),
    /// The field is non-writable and keeps its value across every stage.
    Skipped(Ident),
}

/// A field that enters the catalog.
pub(crate) struct RecordField {
    pub ident: Ident,
    pub ty: syn::Type,
    /// Name segment used for environment and flag lookups.
    pub name: String,
    pub default: Option<String>,
    pub flatten: bool,
}

/// Iterate all `#[config(...)]` attributes once and apply a callback.
fn parse_config<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("config")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn unknown_key(meta: &ParseNestedMeta, allowed: &str) -> syn::Error {
    let key = meta
        .path
        .get_ident()
        .map_or_else(|| String::from("path"), ToString::to_string);
    meta.error(format!(
        "unknown config attribute `{key}`; expected one of {allowed}"
    ))
}

/// Extracts `#[config(...)]` metadata applied to a struct.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_config(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let s = lit_str(meta, "crate")?;
            let path: syn::Path =
                syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
            out.crate_path = Some(path);
            return Ok(());
        }
        Err(unknown_key(meta, "`crate`"))
    })?;
    Ok(out)
}

/// Parses field-level `#[config(...)]` attributes.
///
/// Unknown keys are rejected so misspelt attributes fail to compile.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_config(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("default") => out.default = Some(lit_default(meta)?),
            Some("skip") => out.skip = true,
            Some("flatten") => out.flatten = true,
            Some("rename") => out.rename = Some(lit_str(meta, "rename")?.value()),
            _ => {
                return Err(unknown_key(
                    meta,
                    "`default`, `skip`, `flatten` or `rename`",
                ));
            }
        }
        Ok(())
    })?;
    Ok(out)
}

/// Combine `#[config]` and `#[serde]` attributes for one field.
fn record_field(field: &Field) -> syn::Result<ParsedField> {
    let attrs = parse_field_attrs(&field.attrs)?;
    let SerdeFieldAttrs {
        skip_deserializing,
        skip_serializing,
        flatten: serde_flatten,
    } = serde_field_attrs(&field.attrs)?;
    let Some(ident) = field.ident.clone() else {
        return Err(syn::Error::new_spanned(field, "Configurable requires named fields"));
    };
    if skip_serializing {
        return Err(syn::Error::new_spanned(
            &ident,
            "`serde(skip_serializing)` drops the field before file values are merged; use `serde(skip)` or serialize it",
        ));
    }
    if attrs.skip || skip_deserializing {
        return Ok(ParsedField::Skipped(ident));
    }
    let flatten = attrs.flatten || serde_flatten;
    if flatten && (attrs.rename.is_some() || attrs.default.is_some()) {
        return Err(syn::Error::new_spanned(
            &ident,
            "a flattened field has no name or value of its own; `rename` and `default` are not allowed",
        ));
    }
    let name = attrs
        .rename
        .unwrap_or_else(|| syn::ext::IdentExt::unraw(&ident).to_string());
    Ok(ParsedField::Catalog(Box::new(RecordField {
        ident,
        ty: field.ty.clone(),
        name,
        default: attrs.default,
        flatten,
    })))
}
