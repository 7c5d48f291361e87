//! Input parsing for the `Configurable` derive macro.
//!
//! Gathers the struct identifier, generics, struct attributes and the fields
//! that enter the catalog in one pass so expansion can fail fast.

use syn::{Data, DeriveInput, Fields};

use super::{ParsedField, Record, parse_struct_attrs, record_field};

/// Gathers information from the user-provided struct.
///
/// Enums, unions, tuple structs and unit structs are rejected. Skipped
/// fields are set aside by identifier only.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<Record> {
    let attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Configurable requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Configurable can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    let mut skipped = Vec::new();
    for field in named {
        match record_field(field)? {
            ParsedField::Catalog(parsed) => fields.push(*parsed),
            ParsedField::Skipped(ident) => skipped.push(ident),
        }
    }
    Ok(Record {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        attrs,
        fields,
        skipped,
    })
}
