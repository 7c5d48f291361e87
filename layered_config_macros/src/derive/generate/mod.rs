//! Code generation for the `Configurable` implementation.
//!
//! The generated `describe_fields` registers each field in declaration order.
//! Every field receives a projection built by composing the record's own
//! projection with a field accessor, so nested leaves resolve to a slot in
//! the root record on every use. The generated `restore_skipped` swaps the
//! fields left out of the catalog back in after the file stage.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{GenericParam, parse_quote};

use super::parse::{Record, RecordField};

/// Generate `impl Configurable for <record>`.
pub(crate) fn configurable_impl(record: &Record, krate: &TokenStream) -> TokenStream {
    let ident = &record.ident;
    let generics = with_bounds(record, krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let (builder, parent, project) = if record.fields.is_empty() {
        (
            format_ident!("_builder"),
            format_ident!("_parent"),
            format_ident!("_project"),
        )
    } else {
        (
            format_ident!("builder"),
            format_ident!("parent"),
            format_ident!("project"),
        )
    };
    let registrations = record
        .fields
        .iter()
        .map(|field| register_field(field, krate, &builder, &parent, &project));
    let restore = restore_skipped(record, krate);

    quote! {
        impl #impl_generics #krate::Configurable for #ident #ty_generics #where_clause {
            const SHAPE: #krate::Shape = #krate::Shape::Group;

            fn describe<__R: 'static>(
                builder: &mut #krate::CatalogBuilder<__R>,
                decl: #krate::FieldDecl,
                parent: ::core::option::Option<&::std::rc::Rc<#krate::GroupDescriptor>>,
                project: &#krate::Projection<__R, Self>,
            ) {
                builder.group::<Self>(decl, parent, project);
            }

            fn describe_fields<__R: 'static>(
                #builder: &mut #krate::CatalogBuilder<__R>,
                #parent: ::core::option::Option<&::std::rc::Rc<#krate::GroupDescriptor>>,
                #project: &#krate::Projection<__R, Self>,
            ) {
                #( #registrations )*
            }

            #restore
        }
    }
}

/// Emit `restore_skipped` for a record with fields, or nothing.
fn restore_skipped(record: &Record, krate: &TokenStream) -> Option<TokenStream> {
    if record.fields.is_empty() && record.skipped.is_empty() {
        return None;
    }
    let skipped = &record.skipped;
    let nested = record.fields.iter().map(|RecordField { ident, ty, .. }| {
        quote! {
            <#ty as #krate::Configurable>::restore_skipped(&mut self.#ident, &mut previous.#ident);
        }
    });
    Some(quote! {
        fn restore_skipped(&mut self, previous: &mut Self) {
            #( ::core::mem::swap(&mut self.#skipped, &mut previous.#skipped); )*
            #( #nested )*
        }
    })
}

fn register_field(
    field: &RecordField,
    krate: &TokenStream,
    builder: &syn::Ident,
    parent: &syn::Ident,
    project: &syn::Ident,
) -> TokenStream {
    let RecordField {
        ident,
        ty,
        name,
        default,
        flatten,
    } = field;
    let with_default = default
        .as_ref()
        .map(|value| quote! { .with_default(#value) });
    let embedded = flatten.then(|| quote! { .embedded() });
    quote! {
        <#ty as #krate::Configurable>::describe(
            #builder,
            #krate::FieldDecl::new(#name) #with_default #embedded,
            #parent,
            &#krate::CatalogBuilder::nest(#project, |record: &mut Self| &mut record.#ident),
        );
    }
}

/// Add `'static` to every type parameter and `Configurable` to every field
/// type of a generic record.
fn with_bounds(record: &Record, krate: &TokenStream) -> syn::Generics {
    let mut generics = record.generics.clone();
    if generics.params.is_empty() {
        return generics;
    }
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.push(parse_quote!('static));
        }
    }
    let where_clause = generics.make_where_clause();
    for field in &record.fields {
        let ty = &field.ty;
        where_clause
            .predicates
            .push(parse_quote!(#ty: #krate::Configurable));
    }
    generics
}

#[cfg(test)]
mod tests;
