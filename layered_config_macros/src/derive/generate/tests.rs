//! Tests for generated `Configurable` implementations.

use super::*;
use crate::derive::parse::parse_input;
use anyhow::{Result, anyhow, ensure};
use syn::{DeriveInput, parse_quote};

fn expand(input: &DeriveInput) -> Result<String> {
    let record = parse_input(input).map_err(|err| anyhow!(err))?;
    Ok(configurable_impl(&record, &quote! { layered_config }).to_string())
}

#[test]
fn fields_are_registered_in_declaration_order() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct App {
            port: u16,
            #[config(default = "admin")]
            user: String,
        }
    };
    let tokens = expand(&input)?;
    let port = tokens
        .find("FieldDecl :: new (\"port\")")
        .ok_or_else(|| anyhow!("port missing: {tokens}"))?;
    let user = tokens
        .find("FieldDecl :: new (\"user\") . with_default (\"admin\")")
        .ok_or_else(|| anyhow!("user missing: {tokens}"))?;
    ensure!(port < user, "fields out of order");
    ensure!(tokens.contains("Shape :: Group"), "records are groups");
    Ok(())
}

#[test]
fn flattened_fields_are_embedded() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct App {
            #[config(flatten)]
            common: Common,
            #[serde(flatten)]
            extra: Extra,
        }
    };
    let tokens = expand(&input)?;
    ensure!(
        tokens.matches(". embedded ()").count() == 2,
        "both fields should be embedded: {tokens}"
    );
    Ok(())
}

#[test]
fn empty_records_do_not_name_unused_parameters() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Empty {}
    };
    let tokens = expand(&input)?;
    ensure!(tokens.contains("_builder : & mut"), "unused builder: {tokens}");
    Ok(())
}

#[test]
fn generic_records_bound_their_fields() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Wrapper<T> {
            inner: T,
        }
    };
    let tokens = expand(&input)?;
    ensure!(tokens.contains("T : 'static"), "missing 'static bound: {tokens}");
    ensure!(
        tokens.contains("T : layered_config :: Configurable"),
        "missing field bound: {tokens}"
    );
    Ok(())
}

#[test]
fn raw_identifiers_lose_their_prefix() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct App {
            r#type: String,
        }
    };
    let tokens = expand(&input)?;
    ensure!(tokens.contains("FieldDecl :: new (\"type\")"), "name: {tokens}");
    ensure!(tokens.contains("record . r#type"), "accessor: {tokens}");
    Ok(())
}

#[test]
fn skipped_fields_are_swapped_back() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct App {
            port: u16,
            #[serde(skip)]
            runtime: String,
            #[config(skip)]
            handle: u32,
        }
    };
    let tokens = expand(&input)?;
    ensure!(
        tokens.contains(
            ":: core :: mem :: swap (& mut self . runtime , & mut previous . runtime)"
        ),
        "runtime not restored: {tokens}"
    );
    ensure!(
        tokens.contains(":: core :: mem :: swap (& mut self . handle , & mut previous . handle)"),
        "handle not restored: {tokens}"
    );
    ensure!(
        tokens.contains(
            "< u16 as layered_config :: Configurable > :: restore_skipped (& mut self . port , & mut previous . port)"
        ),
        "nested restore missing: {tokens}"
    );
    Ok(())
}

#[test]
fn empty_records_keep_the_default_restore() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Empty {}
    };
    let tokens = expand(&input)?;
    ensure!(!tokens.contains("restore_skipped"), "unexpected restore: {tokens}");
    Ok(())
}
