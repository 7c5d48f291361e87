//! Runtime crate path used by generated code.
//!
//! Every path the derive emits starts with the tokens returned here, so a
//! crate that renames the dependency in its manifest can point the derive at
//! the new name with `#[config(crate = "...")]`.

use proc_macro2::TokenStream;
use quote::quote;

/// Tokens naming the runtime crate: the struct's `crate` override when
/// present, `layered_config` otherwise.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { layered_config }, |path| quote! { #path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use rstest::rstest;

    #[rstest]
    #[case::default(None, "layered_config")]
    #[case::custom(Some("config"), "config")]
    #[case::nested(Some("deps::layered_config"), "deps :: layered_config")]
    fn resolve_produces_expected_tokens(
        #[case] input: Option<&str>,
        #[case] expected: &str,
    ) -> Result<()> {
        let parsed = input.map(syn::parse_str::<syn::Path>).transpose()?;
        let tokens = resolve(parsed.as_ref());
        anyhow::ensure!(tokens.to_string() == expected, "tokens were {tokens}");
        Ok(())
    }
}
