//! Literal parsing helpers for derive attributes.

use syn::meta::ParseNestedMeta;
use syn::{Expr, ExprLit, ExprUnary, Lit, LitStr, UnOp};

/// Parses a string literal from a field attribute.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    let literal = meta.value()?.parse::<Lit>()?;
    match literal {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(other.span(), format!("{key} must be a string"))),
    }
}

/// Parses the value of `default = ...` into its raw text.
///
/// Strings are taken verbatim. Integer, float and boolean literals, with an
/// optional leading `-`, are accepted as shorthand and recorded as written
/// without their type suffix.
pub(crate) fn lit_default(meta: &ParseNestedMeta) -> syn::Result<String> {
    let expr = meta.value()?.parse::<Expr>()?;
    default_text(&expr)
}

fn default_text(expr: &Expr) -> syn::Result<String> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(s) => Ok(s.value()),
            Lit::Int(i) => Ok(i.base10_digits().to_owned()),
            Lit::Float(f) => Ok(f.base10_digits().to_owned()),
            Lit::Bool(b) => Ok(b.value.to_string()),
            other => Err(unsupported(other)),
        },
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => match inner.as_ref() {
            Expr::Lit(ExprLit {
                lit: Lit::Int(i), ..
            }) => Ok(format!("-{}", i.base10_digits())),
            Expr::Lit(ExprLit {
                lit: Lit::Float(f), ..
            }) => Ok(format!("-{}", f.base10_digits())),
            _ => Err(unsupported(expr)),
        },
        _ => Err(unsupported(expr)),
    }
}

fn unsupported<T: quote::ToTokens + ?Sized>(tokens: &T) -> syn::Error {
    syn::Error::new_spanned(
        tokens,
        "default must be a string, integer, float or boolean literal",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;
    use syn::parse_quote;

    #[rstest]
    #[case::string(parse_quote!("5s"), "5s")]
    #[case::empty_string(parse_quote!(""), "")]
    #[case::integer(parse_quote!(8080), "8080")]
    #[case::suffixed(parse_quote!(8080u16), "8080")]
    #[case::negative(parse_quote!(-3), "-3")]
    #[case::float(parse_quote!(1.5), "1.5")]
    #[case::negative_float(parse_quote!(-0.25), "-0.25")]
    #[case::boolean(parse_quote!(true), "true")]
    fn defaults_are_captured_as_text(#[case] expr: Expr, #[case] expected: &str) -> Result<()> {
        let text = default_text(&expr).map_err(|err| anyhow!(err))?;
        ensure!(text == expected, "captured {text:?}");
        Ok(())
    }

    #[rstest]
    #[case::path(parse_quote!(DEFAULT_PORT))]
    #[case::call(parse_quote!(String::new()))]
    #[case::char_literal(parse_quote!('x'))]
    #[case::negated_string(parse_quote!(-"x"))]
    fn non_literal_defaults_are_rejected(#[case] expr: Expr) {
        assert!(default_text(&expr).is_err());
    }
}
