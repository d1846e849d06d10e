use proc_macro2::TokenStream;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ExprLit, Lit, LitBool, LitStr, Meta, MetaNameValue, Token};

/// Arguments of an attribute, empty for a bare `#[name]`.
pub fn metas(attr: &Attribute) -> Result<Vec<Meta>, TokenStream> {
    if matches!(attr.meta, Meta::Path(_)) {
        return Ok(Vec::new());
    }
    attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
        .map(|metas| metas.into_iter().collect())
        .map_err(|err| err.to_compile_error())
}

pub fn expect_name_value(meta: Meta, hint: &str) -> Result<MetaNameValue, TokenStream> {
    match meta {
        Meta::NameValue(name_value) => Ok(name_value),
        other => Err(syn::Error::new_spanned(
            other,
            format!("Expected name-value arguments like `{hint}`"),
        )
        .to_compile_error()),
    }
}

pub fn expect_flag(meta: Meta, hint: &str) -> Result<syn::Path, TokenStream> {
    match meta {
        Meta::Path(path) => Ok(path),
        other => Err(syn::Error::new_spanned(other, format!("Expected a bare flag like `{hint}`"))
            .to_compile_error()),
    }
}

pub fn parse_bool_literal(name_value: &MetaNameValue, label: &str) -> Result<LitBool, TokenStream> {
    match &name_value.value {
        Expr::Lit(ExprLit { lit: Lit::Bool(lit), .. }) => Ok(lit.clone()),
        other => Err(syn::Error::new_spanned(other, format!("{label} must be a boolean literal"))
            .to_compile_error()),
    }
}

pub fn parse_string_literal(
    name_value: &MetaNameValue,
    label: &str,
) -> Result<LitStr, TokenStream> {
    match &name_value.value {
        Expr::Lit(ExprLit { lit: Lit::Str(lit), .. }) => Ok(lit.clone()),
        other => Err(syn::Error::new_spanned(other, format!("{label} must be a string literal"))
            .to_compile_error()),
    }
}

pub fn set_once<T>(
    current: Option<T>,
    token: &impl quote::ToTokens,
    value: T,
) -> Result<T, TokenStream> {
    if current.is_some() {
        return Err(syn::Error::new_spanned(token, "Duplicate argument").to_compile_error());
    }
    Ok(value)
}

pub fn error(tokens: impl quote::ToTokens, message: &str) -> TokenStream {
    syn::Error::new_spanned(tokens, message).to_compile_error()
}
