use crate::macros::args::{error, expect_name_value, metas, parse_string_literal, set_once};
use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    FnArg, GenericArgument, GenericParam, ImplItem, ImplItemFn, ItemImpl, LitStr, PathArguments,
    ReturnType, Type,
};

enum Receiver {
    Mut,
    Shared,
    Value,
    None,
}

enum Param {
    Str,
    String,
    Other(String),
}

enum Output {
    Unit,
    Fallible,
    Other(String),
}

struct SetterMeta {
    method: syn::Ident,
    name: Option<LitStr>,
    receiver: Receiver,
    params: Vec<Param>,
    output: Output,
    generic: bool,
}

impl SetterMeta {
    fn is_setter(&self) -> bool {
        matches!(self.receiver, Receiver::Mut)
            && matches!(self.params.as_slice(), [Param::Str | Param::String])
            && matches!(self.output, Output::Unit | Output::Fallible)
            && !self.generic
    }
}

/// Expands `#[setters]` on an inherent impl block into a `DeclaredSetters` impl.
pub fn expand_setters(args: TokenStream, mut input: ItemImpl) -> TokenStream {
    if !args.is_empty() {
        return error(args, "`#[setters]` takes no arguments");
    }
    if let Some((_, path, _)) = &input.trait_ {
        return error(path, "`#[setters]` must be applied to an inherent impl block");
    }
    if !input.generics.params.is_empty() {
        return error(&input.generics, "`#[setters]` cannot be applied to a generic impl block");
    }

    let mut setters = Vec::new();
    for item in &mut input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        match take_setter(method) {
            Ok(Some(setter)) => setters.push(setter),
            Ok(None) => {},
            Err(err) => return err,
        }
    }

    let self_ty = &input.self_ty;
    let invokers = setters.iter().enumerate().filter(|(_, setter)| setter.is_setter()).map(
        |(index, setter)| {
            let invoke = format_ident!("__objconf_invoke_{}", index);
            let method = &setter.method;
            let arg = match setter.params.first() {
                Some(Param::String) => quote! { ::std::borrow::ToOwned::to_owned(value) },
                _ => quote! { value },
            };
            let call = match setter.output {
                Output::Fallible => quote! { owner.#method(#arg)?; },
                _ => quote! { owner.#method(#arg); },
            };
            quote! {
                fn #invoke(
                    target: &mut dyn ::core::any::Any,
                    value: &str,
                ) -> ::core::result::Result<(), ::objconf::BoxError> {
                    let owner = ::objconf::slot::downcast_mut::<#self_ty>(target)?;
                    #call
                    ::core::result::Result::Ok(())
                }
            }
        },
    );
    let descriptors = setters.iter().enumerate().map(|(index, setter)| descriptor(index, setter));
    let count = setters.len();

    quote! {
        #input

        #[automatically_derived]
        impl ::objconf::descriptor::DeclaredSetters for #self_ty {
            fn setters() -> &'static [::objconf::descriptor::SetterDescriptor] {
                #(#invokers)*

                static SETTERS: [::objconf::descriptor::SetterDescriptor; #count] =
                    [#(#descriptors),*];
                &SETTERS
            }
        }
    }
}

/// Strips the `#[setter]` marker from `method` and records its shape.
fn take_setter(method: &mut ImplItemFn) -> Result<Option<SetterMeta>, TokenStream> {
    let mut markers = Vec::new();
    method.attrs.retain(|attr| {
        let marker = attr.path().is_ident("setter");
        if marker {
            markers.push(attr.clone());
        }
        !marker
    });

    let mut markers = markers.into_iter();
    let Some(marker) = markers.next() else {
        return Ok(None);
    };
    if let Some(extra) = markers.next() {
        return Err(error(extra, "Duplicate `#[setter]` attribute"));
    }

    let mut name = None;
    for meta in metas(&marker)? {
        let name_value = expect_name_value(meta, "#[setter(name = \"...\")]")?;
        if !name_value.path.is_ident("name") {
            return Err(error(&name_value.path, "Unknown argument; expected `name`"));
        }
        let value = parse_string_literal(&name_value, "name")?;
        name = Some(set_once(name, &name_value, value)?);
    }

    let sig = &method.sig;
    let receiver = sig.receiver().map_or(Receiver::None, |receiver| match &*receiver.ty {
        Type::Reference(reference) if reference.mutability.is_some() => Receiver::Mut,
        Type::Reference(_) => Receiver::Shared,
        _ => Receiver::Value,
    });
    let params = sig
        .inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Typed(typed) => Some(param(&typed.ty)),
            FnArg::Receiver(_) => None,
        })
        .collect();
    let output = if sig.asyncness.is_some() {
        Output::Other("impl Future".to_owned())
    } else {
        output(&sig.output)
    };
    let generic =
        sig.generics.params.iter().any(|param| !matches!(param, GenericParam::Lifetime(_)));

    Ok(Some(SetterMeta { method: sig.ident.clone(), name, receiver, params, output, generic }))
}

fn param(ty: &Type) -> Param {
    match ty {
        Type::Reference(reference)
            if reference.mutability.is_none() && is_plain(&reference.elem, "str") =>
        {
            Param::Str
        },
        ty if is_plain(ty, "String") => Param::String,
        other => Param::Other(spelling(other)),
    }
}

fn output(output: &ReturnType) -> Output {
    let ReturnType::Type(_, ty) = output else {
        return Output::Unit;
    };
    if is_unit(ty) {
        return Output::Unit;
    }
    if let Type::Path(path) = &**ty
        && let Some(segment) = path.path.segments.last()
        && segment.ident == "Result"
        && let PathArguments::AngleBracketed(generics) = &segment.arguments
        && let Some(GenericArgument::Type(ok)) = generics.args.first()
        && is_unit(ok)
    {
        return Output::Fallible;
    }
    Output::Other(spelling(ty))
}

fn is_unit(ty: &Type) -> bool {
    matches!(ty, Type::Tuple(tuple) if tuple.elems.is_empty())
}

fn is_plain(ty: &Type, ident: &str) -> bool {
    matches!(ty, Type::Path(path)
        if path.qself.is_none()
            && path.path.segments.last().is_some_and(|segment| {
                segment.ident == ident && segment.arguments.is_none()
            }))
}

fn spelling(ty: &impl ToTokens) -> String {
    ty.to_token_stream().to_string().replace(' ', "")
}

fn descriptor(index: usize, setter: &SetterMeta) -> TokenStream {
    let method = setter.method.unraw().to_string();
    let name = setter.name.as_ref().map_or_else(
        || quote! { ::core::option::Option::None },
        |lit| quote! { ::core::option::Option::Some(#lit) },
    );
    let receiver = match setter.receiver {
        Receiver::Mut => quote! { ::objconf::descriptor::Receiver::Mut },
        Receiver::Shared => quote! { ::objconf::descriptor::Receiver::Shared },
        Receiver::Value => quote! { ::objconf::descriptor::Receiver::Value },
        Receiver::None => quote! { ::objconf::descriptor::Receiver::None },
    };
    let params = setter.params.iter().map(|param| match param {
        Param::Str => quote! { ::objconf::descriptor::Param::Str },
        Param::String => quote! { ::objconf::descriptor::Param::String },
        Param::Other(spelled) => quote! { ::objconf::descriptor::Param::Other(#spelled) },
    });
    let output = match &setter.output {
        Output::Unit => quote! { ::objconf::descriptor::Output::Unit },
        Output::Fallible => quote! { ::objconf::descriptor::Output::Fallible },
        Output::Other(spelled) => quote! { ::objconf::descriptor::Output::Other(#spelled) },
    };
    let invoke = if setter.is_setter() {
        let invoke = format_ident!("__objconf_invoke_{}", index);
        quote! { ::core::option::Option::Some(#invoke) }
    } else {
        quote! { ::core::option::Option::None }
    };

    quote! {
        ::objconf::descriptor::SetterDescriptor {
            method: #method,
            name: #name,
            signature: ::objconf::descriptor::Signature {
                receiver: #receiver,
                params: &[#(#params),*],
                output: #output,
            },
            invoke: #invoke,
        }
    }
}
