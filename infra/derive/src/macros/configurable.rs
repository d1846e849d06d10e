use crate::macros::args::{
    error, expect_flag, expect_name_value, metas, parse_bool_literal, parse_string_literal,
    set_once,
};
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprLit, Field, Fields, GenericArgument, Ident, Lit,
    LitBool, LitStr, Meta, PathArguments, Type,
};

#[derive(Default)]
struct PropertyArgs {
    name: Option<LitStr>,
    required: Option<LitBool>,
    default: Option<LitStr>,
    description: Option<LitStr>,
}

enum Role<'a> {
    Plain,
    Parent,
    Property { args: PropertyArgs, value_ty: &'a Type, optional: bool },
}

struct FieldMeta<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    role: Role<'a>,
}

/// Expands `#[derive(Configurable)]` into a static `TypeDescriptor`.
pub fn expand_derive(input: DeriveInput) -> TokenStream {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return error(&input.generics, "Configurable cannot be derived for generic types");
    }
    let Data::Struct(data) = &input.data else {
        return error(name, "Configurable can only be derived for structs");
    };
    let Fields::Named(named) = &data.fields else {
        return error(name, "Configurable requires a struct with named fields");
    };

    let with_setters = match struct_args(&input.attrs) {
        Ok(flag) => flag,
        Err(err) => return err,
    };
    let fields: Vec<FieldMeta<'_>> = match named.named.iter().map(parse_field).collect() {
        Ok(fields) => fields,
        Err(err) => return err,
    };

    let mut parents = fields.iter().filter(|field| matches!(field.role, Role::Parent));
    let parent = parents.next();
    if let Some(extra) = parents.next() {
        return error(extra.ident, "Only one field can be marked `#[configurable(parent)]`");
    }

    let mut helpers = Vec::new();
    let mut attributes = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        match &field.role {
            Role::Parent => {},
            Role::Plain => attributes.push(plain_attribute(field)),
            Role::Property { args, value_ty, optional } => {
                let (slot_fns, attribute) =
                    property_attribute(name, index, field, args, value_ty, *optional);
                helpers.push(slot_fns);
                attributes.push(attribute);
            },
        }
    }

    let (parent_fns, parent_link) = parent.map_or_else(
        || (quote! {}, quote! { ::core::option::Option::None }),
        |field| parent_link(name, field),
    );
    let setters = if with_setters {
        quote! { <#name as ::objconf::descriptor::DeclaredSetters>::setters }
    } else {
        quote! { ::objconf::descriptor::no_setters }
    };
    let type_name = name.unraw().to_string();

    quote! {
        #[automatically_derived]
        impl ::objconf::descriptor::Configurable for #name {
            fn descriptor() -> &'static ::objconf::descriptor::TypeDescriptor {
                #(#helpers)*
                #parent_fns

                static DESCRIPTOR: ::objconf::descriptor::TypeDescriptor =
                    ::objconf::descriptor::TypeDescriptor {
                        name: #type_name,
                        attributes: &[#(#attributes),*],
                        setters: #setters,
                        parent: #parent_link,
                    };
                &DESCRIPTOR
            }
        }
    }
}

fn struct_args(attrs: &[Attribute]) -> Result<bool, TokenStream> {
    let mut setters = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("configurable")) {
        for meta in metas(attr)? {
            let path = expect_flag(meta, "#[configurable(setters)]")?;
            if !path.is_ident("setters") {
                return Err(error(&path, "Unknown argument; expected `setters`"));
            }
            setters = Some(set_once(setters, &path, true)?);
        }
    }
    Ok(setters.unwrap_or(false))
}

fn parse_field(field: &Field) -> Result<FieldMeta<'_>, TokenStream> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(error(field, "Configurable requires named fields"));
    };

    let mut parent = None;
    let mut property = None;
    for attr in &field.attrs {
        if attr.path().is_ident("configurable") {
            for meta in metas(attr)? {
                let path = expect_flag(meta, "#[configurable(parent)]")?;
                if !path.is_ident("parent") {
                    return Err(error(&path, "Unknown argument; expected `parent`"));
                }
                parent = Some(set_once(parent, &path, ())?);
            }
        } else if attr.path().is_ident("property") {
            if property.is_some() {
                return Err(error(attr, "Duplicate `#[property]` attribute"));
            }
            property = Some(property_args(attr, &field.attrs)?);
        }
    }

    let role = match (parent, property) {
        (Some(()), Some(_)) => {
            return Err(error(ident, "A parent field cannot also be a `#[property]`"));
        },
        (Some(()), None) => Role::Parent,
        (None, Some(args)) => match option_inner(&field.ty) {
            Some(inner) => Role::Property { args, value_ty: inner, optional: true },
            None => Role::Property { args, value_ty: &field.ty, optional: false },
        },
        (None, None) => Role::Plain,
    };

    Ok(FieldMeta { ident, ty: &field.ty, role })
}

fn property_args(attr: &Attribute, field_attrs: &[Attribute]) -> Result<PropertyArgs, TokenStream> {
    let mut args = PropertyArgs::default();
    for meta in metas(attr)? {
        let name_value = expect_name_value(meta, "name = \"...\"")?;
        let key = &name_value.path;
        if key.is_ident("name") {
            let value = parse_string_literal(&name_value, "name")?;
            args.name = Some(set_once(args.name, &name_value, value)?);
        } else if key.is_ident("required") {
            let value = parse_bool_literal(&name_value, "required")?;
            args.required = Some(set_once(args.required, &name_value, value)?);
        } else if key.is_ident("default") {
            let value = parse_string_literal(&name_value, "default")?;
            args.default = Some(set_once(args.default, &name_value, value)?);
        } else if key.is_ident("description") {
            let value = parse_string_literal(&name_value, "description")?;
            args.description = Some(set_once(args.description, &name_value, value)?);
        } else {
            return Err(error(
                key,
                "Unknown argument; expected `name`, `required`, `default` or `description`",
            ));
        }
    }

    if args.description.is_none() {
        args.description =
            doc_description(field_attrs).map(|doc| LitStr::new(&doc, Span::call_site()));
    }
    Ok(args)
}

fn doc_description(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(name_value) => match &name_value.value {
                Expr::Lit(ExprLit { lit: Lit::Str(line), .. }) => {
                    Some(line.value().trim().to_owned())
                },
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();
    (!lines.is_empty()).then(|| lines.join(" "))
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(generics) = &segment.arguments else {
        return None;
    };
    match (generics.args.len(), generics.args.first()) {
        (1, Some(GenericArgument::Type(inner))) => Some(inner),
        _ => None,
    }
}

fn plain_attribute(field: &FieldMeta<'_>) -> TokenStream {
    let field_name = field.ident.unraw().to_string();
    let ty = field.ty;
    quote! {
        ::objconf::descriptor::AttributeDescriptor {
            field: #field_name,
            type_name: ::core::any::type_name::<#ty>,
            property: ::core::option::Option::None,
            slot: ::core::option::Option::None,
        }
    }
}

fn property_attribute(
    owner: &Ident,
    index: usize,
    field: &FieldMeta<'_>,
    args: &PropertyArgs,
    value_ty: &Type,
    optional: bool,
) -> (TokenStream, TokenStream) {
    let ident = field.ident;
    let field_name = ident.unraw().to_string();
    let is_set = format_ident!("__objconf_is_set_{}", index);
    let assign = format_ident!("__objconf_assign_{}", index);

    let (probe, store) = if optional {
        (
            quote! { ::objconf::slot::downcast_ref::<#owner>(target)?.#ident.is_some() },
            quote! { ::core::option::Option::Some(value) },
        )
    } else {
        (
            quote! {{
                ::objconf::slot::downcast_ref::<#owner>(target)?;
                true
            }},
            quote! { value },
        )
    };

    let slot_fns = quote! {
        fn #is_set(
            target: &dyn ::core::any::Any,
        ) -> ::core::result::Result<bool, ::objconf::AccessError> {
            ::core::result::Result::Ok(#probe)
        }

        fn #assign(
            target: &mut dyn ::core::any::Any,
            raw: &str,
        ) -> ::core::result::Result<(), ::objconf::SlotError> {
            let value = ::objconf::coerce::coerce::<#value_ty>(raw)?;
            ::objconf::slot::downcast_mut::<#owner>(target)?.#ident = #store;
            ::core::result::Result::Ok(())
        }
    };

    let name = optional_str(args.name.as_ref());
    let required = args.required.as_ref().is_none_or(|lit| lit.value);
    let default_value = optional_str(args.default.as_ref());
    let description = optional_str(args.description.as_ref());

    let attribute = quote! {
        ::objconf::descriptor::AttributeDescriptor {
            field: #field_name,
            type_name: ::core::any::type_name::<#value_ty>,
            property: ::core::option::Option::Some(::objconf::descriptor::Property {
                name: #name,
                required: #required,
                default_value: #default_value,
                description: #description,
            }),
            slot: ::core::option::Option::Some(::objconf::descriptor::AttributeSlot {
                is_set: #is_set,
                assign: #assign,
            }),
        }
    };

    (slot_fns, attribute)
}

fn parent_link(owner: &Ident, field: &FieldMeta<'_>) -> (TokenStream, TokenStream) {
    let ident = field.ident;
    let ty = field.ty;
    let field_name = ident.unraw().to_string();

    let fns = quote! {
        fn __objconf_project(
            target: &dyn ::core::any::Any,
        ) -> ::core::option::Option<&dyn ::core::any::Any> {
            target
                .downcast_ref::<#owner>()
                .map(|owner| &owner.#ident as &dyn ::core::any::Any)
        }

        fn __objconf_project_mut(
            target: &mut dyn ::core::any::Any,
        ) -> ::core::option::Option<&mut dyn ::core::any::Any> {
            target
                .downcast_mut::<#owner>()
                .map(|owner| &mut owner.#ident as &mut dyn ::core::any::Any)
        }
    };
    let link = quote! {
        ::core::option::Option::Some(::objconf::descriptor::ParentLink {
            field: #field_name,
            descriptor: <#ty as ::objconf::descriptor::Configurable>::descriptor,
            project: __objconf_project,
            project_mut: __objconf_project_mut,
        })
    };

    (fns, link)
}

fn optional_str(lit: Option<&LitStr>) -> TokenStream {
    lit.map_or_else(
        || quote! { ::core::option::Option::None },
        |lit| quote! { ::core::option::Option::Some(#lit) },
    )
}
