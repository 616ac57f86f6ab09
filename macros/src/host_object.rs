//! Implementation of `#[derive(HostObject)]`

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Path, Visibility, parse_macro_input};

pub fn derive_host_object_impl(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match generate_code(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Options from `#[host(...)]` on the struct.
#[derive(Default)]
struct TypeOptions {
    name: Option<LitStr>,
    methods: Option<Path>,
    krate: Option<Path>,
}

/// Options from `#[host(...)]` on a field.
#[derive(Default)]
struct FieldOptions {
    rename: Option<LitStr>,
    property: bool,
    skip: bool,
}

/// A field that will be registered
struct Member {
    ident: syn::Ident,
    name: String,
    property: bool,
}

fn parse_type_options(input: &DeriveInput) -> syn::Result<TypeOptions> {
    let mut options = TypeOptions::default();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("host")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                options.name = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("methods") {
                options.methods = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                options.krate = Some(lit.parse()?);
            } else {
                return Err(meta.error("expected `name`, `methods` or `crate`"));
            }
            Ok(())
        })?;
    }
    Ok(options)
}

fn parse_field_options(field: &syn::Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("host")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                options.rename = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("property") {
                options.property = true;
            } else if meta.path.is_ident("skip") {
                options.skip = true;
            } else {
                return Err(meta.error("expected `rename`, `property` or `skip`"));
            }
            Ok(())
        })?;
    }
    Ok(options)
}

/// Public, non-skipped named fields in declaration order
fn collect_members(input: &DeriveInput) -> syn::Result<Vec<Member>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "HostObject can only be derived for structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &data.fields,
            "HostObject requires named fields",
        ));
    };

    let mut members = Vec::new();
    for field in &fields.named {
        let options = parse_field_options(field)?;
        if options.skip || !matches!(field.vis, Visibility::Public(_)) {
            continue;
        }
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let name = match &options.rename {
            Some(rename) => rename.value(),
            None => ident.to_string(),
        };
        members.push(Member {
            ident,
            name,
            property: options.property,
        });
    }
    Ok(members)
}

fn generate_code(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let options = parse_type_options(input)?;
    let members = collect_members(input)?;
    let ty = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let krate = options
        .krate
        .map(|path| quote!(#path))
        .unwrap_or_else(|| quote!(::verdict_core));

    let registrations = members.iter().map(|member| {
        let ident = &member.ident;
        let name = &member.name;
        let register = if member.property {
            quote!(property)
        } else {
            quote!(field)
        };
        quote! {
            members.#register(#name, |this: &Self| ::core::clone::Clone::clone(&this.#ident));
        }
    });

    let methods = options.methods.map(|path| quote!(#path(members);));

    let type_name = options.name.map(|name| {
        quote! {
            fn type_name() -> &'static str {
                #name
            }
        }
    });

    Ok(quote! {
        impl #impl_generics #krate::values::HostObject for #ty #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn describe(members: &mut #krate::members::MemberMapBuilder<Self>) {
                #(#registrations)*
                #methods
            }

            #type_name
        }

        impl #impl_generics ::core::convert::From<#ty #ty_generics> for #krate::values::Value #where_clause {
            fn from(value: #ty #ty_generics) -> Self {
                #krate::values::Value::object(value)
            }
        }
    })
}
