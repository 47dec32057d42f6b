use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, Type, parse_macro_input, parse_quote, spanned::Spanned};

/// Derives `dynobj::DynamicRecord` for a struct with named fields.
///
/// The dynamic mapping is the field marked `#[dynamic]`, or, when no field
/// is marked, the single field whose type is `DynamicMap`. Every other
/// field is a declared field and is cloned into records produced by
/// `with_entry` / `without_entry`.
#[proc_macro_derive(DynamicRecord, attributes(dynamic))]
pub fn derive_dynamic_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_dynamic_record(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct RecordField {
    ident: Ident,
    ty: Type,
    marked_dynamic: bool,
}

fn expand_dynamic_record(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = input.ident;

    let data_struct = match input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new(
                struct_name.span(),
                "DynamicRecord can only be derived for structs",
            ));
        }
    };

    let named_fields = match data_struct.fields {
        Fields::Named(fields) => fields,
        _ => {
            return Err(syn::Error::new(
                struct_name.span(),
                "DynamicRecord requires named fields",
            ));
        }
    };

    let mut fields = Vec::<RecordField>::new();
    for field in named_fields.named {
        let ident = field.ident.clone().ok_or_else(|| {
            syn::Error::new(field.span(), "DynamicRecord requires named fields")
        })?;
        let marked_dynamic = parse_dynamic_marker(&field.attrs)?;
        fields.push(RecordField {
            ident,
            ty: field.ty,
            marked_dynamic,
        });
    }

    let dynamic_index = select_dynamic_field(&struct_name, &fields)?;
    let dynamic_ident = &fields[dynamic_index].ident;

    let declared = fields
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != dynamic_index)
        .map(|(_, field)| field)
        .collect::<Vec<_>>();
    let declared_idents = declared.iter().map(|field| &field.ident).collect::<Vec<_>>();

    let mut generics = input.generics;
    {
        let where_clause = generics.make_where_clause();
        for field in &declared {
            let ty = &field.ty;
            where_clause
                .predicates
                .push(parse_quote!(#ty: ::core::clone::Clone));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::dynobj::DynamicRecord for #struct_name #ty_generics #where_clause {
            fn entries(&self) -> &::dynobj::DynamicMap {
                &self.#dynamic_ident
            }

            fn rebuild(&self, entries: ::dynobj::DynamicMap) -> Self {
                Self {
                    #dynamic_ident: entries,
                    #(#declared_idents: ::core::clone::Clone::clone(&self.#declared_idents),)*
                }
            }
        }
    })
}

fn select_dynamic_field(struct_name: &Ident, fields: &[RecordField]) -> syn::Result<usize> {
    let marked = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field.marked_dynamic)
        .map(|(idx, _)| idx)
        .collect::<Vec<_>>();

    match marked.as_slice() {
        [idx] => return Ok(*idx),
        [] => {}
        [_, second, ..] => {
            return Err(syn::Error::new(
                fields[*second].ident.span(),
                "Only one field can be marked #[dynamic]",
            ));
        }
    }

    let by_type = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| type_ends_with_ident(&field.ty, "DynamicMap"))
        .map(|(idx, _)| idx)
        .collect::<Vec<_>>();

    match by_type.as_slice() {
        [idx] => Ok(*idx),
        [] => Err(syn::Error::new(
            struct_name.span(),
            "DynamicRecord requires a DynamicMap field (mark it with #[dynamic])",
        )),
        _ => Err(syn::Error::new(
            struct_name.span(),
            "Several DynamicMap fields found; mark the dynamic one with #[dynamic]",
        )),
    }
}

fn parse_dynamic_marker(attrs: &[syn::Attribute]) -> syn::Result<bool> {
    let mut marked = false;

    for attr in attrs {
        if !attr.path().is_ident("dynamic") {
            continue;
        }

        if marked {
            return Err(syn::Error::new(
                attr.span(),
                "Duplicate #[dynamic] attribute on field",
            ));
        }

        match &attr.meta {
            syn::Meta::Path(_) => {}
            _ => {
                return Err(syn::Error::new(
                    attr.span(),
                    "#[dynamic] does not accept arguments",
                ));
            }
        }

        marked = true;
    }

    Ok(marked)
}

fn type_ends_with_ident(ty: &Type, ident: &str) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == ident),
        _ => false,
    }
}
