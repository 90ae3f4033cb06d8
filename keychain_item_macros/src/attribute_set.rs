use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

enum ElementField {
    Single(syn::Ident),
    Flatten(syn::Ident),
}

pub fn derive_attribute_set(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match extract_element_fields(&input) {
        Ok(fields) => fields,
        Err(err) => return TokenStream::from(err.to_compile_error()),
    };

    let pushes = fields.iter().map(|field| match field {
        ElementField::Single(ident) => quote! { out.push(&self.#ident); },
        ElementField::Flatten(ident) => quote! {
            out.extend(::keychain_item::AttributeSet::elements(&self.#ident));
        },
    });

    let pushes_mut = fields.iter().map(|field| match field {
        ElementField::Single(ident) => quote! { out.push(&mut self.#ident); },
        ElementField::Flatten(ident) => quote! {
            out.extend(::keychain_item::AttributeSet::elements_mut(&mut self.#ident));
        },
    });

    let expanded = quote! {
        impl #impl_generics ::keychain_item::AttributeSet for #name #ty_generics #where_clause {
            fn elements(&self) -> ::std::vec::Vec<&dyn ::keychain_item::Element> {
                let mut out: ::std::vec::Vec<&dyn ::keychain_item::Element> = ::std::vec::Vec::new();
                #(#pushes)*
                out
            }

            fn elements_mut(&mut self) -> ::std::vec::Vec<&mut dyn ::keychain_item::Element> {
                let mut out: ::std::vec::Vec<&mut dyn ::keychain_item::Element> = ::std::vec::Vec::new();
                #(#pushes_mut)*
                out
            }
        }
    };

    TokenStream::from(expanded)
}

fn extract_element_fields(input: &DeriveInput) -> syn::Result<Vec<ElementField>> {
    let fields = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => &fields.named,
            _ => panic!("AttributeSet derive only supports structs with named fields"),
        },
        _ => panic!("AttributeSet derive only supports structs"),
    };

    let mut elements = Vec::new();
    for field in fields {
        let ident = field.ident.clone().unwrap();
        for attr in &field.attrs {
            if !attr.path().is_ident("element") {
                continue;
            }

            let mut flatten = false;
            // Bare `#[element]` carries no nested meta.
            if !matches!(attr.meta, syn::Meta::Path(_)) {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("flatten") {
                        flatten = true;
                        Ok(())
                    } else {
                        Err(meta.error("unknown element option, expected `flatten`"))
                    }
                })?;
            }

            if flatten {
                elements.push(ElementField::Flatten(ident.clone()));
            } else {
                elements.push(ElementField::Single(ident.clone()));
            }
        }
    }

    Ok(elements)
}
