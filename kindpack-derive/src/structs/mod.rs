//! `#[derive(Payload)]`: packs a struct's fields back to back, little endian, in declaration order.
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Error, Fields, Ident, Member, Type};

pub struct PayloadStructInfo {
    pub name: Ident,
    pub fields: Vec<(Member, Type)>,
    pub style: Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Named,
    Tuple,
    Unit,
}

impl PayloadStructInfo {
    pub fn parse(input: &DeriveInput) -> syn::Result<Self> {
        let Data::Struct(ref data) = input.data else {
            return Err(Error::new(
                input.ident.span(),
                "Payload can only be derived for structs, use KindEnum for enums",
            ));
        };
        if !input.generics.params.is_empty() {
            return Err(Error::new_spanned(
                &input.generics,
                "Payload can not be derived for generic structs",
            ));
        }
        let style = match data.fields {
            Fields::Named(_) => Style::Named,
            Fields::Unnamed(_) => Style::Tuple,
            Fields::Unit => Style::Unit,
        };
        let fields = data
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let member = match field.ident {
                    Some(ref ident) => Member::Named(ident.clone()),
                    None => Member::Unnamed(i.into()),
                };
                (member, field.ty.clone())
            })
            .collect();
        Ok(Self {
            name: input.ident.clone(),
            fields,
            style,
        })
    }

    pub fn gen(&self) -> TokenStream {
        let name = &self.name;
        let members: Vec<_> = self.fields.iter().map(|(m, _)| m).collect();
        let types: Vec<_> = self.fields.iter().map(|(_, t)| t).collect();
        let temps: Vec<_> = (0..self.fields.len())
            .map(|i| format_ident!("field_{}", i))
            .collect();
        let size = if types.is_empty() {
            quote! { 0 }
        } else {
            quote! { #(<#types as ::kindpack::Payload>::SIZE)+* }
        };
        let construct = match self.style {
            Style::Named => quote! { Self { #(#members: #temps),* } },
            Style::Tuple => quote! { Self(#(#temps),*) },
            Style::Unit => quote! { Self },
        };
        let message = format!("`{name}` is larger than the 16 bytes a payload can hold");
        quote! {
            impl ::kindpack::Payload for #name {
                const SIZE: usize = #size;
                #[allow(unused_mut, unused_variables)]
                fn into_bits(self) -> u128 {
                    let mut bits = 0u128;
                    let mut offset = 0usize;
                    #(
                        bits = ::kindpack::bits::insert(
                            bits,
                            ::kindpack::Payload::into_bits(self.#members),
                            offset,
                            <#types as ::kindpack::Payload>::SIZE,
                        );
                        offset += <#types as ::kindpack::Payload>::SIZE;
                    )*
                    bits
                }
                #[allow(unused_mut, unused_variables, unused_assignments)]
                fn from_bits(bits: u128) -> Self {
                    let mut offset = 0usize;
                    #(
                        let #temps = <#types as ::kindpack::Payload>::from_bits(::kindpack::bits::extract(
                            bits,
                            offset,
                            <#types as ::kindpack::Payload>::SIZE,
                        ));
                        offset += <#types as ::kindpack::Payload>::SIZE;
                    )*
                    #construct
                }
            }
            const _: () = ::core::assert!(<#name as ::kindpack::Payload>::SIZE <= 16, #message);
        }
    }
}
