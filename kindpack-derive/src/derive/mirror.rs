//! `<Name>Serializable`, the width independent `{discriminant, payload}` form of an identifier.
use proc_macro2::TokenStream;
use quote::quote;

use super::{quotes::GeneratedFunctions, Names};
use crate::solved::Solved;

pub fn generate(solved: &Solved, names: &Names) -> GeneratedFunctions {
    let Names {
        id,
        kind,
        mirror,
        discriminant,
        ..
    } = names;
    let vis = &solved.vis.0;
    let serde = if solved.settings.serde {
        quote! { #[derive(::serde::Serialize, ::serde::Deserialize)] }
    } else {
        TokenStream::new()
    };
    let doc = format!(
        "Persistence form of [`{id}`]. Stays the same when kinds are added and the packed width grows."
    );
    let (to_packed, mirror_kind) = if solved.layout.discriminant.is_some() {
        (
            quote! {
                match Self::known_kind(self.discriminant) {
                    ::core::option::Option::Some(kind) => #id::from_signed(kind, self.payload),
                    ::core::option::Option::None => #id::pack(self.discriminant as #discriminant, self.payload as u64 as u128),
                }
            },
            quote! { Self::known_kind(self.discriminant) },
        )
    } else {
        (
            quote! { #id::from_signed(self.payload) },
            quote! { self.to_packed().kind() },
        )
    };
    let known_kind = if solved.layout.discriminant.is_some() {
        quote! {
            fn known_kind(discriminant: u32) -> ::core::option::Option<#kind> {
                <#discriminant as ::core::convert::TryFrom<u32>>::try_from(discriminant)
                    .ok()
                    .and_then(#kind::from_discriminant)
            }
        }
    } else {
        TokenStream::new()
    };
    let mut gen = GeneratedFunctions::default();
    gen.append_items(&quote! {
        #[doc = #doc]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #serde
        #vis struct #mirror {
            pub discriminant: u32,
            pub payload: i64,
        }

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::must_use_candidate,
        )]
        impl #mirror {
            pub const fn new(discriminant: u32, payload: i64) -> Self {
                Self { discriminant, payload }
            }

            pub fn from_packed(id: #id) -> Self {
                Self {
                    discriminant: u32::from(id.discriminant()),
                    payload: id.payload_signed(),
                }
            }

            /// Narrows back to the packed form. Payload bits the kind can not hold are dropped.
            pub fn to_packed(self) -> #id {
                #to_packed
            }

            pub fn kind(self) -> ::core::option::Option<#kind> {
                #mirror_kind
            }

            pub fn try_parse(text: &str) -> ::core::option::Option<Self> {
                #id::try_parse(text).map(Self::from_packed)
            }

            pub fn try_parse_with(text: &str, options: ::kindpack::ParseOptions) -> ::core::option::Option<Self> {
                #id::try_parse_with(text, options).map(Self::from_packed)
            }

            #known_kind
        }

        impl ::core::convert::From<#id> for #mirror {
            fn from(id: #id) -> Self {
                Self::from_packed(id)
            }
        }

        impl ::core::convert::From<#mirror> for #id {
            fn from(mirror: #mirror) -> Self {
                mirror.to_packed()
            }
        }

        impl ::core::fmt::Display for #mirror {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.to_packed(), f)
            }
        }

        impl ::core::str::FromStr for #mirror {
            type Err = ::kindpack::ParseIdError;
            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                #id::parse_text(s, ::kindpack::ParseOptions::DEFAULT).map(Self::from_packed)
            }
        }
    });
    gen
}
