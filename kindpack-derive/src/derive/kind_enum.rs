//! The `<Name>Kind` discriminant enumeration.
use proc_macro2::TokenStream;
use quote::quote;

use super::{quotes::GeneratedFunctions, Names};
use crate::solved::Solved;

pub fn generate(solved: &Solved, names: &Names) -> GeneratedFunctions {
    let Names {
        id,
        kind,
        discriminant,
        ..
    } = names;
    let vis = &solved.vis.0;
    let count = solved.kinds.len();
    let idents: Vec<_> = solved.kinds.iter().map(|k| k.ident().clone()).collect();
    let kind_names: Vec<String> = solved.kinds.iter().map(|k| k.kind.name_text()).collect();
    let display_names: Vec<String> = solved.kinds.iter().map(|k| k.kind.display_text()).collect();
    let discriminants: Vec<_> = solved.kinds.iter().map(|k| k.discriminant_lit()).collect();
    let serde = if solved.settings.serde {
        quote! { #[derive(::serde::Serialize, ::serde::Deserialize)] }
    } else {
        TokenStream::new()
    };
    let doc = format!("Kinds of [`{id}`], the value of its discriminant.");

    let (repr, name_body, display_body, discriminant_body, from_body, index_body) = if count == 0 {
        (
            TokenStream::new(),
            quote! { match self {} },
            quote! { match self {} },
            quote! { match self {} },
            quote! {
                let _ = value;
                ::core::option::Option::None
            },
            quote! { match self {} },
        )
    } else {
        (
            quote! { #[repr(#discriminant)] },
            quote! {
                match self {
                    #(Self::#idents => #kind_names,)*
                }
            },
            quote! {
                match self {
                    #(Self::#idents => #display_names,)*
                }
            },
            quote! { self as #discriminant },
            quote! {
                match value {
                    #(#discriminants => ::core::option::Option::Some(Self::#idents),)*
                    _ => ::core::option::Option::None,
                }
            },
            quote! { self as usize },
        )
    };

    let mut gen = GeneratedFunctions::default();
    gen.append_items(&quote! {
        #[doc = #doc]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #serde
        #repr
        #vis enum #kind {
            #(#idents = #discriminants,)*
        }

        #[allow(clippy::must_use_candidate)]
        impl #kind {
            pub const COUNT: usize = #count;
            /// Every kind in discriminant order.
            pub const ALL: [Self; #count] = [#(Self::#idents),*];

            pub const fn name(self) -> &'static str {
                #name_body
            }

            /// The display name, the name when none was declared.
            pub const fn display_name(self) -> &'static str {
                #display_body
            }

            pub const fn discriminant(self) -> #discriminant {
                #discriminant_body
            }

            pub const fn from_discriminant(value: #discriminant) -> ::core::option::Option<Self> {
                #from_body
            }

            pub fn try_parse_with(text: &str, options: ::kindpack::ParseOptions) -> ::core::option::Option<Self> {
                <Self as ::kindpack::KindEnum>::from_name(text, options)
            }
        }

        impl ::kindpack::KindEnum for #kind {
            const MEMBERS: &'static [Self] = &Self::ALL;
            const NAMES: &'static [&'static str] = &[#(#kind_names),*];
            const DISPLAY_NAMES: &'static [&'static str] = &[#(#display_names),*];
            fn index(self) -> usize {
                #index_body
            }
        }

        impl ::core::fmt::Display for #kind {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(#kind::name(*self))
            }
        }

        impl ::core::str::FromStr for #kind {
            type Err = ::kindpack::ParseIdError;
            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                if s.is_empty() {
                    return ::core::result::Result::Err(::kindpack::ParseIdError::EmptyKind);
                }
                Self::try_parse_with(s, ::kindpack::ParseOptions::DEFAULT)
                    .ok_or(::kindpack::ParseIdError::UnknownKind)
            }
        }
    });
    gen
}
