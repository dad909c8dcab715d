use proc_macro2::TokenStream;
use quote::quote;

use super::{quotes::GeneratedFunctions, Names};
use crate::solved::{capability::EqStrategy, Solved, SolvedKind};

/// Compares `value` against `other: &T` with the kind's equality capability.
fn eq_expr(kind: &SolvedKind) -> TokenStream {
    let mask = kind.mask();
    let caps = &kind.capabilities;
    match &caps.eq {
        EqStrategy::Bitwise => quote! {
            (::kindpack::Payload::into_bits(value) & #mask) == (::kindpack::Payload::into_bits(*other) & #mask)
        },
        strategy if caps.nullable => {
            let inner = match strategy {
                EqStrategy::Equals(path) => quote! { #path(&a, &b) },
                _ => quote! { a == b },
            };
            quote! {
                match (value, *other) {
                    (::core::option::Option::Some(a), ::core::option::Option::Some(b)) => #inner,
                    (::core::option::Option::None, ::core::option::Option::None) => true,
                    _ => false,
                }
            }
        }
        EqStrategy::Equals(path) => quote! { #path(&value, other) },
        EqStrategy::Operator => quote! { value == *other },
    }
}

pub fn generate(solved: &Solved, names: &Names) -> GeneratedFunctions {
    let id = &names.id;
    let mut gen = GeneratedFunctions::default();
    for kind in &solved.kinds {
        let ty = &kind.kind.payload;
        let as_fn = kind.accessor();
        let expr = eq_expr(kind);
        gen.append_items(&quote! {
            impl ::core::cmp::PartialEq<#ty> for #id {
                fn eq(&self, other: &#ty) -> bool {
                    match self.#as_fn() {
                        ::core::option::Option::Some(value) => #expr,
                        ::core::option::Option::None => false,
                    }
                }
            }
        });
    }
    gen
}
