//! Listing every member of the enumeration kinds as identifiers.
use quote::quote;

use super::{quotes::GeneratedFunctions, Names};
use crate::solved::{capability::PayloadClass, Solved};

pub fn generate(solved: &Solved, _names: &Names) -> GeneratedFunctions {
    let enumerations: Vec<_> = solved
        .kinds
        .iter()
        .filter(|k| k.capabilities.class == PayloadClass::Enumeration)
        .collect();
    let types: Vec<_> = enumerations.iter().map(|k| &k.kind.payload).collect();
    let ctors: Vec<_> = enumerations.iter().map(|k| k.constructor()).collect();
    let count = if types.is_empty() {
        quote! { 0 }
    } else {
        quote! { #(<#types as ::kindpack::KindEnum>::MEMBERS.len())+* }
    };
    let copy_body = if types.is_empty() {
        quote! {
            let _ = dest;
            ::core::result::Result::Ok(0)
        }
    } else {
        quote! {
            if dest.len() < Self::ENUM_MEMBER_COUNT {
                return ::core::result::Result::Err(::kindpack::CapacityError {
                    required: Self::ENUM_MEMBER_COUNT,
                    available: dest.len(),
                });
            }
            let mut written = 0usize;
            #(
                for member in <#types as ::kindpack::KindEnum>::MEMBERS {
                    dest[written] = Self::#ctors(*member);
                    written += 1;
                }
            )*
            ::core::result::Result::Ok(written)
        }
    };
    let mut gen = GeneratedFunctions::default();
    gen.append_id_fns(&quote! {
        /// Members across every enumeration kind.
        pub const ENUM_MEMBER_COUNT: usize = #count;

        /// Writes one identifier per enumeration kind member to the front of `dest`, returning how many
        /// were written.
        ///
        /// # Errors
        /// If `dest` is shorter than `ENUM_MEMBER_COUNT`, nothing is written then.
        pub fn copy_all_members(dest: &mut [Self]) -> ::core::result::Result<usize, ::kindpack::CapacityError> {
            #copy_body
        }

        /// Adds one identifier per enumeration kind member to `dest`.
        ///
        /// # Errors
        /// If `dest` can not reserve room for `ENUM_MEMBER_COUNT` more members, nothing is added then.
        pub fn add_all_members<S: ::kindpack::MemberSink<Self>>(dest: &mut S) -> ::core::result::Result<(), ::kindpack::CapacityError> {
            dest.reserve_members(Self::ENUM_MEMBER_COUNT)?;
            #(
                for member in <#types as ::kindpack::KindEnum>::MEMBERS {
                    dest.push_member(Self::#ctors(*member));
                }
            )*
            ::core::result::Result::Ok(())
        }
    });
    gen
}
