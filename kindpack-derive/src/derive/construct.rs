//! Constants, constructors, accessors and byte conversion.
use proc_macro2::{Literal, TokenStream};
use quote::quote;

use super::{quotes::GeneratedFunctions, Names};
use crate::{
    build::kind::PayloadShape,
    solved::{Solved, SolvedKind},
};

pub fn generate(solved: &Solved, names: &Names) -> GeneratedFunctions {
    let mut gen = GeneratedFunctions::default();
    gen.append_id_fns(&constants(solved, names));
    gen.append_id_fns(&bytes(solved, names));
    match solved.layout.discriminant {
        Some(field) => {
            let shift = field.shift();
            let Names {
                kind, discriminant, raw, ..
            } = names;
            gen.append_id_fns(&quote! {
                const DISCRIMINANT_SHIFT: u32 = #shift;

                /// Builds an identifier from a raw word. Bits outside the payload of the word's kind are
                /// cleared, so equal text always means an equal word.
                pub const fn from_raw(raw: #raw) -> Self {
                    let id = Self { raw };
                    let bits = (raw & Self::PAYLOAD_MASK) as u128;
                    match id.kind() {
                        ::core::option::Option::Some(kind) => Self::pack(id.discriminant(), bits & Self::kind_mask(kind)),
                        ::core::option::Option::None => Self::pack(id.discriminant(), bits),
                    }
                }

                /// The discriminant field. Values past the last kind are possible with [`Self::from_raw`].
                pub const fn discriminant(self) -> #discriminant {
                    (self.raw >> Self::DISCRIMINANT_SHIFT) as #discriminant
                }

                /// `None` when the discriminant does not belong to a kind.
                pub const fn kind(self) -> ::core::option::Option<#kind> {
                    #kind::from_discriminant(self.discriminant())
                }

                const fn pack(discriminant: #discriminant, bits: u128) -> Self {
                    Self {
                        raw: ((discriminant as #raw) << Self::DISCRIMINANT_SHIFT) | ((bits as #raw) & Self::PAYLOAD_MASK),
                    }
                }

                /// Builds an identifier from a kind and raw payload bits. Bits that do not fit the kind's
                /// payload are dropped.
                pub const fn new(kind: #kind, payload: u64) -> Self {
                    Self::pack(kind.discriminant(), (payload as u128) & Self::kind_mask(kind))
                }

                /// Like [`Self::new`], narrowing a signed payload to the kind's payload size.
                pub const fn from_signed(kind: #kind, payload: i64) -> Self {
                    Self::new(kind, payload as u64)
                }
            });
            gen.append_id_fns(&kind_masks(solved, names));
        }
        None => {
            let Names { kind, raw, .. } = names;
            let kind_result = match solved.degenerate_kind() {
                Some(only) => {
                    let ident = only.ident();
                    quote! { ::core::option::Option::Some(#kind::#ident) }
                }
                None => quote! { ::core::option::Option::None },
            };
            let value_mask = match solved.degenerate_kind() {
                Some(only) => only.mask(),
                None => Literal::u128_unsuffixed(solved.layout.payload_mask()),
            };
            gen.append_id_fns(&quote! {
                /// Always 0, this identifier has no discriminant field.
                pub const fn discriminant(self) -> u8 {
                    0
                }

                pub const fn kind(self) -> ::core::option::Option<#kind> {
                    #kind_result
                }

                /// Builds an identifier from a raw word, clearing bits the payload does not use.
                pub const fn from_raw(raw: #raw) -> Self {
                    Self::pack((raw as u128) & #value_mask)
                }

                const fn pack(bits: u128) -> Self {
                    Self {
                        raw: (bits as #raw) & Self::PAYLOAD_MASK,
                    }
                }

                /// Builds an identifier from raw payload bits. Bits that do not fit are dropped.
                pub const fn new(payload: u64) -> Self {
                    Self::pack((payload as u128) & #value_mask)
                }

                pub const fn from_signed(payload: i64) -> Self {
                    Self::new(payload as u64)
                }
            });
        }
    }
    gen.append_id_fns(&payload_signed(solved, names));
    for kind in &solved.kinds {
        gen.merge(&per_kind(solved, names, kind));
    }
    gen
}

fn constants(solved: &Solved, names: &Names) -> TokenStream {
    let raw = &names.raw;
    let layout = solved.layout_tokens();
    let separator = solved.settings.separator;
    let kind_label = &solved.settings.kind_label;
    let payload_label = &solved.settings.payload_label;
    let min_capacity = solved.min_text_capacity();
    let payload_mask = Literal::u128_unsuffixed(solved.layout.payload_mask());
    quote! {
        pub const LAYOUT: ::kindpack::RawLayout = #layout;
        pub const SEPARATOR: char = #separator;
        pub const KIND_LABEL: &'static str = #kind_label;
        pub const PAYLOAD_LABEL: &'static str = #payload_label;
        /// Smallest buffer that can hold the text of this identifier.
        pub const MIN_TEXT_CAPACITY: usize = #min_capacity;
        const PAYLOAD_MASK: #raw = #payload_mask;

        pub const fn raw(self) -> #raw {
            self.raw
        }

        /// The payload region of the word, zero extended.
        pub const fn payload_bits(self) -> u128 {
            (self.raw & Self::PAYLOAD_MASK) as u128
        }
    }
}

fn bytes(solved: &Solved, names: &Names) -> TokenStream {
    let raw = &names.raw;
    let total = solved.layout.total_width;
    let raw_bytes = solved.layout.raw.bytes();
    if total == raw_bytes {
        quote! {
            /// Little endian bytes of the word.
            pub const fn to_bytes(self) -> [u8; #total] {
                self.raw.to_le_bytes()
            }

            pub const fn from_bytes(bytes: [u8; #total]) -> Self {
                Self::from_raw(<#raw>::from_le_bytes(bytes))
            }
        }
    } else {
        quote! {
            /// Little endian bytes of the word, only the identifier's width is kept.
            pub fn to_bytes(self) -> [u8; #total] {
                let full = self.raw.to_le_bytes();
                let mut out = [0u8; #total];
                out.copy_from_slice(&full[..#total]);
                out
            }

            pub fn from_bytes(bytes: [u8; #total]) -> Self {
                let mut full = [0u8; #raw_bytes];
                full[..#total].copy_from_slice(&bytes);
                Self::from_raw(<#raw>::from_le_bytes(full))
            }
        }
    }
}

fn kind_masks(solved: &Solved, names: &Names) -> TokenStream {
    let kind = &names.kind;
    let arms = solved.kinds.iter().map(|k| {
        let ident = k.ident();
        let mask = k.mask();
        quote! { #kind::#ident => #mask, }
    });
    quote! {
        const fn kind_mask(kind: #kind) -> u128 {
            match kind {
                #(#arms)*
            }
        }
    }
}

fn signed_value(kind: &SolvedKind) -> TokenStream {
    let mask = kind.mask();
    let size = kind.overlay.size;
    let ty = &kind.kind.payload;
    let nullable = kind.kind.shape.is_nullable();
    if kind.kind.signed && !nullable {
        quote! { ::kindpack::bits::sign_extend(bits & #mask, #size) }
    } else if matches!(kind.kind.shape, PayloadShape::Named) {
        quote! {
            if <#ty as ::kindpack::Payload>::SIGNED {
                ::kindpack::bits::sign_extend(bits & #mask, #size)
            } else {
                (bits & #mask) as u64 as i64
            }
        }
    } else {
        quote! { (bits & #mask) as u64 as i64 }
    }
}

fn payload_signed(solved: &Solved, names: &Names) -> TokenStream {
    let kind = &names.kind;
    if solved.kinds.is_empty() {
        return quote! {
            /// The payload as a signed value.
            pub const fn payload_signed(self) -> i64 {
                self.payload_bits() as i64
            }
        };
    }
    let arms = solved.kinds.iter().map(|k| {
        let ident = k.ident();
        let value = signed_value(k);
        quote! { ::core::option::Option::Some(#kind::#ident) => #value, }
    });
    quote! {
        /// The payload as a signed value, sign extended when the kind's payload is signed.
        pub fn payload_signed(self) -> i64 {
            let bits = self.payload_bits();
            match self.kind() {
                #(#arms)*
                ::core::option::Option::None => self.payload_bits() as i64,
            }
        }
    }
}

fn per_kind(solved: &Solved, names: &Names, kind: &SolvedKind) -> GeneratedFunctions {
    let id = &names.id;
    let ty = &kind.kind.payload;
    let ctor = kind.constructor();
    let is = kind.checker();
    let as_fn = kind.accessor();
    let mask = kind.mask();
    let name = kind.kind.name_text();
    let ctor_doc = format!("Builds a `{name}` identifier.");
    let (pack, check) = if solved.layout.discriminant.is_some() {
        let disc = kind.discriminant_lit();
        (
            quote! { Self::pack(#disc, ::kindpack::Payload::into_bits(value) & #mask) },
            quote! { self.discriminant() == #disc },
        )
    } else {
        (
            quote! { Self::pack(::kindpack::Payload::into_bits(value) & #mask) },
            quote! { true },
        )
    };
    let mut gen = GeneratedFunctions::default();
    gen.append_id_fns(&quote! {
        #[doc = #ctor_doc]
        pub fn #ctor(value: #ty) -> Self {
            #pack
        }

        pub const fn #is(self) -> bool {
            #check
        }

        pub fn #as_fn(self) -> ::core::option::Option<#ty> {
            if self.#is() {
                ::core::option::Option::Some(<#ty as ::kindpack::Payload>::from_bits(self.payload_bits() & #mask))
            } else {
                ::core::option::Option::None
            }
        }
    });
    gen.append_items(&quote! {
        impl ::core::convert::From<#ty> for #id {
            fn from(value: #ty) -> Self {
                Self::#ctor(value)
            }
        }
    });
    gen
}
