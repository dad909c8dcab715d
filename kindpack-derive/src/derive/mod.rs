//! Type emitter: turns a solved identifier into Rust items.
mod construct;
mod eq;
mod kind_enum;
mod members;
mod mirror;
pub mod quotes;
mod text;

use std::env::current_dir;

use convert_case::{Case, Casing};
use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::Ident;

use crate::solved::{Solved, SolvedKind};
use quotes::GeneratedFunctions;

/// Names and types shared by every emitted piece.
pub struct Names {
    pub id: Ident,
    pub kind: Ident,
    pub mirror: Ident,
    pub raw: TokenStream,
    pub discriminant: TokenStream,
}

impl Names {
    fn new(solved: &Solved) -> Self {
        Self {
            id: solved.name.clone(),
            kind: format_ident!("{}Kind", solved.name),
            mirror: format_ident!("{}Serializable", solved.name),
            raw: solved.layout.raw.tokens(),
            discriminant: solved.layout.discriminant_tokens(),
        }
    }
}

impl SolvedKind {
    pub fn ident(&self) -> &Ident {
        &self.kind.name
    }

    fn snake(&self) -> String {
        self.kind.name_text().to_case(Case::Snake)
    }

    /// `new_<kind>`, builds the identifier from the kind's payload.
    pub fn constructor(&self) -> Ident {
        format_ident!("new_{}", self.snake(), span = self.kind.span())
    }

    pub fn checker(&self) -> Ident {
        format_ident!("is_{}", self.snake(), span = self.kind.span())
    }

    pub fn accessor(&self) -> Ident {
        format_ident!("as_{}", self.snake(), span = self.kind.span())
    }

    pub fn mask(&self) -> Literal {
        Literal::u128_unsuffixed(self.overlay.mask)
    }

    pub fn discriminant_lit(&self) -> Literal {
        Literal::u64_unsuffixed(self.discriminant)
    }
}

impl Solved {
    pub fn gen(&self) -> syn::Result<TokenStream> {
        let names = Names::new(self);
        let mut gen = GeneratedFunctions::default();
        gen.merge(&construct::generate(self, &names));
        gen.merge(&kind_enum::generate(self, &names));
        gen.merge(&text::generate(self, &names));
        gen.merge(&eq::generate(self, &names));
        gen.merge(&members::generate(self, &names));
        gen.merge(&mirror::generate(self, &names));
        gen.append_items(&self.trait_impls(&names));
        gen.append_items(&self.size_checks());
        gen.append_items(&self.diagnostics.to_token_stream());

        let id = &names.id;
        let raw = &names.raw;
        let vis = &self.vis.0;
        let docs = &self.docs;
        let fns = gen.finish(id);
        let output = quote! {
            #(#docs)*
            #[repr(transparent)]
            #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
            #vis struct #id {
                raw: #raw,
            }
            #fns
        };
        if self.settings.dump {
            let name = self.name.to_string().to_case(Case::Snake);
            match current_dir() {
                Ok(mut file_name) => {
                    file_name.push("target/kindpack_debug");
                    let _ = std::fs::create_dir_all(&file_name);
                    file_name.push(format!("{name}_code_gen.rs"));
                    let _ = std::fs::write(file_name, output.to_string());
                }
                Err(err) => {
                    return Err(syn::Error::new(self.name.span(), format!("Failed to dump code gen because target folder could not be located. remove `dump` from packed_id attributes. [{err}]")));
                }
            }
        }
        Ok(output)
    }

    /// `kindpack::RawLayout` literal.
    pub fn layout_tokens(&self) -> TokenStream {
        let total = self.layout.total_width;
        let payload = self.layout.payload_width;
        let discriminant = self.layout.discriminant_width();
        let offset = self.layout.discriminant_offset();
        let has = self.layout.discriminant.is_some();
        quote! {
            ::kindpack::RawLayout {
                total_width_bytes: #total,
                payload_width_bytes: #payload,
                discriminant_width_bytes: #discriminant,
                discriminant_byte_offset: #offset,
                has_discriminant: #has,
            }
        }
    }

    pub fn min_text_capacity(&self) -> usize {
        if self.layout.discriminant.is_some() {
            self.longest_name() + self.settings.separator.len_utf8() + 1
        } else {
            1
        }
    }

    /// Payload types whose size was declared get a compile time check against their `Payload` impl.
    fn size_checks(&self) -> TokenStream {
        let mut out = TokenStream::new();
        for kind in &self.kinds {
            if let Some(size) = kind.kind.declared_size {
                let ty = &kind.kind.payload;
                let message = format!(
                    "declared size of kind `{}` does not match its `Payload::SIZE`",
                    kind.kind.variant
                );
                out.extend(quote! {
                    const _: () = ::core::assert!(
                        <#ty as ::kindpack::Payload>::SIZE == #size,
                        #message
                    );
                });
            }
        }
        out
    }

    fn trait_impls(&self, names: &Names) -> TokenStream {
        let Names { id, kind, raw, .. } = names;
        let layout = self.layout_tokens();
        let separator = self.settings.separator;
        let kind_label = &self.settings.kind_label;
        let payload_label = &self.settings.payload_label;
        let min_capacity = self.min_text_capacity();
        let total = self.layout.total_width;
        quote! {
            impl ::kindpack::PackedId for #id {
                type Raw = #raw;
                type Kind = #kind;
                const LAYOUT: ::kindpack::RawLayout = #layout;
                const SEPARATOR: char = #separator;
                const KIND_LABEL: &'static str = #kind_label;
                const PAYLOAD_LABEL: &'static str = #payload_label;
                const MIN_TEXT_CAPACITY: usize = #min_capacity;
                fn from_raw(raw: #raw) -> Self {
                    #id::from_raw(raw)
                }
                fn raw(self) -> #raw {
                    self.raw
                }
                fn kind(self) -> ::core::option::Option<#kind> {
                    #id::kind(self)
                }
                fn try_parse_with(text: &str, options: ::kindpack::ParseOptions) -> ::core::option::Option<Self> {
                    #id::parse_text(text, options).ok()
                }
                fn write_text<W: ::core::fmt::Write>(&self, out: &mut W) -> ::core::fmt::Result {
                    #id::write_text(self, out)
                }
                fn write_display_text<W: ::core::fmt::Write>(&self, out: &mut W) -> ::core::fmt::Result {
                    #id::write_display_text(self, out)
                }
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_lossless, clippy::unnecessary_cast)]
            impl ::kindpack::Payload for #id {
                const SIZE: usize = #total;
                fn into_bits(self) -> u128 {
                    self.raw as u128
                }
                fn from_bits(bits: u128) -> Self {
                    #id::from_raw(bits as #raw)
                }
            }
            impl ::kindpack::ParseId for #id {
                fn parse_id(text: &str, options: ::kindpack::ParseOptions) -> ::core::option::Option<Self> {
                    #id::parse_text(text, options).ok()
                }
            }
            impl ::kindpack::FormatId for #id {
                fn write_id<W: ::core::fmt::Write>(&self, out: &mut W) -> ::core::fmt::Result {
                    #id::write_text(self, out)
                }
                fn write_display_id<W: ::core::fmt::Write>(&self, out: &mut W) -> ::core::fmt::Result {
                    #id::write_display_text(self, out)
                }
            }
        }
    }
}
