//! Parsing from and formatting to `"<kind><separator><id>"`.
use proc_macro2::TokenStream;
use quote::quote;

use super::{quotes::GeneratedFunctions, Names};
use crate::solved::{
    capability::{FormatStrategy, ParseStrategy},
    Solved, SolvedKind,
};

/// Expression turning `id_text` into `Option<payload>`.
fn parse_expr(kind: &SolvedKind) -> TokenStream {
    let ty = &kind.kind.payload;
    let caps = &kind.capabilities;
    match &caps.parse {
        ParseStrategy::ParseId => quote! { <#ty as ::kindpack::ParseId>::parse_id(id_text, options) },
        ParseStrategy::FromStr => quote! { <#ty as ::core::str::FromStr>::from_str(id_text).ok() },
        ParseStrategy::EnumName => quote! { <#ty as ::kindpack::KindEnum>::from_name(id_text, options) },
        ParseStrategy::Nested => quote! { <#ty as ::kindpack::PackedId>::try_parse_with(id_text, options) },
        ParseStrategy::Seam(path) if caps.nullable => quote! {
            if ::kindpack::text::names_match(::kindpack::text::NULL_TEXT, id_text, options.ignore_case) {
                ::core::option::Option::Some(::core::option::Option::None)
            } else {
                #path(id_text, options).map(::core::option::Option::Some)
            }
        },
        ParseStrategy::Seam(path) => quote! { #path(id_text, options) },
    }
}

/// Statement writing `value` to `out`, evaluating to `fmt::Result`.
fn format_expr(kind: &SolvedKind, display: bool) -> TokenStream {
    let ty = &kind.kind.payload;
    let caps = &kind.capabilities;
    match &caps.format {
        FormatStrategy::FormatId if display => {
            quote! { ::kindpack::FormatId::write_display_id(&value, out) }
        }
        FormatStrategy::FormatId => quote! { ::kindpack::FormatId::write_id(&value, out) },
        FormatStrategy::Display => quote! { ::core::write!(out, "{}", value) },
        FormatStrategy::EnumName if display => {
            quote! { out.write_str(<#ty as ::kindpack::KindEnum>::display_name(value)) }
        }
        FormatStrategy::EnumName => quote! { out.write_str(<#ty as ::kindpack::KindEnum>::name(value)) },
        FormatStrategy::Nested if display => {
            quote! { <#ty as ::kindpack::PackedId>::write_display_text(&value, out) }
        }
        FormatStrategy::Nested => quote! { <#ty as ::kindpack::PackedId>::write_text(&value, out) },
        FormatStrategy::Seam(path) if caps.nullable => quote! {
            match value {
                ::core::option::Option::Some(inner) => #path(&inner, out),
                ::core::option::Option::None => out.write_str(::kindpack::text::NULL_TEXT),
            }
        },
        FormatStrategy::Seam(path) => quote! { #path(&value, out) },
    }
}

pub fn generate(solved: &Solved, names: &Names) -> GeneratedFunctions {
    let mut gen = GeneratedFunctions::default();
    gen.append_id_fns(&parse_fns(solved, names));
    gen.append_id_fns(&format_fn(solved, names, false));
    gen.append_id_fns(&format_fn(solved, names, true));
    gen.append_id_fns(&text_fns());
    let id = &names.id;
    let id_text = id.to_string();
    gen.append_items(&quote! {
        impl ::core::fmt::Display for #id {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                #id::write_text(self, f)
            }
        }

        impl ::core::fmt::Debug for #id {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                if f.alternate() {
                    f.debug_struct(#id_text)
                        .field(Self::KIND_LABEL, &self.kind())
                        .field(Self::PAYLOAD_LABEL, &self.payload_bits())
                        .finish()
                } else {
                    f.write_str(#id_text)?;
                    f.write_str("(")?;
                    #id::write_text(self, f)?;
                    f.write_str(")")
                }
            }
        }

        impl ::core::str::FromStr for #id {
            type Err = ::kindpack::ParseIdError;
            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse_text(s, ::kindpack::ParseOptions::DEFAULT)
            }
        }
    });
    gen
}

fn parse_fns(solved: &Solved, names: &Names) -> TokenStream {
    let kind = &names.kind;
    let common = quote! {
        /// Parses identifier text. Failure is never an error, just `None`.
        pub fn try_parse(text: &str) -> ::core::option::Option<Self> {
            Self::parse_text(text, ::kindpack::ParseOptions::DEFAULT).ok()
        }

        pub fn try_parse_with(text: &str, options: ::kindpack::ParseOptions) -> ::core::option::Option<Self> {
            Self::parse_text(text, options).ok()
        }

        /// Parses an identifier from separate kind and id text.
        pub fn try_from_parts(kind_text: &str, id_text: &str) -> ::core::option::Option<Self> {
            Self::try_from_parts_with(kind_text, id_text, ::kindpack::ParseOptions::DEFAULT)
        }

        /// Parses the id text of an already known kind.
        pub fn try_parse_kind(kind: #kind, id_text: &str) -> ::core::option::Option<Self> {
            Self::try_parse_kind_with(kind, id_text, ::kindpack::ParseOptions::DEFAULT)
        }
    };
    if solved.kinds.is_empty() {
        return quote! {
            #common

            /// Parses the decimal payload text.
            ///
            /// # Errors
            /// If `text` is empty, not a number or does not fit.
            pub fn parse_text(text: &str, options: ::kindpack::ParseOptions) -> ::core::result::Result<Self, ::kindpack::ParseIdError> {
                let _ = options;
                if text.is_empty() {
                    return ::core::result::Result::Err(::kindpack::ParseIdError::EmptyId);
                }
                let value: u128 = text.parse().map_err(|_| ::kindpack::ParseIdError::InvalidId)?;
                if value > Self::PAYLOAD_MASK as u128 {
                    return ::core::result::Result::Err(::kindpack::ParseIdError::InvalidId);
                }
                ::core::result::Result::Ok(Self::pack(value))
            }

            pub fn try_from_parts_with(kind_text: &str, id_text: &str, options: ::kindpack::ParseOptions) -> ::core::option::Option<Self> {
                let _ = (kind_text, id_text, options);
                ::core::option::Option::None
            }

            pub fn try_parse_kind_with(kind: #kind, id_text: &str, options: ::kindpack::ParseOptions) -> ::core::option::Option<Self> {
                let _ = (id_text, options);
                match kind {}
            }
        };
    }

    let arms = solved.kinds.iter().map(|k| {
        let ident = k.ident();
        let ty = &k.kind.payload;
        let ctor = k.constructor();
        let expr = parse_expr(k);
        quote! {
            #kind::#ident => {
                let value: ::core::option::Option<#ty> = #expr;
                value.map(Self::#ctor)
            }
        }
    });
    let parse_text = match solved.degenerate_kind() {
        Some(only) => {
            let ident = only.ident();
            quote! {
                /// Parses the id text of the only kind, there is no kind prefix.
                ///
                /// # Errors
                /// If `text` is empty or not a valid payload.
                pub fn parse_text(text: &str, options: ::kindpack::ParseOptions) -> ::core::result::Result<Self, ::kindpack::ParseIdError> {
                    if text.is_empty() {
                        return ::core::result::Result::Err(::kindpack::ParseIdError::EmptyId);
                    }
                    Self::try_parse_kind_with(#kind::#ident, text, options)
                        .ok_or(::kindpack::ParseIdError::InvalidId)
                }
            }
        }
        None => quote! {
            /// Parses `"<kind><separator><id>"`, reporting why text was rejected.
            ///
            /// # Errors
            /// If the separator is missing, either side is empty, the kind is unknown, or the kind's payload
            /// rejects the id text.
            pub fn parse_text(text: &str, options: ::kindpack::ParseOptions) -> ::core::result::Result<Self, ::kindpack::ParseIdError> {
                let (kind_text, id_text) = ::kindpack::text::split_id(text, Self::SEPARATOR)?;
                let kind = #kind::try_parse_with(kind_text, options)
                    .ok_or(::kindpack::ParseIdError::UnknownKind)?;
                Self::try_parse_kind_with(kind, id_text, options)
                    .ok_or(::kindpack::ParseIdError::InvalidId)
            }
        },
    };
    quote! {
        #common
        #parse_text

        pub fn try_from_parts_with(kind_text: &str, id_text: &str, options: ::kindpack::ParseOptions) -> ::core::option::Option<Self> {
            let kind = #kind::try_parse_with(kind_text, options)?;
            Self::try_parse_kind_with(kind, id_text, options)
        }

        #[allow(unused_variables)]
        pub fn try_parse_kind_with(kind: #kind, id_text: &str, options: ::kindpack::ParseOptions) -> ::core::option::Option<Self> {
            if id_text.is_empty() {
                return ::core::option::Option::None;
            }
            match kind {
                #(#arms)*
            }
        }
    }
}

fn format_fn(solved: &Solved, names: &Names, display: bool) -> TokenStream {
    let kind = &names.kind;
    let (fn_name, doc) = if display {
        (
            quote! { write_display_text },
            "Writes the display form, display names replace kind names.",
        )
    } else {
        (
            quote! { write_text },
            "Writes `\"<kind><separator><id>\"`, the text `try_parse` reads back.",
        )
    };
    let body = if solved.kinds.is_empty() {
        quote! { ::core::write!(out, "{}", self.payload_bits()) }
    } else if let Some(only) = solved.degenerate_kind() {
        let ty = &only.kind.payload;
        let mask = only.mask();
        let value = format_expr(only, display);
        quote! {
            let value = <#ty as ::kindpack::Payload>::from_bits(self.payload_bits() & #mask);
            #value
        }
    } else {
        let arms = solved.kinds.iter().map(|k| {
            let ident = k.ident();
            let ty = &k.kind.payload;
            let mask = k.mask();
            let label = if display {
                k.kind.display_text()
            } else {
                k.kind.name_text()
            };
            let value = format_expr(k, display);
            quote! {
                ::core::option::Option::Some(#kind::#ident) => {
                    out.write_str(#label)?;
                    out.write_char(Self::SEPARATOR)?;
                    let value = <#ty as ::kindpack::Payload>::from_bits(bits & #mask);
                    #value
                }
            }
        });
        quote! {
            let bits = self.payload_bits();
            match self.kind() {
                #(#arms)*
                ::core::option::Option::None => ::core::write!(out, "{}{}{}", self.discriminant(), Self::SEPARATOR, self.payload_bits()),
            }
        }
    };
    quote! {
        #[doc = #doc]
        ///
        /// # Errors
        /// When `out` fails.
        pub fn #fn_name<W: ::core::fmt::Write>(&self, out: &mut W) -> ::core::fmt::Result {
            #body
        }
    }
}

/// Text conversions that work without `PackedId` in scope.
fn text_fns() -> TokenStream {
    quote! {
        ::kindpack::__with_std! {
            /// The display form, with display names substituted where they exist.
            pub fn to_display_string(&self) -> ::kindpack::__private::String {
                <Self as ::kindpack::PackedId>::to_display_string(self)
            }
        }

        /// Formats the identifier into a stack buffer.
        ///
        /// # Errors
        /// If the text does not fit in `N` bytes.
        pub fn to_fixed_string<const N: usize>(
            &self,
        ) -> ::core::result::Result<::kindpack::FixedString<N>, ::kindpack::CapacityError> {
            <Self as ::kindpack::PackedId>::to_fixed_string(self)
        }

        /// Same as `to_fixed_string` for the display form.
        ///
        /// # Errors
        /// If the text does not fit in `N` bytes.
        pub fn to_display_fixed_string<const N: usize>(
            &self,
        ) -> ::core::result::Result<::kindpack::FixedString<N>, ::kindpack::CapacityError> {
            <Self as ::kindpack::PackedId>::to_display_fixed_string(self)
        }
    }
}
