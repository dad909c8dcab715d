//! `#[derive(KindEnum)]`: member names and packing for fieldless enums.
use darling::FromVariant;
use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::{spanned::Spanned, Data, DeriveInput, Error, Expr, Ident, Lit, UnOp};

#[derive(Debug, FromVariant)]
#[darling(attributes(kind))]
pub struct MemberDarling {
    pub ident: Ident,
    pub display: Option<String>,
}

/// Integer types an enum can be `repr`ed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repr {
    pub bytes: usize,
    pub signed: bool,
}

impl Repr {
    fn from_ident(ident: &Ident) -> Option<Self> {
        let (bytes, signed) = match ident.to_string().as_str() {
            "u8" => (1, false),
            "u16" => (2, false),
            "u32" => (4, false),
            "u64" => (8, false),
            "u128" => (16, false),
            "i8" => (1, true),
            "i16" => (2, true),
            "i32" => (4, true),
            "i64" => (8, true),
            "i128" => (16, true),
            _ => return None,
        };
        Some(Self { bytes, signed })
    }

    /// Smallest repr holding every value.
    fn fitting(values: &[i128]) -> Self {
        let min = values.iter().copied().min().unwrap_or(0);
        let max = values.iter().copied().max().unwrap_or(0);
        let signed = min < 0;
        let bytes = [1usize, 2, 4, 8, 16]
            .into_iter()
            .find(|bytes| {
                let bits = bytes * 8;
                if signed {
                    let half = 1i128 << (bits - 1).min(126);
                    min >= -half && max < half
                } else {
                    bits >= 128 || max < (1i128 << bits)
                }
            })
            .unwrap_or(16);
        Self { bytes, signed }
    }

    /// Two's complement bits of `value` truncated to this repr.
    fn bits(self, value: i128) -> u128 {
        let bits = value as u128;
        if self.bytes >= 16 {
            bits
        } else {
            bits & ((1u128 << (self.bytes * 8)) - 1)
        }
    }
}

pub struct Member {
    pub ident: Ident,
    pub name: String,
    pub display: String,
    pub value: i128,
}

pub struct KindEnumInfo {
    pub name: Ident,
    pub repr: Repr,
    pub members: Vec<Member>,
}

impl KindEnumInfo {
    fn parse_lit_discriminant_expr(input: &Expr) -> syn::Result<i128> {
        match input {
            Expr::Lit(ref lit) => match lit.lit {
                Lit::Int(ref i) => Ok(i.base10_parse()?),
                _ => Err(Error::new(
                    input.span(),
                    "non-integer literals for custom discriminant are illegal.",
                )),
            },
            Expr::Unary(ref unary) if matches!(unary.op, UnOp::Neg(_)) => {
                Ok(-Self::parse_lit_discriminant_expr(&unary.expr)?)
            }
            Expr::Group(ref group) => Self::parse_lit_discriminant_expr(&group.expr),
            _ => Err(Error::new(
                input.span(),
                "non-literal expressions for custom discriminant are illegal.",
            )),
        }
    }

    fn parse_repr(input: &DeriveInput) -> syn::Result<Option<Repr>> {
        let mut repr = None;
        for attr in input.attrs.iter().filter(|a| a.path().is_ident("repr")) {
            attr.parse_nested_meta(|meta| {
                if let Some(ident) = meta.path.get_ident() {
                    if let Some(found) = Repr::from_ident(ident) {
                        repr = Some(found);
                    }
                }
                Ok(())
            })?;
        }
        Ok(repr)
    }

    pub fn parse(input: &DeriveInput) -> syn::Result<Self> {
        let Data::Enum(ref data) = input.data else {
            return Err(Error::new(
                input.ident.span(),
                "KindEnum can only be derived for fieldless enums",
            ));
        };
        if data.variants.is_empty() {
            return Err(Error::new(
                input.ident.span(),
                "KindEnum needs at least one member",
            ));
        }
        let mut members = Vec::with_capacity(data.variants.len());
        let mut next = 0i128;
        for variant in &data.variants {
            if !matches!(variant.fields, syn::Fields::Unit) {
                return Err(Error::new(
                    variant.span(),
                    "KindEnum members can not hold fields",
                ));
            }
            let value = if let Some((_, ref expr)) = variant.discriminant {
                Self::parse_lit_discriminant_expr(expr)?
            } else {
                next
            };
            next = value.wrapping_add(1);
            let darling = MemberDarling::from_variant(variant)?;
            let name = darling.ident.to_string();
            members.push(Member {
                display: darling.display.unwrap_or_else(|| name.clone()),
                name,
                ident: darling.ident,
                value,
            });
        }
        let values: Vec<i128> = members.iter().map(|m| m.value).collect();
        let repr = match Self::parse_repr(input)? {
            Some(repr) => repr,
            None => Repr::fitting(&values),
        };
        Ok(Self {
            name: input.ident.clone(),
            repr,
            members,
        })
    }

    pub fn gen(&self) -> TokenStream {
        let name = &self.name;
        let idents: Vec<_> = self.members.iter().map(|m| &m.ident).collect();
        let names: Vec<_> = self.members.iter().map(|m| &m.name).collect();
        let displays: Vec<_> = self.members.iter().map(|m| &m.display).collect();
        let indices = 0..self.members.len();
        let bits: Vec<_> = self
            .members
            .iter()
            .map(|m| Literal::u128_unsuffixed(self.repr.bits(m.value)))
            .collect();
        let size = self.repr.bytes;
        let signed = self.repr.signed;
        let first = &self.members[0].ident;
        let mask = Literal::u128_unsuffixed(if size >= 16 {
            u128::MAX
        } else {
            (1u128 << (size * 8)) - 1
        });
        quote! {
            impl ::kindpack::KindEnum for #name {
                const MEMBERS: &'static [Self] = &[#(Self::#idents),*];
                const NAMES: &'static [&'static str] = &[#(#names),*];
                const DISPLAY_NAMES: &'static [&'static str] = &[#(#displays),*];
                fn index(self) -> usize {
                    match self {
                        #(Self::#idents => #indices,)*
                    }
                }
            }

            impl ::kindpack::Payload for #name {
                const SIZE: usize = #size;
                const SIGNED: bool = #signed;
                fn into_bits(self) -> u128 {
                    match self {
                        #(Self::#idents => #bits,)*
                    }
                }
                /// Bits that match no member read as the first member.
                #[allow(unreachable_patterns)]
                fn from_bits(bits: u128) -> Self {
                    match bits & #mask {
                        #(#bits => Self::#idents,)*
                        _ => Self::#first,
                    }
                }
            }
        }
    }
}
