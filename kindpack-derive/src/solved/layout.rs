//! Concrete byte layout of the raw word.
use proc_macro2::TokenStream;
use quote::quote;

use super::{width::WidthPlan, SolvingError};
use crate::build::kind::KindVariant;

/// The unsigned integer backing an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawType {
    U16,
    U32,
    U64,
    U128,
}

impl RawType {
    pub fn for_width(total_width: usize) -> Result<Self, SolvingError> {
        match total_width {
            2 => Ok(Self::U16),
            4 => Ok(Self::U32),
            8 => Ok(Self::U64),
            12 | 16 => Ok(Self::U128),
            other => Err(SolvingError::RawWidth(other)),
        }
    }

    /// Size of the integer type, which can exceed the identifier's width.
    pub fn bytes(self) -> usize {
        match self {
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
            Self::U128 => 16,
        }
    }

    pub fn tokens(self) -> TokenStream {
        match self {
            Self::U16 => quote! {u16},
            Self::U32 => quote! {u32},
            Self::U64 => quote! {u64},
            Self::U128 => quote! {u128},
        }
    }
}

/// The discriminant field, always the top bytes of the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscriminantField {
    pub offset: usize,
    pub width: usize,
}

impl DiscriminantField {
    pub fn shift(&self) -> u32 {
        u32::try_from(self.offset * 8).unwrap_or(0)
    }

    /// Smallest unsigned type holding the field, also the kind enum's repr.
    pub fn tokens(&self) -> TokenStream {
        match self.width {
            1 => quote! {u8},
            2 => quote! {u16},
            _ => quote! {u32},
        }
    }
}

/// A kind's payload viewed at byte 0 of the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadOverlay {
    pub size: usize,
    /// Mask over the payload's natural bytes.
    pub mask: u128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub total_width: usize,
    pub payload_width: usize,
    pub raw: RawType,
    /// `None` when there are no kinds or only one kind with `allow_empty`.
    pub discriminant: Option<DiscriminantField>,
    /// Index aligned with the kinds the layout was built for.
    pub overlays: Vec<PayloadOverlay>,
}

pub fn mask(bytes: usize) -> u128 {
    if bytes >= 16 {
        u128::MAX
    } else {
        (1u128 << (bytes * 8)) - 1
    }
}

impl Layout {
    pub fn build(plan: &WidthPlan, kinds: &[KindVariant]) -> Result<Self, SolvingError> {
        let raw = RawType::for_width(plan.total_width)?;
        let discriminant = if plan.has_discriminant {
            Some(DiscriminantField {
                offset: plan.discriminant_offset(),
                width: plan.discriminant_width,
            })
        } else {
            None
        };
        let payload_limit = discriminant.map_or(plan.total_width, |d| d.offset);
        let mut overlays = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if kind.payload_size > payload_limit {
                return Err(SolvingError::Overlap {
                    kind: kind.name_text(),
                    size: kind.payload_size,
                    offset: payload_limit,
                });
            }
            overlays.push(PayloadOverlay {
                size: kind.payload_size,
                mask: mask(kind.payload_size),
            });
        }
        Ok(Self {
            total_width: plan.total_width,
            payload_width: plan.payload_width,
            raw,
            discriminant,
            overlays,
        })
    }

    /// Mask over the payload region of the word.
    pub fn payload_mask(&self) -> u128 {
        mask(self.payload_width)
    }

    pub fn discriminant_width(&self) -> usize {
        self.discriminant.map_or(self.total_width, |d| d.width)
    }

    pub fn discriminant_offset(&self) -> usize {
        self.discriminant.map_or(0, |d| d.offset)
    }

    /// Kind enum repr. Identifiers without a discriminant field still get a `u8` kind enum.
    pub fn discriminant_tokens(&self) -> TokenStream {
        self.discriminant
            .map_or_else(|| quote! {u8}, |d| d.tokens())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(sizes: &[usize]) -> Vec<KindVariant> {
        sizes
            .iter()
            .enumerate()
            .map(|(position, size)| {
                let name = quote::format_ident!("Kind{}", position);
                KindVariant {
                    name: name.clone(),
                    display_name: None,
                    variant: name,
                    payload: syn::parse_quote!(SomeType),
                    shape: crate::build::kind::PayloadShape::Named,
                    payload_size: *size,
                    declared_size: Some(*size),
                    declared_order: 0,
                    signed: false,
                    hints: crate::build::kind::CapabilityHints::default(),
                    position,
                }
            })
            .collect()
    }

    #[test]
    fn discriminant_in_top_bytes() -> Result<(), SolvingError> {
        let sizes = [2, 4];
        let plan = WidthPlan::solve(&sizes, 0, None, false)?;
        let layout = Layout::build(&plan, &kinds(&sizes))?;
        assert_eq!(layout.raw, RawType::U64);
        assert_eq!(
            layout.discriminant,
            Some(DiscriminantField {
                offset: 7,
                width: 1
            })
        );
        assert_eq!(layout.overlays[0].mask, 0xFFFF);
        assert_eq!(layout.overlays[1].mask, 0xFFFF_FFFF);
        assert_eq!(layout.payload_mask(), 0xFFFF_FFFF);
        Ok(())
    }

    #[test]
    fn twelve_bytes_use_u128() -> Result<(), SolvingError> {
        let sizes = [8];
        let plan = WidthPlan::solve(&sizes, 0, None, false)?;
        let layout = Layout::build(&plan, &kinds(&sizes))?;
        assert_eq!(layout.total_width, 12);
        assert_eq!(layout.raw, RawType::U128);
        assert_eq!(layout.raw.bytes(), 16);
        assert_eq!(layout.discriminant_offset(), 11);
        Ok(())
    }

    #[test]
    fn payload_over_discriminant_rejected() {
        let plan = WidthPlan {
            total_width: 4,
            payload_width: 4,
            discriminant_width: 1,
            has_discriminant: true,
            kept: 1,
        };
        assert!(matches!(
            Layout::build(&plan, &kinds(&[4])),
            Err(SolvingError::Overlap { .. })
        ));
    }

    #[test]
    fn degenerate_has_no_field() -> Result<(), SolvingError> {
        let plan = WidthPlan::solve(&[], 0, None, true)?;
        let layout = Layout::build(&plan, &[])?;
        assert_eq!(layout.discriminant, None);
        assert_eq!(layout.discriminant_width(), 2);
        assert_eq!(layout.discriminant_offset(), 0);
        Ok(())
    }
}
