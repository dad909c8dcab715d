pub mod capability;
pub mod layout;
pub mod width;

use proc_macro2::Span;
use syn::{Attribute, Ident};
use thiserror::Error;

use crate::{
    build::{
        id::{IdBuilder, IdSettings},
        kind::KindVariant,
        Visibility,
    },
    diagnostics::Diagnostics,
};
use capability::Capabilities;
use layout::{Layout, PayloadOverlay};
use width::WidthPlan;

#[derive(Debug, Error)]
pub enum SolvingError {
    #[error("no kinds were declared, declare at least one kind or use `allow_empty`")]
    NoKinds,
    #[error("payload too large: the largest payload is {largest} bytes, payloads must stay under 8 bytes when more than one kind shares the identifier, and can never exceed 16 bytes")]
    PayloadTooLarge { largest: usize },
    #[error("no room left for a discriminant: total width is {total} bytes and the payload takes {payload}")]
    NoDiscriminantRoom { total: usize, payload: usize },
    #[error("Kind `{kind}` has a {size} byte payload which overlaps the discriminant starting at byte {offset}")]
    Overlap {
        kind: String,
        size: usize,
        offset: usize,
    },
    #[error("No unsigned integer type is {0} bytes wide")]
    RawWidth(usize),
}

impl From<SolvingError> for syn::Error {
    fn from(value: SolvingError) -> Self {
        syn::Error::new(Span::call_site(), format!("{value}"))
    }
}

/// A kind with everything needed to generate code for it.
#[derive(Debug, Clone)]
pub struct SolvedKind {
    pub kind: KindVariant,
    /// Index in assignment order.
    pub discriminant: u64,
    pub overlay: PayloadOverlay,
    pub capabilities: Capabilities,
}

/// Output of the solving stages, input of the type emitter.
#[derive(Debug)]
pub struct Solved {
    pub name: Ident,
    pub vis: Visibility,
    pub docs: Vec<Attribute>,
    pub settings: IdSettings,
    pub layout: Layout,
    pub kinds: Vec<SolvedKind>,
    pub diagnostics: Diagnostics,
}

impl Solved {
    /// The single kind of an identifier without a discriminant field, if it has one.
    pub fn degenerate_kind(&self) -> Option<&SolvedKind> {
        if self.layout.discriminant.is_some() {
            None
        } else {
            self.kinds.first()
        }
    }

    /// Longest kind name, used for text capacity.
    pub fn longest_name(&self) -> usize {
        self.kinds
            .iter()
            .map(|k| k.kind.name_text().len())
            .max()
            .unwrap_or(0)
    }
}

impl TryFrom<IdBuilder> for Solved {
    type Error = syn::Error;

    fn try_from(value: IdBuilder) -> Result<Self, Self::Error> {
        let IdBuilder {
            name,
            vis,
            docs,
            settings,
            mut kinds,
            mut diagnostics,
        } = value;
        let sizes: Vec<usize> = kinds.iter().map(|k| k.payload_size).collect();
        let max_order = kinds.iter().map(|k| k.declared_order).max().unwrap_or(0);
        let plan = WidthPlan::solve(&sizes, max_order, settings.width, settings.allow_empty)?;
        if plan.kept < kinds.len() {
            for dropped in kinds.split_off(plan.kept) {
                diagnostics.warn(
                    dropped.span(),
                    format!(
                        "kind `{}` was dropped, a {} byte discriminant can only address {} kinds",
                        dropped.variant,
                        plan.discriminant_width,
                        plan.kept
                    ),
                );
            }
        }
        let layout = Layout::build(&plan, &kinds)?;
        let mut solved_kinds = Vec::with_capacity(kinds.len());
        for ((discriminant, kind), overlay) in (0u64..).zip(kinds).zip(layout.overlays.iter()) {
            let capabilities = Capabilities::probe(&kind)?;
            solved_kinds.push(SolvedKind {
                kind,
                discriminant,
                overlay: *overlay,
                capabilities,
            });
        }
        Ok(Self {
            name,
            vis,
            docs,
            settings,
            layout,
            kinds: solved_kinds,
            diagnostics,
        })
    }
}
