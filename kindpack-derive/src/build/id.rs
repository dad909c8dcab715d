use darling::{ast::NestedMeta, FromMeta, FromVariant};
use proc_macro2::{Span, TokenStream};
use syn::{Attribute, Data, DeriveInput, Error, Ident, Type};

use super::{
    kind::{CapabilityHints, KindVariant, PayloadShape},
    EqChoice, FormatChoice, ParseChoice, Separator, Visibility,
};
use crate::diagnostics::Diagnostics;

/// Suffixes removed from kind names when `strip_suffix` is set.
pub const STRIPPED_SUFFIXES: [&str; 2] = ["Kind", "Type"];

/// Total widths a user may ask for.
pub const ALLOWED_WIDTHS: [usize; 5] = [2, 4, 8, 12, 16];

#[derive(Debug, FromMeta)]
pub struct IdDarling {
    pub width: Option<darling::util::SpannedValue<usize>>,
    pub separator: Option<Separator>,
    pub allow_empty: darling::util::Flag,
    pub preserve_order: darling::util::Flag,
    pub strip_suffix: darling::util::Flag,
    pub display_kind: Option<String>,
    pub display_payload: Option<String>,
    pub serde: darling::util::Flag,
    pub dump: darling::util::Flag,
}

#[derive(Debug, FromVariant)]
#[darling(attributes(kind))]
pub struct KindDarling {
    pub ident: Ident,
    pub order: Option<u64>,
    pub display: Option<String>,
    pub signed: darling::util::Flag,
    pub size: Option<darling::util::SpannedValue<usize>>,
    pub enumeration: darling::util::Flag,
    pub nested: darling::util::Flag,
    pub parse: Option<ParseChoice>,
    pub parse_with: Option<syn::Path>,
    pub format: Option<FormatChoice>,
    pub format_with: Option<syn::Path>,
    pub eq: Option<EqChoice>,
    pub eq_with: Option<syn::Path>,
}

/// Identifier wide settings.
#[derive(Debug, Clone)]
pub struct IdSettings {
    /// Minimum total width.
    pub width: Option<usize>,
    pub separator: char,
    pub allow_empty: bool,
    pub preserve_order: bool,
    pub strip_suffix: bool,
    pub kind_label: String,
    pub payload_label: String,
    pub serde: bool,
    pub dump: bool,
}

impl Default for IdSettings {
    fn default() -> Self {
        Self {
            width: None,
            separator: Separator::default().0,
            allow_empty: false,
            preserve_order: false,
            strip_suffix: false,
            kind_label: "Kind".to_string(),
            payload_label: "Id".to_string(),
            serde: false,
            dump: false,
        }
    }
}

impl IdSettings {
    fn from_darling(value: IdDarling) -> syn::Result<Self> {
        let width = if let Some(width) = value.width {
            if !ALLOWED_WIDTHS.contains(&*width) {
                return Err(Error::new(
                    width.span(),
                    format!("width must be one of {ALLOWED_WIDTHS:?} bytes"),
                ));
            }
            Some(*width)
        } else {
            None
        };
        let defaults = Self::default();
        Ok(Self {
            width,
            separator: value.separator.unwrap_or_default().0,
            allow_empty: value.allow_empty.is_present(),
            preserve_order: value.preserve_order.is_present(),
            strip_suffix: value.strip_suffix.is_present(),
            kind_label: value.display_kind.unwrap_or(defaults.kind_label),
            payload_label: value.display_payload.unwrap_or(defaults.payload_label),
            serde: value.serde.is_present(),
            dump: value.dump.is_present(),
        })
    }
}

/// Output of the schema collector: the identifier and its kinds in assignment order.
pub struct IdBuilder {
    pub name: Ident,
    pub vis: Visibility,
    /// Doc attributes carried over to the generated struct.
    pub docs: Vec<Attribute>,
    pub settings: IdSettings,
    /// Kinds sorted into discriminant assignment order. Discriminant = position.
    pub kinds: Vec<KindVariant>,
    pub diagnostics: Diagnostics,
}

impl IdBuilder {
    /// Collects `#[packed_id(<args>)] enum <input>`.
    pub fn parse(args: TokenStream, input: &DeriveInput) -> syn::Result<Self> {
        let metas = NestedMeta::parse_meta_list(args)?;
        let settings = IdSettings::from_darling(IdDarling::from_list(&metas)?)?;
        let Data::Enum(ref data) = input.data else {
            return Err(Error::new(
                Span::call_site(),
                "packed_id can only be used on an enum, each variant holding the payload of one kind",
            ));
        };
        if !input.generics.params.is_empty() {
            return Err(Error::new_spanned(
                &input.generics,
                "packed identifiers can not be generic",
            ));
        }
        let mut diagnostics = Diagnostics::default();
        let mut kinds: Vec<KindVariant> = Vec::with_capacity(data.variants.len());
        for (position, variant) in data.variants.iter().enumerate() {
            if let Some((_, ref expr)) = variant.discriminant {
                return Err(Error::new_spanned(
                    expr,
                    "kinds can not have explicit discriminants, use `#[kind(order = ..)]` to influence ordering",
                ));
            }
            let payload = Self::extract_payload(variant)?;
            if Self::is_self_type(&payload, &input.ident) {
                return Err(Error::new_spanned(
                    &payload,
                    "a kind can not use the identifier being defined as its payload",
                ));
            }
            let darling = KindDarling::from_variant(variant)?;
            let kind = Self::build_kind(darling, payload, position, &settings)?;
            if let Some(existing) = kinds.iter().find(|k| k.payload_key() == kind.payload_key()) {
                diagnostics.warn(
                    kind.span(),
                    format!(
                        "duplicate kind ignored: `{}` uses the same payload type as `{}`",
                        kind.variant, existing.variant
                    ),
                );
                continue;
            }
            if let Some(existing) = kinds.iter().find(|k| k.name == kind.name) {
                diagnostics.warn(
                    kind.span(),
                    format!(
                        "duplicate kind ignored: `{}` has the same kind name as `{}`",
                        kind.variant, existing.variant
                    ),
                );
                continue;
            }
            kinds.push(kind);
        }
        if !settings.preserve_order {
            arrange(&mut kinds);
        }
        Ok(Self {
            name: input.ident.clone(),
            vis: Visibility(input.vis.clone()),
            docs: input
                .attrs
                .iter()
                .filter(|attr| attr.path().is_ident("doc"))
                .cloned()
                .collect(),
            settings,
            kinds,
            diagnostics,
        })
    }

    fn extract_payload(variant: &syn::Variant) -> syn::Result<Type> {
        match variant.fields {
            syn::Fields::Unnamed(ref fields) if fields.unnamed.len() == 1 => {
                Ok(fields.unnamed[0].ty.clone())
            }
            _ => Err(Error::new_spanned(
                &variant.ident,
                "each kind must be a tuple variant holding exactly one payload type, `Name(Payload)`",
            )),
        }
    }

    fn is_self_type(ty: &Type, name: &Ident) -> bool {
        match ty {
            Type::Path(path) => path.qself.is_none() && (path.path.is_ident(name) || path.path.is_ident("Self")),
            Type::Paren(inner) => Self::is_self_type(&inner.elem, name),
            Type::Group(inner) => Self::is_self_type(&inner.elem, name),
            _ => false,
        }
    }

    fn build_kind(
        darling: KindDarling,
        payload: Type,
        position: usize,
        settings: &IdSettings,
    ) -> syn::Result<KindVariant> {
        let variant = darling.ident;
        let shape = PayloadShape::parse(&payload)?;
        let natural = shape.natural_size();
        let (payload_size, declared_size) = match (natural, darling.size) {
            (Some(natural), Some(declared)) if natural != *declared => {
                return Err(Error::new(
                    declared.span(),
                    format!("declared size {} does not match the payload's size of {natural} bytes", *declared),
                ));
            }
            (Some(natural), _) => (natural, None),
            (None, Some(declared)) => (*declared, Some(*declared)),
            (None, None) => {
                return Err(Error::new_spanned(
                    &payload,
                    "payload size can not be determined, add `#[kind(size = N)]` with the payload's size in bytes",
                ));
            }
        };
        if darling.enumeration.is_present() && darling.nested.is_present() {
            return Err(Error::new(
                variant.span(),
                "a kind can not be both `enumeration` and `nested`",
            ));
        }
        if darling.parse.is_some() && darling.parse_with.is_some() {
            return Err(Error::new(
                variant.span(),
                "please only use 1 parsing attribute (parse, parse_with)",
            ));
        }
        if darling.format.is_some() && darling.format_with.is_some() {
            return Err(Error::new(
                variant.span(),
                "please only use 1 formatting attribute (format, format_with)",
            ));
        }
        if darling.eq.is_some() && darling.eq_with.is_some() {
            return Err(Error::new(
                variant.span(),
                "please only use 1 equality attribute (eq, eq_with)",
            ));
        }
        let name = if settings.strip_suffix {
            strip_suffix(&variant)
        } else {
            variant.clone()
        };
        Ok(KindVariant {
            name,
            display_name: darling.display,
            payload,
            signed: darling.signed.is_present() || shape.is_signed(),
            shape,
            payload_size,
            declared_size,
            declared_order: darling.order.unwrap_or(0),
            hints: CapabilityHints {
                parse: darling.parse,
                parse_with: darling.parse_with,
                format: darling.format,
                format_with: darling.format_with,
                eq: darling.eq,
                eq_with: darling.eq_with,
                enumeration: darling.enumeration.is_present(),
                nested: darling.nested.is_present(),
            },
            variant,
            position,
        })
    }
}

/// Removes a trailing `Kind` or `Type` from `ident`, leaving it untouched when nothing usable remains.
pub fn strip_suffix(ident: &Ident) -> Ident {
    let text = ident.to_string();
    for suffix in STRIPPED_SUFFIXES {
        if let Some(stripped) = text.strip_suffix(suffix) {
            if let Ok(stripped) = syn::parse_str::<Ident>(stripped) {
                return Ident::new(&stripped.to_string(), ident.span());
            }
        }
    }
    ident.clone()
}

/// Stable sort into assignment order: declared order first, then name ordinally.
pub fn arrange(kinds: &mut [KindVariant]) {
    kinds.sort_by(|a, b| {
        a.declared_order
            .cmp(&b.declared_order)
            .then_with(|| a.name_text().cmp(&b.name_text()))
    });
}
