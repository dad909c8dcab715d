//! Decides, per kind, how its payload is parsed, formatted and compared.
use syn::Error;

use crate::build::{
    kind::{KindVariant, PayloadShape},
    EqChoice, FormatChoice, ParseChoice,
};

/// What kind of value a payload is, which picks the default capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadClass {
    /// Numbers, `bool` and `char`. Uses the runtime `ParseId`/`FormatId` impls.
    Primitive,
    /// A closed set of named members, uses `KindEnum`.
    Enumeration,
    /// Another packed identifier.
    Nested,
    /// Any other value type, uses `FromStr` and `Display`.
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseStrategy {
    ParseId,
    FromStr,
    EnumName,
    Nested,
    Seam(syn::Path),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatStrategy {
    FormatId,
    Display,
    EnumName,
    Nested,
    Seam(syn::Path),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EqStrategy {
    /// `PartialEq`.
    Operator,
    /// A user function comparing two payloads.
    Equals(syn::Path),
    /// The packed bits of the payload.
    Bitwise,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    pub class: PayloadClass,
    pub parse: ParseStrategy,
    pub format: FormatStrategy,
    pub eq: EqStrategy,
    /// The payload is `Option<T>`, parse/format/eq strategies apply to `T`.
    pub nullable: bool,
}

impl Capabilities {
    pub fn probe(kind: &KindVariant) -> syn::Result<Self> {
        let nullable = kind.shape.is_nullable();
        let hints = &kind.hints;
        let class = if hints.enumeration {
            PayloadClass::Enumeration
        } else if hints.nested {
            PayloadClass::Nested
        } else if matches!(kind.shape.value_shape(), PayloadShape::Primitive(_)) {
            PayloadClass::Primitive
        } else {
            PayloadClass::Custom
        };
        if nullable && matches!(class, PayloadClass::Enumeration | PayloadClass::Nested) {
            return Err(Error::new(
                kind.span(),
                "`enumeration` and `nested` kinds can not have nullable payloads",
            ));
        }

        let parse = match (&hints.parse_with, hints.parse) {
            (Some(path), _) => ParseStrategy::Seam(path.clone()),
            (None, Some(ParseChoice::FromStr)) => ParseStrategy::FromStr,
            (None, Some(ParseChoice::ParseId)) => ParseStrategy::ParseId,
            (None, None) => match class {
                PayloadClass::Primitive => ParseStrategy::ParseId,
                PayloadClass::Enumeration => ParseStrategy::EnumName,
                PayloadClass::Nested => ParseStrategy::Nested,
                // `Option<T>` only gets `ParseId` from the runtime crate.
                PayloadClass::Custom if nullable => ParseStrategy::ParseId,
                PayloadClass::Custom => ParseStrategy::FromStr,
            },
        };
        if nullable && parse == ParseStrategy::FromStr {
            return Err(Error::new(
                kind.span(),
                "nullable payloads parse with `ParseId`, `parse = \"from_str\"` is not available",
            ));
        }

        let format = match (&hints.format_with, hints.format) {
            (Some(path), _) => FormatStrategy::Seam(path.clone()),
            (None, Some(FormatChoice::Display)) => FormatStrategy::Display,
            (None, Some(FormatChoice::FormatId)) => FormatStrategy::FormatId,
            (None, None) => match class {
                PayloadClass::Primitive => FormatStrategy::FormatId,
                PayloadClass::Enumeration => FormatStrategy::EnumName,
                PayloadClass::Nested => FormatStrategy::Nested,
                PayloadClass::Custom if nullable => FormatStrategy::FormatId,
                PayloadClass::Custom => FormatStrategy::Display,
            },
        };
        if nullable && format == FormatStrategy::Display {
            return Err(Error::new(
                kind.span(),
                "nullable payloads format with `FormatId`, `format = \"display\"` is not available",
            ));
        }

        let eq = match (&hints.eq_with, hints.eq) {
            (Some(path), _) => EqStrategy::Equals(path.clone()),
            (None, Some(EqChoice::Bitwise)) => EqStrategy::Bitwise,
            (None, Some(EqChoice::Operator) | None) => EqStrategy::Operator,
        };

        Ok(Self {
            class,
            parse,
            format,
            eq,
            nullable,
        })
    }
}
