pub mod id;
pub mod kind;

use quote::ToTokens;
use std::{fmt::Debug, ops::Deref};
use syn::Lit;

use darling::FromMeta;

#[derive(Clone)]
pub struct Visibility(pub syn::Visibility);

impl Deref for Visibility {
    type Target = syn::Visibility;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Debug for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_token_stream())
    }
}

/// The character placed between the kind name and the id text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separator(pub char);

impl Default for Separator {
    fn default() -> Self {
        Self('-')
    }
}

impl FromMeta for Separator {
    fn from_char(value: char) -> darling::Result<Self> {
        Ok(Self(value))
    }
    fn from_string(value: &str) -> darling::Result<Self> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Self(c)),
            _ => Err(darling::Error::unknown_value(
                "separator must be exactly one character",
            )),
        }
    }
    fn from_value(value: &Lit) -> darling::Result<Self> {
        match value {
            Lit::Char(c) => Self::from_char(c.value()),
            Lit::Str(s) => Self::from_string(&s.value()),
            _ => Err(darling::Error::unexpected_lit_type(value)),
        }
    }
}

/// Native parsing capability a kind was told to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseChoice {
    /// `FromStr`, the value only form.
    FromStr,
    /// `kindpack::ParseId`, the value + ignore case + aliases form.
    ParseId,
}

impl FromMeta for ParseChoice {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value {
            "from_str" => Ok(Self::FromStr),
            "parse_id" => Ok(Self::ParseId),
            _ => Err(darling::Error::unknown_value(
                "unknown parse value use \"from_str\", or \"parse_id\"",
            )),
        }
    }
}

/// Native formatting capability a kind was told to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatChoice {
    /// `core::fmt::Display`.
    Display,
    /// `kindpack::FormatId`, which separates fixed text from display text.
    FormatId,
}

impl FromMeta for FormatChoice {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value {
            "display" => Ok(Self::Display),
            "format_id" => Ok(Self::FormatId),
            _ => Err(darling::Error::unknown_value(
                "unknown format value use \"display\", or \"format_id\"",
            )),
        }
    }
}

/// Equality capability a kind was told to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqChoice {
    /// `PartialEq`.
    Operator,
    /// Compare the packed bytes.
    Bitwise,
}

impl FromMeta for EqChoice {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value {
            "operator" => Ok(Self::Operator),
            "bitwise" | "default" => Ok(Self::Bitwise),
            _ => Err(darling::Error::unknown_value(
                "unknown eq value use \"operator\", or \"bitwise\"",
            )),
        }
    }
}
