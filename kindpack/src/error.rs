#[cfg(not(feature = "std"))]
use core::fmt;
#[cfg(feature = "std")]
use std::fmt;

/// Reasons text could not be parsed into a packed identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseIdError {
    /// The separator character was not found.
    MissingSeparator,
    /// Nothing came before the separator.
    EmptyKind,
    /// Nothing came after the separator.
    EmptyId,
    /// The text before the separator is not the name of a declared kind.
    UnknownKind,
    /// The kind was found but its payload rejected the text after the separator.
    InvalidId,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MissingSeparator => "separator was not found",
            Self::EmptyKind => "kind text is empty",
            Self::EmptyId => "id text is empty",
            Self::UnknownKind => "kind is not declared",
            Self::InvalidId => "id text is not valid for the kind",
        };
        write!(fmt, "failed parsing packed id: {s}.")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseIdError {}

/// A destination did not have room for everything that needed to be written.
/// The first value contains the required amount of slots/bytes.
/// The second value contains the available amount of slots/bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    pub required: usize,
    pub available: usize,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "required {} slots, {} were available.",
            self.required, self.available
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CapacityError {}
