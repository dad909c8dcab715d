#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::module_name_repetitions)]
//! Defined Traits for kindpack-derive.
//!
//! A packed identifier is a single unsigned integer word holding both a discriminant ("kind") and a
//! kind specific payload ("id"). The word can be built from any kind's native payload, parsed from and
//! formatted to `"<kind><separator><id>"` text, compared and ordered by its raw value, and flattened into
//! a width independent mirror for persistence.
//!
//! For Derive Docs see [kindpack-derive](https://docs.rs/kindpack-derive/latest/kindpack_derive/)

pub mod bits;
mod error;
mod fixed;
mod layout;
mod members;
mod payload;
pub mod text;

use core::fmt;

pub use error::{CapacityError, ParseIdError};
pub use fixed::FixedString;
pub use layout::RawLayout;
pub use members::MemberSink;
pub use text::{FormatId, ParseId, ParseOptions};

/// A fixed size value that can live inside the payload bytes of a packed identifier.
///
/// The bits returned by [`Payload::into_bits`] are the value's little endian bytes, zero extended. Only
/// the lowest `SIZE` bytes are ever stored.
pub trait Payload: Copy {
    /// Natural size of the value in bytes. This is what the width planner budgets for.
    const SIZE: usize;
    /// When `true` the payload is sign extended when read back as an `i64`.
    const SIGNED: bool = false;
    /// Returns the value's bytes packed into the low end of a `u128`.
    fn into_bits(self) -> u128;
    /// Rebuilds the value from the low `SIZE` bytes of `bits`.
    fn from_bits(bits: u128) -> Self;
}

/// Name/value lookup for a closed set of enum members.
///
/// This is the enum naming facility a packed identifier uses to print and parse enum-like kinds. Use
/// `#[derive(KindEnum)]` on a fieldless enum to implement it.
pub trait KindEnum: Copy + Eq + 'static {
    /// Every member, in declaration order.
    const MEMBERS: &'static [Self];
    /// Member names, index aligned with `MEMBERS`.
    const NAMES: &'static [&'static str];
    /// Member display names, index aligned with `MEMBERS`. Members without a display name repeat their name.
    const DISPLAY_NAMES: &'static [&'static str];

    /// Position of `self` within `MEMBERS`.
    fn index(self) -> usize;

    fn name(self) -> &'static str {
        Self::NAMES.get(self.index()).copied().unwrap_or_default()
    }

    fn display_name(self) -> &'static str {
        Self::DISPLAY_NAMES.get(self.index()).copied().unwrap_or_default()
    }

    /// Finds the member called `text`.
    ///
    /// Names always win over display names, display names are only considered when
    /// `options.allow_aliases` is set.
    fn from_name(text: &str, options: ParseOptions) -> Option<Self> {
        let by_name = Self::NAMES
            .iter()
            .position(|name| text::names_match(name, text, options.ignore_case));
        let found = match by_name {
            Some(index) => Some(index),
            None if options.allow_aliases => Self::DISPLAY_NAMES
                .iter()
                .position(|name| text::names_match(name, text, options.ignore_case)),
            None => None,
        };
        found.and_then(|index| Self::MEMBERS.get(index).copied())
    }
}

/// Implemented by every type generated with `#[packed_id]`.
pub trait PackedId:
    Payload + Eq + Ord + core::hash::Hash + Default + fmt::Display + fmt::Debug
{
    /// The unsigned integer holding the whole identifier.
    type Raw: Copy + Eq + Ord + core::hash::Hash;
    /// The generated discriminant enumeration.
    type Kind: KindEnum;
    /// Byte widths and offsets the identifier was planned with.
    const LAYOUT: RawLayout;
    /// Character between the kind name and the id text.
    const SEPARATOR: char;
    /// Label used for the discriminant when displaying the identifier.
    const KIND_LABEL: &'static str;
    /// Label used for the payload when displaying the identifier.
    const PAYLOAD_LABEL: &'static str;
    /// Smallest [`FixedString`] capacity `to_fixed_string` accepts.
    const MIN_TEXT_CAPACITY: usize;

    fn from_raw(raw: Self::Raw) -> Self;
    fn raw(self) -> Self::Raw;
    /// Returns `None` when the discriminant does not name a declared kind, or when the identifier has no kinds.
    fn kind(self) -> Option<Self::Kind>;
    /// Parses `"<kind><separator><id>"`. Failure is never an error, just `None`.
    fn try_parse_with(text: &str, options: ParseOptions) -> Option<Self>;
    /// Writes `"<kind><separator><id>"`.
    fn write_text<W: fmt::Write>(&self, out: &mut W) -> fmt::Result;
    /// Writes the display form, substituting display names where they exist.
    fn write_display_text<W: fmt::Write>(&self, out: &mut W) -> fmt::Result;

    fn try_parse(text: &str) -> Option<Self> {
        Self::try_parse_with(text, ParseOptions::DEFAULT)
    }

    /// Formats the identifier into a stack buffer.
    ///
    /// # Errors
    /// If the text does not fit in `N` bytes. A capacity below `MIN_TEXT_CAPACITY` does not compile.
    fn to_fixed_string<const N: usize>(&self) -> Result<FixedString<N>, CapacityError> {
        #[allow(clippy::let_unit_value)]
        let () = CapacityCheck::<Self, N>::OK;
        let mut out = FixedString::<N>::new();
        match self.write_text(&mut out) {
            Ok(()) => Ok(out),
            Err(_) => Err(out.overflow_error()),
        }
    }

    /// Same as [`PackedId::to_fixed_string`] for the display form.
    ///
    /// # Errors
    /// If the text does not fit in `N` bytes.
    fn to_display_fixed_string<const N: usize>(&self) -> Result<FixedString<N>, CapacityError> {
        #[allow(clippy::let_unit_value)]
        let () = CapacityCheck::<Self, N>::OK;
        let mut out = FixedString::<N>::new();
        match self.write_display_text(&mut out) {
            Ok(()) => Ok(out),
            Err(_) => Err(out.overflow_error()),
        }
    }

    #[cfg(feature = "std")]
    fn to_display_string(&self) -> String {
        let mut out = String::new();
        // writing to a `String` can not fail.
        let _ = self.write_display_text(&mut out);
        out
    }
}

struct CapacityCheck<T, const N: usize>(core::marker::PhantomData<T>);

impl<T: PackedId, const N: usize> CapacityCheck<T, N> {
    const OK: () = assert!(
        N >= T::MIN_TEXT_CAPACITY,
        "FixedString capacity can not hold the longest kind name, the separator and an id"
    );
}

// paths generated code reaches for without naming `std` in the user's crate.
#[doc(hidden)]
pub mod __private {
    #[cfg(feature = "std")]
    pub use std::string::String;
}

/// Keeps its tokens when `kindpack` is built with `std`, drops them otherwise.
#[cfg(feature = "std")]
#[doc(hidden)]
#[macro_export]
macro_rules! __with_std {
    ($($tokens:tt)*) => {
        $($tokens)*
    };
}

#[cfg(not(feature = "std"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __with_std {
    ($($tokens:tt)*) => {};
}

// re-export the derive stuff
#[cfg(feature = "derive")]
#[doc(hidden)]
pub use kindpack_derive::*;
