//! Packed discriminated identifiers.
//!
//! Provides an attribute macro turning an enum whose variants each hold one payload type into a compact
//! identifier: a single unsigned integer ("raw word") that stores a discriminant ("kind") in its top bytes
//! and the kind's payload ("id") starting at byte 0. The identifier offers:
//! - construction from any kind's payload, and access back to it without allocating.
//! - `"<kind><separator><id>"` text formatting and parsing, with optional case insensitivity and aliases.
//! - equality, ordering and hashing by raw word.
//! - a width independent `{discriminant, payload}` mirror for persistence.
//!
//! # Widths
//!
//! The total width is picked from the largest payload and the amount of kinds. Payload sizes are
//! rounded up to one of 1, 2, 4, 8, 12 or 16 bytes, then the smallest discriminant able to count the kinds
//! (1, 2 or 4 bytes) is added and the sum rounded up again, with a minimum of 2 bytes. Payloads of 8 bytes
//! or more can only be used by a single kind.
//!
//! # Example
//!
//! ```
//! use kindpack::{KindEnum, PackedId};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, KindEnum)]
//! enum Faction {
//!     Red,
//!     Blue,
//! }
//!
//! #[kindpack::packed_id]
//! enum EntityId {
//!     Player(u32),
//!     Flag(u16),
//!     #[kind(enumeration, size = 1)]
//!     Faction(Faction),
//! }
//!
//! // kinds are ordered by name: Faction = 0, Flag = 1, Player = 2.
//! let id = EntityId::from(42u32);
//! assert_eq!(id.kind(), Some(EntityIdKind::Player));
//! assert_eq!(id.discriminant(), 2);
//! assert_eq!(id.to_string(), "Player-42");
//! assert_eq!(id, 42u32);
//! assert_eq!(EntityId::try_parse("Flag-7"), Some(EntityId::from(7u16)));
//! assert_eq!(EntityId::try_parse("Faction-Blue"), Some(EntityId::from(Faction::Blue)));
//! assert_eq!(EntityId::try_parse("Bogus-42"), None);
//! assert_eq!(EntityId::LAYOUT.total_width_bytes, 8);
//! assert_eq!(EntityId::LAYOUT.discriminant_byte_offset, 7);
//!
//! let text = id.to_fixed_string::<16>().unwrap();
//! assert_eq!(text, "Player-42");
//! ```
//!
//! Generated code can be inspected by adding `dump` (`#[packed_id(dump)]`), the generated code will be
//! output to `target/kindpack_debug/{your-identifier-name}_code_gen.rs`.

use build::id::IdBuilder;
use proc_macro2::TokenStream;
use solved::Solved;
use syn::{parse_macro_input, DeriveInput};

mod build;
mod derive;
mod diagnostics;
mod enums;
mod solved;
mod structs;

fn do_thing(args: TokenStream, input: &DeriveInput) -> proc_macro::TokenStream {
    // collect the kinds and their attributes.
    let builder = match IdBuilder::parse(args, input) {
        Ok(parsed) => parsed,
        Err(err) => {
            return proc_macro::TokenStream::from(err.to_compile_error());
        }
    };
    // plan the widths, lay the word out and decide each kind's capabilities.
    let solved: Solved = match builder.try_into() {
        Ok(s) => s,
        Err(err) => {
            return proc_macro::TokenStream::from(err.to_compile_error());
        }
    };
    match solved.gen() {
        Ok(gen) => gen.into(),
        Err(err) => proc_macro::TokenStream::from(err.to_compile_error()),
    }
}

/// Replaces an enum with a packed identifier of the same name.
///
/// Every variant is a kind and must hold exactly one payload type, `Name(Payload)`. Payloads must be fixed
/// size value types implementing `kindpack::Payload`. Primitives, arrays, tuples and `Option` have their
/// size worked out from the type, every other type needs `#[kind(size = N)]`, which is checked against its
/// `Payload::SIZE` at compile time.
///
/// # Identifier Attributes
/// - `width = N` minimum total width in bytes, one of 2, 4, 8, 12, 16.
/// - `separator = '-'` character between kind and id text.
/// - `allow_empty` allows zero kinds. With zero or one kind there is no discriminant field at all and the
///     text form is just the id.
/// - `preserve_order` assigns discriminants in declaration order instead of sorting by `(order, name)`.
/// - `strip_suffix` removes a trailing `Kind` or `Type` from kind names.
/// - `display_kind = ".."`, `display_payload = ".."` labels used by the alternate `Debug` output.
/// - `serde` derives `serde::Serialize`/`serde::Deserialize` for the kind enum and the mirror.
/// - `dump` writes the generated code to `target/kindpack_debug`.
///
/// # Kind Attributes
/// - `order = N` sort key, lower sorts first, defaults to 0.
/// - `display = ".."` display name, used by the display text and accepted as an alias when parsing.
/// - `signed` sign extend the payload in `payload_signed` and the mirror.
/// - `size = N` payload size in bytes.
/// - `enumeration` the payload implements `kindpack::KindEnum` and is written as member names.
/// - `nested` the payload is another packed identifier.
/// - `parse = "from_str" | "parse_id"`, `parse_with = "path"` with `fn(&str, ParseOptions) -> Option<T>`.
/// - `format = "display" | "format_id"`, `format_with = "path"` with
///     `fn(&T, &mut dyn core::fmt::Write) -> core::fmt::Result`.
/// - `eq = "operator" | "bitwise"`, `eq_with = "path"` with `fn(&T, &T) -> bool`.
///
/// # Generated
/// For `enum EntityId` the macro emits `struct EntityId`, `enum EntityIdKind` and
/// `struct EntityIdSerializable`, along with `From<Payload>` and `PartialEq<Payload>` for every kind and the
/// `PackedId`, `Payload`, `ParseId` and `FormatId` impls.
///
/// Kinds whose payload type was already used by another kind, or whose name collides with another kind
/// after suffix stripping, are dropped with a warning.
#[proc_macro_attribute]
pub fn packed_id(
    args: proc_macro::TokenStream,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    do_thing(args.into(), &input)
}

/// Implements `kindpack::KindEnum` and `kindpack::Payload` for a fieldless enum.
///
/// Discriminants must be integer literals (negative literals are allowed). The payload size comes from
/// `#[repr(..)]` when present, otherwise the smallest integer able to hold every discriminant is used.
/// Bits that match no member are read back as the first member.
///
/// `#[kind(display = "..")]` on a member gives it a display name.
///
/// ```
/// use kindpack::{KindEnum, ParseOptions, Payload};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, KindEnum)]
/// enum Faction {
///     Red,
///     #[kind(display = "Blue Team")]
///     Blue,
/// }
///
/// assert_eq!(<Faction as Payload>::SIZE, 1);
/// assert_eq!(Faction::Blue.display_name(), "Blue Team");
/// assert_eq!(Faction::from_name("blue", ParseOptions::DEFAULT.with_ignore_case()), Some(Faction::Blue));
/// assert_eq!(Faction::from_name("Blue Team", ParseOptions::DEFAULT), None);
/// assert_eq!(Faction::from_name("Blue Team", ParseOptions::DEFAULT.with_aliases()), Some(Faction::Blue));
/// ```
#[proc_macro_derive(KindEnum, attributes(kind))]
pub fn derive_kind_enum(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match enums::KindEnumInfo::parse(&input) {
        Ok(info) => info.gen().into(),
        Err(err) => proc_macro::TokenStream::from(err.to_compile_error()),
    }
}

/// Implements `kindpack::Payload` for a struct whose fields all implement it.
///
/// Fields are packed back to back in declaration order, the first field in the lowest bytes. The size is
/// the sum of the field sizes and must not exceed 16 bytes.
///
/// ```
/// use kindpack::Payload;
///
/// #[derive(Clone, Copy, Debug, PartialEq, Payload)]
/// struct Position {
///     x: i16,
///     y: i16,
/// }
///
/// assert_eq!(<Position as Payload>::SIZE, 4);
/// let bits = Position { x: 1, y: -1 }.into_bits();
/// assert_eq!(bits, 0xFFFF_0001);
/// assert_eq!(Position::from_bits(bits), Position { x: 1, y: -1 });
/// ```
#[proc_macro_derive(Payload)]
pub fn derive_payload(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match structs::PayloadStructInfo::parse(&input) {
        Ok(info) => info.gen().into(),
        Err(err) => proc_macro::TokenStream::from(err.to_compile_error()),
    }
}
