//! Text side of packed identifiers: splitting `"<kind><separator><id>"`, matching kind names and the
//! per kind parse/format capabilities.
use core::fmt;

use crate::ParseIdError;

/// Text used for the `None` value of nullable payloads.
pub const NULL_TEXT: &str = "null";

/// How lenient parsing is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    /// Compare kind and member names ignoring case.
    pub ignore_case: bool,
    /// Also accept display names where a name is expected.
    pub allow_aliases: bool,
}

impl ParseOptions {
    /// Exact, case sensitive, names only.
    pub const DEFAULT: Self = Self {
        ignore_case: false,
        allow_aliases: false,
    };

    #[must_use]
    pub const fn with_ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    #[must_use]
    pub const fn with_aliases(mut self) -> Self {
        self.allow_aliases = true;
        self
    }
}

/// Splits `text` at the first `separator` into kind text and id text.
///
/// # Errors
/// If there is no separator, or either side of it is empty.
pub fn split_id(text: &str, separator: char) -> Result<(&str, &str), ParseIdError> {
    let (kind, id) = text
        .split_once(separator)
        .ok_or(ParseIdError::MissingSeparator)?;
    if kind.is_empty() {
        return Err(ParseIdError::EmptyKind);
    }
    if id.is_empty() {
        return Err(ParseIdError::EmptyId);
    }
    Ok((kind, id))
}

/// Compares a declared name against user text.
#[must_use]
pub fn names_match(name: &str, text: &str, ignore_case: bool) -> bool {
    if ignore_case {
        name.chars()
            .flat_map(char::to_lowercase)
            .eq(text.chars().flat_map(char::to_lowercase))
    } else {
        name == text
    }
}

/// Parsing that is aware of [`ParseOptions`].
///
/// This is the "value, ignore case, allow aliases" form of parsing. Types that only have `FromStr`
/// can be used as a kind with `#[kind(parse = "from_str")]` instead.
pub trait ParseId: Sized {
    fn parse_id(text: &str, options: ParseOptions) -> Option<Self>;
}

/// Formatting of a payload as the id part of identifier text.
pub trait FormatId {
    /// Writes the text [`ParseId::parse_id`] reads back.
    ///
    /// # Errors
    /// When `out` fails.
    fn write_id<W: fmt::Write>(&self, out: &mut W) -> fmt::Result;

    /// Writes the human friendly text. Defaults to [`FormatId::write_id`].
    ///
    /// # Errors
    /// When `out` fails.
    fn write_display_id<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        self.write_id(out)
    }
}

macro_rules! impl_from_str_text {
    ($($ty:ty),*) => {
        $(
            impl ParseId for $ty {
                fn parse_id(text: &str, _options: ParseOptions) -> Option<Self> {
                    text.parse().ok()
                }
            }

            impl FormatId for $ty {
                fn write_id<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
                    write!(out, "{}", self)
                }
            }
        )*
    };
}

impl_from_str_text!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64, char);

impl ParseId for bool {
    fn parse_id(text: &str, options: ParseOptions) -> Option<Self> {
        if names_match("true", text, options.ignore_case) {
            Some(true)
        } else if names_match("false", text, options.ignore_case) {
            Some(false)
        } else {
            None
        }
    }
}

impl FormatId for bool {
    fn write_id<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        out.write_str(if *self { "true" } else { "false" })
    }
}

impl<T: ParseId> ParseId for Option<T> {
    fn parse_id(text: &str, options: ParseOptions) -> Option<Self> {
        if names_match(NULL_TEXT, text, options.ignore_case) {
            Some(None)
        } else {
            T::parse_id(text, options).map(Some)
        }
    }
}

impl<T: FormatId> FormatId for Option<T> {
    fn write_id<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        match self {
            Some(value) => value.write_id(out),
            None => out.write_str(NULL_TEXT),
        }
    }

    fn write_display_id<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        match self {
            Some(value) => value.write_display_id(out),
            None => out.write_str(NULL_TEXT),
        }
    }
}
