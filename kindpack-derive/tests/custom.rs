use std::{fmt, num::ParseIntError, str::FromStr};

use kindpack::{ParseOptions, Payload};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Payload)]
struct Position {
    x: i16,
    y: i16,
}

impl FromStr for Position {
    type Err = ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(',').unwrap_or((s, ""));
        Ok(Self {
            x: x.parse()?,
            y: y.parse()?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Three letter codes, upper case.
fn parse_code(text: &str, options: ParseOptions) -> Option<[u8; 3]> {
    let bytes: [u8; 3] = text.as_bytes().try_into().ok()?;
    let bytes = if options.ignore_case {
        bytes.map(|b| b.to_ascii_uppercase())
    } else {
        bytes
    };
    bytes.iter().all(u8::is_ascii_uppercase).then_some(bytes)
}

fn write_code(code: &[u8; 3], out: &mut dyn fmt::Write) -> fmt::Result {
    for byte in code {
        out.write_char(char::from(*byte))?;
    }
    Ok(())
}

fn same_code(a: &[u8; 3], b: &[u8; 3]) -> bool {
    a.eq_ignore_ascii_case(b)
}

fn parse_pair(text: &str, _options: ParseOptions) -> Option<[u8; 2]> {
    let (a, b) = text.split_once('.')?;
    Some([a.parse().ok()?, b.parse().ok()?])
}

fn write_pair(pair: &[u8; 2], out: &mut dyn fmt::Write) -> fmt::Result {
    write!(out, "{}.{}", pair[0], pair[1])
}

#[kindpack::packed_id(separator = ':', display_kind = "Type", display_payload = "Value")]
enum CustomId {
    #[kind(size = 4)]
    Position(Position),
    #[kind(parse_with = "parse_code", format_with = "write_code", eq_with = "same_code")]
    Code([u8; 3]),
    Maybe(Option<u16>),
    #[kind(eq = "bitwise")]
    Ratio(f32),
    #[kind(parse_with = "parse_pair", format_with = "write_pair")]
    Pair(Option<[u8; 2]>),
}

#[kindpack::packed_id(strip_suffix)]
enum Stripped {
    PlayerKind(u32),
    FlagType(u16),
}

#[test]
fn custom_separator() {
    assert_eq!(CustomId::SEPARATOR, ':');
    let id = CustomId::from(Position { x: 3, y: -4 });
    assert_eq!(id.to_string(), "Position:3,-4");
    assert_eq!(CustomId::try_parse("Position:3,-4"), Some(id));
    assert_eq!(CustomId::try_parse("Position-3,-4"), None);
    assert_eq!(CustomId::try_parse("Position:3"), None);
    assert_eq!(id.as_position(), Some(Position { x: 3, y: -4 }));
}

#[test]
fn code_seams() {
    let id = CustomId::from(*b"ABC");
    assert_eq!(id.to_string(), "Code:ABC");
    assert_eq!(CustomId::try_parse("Code:ABC"), Some(id));
    assert_eq!(CustomId::try_parse("Code:abc"), None);
    assert_eq!(CustomId::try_parse("Code:ABCD"), None);
    assert_eq!(
        CustomId::try_parse_with("code:abc", ParseOptions::DEFAULT.with_ignore_case()),
        Some(id)
    );
    assert_eq!(id, *b"abc");
    assert_ne!(id, *b"ABD");
}

#[test]
fn nullable_payloads() -> anyhow::Result<()> {
    let none = CustomId::from(None::<u16>);
    assert_eq!(none.to_string(), "Maybe:null");
    assert_eq!(none.as_maybe(), Some(None));
    let some = CustomId::from(Some(0u16));
    assert_eq!(some.to_string(), "Maybe:0");
    assert_ne!(none, some);
    assert_eq!(some, Some(0u16));
    assert_ne!(some, None::<u16>);

    let parsed: CustomId = "Maybe:null".parse()?;
    assert_eq!(parsed, none);
    assert_eq!(CustomId::try_parse("Maybe:NULL"), None);
    assert_eq!(
        CustomId::try_parse_with("Maybe:NULL", ParseOptions::DEFAULT.with_ignore_case()),
        Some(none)
    );
    assert_eq!(CustomId::try_parse("Maybe:65535"), Some(CustomId::from(Some(u16::MAX))));
    Ok(())
}

#[test]
fn nullable_seams() {
    let id = CustomId::from(Some([1u8, 2]));
    assert_eq!(id.to_string(), "Pair:1.2");
    assert_eq!(CustomId::try_parse("Pair:1.2"), Some(id));
    let none = CustomId::from(None::<[u8; 2]>);
    assert_eq!(none.to_string(), "Pair:null");
    assert_eq!(CustomId::try_parse("Pair:null"), Some(none));
    assert_eq!(CustomId::try_parse("Pair:1"), None);
    assert_eq!(none, None::<[u8; 2]>);
}

#[test]
fn bitwise_float_equality() {
    let nan = CustomId::from(f32::NAN);
    assert_eq!(nan, f32::NAN);
    assert_eq!(nan.as_ratio().map(f32::is_nan), Some(true));
    let half = CustomId::from(0.5f32);
    assert_eq!(half, 0.5f32);
    assert_ne!(half, -0.5f32);
    assert_eq!(half.to_string(), "Ratio:0.5");
    assert_eq!(CustomId::try_parse("Ratio:0.5"), Some(half));
}

#[test]
fn debug_labels() {
    let id = CustomId::from(0.5f32);
    assert_eq!(format!("{id:?}"), "CustomId(Ratio:0.5)");
    let pretty = format!("{id:#?}");
    assert!(pretty.contains("Type: Some("), "{pretty}");
    assert!(pretty.contains("Value: "), "{pretty}");
    assert_eq!(CustomId::KIND_LABEL, "Type");
    assert_eq!(CustomId::PAYLOAD_LABEL, "Value");
}

#[test]
fn suffixes_are_stripped() {
    assert_eq!(StrippedKind::ALL, [StrippedKind::Flag, StrippedKind::Player]);
    let id = Stripped::new_player(5);
    assert!(id.is_player());
    assert_eq!(id.to_string(), "Player-5");
    assert_eq!(Stripped::try_parse("Flag-2"), Some(Stripped::from(2u16)));
    assert_eq!(Stripped::try_parse("FlagType-2"), None);
}
