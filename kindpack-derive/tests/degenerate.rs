use kindpack::{PackedId, ParseIdError};

#[kindpack::packed_id(allow_empty)]
enum NothingId {}

#[kindpack::packed_id(allow_empty)]
enum SerialId {
    Serial(u32),
}

#[kindpack::packed_id(allow_empty, width = 8)]
enum TickId {
    Tick(i16),
}

#[kindpack::packed_id(allow_empty, width = 16)]
enum LongNothingId {}

#[test]
fn empty_layout() {
    assert_eq!(NothingId::LAYOUT.total_width_bytes, 2);
    assert_eq!(NothingId::LAYOUT.payload_width_bytes, 2);
    assert_eq!(NothingId::LAYOUT.discriminant_width_bytes, 2);
    assert_eq!(NothingId::LAYOUT.discriminant_byte_offset, 0);
    assert!(!NothingId::LAYOUT.has_discriminant);
    assert_eq!(NothingIdKind::COUNT, 0);
    assert_eq!(NothingId::ENUM_MEMBER_COUNT, 0);
}

#[test]
fn empty_text_is_the_payload() -> anyhow::Result<()> {
    let id: NothingId = "42".parse()?;
    assert_eq!(id.raw(), 42);
    assert_eq!(id.kind(), None);
    assert_eq!(id.discriminant(), 0);
    assert_eq!(id.to_string(), "42");
    assert_eq!(NothingId::try_parse("70000"), None);
    assert_eq!(NothingId::try_parse("Player-1"), None);
    assert_eq!("".parse::<NothingId>(), Err(ParseIdError::EmptyId));
    assert_eq!(NothingId::try_from_parts("Player", "1"), None);
    Ok(())
}

#[test]
fn empty_mirror() {
    let id = NothingId::new(7);
    let mirror = NothingIdSerializable::from(id);
    assert_eq!(mirror, NothingIdSerializable::new(0, 7));
    assert_eq!(mirror.kind(), None);
    assert_eq!(mirror.to_packed(), id);
}

#[test]
fn single_kind_has_no_discriminant() {
    assert_eq!(SerialId::LAYOUT.total_width_bytes, 4);
    assert!(!SerialId::LAYOUT.has_discriminant);
    assert_eq!(SerialId::MIN_TEXT_CAPACITY, 1);

    let id = SerialId::from(42u32);
    assert_eq!(id.raw(), 42);
    assert_eq!(id.kind(), Some(SerialIdKind::Serial));
    assert_eq!(SerialId::default().kind(), Some(SerialIdKind::Serial));
    assert!(id.is_serial());
    assert_eq!(id.as_serial(), Some(42));
    assert_eq!(id, 42u32);
}

#[test]
fn single_kind_text() {
    let id = SerialId::from(u32::MAX);
    assert_eq!(id.to_string(), "4294967295");
    assert_eq!(SerialId::try_parse("4294967295"), Some(id));
    assert_eq!(SerialId::try_parse("Serial-1"), None);
    assert_eq!("".parse::<SerialId>(), Err(ParseIdError::EmptyId));
    assert_eq!("x".parse::<SerialId>(), Err(ParseIdError::InvalidId));
    assert_eq!(
        SerialId::try_from_parts("Serial", "5"),
        Some(SerialId::from(5u32))
    );
    assert_eq!(
        SerialId::try_parse_kind(SerialIdKind::Serial, "5"),
        Some(SerialId::from(5u32))
    );
}

#[test]
fn single_kind_fills_preferred_width() {
    assert_eq!(TickId::LAYOUT.total_width_bytes, 8);
    assert_eq!(TickId::LAYOUT.payload_width_bytes, 8);
    let id = TickId::from(-4i16);
    assert_eq!(id.raw(), 0xFFFC);
    assert_eq!(id.payload_signed(), -4);
    assert_eq!(id.to_string(), "-4");
    assert_eq!(TickId::try_parse("-4"), Some(id));

    let mirror = TickIdSerializable::from(id);
    assert_eq!(mirror, TickIdSerializable::new(0, -4));
    assert_eq!(mirror.to_packed(), id);
}

#[test]
fn fixed_text_of_degenerate_ids() -> anyhow::Result<()> {
    let text = SerialId::from(12u32).to_fixed_string::<10>()?;
    assert_eq!(text, "12");
    Ok(())
}

#[test]
fn wide_payload_keeps_every_byte() {
    let id = LongNothingId::from_raw(u128::MAX);
    assert_eq!(id.payload_bits(), u128::MAX);
    assert_eq!(id.to_string(), u128::MAX.to_string());
    assert_eq!(LongNothingId::try_parse(&u128::MAX.to_string()), Some(id));

    let serial = SerialId::from_raw(u32::MAX);
    assert_eq!(serial.payload_bits(), u128::from(u32::MAX));
}
