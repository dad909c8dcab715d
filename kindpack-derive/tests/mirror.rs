use kindpack::KindEnum;

#[derive(Clone, Copy, Debug, PartialEq, Eq, KindEnum)]
enum Faction {
    Red,
    Blue,
}

#[kindpack::packed_id(serde)]
enum EntityId {
    Player(u32),
    #[kind(enumeration, size = 1)]
    Faction(Faction),
    Offset(i16),
}

#[kindpack::packed_id(serde)]
enum WideId {
    Player(u32),
    #[kind(enumeration, size = 1)]
    Faction(Faction),
    Offset(i16),
    Zone(u8),
}

#[test]
fn mirror_round_trip() {
    // Faction = 0, Offset = 1, Player = 2.
    let id = EntityId::from(-3i16);
    let mirror = EntityIdSerializable::from(id);
    assert_eq!(mirror, EntityIdSerializable::new(1, -3));
    assert_eq!(mirror.kind(), Some(EntityIdKind::Offset));
    assert_eq!(EntityId::from(mirror), id);
    assert_eq!(mirror.to_string(), "Offset--3");

    let id = EntityId::from(u32::MAX);
    let mirror = EntityIdSerializable::from_packed(id);
    assert_eq!(mirror.payload, 4_294_967_295);
    assert_eq!(mirror.to_packed(), id);
}

#[test]
fn mirror_parses() -> anyhow::Result<()> {
    let mirror: EntityIdSerializable = "Faction-Blue".parse()?;
    assert_eq!(mirror, EntityIdSerializable::new(0, 1));
    assert_eq!(EntityIdSerializable::try_parse("Bogus-1"), None);
    assert_eq!(
        EntityIdSerializable::try_parse_with(
            "faction-red",
            kindpack::ParseOptions::DEFAULT.with_ignore_case()
        ),
        Some(EntityIdSerializable::new(0, 0))
    );
    Ok(())
}

#[test]
fn unknown_discriminant_survives() {
    let mirror = EntityIdSerializable::new(200, 9);
    assert_eq!(mirror.kind(), None);
    let id = mirror.to_packed();
    assert_eq!(id.kind(), None);
    assert_eq!(id.discriminant(), 200);
    assert_eq!(EntityIdSerializable::from(id), mirror);
}

#[test]
fn stray_bits_are_cleared() {
    // Offset reads two bytes, the third is outside its payload.
    let id = EntityId::from_raw((1u64 << 56) | 0x0001_0005);
    assert_eq!(id.raw(), (1u64 << 56) | 5);
    assert_eq!(id, EntityId::from(5i16));
    assert_eq!(id.to_string(), "Offset-5");
    assert_eq!(EntityId::try_parse(&id.to_string()), Some(id));
    assert_eq!(EntityIdSerializable::from(id).to_packed(), id);

    let noisy = (2u64 << 56) | (0xAB << 40) | 7;
    assert_eq!(EntityId::from_raw(noisy), EntityId::from(7u32));
    assert_eq!(EntityId::from_bytes(noisy.to_le_bytes()), EntityId::from(7u32));
    assert_eq!(<EntityId as kindpack::Payload>::from_bits(u128::from(noisy)), EntityId::from(7u32));
}

#[test]
fn oversized_payload_is_narrowed() {
    let mirror = EntityIdSerializable::new(1, 70_000);
    assert_eq!(mirror.to_packed().as_offset(), Some(70_000i64 as i16));
}

#[test]
fn bincode_round_trip() -> anyhow::Result<()> {
    let mirror = EntityIdSerializable::from(EntityId::from(Faction::Blue));
    let bytes = bincode::serialize(&mirror)?;
    let back: EntityIdSerializable = bincode::deserialize(&bytes)?;
    assert_eq!(back, mirror);
    assert_eq!(EntityId::from(back), EntityId::from(Faction::Blue));

    let kind_bytes = bincode::serialize(&EntityIdKind::Player)?;
    let kind: EntityIdKind = bincode::deserialize(&kind_bytes)?;
    assert_eq!(kind, EntityIdKind::Player);
    Ok(())
}

#[test]
fn mirror_survives_added_kinds() -> anyhow::Result<()> {
    // adding `Zone` keeps every existing discriminant.
    let stored = bincode::serialize(&EntityIdSerializable::from(EntityId::from(12u32)))?;
    let loaded: WideIdSerializable = bincode::deserialize(&stored)?;
    assert_eq!(loaded.to_packed(), WideId::from(12u32));
    assert_eq!(loaded.to_string(), "Player-12");
    Ok(())
}
