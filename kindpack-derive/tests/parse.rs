use kindpack::{KindEnum, ParseIdError, ParseOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq, KindEnum)]
enum Faction {
    Red,
    #[kind(display = "Blue Team")]
    Blue,
}

#[kindpack::packed_id]
enum EntityId {
    #[kind(display = "Hero")]
    Player(u32),
    Flag(u16),
    #[kind(enumeration, size = 1)]
    Faction(Faction),
    Alive(bool),
}

#[test]
fn parse_errors() {
    let cases = [
        ("Foo", ParseIdError::MissingSeparator),
        ("", ParseIdError::MissingSeparator),
        ("-42", ParseIdError::EmptyKind),
        ("Player-", ParseIdError::EmptyId),
        ("Bogus-42", ParseIdError::UnknownKind),
        ("Player-abc", ParseIdError::InvalidId),
        ("Flag-70000", ParseIdError::InvalidId),
        ("Player--1", ParseIdError::InvalidId),
        ("Faction-Green", ParseIdError::InvalidId),
        ("Alive-yes", ParseIdError::InvalidId),
    ];
    for (text, expected) in cases {
        assert_eq!(text.parse::<EntityId>(), Err(expected), "{text}");
        assert_eq!(EntityId::try_parse(text), None, "{text}");
    }
}

#[test]
fn case_sensitive_by_default() {
    assert_eq!(EntityId::try_parse("player-42"), None);
    assert_eq!(EntityId::try_parse("Faction-blue"), None);
    let options = ParseOptions::DEFAULT.with_ignore_case();
    assert_eq!(
        EntityId::try_parse_with("player-42", options),
        Some(EntityId::from(42u32))
    );
    assert_eq!(
        EntityId::try_parse_with("FACTION-blue", options),
        Some(EntityId::from(Faction::Blue))
    );
    assert_eq!(
        EntityId::try_parse_with("alive-TRUE", options),
        Some(EntityId::from(true))
    );
}

#[test]
fn display_names_are_aliases() {
    assert_eq!(EntityId::try_parse("Hero-42"), None);
    assert_eq!(EntityId::try_parse("Faction-Blue Team"), None);
    let options = ParseOptions::DEFAULT.with_aliases();
    assert_eq!(
        EntityId::try_parse_with("Hero-42", options),
        Some(EntityId::from(42u32))
    );
    assert_eq!(
        EntityId::try_parse_with("Faction-Blue Team", options),
        Some(EntityId::from(Faction::Blue))
    );
    assert_eq!(
        EntityId::try_parse_with("hero-42", options.with_ignore_case()),
        Some(EntityId::from(42u32))
    );
}

#[test]
fn display_text_reads_back_with_aliases() {
    let id = EntityId::from(Faction::Blue);
    let text = id.to_display_string();
    assert_eq!(text, "Faction-Blue Team");
    assert_eq!(
        EntityId::try_parse_with(&text, ParseOptions::DEFAULT.with_aliases()),
        Some(id)
    );
}

#[test]
fn text_helpers_are_inherent() -> anyhow::Result<()> {
    // `PackedId` is not imported in this file.
    let id = EntityId::from(7u32);
    assert_eq!(id.to_display_string(), "Hero-7");
    assert_eq!(id.to_fixed_string::<16>()?, "Player-7");
    assert_eq!(id.to_display_fixed_string::<16>()?, "Hero-7");
    Ok(())
}

#[test]
fn parts() {
    assert_eq!(
        EntityId::try_from_parts("Flag", "7"),
        Some(EntityId::from(7u16))
    );
    assert_eq!(EntityId::try_from_parts("Flag", ""), None);
    assert_eq!(EntityId::try_from_parts("", "7"), None);
    assert_eq!(EntityId::try_from_parts("Bogus", "7"), None);
    assert_eq!(
        EntityId::try_from_parts_with("flag", "7", ParseOptions::DEFAULT.with_ignore_case()),
        Some(EntityId::from(7u16))
    );
}

#[test]
fn known_kind() {
    assert_eq!(
        EntityId::try_parse_kind(EntityIdKind::Player, "9"),
        Some(EntityId::from(9u32))
    );
    assert_eq!(EntityId::try_parse_kind(EntityIdKind::Flag, ""), None);
    assert_eq!(EntityId::try_parse_kind(EntityIdKind::Alive, "9"), None);
}

#[test]
fn kind_from_str() -> anyhow::Result<()> {
    let kind: EntityIdKind = "Player".parse()?;
    assert_eq!(kind, EntityIdKind::Player);
    assert_eq!(kind.to_string(), "Player");
    assert_eq!("".parse::<EntityIdKind>(), Err(ParseIdError::EmptyKind));
    assert_eq!("Hero".parse::<EntityIdKind>(), Err(ParseIdError::UnknownKind));
    assert_eq!(
        EntityIdKind::try_parse_with("Hero", ParseOptions::DEFAULT.with_aliases()),
        Some(EntityIdKind::Player)
    );
    assert_eq!(
        EntityIdKind::from_name("flag", ParseOptions::DEFAULT.with_ignore_case()),
        Some(EntityIdKind::Flag)
    );
    Ok(())
}

#[test]
fn error_messages() {
    let err = "Foo".parse::<EntityId>().unwrap_err();
    assert_eq!(err.to_string(), "failed parsing packed id: separator was not found.");
    let err: anyhow::Error = "Bogus-1".parse::<EntityId>().unwrap_err().into();
    assert_eq!(err.to_string(), "failed parsing packed id: kind is not declared.");
}
