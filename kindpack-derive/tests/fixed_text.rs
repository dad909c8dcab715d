use kindpack::{CapacityError, FixedString, PackedId};

#[kindpack::packed_id]
enum EntityId {
    #[kind(display = "Champion")]
    Player(u32),
    Flag(u16),
}

#[test]
fn minimum_capacity() {
    assert_eq!(EntityId::MIN_TEXT_CAPACITY, "Player".len() + 1 + 1);
}

#[test]
fn fits_without_heap() -> anyhow::Result<()> {
    let text: FixedString<8> = EntityId::from(7u16).to_fixed_string()?;
    assert_eq!(text, "Flag-7");
    assert_eq!(text.as_str(), "Flag-7");
    assert_eq!(text.capacity(), 8);

    let text = EntityId::from(u32::MAX).to_fixed_string::<24>()?;
    assert_eq!(text, "Player-4294967295");
    assert_eq!(EntityId::try_parse(&text), Some(EntityId::from(u32::MAX)));
    Ok(())
}

#[test]
fn text_longer_than_buffer() {
    let id = EntityId::from(u32::MAX);
    let err = id.to_fixed_string::<8>().unwrap_err();
    assert_eq!(
        err,
        CapacityError {
            required: 17,
            available: 8
        }
    );
    assert_eq!(err.to_string(), "required 17 slots, 8 were available.");
}

#[test]
fn display_form() -> anyhow::Result<()> {
    let id = EntityId::from(3u32);
    let text = id.to_display_fixed_string::<16>()?;
    assert_eq!(text, "Champion-3");
    assert!(id.to_display_fixed_string::<8>().is_err());
    assert_eq!(id.to_fixed_string::<8>()?, "Player-3");
    Ok(())
}

#[test]
fn matches_allocated_text() -> anyhow::Result<()> {
    for id in [EntityId::from(0u16), EntityId::from(12_345u32), EntityId::default()] {
        let fixed = id.to_fixed_string::<32>()?;
        assert_eq!(fixed.as_str(), id.to_string());
        assert_eq!(format!("{fixed}"), id.to_string());
    }
    Ok(())
}
