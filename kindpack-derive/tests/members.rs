use kindpack::{CapacityError, KindEnum, MemberSink, Payload};

#[derive(Clone, Copy, Debug, PartialEq, Eq, KindEnum)]
enum Faction {
    Red,
    Blue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, KindEnum)]
#[repr(u8)]
enum Rank {
    Low = 1,
    High = 5,
    Top,
}

#[kindpack::packed_id]
enum EntityId {
    Player(u32),
    #[kind(enumeration, size = 1)]
    Faction(Faction),
    #[kind(enumeration, size = 1)]
    Rank(Rank),
}

#[kindpack::packed_id]
enum PlainId {
    Player(u32),
    Flag(u16),
}

/// Sink that refuses to grow past a fixed amount of members.
struct Bounded {
    items: Vec<EntityId>,
    limit: usize,
}

impl MemberSink<EntityId> for Bounded {
    fn reserve_members(&mut self, additional: usize) -> Result<(), CapacityError> {
        let required = self.items.len() + additional;
        if required > self.limit {
            return Err(CapacityError {
                required,
                available: self.limit,
            });
        }
        Ok(())
    }

    fn push_member(&mut self, member: EntityId) {
        self.items.push(member);
    }
}

fn expected() -> [EntityId; 5] {
    [
        EntityId::from(Faction::Red),
        EntityId::from(Faction::Blue),
        EntityId::from(Rank::Low),
        EntityId::from(Rank::High),
        EntityId::from(Rank::Top),
    ]
}

#[test]
fn member_count() {
    assert_eq!(EntityId::ENUM_MEMBER_COUNT, 5);
    assert_eq!(PlainId::ENUM_MEMBER_COUNT, 0);
    assert_eq!(Rank::Top.into_bits(), 6);
    assert_eq!(EntityId::from(Rank::Top).payload_bits(), 6);
}

#[test]
fn copy_into_slice() -> anyhow::Result<()> {
    let mut dest = [EntityId::default(); 8];
    let written = EntityId::copy_all_members(&mut dest)?;
    assert_eq!(written, 5);
    assert_eq!(dest[..5], expected());
    assert_eq!(dest[5..], [EntityId::default(); 3]);
    Ok(())
}

#[test]
fn copy_into_short_slice_writes_nothing() {
    let mut dest = [EntityId::from(1u32); 3];
    assert_eq!(
        EntityId::copy_all_members(&mut dest),
        Err(CapacityError {
            required: 5,
            available: 3
        })
    );
    assert_eq!(dest, [EntityId::from(1u32); 3]);
}

#[test]
fn add_to_vec() -> anyhow::Result<()> {
    let mut dest = vec![EntityId::from(9u32)];
    EntityId::add_all_members(&mut dest)?;
    assert_eq!(dest.len(), 6);
    assert_eq!(dest[1..], expected());
    Ok(())
}

#[test]
fn rejecting_sink_is_left_alone() {
    let mut sink = Bounded {
        items: vec![EntityId::from(9u32)],
        limit: 4,
    };
    assert_eq!(
        EntityId::add_all_members(&mut sink),
        Err(CapacityError {
            required: 6,
            available: 4
        })
    );
    assert_eq!(sink.items, [EntityId::from(9u32)]);

    let mut sink = Bounded {
        items: Vec::new(),
        limit: 5,
    };
    assert_eq!(EntityId::add_all_members(&mut sink), Ok(()));
    assert_eq!(sink.items, expected());
}

#[test]
fn no_enumeration_kinds() -> anyhow::Result<()> {
    let mut dest = [PlainId::default(); 2];
    assert_eq!(PlainId::copy_all_members(&mut dest)?, 0);
    let mut dest = Vec::new();
    PlainId::add_all_members(&mut dest)?;
    assert!(dest.is_empty());
    Ok(())
}

#[test]
fn members_format_by_name() {
    let text: Vec<String> = expected().iter().map(ToString::to_string).collect();
    assert_eq!(
        text,
        ["Faction-Red", "Faction-Blue", "Rank-Low", "Rank-High", "Rank-Top"]
    );
}
