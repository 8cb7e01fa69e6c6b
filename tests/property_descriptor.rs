use chartgrid::descriptor::{DescriptorError, PropertyDescriptor, Tag, Value, ValueKind};
use proptest::prelude::*;

#[derive(Debug, Default)]
struct Dial {
    position: i64,
}

fn position() -> PropertyDescriptor {
    PropertyDescriptor::read_write(
        "Position",
        ValueKind::Int,
        |d: &Dial| Value::Int(d.position),
        |d: &mut Dial, v| {
            d.position = v.into_int()?;
            Ok(())
        },
    )
}

proptest! {
    #[test]
    fn read_only_flag_blocks_every_write(start in any::<i64>(), attempt in any::<i64>()) {
        let prop = position();
        prop.set_read_only(true);
        let mut dial = Dial { position: start };
        let err = prop.set(&mut dial, Value::Int(attempt)).unwrap_err();
        prop_assert_eq!(err, DescriptorError::ReadOnly("Position".into()));
        prop_assert_eq!(dial.position, start);
    }

    #[test]
    fn writable_property_stores_what_it_is_given(start in any::<i64>(), next in any::<i64>()) {
        let prop = position();
        let mut dial = Dial { position: start };
        prop.set(&mut dial, Value::Int(next)).unwrap();
        prop_assert_eq!(prop.get(&dial).unwrap(), Value::Int(next));
    }
}

#[test]
fn read_only_can_be_lifted_again() {
    let prop = position();
    let mut dial = Dial::default();
    prop.set_read_only(true);
    assert!(prop.is_read_only());
    prop.set_read_only(false);
    prop.set(&mut dial, Value::Int(7)).unwrap();
    assert_eq!(dial.position, 7);
}

#[test]
fn metadata_defaults_and_updates() {
    let prop = position();
    assert_eq!(prop.display_name(), "Position");
    assert_eq!(prop.category(), "Misc");
    assert_eq!(prop.description(), "");
    assert!(prop.is_browsable());

    prop.set_display_name("Dial position");
    prop.set_category("Controls");
    prop.set_description("Where the dial points");
    prop.set_browsable(false);
    assert_eq!(prop.display_name(), "Dial position");
    assert_eq!(prop.category(), "Controls");
    assert_eq!(prop.description(), "Where the dial points");
    assert!(!prop.is_browsable());
    assert_eq!(prop.name(), "Position");
}

#[test]
fn tags_are_a_set() {
    let prop = position();
    assert!(prop.add_tag(Tag::RefreshAll));
    assert!(!prop.add_tag(Tag::RefreshAll));
    assert!(prop.add_tag(Tag::custom("advanced")));
    assert_eq!(prop.tags().len(), 2);
    assert!(prop.has_tag(&Tag::custom("advanced")));

    assert!(prop.remove_tag(&Tag::RefreshAll));
    assert!(!prop.remove_tag(&Tag::RefreshAll));
    assert!(!prop.has_tag(&Tag::RefreshAll));
}

#[test]
fn reset_restores_the_value_seen_by_the_first_can_reset() {
    let prop = position();
    let mut dial = Dial { position: 3 };
    assert!(matches!(
        prop.reset(&mut dial),
        Err(DescriptorError::NoDefaultCaptured(_))
    ));

    assert!(prop.can_reset(&dial));
    prop.set(&mut dial, Value::Int(9)).unwrap();
    // A later query does not move the captured default.
    assert!(prop.can_reset(&dial));
    assert_eq!(prop.default_value(), Some(Value::Int(3)));

    prop.reset(&mut dial).unwrap();
    assert_eq!(dial.position, 3);
}

#[test]
fn foreign_instances_are_access_errors() {
    let prop = position();
    let mut other = String::from("not a dial");
    assert!(matches!(prop.get(&other), Err(DescriptorError::Access { .. })));
    assert!(matches!(
        prop.set(&mut other, Value::Int(1)),
        Err(DescriptorError::Access { .. })
    ));
    assert!(!prop.can_reset(&other));
}
