use std::cmp::Ordering;
use std::time::{Duration, UNIX_EPOCH};

use bytes::Bytes;
use proptest::prelude::*;
use ndn_name::{Component, Name};

fn component_strategy() -> impl Strategy<Value = Component> {
    prop_oneof![
        // Small alphabet so shared prefixes and equal components show up often
        8 => prop::collection::vec(prop_oneof![Just(0x00u8), Just(0x01), Just(b'a'), Just(0xFF)], 0..4)
            .prop_map(|v| Component::new(&v)),
        4 => prop::collection::vec(any::<u8>(), 0..16).prop_map(|v| Component::new(&v)),
        1 => any::<[u8; 32]>().prop_map(|d| Component::from_implicit_sha256_digest(&d).unwrap()),
    ]
}

type MarkedFactory = fn(u64) -> Component;

const MARKED_FACTORIES: [MarkedFactory; 5] = [
    Component::from_version,
    Component::from_segment,
    Component::from_segment_offset,
    Component::from_sequence_number,
    |micros| Component::from_timestamp(UNIX_EPOCH + Duration::from_micros(micros)),
];

/// Values on both sides of every nonNegativeInteger width change, plus the rest.
fn width_edge_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![
        prop::sample::select(vec![0u64, 255, 256, 65535, 65536, 0xFFFF_FFFF, 0x1_0000_0000]),
        any::<u64>(),
    ]
}

fn name_strategy() -> impl Strategy<Value = Name> {
    prop::collection::vec(component_strategy(), 0..5).prop_map(Name::from)
}

proptest! {
    #[test]
    fn decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = Name::from_wire(Bytes::from(bytes));
    }

    #[test]
    fn decode_encode_is_byte_identical(name in name_strategy()) {
        let wire = name.clone().wire_encode();
        let mut decoded = Name::from_wire(wire.clone()).unwrap();
        prop_assert_eq!(&decoded, &name);
        prop_assert_eq!(decoded.wire_encode(), wire);
    }

    #[test]
    fn uri_round_trip(name in name_strategy()) {
        let parsed: Name = name.to_uri().parse().unwrap();
        prop_assert_eq!(parsed, name);
    }

    #[test]
    fn order_is_total(a in name_strategy(), b in name_strategy(), c in name_strategy()) {
        prop_assert_eq!(a.compare(&a), Ordering::Equal);
        prop_assert_eq!(a.compare(&b), b.compare(&a).reverse());
        prop_assert_eq!(a == b, a.compare(&b) == Ordering::Equal);

        if a <= b && b <= c {
            prop_assert!(a <= c);
        }
    }

    #[test]
    fn prefixes_sort_first(name in name_strategy(), n in 0usize..6) {
        let prefix = name.prefix(n as isize);
        prop_assert!(prefix.is_prefix_of(&name));
        prop_assert!(prefix <= name);
        prop_assert_eq!(prefix.len(), n.min(name.len()));
    }

    #[test]
    fn successor_is_strictly_greater(name in name_strategy(), extension in name_strategy()) {
        let next = name.successor();
        prop_assert!(name < next);
        prop_assert_eq!(next.len(), name.len().max(1));

        // Nothing under a non-empty name reaches its successor
        if !name.is_empty() {
            let mut extended = name.clone();
            extended.append_name(&extension);
            prop_assert!(extended < next);
        }
    }

    #[test]
    fn numbers_sort_numerically(x in any::<u64>(), y in any::<u64>()) {
        let a = Component::from_number(x);
        let b = Component::from_number(y);
        prop_assert_eq!(a.compare(&b), x.cmp(&y));
        prop_assert_eq!(a.to_number().unwrap(), x);
    }

    #[test]
    fn marked_numbers_sort_numerically(x in width_edge_strategy(), y in width_edge_strategy()) {
        for factory in MARKED_FACTORIES {
            let (a, b) = (factory(x), factory(y));
            prop_assert_eq!(a.compare(&b), x.cmp(&y));
            prop_assert_eq!(a.marker(), b.marker());
        }
    }
}

#[cfg(feature = "serde")]
mod serde_support {
    use ndn_name::{Component, Name};

    #[test]
    fn name_serializes_as_uri() {
        let name: Name = "/a/%00%FF".parse().unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"/a/%00%FF\"");

        let back: Name = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn component_serializes_as_escaped_value() {
        let component = Component::new(b"a b");
        let json = serde_json::to_string(&component).unwrap();
        assert_eq!(json, "\"a%20b\"");
        assert!(serde_json::from_str::<Name>("\"/a/..\"").is_err());
    }
}
