//! Codec properties: prefix tiers, zero tails and context round trips.

use proptest::prelude::*;
use ron_core::codec::{
    common_prefix, format_int, format_uuid, format_uuid_flat, parse_int, parse_uuid, zero_tail,
};
use ron_core::constants::{INT60_ERROR, INT60_FULL, INT60_INFINITY};
use ron_core::{Uuid, UuidSign};

fn arb_int60() -> impl Strategy<Value = u64> {
    prop_oneof![
        0..=INT60_FULL,
        Just(0),
        Just(INT60_ERROR),
        Just(INT60_INFINITY),
        (0u32..10).prop_map(|s| 1u64 << (6 * s)),
    ]
}

/// A value and a context that agree on a random number of leading bits.
fn arb_value_and_context() -> impl Strategy<Value = (u64, u64)> {
    (arb_int60(), 0u32..=60, any::<u64>()).prop_map(|(value, bits, noise)| {
        let mask = if bits == 60 { INT60_FULL } else { (1u64 << bits) - 1 };
        (value, value ^ (noise & mask))
    })
}

fn arb_sign() -> impl Strategy<Value = UuidSign> {
    prop_oneof![
        Just(UuidSign::Name),
        Just(UuidSign::Hash),
        Just(UuidSign::Event),
        Just(UuidSign::Derived),
    ]
}

fn arb_uuid() -> impl Strategy<Value = Uuid> {
    prop_oneof![
        (arb_int60(), arb_sign(), arb_int60()).prop_map(|(v, s, o)| Uuid::new(v, s, o)),
        arb_int60().prop_map(Uuid::name),
        Just(Uuid::ZERO),
        Just(Uuid::NEVER),
        Just(Uuid::ERROR),
    ]
}

/// A UUID and a context that are usually close: same replica, nearby time.
fn arb_uuid_and_context() -> impl Strategy<Value = (Uuid, Uuid)> {
    prop_oneof![
        (arb_uuid(), arb_uuid()),
        (arb_value_and_context(), arb_value_and_context(), arb_sign(), arb_sign()).prop_map(
            |((v, cv), (o, co), s, cs)| (Uuid::new(v, s, o), Uuid::new(cv, cs, co))
        ),
        arb_uuid().prop_map(|u| (u, u)),
    ]
}

proptest! {
    #[test]
    fn int_round_trips_against_any_context((value, context) in arb_value_and_context()) {
        let mut out = Vec::new();
        let written = format_int(&mut out, value, context);
        prop_assert_eq!(written, out.len());
        prop_assert_eq!(parse_int(&out, context), (value, written));
    }

    #[test]
    fn int_round_trips_against_unrelated_context(value in arb_int60(), context in arb_int60()) {
        let mut out = Vec::new();
        format_int(&mut out, value, context);
        prop_assert_eq!(parse_int(&out, context), (value, out.len()));
    }

    #[test]
    fn int_encoding_never_exceeds_eleven_bytes((value, context) in arb_value_and_context()) {
        let mut out = Vec::new();
        format_int(&mut out, value, context);
        prop_assert!(out.len() <= 11);
    }

    #[test]
    fn common_prefix_of_self_is_ten(value in arb_int60()) {
        prop_assert_eq!(common_prefix(value, value), 10);
    }

    #[test]
    fn common_prefix_is_zero_when_top_sextets_differ(value in arb_int60(), flip in 1u64..64) {
        let context = value ^ (flip << 54);
        prop_assert_eq!(common_prefix(value, context), 0);
    }

    #[test]
    fn common_prefix_tier_is_valid((value, context) in arb_value_and_context()) {
        let tier = common_prefix(value, context);
        prop_assert!(tier == 0 || (4..=10).contains(&tier));
    }

    #[test]
    fn zero_tail_matches_trailing_zero_bits(value in 1..=INT60_FULL) {
        let (tail, rest) = zero_tail(value);
        prop_assert_eq!(tail, (value.trailing_zeros() / 6) as usize);
        prop_assert_eq!(rest, value >> (6 * tail));
    }

    #[test]
    fn uuid_round_trips((uuid, context) in arb_uuid_and_context()) {
        let mut out = Vec::new();
        let written = format_uuid(&mut out, uuid, context);
        prop_assert_eq!(parse_uuid(&out, context), (uuid, written));
    }

    #[test]
    fn flat_uuid_round_trips_under_any_context(uuid in arb_uuid(), context in arb_uuid()) {
        let mut out = Vec::new();
        format_uuid_flat(&mut out, uuid);
        prop_assert_eq!(parse_uuid(&out, context), (uuid, out.len()));
    }

    #[test]
    fn uuid_display_parses_back(uuid in arb_uuid()) {
        let text = uuid.to_string();
        prop_assert_eq!(text.parse::<Uuid>().unwrap(), uuid);
    }
}

#[test]
fn zero_tail_of_zero_is_ten() {
    assert_eq!(zero_tail(0), (10, 0));
}

#[test]
fn full_context_reuse_is_empty() {
    let uuid = Uuid::event(0x0123_4567_89ab_cdef, 0x0fed_cba9_8765_4321);
    let mut out = Vec::new();
    assert_eq!(format_uuid(&mut out, uuid, uuid), 0);
    assert_eq!(parse_uuid(&out, uuid), (uuid, 0));
}

#[test]
fn consecutive_events_compress_well() {
    let replica = 0x0123_4567_89ab_cdef;
    let prev = Uuid::event(0x0abc_def0_1234_0000, replica);
    let next = Uuid::event(0x0abc_def0_1234_1000, replica);
    let mut out = Vec::new();
    format_uuid(&mut out, next, prev);
    // one marker byte, one digit, the sign, nothing for the origin
    assert_eq!(out.len(), 3, "{}", String::from_utf8_lossy(&out));
    assert_eq!(parse_uuid(&out, prev), (next, 3));
}

#[test]
fn name_without_origin_is_bare_value() {
    let mut out = Vec::new();
    format_uuid(&mut out, Uuid::name_str("lww"), Uuid::event(1, 2));
    assert_eq!(out, b"lww");
}
