//! UUID encoding: value token, optional sign byte, origin token.

use super::base64::unzip_prefix_separator;
use super::int::{format_int, format_int_flat, parse_int};
use crate::constants::{INT60_ERROR, ORIGIN_CLASS_MASK};
use crate::uuid::{Uuid, UuidSign};

/// Append `uuid` compressed against `context`; returns bytes written.
///
/// A UUID equal to its context encodes as nothing. A name with zero origin
/// is written as its bare value. The sign byte is dropped only when the
/// origin token is guaranteed to start with a prefix marker.
pub fn format_uuid(out: &mut Vec<u8>, uuid: Uuid, context: Uuid) -> usize {
    if uuid == context {
        return 0;
    }
    let start = out.len();
    let value_len = format_int(out, uuid.value(), context.value());
    if value_len > 0 && uuid.sign() == UuidSign::Name && uuid.origin() == 0 {
        return out.len() - start;
    }
    if needs_sign(uuid, context) {
        out.push(uuid.sign().to_byte());
    }
    format_int(out, uuid.origin(), context.origin());
    out.len() - start
}

/// Append `uuid` without any reference to a context.
///
/// The output decodes to the same UUID whatever context the reader holds.
pub fn format_uuid_flat(out: &mut Vec<u8>, uuid: Uuid) -> usize {
    let start = out.len();
    format_int_flat(out, uuid.value());
    if uuid.sign() == UuidSign::Name && uuid.origin() == 0 {
        return out.len() - start;
    }
    out.push(uuid.sign().to_byte());
    format_int_flat(out, uuid.origin());
    out.len() - start
}

fn needs_sign(uuid: Uuid, context: Uuid) -> bool {
    uuid.value() == context.value()
        || uuid.sign() != context.sign()
        || (uuid.origin() & ORIGIN_CLASS_MASK) != (context.origin() & ORIGIN_CLASS_MASK)
        || uuid.origin() == context.origin()
        || context.origin() == INT60_ERROR
}

/// Decode a UUID relative to `context`.
///
/// Returns the UUID and bytes consumed; zero consumed yields the context.
pub fn parse_uuid(input: &[u8], context: Uuid) -> (Uuid, usize) {
    let (value, mut off) = parse_int(input, context.value());
    let has_value = off > 0;
    let next = input.get(off).copied();
    if let Some(sign) = next.and_then(UuidSign::from_byte) {
        off += 1;
        let (origin, used) = parse_int(&input[off..], context.origin());
        return (Uuid::new(value, sign, origin), off + used);
    }
    if !has_value {
        return (context, 0);
    }
    if next.and_then(unzip_prefix_separator).is_some() {
        let (origin, used) = parse_int(&input[off..], context.origin());
        return (Uuid::new(value, context.sign(), origin), off + used);
    }
    (Uuid::name(value), off)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zip(uuid: Uuid, context: Uuid) -> String {
        let mut out = Vec::new();
        format_uuid(&mut out, uuid, context);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn equal_to_context_is_empty() {
        let u = Uuid::event(1 << 54, 5 << 54);
        assert_eq!(zip(u, u), "");
    }

    #[test]
    fn zero_against_zero_is_empty() {
        assert_eq!(zip(Uuid::ZERO, Uuid::ZERO), "");
        assert_eq!(parse_uuid(b"", Uuid::ZERO), (Uuid::ZERO, 0));
        assert_eq!(Uuid::ZERO.to_string(), "0");
    }

    #[test]
    fn name_with_zero_origin_is_bare() {
        assert_eq!(zip(Uuid::name_str("lww"), Uuid::ZERO), "lww");
        let context = Uuid::event(1 << 54, 1 << 54);
        assert_eq!(zip(Uuid::name_str("lww"), context), "lww");
    }

    #[test]
    fn event_keeps_sign_against_zero() {
        let u = Uuid::event(1 << 54, 2 << 54);
        assert_eq!(zip(u, Uuid::ZERO), "1+2");
    }

    #[test]
    fn same_replica_drops_sign() {
        let context = Uuid::event(0x0abc_def0_1234_5678, 0x0123_4567_89ab_cdef);
        let u = Uuid::event(0x0abc_def0_1234_5600, 0x0123_4567_89ab_cd00);
        let text = zip(u, context);
        assert!(!text.contains('+'), "{text}");
        assert_eq!(parse_uuid(text.as_bytes(), context), (u, text.len()));
    }

    #[test]
    fn same_value_different_origin_keeps_sign() {
        let context = Uuid::event(7 << 54, 1 << 54);
        let u = Uuid::event(7 << 54, 2 << 54);
        let text = zip(u, context);
        assert!(text.starts_with('+'), "{text}");
        assert_eq!(parse_uuid(text.as_bytes(), context), (u, text.len()));
    }

    #[test]
    fn flat_encoding_ignores_context() {
        let u = Uuid::event(0x0abc_def0_1234_5678, 0x0123_4567_89ab_cdef);
        let mut out = Vec::new();
        format_uuid_flat(&mut out, u);
        for context in [Uuid::ZERO, u, Uuid::ERROR, Uuid::event(0x0abc_def0_1234_0000, 3)] {
            assert_eq!(parse_uuid(&out, context), (u, out.len()));
        }
    }

    #[test]
    fn empty_input_yields_context() {
        let context = Uuid::event(3, 4);
        assert_eq!(parse_uuid(b"", context), (context, 0));
        assert_eq!(parse_uuid(b":x", context), (context, 0));
    }
}
