//! 128-bit RON identifiers.
//!
//! A RON UUID is not a random identifier: it is a 60-bit `value`
//! (timestamp, sequence or name), a 4-bit `sign` and a 60-bit `origin`
//! (replica id). The sign code lives in the top four bits of the origin
//! word, so word equality covers all three parts.
//!
//! # Examples
//!
//! ```
//! use ron_core::uuid::{Uuid, UuidSign};
//!
//! let lww: Uuid = "lww".parse().unwrap();
//! assert_eq!(lww, Uuid::name_str("lww"));
//! assert_eq!(lww.sign(), UuidSign::Name);
//!
//! let event = Uuid::event(1 << 54, 7);
//! assert!(Uuid::ZERO < event && event < Uuid::NEVER);
//! assert_eq!(event.to_string().parse::<Uuid>().unwrap(), event);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec;
use crate::constants::{
    ABC, INT60_ERROR, INT60_FLAGS, INT60_FULL, INT60_INFINITY, INT60_LEN, SIGN_PUNCT,
};
use crate::errors::CodecError;

/// UUID kind, stored as a 4-bit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UuidSign {
    /// `$`: names, constants, type ids.
    Name = 0,
    /// `%`: hashes and numbers.
    Hash = 1,
    /// `+`: events: timestamp plus replica.
    Event = 2,
    /// `-`: derived events.
    Derived = 3,
}

impl UuidSign {
    /// The 4-bit code of this sign.
    pub const fn code(self) -> u64 {
        self as u64
    }

    /// Decode a 4-bit code; unknown codes are treated as names.
    pub const fn from_code(code: u64) -> Self {
        match code & 3 {
            1 => Self::Hash,
            2 => Self::Event,
            3 => Self::Derived,
            _ => Self::Name,
        }
    }

    /// The wire byte of this sign.
    pub const fn to_byte(self) -> u8 {
        SIGN_PUNCT[self as usize]
    }

    /// Parse a wire byte.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'$' => Some(Self::Name),
            b'%' => Some(Self::Hash),
            b'+' => Some(Self::Event),
            b'-' => Some(Self::Derived),
            _ => None,
        }
    }
}

/// A 128-bit identifier: value word plus origin word (sign in the top bits).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Uuid {
    value: u64,
    origin: u64,
}

/// Identity / absence.
pub const ZERO_UUID: Uuid = Uuid::ZERO;
/// Maximum timestamp, "infinite future".
pub const NEVER_UUID: Uuid = Uuid::NEVER;
/// Error marker.
pub const ERROR_UUID: Uuid = Uuid::ERROR;

impl Uuid {
    pub const ZERO: Uuid = Uuid::name(0);
    pub const NEVER: Uuid = Uuid::name(INT60_INFINITY);
    pub const ERROR: Uuid = Uuid::name(INT60_ERROR);

    /// Build a UUID; both halves are truncated to 60 bits.
    pub const fn new(value: u64, sign: UuidSign, origin: u64) -> Self {
        Self {
            value: value & INT60_FULL,
            origin: (origin & INT60_FULL) | (sign.code() << 60),
        }
    }

    /// A name UUID with zero origin.
    pub const fn name(value: u64) -> Self {
        Self::new(value, UuidSign::Name, 0)
    }

    /// An event UUID: timestamp plus replica.
    pub const fn event(value: u64, origin: u64) -> Self {
        Self::new(value, UuidSign::Event, origin)
    }

    /// A derived event UUID.
    pub const fn derived(value: u64, origin: u64) -> Self {
        Self::new(value, UuidSign::Derived, origin)
    }

    /// Compile-time name constructor: `name_str("lww")`.
    ///
    /// Panics (at compile time when used in a `const`) on names longer than
    /// ten characters or containing non base-64 bytes.
    pub const fn name_str(name: &str) -> Self {
        let bytes = name.as_bytes();
        if bytes.len() > INT60_LEN {
            panic!("name longer than 10 base-64 digits");
        }
        let mut value = 0u64;
        let mut i = 0;
        while i < INT60_LEN {
            value <<= 6;
            if i < bytes.len() {
                let digit = ABC[bytes[i] as usize];
                if digit < 0 {
                    panic!("name contains a non base-64 byte");
                }
                value |= digit as u64;
            }
            i += 1;
        }
        Self::name(value)
    }

    pub const fn value(&self) -> u64 {
        self.value
    }

    /// The 60-bit origin, without the sign code.
    pub const fn origin(&self) -> u64 {
        self.origin & INT60_FULL
    }

    pub const fn sign(&self) -> UuidSign {
        UuidSign::from_code((self.origin & INT60_FLAGS) >> 60)
    }

    pub const fn is_zero(&self) -> bool {
        self.value == 0 && self.origin == 0
    }

    /// True for the error sentinel and any UUID carrying the error value.
    pub const fn is_error(&self) -> bool {
        self.value == INT60_ERROR
    }

    pub const fn is_name(&self) -> bool {
        matches!(self.sign(), UuidSign::Name)
    }

    pub const fn is_event(&self) -> bool {
        matches!(self.sign(), UuidSign::Event | UuidSign::Derived)
    }
}

impl Ord for Uuid {
    /// Value first, then sign, then origin.
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| self.sign().cmp(&other.sign()))
            .then_with(|| self.origin().cmp(&other.origin()))
    }
}

impl PartialOrd for Uuid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::with_capacity(22);
        codec::format_uuid(&mut buf, *self, Uuid::ZERO);
        if buf.is_empty() {
            return f.write_str("0");
        }
        f.write_str(std::str::from_utf8(&buf).map_err(|_| fmt::Error)?)
    }
}

impl fmt::Debug for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uuid({self})")
    }
}

impl FromStr for Uuid {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.is_empty() {
            return Err(CodecError::Empty);
        }
        let (uuid, consumed) = codec::parse_uuid(bytes, Uuid::ZERO);
        if consumed == 0 {
            return Err(CodecError::InvalidByte {
                offset: 0,
                byte: bytes[0],
            });
        }
        if consumed < bytes.len() {
            return Err(CodecError::TrailingInput { offset: consumed });
        }
        Ok(uuid)
    }
}

impl Serialize for Uuid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Uuid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_order() {
        assert!(ZERO_UUID < NEVER_UUID);
        assert!(NEVER_UUID < ERROR_UUID);
        assert!(ERROR_UUID.is_error());
        assert!(ZERO_UUID.is_zero());
    }

    #[test]
    fn ordering_is_value_then_sign_then_origin() {
        let a = Uuid::name(5);
        let b = Uuid::event(5, 0);
        let c = Uuid::event(5, 1);
        let d = Uuid::name(6);
        assert!(a < b);
        assert!(b < c);
        assert!(c < d);
    }

    #[test]
    fn equality_includes_sign() {
        assert_ne!(Uuid::name(5), Uuid::event(5, 0));
        assert_eq!(Uuid::event(5, 9), Uuid::event(5, 9));
    }

    #[test]
    fn constructors_truncate_to_60_bits() {
        let u = Uuid::event(u64::MAX, u64::MAX);
        assert_eq!(u.value(), INT60_FULL);
        assert_eq!(u.origin(), INT60_FULL);
        assert_eq!(u.sign(), UuidSign::Event);
    }

    #[test]
    fn name_str_matches_parse() {
        assert_eq!(Uuid::name_str("lww"), "lww".parse().unwrap());
        assert_eq!(Uuid::name_str(""), Uuid::ZERO);
    }

    #[test]
    fn sign_bytes_round_trip() {
        for sign in [UuidSign::Name, UuidSign::Hash, UuidSign::Event, UuidSign::Derived] {
            assert_eq!(UuidSign::from_byte(sign.to_byte()), Some(sign));
        }
        assert_eq!(UuidSign::from_byte(b'x'), None);
    }
}
