//! Op addressing: the four spec UUIDs and op terminators.

use ron_core::constants::{SPEC_PUNCT, TERM_PUNCT};
use ron_core::Uuid;

/// One of the four spec fields, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecField {
    /// `*`: data type of the object.
    Type = 0,
    /// `#`: target object.
    Object = 1,
    /// `@`: causal event.
    Event = 2,
    /// `:`: intra-object reference (slot, key).
    Location = 3,
}

impl SpecField {
    pub const ALL: [SpecField; 4] = [Self::Type, Self::Object, Self::Event, Self::Location];

    /// The separator byte preceding this field on the wire.
    pub const fn separator(self) -> u8 {
        SPEC_PUNCT[self as usize]
    }
}

/// Type, object, event and location of an op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Spec {
    uuids: [Uuid; 4],
}

impl Spec {
    pub const ZERO: Spec = Spec {
        uuids: [Uuid::ZERO; 4],
    };

    pub const fn new(rdt: Uuid, object: Uuid, event: Uuid, location: Uuid) -> Self {
        Self {
            uuids: [rdt, object, event, location],
        }
    }

    /// The replicated data type.
    pub const fn rdt(&self) -> Uuid {
        self.uuids[0]
    }

    pub const fn object(&self) -> Uuid {
        self.uuids[1]
    }

    pub const fn event(&self) -> Uuid {
        self.uuids[2]
    }

    pub const fn location(&self) -> Uuid {
        self.uuids[3]
    }

    pub const fn get(&self, field: SpecField) -> Uuid {
        self.uuids[field as usize]
    }

    pub fn set(&mut self, field: SpecField, uuid: Uuid) {
        self.uuids[field as usize] = uuid;
    }

    /// Copy with one field replaced.
    pub const fn with(mut self, field: SpecField, uuid: Uuid) -> Self {
        self.uuids[field as usize] = uuid;
        self
    }

    pub const fn uuids(&self) -> &[Uuid; 4] {
        &self.uuids
    }
}

/// How an op ends relative to its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Term {
    /// `;`: standalone op of a raw log.
    #[default]
    Raw,
    /// `,`: continuation of a reduced frame.
    Reduced,
    /// `!`: frame header.
    Header,
    /// `?`: query.
    Query,
}

impl Term {
    pub const fn to_byte(self) -> u8 {
        TERM_PUNCT[self as usize]
    }

    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b';' => Some(Self::Raw),
            b',' => Some(Self::Reduced),
            b'!' => Some(Self::Header),
            b'?' => Some(Self::Query),
            _ => None,
        }
    }
}

/// The op a new op is encoded or decoded against.
///
/// Only the spec and the terminator of the previous op matter; its atoms
/// never influence the next op's encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Context {
    pub spec: Spec,
    /// `None` when there is no previous op.
    pub term: Option<Term>,
}

impl Context {
    /// The context of the first op of a frame.
    pub const NONE: Context = Context {
        spec: Spec::ZERO,
        term: None,
    };

    pub const fn new(spec: Spec, term: Term) -> Self {
        Self {
            spec,
            term: Some(term),
        }
    }

    /// Terminator implied for an op that omits its own.
    pub const fn default_term(&self) -> Term {
        match self.term {
            None => Term::Raw,
            Some(Term::Header) | Some(Term::Reduced) => Term::Reduced,
            Some(term) => term,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_bytes_round_trip() {
        for term in [Term::Raw, Term::Reduced, Term::Header, Term::Query] {
            assert_eq!(Term::from_byte(term.to_byte()), Some(term));
        }
        assert_eq!(Term::from_byte(b'.'), None);
    }

    #[test]
    fn default_term_follows_previous_op() {
        assert_eq!(Context::NONE.default_term(), Term::Raw);
        assert_eq!(Context::new(Spec::ZERO, Term::Header).default_term(), Term::Reduced);
        assert_eq!(Context::new(Spec::ZERO, Term::Reduced).default_term(), Term::Reduced);
        assert_eq!(Context::new(Spec::ZERO, Term::Query).default_term(), Term::Query);
    }

    #[test]
    fn spec_fields_are_addressable() {
        let spec = Spec::ZERO.with(SpecField::Location, Uuid::name(3));
        assert_eq!(spec.location(), Uuid::name(3));
        assert_eq!(spec.get(SpecField::Type), Uuid::ZERO);
        assert_eq!(SpecField::Event.separator(), b'@');
    }
}
