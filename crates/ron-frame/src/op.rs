//! Ops and their atom payloads.

use std::borrow::Cow;

use ron_core::codec::parse_uuid;
use ron_core::constants::{ATOM_PUNCT, MAX_ATOMS};
use ron_core::{Uuid, ERROR_UUID};
use smallvec::{smallvec, SmallVec};

use crate::spec::{Spec, Term};

/// Payload written in place of anything that failed to parse.
pub const PARSE_ERROR_BODY: &[u8] = b"=400'parse error'";

/// Kind of an atom, from its leading marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    Int,
    Float,
    String,
    Uuid,
}

impl AtomKind {
    pub const ALL: [AtomKind; 4] = [Self::Int, Self::Float, Self::String, Self::Uuid];

    pub const fn marker(self) -> u8 {
        ATOM_PUNCT[self as usize]
    }

    pub fn from_marker(byte: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.marker() == byte)
    }
}

/// One atom, marker included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atom<'a> {
    raw: &'a [u8],
}

impl<'a> Atom<'a> {
    pub fn kind(&self) -> Option<AtomKind> {
        self.raw.first().copied().and_then(AtomKind::from_marker)
    }

    /// Raw bytes, marker included.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.raw
    }

    fn token(&self) -> &'a [u8] {
        self.raw.get(1..).unwrap_or_default()
    }

    pub fn as_int(&self) -> Option<i64> {
        if self.kind()? != AtomKind::Int {
            return None;
        }
        std::str::from_utf8(self.token()).ok()?.parse().ok()
    }

    pub fn as_float(&self) -> Option<f64> {
        if self.kind()? != AtomKind::Float {
            return None;
        }
        std::str::from_utf8(self.token()).ok()?.parse().ok()
    }

    /// Unescaped string contents.
    pub fn as_str(&self) -> Option<Cow<'a, str>> {
        if self.kind()? != AtomKind::String {
            return None;
        }
        let inner = self.token().strip_suffix(b"'")?;
        if !inner.contains(&b'\\') {
            return std::str::from_utf8(inner).ok().map(Cow::Borrowed);
        }
        let mut out = Vec::with_capacity(inner.len());
        let mut bytes = inner.iter();
        while let Some(&b) = bytes.next() {
            if b != b'\\' {
                out.push(b);
                continue;
            }
            match bytes.next() {
                Some(b'n') => out.push(b'\n'),
                Some(b't') => out.push(b'\t'),
                Some(b'r') => out.push(b'\r'),
                Some(&other) => out.push(other),
                None => return None,
            }
        }
        String::from_utf8(out).ok().map(Cow::Owned)
    }

    /// UUID atoms are always absolute.
    pub fn as_uuid(&self) -> Option<Uuid> {
        if self.kind()? != AtomKind::Uuid {
            return None;
        }
        let token = self.token();
        let (uuid, used) = parse_uuid(token, Uuid::ZERO);
        (used > 0 && used == token.len()).then_some(uuid)
    }
}

/// Escape `text` into a string atom, quotes included.
pub fn escape_string_atom(out: &mut Vec<u8>, text: &str) {
    out.push(b'\'');
    for &b in text.as_bytes() {
        match b {
            b'\'' | b'\\' => out.extend_from_slice(&[b'\\', b]),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\t' => out.extend_from_slice(b"\\t"),
            b'\r' => out.extend_from_slice(b"\\r"),
            _ => out.push(b),
        }
    }
    out.push(b'\'');
}

/// Borrowed atom bytes of an op plus the offset of each atom.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Atoms<'a> {
    body: &'a [u8],
    offsets: SmallVec<[u32; MAX_ATOMS]>,
}

impl<'a> Atoms<'a> {
    /// `offsets` index into `body`, ascending, first one at zero.
    pub fn new(body: &'a [u8], offsets: SmallVec<[u32; MAX_ATOMS]>) -> Self {
        Self { body, offsets }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The fixed payload of error ops.
    pub fn parse_error() -> Atoms<'static> {
        Atoms {
            body: PARSE_ERROR_BODY,
            offsets: smallvec![0, 4],
        }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// All atom bytes, as they appear on the wire.
    pub fn body(&self) -> &'a [u8] {
        self.body
    }

    pub fn get(&self, index: usize) -> Option<Atom<'a>> {
        let start = *self.offsets.get(index)? as usize;
        let end = self
            .offsets
            .get(index + 1)
            .map_or(self.body.len(), |&next| next as usize);
        let raw = trim_end(self.body.get(start..end)?);
        Some(Atom { raw })
    }

    pub fn iter(&self) -> impl Iterator<Item = Atom<'a>> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

fn trim_end(bytes: &[u8]) -> &[u8] {
    let keep = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    &bytes[..keep]
}

/// A single op: spec, atoms and terminator.
///
/// Atoms borrow the frame buffer the op was read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Op<'a> {
    pub spec: Spec,
    pub atoms: Atoms<'a>,
    pub term: Term,
}

impl<'a> Op<'a> {
    pub fn new(spec: Spec, atoms: Atoms<'a>, term: Term) -> Self {
        Self { spec, atoms, term }
    }

    /// The op standing in for unparsable input decoded against `context`.
    pub fn parse_error(context: &Spec) -> Op<'static> {
        Op {
            spec: Spec::new(context.rdt(), context.object(), ERROR_UUID, Uuid::ZERO),
            atoms: Atoms::parse_error(),
            term: Term::Raw,
        }
    }

    pub fn rdt(&self) -> Uuid {
        self.spec.rdt()
    }

    pub fn object(&self) -> Uuid {
        self.spec.object()
    }

    pub fn event(&self) -> Uuid {
        self.spec.event()
    }

    pub fn location(&self) -> Uuid {
        self.spec.location()
    }

    pub fn is_header(&self) -> bool {
        self.term == Term::Header
    }

    pub fn is_query(&self) -> bool {
        self.term == Term::Query
    }

    /// Error ops carry the error UUID as their event.
    pub fn is_error(&self) -> bool {
        self.spec.event().is_error()
    }

    pub fn with_term(mut self, term: Term) -> Self {
        self.term = term;
        self
    }
}
