//! Frames: owned op buffers with an append-only builder API.

use std::fmt;

use ron_core::config::FormatConfig;
use ron_core::constants::FRAME_TERM;
use ron_core::{Uuid, ERROR_UUID};
use smallvec::smallvec;
use tracing::{debug, warn};

use crate::batch::Batch;
use crate::cursor::{Cursor, CursorState, Ops};
use crate::op::{escape_string_atom, Atoms, Op};
use crate::parse::{format_op, parse_op, Step};
use crate::spec::{Context, Spec, Term};

/// An ordered, atomically processed sequence of ops.
///
/// The body is the only storage; ops are decoded on the fly by a
/// [`Cursor`]. The first op's spec is cached for header lookups and the
/// last op's spec is kept as the compression context for appends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    body: Vec<u8>,
    first: Option<Context>,
    last: Context,
    format: FormatConfig,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: FormatConfig) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_capacity(capacity: usize, format: FormatConfig) -> Self {
        Self {
            body: Vec::with_capacity(capacity),
            format,
            ..Self::default()
        }
    }

    /// Take ownership of `bytes` and read its first frame.
    ///
    /// Everything from the frame terminator on is dropped; use
    /// [`Batch::parse`] for buffers holding several frames. An unparsable
    /// tail stays in the body and reads back as an error op.
    pub fn parse(bytes: impl Into<Vec<u8>>) -> Self {
        let mut body = bytes.into();
        let mut first = None;
        let mut last = Context::NONE;
        let end = {
            let mut cursor = Cursor::new(&body);
            loop {
                match cursor.state() {
                    CursorState::Ok => {
                        let op = cursor.op();
                        let context = Context::new(op.spec, op.term);
                        first.get_or_insert(context);
                        last = context;
                        cursor.advance();
                    }
                    CursorState::AtEnd => break cursor.offset(),
                    CursorState::Error => {
                        let op = cursor.op();
                        first.get_or_insert(Context::new(op.spec, op.term));
                        break body.len();
                    }
                }
            }
        };
        if end < body.len() {
            if body[end + 1..].iter().any(|b| !b.is_ascii_whitespace()) {
                debug!(offset = end, "dropping bytes after the frame terminator");
            }
            body.truncate(end);
        }
        Self {
            body,
            first,
            last,
            format: FormatConfig::default(),
        }
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// No ops, not even an error op.
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    pub fn format(&self) -> FormatConfig {
        self.format
    }

    /// Applies to ops appended from now on.
    pub fn set_format(&mut self, format: FormatConfig) {
        self.format = format;
    }

    /// Spec of the first op.
    pub fn first_spec(&self) -> Option<Spec> {
        self.first.map(|c| c.spec)
    }

    /// Whether the first op is a header.
    pub fn is_header(&self) -> bool {
        self.first.and_then(|c| c.term) == Some(Term::Header)
    }

    /// Data type of the first op; zero for an empty frame.
    pub fn rdt(&self) -> Uuid {
        self.first.map_or(Uuid::ZERO, |c| c.spec.rdt())
    }

    /// Object of the first op; zero for an empty frame.
    pub fn object(&self) -> Uuid {
        self.first.map_or(Uuid::ZERO, |c| c.spec.object())
    }

    /// The frame's event: the header's when it has one, else the last op's.
    pub fn event(&self) -> Uuid {
        match self.first {
            Some(c) if c.term == Some(Term::Header) => c.spec.event(),
            _ => self.last.spec.event(),
        }
    }

    /// Context the next appended op is encoded against.
    pub fn last(&self) -> Context {
        self.last
    }

    /// A cursor on the first op.
    pub fn begin(&self) -> Cursor<'_> {
        Cursor::new(&self.body)
    }

    /// A cursor past the last op.
    pub fn end(&self) -> Cursor<'_> {
        Cursor::at_end(&self.body, self.body.len(), self.last)
    }

    pub fn ops(&self) -> Ops<'_> {
        Ops::new(self.begin())
    }

    /// Encode `op` at the end of the frame.
    pub fn append_op(&mut self, op: &Op<'_>) {
        format_op(&mut self.body, op, &self.last, self.format);
        let context = Context::new(op.spec, op.term);
        self.first.get_or_insert(context);
        self.last = context;
    }

    /// Append an op given as spec UUIDs plus atom text such as `=1 'x'`.
    ///
    /// The text may end with a terminator; without one the term follows
    /// the previous op. Text that does not parse as atoms is replaced by
    /// the parse error payload.
    pub fn append(&mut self, rdt: Uuid, object: Uuid, event: Uuid, location: Uuid, atoms: &str) {
        let spec = Spec::new(rdt, object, event, location);
        let text = atoms.as_bytes();
        let parsed = match parse_op(text, 0, &Context::NONE) {
            Step::Op { op, end } if text[end..].iter().all(u8::is_ascii_whitespace) => {
                let explicit = text[..end]
                    .trim_ascii_end()
                    .last()
                    .copied()
                    .and_then(Term::from_byte);
                Some((op.atoms, explicit))
            }
            Step::End { .. } => Some((Atoms::empty(), None)),
            _ => None,
        };
        let op = match parsed {
            Some((atoms, term)) => {
                Op::new(spec, atoms, term.unwrap_or_else(|| self.last.default_term()))
            }
            None => {
                warn!(%rdt, %object, "atom text does not parse, appending error payload");
                Op::new(spec, Atoms::parse_error(), self.last.default_term())
            }
        };
        self.append_op(&op);
    }

    /// Append the ops in `[from, till)` of another frame.
    ///
    /// The first op is re-encoded against this frame; the rest are copied
    /// verbatim. Nothing happens if the cursors read different buffers or
    /// `till` precedes `from`.
    pub fn append_range(&mut self, from: &Cursor<'_>, till: &Cursor<'_>) {
        if !from.same_buffer(till) || till.offset() <= from.offset() || from.is_at_end() {
            return;
        }
        self.append_op(from.op());
        if till.offset() > from.op_end() {
            let copied = &from.data()[from.op_end()..till.offset()];
            self.body.extend_from_slice(copied);
            self.last = till.prev();
        }
    }

    /// Append `from` and every op after it.
    pub fn append_all(&mut self, from: &Cursor<'_>) {
        let mut walker = from.clone();
        let mut last = from.prev();
        while walker.is_ok() {
            last = Context::new(walker.op().spec, walker.op().term);
            walker.advance();
        }
        let stop = if walker.is_error() {
            from.data().len()
        } else {
            walker.offset()
        };
        self.append_range(from, &Cursor::at_end(from.data(), stop, last));
    }

    /// Append every op of `other`.
    pub fn append_frame(&mut self, other: &Frame) {
        self.append_range(&other.begin(), &other.end());
    }

    /// Append an error op carrying `comment`, addressed to the current
    /// type and object.
    pub fn append_error(&mut self, comment: &str) {
        let mut body = Vec::with_capacity(comment.len() + 2);
        escape_string_atom(&mut body, comment);
        let spec = Spec::new(
            self.last.spec.rdt(),
            self.last.spec.object(),
            ERROR_UUID,
            Uuid::ZERO,
        );
        let op = Op::new(spec, Atoms::new(&body, smallvec![0]), Term::Raw);
        self.append_op(&op);
    }

    /// Close the frame with the frame terminator. Ops appended after it
    /// start a new frame of the same buffer; see [`Frame::split`].
    pub fn append_end(&mut self) {
        self.body.push(FRAME_TERM);
        if self.format.newlines {
            self.body.push(b'\n');
        }
        self.last = Context::NONE;
    }

    /// Split a buffer built with [`Frame::append_end`] into its frames.
    pub fn split(&self) -> Batch {
        Batch::parse(&self.body)
    }
}

impl From<&str> for Frame {
    fn from(text: &str) -> Self {
        Frame::parse(text.as_bytes())
    }
}

impl From<Vec<u8>> for Frame {
    fn from(bytes: Vec<u8>) -> Self {
        Frame::parse(bytes)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.body))
    }
}
