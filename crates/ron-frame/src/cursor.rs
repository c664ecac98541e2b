//! Forward cursor over the ops of a frame buffer.

use tracing::debug;

use crate::op::Op;
use crate::parse::{parse_op, Step};
use crate::spec::Context;

/// Where a cursor stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Positioned on a decoded op.
    Ok,
    /// Past the last op.
    AtEnd,
    /// Positioned on the synthetic error op; the rest is unparsable.
    Error,
}

/// Reads ops one at a time, each decoded against the one before it.
///
/// Once in [`CursorState::AtEnd`] or [`CursorState::Error`] the cursor no
/// longer moves.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    state: CursorState,
    op: Op<'a>,
    start: usize,
    end: usize,
    prev: Context,
}

impl<'a> Cursor<'a> {
    /// A cursor on the first op of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        let mut cursor = Self {
            data,
            state: CursorState::Ok,
            op: Op::default(),
            start: 0,
            end: 0,
            prev: Context::NONE,
        };
        cursor.read(0, Context::NONE);
        cursor
    }

    /// A stopped cursor at `offset`, after the op described by `prev`.
    pub(crate) fn at_end(data: &'a [u8], offset: usize, prev: Context) -> Self {
        Self {
            data,
            state: CursorState::AtEnd,
            op: Op::default(),
            start: offset,
            end: offset,
            prev,
        }
    }

    fn read(&mut self, pos: usize, context: Context) {
        self.prev = context;
        match parse_op(self.data, pos, &context) {
            Step::Op { op, end } => {
                self.state = CursorState::Ok;
                self.op = op;
                self.start = pos;
                self.end = end;
            }
            Step::End { at } => {
                self.state = CursorState::AtEnd;
                self.op = Op::default();
                self.start = at;
                self.end = at;
            }
            Step::Error { at } => {
                debug!(offset = at, "unparsable op, frame tail kept as data");
                self.state = CursorState::Error;
                self.op = Op::parse_error(&context.spec);
                self.start = at;
                self.end = self.data.len();
            }
        }
    }

    /// Move to the next op. Returns `false` once the cursor has stopped.
    pub fn advance(&mut self) -> bool {
        if self.state != CursorState::Ok {
            return false;
        }
        let context = Context::new(self.op.spec, self.op.term);
        self.read(self.end, context);
        self.state == CursorState::Ok
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn is_ok(&self) -> bool {
        self.state == CursorState::Ok
    }

    pub fn is_at_end(&self) -> bool {
        self.state == CursorState::AtEnd
    }

    pub fn is_error(&self) -> bool {
        self.state == CursorState::Error
    }

    /// The current op; the error op in the error state, a blank op at end.
    pub fn op(&self) -> &Op<'a> {
        &self.op
    }

    /// Offset where the current op starts.
    pub fn offset(&self) -> usize {
        self.start
    }

    /// Offset just past the current op.
    pub fn op_end(&self) -> usize {
        self.end
    }

    /// The context the current op was decoded against.
    pub fn prev(&self) -> Context {
        self.prev
    }

    /// The buffer being read.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Whether both cursors read the very same buffer.
    pub fn same_buffer(&self, other: &Cursor<'_>) -> bool {
        std::ptr::eq(self.data, other.data)
    }
}

/// Iterator over the ops of a frame, the error op included.
#[derive(Debug, Clone)]
pub struct Ops<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl<'a> Ops<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        Self {
            cursor,
            done: false,
        }
    }
}

impl<'a> Iterator for Ops<'a> {
    type Item = Op<'a>;

    fn next(&mut self) -> Option<Op<'a>> {
        if self.done {
            return None;
        }
        match self.cursor.state() {
            CursorState::AtEnd => {
                self.done = true;
                None
            }
            CursorState::Error => {
                self.done = true;
                Some(self.cursor.op().clone())
            }
            CursorState::Ok => {
                let op = self.cursor.op().clone();
                self.cursor.advance();
                Some(op)
            }
        }
    }
}
