//! # ron-frame
//!
//! The op and frame model of the RON engine.
//!
//! A [`Frame`] owns one byte buffer; ops inside it are never materialized
//! as a whole. A [`Cursor`] decodes them one at a time, each relative to
//! the op before it, handing out [`Op`]s whose atoms borrow the buffer.
//! Frames grow only by appending, either op by op or by copying a range
//! of another frame verbatim.
//!
//! Malformed input never fails a read: the cursor stops on a synthetic
//! error op and the unparsable tail stays in the frame as data.

pub mod batch;
pub mod checker;
pub mod cursor;
pub mod frame;
pub mod op;
mod parse;
pub mod spec;

pub use batch::Batch;
pub use checker::{Checker, ClockChecker, SyntaxChecker};
pub use cursor::{Cursor, CursorState, Ops};
pub use frame::Frame;
pub use op::{Atom, AtomKind, Atoms, Op, PARSE_ERROR_BODY};
pub use spec::{Context, Spec, SpecField, Term};
