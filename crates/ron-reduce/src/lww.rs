//! Last-writer-wins reducer.
//!
//! An LWW object is a map from location to value. For every location the
//! op with the greatest event survives; equal events keep the op from the
//! earlier input. Reduced frames list the survivors in location order.
//!
//! # Examples
//!
//! ```
//! use ron_frame::Frame;
//! use ron_reduce::{LwwReducer, Reducer};
//!
//! let a = Frame::from("*lww#obj@1+A!:key'old',");
//! let b = Frame::from("*lww#obj@2+A!:key'new',");
//! let merged = LwwReducer::default().reduce(&a, &b).unwrap();
//! let value = merged.ops().nth(1).unwrap();
//! assert_eq!(value.atoms.get(0).unwrap().as_str().as_deref(), Some("new"));
//! ```

use ron_core::config::{ErrorOpPolicy, FormatConfig, ReduceConfig};
use ron_core::errors::ReduceError;
use ron_core::Uuid;
use ron_frame::{Frame, Op, Term};
use tracing::debug;

use crate::reducer::{body_ops, common_address, latest_event, reduced_header, Reducer};
use crate::uheap::{HeapOrder, UuidHeap};

/// Type UUID of LWW objects.
pub const LWW_UUID: Uuid = Uuid::name_str("lww");

#[derive(Debug, Clone, Copy, Default)]
pub struct LwwReducer {
    error_ops: ErrorOpPolicy,
}

impl LwwReducer {
    pub fn new(config: &ReduceConfig) -> Self {
        Self {
            error_ops: config.error_ops,
        }
    }

    pub fn with_policy(error_ops: ErrorOpPolicy) -> Self {
        Self { error_ops }
    }

    /// Registry constructor.
    pub fn make(config: &ReduceConfig) -> Box<dyn Reducer> {
        Box::new(Self::new(config))
    }

    fn start(&self, inputs: &[&Frame]) -> Result<Option<Frame>, ReduceError> {
        let Some((rdt, object)) = common_address(inputs)? else {
            return Ok(None);
        };
        let size = inputs.iter().map(|frame| frame.body().len()).sum();
        let mut out = Frame::with_capacity(size, FormatConfig::default());
        out.append_op(&reduced_header(rdt, object, latest_event(inputs)));
        Ok(Some(out))
    }

    fn sorted_body<'a>(&self, frame: &'a Frame) -> Result<Vec<Op<'a>>, ReduceError> {
        let mut ops = body_ops(frame, self.error_ops)?;
        if !is_sorted(&ops, |a, b| (a.location(), a.event()) <= (b.location(), b.event())) {
            ops.sort_by_key(|op| (op.location(), op.event()));
        }
        Ok(ops)
    }
}

fn is_sorted<T>(items: &[T], ordered: impl Fn(&T, &T) -> bool) -> bool {
    items.windows(2).all(|w| ordered(&w[0], &w[1]))
}

fn emit(out: &mut Frame, op: &Op<'_>) {
    out.append_op(&op.clone().with_term(Term::Reduced));
}

impl Reducer for LwwReducer {
    fn rdt(&self) -> Uuid {
        LWW_UUID
    }

    fn reduce(&self, a: &Frame, b: &Frame) -> Result<Frame, ReduceError> {
        let Some(mut out) = self.start(&[a, b])? else {
            return Ok(Frame::new());
        };
        let xs = body_ops(a, self.error_ops)?;
        let ys = body_ops(b, self.error_ops)?;
        for ops in [&xs, &ys] {
            if !is_sorted(ops, |p, q| p.location() < q.location()) {
                return Err(ReduceError::NotIncremental {
                    rdt: LWW_UUID,
                    reason: "locations are not strictly ascending".to_string(),
                });
            }
        }

        let (mut i, mut j) = (0, 0);
        while i < xs.len() && j < ys.len() {
            let (x, y) = (&xs[i], &ys[j]);
            match x.location().cmp(&y.location()) {
                std::cmp::Ordering::Equal => {
                    emit(&mut out, if x.event() < y.event() { y } else { x });
                    i += 1;
                    j += 1;
                }
                std::cmp::Ordering::Less => {
                    emit(&mut out, x);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    emit(&mut out, y);
                    j += 1;
                }
            }
        }
        for op in xs[i..].iter().chain(&ys[j..]) {
            emit(&mut out, op);
        }
        Ok(out)
    }

    fn reduce_all(&self, inputs: &[&Frame]) -> Result<Frame, ReduceError> {
        let Some(mut out) = self.start(inputs)? else {
            return Ok(Frame::new());
        };
        let streams = inputs
            .iter()
            .map(|frame| self.sorted_body(frame))
            .collect::<Result<Vec<_>, _>>()?;

        let mut heap = UuidHeap::with_capacity(HeapOrder::Ascending, streams.len());
        let mut cursors = vec![0usize; streams.len()];
        for (source, ops) in streams.iter().enumerate() {
            if let Some(op) = ops.first() {
                heap.put_from(op.location(), source);
            }
        }

        let mut merged = 0usize;
        while let Some(head) = heap.take_from() {
            let location = head.uuid;
            let mut winner: Option<&Op<'_>> = None;
            let mut source = Some(head.source);
            while let Some(s) = source {
                let ops = &streams[s];
                while let Some(op) = ops.get(cursors[s]).filter(|op| op.location() == location) {
                    if winner.map_or(true, |w| w.event() < op.event()) {
                        winner = Some(op);
                    }
                    cursors[s] += 1;
                }
                if let Some(next) = ops.get(cursors[s]) {
                    heap.put_from(next.location(), s);
                }
                source = heap
                    .peek()
                    .filter(|entry| entry.uuid == location)
                    .and_then(|_| heap.take_from())
                    .map(|entry| entry.source);
            }
            if let Some(op) = winner {
                emit(&mut out, op);
                merged += 1;
            }
        }
        debug!(inputs = inputs.len(), locations = merged, "lww full reduction");
        Ok(out)
    }
}
