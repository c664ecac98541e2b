//! The reducer contract and input handling shared by reducers.

use ron_core::config::{ErrorOpPolicy, ReduceConfig};
use ron_core::errors::ReduceError;
use ron_core::Uuid;
use ron_frame::{Frame, Op, Spec, Term};
use tracing::warn;

/// Merges frames of one replicated data type.
///
/// Both entry points must agree: `reduce_all` over any set of frames gives
/// the same surviving ops as folding `reduce` over them in causal order.
/// Reduction is associative, commutative over the set of surviving ops and
/// idempotent.
pub trait Reducer: Send + Sync {
    /// The data type this reducer handles.
    fn rdt(&self) -> Uuid;

    /// Combine two adjacent frames of the same object.
    ///
    /// Fails with [`ReduceError::NotIncremental`] when the pair cannot be
    /// merged without the full state; callers then use `reduce_all`.
    fn reduce(&self, a: &Frame, b: &Frame) -> Result<Frame, ReduceError>;

    /// Merge any number of frames of the same object, in any order.
    fn reduce_all(&self, inputs: &[&Frame]) -> Result<Frame, ReduceError>;
}

/// Builds a reducer instance for a registry.
pub type ReducerMaker = fn(&ReduceConfig) -> Box<dyn Reducer>;

/// Type and object shared by all non-empty inputs, `None` if every input
/// is empty.
pub fn common_address(inputs: &[&Frame]) -> Result<Option<(Uuid, Uuid)>, ReduceError> {
    let mut address = None;
    for frame in inputs.iter().filter(|f| !f.is_empty()) {
        let (rdt, object) = (frame.rdt(), frame.object());
        let Some((want_rdt, want_object)) = address else {
            address = Some((rdt, object));
            continue;
        };
        if rdt != want_rdt {
            return Err(ReduceError::TypeMismatch {
                expected: want_rdt,
                found: rdt,
            });
        }
        if object != want_object {
            return Err(ReduceError::ObjectMismatch {
                expected: want_object,
                found: object,
            });
        }
    }
    Ok(address)
}

/// The body ops of `frame`: the leading header dropped, error ops handled
/// per `policy`.
pub fn body_ops<'a>(frame: &'a Frame, policy: ErrorOpPolicy) -> Result<Vec<Op<'a>>, ReduceError> {
    let mut ops = Vec::new();
    for (index, op) in frame.ops().enumerate() {
        if index == 0 && op.is_header() {
            continue;
        }
        if op.is_error() {
            match policy {
                ErrorOpPolicy::Skip => {
                    warn!(object = %frame.object(), "skipping error op in reducer input");
                    continue;
                }
                ErrorOpPolicy::Keep => {}
                ErrorOpPolicy::Reject => {
                    return Err(ReduceError::BadInput {
                        reason: format!("error op in frame of {}", frame.object()),
                    })
                }
            }
        }
        ops.push(op);
    }
    Ok(ops)
}

/// Latest event among the inputs' headers and data ops.
pub fn latest_event(inputs: &[&Frame]) -> Uuid {
    inputs
        .iter()
        .flat_map(|frame| frame.ops())
        .filter(|op| !op.is_error())
        .map(|op| op.event())
        .max()
        .unwrap_or(Uuid::ZERO)
}

/// The header opening a reduced frame.
pub fn reduced_header(rdt: Uuid, object: Uuid, event: Uuid) -> Op<'static> {
    Op::new(
        Spec::new(rdt, object, event, Uuid::ZERO),
        Default::default(),
        Term::Header,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_ignores_empty_inputs() {
        let empty = Frame::new();
        let a = Frame::from("*lww#x@1+a:k=1;");
        let b = Frame::from("*lww#x@2+a:k=2;");
        assert_eq!(
            common_address(&[&empty, &a, &b]),
            Ok(Some((Uuid::name_str("lww"), Uuid::name_str("x"))))
        );
        assert_eq!(common_address(&[&empty]), Ok(None));
    }

    #[test]
    fn address_mismatch() {
        let a = Frame::from("*lww#x=1;");
        let b = Frame::from("*lww#y=1;");
        let c = Frame::from("*rga#x=1;");
        assert!(matches!(
            common_address(&[&a, &b]),
            Err(ReduceError::ObjectMismatch { .. })
        ));
        assert!(matches!(
            common_address(&[&a, &c]),
            Err(ReduceError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn error_policy_applies_to_body() {
        let frame = Frame::from("*lww#x@1+a!:k=1, ###");
        assert_eq!(body_ops(&frame, ErrorOpPolicy::Skip).unwrap().len(), 1);
        assert_eq!(body_ops(&frame, ErrorOpPolicy::Keep).unwrap().len(), 2);
        assert!(matches!(
            body_ops(&frame, ErrorOpPolicy::Reject),
            Err(ReduceError::BadInput { .. })
        ));
    }

    #[test]
    fn latest_event_skips_error_ops() {
        let a = Frame::from("*lww#x@1+a:k=1;@3+a:j=1; ###");
        let b = Frame::from("*lww#x@2+a:k=2;");
        assert_eq!(latest_event(&[&a, &b]), Uuid::event(3 << 54, 37 << 54));
    }
}
