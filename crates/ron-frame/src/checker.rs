//! Frame validation hooks run before a frame is accepted.

use ron_core::errors::FrameError;
use ron_core::Uuid;

use crate::cursor::CursorState;
use crate::frame::Frame;

/// Inspects a frame and rejects it with an error.
pub trait Checker {
    fn check(&mut self, frame: &Frame) -> Result<(), FrameError>;
}

/// Rejects unparsable frames, error ops and frames mixing objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxChecker;

impl Checker for SyntaxChecker {
    fn check(&mut self, frame: &Frame) -> Result<(), FrameError> {
        let mut cursor = frame.begin();
        let object = cursor.op().object();
        loop {
            match cursor.state() {
                CursorState::AtEnd => return Ok(()),
                CursorState::Error => {
                    return Err(FrameError::Unparsable {
                        offset: cursor.offset(),
                    })
                }
                CursorState::Ok => {
                    let op = cursor.op();
                    if op.is_error() {
                        return Err(FrameError::ErrorOp {
                            offset: cursor.offset(),
                        });
                    }
                    if op.object() != object {
                        return Err(FrameError::MixedObjects {
                            offset: cursor.offset(),
                            expected: object,
                            found: op.object(),
                        });
                    }
                }
            }
            cursor.advance();
        }
    }
}

/// Rejects events stamped later than a horizon; tracks the latest event
/// seen so far.
#[derive(Debug, Clone, Copy)]
pub struct ClockChecker {
    horizon: Uuid,
    latest: Uuid,
}

impl ClockChecker {
    pub fn new(horizon: Uuid) -> Self {
        Self {
            horizon,
            latest: Uuid::ZERO,
        }
    }

    pub fn set_horizon(&mut self, horizon: Uuid) {
        self.horizon = horizon;
    }

    /// Latest accepted event.
    pub fn latest(&self) -> Uuid {
        self.latest
    }
}

impl Checker for ClockChecker {
    fn check(&mut self, frame: &Frame) -> Result<(), FrameError> {
        let mut latest = self.latest;
        for op in frame.ops().filter(|op| !op.is_error()) {
            let event = op.event();
            if event.value() > self.horizon.value() {
                return Err(FrameError::ClockAhead {
                    event,
                    horizon: self.horizon,
                });
            }
            latest = latest.max(event);
        }
        self.latest = latest;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_accepts_single_object_frames() {
        let frame = Frame::from("*lww#obj@1+a!:x=1,:y=2,");
        assert_eq!(SyntaxChecker.check(&frame), Ok(()));
    }

    #[test]
    fn syntax_rejects_mixed_objects_and_garbage() {
        let mixed = Frame::from("*lww#a=1;#b=2;");
        assert!(matches!(
            SyntaxChecker.check(&mixed),
            Err(FrameError::MixedObjects { offset: 9, .. })
        ));
        let broken = Frame::from("*lww#a=1; ~~~");
        assert!(matches!(
            SyntaxChecker.check(&broken),
            Err(FrameError::Unparsable { offset: 10 })
        ));
    }

    #[test]
    fn clock_rejects_future_events() {
        let mut checker = ClockChecker::new(Uuid::event(5 << 54, 0));
        let ok = Frame::from("*lww#a@3+x=1;@4+x=2;");
        checker.check(&ok).unwrap();
        assert_eq!(checker.latest().value(), 4 << 54);

        let ahead = Frame::from("*lww#a@9+x=1;");
        assert!(matches!(
            checker.check(&ahead),
            Err(FrameError::ClockAhead { .. })
        ));
        assert_eq!(checker.latest().value(), 4 << 54);
    }
}
