//! Batches: several frames sharing one buffer, separated by `.`.

use ron_core::constants::FRAME_TERM;

use crate::cursor::Cursor;
use crate::frame::Frame;

/// An ordered group of frames, typically the inputs of one reduction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    frames: Vec<Frame>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a multiframe buffer on frame terminators.
    ///
    /// Empty frames are skipped. A frame with an unparsable tail swallows
    /// the rest of the buffer, since the terminator can no longer be found
    /// reliably.
    pub fn parse(data: &[u8]) -> Self {
        let mut frames = Vec::new();
        let mut pos = 0;
        while pos < data.len() {
            let rest = &data[pos..];
            let mut cursor = Cursor::new(rest);
            while cursor.advance() {}
            if cursor.is_error() {
                frames.push(Frame::parse(rest));
                break;
            }
            let at = cursor.offset();
            let frame = Frame::parse(&rest[..at]);
            if !frame.is_empty() {
                frames.push(frame);
            }
            pos += at + 1;
        }
        Self { frames }
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// Every frame followed by the frame terminator.
    pub fn join(&self) -> Vec<u8> {
        let size = self.frames.iter().map(|f| f.len() + 1).sum();
        let mut out = Vec::with_capacity(size);
        for frame in &self.frames {
            out.extend_from_slice(frame.body());
            out.push(FRAME_TERM);
        }
        out
    }
}

impl From<Vec<Frame>> for Batch {
    fn from(frames: Vec<Frame>) -> Self {
        Self { frames }
    }
}

impl FromIterator<Frame> for Batch {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Batch {
    type Item = Frame;
    type IntoIter = std::vec::IntoIter<Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
