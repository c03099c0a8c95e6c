//! Per-session motion line cursor.

use super::{FRAME_TIME_MARKER, find_marker};
use crate::bvh::MotionData;
use std::sync::Arc;

/// Stateful line cursor over a loaded motion buffer.
///
/// Every connection owns its own cursor, so clients can sit at different
/// playback positions in the same buffer at the same time. The first call
/// seeks the start of the motion data: the `Frame Time` declaration, the
/// end of that line, then the first digit or minus sign. Each call after
/// that returns one motion line (terminator included) and advances; at the
/// end of the buffer the cursor wraps back to the first data line, so a
/// well-formed file plays forever.
pub struct MotionCursor {
    data: Arc<MotionData>,
    /// Wrap target, fixed by the first successful seek.
    first_line: Option<usize>,
    /// Offset where the next line starts.
    next: usize,
}

impl MotionCursor {
    /// Create a cursor at the "first data line unknown" position.
    pub fn new(data: Arc<MotionData>) -> Self {
        Self { data, first_line: None, next: 0 }
    }

    /// Offset of the first data line, once the initial seek has run.
    pub fn first_line(&self) -> Option<usize> {
        self.first_line
    }

    /// Return the next motion line and advance, wrapping at end of buffer.
    ///
    /// `None` means the buffer holds no motion data at all and the session
    /// is done; real playback never ends this way because the wrap target
    /// always holds at least one line.
    pub fn next_line(&mut self) -> Option<&[u8]> {
        let first = match self.first_line {
            Some(first) => first,
            None => {
                let first = seek_first_line(self.data.bytes())?;
                self.first_line = Some(first);
                self.next = first;
                first
            }
        };

        let start = self.next;
        // The line runs through its terminator; an unterminated final line
        // ends at the buffer instead.
        let end = find_from(self.data.bytes(), start, is_line_terminator)
            .map_or(self.data.len(), |terminator| terminator + 1);

        // The next line starts at the following digit or minus sign; none
        // left means loop playback from the first data line.
        self.next = find_from(self.data.bytes(), end, is_data_start).unwrap_or(first);

        Some(&self.data.bytes()[start..end])
    }
}

/// Locate the first motion data line: the `Frame Time` declaration, then
/// its line terminator, then the first digit-or-minus byte.
fn seek_first_line(bytes: &[u8]) -> Option<usize> {
    let marker = find_marker(bytes)?;
    let terminator = find_from(bytes, marker + FRAME_TIME_MARKER.len(), is_line_terminator)?;
    find_from(bytes, terminator, is_data_start)
}

fn find_from(bytes: &[u8], start: usize, predicate: impl Fn(u8) -> bool) -> Option<usize> {
    bytes.get(start..)?.iter().position(|&byte| predicate(byte)).map(|i| start + i)
}

fn is_line_terminator(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

fn is_data_start(byte: u8) -> bool {
    byte == b'-' || byte.is_ascii_digit()
}
