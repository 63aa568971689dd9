//! Line framing for the serial telemetry stream.
//!
//! The sender terminates each JSON object with `\n` (some stacks emit `\r\n`;
//! both bytes act as terminators, an empty line between them is discarded).
//! Lines longer than [`MAX_LINE_LEN`] degrade instead of failing: excess
//! bytes are dropped and terminator scanning continues, so framing recovers
//! on the next line boundary.

use heapless::Vec;

/// Maximum accumulated line length in bytes.
pub const MAX_LINE_LEN: usize = 1024;

/// Minimum accumulated length for a line to be emitted.
///
/// Anything of 2 bytes or fewer cannot hold a useful telemetry object and is
/// discarded without a decode attempt. This is a cheap pre-filter, not
/// validation.
const MIN_LINE_LEN: usize = 2;

/// One terminator-delimited chunk of serial input (terminator excluded).
pub type Line = Vec<u8, MAX_LINE_LEN>;

/// Accumulates raw serial bytes into terminator-delimited lines.
///
/// Fed one byte at a time from the input drain loop; never blocks.
#[derive(Debug, Clone, Default)]
pub struct LineFramer {
    buffer: Line,
}

impl LineFramer {
    /// Create an empty framer.
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Feed a single input byte.
    ///
    /// Returns `Some(line)` when a terminator completes a line longer than
    /// two bytes; `None` otherwise. The internal buffer is reset after every
    /// emission or discard.
    pub fn feed(&mut self, byte: u8) -> Option<Line> {
        match byte {
            b'\n' | b'\r' => {
                let complete = if self.buffer.len() > MIN_LINE_LEN {
                    Some(self.buffer.clone())
                } else {
                    None
                };
                self.buffer.clear();
                complete
            }
            _ => {
                // Push fails silently once the buffer is full; the byte is
                // dropped but terminator scanning continues.
                let _ = self.buffer.push(byte);
                None
            }
        }
    }

    /// Discard any partially accumulated line.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Number of bytes accumulated toward the current line.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}
