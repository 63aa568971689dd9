//! Fixed-width row construction
//!
//! Every row handed to the render cache is exactly 16 bytes, space padded.
//! [`RowBuf`] is a bounded writer over that width: pushes beyond column 15
//! are dropped, so no format string can ever overflow the panel.

use core::fmt;

use crate::traits::display::DISPLAY_COLS;

/// Row width in character cells.
pub const ROW_WIDTH: usize = DISPLAY_COLS;

/// One display row of raw data bytes.
///
/// Raw bytes rather than `str` because glyph codes 0-7 are not UTF-8.
pub type Row = [u8; ROW_WIDTH];

/// An all-spaces row.
pub const BLANK_ROW: Row = [b' '; ROW_WIDTH];

/// Bounded builder for one row. Truncates at the row width.
#[derive(Debug, Clone)]
pub struct RowBuf {
    buf: Row,
    len: usize,
}

impl RowBuf {
    /// Start a blank row.
    pub const fn new() -> Self {
        Self {
            buf: BLANK_ROW,
            len: 0,
        }
    }

    /// Append one raw data byte (glyph codes included).
    pub fn push_byte(&mut self, byte: u8) {
        if self.len < ROW_WIDTH {
            self.buf[self.len] = byte;
            self.len += 1;
        }
    }

    /// Append an ASCII string.
    pub fn push_str(&mut self, text: &str) {
        for &b in text.as_bytes() {
            self.push_byte(b);
        }
    }

    /// Finish the row; unused cells stay spaces.
    pub fn finish(self) -> Row {
        self.buf
    }
}

impl Default for RowBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for RowBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

/// Build a row from a string, truncated and space padded.
pub fn from_str(text: &str) -> Row {
    let mut buf = RowBuf::new();
    buf.push_str(text);
    buf.finish()
}

/// Build a row with `text` centered, as for the divergence value line.
pub fn centered(text: &str) -> Row {
    let mut row = BLANK_ROW;
    let bytes = text.as_bytes();
    let len = bytes.len().min(ROW_WIDTH);
    let start = (ROW_WIDTH - len) / 2;
    row[start..start + len].copy_from_slice(&bytes[..len]);
    row
}
