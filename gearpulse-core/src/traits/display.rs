//! Character display trait for the 16x2 LCD
//!
//! Models an HD44780-class character module: a cursor, raw data-byte writes,
//! a backlight, and eight CGRAM slots for custom glyphs. Writes are
//! infallible by contract — the panel has no status feedback and the render
//! cache assumes every write landed.

/// Display width in character cells.
pub const DISPLAY_COLS: usize = 16;

/// Number of display rows.
pub const DISPLAY_ROWS: usize = 2;

/// Trait for the 16x2 character display.
///
/// Data bytes 0-7 select the custom glyphs registered with
/// [`define_glyph`](CharDisplay::define_glyph); all other values are the
/// controller's built-in character set (0xDF is the degree sign).
pub trait CharDisplay {
    /// Move the cursor to a column/row position
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Write one raw display data byte at the cursor
    fn write_byte(&mut self, byte: u8);

    /// Write an ASCII string at the cursor
    fn print(&mut self, text: &str) {
        for &b in text.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Clear the whole display and home the cursor
    fn clear(&mut self);

    /// Switch the backlight on or off
    fn backlight(&mut self, on: bool);

    /// Upload a custom 5x8 glyph bitmap to one of the 8 CGRAM slots
    ///
    /// Each byte holds one pixel row in its low 5 bits, top row first.
    fn define_glyph(&mut self, slot: u8, bitmap: &[u8; 8]);
}
