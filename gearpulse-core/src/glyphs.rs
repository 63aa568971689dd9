//! Custom 5x8 glyph bitmaps and their CGRAM slot assignments
//!
//! Eight slots: two network arrows and six bar-graph fill levels (0 pixels
//! wide through full cell). Loaded once at startup.

use crate::traits::CharDisplay;

/// CGRAM code of the up arrow (network upload).
pub const UP_ARROW_CODE: u8 = 0;

/// CGRAM code of the down arrow (network download).
pub const DOWN_ARROW_CODE: u8 = 1;

/// CGRAM code of the empty bar cell; fill level `n` (0-5) is at
/// `BAR_BASE_CODE + n`, so the full cell sits at code 7.
pub const BAR_BASE_CODE: u8 = 2;

/// Up arrow bitmap.
pub const UP_ARROW: [u8; 8] = [
    0b00100, 0b01110, 0b10101, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000,
];

/// Down arrow bitmap.
pub const DOWN_ARROW: [u8; 8] = [
    0b00100, 0b00100, 0b00100, 0b00100, 0b10101, 0b01110, 0b00100, 0b00000,
];

/// Bar-graph fill levels, 0 columns lit through all 5.
pub const BAR_LEVELS: [[u8; 8]; 6] = [
    [0b00000; 8],
    [0b10000; 8],
    [0b11000; 8],
    [0b11100; 8],
    [0b11110; 8],
    [0b11111; 8],
];

/// CGRAM code for a bar cell with `level` (0-5) of its 5 columns lit.
pub const fn bar_code(level: u8) -> u8 {
    BAR_BASE_CODE + level
}

/// Upload the full glyph set to the display. Called once after display init.
pub fn register<D: CharDisplay>(display: &mut D) {
    display.define_glyph(UP_ARROW_CODE, &UP_ARROW);
    display.define_glyph(DOWN_ARROW_CODE, &DOWN_ARROW);
    for (i, bitmap) in BAR_LEVELS.iter().enumerate() {
        display.define_glyph(bar_code(i as u8), bitmap);
    }
}
