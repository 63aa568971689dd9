//! HD44780 1602 LCD driver
//!
//! Drives a 16x2 character module through a PCF8574 I2C backpack in 4-bit
//! mode. The panel has no status feedback, so the driver is fire-and-forget:
//! a failed bus write is logged and skipped, and the next full redraw
//! repaints whatever was lost.

use defmt::warn;
use embassy_time::{block_for, Duration};
use embedded_hal::i2c::I2c;

use gearpulse_core::traits::CharDisplay;

/// PCF8574 backpack I2C address (0x27 on most modules, 0x3F on some).
const LCD_ADDR: u8 = 0x27;

/// Backpack pin mapping: P0=RS, P1=RW, P2=EN, P3=backlight, P4-P7=D4-D7.
mod pin {
    pub const RS: u8 = 0x01;
    pub const EN: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;
}

/// HD44780 instructions
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const ENTRY_MODE: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_CGRAM_ADDR: u8 = 0x40;
    pub const SET_DDRAM_ADDR: u8 = 0x80;
}

/// DDRAM base address per row.
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

/// 16x2 character LCD behind a PCF8574 backpack.
pub struct Lcd1602<I2C> {
    i2c: I2C,
    backlight: u8,
}

impl<I2C: I2c> Lcd1602<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            backlight: pin::BACKLIGHT,
        }
    }

    /// Run the HD44780 4-bit initialization dance.
    ///
    /// The controller powers up in 8-bit mode; three function-set pulses
    /// with datasheet delays force a known state before switching to 4-bit.
    pub fn init(&mut self) {
        block_for(Duration::from_millis(50));

        self.write_nibble(0x30);
        block_for(Duration::from_micros(4500));
        self.write_nibble(0x30);
        block_for(Duration::from_micros(4500));
        self.write_nibble(0x30);
        block_for(Duration::from_micros(150));
        self.write_nibble(0x20);

        // 4-bit, 2 lines, 5x8 font
        self.command(cmd::FUNCTION_SET | 0x08);
        // Display on, cursor and blink off
        self.command(cmd::DISPLAY_CONTROL | 0x04);
        self.command(cmd::CLEAR);
        block_for(Duration::from_millis(2));
        // Left-to-right entry, no display shift
        self.command(cmd::ENTRY_MODE | 0x02);
    }

    fn bus_write(&mut self, byte: u8) {
        if self.i2c.write(LCD_ADDR, &[byte]).is_err() {
            warn!("lcd: i2c write failed");
        }
    }

    /// Clock the high nibble of `bits` into the controller with an EN strobe.
    ///
    /// The low nibble carries the control lines (RS).
    fn write_nibble(&mut self, bits: u8) {
        let data = bits | self.backlight;
        self.bus_write(data | pin::EN);
        block_for(Duration::from_micros(1));
        self.bus_write(data);
        block_for(Duration::from_micros(50));
    }

    fn send(&mut self, byte: u8, control: u8) {
        self.write_nibble((byte & 0xF0) | control);
        self.write_nibble((byte << 4) | control);
    }

    fn command(&mut self, cmd: u8) {
        self.send(cmd, 0);
    }
}

impl<I2C: I2c> CharDisplay for Lcd1602<I2C> {
    fn set_cursor(&mut self, col: u8, row: u8) {
        let offset = ROW_OFFSETS[(row as usize) % ROW_OFFSETS.len()];
        self.command(cmd::SET_DDRAM_ADDR | (offset + col));
    }

    fn write_byte(&mut self, byte: u8) {
        self.send(byte, pin::RS);
    }

    fn clear(&mut self) {
        self.command(cmd::CLEAR);
        block_for(Duration::from_millis(2));
    }

    fn backlight(&mut self, on: bool) {
        self.backlight = if on { pin::BACKLIGHT } else { 0 };
        self.bus_write(self.backlight);
    }

    fn define_glyph(&mut self, slot: u8, bitmap: &[u8; 8]) {
        self.command(cmd::SET_CGRAM_ADDR | ((slot & 0x07) << 3));
        for &row in bitmap {
            self.send(row, pin::RS);
        }
        // Leave CGRAM addressing mode
        self.command(cmd::SET_DDRAM_ADDR);
    }
}
