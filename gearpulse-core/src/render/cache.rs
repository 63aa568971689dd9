//! Render cache: last-written row tracking
//!
//! The LCD flickers visibly when rows are rewritten every telemetry line, so
//! each row is compared against the last content physically written and only
//! touched on change. Comparison is exact equality over the full 16 bytes,
//! never a per-column diff.

use super::row::{self, Row, BLANK_ROW, ROW_WIDTH};
use crate::traits::CharDisplay;

/// Tracks what each display row currently shows.
#[derive(Debug, Clone)]
pub struct RenderCache {
    rows: [Row; 2],
}

impl RenderCache {
    /// Create a cache with both rows assumed blank.
    pub const fn new() -> Self {
        Self {
            rows: [BLANK_ROW; 2],
        }
    }

    /// Forget the tracked content, treating both rows as blank.
    pub fn reset(&mut self) {
        self.rows = [BLANK_ROW; 2];
    }

    /// Last content written to a row.
    pub fn row(&self, row: u8) -> &Row {
        &self.rows[(row as usize).min(1)]
    }

    /// Write `content` to a row unless it is already showing.
    ///
    /// On change the row is cleared with spaces, rewritten in full, and the
    /// cache entry updated. Idempotent: a second call with identical content
    /// performs no physical writes.
    pub fn sync_row<D: CharDisplay>(&mut self, display: &mut D, row: u8, content: &Row) {
        let idx = (row as usize).min(1);
        if self.rows[idx] == *content {
            return;
        }

        display.set_cursor(0, row);
        for _ in 0..ROW_WIDTH {
            display.write_byte(b' ');
        }
        display.set_cursor(0, row);
        for &b in content {
            display.write_byte(b);
        }

        self.rows[idx] = *content;
    }

    /// Sync both rows of a screen.
    pub fn sync_screen<D: CharDisplay>(&mut self, display: &mut D, screen: &[Row; 2]) {
        self.sync_row(display, 0, &screen[0]);
        self.sync_row(display, 1, &screen[1]);
    }

    /// Show a two-line banner, bypassing the diff.
    ///
    /// Banners follow a full `clear()` so the diff would be wrong anyway;
    /// the cache is updated to match what ends up on the panel.
    pub fn show_banner<D: CharDisplay>(&mut self, display: &mut D, line0: &str, line1: &str) {
        display.clear();
        display.set_cursor(0, 0);
        display.print(line0);
        if !line1.is_empty() {
            display.set_cursor(0, 1);
            display.print(line1);
        }
        self.rows[0] = row::from_str(line0);
        self.rows[1] = row::from_str(line1);
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::render::row::from_str;

    /// Recording fake display for render tests.
    #[derive(Debug, Default)]
    pub(crate) struct MockDisplay {
        pub writes: usize,
        pub clears: usize,
        pub backlight_on: bool,
        cursor: (u8, u8),
        pub rows: [Row; 2],
    }

    impl CharDisplay for MockDisplay {
        fn set_cursor(&mut self, col: u8, row: u8) {
            self.cursor = (col, row);
        }

        fn write_byte(&mut self, byte: u8) {
            let (col, row) = self.cursor;
            if (col as usize) < ROW_WIDTH && (row as usize) < 2 {
                self.rows[row as usize][col as usize] = byte;
            }
            self.cursor.0 = col.saturating_add(1);
            self.writes += 1;
        }

        fn clear(&mut self) {
            self.rows = [BLANK_ROW; 2];
            self.cursor = (0, 0);
            self.clears += 1;
        }

        fn backlight(&mut self, on: bool) {
            self.backlight_on = on;
        }

        fn define_glyph(&mut self, _slot: u8, _bitmap: &[u8; 8]) {}
    }

    #[test]
    fn test_identical_content_writes_once() {
        let mut cache = RenderCache::new();
        let mut display = MockDisplay::default();
        let content = from_str("CPU:  61");

        cache.sync_row(&mut display, 0, &content);
        let after_first = display.writes;
        assert!(after_first > 0);

        cache.sync_row(&mut display, 0, &content);
        assert_eq!(display.writes, after_first);
    }

    #[test]
    fn test_changed_content_rewrites() {
        let mut cache = RenderCache::new();
        let mut display = MockDisplay::default();

        cache.sync_row(&mut display, 0, &from_str("CPU:  61"));
        cache.sync_row(&mut display, 0, &from_str("CPU:  62"));
        assert_eq!(&display.rows[0], &from_str("CPU:  62"));
    }

    #[test]
    fn test_rows_cached_independently() {
        let mut cache = RenderCache::new();
        let mut display = MockDisplay::default();

        cache.sync_screen(&mut display, &[from_str("a line"), from_str("b line")]);
        let writes = display.writes;

        // Only row 1 changes.
        cache.sync_screen(&mut display, &[from_str("a line"), from_str("c line")]);
        assert_eq!(display.writes - writes, 2 * ROW_WIDTH);
    }

    #[test]
    fn test_reset_forces_rewrite() {
        let mut cache = RenderCache::new();
        let mut display = MockDisplay::default();
        let content = from_str("same");

        cache.sync_row(&mut display, 0, &content);
        cache.reset();
        let writes = display.writes;
        cache.sync_row(&mut display, 0, &content);
        assert!(display.writes > writes);
    }

    #[test]
    fn test_banner_updates_cache() {
        let mut cache = RenderCache::new();
        let mut display = MockDisplay::default();

        cache.show_banner(&mut display, "GearPulse", "");
        assert_eq!(display.clears, 1);
        assert_eq!(cache.row(0), &from_str("GearPulse"));
        assert_eq!(cache.row(1), &BLANK_ROW);

        // A follow-up sync of the same text is suppressed.
        let writes = display.writes;
        cache.sync_row(&mut display, 0, &from_str("GearPulse"));
        assert_eq!(display.writes, writes);
    }
}
